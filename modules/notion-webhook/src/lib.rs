pub mod config;
pub mod delivery;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod filter;
pub mod format;
pub mod resolver;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod topic;
pub mod traits;

pub use config::Config;
pub use dispatch::{dispatch, DispatchOutcome, RequestOptions};
pub use error::WebhookError;
pub use event::{EntityKind, EventType, NotionEvent};
pub use format::{FormattedMessage, Formatter, REGISTRY};
pub use resolver::Resolver;
pub use traits::NotionLookup;
