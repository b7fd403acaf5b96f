pub mod chat_webhook;
pub mod log;
pub mod sink;

pub use chat_webhook::ChatWebhookSink;
pub use log::LogSink;
pub use sink::{MessageSink, OutboundMessage};
