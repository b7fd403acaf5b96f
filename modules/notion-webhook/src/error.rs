use thiserror::Error;

/// Conditions that abort a webhook request. Everything else degrades to fallback text.
#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("The '{0}' event isn't currently supported by the Notion webhook")]
    UnsupportedEventType(String),

    #[error("Missing '{0}' argument")]
    MissingField(&'static str),

    #[error("Malformed payload: {0}")]
    InvalidPayload(String),
}

impl WebhookError {
    /// Machine-readable code returned alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            WebhookError::UnsupportedEventType(_) => "UNSUPPORTED_WEBHOOK_EVENT_TYPE",
            WebhookError::MissingField(_) => "REQUEST_VARIABLE_MISSING",
            WebhookError::InvalidPayload(_) => "BAD_REQUEST",
        }
    }
}

impl From<serde_json::Error> for WebhookError {
    fn from(err: serde_json::Error) -> Self {
        WebhookError::InvalidPayload(err.to_string())
    }
}
