use thiserror::Error;

pub const SUBMIT_FAILURE_TEXT: &str = "Something went wrong. Please try again later.";

/// Why the gatekeeper turned a submission away. `Display` is the text shown
/// to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Too many attempts. Please wait before trying again.")]
    RateLimited,

    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("Please enter a valid name (2-50 characters, letters only).")]
    InvalidName,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Message must be between 10 and 1000 characters.")]
    MessageLength,

    #[error("A submission is already in progress.")]
    Busy,
}

impl GateError {
    // Short label for logs and metrics
    pub fn reason(&self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::MissingFields => "missing_fields",
            Self::InvalidName => "invalid_name",
            Self::InvalidEmail => "invalid_email",
            Self::MessageLength => "message_length",
            Self::Busy => "busy",
        }
    }
}

// Delivery failures; visitors only ever see SUBMIT_FAILURE_TEXT
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint answered with status {0}")]
    Status(u16),

    #[error("delivery queue is closed")]
    QueueClosed,

    #[error("delivery worker dropped the job")]
    WorkerGone,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("skill bar '{id}' has an invalid width '{value}'")]
    InvalidSkillWidth { id: String, value: String },
}
