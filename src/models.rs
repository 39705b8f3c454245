use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::validation::escape_html;

pub const SUCCESS_TEXT: &str = "Thank you for your message! I will get back to you soon.";

// How long a feedback banner stays up
pub const FEEDBACK_DISPLAY: Duration = Duration::from_millis(4000);

// Raw contact form contents, as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormFields {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    // Form reset after a successful send
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}

// Trimmed and validated form contents, ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Copy with every field HTML-escaped, for sinks that render markup.
    pub fn escaped(&self) -> Self {
        Self {
            name: escape_html(&self.name),
            email: escape_html(&self.email),
            message: escape_html(&self.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Success,
    Error,
}

// Banner text shown under the form
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
}

impl Feedback {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == FeedbackKind::Success
    }

    pub fn display_for(&self) -> Duration {
        FEEDBACK_DISPLAY
    }
}
