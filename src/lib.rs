//! Contact form gatekeeping and view-state tracking for a portfolio site,
//! plus the relay that receives the form's messages.

pub mod clock;
pub mod config;
pub mod error;
pub mod form;
pub mod gatekeeper;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod page;
pub mod projects;
pub mod rate_limit;
pub mod state;
pub mod submit;
pub mod theme;
pub mod tracker;
pub mod validation;
pub mod viewport;
pub mod worker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{GateError, LayoutError, SubmitError};
pub use form::{BusyGuard, ContactForm, SubmitControl};
pub use gatekeeper::Gatekeeper;
pub use models::{ContactMessage, Feedback, FeedbackKind, FormFields};
pub use rate_limit::{RateLimiter, RateLimiterState, RateLimits};
pub use submit::{HttpSubmitter, LogSubmitter, Submitter};
pub use tracker::{PageLayout, ViewStateTracker};
pub use viewport::{ElementId, IntersectionEntry, ObserverKind, ObserverOptions, ViewEffect, ViewPort};
