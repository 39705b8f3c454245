use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::GateError;
use crate::models::{ContactMessage, FormFields};
use crate::rate_limit::{RateLimiter, RateLimits};
use crate::validation::{validate_email, validate_message, validate_name};

/// Validation plus rate limiting in front of the contact form.
///
/// Rules run in a fixed order and the first failure wins:
/// rate limit, empty fields, name, email, message length.
/// Only a submission that passes every rule records an attempt.
#[derive(Debug, Clone)]
pub struct Gatekeeper<C: Clock = SystemClock> {
    limiter: RateLimiter<C>,
}

impl<C: Clock> Gatekeeper<C> {
    pub fn new(limits: RateLimits, clock: C) -> Self {
        Self {
            limiter: RateLimiter::new(limits, clock),
        }
    }

    pub fn admit(&mut self, fields: &FormFields) -> Result<ContactMessage, GateError> {
        match self.evaluate(fields) {
            Ok(message) => {
                self.limiter.record_attempt();
                debug!(
                    attempts = self.limiter.state().attempts,
                    "contact submission admitted"
                );
                Ok(message)
            }
            Err(err) => {
                warn!(reason = err.reason(), "contact submission rejected");
                Err(err)
            }
        }
    }

    fn evaluate(&mut self, fields: &FormFields) -> Result<ContactMessage, GateError> {
        if !self.limiter.can_submit() {
            return Err(GateError::RateLimited);
        }

        let name = fields.name.trim();
        let email = fields.email.trim();
        let message = fields.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(GateError::MissingFields);
        }
        if !validate_name(name) {
            return Err(GateError::InvalidName);
        }
        if !validate_email(email) {
            return Err(GateError::InvalidEmail);
        }
        if !validate_message(message) {
            return Err(GateError::MessageLength);
        }

        Ok(ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }

    pub fn limiter(&self) -> &RateLimiter<C> {
        &self.limiter
    }

    // Nothing left to remember once the window has passed
    pub fn is_idle(&self) -> bool {
        self.limiter.window_elapsed()
    }
}
