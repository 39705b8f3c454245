use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::error;

use crate::clock::{Clock, SystemClock};
use crate::error::{GateError, SUBMIT_FAILURE_TEXT};
use crate::gatekeeper::Gatekeeper;
use crate::models::{Feedback, FormFields, SUCCESS_TEXT};
use crate::submit::Submitter;

/// Shared view of the submit button. Hosts read `is_busy` to render it
/// disabled; the form flips it through a `BusyGuard`.
#[derive(Debug, Clone, Default)]
pub struct SubmitControl {
    busy: Arc<AtomicBool>,
}

impl SubmitControl {
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    // None when someone else already holds it
    pub fn acquire(&self) -> Option<BusyGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard {
                busy: Arc::clone(&self.busy),
            })
    }
}

// Re-enables the control when dropped
#[derive(Debug)]
pub struct BusyGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

/// The contact form of one page session.
pub struct ContactForm<C: Clock = SystemClock> {
    gatekeeper: Gatekeeper<C>,
    submitter: Arc<dyn Submitter>,
    control: SubmitControl,
    fields: FormFields,
}

impl<C: Clock> ContactForm<C> {
    pub fn new(gatekeeper: Gatekeeper<C>, submitter: Arc<dyn Submitter>) -> Self {
        Self {
            gatekeeper,
            submitter,
            control: SubmitControl::default(),
            fields: FormFields::default(),
        }
    }

    pub fn control(&self) -> SubmitControl {
        self.control.clone()
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    pub fn gatekeeper(&self) -> &Gatekeeper<C> {
        &self.gatekeeper
    }

    /// Handles one click on "send". The control stays disabled until this
    /// returns, whatever the outcome.
    pub async fn submit(&mut self) -> Feedback {
        let Some(_busy) = self.control.acquire() else {
            return Feedback::error(GateError::Busy.to_string());
        };

        let message = match self.gatekeeper.admit(&self.fields) {
            Ok(message) => message,
            Err(err) => return Feedback::error(err.to_string()),
        };

        match self.submitter.submit(&message).await {
            Ok(()) => {
                self.fields.clear();
                Feedback::success(SUCCESS_TEXT)
            }
            Err(err) => {
                error!("contact submission failed: {}", err);
                Feedback::error(SUBMIT_FAILURE_TEXT)
            }
        }
    }
}
