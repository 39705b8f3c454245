use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use crate::error::SubmitError;
use crate::models::ContactMessage;

/// Whatever actually delivers an accepted contact message.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, message: &ContactMessage) -> Result<(), SubmitError>;
}

// POSTs the message as JSON to an endpoint (the relay, or a webhook)
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpSubmitter {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        // add http:// if not present
        let endpoint = if endpoint.starts_with("http") {
            endpoint
        } else {
            format!("http://{}", endpoint)
        };
        Self {
            client,
            endpoint,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, message: &ContactMessage) -> Result<(), SubmitError> {
        let res = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(message)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status.as_u16()));
        }
        Ok(())
    }
}

// Accepts everything and writes it to the log; used when no webhook is set
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSubmitter;

#[async_trait]
impl Submitter for LogSubmitter {
    async fn submit(&self, message: &ContactMessage) -> Result<(), SubmitError> {
        info!(
            name = %message.name,
            email = %message.email,
            chars = message.message.chars().count(),
            "contact message received"
        );
        Ok(())
    }
}
