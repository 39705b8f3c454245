use clap::Parser;

use crate::rate_limit::RateLimits;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "folio-gate")]
#[command(about = "Contact form relay for the portfolio site")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Accepted submissions per client before the cooldown kicks in
    #[arg(long, default_value_t = 3)]
    pub max_attempts: u32,

    // Cooldown window in seconds
    #[arg(long, default_value_t = 60)]
    pub cooldown_secs: u64,

    // Webhook that receives accepted messages (logged only when absent)
    // Example: "https://hooks.example.com/contact"
    #[arg(short, long)]
    pub forward_url: Option<String>,

    // How often idle clients are dropped, in seconds
    #[arg(long, default_value_t = 60)]
    pub janitor_interval: u64,

    // Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_filter: String,
}

impl Args {
    pub fn rate_limits(&self) -> RateLimits {
        RateLimits {
            max_attempts: self.max_attempts,
            cooldown_ms: i64::try_from(self.cooldown_secs.saturating_mul(1000)).unwrap_or(i64::MAX),
        }
    }
}
