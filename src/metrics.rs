use lazy_static::lazy_static;
use prometheus::{
    Counter, Gauge, Histogram, IntCounterVec, register_counter, register_gauge,
    register_histogram, register_int_counter_vec,
};

lazy_static! {
    pub static ref CONTACT_REQUESTS: Counter =
        register_counter!("folio_contact_requests_total", "Total contact form requests")
            .expect("metric registers");
    pub static ref CONTACT_ACCEPTED: Counter =
        register_counter!("folio_contact_accepted_total", "Contact messages delivered")
            .expect("metric registers");
    pub static ref CONTACT_REJECTED: IntCounterVec = register_int_counter_vec!(
        "folio_contact_rejected_total",
        "Contact requests turned away by the gatekeeper",
        &["reason"]
    )
    .expect("metric registers");
    pub static ref DELIVERY_FAILURES: Counter =
        register_counter!("folio_delivery_failures_total", "Failed message deliveries")
            .expect("metric registers");
    pub static ref DELIVERY_LATENCY: Histogram = register_histogram!(
        "folio_delivery_latency_seconds",
        "Message delivery latency in seconds"
    )
    .expect("metric registers");
    pub static ref TRACKED_CLIENTS: Gauge =
        register_gauge!("folio_tracked_clients", "Clients with a live rate limit window")
            .expect("metric registers");
}
