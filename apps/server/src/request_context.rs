//! Per-request context injected by the request-id middleware.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub received_at: Instant,
}

impl RequestContext {
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            received_at: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.received_at.elapsed()
    }
}
