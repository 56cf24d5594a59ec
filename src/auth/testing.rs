//! Token verifier double shared by the flow and handler tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::auth::google::{TokenVerifier, VerifiedIdentity};
use crate::error::ApiError;

/// Answers every token with a fixed outcome and counts the calls.
pub struct StubVerifier {
    outcome: fn() -> Result<VerifiedIdentity, ApiError>,
    calls: AtomicUsize,
}

impl StubVerifier {
    pub fn new(outcome: fn() -> Result<VerifiedIdentity, ApiError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenVerifier for StubVerifier {
    async fn validate(&self, _id_token: &str) -> Result<VerifiedIdentity, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.outcome)()
    }
}
