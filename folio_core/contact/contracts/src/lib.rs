use std::future::Future;

use folio_models::contact::{ContactMessage, ContactValidationError};
use serde_json::Value;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate a raw contact form payload and persist it.
    ///
    /// Nothing is written if validation fails. Otherwise exactly one write
    /// is attempted and the stored message is returned.
    fn submit_message(
        &self,
        payload: Value,
    ) -> impl Future<Output = Result<ContactMessage, ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error(transparent)]
    Validation(#[from] ContactValidationError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit_message(
        mut self,
        payload: Value,
        result: Result<ContactMessage, ContactSubmitError>,
    ) -> Self {
        self.expect_submit_message()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
