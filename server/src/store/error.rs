use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying disk or bucket I/O failed. Never retried automatically;
    /// the caller must resubmit.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
