pub mod account_service;
pub mod group_service;
pub mod journal_service;

pub use account_service::AccountService;
pub use group_service::GroupService;
pub use journal_service::{JournalDraft, JournalService, PostingDraft};

use crate::ledger::ValidationErrors;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Operation-level failures, reported to callers as values.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Entity validation failed; the payload lists every recorded issue.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
    /// A guarded operation was refused; state is unchanged.
    #[error("{0}")]
    Constraint(String),
    #[error("{0} not found")]
    NotFound(String),
}

impl ServiceError {
    /// The structured issues when this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ServiceError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
