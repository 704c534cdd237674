use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every rejection is fatal to the current operation: the whole
/// operation aborts with no partial effect, and retry (for example
/// regenerating a proof against a fresher root) is a caller concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("proof rejected by the verifier")]
    ProofInvalid,
    #[error("nullifier already spent")]
    NullifierAlreadySpent,
    #[error("referenced root has scrolled out of the recent-root window")]
    RootNotInWindow,
    #[error("caller is not the registered depositor of the label")]
    LabelOwnerMismatch,
    #[error("operation not permitted in the current lifecycle state")]
    InvalidLifecycleState,
    #[error("declared amount inconsistent with balances or fees")]
    AmountMismatch,
    #[error("caller not authorized for this operation")]
    Unauthorized,
}
