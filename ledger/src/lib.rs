pub mod entrypoint;
pub mod error;
pub mod fees;
pub mod state;
pub mod vault;
pub mod verifier;
pub mod withdrawal;

pub use entrypoint::{AssetConfig, AssetPool, Entrypoint};
pub use error::{Error, Result};
pub use fees::FeeAccounting;
pub use state::{Lifecycle, Pool};
pub use vault::{AssetVault, NativeVault, TokenVault};
pub use verifier::{Proof, ProofVerifier, RagequitSignals, Statement, WithdrawalSignals};
pub use withdrawal::{RagequitRequest, WithdrawalDescriptor, WithdrawalReceipt, WithdrawalRequest};
