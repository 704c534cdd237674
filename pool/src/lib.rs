pub mod commitment;
pub mod merkle;
pub mod nullifier;
pub mod registry;
pub mod roots;
pub mod tree;

pub use commitment::{
    Address, AssetId, Commitment, CommitmentHash, CommitmentWitness, Label, Precommitment, Scope,
    Secret, Value,
};
pub use nullifier::{NullifierHash, NullifierSecret, NullifierSet};
pub use registry::LabelRegistry;
pub use roots::{RootHistory, ROOT_WINDOW};
pub use tree::CommitmentTree;

pub type Hash = sha2::Sha256;
pub use digest::Digest;

pub fn hash(data: &[u8]) -> [u8; 32] {
    let mut hasher = Hash::new();
    hasher.update(data);
    hasher.finalize().into()
}
