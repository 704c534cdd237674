//! The proof-verification trust boundary. The ledger consumes a boolean
//! verdict over declared public signals and never inspects proof
//! internals.

use pool::{CommitmentHash, Label, NullifierHash, Value};
use serde::{Deserialize, Serialize};

pub type G1 = [[u8; 32]; 2];
pub type G2 = [[[u8; 32]; 2]; 2];

/// Opaque proof triple as produced by the external proving system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub a: G1,
    pub b: G2,
    pub c: G1,
}

/// The eight public signals a withdrawal proof attests: an existing
/// commitment is included under `state_root`, its label is included
/// under `compliance_root`, the new commitment is derived from
/// `existing value - withdrawn_value`, and the nullifier hash matches
/// the spent commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalSignals {
    pub new_commitment_hash: CommitmentHash,
    pub existing_nullifier_hash: NullifierHash,
    pub withdrawn_value: Value,
    pub state_root: [u8; 32],
    pub state_tree_depth: u64,
    pub compliance_root: [u8; 32],
    pub compliance_tree_depth: u64,
    pub context: [u8; 32],
}

/// The simpler ragequit statement: knowledge of the original deposit
/// commitment's opening. Carries no compliance fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagequitSignals {
    pub value: Value,
    pub label: Label,
    pub commitment_hash: CommitmentHash,
    pub nullifier_hash: NullifierHash,
}

/// The two payload shapes the verifier accepts, selected by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    Withdrawal(WithdrawalSignals),
    Ragequit(RagequitSignals),
}

/// External verification capability. A pure function over public
/// inputs; implementations wrap whatever proving system produced the
/// proof.
pub trait ProofVerifier {
    fn verify(&self, proof: &Proof, statement: &Statement) -> bool;
}
