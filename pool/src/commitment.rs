use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::nullifier::{NullifierHash, NullifierSecret};
use crate::{Digest, Hash};

pub type Value = u64;

/// An account address in the routing layer's address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Identifies the asset a pool instance holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub [u8; 32]);

impl AssetId {
    pub fn from_symbol(symbol: &str) -> Self {
        let mut hasher = Hash::new();
        hasher.update(b"POOL_ASSET");
        hasher.update(symbol.as_bytes());
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Pool identity, bound into every withdrawal context so a proof
/// generated for one pool cannot be replayed against another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Scope([u8; 32]);

impl Scope {
    pub fn new(asset: AssetId, instance: &[u8]) -> Self {
        let mut hasher = Hash::new();
        hasher.update(b"POOL_SCOPE");
        hasher.update(asset.0);
        hasher.update(instance);
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Identifier minted once per original deposit and permanently bound to
/// the depositor. The change output of a withdrawal keeps the label of
/// the commitment it spends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Label([u8; 32]);

impl Label {
    pub fn mint(scope: Scope, nonce: u64) -> Self {
        let mut hasher = Hash::new();
        hasher.update(b"POOL_LABEL");
        hasher.update(scope.0);
        hasher.update(nonce.to_le_bytes());
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Maintained privately by the depositor until spend time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret([u8; 16]);

impl Secret {
    pub fn random(mut rng: impl RngCore) -> Self {
        let mut secret = [0u8; 16];
        rng.fill_bytes(&mut secret);
        Self(secret)
    }
}

/// Hash of (nullifier secret, secret), hiding spend authorization until
/// the owner reveals it to spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precommitment([u8; 32]);

impl Precommitment {
    pub fn new(nullifier: NullifierSecret, secret: Secret) -> Self {
        let mut hasher = Hash::new();
        hasher.update(b"POOL_PRECOMMIT");
        hasher.update(nullifier.as_bytes());
        hasher.update(secret.0);
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommitmentHash([u8; 32]);

impl CommitmentHash {
    pub fn compute(value: Value, label: Label, precommitment: Precommitment) -> Self {
        let mut hasher = Hash::new();
        hasher.update(b"POOL_COMMITMENT");
        hasher.update(value.to_le_bytes());
        hasher.update(label.0);
        hasher.update(precommitment.0);
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// On-ledger view of a commitment, created at deposit or as the change
/// output of a withdrawal. Never mutated; superseded by spending its
/// nullifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commitment {
    pub value: Value,
    pub label: Label,
    pub commitment_hash: CommitmentHash,
    pub nullifier_hash: NullifierHash,
}

/// The depositor-side opening of a commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentWitness {
    pub value: Value,
    pub label: Label,
    pub nullifier: NullifierSecret,
    pub secret: Secret,
}

impl CommitmentWitness {
    pub fn random(value: Value, label: Label, mut rng: impl RngCore) -> Self {
        Self {
            value,
            label,
            nullifier: NullifierSecret::random(&mut rng),
            secret: Secret::random(&mut rng),
        }
    }

    pub fn precommitment(&self) -> Precommitment {
        Precommitment::new(self.nullifier, self.secret)
    }

    pub fn commitment_hash(&self) -> CommitmentHash {
        CommitmentHash::compute(self.value, self.label, self.precommitment())
    }

    pub fn nullifier_hash(&self) -> NullifierHash {
        self.nullifier.hash()
    }

    /// The change output left after withdrawing down to `remainder`.
    /// Fresh secrets, same label.
    pub fn spend(&self, remainder: Value, mut rng: impl RngCore) -> Self {
        Self {
            value: remainder,
            label: self.label,
            nullifier: NullifierSecret::random(&mut rng),
            secret: Secret::random(&mut rng),
        }
    }

    pub fn commit(&self) -> Commitment {
        Commitment {
            value: self.value,
            label: self.label,
            commitment_hash: self.commitment_hash(),
            nullifier_hash: self.nullifier_hash(),
        }
    }
}
