// The nullifier hash is the only on-ledger trace of a spent commitment.
// Each commitment carries its own nullifier secret; revealing the hash
// spends the commitment without linking it to the deposit.

use std::collections::BTreeSet;

use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::{Digest, Hash};

// Maintained privately by the commitment holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullifierSecret([u8; 16]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NullifierHash([u8; 32]);

impl NullifierSecret {
    pub fn random(mut rng: impl RngCore) -> Self {
        let mut sk = [0u8; 16];
        rng.fill_bytes(&mut sk);
        Self(sk)
    }

    pub fn hash(&self) -> NullifierHash {
        let mut hasher = Hash::new();
        hasher.update(b"POOL_NULLIFIER");
        hasher.update(self.0);
        NullifierHash(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl NullifierHash {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// The set of spent nullifier hashes. Membership is monotonic: a hash is
/// never removed once recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullifierSet(BTreeSet<NullifierHash>);

impl NullifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `nf` as spent. Returns false if it was already present,
    /// in which case the set is unchanged.
    pub fn spend(&mut self, nf: NullifierHash) -> bool {
        self.0.insert(nf)
    }

    pub fn is_spent(&self, nf: &NullifierHash) -> bool {
        self.0.contains(nf)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_nullifier_hash_deterministic() {
        let mut rng = rand::thread_rng();
        let sk = NullifierSecret::random(&mut rng);

        assert_eq!(sk.hash(), sk.hash());
        assert_ne!(sk.hash(), NullifierSecret::random(&mut rng).hash());
    }

    #[test]
    fn test_spend_is_monotonic() {
        let mut rng = rand::thread_rng();
        let mut set = NullifierSet::new();

        let nf = NullifierSecret::random(&mut rng).hash();
        assert!(!set.is_spent(&nf));
        assert!(set.spend(nf));
        assert!(set.is_spent(&nf));

        // second spend is rejected and the set is unchanged
        assert!(!set.spend(nf));
        assert!(set.is_spent(&nf));
        assert_eq!(set.len(), 1);
    }
}
