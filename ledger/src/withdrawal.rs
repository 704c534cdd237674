use pool::{Address, Digest, Hash, Scope, Value};
use serde::{Deserialize, Serialize};

use crate::verifier::{Proof, RagequitSignals, WithdrawalSignals};

/// Where the withdrawn funds go: processing fee to `processor`, the
/// remainder to `recipient`. Bound into the proof's context signal so
/// a relayer cannot redirect funds after proof generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalDescriptor {
    pub processor: Address,
    pub recipient: Address,
    pub processing_fee_bps: u16,
    /// Opaque relay calldata carried through for the routing layer.
    pub data: Vec<u8>,
}

impl WithdrawalDescriptor {
    /// The context a withdrawal proof must commit to: this descriptor
    /// under the pool's scope.
    pub fn context(&self, scope: Scope) -> [u8; 32] {
        let mut hasher = Hash::new();
        hasher.update(b"POOL_CONTEXT");
        hasher.update(scope.as_bytes());
        hasher.update(self.processor.as_bytes());
        hasher.update(self.recipient.as_bytes());
        hasher.update(self.processing_fee_bps.to_le_bytes());
        hasher.update((self.data.len() as u64).to_le_bytes());
        hasher.update(&self.data);
        hasher.finalize().into()
    }
}

/// A relayed withdrawal submission: proof triple, the eight public
/// signals, the withdrawal descriptor, and the scope it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub proof: Proof,
    pub signals: WithdrawalSignals,
    pub descriptor: WithdrawalDescriptor,
    pub scope: Scope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    pub withdrawn: Value,
    pub processing_fee: Value,
    pub paid_to_recipient: Value,
    pub new_leaf_index: u64,
    pub new_root: [u8; 32],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagequitRequest {
    pub proof: Proof,
    pub signals: RagequitSignals,
}

#[cfg(test)]
mod test {
    use super::*;
    use pool::AssetId;

    #[test]
    fn test_context_binds_every_field() {
        let scope = Scope::new(AssetId::from_symbol("NATIVE"), b"test");
        let reference = WithdrawalDescriptor {
            processor: Address([1; 20]),
            recipient: Address([2; 20]),
            processing_fee_bps: 50,
            data: vec![7, 7],
        };

        let tampered = [
            WithdrawalDescriptor {
                processor: Address([9; 20]),
                ..reference.clone()
            },
            WithdrawalDescriptor {
                recipient: Address([9; 20]),
                ..reference.clone()
            },
            WithdrawalDescriptor {
                processing_fee_bps: 51,
                ..reference.clone()
            },
            WithdrawalDescriptor {
                data: vec![7, 8],
                ..reference.clone()
            },
        ];

        for d in tampered {
            assert_ne!(d.context(scope), reference.context(scope));
        }

        let other_scope = Scope::new(AssetId::from_symbol("NATIVE"), b"other");
        assert_ne!(reference.context(other_scope), reference.context(scope));
    }
}
