#![allow(dead_code)]

use ledger::{
    NativeVault, Pool, Proof, ProofVerifier, RagequitRequest, RagequitSignals, Statement,
    WithdrawalDescriptor, WithdrawalRequest, WithdrawalSignals,
};
use pool::{Address, AssetId, CommitmentWitness, Precommitment, Scope, Value, ROOT_WINDOW};
use rand::rngs::ThreadRng;

pub const OPERATOR: Address = Address([0xAA; 20]);
pub const ENTRYPOINT: Address = Address([0xEE; 20]);
pub const PROCESSOR: Address = Address([0x99; 20]);

pub fn addr(n: u8) -> Address {
    Address([n; 20])
}

/// Stands in for the external proving system: a fixed verdict over any
/// payload.
pub struct StaticVerifier(pub bool);

impl ProofVerifier for StaticVerifier {
    fn verify(&self, _proof: &Proof, _statement: &Statement) -> bool {
        self.0
    }
}

pub fn native_pool() -> Pool<NativeVault> {
    Pool::new(
        AssetId::from_symbol("NATIVE"),
        b"test-instance",
        OPERATOR,
        ENTRYPOINT,
        NativeVault::new(),
    )
}

pub fn fund(pool: &mut Pool<NativeVault>, who: Address, value: Value) {
    pool.vault_mut().mint(who, value);
}

/// Runs the depositor side of a deposit: draws fresh secret material,
/// submits the precommitment, and returns the full opening.
pub fn deposit(
    pool: &mut Pool<NativeVault>,
    depositor: Address,
    value: Value,
    vetting_fee: Value,
    rng: &mut ThreadRng,
) -> CommitmentWitness {
    // the label is only known after the pool mints it; rebuild the
    // witness around the secrets we committed to
    let scope = pool.scope();
    let provisional = CommitmentWitness::random(value - vetting_fee, pool::Label::mint(scope, 0), rng);
    let precommitment = Precommitment::new(provisional.nullifier, provisional.secret);

    let (commitment_hash, label) = pool
        .deposit(ENTRYPOINT, depositor, value, vetting_fee, precommitment)
        .expect("deposit");

    let witness = CommitmentWitness {
        label,
        ..provisional
    };
    assert_eq!(witness.commitment_hash(), commitment_hash);
    witness
}

pub fn descriptor(recipient: Address, processing_fee_bps: u16) -> WithdrawalDescriptor {
    WithdrawalDescriptor {
        processor: PROCESSOR,
        recipient,
        processing_fee_bps,
        data: Vec::new(),
    }
}

/// Builds the payload an honest relayer would submit: signals derived
/// from the commitment being spent and its change output.
pub fn withdrawal_request(
    scope: Scope,
    state_root: [u8; 32],
    state_tree_depth: u64,
    compliance_root: [u8; 32],
    existing: &CommitmentWitness,
    withdrawn: Value,
    descriptor: WithdrawalDescriptor,
    rng: &mut ThreadRng,
) -> (WithdrawalRequest, CommitmentWitness) {
    let change = existing.spend(existing.value.saturating_sub(withdrawn), rng);

    let signals = WithdrawalSignals {
        new_commitment_hash: change.commitment_hash(),
        existing_nullifier_hash: existing.nullifier_hash(),
        withdrawn_value: withdrawn,
        state_root,
        state_tree_depth,
        compliance_root,
        compliance_tree_depth: 20,
        context: descriptor.context(scope),
    };

    (
        WithdrawalRequest {
            proof: Proof::default(),
            signals,
            descriptor,
            scope,
        },
        change,
    )
}

pub fn ragequit_request(witness: &CommitmentWitness) -> RagequitRequest {
    RagequitRequest {
        proof: Proof::default(),
        signals: RagequitSignals {
            value: witness.value,
            label: witness.label,
            commitment_hash: witness.commitment_hash(),
            nullifier_hash: witness.nullifier_hash(),
        },
    }
}

pub fn root_window() -> usize {
    ROOT_WINDOW
}
