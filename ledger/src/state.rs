//! The pool state machine. One instance per supported asset, owning
//! the commitment tree, root window, nullifier set, label registry and
//! fee books as explicit state. Every operation validates fully before
//! mutating anything, so a rejection leaves no partial effect.

use pool::{
    Address, AssetId, CommitmentHash, CommitmentTree, Label, LabelRegistry, NullifierSet,
    Precommitment, RootHistory, Scope, Value,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fees::{fee_for, FeeAccounting, BPS_DENOMINATOR};
use crate::vault::AssetVault;
use crate::verifier::{ProofVerifier, Statement};
use crate::withdrawal::{RagequitRequest, WithdrawalReceipt, WithdrawalRequest};

/// One-way: once winding down, a pool never returns to active. New
/// deposits are disabled; withdraw and ragequit stay available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    Active,
    WindingDown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool<V> {
    scope: Scope,
    asset: AssetId,
    operator: Address,
    /// The routing layer; the only caller allowed to deposit.
    entrypoint: Address,
    vault: V,
    tree: CommitmentTree,
    roots: RootHistory,
    nullifiers: NullifierSet,
    registry: LabelRegistry,
    fees: FeeAccounting,
    lifecycle: Lifecycle,
    deposit_nonce: u64,
}

impl<V: AssetVault> Pool<V> {
    pub fn new(asset: AssetId, instance: &[u8], operator: Address, entrypoint: Address, vault: V) -> Self {
        Self {
            scope: Scope::new(asset, instance),
            asset,
            operator,
            entrypoint,
            vault,
            tree: CommitmentTree::new(),
            roots: RootHistory::new(),
            nullifiers: NullifierSet::new(),
            registry: LabelRegistry::new(),
            fees: FeeAccounting::new(),
            lifecycle: Lifecycle::Active,
            deposit_nonce: 0,
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn asset(&self) -> AssetId {
        self.asset
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn current_root(&self) -> [u8; 32] {
        self.tree.root()
    }

    pub fn tree(&self) -> &CommitmentTree {
        &self.tree
    }

    pub fn roots(&self) -> &RootHistory {
        &self.roots
    }

    pub fn nullifiers(&self) -> &NullifierSet {
        &self.nullifiers
    }

    pub fn registry(&self) -> &LabelRegistry {
        &self.registry
    }

    pub fn fees(&self) -> &FeeAccounting {
        &self.fees
    }

    pub fn vault(&self) -> &V {
        &self.vault
    }

    pub fn vault_mut(&mut self) -> &mut V {
        &mut self.vault
    }

    /// Invariant (d): the vault holds exactly the non-withdrawn net
    /// deposits plus unclaimed vetting fees.
    pub fn books_balance(&self) -> bool {
        self.vault.pool_balance() == self.fees.expected_balance()
    }

    /// Places `value` pulled from `depositor` under a fresh commitment.
    /// The commitment covers the net value (after the vetting fee) and
    /// its label is permanently bound to the depositor.
    pub fn deposit(
        &mut self,
        caller: Address,
        depositor: Address,
        value: Value,
        vetting_fee: Value,
        precommitment: Precommitment,
    ) -> Result<(CommitmentHash, Label)> {
        if self.lifecycle != Lifecycle::Active {
            return Err(Error::InvalidLifecycleState);
        }
        if caller != self.entrypoint {
            return Err(Error::Unauthorized);
        }
        if vetting_fee > value {
            return Err(Error::AmountMismatch);
        }

        let label = Label::mint(self.scope, self.deposit_nonce);
        let commitment_hash = CommitmentHash::compute(value - vetting_fee, label, precommitment);

        // first fallible mutation; everything after cannot fail
        self.vault.pull(depositor, value)?;
        self.deposit_nonce += 1;

        let (root, _) = self.tree.insert(*commitment_hash.as_bytes());
        self.roots.push(root);
        let fresh = self.registry.register_once(label, depositor);
        debug_assert!(fresh, "labels are minted from a monotonic nonce");
        self.fees.credit_deposit(value, vetting_fee);

        Ok((commitment_hash, label))
    }

    /// Spends an existing commitment, inserting its change output and
    /// disbursing the withdrawn value. Valid while active or winding
    /// down. The change leaf is inserted even for a zero remainder so a
    /// full withdrawal is indistinguishable from a partial one.
    pub fn withdraw(
        &mut self,
        caller: Address,
        verifier: &impl ProofVerifier,
        request: &WithdrawalRequest,
    ) -> Result<WithdrawalReceipt> {
        if caller != request.descriptor.processor {
            return Err(Error::Unauthorized);
        }
        if request.scope != self.scope
            || request.signals.context != request.descriptor.context(self.scope)
        {
            return Err(Error::ProofInvalid);
        }
        if !self.roots.contains(&request.signals.state_root) {
            return Err(Error::RootNotInWindow);
        }
        if self.nullifiers.is_spent(&request.signals.existing_nullifier_hash) {
            return Err(Error::NullifierAlreadySpent);
        }
        if !verifier.verify(&request.proof, &Statement::Withdrawal(request.signals)) {
            return Err(Error::ProofInvalid);
        }

        let withdrawn = request.signals.withdrawn_value;
        if request.descriptor.processing_fee_bps as u64 > BPS_DENOMINATOR
            || withdrawn > self.fees.net_deposits()
            || withdrawn > self.vault.pool_balance()
        {
            return Err(Error::AmountMismatch);
        }
        let processing_fee = fee_for(withdrawn, request.descriptor.processing_fee_bps);

        // the disbursement is the only fallible mutation; it goes first
        // so a rejection leaves no trace
        self.vault.disburse(
            request.descriptor.processor,
            processing_fee,
            request.descriptor.recipient,
            withdrawn - processing_fee,
        )?;
        let spent = self.nullifiers.spend(request.signals.existing_nullifier_hash);
        debug_assert!(spent, "unspent was checked above");
        let (new_root, new_leaf_index) =
            self.tree.insert(*request.signals.new_commitment_hash.as_bytes());
        self.roots.push(new_root);
        self.fees.debit_withdrawal(withdrawn);

        Ok(WithdrawalReceipt {
            withdrawn,
            processing_fee,
            paid_to_recipient: withdrawn - processing_fee,
            new_leaf_index,
            new_root,
        })
    }

    /// Emergency exit for the original depositor: returns the full
    /// original value, bypassing compliance-set verification. Only
    /// mutates the nullifier set and balances; the commitment tree and
    /// its root are never touched, since the original leaf was inserted
    /// at deposit time.
    pub fn ragequit(
        &mut self,
        caller: Address,
        verifier: &impl ProofVerifier,
        request: &RagequitRequest,
    ) -> Result<()> {
        match self.registry.owner_of(&request.signals.label) {
            Some(owner) if owner == caller => {}
            _ => return Err(Error::LabelOwnerMismatch),
        }
        if self.nullifiers.is_spent(&request.signals.nullifier_hash) {
            return Err(Error::NullifierAlreadySpent);
        }
        if !verifier.verify(&request.proof, &Statement::Ragequit(request.signals)) {
            return Err(Error::ProofInvalid);
        }

        let value = request.signals.value;
        if value > self.fees.net_deposits() || value > self.vault.pool_balance() {
            return Err(Error::AmountMismatch);
        }

        // push is atomic within the vault; once it lands the remaining
        // mutations cannot fail
        self.vault.push(caller, value)?;
        let spent = self.nullifiers.spend(request.signals.nullifier_hash);
        debug_assert!(spent, "unspent was checked above");
        self.fees.debit_ragequit(value);

        Ok(())
    }

    /// One-way `Active -> WindingDown`, operator only.
    pub fn wind_down(&mut self, caller: Address) -> Result<()> {
        if caller != self.operator {
            return Err(Error::Unauthorized);
        }
        if self.lifecycle != Lifecycle::Active {
            return Err(Error::InvalidLifecycleState);
        }
        self.lifecycle = Lifecycle::WindingDown;
        Ok(())
    }

    /// Pays the accrued vetting fees out to `recipient`. Routing-layer
    /// only; the operator gate sits at the entrypoint.
    pub fn claim_vetting_fees(&mut self, caller: Address, recipient: Address) -> Result<Value> {
        if caller != self.entrypoint {
            return Err(Error::Unauthorized);
        }
        let claimable = self.fees.vetting_fees();
        self.vault.push(recipient, claimable)?;
        let claimed = self.fees.claim_vetting_fees();
        debug_assert_eq!(claimed, claimable);
        Ok(claimed)
    }
}
