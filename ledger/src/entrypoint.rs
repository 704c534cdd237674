//! The routing layer in front of the per-asset pools: vets deposits
//! (minimum amount, vetting fee), gates withdrawals on the currently
//! accepted compliance-set root, and forwards relayed payloads.

use std::collections::BTreeMap;

use pool::{Address, AssetId, CommitmentHash, Label, Precommitment, Value};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fees::fee_for;
use crate::state::Pool;
use crate::vault::{NativeVault, TokenVault};
use crate::verifier::ProofVerifier;
use crate::withdrawal::{RagequitRequest, WithdrawalReceipt, WithdrawalRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    pub min_deposit: Value,
    pub vetting_fee_bps: u16,
}

/// A pool holding either the base asset or a specific token. The two
/// share one state machine, parameterized by the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetPool {
    Native(Pool<NativeVault>),
    Token(Pool<TokenVault>),
}

impl AssetPool {
    fn deposit(
        &mut self,
        caller: Address,
        depositor: Address,
        value: Value,
        vetting_fee: Value,
        precommitment: Precommitment,
    ) -> Result<(CommitmentHash, Label)> {
        match self {
            AssetPool::Native(pool) => pool.deposit(caller, depositor, value, vetting_fee, precommitment),
            AssetPool::Token(pool) => pool.deposit(caller, depositor, value, vetting_fee, precommitment),
        }
    }

    fn withdraw(
        &mut self,
        caller: Address,
        verifier: &impl ProofVerifier,
        request: &WithdrawalRequest,
    ) -> Result<WithdrawalReceipt> {
        match self {
            AssetPool::Native(pool) => pool.withdraw(caller, verifier, request),
            AssetPool::Token(pool) => pool.withdraw(caller, verifier, request),
        }
    }

    fn ragequit(
        &mut self,
        caller: Address,
        verifier: &impl ProofVerifier,
        request: &RagequitRequest,
    ) -> Result<()> {
        match self {
            AssetPool::Native(pool) => pool.ragequit(caller, verifier, request),
            AssetPool::Token(pool) => pool.ragequit(caller, verifier, request),
        }
    }

    fn wind_down(&mut self, caller: Address) -> Result<()> {
        match self {
            AssetPool::Native(pool) => pool.wind_down(caller),
            AssetPool::Token(pool) => pool.wind_down(caller),
        }
    }

    fn claim_vetting_fees(&mut self, caller: Address, recipient: Address) -> Result<Value> {
        match self {
            AssetPool::Native(pool) => pool.claim_vetting_fees(caller, recipient),
            AssetPool::Token(pool) => pool.claim_vetting_fees(caller, recipient),
        }
    }

    pub fn books_balance(&self) -> bool {
        match self {
            AssetPool::Native(pool) => pool.books_balance(),
            AssetPool::Token(pool) => pool.books_balance(),
        }
    }

    pub fn as_native(&self) -> Option<&Pool<NativeVault>> {
        match self {
            AssetPool::Native(pool) => Some(pool),
            AssetPool::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Pool<TokenVault>> {
        match self {
            AssetPool::Native(_) => None,
            AssetPool::Token(pool) => Some(pool),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrypoint {
    /// The entrypoint's own routing address; pools accept deposits only
    /// from it.
    address: Address,
    owner: Address,
    /// May update the accepted compliance-set root.
    postman: Address,
    fee_recipient: Address,
    compliance_root: [u8; 32],
    pools: BTreeMap<AssetId, (AssetConfig, AssetPool)>,
}

impl Entrypoint {
    pub fn new(address: Address, owner: Address, postman: Address, fee_recipient: Address) -> Self {
        Self {
            address,
            owner,
            postman,
            fee_recipient,
            compliance_root: [0; 32],
            pools: BTreeMap::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn compliance_root(&self) -> [u8; 32] {
        self.compliance_root
    }

    pub fn pool(&self, asset: &AssetId) -> Option<&AssetPool> {
        self.pools.get(asset).map(|(_, pool)| pool)
    }

    pub fn register_pool(
        &mut self,
        caller: Address,
        asset: AssetId,
        config: AssetConfig,
        pool: AssetPool,
    ) -> Result<()> {
        if caller != self.owner {
            return Err(Error::Unauthorized);
        }
        match self.pools.entry(asset) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert((config, pool));
                Ok(())
            }
            // an asset is routed to exactly one pool for its lifetime
            std::collections::btree_map::Entry::Occupied(_) => Err(Error::InvalidLifecycleState),
        }
    }

    pub fn update_compliance_root(&mut self, caller: Address, root: [u8; 32]) -> Result<()> {
        if caller != self.postman {
            return Err(Error::Unauthorized);
        }
        self.compliance_root = root;
        Ok(())
    }

    /// Splits `value` into the vetting fee and the net deposit, then
    /// forwards to the asset's pool as the authorized routing caller.
    pub fn deposit(
        &mut self,
        depositor: Address,
        asset: AssetId,
        value: Value,
        precommitment: Precommitment,
    ) -> Result<(CommitmentHash, Label)> {
        let caller = self.address;
        let (config, pool) = self
            .pools
            .get_mut(&asset)
            .ok_or(Error::InvalidLifecycleState)?;
        if value < config.min_deposit {
            return Err(Error::AmountMismatch);
        }
        let vetting_fee = fee_for(value, config.vetting_fee_bps);
        pool.deposit(caller, depositor, value, vetting_fee, precommitment)
    }

    /// Relays a withdrawal payload. The proof must commit to the
    /// currently accepted compliance-set root; a stale one is the same
    /// recoverable condition as a stale state root.
    pub fn relay(
        &mut self,
        caller: Address,
        verifier: &impl ProofVerifier,
        asset: AssetId,
        request: &WithdrawalRequest,
    ) -> Result<WithdrawalReceipt> {
        if request.signals.compliance_root != self.compliance_root {
            return Err(Error::RootNotInWindow);
        }
        let (_, pool) = self
            .pools
            .get_mut(&asset)
            .ok_or(Error::InvalidLifecycleState)?;
        pool.withdraw(caller, verifier, request)
    }

    pub fn ragequit(
        &mut self,
        caller: Address,
        verifier: &impl ProofVerifier,
        asset: AssetId,
        request: &RagequitRequest,
    ) -> Result<()> {
        let (_, pool) = self
            .pools
            .get_mut(&asset)
            .ok_or(Error::InvalidLifecycleState)?;
        pool.ragequit(caller, verifier, request)
    }

    /// Forwards the operator's wind-down call; the pool checks the
    /// operator itself.
    pub fn wind_down(&mut self, caller: Address, asset: AssetId) -> Result<()> {
        let (_, pool) = self
            .pools
            .get_mut(&asset)
            .ok_or(Error::InvalidLifecycleState)?;
        pool.wind_down(caller)
    }

    pub fn claim_vetting_fees(&mut self, caller: Address, asset: AssetId) -> Result<Value> {
        if caller != self.owner {
            return Err(Error::Unauthorized);
        }
        let address = self.address;
        let fee_recipient = self.fee_recipient;
        let (_, pool) = self
            .pools
            .get_mut(&asset)
            .ok_or(Error::InvalidLifecycleState)?;
        pool.claim_vetting_fees(address, fee_recipient)
    }
}
