//! Asset-transfer capability. The pool state machine is parameterized
//! by a vault so the same invariant engine drives a native-asset pool
//! and per-token pools, selected by composition.

use std::collections::BTreeMap;

use pool::{Address, AssetId, Value};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub trait AssetVault {
    /// Moves `value` from `from`'s account into the pool.
    fn pull(&mut self, from: Address, value: Value) -> Result<()>;

    /// Moves `value` from the pool to `to`'s account.
    fn push(&mut self, to: Address, value: Value) -> Result<()>;

    /// Pays a withdrawal out in one atomic step: `fee` to `fee_to` and
    /// `value` to `to`, or nothing at all.
    fn disburse(&mut self, fee_to: Address, fee: Value, to: Address, value: Value) -> Result<()>;

    /// Funds currently held by the pool.
    fn pool_balance(&self) -> Value;
}

/// Account book shared by both vault kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Book {
    accounts: BTreeMap<Address, Value>,
    pool: Value,
}

impl Book {
    fn pull(&mut self, from: Address, value: Value) -> Result<()> {
        let remaining = self
            .balance_of(&from)
            .checked_sub(value)
            .ok_or(Error::AmountMismatch)?;
        let pool = self.pool.checked_add(value).ok_or(Error::AmountMismatch)?;
        self.accounts.insert(from, remaining);
        self.pool = pool;
        Ok(())
    }

    fn push(&mut self, to: Address, value: Value) -> Result<()> {
        let pool = self.pool.checked_sub(value).ok_or(Error::AmountMismatch)?;
        let credited = self
            .balance_of(&to)
            .checked_add(value)
            .ok_or(Error::AmountMismatch)?;
        self.pool = pool;
        self.accounts.insert(to, credited);
        Ok(())
    }

    fn disburse(&mut self, fee_to: Address, fee: Value, to: Address, value: Value) -> Result<()> {
        let total = fee.checked_add(value).ok_or(Error::AmountMismatch)?;
        self.pool.checked_sub(total).ok_or(Error::AmountMismatch)?;
        // fee_to and to may alias; validate the combined credit
        if fee_to == to {
            self.balance_of(&to)
                .checked_add(total)
                .ok_or(Error::AmountMismatch)?;
        } else {
            self.balance_of(&fee_to)
                .checked_add(fee)
                .ok_or(Error::AmountMismatch)?;
            self.balance_of(&to)
                .checked_add(value)
                .ok_or(Error::AmountMismatch)?;
        }

        self.pool -= total;
        *self.accounts.entry(fee_to).or_insert(0) += fee;
        *self.accounts.entry(to).or_insert(0) += value;
        Ok(())
    }

    fn mint(&mut self, to: Address, value: Value) {
        *self.accounts.entry(to).or_insert(0) += value;
    }

    fn balance_of(&self, who: &Address) -> Value {
        self.accounts.get(who).copied().unwrap_or(0)
    }
}

/// Vault for the chain's base asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeVault {
    book: Book,
}

impl NativeVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an account with spendable funds. Test and setup helper;
    /// issuance is outside this core.
    pub fn mint(&mut self, to: Address, value: Value) {
        self.book.mint(to, value);
    }

    pub fn balance_of(&self, who: &Address) -> Value {
        self.book.balance_of(who)
    }
}

impl AssetVault for NativeVault {
    fn pull(&mut self, from: Address, value: Value) -> Result<()> {
        self.book.pull(from, value)
    }

    fn push(&mut self, to: Address, value: Value) -> Result<()> {
        self.book.push(to, value)
    }

    fn disburse(&mut self, fee_to: Address, fee: Value, to: Address, value: Value) -> Result<()> {
        self.book.disburse(fee_to, fee, to, value)
    }

    fn pool_balance(&self) -> Value {
        self.book.pool
    }
}

/// Vault for a specific token, tagged with the asset it moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenVault {
    asset: AssetId,
    book: Book,
}

impl TokenVault {
    pub fn new(asset: AssetId) -> Self {
        Self {
            asset,
            book: Book::default(),
        }
    }

    pub fn asset(&self) -> AssetId {
        self.asset
    }

    pub fn mint(&mut self, to: Address, value: Value) {
        self.book.mint(to, value);
    }

    pub fn balance_of(&self, who: &Address) -> Value {
        self.book.balance_of(who)
    }
}

impl AssetVault for TokenVault {
    fn pull(&mut self, from: Address, value: Value) -> Result<()> {
        self.book.pull(from, value)
    }

    fn push(&mut self, to: Address, value: Value) -> Result<()> {
        self.book.push(to, value)
    }

    fn disburse(&mut self, fee_to: Address, fee: Value, to: Address, value: Value) -> Result<()> {
        self.book.disburse(fee_to, fee, to, value)
    }

    fn pool_balance(&self) -> Value {
        self.book.pool
    }
}
