use pool::Value;
use serde::{Deserialize, Serialize};

pub const BPS_DENOMINATOR: u64 = 10_000;

/// Fee in basis points of the moved value, rounded down.
pub fn fee_for(value: Value, bps: u16) -> Value {
    (value as u128 * bps as u128 / BPS_DENOMINATOR as u128) as Value
}

/// Per-asset balance bookkeeping. At every settled state the vault's
/// pool balance equals `net_deposits + vetting_fees`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeAccounting {
    net_deposits: Value,
    vetting_fees: Value,
    total_in: Value,
    total_out: Value,
}

impl FeeAccounting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callers must have checked `vetting_fee <= value`.
    pub fn credit_deposit(&mut self, value: Value, vetting_fee: Value) {
        self.net_deposits += value - vetting_fee;
        self.vetting_fees += vetting_fee;
        self.total_in += value;
    }

    /// Debits the full withdrawn value; the processing fee is paid out
    /// of it, not tracked separately. Callers must have checked
    /// `value <= net_deposits()`.
    pub fn debit_withdrawal(&mut self, value: Value) {
        self.net_deposits -= value;
        self.total_out += value;
    }

    /// Ragequit debits the full original value with no fee. Callers
    /// must have checked `value <= net_deposits()`.
    pub fn debit_ragequit(&mut self, value: Value) {
        self.net_deposits -= value;
        self.total_out += value;
    }

    /// Moves the accrued vetting-fee balance out, returning the amount.
    pub fn claim_vetting_fees(&mut self) -> Value {
        let claimed = self.vetting_fees;
        self.vetting_fees = 0;
        self.total_out += claimed;
        claimed
    }

    pub fn net_deposits(&self) -> Value {
        self.net_deposits
    }

    pub fn vetting_fees(&self) -> Value {
        self.vetting_fees
    }

    pub fn total_in(&self) -> Value {
        self.total_in
    }

    pub fn total_out(&self) -> Value {
        self.total_out
    }

    /// What the vault must hold for the books to balance.
    pub fn expected_balance(&self) -> Value {
        self.net_deposits + self.vetting_fees
    }
}
