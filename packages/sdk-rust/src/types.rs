//! Public parameter and result types.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

// ─── Addresses ────────────────────────────────────────────────────────────────

/// Every address belonging to one pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolAddresses {
    pub pool_config:     Pubkey,
    pub bump:            u8,
    pub share_mint:      Pubkey,
    pub share_mint_bump: u8,
    pub mint_a:          Pubkey,
    pub mint_b:          Pubkey,
    /// ATA of `pool_config` for `mint_a`.
    pub vault_a:         Pubkey,
    /// ATA of `pool_config` for `mint_b`.
    pub vault_b:         Pubkey,
}

// ─── Quotes ───────────────────────────────────────────────────────────────────

/// Result of [`crate::math::quote_deposit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositQuote {
    pub amount_a:  u64,
    pub amount_b:  u64,
    pub shares:    u64,
    /// True when the pool is empty and this deposit sets the exchange rate.
    pub bootstrap: bool,
}

/// Result of [`crate::math::quote_swap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    pub amount_in:       u64,
    pub amount_out:      u64,
    pub new_reserve_in:  u64,
    pub new_reserve_out: u64,
}

impl SwapQuote {
    /// Share of the input side the trade moves, in percent. Display only.
    pub fn price_impact_pct(&self) -> f64 {
        if self.new_reserve_in == 0 {
            return 0.0;
        }
        self.amount_in as f64 / self.new_reserve_in as f64 * 100.0
    }
}

/// Result of [`crate::math::quote_withdraw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawQuote {
    pub shares:   u64,
    pub amount_a: u64,
    pub amount_b: u64,
}

/// Vault balances and share supply of a pool at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reserves {
    pub reserve_a:    u64,
    pub reserve_b:    u64,
    pub share_supply: u64,
}
