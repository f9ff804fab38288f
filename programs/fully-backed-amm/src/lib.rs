/// Fully-backed AMM: two-asset constant-product pool whose shares are always
/// redeemable 1:1 against the tokens held in its vaults.
///
/// 4 instructions:
///   initialize_pool: create config, share mint and both vaults for a seed
///   deposit:         add liquidity, receive shares (first deposit sets the rate)
///   swap:            zero-fee x*y=k exchange in either direction
///   withdraw:        burn shares for the pro-rata part of both vaults

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;

use anchor_lang::prelude::*;
pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("AYSuzxZZj6aPpSMwHAUTGoKzG3TdroXG2TvvYyfkE2Qx");

#[program]
pub mod fully_backed_amm {
    use super::*;

    /// Create a pool for `seed`. The config PDA owns both vaults and the share mint.
    pub fn initialize_pool(ctx: Context<InitializePool>, seed: u64) -> Result<()> {
        initialize_pool::handler(ctx, seed)
    }

    /// Add liquidity. `amount_b_desired` is taken as given on the first deposit
    /// and acts as a ceiling afterwards.
    pub fn deposit(
        ctx: Context<Deposit>,
        amount_a_desired: u64,
        amount_b_desired: u64,
    ) -> Result<()> {
        deposit::handler(ctx, amount_a_desired, amount_b_desired)
    }

    /// Swap `amount_in` of one pool asset for the other.
    pub fn swap(
        ctx: Context<Swap>,
        amount_in: u64,
        min_amount_out: u64,
        a_to_b: bool,
    ) -> Result<()> {
        swap::handler(ctx, amount_in, min_amount_out, a_to_b)
    }

    /// Burn shares and withdraw proportional reserves.
    pub fn withdraw(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
        withdraw::handler(ctx, shares)
    }
}
