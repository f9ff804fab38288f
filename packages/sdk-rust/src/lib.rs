//! Fully-Backed AMM Rust SDK
//!
//! Off-chain companion to the `fully-backed-amm` program: address derivation,
//! instruction builders, account decoding, quote math that matches the program
//! to the unit, and an in-memory ledger that runs whole operation sequences.
//!
//! # Quick Start
//!
//! ```rust
//! use fully_backed_amm_sdk::{PoolLedger, quote_swap};
//! use solana_sdk::pubkey::Pubkey;
//!
//! let mut ledger = PoolLedger::new();
//! let admin = Pubkey::new_unique();
//! let usdc = ledger.create_mint(&admin, 6);
//! let wsol = ledger.create_mint(&admin, 9);
//! ledger.mint_to(&admin, &usdc, &admin, 1_000).unwrap();
//! ledger.mint_to(&admin, &wsol, &admin, 1_000).unwrap();
//!
//! let pool = ledger.initialize_pool(&admin, 7, &usdc, &wsol).unwrap();
//! ledger.deposit(&admin, &pool.pool_config, 1_000, 1_000).unwrap();
//!
//! let quote = quote_swap(10, 1_000, 1_000, 0).unwrap();
//! assert_eq!(quote.amount_out, 9);
//! ```
//!
//! # Feature Overview
//!
//! | Item | Description |
//! |------|-------------|
//! | [`derive_pool_addresses`] | PoolConfig, share mint and vault addresses for a seed |
//! | [`initialize_pool_ix`] / [`deposit_ix`] / [`swap_ix`] / [`withdraw_ix`] | Anchor instructions ready to sign |
//! | [`parse_pool_config`] | Decode a PoolConfig account |
//! | [`quote_deposit`] / [`quote_swap`] / [`quote_withdraw`] | Exact off-chain quotes |
//! | [`PoolLedger`] | Transactional in-memory simulation |

pub mod error;
pub mod instructions;
pub mod ledger;
pub mod math;
pub mod state;
pub mod types;

pub use error::{Error, Result};
pub use instructions::{
    deposit_ix, derive_ata, derive_ata_with_program, derive_pool_addresses, derive_pool_config,
    derive_share_mint, derive_vault, initialize_pool_ix, swap_ix, withdraw_ix, DEFAULT_PROGRAM_ID,
};
pub use ledger::PoolLedger;
pub use math::{quote_deposit, quote_swap, quote_withdraw};
pub use state::{parse_pool_config, PoolConfigState};
pub use types::*;
