//! SDK error type.

use solana_sdk::pubkey::Pubkey;

/// First Anchor custom error code; program errors are numbered from here in
/// declaration order.
pub const ANCHOR_ERROR_OFFSET: u32 = 6000;

/// All errors returned by the SDK.
///
/// The first block mirrors the on-chain `AmmError` one-to-one, so quotes and the
/// in-memory ledger fail exactly where the program would.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    // ── Pool program errors ──────────────────────────────────────────────────
    #[error("A pool already exists for this seed")]
    DuplicateSeed,

    #[error("Pool assets must be two distinct mints")]
    InvalidAssetPair,

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    /// Shares are outstanding but a reserve is empty. Never reachable through
    /// valid operations.
    #[error("Pool has outstanding shares but an empty reserve")]
    ZeroReserve,

    #[error("Pool has insufficient liquidity")]
    InsufficientLiquidity,

    #[error("Holder has fewer shares than requested")]
    InsufficientShares,

    #[error("Token account balance too low")]
    InsufficientBalance,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    #[error("Signer does not control this account")]
    Unauthorized,

    #[error("Slippage guard triggered: quoted={quoted}, limit={limit}")]
    SlippageExceeded { quoted: u64, limit: u64 },

    // ── Ledger lookups ───────────────────────────────────────────────────────
    #[error("Account {0} not found")]
    AccountNotFound(Pubkey),

    // ── Account parsing ──────────────────────────────────────────────────────
    /// Raw account bytes could not be deserialized.
    #[error("Account parse error at offset {offset}: {reason}")]
    ParseError { offset: usize, reason: String },

    // ── Validation ───────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Map an Anchor custom error code from a failed transaction back to the
    /// matching SDK error. Slippage limits are not carried on-chain and come
    /// back as zero.
    pub fn from_program_code(code: u32) -> Option<Error> {
        let err = match code.checked_sub(ANCHOR_ERROR_OFFSET)? {
            0 => Error::DuplicateSeed,
            1 => Error::InvalidAssetPair,
            2 => Error::ZeroAmount,
            3 => Error::ZeroReserve,
            4 => Error::InsufficientLiquidity,
            5 => Error::InsufficientShares,
            6 => Error::InsufficientBalance,
            7 => Error::ArithmeticOverflow,
            8 => Error::Unauthorized,
            9 => Error::SlippageExceeded { quoted: 0, limit: 0 },
            _ => return None,
        };
        Some(err)
    }
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;
