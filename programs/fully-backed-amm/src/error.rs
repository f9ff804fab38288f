use anchor_lang::prelude::*;

#[error_code]
pub enum AmmError {
    #[msg("A pool already exists for this seed")]
    DuplicateSeed,
    #[msg("Pool assets must be two distinct mints")]
    InvalidAssetPair,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Pool has outstanding shares but an empty reserve")]
    ZeroReserve,
    #[msg("Pool has insufficient liquidity")]
    InsufficientLiquidity,
    #[msg("Holder has fewer shares than requested")]
    InsufficientShares,
    #[msg("Token account balance too low")]
    InsufficientBalance,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Signer does not control this account")]
    Unauthorized,
    #[msg("Slippage exceeded: output below minimum or input above maximum")]
    SlippageExceeded,
}
