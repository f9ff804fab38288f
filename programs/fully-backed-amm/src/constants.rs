/// PDA seeds
pub const POOL_SEED: &[u8] = b"pool";
pub const POOL_SHARES_SEED: &[u8] = b"pool-shares";

/// Decimals of every pool-share mint
pub const SHARE_DECIMALS: u8 = 6;
