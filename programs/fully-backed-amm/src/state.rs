use anchor_lang::prelude::*;

// ─── PoolConfig ────────────────────────────────────────────────────────────
// One per seed. The PoolConfig PDA itself is the authority over both vaults
// and the share mint. Written once by initialize_pool, read-only afterwards.
#[account]
pub struct PoolConfig {
    /// Signer that created the pool
    pub admin: Pubkey,              // 32
    /// Admin-chosen seed; PDA = [POOL_SEED, seed.to_le_bytes()]
    pub seed: u64,                  // 8
    pub mint_a: Pubkey,             // 32
    pub mint_b: Pubkey,             // 32
    /// PDA = [POOL_SHARES_SEED, pool_config]
    pub share_mint: Pubkey,         // 32
    /// Associated token accounts of the PoolConfig PDA
    pub vault_a: Pubkey,            // 32
    pub vault_b: Pubkey,            // 32
    pub bump: u8,                   // 1
    pub share_mint_bump: u8,        // 1
}

impl PoolConfig {
    // 8 discriminator + 32+8+32+32+32+32+32+1+1 = 210
    pub const LEN: usize = 210;

    /// A zeroed admin means the account was allocated but never written.
    pub fn is_initialized(&self) -> bool {
        self.admin != Pubkey::default()
    }
}
