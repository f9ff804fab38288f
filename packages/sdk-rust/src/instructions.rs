//! PDA derivation and low-level Anchor instruction builders.
//!
//! Each builder constructs a [`solana_sdk::instruction::Instruction`] ready
//! for signing and submission.  Account order mirrors the Anchor
//! `#[derive(Accounts)]` structs in the on-chain program exactly.
//!
//! Anchor instruction discriminators: `sha256("global:{name}")[..8]`.
//!
//! The builders and [`derive_ata`] target the classic SPL Token program. For
//! Token-2022 mints derive addresses with [`derive_ata_with_program`] and
//! [`TOKEN_2022_ID`]; the builders do not cover that program.

use solana_sdk::{
    hash::hash,
    instruction::{AccountMeta, Instruction},
    pubkey,
    pubkey::Pubkey,
};

use crate::types::PoolAddresses;

// ─── Well-known program IDs ───────────────────────────────────────────────────

pub const DEFAULT_PROGRAM_ID: Pubkey = pubkey!("AYSuzxZZj6aPpSMwHAUTGoKzG3TdroXG2TvvYyfkE2Qx");
pub const SPL_TOKEN_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const TOKEN_2022_ID: Pubkey = pubkey!("TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb");
pub const ATA_PROGRAM_ID: Pubkey = pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
pub const SYSTEM_PROGRAM_ID: Pubkey = pubkey!("11111111111111111111111111111111");

// ─── PDA seeds (mirrors programs/fully-backed-amm/src/constants.rs) ──────────

pub const POOL_SEED:        &[u8] = b"pool";
pub const POOL_SHARES_SEED: &[u8] = b"pool-shares";
pub const SHARE_DECIMALS:   u8    = 6;

// ─── PDA derivation helpers ───────────────────────────────────────────────────

/// Derive the PoolConfig PDA for an admin-chosen seed.
pub fn derive_pool_config(seed: u64, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_SEED, &seed.to_le_bytes()], program_id)
}

/// Derive the share mint PDA of a pool.
pub fn derive_share_mint(pool_config: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POOL_SHARES_SEED, pool_config.as_ref()], program_id)
}

/// Derive the Associated Token Account for a wallet + mint under SPL Token.
pub fn derive_ata(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    derive_ata_with_program(wallet, mint, &SPL_TOKEN_ID)
}

/// Derive the Associated Token Account for a mint owned by `token_program`.
pub fn derive_ata_with_program(wallet: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[wallet.as_ref(), token_program.as_ref(), mint.as_ref()],
        &ATA_PROGRAM_ID,
    )
    .0
}

/// A vault is the pool config's own token account for the asset.
pub fn derive_vault(pool_config: &Pubkey, mint: &Pubkey) -> Pubkey {
    derive_ata(pool_config, mint)
}

/// Derive every address of the pool created from `seed` over `mint_a`/`mint_b`.
pub fn derive_pool_addresses(
    seed:       u64,
    mint_a:     &Pubkey,
    mint_b:     &Pubkey,
    program_id: &Pubkey,
) -> PoolAddresses {
    let (pool_config, bump)            = derive_pool_config(seed, program_id);
    let (share_mint, share_mint_bump)  = derive_share_mint(&pool_config, program_id);
    PoolAddresses {
        pool_config,
        bump,
        share_mint,
        share_mint_bump,
        mint_a:  *mint_a,
        mint_b:  *mint_b,
        vault_a: derive_vault(&pool_config, mint_a),
        vault_b: derive_vault(&pool_config, mint_b),
    }
}

// ─── Discriminator ────────────────────────────────────────────────────────────

/// Anchor discriminator: first 8 bytes of SHA-256(`"{namespace}:{name}"`).
/// Use `"global"` for instructions, `"account"` for account types.
pub fn anchor_disc(namespace: &str, name: &str) -> [u8; 8] {
    let h = hash(format!("{namespace}:{name}").as_bytes());
    let mut d = [0u8; 8];
    d.copy_from_slice(&h.to_bytes()[..8]);
    d
}

// ─── initialize_pool ─────────────────────────────────────────────────────────

/// Build the `initialize_pool` instruction.
pub fn initialize_pool_ix(
    program_id: &Pubkey,
    admin:      &Pubkey,
    seed:       u64,
    mint_a:     &Pubkey,
    mint_b:     &Pubkey,
) -> Instruction {
    let pool = derive_pool_addresses(seed, mint_a, mint_b, program_id);

    let mut data = anchor_disc("global", "initialize_pool").to_vec();
    data.extend_from_slice(&seed.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*admin,                  true),   // mut + signer
            AccountMeta::new_readonly(*mint_a,         false),
            AccountMeta::new_readonly(*mint_b,         false),
            AccountMeta::new(pool.pool_config,         false),  // mut PDA (init)
            AccountMeta::new(pool.share_mint,          false),  // mut PDA (init)
            AccountMeta::new(pool.vault_a,             false),  // mut ATA (init)
            AccountMeta::new(pool.vault_b,             false),  // mut ATA (init)
            AccountMeta::new_readonly(SPL_TOKEN_ID,    false),
            AccountMeta::new_readonly(ATA_PROGRAM_ID,  false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data,
    }
}

// ─── deposit ─────────────────────────────────────────────────────────────────

/// Build the `deposit` instruction. The depositor's share ATA is created by
/// the program when missing.
pub fn deposit_ix(
    program_id:       &Pubkey,
    depositor:        &Pubkey,
    pool:             &PoolAddresses,
    amount_a_desired: u64,
    amount_b_desired: u64,
) -> Instruction {
    let mut data = anchor_disc("global", "deposit").to_vec();
    data.extend_from_slice(&amount_a_desired.to_le_bytes());
    data.extend_from_slice(&amount_b_desired.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*depositor,               true),   // mut + signer (payer)
            AccountMeta::new_readonly(pool.pool_config, false),
            AccountMeta::new_readonly(pool.mint_a,      false),
            AccountMeta::new_readonly(pool.mint_b,      false),
            AccountMeta::new(pool.share_mint,           false),  // mut (supply)
            AccountMeta::new(pool.vault_a,              false),  // mut
            AccountMeta::new(pool.vault_b,              false),  // mut
            AccountMeta::new(derive_ata(depositor, &pool.mint_a),     false),
            AccountMeta::new(derive_ata(depositor, &pool.mint_b),     false),
            AccountMeta::new(derive_ata(depositor, &pool.share_mint), false),  // init_if_needed
            AccountMeta::new_readonly(SPL_TOKEN_ID,     false),
            AccountMeta::new_readonly(ATA_PROGRAM_ID,   false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data,
    }
}

// ─── swap ─────────────────────────────────────────────────────────────────────

/// Build the `swap` instruction.
///
/// Both trader token accounts are passed regardless of direction; the program
/// reads `a_to_b` to decide which one pays and which one receives.
pub fn swap_ix(
    program_id:     &Pubkey,
    trader:         &Pubkey,
    pool:           &PoolAddresses,
    amount_in:      u64,
    min_amount_out: u64,
    a_to_b:         bool,
) -> Instruction {
    let mut data = anchor_disc("global", "swap").to_vec();
    data.extend_from_slice(&amount_in.to_le_bytes());
    data.extend_from_slice(&min_amount_out.to_le_bytes());
    data.push(a_to_b as u8);

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*trader,          true),   // signer
            AccountMeta::new_readonly(pool.pool_config, false),
            AccountMeta::new_readonly(pool.mint_a,      false),
            AccountMeta::new_readonly(pool.mint_b,      false),
            AccountMeta::new(pool.vault_a,              false),  // mut
            AccountMeta::new(pool.vault_b,              false),  // mut
            AccountMeta::new(derive_ata(trader, &pool.mint_a), false),
            AccountMeta::new(derive_ata(trader, &pool.mint_b), false),
            AccountMeta::new_readonly(SPL_TOKEN_ID,     false),
        ],
        data,
    }
}

// ─── withdraw ────────────────────────────────────────────────────────────────

/// Build the `withdraw` instruction.
pub fn withdraw_ix(
    program_id: &Pubkey,
    owner:      &Pubkey,
    pool:       &PoolAddresses,
    shares:     u64,
) -> Instruction {
    let mut data = anchor_disc("global", "withdraw").to_vec();
    data.extend_from_slice(&shares.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*owner,           true),   // signer
            AccountMeta::new_readonly(pool.pool_config, false),
            AccountMeta::new_readonly(pool.mint_a,      false),
            AccountMeta::new_readonly(pool.mint_b,      false),
            AccountMeta::new(pool.share_mint,           false),  // mut (burn)
            AccountMeta::new(pool.vault_a,              false),  // mut
            AccountMeta::new(pool.vault_b,              false),  // mut
            AccountMeta::new(derive_ata(owner, &pool.mint_a),     false),
            AccountMeta::new(derive_ata(owner, &pool.mint_b),     false),
            AccountMeta::new(derive_ata(owner, &pool.share_mint), false),
            AccountMeta::new_readonly(SPL_TOKEN_ID,     false),
        ],
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ata_depends_on_token_program() {
        let wallet = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        assert_eq!(derive_ata(&wallet, &mint), derive_ata_with_program(&wallet, &mint, &SPL_TOKEN_ID));
        assert_ne!(
            derive_ata_with_program(&wallet, &mint, &TOKEN_2022_ID),
            derive_ata(&wallet, &mint)
        );
    }

    #[test]
    fn pool_derivation_is_idempotent() {
        let a = derive_pool_config(42, &DEFAULT_PROGRAM_ID);
        let b = derive_pool_config(42, &DEFAULT_PROGRAM_ID);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_seeds_give_distinct_pools() {
        let (a, _) = derive_pool_config(1, &DEFAULT_PROGRAM_ID);
        let (b, _) = derive_pool_config(2, &DEFAULT_PROGRAM_ID);
        assert_ne!(a, b);
    }

    #[test]
    fn share_mint_hangs_off_pool_config() {
        let (pool, _) = derive_pool_config(7, &DEFAULT_PROGRAM_ID);
        let (expected, _) = Pubkey::find_program_address(
            &[b"pool-shares", pool.as_ref()],
            &DEFAULT_PROGRAM_ID,
        );
        assert_eq!(derive_share_mint(&pool, &DEFAULT_PROGRAM_ID).0, expected);
    }

    #[test]
    fn pool_addresses_are_consistent() {
        let mint_a = Pubkey::new_unique();
        let mint_b = Pubkey::new_unique();
        let pool = derive_pool_addresses(9, &mint_a, &mint_b, &DEFAULT_PROGRAM_ID);

        assert_eq!(pool.vault_a, derive_ata(&pool.pool_config, &mint_a));
        assert_eq!(pool.vault_b, derive_ata(&pool.pool_config, &mint_b));
        assert_ne!(pool.vault_a, pool.vault_b);
        assert_eq!(
            Pubkey::create_program_address(
                &[POOL_SEED, &9u64.to_le_bytes(), &[pool.bump]],
                &DEFAULT_PROGRAM_ID,
            )
            .ok(),
            Some(pool.pool_config)
        );
    }

    #[test]
    fn swap_data_layout() {
        let pool = derive_pool_addresses(
            1, &Pubkey::new_unique(), &Pubkey::new_unique(), &DEFAULT_PROGRAM_ID,
        );
        let ix = swap_ix(&DEFAULT_PROGRAM_ID, &Pubkey::new_unique(), &pool, 10, 9, false);

        assert_eq!(ix.data.len(), 8 + 8 + 8 + 1);
        assert_eq!(&ix.data[..8], &anchor_disc("global", "swap"));
        assert_eq!(&ix.data[8..16], &10u64.to_le_bytes());
        assert_eq!(&ix.data[16..24], &9u64.to_le_bytes());
        assert_eq!(ix.data[24], 0);
        assert_eq!(ix.accounts.len(), 9);
        assert!(ix.accounts[0].is_signer);
    }

    #[test]
    fn initialize_targets_derived_accounts() {
        let admin  = Pubkey::new_unique();
        let mint_a = Pubkey::new_unique();
        let mint_b = Pubkey::new_unique();
        let ix = initialize_pool_ix(&DEFAULT_PROGRAM_ID, &admin, 5, &mint_a, &mint_b);
        let pool = derive_pool_addresses(5, &mint_a, &mint_b, &DEFAULT_PROGRAM_ID);

        assert_eq!(&ix.data[8..], &5u64.to_le_bytes());
        assert_eq!(ix.accounts[3].pubkey, pool.pool_config);
        assert_eq!(ix.accounts[4].pubkey, pool.share_mint);
        assert_eq!(ix.accounts[5].pubkey, pool.vault_a);
        assert_eq!(ix.accounts[6].pubkey, pool.vault_b);
    }
}
