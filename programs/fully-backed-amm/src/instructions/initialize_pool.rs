use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};
use crate::{constants::*, error::AmmError, state::PoolConfig};

/// Create a pool for `seed`. The PoolConfig PDA becomes the only authority over
/// both vaults and the share mint.
///
/// Accounts use `init_if_needed` so that a second call for a live seed reaches
/// the handler and fails with `DuplicateSeed` instead of a system-program error.
pub fn handler(ctx: Context<InitializePool>, seed: u64) -> Result<()> {
    require!(!ctx.accounts.pool_config.is_initialized(), AmmError::DuplicateSeed);

    let pool = &mut ctx.accounts.pool_config;
    pool.admin = ctx.accounts.admin.key();
    pool.seed = seed;
    pool.mint_a = ctx.accounts.mint_a.key();
    pool.mint_b = ctx.accounts.mint_b.key();
    pool.share_mint = ctx.accounts.share_mint.key();
    pool.vault_a = ctx.accounts.vault_a.key();
    pool.vault_b = ctx.accounts.vault_b.key();
    pool.bump = ctx.bumps.pool_config;
    pool.share_mint_bump = ctx.bumps.share_mint;

    msg!(
        "Pool created: seed={} {}/{} shares={}",
        seed,
        ctx.accounts.mint_a.key(),
        ctx.accounts.mint_b.key(),
        ctx.accounts.share_mint.key()
    );
    Ok(())
}

#[derive(Accounts)]
#[instruction(seed: u64)]
pub struct InitializePool<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    pub mint_a: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        constraint = mint_b.key() != mint_a.key() @ AmmError::InvalidAssetPair,
    )]
    pub mint_b: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = admin,
        space = PoolConfig::LEN,
        seeds = [POOL_SEED, seed.to_le_bytes().as_ref()],
        bump,
    )]
    pub pool_config: Box<Account<'info, PoolConfig>>,

    #[account(
        init_if_needed,
        payer = admin,
        seeds = [POOL_SHARES_SEED, pool_config.key().as_ref()],
        bump,
        mint::decimals = SHARE_DECIMALS,
        mint::authority = pool_config,
        mint::token_program = token_program,
    )]
    pub share_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = admin,
        associated_token::mint = mint_a,
        associated_token::authority = pool_config,
        associated_token::token_program = token_program,
    )]
    pub vault_a: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = admin,
        associated_token::mint = mint_b,
        associated_token::authority = pool_config,
        associated_token::token_program = token_program,
    )]
    pub vault_b: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}
