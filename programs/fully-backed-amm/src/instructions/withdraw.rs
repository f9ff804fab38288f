use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::{constants::*, error::AmmError, state::PoolConfig};
use super::{custody::{self, PoolSigner}, pool_math::compute_withdraw};

/// Burn pool shares and withdraw the pro-rata part of both vaults.
pub fn handler(ctx: Context<Withdraw>, shares: u64) -> Result<()> {
    let reserve_a = ctx.accounts.vault_a.amount;
    let reserve_b = ctx.accounts.vault_b.amount;
    let share_supply = ctx.accounts.share_mint.supply;

    let amounts = compute_withdraw(shares, reserve_a, reserve_b, share_supply)?;

    let accts = &ctx.accounts;
    let token_program = accts.token_program.to_account_info();

    custody::redeem_shares(
        token_program.clone(),
        accts.share_mint.to_account_info(),
        &accts.owner_shares,
        accts.owner.to_account_info(),
        shares,
    )?;

    let signer = PoolSigner::new(&accts.pool_config);
    signer.debit(
        token_program.clone(),
        &accts.vault_a,
        &accts.mint_a,
        accts.owner_token_a.to_account_info(),
        amounts.amount_a,
    )?;
    signer.debit(
        token_program,
        &accts.vault_b,
        &accts.mint_b,
        accts.owner_token_b.to_account_info(),
        amounts.amount_b,
    )?;

    msg!("Withdraw: shares={} a={} b={}", shares, amounts.amount_a, amounts.amount_b);
    Ok(())
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    pub owner: Signer<'info>,

    #[account(
        seeds = [POOL_SEED, pool_config.seed.to_le_bytes().as_ref()],
        bump = pool_config.bump,
        has_one = mint_a,
        has_one = mint_b,
        has_one = share_mint,
        has_one = vault_a,
        has_one = vault_b,
    )]
    pub pool_config: Box<Account<'info, PoolConfig>>,

    pub mint_a: Box<InterfaceAccount<'info, Mint>>,
    pub mint_b: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub share_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub vault_a: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub vault_b: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = mint_a,
        constraint = owner_token_a.owner == owner.key() @ AmmError::Unauthorized,
    )]
    pub owner_token_a: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = mint_b,
        constraint = owner_token_b.owner == owner.key() @ AmmError::Unauthorized,
    )]
    pub owner_token_b: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = share_mint,
        constraint = owner_shares.owner == owner.key() @ AmmError::Unauthorized,
    )]
    pub owner_shares: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}
