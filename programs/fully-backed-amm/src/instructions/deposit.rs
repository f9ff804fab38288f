use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};
use crate::{constants::*, error::AmmError, state::PoolConfig};
use super::{custody::{self, PoolSigner}, pool_math::compute_deposit};

/// Add liquidity and receive pool shares.
///
/// With zero shares outstanding the deposit is taken as given and sets the
/// initial rate (one share per unit of A). Otherwise the B leg and the share
/// count follow the live reserve ratio and `amount_b_desired` is a ceiling.
pub fn handler(ctx: Context<Deposit>, amount_a_desired: u64, amount_b_desired: u64) -> Result<()> {
    // Read reserves and supply fresh from the accounts passed in
    let reserve_a = ctx.accounts.vault_a.amount;
    let reserve_b = ctx.accounts.vault_b.amount;
    let share_supply = ctx.accounts.share_mint.supply;

    let amounts = compute_deposit(
        amount_a_desired,
        amount_b_desired,
        reserve_a,
        reserve_b,
        share_supply,
    )?;

    let accts = &ctx.accounts;
    let token_program = accts.token_program.to_account_info();

    custody::credit(
        token_program.clone(),
        &accts.depositor_token_a,
        accts.vault_a.to_account_info(),
        &accts.mint_a,
        accts.depositor.to_account_info(),
        amounts.amount_a,
    )?;
    custody::credit(
        token_program.clone(),
        &accts.depositor_token_b,
        accts.vault_b.to_account_info(),
        &accts.mint_b,
        accts.depositor.to_account_info(),
        amounts.amount_b,
    )?;

    PoolSigner::new(&accts.pool_config).issue_shares(
        token_program,
        accts.share_mint.to_account_info(),
        accts.depositor_shares.to_account_info(),
        amounts.shares,
    )?;

    msg!(
        "Deposit: shares={} a={} b={} bootstrap={}",
        amounts.shares, amounts.amount_a, amounts.amount_b, amounts.bootstrap
    );
    Ok(())
}

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut)]
    pub depositor: Signer<'info>,

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
        constraint = depositor_token_a.owner == depositor.key() @ AmmError::Unauthorized,
    )]
    pub depositor_token_a: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = mint_b,
        constraint = depositor_token_b.owner == depositor.key() @ AmmError::Unauthorized,
    )]
    pub depositor_token_b: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = depositor,
        associated_token::mint = share_mint,
        associated_token::authority = depositor,
        associated_token::token_program = token_program,
    )]
    pub depositor_shares: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}
