use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::{constants::*, error::AmmError, state::PoolConfig};
use super::{custody::{self, PoolSigner}, pool_math::compute_swap};

/// Constant-product swap with zero fee: dy = y * dx / (x + dx).
///
/// Flow:
///   1. trader_token_in → vault_in   : amount_in   (trader-signed)
///   2. vault_out → trader_token_out : amount_out  (pool-signed)
pub fn handler(
    ctx: Context<Swap>,
    amount_in: u64,
    min_amount_out: u64,
    a_to_b: bool,
) -> Result<()> {
    let accts = &ctx.accounts;

    let (vault_in, vault_out) = if a_to_b {
        (&accts.vault_a, &accts.vault_b)
    } else {
        (&accts.vault_b, &accts.vault_a)
    };
    let (mint_in, mint_out) = if a_to_b {
        (&accts.mint_a, &accts.mint_b)
    } else {
        (&accts.mint_b, &accts.mint_a)
    };
    let (trader_in, trader_out) = if a_to_b {
        (&accts.trader_token_a, &accts.trader_token_b)
    } else {
        (&accts.trader_token_b, &accts.trader_token_a)
    };

    let amount_out = compute_swap(amount_in, vault_in.amount, vault_out.amount, min_amount_out)?;

    let token_program = accts.token_program.to_account_info();
    custody::credit(
        token_program.clone(),
        trader_in,
        vault_in.to_account_info(),
        mint_in,
        accts.trader.to_account_info(),
        amount_in,
    )?;
    PoolSigner::new(&accts.pool_config).debit(
        token_program,
        vault_out,
        mint_out,
        trader_out.to_account_info(),
        amount_out,
    )?;

    msg!("Swap: in={} out={} a_to_b={}", amount_in, amount_out, a_to_b);
    Ok(())
}

#[derive(Accounts)]
pub struct Swap<'info> {
    pub trader: Signer<'info>,

    #[account(
        seeds = [POOL_SEED, pool_config.seed.to_le_bytes().as_ref()],
        bump = pool_config.bump,
        has_one = mint_a,
        has_one = mint_b,
        has_one = vault_a,
        has_one = vault_b,
    )]
    pub pool_config: Box<Account<'info, PoolConfig>>,

    pub mint_a: Box<InterfaceAccount<'info, Mint>>,
    pub mint_b: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub vault_a: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub vault_b: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = mint_a,
        constraint = trader_token_a.owner == trader.key() @ AmmError::Unauthorized,
    )]
    pub trader_token_a: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = mint_b,
        constraint = trader_token_b.owner == trader.key() @ AmmError::Unauthorized,
    )]
    pub trader_token_b: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}
