use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Burn, Mint, MintTo, TokenAccount, TransferChecked};
use crate::{constants::*, error::AmmError, state::PoolConfig};

// ─── Pool signer ───────────────────────────────────────────────────────────
// Signing capability of exactly one PoolConfig PDA. Every vault debit and
// share issuance takes one of these; nothing else can move pool funds.
pub struct PoolSigner<'info> {
    authority: AccountInfo<'info>,
    seed: [u8; 8],
    bump: [u8; 1],
}

impl<'info> PoolSigner<'info> {
    pub fn new(pool_config: &Account<'info, PoolConfig>) -> Self {
        Self {
            authority: pool_config.to_account_info(),
            seed: pool_config.seed.to_le_bytes(),
            bump: [pool_config.bump],
        }
    }

    /// Vault → recipient, signed by the pool PDA.
    pub fn debit(
        &self,
        token_program: AccountInfo<'info>,
        vault: &InterfaceAccount<'info, TokenAccount>,
        mint: &InterfaceAccount<'info, Mint>,
        to: AccountInfo<'info>,
        amount: u64,
    ) -> Result<()> {
        require!(vault.amount >= amount, AmmError::InsufficientBalance);
        if amount == 0 {
            return Ok(());
        }

        let seeds: &[&[u8]] = &[POOL_SEED, &self.seed, &self.bump];
        let signer = &[seeds];
        token_interface::transfer_checked(
            CpiContext::new_with_signer(
                token_program,
                TransferChecked {
                    from: vault.to_account_info(),
                    mint: mint.to_account_info(),
                    to,
                    authority: self.authority.clone(),
                },
                signer,
            ),
            amount,
            mint.decimals,
        )
    }

    /// Mint new pool shares to `to`.
    pub fn issue_shares(
        &self,
        token_program: AccountInfo<'info>,
        share_mint: AccountInfo<'info>,
        to: AccountInfo<'info>,
        amount: u64,
    ) -> Result<()> {
        let seeds: &[&[u8]] = &[POOL_SEED, &self.seed, &self.bump];
        let signer = &[seeds];
        token_interface::mint_to(
            CpiContext::new_with_signer(
                token_program,
                MintTo {
                    mint: share_mint,
                    to,
                    authority: self.authority.clone(),
                },
                signer,
            ),
            amount,
        )
    }
}

/// Holder → vault, signed by the holder.
pub fn credit<'info>(
    token_program: AccountInfo<'info>,
    from: &InterfaceAccount<'info, TokenAccount>,
    vault: AccountInfo<'info>,
    mint: &InterfaceAccount<'info, Mint>,
    owner: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    require!(from.amount >= amount, AmmError::InsufficientBalance);
    if amount == 0 {
        return Ok(());
    }

    token_interface::transfer_checked(
        CpiContext::new(
            token_program,
            TransferChecked {
                from: from.to_account_info(),
                mint: mint.to_account_info(),
                to: vault,
                authority: owner,
            },
        ),
        amount,
        mint.decimals,
    )
}

/// Burn `amount` shares out of the holder's account, signed by the holder.
pub fn redeem_shares<'info>(
    token_program: AccountInfo<'info>,
    share_mint: AccountInfo<'info>,
    holder_shares: &InterfaceAccount<'info, TokenAccount>,
    holder: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    require!(holder_shares.amount >= amount, AmmError::InsufficientShares);

    token_interface::burn(
        CpiContext::new(
            token_program,
            Burn {
                mint: share_mint,
                from: holder_shares.to_account_info(),
                authority: holder,
            },
        ),
        amount,
    )
}
