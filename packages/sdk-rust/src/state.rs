//! On-chain account (de)serialization.
//!
//! Parses raw account bytes for `PoolConfig` (210 bytes) and the SPL token
//! fields the pool reads. Byte offsets mirror the Anchor `#[account]` layout.

use solana_sdk::pubkey::Pubkey;

use crate::error::{Error, Result};
use crate::instructions::anchor_disc;

// ─── PoolConfig ──────────────────────────────────────────────────────────────

/// Serialized size of `PoolConfig`, discriminator included.
pub const POOL_CONFIG_LEN: usize = 210;

/// Deserialized `PoolConfig` account state.
///
/// Layout (after 8-byte Anchor discriminator):
/// ```text
/// admin(32)  seed(8)  mint_a(32)  mint_b(32)  share_mint(32)
/// vault_a(32)  vault_b(32)  bump(1)  share_mint_bump(1)  = 210 bytes
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfigState {
    pub admin:           Pubkey,
    pub seed:            u64,
    pub mint_a:          Pubkey,
    pub mint_b:          Pubkey,
    pub share_mint:      Pubkey,
    pub vault_a:         Pubkey,
    pub vault_b:         Pubkey,
    pub bump:            u8,
    pub share_mint_bump: u8,
}

impl PoolConfigState {
    /// Encode in the exact layout the program writes.
    pub fn to_account_data(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(POOL_CONFIG_LEN);
        out.extend_from_slice(&anchor_disc("account", "PoolConfig"));
        out.extend_from_slice(self.admin.as_ref());
        out.extend_from_slice(&self.seed.to_le_bytes());
        out.extend_from_slice(self.mint_a.as_ref());
        out.extend_from_slice(self.mint_b.as_ref());
        out.extend_from_slice(self.share_mint.as_ref());
        out.extend_from_slice(self.vault_a.as_ref());
        out.extend_from_slice(self.vault_b.as_ref());
        out.push(self.bump);
        out.push(self.share_mint_bump);
        out
    }
}

/// Deserialize a `PoolConfig` account from raw bytes.
pub fn parse_pool_config(data: &[u8]) -> Result<PoolConfigState> {
    if data.len() < POOL_CONFIG_LEN {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!(
                "PoolConfig account is {} bytes; expected {}",
                data.len(),
                POOL_CONFIG_LEN
            ),
        });
    }
    if data[..8] != anchor_disc("account", "PoolConfig") {
        return Err(Error::ParseError {
            offset: 0,
            reason: "discriminator does not match PoolConfig".into(),
        });
    }
    Ok(PoolConfigState {
        admin:           read_pubkey(data, 8)?,
        seed:            read_u64(data, 40)?,
        mint_a:          read_pubkey(data, 48)?,
        mint_b:          read_pubkey(data, 80)?,
        share_mint:      read_pubkey(data, 112)?,
        vault_a:         read_pubkey(data, 144)?,
        vault_b:         read_pubkey(data, 176)?,
        bump:            read_u8(data, 208)?,
        share_mint_bump: read_u8(data, 209)?,
    })
}

// ─── SPL token / mint ────────────────────────────────────────────────────────

/// Read the `amount` field from a packed SPL token account.
///
/// Token account layout: `mint(32) owner(32) amount(8) …`
pub fn parse_token_amount(data: &[u8]) -> Result<u64> {
    if data.len() < 72 {
        return Err(Error::ParseError {
            offset: 64,
            reason: format!("Token account is {} bytes; need at least 72", data.len()),
        });
    }
    read_u64(data, 64)
}

/// Read `(supply, decimals)` from a packed SPL mint.
///
/// Mint layout: `mint_authority(36) supply(8) decimals(1) …`
pub fn parse_mint_supply(data: &[u8]) -> Result<(u64, u8)> {
    if data.len() < 45 {
        return Err(Error::ParseError {
            offset: 36,
            reason: format!("Mint account is {} bytes; need at least 45", data.len()),
        });
    }
    Ok((read_u64(data, 36)?, read_u8(data, 44)?))
}

// ─── Byte-slice primitives ────────────────────────────────────────────────────

fn slice(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    data.get(offset..offset + len).ok_or_else(|| Error::ParseError {
        offset,
        reason: format!("slice too short for {len} bytes"),
    })
}

pub(crate) fn read_pubkey(data: &[u8], offset: usize) -> Result<Pubkey> {
    let b: [u8; 32] = slice(data, offset, 32)?
        .try_into()
        .map_err(|_| Error::ParseError { offset, reason: "slice too short for Pubkey".into() })?;
    Ok(Pubkey::from(b))
}

pub(crate) fn read_u64(data: &[u8], offset: usize) -> Result<u64> {
    let b: [u8; 8] = slice(data, offset, 8)?
        .try_into()
        .map_err(|_| Error::ParseError { offset, reason: "slice too short for u64".into() })?;
    Ok(u64::from_le_bytes(b))
}

pub(crate) fn read_u8(data: &[u8], offset: usize) -> Result<u8> {
    Ok(slice(data, offset, 1)?[0])
}
