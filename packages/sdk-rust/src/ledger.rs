//! In-memory pool ledger.
//!
//! Executes the four pool operations against a keyed map of accounts with the
//! same checks, arithmetic and error codes as the on-chain program. Useful for
//! simulating a sequence of operations before sending them, and for property
//! tests that need a whole ledger rather than a single formula.
//!
//! Every operation runs inside a [`Txn`]: reads fall through to the committed
//! map, writes land in an overlay, and the overlay is merged only when the
//! operation returns `Ok`. A failed call leaves every record untouched.

use std::collections::BTreeMap;

use solana_sdk::pubkey::Pubkey;

use crate::error::{Error, Result};
use crate::instructions::{derive_ata, derive_pool_addresses, DEFAULT_PROGRAM_ID, SHARE_DECIMALS};
use crate::math::{quote_deposit, quote_swap, quote_withdraw};
use crate::state::PoolConfigState;
use crate::types::{DepositQuote, PoolAddresses, Reserves, SwapQuote, WithdrawQuote};

// ─── Records ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintState {
    /// Only this key may issue new supply.
    pub authority: Pubkey,
    pub supply:    u64,
    pub decimals:  u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenState {
    pub mint:   Pubkey,
    pub owner:  Pubkey,
    pub amount: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Pool(PoolConfigState),
    Mint(MintState),
    Token(TokenState),
}

// ─── Vault authority ──────────────────────────────────────────────────────────

/// Signing capability of one pool. Only the ledger can mint one, and only from
/// a live PoolConfig record; debits and share issuance check it against the
/// owner of the account they touch.
#[derive(Debug)]
pub struct VaultAuthority {
    pool_config: Pubkey,
}

impl VaultAuthority {
    pub(crate) fn for_pool(pool_config: Pubkey) -> Self {
        Self { pool_config }
    }
}

// ─── Transaction overlay ──────────────────────────────────────────────────────

/// Staged view of the ledger for one operation.
pub struct Txn<'a> {
    base:   &'a BTreeMap<Pubkey, Record>,
    writes: BTreeMap<Pubkey, Record>,
}

impl<'a> Txn<'a> {
    fn get(&self, key: &Pubkey) -> Option<&Record> {
        self.writes.get(key).or_else(|| self.base.get(key))
    }

    /// Pool PDAs have no private key; their accounts move only through pool ops.
    fn is_pool(&self, key: &Pubkey) -> bool {
        matches!(self.get(key), Some(Record::Pool(_)))
    }

    /// Reject a caller that is a pool PDA: it can never sign a transaction.
    fn signer(&self, key: &Pubkey) -> Result<()> {
        if self.is_pool(key) {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    fn put(&mut self, key: Pubkey, record: Record) {
        self.writes.insert(key, record);
    }

    fn pool(&self, key: &Pubkey) -> Result<PoolConfigState> {
        match self.get(key) {
            Some(Record::Pool(p)) => Ok(*p),
            _ => Err(Error::AccountNotFound(*key)),
        }
    }

    fn mint(&self, key: &Pubkey) -> Result<MintState> {
        match self.get(key) {
            Some(Record::Mint(m)) => Ok(*m),
            _ => Err(Error::AccountNotFound(*key)),
        }
    }

    fn token(&self, key: &Pubkey) -> Result<TokenState> {
        match self.get(key) {
            Some(Record::Token(t)) => Ok(*t),
            _ => Err(Error::AccountNotFound(*key)),
        }
    }

    /// The caller's token account for `mint`, verified to belong to `owner`.
    fn owned_token(&self, owner: &Pubkey, mint: &Pubkey) -> Result<(Pubkey, TokenState)> {
        let key = derive_ata(owner, mint);
        let acct = self.token(&key)?;
        if acct.owner != *owner || acct.mint != *mint {
            return Err(Error::Unauthorized);
        }
        Ok((key, acct))
    }

    /// Create `owner`'s associated token account for `mint` if missing.
    fn ensure_ata(&mut self, owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
        self.mint(mint)?;
        let key = derive_ata(owner, mint);
        if self.get(&key).is_none() {
            self.put(key, Record::Token(TokenState { mint: *mint, owner: *owner, amount: 0 }));
        }
        Ok(key)
    }

    fn move_tokens(&mut self, from: Pubkey, to: Pubkey, amount: u64) -> Result<()> {
        let mut src = self.token(&from)?;
        if src.mint != self.token(&to)?.mint {
            return Err(Error::InvalidArgument("token accounts hold different mints".into()));
        }
        src.amount = src.amount.checked_sub(amount).ok_or(Error::InsufficientBalance)?;
        self.put(from, Record::Token(src));

        // Read after the debit so a self-transfer nets to zero.
        let mut dst = self.token(&to)?;
        dst.amount = dst.amount.checked_add(amount).ok_or(Error::ArithmeticOverflow)?;
        self.put(to, Record::Token(dst));
        Ok(())
    }

    // ── Vault custody ────────────────────────────────────────────────────────

    /// Holder → vault, under the holder's signature.
    fn credit(&mut self, holder: &Pubkey, mint: &Pubkey, vault: Pubkey, amount: u64) -> Result<()> {
        let (from, acct) = self.owned_token(holder, mint)?;
        if acct.amount < amount {
            return Err(Error::InsufficientBalance);
        }
        if amount == 0 {
            return Ok(());
        }
        self.move_tokens(from, vault, amount)
    }

    /// Vault → recipient, under the pool's authority.
    fn debit(&mut self, auth: &VaultAuthority, vault: Pubkey, to: Pubkey, amount: u64) -> Result<()> {
        let acct = self.token(&vault)?;
        if acct.owner != auth.pool_config {
            return Err(Error::Unauthorized);
        }
        if acct.amount < amount {
            return Err(Error::InsufficientBalance);
        }
        if amount == 0 {
            return Ok(());
        }
        self.move_tokens(vault, to, amount)
    }

    // ── Share accounting ─────────────────────────────────────────────────────

    fn issue(&mut self, auth: &VaultAuthority, share_mint: Pubkey, to: Pubkey, amount: u64) -> Result<()> {
        let mut mint = self.mint(&share_mint)?;
        if mint.authority != auth.pool_config {
            return Err(Error::Unauthorized);
        }
        let mut dst = self.token(&to)?;
        mint.supply = mint.supply.checked_add(amount).ok_or(Error::ArithmeticOverflow)?;
        dst.amount  = dst.amount.checked_add(amount).ok_or(Error::ArithmeticOverflow)?;
        self.put(share_mint, Record::Mint(mint));
        self.put(to, Record::Token(dst));
        Ok(())
    }

    fn redeem(&mut self, holder: &Pubkey, share_mint: Pubkey, amount: u64) -> Result<()> {
        let (key, mut acct) = self
            .owned_token(holder, &share_mint)
            .map_err(|_| Error::InsufficientShares)?;
        let mut mint = self.mint(&share_mint)?;
        acct.amount = acct.amount.checked_sub(amount).ok_or(Error::InsufficientShares)?;
        mint.supply = mint.supply.checked_sub(amount).ok_or(Error::InsufficientShares)?;
        self.put(key, Record::Token(acct));
        self.put(share_mint, Record::Mint(mint));
        Ok(())
    }

    fn reserves(&self, pool: &PoolConfigState) -> Result<Reserves> {
        Ok(Reserves {
            reserve_a:    self.token(&pool.vault_a)?.amount,
            reserve_b:    self.token(&pool.vault_b)?.amount,
            share_supply: self.mint(&pool.share_mint)?.supply,
        })
    }
}

// ─── Ledger ───────────────────────────────────────────────────────────────────

/// Accounts keyed by address, plus the program id pools are derived under.
#[derive(Debug, Clone)]
pub struct PoolLedger {
    program_id: Pubkey,
    accounts:   BTreeMap<Pubkey, Record>,
}

impl Default for PoolLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolLedger {
    /// Empty ledger deriving pools under the deployed program id.
    pub fn new() -> Self {
        Self::with_program_id(DEFAULT_PROGRAM_ID)
    }

    pub fn with_program_id(program_id: Pubkey) -> Self {
        Self { program_id, accounts: BTreeMap::new() }
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// Run `op` against a staged copy; commit the staged writes only on success.
    fn atomically<T>(&mut self, op: impl FnOnce(&mut Txn<'_>) -> Result<T>) -> Result<T> {
        let mut txn = Txn { base: &self.accounts, writes: BTreeMap::new() };
        let out = op(&mut txn)?;
        let writes = txn.writes;
        self.accounts.extend(writes);
        Ok(out)
    }

    // ── Setup ────────────────────────────────────────────────────────────────

    /// Register a new asset mint controlled by `authority`.
    pub fn create_mint(&mut self, authority: &Pubkey, decimals: u8) -> Pubkey {
        let key = Pubkey::new_unique();
        self.accounts.insert(
            key,
            Record::Mint(MintState { authority: *authority, supply: 0, decimals }),
        );
        key
    }

    /// Mint `amount` of `mint` into `owner`'s token account, signed by the
    /// mint authority.
    pub fn mint_to(&mut self, authority: &Pubkey, mint: &Pubkey, owner: &Pubkey, amount: u64) -> Result<()> {
        let mint = *mint;
        let (authority, owner) = (*authority, *owner);
        self.atomically(|txn| {
            let mut state = txn.mint(&mint)?;
            if state.authority != authority || txn.is_pool(&authority) {
                return Err(Error::Unauthorized);
            }
            let ata = txn.ensure_ata(&owner, &mint)?;
            let mut acct = txn.token(&ata)?;
            state.supply = state.supply.checked_add(amount).ok_or(Error::ArithmeticOverflow)?;
            acct.amount  = acct.amount.checked_add(amount).ok_or(Error::ArithmeticOverflow)?;
            txn.put(mint, Record::Mint(state));
            txn.put(ata, Record::Token(acct));
            Ok(())
        })
    }

    /// Move tokens between two token accounts, signed by the source owner.
    /// Vaults can be neither source nor destination.
    pub fn transfer(&mut self, signer: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        let (signer, from, to) = (*signer, *from, *to);
        self.atomically(|txn| {
            let owner = txn.token(&from)?.owner;
            if owner != signer || txn.is_pool(&owner) {
                return Err(Error::Unauthorized);
            }
            if txn.is_pool(&txn.token(&to)?.owner) {
                return Err(Error::Unauthorized);
            }
            txn.move_tokens(from, to, amount)
        })
    }

    // ── Reads ────────────────────────────────────────────────────────────────

    pub fn record(&self, key: &Pubkey) -> Option<&Record> {
        self.accounts.get(key)
    }

    pub fn pool(&self, pool_config: &Pubkey) -> Result<PoolConfigState> {
        match self.accounts.get(pool_config) {
            Some(Record::Pool(p)) => Ok(*p),
            _ => Err(Error::AccountNotFound(*pool_config)),
        }
    }

    pub fn reserves(&self, pool_config: &Pubkey) -> Result<Reserves> {
        let txn = Txn { base: &self.accounts, writes: BTreeMap::new() };
        txn.reserves(&txn.pool(pool_config)?)
    }

    /// Balance of `owner`'s associated account for `mint`; zero when absent.
    pub fn balance(&self, owner: &Pubkey, mint: &Pubkey) -> u64 {
        match self.accounts.get(&derive_ata(owner, mint)) {
            Some(Record::Token(t)) => t.amount,
            _ => 0,
        }
    }

    pub fn shares_of(&self, owner: &Pubkey, pool_config: &Pubkey) -> Result<u64> {
        Ok(self.balance(owner, &self.pool(pool_config)?.share_mint))
    }

    // ── Pool operations ──────────────────────────────────────────────────────

    /// Create a pool for `seed` over two distinct existing mints.
    pub fn initialize_pool(
        &mut self,
        admin:  &Pubkey,
        seed:   u64,
        mint_a: &Pubkey,
        mint_b: &Pubkey,
    ) -> Result<PoolAddresses> {
        if mint_a == mint_b {
            return Err(Error::InvalidAssetPair);
        }
        let addrs = derive_pool_addresses(seed, mint_a, mint_b, &self.program_id);
        let admin = *admin;

        self.atomically(|txn| {
            txn.signer(&admin)?;
            txn.mint(&addrs.mint_a)?;
            txn.mint(&addrs.mint_b)?;
            if txn.get(&addrs.pool_config).is_some() {
                return Err(Error::DuplicateSeed);
            }

            txn.put(addrs.pool_config, Record::Pool(PoolConfigState {
                admin,
                seed,
                mint_a:          addrs.mint_a,
                mint_b:          addrs.mint_b,
                share_mint:      addrs.share_mint,
                vault_a:         addrs.vault_a,
                vault_b:         addrs.vault_b,
                bump:            addrs.bump,
                share_mint_bump: addrs.share_mint_bump,
            }));
            txn.put(addrs.share_mint, Record::Mint(MintState {
                authority: addrs.pool_config,
                supply:    0,
                decimals:  SHARE_DECIMALS,
            }));
            txn.ensure_ata(&addrs.pool_config, &addrs.mint_a)?;
            txn.ensure_ata(&addrs.pool_config, &addrs.mint_b)?;
            Ok(addrs)
        })
    }

    /// Add liquidity. See [`quote_deposit`] for the two regimes.
    pub fn deposit(
        &mut self,
        depositor:        &Pubkey,
        pool_config:      &Pubkey,
        amount_a_desired: u64,
        amount_b_desired: u64,
    ) -> Result<DepositQuote> {
        let (depositor, key) = (*depositor, *pool_config);
        self.atomically(|txn| {
            txn.signer(&depositor)?;
            let pool = txn.pool(&key)?;
            let r = txn.reserves(&pool)?;
            let quote = quote_deposit(
                amount_a_desired, amount_b_desired, r.reserve_a, r.reserve_b, r.share_supply,
            )?;

            txn.credit(&depositor, &pool.mint_a, pool.vault_a, quote.amount_a)?;
            txn.credit(&depositor, &pool.mint_b, pool.vault_b, quote.amount_b)?;

            let to = txn.ensure_ata(&depositor, &pool.share_mint)?;
            txn.issue(&VaultAuthority::for_pool(key), pool.share_mint, to, quote.shares)?;
            Ok(quote)
        })
    }

    /// Trade `amount_in` of one asset for the other.
    pub fn swap(
        &mut self,
        trader:         &Pubkey,
        pool_config:    &Pubkey,
        amount_in:      u64,
        min_amount_out: u64,
        a_to_b:         bool,
    ) -> Result<SwapQuote> {
        let (trader, key) = (*trader, *pool_config);
        self.atomically(|txn| {
            txn.signer(&trader)?;
            let pool = txn.pool(&key)?;
            let (vault_in, vault_out, mint_in, mint_out) = if a_to_b {
                (pool.vault_a, pool.vault_b, pool.mint_a, pool.mint_b)
            } else {
                (pool.vault_b, pool.vault_a, pool.mint_b, pool.mint_a)
            };

            let reserve_in  = txn.token(&vault_in)?.amount;
            let reserve_out = txn.token(&vault_out)?.amount;
            let quote = quote_swap(amount_in, reserve_in, reserve_out, min_amount_out)?;

            txn.credit(&trader, &mint_in, vault_in, quote.amount_in)?;
            let to = txn.ensure_ata(&trader, &mint_out)?;
            txn.debit(&VaultAuthority::for_pool(key), vault_out, to, quote.amount_out)?;
            Ok(quote)
        })
    }

    /// Burn `shares` and receive the pro-rata slice of both reserves.
    pub fn withdraw(&mut self, owner: &Pubkey, pool_config: &Pubkey, shares: u64) -> Result<WithdrawQuote> {
        let (owner, key) = (*owner, *pool_config);
        self.atomically(|txn| {
            txn.signer(&owner)?;
            let pool = txn.pool(&key)?;
            let r = txn.reserves(&pool)?;
            let quote = quote_withdraw(shares, r.reserve_a, r.reserve_b, r.share_supply)?;

            txn.redeem(&owner, pool.share_mint, shares)?;

            let auth = VaultAuthority::for_pool(key);
            let to_a = txn.ensure_ata(&owner, &pool.mint_a)?;
            let to_b = txn.ensure_ata(&owner, &pool.mint_b)?;
            txn.debit(&auth, pool.vault_a, to_a, quote.amount_a)?;
            txn.debit(&auth, pool.vault_b, to_b, quote.amount_b)?;
            Ok(quote)
        })
    }
}
