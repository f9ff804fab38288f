//! Quote math.
//!
//! Mirrors the on-chain arithmetic exactly so off-chain quotes match on-chain
//! results: u128 intermediates, truncating division, checked narrowing to u64.

use crate::error::{Error, Result};
use crate::types::{DepositQuote, SwapQuote, WithdrawQuote};

/// `a * b / denom` with a u128 intermediate.
pub fn mul_div(a: u64, b: u64, denom: u64) -> Result<u64> {
    if denom == 0 {
        return Err(Error::ArithmeticOverflow);
    }
    let wide = (a as u128)
        .checked_mul(b as u128)
        .ok_or(Error::ArithmeticOverflow)?
        / denom as u128;
    u64::try_from(wide).map_err(|_| Error::ArithmeticOverflow)
}

// ─── Deposit ─────────────────────────────────────────────────────────────────

/// Quote a deposit against the current reserves and share supply.
///
/// An empty pool (`share_supply == 0`) takes both amounts as given and issues
/// `amount_a_desired` shares. Otherwise B is matched to the reserve ratio and
/// `amount_b_desired` is the most the depositor will put in.
pub fn quote_deposit(
    amount_a_desired: u64,
    amount_b_desired: u64,
    reserve_a:        u64,
    reserve_b:        u64,
    share_supply:     u64,
) -> Result<DepositQuote> {
    if amount_a_desired == 0 {
        return Err(Error::ZeroAmount);
    }

    let quote = if share_supply == 0 {
        if amount_b_desired == 0 {
            return Err(Error::ZeroAmount);
        }
        DepositQuote {
            amount_a:  amount_a_desired,
            amount_b:  amount_b_desired,
            shares:    amount_a_desired,
            bootstrap: true,
        }
    } else {
        if reserve_a == 0 || reserve_b == 0 {
            return Err(Error::ZeroReserve);
        }
        let shares   = mul_div(amount_a_desired, share_supply, reserve_a)?;
        let amount_b = mul_div(amount_a_desired, reserve_b, reserve_a)?;
        if shares == 0 {
            return Err(Error::ZeroAmount);
        }
        if amount_b > amount_b_desired {
            return Err(Error::SlippageExceeded { quoted: amount_b, limit: amount_b_desired });
        }
        DepositQuote { amount_a: amount_a_desired, amount_b, shares, bootstrap: false }
    };

    reserve_a.checked_add(quote.amount_a).ok_or(Error::ArithmeticOverflow)?;
    reserve_b.checked_add(quote.amount_b).ok_or(Error::ArithmeticOverflow)?;
    share_supply.checked_add(quote.shares).ok_or(Error::ArithmeticOverflow)?;

    Ok(quote)
}

// ─── Swap ─────────────────────────────────────────────────────────────────────

/// Quote a zero-fee constant-product swap: `out = reserve_out * in / (reserve_in + in)`.
pub fn quote_swap(
    amount_in:      u64,
    reserve_in:     u64,
    reserve_out:    u64,
    min_amount_out: u64,
) -> Result<SwapQuote> {
    if amount_in == 0 {
        return Err(Error::ZeroAmount);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(Error::InsufficientLiquidity);
    }

    let new_reserve_in = reserve_in.checked_add(amount_in).ok_or(Error::ArithmeticOverflow)?;
    let amount_out     = mul_div(reserve_out, amount_in, new_reserve_in)?;

    // Dust that truncates to nothing would hand the pool free tokens.
    if amount_out == 0 {
        return Err(Error::InsufficientLiquidity);
    }
    if amount_out < min_amount_out {
        return Err(Error::SlippageExceeded { quoted: amount_out, limit: min_amount_out });
    }

    let new_reserve_out = reserve_out
        .checked_sub(amount_out)
        .ok_or(Error::InsufficientLiquidity)?;

    let k_before = reserve_in as u128 * reserve_out as u128;
    let k_after  = new_reserve_in as u128 * new_reserve_out as u128;
    if k_after < k_before {
        return Err(Error::InsufficientLiquidity);
    }

    Ok(SwapQuote { amount_in, amount_out, new_reserve_in, new_reserve_out })
}

// ─── Withdraw ────────────────────────────────────────────────────────────────

/// Quote a pro-rata redemption of `shares`.
pub fn quote_withdraw(
    shares:       u64,
    reserve_a:    u64,
    reserve_b:    u64,
    share_supply: u64,
) -> Result<WithdrawQuote> {
    if shares == 0 {
        return Err(Error::ZeroAmount);
    }
    if share_supply == 0 {
        return Err(Error::InsufficientLiquidity);
    }
    if shares > share_supply {
        return Err(Error::InsufficientShares);
    }

    let amount_a = mul_div(reserve_a, shares, share_supply)?;
    let amount_b = mul_div(reserve_b, shares, share_supply)?;
    if amount_a > reserve_a || amount_b > reserve_b {
        return Err(Error::InsufficientLiquidity);
    }

    Ok(WithdrawQuote { shares, amount_a, amount_b })
}
