use anchor_lang::prelude::*;
use crate::error::AmmError;

/// Amounts moved by a deposit, shared by the handler and its tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositAmounts {
    /// Credited to vault A.
    pub amount_a: u64,
    /// Credited to vault B.
    pub amount_b: u64,
    /// Shares issued to the depositor.
    pub shares: u64,
    /// True when this deposit set the initial exchange rate.
    pub bootstrap: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawAmounts {
    pub amount_a: u64,
    pub amount_b: u64,
}

/// `a * b / denom` in u128, truncating, with a checked cast back to u64.
pub fn mul_div(a: u64, b: u64, denom: u64) -> Result<u64> {
    require!(denom > 0, AmmError::ArithmeticOverflow);
    let wide = (a as u128)
        .checked_mul(b as u128)
        .ok_or(AmmError::ArithmeticOverflow)?
        / denom as u128;
    u64::try_from(wide).map_err(|_| error!(AmmError::ArithmeticOverflow))
}

/// Compute vault credits and shares for a deposit.
///
/// * Bootstrap (`share_supply == 0`): both amounts are taken as given and the
///   depositor receives `amount_a_desired` shares, fixing one share per unit of A.
/// * Proportional: `shares = a * supply / reserve_a`, `b = a * reserve_b / reserve_a`.
///   `amount_b_desired` caps the B contribution.
pub fn compute_deposit(
    amount_a_desired: u64,
    amount_b_desired: u64,
    reserve_a: u64,
    reserve_b: u64,
    share_supply: u64,
) -> Result<DepositAmounts> {
    require!(amount_a_desired > 0, AmmError::ZeroAmount);

    let amounts = if share_supply == 0 {
        require!(amount_b_desired > 0, AmmError::ZeroAmount);
        DepositAmounts {
            amount_a: amount_a_desired,
            amount_b: amount_b_desired,
            shares: amount_a_desired,
            bootstrap: true,
        }
    } else {
        // Outstanding shares over an empty reserve is a broken pool, not a user error.
        require!(reserve_a > 0 && reserve_b > 0, AmmError::ZeroReserve);

        let shares = mul_div(amount_a_desired, share_supply, reserve_a)?;
        let amount_b = mul_div(amount_a_desired, reserve_b, reserve_a)?;

        require!(shares > 0, AmmError::ZeroAmount);
        require!(amount_b <= amount_b_desired, AmmError::SlippageExceeded);

        DepositAmounts {
            amount_a: amount_a_desired,
            amount_b,
            shares,
            bootstrap: false,
        }
    };

    // Post-deposit balances and supply must still fit the token program's u64.
    reserve_a
        .checked_add(amounts.amount_a)
        .ok_or(AmmError::ArithmeticOverflow)?;
    reserve_b
        .checked_add(amounts.amount_b)
        .ok_or(AmmError::ArithmeticOverflow)?;
    share_supply
        .checked_add(amounts.shares)
        .ok_or(AmmError::ArithmeticOverflow)?;

    Ok(amounts)
}

/// Constant-product output with zero fee: `dy = y * dx / (x + dx)`.
///
/// Rejects dust trades that truncate to zero and verifies the product of the
/// reserves does not decrease before returning.
pub fn compute_swap(
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
    min_amount_out: u64,
) -> Result<u64> {
    require!(amount_in > 0, AmmError::ZeroAmount);
    require!(reserve_in > 0 && reserve_out > 0, AmmError::InsufficientLiquidity);

    let new_reserve_in = reserve_in
        .checked_add(amount_in)
        .ok_or(AmmError::ArithmeticOverflow)?;
    let amount_out = mul_div(reserve_out, amount_in, new_reserve_in)?;

    require!(amount_out > 0, AmmError::InsufficientLiquidity);
    require!(amount_out >= min_amount_out, AmmError::SlippageExceeded);

    let new_reserve_out = reserve_out
        .checked_sub(amount_out)
        .ok_or(AmmError::InsufficientLiquidity)?;
    let k_before = (reserve_in as u128)
        .checked_mul(reserve_out as u128)
        .ok_or(AmmError::ArithmeticOverflow)?;
    let k_after = (new_reserve_in as u128)
        .checked_mul(new_reserve_out as u128)
        .ok_or(AmmError::ArithmeticOverflow)?;
    require!(k_after >= k_before, AmmError::InsufficientLiquidity);

    Ok(amount_out)
}

/// Pro-rata redemption. Truncation always leaves the remainder in the pool.
pub fn compute_withdraw(
    shares: u64,
    reserve_a: u64,
    reserve_b: u64,
    share_supply: u64,
) -> Result<WithdrawAmounts> {
    require!(shares > 0, AmmError::ZeroAmount);
    require!(share_supply > 0, AmmError::InsufficientLiquidity);
    require!(shares <= share_supply, AmmError::InsufficientShares);

    let amount_a = mul_div(reserve_a, shares, share_supply)?;
    let amount_b = mul_div(reserve_b, shares, share_supply)?;

    require!(amount_a <= reserve_a, AmmError::InsufficientLiquidity);
    require!(amount_b <= reserve_b, AmmError::InsufficientLiquidity);

    Ok(WithdrawAmounts { amount_a, amount_b })
}
