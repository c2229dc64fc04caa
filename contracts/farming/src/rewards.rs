use soroban_sdk::{Env, I256};

use crate::ContractError;

/// Fixed-point scaling factor for every accumulated-reward-per-share value.
///
/// 10^12 keeps the per-settlement truncation below one base unit for stake
/// totals up to 10^12 units. The accumulator grows without bound when a dust
/// stake sits alone in a fast pool, so `amount × acc` and
/// `rate × elapsed × PRECISION` are formed in 256 bits and only the quotient
/// has to fit in `i128`.
pub const PRECISION: i128 = 1_000_000_000_000;

/// Boost multipliers are expressed in percentage points above this base.
pub const BOOST_BASE: i128 = 100;

// ── Core reward engine ──────────────────────────────────────────────────────

/// Narrows `product / divisor` back to `i128`. `divisor` must be positive.
fn narrow_div(env: &Env, product: I256, divisor: i128) -> Result<i128, ContractError> {
    product
        .div(&I256::from_i128(env, divisor))
        .to_i128()
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Advance an accumulated-reward-per-share value by `elapsed` seconds.
///
/// ```text
/// Δacc = rate × elapsed × PRECISION / total_staked
/// ```
///
/// Floor division. An empty pool leaves `stored` unchanged: rewards emitted
/// while nobody is staked are skipped, not banked.
pub fn accumulate(
    env: &Env,
    stored: i128,
    rate_per_second: i128,
    elapsed: u64,
    total_staked: i128,
) -> Result<i128, ContractError> {
    if total_staked <= 0 || elapsed == 0 {
        return Ok(stored);
    }

    let scaled = I256::from_i128(env, rate_per_second)
        .mul(&I256::from_i128(env, elapsed as i128))
        .mul(&I256::from_i128(env, PRECISION));
    let delta = narrow_div(env, scaled, total_staked)?;

    stored
        .checked_add(delta)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Total reward a stake of `amount` has been entitled to since pool
/// inception at accumulator value `acc`.
pub fn accrued(env: &Env, amount: i128, acc: i128) -> Result<i128, ContractError> {
    let product = I256::from_i128(env, amount).mul(&I256::from_i128(env, acc));
    narrow_div(env, product, PRECISION)
}

/// Unboosted pending reward: `amount × acc / PRECISION − debt`.
///
/// A negative result means the debt was not recomputed after the last change
/// to `amount`; that is reported, never clamped.
pub fn pending(env: &Env, amount: i128, acc: i128, debt: i128) -> Result<i128, ContractError> {
    let base = accrued(env, amount, acc)?
        .checked_sub(debt)
        .ok_or(ContractError::ArithmeticOverflow)?;
    if base < 0 {
        return Err(ContractError::InvariantViolation);
    }
    Ok(base)
}

/// `base × (boost + 100) / 100`. A boost of 0 leaves `base` unchanged.
pub fn apply_boost(base: i128, boost: u32) -> Result<i128, ContractError> {
    let factor = BOOST_BASE
        .checked_add(boost as i128)
        .ok_or(ContractError::ArithmeticOverflow)?;
    base.checked_mul(factor)
        .map(|v| v / BOOST_BASE)
        .ok_or(ContractError::ArithmeticOverflow)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
