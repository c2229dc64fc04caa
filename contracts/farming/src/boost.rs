use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

const BOOST_POINTS: Symbol = symbol_short!("BST_PTS");
const BOOST_CONFIG: Symbol = symbol_short!("BST_CFG");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

pub const DEFAULT_POINTS_PER_PERCENT: i128 = 100;
pub const DEFAULT_MAX_BOOST: u32 = 100;

/// Shape of the points → multiplier curve.
///
/// Every `points_per_percent` points add one percentage point of boost, up to
/// `max_boost` percentage points.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoostConfig {
    pub points_per_percent: i128,
    pub max_boost: u32,
}

impl Default for BoostConfig {
    fn default() -> Self {
        BoostConfig {
            points_per_percent: DEFAULT_POINTS_PER_PERCENT,
            max_boost: DEFAULT_MAX_BOOST,
        }
    }
}

/// Maps a point balance to a boost in percentage points above 100.
pub fn multiplier_for_points(points: i128, config: &BoostConfig) -> u32 {
    if points <= 0 || config.points_per_percent <= 0 {
        return 0;
    }
    let percent = points / config.points_per_percent;
    if percent >= config.max_boost as i128 {
        config.max_boost
    } else {
        percent as u32
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

fn points_key(user: &Address) -> (Symbol, Address) {
    (BOOST_POINTS, user.clone())
}

pub fn config(env: &Env) -> BoostConfig {
    env.storage()
        .instance()
        .get(&BOOST_CONFIG)
        .unwrap_or_default()
}

pub fn set_config(env: &Env, config: &BoostConfig) -> Result<(), ContractError> {
    if config.points_per_percent <= 0 {
        return Err(ContractError::InvalidInput);
    }
    env.storage().instance().set(&BOOST_CONFIG, config);
    Ok(())
}

/// Point balance of `user`; zero if never granted.
pub fn points(env: &Env, user: &Address) -> i128 {
    env.storage().persistent().get(&points_key(user)).unwrap_or(0)
}

/// Adds `amount` points to `user` and returns the new balance.
pub fn grant(env: &Env, user: &Address, amount: i128) -> Result<i128, ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    let balance = points(env, user)
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    let key = points_key(user);
    env.storage().persistent().set(&key, &balance);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(balance)
}

/// Current boost for `user` under the active curve.
pub fn multiplier(env: &Env, user: &Address) -> u32 {
    multiplier_for_points(points(env, user), &config(env))
}
