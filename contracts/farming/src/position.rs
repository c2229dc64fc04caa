use soroban_sdk::{contracttype, log, symbol_short, Address, Env, Symbol, Vec};

use crate::{boost, pool::Pool, rewards, ContractError};

// Per-(pool, user) persistent storage uses tuple keys: (prefix, pool_id, user)
const POSITION: Symbol = symbol_short!("POS");
const USER_POOLS: Symbol = symbol_short!("U_POOLS");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// A user's stake in one pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub amount: i128,
    /// Per stream: `amount × acc / PRECISION` at the last recomputation.
    pub reward_debt: Vec<i128>,
    /// Timestamp of the last harvest; 0 means never harvested.
    pub last_claim_time: u64,
    /// Boost in percentage points, snapshotted at the last recomputation.
    pub boost_multiplier: u32,
}

impl Position {
    /// Empty position sized for `pool`'s reward streams.
    pub fn empty(env: &Env, pool: &Pool) -> Self {
        let mut reward_debt = Vec::new(env);
        for _ in 0..pool.reward_count() {
            reward_debt.push_back(0i128);
        }
        Position {
            amount: 0,
            reward_debt,
            last_claim_time: 0,
            boost_multiplier: 0,
        }
    }

    /// Earliest timestamp at which a harvest is accepted. The first harvest
    /// is never gated.
    pub fn next_claim_at(&self, cooldown: u64) -> u64 {
        if self.last_claim_time == 0 {
            return 0;
        }
        self.last_claim_time.saturating_add(cooldown)
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

fn position_key(pool_id: u64, user: &Address) -> (Symbol, u64, Address) {
    (POSITION, pool_id, user.clone())
}

fn user_pools_key(user: &Address) -> (Symbol, Address) {
    (USER_POOLS, user.clone())
}

pub fn load(env: &Env, pool_id: u64, user: &Address) -> Option<Position> {
    env.storage().persistent().get(&position_key(pool_id, user))
}

pub fn save(env: &Env, pool_id: u64, user: &Address, position: &Position) {
    let key = position_key(pool_id, user);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Ids of every pool `user` has ever staked in, in first-stake order.
pub fn user_pools(env: &Env, user: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&user_pools_key(user))
        .unwrap_or(Vec::new(env))
}

/// Records `pool_id` in the membership list of `user` if it is not there yet.
pub fn register_membership(env: &Env, user: &Address, pool_id: u64) {
    let mut pools = user_pools(env, user);
    if pools.contains(pool_id) {
        return;
    }
    pools.push_back(pool_id);
    let key = user_pools_key(user);
    env.storage().persistent().set(&key, &pools);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Ledger ───────────────────────────────────────────────────────────────────

/// Boosted pending reward of one stream. `pool` must already be settled or
/// projected to the moment of interest.
pub fn pending(
    env: &Env,
    position: &Position,
    pool: &Pool,
    index: u32,
) -> Result<i128, ContractError> {
    let stream = pool
        .rewards
        .get(index)
        .ok_or(ContractError::RewardIndexOutOfRange)?;
    let debt = position
        .reward_debt
        .get(index)
        .ok_or(ContractError::InvariantViolation)?;

    let base = rewards::pending(env, position.amount, stream.acc_reward_per_share, debt)?;
    rewards::apply_boost(base, position.boost_multiplier)
}

/// Boosted pending reward of every stream, in stream order.
pub fn pending_all(env: &Env, position: &Position, pool: &Pool) -> Result<Vec<i128>, ContractError> {
    let mut amounts = Vec::new(env);
    for index in 0..pool.reward_count() {
        match pending(env, position, pool, index) {
            Ok(amount) => amounts.push_back(amount),
            Err(e) => {
                log!(env, "pending failed", pool.id, index, position.amount);
                return Err(e);
            }
        }
    }
    Ok(amounts)
}

/// Re-prices `position` of `user` against the settled accumulators of `pool`.
///
/// Must run right after `amount` changes or pending rewards are paid out. The
/// boost snapshot is refreshed from the user's point balance at the same time,
/// so the snapshot always covers exactly the interval its debt covers.
pub fn recompute_debt(
    env: &Env,
    pool: &Pool,
    user: &Address,
    position: &mut Position,
) -> Result<(), ContractError> {
    let mut debt = Vec::new(env);
    for stream in pool.rewards.iter() {
        debt.push_back(rewards::accrued(env, position.amount, stream.acc_reward_per_share)?);
    }
    position.reward_debt = debt;
    position.boost_multiplier = boost::multiplier(env, user);
    Ok(())
}
