use soroban_sdk::{contracttype, log, symbol_short, Address, Env, Symbol, Vec};

use crate::{rewards, ContractError};

// ── Storage keys ─────────────────────────────────────────────────────────────

const POOL: Symbol = symbol_short!("POOL");
const POOL_CTR: Symbol = symbol_short!("POOL_CTR");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Upper bound on reward streams per pool. Every settlement and payout walks
/// all streams, so this caps per-call work.
pub const MAX_REWARD_TOKENS: u32 = 8;

// ── Types ────────────────────────────────────────────────────────────────────

/// One reward token emitted by a pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardStream {
    pub asset: Address,
    /// Units emitted per second, shared by all stakers of the pool.
    pub rate_per_second: i128,
    /// Accumulated reward per staked unit, scaled by `rewards::PRECISION`.
    pub acc_reward_per_share: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u64,
    pub stake_asset: Address,
    pub rewards: Vec<RewardStream>,
    pub total_staked: i128,
    /// Timestamp through which every accumulator has been settled.
    pub last_update_time: u64,
    pub start_time: u64,
    pub end_time: u64,
    /// Pool-wide boost scalar. Stored and reported, not applied to payouts.
    pub multiplier_factor: u32,
    pub is_active: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PoolStatus {
    Pending = 1,
    Active = 2,
    Ended = 3,
    Inactive = 4,
}

/// Creation parameters, validated by [`validate_new`].
pub struct NewPool {
    pub stake_asset: Address,
    pub reward_assets: Vec<Address>,
    pub reward_rates: Vec<i128>,
    pub start_time: u64,
    pub end_time: u64,
    pub multiplier_factor: u32,
}

impl Pool {
    pub fn status(&self, now: u64) -> PoolStatus {
        if !self.is_active {
            PoolStatus::Inactive
        } else if now < self.start_time {
            PoolStatus::Pending
        } else if now > self.end_time {
            PoolStatus::Ended
        } else {
            PoolStatus::Active
        }
    }

    pub fn reward_count(&self) -> u32 {
        self.rewards.len()
    }

    /// Fails with the state error matching the pool's status unless it
    /// currently accepts new stake.
    pub fn require_accepting_stake(&self, now: u64) -> Result<(), ContractError> {
        match self.status(now) {
            PoolStatus::Active => Ok(()),
            PoolStatus::Pending => Err(ContractError::PoolNotStarted),
            PoolStatus::Ended => Err(ContractError::PoolEnded),
            PoolStatus::Inactive => Err(ContractError::PoolInactive),
        }
    }
}

// ── Accrual ──────────────────────────────────────────────────────────────────

/// Settles every accumulator of `pool` up to `now`.
///
/// Emission stops at `end_time`, so settlement never advances past it.
/// Calling again with the same or an earlier `now` is a no-op. While the pool
/// is empty only `last_update_time` moves.
pub fn settle(env: &Env, pool: &mut Pool, now: u64) -> Result<(), ContractError> {
    let horizon = now.min(pool.end_time);
    if horizon <= pool.last_update_time {
        return Ok(());
    }

    if pool.total_staked > 0 {
        let elapsed = horizon - pool.last_update_time;
        let mut settled = Vec::new(env);
        for mut stream in pool.rewards.iter() {
            stream.acc_reward_per_share = match rewards::accumulate(
                env,
                stream.acc_reward_per_share,
                stream.rate_per_second,
                elapsed,
                pool.total_staked,
            ) {
                Ok(acc) => acc,
                Err(e) => {
                    log!(env, "accumulator overflow", pool.id, elapsed);
                    return Err(e);
                }
            };
            settled.push_back(stream);
        }
        pool.rewards = settled;
        log!(env, "pool settled", pool.id, elapsed, pool.total_staked);
    }

    pool.last_update_time = horizon;
    Ok(())
}

/// The pool as `settle` would leave it at `now`, without persisting anything.
pub fn project(env: &Env, pool: &Pool, now: u64) -> Result<Pool, ContractError> {
    let mut projected = pool.clone();
    settle(env, &mut projected, now)?;
    Ok(projected)
}

// ── Registry ─────────────────────────────────────────────────────────────────

fn pool_key(pool_id: u64) -> (Symbol, u64) {
    (POOL, pool_id)
}

/// Checks creation parameters against `now`.
pub fn validate_new(params: &NewPool, now: u64) -> Result<(), ContractError> {
    let count = params.reward_assets.len();
    if count != params.reward_rates.len() {
        return Err(ContractError::LengthMismatch);
    }
    if count == 0 {
        return Err(ContractError::InvalidInput);
    }
    if count > MAX_REWARD_TOKENS {
        return Err(ContractError::TooManyRewardTokens);
    }
    if params.start_time < now || params.end_time <= params.start_time {
        return Err(ContractError::InvalidTimeWindow);
    }
    validate_rates(&params.reward_rates)?;

    for (i, asset) in params.reward_assets.iter().enumerate() {
        if asset == params.stake_asset {
            return Err(ContractError::TokensIdentical);
        }
        let duplicate = params
            .reward_assets
            .iter()
            .skip(i + 1)
            .any(|other| other == asset);
        if duplicate {
            return Err(ContractError::TokensIdentical);
        }
    }
    Ok(())
}

pub fn validate_rates(rates: &Vec<i128>) -> Result<(), ContractError> {
    if rates.iter().any(|rate| rate < 0) {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// Allocates the next sequential id and stores a fresh pool.
///
/// Accumulators start at zero and `last_update_time` at `start_time`, so
/// nothing accrues before the window opens.
pub fn create(env: &Env, params: NewPool) -> Pool {
    let id = count(env) + 1;

    let mut streams = Vec::new(env);
    for (asset, rate) in params.reward_assets.iter().zip(params.reward_rates.iter()) {
        streams.push_back(RewardStream {
            asset,
            rate_per_second: rate,
            acc_reward_per_share: 0,
        });
    }

    let pool = Pool {
        id,
        stake_asset: params.stake_asset,
        rewards: streams,
        total_staked: 0,
        last_update_time: params.start_time,
        start_time: params.start_time,
        end_time: params.end_time,
        multiplier_factor: params.multiplier_factor,
        is_active: true,
    };

    env.storage().instance().set(&POOL_CTR, &id);
    save(env, &pool);
    pool
}

/// Number of pools created so far; also the highest pool id.
pub fn count(env: &Env) -> u64 {
    env.storage().instance().get(&POOL_CTR).unwrap_or(0)
}

pub fn load(env: &Env, pool_id: u64) -> Result<Pool, ContractError> {
    env.storage()
        .persistent()
        .get(&pool_key(pool_id))
        .ok_or(ContractError::PoolNotFound)
}

pub fn save(env: &Env, pool: &Pool) {
    let key = pool_key(pool.id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Replaces the emission rates. The caller must settle first so the change
/// only applies going forward.
pub fn replace_rates(env: &Env, pool: &mut Pool, new_rates: &Vec<i128>) -> Result<(), ContractError> {
    if new_rates.len() != pool.reward_count() {
        return Err(ContractError::LengthMismatch);
    }
    validate_rates(new_rates)?;

    let mut updated = Vec::new(env);
    for (mut stream, rate) in pool.rewards.iter().zip(new_rates.iter()) {
        stream.rate_per_second = rate;
        updated.push_back(stream);
    }
    pool.rewards = updated;
    Ok(())
}
