#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Vec};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub harvest_cooldown: u64,
    pub min_stake_amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreatedEvent {
    pub pool_id: u64,
    pub stake_asset: Address,
    pub reward_assets: Vec<Address>,
    pub reward_rates: Vec<i128>,
    pub start_time: u64,
    pub end_time: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub pool_id: u64,
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub pool_id: u64,
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Per-asset payout; `amounts[i]` was paid in `assets[i]`.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsClaimedEvent {
    pub pool_id: u64,
    pub staker: Address,
    pub assets: Vec<Address>,
    pub amounts: Vec<i128>,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoostUpdatedEvent {
    pub user: Address,
    pub points: i128,
    pub multiplier: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateUpdatedEvent {
    pub pool_id: u64,
    pub new_rates: Vec<i128>,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolActiveSetEvent {
    pub pool_id: u64,
    pub active: bool,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, harvest_cooldown: u64, min_stake_amount: i128) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            harvest_cooldown,
            min_stake_amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_created(
    env: &Env,
    pool_id: u64,
    stake_asset: Address,
    reward_assets: Vec<Address>,
    reward_rates: Vec<i128>,
    start_time: u64,
    end_time: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_NEW"), pool_id),
        PoolCreatedEvent {
            pool_id,
            stake_asset,
            reward_assets,
            reward_rates,
            start_time,
            end_time,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, pool_id: u64, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), pool_id, staker.clone()),
        StakedEvent {
            pool_id,
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, pool_id: u64, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), pool_id, staker.clone()),
        WithdrawnEvent {
            pool_id,
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_claimed(
    env: &Env,
    pool_id: u64,
    staker: Address,
    assets: Vec<Address>,
    amounts: Vec<i128>,
) {
    env.events().publish(
        (symbol_short!("CLAIMED"), pool_id, staker.clone()),
        RewardsClaimedEvent {
            pool_id,
            staker,
            assets,
            amounts,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_boost_updated(env: &Env, user: Address, points: i128, multiplier: u32) {
    env.events().publish(
        (symbol_short!("BOOST"), user.clone()),
        BoostUpdatedEvent {
            user,
            points,
            multiplier,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_rate_updated(env: &Env, pool_id: u64, new_rates: Vec<i128>) {
    env.events().publish(
        (symbol_short!("RATE_SET"), pool_id),
        RewardRateUpdatedEvent {
            pool_id,
            new_rates,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_active_set(env: &Env, pool_id: u64, active: bool) {
    env.events().publish(
        (symbol_short!("POOL_ACT"), pool_id),
        PoolActiveSetEvent {
            pool_id,
            active,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_harvest_cooldown_set(env: &Env, cooldown: u64) {
    env.events().publish(
        (symbol_short!("CD_SET"),),
        (cooldown, env.ledger().timestamp()),
    );
}

pub fn publish_min_stake_set(env: &Env, amount: i128) {
    env.events().publish(
        (symbol_short!("MIN_SET"),),
        (amount, env.ledger().timestamp()),
    );
}

pub fn publish_boost_config_set(env: &Env, points_per_percent: i128, max_boost: u32) {
    env.events().publish(
        (symbol_short!("BST_CFG"),),
        (points_per_percent, max_boost, env.ledger().timestamp()),
    );
}

pub fn publish_paused(env: &Env, caller: Address, paused: bool) {
    let topic = if paused {
        symbol_short!("PAUSED")
    } else {
        symbol_short!("UNPAUSED")
    };
    env.events()
        .publish((topic, caller), env.ledger().timestamp());
}
