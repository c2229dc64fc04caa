#![no_std]

pub mod access;
pub mod boost;
pub mod errors;
pub mod events;
pub mod guard;
pub mod pause;
pub mod pool;
pub mod position;
pub mod rewards;

use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, token, Address, Env, Symbol, Vec,
};

pub use access::AdminTier;
pub use boost::BoostConfig;
pub use errors::{ContractError, ErrorCategory};
pub use pool::{Pool, PoolStatus, RewardStream};
pub use position::Position;

use pool::NewPool;

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const HARVEST_COOLDOWN: Symbol = symbol_short!("HRV_CD");
const MIN_STAKE: Symbol = symbol_short!("MIN_STK");

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Snapshot of a user's position in one pool returned by `get_staker_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakerInfo {
    pub amount: i128,
    pub pending_rewards: Vec<i128>,
    pub boost_multiplier: u32,
    pub next_claim_at: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct FarmingContract;

#[contractimpl]
impl FarmingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `harvest_cooldown` – seconds that must pass between two harvests.
    /// * `min_stake_amount` – smallest accepted deposit, in stake-asset units.
    pub fn initialize(
        env: Env,
        admin: Address,
        harvest_cooldown: u64,
        min_stake_amount: i128,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if min_stake_amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage()
            .instance()
            .set(&HARVEST_COOLDOWN, &harvest_cooldown);
        env.storage().instance().set(&MIN_STAKE, &min_stake_amount);

        access::set_super_admin(&env, &admin);

        events::publish_initialized(&env, admin, harvest_cooldown, min_stake_amount);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of the pool's stake asset.
    ///
    /// Rewards already earned by an existing stake are paid out first, without
    /// any cooldown check, so the new deposit never earns retroactively.
    pub fn stake(
        env: Env,
        staker: Address,
        pool_id: u64,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        guard::non_reentrant(&env, || {
            pause::require_not_paused(&env)?;
            if amount <= 0 {
                return Err(ContractError::InvalidAmount);
            }
            if amount < Self::get_min_stake_amount(env.clone()) {
                return Err(ContractError::BelowMinimumStake);
            }

            let now = env.ledger().timestamp();
            let mut pool = pool::load(&env, pool_id)?;
            pool.require_accepting_stake(now)?;

            // 1. Bring the accumulators up to now.
            pool::settle(&env, &mut pool, now)?;

            // 2. Pay out what the existing stake has earned.
            let existing = position::load(&env, pool_id, &staker);
            let first_stake = existing.is_none();
            let mut position = existing.unwrap_or_else(|| Position::empty(&env, &pool));
            if position.amount > 0 {
                Self::pay_pending(&env, &pool, &staker, &position)?;
            }

            // 3. Pull the deposit into custody.
            Self::transfer(
                &env,
                &pool.stake_asset,
                &staker,
                &env.current_contract_address(),
                amount,
            )?;

            // 4. Grow the position and the pool total.
            position.amount = position
                .amount
                .checked_add(amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
            pool.total_staked = pool
                .total_staked
                .checked_add(amount)
                .ok_or(ContractError::ArithmeticOverflow)?;

            // 5. Re-price against the settled accumulators.
            Self::reprice(&env, &pool, &staker, &mut position)?;

            pool::save(&env, &pool);
            position::save(&env, pool_id, &staker, &position);
            if first_stake {
                position::register_membership(&env, &staker, pool_id);
            }

            events::publish_staked(&env, pool_id, staker.clone(), amount, pool.total_staked);

            Ok(())
        })
    }

    /// Withdraw `amount` of stake and collect everything earned so far.
    ///
    /// Allowed in every pool state and while paused. The remaining stake may
    /// fall below the minimum stake amount.
    pub fn withdraw(
        env: Env,
        staker: Address,
        pool_id: u64,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        guard::non_reentrant(&env, || {
            if amount <= 0 {
                return Err(ContractError::InvalidAmount);
            }

            let mut pool = pool::load(&env, pool_id)?;
            let mut position =
                position::load(&env, pool_id, &staker).ok_or(ContractError::InsufficientStake)?;
            if position.amount < amount {
                return Err(ContractError::InsufficientStake);
            }

            let now = env.ledger().timestamp();

            // 1. Flush accumulators, then pay out against the old debt.
            pool::settle(&env, &mut pool, now)?;
            Self::pay_pending(&env, &pool, &staker, &position)?;

            // 2. Shrink the position and the pool total.
            position.amount -= amount;
            pool.total_staked = match pool.total_staked.checked_sub(amount) {
                Some(total) if total >= 0 => total,
                _ => {
                    log!(&env, "pool total below position", pool_id, pool.total_staked, amount);
                    return Err(ContractError::InvariantViolation);
                }
            };

            // 3. Re-price, then return the stake.
            Self::reprice(&env, &pool, &staker, &mut position)?;
            Self::transfer(
                &env,
                &pool.stake_asset,
                &env.current_contract_address(),
                &staker,
                amount,
            )?;

            pool::save(&env, &pool);
            position::save(&env, pool_id, &staker, &position);

            events::publish_withdrawn(&env, pool_id, staker.clone(), amount, pool.total_staked);

            Ok(())
        })
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Harvest every reward stream of `pool_id` for `staker`.
    ///
    /// Fails with `CooldownActive` until `last_claim_time + harvest_cooldown`.
    /// Returns the amount paid per stream, in stream order.
    pub fn claim_rewards(
        env: Env,
        staker: Address,
        pool_id: u64,
    ) -> Result<Vec<i128>, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        guard::non_reentrant(&env, || {
            pause::require_not_paused(&env)?;

            let mut pool = pool::load(&env, pool_id)?;
            let mut position =
                position::load(&env, pool_id, &staker).ok_or(ContractError::PositionNotFound)?;

            let now = env.ledger().timestamp();
            let cooldown = Self::get_harvest_cooldown(env.clone());
            if now < position.next_claim_at(cooldown) {
                return Err(ContractError::CooldownActive);
            }

            pool::settle(&env, &mut pool, now)?;
            let paid = Self::pay_pending(&env, &pool, &staker, &position)?;

            position.last_claim_time = now;
            Self::reprice(&env, &pool, &staker, &mut position)?;

            pool::save(&env, &pool);
            position::save(&env, pool_id, &staker, &position);

            Ok(paid)
        })
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_pool(env: Env, pool_id: u64) -> Result<Pool, ContractError> {
        pool::load(&env, pool_id)
    }

    pub fn get_pool_status(env: Env, pool_id: u64) -> Result<PoolStatus, ContractError> {
        Ok(pool::load(&env, pool_id)?.status(env.ledger().timestamp()))
    }

    /// Number of pools created; pool ids run from 1 to this value.
    pub fn get_pool_count(env: Env) -> u64 {
        pool::count(&env)
    }

    pub fn get_position(env: Env, pool_id: u64, user: Address) -> Result<Position, ContractError> {
        position::load(&env, pool_id, &user).ok_or(ContractError::PositionNotFound)
    }

    /// Real-time boosted pending reward of one stream, without mutating state.
    pub fn pending_reward(
        env: Env,
        pool_id: u64,
        user: Address,
        reward_index: u32,
    ) -> Result<i128, ContractError> {
        let pool = pool::load(&env, pool_id)?;
        if reward_index >= pool.reward_count() {
            return Err(ContractError::RewardIndexOutOfRange);
        }
        let Some(position) = position::load(&env, pool_id, &user) else {
            return Ok(0);
        };
        let projected = pool::project(&env, &pool, env.ledger().timestamp())?;
        position::pending(&env, &position, &projected, reward_index)
    }

    /// Real-time boosted pending rewards of every stream.
    pub fn pending_rewards(
        env: Env,
        pool_id: u64,
        user: Address,
    ) -> Result<Vec<i128>, ContractError> {
        let pool = pool::load(&env, pool_id)?;
        let position =
            position::load(&env, pool_id, &user).unwrap_or_else(|| Position::empty(&env, &pool));
        let projected = pool::project(&env, &pool, env.ledger().timestamp())?;
        position::pending_all(&env, &position, &projected)
    }

    /// Combined position view; reads the position and pool once.
    pub fn get_staker_info(
        env: Env,
        pool_id: u64,
        user: Address,
    ) -> Result<StakerInfo, ContractError> {
        let pool = pool::load(&env, pool_id)?;
        let position =
            position::load(&env, pool_id, &user).unwrap_or_else(|| Position::empty(&env, &pool));
        let projected = pool::project(&env, &pool, env.ledger().timestamp())?;

        Ok(StakerInfo {
            amount: position.amount,
            pending_rewards: position::pending_all(&env, &position, &projected)?,
            boost_multiplier: position.boost_multiplier,
            next_claim_at: position.next_claim_at(Self::get_harvest_cooldown(env.clone())),
        })
    }

    pub fn get_user_pools(env: Env, user: Address) -> Vec<u64> {
        position::user_pools(&env, &user)
    }

    pub fn get_boost_points(env: Env, user: Address) -> i128 {
        boost::points(&env, &user)
    }

    /// Boost the user would get at their next interaction with any pool.
    pub fn get_boost_multiplier(env: Env, user: Address) -> u32 {
        boost::multiplier(&env, &user)
    }

    pub fn get_boost_config(env: Env) -> BoostConfig {
        boost::config(&env)
    }

    pub fn get_harvest_cooldown(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&HARVEST_COOLDOWN)
            .unwrap_or(0)
    }

    pub fn get_min_stake_amount(env: Env) -> i128 {
        env.storage().instance().get(&MIN_STAKE).unwrap_or(0)
    }

    pub fn is_paused(env: Env) -> bool {
        pause::is_paused(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_admin_tier(env: Env, admin: Address) -> Option<AdminTier> {
        access::get_tier(&env, &admin)
    }

    // ── Pool administration ──────────────────────────────────────────────────

    /// Register a new pool and return its id.
    ///
    /// `reward_assets[i]` is emitted at `reward_rates[i]` units per second
    /// between `start_time` and `end_time`. Requires `PoolManager`.
    #[allow(clippy::too_many_arguments)]
    pub fn create_pool(
        env: Env,
        caller: Address,
        stake_asset: Address,
        reward_assets: Vec<Address>,
        reward_rates: Vec<i128>,
        start_time: u64,
        end_time: u64,
        multiplier_factor: u32,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_tier(&env, &caller, &AdminTier::PoolManager)?;

        guard::non_reentrant(&env, || {
            let params = NewPool {
                stake_asset,
                reward_assets,
                reward_rates,
                start_time,
                end_time,
                multiplier_factor,
            };
            pool::validate_new(&params, env.ledger().timestamp())?;

            let created = pool::create(&env, params);
            let (assets, rates) = Self::split_streams(&env, &created);

            events::publish_pool_created(
                &env,
                created.id,
                created.stake_asset.clone(),
                assets,
                rates,
                created.start_time,
                created.end_time,
            );

            Ok(created.id)
        })
    }

    /// Replace the emission rates of a pool.
    ///
    /// The pool is settled at the old rates first, so the change only applies
    /// from now on. Requires `PoolManager`.
    pub fn update_pool_reward_rate(
        env: Env,
        caller: Address,
        pool_id: u64,
        new_rates: Vec<i128>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_tier(&env, &caller, &AdminTier::PoolManager)?;

        guard::non_reentrant(&env, || {
            let mut pool = pool::load(&env, pool_id)?;
            pool::settle(&env, &mut pool, env.ledger().timestamp())?;
            pool::replace_rates(&env, &mut pool, &new_rates)?;
            pool::save(&env, &pool);

            events::publish_reward_rate_updated(&env, pool_id, new_rates.clone());
            Ok(())
        })
    }

    /// Open or close a pool for new stakes. Withdrawals and harvests are not
    /// affected. Requires `PoolManager`.
    pub fn set_pool_active(
        env: Env,
        caller: Address,
        pool_id: u64,
        active: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_tier(&env, &caller, &AdminTier::PoolManager)?;

        guard::non_reentrant(&env, || {
            let mut pool = pool::load(&env, pool_id)?;
            pool::settle(&env, &mut pool, env.ledger().timestamp())?;
            pool.is_active = active;
            pool::save(&env, &pool);

            events::publish_pool_active_set(&env, pool_id, active);
            Ok(())
        })
    }

    /// Requires `PoolManager`.
    pub fn set_harvest_cooldown(
        env: Env,
        caller: Address,
        new_cooldown: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_tier(&env, &caller, &AdminTier::PoolManager)?;

        guard::non_reentrant(&env, || {
            env.storage()
                .instance()
                .set(&HARVEST_COOLDOWN, &new_cooldown);
            events::publish_harvest_cooldown_set(&env, new_cooldown);
            Ok(())
        })
    }

    /// Requires `PoolManager`. Only future deposits are checked.
    pub fn set_min_stake_amount(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_tier(&env, &caller, &AdminTier::PoolManager)?;

        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        guard::non_reentrant(&env, || {
            env.storage().instance().set(&MIN_STAKE, &amount);
            events::publish_min_stake_set(&env, amount);
            Ok(())
        })
    }

    // ── Boost administration ─────────────────────────────────────────────────

    /// Add boost points to `user` and return the new balance.
    ///
    /// Open positions pick up the new multiplier at their next stake, withdraw
    /// or harvest. Requires `PoolManager`.
    pub fn grant_boost_points(
        env: Env,
        caller: Address,
        user: Address,
        points: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_tier(&env, &caller, &AdminTier::PoolManager)?;

        guard::non_reentrant(&env, || {
            let balance = boost::grant(&env, &user, points)?;
            let multiplier = boost::multiplier(&env, &user);
            events::publish_boost_updated(&env, user.clone(), balance, multiplier);
            Ok(balance)
        })
    }

    /// Requires `PoolManager`.
    pub fn set_boost_config(
        env: Env,
        caller: Address,
        points_per_percent: i128,
        max_boost: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_tier(&env, &caller, &AdminTier::PoolManager)?;

        guard::non_reentrant(&env, || {
            boost::set_config(
                &env,
                &BoostConfig {
                    points_per_percent,
                    max_boost,
                },
            )?;
            events::publish_boost_config_set(&env, points_per_percent, max_boost);
            Ok(())
        })
    }

    // ── Circuit breaker ──────────────────────────────────────────────────────

    /// Halt stakes and harvests. Requires `OperatorAdmin`.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_paused(env, caller, true)
    }

    /// Requires `OperatorAdmin`.
    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_paused(env, caller, false)
    }

    // ── Admin tier management ────────────────────────────────────────────────

    /// Only a `SuperAdmin` may call this.
    pub fn promote_admin(
        env: Env,
        caller: Address,
        target: Address,
        tier: AdminTier,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        guard::non_reentrant(&env, || access::promote(&env, &caller, &target, tier))
    }

    /// Only a `SuperAdmin` may call this. The bootstrap admin cannot be demoted.
    pub fn demote_admin(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        guard::non_reentrant(&env, || access::demote(&env, &caller, &target))
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn set_paused(env: Env, caller: Address, paused: bool) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_tier(&env, &caller, &AdminTier::OperatorAdmin)?;

        guard::non_reentrant(&env, || {
            pause::set_paused(&env, paused);
            events::publish_paused(&env, caller.clone(), paused);
            Ok(())
        })
    }

    /// Moves `amount` of `asset`; any token-side failure aborts the invocation.
    fn transfer(
        env: &Env,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        match token::Client::new(env, asset).try_transfer(from, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(env, "transfer failed", asset.clone(), amount);
                Err(ContractError::TransferFailed)
            }
        }
    }

    /// Pays `user` the boosted pending reward of every stream of the settled
    /// `pool`. Unguarded: only ever called from inside a guarded entry point,
    /// and the caller must recompute the debt afterwards.
    fn pay_pending(
        env: &Env,
        pool: &Pool,
        user: &Address,
        position: &Position,
    ) -> Result<Vec<i128>, ContractError> {
        let amounts = position::pending_all(env, position, pool)?;
        let custody = env.current_contract_address();

        let mut assets = Vec::new(env);
        let mut paid_any = false;
        for (stream, amount) in pool.rewards.iter().zip(amounts.iter()) {
            if amount > 0 {
                Self::transfer(env, &stream.asset, &custody, user, amount)?;
                paid_any = true;
            }
            assets.push_back(stream.asset);
        }

        if paid_any {
            events::publish_rewards_claimed(env, pool.id, user.clone(), assets, amounts.clone());
        }
        Ok(amounts)
    }

    /// Recomputes the reward debt of `user` and reports a changed boost.
    fn reprice(
        env: &Env,
        pool: &Pool,
        user: &Address,
        position: &mut Position,
    ) -> Result<(), ContractError> {
        let previous_boost = position.boost_multiplier;
        position::recompute_debt(env, pool, user, position)?;
        if position.boost_multiplier != previous_boost {
            events::publish_boost_updated(
                env,
                user.clone(),
                boost::points(env, user),
                position.boost_multiplier,
            );
        }
        Ok(())
    }

    fn split_streams(env: &Env, pool: &Pool) -> (Vec<Address>, Vec<i128>) {
        let mut assets = Vec::new(env);
        let mut rates = Vec::new(env);
        for stream in pool.rewards.iter() {
            assets.push_back(stream.asset);
            rates.push_back(stream.rate_per_second);
        }
        (assets, rates)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin_tiers;

#[cfg(test)]
mod test_lifecycle;
