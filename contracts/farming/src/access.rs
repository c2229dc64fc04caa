use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ADMIN_TIER_PREFIX: Symbol = symbol_short!("ADM_TIER");
const SUPER_ADMIN: Symbol = symbol_short!("S_ADMIN");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Admin Tier Enum ──────────────────────────────────────────────────────────

/// Admin hierarchy for the farming engine.
///
/// - `OperatorAdmin` – may pause and unpause user operations.
/// - `PoolManager`   – may create pools, change reward rates, toggle pools,
///                     tune the harvest cooldown, minimum stake and boost curve,
///                     and grant boost points.
/// - `SuperAdmin`    – everything above, plus promoting and demoting admins.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminTier {
    OperatorAdmin = 1,
    PoolManager = 2,
    SuperAdmin = 3,
}

impl AdminTier {
    pub fn rank(&self) -> u32 {
        match self {
            AdminTier::OperatorAdmin => 1,
            AdminTier::PoolManager => 2,
            AdminTier::SuperAdmin => 3,
        }
    }

    pub fn has_at_least(&self, min_tier: &AdminTier) -> bool {
        self.rank() >= min_tier.rank()
    }
}

fn tier_key(admin: &Address) -> (Symbol, Address) {
    (ADMIN_TIER_PREFIX, admin.clone())
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Assigns `tier` to `admin`. Callers must have authorised the change.
pub fn set_tier(env: &Env, admin: &Address, tier: AdminTier) {
    let key = tier_key(admin);
    env.storage().persistent().set(&key, &tier);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn get_tier(env: &Env, admin: &Address) -> Option<AdminTier> {
    env.storage().persistent().get(&tier_key(admin))
}

/// Fails with `Unauthorized` unless `caller` holds at least `min_tier`.
pub fn require_tier(env: &Env, caller: &Address, min_tier: &AdminTier) -> Result<(), ContractError> {
    match get_tier(env, caller) {
        Some(tier) if tier.has_at_least(min_tier) => Ok(()),
        _ => Err(ContractError::Unauthorized),
    }
}

/// Records the bootstrap admin and grants it `SuperAdmin`.
pub fn set_super_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&SUPER_ADMIN, admin);
    set_tier(env, admin, AdminTier::SuperAdmin);
}

pub fn get_super_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&SUPER_ADMIN)
}

// ── Promote / Demote ─────────────────────────────────────────────────────────

pub fn promote(
    env: &Env,
    caller: &Address,
    target: &Address,
    tier: AdminTier,
) -> Result<(), ContractError> {
    require_tier(env, caller, &AdminTier::SuperAdmin)?;
    set_tier(env, target, tier);
    Ok(())
}

/// Removes the tier of `target`. The bootstrap admin cannot be demoted, so the
/// engine always keeps one `SuperAdmin`.
pub fn demote(env: &Env, caller: &Address, target: &Address) -> Result<(), ContractError> {
    require_tier(env, caller, &AdminTier::SuperAdmin)?;
    if get_super_admin(env).as_ref() == Some(target) {
        return Err(ContractError::InvalidInput);
    }
    env.storage().persistent().remove(&tier_key(target));
    Ok(())
}
