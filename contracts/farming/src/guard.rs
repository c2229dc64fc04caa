use soroban_sdk::{symbol_short, Env, Symbol};

use crate::ContractError;

const LOCKED: Symbol = symbol_short!("LOCKED");

/// Runs `op` while holding the contract-wide entry lock.
///
/// Every public mutating entry point wraps its body in exactly one call.
/// Helpers invoked from inside `op` (such as the reward payout bundled into
/// stake and withdraw) must never call back into a guarded entry point.
/// On error the host discards the whole invocation, lock flag included.
pub fn non_reentrant<T, F>(env: &Env, op: F) -> Result<T, ContractError>
where
    F: FnOnce() -> Result<T, ContractError>,
{
    if is_locked(env) {
        return Err(ContractError::Reentrancy);
    }
    env.storage().instance().set(&LOCKED, &true);
    let result = op();
    env.storage().instance().remove(&LOCKED);
    result
}

pub fn is_locked(env: &Env) -> bool {
    env.storage().instance().get(&LOCKED).unwrap_or(false)
}
