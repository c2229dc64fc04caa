use soroban_sdk::{symbol_short, Env, Symbol};

use crate::ContractError;

const PAUSED: Symbol = symbol_short!("P_GLOB");

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// Rejects stake and harvest while the circuit breaker is engaged.
/// Withdrawals stay open so stakers can always exit.
pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

pub fn set_paused(env: &Env, paused: bool) {
    if paused {
        env.storage().instance().set(&PAUSED, &true);
    } else {
        env.storage().instance().remove(&PAUSED);
    }
}
