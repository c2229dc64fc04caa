extern crate std;

use soroban_sdk::{testutils::Address as _, vec, Address, Env};

use crate::{AdminTier, ContractError, FarmingContract, FarmingContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, FarmingContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(FarmingContract, ());
    let client = FarmingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &0, &0);

    (env, client, admin)
}

fn try_create_pool(
    env: &Env,
    client: &FarmingContractClient<'static>,
    caller: &Address,
) -> Result<(), ContractError> {
    let stake = Address::generate(env);
    let reward = Address::generate(env);
    match client.try_create_pool(
        caller,
        &stake,
        &vec![env, reward],
        &vec![env, 1i128],
        &0,
        &100,
        &1,
    ) {
        Ok(_) => Ok(()),
        Err(Ok(e)) => Err(e),
        Err(Err(_)) => unreachable!("create_pool must not abort the host"),
    }
}

// ── SuperAdmin bootstrapped on initialize ────────────────────────────────────

#[test]
fn test_admin_is_super_admin_after_init() {
    let (_env, client, admin) = setup();
    assert_eq!(client.get_admin_tier(&admin), Some(AdminTier::SuperAdmin));
}

// ── Tier permissions ─────────────────────────────────────────────────────────

#[test]
fn test_pool_manager_can_manage_pools() {
    let (env, client, admin) = setup();
    let manager = Address::generate(&env);

    client.promote_admin(&admin, &manager, &AdminTier::PoolManager);
    assert_eq!(client.get_admin_tier(&manager), Some(AdminTier::PoolManager));

    assert_eq!(try_create_pool(&env, &client, &manager), Ok(()));
    client.set_harvest_cooldown(&manager, &60);
    client.update_pool_reward_rate(&manager, &1, &vec![&env, 2i128]);
    client.set_pool_active(&manager, &1, &false);

    let user = Address::generate(&env);
    client.grant_boost_points(&manager, &user, &100);
    assert_eq!(client.get_boost_points(&user), 100);
}

#[test]
fn test_operator_can_pause_but_not_manage_pools() {
    let (env, client, admin) = setup();
    let operator = Address::generate(&env);
    client.promote_admin(&admin, &operator, &AdminTier::OperatorAdmin);

    client.pause(&operator);
    assert!(client.is_paused());
    client.unpause(&operator);
    assert!(!client.is_paused());

    assert_eq!(
        try_create_pool(&env, &client, &operator),
        Err(ContractError::Unauthorized)
    );
    match client.try_set_harvest_cooldown(&operator, &10) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_outsider_cannot_administer() {
    let (env, client, _admin) = setup();
    let intruder = Address::generate(&env);

    assert_eq!(
        try_create_pool(&env, &client, &intruder),
        Err(ContractError::Unauthorized)
    );
    match client.try_pause(&intruder) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    match client.try_grant_boost_points(&intruder, &intruder, &1_000) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_boost_points(&intruder), 0);
}

// ── Promote / demote ─────────────────────────────────────────────────────────

#[test]
fn test_super_admin_demotes_admin() {
    let (env, client, admin) = setup();
    let target = Address::generate(&env);

    client.promote_admin(&admin, &target, &AdminTier::PoolManager);
    client.demote_admin(&admin, &target);
    assert_eq!(client.get_admin_tier(&target), None);

    assert_eq!(
        try_create_pool(&env, &client, &target),
        Err(ContractError::Unauthorized)
    );
}

#[test]
fn test_pool_manager_cannot_promote() {
    let (env, client, admin) = setup();
    let manager = Address::generate(&env);
    let target = Address::generate(&env);
    client.promote_admin(&admin, &manager, &AdminTier::PoolManager);

    match client.try_promote_admin(&manager, &target, &AdminTier::OperatorAdmin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.get_admin_tier(&target), None);
}

#[test]
fn test_bootstrap_admin_cannot_be_demoted() {
    let (env, client, admin) = setup();
    let second = Address::generate(&env);
    client.promote_admin(&admin, &second, &AdminTier::SuperAdmin);

    match client.try_demote_admin(&second, &admin) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
    assert_eq!(client.get_admin_tier(&admin), Some(AdminTier::SuperAdmin));
}
