extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    vec, Address, Env,
};

use crate::{ContractError, FarmingContract, FarmingContractClient, PoolStatus};

const T0: u64 = 1_700_000_000;

fn setup() -> (
    Env,
    FarmingContractClient<'static>,
    Address, // admin
    Address, // stake_token
    Address, // reward_token
) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(T0);

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(FarmingContract, ());
    let client = FarmingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin, &0, &0);

    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &1_000_000_000i128);

    (env, client, admin, stake_token, reward_token)
}

#[allow(clippy::too_many_arguments)]
fn create_pool(
    env: &Env,
    client: &FarmingContractClient<'static>,
    admin: &Address,
    stake_token: &Address,
    reward_token: &Address,
    rate: i128,
    start: u64,
    end: u64,
) -> u64 {
    client.create_pool(
        admin,
        stake_token,
        &vec![env, reward_token.clone()],
        &vec![env, rate],
        &start,
        &end,
        &1,
    )
}

fn funded_staker(env: &Env, stake_token: &Address, amount: i128) -> Address {
    let staker = Address::generate(env);
    StellarAssetClient::new(env, stake_token).mint(&staker, &amount);
    staker
}

// ── Pool state machine ────────────────────────────────────────────────────────

#[test]
fn test_pool_walks_through_every_status() {
    let (env, client, admin, stake_token, reward_token) = setup();
    let pool_id = create_pool(
        &env, &client, &admin, &stake_token, &reward_token, 10, T0 + 100, T0 + 200,
    );

    assert_eq!(client.get_pool_status(&pool_id), PoolStatus::Pending);

    env.ledger().set_timestamp(T0 + 150);
    assert_eq!(client.get_pool_status(&pool_id), PoolStatus::Active);

    client.set_pool_active(&admin, &pool_id, &false);
    assert_eq!(client.get_pool_status(&pool_id), PoolStatus::Inactive);

    client.set_pool_active(&admin, &pool_id, &true);
    env.ledger().set_timestamp(T0 + 201);
    assert_eq!(client.get_pool_status(&pool_id), PoolStatus::Ended);
}

#[test]
fn test_inactive_pool_rejects_stake_but_allows_exit() {
    let (env, client, admin, stake_token, reward_token) = setup();
    let pool_id = create_pool(
        &env, &client, &admin, &stake_token, &reward_token, 10, T0, T0 + 10_000,
    );
    let staker = funded_staker(&env, &stake_token, 2_000);
    client.stake(&staker, &pool_id, &1_000);

    env.ledger().set_timestamp(T0 + 100);
    client.set_pool_active(&admin, &pool_id, &false);

    match client.try_stake(&staker, &pool_id, &1_000) {
        Err(Ok(e)) => assert_eq!(e, ContractError::PoolInactive),
        _ => unreachable!("Expected PoolInactive error"),
    }

    // Deactivation stops deposits, not emission.
    env.ledger().set_timestamp(T0 + 200);
    assert_eq!(client.claim_rewards(&staker, &pool_id), vec![&env, 2_000i128]);
    client.withdraw(&staker, &pool_id, &1_000);
    assert_eq!(TokenClient::new(&env, &stake_token).balance(&staker), 2_000);
}

#[test]
fn test_pause_blocks_stake_and_claim_but_not_withdraw() {
    let (env, client, admin, stake_token, reward_token) = setup();
    let pool_id = create_pool(
        &env, &client, &admin, &stake_token, &reward_token, 10, T0, T0 + 10_000,
    );
    let staker = funded_staker(&env, &stake_token, 2_000);
    client.stake(&staker, &pool_id, &1_000);

    client.pause(&admin);
    env.ledger().set_timestamp(T0 + 100);

    match client.try_stake(&staker, &pool_id, &500) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Paused),
        _ => unreachable!("Expected Paused error"),
    }
    match client.try_claim_rewards(&staker, &pool_id) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Paused),
        _ => unreachable!("Expected Paused error"),
    }

    client.withdraw(&staker, &pool_id, &400);
    assert_eq!(TokenClient::new(&env, &reward_token).balance(&staker), 1_000);

    client.unpause(&admin);
    client.stake(&staker, &pool_id, &500);
    assert_eq!(client.get_position(&pool_id, &staker).amount, 1_100);
}

// ── Multiple pools ────────────────────────────────────────────────────────────

#[test]
fn test_pools_accrue_independently() {
    let (env, client, admin, stake_token, reward_token) = setup();
    let fast = create_pool(
        &env, &client, &admin, &stake_token, &reward_token, 100, T0, T0 + 10_000,
    );
    let slow = create_pool(
        &env, &client, &admin, &stake_token, &reward_token, 1, T0, T0 + 10_000,
    );

    let alice = funded_staker(&env, &stake_token, 2_000);
    client.stake(&alice, &fast, &1_000);
    client.stake(&alice, &slow, &1_000);
    assert_eq!(client.get_user_pools(&alice), vec![&env, fast, slow]);

    env.ledger().set_timestamp(T0 + 50);
    assert_eq!(client.pending_reward(&fast, &alice, &0), 5_000);
    assert_eq!(client.pending_reward(&slow, &alice, &0), 50);

    client.withdraw(&alice, &fast, &1_000);
    assert_eq!(client.get_pool(&fast).total_staked, 0);
    assert_eq!(client.get_pool(&slow).total_staked, 1_000);

    // Membership survives a full withdrawal and is not duplicated on re-entry.
    client.stake(&alice, &fast, &500);
    assert_eq!(client.get_user_pools(&alice), vec![&env, fast, slow]);
}

#[test]
fn test_staker_info_combines_position_and_pending() {
    let (env, client, admin, stake_token, reward_token) = setup();
    client.set_harvest_cooldown(&admin, &3_600);
    let pool_id = create_pool(
        &env, &client, &admin, &stake_token, &reward_token, 10, T0, T0 + 10_000,
    );
    let staker = funded_staker(&env, &stake_token, 1_000);
    client.stake(&staker, &pool_id, &1_000);

    env.ledger().set_timestamp(T0 + 100);
    client.claim_rewards(&staker, &pool_id);

    env.ledger().set_timestamp(T0 + 160);
    let info = client.get_staker_info(&pool_id, &staker);
    assert_eq!(info.amount, 1_000);
    assert_eq!(info.pending_rewards, vec![&env, 600i128]);
    assert_eq!(info.boost_multiplier, 0);
    assert_eq!(info.next_claim_at, T0 + 100 + 3_600);

    let stranger = Address::generate(&env);
    let empty = client.get_staker_info(&pool_id, &stranger);
    assert_eq!(empty.amount, 0);
    assert_eq!(empty.pending_rewards, vec![&env, 0i128]);
}

// ── Conservation ──────────────────────────────────────────────────────────────

#[test]
fn test_payouts_never_exceed_emission() {
    let (env, client, admin, stake_token, reward_token) = setup();
    let pool_id = create_pool(
        &env, &client, &admin, &stake_token, &reward_token, 7, T0, T0 + 10_000,
    );

    let amounts = [333i128, 1_001, 17, 4_444];
    let mut stakers = std::vec::Vec::new();
    for amount in amounts {
        let staker = funded_staker(&env, &stake_token, amount);
        client.stake(&staker, &pool_id, &amount);
        stakers.push(staker);
    }

    env.ledger().set_timestamp(T0 + 997);
    let total: i128 = stakers
        .iter()
        .map(|s| client.pending_reward(&pool_id, s, &0))
        .sum();

    let emitted = 7 * 997;
    assert!(total <= emitted, "paid {} of {}", total, emitted);
    assert!(
        emitted - total <= stakers.len() as i128,
        "truncation loss {} too large",
        emitted - total
    );
}
