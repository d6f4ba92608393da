//! End-to-end behaviour of the revenue token through its public API.

use revshare_nullables::{NullClock, NullStore};
use revshare_revenue::{RevenueError, RevenueToken, TokenEvent};
use revshare_types::{AccountId, Clock, TokenParams};

const SUPPLY: u128 = 1_000_000_000;
const ETHER: u128 = 1_000_000_000_000_000_000;
const INTERVAL: u64 = 90 * 24 * 3600;

fn acct(name: &str) -> AccountId {
    AccountId::new(name).unwrap()
}

fn holder() -> AccountId {
    acct("holder")
}

fn setup() -> (RevenueToken, NullClock) {
    let clock = NullClock::new(1_700_000_000);
    let params = TokenParams {
        name: "Revenue Share".into(),
        symbol: "RVS".into(),
        initial_supply: SUPPLY,
        percent_claimable: 80,
        min_snapshot_interval_secs: INTERVAL,
    };
    let token = RevenueToken::new(params, &holder(), clock.now()).unwrap();
    (token, clock)
}

fn next_snapshot(token: &mut RevenueToken, clock: &NullClock) -> u64 {
    clock.advance(INTERVAL);
    token.snapshot(clock.now()).unwrap()
}

#[test]
fn scenario_a_single_deposit_is_claimable() {
    let (mut token, clock) = setup();
    token.deposit(1_000).unwrap();
    next_snapshot(&mut token, &clock);
    assert_eq!(token.claimable_revenue(&holder(), 1).unwrap(), 800);
}

#[test]
fn scenario_b_second_claim_fails() {
    let (mut token, clock) = setup();
    token.deposit(1_000).unwrap();
    next_snapshot(&mut token, &clock);

    assert_eq!(token.claim(&holder(), 1).unwrap(), 800);
    let err = token.claim(&holder(), 1).unwrap_err();
    assert!(matches!(err, RevenueError::AlreadyClaimed { id: 1, .. }));
}

#[test]
fn scenario_c_revenue_is_delta_based() {
    let (mut token, clock) = setup();
    token.deposit(1_000).unwrap();
    next_snapshot(&mut token, &clock);
    token.deposit(2_000).unwrap();
    next_snapshot(&mut token, &clock);

    assert_eq!(token.claimable_revenue(&holder(), 1).unwrap(), 800);
    assert_eq!(token.claimable_revenue(&holder(), 2).unwrap(), 1_600);
}

#[test]
fn scenario_d_two_slot_rollover() {
    let (mut token, clock) = setup();
    for deposit in [100, 200, 300, 400] {
        token.deposit(deposit).unwrap();
        next_snapshot(&mut token, &clock);
    }

    for stale in [1, 2] {
        assert!(matches!(
            token.claimable_revenue(&holder(), stale),
            Err(RevenueError::SnapshotUnclaimable { current: 4, .. })
        ));
    }
    assert_eq!(token.claimable_revenue(&holder(), 3).unwrap(), 320);
    assert_eq!(token.claimable_revenue(&holder(), 4).unwrap(), 480);
}

#[test]
fn scenario_e_burn_without_deposits() {
    let (mut token, _clock) = setup();
    for amount in [0, 1, 10_000, SUPPLY] {
        assert_eq!(token.redeemable_on_burn(amount).unwrap(), 0);
    }

    assert_eq!(token.burn(&holder(), 10_000).unwrap(), 0);
    assert_eq!(token.total_units(), SUPPLY - 10_000);
    assert_eq!(token.balance_of(&holder()), SUPPLY - 10_000);
    assert_eq!(token.vault(), 0);
}

#[test]
fn scenario_f_burn_resets_vault() {
    let (mut token, _clock) = setup();
    token.deposit(200).unwrap();
    let redeemed = token.burn(&holder(), 10_000).unwrap();
    assert_eq!(redeemed, 200 * 10_000 * 20 / SUPPLY / 100);
    assert_eq!(token.vault(), 0);

    token.deposit(100).unwrap();
    assert_eq!(
        token.redeemable_on_burn(10_000).unwrap(),
        100 * 10_000 * 20 / (SUPPLY - 10_000) / 100
    );
}

#[test]
fn scenario_f_at_asset_scale() {
    let (mut token, _clock) = setup();
    token.deposit(200 * ETHER).unwrap();
    let redeemed = token.burn(&holder(), 10_000).unwrap();
    assert_eq!(redeemed, 200 * ETHER * 10_000 * 20 / SUPPLY / 100);
    assert_eq!(token.custodied_balance(), 200 * ETHER - redeemed);

    token.deposit(100 * ETHER).unwrap();
    let expected = 100 * ETHER * 10_000 * 20 / (SUPPLY - 10_000) / 100;
    assert_eq!(token.redeemable_on_burn(10_000).unwrap(), expected);
    assert_eq!(token.burn(&holder(), 10_000).unwrap(), expected);
}

#[test]
fn failed_claims_mutate_nothing() {
    let (mut token, clock) = setup();
    for deposit in [1_000, 1_000, 1_000] {
        token.deposit(deposit).unwrap();
        next_snapshot(&mut token, &clock);
    }
    token.claim(&holder(), 3).unwrap();

    let custody = token.custodied_balance();
    let vault = token.vault();
    let pools = (*token.pool(0).unwrap(), *token.pool(1).unwrap());
    let balance = token.balance_of(&holder());
    token.drain_events();

    assert!(matches!(
        token.claim(&holder(), 3),
        Err(RevenueError::AlreadyClaimed { .. })
    ));
    assert!(matches!(
        token.claim(&holder(), 1),
        Err(RevenueError::SnapshotUnclaimable { .. })
    ));

    assert_eq!(token.custodied_balance(), custody);
    assert_eq!(token.vault(), vault);
    assert_eq!((*token.pool(0).unwrap(), *token.pool(1).unwrap()), pools);
    assert_eq!(token.balance_of(&holder()), balance);
    assert!(token.drain_events().is_empty());
}

#[test]
fn snapshot_ids_increase_by_one() {
    let (mut token, clock) = setup();
    let mut last = token.current_snapshot_id();
    for _ in 0..5 {
        // Too early: nothing changes.
        assert!(token.snapshot(clock.now()).is_err());
        assert_eq!(token.current_snapshot_id(), last);

        let id = next_snapshot(&mut token, &clock);
        assert_eq!(id, last + 1);
        last = id;
    }
}

#[test]
fn claimable_revenue_is_side_effect_free() {
    let (mut token, clock) = setup();
    token.deposit(1_000).unwrap();
    next_snapshot(&mut token, &clock);
    let first = token.claimable_revenue(&holder(), 1).unwrap();
    let second = token.claimable_revenue(&holder(), 1).unwrap();
    assert_eq!(first, second);
    assert!(!token.is_claimed(&holder(), 1));
}

#[test]
fn claim_batch_is_all_or_nothing() {
    let (mut token, clock) = setup();
    token.deposit(1_000).unwrap();
    next_snapshot(&mut token, &clock);
    token.deposit(1_000).unwrap();
    next_snapshot(&mut token, &clock);
    token.drain_events();

    let err = token.claim_batch(&holder(), &[2, 5]).unwrap_err();
    assert!(matches!(err, RevenueError::InvalidSnapshot { id: 5, .. }));
    assert!(!token.is_claimed(&holder(), 2));
    assert_eq!(token.custodied_balance(), 2_000);

    assert_eq!(token.claim_batch(&holder(), &[2, 1]).unwrap(), 1_600);
    assert_eq!(token.custodied_balance(), 400);
    assert_eq!(
        token.drain_events(),
        vec![
            TokenEvent::ClaimSettled {
                account: holder(),
                snapshot_id: 2,
                amount: 800,
            },
            TokenEvent::ClaimSettled {
                account: holder(),
                snapshot_id: 1,
                amount: 800,
            },
        ]
    );
}

#[test]
fn holders_share_pro_rata_at_snapshot_time() {
    let (mut token, clock) = setup();
    let (bob, carol) = (acct("bob"), acct("carol"));
    token.transfer(&holder(), &bob, SUPPLY / 4).unwrap();
    token.deposit(1_000).unwrap();
    next_snapshot(&mut token, &clock);

    // Moving units after the snapshot does not move the claim.
    token.transfer(&bob, &carol, SUPPLY / 4).unwrap();

    assert_eq!(token.claimable_revenue(&holder(), 1).unwrap(), 600);
    assert_eq!(token.claimable_revenue(&bob, 1).unwrap(), 200);
    assert_eq!(token.claimable_revenue(&carol, 1).unwrap(), 0);
    assert_eq!(token.balance_at_snapshot(&bob, 1).unwrap(), SUPPLY / 4);
    assert_eq!(token.balance_of(&bob), 0);
    assert_eq!(token.sum_of_balances(), token.total_units());
}

#[test]
fn claims_and_burns_interleave() {
    let (mut token, clock) = setup();
    token.deposit(1_000 * ETHER).unwrap();
    next_snapshot(&mut token, &clock);
    assert_eq!(token.claim(&holder(), 1).unwrap(), 800 * ETHER);
    // Claims do not feed or drain the vault.
    assert_eq!(token.vault(), 1_000 * ETHER);

    let redeemed = token.burn(&holder(), SUPPLY / 10).unwrap();
    assert_eq!(redeemed, 20 * ETHER);
    assert_eq!(token.custodied_balance(), 180 * ETHER);
    assert_eq!(token.vault(), 0);

    token.deposit(500 * ETHER).unwrap();
    next_snapshot(&mut token, &clock);
    // Only the fresh 500 counts as period inflow.
    assert_eq!(token.claimable_revenue(&holder(), 2).unwrap(), 400 * ETHER);
    assert_eq!(token.total_units_at_snapshot(2).unwrap(), SUPPLY - SUPPLY / 10);
    assert_eq!(
        token.redeemable_on_burn(token.total_units()).unwrap(),
        100 * ETHER
    );
}

#[test]
fn events_follow_operation_order() {
    let (mut token, clock) = setup();
    token.drain_events();
    token.deposit(1_000).unwrap();
    clock.advance(INTERVAL);
    token.snapshot(clock.now()).unwrap();
    token.claim(&holder(), 1).unwrap();

    assert_eq!(
        token.drain_events(),
        vec![
            TokenEvent::Deposit { amount: 1_000 },
            TokenEvent::SnapshotTaken {
                id: 1,
                timestamp: clock.now(),
                period_revenue: 800,
            },
            TokenEvent::ClaimSettled {
                account: holder(),
                snapshot_id: 1,
                amount: 800,
            },
        ]
    );
}

#[test]
fn restored_token_continues() {
    let store = NullStore::new();
    let (mut token, clock) = setup();
    token.transfer(&holder(), &acct("bob"), 1_000).unwrap();
    token.deposit(1_000).unwrap();
    next_snapshot(&mut token, &clock);
    token.claim(&holder(), 1).unwrap();
    token.save_to_store(&store).unwrap();

    let mut restored = RevenueToken::load_from_store(&store).unwrap();
    assert!(matches!(
        restored.claim(&holder(), 1),
        Err(RevenueError::AlreadyClaimed { .. })
    ));
    assert_eq!(
        restored.claimable_revenue(&acct("bob"), 1).unwrap(),
        token.claimable_revenue(&acct("bob"), 1).unwrap()
    );

    restored.deposit(500).unwrap();
    clock.advance(INTERVAL);
    assert_eq!(restored.snapshot(clock.now()).unwrap(), 2);
    assert_eq!(restored.last_snapshot_timestamp(), clock.now());
}

#[test]
fn claim_beyond_custody_is_refused_without_mutation() {
    let (mut token, clock) = setup();
    let bob = acct("bob");
    token.deposit(1_000).unwrap();
    next_snapshot(&mut token, &clock);
    assert_eq!(token.claim(&holder(), 1).unwrap(), 800);

    // Units move between two snapshots of the same parity: bob's share of
    // slot 1 is priced against a pool the holder already drained.
    token.transfer(&holder(), &bob, SUPPLY).unwrap();
    next_snapshot(&mut token, &clock);
    next_snapshot(&mut token, &clock);

    assert_eq!(token.claimable_revenue(&bob, 3).unwrap(), 800);
    assert_eq!(token.custodied_balance(), 200);

    let pools = (token.pool(0).copied(), token.pool(1).copied());
    token.drain_events();
    let err = token.claim(&bob, 3).unwrap_err();
    assert!(matches!(
        err,
        RevenueError::InsufficientCustody {
            needed: 800,
            available: 200
        }
    ));

    assert_eq!(token.custodied_balance(), 200);
    assert_eq!((token.pool(0).copied(), token.pool(1).copied()), pools);
    assert!(!token.is_claimed(&bob, 3));
    assert_eq!(token.claimable_revenue(&bob, 3).unwrap(), 800);
    assert!(token.drain_events().is_empty());

    // Fresh inflow makes the claim payable.
    token.deposit(600).unwrap();
    assert_eq!(token.claim(&bob, 3).unwrap(), 800);
    assert_eq!(token.custodied_balance(), 0);
}

#[test]
fn claimed_flag_only_covers_the_claim_window() {
    let (mut token, clock) = setup();
    token.deposit(1_000).unwrap();
    next_snapshot(&mut token, &clock);
    token.claim(&holder(), 1).unwrap();
    next_snapshot(&mut token, &clock);
    next_snapshot(&mut token, &clock);
    token.claim(&holder(), 3).unwrap();

    // Slot 1 now records snapshot 3; snapshot 1 is out of the window anyway.
    assert!(token.is_claimed(&holder(), 3));
    assert!(!token.is_claimed(&holder(), 1));
    assert!(matches!(
        token.claim(&holder(), 1),
        Err(RevenueError::SnapshotUnclaimable { id: 1, current: 3 })
    ));
}
