use fully_backed_amm_sdk::{
    derive_ata, ledger::Record, Error, PoolAddresses, PoolLedger, Reserves,
};
use proptest::prelude::*;
use solana_sdk::pubkey::Pubkey;

struct Fixture {
    ledger: PoolLedger,
    admin:  Pubkey,
    alice:  Pubkey,
    bob:    Pubkey,
    pool:   PoolAddresses,
}

fn fixture() -> Fixture {
    let mut ledger = PoolLedger::new();
    let admin = Pubkey::new_unique();
    let alice = Pubkey::new_unique();
    let bob   = Pubkey::new_unique();

    let mint_a = ledger.create_mint(&admin, 6);
    let mint_b = ledger.create_mint(&admin, 6);
    for who in [&alice, &bob] {
        ledger.mint_to(&admin, &mint_a, who, 10_000).unwrap();
        ledger.mint_to(&admin, &mint_b, who, 10_000).unwrap();
    }
    let pool = ledger.initialize_pool(&admin, 1, &mint_a, &mint_b).unwrap();

    Fixture { ledger, admin, alice, bob, pool }
}

fn reserves(f: &Fixture) -> Reserves {
    f.ledger.reserves(&f.pool.pool_config).unwrap()
}

#[test]
fn full_lifecycle() {
    let mut f = fixture();
    let pc = f.pool.pool_config;

    // Bootstrap
    let d = f.ledger.deposit(&f.alice, &pc, 1000, 1000).unwrap();
    assert!(d.bootstrap);
    assert_eq!(d.shares, 1000);
    assert_eq!(reserves(&f), Reserves { reserve_a: 1000, reserve_b: 1000, share_supply: 1000 });

    // Proportional
    let d = f.ledger.deposit(&f.bob, &pc, 100, u64::MAX).unwrap();
    assert!(!d.bootstrap);
    assert_eq!((d.amount_b, d.shares), (100, 100));
    assert_eq!(reserves(&f), Reserves { reserve_a: 1100, reserve_b: 1100, share_supply: 1100 });

    // Swap A → B
    let s = f.ledger.swap(&f.bob, &pc, 10, 0, true).unwrap();
    assert_eq!(s.amount_out, 9);
    assert_eq!(reserves(&f), Reserves { reserve_a: 1110, reserve_b: 1091, share_supply: 1100 });
    assert_eq!(f.ledger.balance(&f.bob, &f.pool.mint_a), 10_000 - 100 - 10);
    assert_eq!(f.ledger.balance(&f.bob, &f.pool.mint_b), 10_000 - 100 + 9);

    // Withdraw
    let w = f.ledger.withdraw(&f.bob, &pc, 100).unwrap();
    assert_eq!((w.amount_a, w.amount_b), (100, 99));
    let w = f.ledger.withdraw(&f.alice, &pc, 110).unwrap();
    assert_eq!((w.amount_a, w.amount_b), (111, 109));
}

#[test]
fn withdraw_matches_worked_example() {
    let mut f = fixture();
    let pc = f.pool.pool_config;
    f.ledger.deposit(&f.alice, &pc, 1000, 1000).unwrap();
    f.ledger.deposit(&f.alice, &pc, 100, 100).unwrap();
    f.ledger.swap(&f.bob, &pc, 10, 9, true).unwrap();

    let w = f.ledger.withdraw(&f.alice, &pc, 110).unwrap();
    assert_eq!((w.amount_a, w.amount_b), (111, 109));
    assert_eq!(reserves(&f), Reserves { reserve_a: 999, reserve_b: 982, share_supply: 990 });
    assert_eq!(f.ledger.shares_of(&f.alice, &pc).unwrap(), 990);
}

#[test]
fn seed_cannot_be_reused() {
    let mut f = fixture();
    let err = f
        .ledger
        .initialize_pool(&f.admin, 1, &f.pool.mint_a, &f.pool.mint_b)
        .unwrap_err();
    assert_eq!(err, Error::DuplicateSeed);

    // Same seed, different pair: still the same PoolConfig address.
    let other = f.ledger.create_mint(&f.admin, 6);
    let err = f.ledger.initialize_pool(&f.bob, 1, &f.pool.mint_a, &other).unwrap_err();
    assert_eq!(err, Error::DuplicateSeed);
}

#[test]
fn identical_assets_are_rejected() {
    let mut f = fixture();
    let err = f
        .ledger
        .initialize_pool(&f.admin, 2, &f.pool.mint_a, &f.pool.mint_a)
        .unwrap_err();
    assert_eq!(err, Error::InvalidAssetPair);
}

#[test]
fn new_pool_starts_empty() {
    let f = fixture();
    assert_eq!(reserves(&f), Reserves::default());
    let cfg = f.ledger.pool(&f.pool.pool_config).unwrap();
    assert_eq!(cfg.admin, f.admin);
    assert_eq!(cfg.vault_a, derive_ata(&f.pool.pool_config, &f.pool.mint_a));
}

#[test]
fn vaults_only_move_under_pool_authority() {
    let mut f = fixture();
    let pc = f.pool.pool_config;
    f.ledger.deposit(&f.alice, &pc, 1000, 1000).unwrap();

    let bob_a = derive_ata(&f.bob, &f.pool.mint_a);
    for signer in [f.admin, f.bob, pc] {
        assert_eq!(
            f.ledger.transfer(&signer, &f.pool.vault_a, &bob_a, 1),
            Err(Error::Unauthorized)
        );
    }
    // Nor can anyone print shares under the pool's name.
    assert_eq!(
        f.ledger.mint_to(&pc, &f.pool.share_mint, &f.bob, 1),
        Err(Error::Unauthorized)
    );
    // Or push tokens into a vault from outside a deposit.
    let alice_a = derive_ata(&f.alice, &f.pool.mint_a);
    assert_eq!(
        f.ledger.transfer(&f.alice, &alice_a, &f.pool.vault_a, 500),
        Err(Error::Unauthorized)
    );
    assert_eq!(reserves(&f), Reserves { reserve_a: 1000, reserve_b: 1000, share_supply: 1000 });
    assert_eq!(f.ledger.balance(&f.alice, &f.pool.mint_a), 9_000);
}

#[test]
fn pool_address_cannot_act_as_user() {
    let mut f = fixture();
    let pc = f.pool.pool_config;
    f.ledger.deposit(&f.alice, &pc, 1000, 1000).unwrap();

    assert_eq!(f.ledger.deposit(&pc, &pc, 100, u64::MAX).unwrap_err(), Error::Unauthorized);
    assert_eq!(f.ledger.swap(&pc, &pc, 10, 0, true).unwrap_err(), Error::Unauthorized);
    assert_eq!(f.ledger.withdraw(&pc, &pc, 1).unwrap_err(), Error::Unauthorized);
    assert_eq!(
        f.ledger.initialize_pool(&pc, 7, &f.pool.mint_a, &f.pool.mint_b).unwrap_err(),
        Error::Unauthorized
    );

    assert_eq!(reserves(&f), Reserves { reserve_a: 1000, reserve_b: 1000, share_supply: 1000 });
    assert_eq!(f.ledger.shares_of(&pc, &pc).unwrap(), 0);
}

#[test]
fn overflow_leaves_ledger_untouched() {
    let mut ledger = PoolLedger::new();
    let admin = Pubkey::new_unique();
    let alice = Pubkey::new_unique();
    let mint_a = ledger.create_mint(&admin, 6);
    let mint_b = ledger.create_mint(&admin, 6);
    ledger.mint_to(&admin, &mint_a, &alice, 10).unwrap();
    ledger.mint_to(&admin, &mint_b, &alice, u64::MAX).unwrap();
    let pc = ledger.initialize_pool(&admin, 1, &mint_a, &mint_b).unwrap().pool_config;

    ledger.deposit(&alice, &pc, 1, u64::MAX).unwrap();
    let full = Reserves { reserve_a: 1, reserve_b: u64::MAX, share_supply: 1 };
    assert_eq!(ledger.reserves(&pc).unwrap(), full);

    // Matching B for 2 units of A is 2 * u64::MAX.
    assert_eq!(ledger.deposit(&alice, &pc, 2, u64::MAX).unwrap_err(), Error::ArithmeticOverflow);
    // reserve_in + amount_in no longer fits.
    assert_eq!(ledger.swap(&alice, &pc, u64::MAX, 0, true).unwrap_err(), Error::ArithmeticOverflow);
    assert_eq!(ledger.swap(&alice, &pc, 1, 0, false).unwrap_err(), Error::ArithmeticOverflow);

    assert_eq!(ledger.reserves(&pc).unwrap(), full);
    assert_eq!(ledger.balance(&alice, &mint_a), 9);
    assert_eq!(ledger.balance(&alice, &mint_b), 0);
    assert_eq!(ledger.shares_of(&alice, &pc).unwrap(), 1);
}

#[test]
fn cannot_spend_someone_elses_tokens() {
    let mut f = fixture();
    let alice_a = derive_ata(&f.alice, &f.pool.mint_a);
    let bob_a   = derive_ata(&f.bob, &f.pool.mint_a);
    assert_eq!(f.ledger.transfer(&f.bob, &alice_a, &bob_a, 5), Err(Error::Unauthorized));
    assert_eq!(f.ledger.balance(&f.alice, &f.pool.mint_a), 10_000);
}

#[test]
fn withdraw_needs_shares() {
    let mut f = fixture();
    let pc = f.pool.pool_config;
    f.ledger.deposit(&f.alice, &pc, 1000, 1000).unwrap();

    assert_eq!(f.ledger.withdraw(&f.bob, &pc, 1), Err(Error::InsufficientShares));
    assert_eq!(f.ledger.withdraw(&f.alice, &pc, 1001), Err(Error::InsufficientShares));
    assert_eq!(f.ledger.withdraw(&f.alice, &pc, 0), Err(Error::ZeroAmount));
}

#[test]
fn withdraw_beyond_own_holding_burns_nothing() {
    let mut f = fixture();
    let pc = f.pool.pool_config;
    f.ledger.deposit(&f.alice, &pc, 1000, 1000).unwrap();
    f.ledger.deposit(&f.bob, &pc, 100, u64::MAX).unwrap();

    // Within total supply, above what bob holds.
    assert_eq!(f.ledger.withdraw(&f.bob, &pc, 200), Err(Error::InsufficientShares));
    assert_eq!(f.ledger.shares_of(&f.bob, &pc).unwrap(), 100);
    assert_eq!(reserves(&f), Reserves { reserve_a: 1100, reserve_b: 1100, share_supply: 1100 });
}

#[test]
fn dust_swap_fails() {
    let mut f = fixture();
    let pc = f.pool.pool_config;
    f.ledger.mint_to(&f.admin, &f.pool.mint_a, &f.alice, 1_000_000).unwrap();
    f.ledger.deposit(&f.alice, &pc, 1_000_000, 1000).unwrap();

    assert_eq!(f.ledger.swap(&f.bob, &pc, 1, 0, true), Err(Error::InsufficientLiquidity));
}

#[test]
fn swap_against_empty_pool_fails() {
    let mut f = fixture();
    let pc = f.pool.pool_config;
    assert_eq!(f.ledger.swap(&f.bob, &pc, 10, 0, false), Err(Error::InsufficientLiquidity));
    assert_eq!(f.ledger.swap(&f.bob, &pc, 0, 0, false), Err(Error::ZeroAmount));
}

#[test]
fn failed_operations_leave_ledger_untouched() {
    let mut f = fixture();
    let pc = f.pool.pool_config;
    f.ledger.deposit(&f.alice, &pc, 1000, 1000).unwrap();
    let before = f.ledger.clone();

    // A leg passes, then B is short: nothing may stick.
    let poor = Pubkey::new_unique();
    f.ledger.mint_to(&f.admin, &f.pool.mint_a, &poor, 500).unwrap();
    f.ledger.mint_to(&f.admin, &f.pool.mint_b, &poor, 10).unwrap();
    let snapshot = f.ledger.clone();
    assert_eq!(f.ledger.deposit(&poor, &pc, 500, u64::MAX), Err(Error::InsufficientBalance));
    assert_eq!(f.ledger.balance(&poor, &f.pool.mint_a), 500);
    assert_eq!(reserves(&f), reserves_of(&snapshot, &pc));
    assert!(f.ledger.record(&derive_ata(&poor, &f.pool.share_mint)).is_none());

    // Slippage on swap.
    assert!(matches!(
        f.ledger.swap(&f.bob, &pc, 10, 10, true),
        Err(Error::SlippageExceeded { quoted: 9, limit: 10 })
    ));
    assert_eq!(reserves(&f), reserves_of(&before, &pc));
    assert_eq!(f.ledger.balance(&f.bob, &f.pool.mint_a), 10_000);
}

fn reserves_of(ledger: &PoolLedger, pc: &Pubkey) -> Reserves {
    ledger.reserves(pc).unwrap()
}

#[test]
fn pools_are_isolated() {
    let mut f = fixture();
    let second = f
        .ledger
        .initialize_pool(&f.admin, 2, &f.pool.mint_a, &f.pool.mint_b)
        .unwrap();
    assert_ne!(second.vault_a, f.pool.vault_a);

    f.ledger.deposit(&f.alice, &f.pool.pool_config, 1000, 1000).unwrap();
    f.ledger.deposit(&f.bob, &second.pool_config, 50, 200).unwrap();
    f.ledger.swap(&f.bob, &f.pool.pool_config, 100, 0, false).unwrap();

    assert_eq!(
        reserves_of(&f.ledger, &second.pool_config),
        Reserves { reserve_a: 50, reserve_b: 200, share_supply: 50 }
    );
    match f.ledger.record(&second.share_mint) {
        Some(Record::Mint(m)) => assert_eq!(m.authority, second.pool_config),
        other => panic!("unexpected share mint record: {other:?}"),
    }
}

#[derive(Debug, Clone)]
enum Op {
    Deposit { who: usize, amount_a: u64 },
    Swap { who: usize, amount_in: u64, a_to_b: bool },
    Withdraw { who: usize, per_mille: u64 },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..3, 1u64..5_000).prop_map(|(who, amount_a)| Op::Deposit { who, amount_a }),
        (0usize..3, 1u64..5_000, any::<bool>())
            .prop_map(|(who, amount_in, a_to_b)| Op::Swap { who, amount_in, a_to_b }),
        (0usize..3, 1u64..=1000).prop_map(|(who, per_mille)| Op::Withdraw { who, per_mille }),
    ]
}

proptest! {
    #[test]
    fn random_sequences_stay_fully_backed(ops in prop::collection::vec(op(), 1..40)) {
        let mut ledger = PoolLedger::new();
        let admin = Pubkey::new_unique();
        let users: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        let mint_a = ledger.create_mint(&admin, 6);
        let mint_b = ledger.create_mint(&admin, 6);
        for u in &users {
            ledger.mint_to(&admin, &mint_a, u, 1_000_000).unwrap();
            ledger.mint_to(&admin, &mint_b, u, 1_000_000).unwrap();
        }
        let pool = ledger.initialize_pool(&admin, 9, &mint_a, &mint_b).unwrap();
        let pc = pool.pool_config;
        ledger.deposit(&users[0], &pc, 10_000, 10_000).unwrap();

        let total = |l: &PoolLedger, m: &Pubkey| -> u64 {
            users.iter().map(|u| l.balance(u, m)).sum::<u64>()
        };
        let supply_a = total(&ledger, &mint_a) + ledger.reserves(&pc).unwrap().reserve_a;

        for op in ops {
            let before = ledger.reserves(&pc).unwrap();
            let result = match op {
                Op::Deposit { who, amount_a } => {
                    ledger.deposit(&users[who], &pc, amount_a, u64::MAX).map(|_| ())
                }
                Op::Swap { who, amount_in, a_to_b } => {
                    ledger.swap(&users[who], &pc, amount_in, 0, a_to_b).map(|_| ())
                }
                Op::Withdraw { who, per_mille } => {
                    let held = ledger.shares_of(&users[who], &pc).unwrap();
                    let shares = held * per_mille / 1000;
                    ledger.withdraw(&users[who], &pc, shares).map(|_| ())
                }
            };
            let after = ledger.reserves(&pc).unwrap();

            if result.is_err() {
                prop_assert_eq!(before, after);
                continue;
            }
            if let Op::Swap { .. } = op {
                let k0 = before.reserve_a as u128 * before.reserve_b as u128;
                let k1 = after.reserve_a as u128 * after.reserve_b as u128;
                prop_assert!(k1 >= k0);
                prop_assert_eq!(before.share_supply, after.share_supply);
            }

            // Deposits and withdrawals hold reserve_a / reserve_b to within
            // one rounding unit: cross-multiplied drift stays below a reserve.
            let drift = after.reserve_a as i128 * before.reserve_b as i128
                - after.reserve_b as i128 * before.reserve_a as i128;
            match op {
                Op::Deposit { .. } if before.share_supply > 0 => {
                    prop_assert!(drift >= 0 && drift < before.reserve_a as i128);
                }
                Op::Withdraw { .. } => {
                    prop_assert!(drift > -(before.reserve_a as i128));
                    prop_assert!(drift < before.reserve_b as i128);
                }
                _ => {}
            }

            // Shares outstanding always match what holders own.
            let held: u64 = users.iter().map(|u| ledger.shares_of(u, &pc).unwrap()).sum();
            prop_assert_eq!(held, after.share_supply);

            // Redeeming everything never asks for more than the vaults hold.
            let mut owed_a = 0u128;
            let mut owed_b = 0u128;
            if after.share_supply > 0 {
                for u in &users {
                    let s = ledger.shares_of(u, &pc).unwrap() as u128;
                    owed_a += s * after.reserve_a as u128 / after.share_supply as u128;
                    owed_b += s * after.reserve_b as u128 / after.share_supply as u128;
                }
            }
            prop_assert!(owed_a <= after.reserve_a as u128);
            prop_assert!(owed_b <= after.reserve_b as u128);

            // Tokens are never created or destroyed by pool operations.
            prop_assert_eq!(total(&ledger, &mint_a) + after.reserve_a, supply_a);
        }
    }
}
