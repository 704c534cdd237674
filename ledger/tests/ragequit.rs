mod common;

use common::*;
use ledger::Error;

#[test]
fn test_ragequit_returns_full_value_and_keeps_root() {
    let mut rng = rand::thread_rng();
    let mut pool = native_pool();
    let alice = addr(1);
    fund(&mut pool, alice, 100);

    let witness = deposit(&mut pool, alice, 100, 0, &mut rng);
    let root_before = pool.current_root();
    let leaves_before = pool.tree().leaf_count();

    pool.ragequit(alice, &StaticVerifier(true), &ragequit_request(&witness))
        .expect("ragequit");

    // ragequit only mutates the nullifier set and balances; the
    // original leaf stays where the deposit put it
    assert_eq!(pool.current_root(), root_before);
    assert_eq!(pool.tree().leaf_count(), leaves_before);
    assert!(pool.nullifiers().is_spent(&witness.nullifier_hash()));
    assert_eq!(pool.vault().balance_of(&alice), 100);
    assert_eq!(pool.fees().net_deposits(), 0);
    assert!(pool.books_balance());
}

#[test]
fn test_ragequit_requires_label_owner() {
    let mut rng = rand::thread_rng();
    let mut pool = native_pool();
    let (alice, mallory) = (addr(1), addr(3));
    fund(&mut pool, alice, 100);

    let witness = deposit(&mut pool, alice, 100, 0, &mut rng);
    let snapshot = pool.clone();

    assert_eq!(
        pool.ragequit(mallory, &StaticVerifier(true), &ragequit_request(&witness)),
        Err(Error::LabelOwnerMismatch)
    );
    assert_eq!(pool, snapshot);

    // an unregistered label rejects the same way
    let stranger =
        pool::CommitmentWitness::random(50, pool::Label::mint(pool.scope(), 999), &mut rng);
    assert_eq!(
        pool.ragequit(alice, &StaticVerifier(true), &ragequit_request(&stranger)),
        Err(Error::LabelOwnerMismatch)
    );
    assert_eq!(pool, snapshot);
}

#[test]
fn test_ragequit_rejections_leave_no_trace() {
    let mut rng = rand::thread_rng();
    let mut pool = native_pool();
    let alice = addr(1);
    fund(&mut pool, alice, 100);

    let witness = deposit(&mut pool, alice, 100, 0, &mut rng);
    let snapshot = pool.clone();

    assert_eq!(
        pool.ragequit(alice, &StaticVerifier(false), &ragequit_request(&witness)),
        Err(Error::ProofInvalid)
    );
    assert_eq!(pool, snapshot);

    // a second ragequit after a successful one hits the spent nullifier
    pool.ragequit(alice, &StaticVerifier(true), &ragequit_request(&witness))
        .expect("first ragequit");
    assert_eq!(
        pool.ragequit(alice, &StaticVerifier(true), &ragequit_request(&witness)),
        Err(Error::NullifierAlreadySpent)
    );
}

#[test]
fn test_ragequit_survives_wind_down() {
    let mut rng = rand::thread_rng();
    let mut pool = native_pool();
    let alice = addr(1);
    fund(&mut pool, alice, 100);

    let witness = deposit(&mut pool, alice, 100, 0, &mut rng);
    pool.wind_down(OPERATOR).expect("wind down");

    pool.ragequit(alice, &StaticVerifier(true), &ragequit_request(&witness))
        .expect("ragequit while winding down");
    assert_eq!(pool.vault().balance_of(&alice), 100);
    assert!(pool.books_balance());
}
