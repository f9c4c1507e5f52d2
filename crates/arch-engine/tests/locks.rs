use std::time::Duration;

use arch_engine::locks::PatientLocks;
use uuid::Uuid;

#[tokio::test]
async fn second_acquire_waits_for_release() {
    let locks = PatientLocks::new();
    let patient = Uuid::new_v4();

    let first = locks.acquire(patient).await;
    let blocked = tokio::time::timeout(Duration::from_millis(20), locks.acquire(patient)).await;
    assert!(blocked.is_err());

    drop(first);
    let second = tokio::time::timeout(Duration::from_millis(20), locks.acquire(patient)).await;
    assert!(second.is_ok());
}

#[tokio::test]
async fn distinct_patients_do_not_contend() {
    let locks = PatientLocks::new();
    let _a = locks.acquire(Uuid::new_v4()).await;
    let b = tokio::time::timeout(Duration::from_millis(20), locks.acquire(Uuid::new_v4())).await;
    assert!(b.is_ok());
    assert_eq!(locks.tracked(), 2);
}

#[tokio::test]
async fn idle_entries_are_pruned() {
    let locks = PatientLocks::new();
    {
        let _guard = locks.acquire(Uuid::new_v4()).await;
        assert_eq!(locks.tracked(), 1);
    }
    assert_eq!(locks.tracked(), 0);
}
