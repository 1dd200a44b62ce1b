use medizap_client::badge::BadgePoller;
use medizap_client::model::{BadgeCount, CartLine, Medicine};
use medizap_client::remote::mock::MockStore;
use medizap_client::remote::StoreError;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

fn lines(quantities: &[u32]) -> Vec<CartLine> {
    let aspirin = Medicine::new(1, "Aspirin", Decimal::new(500, 2), 50);
    quantities
        .iter()
        .enumerate()
        .map(|(i, q)| CartLine::new(i as u32 + 1, aspirin.clone(), *q))
        .collect()
}

/// A failed poll drops the badge to 0; the next good poll restores it.
#[tokio::test(start_paused = true)]
async fn test_badge_resets_on_failure_and_recovers() {
    let mut mock = MockStore::new();
    mock.expect_list_cart_items().return_ok(lines(&[2, 3]));
    mock.expect_list_cart_items()
        .return_err(StoreError::Network("connection refused".into()));
    mock.expect_list_cart_items().return_ok(lines(&[4]));

    let poller = BadgePoller::start(Arc::new(mock.store()), Duration::from_secs(2));
    let mut badge = poller.subscribe();

    badge.changed().await.unwrap();
    assert_eq!(*badge.borrow_and_update(), BadgeCount(5));

    badge.changed().await.unwrap();
    assert_eq!(*badge.borrow_and_update(), BadgeCount(0));

    badge.changed().await.unwrap();
    assert_eq!(*badge.borrow_and_update(), BadgeCount(4));
    assert_eq!(poller.count(), BadgeCount(4));

    poller.shutdown().await.unwrap();
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn test_polls_follow_interval() {
    let mut mock = MockStore::new();
    mock.expect_list_cart_items().return_ok(lines(&[1]));
    mock.expect_list_cart_items().return_ok(lines(&[1, 1]));

    let start = tokio::time::Instant::now();
    let poller = BadgePoller::start(Arc::new(mock.store()), Duration::from_secs(2));
    let mut badge = poller.subscribe();

    badge.changed().await.unwrap();
    assert_eq!(start.elapsed(), Duration::ZERO);

    badge.changed().await.unwrap();
    let elapsed = start.elapsed();
    assert!(
        elapsed >= Duration::from_secs(2) && elapsed < Duration::from_millis(2010),
        "{elapsed:?}"
    );
    assert_eq!(poller.count(), BadgeCount(2));

    poller.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_stopped_poller_publishes_nothing() {
    let mut mock = MockStore::new();
    mock.expect_list_cart_items().return_ok(lines(&[3]));

    let mut poller = BadgePoller::start(Arc::new(mock.store()), Duration::from_secs(2));
    let mut badge = poller.subscribe();
    badge.changed().await.unwrap();

    poller.stop();
    assert!(!poller.is_running());
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert!(!badge.has_changed().unwrap());
    assert_eq!(poller.count(), BadgeCount(3));
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn test_restart_polls_immediately() {
    let mut mock = MockStore::new();
    mock.expect_list_cart_items().return_ok(lines(&[1]));
    mock.expect_list_cart_items().return_ok(lines(&[6]));

    let mut poller = BadgePoller::start(Arc::new(mock.store()), Duration::from_secs(60));
    let mut badge = poller.subscribe();
    badge.changed().await.unwrap();

    let restarted_at = tokio::time::Instant::now();
    poller.restart();
    badge.changed().await.unwrap();

    assert_eq!(restarted_at.elapsed(), Duration::ZERO);
    assert_eq!(*badge.borrow(), BadgeCount(6));
    assert!(poller.is_running());

    poller.shutdown().await.unwrap();
    mock.verify();
}
