use medizap_client::cart_actor::{self, CartStatus, CLEAR_PROMPT};
use medizap_client::clients::{CartClient, ViewModelClient};
use medizap_client::model::{CartLine, CartLineId, Medicine};
use medizap_client::notice::NoticeKind;
use medizap_client::outcome::{ClearOutcome, MutationOutcome, RefreshOutcome};
use medizap_client::remote::mock::{
    create_mock_store, expect_clear_cart, expect_list_cart_items, expect_remove_cart_item,
    expect_update_cart_item, MockStore,
};
use medizap_client::remote::StoreRequest;
use tokio::sync::mpsc;
use medizap_client::remote::{StoreApi, StoreError};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn aspirin() -> Medicine {
    Medicine::new(1, "Aspirin", Decimal::new(500, 2), 3)
}

fn paracetamol() -> Medicine {
    Medicine::new(2, "Paracetamol", Decimal::new(250, 2), 10)
}

fn start_cart(api: impl StoreApi) -> CartClient {
    let (actor, client) = cart_actor::new(Arc::new(api), Duration::from_secs(5));
    tokio::spawn(actor.run());
    client
}

fn server_error() -> StoreError {
    StoreError::Remote {
        status: 500,
        message: "Internal Server Error".into(),
    }
}

#[tokio::test]
async fn test_load_derives_totals() {
    let mut mock = MockStore::new();
    mock.expect_list_cart_items().return_ok(vec![
        CartLine::new(1, aspirin(), 2),
        CartLine::new(2, paracetamol(), 3),
    ]);
    let cart = start_cart(mock.store());

    assert_eq!(cart.load().await, Ok(RefreshOutcome::Applied { count: 2 }));
    let view = cart.snapshot().await.unwrap();

    assert_eq!(view.status, CartStatus::Loaded);
    assert_eq!(view.grand_total(), Decimal::new(1750, 2));
    assert_eq!(view.grand_total(), view.grand_total());
    assert_eq!(view.item_count(), 5);
    mock.verify();
}

/// Aspirin x2 updated to 5 shows 25.00 before the service answers.
#[tokio::test]
async fn test_update_is_applied_before_confirmation() {
    let (store, mut requests) = create_mock_store(10);
    let cart = start_cart(store);

    let load = {
        let cart = cart.clone();
        tokio::spawn(async move { cart.load().await })
    };
    expect_list_cart_items(&mut requests)
        .await
        .unwrap()
        .send(Ok(vec![CartLine::new(1, aspirin(), 2)]))
        .unwrap();
    load.await.unwrap().unwrap();
    assert_eq!(cart.snapshot().await.unwrap().grand_total(), Decimal::new(1000, 2));

    let update = {
        let cart = cart.clone();
        tokio::spawn(async move { cart.update_quantity(CartLineId(1), 5).await })
    };
    let (line_id, quantity, respond) = expect_update_cart_item(&mut requests).await.unwrap();
    assert_eq!((line_id, quantity), (CartLineId(1), 5));

    // Stock (3) is not enforced on update
    let pending = cart.snapshot().await.unwrap();
    assert_eq!(pending.lines[0].quantity, 5);
    assert_eq!(pending.lines[0].line_total, Decimal::new(2500, 2));
    assert_eq!(pending.grand_total(), Decimal::new(2500, 2));
    assert!(pending.is_pending(CartLineId(1)));

    let confirmed = CartLine::new(1, aspirin(), 5);
    respond.send(Ok(confirmed.clone())).unwrap();
    assert_eq!(update.await.unwrap(), Ok(MutationOutcome::Confirmed(confirmed)));

    let view = cart.snapshot().await.unwrap();
    assert_eq!(view.lines[0].line_total, Decimal::new(2500, 2));
    assert!(!view.is_pending(CartLineId(1)));
    assert_eq!(
        view.notice.map(|n| (n.kind, n.message)),
        Some((NoticeKind::Success, "Cart updated successfully!".to_string()))
    );
}

#[tokio::test]
async fn test_failed_update_is_not_reverted() {
    let mut mock = MockStore::new();
    mock.expect_list_cart_items()
        .return_ok(vec![CartLine::new(1, aspirin(), 2)]);
    mock.expect_update_cart_item().return_err(server_error());
    let cart = start_cart(mock.store());

    cart.load().await.unwrap();
    let outcome = cart.update_quantity(CartLineId(1), 3).await.unwrap();

    assert_eq!(outcome, MutationOutcome::Failed(server_error()));
    let view = cart.snapshot().await.unwrap();
    assert_eq!(view.lines[0].quantity, 3);
    assert_eq!(view.lines[0].line_total, Decimal::new(1500, 2));
    assert_eq!(
        view.notice.map(|n| n.message),
        Some("Failed to update cart item. Please try again.".to_string())
    );
    mock.verify();
}

#[tokio::test]
async fn test_zero_quantity_is_rejected_without_a_call() {
    let (store, mut requests) = create_mock_store(10);
    let cart = start_cart(store);

    let result = cart.update_quantity(CartLineId(1), 0).await;

    assert!(result.unwrap_err().is_validation());
    assert!(requests.try_recv().is_err());
}

#[tokio::test]
async fn test_removing_only_line_empties_cart() {
    let mut mock = MockStore::new();
    mock.expect_list_cart_items()
        .return_ok(vec![CartLine::new(1, aspirin(), 2)]);
    mock.expect_remove_cart_item().return_ok(());
    let cart = start_cart(mock.store());

    cart.load().await.unwrap();
    let outcome = cart.remove_line(CartLineId(1)).await.unwrap();

    assert_eq!(outcome, MutationOutcome::Confirmed(()));
    let view = cart.snapshot().await.unwrap();
    assert!(view.is_empty());
    assert_eq!(view.grand_total(), Decimal::ZERO);
    assert_eq!(
        view.notice.map(|n| n.message),
        Some("Item removed from cart!".to_string())
    );
    mock.verify();
}

#[tokio::test]
async fn test_failed_remove_does_not_restore_line() {
    let mut mock = MockStore::new();
    mock.expect_list_cart_items().return_ok(vec![
        CartLine::new(1, aspirin(), 2),
        CartLine::new(2, paracetamol(), 1),
    ]);
    mock.expect_remove_cart_item().return_err(server_error());
    let cart = start_cart(mock.store());

    cart.load().await.unwrap();
    let outcome = cart.remove_line(CartLineId(1)).await.unwrap();

    assert!(!outcome.is_confirmed());
    let view = cart.snapshot().await.unwrap();
    assert_eq!(view.line_count(), 1);
    assert!(view.line(CartLineId(1)).is_none());
    assert!(view.notice.is_some_and(|n| n.is_error()));
    mock.verify();
}

#[tokio::test]
async fn test_declined_clear_changes_nothing() {
    let mut mock = MockStore::new();
    mock.expect_list_cart_items()
        .return_ok(vec![CartLine::new(1, aspirin(), 2)]);
    let cart = start_cart(mock.store());
    cart.load().await.unwrap();

    let prompts = AtomicUsize::new(0);
    let decline = |prompt: &str| {
        assert_eq!(prompt, CLEAR_PROMPT);
        prompts.fetch_add(1, Ordering::SeqCst);
        false
    };
    let outcome = cart.clear_cart(&decline).await.unwrap();

    assert_eq!(outcome, ClearOutcome::Declined);
    assert_eq!(prompts.load(Ordering::SeqCst), 1);
    assert_eq!(cart.snapshot().await.unwrap().line_count(), 1);
    mock.verify();
}

#[tokio::test]
async fn test_confirmed_clear_empties_cart() {
    let mut mock = MockStore::new();
    mock.expect_list_cart_items()
        .return_ok(vec![CartLine::new(1, aspirin(), 2)]);
    mock.expect_clear_cart().return_ok("Cart cleared".to_string());
    let cart = start_cart(mock.store());
    cart.load().await.unwrap();

    let outcome = cart.clear_cart(&|_: &str| true).await.unwrap();

    assert_eq!(outcome, ClearOutcome::Confirmed("Cart cleared".to_string()));
    let view = cart.snapshot().await.unwrap();
    assert!(view.is_empty());
    assert_eq!(
        view.notice.map(|n| n.message),
        Some("Cart cleared successfully!".to_string())
    );
    mock.verify();
}

#[tokio::test]
async fn test_failed_clear_stays_empty() {
    let mut mock = MockStore::new();
    mock.expect_list_cart_items()
        .return_ok(vec![CartLine::new(1, aspirin(), 2)]);
    mock.expect_clear_cart()
        .return_err(StoreError::Network("connection reset".into()));
    let cart = start_cart(mock.store());
    cart.load().await.unwrap();

    let outcome = cart.clear_cart(&|_: &str| true).await.unwrap();

    assert!(matches!(outcome, ClearOutcome::Failed(StoreError::Network(_))));
    let view = cart.snapshot().await.unwrap();
    assert!(view.is_empty());
    assert!(view.notice.is_some_and(|n| n.is_error()));
    mock.verify();
}

#[tokio::test]
async fn test_failed_load_keeps_lines() {
    let mut mock = MockStore::new();
    mock.expect_list_cart_items()
        .return_ok(vec![CartLine::new(1, aspirin(), 2)]);
    mock.expect_list_cart_items().return_err(server_error());
    let cart = start_cart(mock.store());

    cart.load().await.unwrap();
    let outcome = cart.load().await.unwrap();

    assert!(matches!(outcome, RefreshOutcome::Failed(_)));
    let view = cart.snapshot().await.unwrap();
    assert_eq!(view.line_count(), 1);
    assert!(matches!(view.status, CartStatus::Error(_)));
    mock.verify();
}

/// Loads the given lines through the channel mock and waits for them to apply.
async fn load_through(
    cart: &CartClient,
    requests: &mut mpsc::Receiver<StoreRequest>,
    lines: Vec<CartLine>,
) {
    let load = {
        let cart = cart.clone();
        tokio::spawn(async move { cart.load().await })
    };
    expect_list_cart_items(requests)
        .await
        .expect("Expected ListCartItems request")
        .send(Ok(lines))
        .unwrap();
    assert_eq!(load.await.unwrap(), Ok(RefreshOutcome::Applied { count: 1 }));
}

/// A reload sent before an update must not overwrite the update when it answers late.
#[tokio::test]
async fn test_late_load_does_not_undo_confirmed_update() {
    let (store, mut requests) = create_mock_store(10);
    let cart = start_cart(store);
    load_through(&cart, &mut requests, vec![CartLine::new(1, aspirin(), 2)]).await;

    let stale_load = {
        let cart = cart.clone();
        tokio::spawn(async move { cart.load().await })
    };
    let respond_load = expect_list_cart_items(&mut requests).await.unwrap();

    let update = {
        let cart = cart.clone();
        tokio::spawn(async move { cart.update_quantity(CartLineId(1), 3).await })
    };
    let (_, _, respond_update) = expect_update_cart_item(&mut requests).await.unwrap();

    respond_load
        .send(Ok(vec![CartLine::new(1, aspirin(), 2)]))
        .unwrap();
    assert_eq!(stale_load.await.unwrap(), Ok(RefreshOutcome::Superseded));

    let confirmed = CartLine::new(1, aspirin(), 3);
    respond_update.send(Ok(confirmed.clone())).unwrap();
    assert_eq!(update.await.unwrap(), Ok(MutationOutcome::Confirmed(confirmed)));

    let view = cart.snapshot().await.unwrap();
    assert_eq!(view.lines[0].quantity, 3);
    assert_eq!(view.grand_total(), Decimal::new(1500, 2));
    assert_eq!(view.status, CartStatus::Loaded);
    assert!(view.pending.is_empty());
}

#[tokio::test]
async fn test_late_load_does_not_restore_removed_line() {
    let (store, mut requests) = create_mock_store(10);
    let cart = start_cart(store);
    load_through(&cart, &mut requests, vec![CartLine::new(1, aspirin(), 2)]).await;

    let stale_load = {
        let cart = cart.clone();
        tokio::spawn(async move { cart.load().await })
    };
    let respond_load = expect_list_cart_items(&mut requests).await.unwrap();

    let remove = {
        let cart = cart.clone();
        tokio::spawn(async move { cart.remove_line(CartLineId(1)).await })
    };
    let (line_id, respond_remove) = expect_remove_cart_item(&mut requests).await.unwrap();
    assert_eq!(line_id, CartLineId(1));
    assert!(cart.snapshot().await.unwrap().is_pending(CartLineId(1)));

    // Remove confirms first, the old listing arrives after
    respond_remove.send(Ok(())).unwrap();
    assert_eq!(remove.await.unwrap(), Ok(MutationOutcome::Confirmed(())));
    respond_load
        .send(Ok(vec![CartLine::new(1, aspirin(), 2)]))
        .unwrap();
    assert_eq!(stale_load.await.unwrap(), Ok(RefreshOutcome::Superseded));

    let view = cart.snapshot().await.unwrap();
    assert!(view.is_empty());
    assert_eq!(view.grand_total(), Decimal::ZERO);
}

#[tokio::test]
async fn test_late_load_does_not_undo_confirmed_clear() {
    let (store, mut requests) = create_mock_store(10);
    let cart = start_cart(store);
    load_through(&cart, &mut requests, vec![CartLine::new(1, aspirin(), 2)]).await;

    let stale_load = {
        let cart = cart.clone();
        tokio::spawn(async move { cart.load().await })
    };
    let respond_load = expect_list_cart_items(&mut requests).await.unwrap();

    let clear = {
        let cart = cart.clone();
        tokio::spawn(async move { cart.clear_cart(&|_: &str| true).await })
    };
    let respond_clear = expect_clear_cart(&mut requests).await.unwrap();
    assert!(cart.snapshot().await.unwrap().clearing);

    respond_load
        .send(Ok(vec![CartLine::new(1, aspirin(), 2)]))
        .unwrap();
    assert_eq!(stale_load.await.unwrap(), Ok(RefreshOutcome::Superseded));
    respond_clear.send(Ok("Cart cleared".to_string())).unwrap();
    assert_eq!(
        clear.await.unwrap(),
        Ok(ClearOutcome::Confirmed("Cart cleared".to_string()))
    );

    let view = cart.snapshot().await.unwrap();
    assert!(view.is_empty());
    assert!(!view.clearing);
}

/// A load sent after the mutation settles applies normally.
#[tokio::test]
async fn test_load_after_settled_mutation_applies() {
    let (store, mut requests) = create_mock_store(10);
    let cart = start_cart(store);
    load_through(&cart, &mut requests, vec![CartLine::new(1, aspirin(), 2)]).await;

    let update = {
        let cart = cart.clone();
        tokio::spawn(async move { cart.update_quantity(CartLineId(1), 3).await })
    };
    let (_, _, respond_update) = expect_update_cart_item(&mut requests).await.unwrap();
    respond_update
        .send(Ok(CartLine::new(1, aspirin(), 3)))
        .unwrap();
    update.await.unwrap().unwrap();

    load_through(&cart, &mut requests, vec![CartLine::new(1, aspirin(), 3)]).await;
    assert_eq!(cart.snapshot().await.unwrap().item_count(), 3);
}
