//! End-to-end booking flow against an on-disk store: register, book,
//! progress to delivered, then reopen the database and verify everything
//! survived the restart.

use ldps_core::{OrderStatus, OrdersManager, Session, Store};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

#[tokio::test(start_paused = true)]
async fn test_booking_flow_survives_restart() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("ldps.redb");

    let order_id;
    let driver_name;

    // ===== First app run: register, book, ride to delivered =====
    {
        let store = Store::open(&db_path).unwrap();

        let mut session = Session::load(store.clone()).unwrap();
        session.register("Asha", "asha@example.com", "9876543210").unwrap();

        let manager = OrdersManager::new(store.clone());
        let order = manager.create_order("12 MG Road", "4 Park Street").unwrap();
        order_id = order.id.clone();

        assert!(order.id.starts_with("LDPS"));
        assert_eq!(order.status, OrderStatus::Searching);
        assert!((2.0..17.0).contains(&order.distance));

        let mut updates = manager.subscribe();
        let handle = manager.start_progression(&order.id).unwrap();

        let assigned = updates.recv().await.unwrap();
        assert_eq!(assigned.status, OrderStatus::Assigned);
        driver_name = assigned.driver_name.clone().unwrap();

        assert_eq!(updates.recv().await.unwrap().status, OrderStatus::InTransit);
        assert_eq!(updates.recv().await.unwrap().status, OrderStatus::Delivered);
        handle.wait().await;
    }

    // ===== Second app run: same database file =====
    {
        let store = Store::open(&db_path).unwrap();

        let session = Session::load(store.clone()).unwrap();
        assert!(session.is_logged_in());
        assert_eq!(session.user().unwrap().name, "Asha");

        let manager = OrdersManager::new(store.clone());
        let order = manager.get_order(&order_id).unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.driver_name.as_deref(), Some(driver_name.as_str()));
        let rating = order.driver_rating.unwrap();
        assert!((4.0..5.0).contains(&rating));

        // A progression started on a delivered order makes no further
        // transitions; the worker exits at its first tick.
        let handle = manager.start_progression(&order_id).unwrap();
        handle.wait().await;
        assert_eq!(
            manager.get_order(&order_id).unwrap().status,
            OrderStatus::Delivered
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_resume_mid_lifecycle_after_restart() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("ldps.redb");

    let order_id;

    // First run is killed after the assigned transition
    {
        let store = Store::open(&db_path).unwrap();
        let manager = OrdersManager::new(store);

        let order = manager.create_order("A", "B").unwrap();
        order_id = order.id.clone();

        let mut updates = manager.subscribe();
        let handle = manager.start_progression(&order.id).unwrap();

        assert_eq!(updates.recv().await.unwrap().status, OrderStatus::Assigned);
        handle.cancel();
        handle.wait().await;
    }

    // Second run resumes at assigned, not searching
    {
        let store = Store::open(&db_path).unwrap();
        let manager = OrdersManager::new(store);

        let order = manager.get_order(&order_id).unwrap();
        assert_eq!(order.status, OrderStatus::Assigned);
        let driver = order.driver_name.clone().unwrap();

        let mut updates = manager.subscribe();
        let handle = manager.start_progression(&order_id).unwrap();

        let next = updates.recv().await.unwrap();
        assert_eq!(next.status, OrderStatus::InTransit);
        assert_eq!(updates.recv().await.unwrap().status, OrderStatus::Delivered);
        handle.wait().await;

        let done = manager.get_order(&order_id).unwrap();
        assert_eq!(done.status, OrderStatus::Delivered);
        // The driver picked in the first run is untouched
        assert_eq!(done.driver_name.as_deref(), Some(driver.as_str()));
    }
}

#[test]
fn test_clear_all_wipes_every_partition() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("ldps.redb")).unwrap();

    let mut session = Session::load(store.clone()).unwrap();
    session.login("asha@example.com", "pw").unwrap();

    let manager = OrdersManager::new(store.clone());
    manager.create_order("A", "B").unwrap();

    store.clear_all().unwrap();

    assert!(store.get_user().unwrap().is_none());
    assert!(!store.is_logged_in().unwrap());
    assert!(store.get_orders().unwrap().is_empty());
}
