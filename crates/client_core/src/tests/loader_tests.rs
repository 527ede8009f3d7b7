use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use shared::{
    domain::{Product, ProductId},
    error::{CatalogError, ErrorCode},
};
use tokio::sync::{mpsc, Notify};

use crate::{
    catalog::CatalogSource,
    loader::{CatalogLoader, LoadOutcome, MountState},
};

struct TestCatalog {
    products: Vec<Product>,
    fail_with: Option<String>,
    gate: Option<Arc<Notify>>,
    fetches: Arc<AtomicUsize>,
}

impl TestCatalog {
    fn ok(count: i64) -> Self {
        Self {
            products: (0..count)
                .map(|n| Product {
                    id: ProductId(n),
                    title: format!("product {n}"),
                    image_url: format!("/img/{n}.png"),
                })
                .collect(),
            fail_with: None,
            gate: None,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing(err: impl Into<String>) -> Self {
        let mut catalog = Self::ok(0);
        catalog.fail_with = Some(err.into());
        catalog
    }

    fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl CatalogSource for TestCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(err) = &self.fail_with {
            return Err(CatalogError::new(ErrorCode::Transport, err.clone()));
        }
        Ok(self.products.clone())
    }

    async fn fetch_image(&self, _image_url: &str) -> Result<Vec<u8>, CatalogError> {
        Ok(Vec::new())
    }
}

fn channel_sink() -> (
    impl FnOnce(LoadOutcome) + Send + 'static,
    mpsc::UnboundedReceiver<LoadOutcome>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        move |outcome| {
            let _ = tx.send(outcome);
        },
        rx,
    )
}

#[test]
fn mount_state_accepts_one_outcome_per_mount() {
    let mut mount = MountState::default();
    let ticket = mount.mount();

    assert!(mount.is_current(ticket));
    assert!(mount.accept_outcome(ticket));
    assert!(!mount.accept_outcome(ticket));
}

#[test]
fn mount_state_rejects_outcomes_after_unmount_or_remount() {
    let mut mount = MountState::default();
    let first = mount.mount();
    assert_eq!(mount.unmount(), Some(first));
    assert!(!mount.accept_outcome(first));

    let second = mount.mount();
    assert!(second > first);
    assert!(!mount.accept_outcome(first));
    assert!(mount.accept_outcome(second));
}

#[tokio::test]
async fn delivers_products_tagged_with_ticket() {
    let mut mount = MountState::default();
    let ticket = mount.mount();
    let mut loader = CatalogLoader::new();
    let (deliver, mut rx) = channel_sink();

    assert!(loader.start(ticket, Arc::new(TestCatalog::ok(20)), deliver));

    let outcome = rx.recv().await.expect("outcome");
    assert_eq!(outcome.ticket, ticket);
    assert_eq!(outcome.result.expect("products").len(), 20);
    assert!(mount.accept_outcome(outcome.ticket));
}

#[tokio::test]
async fn delivers_failure_without_retrying() {
    let mut mount = MountState::default();
    let ticket = mount.mount();
    let catalog = TestCatalog::failing("connection refused");
    let fetches = catalog.fetches.clone();
    let mut loader = CatalogLoader::new();
    let (deliver, mut rx) = channel_sink();

    loader.start(ticket, Arc::new(catalog), deliver);

    let outcome = rx.recv().await.expect("outcome");
    let err = outcome.result.expect_err("should fail");
    assert_eq!(err.code, ErrorCode::Transport);
    assert!(rx.recv().await.is_none());
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn same_ticket_only_starts_once() {
    let mut mount = MountState::default();
    let ticket = mount.mount();
    let catalog = Arc::new(TestCatalog::ok(1));
    let fetches = catalog.fetches.clone();
    let mut loader = CatalogLoader::new();
    let (first, mut rx) = channel_sink();
    let (second, _rx2) = channel_sink();

    assert!(loader.start(ticket, catalog.clone(), first));
    assert!(!loader.start(ticket, catalog, second));

    rx.recv().await.expect("outcome");
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cancelled_load_never_delivers() {
    let mut mount = MountState::default();
    let ticket = mount.mount();
    let gate = Arc::new(Notify::new());
    let mut loader = CatalogLoader::new();
    let (deliver, mut rx) = channel_sink();

    loader.start(
        ticket,
        Arc::new(TestCatalog::ok(5).gated(gate.clone())),
        deliver,
    );
    assert_eq!(loader.in_flight(), 1);
    assert!(loader.cancel(ticket));
    gate.notify_waiters();

    let received = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
    assert!(matches!(received, Ok(None)), "aborted task must drop its sink");
    assert_eq!(loader.in_flight(), 0);
}

#[tokio::test]
async fn newer_mount_aborts_older_load() {
    let mut mount = MountState::default();
    let stale = mount.mount();
    let gate = Arc::new(Notify::new());
    let mut loader = CatalogLoader::new();
    let (stale_sink, mut stale_rx) = channel_sink();
    loader.start(
        stale,
        Arc::new(TestCatalog::ok(5).gated(gate.clone())),
        stale_sink,
    );

    let live = mount.mount();
    let (live_sink, mut live_rx) = channel_sink();
    assert!(loader.start(live, Arc::new(TestCatalog::ok(3)), live_sink));
    assert!(!loader.start(stale, Arc::new(TestCatalog::ok(1)), |_| {}));
    gate.notify_waiters();

    let outcome = live_rx.recv().await.expect("live outcome");
    assert_eq!(outcome.ticket, live);
    assert!(stale_rx.recv().await.is_none());
}

#[tokio::test]
async fn dropping_loader_aborts_in_flight_fetch() {
    let mut mount = MountState::default();
    let ticket = mount.mount();
    let gate = Arc::new(Notify::new());
    let (deliver, mut rx) = channel_sink();
    {
        let mut loader = CatalogLoader::new();
        loader.start(
            ticket,
            Arc::new(TestCatalog::ok(5).gated(gate.clone())),
            deliver,
        );
    }
    gate.notify_waiters();
    assert!(rx.recv().await.is_none());
}
