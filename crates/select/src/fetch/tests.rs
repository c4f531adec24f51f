use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::mpsc;

use super::*;
use crate::testing::{Company, GatedFetcher, company};

type Rx = mpsc::UnboundedReceiver<FetchSettled<Company>>;

fn coordinator(fetcher: Arc<GatedFetcher>, abort_superseded: bool) -> (FetchCoordinator<Company>, mpsc::UnboundedSender<FetchSettled<Company>>, Rx) {
	let (tx, rx) = mpsc::unbounded_channel();
	(FetchCoordinator::<Company>::new(fetcher, abort_superseded), tx, rx)
}

fn issue(coord: &mut FetchCoordinator<Company>, tx: &mpsc::UnboundedSender<FetchSettled<Company>>, query: &str) -> Epoch {
	let tx = tx.clone();
	coord.issue(query.to_string(), move |settled| {
		let _ = tx.send(settled);
	})
}

#[tokio::test]
async fn later_issue_wins_when_earlier_resolves_last() {
	let fetcher = GatedFetcher::new();
	let (mut coord, tx, mut rx) = coordinator(Arc::clone(&fetcher), false);

	let first = issue(&mut coord, &tx, "a");
	let second = issue(&mut coord, &tx, "ab");
	assert!(second > first);
	fetcher.wait_for_calls(2).await;

	assert!(fetcher.resolve("ab", Ok(vec![company("2", "Abacus")])));
	let settled = rx.recv().await.expect("second fetch must settle");
	assert_eq!(settled.epoch(), second);
	assert_eq!(coord.apply(settled), Settlement::Replaced { count: 1 });

	assert!(fetcher.resolve("a", Ok(vec![company("1", "Acme"), company("3", "Atlas")])));
	let stale = rx.recv().await.expect("first fetch must settle");
	assert_eq!(coord.apply(stale), Settlement::Stale);

	assert_eq!(coord.candidates(), &[company("2", "Abacus")]);
	assert!(!coord.is_loading());
}

#[tokio::test]
async fn early_stale_resolution_keeps_loading() {
	let fetcher = GatedFetcher::new();
	let (mut coord, tx, mut rx) = coordinator(Arc::clone(&fetcher), false);

	issue(&mut coord, &tx, "a");
	issue(&mut coord, &tx, "ab");
	fetcher.wait_for_calls(2).await;

	fetcher.resolve("a", Ok(vec![company("1", "Acme")]));
	let stale = rx.recv().await.expect("first fetch must settle");
	assert_eq!(coord.apply(stale), Settlement::Stale);
	assert!(coord.is_loading());
	assert!(coord.candidates().is_empty());
}

#[tokio::test]
async fn failure_clears_candidates_and_reports_once() {
	let fetcher = GatedFetcher::new();
	let (mut coord, tx, mut rx) = coordinator(Arc::clone(&fetcher), false);
	let reports = Arc::new(AtomicUsize::new(0));
	let seen = Arc::clone(&reports);
	coord.set_error_observer(Some(Arc::new(move |_err: &FetchError| {
		seen.fetch_add(1, Ordering::SeqCst);
	})));

	issue(&mut coord, &tx, "");
	fetcher.wait_for_calls(1).await;
	fetcher.resolve("", Ok(vec![company("1", "Acme")]));
	coord.apply(rx.recv().await.expect("must settle"));
	assert_eq!(coord.candidates().len(), 1);

	issue(&mut coord, &tx, "xyz");
	fetcher.wait_for_calls(2).await;
	fetcher.resolve("xyz", Err(FetchError::Transport("connection reset".to_string())));
	assert_eq!(coord.apply(rx.recv().await.expect("must settle")), Settlement::Failed);

	assert!(coord.candidates().is_empty());
	assert!(!coord.is_loading());
	assert_eq!(reports.load(Ordering::SeqCst), 1);
	assert!(coord.needs_fetch("xyz"), "a failed query must be retryable");
}

#[tokio::test]
async fn superseded_failure_keeps_newer_list_and_stays_quiet() {
	let fetcher = GatedFetcher::new();
	let (mut coord, tx, mut rx) = coordinator(Arc::clone(&fetcher), false);
	let reports = Arc::new(AtomicUsize::new(0));
	let seen = Arc::clone(&reports);
	coord.set_error_observer(Some(Arc::new(move |_err: &FetchError| {
		seen.fetch_add(1, Ordering::SeqCst);
	})));

	issue(&mut coord, &tx, "a");
	issue(&mut coord, &tx, "ab");
	fetcher.wait_for_calls(2).await;

	fetcher.resolve("ab", Ok(vec![company("2", "Abacus")]));
	coord.apply(rx.recv().await.expect("second fetch must settle"));

	fetcher.resolve("a", Err(FetchError::Status { status: 503 }));
	assert_eq!(coord.apply(rx.recv().await.expect("first fetch must settle")), Settlement::Stale);

	assert_eq!(coord.candidates(), &[company("2", "Abacus")]);
	assert_eq!(reports.load(Ordering::SeqCst), 0);
	assert!(!coord.needs_fetch("ab"));
}

#[tokio::test]
async fn changed_query_clears_list_on_issue() {
	let fetcher = GatedFetcher::new();
	let (mut coord, tx, mut rx) = coordinator(Arc::clone(&fetcher), false);

	issue(&mut coord, &tx, "");
	fetcher.wait_for_calls(1).await;
	fetcher.resolve("", Ok(vec![company("1", "Acme")]));
	coord.apply(rx.recv().await.expect("must settle"));
	assert!(!coord.needs_fetch(""));

	issue(&mut coord, &tx, "");
	assert_eq!(coord.candidates().len(), 1, "same query keeps the list while reloading");

	issue(&mut coord, &tx, "b");
	assert!(coord.candidates().is_empty());
	assert_eq!(coord.issued_query(), Some("b"));
}

#[tokio::test]
async fn abort_superseded_drops_old_future() {
	let fetcher = GatedFetcher::new();
	let (mut coord, tx, mut rx) = coordinator(Arc::clone(&fetcher), true);

	let first = issue(&mut coord, &tx, "a");
	fetcher.wait_for_calls(1).await;
	issue(&mut coord, &tx, "ab");

	let aborted = rx.recv().await.expect("aborted fetch still reports");
	assert_eq!(aborted.epoch(), first);
	assert!(matches!(aborted.outcome, FetchOutcome::Aborted));
	assert_eq!(coord.apply(aborted), Settlement::Stale);
	assert!(fetcher.is_abandoned("a"));

	fetcher.wait_for_calls(2).await;
	fetcher.resolve("ab", Ok(vec![company("2", "Abacus")]));
	assert_eq!(coord.apply(rx.recv().await.expect("must settle")), Settlement::Replaced { count: 1 });
}

#[tokio::test]
async fn drop_cancels_in_flight_fetches() {
	let fetcher = GatedFetcher::new();
	let (mut coord, tx, mut rx) = coordinator(Arc::clone(&fetcher), false);
	issue(&mut coord, &tx, "a");
	fetcher.wait_for_calls(1).await;

	drop(coord);
	let settled = rx.recv().await.expect("cancelled fetch reports before exiting");
	assert!(matches!(settled.outcome, FetchOutcome::Aborted));
	assert!(fetcher.is_abandoned("a"));
}
