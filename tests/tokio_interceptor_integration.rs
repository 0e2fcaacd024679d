//! Interceptor over real tokio timers, driven on a paused clock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use quiesce::domain::ports::TimerProvider;
use quiesce::services::PageContext;
use quiesce::TokioTimerProvider;
use serde_json::json;

#[tokio::test(start_paused = true)]
async fn test_tokio_page_tracks_and_completes() {
    let page = PageContext::attach(Arc::new(TokioTimerProvider::current().unwrap()));
    page.install_timer_interceptor();
    page.install_configured_completion_monitor(&Default::default());

    let globals = Arc::clone(page.globals());
    let finish = page
        .timers()
        .set_timeout(
            Box::new(move || globals.set("reporter", json!({ "finished": true }))),
            Duration::from_millis(100),
        )
        .unwrap();

    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ticks);
    let heartbeat = page
        .timers()
        .set_interval(
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
            Duration::from_millis(30),
        )
        .unwrap();

    assert_eq!(page.outstanding_timers().unwrap().sorted(), vec![finish, heartbeat]);
    assert!(!page.completed());

    tokio::time::sleep(Duration::from_millis(110)).await;
    tokio::task::yield_now().await;

    assert!(page.completed());
    assert_eq!(ticks.load(Ordering::SeqCst), 3);
    // Fired, but never cancelled.
    assert!(page.outstanding_timers().unwrap().contains(&finish));

    assert!(page.timers().clear_interval(&heartbeat).unwrap());
    assert!(!page.timers().clear_timeout(&finish).unwrap());
    assert!(page.outstanding_timers().unwrap().is_empty());
    assert_eq!(page.provider().active(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_tokio_timer_never_runs() {
    let page = PageContext::attach(Arc::new(TokioTimerProvider::current().unwrap()));
    page.install_timer_interceptor();

    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let id = page
        .timers()
        .set_timeout(
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
            Duration::from_millis(50),
        )
        .unwrap();

    assert!(page.timers().clear_timeout(&id).unwrap());
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert!(page.outstanding_timers().unwrap().is_empty());
}
