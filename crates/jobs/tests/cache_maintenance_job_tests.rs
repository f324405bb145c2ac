use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;
use zonegate_jobs::{CacheMaintenanceJob, JobRunner};

mod helpers;
use helpers::MockCacheMaintenancePort;

#[tokio::test(start_paused = true)]
async fn test_sweep_waits_one_interval_before_first_run() {
    let mock = Arc::new(MockCacheMaintenancePort::new());
    let job = Arc::new(CacheMaintenanceJob::new(mock.clone()).with_interval(60));

    job.start().await;

    sleep(Duration::from_secs(30)).await;
    assert_eq!(mock.sweep_call_count(), 0);

    sleep(Duration::from_secs(31)).await;
    assert_eq!(mock.sweep_call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_sweep_fires_on_every_interval() {
    let mock = Arc::new(MockCacheMaintenancePort::new());
    let job = Arc::new(CacheMaintenanceJob::new(mock.clone()).with_interval(10));

    job.start().await;
    sleep(Duration::from_secs(35)).await;

    assert_eq!(mock.sweep_call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_sweep_error_is_non_fatal() {
    let mock = Arc::new(MockCacheMaintenancePort::new());
    mock.set_should_fail(true);
    let job = Arc::new(CacheMaintenanceJob::new(mock.clone()).with_interval(1));

    job.start().await;
    sleep(Duration::from_millis(2500)).await;

    assert!(
        mock.sweep_call_count() >= 2,
        "Job should continue running after sweep errors"
    );
}

#[tokio::test(start_paused = true)]
async fn test_job_shuts_down_on_cancellation() {
    let mock = Arc::new(MockCacheMaintenancePort::new());
    let token = CancellationToken::new();
    let job = Arc::new(
        CacheMaintenanceJob::new(mock.clone())
            .with_interval(1)
            .with_cancellation(token.clone()),
    );

    let handle = job.start().await;
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(mock.sweep_call_count(), 1);

    token.cancel();
    handle.await.unwrap();

    sleep(Duration::from_secs(5)).await;
    assert_eq!(mock.sweep_call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_runner_applies_shutdown_token() {
    let mock = Arc::new(MockCacheMaintenancePort::new());
    let token = CancellationToken::new();

    let handles = JobRunner::new()
        .with_cache_maintenance(CacheMaintenanceJob::new(mock.clone()).with_interval(1))
        .with_shutdown_token(token.clone())
        .start()
        .await;
    assert_eq!(handles.len(), 1);

    token.cancel();
    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(mock.sweep_call_count(), 0);
}

#[tokio::test]
async fn test_empty_runner_starts_cleanly() {
    let handles = JobRunner::new().start().await;
    assert!(handles.is_empty());
}
