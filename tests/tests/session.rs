mod utils;
#[allow(unused)]
use utils::*;

use mock_runtime::MockRuntime;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use stampede::{BenchConfig, Error, Session};

fn single_image(requests: u32, concurrency: u32) -> BenchConfig {
    BenchConfig::new(requests, concurrency, vec!["app:latest".into()])
}

#[tokio::test]
async fn collects_one_sample_per_request() {
    init();

    let client = Arc::new(MockRuntime::instant());
    let report = Session::new(single_image(10, 2), client.clone())
        .run()
        .await
        .unwrap();

    assert_eq!(report.samples, 10);
    assert_eq!(client.calls(), 10);
}

#[tokio::test]
async fn truncates_when_requests_do_not_divide_evenly() {
    init();

    // 3 requests over 2 workers: one request per worker, the rest dropped.
    let client = Arc::new(MockRuntime::instant());
    let report = Session::new(single_image(3, 2), client.clone())
        .run()
        .await
        .unwrap();

    assert_eq!(report.samples, 2);
    assert_eq!(client.calls(), 2);
}

#[tokio::test]
async fn images_round_robin_across_workers() {
    init();

    let images = vec!["alpine:latest".to_string(), "nginx:latest".to_string()];
    let config = BenchConfig::new(8, 4, images.clone());
    let per_worker = config.per_worker();
    let client = Arc::new(MockRuntime::instant());

    Session::new(config, client.clone()).run().await.unwrap();

    let specs = client.seen();
    assert_eq!(specs.len(), 8);
    for spec in specs {
        // Container numbering is `i + per_worker * worker`, so the worker
        // index falls out of the name.
        let number: u32 = spec.name.rsplit('-').next().unwrap().parse().unwrap();
        let worker = number / per_worker;
        assert_eq!(spec.image, images[worker as usize % images.len()]);
    }
}

#[tokio::test]
async fn container_names_never_collide() {
    init();

    let client = Arc::new(MockRuntime::instant());
    Session::new(single_image(12, 3), client.clone())
        .run()
        .await
        .unwrap();

    let names: HashSet<String> = client.seen().into_iter().map(|spec| spec.name).collect();
    assert_eq!(names.len(), 12);
}

#[tokio::test]
async fn command_and_labels_reach_the_runtime() {
    init();

    let mut labels = HashMap::new();
    labels.insert("env".to_string(), "bench".to_string());
    let config = single_image(4, 2)
        .with_command(vec!["sleep".into(), "30".into()])
        .with_labels(labels.clone());
    let client = Arc::new(MockRuntime::instant());

    Session::new(config, client.clone()).run().await.unwrap();

    for spec in client.seen() {
        assert_eq!(spec.command.as_deref(), Some(&["sleep".to_string(), "30".to_string()][..]));
        assert_eq!(spec.labels.as_ref(), Some(&labels));
    }
}

#[tokio::test]
async fn adapter_failure_aborts_without_a_report() {
    init();

    let client = Arc::new(MockRuntime::instant().fail_after(3));
    let result = Session::new(single_image(10, 2), client).run().await;

    assert!(matches!(result, Err(Error::Worker { .. })));
}

#[tokio::test]
async fn invalid_config_is_rejected_before_any_call() {
    init();

    let client = Arc::new(MockRuntime::instant());
    let result = Session::new(single_image(0, 1), client.clone()).run().await;

    assert!(matches!(result, Err(Error::Config(_))));
    assert_eq!(client.calls(), 0);

    let client = Arc::new(MockRuntime::instant());
    let result = Session::new(BenchConfig::new(10, 2, vec![]), client.clone())
        .run()
        .await;

    assert!(matches!(result, Err(Error::Config(_))));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn fixed_latency_end_to_end() {
    init();

    // 10 requests over 2 workers at a fixed 100ms per container: 5
    // sequential creations per worker, run in parallel.
    let client = Arc::new(MockRuntime::with_delay(Duration::from_millis(100)));
    let report = Session::new(single_image(10, 2), client)
        .run()
        .await
        .unwrap();

    assert_eq!(report.samples, 10);

    let mean_ms = report.mean.as_secs_f64() * 1000.0;
    let p90_ms = report.p90.as_secs_f64() * 1000.0;
    let p99_ms = report.p99.as_secs_f64() * 1000.0;
    assert!((100.0..200.0).contains(&mean_ms), "mean {mean_ms}ms");
    assert!((100.0..200.0).contains(&p90_ms), "p90 {p90_ms}ms");
    assert!((100.0..200.0).contains(&p99_ms), "p99 {p99_ms}ms");

    // Five sequential 100ms calls set the floor; the two workers running in
    // parallel keep it well under the sequential total of 1s.
    assert!(report.elapsed >= Duration::from_millis(500), "elapsed {:?}", report.elapsed);
    assert!(report.elapsed < Duration::from_millis(900), "elapsed {:?}", report.elapsed);
}
