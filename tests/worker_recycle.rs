//! Worker recycling tests.

use std::time::Duration;

mod common;

/// With a tiny request ceiling every worker recycles repeatedly; the service
/// must stay available throughout.
#[tokio::test]
async fn service_survives_worker_recycling() {
    let mut config = common::test_config();
    config.workers.count = 2;
    config.workers.threads = 2;
    config.workers.max_requests = 5;
    config.workers.max_requests_jitter = 1;

    let (addr, shutdown) = common::spawn_service(config).await;

    // Fresh connection per request so every request goes through accept.
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    for i in 0..40 {
        let res = client
            .get(format!("http://{addr}/api/convert?minutes=5&seconds=0"))
            .send()
            .await
            .unwrap_or_else(|e| panic!("request {i} failed: {e}"));
        assert_eq!(res.status(), 200, "request {i} got a non-success status");
    }

    shutdown.trigger();
}

/// Concurrent requests across workers all complete while recycles happen
/// between them.
#[tokio::test]
async fn concurrent_requests_complete_across_recycles() {
    let mut config = common::test_config();
    config.workers.count = 4;
    config.workers.threads = 2;
    config.workers.max_requests = 3;
    config.workers.max_requests_jitter = 1;

    let (addr, shutdown) = common::spawn_service(config).await;

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let mut tasks = Vec::new();
    for _ in 0..30 {
        let client = client.clone();
        let url = format!("http://{addr}/api/races?minutes=4&seconds=30");
        tasks.push(tokio::spawn(async move {
            client.get(url).send().await.map(|r| r.status().as_u16())
        }));
    }

    for task in tasks {
        let status = task.await.unwrap().expect("request failed");
        assert_eq!(status, 200);
    }

    shutdown.trigger();
}

/// Shutdown stops the listener; a subsequent request must fail.
#[tokio::test]
async fn shutdown_stops_accepting() {
    let (addr, shutdown) = common::spawn_service(common::test_config()).await;

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let res = client.get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(500)).await;

    let after = client
        .get(format!("http://{addr}/"))
        .timeout(Duration::from_secs(2))
        .send()
        .await;
    assert!(after.is_err(), "service still answering after shutdown");
}
