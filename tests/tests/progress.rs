mod utils;
#[allow(unused)]
use utils::*;

use mock_runtime::MockRuntime;
use stampede::progress::{Progress, ProgressSink};
use stampede::{BenchConfig, Session};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Progress>>>);

impl ProgressSink for Recorder {
    fn on_sample(&mut self, progress: Progress) {
        self.0.lock().unwrap().push(progress);
    }
}

#[tokio::test]
async fn percent_complete_is_monotone_and_reaches_100() {
    init();

    let recorder = Recorder::default();
    let client = Arc::new(MockRuntime::instant());
    let config = BenchConfig::new(10, 2, vec!["app:latest".into()]);

    Session::new(config, client)
        .with_sink(recorder.clone())
        .run()
        .await
        .unwrap();

    let seen = recorder.0.lock().unwrap();
    assert_eq!(seen.len(), 10);
    assert!(seen.windows(2).all(|w| w[0].percent <= w[1].percent));
    assert_eq!(seen.last().unwrap().percent, 100.0);
    assert_eq!(seen.last().unwrap().completed, 10);
    assert!(seen.iter().all(|p| p.total == 10));
}

#[tokio::test]
async fn every_sample_is_observed() {
    init();

    let recorder = Recorder::default();
    let client = Arc::new(MockRuntime::instant());
    let config = BenchConfig::new(9, 3, vec!["app:latest".into()]);

    Session::new(config, client)
        .with_sink(recorder.clone())
        .run()
        .await
        .unwrap();

    let seen = recorder.0.lock().unwrap();
    let completed: Vec<usize> = seen.iter().map(|p| p.completed).collect();
    assert_eq!(completed, (1..=9).collect::<Vec<_>>());
}
