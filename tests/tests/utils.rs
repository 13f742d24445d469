use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

#[allow(unused)]
pub fn init() {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    ONCE_LOCK.get_or_init(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("stampede=debug"))
            .with_test_writer()
            .init();
    });
}
