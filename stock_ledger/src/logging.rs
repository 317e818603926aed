use std::thread;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

pub fn thread_logging(str: &str) {
    let thread_id = thread::current().id();
    info!("{}: {:?}", str, thread_id);
}
