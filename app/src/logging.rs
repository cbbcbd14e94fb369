use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,sqlx=warn";

pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if cfg!(test) {
        // tests may initialize several times
        let _ = builder.compact().with_test_writer().try_init();
    } else {
        let _ = builder.try_init();
    }
}
