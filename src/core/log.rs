use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, fmt::format::FmtSpan,
    prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Logs go to stderr so stdout stays clean for tables and the shell prompt.
/// With `verbose`, closing spans are logged too, which times each rate fetch.
pub fn init_logging(verbose: bool) {
    let (level_filter, level, span_events) = if verbose {
        (LevelFilter::DEBUG, "debug", FmtSpan::CLOSE)
    } else {
        (LevelFilter::OFF, "off", FmtSpan::NONE)
    };
    let app_filter = Targets::new().with_target(env!("CARGO_CRATE_NAME"), level_filter);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_span_events(span_events)
                .with_writer(std::io::stderr),
        )
        .with(app_filter)
        .with(env_filter)
        .init();
}
