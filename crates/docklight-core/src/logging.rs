/// Install the global `tracing` subscriber.
///
/// The filter can be overridden with `RUST_LOG`; otherwise the dock logs at
/// `debug` and keeps windowing noise at `info`.
pub fn init() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug,winit=info,calloop=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
