use once_cell::sync::Lazy;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Bunyan-formatted JSON subscriber writing to `sink`. `RUST_LOG` takes precedence over
/// `directives`.
pub fn get_subscriber<S>(name: impl Into<String>, directives: impl AsRef<str>, sink: S) -> impl Subscriber + Send + Sync
where
    S: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives.as_ref()));
    let formatting_layer = BunyanFormattingLayer::new(name.into(), sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Installs `subscriber` as the global default. Fails if one is already installed.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync + 'static) -> crate::Result<()> {
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Test logging, written to stdout only when `TEST_LOG` is set.
pub static TEST_TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info";
    let subscriber_name = "test";

    let installed = if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber(subscriber_name, default_filter_level, std::io::stdout))
    } else {
        init_subscriber(get_subscriber(subscriber_name, default_filter_level, std::io::sink))
    };

    if let Err(err) = installed {
        eprintln!("test tracing not installed: {err}");
    }
});
