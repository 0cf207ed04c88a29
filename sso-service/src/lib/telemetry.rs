use tracing::subscriber::NoSubscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::EnvFilter;

use crate::config::RunEnvironment;

/// Install the global tracing subscriber for the given environment.
///
/// `RUST_LOG` overrides the default filter. Local runs get human readable
/// output; dev and prod emit one JSON object per event.
pub fn init(environment: RunEnvironment) -> Result<(), TryInitError> {
    let default_filter = match environment {
        RunEnvironment::Local | RunEnvironment::Dev => "sso_service=debug,auth=debug,info",
        RunEnvironment::Prod => "sso_service=info,auth=info,warn",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let pretty_layer = (environment == RunEnvironment::Local)
        .then(|| tracing_subscriber::fmt::layer().pretty());
    let json_layer = (environment != RunEnvironment::Local)
        .then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty_layer)
        .with(json_layer)
        .try_init()
}

/// Subscriber that drops every event.
///
/// Install it with `tracing::subscriber::set_default` where output is unwanted.
pub fn discard() -> NoSubscriber {
    NoSubscriber::default()
}
