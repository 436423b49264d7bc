pub mod accept;
pub mod config;

use std::sync::Arc;

use rocket::{fairing::AdHoc, figment::Figment, Build, Rocket};
use tracing::{error, info};

use crate::{
    counter::{flush_loop::FlushLoop, flush_sink::WriterSink, unique_counter::UniqueCounter},
    error::Result,
    forward::forward_client::ForwardClient,
};
use config::CounterConfig;

pub const MOUNT_POINT: &str = "/api/verve";

/// Builds the server from `Rocket.toml` and `ROCKET_*` variables.
pub fn build() -> Rocket<Build> {
    build_with(config::figment())
}

/// Builds the server from an explicit figment. Tests use this to point the
/// unique request log at a temporary file.
pub fn build_with(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment).attach(stage()).mount(
        MOUNT_POINT,
        rocket::routes![
            accept::accept,
            accept::accept_head,
            accept::accept_options,
            accept::accept_post,
            accept::accept_put,
            accept::accept_delete,
            accept::accept_patch,
        ],
    )
}

/// Opens the log file, creates the shared counter and starts the flush loop.
/// Any failure here aborts ignition, so the server never starts half-wired.
fn stage() -> AdHoc {
    AdHoc::try_on_ignite("Unique request counter", |rocket| async move {
        let state = init_state(rocket.figment());
        match state {
            Ok((config, counter, forward_client, flush_loop)) => {
                info!(
                    log = %config.unique_log_path.display(),
                    period_secs = flush_loop.period().as_secs(),
                    "unique request counter ready"
                );
                Ok(rocket
                    .manage(config)
                    .manage(counter)
                    .manage(forward_client)
                    .manage(flush_loop))
            }
            Err(e) => {
                error!(error = %e, "failed to start unique request counter");
                Err(rocket)
            }
        }
    })
}

fn init_state(
    figment: &Figment,
) -> Result<(CounterConfig, Arc<UniqueCounter>, ForwardClient, FlushLoop)> {
    let config = CounterConfig::from_figment(figment)?;
    let sink = WriterSink::open_log_file(&config.unique_log_path)?;
    let forward_client = ForwardClient::new(config.forward_timeout())?;

    let counter = Arc::new(UniqueCounter::new());
    let flush_loop = FlushLoop::spawn(counter.clone(), Box::new(sink), config.flush_interval());

    Ok((config, counter, forward_client, flush_loop))
}
