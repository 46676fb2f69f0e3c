//! # mauria-app
//!
//! Integration layer tying the store, the bootstrap synchronizer and the
//! planning derivations together.  [`mount`] is the single entry point the
//! hosting shell calls before rendering anything: it opens the store, marks
//! the launch in the audit log, runs the handshake to settlement, and hands
//! back the [`AppState`] the pages read from.

pub mod config;
pub mod state;

use tracing_subscriber::EnvFilter;

use mauria_store::Store;
use mauria_sync::{announce_beta, run_bootstrap, HostLink};

pub use config::AppConfig;
pub use state::AppState;

/// Initialize tracing (respects `RUST_LOG`).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,mauria_app=debug,mauria_sync=debug")),
        )
        .init();
}

/// Bring the app up to the point where rendering may start.
///
/// Rendering stays suspended (the shell shows a loading indicator) until this
/// returns, which the bootstrap synchronizer bounds to its global timeout.
/// The app always becomes interactive, even with zero remote data.
pub async fn mount(config: &AppConfig, link: &mut HostLink) -> anyhow::Result<AppState> {
    let mut store = match &config.data_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            Store::open_at(&dir.join("mauria.db"))?
        }
        None => Store::open()?,
    };

    store.append_launch_marker();
    if store.first_launch() {
        tracing::info!("first launch on this device");
        store.mark_launched();
    }

    let outcome = run_bootstrap(&mut store, link, config.bootstrap.clone()).await;

    if config.beta {
        announce_beta(&link.to_host, &config.preprod_url).await;
    }

    Ok(AppState {
        store,
        bootstrap: outcome,
    })
}
