#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod bridge;
mod catalog;
mod config;
mod fleet_control;
mod geo;
mod logger;
mod menu;
mod sim_link;

use crate::catalog::FormationCatalog;
use crate::config::FleetConfig;
use crate::fleet_control::{FleetSession, LinkStatus};
use crate::sim_link::{DEFAULT_LINK_ADDR, SimLink};
use std::{env, path::PathBuf};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

const DEFAULT_CONFIG_PATH: &str = "aifleet.toml";

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let config_path =
        env::var("FLEET_CONFIG").map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = FleetConfig::load(&config_path).unwrap_or_else(|e| {
        error!("Reading {} failed: {e}, continuing with defaults", config_path.display());
        FleetConfig::default()
    });
    let catalog = FormationCatalog::load(config.formations());

    let link_addr_var = env::var("FLEET_LINK_ADDR");
    let link_addr = link_addr_var.as_ref().map_or(DEFAULT_LINK_ADDR, |v| v.as_str());
    let (link, mut events) = match SimLink::start(link_addr).await {
        Ok(started) => started,
        Err(e) => fatal!("Cannot listen on {link_addr}: {e}"),
    };

    let (status_tx, status_rx) = watch::channel(LinkStatus::NotConnected);
    let cancel = CancellationToken::new();
    tokio::spawn(report_status(status_rx));
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupted, shutting down");
                ctrl_c_cancel.cancel();
            }
            Err(e) => warn!("Cannot listen for Ctrl-C: {e}"),
        }
    });

    let mut session = FleetSession::new(link, catalog, config.base().clone(), status_tx);
    session.run(&mut events, cancel).await;
    info!("Fleet coordinator stopped");
}

async fn report_status(mut status: watch::Receiver<LinkStatus>) {
    while status.changed().await.is_ok() {
        match &*status.borrow_and_update() {
            LinkStatus::Connected(app) => info!("Connected to {app}"),
            LinkStatus::Disconnected => warn!("Simulator disconnected"),
            LinkStatus::NotConnected => log!("Simulator not connected"),
        }
    }
}
