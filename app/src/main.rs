mod config;
mod controller;
mod error;
mod logging;
mod models;
mod rest;

use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
pub async fn main() {
    logging::init();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "Invalid configuration");
            std::process::exit(1);
        }
    };
    let store = match models::establish_db_connection(&config).await {
        Ok(store) => store,
        Err(err) => {
            error!(%err, "Couldn't open document store");
            std::process::exit(1);
        }
    };

    let controller = controller::Controller::new(Arc::new(store));
    if let Err(err) = rest::dispatch_server(&config, controller.clone()).await {
        error!(%err, "Webserver failed");
    }

    controller.store().close().await;
    info!("Shutdown complete");
}
