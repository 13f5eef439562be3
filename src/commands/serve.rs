//! Deploy trigger HTTP service

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use dbt_ops::api::ServiceState;
use dbt_ops::config::Settings;
use dbt_ops::deploy::{DeployJob, DeployWorker, ProcessLauncher, StatusCell};
use dbt_ops::server::tiny_http as http_server;

/// Start the service and block serving requests
pub fn serve(port: u16, root: &Path) -> anyhow::Result<()> {
    let deploy = Settings::load(root)?.deploy;
    let spec = deploy.launch_spec();
    log::debug!("deployment command: {} (timeout {:?})", spec.command_line(), spec.timeout);

    let job = DeployJob::new(Arc::new(ProcessLauncher), spec, StatusCell::new());
    let worker = DeployWorker::spawn(job).context("Failed to start deploy worker")?;
    let state = ServiceState {
        service_name: deploy.service_name,
        worker,
    };

    let server = http_server::bind(port)?;
    log::info!("{} listening on 0.0.0.0:{port}", state.service_name);
    println!("Serving {} on http://0.0.0.0:{port}", state.service_name);
    println!("Press Ctrl+C to stop");

    http_server::serve(&server, &state);
    Ok(())
}
