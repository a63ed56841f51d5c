// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::{info, warn};

use patchwork::config::Config;
use patchwork::kubernetes::wait_for_composite_secret_crd;
use patchwork::reconcilers::CompositeSecretReconciler;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Patchwork operator");

    // Load configuration
    let config = Config::from_env()?;
    match &config.watch_namespace {
        Some(namespace) => info!("Configuration loaded: watching namespace {}", namespace),
        None => info!("Configuration loaded: watching all namespaces"),
    }

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    // Wait for the CompositeSecret CRD before starting the reconciler
    info!("Waiting for CompositeSecret CRD to become available...");
    wait_for_composite_secret_crd(&client).await?;

    info!("Starting reconciler...");
    let reconciler = CompositeSecretReconciler::new(client, config);
    reconciler.run().await?;

    // This should never be reached as the reconciler runs forever
    warn!("Reconciler stopped unexpectedly");
    Ok(())
}
