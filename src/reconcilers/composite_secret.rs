// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CompositeSecret reconciler - renders the template and keeps the generated
//! secret in sync with it.

use crate::compose::{apply_labels, build_replacements, desired_secret, render_template};
use crate::config::Config;
use crate::constants::requeue;
use crate::error::{PatchworkError, Result};
use crate::types::CompositeSecret;
use futures::StreamExt;
use k8s_openapi::api::core::v1::Secret;
use kube::{
    api::{Patch, PatchParams, PostParams},
    runtime::{controller::Action, Controller},
    Api, Client, ResourceExt,
};
use kube_runtime::watcher::Config as WatcherConfig;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub struct CompositeSecretReconciler {
    client: Client,
    config: Config,
}

impl CompositeSecretReconciler {
    pub fn new(client: Client, config: Config) -> Self {
        Self { client, config }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let composites: Api<CompositeSecret> = match self.config.watch_namespace.as_deref() {
            Some(namespace) => Api::namespaced(self.client.clone(), namespace),
            None => Api::all(self.client.clone()),
        };
        let secrets: Api<Secret> = match self.config.watch_namespace.as_deref() {
            Some(namespace) => Api::namespaced(self.client.clone(), namespace),
            None => Api::all(self.client.clone()),
        };
        let context = Arc::new(self);

        Controller::new(composites, WatcherConfig::default())
            .owns(secrets, WatcherConfig::default())
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled composite secret: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        Ok(())
    }
}

async fn reconcile(
    composite: Arc<CompositeSecret>,
    ctx: Arc<CompositeSecretReconciler>,
) -> Result<Action> {
    let name = composite.name_any();
    let namespace = composite.namespace().unwrap_or_default();

    debug!("Reconciling composite secret: {}/{}", namespace, name);

    let composites: Api<CompositeSecret> = Api::namespaced(ctx.client.clone(), &namespace);

    // Re-read the object; the watcher snapshot may trail a deletion
    let Some(composite) = composites.get_opt(&name).await? else {
        debug!(
            "Composite secret {}/{} is gone, nothing to do",
            namespace, name
        );
        return Ok(Action::await_change());
    };

    // Resolve all replacement values and render the template
    let replacements = build_replacements(&ctx.client, &composite.spec.replacements).await?;
    let data = render_template(&composite.spec.template, &replacements);

    // Check if the secret already exists, if not create a new secret
    let secrets: Api<Secret> = Api::namespaced(ctx.client.clone(), &namespace);
    let Some(mut found) = secrets.get_opt(&name).await? else {
        info!("Creating secret {}/{}", namespace, name);
        let secret = desired_secret(&composite, data);
        secrets.create(&PostParams::default(), &secret).await?;
        return Ok(Action::requeue(Duration::from_secs(
            requeue::AFTER_WRITE_SECS,
        )));
    };

    // Ensure the secret data matches the rendered template
    if found.data.clone().unwrap_or_default() != data {
        info!("Secret {}/{} data drifted, updating", namespace, name);
        found.data = Some(data);
        secrets
            .replace(&name, &PostParams::default(), &found)
            .await?;
        return Ok(Action::requeue(Duration::from_secs(
            requeue::AFTER_WRITE_SECS,
        )));
    }

    // Ensure our labels are synced
    let labels = apply_labels(composite.metadata.labels.as_ref());
    if found.metadata.labels.clone().unwrap_or_default() != labels {
        info!("Secret {}/{} labels drifted, updating", namespace, name);
        found.metadata.labels = Some(labels);
        secrets
            .replace(&name, &PostParams::default(), &found)
            .await?;
        return Ok(Action::requeue(Duration::from_secs(
            requeue::AFTER_WRITE_SECS,
        )));
    }

    mark_synced(&composites, &composite).await?;

    Ok(Action::await_change())
}

/// Record convergence on the status subresource, once
async fn mark_synced(composites: &Api<CompositeSecret>, composite: &CompositeSecret) -> Result<()> {
    if composite.is_synced() {
        return Ok(());
    }

    let status = Patch::Merge(json!({"status": {"synced": true}}));
    composites
        .patch_status(&composite.name_any(), &PatchParams::default(), &status)
        .await?;

    Ok(())
}

fn error_policy(
    composite: Arc<CompositeSecret>,
    error: &PatchworkError,
    _ctx: Arc<CompositeSecretReconciler>,
) -> Action {
    error!(
        "Reconciliation error for {}/{}: {}",
        composite.namespace().unwrap_or_default(),
        composite.name_any(),
        error
    );
    Action::requeue(Duration::from_secs(requeue::ON_ERROR_SECS))
}
