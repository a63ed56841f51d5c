// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Replacement value resolution from ConfigMaps and Secrets.

use crate::error::{PatchworkError, Result};
use crate::types::{ObjectRef, Replacement, ReplacementSource};
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use kube::{Api, Client};
use std::collections::BTreeMap;
use tracing::instrument;

/// Resolve every declared replacement into its placeholder value.
///
/// Declarations without a source contribute nothing. The first ambiguous
/// declaration or resolution failure aborts the whole build.
pub async fn build_replacements(
    client: &Client,
    declarations: &BTreeMap<String, Replacement>,
) -> Result<BTreeMap<String, String>> {
    let mut replacements = BTreeMap::new();

    for (placeholder, declaration) in declarations {
        let Some(source) = declaration.source()? else {
            continue;
        };
        let value = resolve(client, &source).await?;
        replacements.insert(placeholder.clone(), value);
    }

    Ok(replacements)
}

/// Resolve a single replacement source to its string value
pub async fn resolve(client: &Client, source: &ReplacementSource<'_>) -> Result<String> {
    match source {
        ReplacementSource::ConfigMap(reference) => config_map_value(client, reference).await,
        ReplacementSource::Secret(reference) => secret_value(client, reference).await,
    }
}

/// Look up the referenced key in a ConfigMap
#[instrument(skip(client))]
async fn config_map_value(client: &Client, reference: &ObjectRef) -> Result<String> {
    let config_maps: Api<ConfigMap> = Api::namespaced(client.clone(), &reference.namespace);
    let config_map = config_maps.get(&reference.name).await?;

    config_map
        .data
        .as_ref()
        .and_then(|data| data.get(&reference.key))
        .cloned()
        .ok_or_else(|| key_not_found(reference))
}

/// Look up the referenced key in a Secret and decode it to a string
#[instrument(skip(client))]
async fn secret_value(client: &Client, reference: &ObjectRef) -> Result<String> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), &reference.namespace);
    let secret = secrets
        .get(&reference.name)
        .await
        .map_err(PatchworkError::SecretFetch)?;

    let value = secret
        .data
        .as_ref()
        .and_then(|data| data.get(&reference.key))
        .ok_or_else(|| key_not_found(reference))?;

    String::from_utf8(value.0.clone()).map_err(|_| PatchworkError::ValueNotUtf8 {
        key: reference.key.clone(),
        namespace: reference.namespace.clone(),
        name: reference.name.clone(),
    })
}

fn key_not_found(reference: &ObjectRef) -> PatchworkError {
    PatchworkError::KeyNotFound {
        key: reference.key.clone(),
        namespace: reference.namespace.clone(),
        name: reference.name.clone(),
    }
}
