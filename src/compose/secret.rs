// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Construction of the generated secret.

use crate::constants::labels;
use crate::types::CompositeSecret;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::api::ObjectMeta;
use kube::Resource;
use std::collections::BTreeMap;

/// Merge operator-identity labels over the user-supplied labels.
/// Operator labels win on conflict.
pub fn apply_labels(user_labels: Option<&BTreeMap<String, String>>) -> BTreeMap<String, String> {
    let mut merged = user_labels.cloned().unwrap_or_default();
    merged.insert(
        labels::MANAGED_BY.to_string(),
        labels::MANAGED_BY_VALUE.to_string(),
    );
    merged
}

/// Build the secret a CompositeSecret should generate.
///
/// The secret mirrors its owner's name and namespace and carries an owner
/// reference so it is garbage collected together with the CompositeSecret.
pub fn desired_secret(composite: &CompositeSecret, data: BTreeMap<String, ByteString>) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: composite.metadata.name.clone(),
            namespace: composite.metadata.namespace.clone(),
            labels: Some(apply_labels(composite.metadata.labels.as_ref())),
            owner_references: composite
                .controller_owner_ref(&())
                .map(|reference| vec![reference]),
            ..Default::default()
        },
        immutable: composite.spec.template.immutable,
        type_: composite.spec.template.type_.clone(),
        data: Some(data),
        ..Default::default()
    }
}
