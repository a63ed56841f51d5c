// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{PatchworkError, Result};

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(group = "patchwork.geeko.me", version = "v1", kind = "CompositeSecret")]
#[kube(namespaced)]
#[kube(status = "CompositeSecretStatus")]
#[serde(rename_all = "camelCase")]
pub struct CompositeSecretSpec {
    /// Placeholder strings mapped to the source of their replacement value
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub replacements: BTreeMap<String, Replacement>,
    /// Template for the generated secret
    #[serde(default)]
    pub template: SecretTemplate,
}

impl CompositeSecret {
    /// Check whether the generated secret was in sync at the last converged pass
    pub fn is_synced(&self) -> bool {
        self.status.as_ref().is_some_and(|status| status.synced)
    }
}

/// Source of a single replacement value.
///
/// Exactly one of the references may be set; declaring both is rejected when
/// the source is selected, and declaring neither makes the declaration a
/// no-op.
#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Replacement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_ref: Option<ObjectRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<ObjectRef>,
}

/// The active source of a replacement, selected and validated from its declaration
#[derive(Debug, Clone, PartialEq)]
pub enum ReplacementSource<'a> {
    ConfigMap(&'a ObjectRef),
    Secret(&'a ObjectRef),
}

impl Replacement {
    /// Select the active source of this replacement
    pub fn source(&self) -> Result<Option<ReplacementSource<'_>>> {
        match (self.config_map_ref.as_ref(), self.secret_ref.as_ref()) {
            (Some(_), Some(_)) => Err(PatchworkError::AmbiguousReplacement),
            (Some(reference), None) => Ok(Some(ReplacementSource::ConfigMap(reference))),
            (None, Some(reference)) => Ok(Some(ReplacementSource::Secret(reference))),
            (None, None) => Ok(None),
        }
    }
}

/// Reference to a single key of a ConfigMap or Secret
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRef {
    pub name: String,
    pub namespace: String,
    pub key: String,
}

/// Template for the generated secret. Values in `stringData` may contain
/// placeholder strings which are replaced with resolved values on render.
#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SecretTemplate {
    /// Marks the generated secret as immutable; unset leaves it mutable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immutable: Option<bool>,
    /// Secret values in string form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_data: Option<BTreeMap<String, String>>,
    /// Secret type tag, passed through to the generated secret
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompositeSecretStatus {
    /// Whether the generated secret matched the rendered template at the
    /// last converged reconciliation
    #[serde(default)]
    pub synced: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::api::ObjectMeta;

    fn make_reference(name: &str) -> ObjectRef {
        ObjectRef {
            name: name.to_string(),
            namespace: "default".to_string(),
            key: "value".to_string(),
        }
    }

    fn make_composite(status: Option<CompositeSecretStatus>) -> CompositeSecret {
        CompositeSecret {
            metadata: ObjectMeta {
                name: Some("test".to_string()),
                namespace: Some("default".to_string()),
                ..Default::default()
            },
            spec: CompositeSecretSpec {
                replacements: BTreeMap::new(),
                template: SecretTemplate::default(),
            },
            status,
        }
    }

    #[test]
    fn test_source_config_map_only() {
        let replacement = Replacement {
            config_map_ref: Some(make_reference("cm1")),
            secret_ref: None,
        };

        let source = replacement.source().unwrap();
        assert_eq!(
            source,
            Some(ReplacementSource::ConfigMap(&make_reference("cm1")))
        );
    }

    #[test]
    fn test_source_secret_only() {
        let replacement = Replacement {
            config_map_ref: None,
            secret_ref: Some(make_reference("s1")),
        };

        let source = replacement.source().unwrap();
        assert_eq!(source, Some(ReplacementSource::Secret(&make_reference("s1"))));
    }

    #[test]
    fn test_source_neither_is_noop() {
        let replacement = Replacement::default();
        assert_eq!(replacement.source().unwrap(), None);
    }

    #[test]
    fn test_source_both_is_rejected() {
        let replacement = Replacement {
            config_map_ref: Some(make_reference("cm1")),
            secret_ref: Some(make_reference("s1")),
        };

        let err = replacement.source().unwrap_err();
        assert_eq!(
            err.to_string(),
            "replacement cannot specify both configmap and secret"
        );
    }

    #[test]
    fn test_spec_deserializes_camel_case() {
        let json = r#"{
            "replacements": {
                "${HOST}": {"configMapRef": {"name": "cm1", "namespace": "ns", "key": "host"}},
                "${PASS}": {"secretRef": {"name": "s1", "namespace": "ns", "key": "password"}}
            },
            "template": {
                "stringData": {"url": "http://${HOST}/"},
                "type": "Opaque",
                "immutable": true
            }
        }"#;

        let spec: CompositeSecretSpec = serde_json::from_str(json).unwrap();

        let host = &spec.replacements["${HOST}"];
        assert_eq!(host.config_map_ref.as_ref().unwrap().key, "host");
        assert!(host.secret_ref.is_none());

        let pass = &spec.replacements["${PASS}"];
        assert_eq!(pass.secret_ref.as_ref().unwrap().name, "s1");

        let string_data = spec.template.string_data.unwrap();
        assert_eq!(string_data["url"], "http://${HOST}/");
        assert_eq!(spec.template.type_.as_deref(), Some("Opaque"));
        assert_eq!(spec.template.immutable, Some(true));
    }

    #[test]
    fn test_spec_defaults_when_empty() {
        let spec: CompositeSecretSpec = serde_json::from_str("{}").unwrap();

        assert!(spec.replacements.is_empty());
        assert!(spec.template.string_data.is_none());
        assert!(spec.template.immutable.is_none());
        assert!(spec.template.type_.is_none());
    }

    #[test]
    fn test_is_synced_with_synced_status() {
        let composite = make_composite(Some(CompositeSecretStatus { synced: true }));
        assert!(composite.is_synced());
    }

    #[test]
    fn test_is_synced_with_unsynced_status() {
        let composite = make_composite(Some(CompositeSecretStatus { synced: false }));
        assert!(!composite.is_synced());
    }

    #[test]
    fn test_is_synced_with_no_status() {
        let composite = make_composite(None);
        assert!(!composite.is_synced());
    }
}
