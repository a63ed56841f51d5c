// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatchworkError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("unable to get secret: {0}")]
    SecretFetch(#[source] kube::Error),

    #[error("replacement cannot specify both configmap and secret")]
    AmbiguousReplacement,

    #[error("no key '{key}' found in {namespace}/{name}")]
    KeyNotFound {
        key: String,
        namespace: String,
        name: String,
    },

    #[error("value for key '{key}' in {namespace}/{name} is not valid UTF-8")]
    ValueNotUtf8 {
        key: String,
        namespace: String,
        name: String,
    },
}

pub type Result<T> = std::result::Result<T, PatchworkError>;
