// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resource types for the Patchwork operator.

pub mod composite_secret;

pub use composite_secret::{
    CompositeSecret, CompositeSecretSpec, CompositeSecretStatus, ObjectRef, Replacement,
    ReplacementSource, SecretTemplate,
};
