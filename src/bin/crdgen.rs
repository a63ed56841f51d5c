// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Prints the CompositeSecret CRD as YAML.
//!
//! ```bash
//! cargo run --bin crdgen | kubectl apply -f -
//! ```

use kube::CustomResourceExt;
use patchwork::types::CompositeSecret;

fn main() -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(&CompositeSecret::crd())?);
    Ok(())
}
