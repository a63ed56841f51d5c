// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolution and rendering of composite secret templates.

pub mod render;
pub mod resolve;
pub mod secret;

pub use render::render_template;
pub use resolve::{build_replacements, resolve};
pub use secret::{apply_labels, desired_secret};
