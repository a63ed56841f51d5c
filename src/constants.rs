// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Kubernetes labels applied to generated secrets
pub mod labels {
    /// Marks a secret as managed by this operator
    pub const MANAGED_BY: &str = "patchwork.geeko.me/managed-by";
    /// Value of the managed-by label
    pub const MANAGED_BY_VALUE: &str = "patchwork";
}

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}

/// Requeue intervals for the reconciler
pub mod requeue {
    /// Delay before re-validating a freshly created or updated secret
    pub const AFTER_WRITE_SECS: u64 = 1;
    /// Delay before retrying a failed reconciliation
    pub const ON_ERROR_SECS: u64 = 60;
}
