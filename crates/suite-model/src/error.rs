// Copyright (c) 2025 Suite Partitioner Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for suite manifest loading and descriptor validation.

/// Errors that can occur when working with suite representations.
#[derive(Debug, thiserror::Error)]
pub enum SuiteError {
    /// The suite manifest file could not be read.
    #[error("failed to read manifest: {0}")]
    ManifestReadError(#[from] std::io::Error),

    /// The manifest JSON is malformed.
    #[error("failed to parse manifest: {0}")]
    ManifestParseError(#[from] serde_json::Error),

    /// A test descriptor is invalid (e.g., out-of-range flakiness score).
    #[error("invalid test '{path}': {detail}")]
    InvalidDescriptor { path: String, detail: String },

    /// Two descriptors share the same path.
    #[error("duplicate test path: {0}")]
    DuplicatePath(String),
}
