// ABOUTME: Backend payload normalization into canonical records
// ABOUTME: Currently the driver transform shared by the driver client and CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

/// Driver record normalization
pub mod driver;

pub use driver::{transform_driver_data, transform_driver_list};
