// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors
// ABOUTME: Re-exports helper modules for dispatch-admin
// ABOUTME: Provides display formatting utilities

pub mod display;
