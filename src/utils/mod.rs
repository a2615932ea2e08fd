// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! Shared utilities

pub mod math;
