// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! Geometry module - point sampling and orientation math

pub mod orient;
pub mod sampler;
