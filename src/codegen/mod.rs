// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! Code generation module - builder-chain source emission

mod emitter;
mod format;

pub use emitter::{emit, EndMode};
pub use format::{collapse_blank_lines, fmt_num, fmt_vec3};
