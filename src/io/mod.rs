// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Pointframe Inc.

//! I/O module - persisted tree loading and normalization

mod document;

pub use document::Document;
