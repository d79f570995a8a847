// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # tensor-engine
//!
//! Minimal dense n-dimensional `f64` arrays with trailing-axis
//! broadcasting and in-band error state.
//!
//! This crate provides:
//! - [`Tensor`] — a flat row-major buffer with shape/stride metadata,
//!   shared behind a cheap clonable handle with an exclusive/shared lock
//!   pair.
//! - Construction helpers: [`Tensor::create`], [`Tensor::fill`],
//!   [`Tensor::arange`], plus [`Tensor::reshape`] and [`Tensor::copy`].
//! - A broadcasting arithmetic engine: five binary elementwise operators
//!   (`add`, `subtract`, `multiply`, `divide`, `power`) and their scalar
//!   counterparts, each running one parallel worker per broadcast tile and
//!   joining them before returning.
//! - Nested-bracket rendering via `Display`.
//!
//! # Design Goals
//! - Failures are data: a sticky [`TensorError`] rides on the tensor and
//!   later operations pass the errored handle through, so fluent chains
//!   never panic or unwind.
//! - Mutation in place: arithmetic never allocates a result tensor on the
//!   success path.
//! - Coarse locking: one exclusive lock per tensor around each whole
//!   operation; broadcast workers write disjoint tiles and need nothing
//!   finer.

mod error;
mod fmt;
mod ops;
mod shape;
mod tensor;

pub use error::TensorError;
pub use shape::Shape;
pub use tensor::Tensor;
