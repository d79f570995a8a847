// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Binary elementwise operators with trailing-axis broadcasting.
//!
//! Each operator mutates the receiver in place and returns the same handle
//! (or a fresh error-tagged tensor when the receiver is absent), so calls
//! chain fluently. See the module docs on [`super`] for the shared
//! protocol.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::{Tensor, TensorError};

impl Tensor {
    /// Elementwise addition with broadcasting. Mutates and returns the
    /// receiver.
    ///
    /// # Examples
    /// ```
    /// use tensor_engine::Tensor;
    /// let t = Tensor::fill(1.0, &[2, 3]).add(&Tensor::arange(&[3.0]));
    /// assert_eq!(t.to_vec().unwrap(), vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
    /// ```
    pub fn add(&self, other: &Tensor) -> Tensor {
        self.broadcast_apply(
            other,
            "add",
            |chunk, src| {
                for (x, &v) in chunk.iter_mut().zip(src) {
                    *x += v;
                }
            },
            |_| {},
        )
    }

    /// Elementwise subtraction with broadcasting. Mutates and returns the
    /// receiver.
    pub fn subtract(&self, other: &Tensor) -> Tensor {
        self.broadcast_apply(
            other,
            "subtract",
            |chunk, src| {
                for (x, &v) in chunk.iter_mut().zip(src) {
                    *x -= v;
                }
            },
            |_| {},
        )
    }

    /// Elementwise multiplication with broadcasting. Mutates and returns
    /// the receiver.
    pub fn multiply(&self, other: &Tensor) -> Tensor {
        self.broadcast_apply(
            other,
            "multiply",
            |chunk, src| {
                for (x, &v) in chunk.iter_mut().zip(src) {
                    *x *= v;
                }
            },
            |_| {},
        )
    }

    /// Elementwise division with broadcasting. Mutates and returns the
    /// receiver.
    ///
    /// A zero divisor writes `NaN` into that element and tags the receiver
    /// [`TensorError::DivisionByZero`]; the remaining elements are still
    /// processed, and later zero divisors never overwrite an error already
    /// in the slot.
    pub fn divide(&self, other: &Tensor) -> Tensor {
        let hit_zero = AtomicBool::new(false);
        self.broadcast_apply(
            other,
            "divide",
            |chunk, src| {
                for (x, &v) in chunk.iter_mut().zip(src) {
                    if v == 0.0 {
                        *x = f64::NAN;
                        hit_zero.store(true, Ordering::Relaxed);
                    } else {
                        *x /= v;
                    }
                }
            },
            |inner| {
                if hit_zero.load(Ordering::Relaxed) && inner.err.is_none() {
                    inner.set_error(TensorError::DivisionByZero, || {
                        "division by zero encountered in divide()".to_string()
                    });
                }
            },
        )
    }

    /// Raises each element of the receiver to the corresponding power in
    /// `other`, with broadcasting. Mutates and returns the receiver.
    ///
    /// Standard real exponentiation with no domain validation: a negative
    /// base with a fractional exponent yields `NaN`, not an engine error.
    pub fn power(&self, other: &Tensor) -> Tensor {
        self.broadcast_apply(
            other,
            "power",
            |chunk, src| {
                for (x, &v) in chunk.iter_mut().zip(src) {
                    *x = x.powf(v);
                }
            },
            |_| {},
        )
    }
}
