// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Scalar counterparts of the binary operators.
//!
//! Same short-circuit protocol, no tiling and no shape check; the write
//! happens in one pass under the receiver's exclusive lock.

use crate::{Tensor, TensorError};

impl Tensor {
    /// Adds `value` to every element. Mutates and returns the receiver.
    pub fn add_scalar(&self, value: f64) -> Tensor {
        self.scalar_apply("add_scalar", |inner| {
            for x in inner.data.iter_mut() {
                *x += value;
            }
        })
    }

    /// Subtracts `value` from every element. Mutates and returns the
    /// receiver.
    pub fn subtract_scalar(&self, value: f64) -> Tensor {
        self.scalar_apply("subtract_scalar", |inner| {
            for x in inner.data.iter_mut() {
                *x -= value;
            }
        })
    }

    /// Multiplies every element by `value`. Mutates and returns the
    /// receiver.
    pub fn multiply_scalar(&self, value: f64) -> Tensor {
        self.scalar_apply("multiply_scalar", |inner| {
            for x in inner.data.iter_mut() {
                *x *= value;
            }
        })
    }

    /// Divides every element by `value`. Mutates and returns the receiver.
    ///
    /// A zero divisor turns every element into `NaN` and tags the receiver
    /// [`TensorError::DivisionByZero`].
    pub fn divide_scalar(&self, value: f64) -> Tensor {
        self.scalar_apply("divide_scalar", |inner| {
            if value == 0.0 {
                inner.set_error(TensorError::DivisionByZero, || {
                    "division by zero encountered in divide_scalar()".to_string()
                });
                for x in inner.data.iter_mut() {
                    *x = f64::NAN;
                }
            } else {
                for x in inner.data.iter_mut() {
                    *x /= value;
                }
            }
        })
    }

    /// Raises every element to the power `value`. Mutates and returns the
    /// receiver. No domain validation, as with [`Tensor::power`].
    pub fn power_scalar(&self, value: f64) -> Tensor {
        self.scalar_apply("power_scalar", |inner| {
            for x in inner.data.iter_mut() {
                *x = x.powf(value);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_scalar() {
        let t = Tensor::create(&[2, 2]).add_scalar(1.5);
        assert_eq!(t.to_vec().unwrap(), vec![1.5; 4]);
    }

    #[test]
    fn test_subtract_scalar() {
        let t = Tensor::fill(5.0, &[3]).subtract_scalar(2.0);
        assert_eq!(t.to_vec().unwrap(), vec![3.0; 3]);
    }

    #[test]
    fn test_multiply_scalar() {
        let t = Tensor::arange(&[3.0]).multiply_scalar(4.0);
        assert_eq!(t.to_vec().unwrap(), vec![0.0, 4.0, 8.0]);
    }

    #[test]
    fn test_divide_scalar() {
        let t = Tensor::fill(9.0, &[3]).divide_scalar(3.0);
        assert_eq!(t.error(), None);
        assert_eq!(t.to_vec().unwrap(), vec![3.0; 3]);
    }

    #[test]
    fn test_divide_scalar_by_zero() {
        let t = Tensor::fill(9.0, &[3]).divide_scalar(0.0);
        assert_eq!(t.error(), Some(TensorError::DivisionByZero));
        assert!(t.to_vec().unwrap().iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_power_scalar_cubes() {
        let t = Tensor::fill(2.0, &[3]).power_scalar(3.0);
        assert_eq!(t.to_vec().unwrap(), vec![8.0; 3]);
    }

    #[test]
    fn test_absent_receiver_promoted() {
        let t = Tensor::absent().multiply_scalar(10.0);
        assert!(!t.is_absent());
        assert_eq!(t.error(), Some(TensorError::NilReference));
    }

    #[test]
    fn test_errored_receiver_untouched() {
        let t = Tensor::fill(1.0, &[2]).divide_scalar(0.0);
        t.add_scalar(5.0);
        // Still NaN: the scalar add was a pass-through.
        assert!(t.to_vec().unwrap().iter().all(|x| x.is_nan()));
        assert_eq!(t.error(), Some(TensorError::DivisionByZero));
    }
}
