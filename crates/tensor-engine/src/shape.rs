// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Tensor shape descriptors and stride computation.

use std::fmt;

/// Describes the dimensionality of a [`crate::Tensor`].
///
/// Extents are ordered outer-to-inner and every extent is strictly
/// positive; a shape is never empty. Shapes are immutable once created and
/// provide the stride table and the broadcast-compatibility check used by
/// the arithmetic engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Creates a shape from the given extents.
    ///
    /// Returns `None` if the extent list is empty or any extent is zero.
    ///
    /// # Examples
    /// ```
    /// use tensor_engine::Shape;
    /// let s = Shape::new(vec![2, 3, 4]).unwrap();
    /// assert_eq!(s.rank(), 3);
    /// assert_eq!(s.elem_count(), 24);
    /// assert!(Shape::new(vec![2, 0]).is_none());
    /// ```
    pub fn new(dims: Vec<usize>) -> Option<Self> {
        if dims.is_empty() || dims.contains(&0) {
            return None;
        }
        Some(Self { dims })
    }

    /// Returns the number of axes (rank).
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Returns the total number of elements.
    pub fn elem_count(&self) -> usize {
        self.dims.iter().product()
    }

    /// Returns the extents as a slice, outer-to-inner.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Computes the row-major stride table for this shape.
    ///
    /// The table has `rank + 1` entries, built right-to-left:
    /// `strides[i]` is the product of the extents from axis `i` onward, so
    /// the last entry is always 1 (innermost axis, fastest-varying) and
    /// `strides[0]` is the total element count — a sentinel used by the
    /// renderer, not a true stride.
    ///
    /// # Examples
    /// ```
    /// use tensor_engine::Shape;
    /// let s = Shape::new(vec![2, 3, 4]).unwrap();
    /// assert_eq!(s.strides(), vec![24, 12, 4, 1]);
    /// ```
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1usize; self.dims.len() + 1];
        for i in (0..self.dims.len()).rev() {
            strides[i] = strides[i + 1] * self.dims[i];
        }
        strides
    }

    /// Returns `true` if `operand` can be tiled across a tensor of this
    /// shape.
    ///
    /// The rule is restricted trailing-axis alignment: the operand must not
    /// have more axes than the receiver, and walking both shapes from the
    /// last axis backward, every aligned pair of extents must be equal.
    /// There is no NumPy-style stretching of 1-extents.
    pub fn can_broadcast(&self, operand: &Shape) -> bool {
        if operand.rank() > self.rank() {
            return false;
        }
        self.dims
            .iter()
            .rev()
            .zip(operand.dims.iter().rev())
            .all(|(a, b)| a == b)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}
