// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Nested-bracket textual rendering.
//!
//! The renderer walks the flat buffer in innermost-row chunks, opening and
//! closing a bracket for every stride boundary the row offset lands on,
//! and indenting continuation lines by the nesting depth. Read-only: it
//! takes the shared lock and never touches shape, strides or data.

use std::fmt;

use crate::tensor::read;
use crate::Tensor;

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(cell) = &self.inner else {
            return f.write_str("<nil>");
        };
        let inner = read(cell);

        let rank = inner.shape.rank();
        let row = *inner.shape.dims().last().unwrap();
        // Axis strides only: the trailing 1 never opens a bracket and the
        // innermost row prints its own pair.
        let bounds = &inner.strides[..inner.strides.len() - 2];

        let mut i = 0;
        while i + row <= inner.data.len() {
            let open = bounds.iter().filter(|&&s| i % s == 0).count();
            write!(f, "{}{}", " ".repeat(rank - open - 1), "[".repeat(open))?;

            f.write_str("[")?;
            for (k, v) in inner.data[i..i + row].iter().enumerate() {
                if k > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{v}")?;
            }
            f.write_str("]")?;

            let close = bounds.iter().filter(|&&s| (i + row) % s == 0).count();
            write!(f, "{}{}", "]".repeat(close), " ".repeat(rank - close - 1))?;

            i += row;
            if i != inner.data.len() {
                f.write_str("\n")?;
                if close > 0 {
                    f.write_str("\n")?;
                }
            }
        }
        Ok(())
    }
}
