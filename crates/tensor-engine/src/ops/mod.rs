// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The broadcast arithmetic engine.
//!
//! Every operator — binary or scalar — follows one protocol:
//!
//! 1. Absence/error short-circuit: an absent receiver yields a fresh
//!    error-tagged tensor; a sticky error passes the receiver through; an
//!    absent or errored operand tags the receiver and returns it.
//! 2. Shape compatibility (binary only): restricted trailing-axis
//!    broadcast, see [`Shape::can_broadcast`](crate::Shape::can_broadcast).
//! 3. Parallel elementwise application: the operand is tiled `mul` times
//!    across the receiver; one worker per tile writes a disjoint chunk of
//!    the receiver's buffer, and the scope exit is the rendezvous barrier —
//!    no partial result is ever observable by the caller.
//! 4. Scalar forms skip tiling and the shape check but still hold the
//!    exclusive lock for the duration of the write.
//!
//! The receiver's exclusive lock is held across the whole call, fan-out
//! included, serializing whole operations against each other and against
//! renders. The operand is snapshotted under its shared lock, released
//! before the receiver is locked, so no call ever holds two tensor locks
//! at once. Workers need no synchronization among themselves: their
//! chunks are disjoint and the snapshot is only read.

mod binary;
mod scalar;

use std::sync::Arc;
use std::thread;

use crate::tensor::{read, write, Tensor, TensorData};
use crate::TensorError;

/// Builds the fresh error-tagged tensor returned when an operation is
/// invoked on an absent receiver. One placeholder element keeps the
/// shape/stride/data invariants intact while the error slot carries the
/// actual payload.
fn nil_receiver(op: &'static str) -> Tensor {
    let t = Tensor::create(&[1]);
    if let Some(cell) = &t.inner {
        write(cell).set_error(TensorError::NilReference, || {
            format!("nil tensor received by {op}()")
        });
    }
    t
}

impl Tensor {
    /// Shared protocol for the five binary operators.
    ///
    /// `tile` is applied once per broadcast tile, concurrently, to a
    /// disjoint mutable chunk of the receiver and the shared operand
    /// snapshot. `finish` runs after the join, still under the receiver's
    /// exclusive lock — divide uses it to tag the division-by-zero error
    /// before any other operation can observe the tensor.
    ///
    /// Lock discipline: the operand is snapshotted under its shared lock,
    /// which is released before the receiver's exclusive lock is taken.
    /// No call ever holds two tensor locks at once, so opposite-direction
    /// operations on the same pair of tensors cannot deadlock.
    pub(crate) fn broadcast_apply<F, G>(
        &self,
        other: &Tensor,
        op: &'static str,
        tile: F,
        finish: G,
    ) -> Tensor
    where
        F: Fn(&mut [f64], &[f64]) + Sync,
        G: FnOnce(&mut TensorData),
    {
        let Some(cell) = &self.inner else {
            return nil_receiver(op);
        };

        // Self-operation would read tiles while they are rewritten;
        // reject it before locking anything.
        if let Some(other_cell) = &other.inner {
            if Arc::ptr_eq(cell, other_cell) {
                let mut inner = write(cell);
                if inner.err.is_none() {
                    inner.set_error(TensorError::AliasedOperand, || {
                        format!("tensor received by {op}() is the receiver itself")
                    });
                }
                return self.clone();
            }
        }

        // Snapshot the operand's state; its lock is dropped again before
        // the receiver is locked below.
        let snapshot = other.inner.as_ref().map(|other_cell| {
            let operand = read(other_cell);
            match operand.err {
                Some(err) => Err(err),
                None => Ok((operand.shape.clone(), operand.data.clone())),
            }
        });

        let mut inner = write(cell);
        if inner.err.is_some() {
            return self.clone();
        }

        let Some(operand) = snapshot else {
            inner.set_error(TensorError::NilReference, || {
                format!("tensor received by {op}() is absent")
            });
            return self.clone();
        };
        let (operand_shape, operand_data) = match operand {
            Ok(parts) => parts,
            Err(err) => {
                inner.set_error(err, || format!("tensor received by {op}() is in error"));
                return self.clone();
            }
        };

        if !inner.shape.can_broadcast(&operand_shape) {
            let lhs = inner.shape.clone();
            inner.set_error(TensorError::ShapeIncompatible, || {
                format!(
                    "tensor received by {op}() can not be broadcast. \
                     shape: {lhs} operand shape: {operand_shape}"
                )
            });
            return self.clone();
        }

        let tile_len = operand_data.len();
        let mul = inner.data.len() / tile_len;
        tracing::trace!(op, tiles = mul, tile_len, "broadcast fan-out");

        let src = operand_data.as_slice();
        let tile = &tile;
        thread::scope(|s| {
            for chunk in inner.data.chunks_mut(tile_len) {
                s.spawn(move || tile(chunk, src));
            }
        });

        finish(&mut *inner);
        self.clone()
    }

    /// Shared protocol for the five scalar operators: absence/error
    /// short-circuit, then `apply` under the exclusive lock.
    pub(crate) fn scalar_apply<F>(&self, op: &'static str, apply: F) -> Tensor
    where
        F: FnOnce(&mut TensorData),
    {
        let Some(cell) = &self.inner else {
            return nil_receiver(op);
        };
        let mut inner = write(cell);
        if inner.err.is_some() {
            return self.clone();
        }
        apply(&mut *inner);
        self.clone()
    }
}
