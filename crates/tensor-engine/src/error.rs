// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sticky error codes carried in-band on tensors.
//!
//! Tensor operations never return `Result`: a failure is recorded in the
//! receiver's error slot and every later operation on that tensor becomes a
//! pass-through. Callers detect failure by inspecting
//! [`Tensor::error`](crate::Tensor::error) after a call or at the end of a
//! fluent chain.

/// Error codes a [`crate::Tensor`] can carry in its sticky error slot.
///
/// Once set, a code is never cleared or overwritten by later operations;
/// the only write into an occupied slot is a pass-through copy of an
/// operand's pre-existing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TensorError {
    /// An absent tensor was supplied where a real one was required.
    #[error("nil tensor reference")]
    NilReference,

    /// The operand's shape is not an exact trailing suffix of the
    /// receiver's shape.
    #[error("shapes are not broadcast-compatible")]
    ShapeIncompatible,

    /// A zero divisor was encountered during an elementwise divide.
    #[error("division by zero")]
    DivisionByZero,

    /// The operand of a binary operation is the receiver itself.
    /// Self-operation would read and write the same buffer concurrently,
    /// so it is rejected outright.
    #[error("operand aliases the receiver")]
    AliasedOperand,
}
