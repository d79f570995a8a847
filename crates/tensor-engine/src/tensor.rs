// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Core tensor type: construction, reshape, copy and introspection.
//!
//! A [`Tensor`] is a cheap clonable handle to a reference-counted array
//! cell. Cloning the handle aliases the same array (like copying a
//! pointer); [`Tensor::copy`] is the only deep copy. The distinguished
//! *absent* value — [`Tensor::absent`] — stands in for a null reference:
//! constructors return it on invalid input, and arithmetic on it produces
//! an inspectable error-tagged tensor rather than panicking.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{Shape, TensorError};

/// An owned, dense, n-dimensional `f64` array with sticky in-band error
/// state.
///
/// # Memory Layout
/// Data is stored row-major in a flat buffer; the stride table is derived
/// from the shape as described on [`Shape::strides`].
///
/// # Mutation & Chaining
/// Arithmetic mutates the receiver in place and returns the same handle,
/// so calls chain fluently:
///
/// ```
/// use tensor_engine::Tensor;
/// let t = Tensor::fill(2.0, &[2, 3])
///     .add(&Tensor::fill(1.0, &[3]))
///     .multiply_scalar(10.0);
/// assert_eq!(t.error(), None);
/// assert_eq!(t.to_vec().unwrap(), vec![30.0; 6]);
/// ```
///
/// # Errors
/// No operation returns `Result`. Failures set a sticky
/// [`TensorError`] on the receiver and every later operation passes the
/// errored tensor through unchanged. Inspect with [`Tensor::error`].
///
/// # Thread Safety
/// Each array carries an exclusive/shared lock pair: mutating operations
/// hold the exclusive side for their full duration (including the parallel
/// broadcast fan-out), rendering and introspection take the shared side.
/// Handles may be cloned and sent across threads freely.
#[derive(Debug, Clone)]
pub struct Tensor {
    pub(crate) inner: Option<Arc<RwLock<TensorData>>>,
}

/// The array cell behind a [`Tensor`] handle.
#[derive(Debug)]
pub(crate) struct TensorData {
    pub(crate) shape: Shape,
    pub(crate) strides: Vec<usize>,
    pub(crate) data: Vec<f64>,
    pub(crate) err: Option<TensorError>,
    #[cfg(feature = "debug-messages")]
    pub(crate) debug: Option<String>,
}

impl TensorData {
    /// Zero-filled cell for `shape`, with the derived stride table.
    pub(crate) fn zeroed(shape: Shape) -> Self {
        let strides = shape.strides();
        let data = vec![0.0; shape.elem_count()];
        Self {
            shape,
            strides,
            data,
            err: None,
            #[cfg(feature = "debug-messages")]
            debug: None,
        }
    }

    /// Writes `err` into the sticky slot.
    ///
    /// Callers are responsible for the stickiness contract: this is only
    /// invoked when the slot is empty, or to copy an operand's existing
    /// error through. The message closure is evaluated only when the
    /// `debug-messages` feature is enabled.
    pub(crate) fn set_error(&mut self, err: TensorError, msg: impl FnOnce() -> String) {
        tracing::debug!(error = %err, "sticky error set");
        self.err = Some(err);
        #[cfg(feature = "debug-messages")]
        {
            self.debug = Some(msg());
        }
        #[cfg(not(feature = "debug-messages"))]
        let _ = msg;
    }
}

/// Shared-lock accessor. Poisoning is absorbed: failures travel through
/// the sticky error slot, never through lock state.
pub(crate) fn read(cell: &RwLock<TensorData>) -> RwLockReadGuard<'_, TensorData> {
    cell.read().unwrap_or_else(PoisonError::into_inner)
}

/// Exclusive-lock accessor. Poisoning is absorbed, as with [`read`].
pub(crate) fn write(cell: &RwLock<TensorData>) -> RwLockWriteGuard<'_, TensorData> {
    cell.write().unwrap_or_else(PoisonError::into_inner)
}

impl Tensor {
    /// The distinguished absent tensor.
    ///
    /// Constructors return it on invalid input. Arithmetic on an absent
    /// receiver does not panic: it returns a fresh tensor tagged
    /// [`TensorError::NilReference`], so a fluent chain stays inspectable
    /// end to end.
    pub fn absent() -> Self {
        Self { inner: None }
    }

    pub(crate) fn from_cell(data: TensorData) -> Self {
        Self {
            inner: Some(Arc::new(RwLock::new(data))),
        }
    }

    /// Creates a zero-filled tensor with the given extents, ordered
    /// outer-most to inner-most.
    ///
    /// Returns [absent](Tensor::absent) if the extent list is empty or any
    /// extent is zero.
    ///
    /// # Examples
    /// ```
    /// use tensor_engine::Tensor;
    /// let t = Tensor::create(&[2, 3]);
    /// assert_eq!(t.len(), 6);
    /// assert!(Tensor::create(&[2, 0]).is_absent());
    /// ```
    pub fn create(extents: &[usize]) -> Self {
        match Shape::new(extents.to_vec()) {
            Some(shape) => Self::from_cell(TensorData::zeroed(shape)),
            None => Self::absent(),
        }
    }

    /// Creates a tensor with every element set to `value`.
    ///
    /// Equivalent to [`create`](Tensor::create) followed by a scalar add;
    /// returns absent on invalid extents.
    pub fn fill(value: f64, extents: &[usize]) -> Self {
        let t = Self::create(extents);
        if t.is_absent() {
            return t;
        }
        t.add_scalar(value)
    }

    /// Creates a rank-1 arithmetic progression. Three call shapes:
    ///
    /// - `&[stop]` — from 0 up to (not including) `stop` with step 1.
    ///   A non-positive `stop` yields absent (the progression is empty).
    /// - `&[start, stop]` — step is −1 if `stop < start`, else 1.
    /// - `&[start, stop, step]` — explicit step, rejected (absent) when its
    ///   sign is inconsistent with the direction implied by `start`/`stop`.
    ///
    /// Values beyond the third are ignored. The element count is
    /// `floor((stop - start) / step)`; a count below 1 yields absent.
    ///
    /// # Examples
    /// ```
    /// use tensor_engine::Tensor;
    /// let t = Tensor::arange(&[5.0]);
    /// assert_eq!(t.to_vec().unwrap(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    /// assert!(Tensor::arange(&[0.0, 5.0, -1.0]).is_absent());
    /// ```
    pub fn arange(vals: &[f64]) -> Self {
        let (start, stop, step) = match *vals {
            [] => return Self::absent(),
            [stop] if stop <= 0.0 => (stop, 0.0, -1.0),
            [stop] => (0.0, stop, 1.0),
            [start, stop] => (start, stop, if stop < start { -1.0 } else { 1.0 }),
            [start, stop, step, ..] => {
                if stop < start && step >= 0.0 || stop > start && step <= 0.0 {
                    return Self::absent();
                }
                (start, stop, step)
            }
        };

        let count = ((stop - start) / step).floor();
        if count < 1.0 {
            return Self::absent();
        }

        let t = Self::create(&[count as usize]);
        if let Some(cell) = &t.inner {
            let mut inner = write(cell);
            let mut v = start;
            for x in inner.data.iter_mut() {
                *x = v;
                v += step;
            }
        }
        t
    }

    /// Rewrites the shape and stride table in place, leaving the flat
    /// buffer untouched.
    ///
    /// The new extents must multiply to the current element count; on any
    /// invalid extent list the tensor is left unchanged and absent is
    /// returned. An errored tensor passes through unchanged, and an absent
    /// receiver stays absent.
    pub fn reshape(&self, extents: &[usize]) -> Self {
        let Some(cell) = &self.inner else {
            return Self::absent();
        };
        let Some(shape) = Shape::new(extents.to_vec()) else {
            return Self::absent();
        };

        let mut inner = write(cell);
        if inner.err.is_some() {
            return self.clone();
        }
        if shape.elem_count() != inner.data.len() {
            return Self::absent();
        }
        inner.strides = shape.strides();
        inner.shape = shape;
        self.clone()
    }

    /// Returns a deep copy: an independent tensor with identical shape and
    /// data and no shared buffer. The sticky error slot is not carried
    /// over. Copying an absent tensor yields absent.
    pub fn copy(&self) -> Self {
        let Some(cell) = &self.inner else {
            return Self::absent();
        };
        let inner = read(cell);
        let mut dup = TensorData::zeroed(inner.shape.clone());
        dup.data.copy_from_slice(&inner.data);
        Self::from_cell(dup)
    }

    /// Returns `true` if this handle is the distinguished absent value.
    pub fn is_absent(&self) -> bool {
        self.inner.is_none()
    }

    /// Reads the sticky error slot, if any. `None` for an absent tensor.
    pub fn error(&self) -> Option<TensorError> {
        self.inner.as_ref().and_then(|cell| read(cell).err)
    }

    /// Returns the diagnostic message recorded with the sticky error.
    #[cfg(feature = "debug-messages")]
    pub fn debug_message(&self) -> Option<String> {
        self.inner.as_ref().and_then(|cell| read(cell).debug.clone())
    }

    /// Returns a copy of the shape, or `None` for an absent tensor.
    pub fn shape(&self) -> Option<Shape> {
        self.inner.as_ref().map(|cell| read(cell).shape.clone())
    }

    /// Returns the total element count; 0 for an absent tensor.
    pub fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, |cell| read(cell).data.len())
    }

    /// Returns `true` only for an absent tensor — a valid tensor always
    /// holds at least one element.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies the flat buffer out in row-major order, or `None` for an
    /// absent tensor.
    pub fn to_vec(&self) -> Option<Vec<f64>> {
        self.inner.as_ref().map(|cell| read(cell).data.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_zero_filled() {
        let t = Tensor::create(&[2, 3, 4]);
        assert!(!t.is_absent());
        assert_eq!(t.len(), 24);
        assert!(t.to_vec().unwrap().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_create_strides_invariant() {
        // len(strides) == rank + 1, strides[0] == element count.
        for dims in [vec![3], vec![4, 5], vec![2, 3, 4, 5]] {
            let t = Tensor::create(&dims);
            let cell = t.inner.as_ref().unwrap();
            let inner = read(cell);
            assert_eq!(inner.strides.len(), dims.len() + 1);
            assert_eq!(inner.strides[0], inner.data.len());
            assert_eq!(*inner.strides.last().unwrap(), 1);
        }
    }

    #[test]
    fn test_create_rejects_bad_extents() {
        assert!(Tensor::create(&[]).is_absent());
        assert!(Tensor::create(&[3, 0]).is_absent());
    }

    #[test]
    fn test_fill() {
        let t = Tensor::fill(2.5, &[2, 2]);
        assert_eq!(t.to_vec().unwrap(), vec![2.5; 4]);
        assert!(Tensor::fill(1.0, &[0]).is_absent());
    }

    #[test]
    fn test_arange_one_arg() {
        let t = Tensor::arange(&[4.0]);
        assert_eq!(t.to_vec().unwrap(), vec![0.0, 1.0, 2.0, 3.0]);
        // Non-positive stop: empty progression.
        assert!(Tensor::arange(&[0.0]).is_absent());
        assert!(Tensor::arange(&[-3.0]).is_absent());
    }

    #[test]
    fn test_arange_two_args() {
        let up = Tensor::arange(&[2.0, 6.0]);
        assert_eq!(up.to_vec().unwrap(), vec![2.0, 3.0, 4.0, 5.0]);

        let down = Tensor::arange(&[3.0, 0.0]);
        assert_eq!(down.to_vec().unwrap(), vec![3.0, 2.0, 1.0]);

        assert!(Tensor::arange(&[5.0, 5.0]).is_absent());
    }

    #[test]
    fn test_arange_three_args() {
        let t = Tensor::arange(&[0.0, 6.0, 2.0]);
        assert_eq!(t.to_vec().unwrap(), vec![0.0, 2.0, 4.0]);

        let down = Tensor::arange(&[6.0, 0.0, -2.0]);
        assert_eq!(down.to_vec().unwrap(), vec![6.0, 4.0, 2.0]);

        // Step sign inconsistent with direction.
        assert!(Tensor::arange(&[6.0, 0.0, 1.0]).is_absent());
        assert!(Tensor::arange(&[0.0, 6.0, -1.0]).is_absent());
        assert!(Tensor::arange(&[0.0, 6.0, 0.0]).is_absent());
    }

    #[test]
    fn test_arange_fractional_count() {
        // floor((5.5 - 0) / 1) == 5 elements.
        let t = Tensor::arange(&[0.0, 5.5, 1.0]);
        assert_eq!(t.len(), 5);
    }

    #[test]
    fn test_arange_no_args() {
        assert!(Tensor::arange(&[]).is_absent());
    }

    #[test]
    fn test_arange_extra_args_ignored() {
        let t = Tensor::arange(&[0.0, 3.0, 1.0, 99.0]);
        assert_eq!(t.to_vec().unwrap(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_reshape_preserves_data() {
        let t = Tensor::arange(&[12.0]);
        let before = t.to_vec().unwrap();
        let r = t.reshape(&[3, 4]);
        assert!(!r.is_absent());
        assert_eq!(t.to_vec().unwrap(), before);
        assert_eq!(t.shape().unwrap().dims(), &[3, 4]);
    }

    #[test]
    fn test_reshape_rejects_count_change() {
        let t = Tensor::create(&[3, 4]);
        assert!(t.reshape(&[5]).is_absent());
        assert!(t.reshape(&[3, 0]).is_absent());
        assert!(t.reshape(&[]).is_absent());
        // Receiver untouched by the failed attempt.
        assert_eq!(t.shape().unwrap().dims(), &[3, 4]);
    }

    #[test]
    fn test_reshape_returns_same_handle() {
        let t = Tensor::create(&[6]);
        let r = t.reshape(&[2, 3]);
        let (a, b) = (t.inner.unwrap(), r.inner.unwrap());
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_copy_is_deep() {
        let t = Tensor::arange(&[4.0]);
        let c = t.copy();
        t.add_scalar(100.0);
        assert_eq!(c.to_vec().unwrap(), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(c.shape(), t.shape());
    }

    #[test]
    fn test_copy_absent() {
        assert!(Tensor::absent().copy().is_absent());
    }

    #[test]
    fn test_handle_clone_aliases() {
        let t = Tensor::create(&[3]);
        let alias = t.clone();
        t.add_scalar(1.0);
        assert_eq!(alias.to_vec().unwrap(), vec![1.0; 3]);
    }

    #[test]
    fn test_absent_introspection() {
        let a = Tensor::absent();
        assert!(a.is_absent());
        assert!(a.is_empty());
        assert_eq!(a.len(), 0);
        assert_eq!(a.error(), None);
        assert_eq!(a.shape(), None);
        assert_eq!(a.to_vec(), None);
    }

    #[cfg(feature = "debug-messages")]
    #[test]
    fn test_debug_message_recorded_with_error() {
        let t = Tensor::create(&[2]).add(&Tensor::absent());
        assert_eq!(t.error(), Some(TensorError::NilReference));
        let msg = t.debug_message().unwrap();
        assert!(msg.contains("add"), "unexpected diagnostic: {msg}");

        let by_zero = Tensor::fill(1.0, &[2]).divide_scalar(0.0);
        assert_eq!(by_zero.error(), Some(TensorError::DivisionByZero));
        assert!(by_zero.debug_message().is_some());
    }

    #[cfg(feature = "debug-messages")]
    #[test]
    fn test_debug_message_absent_without_error() {
        let t = Tensor::fill(1.0, &[2]).add_scalar(1.0);
        assert_eq!(t.error(), None);
        assert_eq!(t.debug_message(), None);
    }
}
