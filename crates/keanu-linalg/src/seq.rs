//! Element-wise arithmetic on one-dimensional sequences.
//!
//! Every function here accepts any [`VectorLike`] operand (slices, arrays, [`Vec`]s, views) and
//! returns a freshly allocated [`Vec`]. Binary operations require both operands to have the same
//! length.
//!
//! ```
//! use keanu_linalg::seq;
//!
//! assert_eq!(seq::add(&[1, 2, 3], &[10, 20, 30]), [11, 22, 33]);
//! assert_eq!(seq::mul_scalar(&vec![1.5, 2.0], 2.0), [3.0, 4.0]);
//! ```

use std::ops::{Add, Mul, Sub};

use crate::VectorLike;

#[track_caller]
fn zip_with<A, B, T, F>(lhs: &A, rhs: &B, what: &str, f: F) -> Vec<T>
where
    A: VectorLike<Elem = T> + ?Sized,
    B: VectorLike<Elem = T> + ?Sized,
    F: FnMut((&T, &T)) -> T,
{
    assert_eq!(
        lhs.len(),
        rhs.len(),
        "cannot {what} sequences of different lengths",
    );
    lhs.elems().zip(rhs.elems()).map(f).collect()
}

/// Returns `lhs[i] + rhs[i]` for every `i`.
///
/// # Panics
///
/// Panics if the operands have different lengths.
#[track_caller]
pub fn add<A, B, T>(lhs: &A, rhs: &B) -> Vec<T>
where
    A: VectorLike<Elem = T> + ?Sized,
    B: VectorLike<Elem = T> + ?Sized,
    T: Clone + Add<Output = T>,
{
    zip_with(lhs, rhs, "add", |(a, b)| a.clone() + b.clone())
}

/// Returns `lhs[i] - rhs[i]` for every `i`.
///
/// # Panics
///
/// Panics if the operands have different lengths.
#[track_caller]
pub fn sub<A, B, T>(lhs: &A, rhs: &B) -> Vec<T>
where
    A: VectorLike<Elem = T> + ?Sized,
    B: VectorLike<Elem = T> + ?Sized,
    T: Clone + Sub<Output = T>,
{
    zip_with(lhs, rhs, "subtract", |(a, b)| a.clone() - b.clone())
}

/// Returns `lhs[i] * rhs[i]` for every `i`.
///
/// # Panics
///
/// Panics if the operands have different lengths.
#[track_caller]
pub fn mul<A, B, T>(lhs: &A, rhs: &B) -> Vec<T>
where
    A: VectorLike<Elem = T> + ?Sized,
    B: VectorLike<Elem = T> + ?Sized,
    T: Clone + Mul<Output = T>,
{
    zip_with(lhs, rhs, "multiply", |(a, b)| a.clone() * b.clone())
}

/// Adds `scalar` to every element.
pub fn add_scalar<A, T>(lhs: &A, scalar: T) -> Vec<T>
where
    A: VectorLike<Elem = T> + ?Sized,
    T: Clone + Add<Output = T>,
{
    lhs.elems().map(|e| e.clone() + scalar.clone()).collect()
}

/// Subtracts `scalar` from every element.
pub fn sub_scalar<A, T>(lhs: &A, scalar: T) -> Vec<T>
where
    A: VectorLike<Elem = T> + ?Sized,
    T: Clone + Sub<Output = T>,
{
    lhs.elems().map(|e| e.clone() - scalar.clone()).collect()
}

/// Multiplies every element by `scalar`.
pub fn mul_scalar<A, T>(lhs: &A, scalar: T) -> Vec<T>
where
    A: VectorLike<Elem = T> + ?Sized,
    T: Clone + Mul<Output = T>,
{
    lhs.elems().map(|e| e.clone() * scalar.clone()).collect()
}
