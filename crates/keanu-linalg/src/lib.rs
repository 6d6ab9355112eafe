//! A small, generic, dynamically-sized matrix library.
//!
//! # Overview
//!
//! [`Matrix<T>`] is a two-dimensional container of `T` whose dimensions are chosen at runtime and
//! whose elements live in a single contiguous buffer. The buffer is laid out in either
//! [`Order::RowMajor`] or [`Order::ColumnMajor`]; that choice is fixed per matrix and only affects
//! performance and the order in which [`Matrix::iter`] visits elements. Two matrices that hold the
//! same values are equal (and hash equally) no matter how they are laid out.
//!
//! Rows and columns can be borrowed as [`RowView`]s and [`ColumnView`]s (or their mutable
//! counterparts), which index, iterate, compare and hash like plain one-dimensional sequences.
//!
//! The arithmetic on offer is deliberately small:
//!
//! - element-wise `+`, `-`, and `*` between equally-sized matrices and sequences, and between a
//!   matrix or sequence and a scalar (see [`seq`] for the sequence versions),
//! - [`dot`] products of vectors,
//! - [matrix multiplication][matmul] of any two [`Grid`]s with compatible shapes.
//!
//! ```
//! use keanu_linalg::*;
//!
//! let a = Matrix::from_rows([
//!     [2, 3],
//!     [-1, 4],
//! ]);
//! let b = Matrix::from_columns([
//!     [0, 3],
//!     [5, -4],
//! ]);
//! assert_eq!(&a * &b, Matrix::from_rows([[9, -2], [12, -21]]));
//! assert_eq!(&a * &Matrix::identity(2), a);
//! ```
//!
//! # Goals & Non-Goals
//!
//! - Keep the API small and generic over the element type. Anything providing [`Zero`], [`One`]
//!   and the basic operators qualifies as a [`Number`]; non-arithmetic types can still be stored,
//!   indexed, and transposed.
//! - Contract violations (out-of-bounds indices, mismatched shapes, ragged input) panic with a
//!   descriptive message. Fallible accessors (`get`, `get_row`, ...) are provided where checking
//!   up front is inconvenient.
//! - Don't do numerics. There is no inversion, decomposition, or solving, and sums are evaluated
//!   naively, left to right.
//! - Don't chase performance. Matrix multiplication is the textbook triple loop.

mod matrix;
mod order;
mod product;
pub mod seq;
mod traits;
mod view;

pub use matrix::{LaneIter, LaneIterMut, Matrix};
pub use order::*;
pub use product::*;
pub use traits::*;
pub use view::*;
