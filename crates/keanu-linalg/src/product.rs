use crate::{Grid, Matrix, Number, Order, VectorLike};

/// Computes the dot product of two vectors.
///
/// The operands can be any [`VectorLike`] sequence: slices, arrays, [`Vec`]s, row and column
/// views, or row/column vector [`Matrix`]es. Products are summed left to right, starting from
/// [`T::ZERO`][crate::Zero::ZERO].
///
/// # Panics
///
/// Panics if the operands have different lengths, or if either is a [`Matrix`] that is not a row
/// or column vector.
///
/// # Examples
///
/// ```
/// # use keanu_linalg::*;
/// assert_eq!(dot(&[1, 2, 3], &[4, 5, 6]), 32);
/// assert_eq!(dot(&vec![1.0, 2.0], &[3.0, 3.5]), 10.0);
///
/// let mat = Matrix::from_rows([[1, 2], [3, 4]]);
/// assert_eq!(dot(&mat.row(0), &mat.column(1)), 10);
/// ```
#[track_caller]
pub fn dot<A, B, T>(lhs: &A, rhs: &B) -> T
where
    A: VectorLike<Elem = T> + ?Sized,
    B: VectorLike<Elem = T> + ?Sized,
    T: Number,
{
    assert!(
        lhs.is_one_dimensional() && rhs.is_one_dimensional(),
        "dot product operands must be vectors",
    );
    assert_eq!(
        lhs.len(),
        rhs.len(),
        "dot product operands must have the same length",
    );
    lhs.elems()
        .zip(rhs.elems())
        .fold(T::ZERO, |acc, (&a, &b)| acc + a * b)
}

/// Computes the matrix product of two grids.
///
/// If `lhs` is `m`x`n` and `rhs` is `n`x`p`, the result is the `m`x`p` row-major matrix whose
/// element `(i, j)` is the dot product of row `i` of `lhs` and column `j` of `rhs`.
///
/// Any [`Grid`] is accepted, so a [`RowView`][crate::RowView] can be multiplied as a 1x`n`
/// matrix without copying it first.
///
/// # Panics
///
/// Panics if `lhs.column_count() != rhs.row_count()`.
///
/// # Examples
///
/// ```
/// # use keanu_linalg::*;
/// let a = Matrix::from_rows([[1, 2, 3]]);
/// let b = Matrix::from_rows([[1], [1], [1]]);
/// assert_eq!(matmul(&a, &b), Matrix::from_rows([[6]]));
/// assert_eq!(matmul(&b, &a).shape(), (3, 3));
///
/// let m = Matrix::from_rows([[1, 0], [0, 2]]);
/// assert_eq!(matmul(&m.row(1), &m), Matrix::from_rows([[0, 4]]));
/// ```
#[track_caller]
pub fn matmul<A, B, T>(lhs: &A, rhs: &B) -> Matrix<T>
where
    A: Grid<Elem = T> + ?Sized,
    B: Grid<Elem = T> + ?Sized,
    T: Number,
{
    matmul_in(lhs, rhs, Order::RowMajor)
}

#[track_caller]
pub(crate) fn matmul_in<A, B, T>(lhs: &A, rhs: &B, order: Order) -> Matrix<T>
where
    A: Grid<Elem = T> + ?Sized,
    B: Grid<Elem = T> + ?Sized,
    T: Number,
{
    let (m, n) = lhs.shape();
    let (n2, p) = rhs.shape();
    assert_eq!(
        n, n2,
        "cannot multiply a {m}x{n} matrix by a {n2}x{p} matrix",
    );

    Matrix::from_fn(m, p, order, |i, j| {
        (0..n).fold(T::ZERO, |acc, k| acc + *lhs.at(i, k) * *rhs.at(k, j))
    })
}
