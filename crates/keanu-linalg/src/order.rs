use std::fmt;

/// Memory layout of a matrix's backing buffer.
///
/// The layout only affects how `(row, column)` pairs map to positions in storage, and therefore the
/// order in which [`Matrix::iter`][crate::Matrix::iter] visits elements. It never affects equality,
/// hashing or any arithmetic result.
///
/// ```text
/// Logical:     RowMajor:        ColumnMajor:
/// [a b c]      [a b c d e f]    [a d b e c f]
/// [d e f]
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// Rows are contiguous.
    #[default]
    RowMajor,
    /// Columns are contiguous.
    ColumnMajor,
}

impl Order {
    /// Maps `(row, column)` to an offset into the backing buffer of a `rows`x`columns` matrix.
    ///
    /// This is the only place where the layout is interpreted; every element access goes through
    /// it. Bounds are not checked here.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// // 2x3 matrix
    /// assert_eq!(Order::RowMajor.offset(1, 0, 2, 3), 3);
    /// assert_eq!(Order::ColumnMajor.offset(1, 0, 2, 3), 1);
    /// ```
    #[inline]
    pub const fn offset(self, row: usize, column: usize, rows: usize, columns: usize) -> usize {
        match self {
            Order::RowMajor => column + row * columns,
            Order::ColumnMajor => row + column * rows,
        }
    }

    /// Returns the other layout.
    #[inline]
    pub const fn flip(self) -> Self {
        match self {
            Order::RowMajor => Order::ColumnMajor,
            Order::ColumnMajor => Order::RowMajor,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Order::RowMajor => "row-major",
            Order::ColumnMajor => "column-major",
        })
    }
}

/// A `(row, column)` position in a matrix.
///
/// Indices compare in row-major order, independent of the layout of any matrix they are used with:
/// `(r1, c1) < (r2, c2)` iff `r1 < r2`, or `r1 == r2` and `c1 < c2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatrixIndex {
    pub row: usize,
    pub column: usize,
}

impl MatrixIndex {
    #[inline]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl From<(usize, usize)> for MatrixIndex {
    #[inline]
    fn from((row, column): (usize, usize)) -> Self {
        Self { row, column }
    }
}

impl From<MatrixIndex> for (usize, usize) {
    #[inline]
    fn from(index: MatrixIndex) -> Self {
        (index.row, index.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_offsets() {
        // 2x3 matrix
        let offsets: Vec<_> = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
            .into_iter()
            .map(|(r, c)| Order::RowMajor.offset(r, c, 2, 3))
            .collect();
        assert_eq!(offsets, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn column_major_offsets() {
        // 2x3 matrix
        let offsets: Vec<_> = [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)]
            .into_iter()
            .map(|(r, c)| Order::ColumnMajor.offset(r, c, 2, 3))
            .collect();
        assert_eq!(offsets, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn default_and_flip() {
        assert_eq!(Order::default(), Order::RowMajor);
        assert_eq!(Order::RowMajor.flip(), Order::ColumnMajor);
        assert_eq!(Order::ColumnMajor.flip().flip(), Order::ColumnMajor);
        assert_eq!(Order::ColumnMajor.to_string(), "column-major");
    }

    #[test]
    fn index_ordering_is_row_major() {
        let mut indices = vec![
            MatrixIndex::new(1, 0),
            MatrixIndex::new(0, 2),
            MatrixIndex::new(0, 0),
            MatrixIndex::new(1, 1),
        ];
        indices.sort();
        assert_eq!(
            indices,
            [
                MatrixIndex::new(0, 0),
                MatrixIndex::new(0, 2),
                MatrixIndex::new(1, 0),
                MatrixIndex::new(1, 1),
            ]
        );
        assert!(MatrixIndex::new(0, 5) < MatrixIndex::new(1, 0));
        assert_eq!(<(usize, usize)>::from(MatrixIndex::from((3, 4))), (3, 4));
    }
}
