use std::{fmt, iter, slice, vec};

use itertools::{iproduct, Either};

use crate::{
    ColumnView, ColumnViewMut, Contiguous, Grid, GridMut, MatrixIndex, One, Order, RowView,
    RowViewMut, VectorLike, Zero,
};

mod ops;

/// A dynamically-sized matrix with `T` elements, stored in a single contiguous buffer.
///
/// The buffer is laid out according to the matrix's [`Order`], which is chosen at construction
/// time and never changes afterwards (except via [`Matrix::into_order`], which consumes the
/// matrix). The layout is an implementation detail as far as the *value* of a matrix is
/// concerned: equality, hashing, and all arithmetic treat a row-major and a column-major matrix
/// with the same logical contents as identical.
///
/// # Construction
///
/// - [`Matrix::filled`] and [`Matrix::zeros`] create a matrix with every element set to the same
///   value. [`Matrix::identity`] creates a square identity matrix.
/// - [`Matrix::from_rows`] and [`Matrix::from_columns`] take nested sequences of rows or columns.
///   [`Matrix::from_nested`] gives full control over the source and storage layouts.
/// - [`Matrix::from_fn`] creates each element by invoking a closure with its row and column.
/// - [`Matrix::from_vec`] takes ownership of a flat buffer that is already in the desired layout.
/// - `From<[[T; C]; R]>` and `From<Vec<Vec<T>>>` interpret their argument as a list of rows.
///
/// # Element Access
///
/// [`Matrix`] implements [`Index`] and [`IndexMut`] for `(usize, usize)` tuples and for
/// [`MatrixIndex`]. The first element is the *row*, the second the *column*, independent of the
/// storage order. Indexing out of bounds panics; [`Matrix::get`] and [`Matrix::get_mut`] return
/// [`Option`]s instead.
///
/// ```
/// # use keanu_linalg::*;
/// let mut mat = Matrix::from_rows([
///     [1, 2],
///     [3, 4],
/// ]);
/// mat[(0, 1)] = 20;
/// assert_eq!(mat[(0, 1)], 20);
/// assert_eq!(mat.get(2, 0), None);
/// ```
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone)]
pub struct Matrix<T> {
    rows: usize,
    columns: usize,
    order: Order,
    storage: Vec<T>,
}

/// Iterator over the contents of one row or column, in order.
pub type LaneIter<'a, T> = iter::Take<iter::StepBy<slice::Iter<'a, T>>>;

/// Mutable iterator over the contents of one row or column, in order.
pub type LaneIterMut<'a, T> = iter::Take<iter::StepBy<slice::IterMut<'a, T>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    Row,
    Column,
}

/// Location of a row or column inside the backing buffer.
///
/// Every row and every column of a contiguous matrix is an arithmetic progression of offsets.
#[derive(Debug, Clone, Copy)]
struct Lane {
    start: usize,
    step: usize,
    len: usize,
}

/// Yields every `(row, column)` pair of a `rows`x`columns` matrix in the storage order of `order`.
pub(crate) fn storage_positions(
    rows: usize,
    columns: usize,
    order: Order,
) -> impl Iterator<Item = (usize, usize)> {
    match order {
        Order::RowMajor => Either::Left(iproduct!(0..rows, 0..columns)),
        Order::ColumnMajor => {
            Either::Right(iproduct!(0..columns, 0..rows).map(|(column, row)| (row, column)))
        }
    }
}

/// Returns `rows * columns`.
///
/// # Panics
///
/// Panics if the product overflows `usize`.
#[track_caller]
fn element_count(rows: usize, columns: usize) -> usize {
    match rows.checked_mul(columns) {
        Some(count) => count,
        None => panic!("matrix dimensions {rows}x{columns} overflow `usize`"),
    }
}

/// Moves the elements of a `rows`x`columns` buffer laid out in `from` into a new buffer laid out
/// in `to`.
fn relayout<T>(storage: Vec<T>, rows: usize, columns: usize, from: Order, to: Order) -> Vec<T> {
    if from == to {
        return storage;
    }

    log::trace!("re-laying out {rows}x{columns} matrix from {from} to {to}");
    let mut slots: Vec<Option<T>> = storage.into_iter().map(Some).collect();
    storage_positions(rows, columns, to)
        .filter_map(|(row, column)| slots[from.offset(row, column, rows, columns)].take())
        .collect()
}

impl<T> Matrix<T> {
    /// Creates a `rows`x`columns` row-major matrix with every element set to `value`.
    ///
    /// Either dimension may be 0, which results in an empty matrix.
    ///
    /// # Panics
    ///
    /// Panics if `rows * columns` overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let mat = Matrix::filled(2, 7, "foo");
    /// assert_eq!(mat.count(), 14);
    /// assert!(mat.iter().all(|s| *s == "foo"));
    /// ```
    #[track_caller]
    pub fn filled(rows: usize, columns: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::filled_with_order(rows, columns, value, Order::RowMajor)
    }

    /// Creates a `rows`x`columns` matrix with every element set to `value`, stored in `order`.
    ///
    /// # Panics
    ///
    /// Panics if `rows * columns` overflows `usize`.
    #[track_caller]
    pub fn filled_with_order(rows: usize, columns: usize, value: T, order: Order) -> Self
    where
        T: Clone,
    {
        Self {
            rows,
            columns,
            order,
            storage: vec![value; element_count(rows, columns)],
        }
    }

    /// Creates a `rows`x`columns` row-major matrix with every element set to
    /// [`T::ZERO`][Zero::ZERO].
    ///
    /// # Panics
    ///
    /// Panics if `rows * columns` overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let mat = Matrix::<i32>::zeros(2, 3);
    /// assert_eq!(mat, Matrix::from_rows([[0, 0, 0], [0, 0, 0]]));
    /// ```
    #[track_caller]
    pub fn zeros(rows: usize, columns: usize) -> Self
    where
        T: Zero,
    {
        Self::zeros_with_order(rows, columns, Order::RowMajor)
    }

    /// Creates a `rows`x`columns` matrix of zeroes, stored in `order`.
    ///
    /// # Panics
    ///
    /// Panics if `rows * columns` overflows `usize`.
    #[track_caller]
    pub fn zeros_with_order(rows: usize, columns: usize, order: Order) -> Self
    where
        T: Zero,
    {
        Self {
            rows,
            columns,
            order,
            storage: iter::repeat_with(|| T::ZERO)
                .take(element_count(rows, columns))
                .collect(),
        }
    }

    /// Creates the `size`x`size` identity matrix.
    ///
    /// The matrix has the value 1 on its diagonal and 0 everywhere else. A `size` of 0 results in
    /// an empty matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// assert_eq!(Matrix::<u8>::identity(2), Matrix::from_rows([[1, 0], [0, 1]]));
    /// assert!(Matrix::<f32>::identity(0).is_empty());
    /// ```
    pub fn identity(size: usize) -> Self
    where
        T: Zero + One,
    {
        Self::from_fn(size, size, Order::RowMajor, |row, column| {
            if row == column {
                T::ONE
            } else {
                T::ZERO
            }
        })
    }

    /// Creates a matrix by invoking a closure with the position (row and column) of each element.
    ///
    /// The closure is called in the storage order of `order`.
    ///
    /// # Panics
    ///
    /// Panics if `rows * columns` overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let mat = Matrix::from_fn(2, 3, Order::ColumnMajor, |row, col| row * 10 + col);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0,  1,  2],
    ///     [10, 11, 12],
    /// ]));
    /// ```
    #[track_caller]
    pub fn from_fn<F>(rows: usize, columns: usize, order: Order, mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut storage = Vec::with_capacity(element_count(rows, columns));
        storage.extend(
            storage_positions(rows, columns, order).map(|(row, column)| cb(row, column)),
        );
        Self {
            rows,
            columns,
            order,
            storage,
        }
    }

    /// Creates a matrix from a flat buffer that is laid out in `order`.
    ///
    /// # Panics
    ///
    /// Panics if `rows * columns` overflows `usize`, or if `data.len() != rows * columns`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let mat = Matrix::from_vec(2, 2, vec![1, 3, 2, 4], Order::ColumnMajor);
    /// assert_eq!(mat, Matrix::from_rows([[1, 2], [3, 4]]));
    /// ```
    #[track_caller]
    pub fn from_vec(rows: usize, columns: usize, data: Vec<T>, order: Order) -> Self {
        assert_eq!(
            data.len(),
            element_count(rows, columns),
            "data length {} does not match dimensions {}x{}",
            data.len(),
            rows,
            columns,
        );
        Self {
            rows,
            columns,
            order,
            storage: data,
        }
    }

    /// Creates a matrix from a nested sequence of rows or columns.
    ///
    /// `source_order` declares whether each inner sequence of `lines` is a row
    /// ([`Order::RowMajor`]) or a column ([`Order::ColumnMajor`]). `order` selects the layout of
    /// the new matrix; when it differs from `source_order` the elements are rearranged.
    ///
    /// If `lines` is empty, or its first element is empty, the result is a 0x0 matrix.
    ///
    /// # Panics
    ///
    /// Panics if the inner sequences do not all have the same length. This check comes first, so
    /// an empty first line followed by a non-empty one (`[[], [1]]`) panics instead of producing a
    /// 0x0 matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let mat = Matrix::from_nested([[2, 4, 6], [8, 10, 12]], Order::RowMajor, Order::ColumnMajor);
    /// assert_eq!(mat.as_slice(), &[2, 8, 4, 10, 6, 12]);
    /// assert_eq!(mat.shape(), (2, 3));
    ///
    /// // Each inner array is a column.
    /// let mat = Matrix::from_nested([[1, 2, 3], [2, 4, 6]], Order::ColumnMajor, Order::RowMajor);
    /// assert_eq!(mat.as_slice(), &[1, 2, 2, 4, 3, 6]);
    /// assert_eq!(mat.shape(), (3, 2));
    /// ```
    #[track_caller]
    pub fn from_nested<L, I>(lines: L, source_order: Order, order: Order) -> Self
    where
        L: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
    {
        let lines: Vec<Vec<T>> = lines
            .into_iter()
            .map(|line| line.into_iter().collect())
            .collect();
        let line_len = lines.first().map_or(0, Vec::len);
        if let Some((i, line)) = lines
            .iter()
            .enumerate()
            .find(|(_, line)| line.len() != line_len)
        {
            panic!(
                "ragged input: line 0 has {} elements, but line {} has {}",
                line_len,
                i,
                line.len(),
            );
        }
        if line_len == 0 {
            return Self::default_with_order(order);
        }

        let (rows, columns) = match source_order {
            Order::RowMajor => (lines.len(), line_len),
            Order::ColumnMajor => (line_len, lines.len()),
        };
        let flat = lines.into_iter().flatten().collect();
        Self {
            rows,
            columns,
            order,
            storage: relayout(flat, rows, columns, source_order, order),
        }
    }

    /// Creates a row-major [`Matrix`] from a sequence of rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not all have the same length.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let rows = Matrix::from_rows([
    ///     [0, 1],
    ///     [2, 3],
    /// ]);
    /// let columns = Matrix::from_columns([
    ///     [0, 2],
    ///     [1, 3],
    /// ]);
    /// assert_eq!(rows, columns);
    /// ```
    #[track_caller]
    pub fn from_rows<L, I>(rows: L) -> Self
    where
        L: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
    {
        Self::from_nested(rows, Order::RowMajor, Order::RowMajor)
    }

    /// Creates a column-major [`Matrix`] from a sequence of columns.
    ///
    /// # Panics
    ///
    /// Panics if the columns do not all have the same length.
    #[track_caller]
    pub fn from_columns<L, I>(columns: L) -> Self
    where
        L: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
    {
        Self::from_nested(columns, Order::ColumnMajor, Order::ColumnMajor)
    }

    fn default_with_order(order: Order) -> Self {
        Self {
            rows: 0,
            columns: 0,
            order,
            storage: Vec::new(),
        }
    }

    /// The number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// The number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Returns `(rows, columns)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// The total number of elements (`rows * columns`).
    #[inline]
    pub fn count(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    /// Returns `true` if the matrix has exactly one row or exactly one column.
    #[inline]
    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.columns == 1
    }

    /// Returns `true` if the matrix has exactly one element.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.count() == 1
    }

    /// The layout of the backing buffer.
    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    /// Returns the position of `(row, column)` in the backing buffer.
    ///
    /// Bounds are not checked.
    #[inline]
    pub fn offset_of(&self, row: usize, column: usize) -> usize {
        self.order.offset(row, column, self.rows, self.columns)
    }

    /// Returns a reference to the element at `(row, column)`, or [`None`] if out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// assert_eq!(mat.get(1, 0), Some(&3));
    /// assert_eq!(mat.get(0, 3), None);
    /// ```
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        if row < self.rows && column < self.columns {
            Some(&self.storage[self.offset_of(row, column)])
        } else {
            None
        }
    }

    /// Returns a mutable reference to the element at `(row, column)`, or [`None`] if out of
    /// bounds.
    #[inline]
    pub fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        if row < self.rows && column < self.columns {
            let offset = self.offset_of(row, column);
            Some(&mut self.storage[offset])
        } else {
            None
        }
    }

    /// Replaces the element at `(row, column)` with `value`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, column)` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn set(&mut self, row: usize, column: usize, value: T) {
        self[(row, column)] = value;
    }

    /// Returns an iterator over all elements, in *storage* order.
    ///
    /// For a column-major matrix this visits the first column top to bottom, then the second, and
    /// so on. Use [`Matrix::iter_canonical`] to visit elements row by row regardless of layout.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let rows = [[1, 3, 5], [2, 4, 6]];
    /// let rm = Matrix::from_nested(rows, Order::RowMajor, Order::RowMajor);
    /// let cm = Matrix::from_nested(rows, Order::RowMajor, Order::ColumnMajor);
    /// assert!(rm.iter().eq(&[1, 3, 5, 2, 4, 6]));
    /// assert!(cm.iter().eq(&[1, 2, 3, 4, 5, 6]));
    /// assert_eq!(rm, cm);
    /// ```
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.storage.iter()
    }

    /// Returns a mutable iterator over all elements, in *storage* order.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.storage.iter_mut()
    }

    /// Returns an iterator over all elements in row-major order, independent of the layout.
    pub fn iter_canonical(&self) -> impl Iterator<Item = &T> + '_ {
        self.indices().map(move |index| &self[index])
    }

    /// Returns an iterator over every valid [`MatrixIndex`], in row-major order.
    pub fn indices(&self) -> impl Iterator<Item = MatrixIndex> {
        iproduct!(0..self.rows, 0..self.columns).map(MatrixIndex::from)
    }

    /// Returns a view of row `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.row_count()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let mat = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
    /// assert_eq!(mat.row(1), [4, 5, 6]);
    /// assert_eq!(mat.row(1)[2], 6);
    /// ```
    #[track_caller]
    pub fn row(&self, row: usize) -> RowView<'_, T> {
        RowView::new(self, row)
    }

    /// Returns a view of column `column`.
    ///
    /// # Panics
    ///
    /// Panics if `column >= self.column_count()`.
    #[track_caller]
    pub fn column(&self, column: usize) -> ColumnView<'_, T> {
        ColumnView::new(self, column)
    }

    /// Returns a view of row `row`, or [`None`] if out of bounds.
    pub fn get_row(&self, row: usize) -> Option<RowView<'_, T>> {
        (row < self.rows).then(|| RowView::new(self, row))
    }

    /// Returns a view of column `column`, or [`None`] if out of bounds.
    pub fn get_column(&self, column: usize) -> Option<ColumnView<'_, T>> {
        (column < self.columns).then(|| ColumnView::new(self, column))
    }

    /// Returns a mutable view of row `row`; writes go straight to `self`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.row_count()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let mut mat = Matrix::from_rows([[1, 2], [3, 4]]);
    /// mat.row_mut(0)[1] = 20;
    /// assert_eq!(mat[(0, 1)], 20);
    /// ```
    #[track_caller]
    pub fn row_mut(&mut self, row: usize) -> RowViewMut<'_, T> {
        RowViewMut::new(self, row)
    }

    /// Returns a mutable view of column `column`; writes go straight to `self`.
    ///
    /// # Panics
    ///
    /// Panics if `column >= self.column_count()`.
    #[track_caller]
    pub fn column_mut(&mut self, column: usize) -> ColumnViewMut<'_, T> {
        ColumnViewMut::new(self, column)
    }

    /// Returns an iterator over views of every row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = RowView<'_, T>> + '_ {
        (0..self.rows).map(move |row| RowView::new(self, row))
    }

    /// Returns an iterator over views of every column, left to right.
    pub fn columns(&self) -> impl Iterator<Item = ColumnView<'_, T>> + '_ {
        (0..self.columns).map(move |column| ColumnView::new(self, column))
    }

    fn lane(&self, axis: Axis, index: usize) -> Lane {
        match axis {
            Axis::Row => Lane {
                start: self.offset_of(index, 0),
                step: match self.order {
                    Order::RowMajor => 1,
                    Order::ColumnMajor => self.rows,
                },
                len: self.columns,
            },
            Axis::Column => Lane {
                start: self.offset_of(0, index),
                step: match self.order {
                    Order::RowMajor => self.columns,
                    Order::ColumnMajor => 1,
                },
                len: self.rows,
            },
        }
    }

    pub(crate) fn lane_iter(&self, axis: Axis, index: usize) -> LaneIter<'_, T> {
        let lane = self.lane(axis, index);
        self.storage
            .get(lane.start..)
            .unwrap_or(&[])
            .iter()
            .step_by(lane.step.max(1))
            .take(lane.len)
    }

    pub(crate) fn lane_iter_mut(&mut self, axis: Axis, index: usize) -> LaneIterMut<'_, T> {
        let lane = self.lane(axis, index);
        self.storage
            .get_mut(lane.start..)
            .unwrap_or(&mut [])
            .iter_mut()
            .step_by(lane.step.max(1))
            .take(lane.len)
    }

    /// If the matrix is a row or column vector, returns its elements in order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// assert_eq!(Matrix::from_rows([[1], [2], [3]]).vector(), Some(vec![1, 2, 3]));
    /// assert_eq!(Matrix::from_rows([[1, 2], [3, 4]]).vector(), None);
    /// ```
    pub fn vector(&self) -> Option<Vec<T>>
    where
        T: Clone,
    {
        if self.rows == 1 {
            Some(self.row(0).to_vec())
        } else if self.columns == 1 {
            Some(self.column(0).to_vec())
        } else {
            None
        }
    }

    /// If the matrix has exactly one element, returns a reference to it.
    pub fn scalar(&self) -> Option<&T> {
        if self.is_scalar() {
            self.storage.first()
        } else {
            None
        }
    }

    /// Swaps the rows and columns of this matrix in place.
    ///
    /// The [`Order`] is kept; the backing buffer is rebuilt so that it is laid out in that order
    /// for the new shape. Since this needs `&mut self`, no view of the matrix can be alive while
    /// it runs.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let mut mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// mat.transpose();
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [0, 3],
    ///     [1, 4],
    ///     [2, 5],
    /// ]));
    /// assert_eq!(mat.order(), Order::RowMajor);
    /// ```
    pub fn transpose(&mut self) {
        // A buffer read in the opposite order already is the transpose.
        let storage = std::mem::take(&mut self.storage);
        let (rows, columns) = (self.columns, self.rows);
        self.storage = relayout(storage, rows, columns, self.order.flip(), self.order);
        self.rows = rows;
        self.columns = columns;
    }

    /// Consumes the matrix and returns its transpose.
    pub fn into_transposed(mut self) -> Self {
        self.transpose();
        self
    }

    /// Returns the transpose of this matrix, leaving `self` untouched.
    pub fn transposed(&self) -> Self
    where
        T: Clone,
    {
        Self::from_fn(self.columns, self.rows, self.order, |row, column| {
            self[(column, row)].clone()
        })
    }

    /// Consumes the matrix and returns it with its buffer laid out in `order`.
    ///
    /// The logical contents do not change.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let mat = Matrix::from_rows([[1, 2], [3, 4]]);
    /// let cm = mat.clone().into_order(Order::ColumnMajor);
    /// assert_eq!(cm.as_slice(), &[1, 3, 2, 4]);
    /// assert_eq!(cm, mat);
    /// ```
    pub fn into_order(self, order: Order) -> Self {
        let storage = relayout(self.storage, self.rows, self.columns, self.order, order);
        Self {
            storage,
            order,
            ..self
        }
    }

    /// Applies a closure to each element, returning a new matrix with the same shape and order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let mat = Matrix::from_rows([[0, 1], [2, 3]]).map(|i| i * 2);
    /// assert_eq!(mat, Matrix::from_rows([[0, 2], [4, 6]]));
    /// ```
    pub fn map<F, U>(self, f: F) -> Matrix<U>
    where
        F: FnMut(T) -> U,
    {
        Matrix {
            rows: self.rows,
            columns: self.columns,
            order: self.order,
            storage: self.storage.into_iter().map(f).collect(),
        }
    }

    /// Like [`Matrix::map`], but borrows `self`.
    pub fn map_ref<F, U>(&self, f: F) -> Matrix<U>
    where
        F: FnMut(&T) -> U,
    {
        Matrix {
            rows: self.rows,
            columns: self.columns,
            order: self.order,
            storage: self.storage.iter().map(f).collect(),
        }
    }

    /// Returns the backing buffer, in storage order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.storage
    }

    /// Returns the backing buffer, in storage order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.storage
    }

    /// Consumes the matrix and returns its backing buffer, in storage order.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.storage
    }

    /// Returns the raw bytes of the backing buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let mat = Matrix::from_rows([[1u8, 2], [3, 4]]);
    /// assert_eq!(mat.as_bytes(), &[1, 2, 3, 4]);
    /// ```
    pub fn as_bytes(&self) -> &[u8]
    where
        T: bytemuck::Pod,
    {
        bytemuck::cast_slice(&self.storage)
    }
}

impl<T> Default for Matrix<T> {
    /// Returns an empty, row-major matrix.
    fn default() -> Self {
        Self::default_with_order(Order::RowMajor)
    }
}

impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T> {
    fn from(rows: [[T; C]; R]) -> Self {
        Self::from_rows(rows)
    }
}

impl<T> From<Vec<Vec<T>>> for Matrix<T> {
    #[track_caller]
    fn from(rows: Vec<Vec<T>>) -> Self {
        Self::from_rows(rows)
    }
}

impl<T: fmt::Debug> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct FormatRow<'a, T: fmt::Debug>(RowView<'a, T>);
        impl<'a, T: fmt::Debug> fmt::Debug for FormatRow<'a, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "[")?;
                for (col, elem) in self.0.iter().enumerate() {
                    if col != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", elem)?;
                }
                write!(f, "]")?;
                Ok(())
            }
        }

        let mut list = f.debug_list();
        for row in self.rows() {
            list.entry(&FormatRow(row));
        }
        list.finish()
    }
}

impl<'a, T> IntoIterator for &'a Matrix<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Matrix<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for Matrix<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.storage.into_iter()
    }
}

impl<T> Grid for Matrix<T> {
    type Elem = T;

    #[inline]
    fn row_count(&self) -> usize {
        self.rows
    }

    #[inline]
    fn column_count(&self) -> usize {
        self.columns
    }

    #[inline]
    fn get(&self, row: usize, column: usize) -> Option<&T> {
        Matrix::get(self, row, column)
    }
}

impl<T> GridMut for Matrix<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        Matrix::get_mut(self, row, column)
    }
}

impl<T> Contiguous for Matrix<T> {
    #[inline]
    fn order(&self) -> Order {
        self.order
    }

    #[inline]
    fn as_slice(&self) -> &[T] {
        &self.storage
    }
}

/// Visits the elements in row-major order.
impl<T> VectorLike for Matrix<T> {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        self.count()
    }

    #[track_caller]
    fn elem(&self, index: usize) -> &T {
        assert!(
            index < self.count(),
            "index {index} out of bounds for {}x{} matrix",
            self.rows,
            self.columns,
        );
        &self[(index / self.columns, index % self.columns)]
    }

    fn is_one_dimensional(&self) -> bool {
        self.is_vector()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_and_zeros() {
        let mat = Matrix::filled(2, 7, String::from("foo"));
        assert_eq!(mat.shape(), (2, 7));
        assert_eq!(mat.count(), 14);
        assert!(mat.iter().all(|s| s == "foo"));

        let mat = Matrix::<i32>::zeros_with_order(3, 2, Order::ColumnMajor);
        assert_eq!(mat.as_slice(), &[0; 6]);
        assert_eq!(mat.order(), Order::ColumnMajor);

        let empty = Matrix::filled(0, 5, 1.0);
        assert!(empty.is_empty());
        assert_eq!(empty.shape(), (0, 5));
    }

    #[test]
    fn nested_row_major() {
        let mat = Matrix::from_rows(vec![vec![0, 1, 2], vec![3, 4, 5]]);
        assert_eq!(mat.as_slice(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(mat.row_count(), 2);
        assert_eq!(mat.column_count(), 3);
        assert_eq!(mat[(0, 0)], 0);
        assert_eq!(mat[(1, 2)], 5);
    }

    #[test]
    fn nested_reorders() {
        let mat = Matrix::from_nested([[1, 2, 3], [4, 5, 6]], Order::ColumnMajor, Order::ColumnMajor);
        assert_eq!(mat.shape(), (3, 2));
        assert_eq!(mat.as_slice(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(mat[(0, 1)], 4);
        assert_eq!(mat[(2, 0)], 3);

        let literal = Matrix::from([[1, 2], [3, 4], [5, 6]]);
        assert_eq!(literal.as_slice(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(literal.shape(), (3, 2));
    }

    #[test]
    fn nested_empty() {
        let empty: Vec<Vec<i32>> = Vec::new();
        assert_eq!(Matrix::from_rows(empty).shape(), (0, 0));
        assert_eq!(Matrix::<i32>::from_rows([[]]).shape(), (0, 0));
        assert_eq!(Matrix::<i32>::from_rows([[], []]).shape(), (0, 0));
    }

    #[test]
    #[should_panic(expected = "ragged input")]
    fn nested_ragged() {
        Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5]]);
    }

    #[test]
    #[should_panic(expected = "ragged input: line 0 has 0 elements, but line 1 has 1")]
    fn nested_empty_first_line_is_ragged() {
        Matrix::from_rows(vec![vec![], vec![1]]);
    }

    #[test]
    #[should_panic(expected = "matrix dimensions 9223372036854775808x2 overflow `usize`")]
    #[cfg(target_pointer_width = "64")]
    fn filled_dimensions_overflow() {
        Matrix::filled(usize::MAX / 2 + 1, 2, ());
    }

    #[test]
    #[should_panic(expected = "overflow `usize`")]
    fn zeros_dimensions_overflow() {
        Matrix::<u8>::zeros_with_order(2, usize::MAX, Order::ColumnMajor);
    }

    #[test]
    #[should_panic(expected = "overflow `usize`")]
    fn from_vec_dimensions_overflow() {
        // The wrapped product would be 0, matching the empty buffer.
        Matrix::from_vec(usize::MAX / 2 + 1, 2, Vec::<()>::new(), Order::RowMajor);
    }

    #[test]
    #[should_panic(expected = "overflow `usize`")]
    fn from_fn_dimensions_overflow() {
        Matrix::from_fn(usize::MAX, usize::MAX, Order::RowMajor, |_, _| ());
    }

    #[test]
    #[should_panic(expected = "does not match dimensions")]
    fn from_vec_wrong_len() {
        Matrix::from_vec(2, 2, vec![1, 2, 3], Order::RowMajor);
    }

    #[test]
    fn offsets() {
        let rm = Matrix::from_rows([[1, 2], [3, 4], [5, 6]]);
        assert_eq!(rm.offset_of(0, 0), 0);
        assert_eq!(rm.offset_of(2, 1), 5);
        let cm = rm.clone().into_order(Order::ColumnMajor);
        assert_eq!(cm.offset_of(0, 1), 3);
        assert_eq!(cm.as_slice(), &[1, 3, 5, 2, 4, 6]);
    }

    #[test]
    fn access_in_both_orders() {
        for order in [Order::RowMajor, Order::ColumnMajor] {
            let mut mat = Matrix::from_nested([[1, 3, 5], [2, 4, 6]], Order::RowMajor, order);
            assert!(mat.iter_canonical().eq(&[1, 3, 5, 2, 4, 6]));

            for index in mat.indices().collect::<Vec<_>>() {
                let doubled = mat[index] * 2;
                mat.set(index.row, index.column, doubled);
            }
            assert!(mat.iter_canonical().eq(&[2, 6, 10, 4, 8, 12]));
            assert_eq!(mat.get(1, 2), Some(&12));
            assert_eq!(mat.get(2, 0), None);
            assert_eq!(mat.get(0, 3), None);
        }
    }

    #[test]
    fn storage_order_iteration() {
        let rows = [[1, 3, 5], [2, 4, 6]];
        let rm = Matrix::from_nested(rows, Order::RowMajor, Order::RowMajor);
        let cm = Matrix::from_nested(rows, Order::RowMajor, Order::ColumnMajor);
        assert_eq!(rm.iter().copied().collect::<Vec<_>>(), [1, 3, 5, 2, 4, 6]);
        assert_eq!(cm.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6]);
        assert_eq!(cm.clone().into_iter().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    #[should_panic]
    fn index_out_of_bounds() {
        // (0, 2) would map to a valid offset in a 2x2 row-major buffer.
        let mat = Matrix::from_rows([[1, 2], [3, 4]]);
        let _ = mat[(0, 2)];
    }

    #[test]
    fn shape_predicates() {
        let mat = Matrix::from_rows([[1, 2, 3]]);
        assert!(mat.is_vector());
        assert!(!mat.is_square());
        assert_eq!(mat.vector(), Some(vec![1, 2, 3]));
        assert_eq!(mat.scalar(), None);

        let mat = Matrix::from_rows([[1], [2], [3]]);
        assert!(mat.is_vector());
        assert_eq!(mat.vector(), Some(vec![1, 2, 3]));

        let mat = Matrix::from_rows([[7]]);
        assert!(mat.is_scalar());
        assert_eq!(mat.scalar(), Some(&7));

        let mat = Matrix::from_rows([[1, 2], [3, 4]]);
        assert!(mat.is_square());
        assert!(!mat.is_vector());
        assert_eq!(mat.vector(), None);

        let empty = Matrix::<i32>::default();
        assert!(empty.is_empty());
        assert!(empty.is_square());
        assert!(!empty.is_vector());
    }

    #[test]
    fn identity() {
        let mat = Matrix::<i32>::identity(5);
        for MatrixIndex { row, column } in mat.indices() {
            assert_eq!(mat[(row, column)], if row == column { 1 } else { 0 });
        }
        assert_eq!(Matrix::<f64>::identity(1).scalar(), Some(&1.0));
        assert!(Matrix::<i32>::identity(0).is_empty());
    }

    #[test]
    fn transpose_keeps_order() {
        for order in [Order::RowMajor, Order::ColumnMajor] {
            let original = Matrix::from_nested([[0, 1, 2], [3, 4, 5]], Order::RowMajor, order);
            let mut mat = original.clone();
            mat.transpose();
            assert_eq!(mat.order(), order);
            assert_eq!(mat.shape(), (3, 2));
            for MatrixIndex { row, column } in original.indices() {
                assert_eq!(mat[(column, row)], original[(row, column)]);
            }
            assert_eq!(original.transposed(), mat);
            assert_eq!(mat.into_transposed(), original);
        }
    }

    #[test]
    fn transpose_non_clone() {
        let mut mat = Matrix::from_rows([[String::from("a"), String::from("b")]]);
        mat.transpose();
        assert_eq!(mat.shape(), (2, 1));
        assert_eq!(mat[(1, 0)], "b");
    }

    #[test]
    fn lanes() {
        for order in [Order::RowMajor, Order::ColumnMajor] {
            let mut mat = Matrix::from_nested([[1, 2, 3], [4, 5, 6]], Order::RowMajor, order);
            assert!(mat.lane_iter(Axis::Row, 1).eq(&[4, 5, 6]));
            assert!(mat.lane_iter(Axis::Column, 2).eq(&[3, 6]));
            mat.lane_iter_mut(Axis::Column, 0).for_each(|e| *e = 0);
            assert_eq!(mat, Matrix::from_rows([[0, 2, 3], [0, 5, 6]]));
        }

        let wide = Matrix::<i32>::zeros_with_order(3, 0, Order::ColumnMajor);
        assert_eq!(wide.lane_iter(Axis::Row, 2).count(), 0);
    }

    #[test]
    fn fmt() {
        let mat = Matrix::from_nested([[0, 1], [2, 3]], Order::RowMajor, Order::ColumnMajor);

        // Natural writing order (row-wise) for debug output.
        assert_eq!(format!("{:?}", mat), "[[0, 1], [2, 3]]");
        assert_eq!(
            format!("{:#?}", mat),
            "
[
    [0, 1],
    [2, 3],
]
"
            .trim()
        );
        assert_eq!(format!("{:?}", Matrix::<u8>::default()), "[]");
    }

    #[test]
    fn bytes() {
        let mat = Matrix::from_rows([[1u16, 2]]);
        assert_eq!(mat.as_bytes().len(), 4);
    }

    #[test]
    fn vector_like_is_row_major() {
        let mat = Matrix::from_nested([[1, 2], [3, 4]], Order::RowMajor, Order::ColumnMajor);
        assert_eq!(mat.elems().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
        assert!(!mat.is_one_dimensional());
        assert!(Matrix::from_rows([[1, 2]]).is_one_dimensional());
    }
}
