//! Row and column views into a [`Matrix`].
//!
//! A view borrows its matrix, so the borrow checker guarantees that the matrix outlives it and is
//! not reshaped (for example by [`Matrix::transpose`]) while it exists. Views compare and hash by
//! their elements alone, so a row and a column with the same contents are equal.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};

use crate::matrix::{Axis, LaneIter, LaneIterMut};
use crate::{Grid, GridMut, Matrix, Number, VectorLike};

/// A read-only view of one row of a [`Matrix`].
pub struct RowView<'a, T> {
    matrix: &'a Matrix<T>,
    row: usize,
}

/// A read-only view of one column of a [`Matrix`].
pub struct ColumnView<'a, T> {
    matrix: &'a Matrix<T>,
    column: usize,
}

/// A mutable view of one row of a [`Matrix`].
pub struct RowViewMut<'a, T> {
    matrix: &'a mut Matrix<T>,
    row: usize,
}

/// A mutable view of one column of a [`Matrix`].
pub struct ColumnViewMut<'a, T> {
    matrix: &'a mut Matrix<T>,
    column: usize,
}

impl<'a, T> Clone for RowView<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for RowView<'a, T> {}

impl<'a, T> Clone for ColumnView<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for ColumnView<'a, T> {}

impl<'a, T> RowView<'a, T> {
    #[track_caller]
    pub(crate) fn new(matrix: &'a Matrix<T>, row: usize) -> Self {
        assert!(
            row < matrix.row_count(),
            "row {row} out of bounds for {}x{} matrix",
            matrix.row_count(),
            matrix.column_count(),
        );
        Self { matrix, row }
    }

    /// The matrix this view borrows from.
    pub fn matrix(&self) -> &'a Matrix<T> {
        self.matrix
    }

    /// The index of the viewed row.
    pub fn row_index(&self) -> usize {
        self.row
    }

    /// The number of elements (the matrix's column count).
    pub fn len(&self) -> usize {
        self.matrix.column_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element in column `column`, or [`None`] if out of bounds.
    pub fn get(&self, column: usize) -> Option<&'a T> {
        self.matrix.get(self.row, column)
    }

    /// Returns an iterator over the elements, left to right.
    pub fn iter(&self) -> LaneIter<'a, T> {
        self.matrix.lane_iter(Axis::Row, self.row)
    }
}

impl<'a, T> ColumnView<'a, T> {
    #[track_caller]
    pub(crate) fn new(matrix: &'a Matrix<T>, column: usize) -> Self {
        assert!(
            column < matrix.column_count(),
            "column {column} out of bounds for {}x{} matrix",
            matrix.row_count(),
            matrix.column_count(),
        );
        Self { matrix, column }
    }

    /// The matrix this view borrows from.
    pub fn matrix(&self) -> &'a Matrix<T> {
        self.matrix
    }

    /// The index of the viewed column.
    pub fn column_index(&self) -> usize {
        self.column
    }

    /// The number of elements (the matrix's row count).
    pub fn len(&self) -> usize {
        self.matrix.row_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element in row `row`, or [`None`] if out of bounds.
    pub fn get(&self, row: usize) -> Option<&'a T> {
        self.matrix.get(row, self.column)
    }

    /// Returns an iterator over the elements, top to bottom.
    pub fn iter(&self) -> LaneIter<'a, T> {
        self.matrix.lane_iter(Axis::Column, self.column)
    }
}

impl<'a, T> RowViewMut<'a, T> {
    #[track_caller]
    pub(crate) fn new(matrix: &'a mut Matrix<T>, row: usize) -> Self {
        assert!(
            row < matrix.row_count(),
            "row {row} out of bounds for {}x{} matrix",
            matrix.row_count(),
            matrix.column_count(),
        );
        Self { matrix, row }
    }

    /// Reborrows this view as a read-only [`RowView`].
    pub fn as_view(&self) -> RowView<'_, T> {
        RowView {
            matrix: &*self.matrix,
            row: self.row,
        }
    }

    pub fn row_index(&self) -> usize {
        self.row
    }

    pub fn len(&self) -> usize {
        self.matrix.column_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, column: usize) -> Option<&T> {
        self.matrix.get(self.row, column)
    }

    pub fn get_mut(&mut self, column: usize) -> Option<&mut T> {
        self.matrix.get_mut(self.row, column)
    }

    /// Replaces the element in column `column` with `value`.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of bounds.
    #[track_caller]
    pub fn set(&mut self, column: usize, value: T) {
        self[column] = value;
    }

    pub fn iter(&self) -> LaneIter<'_, T> {
        self.matrix.lane_iter(Axis::Row, self.row)
    }

    pub fn iter_mut(&mut self) -> LaneIterMut<'_, T> {
        self.matrix.lane_iter_mut(Axis::Row, self.row)
    }
}

impl<'a, T> ColumnViewMut<'a, T> {
    #[track_caller]
    pub(crate) fn new(matrix: &'a mut Matrix<T>, column: usize) -> Self {
        assert!(
            column < matrix.column_count(),
            "column {column} out of bounds for {}x{} matrix",
            matrix.row_count(),
            matrix.column_count(),
        );
        Self { matrix, column }
    }

    /// Reborrows this view as a read-only [`ColumnView`].
    pub fn as_view(&self) -> ColumnView<'_, T> {
        ColumnView {
            matrix: &*self.matrix,
            column: self.column,
        }
    }

    pub fn column_index(&self) -> usize {
        self.column
    }

    pub fn len(&self) -> usize {
        self.matrix.row_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, row: usize) -> Option<&T> {
        self.matrix.get(row, self.column)
    }

    pub fn get_mut(&mut self, row: usize) -> Option<&mut T> {
        self.matrix.get_mut(row, self.column)
    }

    /// Replaces the element in row `row` with `value`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[track_caller]
    pub fn set(&mut self, row: usize, value: T) {
        self[row] = value;
    }

    pub fn iter(&self) -> LaneIter<'_, T> {
        self.matrix.lane_iter(Axis::Column, self.column)
    }

    pub fn iter_mut(&mut self) -> LaneIterMut<'_, T> {
        self.matrix.lane_iter_mut(Axis::Column, self.column)
    }
}

/// Trait impls shared by all four view types.
macro_rules! view_impls {
    ($($view:ident),+) => {
        $(
            impl<'a, T> $view<'a, T> {
                /// Copies the viewed elements into a new [`Vec`].
                pub fn to_vec(&self) -> Vec<T>
                where
                    T: Clone,
                {
                    self.iter().cloned().collect()
                }

                /// Computes the dot product with another vector-like sequence.
                ///
                /// # Panics
                ///
                /// Panics if the lengths differ, or if `other` is a [`Matrix`] that is not a
                /// row or column vector.
                #[track_caller]
                pub fn dot<V>(&self, other: &V) -> T
                where
                    T: Number,
                    V: VectorLike<Elem = T> + ?Sized,
                {
                    crate::dot(self, other)
                }
            }

            impl<'a, T> Index<usize> for $view<'a, T> {
                type Output = T;

                #[track_caller]
                fn index(&self, index: usize) -> &T {
                    match self.get(index) {
                        Some(elem) => elem,
                        None => panic!(
                            "index {index} out of bounds for {} of length {}",
                            stringify!($view),
                            self.len(),
                        ),
                    }
                }
            }

            impl<'a, T> VectorLike for $view<'a, T> {
                type Elem = T;

                fn len(&self) -> usize {
                    $view::len(self)
                }

                #[track_caller]
                fn elem(&self, index: usize) -> &T {
                    &self[index]
                }
            }

            /// Views are equal to any one-dimensional sequence with the same elements.
            ///
            /// A [`Matrix`] only qualifies if it is a row or column vector.
            impl<'a, T, V> PartialEq<V> for $view<'a, T>
            where
                V: VectorLike + ?Sized,
                T: PartialEq<V::Elem>,
            {
                fn eq(&self, other: &V) -> bool {
                    other.is_one_dimensional()
                        && self.len() == other.len()
                        && self.iter().zip(other.elems()).all(|(a, b)| a == b)
                }
            }

            impl<'a, T: Eq> Eq for $view<'a, T> {}

            impl<'a, T: Hash> Hash for $view<'a, T> {
                fn hash<H: Hasher>(&self, state: &mut H) {
                    state.write_usize(self.len());
                    for elem in self.iter() {
                        elem.hash(state);
                    }
                }
            }

            impl<'a, T: fmt::Debug> fmt::Debug for $view<'a, T> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_list().entries(self.iter()).finish()
                }
            }
        )+
    };
}
view_impls!(RowView, ColumnView, RowViewMut, ColumnViewMut);

impl<'a, T> IndexMut<usize> for RowViewMut<'a, T> {
    #[track_caller]
    fn index_mut(&mut self, column: usize) -> &mut T {
        &mut self.matrix[(self.row, column)]
    }
}

impl<'a, T> IndexMut<usize> for ColumnViewMut<'a, T> {
    #[track_caller]
    fn index_mut(&mut self, row: usize) -> &mut T {
        &mut self.matrix[(row, self.column)]
    }
}

/// A row view is a 1xN grid.
impl<'a, T> Grid for RowView<'a, T> {
    type Elem = T;

    fn row_count(&self) -> usize {
        1
    }

    fn column_count(&self) -> usize {
        self.len()
    }

    fn get(&self, row: usize, column: usize) -> Option<&T> {
        if row == 0 {
            RowView::get(self, column)
        } else {
            None
        }
    }
}

/// A column view is an Nx1 grid.
impl<'a, T> Grid for ColumnView<'a, T> {
    type Elem = T;

    fn row_count(&self) -> usize {
        self.len()
    }

    fn column_count(&self) -> usize {
        1
    }

    fn get(&self, row: usize, column: usize) -> Option<&T> {
        if column == 0 {
            ColumnView::get(self, row)
        } else {
            None
        }
    }
}

impl<'a, T> Grid for RowViewMut<'a, T> {
    type Elem = T;

    fn row_count(&self) -> usize {
        1
    }

    fn column_count(&self) -> usize {
        self.len()
    }

    fn get(&self, row: usize, column: usize) -> Option<&T> {
        if row == 0 {
            RowViewMut::get(self, column)
        } else {
            None
        }
    }
}

impl<'a, T> GridMut for RowViewMut<'a, T> {
    fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        if row == 0 {
            RowViewMut::get_mut(self, column)
        } else {
            None
        }
    }
}

impl<'a, T> Grid for ColumnViewMut<'a, T> {
    type Elem = T;

    fn row_count(&self) -> usize {
        self.len()
    }

    fn column_count(&self) -> usize {
        1
    }

    fn get(&self, row: usize, column: usize) -> Option<&T> {
        if column == 0 {
            ColumnViewMut::get(self, row)
        } else {
            None
        }
    }
}

impl<'a, T> GridMut for ColumnViewMut<'a, T> {
    fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut T> {
        if column == 0 {
            ColumnViewMut::get_mut(self, row)
        } else {
            None
        }
    }
}

impl<'a, T> IntoIterator for RowView<'a, T> {
    type Item = &'a T;
    type IntoIter = LaneIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for ColumnView<'a, T> {
    type Item = &'a T;
    type IntoIter = LaneIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, 'b, T> IntoIterator for &'b mut RowViewMut<'a, T> {
    type Item = &'b mut T;
    type IntoIter = LaneIterMut<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<'a, 'b, T> IntoIterator for &'b mut ColumnViewMut<'a, T> {
    type Item = &'b mut T;
    type IntoIter = LaneIterMut<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use crate::Order;

    use super::*;

    fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn both_orders(rows: [[i32; 3]; 3]) -> [Matrix<i32>; 2] {
        [Order::RowMajor, Order::ColumnMajor]
            .map(|order| Matrix::from_nested(rows, Order::RowMajor, order))
    }

    #[test]
    fn read_rows_and_columns() {
        for mat in both_orders([[1, 2, 3], [4, 5, 6], [7, 8, 9]]) {
            assert_eq!(mat.row(1), [4, 5, 6]);
            assert_eq!(mat.column(2), [3, 6, 9]);
            assert_eq!(mat.row(2)[0], 7);
            assert_eq!(mat.column(0)[1], 4);
            assert_eq!(mat.row(0).get(3), None);
            assert_eq!(mat.column(1).to_vec(), vec![2, 5, 8]);
            assert_eq!(mat.rows().count(), 3);
            assert_eq!(
                mat.columns().map(|c| c.iter().sum::<i32>()).collect::<Vec<_>>(),
                [12, 15, 18],
            );
        }
    }

    #[test]
    fn write_through() {
        for mut mat in both_orders([[1, 2, 3], [4, 5, 6], [7, 8, 9]]) {
            let mut row = mat.row_mut(0);
            row[2] = 30;
            row.set(0, 10);
            for elem in &mut row {
                *elem += 1;
            }
            assert_eq!(row.as_view(), [11, 3, 31]);

            let mut column = mat.column_mut(1);
            column.iter_mut().for_each(|e| *e = 0);
            *column.get_mut(2).unwrap() = -1;
            assert_eq!(column.get_mut(3), None);

            assert_eq!(mat, Matrix::from_rows([[11, 0, 31], [4, 0, 6], [7, -1, 9]]));
        }
    }

    #[test]
    fn equality_and_hash() {
        let mat = Matrix::from_rows([[1, 2, 3], [4, 5, 6], [1, 2, 3]]);
        assert_eq!(mat.row(0), mat.row(2));
        assert_ne!(mat.row(0), mat.row(1));
        assert_eq!(hash_of(&mat.row(0)), hash_of(&mat.row(2)));
        assert_ne!(hash_of(&mat.row(0)), hash_of(&mat.row(1)));

        let identity = Matrix::<i32>::identity(3);
        for i in 0..3 {
            assert_eq!(identity.row(i), identity.column(i));
            assert_eq!(hash_of(&identity.row(i)), hash_of(&identity.column(i)));
        }
        assert_ne!(identity.row(0), identity.column(1));

        // Different lengths never compare equal.
        let wide = Matrix::from_rows([[1, 2, 3]]);
        assert_ne!(wide.row(0), [1, 2]);
        assert_eq!(wide.row(0), vec![1, 2, 3]);

        // Matrices compare like they do in `dot`: only row and column vectors qualify.
        let flat = Matrix::from_rows([[1, 2, 3, 4]]);
        let square = Matrix::from_rows([[1, 2], [3, 4]]);
        assert_ne!(flat.row(0), square);
        assert_eq!(flat.row(0), flat);
        assert_eq!(square.column(1), Matrix::from_rows([[2], [4]]));
    }

    #[test]
    fn as_grid() {
        let mat = Matrix::from_rows([[1, 2], [3, 4]]);
        let row = mat.row(1);
        assert_eq!(Grid::shape(&row), (1, 2));
        assert_eq!(row.at(0, 1), &4);
        assert_eq!(Grid::get(&row, 1, 0), None);

        let column = mat.column(0);
        assert_eq!(Grid::shape(&column), (2, 1));
        assert_eq!(column.at(1, 0), &3);
    }

    #[test]
    fn dot() {
        let mat = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(mat.row(0).dot(&mat.row(1)), 32);
        assert_eq!(mat.column(0).dot(&[1, 1]), 5);
    }

    #[test]
    #[should_panic(expected = "row 2 out of bounds for 2x2 matrix")]
    fn row_out_of_bounds() {
        Matrix::<i32>::zeros(2, 2).row(2);
    }

    #[test]
    #[should_panic(expected = "index 3 out of bounds for ColumnView of length 3")]
    fn index_out_of_bounds() {
        let mat = Matrix::<i32>::zeros(3, 2);
        let _ = mat.column(1)[3];
    }

    #[test]
    fn fmt() {
        let mat = Matrix::from_rows([[1, 2], [3, 4]]);
        assert_eq!(format!("{:?}", mat.column(1)), "[2, 4]");
    }
}
