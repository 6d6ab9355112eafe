use std::hash::{Hash, Hasher};
use std::ops::{Add, Index, IndexMut, Mul, Sub};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::{Matrix, MatrixIndex, Number, VectorLike};

use super::storage_positions;

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
        match self.get(row, column) {
            Some(elem) => elem,
            None => panic!(
                "index ({row}, {column}) out of bounds for {}x{} matrix",
                self.rows, self.columns,
            ),
        }
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[track_caller]
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut Self::Output {
        let (rows, columns) = self.shape();
        match self.get_mut(row, column) {
            Some(elem) => elem,
            None => panic!("index ({row}, {column}) out of bounds for {rows}x{columns} matrix"),
        }
    }
}

impl<T> Index<MatrixIndex> for Matrix<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: MatrixIndex) -> &Self::Output {
        &self[(index.row, index.column)]
    }
}

impl<T> IndexMut<MatrixIndex> for Matrix<T> {
    #[track_caller]
    fn index_mut(&mut self, index: MatrixIndex) -> &mut Self::Output {
        &mut self[(index.row, index.column)]
    }
}

/// Matrices are equal if they have the same shape and the same element at every position.
///
/// The storage [`Order`][crate::Order] does not participate.
impl<T, U> PartialEq<Matrix<U>> for Matrix<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Matrix<U>) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        if self.order == other.order {
            self.storage == other.storage
        } else {
            self.indices().all(|index| self[index] == other[index])
        }
    }
}

impl<T: Eq> Eq for Matrix<T> {}

/// Hashes the shape and the elements in row-major order, so that equal matrices hash equally
/// regardless of their layout.
impl<T: Hash> Hash for Matrix<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rows.hash(state);
        self.columns.hash(state);
        for elem in self.iter_canonical() {
            elem.hash(state);
        }
    }
}

impl<T: AbsDiffEq> AbsDiffEq for Matrix<T>
where
    T::Epsilon: Clone,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.shape() == other.shape()
            && self
                .indices()
                .all(|i| self[i].abs_diff_eq(&other[i], epsilon.clone()))
    }
}

impl<T: RelativeEq> RelativeEq for Matrix<T>
where
    T::Epsilon: Clone,
{
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.shape() == other.shape()
            && self.indices().all(|i| {
                self[i].relative_eq(&other[i], epsilon.clone(), max_relative.clone())
            })
    }
}

impl<T: UlpsEq> UlpsEq for Matrix<T>
where
    T::Epsilon: Clone,
{
    fn default_max_ulps() -> u32 {
        T::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.shape() == other.shape()
            && self
                .indices()
                .all(|i| self[i].ulps_eq(&other[i], epsilon.clone(), max_ulps))
    }
}

impl<T> Matrix<T> {
    /// Combines corresponding elements of `self` and `other`. The result uses `self`'s order.
    #[track_caller]
    fn zip_map<U, V, F>(&self, other: &Matrix<U>, what: &str, mut f: F) -> Matrix<V>
    where
        F: FnMut(&T, &U) -> V,
    {
        assert!(
            self.shape() == other.shape(),
            "cannot {what} a {}x{} matrix and a {}x{} matrix element-wise",
            self.rows,
            self.columns,
            other.rows,
            other.columns,
        );
        let storage = if self.order == other.order {
            self.storage
                .iter()
                .zip(&other.storage)
                .map(|(a, b)| f(a, b))
                .collect()
        } else {
            storage_positions(self.rows, self.columns, self.order)
                .map(|pos| f(&self[pos], &other[pos]))
                .collect()
        };
        Matrix {
            rows: self.rows,
            columns: self.columns,
            order: self.order,
            storage,
        }
    }

    /// Adds `other` to `self`, element by element.
    ///
    /// # Panics
    ///
    /// Panics if the matrices have different shapes.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let a = Matrix::from_rows([[1, 2], [3, 4]]);
    /// let b = Matrix::from_columns([[10, 30], [20, 40]]);
    /// assert_eq!(a.add_elementwise(&b), Matrix::from_rows([[11, 22], [33, 44]]));
    /// ```
    #[track_caller]
    pub fn add_elementwise(&self, other: &Self) -> Self
    where
        T: Clone + Add<Output = T>,
    {
        self.zip_map(other, "add", |a, b| a.clone() + b.clone())
    }

    /// Subtracts `other` from `self`, element by element.
    ///
    /// # Panics
    ///
    /// Panics if the matrices have different shapes.
    #[track_caller]
    pub fn sub_elementwise(&self, other: &Self) -> Self
    where
        T: Clone + Sub<Output = T>,
    {
        self.zip_map(other, "subtract", |a, b| a.clone() - b.clone())
    }

    /// Multiplies `self` and `other` element by element (the Hadamard product).
    ///
    /// # Panics
    ///
    /// Panics if the matrices have different shapes.
    #[track_caller]
    pub fn mul_elementwise(&self, other: &Self) -> Self
    where
        T: Clone + Mul<Output = T>,
    {
        self.zip_map(other, "multiply", |a, b| a.clone() * b.clone())
    }

    /// Adds `scalar` to every element.
    pub fn add_scalar(&self, scalar: T) -> Self
    where
        T: Clone + Add<Output = T>,
    {
        self.map_ref(|e| e.clone() + scalar.clone())
    }

    /// Subtracts `scalar` from every element.
    pub fn sub_scalar(&self, scalar: T) -> Self
    where
        T: Clone + Sub<Output = T>,
    {
        self.map_ref(|e| e.clone() - scalar.clone())
    }

    /// Multiplies every element by `scalar`.
    pub fn mul_scalar(&self, scalar: T) -> Self
    where
        T: Clone + Mul<Output = T>,
    {
        self.map_ref(|e| e.clone() * scalar.clone())
    }

    /// Computes the matrix product `self * other`.
    ///
    /// The result has `self.row_count()` rows, `other.column_count()` columns, and `self`'s
    /// order. See [`matmul`][crate::matmul] for details.
    ///
    /// # Panics
    ///
    /// Panics if `self.column_count() != other.row_count()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let a = Matrix::from_rows([[2, 3], [-1, 4]]);
    /// let b = Matrix::from_rows([[0, 5], [3, -4]]);
    /// assert_eq!(a.multiply(&b), Matrix::from_rows([[9, -2], [12, -21]]));
    /// ```
    #[track_caller]
    pub fn multiply<G>(&self, other: &G) -> Self
    where
        T: Number,
        G: crate::Grid<Elem = T> + ?Sized,
    {
        crate::product::matmul_in(self, other, self.order)
    }

    /// Computes the dot product of this vector with another vector-like sequence.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not a row or column vector, if `other` is a non-vector [`Matrix`], or
    /// if the lengths differ.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keanu_linalg::*;
    /// let v = Matrix::from_rows([[1, 2, 3]]);
    /// assert_eq!(v.dot(&[4, 5, 6]), 32);
    /// assert_eq!(v.dot(&Matrix::from_rows([[4], [5], [6]])), 32);
    /// ```
    #[track_caller]
    pub fn dot<V>(&self, other: &V) -> T
    where
        T: Number,
        V: VectorLike<Elem = T> + ?Sized,
    {
        crate::dot(self, other)
    }
}

impl<'a, T: Clone + Add<Output = T>> Add<&'a Matrix<T>> for &'a Matrix<T> {
    type Output = Matrix<T>;

    #[track_caller]
    fn add(self, rhs: &'a Matrix<T>) -> Matrix<T> {
        self.add_elementwise(rhs)
    }
}

impl<T: Clone + Add<Output = T>> Add<Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;

    #[track_caller]
    fn add(self, rhs: Matrix<T>) -> Matrix<T> {
        self.add_elementwise(&rhs)
    }
}

impl<'a, T: Clone + Sub<Output = T>> Sub<&'a Matrix<T>> for &'a Matrix<T> {
    type Output = Matrix<T>;

    #[track_caller]
    fn sub(self, rhs: &'a Matrix<T>) -> Matrix<T> {
        self.sub_elementwise(rhs)
    }
}

impl<T: Clone + Sub<Output = T>> Sub<Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;

    #[track_caller]
    fn sub(self, rhs: Matrix<T>) -> Matrix<T> {
        self.sub_elementwise(&rhs)
    }
}

/// Matrix multiplication.
impl<'a, T: Number> Mul<&'a Matrix<T>> for &'a Matrix<T> {
    type Output = Matrix<T>;

    #[track_caller]
    fn mul(self, rhs: &'a Matrix<T>) -> Matrix<T> {
        self.multiply(rhs)
    }
}

/// Matrix multiplication.
impl<T: Number> Mul<Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;

    #[track_caller]
    fn mul(self, rhs: Matrix<T>) -> Matrix<T> {
        self.multiply(&rhs)
    }
}

impl<'a, T: Clone + Add<Output = T>> Add<T> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: T) -> Matrix<T> {
        self.add_scalar(rhs)
    }
}

impl<T: Add<Output = T> + Clone> Add<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, rhs: T) -> Matrix<T> {
        self.map(|e| e + rhs.clone())
    }
}

impl<'a, T: Clone + Sub<Output = T>> Sub<T> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: T) -> Matrix<T> {
        self.sub_scalar(rhs)
    }
}

impl<T: Sub<Output = T> + Clone> Sub<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: T) -> Matrix<T> {
        self.map(|e| e - rhs.clone())
    }
}

impl<'a, T: Clone + Mul<Output = T>> Mul<T> for &'a Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        self.mul_scalar(rhs)
    }
}

impl<T: Mul<Output = T> + Clone> Mul<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        self.map(|e| e * rhs.clone())
    }
}

// `scalar + matrix` and `scalar * matrix`; the scalar must be a concrete type for coherence.
macro_rules! scalar_lhs {
    ($($t:ty),+) => {
        $(
            impl<'a> Add<&'a Matrix<$t>> for $t {
                type Output = Matrix<$t>;

                fn add(self, rhs: &'a Matrix<$t>) -> Matrix<$t> {
                    rhs.map_ref(|e| self + *e)
                }
            }

            impl Add<Matrix<$t>> for $t {
                type Output = Matrix<$t>;

                fn add(self, rhs: Matrix<$t>) -> Matrix<$t> {
                    rhs.map(|e| self + e)
                }
            }

            impl<'a> Mul<&'a Matrix<$t>> for $t {
                type Output = Matrix<$t>;

                fn mul(self, rhs: &'a Matrix<$t>) -> Matrix<$t> {
                    rhs.map_ref(|e| self * *e)
                }
            }

            impl Mul<Matrix<$t>> for $t {
                type Output = Matrix<$t>;

                fn mul(self, rhs: Matrix<$t>) -> Matrix<$t> {
                    rhs.map(|e| self * e)
                }
            }
        )+
    };
}
scalar_lhs!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use approx::assert_relative_eq;

    use crate::Order;

    use super::*;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equality_ignores_order() {
        let rm = Matrix::from_nested([[1, 2, 3], [4, 5, 6]], Order::RowMajor, Order::RowMajor);
        let cm = Matrix::from_nested([[1, 2, 3], [4, 5, 6]], Order::RowMajor, Order::ColumnMajor);
        assert_eq!(rm, cm);
        assert_eq!(hash_of(&rm), hash_of(&cm));

        let other = Matrix::from_nested([[4, 5, 6], [4, 5, 6]], Order::RowMajor, Order::RowMajor);
        assert_ne!(other, cm);
        assert_ne!(hash_of(&other), hash_of(&cm));
    }

    #[test]
    fn transposed_literal_is_not_equal() {
        let rows = Matrix::from_nested([[1, 2, 3], [4, 5, 6]], Order::RowMajor, Order::RowMajor);
        let cols =
            Matrix::from_nested([[1, 2, 3], [4, 5, 6]], Order::ColumnMajor, Order::ColumnMajor);
        assert_ne!(rows, cols);
        assert_ne!(hash_of(&rows), hash_of(&cols));
    }

    #[test]
    fn equality_requires_same_shape() {
        let wide = Matrix::from_rows([[1, 2, 3, 4]]);
        let square = Matrix::from_rows([[1, 2], [3, 4]]);
        assert_ne!(wide, square);
        assert_eq!(Matrix::from_rows([[1]]), Matrix::from_rows([[1]]));
        assert_eq!(Matrix::<i32>::default(), Matrix::zeros(0, 0));
    }

    #[test]
    fn index_by_matrix_index() {
        let mut mat = Matrix::from_rows([[1, 2], [3, 4]]);
        mat[MatrixIndex::new(1, 0)] = 30;
        assert_eq!(mat[(1, 0)], 30);
        assert_eq!(mat[MatrixIndex::from((0, 1))], 2);
    }

    #[test]
    #[should_panic(expected = "out of bounds for 2x2 matrix")]
    fn index_mut_out_of_bounds() {
        let mut mat = Matrix::from_rows([[1, 2], [3, 4]]);
        mat[(2, 0)] = 0;
    }

    #[test]
    fn elementwise() {
        let a = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        let b = Matrix::from_rows([[6, 5, 4], [3, 2, 1]]).into_order(Order::ColumnMajor);

        assert_eq!(&a + &b, Matrix::filled(2, 3, 7));
        assert_eq!(&a - &b, Matrix::from_rows([[-5, -3, -1], [1, 3, 5]]));
        assert_eq!(a.mul_elementwise(&b), Matrix::from_rows([[6, 10, 12], [12, 10, 6]]));
        assert_eq!((&a + &b).order(), Order::RowMajor);
        assert_eq!((&b + &a).order(), Order::ColumnMajor);
        assert_eq!(a.clone() + b.clone(), &a + &b);
        assert_eq!(a.clone() - b, &a - &Matrix::from_rows([[6, 5, 4], [3, 2, 1]]));
    }

    #[test]
    #[should_panic(expected = "cannot add a 2x3 matrix and a 3x2 matrix element-wise")]
    fn elementwise_shape_mismatch() {
        let a = Matrix::<i32>::zeros(2, 3);
        let b = Matrix::<i32>::zeros(3, 2);
        let _ = &a + &b;
    }

    #[test]
    fn scalar() {
        let a = Matrix::from_rows([[1, 2], [3, 4]]);
        assert_eq!(&a + 1, Matrix::from_rows([[2, 3], [4, 5]]));
        assert_eq!(&a - 1, Matrix::from_rows([[0, 1], [2, 3]]));
        assert_eq!(&a * 3, Matrix::from_rows([[3, 6], [9, 12]]));
        assert_eq!(1 + &a, &a + 1);
        assert_eq!(3 * &a, &a * 3);
        assert_eq!(2.0f64 * Matrix::from_rows([[0.5]]), Matrix::from_rows([[1.0]]));
        assert_eq!(a.clone() * 2, a.mul_scalar(2));

        let empty = Matrix::<i32>::zeros(0, 3);
        assert_eq!((&empty + 5).shape(), (0, 3));
    }

    #[test]
    fn matrix_product() {
        let a = Matrix::from_rows([[2, 3], [-1, 4]]);
        let b = Matrix::from_rows([[0, 5], [3, -4]]);
        let expected = Matrix::from_rows([[9, -2], [12, -21]]);
        assert_eq!(&a * &b, expected);
        assert_eq!(
            a.clone().into_order(Order::ColumnMajor) * b.clone(),
            expected,
        );
        assert_eq!(a.clone() * Matrix::identity(2), a);
    }

    #[test]
    fn approximate_equality() {
        let a = Matrix::from_rows([[0.1 + 0.2, 1.0]]);
        let b = Matrix::from_columns([[0.3], [1.0]]);
        assert_ne!(a, b);
        assert_relative_eq!(a, b);
        assert!(!a.abs_diff_eq(&Matrix::from_rows([[0.3, 1.0, 0.0]]), 1.0));
    }
}
