use std::ops;

use crate::Order;

/// Types that have a "zero" value (an additive identity).
pub trait Zero {
    /// The *0* value of this type.
    const ZERO: Self;
}

/// Types that have a "one" value (a multiplicative identity).
pub trait One {
    /// The *1* value of this type.
    const ONE: Self;
}

/// A trait for numeric types that support the arithmetic needed by dot products and matrix
/// multiplication.
///
/// Unlike a full field, this does not require negation or division, so unsigned integers qualify.
pub trait Number:
    Zero
    + One
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Output = Self>
    + PartialEq
    + Copy
{
}
impl<T> Number for T where
    T: Zero
        + One
        + ops::Add<Output = Self>
        + ops::Sub<Output = Self>
        + ops::Mul<Output = Self>
        + PartialEq
        + Copy
{
}

macro_rules! zero_one {
    ($zero:literal, $one:literal => $($types:ty),+) => {
        $(
            impl Zero for $types {
                const ZERO: Self = $zero;
            }
            impl One for $types {
                const ONE: Self = $one;
            }
        )+
    };
}
zero_one!(0, 1 => u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
zero_one!(0.0, 1.0 => f32, f64);

/// A readable two-dimensional container.
///
/// Indices are always `(row, column)`, regardless of how (or whether) the implementor stores its
/// elements contiguously.
pub trait Grid {
    /// The type of elements stored in the grid.
    type Elem;

    /// The number of rows.
    fn row_count(&self) -> usize;

    /// The number of columns.
    fn column_count(&self) -> usize;

    /// Returns a reference to the element at `(row, column)`, or [`None`] if out of bounds.
    fn get(&self, row: usize, column: usize) -> Option<&Self::Elem>;

    /// Returns a reference to the element at `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, column)` is out of bounds.
    #[track_caller]
    fn at(&self, row: usize, column: usize) -> &Self::Elem {
        match self.get(row, column) {
            Some(elem) => elem,
            None => panic!(
                "index ({row}, {column}) out of bounds for {}x{} grid",
                self.row_count(),
                self.column_count(),
            ),
        }
    }

    /// The total number of elements.
    fn count(&self) -> usize {
        self.row_count() * self.column_count()
    }

    /// Returns `true` if the grid contains no elements.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns `true` if the grid has the same number of rows and columns.
    fn is_square(&self) -> bool {
        self.row_count() == self.column_count()
    }

    /// Returns `true` if the grid has exactly one row or exactly one column.
    fn is_vector(&self) -> bool {
        self.row_count() == 1 || self.column_count() == 1
    }

    /// Returns `true` if the grid holds exactly one element.
    fn is_scalar(&self) -> bool {
        self.count() == 1
    }

    /// Returns the `(rows, columns)` pair.
    fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }
}

/// A two-dimensional container whose elements can be modified in place.
///
/// The dimensions of a [`GridMut`] cannot be changed through this trait.
pub trait GridMut: Grid {
    /// Returns a mutable reference to the element at `(row, column)`, or [`None`] if out of bounds.
    fn get_mut(&mut self, row: usize, column: usize) -> Option<&mut Self::Elem>;
}

/// A two-dimensional container backed by a single contiguous buffer in a known [`Order`].
pub trait Contiguous: Grid {
    /// The layout of the backing buffer.
    fn order(&self) -> Order;

    /// The backing buffer, in storage order.
    fn as_slice(&self) -> &[Self::Elem];
}

/// A one-dimensional, indexable sequence of elements with a known length.
///
/// This is the operand type of [`dot`][crate::dot] and the element-wise sequence functions in
/// [`seq`][crate::seq]. It is implemented for slices, arrays, [`Vec`]s, row and column views, and
/// for [`Matrix`][crate::Matrix] (whose elements are visited in row-major order).
pub trait VectorLike {
    /// The type of the elements in the sequence.
    type Elem;

    /// The number of elements.
    fn len(&self) -> usize;

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Implementations panic if `index >= self.len()`.
    fn elem(&self, index: usize) -> &Self::Elem;

    /// Returns `true` if the sequence is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the elements form a single row or column.
    ///
    /// Sequences are one-dimensional by construction. [`Matrix`][crate::Matrix] overrides this
    /// to return `true` only for row and column vectors, so that [`dot`][crate::dot] can reject
    /// matrices of any other shape.
    fn is_one_dimensional(&self) -> bool {
        true
    }

    /// Returns an iterator over the elements, front to back.
    fn elems(&self) -> Elems<'_, Self> {
        Elems {
            seq: self,
            front: 0,
            back: self.len(),
        }
    }
}

/// Iterator over the elements of a [`VectorLike`], returned by [`VectorLike::elems`].
pub struct Elems<'a, V: ?Sized> {
    seq: &'a V,
    front: usize,
    back: usize,
}

impl<'a, V: VectorLike + ?Sized> Iterator for Elems<'a, V> {
    type Item = &'a V::Elem;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let elem = self.seq.elem(self.front);
        self.front += 1;
        Some(elem)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<'a, V: VectorLike + ?Sized> DoubleEndedIterator for Elems<'a, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.seq.elem(self.back))
    }
}

impl<'a, V: VectorLike + ?Sized> ExactSizeIterator for Elems<'a, V> {}

impl<T> VectorLike for [T] {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn elem(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<T, const N: usize> VectorLike for [T; N] {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn elem(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<T> VectorLike for Vec<T> {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn elem(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<V: VectorLike + ?Sized> VectorLike for &V {
    type Elem = V::Elem;

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn elem(&self, index: usize) -> &V::Elem {
        (**self).elem(index)
    }
}
