//! Dense matrix storage with a constant number of columns.

use std::fmt::Debug;
use std::fmt::Error as FmtError;
use std::fmt::Formatter;
use std::ops::Index;
use std::ops::IndexMut;

use super::num::Unsigned;

// --- MatrixCoordinates -------------------------------------------------------

/// Matrix coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatrixCoordinates {
    pub row: usize,
    pub col: usize,
}

impl MatrixCoordinates {
    /// Create new matrix coordinates.
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

// --- DenseMatrix -------------------------------------------------------------

/// A dense, row-major matrix with a constant number of columns.
///
/// Motif matrices use one row per motif position and one column per
/// alphabet symbol.
#[derive(Clone)]
pub struct DenseMatrix<T: Default + Copy, C: Unsigned> {
    data: Vec<T>,
    rows: usize,
    _columns: std::marker::PhantomData<C>,
}

impl<T: Default + Copy, C: Unsigned> DenseMatrix<T, C> {
    /// Create a new matrix with the given number of rows.
    pub fn new(rows: usize) -> Self {
        Self {
            data: vec![T::default(); rows * C::USIZE],
            rows,
            _columns: std::marker::PhantomData,
        }
    }

    /// Create a new dense matrix from an iterable of rows.
    ///
    /// # Panics
    ///
    /// Panics if any of the rows does not have the number of elements
    /// corresponding to the dense matrix columns.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator,
        <I as IntoIterator>::Item: AsRef<[T]>,
    {
        let mut data = Vec::new();
        let mut n = 0;
        for row in rows {
            let row = row.as_ref();
            assert_eq!(row.len(), C::USIZE, "invalid row length");
            data.extend_from_slice(row);
            n += 1;
        }
        Self {
            data,
            rows: n,
            _columns: std::marker::PhantomData,
        }
    }

    /// The number of columns of the matrix.
    #[inline]
    pub const fn columns(&self) -> usize {
        C::USIZE
    }

    /// The number of rows of the matrix.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Iterate over the rows of the matrix.
    #[inline]
    pub fn iter(&self) -> std::slice::ChunksExact<'_, T> {
        self.data.chunks_exact(C::USIZE)
    }

    /// Returns an iterator that allows modifying each row.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::ChunksExactMut<'_, T> {
        self.data.chunks_exact_mut(C::USIZE)
    }
}

impl<T: Default + Copy + Debug, C: Unsigned> Debug for DenseMatrix<T, C> {
    fn fmt(&self, f: &mut Formatter) -> Result<(), FmtError> {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Default + Copy + PartialEq, C: Unsigned> PartialEq for DenseMatrix<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.data == other.data
    }
}

impl<T: Default + Copy, C: Unsigned> Index<usize> for DenseMatrix<T, C> {
    type Output = [T];
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        let row = C::USIZE * index;
        &self.data[row..row + C::USIZE]
    }
}

impl<T: Default + Copy, C: Unsigned> IndexMut<usize> for DenseMatrix<T, C> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let row = C::USIZE * index;
        &mut self.data[row..row + C::USIZE]
    }
}

impl<T: Default + Copy, C: Unsigned> Index<MatrixCoordinates> for DenseMatrix<T, C> {
    type Output = T;
    #[inline]
    fn index(&self, index: MatrixCoordinates) -> &Self::Output {
        &self[index.row][index.col]
    }
}

impl<T: Default + Copy, C: Unsigned> IndexMut<MatrixCoordinates> for DenseMatrix<T, C> {
    #[inline]
    fn index_mut(&mut self, index: MatrixCoordinates) -> &mut Self::Output {
        &mut self[index.row][index.col]
    }
}

impl<'a, T: Default + Copy, C: Unsigned> IntoIterator for &'a DenseMatrix<T, C> {
    type Item = &'a [T];
    type IntoIter = std::slice::ChunksExact<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use crate::num::U4;

    use super::*;

    #[test]
    fn test_new() {
        let d = DenseMatrix::<u32, U4>::new(3);
        assert_eq!(d.rows(), 3);
        assert_eq!(d.columns(), 4);
        for row in d.iter() {
            assert_eq!(row, &[0, 0, 0, 0]);
        }
    }

    #[test]
    fn test_from_rows() {
        let d = DenseMatrix::<u32, U4>::from_rows([[1, 2, 3, 4], [5, 6, 7, 8]]);
        assert_eq!(d.rows(), 2);
        assert_eq!(&d[1], &[5, 6, 7, 8]);
        assert_eq!(d[MatrixCoordinates::new(0, 2)], 3);
    }

    #[test]
    fn test_index_mut() {
        let mut d = DenseMatrix::<u32, U4>::new(2);
        d[MatrixCoordinates::new(1, 3)] += 2;
        d[0][1] = 5;
        assert_eq!(&d[0], &[0, 5, 0, 0]);
        assert_eq!(&d[1], &[0, 0, 0, 2]);
    }
}
