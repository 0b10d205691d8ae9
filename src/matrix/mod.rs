use crate::prelude::*;
use std::ops::{Index, IndexMut};

pub mod ops;

/// Row-major matrix.
#[derive(Debug, PartialEq, Clone)]
pub struct Matrix2<T> {
    data: Vec<T>,
    dim: (usize, usize),
}

/// Column vector.
#[derive(Debug, PartialEq, Clone)]
pub struct Matrix1<T> {
    data: Vec<T>,
}

impl<T: Default + Clone> Matrix2<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::default(); rows * cols],
            dim: (rows, cols),
        }
    }
}

impl<T> Matrix2<T> {
    pub fn from_array<const R: usize, const C: usize>(arr: [[T; C]; R]) -> Self {
        let mut data = Vec::with_capacity(R * C);

        for row in arr {
            for x in row {
                data.push(x);
            }
        }

        Self { data, dim: (R, C) }
    }

    /// Builds a matrix from its rows. Every row must have the same length.
    pub fn from_vec(vec: Vec<Vec<T>>) -> Result<Self> {
        let rows = vec.len();
        let cols = vec.first().map(|row| row.len()).unwrap_or(0);

        let mut data = Vec::with_capacity(rows * cols);
        for row in vec {
            if cols != row.len() {
                return Err(Error::DimensionErr);
            }
            data.extend(row);
        }

        Ok(Self {
            data,
            dim: (rows, cols),
        })
    }

    pub fn dim(&self) -> (usize, usize) {
        self.dim
    }

    pub fn rows(&self) -> usize {
        self.dim.0
    }

    pub fn cols(&self) -> usize {
        self.dim.1
    }

    pub fn row(&self, row: usize) -> &[T] {
        let cols = self.cols();
        &self.data[row * cols..(row + 1) * cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact panics on 0, and a zero-width matrix has no elements anyway
        let width = self.cols().max(1);
        self.data.chunks_exact(width).take(self.rows())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn to_vec(self) -> Vec<Vec<T>> {
        let cols = self.cols();
        let mut res = Vec::with_capacity(self.rows());
        let mut data = self.data.into_iter();
        for _ in 0..self.dim.0 {
            res.push(data.by_ref().take(cols).collect());
        }
        res
    }
}

impl<T> Matrix2<T>
where
    T: Default,
{
    /// Applies a function to every element of the matrix
    pub fn apply<F: Fn(T) -> T>(&mut self, f: F) {
        for x in &mut self.data {
            let old = std::mem::take(x);
            *x = f(old);
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix2<T> {
    type Output = T;
    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.data[i * self.cols() + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix2<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        let idx = i * self.cols() + j;
        &mut self.data[idx]
    }
}

impl<T: Clone> Matrix1<T> {
    /// A vector of `size` copies of `value`
    pub fn filled(size: usize, value: T) -> Self {
        Self {
            data: vec![value; size],
        }
    }
}

impl<T> Matrix1<T> {
    pub fn from_array<const R: usize>(arr: [T; R]) -> Self {
        Self {
            data: Vec::from(arr),
        }
    }

    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn to_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> Matrix1<T>
where
    T: Default,
{
    /// Applies a function to every element of the vector
    pub fn apply<F: Fn(T) -> T>(&mut self, f: F) {
        for x in &mut self.data {
            let old = std::mem::take(x);
            *x = f(old);
        }
    }
}

impl Matrix1<f64> {
    /// `k * v`
    pub fn scale(&self, k: f64) -> Self {
        Self::from_vec(self.data.iter().map(|x| k * x).collect())
    }

    /// `k + v`
    pub fn shift(&self, k: f64) -> Self {
        Self::from_vec(self.data.iter().map(|x| k + x).collect())
    }

    /// `1 - v`
    pub fn complement(&self) -> Self {
        Self::from_vec(self.data.iter().map(|x| 1.0 - x).collect())
    }
}

impl<T> From<Vec<T>> for Matrix1<T> {
    fn from(value: Vec<T>) -> Self {
        Self::from_vec(value)
    }
}

impl<T> Index<usize> for Matrix1<T> {
    type Output = T;
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Matrix1<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<'a, T> IntoIterator for &'a Matrix1<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
