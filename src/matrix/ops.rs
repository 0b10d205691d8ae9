use super::{Matrix1, Matrix2};
use crate::prelude::*;
use std::ops::{Add, AddAssign, Mul, Sub};

pub trait Dot<I> {
    type Output;
    fn dot(self, rhs: I) -> Result<Self::Output>;
}

pub trait Transpose {
    fn transpose(&self) -> Self;
}

pub trait Outer<I> {
    type Output;
    fn outer(self, rhs: I) -> Self::Output;
}

impl<T: Default + Copy> Transpose for Matrix2<T> {
    fn transpose(&self) -> Self {
        let mut transposed = Matrix2::new(self.cols(), self.rows());

        for row in 0..self.rows() {
            for col in 0..self.cols() {
                transposed[(col, row)] = self[(row, col)];
            }
        }
        transposed
    }
}

/// Matrix-vector product: entry `i` is row `i` dotted with the vector.
impl<'a, T> Dot<&Matrix1<T>> for &'a Matrix2<T>
where
    T: Mul<Output = T> + Default + AddAssign + Copy,
{
    type Output = Matrix1<T>;
    fn dot(self, rhs: &Matrix1<T>) -> Result<Self::Output> {
        // columns of LHS == rows of RHS
        if self.cols() != rhs.size() {
            return Err(Error::DimensionErr);
        }

        let data = self
            .iter_rows()
            .map(|row| {
                let mut sum = T::default();
                for (&w, &x) in row.iter().zip(rhs.iter()) {
                    sum += w * x;
                }
                sum
            })
            .collect();

        Ok(Matrix1::from_vec(data))
    }
}

/// Outer product: entry `(i, j)` is `lhs[i] * rhs[j]`.
impl<'a, T> Outer<&Matrix1<T>> for &'a Matrix1<T>
where
    T: Mul<Output = T> + Copy,
{
    type Output = Matrix2<T>;
    fn outer(self, rhs: &Matrix1<T>) -> Self::Output {
        let mut data = Vec::with_capacity(self.size() * rhs.size());
        for &a in self {
            for &b in rhs {
                data.push(a * b);
            }
        }

        Matrix2 {
            data,
            dim: (self.size(), rhs.size()),
        }
    }
}

/// Adds two Matrix2s element-wise.
impl<'a, T> Add for &'a Matrix2<T>
where
    &'a T: Add<Output = T>,
{
    type Output = Result<Matrix2<T>>;
    fn add(self, rhs: Self) -> Self::Output {
        if self.dim != rhs.dim {
            return Err(Error::DimensionErr);
        }

        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(a, b)| a + b)
            .collect();

        Ok(Matrix2 {
            data,
            dim: self.dim,
        })
    }
}

fn zip_with<'a, T, F>(lhs: &'a Matrix1<T>, rhs: &'a Matrix1<T>, f: F) -> Result<Matrix1<T>>
where
    F: Fn(&'a T, &'a T) -> T,
{
    if lhs.size() != rhs.size() {
        return Err(Error::DimensionErr);
    }

    Ok(Matrix1::from_vec(
        lhs.iter().zip(rhs.iter()).map(|(a, b)| f(a, b)).collect(),
    ))
}

/// Adds two Matrix1s element-wise.
impl<'a, T> Add for &'a Matrix1<T>
where
    &'a T: Add<Output = T>,
{
    type Output = Result<Matrix1<T>>;
    fn add(self, rhs: Self) -> Self::Output {
        zip_with(self, rhs, |a, b| a + b)
    }
}

/// Subs two Matrix1s element-wise.
impl<'a, T> Sub for &'a Matrix1<T>
where
    &'a T: Sub<Output = T>,
{
    type Output = Result<Matrix1<T>>;
    fn sub(self, rhs: Self) -> Self::Output {
        zip_with(self, rhs, |a, b| a - b)
    }
}

/// Multiplies two Matrix1s element-wise.
impl<'a, T> Mul for &'a Matrix1<T>
where
    &'a T: Mul<Output = T>,
{
    type Output = Result<Matrix1<T>>;
    fn mul(self, rhs: Self) -> Self::Output {
        zip_with(self, rhs, |a, b| a * b)
    }
}
