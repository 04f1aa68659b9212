use std::fmt;
use std::panic::Location;

use crate::math::error::{fatal, CallSite, Dims, MatrixError, Operands};

const GET: Operands = Operands::new(&["self", "x", "y"]);
const SET: Operands = Operands::new(&["self", "x", "y", "value"]);
const PRODUCT: Operands = Operands::new(&["self", "rhs"]);
const ELEMENTWISE: Operands = Operands::new(&["self", "rhs", "op"]);

/// Dense row-major grid of `f64` cells.
///
/// Cell `(x, y)` is column `x`, row `y`, stored at offset `y * width + x`.
/// The shape is fixed at creation; every operator except [`Matrix::fill`]
/// and [`Matrix::set`] returns a new matrix and leaves its operands untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Zero-filled matrix with `width` columns and `height` rows.
    pub fn new(width: usize, height: usize) -> Matrix {
        Matrix {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// A single row (`height == 1`) holding `values` left to right.
    pub fn from_row(values: &[f64]) -> Matrix {
        Matrix {
            width: values.len(),
            height: 1,
            data: values.to_vec(),
        }
    }

    /// A single column (`width == 1`) holding `values` top to bottom.
    pub fn from_column(values: &[f64]) -> Matrix {
        Matrix {
            width: 1,
            height: values.len(),
            data: values.to_vec(),
        }
    }

    /// Builds a matrix from row literals, `rows[y][x]`.
    ///
    /// # Panics
    /// Panics if the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Matrix {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|row| row.len() == width),
            "every row must have {width} columns"
        );
        Matrix {
            width,
            height,
            data: rows.into_iter().flatten().collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major view of every cell.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Overwrites every cell with `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.iter_mut().for_each(|cell| *cell = value);
    }

    /// Reads cell `(x, y)`; an index outside the shape is fatal.
    #[track_caller]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        match self.try_get_with(x, y, GET) {
            Ok(value) => value,
            Err(err) => fatal(err),
        }
    }

    /// Writes cell `(x, y)`; an index outside the shape is fatal.
    #[track_caller]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        if let Err(err) = self.try_set_with(x, y, value, SET) {
            fatal(err)
        }
    }

    #[track_caller]
    pub fn try_get(&self, x: usize, y: usize) -> Result<f64, MatrixError> {
        self.try_get_with(x, y, GET)
    }

    #[track_caller]
    pub fn try_set(&mut self, x: usize, y: usize, value: f64) -> Result<(), MatrixError> {
        self.try_set_with(x, y, value, SET)
    }

    #[doc(hidden)]
    #[track_caller]
    pub fn try_get_with(&self, x: usize, y: usize, operands: Operands) -> Result<f64, MatrixError> {
        let offset = self.offset(x, y, "matrix_get", operands, Location::caller())?;
        Ok(self.data[offset])
    }

    #[doc(hidden)]
    #[track_caller]
    pub fn try_set_with(
        &mut self,
        x: usize,
        y: usize,
        value: f64,
        operands: Operands,
    ) -> Result<(), MatrixError> {
        let offset = self.offset(x, y, "matrix_set", operands, Location::caller())?;
        self.data[offset] = value;
        Ok(())
    }

    fn offset(
        &self,
        x: usize,
        y: usize,
        op: &'static str,
        operands: Operands,
        location: &'static Location<'static>,
    ) -> Result<usize, MatrixError> {
        if x >= self.width || y >= self.height {
            return Err(MatrixError::OutOfBounds {
                op,
                operands,
                site: CallSite::from(location),
                index: Dims(x, y),
                shape: self.dims(),
            });
        }
        Ok(y * self.width + x)
    }

    /// Matrix product `self · rhs`, shaped `(rhs.width, self.height)`.
    ///
    /// Requires `self.width == rhs.height`; anything else is fatal.
    #[track_caller]
    pub fn product(&self, rhs: &Matrix) -> Matrix {
        match self.try_product_with(rhs, PRODUCT) {
            Ok(product) => product,
            Err(err) => fatal(err),
        }
    }

    #[track_caller]
    pub fn try_product(&self, rhs: &Matrix) -> Result<Matrix, MatrixError> {
        self.try_product_with(rhs, PRODUCT)
    }

    #[doc(hidden)]
    #[track_caller]
    pub fn try_product_with(&self, rhs: &Matrix, operands: Operands) -> Result<Matrix, MatrixError> {
        if self.width != rhs.height {
            return Err(MatrixError::ProductMismatch {
                op: "matrix_product",
                operands,
                site: CallSite::from(Location::caller()),
                lhs: self.dims(),
                rhs: rhs.dims(),
            });
        }

        let mut res = Matrix::new(rhs.width, self.height);
        for y in 0..res.height {
            let lhs_row = &self.data[y * self.width..(y + 1) * self.width];
            for x in 0..res.width {
                res.data[y * res.width + x] = lhs_row
                    .iter()
                    .enumerate()
                    .map(|(i, a)| a * rhs.data[i * rhs.width + x])
                    .sum();
            }
        }
        Ok(res)
    }

    /// Combines two same-shape matrices cell by cell with `op(self, rhs)`.
    ///
    /// Shapes must match exactly; nothing is broadcast.
    #[track_caller]
    pub fn elementwise<F>(&self, rhs: &Matrix, op: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        match self.try_elementwise_with(rhs, op, ELEMENTWISE) {
            Ok(combined) => combined,
            Err(err) => fatal(err),
        }
    }

    #[track_caller]
    pub fn try_elementwise<F>(&self, rhs: &Matrix, op: F) -> Result<Matrix, MatrixError>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.try_elementwise_with(rhs, op, ELEMENTWISE)
    }

    #[doc(hidden)]
    #[track_caller]
    pub fn try_elementwise_with<F>(
        &self,
        rhs: &Matrix,
        op: F,
        operands: Operands,
    ) -> Result<Matrix, MatrixError>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.width != rhs.width || self.height != rhs.height {
            return Err(MatrixError::ElementwiseMismatch {
                op: "matrix_elementwise",
                operands,
                site: CallSite::from(Location::caller()),
                lhs: self.dims(),
                rhs: rhs.dims(),
            });
        }

        Ok(Matrix {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(&rhs.data)
                .map(|(&a, &b)| op(a, b))
                .collect(),
        })
    }

    /// Applies `functor` to every cell, row by row.
    pub fn transform<F>(&self, functor: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        Matrix {
            width: self.width,
            height: self.height,
            data: self.data.iter().copied().map(functor).collect(),
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::new(self.height, self.width);
        for y in 0..self.height {
            for x in 0..self.width {
                res.data[x * res.width + y] = self.data[y * self.width + x];
            }
        }
        res
    }

    /// Deep copy with its own buffer.
    pub fn duplicate(&self) -> Matrix {
        self.clone()
    }

    fn dims(&self) -> Dims {
        Dims(self.width, self.height)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return Ok(());
        }
        for row in self.data.chunks(self.width) {
            for cell in row {
                write!(f, "{cell:.4}\t")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
