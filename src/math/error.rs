use std::fmt;
use std::panic::Location;

use thiserror::Error;

/// Literal argument expressions of a failing matrix call, e.g. `["weights", "activation"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operands(&'static [&'static str]);

impl Operands {
    pub const fn new(names: &'static [&'static str]) -> Operands {
        Operands(names)
    }

    pub fn names(&self) -> &'static [&'static str] {
        self.0
    }
}

impl fmt::Display for Operands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// Source location of the call that violated a matrix precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite(&'static Location<'static>);

impl CallSite {
    pub fn file(&self) -> &'static str {
        self.0.file()
    }

    pub fn line(&self) -> u32 {
        self.0.line()
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        CallSite(location)
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Line: {}", self.0.file(), self.0.line())
    }
}

/// A `(width, height)` pair, printed the same way for shapes and for indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims(pub usize, pub usize);

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Contract violations detected by the matrix engine.
///
/// The `Display` form is the full diagnostic: call site, the operation with
/// the literal operand expressions, then the attempted and actual shapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error(
        "Matrix Error:\n\tIn File: {site}\n\t{op}({operands})\n\tIndex Out Of Bounds: \
         Attempted To Access Position {index}, But Matrix Is Of Size {shape}"
    )]
    OutOfBounds {
        op: &'static str,
        operands: Operands,
        site: CallSite,
        index: Dims,
        shape: Dims,
    },

    #[error(
        "Matrix Error:\n\tIn File: {site}\n\t{op}({operands})\n\tBad Dimensions: \
         Matrices Are Of Dimensions {lhs} and {rhs}, Left Width Must Equal Right Height"
    )]
    ProductMismatch {
        op: &'static str,
        operands: Operands,
        site: CallSite,
        lhs: Dims,
        rhs: Dims,
    },

    #[error(
        "Matrix Error:\n\tIn File: {site}\n\t{op}({operands})\n\tBad Dimensions: \
         Matrices Are Of Dimensions {lhs} and {rhs}, Shapes Must Be Identical"
    )]
    ElementwiseMismatch {
        op: &'static str,
        operands: Operands,
        site: CallSite,
        lhs: Dims,
        rhs: Dims,
    },
}

impl MatrixError {
    pub fn site(&self) -> CallSite {
        match self {
            MatrixError::OutOfBounds { site, .. }
            | MatrixError::ProductMismatch { site, .. }
            | MatrixError::ElementwiseMismatch { site, .. } => *site,
        }
    }
}

/// Reports a violated matrix precondition and stops.
///
/// The diagnostic goes to the `log` sink at error level and becomes the panic
/// payload, so it is visible with or without a logger installed.
#[cold]
#[inline(never)]
pub fn fatal(err: MatrixError) -> ! {
    log::error!("{err}");
    panic!("{err}")
}

/// Fetches a cell, capturing the argument expressions for the diagnostic.
#[macro_export]
macro_rules! matrix_get {
    ($mat:expr, $x:expr, $y:expr) => {
        match $crate::math::matrix::Matrix::try_get_with(
            &$mat,
            $x,
            $y,
            $crate::math::error::Operands::new(&[stringify!($mat), stringify!($x), stringify!($y)]),
        ) {
            Ok(value) => value,
            Err(err) => $crate::math::error::fatal(err),
        }
    };
}

/// Writes a cell, capturing the argument expressions for the diagnostic.
#[macro_export]
macro_rules! matrix_set {
    ($mat:expr, $x:expr, $y:expr, $value:expr) => {
        match $crate::math::matrix::Matrix::try_set_with(
            &mut $mat,
            $x,
            $y,
            $value,
            $crate::math::error::Operands::new(&[
                stringify!($mat),
                stringify!($x),
                stringify!($y),
                stringify!($value),
            ]),
        ) {
            Ok(()) => {}
            Err(err) => $crate::math::error::fatal(err),
        }
    };
}

/// Matrix product `$lhs · $rhs`, capturing the operand expressions for the diagnostic.
#[macro_export]
macro_rules! matrix_product {
    ($lhs:expr, $rhs:expr) => {
        match $crate::math::matrix::Matrix::try_product_with(
            &$lhs,
            &$rhs,
            $crate::math::error::Operands::new(&[stringify!($lhs), stringify!($rhs)]),
        ) {
            Ok(product) => product,
            Err(err) => $crate::math::error::fatal(err),
        }
    };
}

/// Cell-by-cell combination of two same-shape matrices, capturing the operand
/// expressions (including the combining function) for the diagnostic.
#[macro_export]
macro_rules! matrix_elementwise {
    ($lhs:expr, $rhs:expr, $op:expr) => {
        match $crate::math::matrix::Matrix::try_elementwise_with(
            &$lhs,
            &$rhs,
            $op,
            $crate::math::error::Operands::new(&[stringify!($lhs), stringify!($rhs), stringify!($op)]),
        ) {
            Ok(combined) => combined,
            Err(err) => $crate::math::error::fatal(err),
        }
    };
}
