//! Failure conditions of the invariant estimator and the Newton driver.
use std::error::Error;
use std::fmt;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum SmaleError<R> {
    /// The first derivative vanished (within tolerance) at the given iterate, so the Newton
    /// update is undefined there.
    ///
    /// A first derivative whose modulus is infinite or NaN, e.g. after overflow, is reported
    /// the same way, with the non-finite modulus attached.
    SingularDerivative {
        /// Index of the iterate at which the derivative vanished. Zero is the starting point.
        iteration: usize,
        /// Modulus of the first derivative at the iterate.
        modulus: R,
    },
    /// The starting point failed the alpha test.
    NotCertified { alpha: R, alpha0: R },
    /// The step size did not fall below the tolerance within the maximum number of iterations.
    MaxIterationsExceeded(usize),
    /// No derivatives were supplied.
    EmptyDerivativeSequence,
}

impl<R: Display> Display for SmaleError<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            SmaleError::SingularDerivative { iteration, modulus } => {
                write!(
                    f,
                    "First derivative is singular or not finite at iterate {} (modulus {}).",
                    iteration, modulus
                )
            }
            SmaleError::NotCertified { alpha, alpha0 } => {
                write!(
                    f,
                    "Starting point is not certified: alpha = {} exceeds alpha0 = {}.",
                    alpha, alpha0
                )
            }
            SmaleError::MaxIterationsExceeded(maxit) => {
                write!(f, "Failed to converge within maximum number of iterations ({}).", maxit)
            }
            SmaleError::EmptyDerivativeSequence => {
                write!(f, "Derivative sequence must contain at least the first derivative.")
            }
        }
    }
}

impl<R: fmt::Debug + Display> Error for SmaleError<R> {}
