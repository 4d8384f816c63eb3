//! Certified Newton root-finding for scalar functions.
//!
//! Newton's method converges quadratically once an iterate is close enough to a simple root,
//! but "close enough" is usually only known after the fact. Smale's alpha theory gives a
//! test that only needs data at the starting point: the function value and a few derivatives.
//! If $\alpha(f, x_0) \leq \alpha_0$, the iteration started at $x_0$ is guaranteed to converge
//! quadratically to a root within distance $2 \beta(f, x_0)$.
//!
//! The crate is generic over real and complex scalars through [`smale_traits::Scalar`].
//!
//! ```
//! use smale::newton::{smale_newton, NewtonSettings};
//!
//! let f = |x: f64| x * x * x - 1.0;
//! let df: [fn(f64) -> f64; 3] = [|x| 3.0 * x * x, |x| 6.0 * x, |_| 6.0];
//! let result = smale_newton(f, 1.1, &df, &NewtonSettings::default()).unwrap();
//! assert!((result.root - 1.0).abs() < 1e-12);
//! ```
//!
//! # References
//!
//! S. Smale, "Newton's method estimates from data at one point", Springer New York, 1986.
//!
//! J. D. Hauenstein, F. Sottile, "AlphaCertified: certifying solutions to polynomial systems",
//! ACM Trans. Math. Softw., vol. 38, no. 4, 2012.

pub mod batch;
pub mod calculus;
pub mod error;
pub mod invariants;
pub mod newton;

#[cfg(feature = "proptest")]
pub mod proptest;

pub use error::SmaleError;
pub use invariants::{invariants, smale_alpha0, Invariants};
pub use newton::{smale_newton, NewtonResult, NewtonSettings};

pub extern crate nalgebra;
pub extern crate smale_traits;
