//! Certification and root-finding for many independent starting points in parallel.
//!
//! Every evaluation is a pure function of its inputs, so the results are identical to calling
//! the serial routines one point at a time and are returned in the order of the input points.
use crate::calculus::ScalarFunction;
use crate::error::SmaleError;
use crate::invariants::{evaluate_invariants, Invariants};
use crate::newton::{newton_from, NewtonResult, NewtonSettings};
use rayon::prelude::*;
use smale_traits::{Real, Scalar};

/// Computes the invariants of `f` at each of `points` in parallel.
pub fn par_invariants<T, R, F, D>(
    f: F,
    points: &[T],
    df: &[D],
    derivative_tolerance: R,
) -> Vec<Result<Invariants<R>, SmaleError<R>>>
where
    T: Scalar<RealField = R>,
    R: Real,
    F: ScalarFunction<T> + Sync,
    D: ScalarFunction<T> + Sync,
{
    points
        .par_iter()
        .map(|&x| evaluate_invariants(&f, x, df, derivative_tolerance, 0))
        .collect()
}

/// Runs [`smale_newton`](crate::newton::smale_newton) from each of `starts` in parallel.
pub fn par_smale_newton<T, R, F, D>(
    f: F,
    starts: &[T],
    df: &[D],
    settings: &NewtonSettings<R>,
) -> Vec<Result<NewtonResult<T, R>, SmaleError<R>>>
where
    T: Scalar<RealField = R>,
    R: Real,
    F: ScalarFunction<T> + Sync,
    D: ScalarFunction<T> + Sync,
{
    starts
        .par_iter()
        .map(|&x0| newton_from(&f, x0, df, settings))
        .collect()
}
