//! Newton's method with alpha-theory certification of the starting point.
//!
//! Every run evaluates the invariants at the starting point. Depending on
//! [`NewtonSettings::require_certification`], an uncertified start is either rejected or
//! logged as a warning before iterating.
use crate::calculus::ScalarFunction;
use crate::error::SmaleError;
use crate::invariants::{invariants_with_first_derivative, nonsingular_first_derivative, smale_alpha0, Invariants};
use itertools::Itertools;
use log::{debug, warn};
use nalgebra::convert;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};
use smale_traits::{Real, Scalar};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewtonSettings<R> {
    /// Certification threshold for $\alpha$.
    pub alpha0: R,
    pub max_iterations: usize,
    /// Absolute bound on the step size $|x_{n+1} - x_n|$ at convergence.
    ///
    /// If `None`, the bound is $16 \epsilon \max(1, |x_n|)$, with $\epsilon$ the machine epsilon.
    pub tolerance: Option<R>,
    /// The first derivative is considered singular if its modulus does not exceed this value.
    pub derivative_tolerance: R,
    /// Refuse to iterate from a starting point that fails the alpha test.
    ///
    /// If `false`, an uncertified start is only reported with a warning.
    pub require_certification: bool,
    /// Evaluate and record the invariants at every iterate, not only the starting point.
    pub certify_iterates: bool,
}

impl<R: Real> Default for NewtonSettings<R> {
    fn default() -> Self {
        Self {
            alpha0: smale_alpha0(),
            max_iterations: 50,
            tolerance: None,
            derivative_tolerance: R::zero(),
            require_certification: true,
            certify_iterates: false,
        }
    }
}

impl<R: Real> NewtonSettings<R> {
    /// The step size below which an iterate of the given magnitude is considered converged.
    #[replace_float_literals(convert::<f64, R>(literal))]
    pub fn step_tolerance(&self, magnitude: R) -> R {
        self.tolerance
            .unwrap_or_else(|| 16.0 * R::default_epsilon() * magnitude.max(1.0))
    }
}

/// A single Newton update $x_n \mapsto x_{n+1}$.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IterationRecord<T, R> {
    /// The iterate $x_n$ the update was computed from.
    pub point: T,
    /// $|x_{n+1} - x_n|$.
    pub step_size: R,
    /// Invariants at $x_n$, if they were evaluated.
    pub invariants: Option<Invariants<R>>,
    /// Whether the invariants at $x_n$ were evaluated and passed the alpha test.
    pub certified: bool,
}

#[derive(Debug, Clone)]
pub struct NewtonResult<T, R> {
    pub root: T,
    /// Number of Newton updates performed.
    pub iterations: usize,
    /// Invariants at the starting point. They are always evaluated, certified or not.
    pub initial_invariants: Invariants<R>,
    pub trace: Vec<IterationRecord<T, R>>,
}

impl<T, R: Real> NewtonResult<T, R> {
    pub fn step_sizes(&self) -> impl Iterator<Item = R> + '_ {
        self.trace.iter().map(|record| record.step_size)
    }

    /// Ratios $|x_{n+2} - x_{n+1}| / |x_{n+1} - x_n|$ of consecutive step sizes.
    pub fn contraction_ratios(&self) -> Vec<R> {
        self.step_sizes()
            .tuple_windows()
            .map(|(previous, next)| next / previous)
            .collect()
    }
}

/// Finds a root of `f` with Newton's method started at `x0`, certifying the starting point
/// with Smale's alpha theory.
///
/// `df` holds the derivatives of `f`, starting at the first. Only `df[0]` is used by the
/// iteration itself; the remaining derivatives determine $\gamma$ and thereby how
/// conservative the certification is. With a single derivative the certification is vacuous.
///
/// The iteration stops once the step size falls below [`NewtonSettings::step_tolerance`],
/// and the latest iterate is returned as the root.
///
/// # Errors
///
/// - [`SmaleError::NotCertified`] if certification is required and $\alpha(f, x_0) > \alpha_0$.
/// - [`SmaleError::SingularDerivative`] if the first derivative vanishes, or is not finite, at any iterate.
/// - [`SmaleError::MaxIterationsExceeded`] if the step size does not fall below the tolerance
///   within the iteration budget.
/// - [`SmaleError::EmptyDerivativeSequence`] if `df` is empty.
pub fn smale_newton<T, R, F, D>(
    f: F,
    x0: T,
    df: &[D],
    settings: &NewtonSettings<R>,
) -> Result<NewtonResult<T, R>, SmaleError<R>>
where
    T: Scalar<RealField = R>,
    R: Real,
    F: ScalarFunction<T>,
    D: ScalarFunction<T>,
{
    newton_from(&f, x0, df, settings)
}

pub(crate) fn newton_from<T, R, F, D>(
    f: &F,
    x0: T,
    df: &[D],
    settings: &NewtonSettings<R>,
) -> Result<NewtonResult<T, R>, SmaleError<R>>
where
    T: Scalar<RealField = R>,
    R: Real,
    F: ScalarFunction<T>,
    D: ScalarFunction<T>,
{
    if df.is_empty() {
        return Err(SmaleError::EmptyDerivativeSequence);
    }

    if df.len() < 2 {
        warn!("Only the first derivative was provided. Gamma is zero and the certification is vacuous.");
    }

    let dfx0 = nonsingular_first_derivative(df, x0, settings.derivative_tolerance, 0)?;
    let start = invariants_with_first_derivative(f, x0, dfx0, df, 0);
    if !start.is_certified(settings.alpha0) {
        if settings.require_certification {
            return Err(SmaleError::NotCertified {
                alpha: start.alpha,
                alpha0: settings.alpha0,
            });
        }
        warn!(
            "Starting point is not certified (alpha = {} exceeds alpha0 = {}). Iterating anyway.",
            start.alpha, settings.alpha0
        );
    }

    let mut trace = Vec::new();
    let mut x = x0;
    let mut dfx = dfx0;

    for iter in 0..settings.max_iterations {
        if iter > 0 {
            dfx = nonsingular_first_derivative(df, x, settings.derivative_tolerance, iter)?;
        }
        let invariants = match iter {
            0 => Some(start),
            _ if settings.certify_iterates => Some(invariants_with_first_derivative(f, x, dfx, df, iter)),
            _ => None,
        };

        let x_next = x - f.eval(x) / dfx;
        let step_size = (x_next - x).modulus();
        debug!("Newton step size at iter {}: {}", iter, step_size);

        trace.push(IterationRecord {
            point: x,
            step_size,
            invariants,
            certified: invariants
                .map(|invariants| invariants.is_certified(settings.alpha0))
                .unwrap_or(false),
        });

        let tolerance = settings.step_tolerance(x.modulus());
        x = x_next;

        if step_size <= tolerance {
            return Ok(NewtonResult {
                root: x,
                iterations: iter + 1,
                initial_invariants: start,
                trace,
            });
        }
    }

    Err(SmaleError::MaxIterationsExceeded(settings.max_iterations))
}
