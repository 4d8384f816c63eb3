//! The alpha-theory invariants $\beta$, $\gamma$ and $\alpha$ of a scalar function at a point.
//!
//! For an analytic function $f$ and a point $x$ with $f'(x) \neq 0$, Smale defines
//! $$ \beta(f, x) = \left| \frac{f(x)}{f'(x)} \right|, \qquad
//!    \gamma(f, x) = \sup_{k \geq 2} \left| \frac{f^{(k)}(x)}{k! \, f'(x)} \right|^{1/(k - 1)}, \qquad
//!    \alpha(f, x) = \beta(f, x) \, \gamma(f, x). $$
//! The supremum is approximated by a maximum over the finitely many derivatives supplied by the
//! caller. If $\alpha(f, x) \leq \alpha_0 = (13 - 3 \sqrt{17}) / 4$, Newton's method started
//! at $x$ converges quadratically to a root $\xi$ with $|x - \xi| \leq 2 \beta(f, x)$.
//!
//! A derivative sequence `df` always starts at the *first* derivative, i.e. `df[0]` is $f'$,
//! `df[1]` is $f''$ and so on.
use crate::calculus::ScalarFunction;
use crate::error::SmaleError;
use log::trace;
use nalgebra::convert;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};
use smale_traits::{Real, Scalar};

/// The certification threshold $\alpha_0 = (13 - 3 \sqrt{17}) / 4 \approx 0.157671$.
#[replace_float_literals(convert::<f64, R>(literal))]
pub fn smale_alpha0<R: Real>() -> R {
    (13.0 - 3.0 * R::sqrt(17.0)) / 4.0
}

/// The triple $(\beta, \gamma, \alpha)$ evaluated at a single point.
///
/// All three quantities are non-negative reals, also for complex functions.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invariants<R> {
    pub beta: R,
    pub gamma: R,
    pub alpha: R,
}

impl<R: Real> Invariants<R> {
    /// Whether $\alpha \leq \alpha_0$.
    ///
    /// A NaN alpha is never certified.
    pub fn is_certified(&self, alpha0: R) -> bool {
        self.alpha <= alpha0
    }

    /// Upper bound $2 \beta$ on the distance from the evaluation point to its associated root.
    ///
    /// Only meaningful when the invariants are certified.
    #[replace_float_literals(convert::<f64, R>(literal))]
    pub fn root_distance_bound(&self) -> R {
        2.0 * self.beta
    }
}

/// Evaluates the first derivative at `x` and checks that it is safely non-zero.
///
/// A non-finite modulus counts as singular too. `iteration` is only used to annotate the error.
pub(crate) fn nonsingular_first_derivative<T, R, D>(
    df: &[D],
    x: T,
    derivative_tolerance: R,
    iteration: usize,
) -> Result<T, SmaleError<R>>
where
    T: Scalar<RealField = R>,
    R: Real,
    D: ScalarFunction<T>,
{
    let dfx = df
        .first()
        .map(|derivative| derivative.eval(x))
        .ok_or(SmaleError::EmptyDerivativeSequence)?;
    let modulus = dfx.modulus();
    if modulus <= derivative_tolerance || !modulus.is_finite() {
        Err(SmaleError::SingularDerivative { iteration, modulus })
    } else {
        Ok(dfx)
    }
}

/// Computes $\gamma$ given the already evaluated first derivative `dfx`.
///
/// The factorial is accumulated as $\ln (k + 1)!$ so that long derivative sequences neither
/// overflow the factorial nor underflow its reciprocal.
fn gamma_with_first_derivative<T, R, D>(x: T, dfx: T, df: &[D]) -> R
where
    T: Scalar<RealField = R>,
    R: Real,
    D: ScalarFunction<T>,
{
    let ln_dfx = dfx.modulus().ln();
    let mut ln_factorial = R::zero();
    let mut gamma = R::zero();

    // df[k] is the (k + 1)-th derivative, whose term is |f^(k+1) / ((k + 1)! f')|^(1/k)
    for (k, derivative) in df.iter().enumerate().skip(1) {
        ln_factorial += convert::<f64, R>((k + 1) as f64).ln();
        let ln_ratio = derivative.eval(x).modulus().ln() - ln_dfx - ln_factorial;
        let gamma_k = (ln_ratio / convert(k as f64)).exp();
        if !gamma_k.is_finite() {
            // Infinite or NaN derivatives can never be certified
            return gamma_k;
        }
        gamma = gamma.max(gamma_k);
    }

    gamma
}

/// Computes $\beta(f, x) = |f(x) / f'(x)|$, the length of the Newton step taken from `x`.
pub fn beta<T, R, F, D>(f: F, x: T, df: &[D], derivative_tolerance: R) -> Result<R, SmaleError<R>>
where
    T: Scalar<RealField = R>,
    R: Real,
    F: ScalarFunction<T>,
    D: ScalarFunction<T>,
{
    let dfx = nonsingular_first_derivative(df, x, derivative_tolerance, 0)?;
    Ok((f.eval(x) / dfx).modulus())
}

/// Computes $\gamma(f, x)$ from the derivative sequence.
///
/// With only the first derivative available there is no information about higher-order
/// growth and $\gamma$ is taken to be zero. This is an optimistic default, not a bound.
pub fn gamma<T, R, D>(x: T, df: &[D], derivative_tolerance: R) -> Result<R, SmaleError<R>>
where
    T: Scalar<RealField = R>,
    R: Real,
    D: ScalarFunction<T>,
{
    let dfx = nonsingular_first_derivative(df, x, derivative_tolerance, 0)?;
    Ok(gamma_with_first_derivative(x, dfx, df))
}

/// Computes $\alpha(f, x) = \beta(f, x) \gamma(f, x)$.
pub fn alpha<T, R, F, D>(f: F, x: T, df: &[D], derivative_tolerance: R) -> Result<R, SmaleError<R>>
where
    T: Scalar<RealField = R>,
    R: Real,
    F: ScalarFunction<T>,
    D: ScalarFunction<T>,
{
    invariants(f, x, df, derivative_tolerance).map(|invariants| invariants.alpha)
}

/// Computes all three invariants at `x` from a single evaluation of $f$ and its derivatives.
///
/// Fails with [`SmaleError::SingularDerivative`] if $|f'(x)|$ does not exceed
/// `derivative_tolerance`, and with [`SmaleError::EmptyDerivativeSequence`] if `df` is empty.
pub fn invariants<T, R, F, D>(f: F, x: T, df: &[D], derivative_tolerance: R) -> Result<Invariants<R>, SmaleError<R>>
where
    T: Scalar<RealField = R>,
    R: Real,
    F: ScalarFunction<T>,
    D: ScalarFunction<T>,
{
    evaluate_invariants(&f, x, df, derivative_tolerance, 0)
}

pub(crate) fn evaluate_invariants<T, R, F, D>(
    f: &F,
    x: T,
    df: &[D],
    derivative_tolerance: R,
    iteration: usize,
) -> Result<Invariants<R>, SmaleError<R>>
where
    T: Scalar<RealField = R>,
    R: Real,
    F: ScalarFunction<T>,
    D: ScalarFunction<T>,
{
    let dfx = nonsingular_first_derivative(df, x, derivative_tolerance, iteration)?;
    Ok(invariants_with_first_derivative(f, x, dfx, df, iteration))
}

/// Computes the invariants given the already checked first derivative `dfx`.
pub(crate) fn invariants_with_first_derivative<T, R, F, D>(
    f: &F,
    x: T,
    dfx: T,
    df: &[D],
    iteration: usize,
) -> Invariants<R>
where
    T: Scalar<RealField = R>,
    R: Real,
    F: ScalarFunction<T>,
    D: ScalarFunction<T>,
{
    let beta = (f.eval(x) / dfx).modulus();
    let gamma = gamma_with_first_derivative(x, dfx, df);
    let alpha = beta * gamma;
    trace!(
        "Invariants at iter {}: beta = {}, gamma = {}, alpha = {}",
        iteration,
        beta,
        gamma,
        alpha
    );
    Invariants { beta, gamma, alpha }
}
