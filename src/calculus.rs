//! Function handles for the scalar functions and derivative sequences consumed by the solver.
use smale_traits::Scalar;

/// A scalar function $f: \mathbb{K} \rightarrow \mathbb{K}$, where $\mathbb{K}$ is either the real
/// or the complex field.
///
/// Every `Fn(T) -> T` is a `ScalarFunction<T>`, so closures, function pointers and boxed or
/// borrowed trait objects can all be used as function handles. Implement the trait directly
/// for types that carry their own data, such as polynomials.
pub trait ScalarFunction<T>
where
    T: Scalar,
{
    fn eval(&self, x: T) -> T;
}

impl<T, F> ScalarFunction<T> for F
where
    T: Scalar,
    F: Fn(T) -> T,
{
    fn eval(&self, x: T) -> T {
        self(x)
    }
}
