use log::{Level, LevelFilter, Log, Metadata, Record};
use nalgebra::convert;
use smale::calculus::ScalarFunction;
use smale_traits::Scalar;
use std::cell::RefCell;
use std::sync::Once;

/// Poor man's approx assertion for scalars compared by modulus (works for complex numbers)
#[macro_export]
macro_rules! assert_approx_scalar_eq {
    ($x:expr, $y:expr, abstol = $tol:expr) => {{
        use $crate::nalgebra::ComplexField;
        let x = $x;
        let y = $y;
        let absdiff = (x - y).modulus();
        let approx_eq = absdiff <= $tol;

        if !approx_eq {
            println!("abstol: {:e}", $tol);
            println!("left: {}", x);
            println!("right: {}", y);
            println!("diff: {:e}", absdiff);
        }
        assert!(approx_eq);
    }};
}

pub extern crate nalgebra;

/// A dense polynomial $p(x) = c_0 + c_1 x + \dots + c_n x^n$ over a real or complex field.
///
/// Used as a test fixture, since its derivative sequence is known exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<T> {
    // Lowest degree first
    coefficients: Vec<T>,
}

impl<T: Scalar> Polynomial<T> {
    /// Constructs a polynomial from its coefficients, lowest degree first.
    pub fn new(mut coefficients: Vec<T>) -> Self {
        while coefficients.len() > 1 && coefficients.last() == Some(&T::zero()) {
            coefficients.pop();
        }
        if coefficients.is_empty() {
            coefficients.push(T::zero());
        }
        Self { coefficients }
    }

    /// Constructs a polynomial from real coefficients, lowest degree first.
    pub fn from_real_coefficients(coefficients: &[f64]) -> Self {
        Self::new(coefficients.iter().map(|&c| convert(c)).collect())
    }

    /// The monic polynomial $\prod_i (x - r_i)$.
    pub fn from_roots(roots: &[T]) -> Self {
        let mut coefficients = vec![T::one()];
        for &root in roots {
            // Multiply by (x - root)
            let mut next = vec![T::zero(); coefficients.len() + 1];
            for (i, &c) in coefficients.iter().enumerate() {
                next[i + 1] += c;
                next[i] -= c * root;
            }
            coefficients = next;
        }
        Self::new(coefficients)
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Borrows the polynomial as a plain closure.
    pub fn function(&self) -> impl Fn(T) -> T + Sync + '_ {
        move |x| self.evaluate(x)
    }

    pub fn evaluate(&self, x: T) -> T {
        self.coefficients
            .iter()
            .rev()
            .fold(T::zero(), |acc, &c| acc * x + c)
    }

    pub fn derivative(&self) -> Self {
        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| c * convert::<f64, T>(i as f64))
            .collect();
        Self::new(coefficients)
    }

    /// The derivatives $p', p'', \dots, p^{(n)}$, where $n$ is the degree.
    ///
    /// Constant polynomials have the single derivative zero.
    pub fn derivatives(&self) -> Vec<Self> {
        let mut derivatives = vec![self.derivative()];
        while derivatives.len() < self.degree() {
            let next = derivatives[derivatives.len() - 1].derivative();
            derivatives.push(next);
        }
        derivatives
    }
}

impl<T: Scalar> ScalarFunction<T> for Polynomial<T> {
    fn eval(&self, x: T) -> T {
        self.evaluate(x)
    }
}

/// Modulus of the difference of two scalars.
pub fn distance<T: Scalar>(x: T, y: T) -> T::RealField {
    (x - y).modulus()
}

/// The cube roots of unity, $1$ and $-1/2 \pm (\sqrt{3}/2) i$.
pub fn cube_roots_of_unity() -> [nalgebra::Complex<f64>; 3] {
    let s = 3.0_f64.sqrt() / 2.0;
    [
        nalgebra::Complex::new(1.0, 0.0),
        nalgebra::Complex::new(-0.5, s),
        nalgebra::Complex::new(-0.5, -s),
    ]
}

thread_local! {
    // `None` outside of `capture_warnings`
    static CAPTURED: RefCell<Option<Vec<String>>> = RefCell::new(None);
}

/// Records warnings and errors logged on the calling thread, so that tests running in parallel
/// do not see each other's messages.
struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            CAPTURED.with(|captured| {
                if let Some(messages) = captured.borrow_mut().as_mut() {
                    messages.push(record.args().to_string());
                }
            });
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL_LOGGER: Once = Once::new();

/// Runs `f` and returns its result together with the warnings it logged on this thread.
pub fn capture_warnings<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    INSTALL_LOGGER.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Warn);
        }
    });

    CAPTURED.with(|captured| *captured.borrow_mut() = Some(Vec::new()));
    let result = f();
    let messages = CAPTURED
        .with(|captured| captured.borrow_mut().take())
        .unwrap_or_default();
    (result, messages)
}
