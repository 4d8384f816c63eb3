use matrixcompare::assert_scalar_eq;
use nalgebra::{Complex, ComplexField};
use smale::invariants::{alpha, beta, gamma, invariants, smale_alpha0, Invariants};
use smale::smale_traits::Scalar;
use smale::SmaleError;
use util::Polynomial;

fn cube_minus_one<T: Scalar>() -> Polynomial<T> {
    Polynomial::from_real_coefficients(&[-1.0, 0.0, 0.0, 1.0])
}

#[test]
fn alpha0_matches_smale_constant() {
    let alpha0: f64 = smale_alpha0::<f64>();
    assert_scalar_eq!(alpha0, 0.15767078078675478, comp = abs, tol = 1e-14);
    assert_scalar_eq!(alpha0, (13.0 - 3.0 * 17.0_f64.sqrt()) / 4.0, comp = float);
}

#[test]
fn invariants_of_cubic_near_real_root() {
    let p = cube_minus_one::<f64>();
    let df = p.derivatives();
    let x = 1.1;

    // f(x) = 0.331, f'(x) = 3.63, f''(x) = 6.6, f'''(x) = 6
    let expected_beta = 0.331 / 3.63;
    let expected_gamma = f64::max(6.6 / (2.0 * 3.63), (6.0_f64 / (6.0 * 3.63)).sqrt());

    let Invariants { beta, gamma, alpha } = invariants(p.function(), x, &df, 0.0).unwrap();
    assert_scalar_eq!(beta, expected_beta, comp = abs, tol = 1e-12);
    assert_scalar_eq!(gamma, expected_gamma, comp = abs, tol = 1e-12);
    assert_scalar_eq!(alpha, expected_beta * expected_gamma, comp = abs, tol = 1e-12);
    assert!(alpha <= smale_alpha0::<f64>());
}

#[test]
fn individual_invariants_agree_with_triple() {
    let p = cube_minus_one::<f64>();
    let df = p.derivatives();
    let x = 1.3;

    let triple = invariants(p.function(), x, &df, 0.0).unwrap();
    assert_eq!(beta(p.function(), x, &df, 0.0).unwrap(), triple.beta);
    assert_eq!(gamma(x, &df, 0.0).unwrap(), triple.gamma);
    assert_eq!(alpha(p.function(), x, &df, 0.0).unwrap(), triple.alpha);
}

#[test]
fn gamma_takes_maximum_over_derivatives() {
    // f(x) = x + x^3 at x = 0: f' = 1, f'' = 0, f''' = 6.
    // The k = 1 term vanishes, the k = 2 term is (6 / 3!)^(1/2) = 1.
    let f = |x: f64| x + x * x * x;
    let df: [fn(f64) -> f64; 3] = [|x| 1.0 + 3.0 * x * x, |x| 6.0 * x, |_| 6.0];

    let triple = invariants(f, 0.0, &df, 0.0).unwrap();
    assert_eq!(triple.beta, 0.0);
    assert_scalar_eq!(triple.gamma, 1.0, comp = abs, tol = 1e-14);
    assert_eq!(triple.alpha, 0.0);
}

#[test]
fn gamma_is_zero_with_only_first_derivative() {
    let f = |x: f64| x * x - 2.0;
    let df = [|x: f64| 2.0 * x];

    let triple = invariants(f, 1.0, &df, 0.0).unwrap();
    assert_scalar_eq!(triple.beta, 0.5, comp = float);
    assert_eq!(triple.gamma, 0.0);
    assert_eq!(triple.alpha, 0.0);
    assert!(triple.is_certified(smale_alpha0::<f64>()));
}

#[test]
fn gamma_does_not_overflow_for_long_derivative_sequences() {
    // Every derivative of exp is exp, so at x = 0 the terms are (1 / (k + 1)!)^(1/k),
    // maximized at k = 1. A naive factorial overflows long before k = 200.
    let f = |x: f64| x.exp();
    let exp: fn(f64) -> f64 = |x| x.exp();
    let df = vec![exp; 200];

    let triple = invariants(f, 0.0, &df, 0.0).unwrap();
    assert_scalar_eq!(triple.beta, 1.0, comp = float);
    assert_scalar_eq!(triple.gamma, 0.5, comp = abs, tol = 1e-14);
    assert!(triple.gamma.is_finite());
}

#[test]
fn infinite_higher_derivative_is_never_certified() {
    let f = |x: f64| x - 1.0;
    let df: [fn(f64) -> f64; 2] = [|_| 1.0, |_| f64::INFINITY];

    let triple = invariants(f, 1.5, &df, 0.0).unwrap();
    assert!(!triple.is_certified(smale_alpha0::<f64>()));
}

#[test]
fn singular_first_derivative_is_reported() {
    let p = Polynomial::<f64>::from_real_coefficients(&[0.0, 0.0, 1.0]);
    let df = p.derivatives();

    let err = invariants(p.function(), 0.0, &df, 0.0).unwrap_err();
    assert_eq!(
        err,
        SmaleError::SingularDerivative {
            iteration: 0,
            modulus: 0.0
        }
    );
    assert!(matches!(gamma(0.0, &df, 0.0), Err(SmaleError::SingularDerivative { .. })));
    assert!(matches!(
        beta(p.function(), 0.0, &df, 0.0),
        Err(SmaleError::SingularDerivative { .. })
    ));
}

#[test]
fn non_finite_first_derivative_is_reported_as_singular() {
    let f = |x: f64| x - 1.0;
    let overflowing: [fn(f64) -> f64; 2] = [|_| f64::INFINITY, |_| 1.0];
    let undefined: [fn(f64) -> f64; 2] = [|_| f64::NAN, |_| 1.0];

    let err = invariants(f, 1.5, &overflowing, 0.0).unwrap_err();
    assert_eq!(
        err,
        SmaleError::SingularDerivative {
            iteration: 0,
            modulus: f64::INFINITY
        }
    );
    match invariants(f, 1.5, &undefined, 0.0) {
        Err(SmaleError::SingularDerivative { iteration: 0, modulus }) => assert!(modulus.is_nan()),
        other => panic!("Expected SingularDerivative, got {:?}", other),
    }
    assert!(err.to_string().contains("not finite"));
}

#[test]
fn derivative_tolerance_flags_nearly_singular_points() {
    let p = Polynomial::<f64>::from_real_coefficients(&[0.0, 0.0, 1.0]);
    let df = p.derivatives();

    // f'(1e-12) = 2e-12
    assert!(invariants(p.function(), 1e-12, &df, 0.0).is_ok());
    assert!(matches!(
        invariants(p.function(), 1e-12, &df, 1e-10),
        Err(SmaleError::SingularDerivative { iteration: 0, .. })
    ));
}

#[test]
fn empty_derivative_sequence_is_rejected() {
    let df: Vec<fn(f64) -> f64> = Vec::new();
    let err = invariants(|x: f64| x, 1.0, &df, 0.0).unwrap_err();
    assert_eq!(err, SmaleError::EmptyDerivativeSequence);
}

#[test]
fn complex_invariants_are_conjugate_symmetric() {
    let p = cube_minus_one::<Complex<f64>>();
    let df = p.derivatives();
    let x = Complex::new(-0.5, 1.0);

    let upper = invariants(p.function(), x, &df, 0.0).unwrap();
    let lower = invariants(p.function(), x.conj(), &df, 0.0).unwrap();
    assert_eq!(upper, lower);

    // |f(x)| = |0.375 - 0.25i|, |f'(x)| = |-2.25 - 3i| = 3.75
    let expected_beta = Complex::new(0.375, -0.25).modulus() / 3.75;
    assert_scalar_eq!(upper.beta, expected_beta, comp = abs, tol = 1e-12);
    assert!(upper.gamma > 0.0);
    assert!(upper.is_certified(smale_alpha0::<f64>()));
}

#[test]
fn root_distance_bound_contains_root() {
    let p = cube_minus_one::<f64>();
    let df = p.derivatives();
    let x = 1.1;

    let triple = invariants(p.function(), x, &df, 0.0).unwrap();
    assert!(triple.is_certified(smale_alpha0::<f64>()));
    assert!((x - 1.0_f64).abs() <= triple.root_distance_bound());
}
