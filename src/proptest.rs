//! Strategies for generating root-finding problems with known roots.
use ::proptest::collection::vec;
use ::proptest::prelude::*;
use nalgebra::{Complex, ComplexField};
use std::f64::consts::PI;

/// Complex numbers whose real and imaginary parts are both drawn from `-range..range`.
pub fn complex_f64(range: f64) -> impl Strategy<Value = Complex<f64>> {
    [-range..range, -range..range].prop_map(|[re, im]| Complex::new(re, im))
}

/// A complex offset with modulus strictly less than `radius` and uniformly drawn argument.
pub fn complex_offset(radius: f64) -> impl Strategy<Value = Complex<f64>> {
    (0.0..radius, 0.0..2.0 * PI).prop_map(|(r, theta)| Complex::new(r * theta.cos(), r * theta.sin()))
}

/// `count` complex points in the square of half-width `range`, pairwise at least
/// `min_separation` apart.
///
/// Well separated points make for well conditioned polynomials when used as roots.
pub fn separated_complex_points(
    count: usize,
    range: f64,
    min_separation: f64,
) -> impl Strategy<Value = Vec<Complex<f64>>> {
    vec(complex_f64(range), count).prop_filter("points must be well separated", move |points| {
        points.iter().enumerate().all(|(i, p)| {
            points[i + 1..]
                .iter()
                .all(|q| (p - q).modulus() >= min_separation)
        })
    })
}
