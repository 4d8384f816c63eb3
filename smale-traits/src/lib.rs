use nalgebra::{ComplexField, RealField};

pub use nalgebra;

pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}

/// A real or complex scalar.
///
/// Everything in `smale` is written once against this trait, so the same routine serves
/// `f64` and `Complex<f64>` alike. The modulus of a scalar lives in [`ComplexField::RealField`],
/// which generic code further constrains to be [`Real`].
pub trait Scalar: ComplexField + Copy {}

impl<T: ComplexField + Copy> Scalar for T {}
