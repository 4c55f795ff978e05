use num_complex::Complex64;
use std::f64::consts::PI;
use std::sync::OnceLock;

/// Number of terms in the rational expansion. Inside `|z| < 8` this keeps
/// `|Δw| / |w|` below about 3e-13; the real part close to the real axis is
/// only good to roughly 1e-14 `|w|` in absolute terms, so once
/// `exp(-x^2)` drops under that level its relative error grows.
const EXPANSION_TERMS: usize = 32;
const SAMPLE_COUNT: usize = 2 * EXPANSION_TERMS;

/// `|z|^2` from which the continued fraction replaces the rational expansion.
const ASYMPTOTIC_RADIUS_SQUARED: f64 = 64.0;
/// Depth of the continued fraction. At `|z| >= 8` both parts converge to
/// about 1e-15 relative.
const CONTINUED_FRACTION_DEPTH: usize = 20;
/// Below this imaginary part the `exp(-z^2)` term is not negligible next to
/// the continued fraction on the real part.
const GAUSSIAN_TERM_CUTOFF: f64 = 0.5;

const FRAC_1_SQRT_PI: f64 = 0.564_189_583_547_756_286_948_079_451_560_772_586_f64;

#[derive(Debug)]
struct WeidemanCoefficients {
    scale: f64,
    polynomial: [f64; EXPANSION_TERMS],
}

impl WeidemanCoefficients {
    fn new() -> Self {
        let terms = EXPANSION_TERMS as f64;
        let scale = (terms / std::f64::consts::SQRT_2).sqrt();
        let samples = SAMPLE_COUNT as f64;

        let sample = |k: usize| -> f64 {
            let t = scale * (k as f64 * PI / samples / 2.0).tan();
            (-t * t).exp() * (scale * scale + t * t)
        };
        let samples_at: Vec<f64> = (0..SAMPLE_COUNT).map(sample).collect();

        let mut polynomial = [0.0; EXPANSION_TERMS];
        for (index, coefficient) in polynomial.iter_mut().enumerate() {
            let order = (index + 1) as f64;
            let mut sum = samples_at[0];
            for (k, value) in samples_at.iter().enumerate().skip(1) {
                sum += 2.0 * value * (PI * order * k as f64 / samples).cos();
            }
            *coefficient = sum / (2.0 * samples);
        }

        Self { scale, polynomial }
    }
}

fn coefficients() -> &'static WeidemanCoefficients {
    static COEFFICIENTS: OnceLock<WeidemanCoefficients> = OnceLock::new();
    COEFFICIENTS.get_or_init(WeidemanCoefficients::new)
}

/// Faddeeva function `w(z) = exp(-z^2) erfc(-iz)`.
///
/// Upper half-plane: Weideman (1994) rational expansion for `|z| < 8`, the
/// Laplace continued fraction beyond. The lower half-plane uses
/// `w(z) = 2 exp(-z^2) - w(-z)`.
pub fn faddeeva(z: Complex64) -> Complex64 {
    if z.im < 0.0 {
        let reflected = -z;
        return (-(z * z)).exp() * 2.0 - faddeeva_upper(reflected);
    }
    faddeeva_upper(z)
}

fn faddeeva_upper(z: Complex64) -> Complex64 {
    if z.norm_sqr() >= ASYMPTOTIC_RADIUS_SQUARED {
        return faddeeva_continued_fraction(z);
    }
    faddeeva_rational(z)
}

/// `w(z) = (i/√π) / (z - (1/2) / (z - 1 / (z - (3/2) / (z - ...))))`.
///
/// The fraction alone drops the `exp(-z^2)` part of `Re w` on the real axis,
/// so that term is added back when `z` sits close to it.
fn faddeeva_continued_fraction(z: Complex64) -> Complex64 {
    let mut tail = z;
    for depth in (1..=CONTINUED_FRACTION_DEPTH).rev() {
        tail = z - (depth as f64 * 0.5) / tail;
    }
    let fraction = Complex64::new(0.0, FRAC_1_SQRT_PI) / tail;

    if z.im < GAUSSIAN_TERM_CUTOFF {
        fraction + (-(z * z)).exp()
    } else {
        fraction
    }
}

fn faddeeva_rational(z: Complex64) -> Complex64 {
    let coefficients = coefficients();
    let i = Complex64::new(0.0, 1.0);
    let scale = Complex64::new(coefficients.scale, 0.0);

    let denominator = scale - i * z;
    let mapped = (scale + i * z) / denominator;

    let mut polynomial = Complex64::new(coefficients.polynomial[EXPANSION_TERMS - 1], 0.0);
    for coefficient in coefficients.polynomial[..EXPANSION_TERMS - 1].iter().rev() {
        polynomial = polynomial * mapped + *coefficient;
    }

    polynomial * 2.0 / (denominator * denominator) + FRAC_1_SQRT_PI / denominator
}

/// Real part of `w(x + iy)`: the unnormalized Voigt function `K(x, y)`.
pub fn voigt_function(x: f64, y: f64) -> f64 {
    faddeeva(Complex64::new(x, y)).re
}
