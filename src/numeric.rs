//! Hand-rolled numeric primitives.
//!
//! Nothing in here calls into the platform's maths library. The
//! transcendental functions are all iterative approximations which stop once
//! the next term is small enough or they run out of iterations, whichever
//! comes first. The stopping rules are spelled out as [`Series`] constants so
//! callers can pick their own.

use crate::error::DomainError;

/// The ratio of a circle's circumference to its diameter.
#[allow(clippy::excessive_precision)]
pub const PI: f64 = 3.1415926535897932385;

/// Euler's number.
#[allow(clippy::excessive_precision)]
pub const E: f64 = 2.7182818284590452354;

const TAU: f64 = 2.0 * PI;

/// When to stop an iterative approximation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Series {
    /// Stop as soon as a term's magnitude is at or below this.
    pub tolerance: f64,
    /// Give up after this many terms, converged or not.
    pub max_terms: usize,
}

impl Series {
    pub const fn new(tolerance: f64, max_terms: usize) -> Self {
        Series {
            tolerance,
            max_terms,
        }
    }
}

/// The Taylor series used by [`exp()`].
pub const EXP_SERIES: Series = Series::new(1e-15, 1000);

/// The series used by [`log()`].
pub const LOG_SERIES: Series = Series::new(1e-15, 1000);

/// The Taylor series used by [`sin()`] and [`cos()`].
pub const TRIG_SERIES: Series = Series::new(1e-15, 100);

/// Newton-Raphson for [`sqrt()`]. Here the tolerance is a strict bound on
/// the difference between successive guesses.
pub const SQRT_NEWTON: Series = Series::new(1e-10, 1000);

/// [`tan()`] is undefined when `|cos(x)|` drops below this.
pub const TAN_ASYMPTOTE: f64 = 1e-10;

pub fn abs(x: f64) -> f64 {
    if x < 0.0 {
        -x
    } else {
        x
    }
}

/// Square root, using [`SQRT_NEWTON`].
pub fn sqrt(x: f64) -> Result<f64, DomainError> { sqrt_with(x, SQRT_NEWTON) }

/// Square root by Newton-Raphson, starting from `x` itself and iterating
/// `guess = (guess + x/guess) / 2`.
pub fn sqrt_with(x: f64, newton: Series) -> Result<f64, DomainError> {
    if x < 0.0 {
        return Err(DomainError::new(
            "sqrt",
            "square root of a negative number",
        ));
    }
    if x == 0.0 || !x.is_finite() {
        return Ok(x);
    }

    let mut guess = x;

    for _ in 0..newton.max_terms {
        let next = 0.5 * (guess + x / guess);

        if abs(guess - next) < newton.tolerance {
            return Ok(next);
        }
        guess = next;
    }

    log::debug!(
        "sqrt({}) stopped after {} iterations without converging",
        x,
        newton.max_terms
    );
    Ok(guess)
}

/// `e^x`, using [`EXP_SERIES`].
pub fn exp(x: f64) -> f64 { exp_with(x, EXP_SERIES) }

/// `e^x` from its Taylor series, `Σ xⁿ/n!`.
///
/// Negative arguments are evaluated as `1/e^-x` so the terms never alternate
/// in sign. Large arguments may hit `max_terms` before converging.
pub fn exp_with(x: f64, series: Series) -> f64 {
    if x.is_nan() {
        return x;
    }
    if x < 0.0 {
        return 1.0 / exp_with(-x, series);
    }

    let mut sum = 1.0;
    let mut term = 1.0;

    for n in 1..=series.max_terms {
        term *= x / n as f64;
        sum += term;

        if abs(term) <= series.tolerance {
            return sum;
        }
    }

    log::debug!(
        "exp({}) stopped after {} terms without converging",
        x,
        series.max_terms
    );
    sum
}

/// The natural logarithm, using [`LOG_SERIES`].
pub fn log(x: f64) -> Result<f64, DomainError> { log_with(x, LOG_SERIES) }

/// The natural logarithm from the series
///
/// ```text
/// ln(x) = 2 * Σ r^(2k+1) / (2k+1),  where r = (x-1)/(x+1)
/// ```
///
/// Convergence slows down as `x` moves away from `1`.
pub fn log_with(x: f64, series: Series) -> Result<f64, DomainError> {
    if x <= 0.0 {
        return Err(DomainError::new(
            "log",
            "logarithm of a non-positive number",
        ));
    }
    if !x.is_finite() {
        return Ok(x);
    }

    let ratio = (x - 1.0) / (x + 1.0);
    let ratio_squared = ratio * ratio;
    let mut power = ratio;
    let mut sum = 0.0;

    for k in 0..series.max_terms {
        if abs(power) <= series.tolerance {
            return Ok(2.0 * sum);
        }

        sum += power / (2 * k + 1) as f64;
        power *= ratio_squared;
    }

    log::debug!(
        "log({}) stopped after {} terms without converging",
        x,
        series.max_terms
    );
    Ok(2.0 * sum)
}

/// Raise `base` to `exponent`, computed as `e^(exponent * ln|base|)`.
///
/// A zero base always gives `0` (even `0^0`), and a zero exponent gives `1`.
/// Negative bases only accept whole exponents.
pub fn pow(base: f64, exponent: f64) -> Result<f64, DomainError> {
    if base == 0.0 {
        return Ok(0.0);
    }
    if exponent == 0.0 {
        return Ok(1.0);
    }

    // exact for any magnitude, unlike a cast to an integer type
    let parity = exponent % 2.0;
    let is_odd = abs(parity) == 1.0;
    let is_integer = parity == 0.0 || is_odd;

    if base < 0.0 && !is_integer {
        return Err(DomainError::new(
            "pow",
            "negative base with a non-integer exponent",
        ));
    }

    let magnitude = exp(exponent * log(abs(base))?);

    if base < 0.0 && is_odd {
        Ok(-magnitude)
    } else {
        Ok(magnitude)
    }
}

/// Bring an angle into `[-π, π]`.
fn reduce_angle(x: f64) -> f64 {
    let mut x = x;

    if abs(x) > PI {
        // skip the bulk of the turns in one go
        x -= TAU * ((x + PI) / TAU).floor();
    }

    while x > PI {
        x -= TAU;
    }
    while x < -PI {
        x += TAU;
    }

    x
}

/// The sine of an angle in radians, using [`TRIG_SERIES`].
pub fn sin(x: f64) -> f64 { sin_with(x, TRIG_SERIES) }

pub fn sin_with(x: f64, series: Series) -> f64 {
    if !x.is_finite() {
        return f64::NAN;
    }

    let x = reduce_angle(x);
    let mut sum = 0.0;
    let mut term = x;

    for n in 1..=series.max_terms {
        if abs(term) <= series.tolerance {
            return sum;
        }

        sum += term;
        let n = n as f64;
        term *= -x * x / ((2.0 * n) * (2.0 * n + 1.0));
    }

    sum
}

/// The cosine of an angle in radians, using [`TRIG_SERIES`].
pub fn cos(x: f64) -> f64 { cos_with(x, TRIG_SERIES) }

pub fn cos_with(x: f64, series: Series) -> f64 {
    if !x.is_finite() {
        return f64::NAN;
    }

    let x = reduce_angle(x);
    let mut sum = 0.0;
    let mut term = 1.0;

    for n in 0..series.max_terms {
        if abs(term) <= series.tolerance {
            return sum;
        }

        sum += term;
        let n = n as f64;
        term *= -x * x / ((2.0 * n + 1.0) * (2.0 * n + 2.0));
    }

    sum
}

/// The tangent of an angle in radians.
pub fn tan(x: f64) -> Result<f64, DomainError> {
    let cosine = cos(x);

    if abs(cosine) < TAN_ASYMPTOTE {
        return Err(DomainError::new(
            "tan",
            "tangent is undefined where the cosine is zero",
        ));
    }

    Ok(sin(x) / cosine)
}

/// `n!`, or `0` for negative `n`. Wraps around once the result no longer
/// fits in an `i64` (anything past `20!`).
pub fn factorial(n: i64) -> i64 {
    if n < 0 {
        return 0;
    }

    (2..=n).fold(1_i64, |acc, i| acc.wrapping_mul(i))
}

pub fn to_radians(degrees: f64) -> f64 { degrees * PI / 180.0 }

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn constants() {
        assert_eq!(PI, std::f64::consts::PI);
        assert_eq!(E, std::f64::consts::E);
    }

    #[test]
    fn absolute_value() {
        assert_eq!(abs(5.0), 5.0);
        assert_eq!(abs(-5.0), 5.0);
        assert_eq!(abs(0.0), 0.0);
    }

    #[test]
    fn square_roots() {
        let inputs = vec![(4.0, 2.0), (9.0, 3.0), (100.0, 10.0), (0.0, 0.0)];

        for (x, should_be) in inputs {
            let got = sqrt(x).unwrap();
            assert_abs_diff_eq!(got, should_be, epsilon = 1e-9);
        }

        assert_abs_diff_eq!(
            sqrt(2.0).unwrap(),
            std::f64::consts::SQRT_2,
            epsilon = 1e-9
        );
    }

    #[test]
    fn square_root_squared_is_the_original_number() {
        for &x in &[0.0, 1e-4, 0.25, 1.0, 2.0, 3.7, 42.0, 1234.5, 1e6] {
            let root = sqrt(x).unwrap();
            assert_abs_diff_eq!(root * root, x, epsilon = 1e-6);
        }
    }

    #[test]
    fn square_root_of_a_negative_number() {
        let got = sqrt(-1.0).unwrap_err();
        assert_eq!(got.function, "sqrt");
    }

    #[test]
    fn square_root_passes_non_finite_values_through() {
        assert!(sqrt(f64::NAN).unwrap().is_nan());
        assert_eq!(sqrt(f64::INFINITY).unwrap(), f64::INFINITY);
    }

    #[test]
    fn newton_tolerance_is_a_strict_bound() {
        // the first step goes from 16 to 8.5, exactly the tolerance
        let got = sqrt_with(16.0, Series::new(7.5, 1000)).unwrap();

        assert!(got < 8.5, "{}", got);
    }

    #[test]
    fn newton_stops_at_the_iteration_cap() {
        // (16 + 16/16) / 2 = 8.5 after a single step
        let got = sqrt_with(16.0, Series::new(1e-10, 1)).unwrap();
        assert_eq!(got, 8.5);
    }

    #[test]
    fn exponentials() {
        assert_abs_diff_eq!(exp(0.0), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(exp(1.0), E, epsilon = 1e-9);
        assert_relative_eq!(exp(2.0), 7.38905609893065, max_relative = 1e-9);
        assert_relative_eq!(
            exp(-1.0),
            0.36787944117144233,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            exp(10.0),
            22026.465794806718,
            max_relative = 1e-9
        );
    }

    #[test]
    fn exponential_series_respects_its_term_cap() {
        // 1 + 1 + 1/2 + 1/6
        let got = exp_with(1.0, Series::new(1e-15, 3));
        assert_relative_eq!(got, 1.0 + 1.0 + 0.5 + 1.0 / 6.0);
    }

    #[test]
    fn exponential_series_respects_its_tolerance() {
        // the first term (0.5) is already within tolerance
        let got = exp_with(0.5, Series::new(1.0, 1000));
        assert_eq!(got, 1.5);
    }

    #[test]
    fn natural_logarithms() {
        assert_abs_diff_eq!(log(1.0).unwrap(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(log(E).unwrap(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(
            log(10.0).unwrap(),
            std::f64::consts::LN_10,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            log(0.5).unwrap(),
            -std::f64::consts::LN_2,
            epsilon = 1e-9
        );
    }

    #[test]
    fn logarithm_of_non_positive_numbers() {
        assert_eq!(log(0.0).unwrap_err().function, "log");
        assert_eq!(log(-5.0).unwrap_err().function, "log");
    }

    #[test]
    fn logarithm_series_respects_its_term_cap() {
        let x = 3.0;
        let ratio = (x - 1.0) / (x + 1.0);

        let got = log_with(x, Series::new(1e-15, 1)).unwrap();

        assert_eq!(got, 2.0 * ratio);
    }

    #[test]
    fn logarithm_series_respects_its_tolerance() {
        // r = 0.5, so the terms are 0.5 then 0.125, which is within tolerance
        let got = log_with(3.0, Series::new(0.3, 1000)).unwrap();

        assert_eq!(got, 1.0);
    }

    #[test]
    fn exp_undoes_log() {
        for &x in &[0.01, 0.5, 1.0, 2.0, 3.3, 10.0, 42.0, 100.0] {
            let got = exp(log(x).unwrap());
            assert_relative_eq!(got, x, max_relative = 1e-5);
        }
    }

    #[test]
    fn powers() {
        let inputs = vec![
            (2.0, 3.0, 8.0),
            (5.0, 2.0, 25.0),
            (2.0, 0.5, std::f64::consts::SQRT_2),
            (10.0, -1.0, 0.1),
            (-2.0, 3.0, -8.0),
            (-2.0, 2.0, 4.0),
            (0.0, 5.0, 0.0),
            (0.0, 0.0, 0.0),
            (7.0, 0.0, 1.0),
        ];

        for (base, exponent, should_be) in inputs {
            let got = pow(base, exponent).unwrap();
            assert_abs_diff_eq!(got, should_be, epsilon = 1e-6);
        }
    }

    #[test]
    fn negative_base_with_huge_integer_exponents() {
        // both exponents are even and too big for an i64
        assert_eq!(pow(-1.0, 1e19), Ok(1.0));
        assert_eq!(
            pow(-2.0, 9_223_372_036_854_775_808.0),
            Ok(f64::INFINITY)
        );
        assert_eq!(pow(-1.0, 1e19 + 2048.0), Ok(1.0));
    }

    #[test]
    fn negative_base_with_odd_exponents() {
        assert_eq!(pow(-1.0, 9_007_199_254_740_991.0), Ok(-1.0));
        assert_abs_diff_eq!(pow(-2.0, -1.0).unwrap(), -0.5, epsilon = 1e-9);
    }

    #[test]
    fn negative_base_with_non_finite_exponent() {
        assert!(pow(-2.0, f64::INFINITY).is_err());
        assert!(pow(-2.0, f64::NAN).is_err());
    }

    #[test]
    fn negative_base_with_fractional_exponent() {
        let got = pow(-8.0, 1.0 / 3.0).unwrap_err();
        assert_eq!(got.function, "pow");
    }

    #[test]
    fn trigonometry_at_well_known_angles() {
        assert_abs_diff_eq!(sin(0.0), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(sin(PI / 2.0), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(sin(PI), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(sin(-PI / 6.0), -0.5, epsilon = 1e-9);

        assert_abs_diff_eq!(cos(0.0), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cos(PI / 2.0), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(cos(PI), -1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cos(PI / 3.0), 0.5, epsilon = 1e-9);

        assert_abs_diff_eq!(tan(0.0).unwrap(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(tan(PI / 4.0).unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn trigonometry_wraps_around_full_turns() {
        for &x in &[0.3, 1.0, 2.5, -2.0] {
            for &turns in &[1.0, -1.0, 3.0, 100.0] {
                let shifted = x + turns * TAU;
                assert_abs_diff_eq!(sin(shifted), sin(x), epsilon = 1e-9);
                assert_abs_diff_eq!(cos(shifted), cos(x), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn huge_angles_still_terminate() {
        let got = sin(1e20);
        assert!(got.is_finite());
        assert!(abs(got) <= 1.0 + 1e-9);
        assert!(sin(f64::INFINITY).is_nan());
        assert!(cos(f64::NAN).is_nan());
    }

    #[test]
    fn trig_series_respects_its_term_cap() {
        // only the leading term survives
        assert_eq!(sin_with(0.5, Series::new(1e-15, 1)), 0.5);
        assert_eq!(cos_with(0.5, Series::new(1e-15, 1)), 1.0);
    }

    #[test]
    fn trig_series_respects_its_tolerance() {
        // sin: 0.5, then -0.5^3/6 which is within tolerance
        assert_eq!(sin_with(0.5, Series::new(0.1, 100)), 0.5);
        // cos: 1, then -0.5^2/2 which is within tolerance
        assert_eq!(cos_with(0.5, Series::new(0.2, 100)), 1.0);
    }

    #[test]
    fn tangent_near_an_asymptote() {
        let got = tan(PI / 2.0).unwrap_err();
        assert_eq!(got.function, "tan");
        assert!(tan(-PI / 2.0).is_err());
    }

    #[test]
    fn factorials() {
        let inputs = vec![(-3, 0), (0, 1), (1, 1), (5, 120), (10, 3_628_800)];

        for (n, should_be) in inputs {
            assert_eq!(factorial(n), should_be, "{}!", n);
        }

        assert_eq!(factorial(20), 2_432_902_008_176_640_000);
    }

    #[test]
    fn degrees_to_radians() {
        assert_abs_diff_eq!(to_radians(0.0), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(to_radians(180.0), PI, epsilon = 1e-9);
        assert_abs_diff_eq!(to_radians(90.0), PI / 2.0, epsilon = 1e-9);
    }
}
