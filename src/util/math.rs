use crate::util::DspError;
use num::{Complex, Zero};

/// Iteration cap for the simultaneous root iteration.
const MAX_ROOT_ITERATIONS: usize = 500;

/// Evaluates a polynomial at `z` using Horner's method.
///
/// Coefficients are ordered from the highest power down to the constant
/// term, i.e. `coeffs[0] * z^n + ... + coeffs[n]`.
///
/// # Arguments
///
/// * `coeffs` - Real polynomial coefficients, highest power first.
/// * `z` - Point at which to evaluate the polynomial.
///
/// # Examples
///
/// ```
/// use velocity_dsp::util::math::polyval;
/// use num::Complex;
///
/// // z^2 - 1 evaluated at z = 2
/// let val = polyval(&[1.0, 0.0, -1.0], Complex::new(2.0, 0.0));
/// assert_eq!(val, Complex::new(3.0, 0.0));
/// ```
pub fn polyval(coeffs: &[f64], z: Complex<f64>) -> Complex<f64> {
    coeffs
        .iter()
        .fold(Complex::zero(), |acc, &c| acc * z + Complex::new(c, 0.0))
}

/// Expands a monic polynomial from its roots.
///
/// The returned coefficients are ordered highest power first, so the
/// first entry is always one.
///
/// # Examples
///
/// ```
/// use velocity_dsp::util::math::poly;
/// use num::Complex;
///
/// let c = poly(&[Complex::new(1.0, 0.0), Complex::new(-1.0, 0.0)]);
/// assert_eq!(c, vec![
///     Complex::new(1.0, 0.0),
///     Complex::new(0.0, 0.0),
///     Complex::new(-1.0, 0.0),
/// ]);
/// ```
pub fn poly(roots: &[Complex<f64>]) -> Vec<Complex<f64>> {
    let mut coeffs = vec![Complex::new(1.0, 0.0)];
    for root in roots {
        coeffs.push(Complex::zero());
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= root * prev;
        }
    }
    coeffs
}

/// Finds every root of a real polynomial.
///
/// Coefficients are ordered highest power first. Leading zeros are
/// ignored and trailing zeros become roots at the origin, so a polynomial
/// of degree `n` always yields `n` roots. Roots are returned in the order
/// the solver settles them; callers comparing roots should treat the
/// result as a set.
///
/// Degree one is solved in closed form. Higher degrees use the
/// Aberth-Ehrlich simultaneous iteration, where each root estimate is
/// corrected by its Newton step deflated against all other estimates.
///
/// # Arguments
///
/// * `coeffs` - Real polynomial coefficients, highest power first.
///
/// # Examples
///
/// ```
/// use velocity_dsp::util::math::roots;
///
/// // z^2 - 3z + 2 = (z - 1)(z - 2)
/// let mut r: Vec<f64> = roots(&[1.0, -3.0, 2.0]).unwrap().iter().map(|z| z.re).collect();
/// r.sort_by(|a, b| a.partial_cmp(b).unwrap());
/// assert!((r[0] - 1.0).abs() < 1e-12);
/// assert!((r[1] - 2.0).abs() < 1e-12);
/// ```
pub fn roots(coeffs: &[f64]) -> Result<Vec<Complex<f64>>, DspError> {
    if coeffs.iter().any(|c| !c.is_finite()) {
        return Err(DspError::Convergence(
            "polynomial has non-finite coefficients".to_string(),
        ));
    }

    let first = match coeffs.iter().position(|&c| c != 0.0) {
        Some(ix) => ix,
        None => {
            return Err(DspError::Domain(
                "cannot find roots of the zero polynomial".to_string(),
            ))
        }
    };
    let last = coeffs.iter().rposition(|&c| c != 0.0).unwrap_or(first);

    let mut found = vec![Complex::zero(); coeffs.len() - 1 - last];
    let lead = coeffs[first];
    let monic: Vec<f64> = coeffs[first..=last].iter().map(|c| c / lead).collect();

    match monic.len() - 1 {
        0 => {}
        1 => found.push(Complex::new(-monic[1], 0.0)),
        _ => found.extend(aberth(&monic)?),
    }
    Ok(found)
}

/// Aberth-Ehrlich iteration on a monic polynomial with nonzero constant
/// term and degree of at least two.
fn aberth(monic: &[f64]) -> Result<Vec<Complex<f64>>, DspError> {
    let degree = monic.len() - 1;
    let derivative: Vec<f64> = monic[..degree]
        .iter()
        .enumerate()
        .map(|(i, c)| c * (degree - i) as f64)
        .collect();
    let magnitudes: Vec<f64> = monic.iter().map(|c| c.abs()).collect();

    // Start on a circle with the geometric mean radius of the roots, rotated
    // off the real axis so conjugate pairs can separate.
    let radius = monic[degree].abs().powf(1.0 / degree as f64);
    let mut z: Vec<Complex<f64>> = (0..degree)
        .map(|k| {
            let theta = 2.0 * std::f64::consts::PI * k as f64 / degree as f64 + 0.4;
            Complex::from_polar(&radius, &theta)
        })
        .collect();
    let mut settled = vec![false; degree];

    for _ in 0..MAX_ROOT_ITERATIONS {
        for i in 0..degree {
            if settled[i] {
                continue;
            }
            let p = polyval(monic, z[i]);

            // Stop once the residual is at the rounding level of the
            // evaluation itself.
            let bound = polyval(&magnitudes, Complex::new(z[i].norm(), 0.0)).re;
            if p.norm() <= 4.0 * degree as f64 * std::f64::EPSILON * bound {
                settled[i] = true;
                continue;
            }

            let dp = polyval(&derivative, z[i]);
            let newton = p / dp;
            let repulsion: Complex<f64> = (0..degree)
                .filter(|&j| j != i)
                .map(|j| (z[i] - z[j]).inv())
                .sum();
            let offset = newton / (Complex::new(1.0, 0.0) - newton * repulsion);
            if !offset.re.is_finite() || !offset.im.is_finite() {
                return Err(DspError::Convergence(format!(
                    "root iteration diverged at estimate {}",
                    z[i]
                )));
            }
            z[i] -= offset;
            if offset.norm() <= std::f64::EPSILON * (1.0 + z[i].norm()) {
                settled[i] = true;
            }
        }
        if settled.iter().all(|&s| s) {
            return Ok(z);
        }
    }

    Err(DspError::Convergence(format!(
        "root iteration did not settle within {} iterations",
        MAX_ROOT_ITERATIONS
    )))
}
