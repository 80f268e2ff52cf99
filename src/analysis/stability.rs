use crate::filter::FilterSpec;
use num::{BigRational, One, Signed, Zero};

/// True if every root of the denominator lies strictly inside the unit
/// circle.
///
/// The verdict comes from the Schur-Cohn step-down recursion on `a`, run in
/// exact rational arithmetic on the stored coefficients. Each step peels off
/// one reflection coefficient `k = a[m] / a[0]` and the filter is stable
/// exactly when every `|k| < 1`. Narrow low pass designs cluster their poles
/// next to z = 1, where rounded roots from `tf2zpk` can drift across the
/// unit circle although the coefficients themselves describe a decaying
/// system; this test does not depend on root finding.
///
/// A zero or non-finite leading coefficient is never stable.
///
/// # Examples
///
/// ```
/// use velocity_dsp::analysis::is_stable;
/// use velocity_dsp::filter::FilterSpec;
///
/// let decaying = FilterSpec::new(vec![1.0], vec![1.0, -0.9]).unwrap();
/// assert!(is_stable(&decaying));
///
/// let growing = FilterSpec::new(vec![1.0], vec![1.0, -1.1]).unwrap();
/// assert!(!is_stable(&growing));
/// ```
pub fn is_stable(spec: &FilterSpec) -> bool {
    let mut coeffs: Vec<BigRational> = match spec
        .a
        .iter()
        .map(|&c| BigRational::from_float(c))
        .collect::<Option<Vec<_>>>()
    {
        Some(coeffs) => coeffs,
        None => return false,
    };

    // Trailing zeros are poles at the origin.
    while coeffs.len() > 1 && coeffs.last().map_or(false, |c| c.is_zero()) {
        coeffs.pop();
    }
    if coeffs[0].is_zero() {
        return false;
    }
    let lead = coeffs[0].clone();
    let mut poly: Vec<BigRational> = coeffs.iter().map(|c| c / &lead).collect();

    let one = BigRational::one();
    while poly.len() > 1 {
        let m = poly.len() - 1;
        let k = poly[m].clone();
        if k.abs() >= one {
            return false;
        }
        let scale = &one - &k * &k;
        poly = (0..m)
            .map(|i| (&poly[i] - &k * &poly[m - i]) / &scale)
            .collect();
    }
    true
}

#[cfg(test)]
mod test {
    use crate::analysis::impulse_response;
    use crate::analysis::stability::*;
    use crate::filter::design::butter_lowpass;

    fn spec(a: Vec<f64>) -> FilterSpec {
        FilterSpec::new(vec![1.0], a).unwrap()
    }

    #[test]
    fn test_simple_denominators() {
        assert!(is_stable(&spec(vec![1.0])));
        assert!(is_stable(&spec(vec![1.0, -0.5])));
        assert!(is_stable(&spec(vec![2.0, 0.0, 0.5])));
        assert!(is_stable(&spec(vec![1.0, -0.5, 0.0, 0.0])));

        assert!(!is_stable(&spec(vec![1.0, -1.5])));
        // Double pole at z = 1 and a pair at z = +/-1.
        assert!(!is_stable(&spec(vec![1.0, -2.0, 1.0])));
        assert!(!is_stable(&spec(vec![1.0, 0.0, -1.0])));
        // Pair at radius 2 behind a small first reflection coefficient.
        assert!(!is_stable(&spec(vec![1.0, -0.5, 4.0])));
    }

    #[test]
    fn test_degenerate_denominators() {
        assert!(!is_stable(&spec(vec![0.0, 1.0])));
        assert!(!is_stable(&spec(vec![0.0, 0.0])));
        assert!(!is_stable(&spec(vec![1.0, std::f64::NAN])));
        assert!(!is_stable(&spec(vec![1.0, std::f64::INFINITY])));
    }

    #[test]
    fn test_narrow_designs_are_stable() {
        // Pole clusters near z = 1 that rounded roots misplace.
        for &(order, cutoff) in [(7, 1.0), (5, 0.1), (7, 249.0), (10, 5.0)].iter() {
            let design = butter_lowpass(cutoff, 500.0, order).unwrap();
            assert!(is_stable(&design), "order {} cutoff {}", order, cutoff);
        }

        // The impulse responses agree: both die out.
        for &(order, cutoff) in [(7, 1.0), (5, 0.1)].iter() {
            let design = butter_lowpass(cutoff, 500.0, order).unwrap();
            let impulse = impulse_response(&design, 200_000).unwrap();
            let largest = |values: &[f64]| values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
            let peak = largest(&impulse);
            let tail = largest(&impulse[impulse.len() - 100..]);
            assert!(peak > 0.0);
            assert!(tail < peak * 1e-12, "order {} cutoff {} tail {}", order, cutoff, tail);
        }
    }
}
