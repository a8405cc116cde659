use nalgebra::{stack, Complex, DMatrix, DVector};

pub fn polynomial(roots: &[Complex<f64>]) -> DVector<Complex<f64>> {
    let mut coeffs = DVector::from_vec(vec![Complex::new(1.0, 0.0)]);
    for root in roots {
        coeffs = convolve(
            &coeffs,
            &DVector::from_vec(vec![Complex::new(1.0, 0.0), -root]),
        );
    }

    coeffs
}

pub fn convolve(a: &DVector<Complex<f64>>, b: &DVector<Complex<f64>>) -> DVector<Complex<f64>> {
    let n = a.len();
    let m = b.len();
    let mut result = DVector::from_element(n + m - 1, Complex::new(0.0, 0.0));

    for i in 0..(n + m - 1) {
        let mut sum = Complex::new(0.0, 0.0);
        for k in 0..=i {
            if k < n && (i - k) < m {
                sum += a[k] * b[i - k];
            }
        }
        result[i] = sum;
    }

    result
}

/// Roots of a polynomial with descending-power coefficients, computed as the
/// eigenvalues of its companion matrix.
pub fn polynomial_roots(coeffs: &DVector<f64>) -> Vec<Complex<f64>> {
    assert!(coeffs[0] != 0.0, "Leading coefficient must be nonzero.");

    let n = coeffs.len() - 1;
    if n == 0 {
        return Vec::new();
    }

    let monic = coeffs.clone() / coeffs[0];
    let companion = stack![
        -monic.rows(1, n).transpose();
        DMatrix::identity(n - 1, n)
    ];

    companion.complex_eigenvalues().iter().copied().collect()
}

pub fn reverse_bessel_polynomial(order: usize) -> DVector<f64> {
    let mut coeffs = DVector::zeros(order + 1);
    coeffs[0] = 1.0;
    for k in 0..order {
        coeffs[order - k] = (factorial(2 * order - k)
            / (usize::pow(2, (order - k) as u32) * factorial(k) * factorial(order - k)))
            as f64;
    }

    coeffs
}

pub fn factorial(n: usize) -> usize {
    if n == 0 {
        1
    } else {
        n * factorial(n - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    #[test]
    fn test_polynomial() {
        let roots = [
            Complex::new(1.0, 0.0),
            Complex::new(2.0, 0.0),
            Complex::new(3.0, 0.0),
        ];
        let result = polynomial(&roots);
        assert_eq!(
            result,
            dvector![
                Complex::new(1.0, 0.0),
                Complex::new(-6.0, 0.0),
                Complex::new(11.0, 0.0),
                Complex::new(-6.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_polynomial_roots_real() {
        let roots = polynomial_roots(&dvector![1.0, -6.0, 11.0, -6.0]);
        let mut reals: Vec<f64> = roots.iter().map(|r| r.re).collect();
        reals.sort_by(f64::total_cmp);

        assert_eq!(roots.len(), 3);
        assert_relative_eq!(reals[0], 1.0, epsilon = 1e-10);
        assert_relative_eq!(reals[1], 2.0, epsilon = 1e-10);
        assert_relative_eq!(reals[2], 3.0, epsilon = 1e-10);
        for root in roots {
            assert_relative_eq!(root.im, 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_polynomial_roots_complex_pair() {
        // s^2 + 2s + 5 = (s + 1 - 2i)(s + 1 + 2i)
        let roots = polynomial_roots(&dvector![1.0, 2.0, 5.0]);
        assert_eq!(roots.len(), 2);
        for root in &roots {
            assert_relative_eq!(root.re, -1.0, epsilon = 1e-10);
            assert_relative_eq!(root.im.abs(), 2.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_polynomial_roots_scaled_leading_coefficient() {
        let roots = polynomial_roots(&dvector![2.0, -6.0, 4.0]);
        let mut reals: Vec<f64> = roots.iter().map(|r| r.re).collect();
        reals.sort_by(f64::total_cmp);
        assert_relative_eq!(reals[0], 1.0, epsilon = 1e-10);
        assert_relative_eq!(reals[1], 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_polynomial_roots_constant() {
        assert!(polynomial_roots(&dvector![3.0]).is_empty());
    }

    #[test]
    fn test_reverse_bessel_polynomial() {
        assert_eq!(reverse_bessel_polynomial(1), dvector![1.0, 1.0]);
        assert_eq!(reverse_bessel_polynomial(2), dvector![1.0, 3.0, 3.0]);
        assert_eq!(reverse_bessel_polynomial(3), dvector![1.0, 6.0, 15.0, 15.0]);
        assert_eq!(
            reverse_bessel_polynomial(4),
            dvector![1.0, 10.0, 45.0, 105.0, 105.0]
        );
        assert_eq!(
            reverse_bessel_polynomial(5),
            dvector![1.0, 15.0, 105.0, 420.0, 945.0, 945.0]
        );
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(1), 1);
        assert_eq!(factorial(5), 120);
    }
}
