use nalgebra::{stack, DVector};

pub fn anti_symmetric_reflect_extension(x: &DVector<f64>) -> DVector<f64> {
    let x_reversed = DVector::from_iterator(x.len(), x.as_slice().iter().rev().copied());
    let x_padded = stack![
        -&x_reversed.clone().add_scalar(x[0] * 2.0);
        x;
        -&x_reversed.clone().add_scalar(x[x.len() - 1] * 2.0)
    ];

    x_padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn test_extension_is_continuous_at_the_edges() {
        let x = dvector![1.0, 2.0, 4.0, 8.0];
        let extended = anti_symmetric_reflect_extension(&x);

        assert_eq!(extended.len(), 3 * x.len());
        // Middle third is the original signal
        assert_eq!(extended.rows(4, 4), x.rows(0, 4));
        // Reflections mirror the signal through the endpoints
        assert_eq!(extended[3], x[0]);
        assert_eq!(extended[2], 2.0 * x[0] - x[1]);
        assert_eq!(extended[8], x[3]);
        assert_eq!(extended[9], 2.0 * x[3] - x[2]);
    }
}
