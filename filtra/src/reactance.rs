use std::f64::consts::PI;

/// Reactance of an ideal capacitor in ohms.
pub fn capacitive_reactance(capacitance: f64, frequency: f64) -> f64 {
    1.0 / (2.0 * PI * frequency * capacitance)
}

/// Reactance of an ideal inductor in ohms.
pub fn inductive_reactance(inductance: f64, frequency: f64) -> f64 {
    2.0 * PI * frequency * inductance
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_capacitive_reactance() {
        // 100 pF at 3.2 MHz
        assert_relative_eq!(
            capacitive_reactance(100e-12, 3.2e6),
            497.3591971621227,
            epsilon = 1e-6
        );
        // Reactance falls with frequency
        assert!(capacitive_reactance(100e-12, 6.4e6) < capacitive_reactance(100e-12, 3.2e6));
    }

    #[test]
    fn test_inductive_reactance() {
        // 100 uH at 3.2 MHz
        assert_relative_eq!(
            inductive_reactance(100e-6, 3.2e6),
            2010.6192982974676,
            epsilon = 1e-6
        );
        // Reactance grows with frequency
        assert!(inductive_reactance(100e-6, 6.4e6) > inductive_reactance(100e-6, 3.2e6));
    }
}
