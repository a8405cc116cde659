use std::f64::consts::PI;

use nalgebra::{Complex, DVector};

use crate::error::FilterError;
use crate::math::{polynomial, polynomial_roots, reverse_bessel_polynomial};

const ORIGIN: Complex<f64> = Complex::new(0.0, 0.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandType {
    Lowpass,
    Highpass,
    Bandpass,
    Bandstop,
}

impl BandType {
    pub fn corner_count(&self) -> usize {
        match self {
            BandType::Lowpass | BandType::Highpass => 1,
            BandType::Bandpass | BandType::Bandstop => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DesignKind {
    #[default]
    Butterworth,
    Chebyshev1,
    Chebyshev2,
    Elliptic,
    Bessel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IirSpec {
    pub order: usize,
    pub kind: DesignKind,
    pub ripple_db: f64,
    pub attenuation_db: f64,
}

impl Default for IirSpec {
    fn default() -> Self {
        Self {
            order: 3,
            kind: DesignKind::Butterworth,
            ripple_db: 0.01,
            attenuation_db: 100.0,
        }
    }
}

impl IirSpec {
    pub fn new(order: usize, kind: DesignKind) -> Self {
        Self {
            order,
            kind,
            ..Self::default()
        }
    }

    pub fn with_ripple(mut self, ripple_db: f64) -> Self {
        self.ripple_db = ripple_db;
        self
    }

    pub fn with_attenuation(mut self, attenuation_db: f64) -> Self {
        self.attenuation_db = attenuation_db;
        self
    }
}

/// Analog filter as zeros, poles and gain.
#[derive(Clone, Debug)]
pub struct ZpkDesign {
    pub zeros: Vec<Complex<f64>>,
    pub poles: Vec<Complex<f64>>,
    pub gain: f64,
}

impl ZpkDesign {
    pub fn relative_degree(&self) -> usize {
        assert!(
            self.poles.len() >= self.zeros.len(),
            "A design must not have more zeros than poles."
        );
        self.poles.len() - self.zeros.len()
    }

    pub fn to_lowpass(&self, wo: f64) -> ZpkDesign {
        let degree = self.relative_degree();

        ZpkDesign {
            zeros: self.zeros.iter().map(|&z| z * wo).collect(),
            poles: self.poles.iter().map(|&p| p * wo).collect(),
            gain: self.gain * wo.powi(degree as i32),
        }
    }

    pub fn to_highpass(&self, wo: f64) -> ZpkDesign {
        let degree = self.relative_degree();
        let wo = Complex::new(wo, 0.0);

        let mut zeros: Vec<Complex<f64>> = self.zeros.iter().map(|&z| wo / z).collect();
        zeros.extend(std::iter::repeat(ORIGIN).take(degree));
        let poles: Vec<Complex<f64>> = self.poles.iter().map(|&p| wo / p).collect();
        let gain =
            self.gain * (root_product(&self.zeros, ORIGIN) / root_product(&self.poles, ORIGIN)).re;

        ZpkDesign { zeros, poles, gain }
    }

    pub fn to_bandpass(&self, wo: f64, bw: f64) -> ZpkDesign {
        let degree = self.relative_degree();

        let mut zeros = bandpass_pairs(&self.zeros, wo, bw);
        zeros.extend(std::iter::repeat(ORIGIN).take(degree));
        let poles = bandpass_pairs(&self.poles, wo, bw);

        ZpkDesign {
            zeros,
            poles,
            gain: self.gain * bw.powi(degree as i32),
        }
    }

    pub fn to_bandstop(&self, wo: f64, bw: f64) -> ZpkDesign {
        let degree = self.relative_degree();

        let mut zeros = bandstop_pairs(&self.zeros, wo, bw);
        for _ in 0..degree {
            zeros.push(Complex::new(0.0, wo));
            zeros.push(Complex::new(0.0, -wo));
        }
        let poles = bandstop_pairs(&self.poles, wo, bw);
        let gain =
            self.gain * (root_product(&self.zeros, ORIGIN) / root_product(&self.poles, ORIGIN)).re;

        ZpkDesign { zeros, poles, gain }
    }

    /// Map the analog design onto the z-plane.
    pub fn bilinear(&self, fs: f64) -> ZpkDesign {
        let degree = self.relative_degree();
        let fs2 = Complex::new(2.0 * fs, 0.0);

        let mut zeros: Vec<Complex<f64>> =
            self.zeros.iter().map(|&z| (fs2 + z) / (fs2 - z)).collect();
        zeros.extend(std::iter::repeat(Complex::new(-1.0, 0.0)).take(degree));
        let poles: Vec<Complex<f64>> =
            self.poles.iter().map(|&p| (fs2 + p) / (fs2 - p)).collect();
        let gain =
            self.gain * (root_product(&self.zeros, fs2) / root_product(&self.poles, fs2)).re;

        ZpkDesign { zeros, poles, gain }
    }

    pub fn to_transfer_function(&self) -> (DVector<f64>, DVector<f64>) {
        let num = polynomial(&self.zeros).map(|c| c.re) * self.gain;
        let den = polynomial(&self.poles).map(|c| c.re);

        (num, den)
    }
}

fn root_product(roots: &[Complex<f64>], shift: Complex<f64>) -> Complex<f64> {
    roots
        .iter()
        .fold(Complex::new(1.0, 0.0), |acc, &root| acc * (shift - root))
}

// s -> (s^2 + wo^2) / (bw * s): every root splits into a pair.
fn bandpass_pairs(roots: &[Complex<f64>], wo: f64, bw: f64) -> Vec<Complex<f64>> {
    let mut transformed = Vec::with_capacity(2 * roots.len());
    for &root in roots {
        let scaled = root * (bw / 2.0);
        let offset = (scaled * scaled - Complex::new(wo * wo, 0.0)).sqrt();
        transformed.push(scaled + offset);
        transformed.push(scaled - offset);
    }

    transformed
}

// s -> bw * s / (s^2 + wo^2)
fn bandstop_pairs(roots: &[Complex<f64>], wo: f64, bw: f64) -> Vec<Complex<f64>> {
    let mut transformed = Vec::with_capacity(2 * roots.len());
    for &root in roots {
        let inverted = Complex::new(bw / 2.0, 0.0) / root;
        let offset = (inverted * inverted - Complex::new(wo * wo, 0.0)).sqrt();
        transformed.push(inverted + offset);
        transformed.push(inverted - offset);
    }

    transformed
}

pub fn butterworth_prototype(order: usize) -> ZpkDesign {
    let poles = (0..order)
        .map(|k| {
            let theta = PI * (2 * k + order + 1) as f64 / (2 * order) as f64;
            Complex::new(theta.cos(), theta.sin())
        })
        .collect();

    ZpkDesign {
        zeros: Vec::new(),
        poles,
        gain: 1.0,
    }
}

pub fn chebyshev1_prototype(order: usize, ripple_db: f64) -> ZpkDesign {
    let ripple = (10.0_f64.powf(ripple_db / 10.0) - 1.0).sqrt();
    let mu = (1.0 / ripple).asinh() / order as f64;

    let poles: Vec<Complex<f64>> = (0..order)
        .map(|k| {
            let theta = PI * (2 * k + 1) as f64 / (2 * order) as f64;
            Complex::new(-mu.sinh() * theta.sin(), mu.cosh() * theta.cos())
        })
        .collect();

    let mut gain = root_product(&poles, ORIGIN).re;
    if order % 2 == 0 {
        gain /= (1.0 + ripple * ripple).sqrt();
    }

    ZpkDesign {
        zeros: Vec::new(),
        poles,
        gain,
    }
}

pub fn chebyshev2_prototype(order: usize, attenuation_db: f64) -> ZpkDesign {
    let attenuation = 1.0 / (10.0_f64.powf(attenuation_db / 10.0) - 1.0).sqrt();
    let mu = (1.0 / attenuation).asinh() / order as f64;

    let mut zeros = Vec::with_capacity(order);
    let mut poles = Vec::with_capacity(order);
    for k in 0..order {
        let theta = PI * (2 * k + 1) as f64 / (2 * order) as f64;
        let pole = Complex::new(-mu.sinh() * theta.sin(), mu.cosh() * theta.cos());
        poles.push(Complex::new(1.0, 0.0) / pole);
        // The zero on the real axis of odd orders escapes to infinity.
        if theta.cos().abs() > 1e-10 {
            zeros.push(Complex::new(0.0, 1.0 / theta.cos()));
        }
    }

    let gain = (root_product(&poles, ORIGIN) / root_product(&zeros, ORIGIN)).re;

    ZpkDesign { zeros, poles, gain }
}

pub fn elliptic_prototype(order: usize, ripple_db: f64, attenuation_db: f64) -> ZpkDesign {
    let passband_ripple = (10.0_f64.powf(ripple_db / 10.0) - 1.0).sqrt();
    let stopband_ripple = (10.0_f64.powf(attenuation_db / 10.0) - 1.0).sqrt();
    let selectivity = passband_ripple / stopband_ripple;

    let mu = (1.0 / passband_ripple).asinh() / order as f64;
    let poles: Vec<Complex<f64>> = (0..order)
        .map(|k| {
            let theta = PI * (2 * k + 1) as f64 / (2 * order) as f64;
            Complex::new(-mu.sinh() * theta.sin(), mu.cosh() * theta.cos())
        })
        .collect();

    let mut zeros = Vec::with_capacity(2 * (order / 2));
    for k in 0..order / 2 {
        let theta = PI * (2 * k + 1) as f64 / (2 * order) as f64;
        let magnitude = 1.0 / (selectivity * theta.sin());
        zeros.push(Complex::new(0.0, magnitude));
        zeros.push(Complex::new(0.0, -magnitude));
    }

    let mut gain = (root_product(&poles, ORIGIN) / root_product(&zeros, ORIGIN)).re;
    if order % 2 == 0 {
        gain /= (1.0 + passband_ripple * passband_ripple).sqrt();
    }

    ZpkDesign { zeros, poles, gain }
}

pub fn bessel_prototype(order: usize) -> ZpkDesign {
    let coeffs = reverse_bessel_polynomial(order);
    let poles = polynomial_roots(&coeffs);
    let gain = coeffs[coeffs.len() - 1];

    ZpkDesign {
        zeros: Vec::new(),
        poles,
        gain,
    }
}

/// Design a digital IIR filter from cutoffs normalized to the Nyquist
/// frequency. Returns the transfer function coefficient pair.
pub fn design_iir(
    spec: &IirSpec,
    cutoffs: &[f64],
    band: BandType,
) -> Result<(DVector<f64>, DVector<f64>), FilterError> {
    validate_cutoffs(cutoffs, band)?;
    if spec.order == 0 {
        return Err(FilterError::InvalidOrder);
    }

    let prototype = match spec.kind {
        DesignKind::Butterworth => butterworth_prototype(spec.order),
        DesignKind::Chebyshev1 => {
            if spec.ripple_db <= 0.0 {
                return Err(FilterError::InvalidRipple);
            }
            chebyshev1_prototype(spec.order, spec.ripple_db)
        }
        DesignKind::Chebyshev2 => {
            if spec.attenuation_db <= 0.0 {
                return Err(FilterError::InvalidRipple);
            }
            chebyshev2_prototype(spec.order, spec.attenuation_db)
        }
        DesignKind::Elliptic => {
            if spec.ripple_db <= 0.0 || spec.attenuation_db <= 0.0 {
                return Err(FilterError::InvalidRipple);
            }
            elliptic_prototype(spec.order, spec.ripple_db, spec.attenuation_db)
        }
        DesignKind::Bessel => bessel_prototype(spec.order),
    };

    // Pre-warp the critical frequencies
    let fs = 2.0;
    let warped: Vec<f64> = cutoffs
        .iter()
        .map(|&w| 2.0 * fs * (PI * w / fs).tan())
        .collect();

    let analog = match band {
        BandType::Lowpass => prototype.to_lowpass(warped[0]),
        BandType::Highpass => prototype.to_highpass(warped[0]),
        BandType::Bandpass => {
            let wo = (warped[0] * warped[1]).sqrt();
            prototype.to_bandpass(wo, warped[1] - warped[0])
        }
        BandType::Bandstop => {
            let wo = (warped[0] * warped[1]).sqrt();
            prototype.to_bandstop(wo, warped[1] - warped[0])
        }
    };

    Ok(analog.bilinear(fs).to_transfer_function())
}

fn validate_cutoffs(cutoffs: &[f64], band: BandType) -> Result<(), FilterError> {
    let expected = band.corner_count();
    if cutoffs.len() != expected {
        return Err(FilterError::FrequencyCount {
            band,
            expected,
            actual: cutoffs.len(),
        });
    }
    for &cutoff in cutoffs {
        if !(cutoff > 0.0 && cutoff < 1.0) {
            return Err(FilterError::CutoffOutOfRange(cutoff));
        }
    }
    if expected == 2 && cutoffs[0] >= cutoffs[1] {
        return Err(FilterError::FrequencyOrder);
    }

    Ok(())
}
