use std::collections::BTreeMap;
use std::f64::consts::PI;

use nalgebra::{Complex, DVector};

use crate::error::FilterError;
use crate::filter_design::{design_iir, BandType, IirSpec};
use crate::math::polynomial_roots;
use crate::signal_extension::anti_symmetric_reflect_extension;

/// Common surface of every digital filter in this module.
pub trait DigitalFilter {
    fn samplerate(&self) -> f64;

    /// Zero-phase application; the output always has the input's length.
    fn apply(&self, data: &DVector<f64>) -> Result<DVector<f64>, FilterError>;

    fn is_stable(&self) -> Result<bool, FilterError>;

    fn complex_response(
        &self,
        points: usize,
    ) -> Result<(DVector<f64>, DVector<Complex<f64>>), FilterError>;

    /// Magnitude response over `points` frequencies from 0 Hz up to Nyquist.
    fn frequency_response(
        &self,
        points: usize,
    ) -> Result<(DVector<f64>, DVector<f64>), FilterError> {
        let (frequencies, response) = self.complex_response(points)?;
        Ok((frequencies, response.map(|h| h.norm())))
    }
}

#[derive(Clone, Debug, PartialEq)]
struct IirCoefficients {
    num: DVector<f64>,
    den: DVector<f64>,
    spec: IirSpec,
}

/// A single IIR filter bound to a samplerate and corner frequencies in Hz.
///
/// Construction validates the parameters; the coefficients are computed by
/// [`SignalFilter::iir`].
#[derive(Clone, Debug, PartialEq)]
pub struct SignalFilter {
    samplerate: f64,
    frequencies: Vec<f64>,
    band: BandType,
    design: Option<IirCoefficients>,
}

impl SignalFilter {
    pub fn new(
        samplerate: f64,
        frequencies: &[f64],
        band: BandType,
    ) -> Result<Self, FilterError> {
        let expected = band.corner_count();
        if frequencies.len() != expected {
            return Err(FilterError::FrequencyCount {
                band,
                expected,
                actual: frequencies.len(),
            });
        }
        let nyquist = samplerate / 2.0;
        for &frequency in frequencies {
            if !(frequency > 0.0 && frequency < nyquist) {
                return Err(FilterError::FrequencyOutOfRange { frequency, nyquist });
            }
        }
        if expected == 2 && frequencies[0] >= frequencies[1] {
            return Err(FilterError::FrequencyOrder);
        }

        Ok(Self {
            samplerate,
            frequencies: frequencies.to_vec(),
            band,
            design: None,
        })
    }

    pub fn band(&self) -> BandType {
        self.band
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Compute the IIR coefficients for this filter. Rejects designs whose
    /// poles leave the unit circle.
    pub fn iir(mut self, spec: IirSpec) -> Result<Self, FilterError> {
        let nyquist = self.samplerate / 2.0;
        let cutoffs: Vec<f64> = self.frequencies.iter().map(|f| f / nyquist).collect();
        let (num, den) = design_iir(&spec, &cutoffs, self.band)?;
        if let Some(magnitude) = unstable_pole(&den) {
            return Err(FilterError::Unstable(magnitude));
        }

        self.design = Some(IirCoefficients { num, den, spec });
        Ok(self)
    }

    fn coefficients(&self) -> Result<&IirCoefficients, FilterError> {
        self.design.as_ref().ok_or(FilterError::NotComputed)
    }

    /// The same design re-computed for a different samplerate. The corner
    /// frequencies keep their absolute positions in Hz.
    pub fn as_samplerate(&self, samplerate: f64) -> Result<Self, FilterError> {
        let design = self.coefficients()?;
        if samplerate == self.samplerate {
            return Ok(self.clone());
        }

        SignalFilter::new(samplerate, &self.frequencies, self.band)?.iir(design.spec)
    }

    pub fn chain(&self, repeat: usize) -> Result<ChainedFilter, FilterError> {
        ChainedFilter::repeated(self.clone(), repeat)
    }

    pub fn chain_with(
        &self,
        other: Option<&SignalFilter>,
        self_repeat: usize,
        other_repeat: usize,
    ) -> Result<ChainedFilter, FilterError> {
        let mut chained = ChainedFilter::repeated(self.clone(), self_repeat)?;
        if let Some(other) = other {
            if other_repeat == 0 {
                return Err(FilterError::ZeroRepeat);
            }
            for _ in 0..other_repeat {
                chained.push(other.clone())?;
            }
        }

        Ok(chained)
    }
}

impl DigitalFilter for SignalFilter {
    fn samplerate(&self) -> f64 {
        self.samplerate
    }

    fn apply(&self, data: &DVector<f64>) -> Result<DVector<f64>, FilterError> {
        let design = self.coefficients()?;
        filtfilt(&design.num, &design.den, data)
    }

    fn is_stable(&self) -> Result<bool, FilterError> {
        let design = self.coefficients()?;
        Ok(unstable_pole(&design.den).is_none())
    }

    fn complex_response(
        &self,
        points: usize,
    ) -> Result<(DVector<f64>, DVector<Complex<f64>>), FilterError> {
        let design = self.coefficients()?;
        Ok(transfer_response(
            &design.num,
            &design.den,
            self.samplerate,
            points,
        ))
    }
}

/// Sequential composition of same-samplerate filters.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainedFilter {
    filters: Vec<SignalFilter>,
    samplerate: f64,
}

impl ChainedFilter {
    pub fn new(filters: Vec<SignalFilter>) -> Result<Self, FilterError> {
        let samplerate = filters
            .first()
            .ok_or(FilterError::EmptyComposite)?
            .samplerate();
        for filter in &filters[1..] {
            if filter.samplerate() != samplerate {
                return Err(FilterError::SamplerateMismatch {
                    expected: samplerate,
                    actual: filter.samplerate(),
                });
            }
        }

        Ok(Self {
            filters,
            samplerate,
        })
    }

    pub fn repeated(filter: SignalFilter, repeat: usize) -> Result<Self, FilterError> {
        if repeat == 0 {
            return Err(FilterError::ZeroRepeat);
        }

        Ok(Self {
            samplerate: filter.samplerate(),
            filters: vec![filter; repeat],
        })
    }

    pub fn push(&mut self, filter: SignalFilter) -> Result<(), FilterError> {
        if filter.samplerate() != self.samplerate {
            return Err(FilterError::SamplerateMismatch {
                expected: self.samplerate,
                actual: filter.samplerate(),
            });
        }
        self.filters.push(filter);

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn as_samplerate(&self, samplerate: f64) -> Result<Self, FilterError> {
        if samplerate == self.samplerate {
            return Ok(self.clone());
        }
        let filters = self
            .filters
            .iter()
            .map(|filter| filter.as_samplerate(samplerate))
            .collect::<Result<Vec<_>, _>>()?;

        ChainedFilter::new(filters)
    }
}

impl DigitalFilter for ChainedFilter {
    fn samplerate(&self) -> f64 {
        self.samplerate
    }

    fn apply(&self, data: &DVector<f64>) -> Result<DVector<f64>, FilterError> {
        let mut output = data.clone();
        for filter in &self.filters {
            output = filter.apply(&output)?;
        }

        Ok(output)
    }

    fn is_stable(&self) -> Result<bool, FilterError> {
        for filter in &self.filters {
            if !filter.is_stable()? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn complex_response(
        &self,
        points: usize,
    ) -> Result<(DVector<f64>, DVector<Complex<f64>>), FilterError> {
        let (frequencies, mut response) = self.filters[0].complex_response(points)?;
        for filter in &self.filters[1..] {
            let (_, other) = filter.complex_response(points)?;
            response.component_mul_assign(&other);
        }

        Ok((frequencies, response))
    }
}

/// Parallel composition; the output is the sum of the branch outputs.
#[derive(Clone, Debug, PartialEq)]
pub struct SumFilter {
    filters: Vec<SignalFilter>,
    samplerate: f64,
}

impl SumFilter {
    pub fn new(filters: Vec<SignalFilter>) -> Result<Self, FilterError> {
        let samplerate = filters
            .first()
            .ok_or(FilterError::EmptyComposite)?
            .samplerate();
        for filter in &filters[1..] {
            if filter.samplerate() != samplerate {
                return Err(FilterError::SamplerateMismatch {
                    expected: samplerate,
                    actual: filter.samplerate(),
                });
            }
        }

        Ok(Self {
            filters,
            samplerate,
        })
    }

    pub fn push(&mut self, filter: SignalFilter) -> Result<(), FilterError> {
        if filter.samplerate() != self.samplerate {
            return Err(FilterError::SamplerateMismatch {
                expected: self.samplerate,
                actual: filter.samplerate(),
            });
        }
        self.filters.push(filter);

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn as_samplerate(&self, samplerate: f64) -> Result<Self, FilterError> {
        if samplerate == self.samplerate {
            return Ok(self.clone());
        }
        let filters = self
            .filters
            .iter()
            .map(|filter| filter.as_samplerate(samplerate))
            .collect::<Result<Vec<_>, _>>()?;

        SumFilter::new(filters)
    }
}

impl From<SignalFilter> for SumFilter {
    fn from(filter: SignalFilter) -> Self {
        Self {
            samplerate: filter.samplerate(),
            filters: vec![filter],
        }
    }
}

impl DigitalFilter for SumFilter {
    fn samplerate(&self) -> f64 {
        self.samplerate
    }

    fn apply(&self, data: &DVector<f64>) -> Result<DVector<f64>, FilterError> {
        let mut output = self.filters[0].apply(data)?;
        for filter in &self.filters[1..] {
            output += filter.apply(data)?;
        }

        Ok(output)
    }

    fn is_stable(&self) -> Result<bool, FilterError> {
        for filter in &self.filters {
            if !filter.is_stable()? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn complex_response(
        &self,
        points: usize,
    ) -> Result<(DVector<f64>, DVector<Complex<f64>>), FilterError> {
        let (frequencies, mut response) = self.filters[0].complex_response(points)?;
        for filter in &self.filters[1..] {
            let (_, other) = filter.complex_response(points)?;
            response += other;
        }

        Ok((frequencies, response))
    }
}

/// Named filters sharing one samplerate.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterBank {
    samplerate: f64,
    filters: BTreeMap<String, SignalFilter>,
}

impl FilterBank {
    pub fn new(samplerate: f64) -> Self {
        Self {
            samplerate,
            filters: BTreeMap::new(),
        }
    }

    pub fn samplerate(&self) -> f64 {
        self.samplerate
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        filter: SignalFilter,
    ) -> Result<(), FilterError> {
        if filter.samplerate() != self.samplerate {
            return Err(FilterError::SamplerateMismatch {
                expected: self.samplerate,
                actual: filter.samplerate(),
            });
        }
        self.filters.insert(name.into(), filter);

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SignalFilter> {
        self.filters.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.filters.keys().map(|name| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SignalFilter)> + '_ {
        self.filters
            .iter()
            .map(|(name, filter)| (name.as_str(), filter))
    }

    pub fn as_samplerate(&self, samplerate: f64) -> Result<Self, FilterError> {
        if samplerate == self.samplerate {
            return Ok(self.clone());
        }
        let mut bank = FilterBank::new(samplerate);
        for (name, filter) in &self.filters {
            bank.insert(name.clone(), filter.as_samplerate(samplerate)?)?;
        }

        Ok(bank)
    }
}

/// Largest denominator root magnitude that reaches the unit circle, if any.
/// Non-finite coefficients count as unstable.
fn unstable_pole(den: &DVector<f64>) -> Option<f64> {
    if den.iter().any(|c| !c.is_finite()) {
        return Some(f64::INFINITY);
    }

    polynomial_roots(den)
        .into_iter()
        .map(|root| root.norm())
        .find(|&magnitude| !(magnitude < 1.0))
}

fn transfer_response(
    num: &DVector<f64>,
    den: &DVector<f64>,
    samplerate: f64,
    points: usize,
) -> (DVector<f64>, DVector<Complex<f64>>) {
    let nyquist = samplerate / 2.0;
    let frequencies =
        DVector::from_iterator(points, (0..points).map(|i| i as f64 * nyquist / points as f64));
    let response = DVector::from_iterator(
        points,
        (0..points).map(|i| {
            let w = PI * i as f64 / points as f64;
            let z_inverse = Complex::new(0.0, -w).exp();
            evaluate(num, z_inverse) / evaluate(den, z_inverse)
        }),
    );

    (frequencies, response)
}

// Horner evaluation in powers of z^-1
fn evaluate(coeffs: &DVector<f64>, z_inverse: Complex<f64>) -> Complex<f64> {
    coeffs.iter().rev().fold(Complex::new(0.0, 0.0), |acc, &c| {
        acc * z_inverse + Complex::new(c, 0.0)
    })
}

// Direct form II transposed
fn lfilter(num: &DVector<f64>, den: &DVector<f64>, x: &DVector<f64>) -> DVector<f64> {
    assert!(den[0] != 0.0, "Leading denominator coefficient must be nonzero.");

    let order = num.len().max(den.len());
    let mut b = DVector::zeros(order);
    b.rows_mut(0, num.len()).copy_from(num);
    let mut a = DVector::zeros(order);
    a.rows_mut(0, den.len()).copy_from(den);
    let b = b / a[0];
    let a = a / den[0];

    let mut state = DVector::<f64>::zeros(order - 1);
    let mut y = DVector::zeros(x.len());
    for n in 0..x.len() {
        let input = x[n];
        let output = b[0] * input + if order > 1 { state[0] } else { 0.0 };
        for i in 0..state.len() {
            let next = if i + 1 < state.len() { state[i + 1] } else { 0.0 };
            state[i] = b[i + 1] * input + next - a[i + 1] * output;
        }
        y[n] = output;
    }

    y
}

pub(crate) fn filtfilt(
    num: &DVector<f64>,
    den: &DVector<f64>,
    x: &DVector<f64>,
) -> Result<DVector<f64>, FilterError> {
    if x.len() < 2 {
        return Err(FilterError::SignalTooShort);
    }

    // padding
    let extended = anti_symmetric_reflect_extension(x);

    // forward filtering
    let forward = lfilter(num, den, &extended);

    // backward filtering
    let reversed = DVector::from_iterator(forward.len(), forward.as_slice().iter().rev().copied());
    let backward = lfilter(num, den, &reversed);
    let restored =
        DVector::from_iterator(backward.len(), backward.as_slice().iter().rev().copied());

    Ok(restored.rows(x.len(), x.len()).into_owned())
}
