use criterion::*;
use nalgebra::DVector;
use rand::Rng;

use filtra::{BandType, DesignKind, DigitalFilter, IirSpec, SignalFilter};

fn design_benchmark(c: &mut Criterion) {
    c.bench_function("design_bandpass", |b| {
        b.iter(|| {
            SignalFilter::new(1000.0, &[50.0, 150.0], BandType::Bandpass)
                .unwrap()
                .iir(black_box(IirSpec::new(6, DesignKind::Chebyshev1).with_ripple(0.1)))
                .unwrap()
        })
    });
}

fn apply_benchmark(c: &mut Criterion) {
    let n = 4096;
    let mut rng = rand::thread_rng();
    let signal = DVector::<f64>::from_fn(n, |_, _| rng.gen());
    let filter = SignalFilter::new(1000.0, &[100.0], BandType::Lowpass)
        .unwrap()
        .iir(IirSpec::new(4, DesignKind::Butterworth))
        .unwrap();

    c.bench_function("apply_lowpass", |b| {
        b.iter(|| filter.apply(black_box(&signal)).unwrap())
    });
}

criterion_group!(benches, design_benchmark, apply_benchmark);

criterion_main!(benches);
