use std::fs;

use nalgebra::DVector;
use plotters::prelude::*;

use filtra::signal_generator::generate_sine_wave;
use filtra::{BandType, DesignKind, DigitalFilter, IirSpec, SignalFilter};

fn plot(
    x: &DVector<f64>,
    y: &DVector<f64>,
    (w, h): (u32, u32),
    path: &str,
    title: &str,
    x_label: &str,
    y_label: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (w, h)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30, FontStyle::Normal).into_font())
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(x.min()..x.max(), -2.5..2.5)?;

    let label_font_x = ("sans-serif", 25, FontStyle::Normal).into_font();
    let label_font_y = ("sans-serif", 25, FontStyle::Normal).into_font();
    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .x_label_style(label_font_x)
        .y_label_style(label_font_y)
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            x.iter().copied().zip(y.iter().copied()),
            Palette99::pick(3).stroke_width(2),
        ))?
        .label(title)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], Palette99::pick(3)));

    root.present()?;

    Ok(())
}

fn main() {
    let freq_low = 5.0;
    let freq_mid = 50.0;
    let freq_high = 200.0;
    let sample_rate = 1000;

    let t = DVector::from_iterator(
        sample_rate,
        (0..sample_rate).map(|i| i as f64 / sample_rate as f64),
    );
    let x = generate_sine_wave(&t, freq_low)
        + generate_sine_wave(&t, freq_mid)
        + generate_sine_wave(&t, freq_high);

    let filter = SignalFilter::new(sample_rate as f64, &[30.0, 80.0], BandType::Bandpass)
        .unwrap()
        .iir(IirSpec::new(4, DesignKind::Chebyshev1).with_ripple(0.1))
        .unwrap();
    let y = filter.apply(&x).unwrap();

    let plot_dir = "examples/plots";
    if !std::path::Path::new(plot_dir).exists() {
        fs::create_dir_all(plot_dir).unwrap();
    }

    plot(
        &t,
        &x,
        (1200, 600),
        &format!("{}/bandpass_without_filter.png", plot_dir),
        "without filter",
        "time",
        "amplitude",
    )
    .unwrap();
    plot(
        &t,
        &y,
        (1200, 600),
        &format!("{}/bandpass_with_filter.png", plot_dir),
        "with band pass filter",
        "time",
        "amplitude",
    )
    .unwrap();
}
