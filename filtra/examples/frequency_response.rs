use std::fs;

use nalgebra::DVector;
use plotters::prelude::*;

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
        .build_cartesian_2d(x.min()..x.max(), 0.0..1.1)?;

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
            Palette99::pick(1).stroke_width(2),
        ))?
        .label(title)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], Palette99::pick(1)));

    root.present()?;

    Ok(())
}

fn main() {
    let sample_rate = 1000.0;
    let cutoff = 100.0;

    let single = SignalFilter::new(sample_rate, &[cutoff], BandType::Lowpass)
        .unwrap()
        .iir(IirSpec::new(4, DesignKind::Butterworth))
        .unwrap();
    let chained = single.chain(3).unwrap();

    let (frequencies, single_response) = single.frequency_response(2048).unwrap();
    let (_, chained_response) = chained.frequency_response(2048).unwrap();

    let plot_dir = "examples/plots";
    if !std::path::Path::new(plot_dir).exists() {
        fs::create_dir_all(plot_dir).unwrap();
    }

    plot(
        &frequencies,
        &single_response,
        (1200, 600),
        &format!("{}/butterworth_response.png", plot_dir),
        "4th order butterworth low pass",
        "frequency [Hz]",
        "magnitude",
    )
    .unwrap();
    plot(
        &frequencies,
        &chained_response,
        (1200, 600),
        &format!("{}/butterworth_chained_response.png", plot_dir),
        "three chained low pass filters",
        "frequency [Hz]",
        "magnitude",
    )
    .unwrap();
}
