//! Renderer writing one SVG chart per artifact with plotters.

use plotters::prelude::IntoLogRange;
use plotters::prelude::*;

use std::collections::BTreeMap;
use std::error::Error;
use std::f64::consts::PI;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::analysis::ZeroPoleGain;
use crate::fft::Spectrum;
use crate::io::SENSED_COLUMN;
use crate::render::Renderer;
use crate::util::DspError;
use log::info;
use num::Complex;

const PLOT_WIDTH: u32 = 1024;
const PLOT_HEIGHT: u32 = 768;
const ZPLANE_SIZE: u32 = 720;
const FONT_SIZE_CHART_TITLE: i32 = 24;
const FONT_SIZE_ANNOTATION: i32 = 16;
const UNIT_CIRCLE_DASHES: usize = 48;
/// Roots closer than this are drawn as one marker with a multiplicity.
const MARKER_RESOLUTION: f64 = 1e-3;

type ChartResult = Result<(), Box<dyn Error>>;

/// Writes `zplane.svg`, `impulse.svg`, `magnitude.svg`, `phase.svg`,
/// `velocity.svg` and one spectrum file per signal into a directory.
#[derive(Clone, Debug)]
pub struct SvgRenderer {
    out_dir: PathBuf,
}

impl SvgRenderer {
    /// Creates the renderer, making `out_dir` if it does not exist yet.
    pub fn new<P: AsRef<Path>>(out_dir: P) -> Result<SvgRenderer, DspError> {
        let out_dir = out_dir.as_ref().to_path_buf();
        fs::create_dir_all(&out_dir)?;
        Ok(SvgRenderer { out_dir })
    }

    fn finish(&self, file_name: &str, drawn: ChartResult) -> Result<(), DspError> {
        drawn.map_err(|e| DspError::Render(format!("{}: {}", file_name, e)))?;
        info!("Plot saved to {}", self.out_dir.join(file_name).display());
        Ok(())
    }
}

/// Plot range with 15% padding, or a fixed padding for flat data.
fn calculate_range<'a, I>(values: I) -> Range<f64>
where
    I: IntoIterator<Item = &'a f64>,
{
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((std::f64::INFINITY, std::f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return -1.0..1.0;
    }
    let range = max - min;
    let padding = if range < 1e-9 { 0.5 } else { range * 0.15 };
    (min - padding)..(max + padding)
}

/// Slug used in spectrum file names, e.g. "Noisy Velocity FFT" -> "noisy_velocity_fft".
fn file_slug(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Groups coincident roots for display, keyed on coordinates rounded to
/// `MARKER_RESOLUTION`.
fn marker_counts(roots: &[Complex<f64>]) -> Vec<(Complex<f64>, usize)> {
    let mut counts: BTreeMap<(i64, i64), (Complex<f64>, usize)> = BTreeMap::new();
    for root in roots {
        let key = (
            (root.re / MARKER_RESOLUTION).round() as i64,
            (root.im / MARKER_RESOLUTION).round() as i64,
        );
        counts.entry(key).or_insert((*root, 0)).1 += 1;
    }
    counts.into_iter().map(|(_, v)| v).collect()
}

fn draw_zplane(path: &Path, zpk: &ZeroPoleGain, extent: f64) -> ChartResult {
    let root = SVGBackend::new(path, (ZPLANE_SIZE, ZPLANE_SIZE)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Pole-zero plot (gain {:.4e})", zpk.gain),
            ("sans-serif", FONT_SIZE_CHART_TITLE).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;
    chart
        .configure_mesh()
        .x_desc("Real")
        .y_desc("Imaginary")
        .draw()?;

    // Dashed unit circle, every other segment.
    let step = 2.0 * PI / (2 * UNIT_CIRCLE_DASHES) as f64;
    for dash in 0..UNIT_CIRCLE_DASHES {
        let start = 2.0 * dash as f64 * step;
        chart.draw_series(LineSeries::new(
            (0..=8).map(|i| {
                let theta = start + step * i as f64 / 8.0;
                (theta.cos(), theta.sin())
            }),
            &BLACK,
        ))?;
    }

    let zeros = marker_counts(&zpk.zeros);
    let poles = marker_counts(&zpk.poles);
    chart
        .draw_series(
            zeros
                .iter()
                .map(|(z, _)| Circle::new((z.re, z.im), 8, GREEN.stroke_width(2))),
        )?
        .label("Zeros")
        .legend(|(x, y)| Circle::new((x + 10, y), 6, GREEN.stroke_width(2)));
    chart
        .draw_series(
            poles
                .iter()
                .map(|(p, _)| Cross::new((p.re, p.im), 8, RED.stroke_width(3))),
        )?
        .label("Poles")
        .legend(|(x, y)| Cross::new((x + 10, y), 6, RED.stroke_width(3)));

    chart.draw_series(
        zeros
            .iter()
            .chain(poles.iter())
            .filter(|(_, count)| *count > 1)
            .map(|(root, count)| {
                Text::new(
                    format!("{}", count),
                    (root.re, root.im),
                    ("sans-serif", FONT_SIZE_ANNOTATION).into_font(),
                )
            }),
    )?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn draw_impulse(path: &Path, impulse: &[f64]) -> ChartResult {
    let root = SVGBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let y_range = calculate_range(impulse.iter().chain(std::iter::once(&0.0)));
    let mut chart = ChartBuilder::on(&root)
        .caption("Impulse response", ("sans-serif", FONT_SIZE_CHART_TITLE).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5..impulse.len() as f64 - 0.5, y_range)?;
    chart
        .configure_mesh()
        .x_desc("Sample")
        .y_desc("Amplitude")
        .draw()?;

    chart.draw_series(impulse.iter().enumerate().map(|(n, &y)| {
        PathElement::new(vec![(n as f64, 0.0), (n as f64, y)], &BLUE)
    }))?;
    chart.draw_series(
        impulse
            .iter()
            .enumerate()
            .map(|(n, &y)| Circle::new((n as f64, y), 4, BLUE.filled())),
    )?;
    root.present()?;
    Ok(())
}

/// Line chart against normalized frequency on a log axis. The DC bin has
/// no place on a log axis and is dropped.
fn draw_frequency_chart(
    path: &Path,
    title: &str,
    y_desc: &str,
    frequency: &[f64],
    values: &[f64],
) -> ChartResult {
    let points: Vec<(f64, f64)> = frequency
        .iter()
        .cloned()
        .zip(values.iter().cloned())
        .filter(|(f, v)| *f > 0.0 && v.is_finite())
        .collect();
    let x_start = points.first().map(|p| p.0).unwrap_or(1e-3);
    let x_end = points.last().map(|p| p.0).unwrap_or(1.0).max(x_start * 10.0);
    let y_range = calculate_range(points.iter().map(|p| &p.1));

    let root = SVGBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", FONT_SIZE_CHART_TITLE).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((x_start..x_end).log_scale(), y_range)?;
    chart
        .configure_mesh()
        .x_desc("Normalized frequency")
        .y_desc(y_desc)
        .draw()?;
    chart.draw_series(LineSeries::new(points, &BLUE))?;
    root.present()?;
    Ok(())
}

fn draw_velocity(
    path: &Path,
    sensed: &[f64],
    commanded: &[f64],
    filtered: &[f64],
) -> ChartResult {
    let root = SVGBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 1));
    let x_end = sensed.len().max(filtered.len()).max(2) as f64;

    let panels = [
        ("Noisy Velocity", SENSED_COLUMN, "Sensed", sensed),
        ("Filtered Velocity", "Filtered Velocity (rpm)", "Filtered", filtered),
    ];
    for (area, (title, y_desc, label, trace)) in areas.iter().zip(panels.iter()) {
        let y_range = calculate_range(trace.iter().chain(commanded.iter()));
        let mut chart = ChartBuilder::on(area)
            .caption(*title, ("sans-serif", FONT_SIZE_CHART_TITLE).into_font())
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(70)
            .build_cartesian_2d(0.0..x_end, y_range)?;
        chart
            .configure_mesh()
            .x_desc("Sample")
            .y_desc(*y_desc)
            .draw()?;
        chart
            .draw_series(LineSeries::new(
                trace.iter().enumerate().map(|(n, &v)| (n as f64, v)),
                &BLUE,
            ))?
            .label(*label)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));
        chart
            .draw_series(LineSeries::new(
                commanded.iter().enumerate().map(|(n, &v)| (n as f64, v)),
                &RED,
            ))?
            .label("Cmd")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }
    root.present()?;
    Ok(())
}

fn draw_spectrum(path: &Path, title: &str, samples: &[f64], spectrum: &Spectrum) -> ChartResult {
    let root = SVGBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 1));

    let mut signal_chart = ChartBuilder::on(&areas[0])
        .caption(title, ("sans-serif", FONT_SIZE_CHART_TITLE).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..samples.len().max(2) as f64, calculate_range(samples))?;
    signal_chart
        .configure_mesh()
        .x_desc("Sample #")
        .y_desc("Signal Magnitude")
        .draw()?;
    signal_chart.draw_series(LineSeries::new(
        samples.iter().enumerate().map(|(n, &v)| (n as f64, v)),
        &BLUE,
    ))?;

    let bins: Vec<(f64, f64)> = spectrum
        .freqs
        .iter()
        .cloned()
        .zip(spectrum.magnitude_db.iter().cloned())
        .filter(|(_, db)| db.is_finite())
        .collect();
    let mut spectrum_chart = ChartBuilder::on(&areas[1])
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(
            calculate_range(&spectrum.freqs),
            calculate_range(bins.iter().map(|b| &b.1)),
        )?;
    spectrum_chart
        .configure_mesh()
        .x_desc("Frequency (Hz)")
        .y_desc("Signal Magnitude (dB)")
        .draw()?;
    spectrum_chart.draw_series(
        bins.iter()
            .map(|&(f, db)| Cross::new((f, db), 3, BLUE.stroke_width(1))),
    )?;
    root.present()?;
    Ok(())
}

impl Renderer for SvgRenderer {
    fn zplane(&mut self, zpk: &ZeroPoleGain, extent: f64) -> Result<(), DspError> {
        let name = "zplane.svg";
        self.finish(name, draw_zplane(&self.out_dir.join(name), zpk, extent))
    }

    fn impulse(&mut self, impulse: &[f64]) -> Result<(), DspError> {
        let name = "impulse.svg";
        self.finish(name, draw_impulse(&self.out_dir.join(name), impulse))
    }

    fn magnitude(&mut self, frequency: &[f64], magnitude_db: &[f64]) -> Result<(), DspError> {
        let name = "magnitude.svg";
        let drawn = draw_frequency_chart(
            &self.out_dir.join(name),
            "Frequency response",
            "Amplitude [dB]",
            frequency,
            magnitude_db,
        );
        self.finish(name, drawn)
    }

    fn phase(&mut self, frequency: &[f64], phase_deg: &[f64]) -> Result<(), DspError> {
        let name = "phase.svg";
        let drawn = draw_frequency_chart(
            &self.out_dir.join(name),
            "Phase response",
            "Phase [degrees]",
            frequency,
            phase_deg,
        );
        self.finish(name, drawn)
    }

    fn velocity(
        &mut self,
        sensed: &[f64],
        commanded: &[f64],
        filtered: &[f64],
    ) -> Result<(), DspError> {
        let name = "velocity.svg";
        let drawn = draw_velocity(&self.out_dir.join(name), sensed, commanded, filtered);
        self.finish(name, drawn)
    }

    fn spectrum(
        &mut self,
        title: &str,
        samples: &[f64],
        spectrum: &Spectrum,
    ) -> Result<(), DspError> {
        let name = format!("{}.svg", file_slug(title));
        let drawn = draw_spectrum(&self.out_dir.join(&name), title, samples, spectrum);
        self.finish(&name, drawn)
    }
}
