//! Designs the default velocity filter and writes its pole-zero plot,
//! impulse response and frequency response as SVG files.

use log::Level;
use std::env;

use velocity_dsp::analysis::{Characterization, DEFAULT_FREQZ_POINTS, ZPLANE_IMPULSE_LEN};
use velocity_dsp::filter::design::butter_lowpass;
use velocity_dsp::render::{render_characterization, SvgRenderer};
use velocity_dsp::session::{DEFAULT_CUTOFF_HZ, DEFAULT_ORDER, DEFAULT_SAMPLE_RATE};

fn main() -> Result<(), velocity_dsp::DspError> {
    simple_logger::init_with_level(Level::Info).unwrap();
    let out_dir = env::args().nth(1).unwrap_or_else(|| "zplane_plots".to_string());

    let spec = butter_lowpass(DEFAULT_CUTOFF_HZ, DEFAULT_SAMPLE_RATE, DEFAULT_ORDER)?;
    let characterization = Characterization::new(&spec, ZPLANE_IMPULSE_LEN, DEFAULT_FREQZ_POINTS)?;
    for (i, pole) in characterization.zpk.poles.iter().enumerate() {
        println!("pole {}: {:.6} (|p| = {:.6})", i, pole, pole.norm());
    }

    let mut renderer = SvgRenderer::new(out_dir)?;
    render_characterization(&mut renderer, &characterization)
}
