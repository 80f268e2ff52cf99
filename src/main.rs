#[macro_use]
extern crate clap;

use clap::{App, Arg, ArgMatches};
use log::{error, warn, Level};
use std::process::exit;

use velocity_dsp::analysis::is_stable;
use velocity_dsp::render::{LogRenderer, Renderer, SvgRenderer};
use velocity_dsp::session::{AnalysisConfig, Session};
use velocity_dsp::DspError;

fn config_from(matches: &ArgMatches) -> Result<AnalysisConfig, DspError> {
    let bad = |e: clap::Error| DspError::Configuration(e.message);
    Ok(AnalysisConfig {
        cutoff_hz: value_t!(matches, "cutoff", f64).map_err(bad)?,
        order: value_t!(matches, "order", usize).map_err(bad)?,
        sample_rate: value_t!(matches, "sample_rate", f64).map_err(bad)?,
        impulse_len: value_t!(matches, "impulse_len", usize).map_err(bad)?,
        freqz_points: value_t!(matches, "points", usize).map_err(bad)?,
    })
}

fn run(matches: &ArgMatches) -> Result<(), DspError> {
    let config = config_from(matches)?;
    let data_file = matches.value_of("data_file").unwrap_or("");

    let mut session = Session::from_csv(data_file)?.with_sample_rate(config.sample_rate);
    let result = session.design_and_apply(config.cutoff_hz, config.order)?;
    println!("B coefficients : {:?}", result.spec.b);
    println!("A coefficients : {:?}", result.spec.a);

    let characterization = session.characterize(config.impulse_len, config.freqz_points)?;
    let zpk = &characterization.zpk;
    println!("{} zeros : {:?}", zpk.zeros.len(), zpk.zeros);
    println!("{} poles : {:?}", zpk.poles.len(), zpk.poles);
    println!("Gain : {:e}", zpk.gain);
    if !is_stable(&result.spec) {
        warn!("Designed filter is not stable at this precision, try a lower order");
    }

    let mut renderer: Box<dyn Renderer> = match matches.value_of("output") {
        Some(dir) => Box::new(SvgRenderer::new(dir)?),
        None => Box::new(LogRenderer),
    };
    session.render(renderer.as_mut(), &result, &config)
}

fn main() {
    let matches = App::new("velocity-dsp")
        .version(crate_version!())
        .about("Designs a Butterworth low pass for a velocity log and analyzes it")
        .arg(
            Arg::with_name("data_file")
                .value_name("DATA_FILE")
                .help("CSV log with sensed and commanded velocity columns")
                .required(true)
                .index(1),
        ).arg(
            Arg::with_name("cutoff")
                .short("c")
                .long("cutoff")
                .value_name("HZ")
                .help("Cutoff frequency in Hz")
                .default_value("1.0")
                .takes_value(true),
        ).arg(
            Arg::with_name("order")
                .short("n")
                .long("order")
                .value_name("ORDER")
                .help("Filter order")
                .default_value("2")
                .takes_value(true),
        ).arg(
            Arg::with_name("sample_rate")
                .short("s")
                .long("sample-rate")
                .value_name("HZ")
                .help("Sample rate of the log in Hz")
                .default_value("500.0")
                .takes_value(true),
        ).arg(
            Arg::with_name("impulse_len")
                .long("impulse-len")
                .value_name("SAMPLES")
                .help("Length of the impulse response")
                .default_value("30")
                .takes_value(true),
        ).arg(
            Arg::with_name("points")
                .long("points")
                .value_name("BINS")
                .help("Number of frequency response bins")
                .default_value("512")
                .takes_value(true),
        ).arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("DIR")
                .help("Write SVG plots into DIR instead of logging a summary")
                .takes_value(true),
        ).arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Log debug output"),
        ).get_matches();

    let level = if matches.is_present("verbose") {
        Level::Debug
    } else {
        Level::Info
    };
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("Unable to initialize logging: {}", e);
    }

    if let Err(e) = run(&matches) {
        error!("{}", e);
        exit(1);
    }
}
