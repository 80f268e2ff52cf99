#[macro_use]
extern crate clap;

use clap::{App, Arg, ArgMatches};
use log::{error, info, Level};
use std::fs::File;
use std::io::BufWriter;
use std::process::exit;

use velocity_dsp::io::{write_velocity_csv, VelocitySynth};
use velocity_dsp::DspError;

fn run(matches: &ArgMatches) -> Result<(), DspError> {
    let bad = |e: clap::Error| DspError::Configuration(e.message);
    let samples = value_t!(matches, "samples", usize).map_err(bad)?;
    let sample_rate = value_t!(matches, "sample_rate", f64).map_err(bad)?;
    let noise = value_t!(matches, "noise", f64).map_err(bad)?;
    let seed = if matches.is_present("seed") {
        Some(value_t!(matches, "seed", u64).map_err(bad)?)
    } else {
        None
    };
    let output = matches.value_of("output").unwrap_or("velocity_sample.csv");

    let mut synth = VelocitySynth::new(sample_rate, noise, seed)?;
    let log = synth.generate(samples);
    write_velocity_csv(BufWriter::new(File::create(output)?), &log)?;
    info!(
        "Wrote {} samples at {} Hz to {}",
        log.len(),
        sample_rate,
        output
    );
    Ok(())
}

fn main() {
    simple_logger::init_with_level(Level::Info).unwrap_or_else(|e| {
        eprintln!("Unable to initialize logging: {}", e);
    });

    let matches = App::new("generate_sample")
        .version(crate_version!())
        .about("Writes a synthetic noisy velocity-control log")
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .help("CSV file to write")
                .default_value("velocity_sample.csv")
                .takes_value(true),
        ).arg(
            Arg::with_name("samples")
                .short("n")
                .long("samples")
                .value_name("N")
                .help("Number of rows to generate")
                .default_value("5000")
                .takes_value(true),
        ).arg(
            Arg::with_name("sample_rate")
                .short("s")
                .long("sample-rate")
                .value_name("HZ")
                .help("Sample rate in Hz")
                .default_value("500.0")
                .takes_value(true),
        ).arg(
            Arg::with_name("noise")
                .long("noise")
                .value_name("RPM")
                .help("Standard deviation of the sensor noise in rpm")
                .default_value("25.0")
                .takes_value(true),
        ).arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("Seed for reproducible noise")
                .takes_value(true),
        ).get_matches();

    if let Err(e) = run(&matches) {
        error!("{}", e);
        exit(1);
    }
}
