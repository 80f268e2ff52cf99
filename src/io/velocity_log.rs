use crate::util::DspError;
use log::debug;
use serde::{Deserialize, Serialize};

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

pub const TIME_COLUMN: &str = "Time (s)";
pub const SENSED_COLUMN: &str = "Sensed Velocity (rpm)";
pub const COMMANDED_COLUMN: &str = "Velocity Cmd (rpm)";

#[derive(Debug, Deserialize)]
struct VelocityRecord {
    #[serde(rename = "Sensed Velocity (rpm)")]
    sensed: f64,
    #[serde(rename = "Velocity Cmd (rpm)")]
    commanded: f64,
}

/// One row of a generated log.
#[derive(Clone, Debug, Serialize)]
pub struct VelocitySample {
    #[serde(rename = "Time (s)")]
    pub time_s: f64,
    #[serde(rename = "Velocity Cmd (rpm)")]
    pub commanded: f64,
    #[serde(rename = "Sensed Velocity (rpm)")]
    pub sensed: f64,
}

/// Sensed and commanded velocity columns, read in lock-step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VelocityRecords {
    pub sensed: Vec<f64>,
    pub commanded: Vec<f64>,
}

/// Reads the velocity columns from CSV data with a header row.
///
/// Columns other than the sensed and commanded velocity are ignored and
/// whitespace around fields is trimmed.
///
/// # Examples
///
/// ```
/// use velocity_dsp::io::read_velocity_csv;
///
/// let data = "Time (s),Velocity Cmd (rpm),Sensed Velocity (rpm)\n\
///             0.000,100.0,98.5\n\
///             0.002,100.0,101.2\n";
/// let records = read_velocity_csv(data.as_bytes()).unwrap();
/// assert_eq!(records.sensed, vec![98.5, 101.2]);
/// assert_eq!(records.commanded, vec![100.0, 100.0]);
/// ```
pub fn read_velocity_csv<R: Read>(reader: R) -> Result<VelocityRecords, DspError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = VelocityRecords::default();
    for row in reader.deserialize() {
        let row: VelocityRecord = row?;
        records.sensed.push(row.sensed);
        records.commanded.push(row.commanded);
    }
    Ok(records)
}

/// Opens and reads a velocity log from disk.
///
/// The file is closed before this returns, whether or not every row
/// parsed.
pub fn load_velocity_csv<P: AsRef<Path>>(path: P) -> Result<VelocityRecords, DspError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = read_velocity_csv(BufReader::new(file))?;
    debug!(
        "Read {} rows from {}",
        records.sensed.len(),
        path.display()
    );
    Ok(records)
}

/// Writes a velocity log with a header row.
pub fn write_velocity_csv<W: Write>(
    writer: W,
    samples: &[VelocitySample],
) -> Result<(), DspError> {
    let mut writer = csv::Writer::from_writer(writer);
    for sample in samples {
        writer.serialize(sample)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use crate::io::velocity_log::*;
    use crate::util::DspError;

    #[test]
    fn test_extra_columns_and_whitespace() {
        let data = "Sensed Velocity (rpm), Current (A) ,Velocity Cmd (rpm)\n\
                    1.5 , 0.2, 2.0\n\
                    -3.0,0.1,4.0\n";
        let records = read_velocity_csv(data.as_bytes()).unwrap();
        assert_eq!(records.sensed, vec![1.5, -3.0]);
        assert_eq!(records.commanded, vec![2.0, 4.0]);
    }

    #[test]
    fn test_missing_column() {
        let data = format!("{}\n1.0\n", SENSED_COLUMN);
        match read_velocity_csv(data.as_bytes()) {
            Err(DspError::Csv(_)) => {}
            other => panic!("expected a CSV error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_number() {
        let data = "Sensed Velocity (rpm),Velocity Cmd (rpm)\n1.0,2.0\nfast,3.0\n";
        assert!(read_velocity_csv(data.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file() {
        match load_velocity_csv("/nonexistent/velocity.csv") {
            Err(DspError::Io(_)) => {}
            other => panic!("expected an I/O error, got {:?}", other),
        }
    }

    #[test]
    fn test_write_then_read() {
        let samples = vec![
            VelocitySample {
                time_s: 0.0,
                commanded: 0.0,
                sensed: 0.5,
            },
            VelocitySample {
                time_s: 0.002,
                commanded: 100.0,
                sensed: 12.25,
            },
        ];
        let mut buffer = Vec::new();
        write_velocity_csv(&mut buffer, &samples).unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        let header = format!("{},{},{}", TIME_COLUMN, COMMANDED_COLUMN, SENSED_COLUMN);
        assert_eq!(text.lines().next(), Some(header.as_str()));

        let records = read_velocity_csv(&buffer[..]).unwrap();
        assert_eq!(records.sensed, vec![0.5, 12.25]);
        assert_eq!(records.commanded, vec![0.0, 100.0]);
    }
}
