//! Persisted signal exchange: one `<real>,<imag>` line per sample,
//! newline-terminated, no header.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use num::complex::Complex64;

use crate::common::{Signal, TimeSignal};
use crate::error::{Error, Result};

pub fn save_signal<D>(signal: &Signal<D>, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    for sample in signal.samples.iter() {
        writeln!(file, "{},{}", sample.re, sample.im)?;
    }
    log::debug!("saved {} samples to {}", signal.len(), path.display());
    Ok(())
}

pub fn load_signal(path: &Path) -> Result<TimeSignal> {
    let file = File::open(path)?;
    let mut samples = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let mut fields = line.splitn(2, ',');
        let sample = match (fields.next(), fields.next()) {
            (Some(re), Some(im)) => match (re.trim().parse(), im.trim().parse()) {
                (Ok(re), Ok(im)) => Complex64::new(re, im),
                _ => return Err(Error::MalformedSample { line: index + 1 }),
            },
            _ => return Err(Error::MalformedSample { line: index + 1 }),
        };
        samples.push(sample);
    }
    Ok(Signal::new(samples.into()))
}
