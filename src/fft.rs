//! Forward and inverse spectral transforms.
//!
//! Lengths must be powers of two; anything else is rejected up front.
//! The inverse path applies the 1/N scaling itself, so a forward/inverse
//! round trip reproduces the input without caller-side normalization.

use ndarray::Array1;
use num::complex::Complex64;
use num::Zero;
use rustfft::{FFTplanner, FFT};

use crate::common::{Real, Signal, Spectrum, TimeSignal};
use crate::error::{Error, Result};

/// In-place transform; forward when `inverse` is false. Lengths of 0 and
/// 1 pass through unchanged.
pub fn fft_in_place(data: &mut Array1<Complex64>, inverse: bool) -> Result<()> {
    let n = data.len();
    if n <= 1 {
        return Ok(());
    }
    if !n.is_power_of_two() {
        return Err(Error::NonPowerOfTwoLength { len: n });
    }

    let mut planner: FFTplanner<Real> = FFTplanner::new(inverse);
    let fft = planner.plan_fft(n);
    let mut spectrum = vec![Complex64::zero(); n];
    fft.process(data.as_slice_mut().unwrap(), &mut spectrum);

    let mut transformed = Array1::from(spectrum);
    if inverse {
        transformed.mapv_inplace(|x| x / n as Real);
    }
    data.assign(&transformed);
    Ok(())
}

impl TimeSignal {
    /// Forward transform into the frequency domain.
    pub fn into_spectrum(mut self) -> Result<Spectrum> {
        fft_in_place(&mut self.samples, false)?;
        Ok(Signal::new(self.samples))
    }
}

impl Spectrum {
    /// Inverse transform back to the time domain, 1/N scaling included.
    pub fn into_time(mut self) -> Result<TimeSignal> {
        fft_in_place(&mut self.samples, true)?;
        Ok(Signal::new(self.samples))
    }
}
