//! Doppler processing: hypothesis filtering and range-Doppler maps.

use ndarray::{Array1, Zip};
use num::complex::Complex64;
use num::Zero;
use rustfft::{FFTplanner, FFT};

use crate::common::{PulseTrain, Real, RealMatrix, Signal, Spectrum, TimeSignal, SPEED_OF_LIGHT};
use crate::error::{Error, Result};

/// Narrowband pass filter around the Doppler shift expected for the
/// hypothesized radial velocity.
///
/// The signal is transformed to the frequency domain (its length must be
/// a power of two) and every bin whose center frequency `i*fs/N` differs
/// from `2*velocity*f0/c` by at least one bin width is zeroed; the
/// remaining bins keep their complex spectral value.
pub fn doppler_filter(
    signal: &TimeSignal,
    carrier_freq: Real,
    sample_freq: Real,
    velocity: Real,
) -> Result<Spectrum> {
    let spectrum = signal.clone().into_spectrum()?;
    let n = spectrum.len();
    if n == 0 {
        return Ok(spectrum);
    }

    let doppler_shift = 2.0 * velocity * carrier_freq / SPEED_OF_LIGHT;
    let bin_width = sample_freq / n as Real;
    log::debug!(
        "doppler filter: shift {:.3} Hz, bin width {:.3} Hz",
        doppler_shift,
        bin_width
    );

    let filtered: Array1<Complex64> = spectrum
        .samples
        .indexed_iter()
        .map(|(i, &bin)| {
            let freq = i as Real * bin_width;
            if (freq - doppler_shift).abs() < bin_width {
                bin
            } else {
                Complex64::zero()
            }
        })
        .collect();
    Ok(Signal::new(filtered))
}

/// Transforms each pulse of the train independently and records the
/// magnitude per spectral bin; the output has one row per pulse.
pub fn range_doppler_map(pulses: &PulseTrain) -> Result<RealMatrix> {
    if pulses.nof_pulses() == 0 {
        return Err(Error::EmptyPulseTrain);
    }
    let n = pulses.pulse_len();
    if !n.is_power_of_two() {
        return Err(Error::NonPowerOfTwoLength { len: n });
    }

    let mut planner: FFTplanner<Real> = FFTplanner::new(false);
    let fft = planner.plan_fft(n);

    let mut scratch = pulses.matrix.clone();
    let mut spectrum = vec![Complex64::zero(); n];
    let mut map = RealMatrix::from_elem((pulses.nof_pulses(), n), 0.0);

    Zip::from(scratch.genrows_mut())
        .and(map.genrows_mut())
        .apply(|mut pulse, mut row| {
            fft.process(pulse.as_slice_mut().unwrap(), &mut spectrum);
            for (value, bin) in row.iter_mut().zip(spectrum.iter()) {
                *value = bin.norm();
            }
        });

    log::debug!(
        "range-doppler map: {} pulses x {} bins",
        map.nrows(),
        map.ncols()
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waveform::{barker_code, chirp};
    use num::traits::FloatConst;

    fn tone(len: usize, bin: usize) -> TimeSignal {
        let samples: Array1<Complex64> = (0..len)
            .map(|i| Complex64::new(0.0, 2.0 * Real::PI() * (bin * i) as Real / len as Real).exp())
            .collect();
        Signal::new(samples)
    }

    #[test]
    fn passband_straddles_the_hypothesized_shift() {
        // 1024 bins at 1024 Hz sampling puts the bin width at exactly
        // 1 Hz; carrier 1.5e8 makes the shift equal the velocity, so
        // 200.5 m/s lands midway between bins 200 and 201.
        let signal = tone(1024, 200);
        let filtered = doppler_filter(&signal, 1.5e8, 1024.0, 200.5).unwrap();

        assert_eq!(filtered.len(), 1024);
        assert!((filtered.samples[200].norm() - 1024.0).abs() < 1.0e-6);
        for (i, value) in filtered.samples.indexed_iter() {
            if i != 200 && i != 201 {
                assert_eq!(*value, Complex64::zero());
            }
        }
    }

    #[test]
    fn doppler_filter_requires_a_power_of_two_length() {
        let signal = chirp(1.0e9, 100.0e6, 1.0e-6, 1.0e9);
        assert!(matches!(
            doppler_filter(&signal, 1.0e9, 1.0e9, 300.0),
            Err(Error::NonPowerOfTwoLength { len: 1000 })
        ));
    }

    #[test]
    fn map_rows_are_per_pulse_magnitude_spectra() {
        let reference = tone(64, 5);
        let train = PulseTrain::from_reference(&reference, 4);
        let map = range_doppler_map(&train).unwrap();

        assert_eq!(map.dim(), (4, 64));
        for row in map.genrows() {
            let peak = row
                .indexed_iter()
                .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
                .map(|(i, _)| i)
                .unwrap();
            assert_eq!(peak, 5);
            assert!(row.iter().all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn empty_pulse_train_is_rejected() {
        let train = PulseTrain::from_reference(&tone(64, 5), 0);
        assert!(matches!(
            range_doppler_map(&train),
            Err(Error::EmptyPulseTrain)
        ));
    }

    #[test]
    fn non_power_of_two_pulses_are_rejected() {
        let train = PulseTrain::from_reference(&barker_code(7), 2);
        assert!(matches!(
            range_doppler_map(&train),
            Err(Error::NonPowerOfTwoLength { len: 7 })
        ));
    }
}
