//! Calibrated white noise and clutter injection.
//!
//! Both impairments add an independent zero-mean complex Gaussian draw to
//! every sample; they differ only in how the injected power relates to the
//! measured signal power. The generator is passed in by the caller so runs
//! can be seeded.

use ndarray::{Array1, ArrayViewMut1, Zip};
use ndarray_rand::rand::Rng;
use ndarray_rand::rand_distr::StandardNormal;
use ndarray_rand::RandomExt;
use num::complex::Complex64;

use crate::common::{Decibel, PulseTrain, Real, TimeSignal, Units};

fn view_mean_power(samples: &ArrayViewMut1<'_, Complex64>) -> Real {
    samples.iter().map(|s| s.norm_sqr()).sum::<Real>() / samples.len() as Real
}

/// Adds a white complex Gaussian draw of the given per-sample power,
/// split evenly between the real and imaginary parts.
fn inject_white<R>(mut samples: ArrayViewMut1<'_, Complex64>, power: Real, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let s = (power / 2.0).sqrt();
    let n = samples.len();
    let re: Array1<Real> = s * Array1::random_using(n, StandardNormal, rng);
    let im: Array1<Real> = s * Array1::random_using(n, StandardNormal, rng);
    Zip::from(&mut samples)
        .and(&re)
        .and(&im)
        .apply(|sample, &re, &im| *sample += Complex64::new(re, im));
}

impl TimeSignal {
    /// Measures the mean signal power and superimposes white Gaussian
    /// noise sitting `snr` below it. Empty signals are left untouched.
    pub fn add_noise<L, R>(&mut self, snr: L, rng: &mut R)
    where
        L: Into<Decibel>,
        R: Rng + ?Sized,
    {
        if self.is_empty() {
            return;
        }
        let noise_power = self.mean_power() / snr.into().ratio().value();
        inject_white(self.samples.view_mut(), noise_power, rng);
    }

    /// Clutter uses the same mechanism as noise, but its power sits `cnr`
    /// *above* the measured signal power.
    pub fn add_clutter<L, R>(&mut self, cnr: L, rng: &mut R)
    where
        L: Into<Decibel>,
        R: Rng + ?Sized,
    {
        if self.is_empty() {
            return;
        }
        let clutter_power = self.mean_power() * cnr.into().ratio().value();
        inject_white(self.samples.view_mut(), clutter_power, rng);
    }
}

impl PulseTrain {
    /// Per-pulse noise injection: every pulse is measured on its own and
    /// receives an independent draw.
    pub fn add_noise<L, R>(&mut self, snr: L, rng: &mut R)
    where
        L: Into<Decibel>,
        R: Rng + ?Sized,
    {
        let ratio = snr.into().ratio().value();
        for pulse in self.matrix.genrows_mut() {
            if pulse.is_empty() {
                continue;
            }
            let noise_power = view_mean_power(&pulse) / ratio;
            inject_white(pulse, noise_power, rng);
        }
    }

    /// Per-pulse clutter injection.
    pub fn add_clutter<L, R>(&mut self, cnr: L, rng: &mut R)
    where
        L: Into<Decibel>,
        R: Rng + ?Sized,
    {
        let ratio = cnr.into().ratio().value();
        for pulse in self.matrix.genrows_mut() {
            if pulse.is_empty() {
                continue;
            }
            let clutter_power = view_mean_power(&pulse) * ratio;
            inject_white(pulse, clutter_power, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Signal;
    use crate::waveform::chirp;
    use approx::assert_relative_eq;
    use ndarray_rand::rand::rngs::StdRng;
    use ndarray_rand::rand::SeedableRng;

    fn injected_power(clean: &TimeSignal, dirty: &TimeSignal) -> Real {
        clean
            .samples
            .iter()
            .zip(dirty.samples.iter())
            .map(|(a, b)| (b - a).norm_sqr())
            .sum::<Real>()
            / clean.len() as Real
    }

    #[test]
    fn noise_preserves_length_and_converges_to_the_requested_power() {
        let clean = chirp(1.0e6, 1.0e6, 4096.0e-6, 1.0e6);
        assert_eq!(clean.len(), 4096);

        let mut rng = StdRng::seed_from_u64(1);
        let mut noisy = clean.clone();
        noisy.add_noise(10.0.db(), &mut rng);

        assert_eq!(noisy.len(), clean.len());
        // Unit-power chirp at 10 dB SNR implies 0.1 noise power.
        assert_relative_eq!(injected_power(&clean, &noisy), 0.1, max_relative = 0.15);
    }

    #[test]
    fn clutter_power_sits_above_the_signal_power() {
        let clean = chirp(1.0e6, 1.0e6, 4096.0e-6, 1.0e6);
        let mut rng = StdRng::seed_from_u64(2);
        let mut cluttered = clean.clone();
        cluttered.add_clutter(20.0.db(), &mut rng);

        assert_eq!(cluttered.len(), clean.len());
        assert_relative_eq!(
            injected_power(&clean, &cluttered),
            100.0,
            max_relative = 0.15
        );
    }

    #[test]
    fn empty_signal_is_a_no_op() {
        let mut signal: TimeSignal = Signal::empty();
        let mut rng = StdRng::seed_from_u64(3);
        signal.add_noise(10.0.db(), &mut rng);
        signal.add_clutter(10.0.db(), &mut rng);
        assert!(signal.is_empty());
    }

    #[test]
    fn identical_seeds_reproduce_identical_draws() {
        let clean = chirp(1.0e6, 1.0e6, 64.0e-6, 1.0e6);

        let mut first = clean.clone();
        let mut second = clean.clone();
        first.add_noise(10.0.db(), &mut StdRng::seed_from_u64(7));
        second.add_noise(10.0.db(), &mut StdRng::seed_from_u64(7));
        assert_eq!(first.samples, second.samples);

        // A continued generator must not repeat its draw.
        let mut rng = StdRng::seed_from_u64(7);
        let mut third = clean.clone();
        let mut fourth = clean.clone();
        third.add_noise(10.0.db(), &mut rng);
        fourth.add_noise(10.0.db(), &mut rng);
        assert_ne!(third.samples, fourth.samples);
    }

    #[test]
    fn train_pulses_receive_independent_draws() {
        let reference = chirp(1.0e6, 1.0e6, 64.0e-6, 1.0e6);
        let mut train = PulseTrain::from_reference(&reference, 2);
        let mut rng = StdRng::seed_from_u64(11);
        train.add_noise(10.0.db(), &mut rng);
        assert_ne!(train.pulse(0).samples, train.pulse(1).samples);
    }
}
