//! Reference transmit waveforms.

use ndarray::Array1;
use num::complex::Complex64;
use num::traits::FloatConst;

use crate::common::{Real, Signal, TimeSignal};

const BARKER_7: [Real; 7] = [1.0, 1.0, 1.0, -1.0, -1.0, 1.0, -1.0];
const BARKER_13: [Real; 13] = [
    1.0, 1.0, 1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, 1.0, -1.0, 1.0,
];

fn chirp_linear(t: &Array1<Real>, f0: Real, sweep_rate: Real) -> Array1<Complex64> {
    t.map(|&t| 2.0 * Real::PI() * (f0 * t + 0.5 * sweep_rate * t * t))
        .map(|&im| Complex64::new(0.0, im).exp())
}

/// Linear-FM chirp of `floor(duration * sample_freq)` unit-amplitude
/// samples, sweeping `bandwidth` Hz upwards from `f0` over `duration`.
///
/// A duration shorter than one sample period yields an empty signal.
pub fn chirp(f0: Real, bandwidth: Real, duration: Real, sample_freq: Real) -> TimeSignal {
    let nof_samples = (duration * sample_freq).floor() as usize;
    if nof_samples == 0 {
        return Signal::empty();
    }
    let sweep_rate = bandwidth / duration;
    let t = Array1::from_shape_fn(nof_samples, |i| i as Real / sample_freq);
    Signal::new(chirp_linear(&t, f0, sweep_rate))
}

/// Biphase Barker pulse, one sample per chip. Only lengths 7 and 13 are
/// supported; any other length yields an empty signal.
pub fn barker_code(code_length: usize) -> TimeSignal {
    let chips: &[Real] = match code_length {
        7 => &BARKER_7,
        13 => &BARKER_13,
        _ => return Signal::empty(),
    };
    Signal::new(
        chips
            .iter()
            .map(|&polarity| Complex64::new(polarity, 0.0))
            .collect(),
    )
}
