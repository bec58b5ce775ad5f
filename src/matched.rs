//! Matched filtering by direct causal correlation.

use ndarray::{Array1, ArrayView1, Zip};
use num::complex::Complex64;
use num::Zero;

use crate::common::{CpxMatrix, PulseTrain, Signal, TimeSignal};

fn correlate(
    signal: &ArrayView1<'_, Complex64>,
    reference: &ArrayView1<'_, Complex64>,
) -> Array1<Complex64> {
    let mut output = Array1::from_elem(signal.len(), Complex64::zero());
    for i in 0..signal.len() {
        let mut acc = Complex64::zero();
        for j in 0..reference.len().min(i + 1) {
            acc += signal[i - j] * reference[j].conj();
        }
        output[i] = acc;
    }
    output
}

/// Correlates `signal` against `reference`, truncated at the front so
/// the output length equals the input length.
pub fn matched_filter(signal: &TimeSignal, reference: &TimeSignal) -> TimeSignal {
    Signal::new(correlate(&signal.samples.view(), &reference.samples.view()))
}

impl PulseTrain {
    /// Applies the matched filter to every pulse.
    pub fn matched_filter(&self, reference: &TimeSignal) -> PulseTrain {
        let mut filtered = CpxMatrix::from_elem(self.matrix.dim(), Complex64::zero());
        Zip::from(filtered.genrows_mut())
            .and(self.matrix.genrows())
            .apply(|mut out, pulse| {
                out.assign(&correlate(&pulse, &reference.samples.view()));
            });
        PulseTrain { matrix: filtered }
    }
}
