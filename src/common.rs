use core::marker::PhantomData;

use std::fs::File;
use std::io::Write;
use std::ops::{Add, Neg, Sub};

use ndarray::{Array1, Array2};
use num::complex::Complex64;
use num::traits::{Num, ToPrimitive};
use serde::Serialize;

use crate::error::Result;

pub type Real = f64;

pub const SPEED_OF_LIGHT: Real = 3.0e8;

pub type CpxMatrix = Array2<Complex64>;
pub type RealMatrix = Array2<Real>;

/// A power level relative to some reference, in dB.
#[derive(Copy, Clone, Debug)]
pub struct Decibel(Real);

/// A linear power ratio.
#[derive(Copy, Clone, Debug)]
pub struct Ratio(Real);

impl Add for Decibel {
    type Output = Decibel;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Decibel {
    type Output = Decibel;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Decibel {
    type Output = Decibel;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<Decibel> for Ratio {
    fn from(db: Decibel) -> Self {
        Self(Real::powf(10.0, db.0 / 10.0))
    }
}

impl From<Ratio> for Decibel {
    fn from(ratio: Ratio) -> Self {
        Self(10.0 * Real::log10(ratio.0))
    }
}

macro_rules! impl_from_primitive_for {
    ($DR: ty) => {
        impl<T: Num + ToPrimitive> From<T> for $DR {
            #[inline]
            fn from(value: T) -> Self {
                Self(value.to_f64().unwrap())
            }
        }
    };
}

impl_from_primitive_for!(Decibel);
impl_from_primitive_for!(Ratio);

impl From<Decibel> for Real {
    fn from(db: Decibel) -> Self {
        db.0
    }
}

impl From<Ratio> for Real {
    fn from(ratio: Ratio) -> Self {
        ratio.0
    }
}

pub trait Units {
    fn db(self) -> Decibel;

    fn ratio(self) -> Ratio;

    fn value(self) -> Real;
}

impl<T: Into<Decibel> + Into<Ratio> + Into<Real>> Units for T {
    fn db(self) -> Decibel {
        self.into()
    }

    fn ratio(self) -> Ratio {
        self.into()
    }

    fn value(self) -> Real {
        self.into()
    }
}

/// Marker for time-domain sample sequences.
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Time {}

/// Marker for frequency-domain sample sequences.
#[derive(Copy, Clone, Debug, Serialize)]
pub struct Freq {}

/// An ordered sequence of complex baseband samples, tagged with the
/// domain it lives in.
#[derive(Clone, Debug, Serialize)]
pub struct Signal<D> {
    pub samples: Array1<Complex64>,
    _domain: PhantomData<D>,
}

pub type TimeSignal = Signal<Time>;
pub type Spectrum = Signal<Freq>;

impl<D> Signal<D> {
    pub fn new(samples: Array1<Complex64>) -> Self {
        Self {
            samples,
            _domain: PhantomData,
        }
    }

    pub fn empty() -> Self {
        Self::new(Array1::from(Vec::new()))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Mean of |s|² over all samples, 0 for an empty signal.
    pub fn mean_power(&self) -> Real {
        if self.is_empty() {
            return 0.0;
        }
        self.samples.iter().map(|s| s.norm_sqr()).sum::<Real>() / self.len() as Real
    }

    /// Largest sample magnitude, 0 for an empty signal.
    pub fn peak_magnitude(&self) -> Real {
        self.samples.iter().map(|s| s.norm()).fold(0.0, Real::max)
    }
}

/// A coherent train of equal-length pulses, one row per pulse. Equal
/// length is guaranteed by construction from a single reference signal.
#[derive(Clone, Debug, Serialize)]
pub struct PulseTrain {
    pub matrix: CpxMatrix,
}

impl PulseTrain {
    /// Replicates one reference waveform into `nof_pulses` rows.
    /// Impairment draws afterwards turn the rows into independent
    /// realizations.
    pub fn from_reference(reference: &TimeSignal, nof_pulses: usize) -> Self {
        let matrix =
            Array2::from_shape_fn((nof_pulses, reference.len()), |(_, j)| reference.samples[j]);
        Self { matrix }
    }

    pub fn nof_pulses(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn pulse_len(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn pulse(&self, index: usize) -> TimeSignal {
        Signal::new(self.matrix.row(index).to_owned())
    }
}

pub trait Storable: Serialize {
    fn to_file(&self, path: &std::path::Path) -> Result<()> {
        let mut file = File::create(&path)?;
        let s = serde_json::to_string(self)?;
        file.write_all(s.as_bytes())?;
        Ok(())
    }
}

impl<D: Serialize> Storable for Signal<D> {}

impl Storable for PulseTrain {}

impl Storable for RealMatrix {}
