//! Cell-averaging CFAR detection.

use ndarray::{s, Array1};

use crate::common::{Real, TimeSignal};
use crate::error::{Error, Result};

/// Cell-averaging CFAR parameters: symmetric guard and training windows
/// around the cell under test, and the false alarm probability the
/// threshold is calibrated for.
#[derive(Clone, Debug)]
pub struct CfarConfig {
    pub nof_guard_cells: usize,
    pub nof_training_cells: usize,
    pub false_alarm_rate: Real,
}

impl CfarConfig {
    fn validate(&self) -> Result<()> {
        if self.nof_training_cells == 0 {
            return Err(Error::NoTrainingCells);
        }
        if !(self.false_alarm_rate > 0.0 && self.false_alarm_rate < 1.0) {
            return Err(Error::FalseAlarmOutOfRange {
                pfa: self.false_alarm_rate,
            });
        }
        Ok(())
    }

    /// Scale factor on the averaged training power that holds the
    /// configured false alarm rate under exponential noise statistics,
    /// with `n` the total number of averaged cells.
    fn threshold_factor(&self) -> Real {
        let n = (2 * self.nof_training_cells) as Real;
        n * (self.false_alarm_rate.powf(-1.0 / n) - 1.0)
    }
}

/// Scans every cell far enough from the edges to carry full guard and
/// training windows on both sides and returns the indices whose power
/// exceeds the locally estimated threshold, in ascending order.
///
/// Guard cells and the cell under test are excluded from the noise
/// estimate; edge cells without full windows are never evaluated.
pub fn cfar_detection(signal: &TimeSignal, config: &CfarConfig) -> Result<Vec<usize>> {
    config.validate()?;

    let (guard, training) = (config.nof_guard_cells, config.nof_training_cells);
    let margin = guard + training;
    let power: Array1<Real> = signal.samples.map(|s| s.norm_sqr());

    let mut detections = Vec::new();
    if power.len() <= 2 * margin {
        return Ok(detections);
    }

    let alpha = config.threshold_factor();
    for i in margin..power.len() - margin {
        let leading = power.slice(s![i - margin..i - guard]);
        let trailing = power.slice(s![i + guard + 1..i + margin + 1]);
        let noise_estimate = (leading.sum() + trailing.sum()) / (2 * training) as Real;
        if power[i] > alpha * noise_estimate {
            detections.push(i);
        }
    }

    log::debug!(
        "cfar: {} detections over {} cells under test",
        detections.len(),
        power.len() - 2 * margin
    );
    Ok(detections)
}
