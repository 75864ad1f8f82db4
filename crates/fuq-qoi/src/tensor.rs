//! Per-sample storage for one extraction pass.

use ndarray::{s, Array3};

use crate::stat::{nan_mean, nan_std};

/// Base observables every fluctuation formula draws its first moments from.
pub const BASE_COLUMNS: [&str; 3] = ["PotEng", "Press", "Volume"];

/// One timestep's base observables, in [`BASE_COLUMNS`] order with raw log units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseSample {
    /// Potential energy.
    pub pot_eng: f64,
    /// Pressure as printed in the log.
    pub press: f64,
    /// Volume.
    pub volume: f64,
}

/// Pooled first moments of the base observables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseMoments {
    /// `<PotEng>`.
    pub pot_eng: f64,
    /// `<Press>`.
    pub press: f64,
    /// `<Volume>`.
    pub volume: f64,
}

/// Samples indexed `(time, replicate, quantity)`.
///
/// Sweeps over further parameters (spatial bins, strain states) extend this
/// by inserting axes between `replicate` and `quantity`; [`SampleTensor::reduce`]
/// folds every axis except the last, so callers only ever see per-quantity
/// results.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTensor {
    raw: Array3<f64>,
    base: Array3<f64>,
}

/// Reduced moments of a [`SampleTensor`].
#[derive(Debug, Clone, PartialEq)]
pub struct Moments {
    /// NaN-ignoring mean of the raw samples per quantity.
    pub mean: Vec<f64>,
    /// NaN-ignoring population standard deviation of the raw samples per quantity.
    pub std: Vec<f64>,
    /// First moments of the base observables.
    pub base: BaseMoments,
}

impl SampleTensor {
    /// NaN-filled tensor; unwritten slots never bias a reduction.
    pub fn new(timesteps: usize, replicates: usize, quantities: usize) -> Self {
        Self {
            raw: Array3::from_elem((timesteps, replicates, quantities), f64::NAN),
            base: Array3::from_elem((timesteps, replicates, BASE_COLUMNS.len()), f64::NAN),
        }
    }

    /// `(time, replicate, quantity)` extents.
    pub fn dim(&self) -> (usize, usize, usize) {
        self.raw.dim()
    }

    /// Stores the raw sample of one quantity.
    pub fn record(&mut self, time: usize, replicate: usize, quantity: usize, raw: f64) {
        self.raw[[time, replicate, quantity]] = raw;
    }

    /// Stores the base observables of one timestep.
    pub fn record_base(&mut self, time: usize, replicate: usize, base: BaseSample) {
        let values = [base.pot_eng, base.press, base.volume];
        for (b, value) in values.into_iter().enumerate() {
            self.base[[time, replicate, b]] = value;
        }
    }

    /// Reduces over time and replicates, ignoring NaN.
    pub fn reduce(&self) -> Moments {
        let (_, _, quantities) = self.dim();
        let pooled = |array: &Array3<f64>, idx: usize| {
            let lane = array.slice(s![.., .., idx]);
            (nan_mean(lane.iter().copied()), nan_std(lane.iter().copied()))
        };
        let (mean, std): (Vec<f64>, Vec<f64>) =
            (0..quantities).map(|q| pooled(&self.raw, q)).unzip();
        Moments {
            mean,
            std,
            base: BaseMoments {
                pot_eng: pooled(&self.base, 0).0,
                press: pooled(&self.base, 1).0,
                volume: pooled(&self.base, 2).0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritten_slots_are_ignored() {
        let mut tensor = SampleTensor::new(3, 2, 1);
        tensor.record(0, 0, 0, 2.0);
        tensor.record(1, 1, 0, 4.0);
        let moments = tensor.reduce();
        assert_eq!(moments.mean, vec![3.0]);
        assert_eq!(moments.std, vec![1.0]);
        assert!(moments.base.volume.is_nan());
    }

    #[test]
    fn base_moments_pool_time_and_replicates() {
        let mut tensor = SampleTensor::new(2, 2, 1);
        for (time, replicate, volume) in [(0, 0, 10.0), (1, 0, 12.0), (0, 1, 14.0)] {
            let base = BaseSample {
                pot_eng: -1.0,
                press: 2.0,
                volume,
            };
            tensor.record_base(time, replicate, base);
        }
        let base = tensor.reduce().base;
        assert_eq!(base.volume, 12.0);
        assert_eq!(base.pot_eng, -1.0);
        assert_eq!(base.press, 2.0);
    }
}
