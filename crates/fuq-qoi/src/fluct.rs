//! Closed-form fluctuation formulas.

use fuq_core::Fluctuation;

use crate::aggregate::BatchState;
use crate::tensor::{BaseMoments, BaseSample};

/// Thermo columns every replicate log must carry.
pub const STATE_COLUMNS: [&str; 4] = ["PotEng", "Press", "Volume", "Temp"];

/// `prefactor * (<X^2> - <X>^2)`.
pub fn fluctuation(prefactor: f64, avg_of_square: f64, avg: f64) -> f64 {
    prefactor * (avg_of_square - avg * avg)
}

/// Prefactor of a fluctuation quantity, in raw units.
///
/// Uses the batch's initial temperature and volume.
pub fn prefactor(fluct: Fluctuation, state: &BatchState) -> f64 {
    match fluct {
        Fluctuation::HeatCapacityVol | Fluctuation::HeatCapacityPress => {
            state.beta / state.temperature
        }
        Fluctuation::Compressibility => state.beta / state.volume,
        Fluctuation::ThermalExpansion => state.beta / state.temperature / state.volume,
    }
}

/// Raw second-moment sample of a fluctuation quantity at one timestep.
///
/// `PotEng + Press * Volume` uses the pressure as printed in the log.
pub fn sample(fluct: Fluctuation, base: BaseSample) -> f64 {
    match fluct {
        Fluctuation::HeatCapacityVol => base.pot_eng * base.pot_eng,
        Fluctuation::HeatCapacityPress => {
            let composite = base.pot_eng + base.press * base.volume;
            composite * composite
        }
        Fluctuation::Compressibility | Fluctuation::ThermalExpansion => base.volume * base.volume,
    }
}

/// First-moment term subtracted after squaring.
///
/// The composite term is built from the separate means, `<U> + <P> <V>`.
pub fn base_term(fluct: Fluctuation, base: &BaseMoments) -> f64 {
    match fluct {
        Fluctuation::HeatCapacityVol => base.pot_eng,
        Fluctuation::Compressibility => base.volume,
        Fluctuation::HeatCapacityPress | Fluctuation::ThermalExpansion => {
            base.pot_eng + base.press * base.volume
        }
    }
}

/// Derived value from the reduced raw moment and the base first moments.
pub fn derive(fluct: Fluctuation, state: &BatchState, raw: f64, base: &BaseMoments) -> f64 {
    fluctuation(prefactor(fluct, state), raw, base_term(fluct, base))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: BaseSample = BaseSample {
        pot_eng: -10.0,
        press: 2.0,
        volume: 4.0,
    };

    #[test]
    fn heat_capacity_press_squares_the_composite() {
        assert_eq!(sample(Fluctuation::HeatCapacityPress, BASE), 4.0);
        assert_eq!(sample(Fluctuation::HeatCapacityVol, BASE), 100.0);
    }

    #[test]
    fn thermal_expansion_pairs_volume_square_with_composite_mean() {
        assert_eq!(sample(Fluctuation::ThermalExpansion, BASE), 16.0);
        let moments = BaseMoments {
            pot_eng: -10.0,
            press: 2.0,
            volume: 4.0,
        };
        assert_eq!(base_term(Fluctuation::ThermalExpansion, &moments), -2.0);
        assert_eq!(base_term(Fluctuation::Compressibility, &moments), 4.0);
    }
}
