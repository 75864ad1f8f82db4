//! Unit systems and the per-quantity output scale factors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, FuqError};

/// Boltzmann constant in eV/K.
pub const KB_METAL: f64 = 8.617e-5;
/// Boltzmann constant in kcal/mol/K.
pub const KB_REAL: f64 = 0.001_987_206_7;
/// bar -> GPa -> eV/A^3.
pub const BAR_TO_EV_PER_A3: f64 = 0.0001 / 160.217_662_08;
/// atm -> kcal/mol/A^3.
pub const ATM_TO_KCAL_PER_MOL_A3: f64 = 1.458_397_2e-5;
/// kcal/mol per eV.
pub const KCAL_PER_MOL_PER_EV: f64 = 23.060_549;

const ENERGY_QUANTITIES: &[&str] = &[
    "PotEng", "KinEng", "TotEng", "Enthalpy", "E_vdwl", "E_coul", "E_pair", "E_bond", "E_angle",
    "E_dihed", "E_impro", "E_mol", "E_long", "E_tail",
];

const PRESSURE_QUANTITIES: &[&str] = &["Press", "Pxx", "Pyy", "Pzz", "Pxy", "Pxz", "Pyz"];

/// Unit convention used by the MD engine for raw log values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// eV, Angstrom, bar, K.
    #[default]
    Metal,
    /// kcal/mol, Angstrom, atm, K.
    Real,
}

impl UnitSystem {
    /// Boltzmann constant in this system's energy units per kelvin.
    pub const fn boltzmann(&self) -> f64 {
        match self {
            UnitSystem::Metal => KB_METAL,
            UnitSystem::Real => KB_REAL,
        }
    }

    /// Factor turning a raw pressure into energy per cubic Angstrom.
    pub const fn pressure_to_energy_density(&self) -> f64 {
        match self {
            UnitSystem::Metal => BAR_TO_EV_PER_A3,
            UnitSystem::Real => ATM_TO_KCAL_PER_MOL_A3,
        }
    }

    /// Multiplicative factor applied once to a reduced quantity.
    ///
    /// Unknown names map to 1.
    pub fn conversion(&self, quantity: &str, atoms: usize) -> f64 {
        let atoms = atoms.max(1) as f64;
        if ENERGY_QUANTITIES.contains(&quantity) {
            return match self {
                UnitSystem::Metal => 1.0 / atoms,
                UnitSystem::Real => 1.0 / atoms / KCAL_PER_MOL_PER_EV,
            };
        }
        if PRESSURE_QUANTITIES.contains(&quantity) {
            return match self {
                UnitSystem::Metal => 0.0001,
                UnitSystem::Real => 0.000_101_325,
            };
        }
        match quantity {
            "Volume" => 0.001,
            "HeatCapacityVol" | "HeatCapacityPress" => 1.0 / atoms / self.boltzmann(),
            "Compressibility" => 1e4,
            "ThermalExpansion" => 1.0,
            _ => 1.0,
        }
    }

    /// Display unit of a converted quantity, empty when unknown.
    pub fn label(&self, quantity: &str) -> &'static str {
        if ENERGY_QUANTITIES.contains(&quantity) {
            return "eV/atom";
        }
        if PRESSURE_QUANTITIES.contains(&quantity) {
            return "GPa";
        }
        match quantity {
            "Volume" => "nm^3",
            "Temp" => "K",
            "HeatCapacityVol" | "HeatCapacityPress" => "kB/atom",
            "Compressibility" => "1/GPa",
            "ThermalExpansion" => "1/K",
            _ => "",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metal => f.write_str("metal"),
            UnitSystem::Real => f.write_str("real"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = FuqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metal" => Ok(UnitSystem::Metal),
            "real" => Ok(UnitSystem::Real),
            other => Err(FuqError::Config(
                ErrorInfo::new("unknown-units", format!("{other} is not a supported unit system"))
                    .with_hint("use metal or real"),
            )),
        }
    }
}
