//! Quantity classification and ensemble-required quantity injection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, FuqError};

/// Thermo keywords that appear verbatim as log columns.
pub const THERMO_KEYWORDS: &[&str] = &[
    "Step", "Elapsed", "Time", "Temp", "Press", "PotEng", "KinEng", "TotEng", "Enthalpy",
    "E_vdwl", "E_coul", "E_pair", "E_bond", "E_angle", "E_dihed", "E_impro", "E_mol", "E_long",
    "E_tail", "Volume", "Density", "Lx", "Ly", "Lz", "Pxx", "Pyy", "Pzz", "Pxy", "Pxz", "Pyz",
    "Atoms", "CPU",
];

/// Thermodynamic constraint set of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Ensemble {
    /// Constant particle number, volume and temperature.
    #[default]
    #[serde(rename = "nvt")]
    ConstantVolume,
    /// Constant particle number, pressure and temperature.
    #[serde(rename = "npt")]
    ConstantPressure,
}

impl Ensemble {
    /// Quantities every study in this ensemble extracts, whether requested or not.
    pub const fn required_quantities(&self) -> &'static [&'static str] {
        match self {
            Ensemble::ConstantVolume => &["PotEng"],
            Ensemble::ConstantPressure => &["PotEng", "Volume"],
        }
    }

    /// Short label used in configuration files.
    pub const fn label(&self) -> &'static str {
        match self {
            Ensemble::ConstantVolume => "nvt",
            Ensemble::ConstantPressure => "npt",
        }
    }
}

impl fmt::Display for Ensemble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Ensemble {
    type Err = FuqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nvt" => Ok(Ensemble::ConstantVolume),
            "npt" => Ok(Ensemble::ConstantPressure),
            other => Err(FuqError::Config(
                ErrorInfo::new("unknown-ensemble", format!("{other} is not a supported ensemble"))
                    .with_hint("use nvt or npt"),
            )),
        }
    }
}

/// Properties computed from the variance of direct observables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fluctuation {
    /// Constant-volume heat capacity from potential energy fluctuations.
    HeatCapacityVol,
    /// Constant-pressure heat capacity from enthalpy fluctuations.
    HeatCapacityPress,
    /// Isothermal compressibility from volume fluctuations.
    Compressibility,
    /// Thermal expansion coefficient from volume-enthalpy cross fluctuations.
    ThermalExpansion,
}

impl Fluctuation {
    /// Every recognised fluctuation quantity.
    pub const ALL: [Fluctuation; 4] = [
        Fluctuation::HeatCapacityVol,
        Fluctuation::HeatCapacityPress,
        Fluctuation::Compressibility,
        Fluctuation::ThermalExpansion,
    ];

    /// Canonical quantity name.
    pub const fn name(&self) -> &'static str {
        match self {
            Fluctuation::HeatCapacityVol => "HeatCapacityVol",
            Fluctuation::HeatCapacityPress => "HeatCapacityPress",
            Fluctuation::Compressibility => "Compressibility",
            Fluctuation::ThermalExpansion => "ThermalExpansion",
        }
    }

    /// Looks up a fluctuation quantity by its exact name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|fluct| fluct.name() == name)
    }
}

/// Category a requested quantity falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "fluctuation", rename_all = "kebab-case")]
pub enum Category {
    /// Read verbatim from a log column.
    DirectThermo,
    /// Derived from raw moments of direct observables.
    Fluctuation(Fluctuation),
}

/// Returns true when `name` is a thermo column keyword.
pub fn is_thermo(name: &str) -> bool {
    THERMO_KEYWORDS.contains(&name)
}

/// Returns true when `name` is a recognised fluctuation quantity.
pub fn is_fluct(name: &str) -> bool {
    Fluctuation::from_name(name).is_some()
}

/// Classifies a single quantity name, failing for unsupported names.
pub fn classify(name: &str) -> Result<Category, FuqError> {
    if is_thermo(name) {
        return Ok(Category::DirectThermo);
    }
    if let Some(fluct) = Fluctuation::from_name(name) {
        return Ok(Category::Fluctuation(fluct));
    }
    Err(FuqError::Config(
        ErrorInfo::new(
            "unsupported-quantity",
            format!("{name} is not a supported quantity of interest"),
        )
        .with_context("quantity", name),
    ))
}

/// A classified quantity of interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantitySpec {
    name: String,
    category: Category,
}

impl QuantitySpec {
    /// Classifies `name` into a new spec.
    pub fn new(name: impl Into<String>) -> Result<Self, FuqError> {
        let name = name.into();
        let category = classify(&name)?;
        Ok(Self { name, category })
    }

    /// Quantity name as it appears in logs and reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category assigned at construction.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns true for quantities read straight from a log column.
    pub fn is_direct(&self) -> bool {
        matches!(self.category, Category::DirectThermo)
    }

    /// Returns the fluctuation kind, if any.
    pub fn fluctuation(&self) -> Option<Fluctuation> {
        match self.category {
            Category::Fluctuation(fluct) => Some(fluct),
            Category::DirectThermo => None,
        }
    }
}

/// Ordered, deduplicated and fully classified list of quantities for one study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QoiSelection {
    ensemble: Ensemble,
    quantities: Vec<QuantitySpec>,
}

impl QoiSelection {
    /// Classifies the requested names after appending the ensemble's required quantities.
    ///
    /// Duplicate names keep their first position. Any unsupported name aborts
    /// construction.
    pub fn new<I, S>(requested: I, ensemble: Ensemble) -> Result<Self, FuqError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = Vec::new();
        let required = ensemble.required_quantities().iter().copied();
        for name in requested
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .chain(required.map(str::to_string))
        {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        let quantities = names
            .into_iter()
            .map(QuantitySpec::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            ensemble,
            quantities,
        })
    }

    /// Ensemble the selection was built for.
    pub fn ensemble(&self) -> Ensemble {
        self.ensemble
    }

    /// Classified quantities in extraction order.
    pub fn quantities(&self) -> &[QuantitySpec] {
        &self.quantities
    }

    /// Quantity names in extraction order.
    pub fn names(&self) -> Vec<&str> {
        self.quantities.iter().map(QuantitySpec::name).collect()
    }

    /// Number of quantities.
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Returns true if the selection is empty (never the case after construction).
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Position of `name` in the selection.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.quantities.iter().position(|spec| spec.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_requests_collapse() {
        let selection =
            QoiSelection::new(["Temp", "Temp", "PotEng"], Ensemble::ConstantVolume).unwrap();
        assert_eq!(selection.names(), vec!["Temp", "PotEng"]);
    }

    #[test]
    fn ensemble_parses_case_insensitively() {
        assert_eq!("NPT".parse::<Ensemble>().unwrap(), Ensemble::ConstantPressure);
        assert!("nve".parse::<Ensemble>().is_err());
    }
}
