//! Species → molar mass lookup injected into synthesis callers.

use crate::domain::{CrdsError, CrdsResult, require_positive};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Molar masses (g/mol) for the HITRAN molecules the simulator ships with.
const DEFAULT_MOLAR_MASSES: [(&str, f64); 28] = [
    ("H2O", 18.015),
    ("CO2", 44.01),
    ("CH4", 16.04),
    ("NH3", 17.03),
    ("N2O", 44.01),
    ("CO", 28.01),
    ("O3", 47.998),
    ("SO2", 64.066),
    ("NO2", 46.006),
    ("HNO3", 63.01),
    ("O2", 31.998),
    ("NO", 30.006),
    ("OH", 17.007),
    ("HF", 20.006),
    ("HCl", 36.458),
    ("HBr", 80.912),
    ("HI", 127.912),
    ("ClO", 51.452),
    ("OCS", 60.076),
    ("H2CO", 30.026),
    ("HOCl", 52.460),
    ("N2", 28.014),
    ("HCN", 27.026),
    ("CH3Cl", 50.487),
    ("H2O2", 34.015),
    ("C2H2", 26.037),
    ("C2H6", 30.069),
    ("PH3", 33.998),
];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MolarMassTable {
    entries: BTreeMap<String, f64>,
}

impl MolarMassTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_species() -> Self {
        let entries = DEFAULT_MOLAR_MASSES
            .iter()
            .map(|(formula, mass)| ((*formula).to_string(), *mass))
            .collect();
        Self { entries }
    }

    pub fn insert(&mut self, formula: impl Into<String>, molar_mass: f64) -> CrdsResult<()> {
        let formula = formula.into();
        let formula = formula.trim();
        if formula.is_empty() {
            return Err(CrdsError::input_validation(
                "INPUT.SPECIES",
                "species formula must not be empty",
            ));
        }
        require_positive("INPUT.MOLECULAR_MASS", "molecular mass", molar_mass)?;
        self.entries.insert(formula.to_string(), molar_mass);
        Ok(())
    }

    /// Formulas are case-sensitive (`CO` and `Co` are different species).
    pub fn get(&self, formula: &str) -> Option<f64> {
        self.entries.get(formula.trim()).copied()
    }

    pub fn molar_mass(&self, formula: &str) -> CrdsResult<f64> {
        self.get(formula).ok_or_else(|| {
            CrdsError::input_validation(
                "INPUT.SPECIES",
                format!("no molar mass registered for species '{}'", formula.trim()),
            )
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(formula, mass)| (formula.as_str(), *mass))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
