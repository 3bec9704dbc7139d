//! Engine configuration: attribute ids the capacitor simulation reads and writes, and its
//! iteration budget. Loaded from JSON; every field falls back to its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::catalog::Catalog;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub capacitor_peak_delta: i32,
    pub capacitor_capacity: i32,
    pub recharge_rate: i32,
    pub capacitor_need: i32,
    pub cycle_time: i32,
    pub capacitor_depletes_in: i32,
    /// Simulation steps before a capacitor is declared stable.
    pub capacitor_iteration_budget: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacitor_peak_delta: 5000,
            capacitor_capacity: 482,
            recharge_rate: 55,
            capacitor_need: 6,
            cycle_time: 73,
            capacitor_depletes_in: 5001,
            capacitor_iteration_budget: 100_000,
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file. A missing file yields the defaults; unreadable or malformed
    /// files are errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Replace ids with the catalog's own where it knows the attribute by name.
    pub fn with_catalog_names<C: Catalog + ?Sized>(mut self, catalog: &C) -> Self {
        let lookups: [(&mut i32, &[&str]); 6] = [
            (&mut self.capacitor_peak_delta, &["capacitorPeakDelta"]),
            (&mut self.capacitor_capacity, &["capacitorCapacity"]),
            (&mut self.recharge_rate, &["rechargeRate"]),
            (&mut self.capacitor_need, &["capacitorNeed"]),
            (&mut self.cycle_time, &["cycleTime", "duration"]),
            (&mut self.capacitor_depletes_in, &["capacitorDepletesIn"]),
        ];
        for (slot, names) in lookups {
            if let Some(id) = names.iter().find_map(|name| catalog.attribute_id(name)) {
                *slot = id;
            }
        }
        self
    }
}
