//! Full pipeline: assemble, route, resolve, then the capacitor simulation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::data::catalog::Catalog;
use crate::data::fit::{Fit, Skills};
use crate::dogma::model::Ship;
use crate::dogma::{assembly, capacitor, resolution, routing};
use crate::error::Result;

/// A fit and the skill levels it is flown with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub fit: Fit,
    #[serde(default)]
    pub skills: Skills,
}

impl CalculationRequest {
    pub fn new(fit: Fit, skills: Skills) -> Self {
        Self { fit, skills }
    }

    pub fn calculate<C: Catalog + ?Sized>(
        &self,
        catalog: &C,
        config: &EngineConfig,
    ) -> Result<Ship> {
        calculate(catalog, &self.fit, &self.skills, config)
    }
}

/// Compute every attribute of the fitted ship. The returned graph carries final values in
/// `resolved`; read them with [`Ship::attribute_value`].
pub fn calculate<C: Catalog + ?Sized>(
    catalog: &C,
    fit: &Fit,
    skills: &Skills,
    config: &EngineConfig,
) -> Result<Ship> {
    let mut ship = assembly::assemble(catalog, fit, skills)?;
    let modifiers = routing::route(catalog, &mut ship);
    resolution::resolve(catalog, &mut ship)?;
    let depletes_in = capacitor::apply(catalog, &mut ship, config);

    debug!(
        ship_type_id = fit.ship_type_id,
        modifiers,
        depletes_in,
        "calculated fit"
    );
    Ok(ship)
}
