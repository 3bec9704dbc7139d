//! Capacitor depletion: an event-driven simulation over the resolved ship, run after
//! resolution and stored on the hull.

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::constants::CAPACITOR_STABLE_SENTINEL;
use crate::data::catalog::Catalog;
use crate::dogma::model::Ship;

/// One active module draining the capacitor on a fixed cycle.
#[derive(Debug, Clone, Copy)]
struct Drain {
    need: f64,
    duration_ms: f64,
    next_cycle_ms: f64,
}

fn drains(ship: &Ship, config: &EngineConfig) -> Vec<Drain> {
    ship.items
        .iter()
        .filter(|item| item.slot.kind.is_module() && item.state.is_active())
        .filter_map(|item| {
            let need = item.attribute_value(config.capacitor_need)?;
            let duration_ms = item.attribute_value(config.cycle_time)?;
            (duration_ms > 0.0).then_some(Drain {
                need,
                duration_ms,
                next_cycle_ms: 0.0,
            })
        })
        .collect()
}

/// Capacitor left after recharging from `elapsed_ms` ago, per the standard recharge curve.
fn recharge(capacitor: f64, capacity: f64, recharge_ms: f64, elapsed_ms: f64) -> f64 {
    let decay = (-5.0 * elapsed_ms / recharge_ms).exp();
    let curve = 1.0 + ((capacitor / capacity).sqrt() - 1.0) * decay;
    capacity * curve * curve
}

/// Seconds until the capacitor runs dry, or [`CAPACITOR_STABLE_SENTINEL`] if it never does.
pub fn depletion_time<C: Catalog + ?Sized>(
    catalog: &C,
    ship: &Ship,
    config: &EngineConfig,
) -> f64 {
    let hull_value = |attribute_id: i32| {
        ship.hull_attribute(attribute_id)
            .unwrap_or_else(|| catalog.attribute_definition(attribute_id).default_value)
    };

    if hull_value(config.capacitor_peak_delta) >= 0.0 {
        return CAPACITOR_STABLE_SENTINEL;
    }
    let mut drains = drains(ship, config);
    if drains.is_empty() {
        return CAPACITOR_STABLE_SENTINEL;
    }

    let capacity = hull_value(config.capacitor_capacity);
    let recharge_ms = hull_value(config.recharge_rate);
    if recharge_ms <= 0.0 {
        warn!(recharge_ms, "non-positive capacitor recharge rate, treating as stable");
        return CAPACITOR_STABLE_SENTINEL;
    }
    if capacity <= 0.0 {
        return 0.0;
    }

    let mut capacitor = capacity;
    let mut last_ms = 0.0;
    let mut next_ms = 0.0;
    for _ in 0..config.capacitor_iteration_budget {
        capacitor = recharge(capacitor, capacity, recharge_ms, next_ms - last_ms);
        last_ms = next_ms;
        next_ms = f64::INFINITY;

        for drain in &mut drains {
            if drain.next_cycle_ms <= last_ms {
                drain.next_cycle_ms += drain.duration_ms;
                capacitor -= drain.need;
            }
            next_ms = next_ms.min(drain.next_cycle_ms);
        }

        if capacitor <= 0.0 {
            return last_ms / 1000.0;
        }
    }

    debug!(
        budget = config.capacitor_iteration_budget,
        "capacitor simulation exhausted its budget"
    );
    CAPACITOR_STABLE_SENTINEL
}

/// Run the simulation and pin the result on the hull's depletes-in attribute.
pub fn apply<C: Catalog + ?Sized>(catalog: &C, ship: &mut Ship, config: &EngineConfig) -> f64 {
    let seconds = depletion_time(catalog, ship, config);
    ship.hull.override_attribute(config.capacitor_depletes_in, seconds);
    debug!(seconds, "capacitor depletion");
    seconds
}
