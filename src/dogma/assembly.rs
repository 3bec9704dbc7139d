//! First pass: build the entity graph from a fit and skill levels and seed base values.
//! No modifier edges exist after this pass.

use std::collections::HashSet;

use tracing::debug;

use crate::constants::{
    ATTRIBUTE_RADIUS, ATTRIBUTE_SKILL_LEVEL, ATTRIBUTE_VOLUME, MAX_SKILL_LEVEL,
};
use crate::data::catalog::Catalog;
use crate::data::fit::{Fit, Skills};
use crate::dogma::model::{ActivationState, Item, Ship, Slot};
use crate::error::{DogmaError, Result};

/// Seed an entity's attributes from its type's catalog defaults plus geometry.
pub fn seed_attributes<C: Catalog + ?Sized>(item: &mut Item, catalog: &C) {
    for attribute in catalog.default_attributes(item.type_id) {
        item.set_attribute(attribute.attribute_id, attribute.value);
    }

    let info = catalog.type_metadata(item.type_id);
    if let Some(volume) = info.volume {
        item.set_attribute(ATTRIBUTE_VOLUME, volume);
    }
    if let Some(radius) = info.radius {
        item.set_attribute(ATTRIBUTE_RADIUS, radius);
    }
}

/// Drones only distinguish idle from launched-and-working.
fn drone_state(requested: ActivationState) -> ActivationState {
    match requested {
        ActivationState::Passive => ActivationState::Passive,
        _ => ActivationState::Active,
    }
}

fn validate(fit: &Fit, skills: &Skills) -> Result<()> {
    if let Some((&skill_id, &level)) = skills.iter().find(|&(_, &level)| level > MAX_SKILL_LEVEL) {
        return Err(DogmaError::InvalidSkillLevel { skill_id, level });
    }

    let mut occupied = HashSet::new();
    for module in &fit.modules {
        if !occupied.insert(module.slot) {
            return Err(DogmaError::SlotOccupied {
                kind: module.slot.kind,
                index: module.slot.index,
            });
        }
    }
    Ok(())
}

pub fn assemble<C: Catalog + ?Sized>(catalog: &C, fit: &Fit, skills: &Skills) -> Result<Ship> {
    validate(fit, skills)?;

    let mut ship = Ship::new(fit.ship_type_id);
    seed_attributes(&mut ship.hull, catalog);

    for (&skill_id, &level) in skills {
        let mut skill = Item::new_fake(skill_id);
        seed_attributes(&mut skill, catalog);
        skill.override_attribute(ATTRIBUTE_SKILL_LEVEL, f64::from(level));
        ship.skills.push(skill);
    }

    for module in &fit.modules {
        let slot = Slot {
            kind: module.slot.kind.into(),
            index: Some(module.slot.index),
        };
        let mut item = Item::new_module(module.type_id, slot, module.charge_type_id, module.state);
        seed_attributes(&mut item, catalog);
        if let Some(charge) = item.charge.as_deref_mut() {
            seed_attributes(charge, catalog);
        }
        ship.items.push(item);
    }

    for drone in &fit.drones {
        let mut item = Item::new_drone(drone.type_id, drone_state(drone.state));
        seed_attributes(&mut item, catalog);
        ship.items.push(item);
    }

    debug!(
        ship_type_id = fit.ship_type_id,
        items = ship.items.len(),
        skills = ship.skills.len(),
        "assembled ship"
    );
    Ok(ship)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::TypeInfo;
    use crate::data::fit::SlotKind;
    use crate::data::memory::MemoryCatalog;
    use crate::dogma::model::SlotType;

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .with_type_info(
                587,
                TypeInfo {
                    group_id: 25,
                    category_id: Some(6),
                    published: Some(true),
                    volume: Some(27289.0),
                    radius: Some(31.0),
                },
            )
            .with_type_attributes(587, &[(37, 365.0), (482, 250.0)])
            .with_type_attributes(3300, &[(ATTRIBUTE_SKILL_LEVEL, 0.0), (1000, 5.0)])
            .with_type_attributes(2889, &[(50, 12.0)])
            .with_type_attributes(12608, &[(114, 4.0)])
            .with_type_attributes(2488, &[(37, 1200.0)])
    }

    #[test]
    fn hull_is_seeded_with_catalog_defaults_and_geometry() {
        let ship = assemble(&catalog(), &Fit::new(587), &Skills::new()).unwrap();

        assert_eq!(ship.hull.base_value(37), Some(365.0));
        assert_eq!(ship.hull.base_value(ATTRIBUTE_VOLUME), Some(27289.0));
        assert_eq!(ship.hull.base_value(ATTRIBUTE_RADIUS), Some(31.0));
        assert!(ship.items.is_empty());
        assert!(ship
            .hull
            .attributes
            .values()
            .all(|attribute| attribute.modifiers.is_empty()));
    }

    #[test]
    fn skill_level_is_forced_as_override() {
        let skills = Skills::from([(3300, 4)]);
        let ship = assemble(&catalog(), &Fit::new(587), &skills).unwrap();

        let skill = &ship.skills[0];
        assert_eq!(skill.attributes[&ATTRIBUTE_SKILL_LEVEL].resolved, Some(4.0));
        assert_eq!(skill.base_value(1000), Some(5.0));
    }

    #[test]
    fn modules_get_charges_and_drones_collapse_state() {
        let fit = Fit::new(587)
            .with_module(2889, SlotKind::High, 0, ActivationState::Overload, Some(12608))
            .with_drone(2488, ActivationState::Online)
            .with_drone(2488, ActivationState::Passive);

        let ship = assemble(&catalog(), &fit, &Skills::new()).unwrap();

        let module = &ship.items[0];
        assert_eq!(module.slot.kind, SlotType::High);
        assert_eq!(module.state, ActivationState::Overload);
        assert_eq!(module.max_state, ActivationState::Passive);
        assert_eq!(module.base_value(50), Some(12.0));
        let charge = module.charge.as_deref().unwrap();
        assert_eq!(charge.base_value(114), Some(4.0));

        assert_eq!(ship.items[1].slot.kind, SlotType::DroneBay);
        assert_eq!(ship.items[1].state, ActivationState::Active);
        assert_eq!(ship.items[2].state, ActivationState::Passive);
    }

    #[test]
    fn rejects_skill_level_above_five() {
        let skills = Skills::from([(3300, 6)]);
        let err = assemble(&catalog(), &Fit::new(587), &skills).unwrap_err();
        assert!(matches!(
            err,
            DogmaError::InvalidSkillLevel {
                skill_id: 3300,
                level: 6
            }
        ));
    }

    #[test]
    fn rejects_two_modules_in_one_slot() {
        let fit = Fit::new(587)
            .with_module(2889, SlotKind::High, 0, ActivationState::Active, None)
            .with_module(2889, SlotKind::High, 0, ActivationState::Active, None);
        let err = assemble(&catalog(), &fit, &Skills::new()).unwrap_err();
        assert!(matches!(
            err,
            DogmaError::SlotOccupied {
                kind: SlotKind::High,
                index: 0
            }
        ));
    }
}
