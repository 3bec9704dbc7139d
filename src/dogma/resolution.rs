//! Third pass: compute every attribute's final value by memoized depth-first evaluation of
//! its modifier edges, then write the results back into the graph.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::data::catalog::Catalog;
use crate::dogma::model::{Entity, Ship};
use crate::dogma::stacking::{StackContribution, StatStacking};
use crate::error::{DogmaError, Result};

type AttributeKey = (Entity, i32);

/// Evaluation state for one computation. Reads the graph, never writes it.
struct Resolver<'a, C: ?Sized> {
    catalog: &'a C,
    ship: &'a Ship,
    memo: HashMap<AttributeKey, f64>,
    in_progress: HashSet<AttributeKey>,
}

impl<'a, C: Catalog + ?Sized> Resolver<'a, C> {
    fn new(catalog: &'a C, ship: &'a Ship) -> Self {
        Self {
            catalog,
            ship,
            memo: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    fn value(&mut self, entity: Entity, attribute_id: i32) -> Result<f64> {
        let ship = self.ship;
        let Some(attribute) = ship
            .entity(entity)
            .and_then(|item| item.attributes.get(&attribute_id))
        else {
            return Ok(self.catalog.attribute_definition(attribute_id).default_value);
        };

        if let Some(pinned) = attribute.resolved {
            return Ok(pinned);
        }
        let key = (entity, attribute_id);
        if let Some(&value) = self.memo.get(&key) {
            return Ok(value);
        }
        if !self.in_progress.insert(key) {
            return Err(DogmaError::CyclicDependency {
                entity,
                attribute_id,
            });
        }

        let mut stacking = StatStacking::new();
        for modifier in &attribute.modifiers {
            let Some(source) = ship.entity(modifier.source) else {
                continue;
            };
            if !source.state.satisfies(modifier.source_category) {
                continue;
            }
            let raw = self.value(modifier.source, modifier.source_attribute_id)?;
            stacking.add(StackContribution::new(
                modifier.operator,
                raw,
                modifier.stacking_penalty,
            ));
        }

        let high_is_good = self.catalog.attribute_definition(attribute_id).high_is_good;
        let value = stacking.compose(attribute.base_value, high_is_good);

        self.in_progress.remove(&key);
        self.memo.insert(key, value);
        Ok(value)
    }
}

/// Resolve every attribute on every entity. Overridden attributes keep their pinned value.
pub fn resolve<C: Catalog + ?Sized>(catalog: &C, ship: &mut Ship) -> Result<()> {
    let values = {
        let mut resolver = Resolver::new(catalog, ship);
        for entity in ship.entities() {
            let Some(item) = ship.entity(entity) else {
                continue;
            };
            for &attribute_id in item.attributes.keys() {
                resolver.value(entity, attribute_id)?;
            }
        }
        resolver.memo
    };

    let resolved = values.len();
    for ((entity, attribute_id), value) in values {
        if let Some(attribute) = ship
            .entity_mut(entity)
            .and_then(|item| item.attributes.get_mut(&attribute_id))
        {
            attribute.resolved = Some(value);
        }
    }

    debug!(resolved, "resolved attributes");
    Ok(())
}
