//! Second pass: walk every granted effect, raise maximum activation states, and attach
//! directed modifier edges to the attributes they target.

use tracing::{debug, trace, warn};

use crate::constants::{
    ATTRIBUTE_CAPACITOR_NEED, ATTRIBUTE_REQUIRED_SKILLS, EXEMPT_PENALTY_CATEGORY_IDS,
};
use crate::data::catalog::{Catalog, ModifierDomain, ModifierFunc, ModifierRule};
use crate::dogma::model::{
    ActivationState, AttributeValue, EffectCategory, Entity, Item, Modifier, Operator, Ship,
};

/// How a modifier rule selects its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingMode {
    /// The single entity named by the rule's domain.
    Item,
    /// Hull, every item and every charge.
    Location,
    /// Hull, items and charges of one catalog group.
    LocationGroup(i32),
    /// Hull, items and charges requiring a skill (`-1` means the source's own type).
    LocationRequiredSkill(i32),
    OwnerRequiredSkill(i32),
}

impl RoutingMode {
    /// `None` for effect stoppers and for rules missing the group or skill they filter on.
    pub fn from_rule(rule: &ModifierRule) -> Option<Self> {
        match rule.func {
            ModifierFunc::ItemModifier => Some(Self::Item),
            ModifierFunc::LocationModifier => Some(Self::Location),
            ModifierFunc::LocationGroupModifier => rule.group_id.map(Self::LocationGroup),
            ModifierFunc::LocationRequiredSkillModifier => {
                rule.skill_type_id.map(Self::LocationRequiredSkill)
            }
            ModifierFunc::OwnerRequiredSkillModifier => {
                rule.skill_type_id.map(Self::OwnerRequiredSkill)
            }
            ModifierFunc::EffectStopper => None,
        }
    }
}

/// Entity a single-target rule lands on. `otherID` swaps between a module and its charge.
pub fn domain_target(domain: ModifierDomain, origin: Entity) -> Option<Entity> {
    match domain {
        ModifierDomain::Ship => Some(Entity::Hull),
        ModifierDomain::Character => Some(Entity::Character),
        ModifierDomain::Structure => Some(Entity::Structure),
        ModifierDomain::Target | ModifierDomain::TargetId => Some(Entity::Target),
        ModifierDomain::Item => Some(origin),
        ModifierDomain::Other => match origin {
            Entity::Item(index) => Some(Entity::Charge(index)),
            Entity::Charge(index) => Some(Entity::Item(index)),
            _ => None,
        },
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingModifier {
    mode: RoutingMode,
    operator: Operator,
    source: Entity,
    source_category: EffectCategory,
    source_attribute_id: i32,
    domain_target: Option<Entity>,
    target_attribute_id: i32,
}

/// Walk one entity's granted effects: adjust its states and queue its modifier rules.
fn collect_effects<C: Catalog + ?Sized>(
    catalog: &C,
    item: &mut Item,
    origin: Entity,
    pending: &mut Vec<PendingModifier>,
) {
    for granted in catalog.granted_effects(item.type_id) {
        let effect = catalog.effect_definition(granted.effect_id);
        let Some(category) = EffectCategory::from_raw(effect.effect_category) else {
            warn!(
                effect_id = granted.effect_id,
                category = effect.effect_category,
                "skipping effect with unknown category"
            );
            continue;
        };

        if let Some(state) = category.as_state() {
            if state > item.max_state {
                item.max_state = state;
            }
        }

        if effect.modifier_info.is_empty() {
            item.triggered_effects.push(granted.effect_id);
            continue;
        }

        for rule in &effect.modifier_info {
            let Some(mode) = RoutingMode::from_rule(rule) else {
                continue;
            };
            let Some(operator) = rule.operation.and_then(Operator::from_code) else {
                continue;
            };
            if matches!(origin, Entity::Item(_))
                && rule.domain == ModifierDomain::Other
                && item.charge.is_none()
            {
                continue;
            }
            let (Some(source_attribute_id), Some(target_attribute_id)) =
                (rule.modifying_attribute_id, rule.modified_attribute_id)
            else {
                continue;
            };

            let target = domain_target(rule.domain, origin);
            if mode == RoutingMode::Item && target.is_none() {
                warn!(
                    effect_id = granted.effect_id,
                    %origin,
                    "skipping otherID modifier without a paired module or charge"
                );
                continue;
            }

            pending.push(PendingModifier {
                mode,
                operator,
                source: origin,
                source_category: category,
                source_attribute_id,
                domain_target: target,
                target_attribute_id,
            });
        }
    }

    let needs_capacitor = item
        .base_value(ATTRIBUTE_CAPACITOR_NEED)
        .is_some_and(|need| need != 0.0);
    if needs_capacitor && item.max_state < ActivationState::Active {
        item.max_state = ActivationState::Active;
    }

    item.state = item.state.min(item.max_state);
}

fn targets_for<C: Catalog + ?Sized>(
    catalog: &C,
    ship: &Ship,
    mode: RoutingMode,
    domain_target: Option<Entity>,
    source_type_id: i32,
) -> Vec<Entity> {
    match mode {
        RoutingMode::Item => domain_target.into_iter().collect(),
        RoutingMode::Location => ship.located_entities(),
        RoutingMode::LocationGroup(group_id) => ship
            .located_entities()
            .into_iter()
            .filter(|&entity| {
                ship.entity(entity)
                    .is_some_and(|item| catalog.type_metadata(item.type_id).group_id == group_id)
            })
            .collect(),
        RoutingMode::LocationRequiredSkill(skill_id)
        | RoutingMode::OwnerRequiredSkill(skill_id) => {
            let skill_id = if skill_id == -1 { source_type_id } else { skill_id };
            let required = f64::from(skill_id);
            let located = ship.located_entities();
            // Each slot is checked on its own; an entity listing the skill twice is targeted twice.
            ATTRIBUTE_REQUIRED_SKILLS
                .iter()
                .flat_map(|&slot| {
                    located.iter().copied().filter(move |&entity| {
                        ship.entity(entity)
                            .and_then(|item| item.base_value(slot))
                            .is_some_and(|value| value == required)
                    })
                })
                .collect()
        }
    }
}

fn attach<C: Catalog + ?Sized>(
    catalog: &C,
    item: &mut Item,
    attribute_id: i32,
    source_category_id: i32,
    pending: &PendingModifier,
) {
    let definition = catalog.attribute_definition(attribute_id);
    let stacking_penalty =
        !definition.stackable && !EXEMPT_PENALTY_CATEGORY_IDS.contains(&source_category_id);

    item.attributes
        .entry(attribute_id)
        .or_insert_with(|| AttributeValue::new(definition.default_value))
        .modifiers
        .push(Modifier {
            operator: pending.operator,
            stacking_penalty,
            source: pending.source,
            source_category: pending.source_category,
            source_attribute_id: pending.source_attribute_id,
        });
}

/// Route every effect on the ship. Returns the number of modifier edges attached.
pub fn route<C: Catalog + ?Sized>(catalog: &C, ship: &mut Ship) -> usize {
    let mut pending = Vec::new();

    collect_effects(catalog, &mut ship.hull, Entity::Hull, &mut pending);
    collect_effects(catalog, &mut ship.character, Entity::Character, &mut pending);
    for (index, item) in ship.items.iter_mut().enumerate() {
        collect_effects(catalog, item, Entity::Item(index), &mut pending);
        if let Some(charge) = item.charge.as_deref_mut() {
            collect_effects(catalog, charge, Entity::Charge(index), &mut pending);
        }
    }
    for (index, skill) in ship.skills.iter_mut().enumerate() {
        collect_effects(catalog, skill, Entity::Skill(index), &mut pending);
    }

    let mut attached = 0;
    for modifier in &pending {
        if matches!(modifier.source, Entity::Structure | Entity::Target) {
            continue;
        }
        let Some(source_type_id) = ship.entity(modifier.source).map(|item| item.type_id) else {
            continue;
        };
        let source_category_id = catalog.type_metadata(source_type_id).category();

        let targets = targets_for(
            catalog,
            ship,
            modifier.mode,
            modifier.domain_target,
            source_type_id,
        );
        for target in targets {
            let Some(item) = ship.entity_mut(target) else {
                continue;
            };
            attach(
                catalog,
                item,
                modifier.target_attribute_id,
                source_category_id,
                modifier,
            );
            trace!(
                source = %modifier.source,
                %target,
                attribute_id = modifier.target_attribute_id,
                operator = ?modifier.operator,
                "attached modifier"
            );
            attached += 1;
        }
    }

    debug!(queued = pending.len(), attached, "routed effects");
    attached
}
