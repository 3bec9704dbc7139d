#![allow(dead_code)]

use dogma_engine::data::{
    AttributeDefinition, EffectDefinition, MemoryCatalog, ModifierDomain, ModifierFunc,
    ModifierRule, SlotKind,
};
use dogma_engine::dogma::ActivationState;
use dogma_engine::{EngineConfig, Fit, Skills};

pub const HULL: i32 = 587;
pub const ARMOR_PLATE: i32 = 31;
pub const OVERDRIVE_LARGE: i32 = 1236;
pub const OVERDRIVE_SMALL: i32 = 1244;
pub const AFTERBURNER: i32 = 439;
pub const AUTOCANNON: i32 = 2889;
pub const AMMO: i32 = 185;
pub const GUNNERY: i32 = 3300;

pub const ATTR_MASS: i32 = 4;
pub const ATTR_HP: i32 = 9;
pub const ATTR_SPEED_FACTOR: i32 = 20;
pub const ATTR_MAX_VELOCITY: i32 = 37;
pub const ATTR_DAMAGE_MULTIPLIER: i32 = 64;
pub const ATTR_EM_DAMAGE: i32 = 114;
pub const ATTR_REQUIRED_SKILL_1: i32 = 182;
pub const ATTR_SKILL_LEVEL: i32 = 280;
pub const ATTR_DAMAGE_BONUS: i32 = 292;
pub const ATTR_MASS_ADDITION: i32 = 796;
pub const ATTR_HP_BONUS: i32 = 1159;
pub const ATTR_TRAINING_PENALTY: i32 = 999;

const EFFECT_ONLINE: i32 = 16;

pub fn approx_eq(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "expected {b}, got {a}");
}

fn ship_rule(operation: i32, source: i32, target: i32) -> ModifierRule {
    ModifierRule::new(
        ModifierFunc::ItemModifier,
        ModifierDomain::Ship,
        operation,
        source,
        target,
    )
}

/// A frigate, a handful of modules, one charge and one skill.
pub fn catalog() -> MemoryCatalog {
    let config = EngineConfig::default();
    MemoryCatalog::new()
        .with_group(25, 6)
        .with_group(55, 7)
        .with_group(46, 7)
        .with_group(329, 7)
        .with_group(765, 7)
        .with_group(83, 8)
        .with_group(255, 16)
        .with_type(HULL, 25)
        .with_type(ARMOR_PLATE, 329)
        .with_type(OVERDRIVE_LARGE, 765)
        .with_type(OVERDRIVE_SMALL, 765)
        .with_type(AFTERBURNER, 46)
        .with_type(AUTOCANNON, 55)
        .with_type(AMMO, 83)
        .with_type(GUNNERY, 255)
        .with_type_attributes(
            HULL,
            &[
                (ATTR_MASS, 1_000_000.0),
                (ATTR_HP, 350.0),
                (ATTR_MAX_VELOCITY, 365.0),
                (config.capacitor_capacity, 250.0),
                (config.recharge_rate, 125_000.0),
                (config.capacitor_peak_delta, -2.0),
            ],
        )
        .with_type_attributes(ARMOR_PLATE, &[(ATTR_HP_BONUS, 100.0)])
        .with_type_attributes(OVERDRIVE_LARGE, &[(ATTR_SPEED_FACTOR, 10.0)])
        .with_type_attributes(OVERDRIVE_SMALL, &[(ATTR_SPEED_FACTOR, 5.0)])
        .with_type_attributes(
            AFTERBURNER,
            &[
                (ATTR_MASS_ADDITION, 500_000.0),
                (config.capacitor_need, 10.0),
                (config.cycle_time, 10_000.0),
            ],
        )
        .with_type_attributes(
            AUTOCANNON,
            &[
                (ATTR_DAMAGE_MULTIPLIER, 3.0),
                (ATTR_REQUIRED_SKILL_1, f64::from(GUNNERY)),
            ],
        )
        .with_type_attributes(AMMO, &[(ATTR_EM_DAMAGE, 10.0)])
        .with_type_attributes(GUNNERY, &[(ATTR_SKILL_LEVEL, 0.0), (ATTR_DAMAGE_BONUS, 5.0)])
        .with_type_effects(ARMOR_PLATE, &[11, EFFECT_ONLINE, 9100])
        .with_type_effects(OVERDRIVE_LARGE, &[11, EFFECT_ONLINE, 9101])
        .with_type_effects(OVERDRIVE_SMALL, &[11, EFFECT_ONLINE, 9101])
        .with_type_effects(AFTERBURNER, &[13, EFFECT_ONLINE, 9102])
        .with_type_effects(AUTOCANNON, &[12, EFFECT_ONLINE, 9103])
        .with_type_effects(GUNNERY, &[9104, 9105, 9106])
        .with_attribute(
            ATTR_MAX_VELOCITY,
            AttributeDefinition {
                default_value: 0.0,
                high_is_good: true,
                stackable: false,
            },
        )
        .with_attribute(
            ATTR_TRAINING_PENALTY,
            AttributeDefinition {
                default_value: 0.5,
                high_is_good: true,
                stackable: true,
            },
        )
        .with_effect(EFFECT_ONLINE, EffectDefinition::new(4, Vec::new()))
        .with_effect(
            9100,
            EffectDefinition::new(0, vec![ship_rule(2, ATTR_HP_BONUS, ATTR_HP)]),
        )
        .with_effect(
            9101,
            EffectDefinition::new(0, vec![ship_rule(6, ATTR_SPEED_FACTOR, ATTR_MAX_VELOCITY)]),
        )
        .with_effect(
            9102,
            EffectDefinition::new(1, vec![ship_rule(2, ATTR_MASS_ADDITION, ATTR_MASS)]),
        )
        .with_effect(
            9103,
            EffectDefinition::new(
                0,
                vec![ModifierRule::new(
                    ModifierFunc::ItemModifier,
                    ModifierDomain::Other,
                    4,
                    ATTR_DAMAGE_MULTIPLIER,
                    ATTR_EM_DAMAGE,
                )],
            ),
        )
        .with_effect(
            9104,
            EffectDefinition::new(
                0,
                vec![ModifierRule::new(
                    ModifierFunc::ItemModifier,
                    ModifierDomain::Item,
                    4,
                    ATTR_SKILL_LEVEL,
                    ATTR_DAMAGE_BONUS,
                )],
            ),
        )
        .with_effect(
            9105,
            EffectDefinition::new(
                0,
                vec![ModifierRule::new(
                    ModifierFunc::LocationRequiredSkillModifier,
                    ModifierDomain::Ship,
                    6,
                    ATTR_DAMAGE_BONUS,
                    ATTR_DAMAGE_MULTIPLIER,
                )
                .with_skill(-1)],
            ),
        )
        .with_effect(
            9106,
            EffectDefinition::new(
                0,
                vec![ModifierRule::new(
                    ModifierFunc::ItemModifier,
                    ModifierDomain::Item,
                    4,
                    ATTR_TRAINING_PENALTY,
                    ATTR_SKILL_LEVEL,
                )],
            ),
        )
}

/// Armor plate, two overdrives, an afterburner and a loaded autocannon.
pub fn full_fit(afterburner: ActivationState) -> Fit {
    Fit::new(HULL)
        .with_module(ARMOR_PLATE, SlotKind::Low, 0, ActivationState::Online, None)
        .with_module(OVERDRIVE_LARGE, SlotKind::Low, 1, ActivationState::Online, None)
        .with_module(OVERDRIVE_SMALL, SlotKind::Low, 2, ActivationState::Online, None)
        .with_module(AFTERBURNER, SlotKind::Medium, 0, afterburner, None)
        .with_module(AUTOCANNON, SlotKind::High, 0, ActivationState::Active, Some(AMMO))
}

pub fn gunnery(level: u8) -> Skills {
    Skills::from([(GUNNERY, level)])
}
