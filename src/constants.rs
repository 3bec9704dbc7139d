//! Well-known catalog ids the engine depends on.

/// Capacitor consumed per activation. Its presence makes an entity activatable.
pub const ATTRIBUTE_CAPACITOR_NEED: i32 = 6;
pub const ATTRIBUTE_VOLUME: i32 = 161;
pub const ATTRIBUTE_RADIUS: i32 = 162;
pub const ATTRIBUTE_SKILL_LEVEL: i32 = 280;

/// The six "required skill" attribute slots an item may declare.
pub const ATTRIBUTE_REQUIRED_SKILLS: [i32; 6] = [182, 183, 184, 1285, 1289, 1290];

pub const CATEGORY_SHIP: i32 = 6;
pub const CATEGORY_CHARGE: i32 = 8;
pub const CATEGORY_SKILL: i32 = 16;
pub const CATEGORY_IMPLANT: i32 = 20;
pub const CATEGORY_SUBSYSTEM: i32 = 32;

/// Source categories whose modifiers are never stacking penalised.
pub const EXEMPT_PENALTY_CATEGORY_IDS: [i32; 5] = [
    CATEGORY_SHIP,
    CATEGORY_CHARGE,
    CATEGORY_SKILL,
    CATEGORY_IMPLANT,
    CATEGORY_SUBSYSTEM,
];

/// Type id used for the character entity.
pub const CHARACTER_TYPE_ID: i32 = 1373;

pub const EFFECT_LOW_POWER: i32 = 11;
pub const EFFECT_HIGH_POWER: i32 = 12;
pub const EFFECT_MED_POWER: i32 = 13;
pub const EFFECT_RIG_SLOT: i32 = 2663;
pub const EFFECT_SUBSYSTEM: i32 = 3772;
pub const EFFECT_SERVICE_SLOT: i32 = 6306;

/// 1 / exp((1 / 2.67)^2)
pub const PENALTY_FACTOR: f64 = 0.8691199808003974;

/// Reported capacitor depletion time when the capacitor never runs dry.
pub const CAPACITOR_STABLE_SENTINEL: f64 = -1000.0;

pub const MAX_SKILL_LEVEL: u8 = 5;
