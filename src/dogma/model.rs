//! Entity graph shared by every pass: the ship, its items and charges, skills, and the
//! per-attribute modifier edges that routing attaches.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::CHARACTER_TYPE_ID;
use crate::data::fit::SlotKind;

/// Operating level of an entity.
///
/// Ordering follows the catalog's effect-category codes rather than declaration order:
/// Passive 0, Active 1, Online 4, Overload 5. Gating and clamping compare these ranks, so
/// an Online entity outranks an Active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationState {
    Passive,
    Online,
    Active,
    Overload,
}

impl ActivationState {
    pub const fn rank(self) -> u8 {
        self.category().rank()
    }

    pub const fn category(self) -> EffectCategory {
        match self {
            Self::Passive => EffectCategory::Passive,
            Self::Online => EffectCategory::Online,
            Self::Active => EffectCategory::Active,
            Self::Overload => EffectCategory::Overload,
        }
    }

    /// True when an effect of `category` applies to an entity in this state.
    pub const fn satisfies(self, category: EffectCategory) -> bool {
        self.rank() >= category.rank()
    }

    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active | Self::Overload)
    }

    /// `P` passive, `O` online, `A` active, `V` overload; anything else is active.
    pub fn from_code(code: char) -> Self {
        match code {
            'P' => Self::Passive,
            'O' => Self::Online,
            'V' => Self::Overload,
            _ => Self::Active,
        }
    }
}

impl PartialOrd for ActivationState {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ActivationState {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// Classification tag of an effect, as coded in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectCategory {
    Passive = 0,
    Active = 1,
    Target = 2,
    Area = 3,
    Online = 4,
    Overload = 5,
    Dungeon = 6,
    System = 7,
}

impl EffectCategory {
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Passive),
            1 => Some(Self::Active),
            2 => Some(Self::Target),
            3 => Some(Self::Area),
            4 => Some(Self::Online),
            5 => Some(Self::Overload),
            6 => Some(Self::Dungeon),
            7 => Some(Self::System),
            _ => None,
        }
    }

    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Activation state a category can raise an entity's maximum to; `None` for pure tags.
    pub const fn as_state(self) -> Option<ActivationState> {
        match self {
            Self::Passive => Some(ActivationState::Passive),
            Self::Active => Some(ActivationState::Active),
            Self::Online => Some(ActivationState::Online),
            Self::Overload => Some(ActivationState::Overload),
            Self::Target | Self::Area | Self::Dungeon | Self::System => None,
        }
    }
}

/// Modifier operators in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    PreAssign,
    PreMul,
    PreDiv,
    Add,
    Sub,
    PostMul,
    PostDiv,
    PostPercent,
    PostAssign,
}

impl Operator {
    pub const ORDER: [Operator; 9] = [
        Self::PreAssign,
        Self::PreMul,
        Self::PreDiv,
        Self::Add,
        Self::Sub,
        Self::PostMul,
        Self::PostDiv,
        Self::PostPercent,
        Self::PostAssign,
    ];

    /// Operator for a catalog operation code. Code 9 and unknown codes have none.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::PreAssign),
            0 => Some(Self::PreMul),
            1 => Some(Self::PreDiv),
            2 => Some(Self::Add),
            3 => Some(Self::Sub),
            4 => Some(Self::PostMul),
            5 => Some(Self::PostDiv),
            6 => Some(Self::PostPercent),
            7 => Some(Self::PostAssign),
            _ => None,
        }
    }

    pub const fn is_assign(self) -> bool {
        matches!(self, Self::PreAssign | Self::PostAssign)
    }

    pub const fn is_additive(self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }

    /// Multiplicative family; the only operators subject to stacking penalty.
    pub const fn is_multiplicative(self) -> bool {
        matches!(
            self,
            Self::PreMul | Self::PreDiv | Self::PostMul | Self::PostDiv | Self::PostPercent
        )
    }

    /// Reduce a raw source value to the operator's linear contribution.
    pub fn linearize(self, raw: f64) -> f64 {
        match self {
            Self::PreAssign | Self::PostAssign | Self::Add => raw,
            Self::PreMul | Self::PostMul => raw - 1.0,
            Self::PreDiv | Self::PostDiv => 1.0 / raw - 1.0,
            Self::PostPercent => raw / 100.0,
            Self::Sub => -raw,
        }
    }
}

/// Handle to one participant of the ship graph. Indices point into `Ship::items` / `Ship::skills`;
/// `Charge(i)` is the charge loaded in item `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Hull,
    Character,
    Structure,
    Target,
    Item(usize),
    Charge(usize),
    Skill(usize),
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hull => write!(f, "hull"),
            Self::Character => write!(f, "character"),
            Self::Structure => write!(f, "structure"),
            Self::Target => write!(f, "target"),
            Self::Item(index) => write!(f, "item[{index}]"),
            Self::Charge(index) => write!(f, "charge[{index}]"),
            Self::Skill(index) => write!(f, "skill[{index}]"),
        }
    }
}

/// Incoming modifier edge on an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub operator: Operator,
    pub stacking_penalty: bool,
    pub source: Entity,
    /// Category of the granting effect; the source must be at or above it to contribute.
    pub source_category: EffectCategory,
    pub source_attribute_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub base_value: f64,
    /// Hard override before resolution, final value after it.
    pub resolved: Option<f64>,
    pub modifiers: Vec<Modifier>,
}

impl AttributeValue {
    pub fn new(base_value: f64) -> Self {
        Self {
            base_value,
            resolved: None,
            modifiers: Vec::new(),
        }
    }

    pub fn overridden(value: f64) -> Self {
        Self {
            base_value: value,
            resolved: Some(value),
            modifiers: Vec::new(),
        }
    }

    pub fn value(&self) -> f64 {
        self.resolved.unwrap_or(self.base_value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotType {
    High,
    Medium,
    Low,
    Rig,
    Subsystem,
    Service,
    DroneBay,
    Charge,
    None,
}

impl SlotType {
    pub const fn is_module(self) -> bool {
        matches!(
            self,
            Self::High | Self::Medium | Self::Low | Self::Rig | Self::Subsystem
        )
    }
}

impl From<SlotKind> for SlotType {
    fn from(kind: SlotKind) -> Self {
        match kind {
            SlotKind::High => Self::High,
            SlotKind::Medium => Self::Medium,
            SlotKind::Low => Self::Low,
            SlotKind::Rig => Self::Rig,
            SlotKind::Subsystem => Self::Subsystem,
            SlotKind::Service => Self::Service,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub kind: SlotType,
    pub index: Option<usize>,
}

impl Slot {
    pub const fn unindexed(kind: SlotType) -> Self {
        Self { kind, index: None }
    }
}

/// A participant: hull, character, module, drone, charge or skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub type_id: i32,
    pub slot: Slot,
    pub charge: Option<Box<Item>>,
    pub state: ActivationState,
    pub max_state: ActivationState,
    pub attributes: BTreeMap<i32, AttributeValue>,
    /// Granted effects without modifier rules, kept as behavioural markers.
    pub triggered_effects: Vec<i32>,
}

impl Item {
    fn new(
        type_id: i32,
        slot: Slot,
        charge: Option<Box<Item>>,
        state: ActivationState,
        max_state: ActivationState,
    ) -> Self {
        Self {
            type_id,
            slot,
            charge,
            state,
            max_state,
            attributes: BTreeMap::new(),
            triggered_effects: Vec::new(),
        }
    }

    pub fn new_charge(type_id: i32) -> Self {
        Self::new(
            type_id,
            Slot::unindexed(SlotType::Charge),
            None,
            ActivationState::Active,
            ActivationState::Active,
        )
    }

    /// Module starts with a passive maximum; routing raises it from the module's effects.
    pub fn new_module(
        type_id: i32,
        slot: Slot,
        charge_type_id: Option<i32>,
        state: ActivationState,
    ) -> Self {
        let charge = charge_type_id.map(|id| Box::new(Self::new_charge(id)));
        Self::new(type_id, slot, charge, state, ActivationState::Passive)
    }

    pub fn new_drone(type_id: i32, state: ActivationState) -> Self {
        Self::new(
            type_id,
            Slot::unindexed(SlotType::DroneBay),
            None,
            state,
            ActivationState::Active,
        )
    }

    /// Placeholder participant (hull, character, structure, target, skill).
    pub fn new_fake(type_id: i32) -> Self {
        Self::new(
            type_id,
            Slot::unindexed(SlotType::None),
            None,
            ActivationState::Active,
            ActivationState::Active,
        )
    }

    /// Replace an attribute with a fresh base value, dropping any modifiers.
    pub fn set_attribute(&mut self, attribute_id: i32, value: f64) {
        self.attributes.insert(attribute_id, AttributeValue::new(value));
    }

    /// Pin an attribute to `value`; resolution returns it untouched.
    pub fn override_attribute(&mut self, attribute_id: i32, value: f64) {
        self.attributes.insert(attribute_id, AttributeValue::overridden(value));
    }

    pub fn base_value(&self, attribute_id: i32) -> Option<f64> {
        self.attributes
            .get(&attribute_id)
            .map(|attribute| attribute.base_value)
    }

    /// Resolved value if present, otherwise the base value.
    pub fn attribute_value(&self, attribute_id: i32) -> Option<f64> {
        self.attributes.get(&attribute_id).map(AttributeValue::value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub hull: Item,
    pub character: Item,
    pub structure: Item,
    pub target: Item,
    pub items: Vec<Item>,
    pub skills: Vec<Item>,
}

impl Ship {
    pub fn new(ship_type_id: i32) -> Self {
        Self {
            hull: Item::new_fake(ship_type_id),
            character: Item::new_fake(CHARACTER_TYPE_ID),
            structure: Item::new_fake(0),
            target: Item::new_fake(0),
            items: Vec::new(),
            skills: Vec::new(),
        }
    }

    pub fn entity(&self, entity: Entity) -> Option<&Item> {
        match entity {
            Entity::Hull => Some(&self.hull),
            Entity::Character => Some(&self.character),
            Entity::Structure => Some(&self.structure),
            Entity::Target => Some(&self.target),
            Entity::Item(index) => self.items.get(index),
            Entity::Charge(index) => self.items.get(index)?.charge.as_deref(),
            Entity::Skill(index) => self.skills.get(index),
        }
    }

    pub fn entity_mut(&mut self, entity: Entity) -> Option<&mut Item> {
        match entity {
            Entity::Hull => Some(&mut self.hull),
            Entity::Character => Some(&mut self.character),
            Entity::Structure => Some(&mut self.structure),
            Entity::Target => Some(&mut self.target),
            Entity::Item(index) => self.items.get_mut(index),
            Entity::Charge(index) => self.items.get_mut(index)?.charge.as_deref_mut(),
            Entity::Skill(index) => self.skills.get_mut(index),
        }
    }

    /// Every present entity: hull, character, structure, target, items each followed by
    /// their charge, then skills.
    pub fn entities(&self) -> Vec<Entity> {
        let mut entities = vec![
            Entity::Hull,
            Entity::Character,
            Entity::Structure,
            Entity::Target,
        ];
        for (index, item) in self.items.iter().enumerate() {
            entities.push(Entity::Item(index));
            if item.charge.is_some() {
                entities.push(Entity::Charge(index));
            }
        }
        entities.extend((0..self.skills.len()).map(Entity::Skill));
        entities
    }

    /// Hull plus every item and loaded charge: the reach of location-wide modifiers.
    pub fn located_entities(&self) -> Vec<Entity> {
        let mut entities = vec![Entity::Hull];
        for (index, item) in self.items.iter().enumerate() {
            entities.push(Entity::Item(index));
            if item.charge.is_some() {
                entities.push(Entity::Charge(index));
            }
        }
        entities
    }

    pub fn attribute_value(&self, entity: Entity, attribute_id: i32) -> Option<f64> {
        self.entity(entity)?.attribute_value(attribute_id)
    }

    pub fn hull_attribute(&self, attribute_id: i32) -> Option<f64> {
        self.hull.attribute_value(attribute_id)
    }
}
