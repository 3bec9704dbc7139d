//! Inputs consumed by the engine: the rules catalog and the normalized fit record.

pub mod catalog;
pub mod fit;
pub mod memory;

pub use catalog::{
    AttributeDefinition, Catalog, EffectDefinition, GroupInfo, ModifierDomain, ModifierFunc,
    ModifierRule, TypeAttribute, TypeEffect, TypeInfo,
};
pub use fit::{slot_kind_for_type, Fit, FitDrone, FitModule, FitSlot, Skills, SlotKind};
pub use memory::{MemoryCatalog, TypeDogma};
