pub mod assembly;
pub mod capacitor;
pub mod engine;
pub mod model;
pub mod resolution;
pub mod routing;
pub mod stacking;

pub use engine::{calculate, CalculationRequest};
pub use model::{
    ActivationState, AttributeValue, EffectCategory, Entity, Item, Modifier, Operator, Ship,
    Slot, SlotType,
};
pub use stacking::{StackContribution, StatStacking};
