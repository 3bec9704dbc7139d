use thiserror::Error;

use crate::data::fit::SlotKind;
use crate::dogma::model::Entity;

#[derive(Error, Debug)]
pub enum DogmaError {
    #[error("cyclic attribute dependency on {entity} attribute {attribute_id}")]
    CyclicDependency { entity: Entity, attribute_id: i32 },

    #[error("module type {type_id} does not fit in any known slot")]
    UnplaceableModule { type_id: i32 },

    #[error("{kind:?} slot {index} is already occupied")]
    SlotOccupied { kind: SlotKind, index: usize },

    #[error("skill {skill_id} has level {level}, expected 0..=5")]
    InvalidSkillLevel { skill_id: i32, level: u8 },

    #[error("state string has {len} characters, expected 24 (8 high, 8 medium, 8 low)")]
    InvalidStateString { len: usize },

    #[error("failed to read engine config: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("failed to parse engine config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, DogmaError>;
