//! Normalized fit record: hull, placed modules with optional charges, drones.
//! Skill levels travel next to the fit as a [`Skills`] map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    EFFECT_HIGH_POWER, EFFECT_LOW_POWER, EFFECT_MED_POWER, EFFECT_RIG_SLOT,
    EFFECT_SERVICE_SLOT, EFFECT_SUBSYSTEM,
};
use crate::data::catalog::Catalog;
use crate::dogma::model::ActivationState;
use crate::error::{DogmaError, Result};

/// Skill type id -> trained level (0..=5).
pub type Skills = BTreeMap<i32, u8>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    High,
    Medium,
    Low,
    Rig,
    Subsystem,
    Service,
}

impl SlotKind {
    /// Slot kind granted by a slot-marker effect.
    pub fn from_effect_id(effect_id: i32) -> Option<Self> {
        match effect_id {
            EFFECT_LOW_POWER => Some(Self::Low),
            EFFECT_HIGH_POWER => Some(Self::High),
            EFFECT_MED_POWER => Some(Self::Medium),
            EFFECT_RIG_SLOT => Some(Self::Rig),
            EFFECT_SUBSYSTEM => Some(Self::Subsystem),
            EFFECT_SERVICE_SLOT => Some(Self::Service),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FitSlot {
    pub kind: SlotKind,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitModule {
    pub type_id: i32,
    pub slot: FitSlot,
    pub state: ActivationState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_type_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitDrone {
    pub type_id: i32,
    pub state: ActivationState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fit {
    pub ship_type_id: i32,
    #[serde(default)]
    pub modules: Vec<FitModule>,
    #[serde(default)]
    pub drones: Vec<FitDrone>,
}

/// Number of slots per rack addressed by a state string.
const STATE_STRING_RACK: usize = 8;
const STATE_STRING_RACKS: [SlotKind; 3] = [SlotKind::High, SlotKind::Medium, SlotKind::Low];

impl Fit {
    pub fn new(ship_type_id: i32) -> Self {
        Self {
            ship_type_id,
            modules: Vec::new(),
            drones: Vec::new(),
        }
    }

    pub fn with_module(
        mut self,
        type_id: i32,
        kind: SlotKind,
        index: usize,
        state: ActivationState,
        charge_type_id: Option<i32>,
    ) -> Self {
        self.modules.push(FitModule {
            type_id,
            slot: FitSlot { kind, index },
            state,
            charge_type_id,
        });
        self
    }

    pub fn with_drone(mut self, type_id: i32, state: ActivationState) -> Self {
        self.drones.push(FitDrone { type_id, state });
        self
    }

    /// Place a module in the first free slot of the kind its slot-marker effect grants.
    pub fn place_module<C: Catalog + ?Sized>(
        &mut self,
        catalog: &C,
        type_id: i32,
        charge_type_id: Option<i32>,
        state: ActivationState,
    ) -> Result<FitSlot> {
        let kind = slot_kind_for_type(catalog, type_id)
            .ok_or(DogmaError::UnplaceableModule { type_id })?;
        let index = (0..)
            .find(|index| {
                !self
                    .modules
                    .iter()
                    .any(|module| module.slot.kind == kind && module.slot.index == *index)
            })
            .unwrap_or_default();
        let slot = FitSlot { kind, index };
        self.modules.push(FitModule {
            type_id,
            slot,
            state,
            charge_type_id,
        });
        Ok(slot)
    }

    pub fn add_drones(&mut self, type_id: i32, quantity: usize, state: ActivationState) {
        self.drones
            .extend((0..quantity).map(|_| FitDrone { type_id, state }));
    }

    /// Overwrite module states from a 24-character string: 8 high, 8 medium, then 8 low slots.
    /// `P` passive, `O` online, `A` active, `V` overload; any other character means active.
    /// Positions without a module are ignored.
    pub fn apply_state_string(&mut self, states: &str) -> Result<()> {
        let codes: Vec<char> = states.chars().collect();
        if codes.len() != STATE_STRING_RACK * STATE_STRING_RACKS.len() {
            return Err(DogmaError::InvalidStateString { len: codes.len() });
        }

        for (position, code) in codes.into_iter().enumerate() {
            let kind = STATE_STRING_RACKS[position / STATE_STRING_RACK];
            let index = position % STATE_STRING_RACK;
            if let Some(module) = self
                .modules
                .iter_mut()
                .find(|module| module.slot.kind == kind && module.slot.index == index)
            {
                module.state = ActivationState::from_code(code);
            }
        }
        Ok(())
    }
}

/// Slot kind for a module type, from the first slot-marker effect it grants.
pub fn slot_kind_for_type<C: Catalog + ?Sized>(catalog: &C, type_id: i32) -> Option<SlotKind> {
    catalog
        .granted_effects(type_id)
        .iter()
        .find_map(|effect| SlotKind::from_effect_id(effect.effect_id))
}
