//! Read-only rules catalog consumed by every engine stage.
//!
//! Implementations only answer raw lookups; the provided methods turn misses into the
//! documented defaults so a computation always completes.

use serde::{Deserialize, Serialize};

/// Type metadata. `category_id` is resolved from the type's group when the catalog is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeInfo {
    #[serde(rename = "groupID")]
    pub group_id: i32,
    #[serde(rename = "categoryID", default)]
    pub category_id: Option<i32>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
}

impl TypeInfo {
    pub fn new(group_id: i32, category_id: i32) -> Self {
        Self {
            group_id,
            category_id: Some(category_id),
            ..Self::default()
        }
    }

    pub fn category(&self) -> i32 {
        self.category_id.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupInfo {
    #[serde(rename = "categoryID")]
    pub category_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypeAttribute {
    #[serde(rename = "attributeID")]
    pub attribute_id: i32,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEffect {
    #[serde(rename = "effectID")]
    pub effect_id: i32,
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
}

/// Attribute definition. Missing definitions behave as default 0, high-is-good, stackable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    #[serde(rename = "defaultValue", default)]
    pub default_value: f64,
    #[serde(rename = "highIsGood", default = "default_true")]
    pub high_is_good: bool,
    #[serde(default = "default_true")]
    pub stackable: bool,
}

impl Default for AttributeDefinition {
    fn default() -> Self {
        Self {
            default_value: 0.0,
            high_is_good: true,
            stackable: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Which entity a single-target modifier lands on, relative to the effect owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierDomain {
    #[serde(rename = "itemID")]
    Item,
    #[serde(rename = "shipID")]
    Ship,
    #[serde(rename = "charID")]
    Character,
    #[serde(rename = "otherID")]
    Other,
    #[serde(rename = "structureID")]
    Structure,
    #[serde(rename = "target")]
    Target,
    #[serde(rename = "targetID")]
    TargetId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierFunc {
    ItemModifier,
    LocationGroupModifier,
    LocationModifier,
    LocationRequiredSkillModifier,
    OwnerRequiredSkillModifier,
    EffectStopper,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierRule {
    pub domain: ModifierDomain,
    pub func: ModifierFunc,
    #[serde(rename = "modifiedAttributeID", default)]
    pub modified_attribute_id: Option<i32>,
    #[serde(rename = "modifyingAttributeID", default)]
    pub modifying_attribute_id: Option<i32>,
    #[serde(default)]
    pub operation: Option<i32>,
    #[serde(rename = "groupID", default)]
    pub group_id: Option<i32>,
    #[serde(rename = "skillTypeID", default)]
    pub skill_type_id: Option<i32>,
}

impl ModifierRule {
    /// Rule modifying `target` on the domain entity from `source` on the effect owner.
    pub fn new(
        func: ModifierFunc,
        domain: ModifierDomain,
        operation: i32,
        source_attribute_id: i32,
        target_attribute_id: i32,
    ) -> Self {
        Self {
            domain,
            func,
            modified_attribute_id: Some(target_attribute_id),
            modifying_attribute_id: Some(source_attribute_id),
            operation: Some(operation),
            group_id: None,
            skill_type_id: None,
        }
    }

    pub fn with_group(mut self, group_id: i32) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_skill(mut self, skill_type_id: i32) -> Self {
        self.skill_type_id = Some(skill_type_id);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectDefinition {
    /// Raw category code, see [`crate::dogma::model::EffectCategory::from_raw`].
    #[serde(rename = "effectCategory", default)]
    pub effect_category: i32,
    #[serde(rename = "effectName", default)]
    pub effect_name: Option<String>,
    #[serde(rename = "modifierInfo", default)]
    pub modifier_info: Vec<ModifierRule>,
}

impl EffectDefinition {
    pub fn new(effect_category: i32, modifier_info: Vec<ModifierRule>) -> Self {
        Self {
            effect_category,
            effect_name: None,
            modifier_info,
        }
    }
}

static EMPTY_EFFECT: EffectDefinition = EffectDefinition {
    effect_category: 0,
    effect_name: None,
    modifier_info: Vec::new(),
};

pub trait Catalog {
    fn lookup_type(&self, type_id: i32) -> Option<&TypeInfo>;

    fn lookup_effect(&self, effect_id: i32) -> Option<&EffectDefinition>;

    fn lookup_attribute(&self, attribute_id: i32) -> Option<&AttributeDefinition>;

    /// Default attribute values declared by a type; empty when the type is unknown.
    fn default_attributes(&self, type_id: i32) -> &[TypeAttribute];

    /// Effects granted by a type; empty when the type is unknown.
    fn granted_effects(&self, type_id: i32) -> &[TypeEffect];

    /// Attribute id for a catalog attribute name, if the catalog carries names.
    fn attribute_id(&self, _name: &str) -> Option<i32> {
        None
    }

    fn type_metadata(&self, type_id: i32) -> TypeInfo {
        self.lookup_type(type_id).copied().unwrap_or_default()
    }

    fn effect_definition(&self, effect_id: i32) -> &EffectDefinition {
        self.lookup_effect(effect_id).unwrap_or(&EMPTY_EFFECT)
    }

    fn attribute_definition(&self, attribute_id: i32) -> AttributeDefinition {
        self.lookup_attribute(attribute_id)
            .copied()
            .unwrap_or_default()
    }
}
