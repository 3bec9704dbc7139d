//! In-memory catalog backed by hash maps, shaped like the exported static data tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::catalog::{
    AttributeDefinition, Catalog, EffectDefinition, GroupInfo, TypeAttribute, TypeEffect,
    TypeInfo,
};

/// Attributes and effects attached to one type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeDogma {
    #[serde(rename = "dogmaAttributes", default)]
    pub attributes: Vec<TypeAttribute>,
    #[serde(rename = "dogmaEffects", default)]
    pub effects: Vec<TypeEffect>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryCatalog {
    #[serde(default)]
    pub types: HashMap<i32, TypeInfo>,
    #[serde(default)]
    pub groups: HashMap<i32, GroupInfo>,
    #[serde(rename = "typeDogma", default)]
    pub type_dogma: HashMap<i32, TypeDogma>,
    #[serde(rename = "dogmaAttributes", default)]
    pub attributes: HashMap<i32, AttributeDefinition>,
    #[serde(rename = "dogmaEffects", default)]
    pub effects: HashMap<i32, EffectDefinition>,
    #[serde(rename = "attributeNames", default)]
    pub attribute_names: HashMap<String, i32>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog snapshot and resolve each type's category from its group.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut catalog: MemoryCatalog = serde_json::from_str(raw)?;
        catalog.resolve_categories();
        Ok(catalog)
    }

    /// Fill `category_id` on every type whose group is known.
    pub fn resolve_categories(&mut self) {
        for info in self.types.values_mut() {
            if let Some(group) = self.groups.get(&info.group_id) {
                info.category_id = Some(group.category_id);
            }
        }
    }

    pub fn with_group(mut self, group_id: i32, category_id: i32) -> Self {
        self.groups.insert(group_id, GroupInfo { category_id });
        for info in self.types.values_mut() {
            if info.group_id == group_id {
                info.category_id = Some(category_id);
            }
        }
        self
    }

    /// Register a type in `group_id`. The category comes from the group if already known.
    pub fn with_type(mut self, type_id: i32, group_id: i32) -> Self {
        let category_id = self.groups.get(&group_id).map(|group| group.category_id);
        self.types.insert(
            type_id,
            TypeInfo {
                group_id,
                category_id,
                ..TypeInfo::default()
            },
        );
        self
    }

    pub fn with_type_info(mut self, type_id: i32, info: TypeInfo) -> Self {
        self.types.insert(type_id, info);
        self
    }

    pub fn with_type_attributes(mut self, type_id: i32, attributes: &[(i32, f64)]) -> Self {
        let dogma = self.type_dogma.entry(type_id).or_default();
        dogma
            .attributes
            .extend(attributes.iter().map(|&(attribute_id, value)| TypeAttribute {
                attribute_id,
                value,
            }));
        self
    }

    pub fn with_type_effects(mut self, type_id: i32, effect_ids: &[i32]) -> Self {
        let dogma = self.type_dogma.entry(type_id).or_default();
        dogma
            .effects
            .extend(effect_ids.iter().map(|&effect_id| TypeEffect {
                effect_id,
                is_default: false,
            }));
        self
    }

    pub fn with_attribute(mut self, attribute_id: i32, definition: AttributeDefinition) -> Self {
        self.attributes.insert(attribute_id, definition);
        self
    }

    pub fn with_attribute_name(mut self, name: impl Into<String>, attribute_id: i32) -> Self {
        self.attribute_names.insert(name.into(), attribute_id);
        self
    }

    pub fn with_effect(mut self, effect_id: i32, definition: EffectDefinition) -> Self {
        self.effects.insert(effect_id, definition);
        self
    }
}

impl Catalog for MemoryCatalog {
    fn lookup_type(&self, type_id: i32) -> Option<&TypeInfo> {
        self.types.get(&type_id)
    }

    fn lookup_effect(&self, effect_id: i32) -> Option<&EffectDefinition> {
        self.effects.get(&effect_id)
    }

    fn lookup_attribute(&self, attribute_id: i32) -> Option<&AttributeDefinition> {
        self.attributes.get(&attribute_id)
    }

    fn default_attributes(&self, type_id: i32) -> &[TypeAttribute] {
        self.type_dogma
            .get(&type_id)
            .map(|dogma| dogma.attributes.as_slice())
            .unwrap_or(&[])
    }

    fn granted_effects(&self, type_id: i32) -> &[TypeEffect] {
        self.type_dogma
            .get(&type_id)
            .map(|dogma| dogma.effects.as_slice())
            .unwrap_or(&[])
    }

    fn attribute_id(&self, name: &str) -> Option<i32> {
        self.attribute_names.get(name).copied()
    }
}
