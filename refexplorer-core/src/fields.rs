//! Referencing Fields
//!
//! Which fields of an owner asset point at a target asset is answered by the
//! host's object model, behind [`FieldInspector`]. This module summarizes
//! the answer for display: fields grouped by category, both sorted, with
//! uncategorized fields under [`DEFAULT_CATEGORY`].
//!
//! [`StructInspector`] is a self-contained inspector over a described field
//! tree, used where no host object model is available.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::asset::AssetIdentifier;

/// Category of fields that declare none.
pub const DEFAULT_CATEGORY: &str = "Default";

/// A field of an owner asset that references a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Display name of the field.
    pub name: String,
    /// Declared editor category.
    #[serde(default)]
    pub category: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, category: Option<String>) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }

    /// The category, or [`DEFAULT_CATEGORY`].
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }
}

/// Finds the fields of `owner` that reference `target`.
pub trait FieldInspector: Send + Sync {
    fn find_referencing_fields(
        &self,
        owner: &AssetIdentifier,
        target: &AssetIdentifier,
    ) -> Vec<FieldDescriptor>;
}

/// Group fields by category. Categories and the names within each are sorted.
pub fn categorize_fields(fields: &[FieldDescriptor]) -> Vec<(String, Vec<String>)> {
    let mut categories: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for field in fields {
        categories
            .entry(field.category_or_default())
            .or_default()
            .push(field.name.clone());
    }

    categories
        .into_iter()
        .map(|(category, mut names)| {
            names.sort();
            (category.to_string(), names)
        })
        .collect()
}

/// Render categorized fields as `Category:` headers followed by ` - name`
/// lines.
pub fn render_field_summary(fields: &[FieldDescriptor]) -> String {
    let mut out = String::new();
    for (category, names) in categorize_fields(fields) {
        out.push_str(&category);
        out.push_str(":\n");
        for name in names {
            out.push_str(" - ");
            out.push_str(&name);
            out.push('\n');
        }
    }
    out
}

/// A struct-typed field of an owner, with the objects it holds directly and
/// its own struct-typed fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Objects referenced by the struct's object fields.
    #[serde(default)]
    pub references: Vec<AssetIdentifier>,
    /// Struct-typed members, walked recursively.
    #[serde(default)]
    pub nested: Vec<StructField>,
}

impl StructField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_reference(mut self, target: AssetIdentifier) -> Self {
        self.references.push(target);
        self
    }

    pub fn with_nested(mut self, field: StructField) -> Self {
        self.nested.push(field);
        self
    }
}

/// [`FieldInspector`] over described field trees.
#[derive(Debug, Clone, Default)]
pub struct StructInspector {
    owners: HashMap<AssetIdentifier, Vec<StructField>>,
}

impl StructInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe the top-level struct fields of `owner`.
    pub fn insert(&mut self, owner: AssetIdentifier, fields: Vec<StructField>) {
        self.owners.insert(owner, fields);
    }
}

impl FieldInspector for StructInspector {
    fn find_referencing_fields(
        &self,
        owner: &AssetIdentifier,
        target: &AssetIdentifier,
    ) -> Vec<FieldDescriptor> {
        let mut found = Vec::new();
        if let Some(fields) = self.owners.get(owner) {
            find_recursive(fields, target, &mut found);
        }
        found
    }
}

fn find_recursive(fields: &[StructField], target: &AssetIdentifier, found: &mut Vec<FieldDescriptor>) {
    for field in fields {
        if field.references.contains(target) {
            found.push(FieldDescriptor::new(field.name.clone(), field.category.clone()));
        }
        find_recursive(&field.nested, target, found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, category: Option<&str>) -> FieldDescriptor {
        FieldDescriptor::new(name, category.map(str::to_string))
    }

    #[test]
    fn categories_are_sorted_with_default_fallback() {
        let fields = [
            field("Weapon", Some("Combat")),
            field("Mesh", None),
            field("Armor", Some("Combat")),
            field("Icon", Some("Audio Visual")),
        ];

        assert_eq!(
            categorize_fields(&fields),
            vec![
                ("Audio Visual".to_string(), vec!["Icon".to_string()]),
                ("Combat".to_string(), vec!["Armor".to_string(), "Weapon".to_string()]),
                ("Default".to_string(), vec!["Mesh".to_string()]),
            ]
        );
    }

    #[test]
    fn summary_rendering() {
        let fields = [field("Weapon", Some("Combat")), field("Mesh", None)];
        assert_eq!(render_field_summary(&fields), "Combat:\n - Weapon\nDefault:\n - Mesh\n");
        assert_eq!(render_field_summary(&[]), "");
    }

    #[test]
    fn nested_structs_are_searched() {
        let target = AssetIdentifier::package("/Game/Sword");
        let other = AssetIdentifier::package("/Game/Shield");
        let owner = AssetIdentifier::package("/Game/Knight");

        let mut inspector = StructInspector::new();
        inspector.insert(
            owner.clone(),
            vec![
                StructField::new("Loadout")
                    .with_category("Combat")
                    .with_reference(target.clone())
                    .with_nested(StructField::new("Backup").with_reference(target.clone())),
                StructField::new("Offhand").with_reference(other),
            ],
        );

        let found = inspector.find_referencing_fields(&owner, &target);
        assert_eq!(
            found,
            vec![field("Loadout", Some("Combat")), field("Backup", None)]
        );
        assert!(inspector
            .find_referencing_fields(&target, &owner)
            .is_empty());
    }
}
