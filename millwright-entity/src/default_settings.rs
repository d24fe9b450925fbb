use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// Planner defaults applied when a user has not saved their own settings.
///
/// At most one row is expected. Nothing in the schema enforces that; the
/// startup seeder checks for an existing row before inserting.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "default_settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,

    /// Resource name to extraction limit
    pub resource_limits: Json,

    /// Optimisation weights keyed by objective name
    pub weights: Json,

    /// Identifiers of recipes excluded from planning
    pub recipes_off: Json,

    /// Item to supplied rate
    pub inputs: Json,

    /// Item to requested rate
    pub outputs: Json,

    /// Item whose output should be maximised, if any
    pub max_item: Option<String>,

    pub checkbox_nuclear_waste: bool,

    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            created_at: Set(chrono::Utc::now()),
            ..ActiveModelTrait::default()
        }
    }
}

impl Model {
    /// Disabled recipe identifiers, skipping any non-string entries
    pub fn disabled_recipes(&self) -> Vec<String> {
        self.recipes_off
            .as_array()
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| id.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Check whether a recipe is switched off
    pub fn is_recipe_disabled(&self, recipe_id: &str) -> bool {
        self.recipes_off
            .as_array()
            .map(|ids| ids.iter().any(|id| id.as_str() == Some(recipe_id)))
            .unwrap_or(false)
    }

    /// Check whether a maximisation target is configured
    pub fn has_max_item(&self) -> bool {
        self.max_item.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(recipes_off: serde_json::Value) -> Model {
        Model {
            id: 1,
            resource_limits: json!({}),
            weights: json!({}),
            recipes_off,
            inputs: json!({}),
            outputs: json!({}),
            max_item: None,
            checkbox_nuclear_waste: false,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_disabled_recipes() {
        let settings = model(json!(["Alternate: Cast Screw", 7, "Alternate: Steel Rod"]));

        assert_eq!(
            settings.disabled_recipes(),
            vec!["Alternate: Cast Screw", "Alternate: Steel Rod"]
        );
        assert!(settings.is_recipe_disabled("Alternate: Steel Rod"));
        assert!(!settings.is_recipe_disabled("Iron Plate"));
        assert!(!settings.has_max_item());
    }

    #[test]
    fn test_non_array_recipes_off() {
        let settings = model(json!({"oops": true}));

        assert!(settings.disabled_recipes().is_empty());
        assert!(!settings.is_recipe_disabled("oops"));
    }
}
