use serde::{Deserialize, Serialize};

use crate::definition::EntityDefinitionFieldConfig;

/// Property path marking a field that is not mapped to an entity property.
pub const IGNORE_PROPERTY_PATH: &str = "_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetAction {
    #[default]
    Get,
    GetList,
    Create,
    Update,
    Delete,
    DeleteList,
}

impl TargetAction {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetAction::Get => "get",
            TargetAction::GetList => "get_list",
            TargetAction::Create => "create",
            TargetAction::Update => "update",
            TargetAction::Delete => "delete",
            TargetAction::DeleteList => "delete_list",
        }
    }

    pub fn is_write(self) -> bool {
        matches!(self, TargetAction::Create | TargetAction::Update)
    }
}

impl std::str::FromStr for TargetAction {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "get" => Ok(TargetAction::Get),
            "get_list" => Ok(TargetAction::GetList),
            "create" => Ok(TargetAction::Create),
            "update" => Ok(TargetAction::Update),
            "delete" => Ok(TargetAction::Delete),
            "delete_list" => Ok(TargetAction::DeleteList),
            other => Err(format!("unsupported target action: {}", other)),
        }
    }
}

pub trait PropertyPathResolver: Send + Sync {
    fn resolve(
        &self,
        field_name: &str,
        field: &EntityDefinitionFieldConfig,
        target_action: TargetAction,
    ) -> String;
}

/// Uses the configured property path, falling back to the field name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigPropertyPathResolver;

impl PropertyPathResolver for ConfigPropertyPathResolver {
    fn resolve(
        &self,
        field_name: &str,
        field: &EntityDefinitionFieldConfig,
        target_action: TargetAction,
    ) -> String {
        match field.property_path.as_deref() {
            None | Some("") => field_name.to_string(),
            Some(IGNORE_PROPERTY_PATH) if target_action.is_write() => field_name.to_string(),
            Some(path) => path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigPropertyPathResolver, PropertyPathResolver, TargetAction};
    use crate::definition::EntityDefinitionFieldConfig;

    #[test]
    fn falls_back_to_field_name() {
        let resolver = ConfigPropertyPathResolver;
        let field = EntityDefinitionFieldConfig::default();
        assert_eq!(resolver.resolve("status", &field, TargetAction::Get), "status");
    }

    #[test]
    fn uses_configured_nested_path() {
        let resolver = ConfigPropertyPathResolver;
        let field = EntityDefinitionFieldConfig::default().with_property_path("customer.name");
        assert_eq!(
            resolver.resolve("customerName", &field, TargetAction::GetList),
            "customer.name"
        );
    }

    #[test]
    fn ignore_marker_depends_on_action() {
        let resolver = ConfigPropertyPathResolver;
        let field = EntityDefinitionFieldConfig::default().with_property_path("_");
        assert_eq!(resolver.resolve("total", &field, TargetAction::Get), "_");
        assert_eq!(resolver.resolve("total", &field, TargetAction::Update), "total");
    }

    #[test]
    fn parses_action_names() {
        assert_eq!("GET_LIST".parse::<TargetAction>(), Ok(TargetAction::GetList));
        assert!("patch".parse::<TargetAction>().is_err());
        assert_eq!(TargetAction::DeleteList.as_str(), "delete_list");
    }
}
