use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::{
    error::{MetadataError, MetadataResult},
    relation::RelationType,
};

pub const STRING: &str = "string";

const EXTENDED_ASSOCIATION_PREFIX: &str = "association";
const EXTENDED_INVERSE_ASSOCIATION_PREFIX: &str = "inverseAssociation";
const MARKER_SEPARATOR: char = ':';

/// Data type of a configured field, resolved once from its raw string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum DataType {
    Plain(String),
    /// `association:<type>[:<kind>]`
    ExtendedAssociation {
        association_type: RelationType,
        association_kind: Option<String>,
    },
    /// `inverseAssociation:<sourceClass>:<type>[:<kind>]`
    ExtendedInverseAssociation {
        source_class: String,
        association_type: RelationType,
        association_kind: Option<String>,
    },
}

impl DataType {
    pub fn plain(name: impl Into<String>) -> Self {
        Self::Plain(name.into())
    }

    pub fn parse(raw: &str) -> MetadataResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(MetadataError::malformed(raw, "data type must not be empty"));
        }

        let (prefix, rest) = match raw.split_once(MARKER_SEPARATOR) {
            Some(parts) => parts,
            None => return Ok(Self::Plain(raw.to_string())),
        };

        match prefix {
            EXTENDED_ASSOCIATION_PREFIX => {
                let mut parts = rest.splitn(2, MARKER_SEPARATOR);
                let association_type = parse_relation(raw, parts.next())?;
                let association_kind = parse_kind(raw, parts.next())?;
                Ok(Self::ExtendedAssociation {
                    association_type,
                    association_kind,
                })
            }
            EXTENDED_INVERSE_ASSOCIATION_PREFIX => {
                let mut parts = rest.splitn(3, MARKER_SEPARATOR);
                let source_class = match parts.next().map(str::trim) {
                    Some(source) if !source.is_empty() => source.to_string(),
                    _ => {
                        return Err(MetadataError::malformed(
                            raw,
                            "inverse association must name its source class",
                        ));
                    }
                };
                let association_type = parse_relation(raw, parts.next())?;
                let association_kind = parse_kind(raw, parts.next())?;
                Ok(Self::ExtendedInverseAssociation {
                    source_class,
                    association_type,
                    association_kind,
                })
            }
            _ => Ok(Self::Plain(raw.to_string())),
        }
    }

    pub fn as_plain(&self) -> Option<&str> {
        match self {
            Self::Plain(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_extended(&self) -> bool {
        !matches!(self, Self::Plain(_))
    }
}

fn parse_relation(raw: &str, part: Option<&str>) -> MetadataResult<RelationType> {
    match part.map(str::trim) {
        Some(name) if !name.is_empty() => name
            .parse::<RelationType>()
            .map_err(|_| MetadataError::malformed(raw, "unsupported association type")),
        _ => Err(MetadataError::malformed(
            raw,
            "association marker must name its association type",
        )),
    }
}

fn parse_kind(raw: &str, part: Option<&str>) -> MetadataResult<Option<String>> {
    match part.map(str::trim) {
        None => Ok(None),
        Some("") => Err(MetadataError::malformed(
            raw,
            "association kind must not be empty when present",
        )),
        Some(kind) => Ok(Some(kind.to_string())),
    }
}

impl std::str::FromStr for DataType {
    type Err = MetadataError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl TryFrom<String> for DataType {
    type Error = MetadataError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<DataType> for String {
    fn from(data_type: DataType) -> Self {
        data_type.to_string()
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain(name) => f.write_str(name),
            Self::ExtendedAssociation {
                association_type,
                association_kind,
            } => {
                write!(f, "{EXTENDED_ASSOCIATION_PREFIX}:{association_type}")?;
                if let Some(kind) = association_kind {
                    write!(f, ":{kind}")?;
                }
                Ok(())
            }
            Self::ExtendedInverseAssociation {
                source_class,
                association_type,
                association_kind,
            } => {
                write!(
                    f,
                    "{EXTENDED_INVERSE_ASSOCIATION_PREFIX}:{source_class}:{association_type}"
                )?;
                if let Some(kind) = association_kind {
                    write!(f, ":{kind}")?;
                }
                Ok(())
            }
        }
    }
}

const KNOWN_DATA_TYPES: &[&str] = &[
    "string",
    "text",
    "integer",
    "smallint",
    "bigint",
    "unsignedInteger",
    "boolean",
    "decimal",
    "float",
    "percent",
    "money",
    "currency",
    "date",
    "time",
    "datetime",
    "duration",
    "guid",
    "array",
    "object",
    "scalar",
    "entityType",
    "entityClass",
    "orderBy",
    "nestedObject",
    "nestedAssociation",
];

const DATA_TYPE_ALIASES: &[(&str, &str)] = &[
    ("int", "integer"),
    ("bool", "boolean"),
    ("str", "string"),
    ("double", "float"),
    ("uuid", "guid"),
];

/// Known scalar data types of the API layer.
#[derive(Debug, Clone)]
pub struct DataTypeRegistry {
    known: BTreeSet<String>,
    aliases: HashMap<String, String>,
}

impl DataTypeRegistry {
    pub fn new() -> Self {
        Self {
            known: BTreeSet::new(),
            aliases: HashMap::new(),
        }
    }

    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        self.add_type(name);
        self
    }

    pub fn add_type(&mut self, name: impl Into<String>) {
        self.known.insert(name.into());
    }

    pub fn add_alias(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.aliases.insert(alias.into(), target.into());
    }

    /// Returns the normalized name of `declared`.
    pub fn assert_data_type(
        &self,
        declared: Option<&DataType>,
        entity_class: &str,
        field_name: &str,
    ) -> MetadataResult<String> {
        let Some(declared) = declared else {
            return Err(MetadataError::unknown_data_type("", entity_class, field_name));
        };
        let name = declared.as_plain().ok_or_else(|| {
            MetadataError::unknown_data_type(declared.to_string(), entity_class, field_name)
        })?;

        if self.known.contains(name) {
            return Ok(name.to_string());
        }
        match self.aliases.get(name) {
            Some(target) => Ok(target.clone()),
            None => Err(MetadataError::unknown_data_type(
                name,
                entity_class,
                field_name,
            )),
        }
    }
}

impl Default for DataTypeRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        for name in KNOWN_DATA_TYPES {
            registry.add_type(*name);
        }
        for (alias, target) in DATA_TYPE_ALIASES {
            registry.add_alias(*alias, *target);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::{DataType, DataTypeRegistry};
    use crate::{error::MetadataError, relation::RelationType};

    #[test]
    fn plain_types_keep_their_name() {
        assert_eq!(DataType::parse("integer"), Ok(DataType::plain("integer")));
        assert_eq!(DataType::parse("scope:value"), Ok(DataType::plain("scope:value")));
    }

    #[test]
    fn parses_extended_association_with_and_without_kind() {
        assert_eq!(
            DataType::parse("association:manyToMany:activity"),
            Ok(DataType::ExtendedAssociation {
                association_type: RelationType::ManyToMany,
                association_kind: Some("activity".to_string()),
            })
        );
        assert_eq!(
            DataType::parse("association:multipleManyToOne"),
            Ok(DataType::ExtendedAssociation {
                association_type: RelationType::MultipleManyToOne,
                association_kind: None,
            })
        );
    }

    #[test]
    fn parses_extended_inverse_association() {
        let parsed = DataType::parse("inverseAssociation:Acme\\Note:manyToOne")
            .expect("inverse association should parse");
        assert_eq!(
            parsed,
            DataType::ExtendedInverseAssociation {
                source_class: "Acme\\Note".to_string(),
                association_type: RelationType::ManyToOne,
                association_kind: None,
            }
        );
        assert_eq!(parsed.to_string(), "inverseAssociation:Acme\\Note:manyToOne");
    }

    #[test]
    fn rejects_markers_with_missing_parts() {
        for raw in [
            "",
            "association:",
            "association:sideways",
            "association:manyToOne:",
            "inverseAssociation:",
            "inverseAssociation:Acme\\Note",
            "inverseAssociation::manyToOne",
        ] {
            let err = DataType::parse(raw).expect_err("malformed marker should fail");
            assert!(matches!(err, MetadataError::MalformedDataType { .. }), "{raw}");
        }
    }

    #[test]
    fn deserializes_from_json_string() {
        let parsed: DataType =
            serde_json::from_str("\"association:manyToOne:owner\"").expect("valid marker");
        assert!(parsed.is_extended());
        assert!(serde_json::from_str::<DataType>("\"association:\"").is_err());
    }

    #[test]
    fn registry_normalizes_aliases_and_rejects_unknown() {
        let registry = DataTypeRegistry::default();
        let int = DataType::plain("int");
        assert_eq!(
            registry.assert_data_type(Some(&int), "Order", "id"),
            Ok("integer".to_string())
        );

        let unknown = DataType::plain("blob");
        assert_eq!(
            registry.assert_data_type(Some(&unknown), "Order", "payload"),
            Err(MetadataError::unknown_data_type("blob", "Order", "payload"))
        );
        assert!(registry.assert_data_type(None, "Order", "payload").is_err());
    }

    #[test]
    fn registry_accepts_registered_extra_types() {
        let registry = DataTypeRegistry::default().with_type("point");
        let point = DataType::plain("point");
        assert_eq!(
            registry.assert_data_type(Some(&point), "Store", "location"),
            Ok("point".to_string())
        );
    }
}
