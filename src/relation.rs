use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationType {
    ManyToOne,
    OneToMany,
    ManyToMany,
    OneToOne,
    /// Extended association pointing at exactly one of several target entities.
    MultipleManyToOne,
}

impl RelationType {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationType::ManyToOne => "manyToOne",
            RelationType::OneToMany => "oneToMany",
            RelationType::ManyToMany => "manyToMany",
            RelationType::OneToOne => "oneToOne",
            RelationType::MultipleManyToOne => "multipleManyToOne",
        }
    }

    /// The plain relation an extended association type is stored as.
    pub fn underlying(self) -> Self {
        match self {
            RelationType::MultipleManyToOne => RelationType::ManyToOne,
            other => other,
        }
    }

    /// The relation seen from the other side.
    pub fn reverse(self) -> Self {
        match self {
            RelationType::ManyToOne | RelationType::MultipleManyToOne => RelationType::OneToMany,
            RelationType::OneToMany => RelationType::ManyToOne,
            RelationType::ManyToMany => RelationType::ManyToMany,
            RelationType::OneToOne => RelationType::OneToOne,
        }
    }

    pub fn for_collection(is_collection: bool) -> Self {
        if is_collection {
            RelationType::ManyToMany
        } else {
            RelationType::ManyToOne
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "manyToOne" => Ok(RelationType::ManyToOne),
            "oneToMany" => Ok(RelationType::OneToMany),
            "manyToMany" => Ok(RelationType::ManyToMany),
            "oneToOne" => Ok(RelationType::OneToOne),
            "multipleManyToOne" => Ok(RelationType::MultipleManyToOne),
            other => Err(format!("unsupported relation type: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RelationType;

    #[test]
    fn reverse_of_underlying_type() {
        assert_eq!(
            RelationType::MultipleManyToOne.underlying().reverse(),
            RelationType::OneToMany
        );
        assert_eq!(RelationType::ManyToMany.underlying().reverse(), RelationType::ManyToMany);
        assert_eq!(RelationType::OneToMany.reverse(), RelationType::ManyToOne);
        assert_eq!(RelationType::OneToOne.reverse(), RelationType::OneToOne);
    }

    #[test]
    fn parses_and_renders_camel_case_names() {
        for relation in [
            RelationType::ManyToOne,
            RelationType::OneToMany,
            RelationType::ManyToMany,
            RelationType::OneToOne,
            RelationType::MultipleManyToOne,
        ] {
            assert_eq!(relation.as_str().parse::<RelationType>(), Ok(relation));
        }
        assert!("many-to-one".parse::<RelationType>().is_err());
    }

    #[test]
    fn collection_flag_picks_kind() {
        assert_eq!(RelationType::for_collection(true), RelationType::ManyToMany);
        assert_eq!(RelationType::for_collection(false), RelationType::ManyToOne);
    }
}
