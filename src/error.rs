use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error(
        "unknown data type \"{data_type}\" for the \"{field_name}\" field of the \"{entity_class}\" entity"
    )]
    UnknownDataType {
        data_type: String,
        entity_class: String,
        field_name: String,
    },

    #[error(
        "the \"{source_class}\" association targets do not include \"{entity_class}\" (field \"{field_name}\")"
    )]
    InverseTargetNotFound {
        entity_class: String,
        source_class: String,
        field_name: String,
    },

    #[error(
        "cannot infer the data type of the \"{field_name}\" association of the \"{entity_class}\" entity: \"{target_class}\" does not have a single identifier field"
    )]
    AmbiguousTargetIdentifier {
        entity_class: String,
        field_name: String,
        target_class: String,
    },

    #[error("malformed data type \"{raw}\": {reason}")]
    MalformedDataType { raw: String, reason: &'static str },
}

impl MetadataError {
    pub fn unknown_data_type(
        data_type: impl Into<String>,
        entity_class: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        Self::UnknownDataType {
            data_type: data_type.into(),
            entity_class: entity_class.into(),
            field_name: field_name.into(),
        }
    }

    pub fn inverse_target_not_found(
        entity_class: impl Into<String>,
        source_class: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        Self::InverseTargetNotFound {
            entity_class: entity_class.into(),
            source_class: source_class.into(),
            field_name: field_name.into(),
        }
    }

    pub fn malformed(raw: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedDataType {
            raw: raw.into(),
            reason,
        }
    }
}

pub type MetadataResult<T> = Result<T, MetadataError>;

#[cfg(test)]
mod tests {
    use super::MetadataError;

    #[test]
    fn unknown_data_type_message_names_entity_and_field() {
        let err = MetadataError::unknown_data_type("money2", "Order", "total");
        assert_eq!(
            err.to_string(),
            "unknown data type \"money2\" for the \"total\" field of the \"Order\" entity"
        );
    }

    #[test]
    fn inverse_target_message_names_source_class() {
        let err = MetadataError::inverse_target_not_found("Contact", "Activity", "activities");
        assert!(err.to_string().contains("\"Activity\" association targets"));
        assert!(err.to_string().contains("\"Contact\""));
    }
}
