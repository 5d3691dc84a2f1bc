use std::collections::{BTreeMap, BTreeSet};

use super::models::standard_model_definitions;

/// Semantic type of a model field as the viewer understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    StringList,
}

impl FieldType {
    pub fn label(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::StringList => "list of strings",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Float)
    }
}

/// How a field behaves when a document omits it.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// The field must be supplied.
    Required,
    Null,
    Text(&'static str),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    EmptyList,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub allowed: Vec<&'static str>,
}

impl Constraints {
    fn admits(&self, value: f64) -> bool {
        self.minimum.map_or(true, |min| value >= min)
            && self.maximum.map_or(true, |max| value <= max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub field_type: FieldType,
    /// Optional-wrapped: `null` is an accepted value.
    pub nullable: bool,
    pub default: DefaultValue,
    pub constraints: Constraints,
}

impl FieldDefinition {
    /// A non-nullable field; documents must supply it unless a default is attached.
    pub fn required(
        name: &'static str,
        field_type: FieldType,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            field_type,
            nullable: false,
            default: DefaultValue::Required,
            constraints: Constraints::default(),
        }
    }

    /// A nullable field defaulting to `null`.
    pub fn optional(
        name: &'static str,
        field_type: FieldType,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            field_type,
            nullable: true,
            default: DefaultValue::Null,
            constraints: Constraints::default(),
        }
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = default;
        self
    }

    pub fn minimum(mut self, minimum: f64) -> Self {
        self.constraints.minimum = Some(minimum);
        self
    }

    pub fn maximum(mut self, maximum: f64) -> Self {
        self.constraints.maximum = Some(maximum);
        self
    }

    pub fn one_of(mut self, allowed: &[&'static str]) -> Self {
        self.constraints.allowed = allowed.to_vec();
        self
    }

    pub fn is_required(&self) -> bool {
        self.default == DefaultValue::Required
    }

    fn check(&self, model: &str) -> Result<(), SchemaError> {
        let field_error = |kind| SchemaError::InvalidField {
            model: model.to_string(),
            field: self.name.to_string(),
            kind,
        };

        let valid_name = !self.name.is_empty()
            && self
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_name {
            return Err(field_error(FieldErrorKind::InvalidName));
        }

        let Constraints {
            minimum,
            maximum,
            allowed,
        } = &self.constraints;

        if (minimum.is_some() || maximum.is_some()) && !self.field_type.is_numeric() {
            return Err(field_error(FieldErrorKind::ConstraintOnType {
                constraint: "numeric bounds",
                field_type: self.field_type,
            }));
        }
        if !allowed.is_empty() && self.field_type != FieldType::String {
            return Err(field_error(FieldErrorKind::ConstraintOnType {
                constraint: "allowed values",
                field_type: self.field_type,
            }));
        }
        if [*minimum, *maximum]
            .into_iter()
            .flatten()
            .any(|bound| !bound.is_finite())
        {
            return Err(field_error(FieldErrorKind::NonFiniteNumber));
        }
        if let (Some(min), Some(max)) = (minimum, maximum) {
            if min > max {
                return Err(field_error(FieldErrorKind::InvertedBounds {
                    minimum: *min,
                    maximum: *max,
                }));
            }
        }

        match (&self.default, self.field_type) {
            (DefaultValue::Required, _) => Ok(()),
            (DefaultValue::Null, _) if self.nullable => Ok(()),
            (DefaultValue::Null, _) => Err(field_error(FieldErrorKind::NullDefaultOnRequiredValue)),
            (DefaultValue::Text(text), FieldType::String) => {
                if allowed.is_empty() || allowed.contains(text) {
                    Ok(())
                } else {
                    Err(field_error(FieldErrorKind::DefaultOutsideConstraints))
                }
            }
            (DefaultValue::Integer(value), FieldType::Integer | FieldType::Float) => {
                self.check_numeric_default(*value as f64, field_error)
            }
            (DefaultValue::Float(value), FieldType::Float) => {
                if !value.is_finite() {
                    return Err(field_error(FieldErrorKind::NonFiniteNumber));
                }
                self.check_numeric_default(*value, field_error)
            }
            (DefaultValue::Boolean(_), FieldType::Boolean) => Ok(()),
            (DefaultValue::EmptyList, FieldType::StringList) => Ok(()),
            (_, field_type) => Err(field_error(FieldErrorKind::DefaultTypeMismatch { field_type })),
        }
    }

    fn check_numeric_default(
        &self,
        value: f64,
        field_error: impl Fn(FieldErrorKind) -> SchemaError,
    ) -> Result<(), SchemaError> {
        if self.constraints.admits(value) {
            Ok(())
        } else {
            Err(field_error(FieldErrorKind::DefaultOutsideConstraints))
        }
    }
}

/// A named HR entity and its ordered fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldDefinition>,
}

impl ModelDefinition {
    /// Storage and schema key: the lowercase model name.
    pub fn collection_name(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|field| field.is_required())
    }
}

/// Immutable set of model definitions assembled at startup.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    models: Vec<ModelDefinition>,
}

impl SchemaRegistry {
    pub fn new(models: Vec<ModelDefinition>) -> Self {
        Self { models }
    }

    /// The HR models served to the viewer.
    pub fn standard() -> Self {
        Self::new(standard_model_definitions())
    }

    pub fn models(&self) -> &[ModelDefinition] {
        &self.models
    }

    pub fn get(&self, collection: &str) -> Option<&ModelDefinition> {
        self.models
            .iter()
            .find(|model| model.collection_name() == collection)
    }

    pub fn collection_names(&self) -> Vec<String> {
        self.models.iter().map(ModelDefinition::collection_name).collect()
    }

    /// Checks every definition so malformed models surface at startup
    /// instead of being dropped from an export.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut collections: BTreeMap<String, &'static str> = BTreeMap::new();

        for model in &self.models {
            if model.name.is_empty() || !model.name.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(SchemaError::InvalidModelName {
                    model: model.name.to_string(),
                });
            }

            if let Some(first) = collections.insert(model.collection_name(), model.name) {
                return Err(SchemaError::DuplicateCollection {
                    collection: model.collection_name(),
                    first: first.to_string(),
                    second: model.name.to_string(),
                });
            }

            if model.fields.is_empty() {
                return Err(SchemaError::EmptyModel {
                    model: model.name.to_string(),
                });
            }

            let mut seen = BTreeSet::new();
            for field in &model.fields {
                if !seen.insert(field.name) {
                    return Err(SchemaError::InvalidField {
                        model: model.name.to_string(),
                        field: field.name.to_string(),
                        kind: FieldErrorKind::Duplicate,
                    });
                }
                field.check(model.name)?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("model name '{model}' must be non-empty ASCII alphanumeric")]
    InvalidModelName { model: String },
    #[error("models '{first}' and '{second}' both map to collection '{collection}'")]
    DuplicateCollection {
        collection: String,
        first: String,
        second: String,
    },
    #[error("model '{model}' declares no fields")]
    EmptyModel { model: String },
    #[error("field '{model}.{field}' is malformed: {kind}")]
    InvalidField {
        model: String,
        field: String,
        kind: FieldErrorKind,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldErrorKind {
    #[error("name must be non-empty and use only ASCII letters, digits or underscores")]
    InvalidName,
    #[error("declared more than once")]
    Duplicate,
    #[error("{constraint} cannot apply to a {} field", .field_type.label())]
    ConstraintOnType {
        constraint: &'static str,
        field_type: FieldType,
    },
    #[error("minimum {minimum} exceeds maximum {maximum}")]
    InvertedBounds { minimum: f64, maximum: f64 },
    #[error("numbers must be finite")]
    NonFiniteNumber,
    #[error("null default requires an optional field")]
    NullDefaultOnRequiredValue,
    #[error("default does not match {} type", .field_type.label())]
    DefaultTypeMismatch { field_type: FieldType },
    #[error("default violates the declared constraints")]
    DefaultOutsideConstraints,
}
