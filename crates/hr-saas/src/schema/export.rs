use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::registry::{
    DefaultValue, FieldDefinition, FieldType, ModelDefinition, SchemaError, SchemaRegistry,
};

/// Response body of the schema endpoint: every document keyed by collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaCatalog {
    pub schemas: BTreeMap<String, SchemaDocument>,
}

impl SchemaCatalog {
    pub fn document(&self, collection: &str) -> Option<&SchemaDocument> {
        self.schemas.get(collection)
    }

    pub fn collections(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }
}

/// JSON-Schema description of a single model. Keys serialize in
/// alphabetical order, properties in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDocument {
    pub description: String,
    pub properties: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl SchemaDocument {
    pub fn from_model(model: &ModelDefinition) -> Self {
        let properties = model
            .fields
            .iter()
            .map(|field| (field.name.to_string(), Value::Object(property_schema(field))))
            .collect();

        Self {
            description: model.description.to_string(),
            properties,
            required: model
                .required_fields()
                .map(|field| field.name.to_string())
                .collect(),
            title: model.name.to_string(),
            kind: "object",
        }
    }

    pub fn property(&self, field: &str) -> Option<&Value> {
        self.properties.get(field)
    }
}

/// Validates the registry and renders every model. A registry that fails
/// validation yields no catalog at all.
pub fn export(registry: &SchemaRegistry) -> Result<SchemaCatalog, SchemaError> {
    registry.validate()?;

    let schemas = registry
        .models()
        .iter()
        .map(|model| (model.collection_name(), SchemaDocument::from_model(model)))
        .collect();

    Ok(SchemaCatalog { schemas })
}

fn property_schema(field: &FieldDefinition) -> Map<String, Value> {
    let mut entries = if field.nullable {
        let value_schema = Value::Object(value_schema(field).into_iter().collect());
        BTreeMap::from([(
            "anyOf".to_string(),
            json!([value_schema, { "type": "null" }]),
        )])
    } else {
        value_schema(field)
    };

    if let Some(default) = default_value(&field.default) {
        entries.insert("default".to_string(), default);
    }
    entries.insert("description".to_string(), Value::from(field.description));
    entries.insert("title".to_string(), Value::from(title_case(field.name)));

    entries.into_iter().collect()
}

fn value_schema(field: &FieldDefinition) -> BTreeMap<String, Value> {
    let mut entries = BTreeMap::new();

    let type_name = match field.field_type {
        FieldType::String | FieldType::Date => "string",
        FieldType::Integer => "integer",
        FieldType::Float => "number",
        FieldType::Boolean => "boolean",
        FieldType::StringList => "array",
    };
    entries.insert("type".to_string(), Value::from(type_name));

    match field.field_type {
        FieldType::Date => {
            entries.insert("format".to_string(), Value::from("date"));
        }
        FieldType::StringList => {
            entries.insert("items".to_string(), json!({ "type": "string" }));
        }
        _ => {}
    }

    let constraints = &field.constraints;
    if let Some(minimum) = constraints.minimum {
        entries.insert("minimum".to_string(), number(minimum));
    }
    if let Some(maximum) = constraints.maximum {
        entries.insert("maximum".to_string(), number(maximum));
    }
    if !constraints.allowed.is_empty() {
        entries.insert("enum".to_string(), Value::from(constraints.allowed.clone()));
    }

    entries
}

fn default_value(default: &DefaultValue) -> Option<Value> {
    match default {
        DefaultValue::Required => None,
        DefaultValue::Null => Some(Value::Null),
        DefaultValue::Text(text) => Some(Value::from(*text)),
        DefaultValue::Integer(value) => Some(Value::from(*value)),
        DefaultValue::Float(value) => Some(number(*value)),
        DefaultValue::Boolean(value) => Some(Value::from(*value)),
        DefaultValue::EmptyList => Some(Value::Array(Vec::new())),
    }
}

/// Whole numbers render as JSON integers so `ge=0` reads as `0`, not `0.0`.
fn number(value: f64) -> Value {
    const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

    if value.fract() == 0.0 && value.abs() < EXACT_INTEGER_LIMIT {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn title_case(field_name: &str) -> String {
    field_name
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_catalog() -> SchemaCatalog {
        export(&SchemaRegistry::standard()).expect("standard registry exports")
    }

    #[test]
    fn title_case_matches_viewer_labels() {
        assert_eq!(title_case("first_name"), "First Name");
        assert_eq!(title_case("check_in"), "Check In");
        assert_eq!(title_case("date"), "Date");
    }

    #[test]
    fn whole_numbers_render_as_integers() {
        assert_eq!(number(0.0), json!(0));
        assert_eq!(number(5.0), json!(5));
        assert_eq!(number(2.5), json!(2.5));
    }

    #[test]
    fn required_text_field_renders_plain_type() {
        let catalog = standard_catalog();
        let employee = catalog.document("employee").expect("employee exported");

        assert_eq!(
            employee.property("first_name"),
            Some(&json!({
                "description": "First name",
                "title": "First Name",
                "type": "string",
            }))
        );
    }

    #[test]
    fn optional_field_renders_nullable_union_with_default() {
        let catalog = standard_catalog();
        let employee = catalog.document("employee").expect("employee exported");

        assert_eq!(
            employee.property("start_date"),
            Some(&json!({
                "anyOf": [{ "format": "date", "type": "string" }, { "type": "null" }],
                "default": null,
                "description": "Start date",
                "title": "Start Date",
            }))
        );
        assert_eq!(
            employee.property("employment_type").and_then(|p| p.get("default")),
            Some(&json!("full-time"))
        );
    }

    #[test]
    fn constraints_stay_inside_the_non_null_branch() {
        let catalog = standard_catalog();
        let job = catalog.document("job").expect("job exported");

        assert_eq!(
            job.property("salary_min"),
            Some(&json!({
                "anyOf": [{ "minimum": 0, "type": "number" }, { "type": "null" }],
                "default": null,
                "description": "Minimum salary",
                "title": "Salary Min",
            }))
        );
        assert_eq!(
            job.property("skills"),
            Some(&json!({
                "anyOf": [
                    { "items": { "type": "string" }, "type": "array" },
                    { "type": "null" }
                ],
                "default": [],
                "description": "Key skills",
                "title": "Skills",
            }))
        );
    }

    #[test]
    fn rating_keeps_declared_bounds() {
        let catalog = standard_catalog();
        let review = catalog
            .document("performancereview")
            .expect("review exported");

        assert_eq!(
            review.property("rating"),
            Some(&json!({
                "description": "Overall rating 1-5",
                "maximum": 5,
                "minimum": 1,
                "title": "Rating",
                "type": "integer",
            }))
        );
        assert!(review.required.contains(&"rating".to_string()));
    }

    #[test]
    fn allowed_values_render_as_enum() {
        let registry = SchemaRegistry::new(vec![ModelDefinition {
            name: "Notice",
            description: "Notices",
            fields: vec![FieldDefinition::required("level", FieldType::String, "Level")
                .with_default(DefaultValue::Text("normal"))
                .one_of(&["low", "normal", "high"])],
        }]);

        let catalog = export(&registry).expect("exports");
        let level = catalog
            .document("notice")
            .and_then(|doc| doc.property("level"))
            .expect("level exported");
        assert_eq!(level["enum"], json!(["low", "normal", "high"]));
        assert_eq!(level["default"], json!("normal"));
    }

    #[test]
    fn document_keys_and_property_order_are_stable() {
        let catalog = standard_catalog();
        let employee = serde_json::to_value(catalog.document("employee").expect("employee"))
            .expect("serializes");

        let keys: Vec<&str> = employee
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["description", "properties", "required", "title", "type"]);

        let fields: Vec<&str> = employee["properties"]
            .as_object()
            .expect("properties object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(fields.first(), Some(&"first_name"));
        assert_eq!(fields.last(), Some(&"is_active"));
        assert_eq!(employee["required"], json!(["first_name", "last_name", "email"]));
    }

    #[test]
    fn export_fails_instead_of_skipping_malformed_models() {
        let registry = SchemaRegistry::new(vec![
            ModelDefinition {
                name: "Attendance",
                description: "ok",
                fields: vec![FieldDefinition::required("date", FieldType::Date, "Date")],
            },
            ModelDefinition {
                name: "Broken",
                description: "bad bounds",
                fields: vec![FieldDefinition::required("score", FieldType::Integer, "Score")
                    .minimum(10.0)
                    .maximum(0.0)],
            },
        ]);

        assert!(export(&registry).is_err());
    }
}
