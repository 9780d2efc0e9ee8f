use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

pub const NAME_MAX_LENGTH: u64 = 100;
pub const VALUE_MAX_DIGITS: u32 = 10;
pub const VALUE_DECIMAL_PLACES: u32 = 2;

/// Product entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Assigned on creation, never reused
    pub id: i64,
    #[schema(max_length = 100, example = "Botina")]
    pub name: String,
    #[schema(example = "Botina de couro bonita")]
    pub description: String,
    /// Always rendered with exactly two fractional digits
    #[serde(serialize_with = "serialize_value")]
    #[schema(value_type = String, example = "299.99")]
    pub value: Decimal,
}

fn serialize_value<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_value(value))
}

/// `value` in wire form: fixed two decimal places.
pub fn format_value(value: &Decimal) -> String {
    format!("{:.2}", value)
}

impl Product {
    /// Overwrite only the fields present in `patch`.
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(value) = patch.value {
            self.value = value;
        }
    }
}

/// Validated input for create and full replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub value: Decimal,
}

/// Validated partial input; `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub value: Option<Decimal>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.value.is_none()
    }
}

impl From<NewProduct> for ProductPatch {
    fn from(input: NewProduct) -> Self {
        Self {
            name: Some(input.name),
            description: Some(input.description),
            value: Some(input.value),
        }
    }
}

/// Request body accepted by create, replace and partial update.
///
/// Only used for API documentation; bodies are validated field by field
/// from raw JSON. For partial updates every field is optional.
#[derive(Debug, Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct ProductInput {
    #[schema(max_length = 100, example = "Botina")]
    pub name: String,
    #[schema(example = "Botina de couro bonita")]
    pub description: String,
    /// Number or numeric string; at most 10 digits, 2 after the point
    #[schema(value_type = String, example = "299.99")]
    pub value: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn product() -> Product {
        Product {
            id: 1,
            name: "Botina".to_string(),
            description: "Botina de couro bonita".to_string(),
            value: Decimal::from_str("299.99").unwrap(),
        }
    }

    #[test]
    fn test_product_serializes_value_as_two_decimal_string() {
        let mut p = product();
        p.value = Decimal::from(5);

        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(
            json,
            json!({
                "id": 1,
                "name": "Botina",
                "description": "Botina de couro bonita",
                "value": "5.00"
            })
        );
    }

    #[test]
    fn test_product_deserializes_from_wire_form() {
        let p: Product = serde_json::from_value(json!({
            "id": 3,
            "name": "Botina",
            "description": "Botina de couro bonita",
            "value": "299.99"
        }))
        .unwrap();
        assert_eq!(p, Product { id: 3, ..product() });
    }

    #[test]
    fn test_apply_patch_only_touches_supplied_fields() {
        let mut p = product();
        p.apply_patch(ProductPatch {
            value: Some(Decimal::from_str("199.99").unwrap()),
            ..Default::default()
        });

        assert_eq!(p.name, "Botina");
        assert_eq!(p.description, "Botina de couro bonita");
        assert_eq!(format_value(&p.value), "199.99");
    }

    #[test]
    fn test_patch_from_new_product_sets_every_field() {
        let patch = ProductPatch::from(NewProduct {
            name: "a".into(),
            description: "b".into(),
            value: Decimal::ONE,
        });
        assert!(!patch.is_empty());
        assert_eq!(patch.name.as_deref(), Some("a"));
        assert!(ProductPatch::default().is_empty());
    }
}
