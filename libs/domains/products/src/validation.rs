//! Request body validation and wire serialization for products.
//!
//! Bodies are inspected as raw JSON so every field can be checked
//! independently and all failures reported together, keyed by field name.
//! Presence and type checks run on the JSON itself; the constraint rules
//! (name length, value digit budget) are declared on [`ProductFields`].
//! Nothing is persisted unless the whole body is valid.

use std::borrow::Cow;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value, json};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{
    NAME_MAX_LENGTH, NewProduct, Product, ProductPatch, VALUE_DECIMAL_PLACES, VALUE_MAX_DIGITS,
    format_value,
};

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const MAX_STRING_LENGTH: usize = 1000;

const MSG_REQUIRED: &str = "This field is required.";
const MSG_NULL: &str = "This field may not be null.";
const MSG_INVALID_STRING: &str = "Not a valid string.";
const MSG_BLANK: &str = "This field may not be blank.";
const MSG_NULL_CHARACTERS: &str = "Null characters are not allowed.";
const MSG_INVALID_NUMBER: &str = "A valid number is required.";
const MSG_STRING_TOO_LARGE: &str = "String value too large.";

const FIELDS: [&str; 3] = ["name", "description", "value"];

/// Fields that passed the presence and type checks.
#[derive(Debug, Validate)]
struct ProductFields {
    #[validate(length(
        max = NAME_MAX_LENGTH,
        message = "Ensure this field has no more than 100 characters."
    ))]
    name: Option<String>,
    description: Option<String>,
    /// As written by the client; quantized only after the digit budget passes.
    #[validate(custom(function = "check_precision"))]
    value: Option<Decimal>,
}

/// Wire representation of a stored product.
pub fn serialize(product: &Product) -> Value {
    json!({
        "id": product.id,
        "name": product.name,
        "description": product.description,
        "value": format_value(&product.value),
    })
}

/// Validate a request body.
///
/// With `partial == false` every field must be present. With
/// `partial == true` absent fields are skipped, but any field that is present
/// is held to the same rules.
pub fn deserialize_and_validate(
    data: &Value,
    partial: bool,
) -> Result<ProductPatch, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let object = match data {
        Value::Object(object) => object,
        Value::Null => {
            errors.add(NON_FIELD_ERRORS, error("null", MSG_NULL.into()));
            return Err(errors);
        }
        other => {
            let message = format!(
                "Invalid data. Expected a dictionary, but got {}.",
                type_name(other)
            );
            errors.add(NON_FIELD_ERRORS, error("invalid", message.into()));
            return Err(errors);
        }
    };

    let fields = ProductFields {
        name: field(object, "name", partial, &mut errors, parse_text),
        description: field(object, "description", partial, &mut errors, parse_text),
        value: field(object, "value", partial, &mut errors, parse_value),
    };

    // Fields that failed above are `None`, so each field reports one error.
    if let Err(constraint_errors) = fields.validate() {
        let by_field = constraint_errors.field_errors();
        for key in FIELDS {
            if let Some(list) = by_field.get(key) {
                for e in list.iter() {
                    errors.add(key, e.clone());
                }
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ProductPatch {
        name: fields.name,
        description: fields.description,
        value: fields.value.map(quantize),
    })
}

/// Validate a body for create or full replace.
pub fn validate_new(data: &Value) -> Result<NewProduct, ValidationErrors> {
    let patch = deserialize_and_validate(data, false)?;
    match patch {
        ProductPatch {
            name: Some(name),
            description: Some(description),
            value: Some(value),
        } => Ok(NewProduct {
            name,
            description,
            value,
        }),
        patch => {
            // Unreachable in practice: full mode already reports missing fields.
            let mut errors = ValidationErrors::new();
            if patch.name.is_none() {
                errors.add("name", error("required", MSG_REQUIRED.into()));
            }
            if patch.description.is_none() {
                errors.add("description", error("required", MSG_REQUIRED.into()));
            }
            if patch.value.is_none() {
                errors.add("value", error("required", MSG_REQUIRED.into()));
            }
            Err(errors)
        }
    }
}

/// Validate a body for partial update.
pub fn validate_patch(data: &Value) -> Result<ProductPatch, ValidationErrors> {
    deserialize_and_validate(data, true)
}

/// Fix the scale at two fractional digits.
///
/// Callers only pass values that already fit, so this pads and never rounds.
pub fn quantize(value: Decimal) -> Decimal {
    let mut quantized = value;
    quantized.rescale(VALUE_DECIMAL_PLACES);
    quantized
}

fn error(code: &'static str, message: Cow<'static, str>) -> ValidationError {
    ValidationError::new(code).with_message(message)
}

fn field<T>(
    object: &Map<String, Value>,
    key: &'static str,
    partial: bool,
    errors: &mut ValidationErrors,
    parse: impl FnOnce(&Value) -> Result<T, ValidationError>,
) -> Option<T> {
    let result = match object.get(key) {
        None if partial => return None,
        None => Err(error("required", MSG_REQUIRED.into())),
        Some(Value::Null) => Err(error("null", MSG_NULL.into())),
        Some(value) => parse(value),
    };

    match result {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            errors.add(key, e);
            None
        }
    }
}

fn parse_text(value: &Value) -> Result<String, ValidationError> {
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err(error("invalid", MSG_INVALID_STRING.into())),
    };

    let text = raw.trim();
    if text.is_empty() {
        return Err(error("blank", MSG_BLANK.into()));
    }
    if text.contains('\0') {
        return Err(error("null_characters_not_allowed", MSG_NULL_CHARACTERS.into()));
    }
    Ok(text.to_string())
}

fn parse_value(value: &Value) -> Result<Decimal, ValidationError> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(error("invalid", MSG_INVALID_NUMBER.into())),
    };

    if raw.len() > MAX_STRING_LENGTH {
        return Err(error("max_string_length", MSG_STRING_TOO_LARGE.into()));
    }

    let decimal = match Decimal::from_str(&raw).or_else(|_| Decimal::from_scientific(&raw)) {
        Ok(decimal) => decimal,
        // Well-formed but beyond Decimal's 28 digits, so certainly over budget.
        Err(_) if is_decimal_literal(&raw) => return Err(max_digits_error()),
        Err(_) => return Err(error("invalid", MSG_INVALID_NUMBER.into())),
    };

    Ok(decimal)
}

/// Digit budget check on the coefficient and scale as written.
fn check_precision(value: &Decimal) -> Result<(), ValidationError> {
    let digits = value.mantissa().unsigned_abs().to_string().len() as u32;
    let decimals = value.scale();

    let (total, whole) = if decimals == 0 {
        (digits, digits)
    } else if digits > decimals {
        (digits, digits - decimals)
    } else {
        (decimals, 0)
    };

    let max_whole = VALUE_MAX_DIGITS - VALUE_DECIMAL_PLACES;

    if total > VALUE_MAX_DIGITS {
        return Err(max_digits_error());
    }
    if decimals > VALUE_DECIMAL_PLACES {
        let message = format!(
            "Ensure that there are no more than {} decimal places.",
            VALUE_DECIMAL_PLACES
        );
        return Err(error("max_decimal_places", message.into()));
    }
    if whole > max_whole {
        let message = format!(
            "Ensure that there are no more than {} digits before the decimal point.",
            max_whole
        );
        return Err(error("max_whole_digits", message.into()));
    }

    Ok(())
}

fn max_digits_error() -> ValidationError {
    let message = format!(
        "Ensure that there are no more than {} digits in total.",
        VALUE_MAX_DIGITS
    );
    error("max_digits", message.into())
}

/// Decimal syntax with an optional exponent: `-12.5`, `.5`, `1e30`, `2.5E-40`.
fn is_decimal_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    let (coefficient, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((coefficient, exponent)) => (coefficient, Some(exponent)),
        None => (unsigned, None),
    };
    let (whole, fraction) = coefficient.split_once('.').unwrap_or((coefficient, ""));

    let coefficient_ok = !(whole.is_empty() && fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit());

    let exponent_ok = exponent.is_none_or(|exponent| {
        let digits = exponent.strip_prefix(['-', '+']).unwrap_or(exponent);
        !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
    });

    coefficient_ok && exponent_ok
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
