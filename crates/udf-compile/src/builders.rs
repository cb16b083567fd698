//! Per-data-type field builders.
//!
//! [`builder_for`] is the only place that maps a [`DataType`] to an input
//! shape. The match is exhaustive, so a new data type must be given a builder
//! (or explicitly declared unmapped) before the crate compiles.

use udf_model::{BehaviorHint, DataType, FieldDescriptor, ScalarValue};

use crate::config::{DefaultValue, FieldBinding, FieldConfig, InputKind, Validator};

/// Builds a field config from a descriptor and a label prefix.
pub type FieldBuilder = fn(&FieldDescriptor, &str) -> FieldConfig;

pub const PERCENT_SUFFIX: &str = "%";

/// Builder for a data type, `None` when the type has no input representation.
pub fn builder_for(data_type: DataType) -> Option<FieldBuilder> {
    match data_type {
        DataType::String => Some(build_string as FieldBuilder),
        DataType::Numeric | DataType::Integer => Some(build_numeric as FieldBuilder),
        DataType::Date => Some(build_date as FieldBuilder),
        DataType::Boolean => Some(build_boolean as FieldBuilder),
        DataType::Binary | DataType::Unknown => None,
    }
}

fn base_config(descriptor: &FieldDescriptor, label_prefix: &str, input: InputKind) -> FieldConfig {
    let mut config = FieldConfig {
        field_name: descriptor.field_name.clone(),
        data_type: descriptor.data_type,
        input,
        label: format!("{label_prefix}{}", descriptor.field_name),
        required: descriptor.required,
        min: descriptor.min,
        max: descriptor.max,
        default_value: None,
        prefix: None,
        suffix: None,
        options_source: None,
        options: Vec::new(),
        validators: Vec::new(),
        error_rules: Vec::new(),
        binding: FieldBinding::new(descriptor.field_name.clone()),
        special_type: descriptor.special_type,
    };
    if descriptor.required {
        config.push_validator(Validator::Required);
    }
    config
}

/// Plain text, password, email or option list, chosen by hint.
fn build_string(descriptor: &FieldDescriptor, label_prefix: &str) -> FieldConfig {
    let input = if descriptor.has_hint(BehaviorHint::Options) {
        InputKind::Select
    } else if descriptor.has_hint(BehaviorHint::Password) {
        InputKind::Password
    } else if descriptor.has_hint(BehaviorHint::Email) {
        InputKind::Email
    } else {
        InputKind::Text
    };
    let mut config = base_config(descriptor, label_prefix, input);

    match input {
        InputKind::Select => {
            config.options_source = descriptor.enum_type.clone();
        }
        InputKind::Email => config.push_validator(Validator::Email),
        _ => {}
    }
    // Option lists are bounded by their options, not by length.
    if input != InputKind::Select {
        if let Some(min) = length_bound(descriptor.min) {
            config.push_validator(Validator::MinLength(min));
        }
        if let Some(max) = length_bound(descriptor.max) {
            config.push_validator(Validator::MaxLength(max));
        }
    }
    config
}

/// Number input with min/max bounds and an optional `%` suffix.
fn build_numeric(descriptor: &FieldDescriptor, label_prefix: &str) -> FieldConfig {
    let mut config = base_config(descriptor, label_prefix, InputKind::Number);
    if let Some(min) = descriptor.min {
        config.push_validator(Validator::Min(min));
    }
    if let Some(max) = descriptor.max {
        config.push_validator(Validator::Max(max));
    }
    if descriptor.data_type == DataType::Integer {
        config.push_validator(Validator::Integer);
    }
    if descriptor.has_hint(BehaviorHint::Percentage) {
        config.suffix = Some(PERCENT_SUFFIX.to_string());
    }
    config
}

/// Date input defaulting to today; future-only dates get a minimum of today.
fn build_date(descriptor: &FieldDescriptor, label_prefix: &str) -> FieldConfig {
    let mut config = base_config(descriptor, label_prefix, InputKind::Date);
    config.default_value = Some(DefaultValue::Today);
    if descriptor.has_hint(BehaviorHint::DateFuture) {
        config.push_validator(Validator::NotInPast);
    }
    config
}

fn build_boolean(descriptor: &FieldDescriptor, label_prefix: &str) -> FieldConfig {
    let mut config = base_config(descriptor, label_prefix, InputKind::Checkbox);
    config.default_value = Some(DefaultValue::Value(ScalarValue::Bool(false)));
    config
}

fn length_bound(bound: Option<f64>) -> Option<usize> {
    bound
        .filter(|value| value.is_finite() && *value >= 0.0)
        .map(|value| value.round() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_and_unknown_are_unmapped() {
        assert!(builder_for(DataType::Binary).is_none());
        assert!(builder_for(DataType::Unknown).is_none());
        assert!(builder_for(DataType::Boolean).is_some());
    }

    #[test]
    fn string_bounds_become_length_validators() {
        let descriptor =
            FieldDescriptor::new("code", DataType::String).with_bounds(Some(2.0), Some(8.0));
        let config = build_string(&descriptor, "udf.");
        assert_eq!(config.input, InputKind::Text);
        assert_eq!(
            config.validators,
            vec![Validator::MinLength(2), Validator::MaxLength(8)]
        );
        assert_eq!(config.label, "udf.code");
    }

    #[test]
    fn options_hint_wins_over_other_string_hints() {
        let descriptor = FieldDescriptor::new("region", DataType::String)
            .with_hint(BehaviorHint::Email)
            .with_hint(BehaviorHint::Options)
            .with_enum_type("Region");
        let config = build_string(&descriptor, "");
        assert_eq!(config.input, InputKind::Select);
        assert_eq!(config.options_source.as_deref(), Some("Region"));
        assert!(config.validators.is_empty());
    }

    #[test]
    fn future_date_has_matching_error_rule() {
        let descriptor =
            FieldDescriptor::new("due", DataType::Date).with_hint(BehaviorHint::DateFuture);
        let config = build_date(&descriptor, "");
        assert_eq!(config.default_value, Some(DefaultValue::Today));
        assert!(config.has_validator("dateNotInPast"));
        assert_eq!(
            config.error_rule("dateNotInPast").map(|r| r.message_key.as_str()),
            Some("validation.dateNotInPast")
        );
    }
}
