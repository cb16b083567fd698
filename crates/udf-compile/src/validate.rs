//! Evaluation of compiled validators against a dynamic model.

use chrono::NaiveDate;
use serde::Serialize;
use udf_model::{DynamicModel, ScalarValue};

use crate::config::{CompiledField, FieldConfig, FieldGroup, GroupValidator, Validator};

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Field name, or group name for cross-field rules.
    pub field: String,
    pub rule: String,
    pub message_key: String,
}

/// Validate a model against compiled fields.
///
/// Blank values only fail `required`; every other rule treats a blank value
/// as "nothing to check". `today` anchors date rules.
pub fn validate_model(
    compiled: &[CompiledField],
    model: &DynamicModel,
    today: NaiveDate,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for entry in compiled {
        match entry {
            CompiledField::Field(field) => validate_field(field, model, today, &mut issues),
            CompiledField::Group(group) => validate_group(group, model, today, &mut issues),
        }
    }
    issues
}

fn validate_field(
    field: &FieldConfig,
    model: &DynamicModel,
    today: NaiveDate,
    issues: &mut Vec<ValidationIssue>,
) {
    let value = field.binding.read(model);
    for validator in &field.validators {
        if passes(validator, value, today) {
            continue;
        }
        let rule = validator.rule_name();
        let message_key = field
            .error_rule(rule)
            .map(|r| r.message_key.clone())
            .unwrap_or_default();
        issues.push(ValidationIssue {
            field: field.field_name.clone(),
            rule: rule.to_string(),
            message_key,
        });
    }
}

fn validate_group(
    group: &FieldGroup,
    model: &DynamicModel,
    today: NaiveDate,
    issues: &mut Vec<ValidationIssue>,
) {
    for field in &group.fields {
        validate_field(field, model, today, issues);
    }
    let ok = match &group.validator {
        GroupValidator::DateRange {
            start_field,
            end_field,
        } => match (model.value(start_field).as_date(), model.value(end_field).as_date()) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        },
    };
    if !ok {
        issues.push(ValidationIssue {
            field: group.name.clone(),
            rule: group.error_rule.rule.clone(),
            message_key: group.error_rule.message_key.clone(),
        });
    }
}

fn passes(validator: &Validator, value: &ScalarValue, today: NaiveDate) -> bool {
    if value.is_blank() {
        return !matches!(validator, Validator::Required);
    }
    match validator {
        Validator::Required => true,
        Validator::Min(min) => numeric(value).is_none_or(|n| n >= *min),
        Validator::Max(max) => numeric(value).is_none_or(|n| n <= *max),
        Validator::MinLength(min) => value.as_str().is_none_or(|s| s.chars().count() >= *min),
        Validator::MaxLength(max) => value.as_str().is_none_or(|s| s.chars().count() <= *max),
        Validator::Integer => numeric(value).is_none_or(|n| n.fract() == 0.0),
        Validator::Email => value.as_str().is_some_and(looks_like_email),
        Validator::NotInPast => value.as_date().is_none_or(|date| date >= today),
    }
}

fn numeric(value: &ScalarValue) -> Option<f64> {
    match value {
        ScalarValue::Number(n) => Some(*n),
        ScalarValue::Text(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn looks_like_email(text: &str) -> bool {
    let text = text.trim();
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !text.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, rest)| !host.is_empty() && !rest.is_empty())
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(looks_like_email("ada@example.org"));
        assert!(looks_like_email("a.b@mail.example.org"));
        assert!(!looks_like_email("ada@"));
        assert!(!looks_like_email("@example.org"));
        assert!(!looks_like_email("ada@example"));
        assert!(!looks_like_email("ada@example."));
        assert!(!looks_like_email("a da@example.org"));
    }

    #[test]
    fn blank_values_only_fail_required() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(!passes(&Validator::Required, &ScalarValue::Null, today));
        assert!(passes(&Validator::Min(5.0), &ScalarValue::Null, today));
        assert!(passes(&Validator::Email, &ScalarValue::text(""), today));
    }
}
