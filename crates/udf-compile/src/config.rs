//! Compiled, renderable form definitions.
//!
//! These types are the compiler's output. A rendering layer walks a
//! `Vec<CompiledField>` in order and draws one input per [`FieldConfig`] and
//! one composite block per [`FieldGroup`].

use chrono::NaiveDate;
use serde::Serialize;
use udf_model::{ConstraintKind, DataType, DynamicModel, ScalarValue, SelectOption};

/// Message key prefix for validation error rules.
pub const VALIDATION_KEY_PREFIX: &str = "validation.";

/// Input shape chosen for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    Text,
    Password,
    Email,
    Select,
    Number,
    Date,
    Checkbox,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Password => "password",
            InputKind::Email => "email",
            InputKind::Select => "select",
            InputKind::Number => "number",
            InputKind::Date => "date",
            InputKind::Checkbox => "checkbox",
        }
    }
}

/// Single-field validation rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", content = "value", rename_all = "camelCase")]
pub enum Validator {
    Required,
    /// Numeric lower bound.
    Min(f64),
    /// Numeric upper bound.
    Max(f64),
    /// Minimum text length in characters.
    MinLength(usize),
    /// Maximum text length in characters.
    MaxLength(usize),
    /// Number without fractional part.
    Integer,
    Email,
    /// Date on or after the current day.
    NotInPast,
}

impl Validator {
    /// Stable rule name, also the suffix of the error message key.
    pub fn rule_name(&self) -> &'static str {
        match self {
            Validator::Required => "required",
            Validator::Min(_) => "min",
            Validator::Max(_) => "max",
            Validator::MinLength(_) => "minLength",
            Validator::MaxLength(_) => "maxLength",
            Validator::Integer => "integer",
            Validator::Email => "email",
            Validator::NotInPast => "dateNotInPast",
        }
    }
}

/// Cross-field rule owned by a [`FieldGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum GroupValidator {
    /// `start_field` must not be after `end_field` when both are set.
    #[serde(rename_all = "camelCase")]
    DateRange {
        start_field: String,
        end_field: String,
    },
}

impl GroupValidator {
    pub fn rule_name(&self) -> &'static str {
        match self {
            GroupValidator::DateRange { .. } => "dateRange",
        }
    }
}

/// Maps a failed rule to the translation key of its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRule {
    pub rule: String,
    pub message_key: String,
}

impl ErrorRule {
    pub fn new(rule: &str) -> Self {
        Self {
            rule: rule.to_string(),
            message_key: format!("{VALIDATION_KEY_PREFIX}{rule}"),
        }
    }
}

/// Initial value of an input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum DefaultValue {
    /// The current day, resolved when the form is rendered.
    Today,
    Value(ScalarValue),
}

impl DefaultValue {
    pub fn resolve(&self, today: NaiveDate) -> ScalarValue {
        match self {
            DefaultValue::Today => ScalarValue::Text(today.format("%Y-%m-%d").to_string()),
            DefaultValue::Value(value) => value.clone(),
        }
    }
}

/// Where a field reads and writes its value in the dynamic model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldBinding {
    pub key: String,
}

impl FieldBinding {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn read<'a>(&self, model: &'a DynamicModel) -> &'a ScalarValue {
        model.value(&self.key)
    }

    pub fn write(&self, model: &mut DynamicModel, value: impl Into<ScalarValue>) {
        model.insert(self.key.clone(), value);
    }
}

/// Renderable definition of one input field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    pub field_name: String,
    pub data_type: DataType,
    pub input: InputKind,
    /// Translation key of the label.
    pub label: String,
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub default_value: Option<DefaultValue>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    /// Enumeration that supplies `options`.
    pub options_source: Option<String>,
    pub options: Vec<SelectOption>,
    pub validators: Vec<Validator>,
    pub error_rules: Vec<ErrorRule>,
    pub binding: FieldBinding,
    pub special_type: Option<u32>,
}

impl FieldConfig {
    /// Add a validator together with its error rule.
    pub fn push_validator(&mut self, validator: Validator) {
        if self.validators.contains(&validator) {
            return;
        }
        self.error_rules.push(ErrorRule::new(validator.rule_name()));
        self.validators.push(validator);
    }

    pub fn has_validator(&self, rule: &str) -> bool {
        self.validators.iter().any(|v| v.rule_name() == rule)
    }

    /// Error rule for a validator rule name.
    pub fn error_rule(&self, rule: &str) -> Option<&ErrorRule> {
        self.error_rules.iter().find(|r| r.rule == rule)
    }
}

/// Two or more fields rendered and validated together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldGroup {
    pub name: String,
    pub kind: ConstraintKind,
    pub fields: Vec<FieldConfig>,
    pub validator: GroupValidator,
    pub error_rule: ErrorRule,
}

impl FieldGroup {
    pub fn date_range(start: FieldConfig, end: FieldConfig) -> Self {
        let validator = GroupValidator::DateRange {
            start_field: start.field_name.clone(),
            end_field: end.field_name.clone(),
        };
        Self {
            name: format!("{}-{}", start.field_name, end.field_name),
            kind: ConstraintKind::DateRange,
            error_rule: ErrorRule::new(validator.rule_name()),
            validator,
            fields: vec![start, end],
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.field_name == name)
    }
}

/// One entry of the compiled form, in render order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CompiledField {
    Field(FieldConfig),
    Group(FieldGroup),
}

impl CompiledField {
    /// Field name, or group name for groups.
    pub fn name(&self) -> &str {
        match self {
            CompiledField::Field(field) => &field.field_name,
            CompiledField::Group(group) => &group.name,
        }
    }

    pub fn as_field(&self) -> Option<&FieldConfig> {
        match self {
            CompiledField::Field(field) => Some(field),
            CompiledField::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&FieldGroup> {
        match self {
            CompiledField::Field(_) => None,
            CompiledField::Group(group) => Some(group),
        }
    }

    /// Every field config in this entry (one for fields, all members for groups).
    pub fn fields(&self) -> impl Iterator<Item = &FieldConfig> {
        let slice: &[FieldConfig] = match self {
            CompiledField::Field(field) => std::slice::from_ref(field),
            CompiledField::Group(group) => &group.fields,
        };
        slice.iter()
    }
}
