//! Parsers for compound command-line values.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use udf_model::ScalarValue;
use udf_table::ActiveFilter;

/// Read a literal as the scalar it looks like.
///
/// `null`, `true` and `false` are keywords; anything that parses as a finite
/// number is a number; the rest is text.
pub fn parse_scalar(text: &str) -> ScalarValue {
    match text.trim() {
        "null" => ScalarValue::Null,
        "true" => ScalarValue::Bool(true),
        "false" => ScalarValue::Bool(false),
        trimmed => match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => ScalarValue::Number(number),
            _ => ScalarValue::text(text),
        },
    }
}

/// Parse `FIELD:PREDICATE:VALUE`. The value may contain further colons.
pub fn parse_filter(arg: &str) -> Result<ActiveFilter> {
    let mut parts = arg.splitn(3, ':');
    let field = parts.next().map(str::trim).unwrap_or_default();
    let predicate = parts.next().map(str::trim).unwrap_or_default();
    if field.is_empty() || predicate.is_empty() {
        return Err(anyhow!(
            "invalid filter '{arg}': expected FIELD:PREDICATE:VALUE"
        ));
    }
    let value = parts.next().map(parse_scalar).unwrap_or_default();
    Ok(ActiveFilter::new(field, predicate, value))
}

/// Parse `FIELD=VALUE` for the decode seed.
pub fn parse_seed(arg: &str) -> Result<(String, ScalarValue)> {
    let (field, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("invalid seed '{arg}': expected FIELD=VALUE"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(anyhow!("invalid seed '{arg}': missing field name"));
    }
    Ok((field.to_string(), parse_scalar(value)))
}

/// Parse `ENUM_TYPE=PATH` for an option list source.
pub fn parse_option_source(arg: &str) -> Result<(String, PathBuf)> {
    let (enum_type, path) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("invalid options '{arg}': expected ENUM_TYPE=PATH"))?;
    let (enum_type, path) = (enum_type.trim(), path.trim());
    if enum_type.is_empty() || path.is_empty() {
        return Err(anyhow!("invalid options '{arg}': expected ENUM_TYPE=PATH"));
    }
    Ok((enum_type.to_string(), PathBuf::from(path)))
}
