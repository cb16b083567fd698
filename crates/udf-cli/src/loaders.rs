//! File loaders for descriptors, rows, parameter maps and translations.
//!
//! Class descriptors come as JSON (the metadata service format) or as CSV
//! with one descriptor per row:
//!
//! | Field Name | Data Type | Min | Max | Required | Hints | Enum Type | Special Type | Range End |
//!
//! `Hints` is a list separated by `;`, `,` or spaces. A `Range End` on a row
//! declares a date-range constraint from that row's field to the named field.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use tracing::debug;
use udf_model::{
    BehaviorHint, ClassDescriptor, ConstraintKind, DataType, DynamicModel, FieldDescriptor,
    FieldPair, ParamMap,
};

/// One row of an option CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    pub key: String,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub kind: Option<String>,
}

fn header_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn get_string(row: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| row.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn split_list(s: Option<String>) -> Vec<String> {
    let Some(s) = s else {
        return Vec::new();
    };
    s.split([';', ',', ' '])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.to_ascii_lowercase().as_str(),
            "y" | "yes" | "true" | "1" | "req"
        )
    })
}

fn parse_bound(value: Option<String>, line: usize, column: &str) -> Result<Option<f64>> {
    value
        .map(|v| {
            v.parse::<f64>()
                .map_err(|_| anyhow!("line {line}: invalid {column} '{v}'"))
        })
        .transpose()
}

/// Parse descriptor rows from CSV.
pub fn parse_descriptor_csv<R: Read>(reader: R, class_name: &str) -> Result<ClassDescriptor> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers().context("read CSV headers")?.clone();

    let idx_name = header_index(&headers, "Field Name")
        .ok_or_else(|| anyhow!("missing 'Field Name' column"))?;
    let idx_type = header_index(&headers, "Data Type")
        .ok_or_else(|| anyhow!("missing 'Data Type' column"))?;
    let idx_min = header_index(&headers, "Min");
    let idx_max = header_index(&headers, "Max");
    let idx_required = header_index(&headers, "Required");
    let idx_hints = header_index(&headers, "Hints");
    let idx_enum = header_index(&headers, "Enum Type");
    let idx_special = header_index(&headers, "Special Type");
    let idx_range_end = header_index(&headers, "Range End");

    let mut fields = Vec::new();
    let mut ranges = Vec::new();
    for (offset, row) in reader.records().enumerate() {
        // header is line 1
        let line = offset + 2;
        let row = row.with_context(|| format!("read CSV line {line}"))?;
        let name = get_string(&row, Some(idx_name))
            .ok_or_else(|| anyhow!("line {line}: missing Field Name"))?;
        let data_type = get_string(&row, Some(idx_type))
            .map(|t| t.parse::<DataType>().unwrap_or(DataType::Unknown))
            .unwrap_or(DataType::Unknown);

        let mut field = FieldDescriptor::new(name.clone(), data_type).with_bounds(
            parse_bound(get_string(&row, idx_min), line, "Min")?,
            parse_bound(get_string(&row, idx_max), line, "Max")?,
        );
        field.required = parse_flag(get_string(&row, idx_required).as_deref());
        for hint in split_list(get_string(&row, idx_hints)) {
            field = field.with_hint(hint.parse::<BehaviorHint>().unwrap_or(BehaviorHint::Unknown));
        }
        if let Some(enum_type) = get_string(&row, idx_enum) {
            field = field.with_enum_type(enum_type);
        }
        if let Some(code) = get_string(&row, idx_special) {
            let code = code
                .parse::<u32>()
                .map_err(|_| anyhow!("line {line}: invalid Special Type '{code}'"))?;
            field = field.with_special_type(code);
        }
        if let Some(end) = get_string(&row, idx_range_end) {
            ranges.push(FieldPair::new(name, end));
        }
        fields.push(field);
    }

    if ranges.len() > 1 {
        bail!("only one Range End is supported per class, found {}", ranges.len());
    }
    let mut class = ClassDescriptor::new(class_name, fields);
    if let Some(pair) = ranges.pop() {
        class = class.with_constraint(ConstraintKind::DateRange, pair);
    }
    Ok(class)
}

/// Load a class descriptor from `.json` or `.csv`.
///
/// CSV classes are named after the file stem.
pub fn load_class(path: &Path) -> Result<ClassDescriptor> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let class = match extension.as_deref() {
        Some("csv") => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("open {}", path.display()))?;
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("class");
            parse_descriptor_csv(file, name).with_context(|| format!("parse {}", path.display()))?
        }
        _ => read_json(path)?,
    };
    debug!(
        class = %class.name,
        fields = class.fields.len(),
        constraints = class.constraints.len(),
        "loaded class descriptor"
    );
    Ok(class)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}

/// JSON array of row objects.
pub fn load_rows(path: &Path) -> Result<Vec<DynamicModel>> {
    read_json(path)
}

pub fn load_model(path: &Path) -> Result<DynamicModel> {
    read_json(path)
}

pub fn load_params(path: &Path) -> Result<ParamMap> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    udf_codec::param_map_from_json(&text).with_context(|| format!("parse {}", path.display()))
}

/// JSON object mapping translation keys to display text.
pub fn load_translations(path: &Path) -> Result<BTreeMap<String, String>> {
    read_json(path)
}

/// Parse option rows (`Key`, `Category`, `Sub-Category`, `Kind`).
pub fn parse_options_csv<R: Read>(reader: R) -> Result<Vec<OptionRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers().context("read CSV headers")?.clone();
    let idx_key = header_index(&headers, "Key").ok_or_else(|| anyhow!("missing 'Key' column"))?;
    let idx_category = header_index(&headers, "Category");
    let idx_sub = header_index(&headers, "Sub-Category");
    let idx_kind = header_index(&headers, "Kind");

    let mut rows = Vec::new();
    for (offset, row) in reader.records().enumerate() {
        let line = offset + 2;
        let row = row.with_context(|| format!("read CSV line {line}"))?;
        let key =
            get_string(&row, Some(idx_key)).ok_or_else(|| anyhow!("line {line}: missing Key"))?;
        rows.push(OptionRow {
            key,
            category: get_string(&row, idx_category),
            sub_category: get_string(&row, idx_sub),
            kind: get_string(&row, idx_kind),
        });
    }
    Ok(rows)
}

pub fn load_options(path: &Path) -> Result<Vec<OptionRow>> {
    let file = std::fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    parse_options_csv(file).with_context(|| format!("parse {}", path.display()))
}
