use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use udf_compile::{CompiledField, DefaultValue, FieldConfig, ValidationIssue, Validator};
use udf_model::{DynamicModel, SpecialType};
use udf_table::{ColumnConfig, SortedOptionList, TranslationCache, display_text};

pub fn print_compiled(class: &str, compiled: &[CompiledField]) {
    println!("Class: {class}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Field"),
        header_cell("Input"),
        header_cell("Label"),
        header_cell("Req"),
        header_cell("Default"),
        header_cell("Suffix"),
        header_cell("Validators"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for (position, entry) in compiled.iter().enumerate() {
        match entry {
            CompiledField::Field(field) => {
                table.add_row(field_row(Cell::new(position + 1), field, false));
            }
            CompiledField::Group(group) => {
                table.add_row(vec![
                    Cell::new(position + 1),
                    Cell::new(&group.name)
                        .fg(Color::Magenta)
                        .add_attribute(Attribute::Bold),
                    Cell::new(group.kind.as_str()).fg(Color::Magenta),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    Cell::new(&group.error_rule.rule),
                ]);
                for field in &group.fields {
                    table.add_row(field_row(dim_cell(""), field, true));
                }
            }
        }
    }
    println!("{table}");
}

fn field_row(position: Cell, field: &FieldConfig, member: bool) -> Vec<Cell> {
    let name = if member {
        Cell::new(format!("  -> {}", field.field_name)).fg(Color::DarkGrey)
    } else {
        Cell::new(&field.field_name)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold)
    };
    let validators: Vec<&str> = field.validators.iter().map(Validator::rule_name).collect();
    vec![
        position,
        name,
        Cell::new(field.input.as_str()),
        Cell::new(&field.label),
        flag_cell(field.required),
        optional_cell(field.default_value.as_ref().map(|default| match default {
            DefaultValue::Today => "today".to_string(),
            DefaultValue::Value(value) => value.to_string(),
        })),
        optional_cell(field.suffix.clone()),
        optional_cell((!validators.is_empty()).then(|| validators.join(", "))),
    ]
}

pub fn print_columns(columns: &[ColumnConfig]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Header"),
        header_cell("Filter"),
        header_cell("Visible"),
        header_cell("Group"),
        header_cell("Declared"),
        header_cell("Span"),
        header_cell("Special"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    for column in columns {
        let (group, declared, span) = match &column.group {
            Some(group) => (
                Cell::new(&group.label),
                Cell::new(group.declared.to_string()),
                count_cell(group.effective),
            ),
            None => (dim_cell("-"), dim_cell("-"), dim_cell("-")),
        };
        table.add_row(vec![
            Cell::new(&column.field_name),
            Cell::new(&column.header),
            Cell::new(column.filter.as_str()),
            flag_cell(column.visible),
            group,
            declared,
            span,
            optional_cell(column.special_type.map(|code| code.to_string())),
        ]);
    }
    println!("{table}");
}

/// Render rows through the visible columns.
pub fn print_rows(columns: &[ColumnConfig], rows: &[&DynamicModel], cache: &TranslationCache) {
    let visible: Vec<&ColumnConfig> = columns.iter().filter(|column| column.visible).collect();
    let mut table = Table::new();
    table.set_header(visible.iter().map(|column| header_cell(&column.header)));
    apply_table_style(&mut table);
    for (index, column) in visible.iter().enumerate() {
        if column.data_type.is_numeric() {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    for row in rows {
        table.add_row(
            visible
                .iter()
                .map(|column| Cell::new(display_text(column, row, cache))),
        );
    }
    println!("{table}");
    println!("{} row(s)", rows.len());
}

pub fn print_model(model: &DynamicModel) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value"), header_cell("Type")]);
    apply_table_style(&mut table);
    for (field, value) in model.iter() {
        table.add_row(vec![
            Cell::new(field),
            Cell::new(value.to_string()),
            dim_cell(value.kind()),
        ]);
    }
    println!("{table}");
}

pub fn print_issues(issues: &[ValidationIssue]) {
    if issues.is_empty() {
        println!("No validation issues.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Rule"),
        header_cell("Message Key"),
    ]);
    apply_issue_table_style(&mut table);
    for issue in issues {
        table.add_row(vec![
            Cell::new(&issue.field).fg(Color::Blue),
            Cell::new(&issue.rule).fg(Color::Red),
            Cell::new(&issue.message_key),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn print_special_types(types: &[&SpecialType]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Value"), header_cell("Name")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for special in types {
        table.add_row(vec![Cell::new(special.value), Cell::new(&special.name)]);
    }
    println!("{table}");
}

pub fn print_options(options: &SortedOptionList) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Key"), header_cell("Display")]);
    apply_table_style(&mut table);
    for option in options.iter() {
        table.add_row(vec![Cell::new(&option.key), Cell::new(&option.display)]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn flag_cell(value: bool) -> Cell {
    if value {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<String>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
