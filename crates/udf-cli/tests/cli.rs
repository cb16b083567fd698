//! Tests for configuration files and descriptor loaders.

use udf_cli::config::{ColumnGroupSetting, EngineConfig, SpanSetting, parse_config};
use udf_cli::loaders::{OptionRow, parse_descriptor_csv, parse_options_csv};
use udf_compile::{CompiledField, FormCompiler, UnmappedPolicy};
use udf_model::{BehaviorHint, ConstraintKind, DataType, FieldPair};
use udf_registry::CollisionPolicy;
use udf_table::{SortedOptionList, compile_columns, resolve_visibility};

const CONFIG: &str = r#"
label_prefix = "booking.field."
header_prefix = "booking.column."
unmapped_policy = "fail_fast"
collision_policy = "reject"

[[special_types]]
value = 7
name = "INTERNAL_COST"

[[special_types]]
value = 9
name = "AUDIT"

[[column_groups]]
field = "q1"
label = "totals.quarter"
span = "remaining"

[[column_groups]]
field = "name"
label = "totals.person"
span = 1

[visibility]
INTERNAL_COST = false
"#;

const DESCRIPTORS: &str = "\
Field Name,Data Type,Min,Max,Required,Hints,Enum Type,Special Type,Range End
name,string,2,40,yes,,,,
arrival,date,,,y,DATE_FUTURE,,,departure
departure,date,,,,,,,
share,numeric,0,100,,PERCENTAGE,,,
status,string,,,,OPTIONS,Status,,
cost,numeric,,,,,,7,
blob,binary,,,,,,,
";

#[test]
fn config_file_parses_every_section() {
    let config = parse_config(CONFIG).unwrap();
    assert_eq!(config.label_prefix, "booking.field.");
    assert_eq!(config.header_prefix, "booking.column.");
    assert_eq!(config.unmapped_policy, UnmappedPolicy::FailFast);
    assert_eq!(config.collision_policy, CollisionPolicy::Reject);
    assert_eq!(config.special_types.len(), 2);
    assert_eq!(
        config.column_groups,
        vec![
            ColumnGroupSetting {
                field: "q1".to_string(),
                label: "totals.quarter".to_string(),
                span: SpanSetting::Keyword("remaining".to_string()),
            },
            ColumnGroupSetting {
                field: "name".to_string(),
                label: "totals.person".to_string(),
                span: SpanSetting::Count(1),
            },
        ]
    );
    assert_eq!(config.visibility.get("INTERNAL_COST"), Some(false));
    assert_eq!(config.registry().unwrap().len(), 2);
}

#[test]
fn empty_config_uses_defaults() {
    let config = parse_config("").unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.unmapped_policy, UnmappedPolicy::Skip);
    assert!(config.registry().unwrap().is_empty());
}

#[test]
fn unknown_config_keys_are_rejected() {
    assert!(parse_config("label_prefx = \"x\"").is_err());
}

#[test]
fn duplicate_special_type_is_rejected_under_reject_policy() {
    let text = r#"
collision_policy = "reject"

[[special_types]]
value = 7
name = "INTERNAL_COST"

[[special_types]]
value = 7
name = "OTHER"
"#;
    let config = parse_config(text).unwrap();
    assert!(config.registry().is_err());
}

#[test]
fn csv_descriptors_load_with_types_hints_and_range() {
    let class = parse_descriptor_csv(DESCRIPTORS.as_bytes(), "Booking").unwrap();
    assert_eq!(class.name, "Booking");
    assert_eq!(
        class.field_names().collect::<Vec<_>>(),
        vec![
            "name",
            "arrival",
            "departure",
            "share",
            "status",
            "cost",
            "blob"
        ]
    );

    let name = class.field("name").unwrap();
    assert_eq!(name.data_type, DataType::String);
    assert_eq!((name.min, name.max), (Some(2.0), Some(40.0)));
    assert!(name.required);

    let share = class.field("share").unwrap();
    assert!(share.has_hint(BehaviorHint::Percentage));
    assert!(!share.required);

    let status = class.field("status").unwrap();
    assert_eq!(status.enum_type.as_deref(), Some("Status"));
    assert_eq!(class.field("cost").unwrap().special_type, Some(7));
    assert_eq!(class.field("blob").unwrap().data_type, DataType::Binary);

    assert_eq!(
        class.constraints.get(&ConstraintKind::DateRange),
        Some(&FieldPair::new("arrival", "departure"))
    );
}

#[test]
fn csv_descriptors_compile_into_a_grouped_form() {
    let class = parse_descriptor_csv(DESCRIPTORS.as_bytes(), "Booking").unwrap();
    let config = parse_config("label_prefix = \"booking.\"").unwrap();
    let compiled = FormCompiler::new(config.compile_options())
        .compile(&class)
        .unwrap();
    let names: Vec<&str> = compiled.iter().map(CompiledField::name).collect();
    // binary has no input and is skipped
    assert_eq!(
        names,
        vec!["name", "arrival-departure", "share", "status", "cost"]
    );
}

#[test]
fn csv_rejects_bad_rows() {
    let missing_type = "Field Name\nname\n";
    assert!(parse_descriptor_csv(missing_type.as_bytes(), "X").is_err());

    let bad_bound = "Field Name,Data Type,Min\nname,string,abc\n";
    let error = parse_descriptor_csv(bad_bound.as_bytes(), "X").unwrap_err();
    assert!(error.to_string().contains("line 2"));

    let two_ranges = "\
Field Name,Data Type,Range End
a,date,b
b,date,
c,date,d
d,date,
";
    assert!(parse_descriptor_csv(two_ranges.as_bytes(), "X").is_err());
}

#[test]
fn unknown_type_in_csv_maps_to_unknown() {
    let text = "Field Name,Data Type,Hints\ngeo,geometry,SPARKLE\n";
    let class = parse_descriptor_csv(text.as_bytes(), "X").unwrap();
    let geo = class.field("geo").unwrap();
    assert_eq!(geo.data_type, DataType::Unknown);
    assert_eq!(geo.hints, vec![BehaviorHint::Unknown]);
}

#[test]
fn configured_groups_and_visibility_shape_columns() {
    let csv = "\
Field Name,Data Type,Special Type
name,string,
q1,numeric,
q2,numeric,7
q3,numeric,
";
    let class = parse_descriptor_csv(csv.as_bytes(), "Totals").unwrap();
    let config = parse_config(CONFIG).unwrap();
    let mut columns = compile_columns(&class.fields, &config.header_prefix).unwrap();
    config.apply_column_groups(&mut columns).unwrap();
    let changed = resolve_visibility(&mut columns, &config.visibility, &config.registry().unwrap());

    assert_eq!(changed, 1);
    assert_eq!(columns[0].header, "booking.column.name");
    assert!(!columns[2].visible);
    let spans: Vec<Option<usize>> = columns
        .iter()
        .map(|column| column.group.as_ref().map(|group| group.effective))
        .collect();
    assert_eq!(spans, vec![Some(1), Some(2), None, None]);
}

#[test]
fn column_group_on_unknown_field_fails() {
    let csv = "Field Name,Data Type\nname,string\n";
    let class = parse_descriptor_csv(csv.as_bytes(), "X").unwrap();
    let config = parse_config(CONFIG).unwrap();
    let mut columns = compile_columns(&class.fields, "").unwrap();
    let error = config.apply_column_groups(&mut columns).unwrap_err();
    assert!(error.to_string().contains("q1"));
}

#[test]
fn option_csv_feeds_a_sorted_list() {
    let csv = "\
Key,Category,Sub-Category,Kind
b,Fruit,Banana,
a,Fruit,Apple,Green
c,Fruit,,
";
    let rows = parse_options_csv(csv.as_bytes()).unwrap();
    assert_eq!(
        rows[1],
        OptionRow {
            key: "a".to_string(),
            category: Some("Fruit".to_string()),
            sub_category: Some("Apple".to_string()),
            kind: Some("Green".to_string()),
        }
    );

    let mut options = SortedOptionList::new();
    for row in &rows {
        options.insert_parts(
            row.key.clone(),
            row.category.as_deref(),
            row.sub_category.as_deref(),
            row.kind.as_deref(),
        );
    }
    insta::assert_snapshot!(options.displays().join("\n"), @r"
    Fruit
    Fruit / Apple / Green
    Fruit / Banana
    ");
}
