use proptest::prelude::*;

use udf_model::{BehaviorHint, DataType, DynamicModel, FieldDescriptor, ScalarValue};
use udf_table::{
    ColumnConfig, SortKey, TranslationCache, compile_columns, display_text, sort_rows,
};

fn row(a: Option<f64>, b: f64) -> DynamicModel {
    DynamicModel::new().with("a", a).with("b", b)
}

#[test]
fn nulls_first_then_secondary_key() {
    let mut rows = vec![row(None, 1.0), row(Some(1.0), 2.0), row(Some(1.0), 1.0)];
    sort_rows(
        &mut rows,
        &[SortKey::asc("a"), SortKey::asc("b")],
        &[],
        &TranslationCache::new(),
    );
    assert_eq!(
        rows,
        vec![row(None, 1.0), row(Some(1.0), 1.0), row(Some(1.0), 2.0)]
    );
}

#[test]
fn nan_cells_sort_with_nulls_and_keep_numbers_ordered() {
    let mut rows: Vec<DynamicModel> = (0..200)
        .map(|i| {
            let value = if i % 3 == 0 {
                f64::NAN
            } else {
                f64::from((i * 37) % 101)
            };
            DynamicModel::new().with("v", value)
        })
        .collect();
    sort_rows(
        &mut rows,
        &[SortKey::asc("v")],
        &[],
        &TranslationCache::new(),
    );

    let values: Vec<f64> = rows
        .iter()
        .map(|row| row.value("v").as_f64().unwrap())
        .collect();
    let nan_count = values.iter().take_while(|v| v.is_nan()).count();
    assert_eq!(nan_count, 67);
    let numbers = &values[nan_count..];
    assert!(numbers.iter().all(|v| !v.is_nan()));
    assert!(numbers.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn descending_key_reverses_only_that_key() {
    let mut rows = vec![row(Some(1.0), 1.0), row(Some(2.0), 1.0), row(Some(1.0), 2.0)];
    sort_rows(
        &mut rows,
        &[SortKey::desc("a"), SortKey::asc("b")],
        &[],
        &TranslationCache::new(),
    );
    assert_eq!(
        rows,
        vec![row(Some(2.0), 1.0), row(Some(1.0), 1.0), row(Some(1.0), 2.0)]
    );
}

#[test]
fn translated_columns_sort_by_display_value() {
    let descriptors = vec![
        FieldDescriptor::new("status", DataType::String)
            .with_hint(BehaviorHint::Options)
            .with_enum_type("Status"),
    ];
    let columns = compile_columns(&descriptors, "").expect("compile columns");
    let mut cache = TranslationCache::new();
    cache.insert("status", "A", "zulu");
    cache.insert("status", "Z", "alpha");

    let mut rows = vec![
        DynamicModel::new().with("status", "A"),
        DynamicModel::new().with("status", "Z"),
    ];
    sort_rows(&mut rows, &[SortKey::asc("status")], &columns, &cache);
    assert_eq!(rows[0].value("status"), &ScalarValue::text("Z"));
    assert_eq!(display_text(&columns[0], &rows[0], &cache), "alpha");
}

#[test]
fn formatter_drives_sort_order() {
    let descriptors = vec![FieldDescriptor::new("name", DataType::String)];
    let columns: Vec<ColumnConfig> = compile_columns(&descriptors, "")
        .expect("compile columns")
        .into_iter()
        .map(|column| {
            column.with_formatter(|row| {
                ScalarValue::from(row.value("name").to_string().chars().rev().collect::<String>())
            })
        })
        .collect();

    let mut rows = vec![
        DynamicModel::new().with("name", "ab"),
        DynamicModel::new().with("name", "ba"),
    ];
    sort_rows(&mut rows, &[SortKey::asc("name")], &columns, &TranslationCache::new());
    assert_eq!(rows[0].value("name"), &ScalarValue::text("ba"));
}

#[test]
fn text_sorts_case_insensitively() {
    let mut rows: Vec<DynamicModel> = ["banana", "Apple", "apple", "Cherry"]
        .iter()
        .map(|name| DynamicModel::new().with("name", *name))
        .collect();
    sort_rows(&mut rows, &[SortKey::asc("name")], &[], &TranslationCache::new());
    let names: Vec<String> = rows.iter().map(|r| r.value("name").to_string()).collect();
    assert_eq!(names, vec!["apple", "Apple", "banana", "Cherry"]);
}

#[test]
fn percent_suffix_is_display_only() {
    let descriptors =
        vec![FieldDescriptor::new("share", DataType::Numeric).with_hint(BehaviorHint::Percentage)];
    let columns = compile_columns(&descriptors, "").expect("compile columns");
    let cache = TranslationCache::new();
    let mut rows = vec![
        DynamicModel::new().with("share", 10.0),
        DynamicModel::new().with("share", 9.0),
    ];
    sort_rows(&mut rows, &[SortKey::asc("share")], &columns, &cache);
    assert_eq!(display_text(&columns[0], &rows[0], &cache), "9%");
    assert_eq!(display_text(&columns[0], &rows[1], &cache), "10%");
}

proptest! {
    #[test]
    fn sort_is_stable_on_ties(groups in proptest::collection::vec(0u8..4, 0..40)) {
        let mut rows: Vec<DynamicModel> = groups
            .iter()
            .enumerate()
            .map(|(i, g)| {
                DynamicModel::new()
                    .with("g", f64::from(*g))
                    .with("seq", i as f64)
            })
            .collect();
        sort_rows(&mut rows, &[SortKey::asc("g")], &[], &TranslationCache::new());

        for pair in rows.windows(2) {
            let (g0, g1) = (pair[0].value("g").as_f64(), pair[1].value("g").as_f64());
            prop_assert!(g0 <= g1);
            if g0 == g1 {
                prop_assert!(pair[0].value("seq").as_f64() < pair[1].value("seq").as_f64());
            }
        }
    }
}
