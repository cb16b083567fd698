use proptest::prelude::*;

use udf_codec::{
    CodecError, is_data_model_equal, merge_into, param_map_from_json, param_map_to_json,
    to_dynamic_model, to_param_map,
};
use udf_model::{DataType, DynamicModel, FieldDescriptor, ParamMap, ScalarValue};

fn descriptors() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("name", DataType::String),
        FieldDescriptor::new("amount", DataType::Numeric),
        FieldDescriptor::new("count", DataType::Integer),
        FieldDescriptor::new("active", DataType::Boolean),
    ]
}

#[test]
fn decodes_and_coerces_numeric_fields() {
    let params = ParamMap::new()
        .with("name", "Widget")
        .with("amount", "12.5")
        .with("count", true)
        .with("unrelated", "ignored");
    let model = to_dynamic_model(&descriptors(), &params, None).expect("decode");

    assert_eq!(model.value("name"), &ScalarValue::text("Widget"));
    assert_eq!(model.value("amount"), &ScalarValue::Number(12.5));
    assert_eq!(model.value("count"), &ScalarValue::Number(1.0));
    assert!(model.value("active").is_null());
    assert!(model.contains("active"));
    assert!(!model.contains("unrelated"));
    assert_eq!(model.len(), 4);
}

#[test]
fn unparseable_numeric_text_becomes_null() {
    let params = ParamMap::new().with("amount", "twelve").with("count", "");
    let model = to_dynamic_model(&descriptors(), &params, None).expect("decode");
    assert!(model.value("amount").is_null());
    assert!(model.value("count").is_null());
}

#[test]
fn seed_adds_discriminator_key() {
    let model = to_dynamic_model(
        &descriptors(),
        &ParamMap::new(),
        Some(("classType", ScalarValue::text("Invoice"))),
    )
    .expect("decode");
    assert_eq!(model.value("classType"), &ScalarValue::text("Invoice"));
    assert_eq!(model.len(), 5);
}

#[test]
fn duplicate_descriptor_names_are_rejected() {
    let mut fields = descriptors();
    fields.push(FieldDescriptor::new("name", DataType::String));
    let err = to_dynamic_model(&fields, &ParamMap::new(), None).unwrap_err();
    assert!(matches!(err, CodecError::DuplicateField(name) if name == "name"));
    assert!(to_param_map(&fields, &DynamicModel::new()).is_err());
}

#[test]
fn encode_wraps_named_values_only() {
    let model = DynamicModel::new()
        .with("name", "Widget")
        .with("amount", 3.0)
        .with("hostOnly", "x");
    let params = to_param_map(&descriptors(), &model).expect("encode");
    assert_eq!(params.len(), 4);
    assert_eq!(params.param_value("amount"), Some(&ScalarValue::Number(3.0)));
    assert_eq!(params.param_value("count"), Some(&ScalarValue::Null));
    assert!(params.get("hostOnly").is_none());
}

#[test]
fn merge_keeps_host_keys() {
    let mut host = DynamicModel::new()
        .with("id", 7.0)
        .with("name", "old");
    let params = ParamMap::new().with("name", "new").with("amount", "4");
    merge_into(&mut host, &descriptors(), &params).expect("merge");
    assert_eq!(host.value("id"), &ScalarValue::Number(7.0));
    assert_eq!(host.value("name"), &ScalarValue::text("new"));
    assert_eq!(host.value("amount"), &ScalarValue::Number(4.0));
}

#[test]
fn equality_is_field_sensitive_and_none_is_never_equal() {
    let fields = descriptors();
    let a = DynamicModel::new().with("name", "A").with("amount", 1.0);
    let b = a.clone().with("other", "differs outside descriptors");
    let c = a.clone().with("amount", 2.0);

    assert!(is_data_model_equal(Some(&a), Some(&a), &fields));
    assert!(is_data_model_equal(Some(&a), Some(&b), &fields));
    assert!(!is_data_model_equal(Some(&a), Some(&c), &fields));
    assert!(!is_data_model_equal(None, Some(&a), &fields));
    assert!(!is_data_model_equal(Some(&a), None, &fields));
    assert!(!is_data_model_equal(None, None, &fields));
}

#[test]
fn number_and_numeric_text_are_not_equal() {
    let fields = vec![FieldDescriptor::new("v", DataType::String)];
    let a = DynamicModel::new().with("v", 1.0);
    let b = DynamicModel::new().with("v", "1");
    assert!(!is_data_model_equal(Some(&a), Some(&b), &fields));
}

#[test]
fn json_wire_form() {
    let params = param_map_from_json(
        r#"{"name": {"paramValue": "Widget"}, "amount": {"paramValue": 2}, "empty": {}}"#,
    )
    .expect("parse");
    assert_eq!(params.param_value("amount"), Some(&ScalarValue::Number(2.0)));
    assert_eq!(params.param_value("empty"), Some(&ScalarValue::Null));

    let json = param_map_to_json(&ParamMap::new().with("a", true), false).expect("render");
    assert_eq!(json, r#"{"a":{"paramValue":true}}"#);

    assert!(matches!(
        param_map_from_json("[1, 2]"),
        Err(CodecError::Json(_))
    ));
}

fn scalar_for(data_type: DataType) -> BoxedStrategy<ScalarValue> {
    let null = Just(ScalarValue::Null);
    match data_type {
        DataType::Numeric => prop_oneof![null, (-1.0e9..1.0e9f64).prop_map(ScalarValue::Number)]
            .boxed(),
        DataType::Integer => prop_oneof![
            null,
            (-100_000i64..100_000).prop_map(|n| ScalarValue::Number(n as f64))
        ]
        .boxed(),
        DataType::Boolean => prop_oneof![null, any::<bool>().prop_map(ScalarValue::Bool)].boxed(),
        _ => prop_oneof![null, "[a-zA-Z0-9 ]{0,12}".prop_map(ScalarValue::Text)].boxed(),
    }
}

fn model_strategy() -> impl Strategy<Value = DynamicModel> {
    let fields = descriptors();
    let values: Vec<BoxedStrategy<ScalarValue>> =
        fields.iter().map(|f| scalar_for(f.data_type)).collect();
    values.prop_map(move |values| {
        fields
            .iter()
            .zip(values)
            .map(|(field, value)| (field.field_name.clone(), value))
            .collect()
    })
}

/// Wire values as a client sends them: numeric fields may carry numeric text.
fn param_for(data_type: DataType) -> BoxedStrategy<ScalarValue> {
    match data_type {
        DataType::Numeric | DataType::Integer => prop_oneof![
            scalar_for(data_type),
            (-1.0e6..1.0e6f64).prop_map(|n| ScalarValue::Text(n.to_string())),
        ]
        .boxed(),
        _ => scalar_for(data_type),
    }
}

fn params_strategy() -> impl Strategy<Value = ParamMap> {
    let fields = descriptors();
    let values: Vec<BoxedStrategy<Option<ScalarValue>>> = fields
        .iter()
        .map(|f| proptest::option::of(param_for(f.data_type)).boxed())
        .collect();
    values.prop_map(move |values| {
        fields
            .iter()
            .zip(values)
            .filter_map(|(field, value)| value.map(|value| (field.field_name.clone(), value)))
            .collect()
    })
}

/// What a field should hold after decoding: absent is null, numeric text is
/// its number.
fn decoded_scalar(field: &FieldDescriptor, params: &ParamMap) -> ScalarValue {
    match params.param_value(&field.field_name) {
        None => ScalarValue::Null,
        Some(ScalarValue::Text(text)) if field.data_type.is_numeric() => {
            ScalarValue::Number(text.parse().expect("generated numeric text"))
        }
        Some(value) => value.clone(),
    }
}

proptest! {
    #[test]
    fn decode_then_encode_reproduces_params(params in params_strategy()) {
        let fields = descriptors();
        let model = to_dynamic_model(&fields, &params, None).expect("decode");
        let encoded = to_param_map(&fields, &model).expect("encode");
        prop_assert_eq!(encoded.len(), fields.len());
        for field in &fields {
            prop_assert_eq!(
                encoded.param_value(&field.field_name),
                Some(&decoded_scalar(field, &params))
            );
        }
    }

    #[test]
    fn encode_then_decode_is_equal(model in model_strategy()) {
        let fields = descriptors();
        let params = to_param_map(&fields, &model).expect("encode");
        let decoded = to_dynamic_model(&fields, &params, None).expect("decode");
        prop_assert!(is_data_model_equal(Some(&model), Some(&decoded), &fields));
    }
}
