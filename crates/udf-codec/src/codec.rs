//! Pure conversions between [`ParamMap`] and [`DynamicModel`].
//!
//! Only fields named by the descriptor list are read or written. Every
//! function that produces a map first checks that descriptor names are unique.

use tracing::debug;
use udf_model::{DynamicModel, FieldDescriptor, ModelError, ParamMap, ScalarValue};

use crate::coerce::coerce_numeric;
use crate::error::{CodecError, Result};

/// Extra key stamped onto a decoded model, e.g. a type discriminator.
pub type Seed<'a> = (&'a str, ScalarValue);

fn check_names(descriptors: &[FieldDescriptor]) -> Result<()> {
    udf_model::ensure_unique_names(descriptors).map_err(|err| match err {
        ModelError::DuplicateField(name) => CodecError::DuplicateField(name),
        ModelError::EmptyFieldName => CodecError::EmptyFieldName,
    })
}

fn decode_value(descriptor: &FieldDescriptor, params: &ParamMap) -> ScalarValue {
    let raw = params
        .param_value(&descriptor.field_name)
        .cloned()
        .unwrap_or_default();
    if descriptor.data_type.is_numeric() {
        coerce_numeric(&descriptor.field_name, &raw)
    } else {
        raw
    }
}

/// Decode a parameter map into a fresh dynamic model.
///
/// Absent parameters decode to null. The seed key is written before the
/// descriptor fields, so a descriptor with the same name wins.
pub fn to_dynamic_model(
    descriptors: &[FieldDescriptor],
    params: &ParamMap,
    seed: Option<Seed<'_>>,
) -> Result<DynamicModel> {
    check_names(descriptors)?;
    let mut model = DynamicModel::new();
    if let Some((field, value)) = seed {
        model.insert(field, value);
    }
    for descriptor in descriptors {
        model.insert(
            descriptor.field_name.clone(),
            decode_value(descriptor, params),
        );
    }
    debug!(fields = descriptors.len(), "decoded parameter map");
    Ok(model)
}

/// Hydrate descriptor fields into an existing host model.
///
/// Keys not named by a descriptor are left untouched.
pub fn merge_into(
    host: &mut DynamicModel,
    descriptors: &[FieldDescriptor],
    params: &ParamMap,
) -> Result<()> {
    check_names(descriptors)?;
    for descriptor in descriptors {
        host.insert(
            descriptor.field_name.clone(),
            decode_value(descriptor, params),
        );
    }
    Ok(())
}

/// Encode the descriptor fields of a model into a parameter map.
pub fn to_param_map(descriptors: &[FieldDescriptor], model: &DynamicModel) -> Result<ParamMap> {
    check_names(descriptors)?;
    Ok(descriptors
        .iter()
        .map(|descriptor| {
            (
                descriptor.field_name.clone(),
                model.value(&descriptor.field_name).clone(),
            )
        })
        .collect())
}

/// Compare two models on descriptor fields only.
///
/// `None` on either side is never equal. Values compare strictly, so the
/// number `1` and the text `"1"` differ.
pub fn is_data_model_equal(
    a: Option<&DynamicModel>,
    b: Option<&DynamicModel>,
    descriptors: &[FieldDescriptor],
) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };
    descriptors
        .iter()
        .all(|descriptor| a.value(&descriptor.field_name) == b.value(&descriptor.field_name))
}

/// Parse a parameter map from its JSON wire form.
pub fn param_map_from_json(json: &str) -> Result<ParamMap> {
    Ok(serde_json::from_str(json)?)
}

/// Render a parameter map as JSON.
pub fn param_map_to_json(params: &ParamMap, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(params)?
    } else {
        serde_json::to_string(params)?
    };
    Ok(json)
}
