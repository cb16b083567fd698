//! Conversion between the wire parameter map and the flat dynamic model.

pub mod codec;
pub mod coerce;
pub mod error;

pub use codec::{
    Seed, is_data_model_equal, merge_into, param_map_from_json, param_map_to_json,
    to_dynamic_model, to_param_map,
};
pub use coerce::{coerce_numeric, parse_numeric};
pub use error::{CodecError, Result};
