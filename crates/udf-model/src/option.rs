use serde::{Deserialize, Serialize};

/// One entry of a select/option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Raw value stored in the model.
    pub key: String,
    /// Text shown to the user.
    pub display: String,
}

impl SelectOption {
    pub fn new(key: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display: display.into(),
        }
    }
}
