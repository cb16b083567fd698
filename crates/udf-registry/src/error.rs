#![deny(unsafe_code)]

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error(
        "special type {value} is already registered as '{existing}' (refusing '{incoming}')"
    )]
    Collision {
        value: u32,
        existing: String,
        incoming: String,
    },
}
