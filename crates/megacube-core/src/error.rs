use thiserror::Error;

/// Errors raised while building a palette from gradient stops.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("palette '{0}' has no gradient stops")]
    NoStops(String),

    #[error("palette '{name}' must start at index 0 (first stop is {first})")]
    MissingStart { name: String, first: u8 },

    #[error("palette '{name}' must end at index 255 (last stop is {last})")]
    MissingEnd { name: String, last: u8 },

    #[error("palette '{name}' stop {position} goes backwards ({previous} -> {index})")]
    UnorderedStops {
        name: String,
        position: usize,
        previous: u8,
        index: u8,
    },

    #[error("palette set is empty")]
    EmptySet,
}
