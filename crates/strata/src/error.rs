pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot take the {what} of an empty node collection")]
    EmptyCollection { what: &'static str },

    #[error("layer {layer} ran out of slots (capacity {capacity})")]
    LayerCapacityExhausted { layer: usize, capacity: usize },

    #[error("invalid layout configuration: {message}")]
    InvalidConfig { message: String },

    #[error(transparent)]
    Config(#[from] serde_json::Error),

    #[error("{what} is not implemented")]
    NotImplemented { what: &'static str },
}
