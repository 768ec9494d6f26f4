pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by layout and rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("split proportion {proportion} is outside (0, 1)")]
    InvalidProportion { proportion: f64 },

    #[error("cannot bisect a sequence of fewer than two items")]
    NotBisectable,

    #[error("container is empty or has non-positive weight")]
    EmptyOrZeroWeight,

    #[error("begin_group/end_group calls are not balanced")]
    UnbalancedGroup,

    #[error("malformed input tree: {message}")]
    MalformedInput { message: String },

    #[error("could not read {}: {source}", path.display())]
    ReadInput {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("could not write {}: {source}", path.display())]
    WriteOutput {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}
