use graphwalk_graphlib::GraphError;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of user-initiated operations.
///
/// None of these leave the session in an unusable state; callers are expected to report them
/// and carry on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Select at least {required} vertices to connect ({selected} selected)")]
    InsufficientSelection { required: usize, selected: usize },

    #[error("Select vertices or edges first")]
    NothingSelected,

    #[error("The graph is empty; create vertices first")]
    EmptyGraph,

    #[error("Malformed adjacency matrix: {message}")]
    MalformedMatrix { message: String },

    #[error("There is no traversal to repeat")]
    NoTraversalToRepeat,

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}
