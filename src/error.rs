use thiserror::Error;

/// Custom error type for Combsol
///
/// This error type is used to wrap all possible errors that can occur when using Combsol
#[derive(Error, Debug)]
pub enum CombsolError {
    #[error("Graph error: {0}")]
    GraphError(#[from] GraphError),
    #[error("Coloring error: {0}")]
    ColoringError(#[from] ColoringError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Error: {0}")]
    Other(String),
}

/// Possible errors when building or querying a graph
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Invalid vertex {vertex}, graph has {vertex_count} vertices")]
    InvalidVertex { vertex: usize, vertex_count: usize },
    #[error("Self loop on vertex {vertex} is not allowed in a simple graph")]
    SelfLoop { vertex: usize },
    #[error("Cannot parse edge on line {line}: {content:?}")]
    ParseError { line: usize, content: String },
}

/// Possible errors from the K4 coloring engine
#[derive(Error, Debug, PartialEq)]
pub enum ColoringError {
    #[error("K4 cells need at least 4 vertices, engine has {vertex_count}")]
    EngineNotApplicable { vertex_count: usize },
    #[error("Edge ({a}, {b}) does not join two distinct vertices")]
    InvalidEdge { a: usize, b: usize },
    #[error("Cell key {key:?} is not four distinct vertices")]
    InvalidCell { key: [usize; 4] },
    #[error("Edge ({a}, {b}) is already colored")]
    EdgeAlreadyColored { a: usize, b: usize },
}

#[macro_export]
macro_rules! graph_error {
    ($variant:ident) => {
        CombsolError::from(GraphError::$variant)
    };
    ($variant:ident { $($field:tt)* }) => {
        CombsolError::from(GraphError::$variant { $($field)* })
    };
}

#[macro_export]
macro_rules! coloring_error {
    ($variant:ident) => {
        CombsolError::from(ColoringError::$variant)
    };
    ($variant:ident { $($field:tt)* }) => {
        CombsolError::from(ColoringError::$variant { $($field)* })
    };
}

#[macro_export]
macro_rules! other_error {
    ($msg:expr) => {
        CombsolError::Other($msg.to_string())
    };
}
