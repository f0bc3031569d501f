use crate::layout::{AisleId, DepartmentName};
use thiserror::Error;

/// Configuration-time problems with a store layout
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse layout file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("store size must be positive, got {width}x{height}")]
    InvalidStoreSize { width: f64, height: f64 },
    #[error("grid size must be positive, got {0}")]
    InvalidGridSize(f64),
    #[error("malformed rectangle in {0}")]
    MalformedRect(String),
    #[error("department {0:?} is defined more than once")]
    DuplicateDepartment(DepartmentName),
    #[error("department {0:?} has no sections")]
    EmptyDepartment(DepartmentName),
    #[error("sections of {first:?} and {second:?} overlap")]
    OverlappingSections {
        first: DepartmentName,
        second: DepartmentName,
    },
    #[error("aisle {0} is defined more than once")]
    DuplicateAisle(AisleId),
    #[error("aisle {aisle} is connected to unknown aisle {target}")]
    UnknownAisle { aisle: AisleId, target: AisleId },
    #[error("aisle {0} is connected to itself")]
    SelfConnection(AisleId),
    #[error("aisle {from} lists {to} but {to} does not list {from}")]
    AsymmetricAdjacency { from: AisleId, to: AisleId },
    #[error("department {0:?} appears more than once in the visit order")]
    DuplicateVisit(DepartmentName),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to access export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode plan: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ShoppingListError {
    #[error("failed to read shopping list: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse shopping list: {0}")]
    Json(#[from] serde_json::Error),
}
