pub mod aisle_graph;
pub mod config;
pub mod directions;
pub mod error;
pub mod export;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod pathfinding;
pub mod route;
pub mod sequencer;
pub mod session;
pub mod smoothing;
pub mod walkability;

pub use aisle_graph::AisleGraph;
pub use config::{DedupRadius, Heuristic, NavigatorConfig, PathfindingConfig};
pub use directions::{department_status, DepartmentStatus, PlanSummary};
pub use error::{ConfigError, ExportError, LayoutError, ShoppingListError};
pub use export::PlanExport;
pub use geometry::{Point, Rect};
pub use layout::{Aisle, AisleId, Department, DepartmentName, LayoutFile, StoreLayout};
pub use pathfinding::Pathfinder;
pub use route::{PathSegment, Route};
pub use sequencer::{plan_route, Leg, LegStatus, ShoppingListItem};
pub use session::{NavigationSession, RouteRequest, RouteResponse};
