use crate::error::ExportError;
use crate::geometry::Point;
use crate::layout::DepartmentName;
use crate::sequencer::{Leg, LegStatus};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Planned trip as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanExport {
    pub legs: Vec<LegExport>,
}

/// Drawable data for one leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegExport {
    pub index: usize,
    pub department: DepartmentName,
    pub from: Point,
    pub to: Point,
    pub status: LegStatus,
    pub waypoints: Vec<Point>,
    /// Empty when the leg has no route
    pub svg_path: String,
}

impl PlanExport {
    pub fn from_legs(legs: &[Leg]) -> Self {
        PlanExport {
            legs: legs
                .iter()
                .map(|leg| LegExport {
                    index: leg.index,
                    department: leg.department,
                    from: leg.from,
                    to: leg.to,
                    status: leg.status,
                    waypoints: leg.route.waypoints().to_vec(),
                    svg_path: leg.route.to_svg_path(),
                })
                .collect(),
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
