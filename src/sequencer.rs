use crate::error::ShoppingListError;
use crate::geometry::Point;
use crate::layout::DepartmentName;
use crate::pathfinding::Pathfinder;
use crate::route::Route;
use crate::smoothing;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// An entry of the caller's shopping list. Only `category` affects routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: String,
    pub name: String,
    pub category: DepartmentName,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 { 1 }

impl ShoppingListItem {
    pub fn new(id: &str, name: &str, category: DepartmentName) -> Self {
        ShoppingListItem {
            id: id.to_string(),
            name: name.to_string(),
            category,
            price: 0.0,
            quantity: 1,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }
}

/// Read a JSON array of shopping-list items
pub fn load_shopping_list<P: AsRef<Path>>(path: P) -> Result<Vec<ShoppingListItem>, ShoppingListError> {
    let contents = fs::read_to_string(path)?;
    let items: Vec<ShoppingListItem> = serde_json::from_str(&contents)?;
    Ok(items)
}

/// Outcome of routing one leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegStatus {
    Routed,
    /// The walk already stands at the department; the route is empty
    AtDestination,
    /// No path, or the department is not in the layout; the route is empty
    Unreachable,
}

/// One point-to-point piece of a shopping trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub index: usize,
    pub department: DepartmentName,
    pub from: Point,
    pub to: Point,
    pub route: Route,
    pub status: LegStatus,
}

impl Leg {
    pub fn is_missing(&self) -> bool {
        self.status == LegStatus::Unreachable
    }
}

/// Group items by department, keeping list order inside each group
pub fn group_by_department(items: &[ShoppingListItem]) -> BTreeMap<DepartmentName, Vec<&ShoppingListItem>> {
    let mut groups: BTreeMap<DepartmentName, Vec<&ShoppingListItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.category).or_default().push(item);
    }
    groups
}

/// Departments of `visit_order` that have at least one item, in visit order
pub fn departments_to_visit(items: &[ShoppingListItem], visit_order: &[DepartmentName]) -> Vec<DepartmentName> {
    let groups = group_by_department(items);
    visit_order
        .iter()
        .copied()
        .filter(|dept| groups.contains_key(dept))
        .collect()
}

/// Plan a trip from the entrance through every department on the list.
///
/// A leg that cannot be routed keeps its place with an empty route so the
/// other legs stay usable.
pub fn plan_route(
    pathfinder: &Pathfinder,
    items: &[ShoppingListItem],
    visit_order: &[DepartmentName],
) -> Vec<Leg> {
    let layout = pathfinder.layout();
    let departments = departments_to_visit(items, visit_order);

    let mut legs = Vec::with_capacity(departments.len());
    let mut current = layout.entrance();

    for (index, dept) in departments.into_iter().enumerate() {
        let Some(target) = layout.department_center(dept) else {
            warn!(department = %dept, "department is not part of the store layout");
            legs.push(Leg {
                index,
                department: dept,
                from: current,
                to: current,
                route: Route::empty(),
                status: LegStatus::Unreachable,
            });
            continue;
        };

        let (route, status) = match pathfinder.find_raw_path(current, target) {
            Some(path) => {
                let route = smoothing::smooth(&path, layout);
                if route.is_empty() {
                    debug!(department = %dept, "leg starts at its department");
                    (route, LegStatus::AtDestination)
                } else {
                    debug!(department = %dept, waypoints = route.waypoints().len(), "leg planned");
                    (route, LegStatus::Routed)
                }
            }
            None => {
                warn!(department = %dept, "no route found for leg {}", index);
                (Route::empty(), LegStatus::Unreachable)
            }
        };

        legs.push(Leg {
            index,
            department: dept,
            from: current,
            to: target,
            route,
            status,
        });
        current = target;
    }

    legs
}
