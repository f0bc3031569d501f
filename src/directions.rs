use crate::layout::DepartmentName;
use crate::sequencer::{group_by_department, ShoppingListItem};
use serde::Serialize;

/// How a department should be highlighted on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DepartmentStatus {
    Selected,
    HasItems,
    NavigationTarget,
    Idle,
}

/// Highlight state, checked in priority order: selected, has items, navigation target
pub fn department_status(
    name: DepartmentName,
    items: &[ShoppingListItem],
    selected: Option<DepartmentName>,
    target: Option<DepartmentName>,
) -> DepartmentStatus {
    if selected == Some(name) {
        DepartmentStatus::Selected
    } else if items.iter().any(|item| item.category == name) {
        DepartmentStatus::HasItems
    } else if target == Some(name) {
        DepartmentStatus::NavigationTarget
    } else {
        DepartmentStatus::Idle
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Stop {
    pub department: DepartmentName,
    pub items: Vec<String>,
    pub subtotal: f64,
}

/// Walkthrough of a shopping trip in visit order
#[derive(Debug, Clone, Serialize)]
pub struct PlanSummary {
    pub stops: Vec<Stop>,
    pub total_items: usize,
    pub estimated_total: f64,
    pub estimated_minutes: u32,
}

impl PlanSummary {
    pub fn new(items: &[ShoppingListItem], visit_order: &[DepartmentName]) -> Self {
        let groups = group_by_department(items);
        let stops: Vec<Stop> = visit_order
            .iter()
            .filter_map(|dept| {
                let group = groups.get(dept)?;
                Some(Stop {
                    department: *dept,
                    items: group.iter().map(|item| item.name.clone()).collect(),
                    subtotal: group.iter().map(|item| item.price * item.quantity as f64).sum(),
                })
            })
            .collect();

        // Items outside the visit order are never walked to
        let total_items: usize = stops.iter().map(|s| s.items.len()).sum();
        PlanSummary {
            estimated_total: stops.iter().map(|s| s.subtotal).sum(),
            total_items,
            estimated_minutes: (total_items as u32 * 2).max(10),
            stops,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn render_text(&self) -> String {
        if self.is_empty() {
            return "Your shopping list is empty. Add items to get directions!\n".to_string();
        }

        let mut out = String::from("Start at the main entrance.\n\n");
        for (i, stop) in self.stops.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, stop.department));
            for item in &stop.items {
                out.push_str(&format!("   - {}\n", item));
            }
            out.push_str(&format!("   subtotal: ${:.2}\n", stop.subtotal));
        }
        out.push_str(&format!(
            "\nTotal items: {}\nEstimated total: ${:.2}\nEstimated shopping time: {} minutes\n",
            self.total_items, self.estimated_total, self.estimated_minutes
        ));
        out
    }
}
