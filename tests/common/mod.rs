#![allow(dead_code)]

use aisle_navigator::{DepartmentName, Point, ShoppingListItem, StoreLayout};
use std::path::Path;

pub fn load_layout(name: &str) -> StoreLayout {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data").join(name);
    StoreLayout::load_from_file(&path)
        .unwrap_or_else(|e| panic!("failed to load {}: {}", path.display(), e))
}

/// Left and right corridor joined by a single cross aisle at y 130..170
pub fn two_corridors() -> StoreLayout {
    load_layout("two_corridors.toml")
}

/// Same corridors without the cross aisle
pub fn disconnected() -> StoreLayout {
    load_layout("disconnected.toml")
}

pub fn item(id: &str, name: &str, category: DepartmentName) -> ShoppingListItem {
    ShoppingListItem::new(id, name, category)
}

pub fn items(categories: &[DepartmentName]) -> Vec<ShoppingListItem> {
    categories
        .iter()
        .enumerate()
        .map(|(i, c)| item(&i.to_string(), &format!("{} item", c), *c))
        .collect()
}

/// ASCII map of the layout at grid resolution with the path drawn on top.
///
/// `S`/`E` start and end, `*` path, `#` shelving, `.` walkable, blank otherwise.
pub fn visualize(layout: &StoreLayout, path: &[Point]) -> String {
    let grid = layout.grid_size();
    let cols = (layout.width() / grid).ceil() as i64;
    let rows = (layout.height() / grid).ceil() as i64;
    let half = grid / 2.0;
    let cell_of = |p: &Point| ((p.x / grid).floor() as i64, (p.y / grid).floor() as i64);

    let mut result = String::new();
    for row in 0..rows {
        for col in 0..cols {
            let center = Point::new(col as f64 * grid + half, row as f64 * grid + half);
            let here = (col, row);
            let symbol = if path.first().map(cell_of) == Some(here) {
                'S'
            } else if path.last().map(cell_of) == Some(here) {
                'E'
            } else if path.iter().any(|p| cell_of(p) == here) {
                '*'
            } else if layout.is_inside_department_interior(&center) {
                '#'
            } else if layout.is_walkable(&center) {
                '.'
            } else {
                ' '
            };
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}
