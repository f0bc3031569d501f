mod common;

use aisle_navigator::config::{NavigatorConfig, CONFIG_FILE};
use aisle_navigator::{AisleGraph, DedupRadius, DepartmentName, Heuristic, LayoutError, Point, StoreLayout};
use common::two_corridors;
use std::fs;

const CORRIDOR_HEADER: &str = r#"
width = 200.0
height = 200.0
entrance = { x = 20.0, y = 190.0 }
walkable_regions = [{ x = 0.0, y = 0.0, width = 40.0, height = 200.0 }]
"#;

#[test]
fn test_load_two_corridors() {
    let layout = two_corridors();
    assert_eq!(layout.grid_size(), 15.0);
    assert_eq!(layout.aisles().len(), 3);
    assert_eq!(layout.visit_order(), &[DepartmentName::Bakery, DepartmentName::DairyAndEggs]);
    assert_eq!(layout.department(DepartmentName::Bakery).unwrap().color, "#fff3e0");

    let graph = AisleGraph::new(&layout);
    assert_eq!(graph.intersections(), &[Point::new(20.0, 150.0), Point::new(180.0, 150.0)]);
    assert_eq!(graph.nearest_aisle_point(&layout.entrance()), Point::new(20.0, 300.0));
}

#[test]
fn test_layout_defaults() {
    let layout = StoreLayout::from_toml_str(CORRIDOR_HEADER).unwrap();
    assert_eq!(layout.grid_size(), 15.0);
    assert_eq!(layout.visit_order().len(), DepartmentName::ALL.len());
    assert_eq!(layout.visit_order()[0], DepartmentName::FruitsAndVegetables);
    assert!(layout.aisles().is_empty());
}

#[test]
fn test_unknown_aisle_in_file() {
    let toml = format!(
        "{}\n[[aisles]]\nid = \"A\"\nbounds = {{ x = 0.0, y = 0.0, width = 40.0, height = 200.0 }}\nconnected_to = [\"B\"]\n",
        CORRIDOR_HEADER
    );
    match StoreLayout::from_toml_str(&toml) {
        Err(LayoutError::UnknownAisle { aisle, target }) => {
            assert_eq!(aisle, "A");
            assert_eq!(target, "B");
        }
        other => panic!("expected UnknownAisle, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_self_connection_in_file() {
    let toml = format!(
        "{}\n[[aisles]]\nid = \"A\"\nbounds = {{ x = 0.0, y = 0.0, width = 40.0, height = 200.0 }}\nconnected_to = [\"A\"]\n",
        CORRIDOR_HEADER
    );
    assert!(matches!(StoreLayout::from_toml_str(&toml), Err(LayoutError::SelfConnection(_))));
}

#[test]
fn test_invalid_sizes() {
    let toml = CORRIDOR_HEADER.replace("width = 200.0", "width = 0.0");
    assert!(matches!(StoreLayout::from_toml_str(&toml), Err(LayoutError::InvalidStoreSize { .. })));

    let toml = format!("grid_size = -1.0\n{}", CORRIDOR_HEADER);
    assert!(matches!(StoreLayout::from_toml_str(&toml), Err(LayoutError::InvalidGridSize(_))));
}

#[test]
fn test_duplicate_visit_order() {
    let toml = format!("visit_order = [\"Bakery\", \"Bakery\"]\n{}", CORRIDOR_HEADER);
    assert!(matches!(
        StoreLayout::from_toml_str(&toml),
        Err(LayoutError::DuplicateVisit(DepartmentName::Bakery))
    ));
}

#[test]
fn test_unknown_department_name_is_parse_error() {
    let toml = format!(
        "{}\n[[departments]]\nname = \"Garden\"\nbounds = {{ x = 50.0, y = 0.0, width = 40.0, height = 40.0 }}\nsections = [{{ x = 50.0, y = 0.0, width = 40.0, height = 40.0 }}]\n",
        CORRIDOR_HEADER
    );
    assert!(matches!(StoreLayout::from_toml_str(&toml), Err(LayoutError::Parse(_))));
}

#[test]
fn test_duplicate_department_in_file() {
    let bakery = |x: f64| {
        format!(
            "\n[[departments]]\nname = \"Bakery\"\nbounds = {{ x = {x}, y = 0.0, width = 20.0, height = 20.0 }}\nsections = [{{ x = {x}, y = 0.0, width = 20.0, height = 20.0 }}]\n"
        )
    };
    let toml = format!("{}{}{}", CORRIDOR_HEADER, bakery(50.0), bakery(100.0));
    assert!(matches!(
        StoreLayout::from_toml_str(&toml),
        Err(LayoutError::DuplicateDepartment(DepartmentName::Bakery))
    ));
}

#[test]
fn test_department_without_sections() {
    let toml = format!(
        "{}\n[[departments]]\nname = \"Beverages\"\nbounds = {{ x = 50.0, y = 0.0, width = 40.0, height = 40.0 }}\nsections = []\n",
        CORRIDOR_HEADER
    );
    assert!(matches!(
        StoreLayout::from_toml_str(&toml),
        Err(LayoutError::EmptyDepartment(DepartmentName::Beverages))
    ));
}

#[test]
fn test_duplicate_aisle_in_file() {
    let aisle = "\n[[aisles]]\nid = \"A\"\nbounds = { x = 0.0, y = 0.0, width = 40.0, height = 200.0 }\n";
    let toml = format!("{}{}{}", CORRIDOR_HEADER, aisle, aisle);
    match StoreLayout::from_toml_str(&toml) {
        Err(LayoutError::DuplicateAisle(id)) => assert_eq!(id, "A"),
        other => panic!("expected DuplicateAisle, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_malformed_rectangles() {
    let negative = CORRIDOR_HEADER.replace("height = 200.0 }", "height = -10.0 }");
    assert!(matches!(StoreLayout::from_toml_str(&negative), Err(LayoutError::MalformedRect(_))));

    let toml = format!(
        "{}\n[[aisles]]\nid = \"A\"\nbounds = {{ x = 0.0, y = 0.0, width = inf, height = 200.0 }}\n",
        CORRIDOR_HEADER
    );
    assert!(matches!(StoreLayout::from_toml_str(&toml), Err(LayoutError::MalformedRect(_))));
}

#[test]
fn test_regions_containing_at_junction() {
    let layout = StoreLayout::reference();
    // Left aisle crossing the middle cross aisle
    let regions = layout.regions_containing(&Point::new(150.0, 300.0));
    assert_eq!(regions.len(), 2);
    assert!(regions.iter().all(|r| r.contains(&Point::new(150.0, 300.0))));

    assert_eq!(layout.regions_containing(&Point::new(150.0, 200.0)).len(), 1);
    assert!(layout.regions_containing(&Point::new(300.0, 200.0)).is_empty());
}

#[test]
fn test_missing_layout_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = StoreLayout::load_from_file(dir.path().join("nope.toml"));
    assert!(matches!(result, Err(LayoutError::Io(_))));
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(
        &path,
        r#"
[pathfinding]
allow_diagonal = false
dedup_radius = "full_cell"
heuristic = "euclidean"

[layout]
path = "test_data/two_corridors.toml"

[logging]
filter = "aisle_navigator=debug"
"#,
    )
    .unwrap();

    let config = NavigatorConfig::from_file(&path).unwrap();
    assert!(!config.pathfinding.allow_diagonal);
    assert_eq!(config.pathfinding.dedup_radius, DedupRadius::FullCell);
    assert_eq!(config.pathfinding.heuristic, Heuristic::Euclidean);
    assert_eq!(config.pathfinding.max_expansions, 200_000);
    assert_eq!(config.layout.path.as_deref(), Some("test_data/two_corridors.toml"));
    assert_eq!(config.logging.filter, "aisle_navigator=debug");
    assert_eq!(config.visual.curve_samples, 12);
}

#[test]
fn test_broken_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "[pathfinding\nallow_diagonal = ").unwrap();

    assert!(NavigatorConfig::from_file(&path).is_err());
    let config = NavigatorConfig::load_or_default(&path);
    assert!(config.pathfinding.allow_diagonal);
    assert_eq!(config.pathfinding.dedup_radius, DedupRadius::HalfCell);

    let missing = NavigatorConfig::load_or_default(dir.path().join("missing.toml"));
    assert_eq!(missing.visual.export_path, "route_plan.json");
}
