mod common;

use aisle_navigator::sequencer::load_shopping_list;
use aisle_navigator::{
    plan_route, DepartmentName, Pathfinder, PlanExport, PlanSummary, Point, ShoppingListError, StoreLayout,
};
use common::{disconnected, item, items, two_corridors};
use DepartmentName::*;

#[test]
fn test_legs_follow_visit_order() {
    let layout = StoreLayout::reference();
    let finder = Pathfinder::with_defaults(&layout);
    let list = items(&[MeatAndSeafood, DairyAndEggs, Bakery, FruitsAndVegetables, Bakery]);

    let legs = plan_route(&finder, &list, layout.visit_order());
    let order: Vec<DepartmentName> = legs.iter().map(|l| l.department).collect();
    assert_eq!(order, vec![FruitsAndVegetables, Bakery, DairyAndEggs, MeatAndSeafood]);

    for (i, leg) in legs.iter().enumerate() {
        assert_eq!(leg.index, i);
        assert!(!leg.is_missing(), "leg to {} has no route", leg.department);
    }
    // Each leg picks up where the previous one ended
    assert_eq!(legs[0].from, layout.entrance());
    for pair in legs.windows(2) {
        assert_eq!(pair[1].from, pair[0].to);
    }
}

#[test]
fn test_plan_is_idempotent() {
    let layout = StoreLayout::reference();
    let finder = Pathfinder::with_defaults(&layout);
    let list = items(&[SnacksAndSweets, Beverages, FrozenFoods]);

    let first = plan_route(&finder, &list, layout.visit_order());
    let second = plan_route(&finder, &list, layout.visit_order());
    assert_eq!(first, second);
}

#[test]
fn test_empty_list_has_no_legs() {
    let layout = StoreLayout::reference();
    let finder = Pathfinder::with_defaults(&layout);
    assert!(plan_route(&finder, &[], layout.visit_order()).is_empty());
}

#[test]
fn test_single_item_single_leg() {
    let layout = two_corridors();
    let finder = Pathfinder::with_defaults(&layout);
    let legs = plan_route(&finder, &[item("1", "Rye bread", Bakery)], layout.visit_order());

    assert_eq!(legs.len(), 1);
    assert_eq!(legs[0].from, Point::new(20.0, 290.0));
    assert_eq!(legs[0].to, Point::new(235.0, 40.0));
    assert_eq!(legs[0].route.start(), Some(Point::new(20.0, 300.0)));
    let end = legs[0].route.end().unwrap();
    assert!((end.x - 200.0).abs() <= 15.0 && (end.y - 40.0).abs() <= 15.0);
}

#[test]
fn test_unreachable_leg_is_kept() {
    let layout = disconnected();
    let finder = Pathfinder::with_defaults(&layout);
    let legs = plan_route(&finder, &[item("1", "Rye bread", Bakery)], layout.visit_order());

    assert_eq!(legs.len(), 1);
    assert!(legs[0].is_missing());
    assert_eq!(legs[0].department, Bakery);
}

#[test]
fn test_department_missing_from_layout() {
    let layout = two_corridors();
    let finder = Pathfinder::with_defaults(&layout);
    let list = items(&[Bakery, Beverages]);

    // Beverages is in the visit order but the store has no such department
    let visit_order = [Bakery, Beverages];
    let legs = plan_route(&finder, &list, &visit_order);
    assert_eq!(legs.len(), 2);
    assert!(!legs[0].is_missing());
    assert!(legs[1].is_missing());
    assert_eq!(legs[1].from, legs[0].to);
}

#[test]
fn test_shopping_list_file_plan() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data/shopping_list.json");
    let list = load_shopping_list(&path).unwrap();
    assert_eq!(list.len(), 3);

    let layout = two_corridors();
    let finder = Pathfinder::with_defaults(&layout);
    let legs = plan_route(&finder, &list, layout.visit_order());
    assert_eq!(legs.iter().map(|l| l.department).collect::<Vec<_>>(), vec![Bakery, DairyAndEggs]);
    assert!(legs.iter().all(|l| !l.is_missing()));

    let summary = PlanSummary::new(&list, layout.visit_order());
    assert_eq!(summary.stops.len(), 2);
    assert_eq!(summary.stops[1].items, vec!["Whole Milk", "Free Range Eggs"]);
    assert!((summary.estimated_total - (3.49 + 4.99 + 2.0 * 5.25)).abs() < 1e-9);
}

#[test]
fn test_export_round_trip() {
    let layout = two_corridors();
    let finder = Pathfinder::with_defaults(&layout);
    let legs = plan_route(&finder, &items(&[Bakery, DairyAndEggs]), layout.visit_order());
    let export = PlanExport::from_legs(&legs);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.json");
    export.save_to_file(&path).unwrap();
    let loaded = PlanExport::load_from_file(&path).unwrap();

    assert_eq!(loaded, export);
    assert!(loaded.legs[0].svg_path.starts_with("M 20,300"));
}

#[test]
fn test_shopping_list_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_shopping_list(dir.path().join("missing.json")),
        Err(ShoppingListError::Io(_))
    ));

    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"[{ "id": "1", "name": "Kale", "category": "Garden" }]"#).unwrap();
    assert!(matches!(load_shopping_list(&path), Err(ShoppingListError::Json(_))));
}
