//! Headless trip planner
//!
//! Reads a JSON shopping list, plans the trip through the store and prints
//! the walkthrough plus one SVG path per leg.

use aisle_navigator::logging::init_logging;
use aisle_navigator::sequencer::load_shopping_list;
use aisle_navigator::{plan_route, LegStatus, NavigatorConfig, Pathfinder, PlanSummary, StoreLayout};
use std::env;
use std::process;
use tracing::info;

fn main() {
    let config = NavigatorConfig::load();
    init_logging(&config.logging);

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <shopping_list.json> [layout.toml]", args[0]);
        eprintln!("Plans a shopping trip and prints each leg as an SVG path");
        process::exit(1);
    }

    let items = match load_shopping_list(&args[1]) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("Failed to read shopping list {}: {}", args[1], e);
            process::exit(1);
        }
    };

    let layout_path = args.get(2).cloned().or_else(|| config.layout.path.clone());
    let layout = match &layout_path {
        Some(path) => match StoreLayout::load_from_file(path) {
            Ok(layout) => layout,
            Err(e) => {
                eprintln!("Invalid layout {}: {}", path, e);
                process::exit(1);
            }
        },
        None => StoreLayout::reference(),
    };
    info!(items = items.len(), layout = layout_path.as_deref().unwrap_or("reference"), "planning trip");

    let finder = Pathfinder::new(&layout, config.pathfinding.clone());
    let legs = plan_route(&finder, &items, layout.visit_order());
    let summary = PlanSummary::new(&items, layout.visit_order());

    print!("{}", summary.render_text());
    println!();
    for leg in &legs {
        match leg.status {
            LegStatus::Routed => println!(
                "Leg {} -> {} ({:.0} units): {}",
                leg.index + 1,
                leg.department,
                leg.route.length(),
                leg.route.to_svg_path()
            ),
            LegStatus::AtDestination => println!("Leg {} -> {}: already there", leg.index + 1, leg.department),
            LegStatus::Unreachable => println!("Leg {} -> {}: no route", leg.index + 1, leg.department),
        }
    }
}
