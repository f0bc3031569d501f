use aisle_navigator::logging::init_logging;
use aisle_navigator::sequencer::load_shopping_list;
use aisle_navigator::{
    department_status, plan_route, AisleGraph, DepartmentName, DepartmentStatus, LayoutError, LegStatus,
    NavigationSession, NavigatorConfig, Pathfinder, PathfindingConfig, PlanExport, PlanSummary,
    Point, RouteRequest, RouteResponse, ShoppingListItem, StoreLayout,
};
use arboard::Clipboard;
use macroquad::prelude::*;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

const PANEL_WIDTH: f32 = 340.0;
const MARGIN: f32 = 10.0;

fn load_layout(config: &NavigatorConfig) -> Result<StoreLayout, LayoutError> {
    match &config.layout.path {
        Some(path) => StoreLayout::load_from_file(path),
        None => Ok(StoreLayout::reference()),
    }
}

fn demo_list() -> Vec<ShoppingListItem> {
    vec![
        ShoppingListItem::new("1", "Bananas", DepartmentName::FruitsAndVegetables).with_price(1.29),
        ShoppingListItem::new("2", "Whole Milk", DepartmentName::DairyAndEggs).with_price(3.49),
        ShoppingListItem::new("3", "Sourdough Loaf", DepartmentName::Bakery).with_price(4.99),
        ShoppingListItem::new("4", "Frozen Peas", DepartmentName::FrozenFoods).with_price(2.19),
    ]
}

fn initial_list(config: &NavigatorConfig) -> Vec<ShoppingListItem> {
    let Some(path) = &config.shopping_list.path else {
        return demo_list();
    };
    match load_shopping_list(path) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "failed to read shopping list, using demo list");
            demo_list()
        }
    }
}

/// Plan synchronously and print the result
fn run_headless(layout: &StoreLayout, config: &NavigatorConfig) {
    let items = initial_list(config);
    let finder = Pathfinder::new(layout, config.pathfinding.clone());
    let legs = plan_route(&finder, &items, layout.visit_order());

    print!("{}", PlanSummary::new(&items, layout.visit_order()).render_text());
    for leg in &legs {
        let path = match leg.status {
            LegStatus::Routed => leg.route.to_svg_path(),
            LegStatus::AtDestination => "already there".to_string(),
            LegStatus::Unreachable => "no route".to_string(),
        };
        println!("{} -> {}: {}", leg.index + 1, leg.department, path);
    }
}

/// Background planner; requests are answered newest-first
struct Planner {
    requests: Sender<RouteRequest>,
    responses: Receiver<RouteResponse>,
}

impl Planner {
    fn spawn(layout: Arc<StoreLayout>, config: PathfindingConfig) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<RouteRequest>();
        let (response_tx, response_rx) = mpsc::channel();

        thread::spawn(move || {
            let finder = Pathfinder::new(&layout, config);
            while let Ok(mut request) = request_rx.recv() {
                // Only the latest queued request matters
                while let Ok(newer) = request_rx.try_recv() {
                    request = newer;
                }
                if response_tx.send(request.execute(&finder)).is_err() {
                    break;
                }
            }
        });

        Planner {
            requests: request_tx,
            responses: response_rx,
        }
    }
}

/// Visualization state
struct ViewerState {
    layout: Arc<StoreLayout>,
    intersections: Vec<Point>,
    config: NavigatorConfig,
    items: Vec<ShoppingListItem>,
    selected: Option<DepartmentName>,
    session: NavigationSession,
    planner: Planner,
    next_item_id: usize,
    message: String,
}

impl ViewerState {
    fn new(layout: StoreLayout, config: NavigatorConfig) -> Self {
        let intersections = AisleGraph::new(&layout).intersections().to_vec();
        let layout = Arc::new(layout);
        let planner = Planner::spawn(Arc::clone(&layout), config.pathfinding.clone());
        let items = initial_list(&config);

        let mut state = ViewerState {
            layout,
            intersections,
            next_item_id: items.len() + 1,
            items,
            config,
            selected: None,
            session: NavigationSession::new(),
            planner,
            message: String::new(),
        };
        state.replan();
        state
    }

    fn replan(&mut self) {
        let request = self.session.request(&self.items, self.session.target());
        if self.planner.requests.send(request).is_err() {
            self.message = "Planner stopped".to_string();
        }
    }

    fn poll(&mut self) {
        while let Ok(response) = self.planner.responses.try_recv() {
            self.session.accept(response);
        }
    }

    fn scale(&self) -> f32 {
        let fit_x = (screen_width() - PANEL_WIDTH - 2.0 * MARGIN) / self.layout.width() as f32;
        let fit_y = (screen_height() - 2.0 * MARGIN) / self.layout.height() as f32;
        fit_x.min(fit_y).max(0.1)
    }

    fn to_screen(&self, p: &Point) -> (f32, f32) {
        let s = self.scale();
        (MARGIN + p.x as f32 * s, MARGIN + p.y as f32 * s)
    }

    fn to_store(&self, x: f32, y: f32) -> Point {
        let s = self.scale();
        Point::new(((x - MARGIN) / s) as f64, ((y - MARGIN) / s) as f64)
    }

    fn handle_click(&mut self, mouse_x: f32, mouse_y: f32) {
        let Some(dept) = self.layout.department_at(&self.to_store(mouse_x, mouse_y)) else {
            return;
        };

        // Left click: add an item from the department
        if is_mouse_button_pressed(MouseButton::Left) {
            let id = self.next_item_id.to_string();
            self.items.push(ShoppingListItem::new(&id, &format!("{} item {}", dept, id), dept));
            self.next_item_id += 1;
            self.selected = Some(dept);
            self.message = format!("Added item from {}", dept);
            self.replan();
        }
        // Right click: navigate to the department
        else if is_mouse_button_pressed(MouseButton::Right) {
            self.session.set_target(Some(dept));
            self.message = format!("Navigating to {}", dept);
            self.replan();
        }
    }

    fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
        self.session.clear();
        self.message = "Shopping list cleared".to_string();
        self.replan();
    }

    fn copy_to_clipboard(&mut self) {
        let Some(leg) = self.session.active_leg() else {
            self.message = "No route to copy".to_string();
            return;
        };
        let svg = leg.route.to_svg_path();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&svg) {
                    self.message = format!("Failed to copy to clipboard: {}", e);
                } else {
                    self.message = "Route copied to clipboard".to_string();
                    // Keep clipboard alive for a moment to ensure clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                self.message = format!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn export(&mut self) {
        let path = &self.config.visual.export_path;
        self.message = match PlanExport::from_legs(self.session.legs()).save_to_file(path) {
            Ok(()) => format!("Plan exported to {}", path),
            Err(e) => format!("Export failed: {}", e),
        };
    }

    fn department_color(&self, name: DepartmentName, base: &str) -> Color {
        match department_status(name, &self.items, self.selected, self.session.target()) {
            DepartmentStatus::Selected => Color::from_rgba(255, 213, 79, 255),
            DepartmentStatus::HasItems => Color::from_rgba(129, 199, 132, 255),
            DepartmentStatus::NavigationTarget => Color::from_rgba(100, 181, 246, 255),
            DepartmentStatus::Idle => parse_hex(base).unwrap_or(LIGHTGRAY),
        }
    }

    fn draw(&self) {
        let visual = &self.config.visual;
        clear_background(Color::from_rgba(visual.background_r, visual.background_g, visual.background_b, 255));
        let s = self.scale();

        for region in self.layout.walkable_regions() {
            let (x, y) = self.to_screen(&Point::new(region.x, region.y));
            draw_rectangle(x, y, region.width as f32 * s, region.height as f32 * s, Color::from_rgba(70, 70, 70, 255));
        }

        for dept in self.layout.departments() {
            let color = self.department_color(dept.name, &dept.color);
            for section in &dept.sections {
                let (x, y) = self.to_screen(&Point::new(section.x, section.y));
                draw_rectangle(x, y, section.width as f32 * s, section.height as f32 * s, color);
            }
            let (x, y) = self.to_screen(&Point::new(dept.bounds.x, dept.bounds.y));
            draw_rectangle_lines(x, y, dept.bounds.width as f32 * s, dept.bounds.height as f32 * s, 1.0, DARKGRAY);

            let label = dept.name.to_string();
            let (cx, cy) = self.to_screen(&dept.center());
            let size = measure_text(&label, None, 14, 1.0);
            draw_text(&label, cx - size.width / 2.0, cy, 14.0, BLACK);
        }

        if visual.show_intersections {
            for junction in &self.intersections {
                let (x, y) = self.to_screen(junction);
                draw_circle(x, y, 3.0, ORANGE);
            }
        }

        let active = self.session.active_leg().map(|leg| leg.index);
        for leg in self.session.legs() {
            let (color, thickness) = if Some(leg.index) == active {
                (Color::from_rgba(229, 57, 53, 255), 3.0)
            } else {
                (Color::from_rgba(229, 57, 53, 90), 2.0)
            };
            let points = leg.route.flatten(visual.curve_samples);
            for pair in points.windows(2) {
                let (x1, y1) = self.to_screen(&pair[0]);
                let (x2, y2) = self.to_screen(&pair[1]);
                draw_line(x1, y1, x2, y2, thickness, color);
            }
        }

        let (ex, ey) = self.to_screen(&self.layout.entrance());
        draw_circle(ex, ey, 6.0, GREEN);

        self.draw_panel();
    }

    fn draw_panel(&self) {
        let x = screen_width() - PANEL_WIDTH + MARGIN;
        let mut y = 24.0;
        let mut line = |text: &str, color: Color| {
            draw_text(text, x, y, 18.0, color);
            y += 20.0;
        };

        let summary = PlanSummary::new(&self.items, self.layout.visit_order());
        for text in summary.render_text().lines() {
            line(text, WHITE);
        }
        if self.session.is_pending() {
            line("Planning...", YELLOW);
        }
        line("", WHITE);
        for text in [
            "Left click: add item from department",
            "Right click: navigate to department",
            "C: copy route SVG to clipboard",
            "S: export plan",
            "Backspace: clear list",
            "Esc: close window",
        ] {
            line(text, GRAY);
        }
        if !self.message.is_empty() {
            line("", WHITE);
            line(&self.message, SKYBLUE);
        }
    }
}

/// Parse `#rrggbb`
fn parse_hex(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::from_rgba(channel(0)?, channel(2)?, channel(4)?, 255))
}

fn window_conf() -> Conf {
    let visual = NavigatorConfig::load().visual;
    Conf {
        window_title: visual.window_title,
        window_width: (900.0 * visual.scale + PANEL_WIDTH) as i32,
        window_height: (700.0 * visual.scale) as i32,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = NavigatorConfig::load();
    init_logging(&config.logging);

    let layout = match load_layout(&config) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("Invalid store layout: {}", e);
            return;
        }
    };

    // Check command line arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--plan" {
        run_headless(&layout, &config);
        return;
    }

    let mut state = ViewerState::new(layout, config);

    loop {
        state.poll();

        // Handle input
        if is_mouse_button_pressed(MouseButton::Left) || is_mouse_button_pressed(MouseButton::Right) {
            let (mouse_x, mouse_y) = mouse_position();
            state.handle_click(mouse_x, mouse_y);
        }

        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }

        if is_key_pressed(KeyCode::S) {
            state.export();
        }

        if is_key_pressed(KeyCode::Backspace) {
            state.clear();
        }

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.draw();

        next_frame().await
    }
}
