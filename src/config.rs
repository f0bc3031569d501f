use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "navigator.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct NavigatorConfig {
    #[serde(default)]
    pub pathfinding: PathfindingConfig,
    #[serde(default)]
    pub layout: LayoutSourceConfig,
    #[serde(default)]
    pub shopping_list: ShoppingListConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How far a candidate may be from an existing node and still count as that node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupRadius {
    /// Half a grid cell
    HalfCell,
    /// A full grid cell
    FullCell,
}

impl DedupRadius {
    pub fn radius(&self, grid_size: f64) -> f64 {
        match self {
            DedupRadius::HalfCell => grid_size / 2.0,
            DedupRadius::FullCell => grid_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    Manhattan,
    Euclidean,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathfindingConfig {
    #[serde(default = "default_allow_diagonal")]
    pub allow_diagonal: bool,
    #[serde(default = "default_dedup_radius")]
    pub dedup_radius: DedupRadius,
    #[serde(default = "default_heuristic")]
    pub heuristic: Heuristic,
    /// Upper bound on node expansions per search
    #[serde(default = "default_max_expansions")]
    pub max_expansions: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutSourceConfig {
    /// TOML layout file; the built-in reference store when unset
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShoppingListConfig {
    /// JSON shopping list opened by the viewer
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub show_intersections: bool,
    #[serde(default = "default_curve_samples")]
    pub curve_samples: usize,
    #[serde(default = "default_export_path")]
    pub export_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

// Default values
fn default_allow_diagonal() -> bool { true }
fn default_dedup_radius() -> DedupRadius { DedupRadius::HalfCell }
fn default_heuristic() -> Heuristic { Heuristic::Manhattan }
fn default_max_expansions() -> usize { 200_000 }
fn default_window_title() -> String { "Aisle Navigator - Store Map".to_string() }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_scale() -> f32 { 1.0 }
fn default_curve_samples() -> usize { 12 }
fn default_export_path() -> String { "route_plan.json".to_string() }
fn default_log_filter() -> String { "info".to_string() }

impl Default for PathfindingConfig {
    fn default() -> Self {
        Self {
            allow_diagonal: default_allow_diagonal(),
            dedup_radius: default_dedup_radius(),
            heuristic: default_heuristic(),
            max_expansions: default_max_expansions(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            scale: default_scale(),
            show_intersections: false,
            curve_samples: default_curve_samples(),
            export_path: default_export_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            pathfinding: PathfindingConfig::default(),
            layout: LayoutSourceConfig::default(),
            shopping_list: ShoppingListConfig::default(),
            visual: VisualConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl NavigatorConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load configuration from navigator.toml, or use defaults if missing or broken
    pub fn load() -> Self {
        Self::load_or_default(CONFIG_FILE)
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no config file found, using default configuration");
            return NavigatorConfig::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                info!(path = %path.display(), "loaded configuration");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using default configuration");
                NavigatorConfig::default()
            }
        }
    }
}
