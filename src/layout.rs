use crate::error::LayoutError;
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub type AisleId = String;

/// Department categories known to the navigator.
/// Declaration order is also the hit-test order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DepartmentName {
    FruitsAndVegetables,
    Bakery,
    DairyAndEggs,
    MeatAndSeafood,
    Beverages,
    FrozenFoods,
    PantryStaples,
    SnacksAndSweets,
    HouseholdEssentials,
}

impl DepartmentName {
    pub const ALL: [DepartmentName; 9] = [
        DepartmentName::FruitsAndVegetables,
        DepartmentName::Bakery,
        DepartmentName::DairyAndEggs,
        DepartmentName::MeatAndSeafood,
        DepartmentName::Beverages,
        DepartmentName::FrozenFoods,
        DepartmentName::PantryStaples,
        DepartmentName::SnacksAndSweets,
        DepartmentName::HouseholdEssentials,
    ];

    /// Identifier as used in layout files and shopping lists
    pub fn key(&self) -> &'static str {
        match self {
            DepartmentName::FruitsAndVegetables => "FruitsAndVegetables",
            DepartmentName::Bakery => "Bakery",
            DepartmentName::DairyAndEggs => "DairyAndEggs",
            DepartmentName::MeatAndSeafood => "MeatAndSeafood",
            DepartmentName::Beverages => "Beverages",
            DepartmentName::FrozenFoods => "FrozenFoods",
            DepartmentName::PantryStaples => "PantryStaples",
            DepartmentName::SnacksAndSweets => "SnacksAndSweets",
            DepartmentName::HouseholdEssentials => "HouseholdEssentials",
        }
    }
}

impl fmt::Display for DepartmentName {
    /// Human-readable name, "FruitsAndVegetables" becomes "Fruits And Vegetables"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for (i, ch) in self.key().chars().enumerate() {
            if i > 0 && ch.is_ascii_uppercase() {
                out.push(' ');
            }
            out.push(ch);
        }
        f.write_str(&out)
    }
}

impl FromStr for DepartmentName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DepartmentName::ALL
            .iter()
            .copied()
            .find(|d| d.key() == s)
            .ok_or_else(|| format!("unknown department: {}", s))
    }
}

/// A merchandise area. Sections are the shelf blocks that block walking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub name: DepartmentName,
    pub bounds: Rect,
    #[serde(default = "default_department_color")]
    pub color: String,
    pub sections: Vec<Rect>,
}

impl Department {
    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    pub fn contains(&self, p: &Point) -> bool {
        self.sections.iter().any(|s| s.contains(p))
    }
}

/// A named corridor segment with declared neighbours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aisle {
    pub id: AisleId,
    #[serde(default)]
    pub label: String,
    pub bounds: Rect,
    #[serde(default)]
    pub connected_to: Vec<AisleId>,
}

/// On-disk form of a store layout, validated into a [`StoreLayout`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFile {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_grid_size")]
    pub grid_size: f64,
    pub entrance: Point,
    #[serde(default)]
    pub walkable_regions: Vec<Rect>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub aisles: Vec<Aisle>,
    #[serde(default = "default_visit_order")]
    pub visit_order: Vec<DepartmentName>,
}

fn default_grid_size() -> f64 { 15.0 }
fn default_department_color() -> String { "#f5f5f5".to_string() }

/// Perishables last: frozen, dairy and meat close the trip
pub fn default_visit_order() -> Vec<DepartmentName> {
    vec![
        DepartmentName::FruitsAndVegetables,
        DepartmentName::Bakery,
        DepartmentName::Beverages,
        DepartmentName::PantryStaples,
        DepartmentName::SnacksAndSweets,
        DepartmentName::HouseholdEssentials,
        DepartmentName::FrozenFoods,
        DepartmentName::DairyAndEggs,
        DepartmentName::MeatAndSeafood,
    ]
}

/// Immutable store description. Only constructible through validation.
#[derive(Debug, Clone)]
pub struct StoreLayout {
    width: f64,
    height: f64,
    grid_size: f64,
    entrance: Point,
    walkable_regions: Vec<Rect>,
    departments: BTreeMap<DepartmentName, Department>,
    aisles: Vec<Aisle>,
    aisle_index: HashMap<AisleId, usize>,
    visit_order: Vec<DepartmentName>,
}

impl StoreLayout {
    /// Validate a layout description
    pub fn new(file: LayoutFile) -> Result<Self, LayoutError> {
        if !(file.width > 0.0 && file.height > 0.0 && file.width.is_finite() && file.height.is_finite()) {
            return Err(LayoutError::InvalidStoreSize { width: file.width, height: file.height });
        }
        if !(file.grid_size > 0.0 && file.grid_size.is_finite()) {
            return Err(LayoutError::InvalidGridSize(file.grid_size));
        }

        for (i, region) in file.walkable_regions.iter().enumerate() {
            if !region.is_well_formed() {
                return Err(LayoutError::MalformedRect(format!("walkable region #{}", i)));
            }
        }

        let mut departments = BTreeMap::new();
        for dept in file.departments {
            if !dept.bounds.is_well_formed() || dept.sections.iter().any(|s| !s.is_well_formed()) {
                return Err(LayoutError::MalformedRect(format!("department {:?}", dept.name)));
            }
            if dept.sections.is_empty() {
                return Err(LayoutError::EmptyDepartment(dept.name));
            }
            if departments.contains_key(&dept.name) {
                return Err(LayoutError::DuplicateDepartment(dept.name));
            }
            departments.insert(dept.name, dept);
        }
        check_section_overlap(&departments)?;

        let mut aisle_index = HashMap::new();
        for (i, aisle) in file.aisles.iter().enumerate() {
            if !aisle.bounds.is_well_formed() {
                return Err(LayoutError::MalformedRect(format!("aisle {}", aisle.id)));
            }
            if aisle_index.insert(aisle.id.clone(), i).is_some() {
                return Err(LayoutError::DuplicateAisle(aisle.id.clone()));
            }
        }
        check_adjacency(&file.aisles, &aisle_index)?;

        let mut seen = HashSet::new();
        for dept in &file.visit_order {
            if !seen.insert(*dept) {
                return Err(LayoutError::DuplicateVisit(*dept));
            }
        }

        Ok(StoreLayout {
            width: file.width,
            height: file.height,
            grid_size: file.grid_size,
            entrance: file.entrance,
            walkable_regions: file.walkable_regions,
            departments,
            aisles: file.aisles,
            aisle_index,
            visit_order: file.visit_order,
        })
    }

    /// Parse and validate a TOML layout
    pub fn from_toml_str(contents: &str) -> Result<Self, LayoutError> {
        let file: LayoutFile = toml::from_str(contents)?;
        Self::new(file)
    }

    /// Load and validate a TOML layout file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LayoutError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// The built-in 900x700 store
    pub fn reference() -> Self {
        match Self::new(reference_layout_file()) {
            Ok(layout) => layout,
            Err(e) => panic!("built-in reference layout is invalid: {}", e),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    pub fn entrance(&self) -> Point {
        self.entrance
    }

    pub fn walkable_regions(&self) -> &[Rect] {
        &self.walkable_regions
    }

    pub fn departments(&self) -> impl Iterator<Item = &Department> {
        self.departments.values()
    }

    pub fn department(&self, name: DepartmentName) -> Option<&Department> {
        self.departments.get(&name)
    }

    pub fn department_center(&self, name: DepartmentName) -> Option<Point> {
        self.departments.get(&name).map(Department::center)
    }

    /// Aisles in declaration order
    pub fn aisles(&self) -> &[Aisle] {
        &self.aisles
    }

    pub fn aisle(&self, id: &str) -> Option<&Aisle> {
        self.aisle_index.get(id).map(|&i| &self.aisles[i])
    }

    pub fn visit_order(&self) -> &[DepartmentName] {
        &self.visit_order
    }

    /// All walkable regions that contain `p`
    pub fn regions_containing(&self, p: &Point) -> Vec<&Rect> {
        self.walkable_regions.iter().filter(|r| r.contains(p)).collect()
    }

    /// Hit-test a store-plane point against department sections
    pub fn department_at(&self, p: &Point) -> Option<DepartmentName> {
        self.departments
            .values()
            .find(|dept| dept.contains(p))
            .map(|dept| dept.name)
    }

    pub fn aisle_adjacency(&self) -> BTreeMap<AisleId, Vec<AisleId>> {
        self.aisles
            .iter()
            .map(|a| (a.id.clone(), a.connected_to.clone()))
            .collect()
    }
}

fn check_section_overlap(departments: &BTreeMap<DepartmentName, Department>) -> Result<(), LayoutError> {
    let depts: Vec<&Department> = departments.values().collect();
    for (i, first) in depts.iter().enumerate() {
        for second in &depts[i + 1..] {
            let clash = first
                .sections
                .iter()
                .any(|a| second.sections.iter().any(|b| a.overlaps_interior(b)));
            if clash {
                return Err(LayoutError::OverlappingSections {
                    first: first.name,
                    second: second.name,
                });
            }
        }
    }
    Ok(())
}

fn check_adjacency(aisles: &[Aisle], index: &HashMap<AisleId, usize>) -> Result<(), LayoutError> {
    for aisle in aisles {
        for target in &aisle.connected_to {
            if *target == aisle.id {
                return Err(LayoutError::SelfConnection(aisle.id.clone()));
            }
            let other = match index.get(target) {
                Some(&i) => &aisles[i],
                None => {
                    return Err(LayoutError::UnknownAisle {
                        aisle: aisle.id.clone(),
                        target: target.clone(),
                    })
                }
            };
            if !other.connected_to.contains(&aisle.id) {
                return Err(LayoutError::AsymmetricAdjacency {
                    from: aisle.id.clone(),
                    to: target.clone(),
                });
            }
        }
    }
    Ok(())
}

fn department(name: DepartmentName, bounds: Rect, color: &str, sections: Vec<Rect>) -> Department {
    Department {
        name,
        bounds,
        color: color.to_string(),
        sections,
    }
}

fn aisle(id: &str, label: &str, bounds: Rect, connected_to: &[&str]) -> Aisle {
    Aisle {
        id: id.to_string(),
        label: label.to_string(),
        bounds,
        connected_to: connected_to.iter().map(|s| s.to_string()).collect(),
    }
}

/// Reference store: three vertical aisles, three cross aisles and an entrance
/// path at the bottom. Departments sit in the blocks between corridors.
pub fn reference_layout_file() -> LayoutFile {
    use DepartmentName::*;

    let r = Rect::new;
    LayoutFile {
        width: 900.0,
        height: 700.0,
        grid_size: 15.0,
        entrance: Point::new(460.0, 620.0),
        walkable_regions: vec![
            r(120.0, 50.0, 60.0, 500.0),  // left aisle
            r(430.0, 50.0, 60.0, 500.0),  // center aisle
            r(740.0, 50.0, 60.0, 500.0),  // right aisle
            r(120.0, 50.0, 680.0, 60.0),  // top cross aisle
            r(120.0, 270.0, 680.0, 60.0), // middle cross aisle
            r(120.0, 490.0, 680.0, 60.0), // bottom cross aisle
            r(430.0, 550.0, 60.0, 80.0),  // entrance path
        ],
        departments: vec![
            department(FruitsAndVegetables, r(500.0, 120.0, 230.0, 140.0), "#e8f5e9",
                vec![r(500.0, 120.0, 110.0, 140.0), r(620.0, 120.0, 110.0, 140.0)]),
            department(Bakery, r(190.0, 120.0, 230.0, 140.0), "#fff3e0",
                vec![r(190.0, 120.0, 110.0, 140.0), r(310.0, 120.0, 110.0, 140.0)]),
            department(DairyAndEggs, r(40.0, 310.0, 70.0, 170.0), "#e3f2fd",
                vec![r(40.0, 310.0, 70.0, 80.0), r(40.0, 400.0, 70.0, 80.0)]),
            department(MeatAndSeafood, r(500.0, 5.0, 230.0, 35.0), "#ffebee",
                vec![r(500.0, 5.0, 110.0, 35.0), r(620.0, 5.0, 110.0, 35.0)]),
            department(Beverages, r(190.0, 5.0, 230.0, 35.0), "#e0f2f1",
                vec![r(190.0, 5.0, 110.0, 35.0), r(310.0, 5.0, 110.0, 35.0)]),
            department(FrozenFoods, r(810.0, 120.0, 50.0, 360.0), "#e8eaf6",
                vec![r(810.0, 120.0, 50.0, 170.0), r(810.0, 300.0, 50.0, 180.0)]),
            department(PantryStaples, r(190.0, 340.0, 230.0, 140.0), "#fff8e1",
                vec![r(190.0, 340.0, 110.0, 140.0), r(310.0, 340.0, 110.0, 140.0)]),
            department(SnacksAndSweets, r(500.0, 340.0, 230.0, 140.0), "#fce4ec",
                vec![r(500.0, 340.0, 110.0, 140.0), r(620.0, 340.0, 110.0, 140.0)]),
            department(HouseholdEssentials, r(40.0, 120.0, 70.0, 170.0), "#f5f5f5",
                vec![r(40.0, 120.0, 70.0, 80.0), r(40.0, 210.0, 70.0, 80.0)]),
        ],
        aisles: vec![
            aisle("A1", "Left Aisle", r(120.0, 50.0, 60.0, 500.0), &["A2", "H1", "H2", "H3"]),
            aisle("A2", "Center Aisle", r(430.0, 50.0, 60.0, 500.0), &["A1", "A3", "H1", "H2", "H3"]),
            aisle("A3", "Right Aisle", r(740.0, 50.0, 60.0, 500.0), &["A2", "H1", "H2", "H3"]),
            aisle("H1", "Top Cross Aisle", r(120.0, 50.0, 680.0, 60.0), &["A1", "A2", "A3"]),
            aisle("H2", "Middle Cross Aisle", r(120.0, 270.0, 680.0, 60.0), &["A1", "A2", "A3"]),
            aisle("H3", "Bottom Cross Aisle", r(120.0, 490.0, 680.0, 60.0), &["A1", "A2", "A3"]),
        ],
        visit_order: default_visit_order(),
    }
}
