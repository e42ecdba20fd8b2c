use serde::{Deserialize, Serialize};

use crate::model::Position;

/// Printed floor plan the overlay image was scanned from. Map units are
/// metres: paper size in millimetres times the drawing scale.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FloorPlan {
    pub width_mm: f64,
    pub height_mm: f64,
    pub scale: f64,
}

impl Default for FloorPlan {
    // A3 landscape at 1:350.
    fn default() -> Self {
        FloorPlan {
            width_mm: 420.0,
            height_mm: 297.0,
            scale: 350.0,
        }
    }
}

impl FloorPlan {
    pub fn width(&self) -> f64 {
        self.width_mm * self.scale / 1000.0
    }

    pub fn height(&self) -> f64 {
        self.height_mm * self.scale / 1000.0
    }

    /// Overlay bounds as `[[0, 0], [height, width]]`.
    pub fn bounds(&self) -> [[f64; 2]; 2] {
        [[0.0, 0.0], [self.height(), self.width()]]
    }

    pub fn contains(&self, p: Position) -> bool {
        p.lat >= 0.0 && p.lat <= self.height() && p.lng >= 0.0 && p.lng <= self.width()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub floor_plan: FloorPlan,
    /// Hit radius used when translating raw canvas coordinates into picks.
    pub pick_tolerance: f64,
    /// Ignore canvas clicks that land outside the floor plan.
    pub restrict_to_plan: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            floor_plan: FloorPlan::default(),
            pick_tolerance: 1.0,
            restrict_to_plan: false,
        }
    }
}
