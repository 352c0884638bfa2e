//! Production unit ("block") characteristics

use serde::{Deserialize, Serialize};

fn default_category() -> String {
    "ore".to_string()
}

/// A discrete volume of material costed as a unit
///
/// Supplied per call; the engine never retains blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Unique block identifier
    pub id: String,

    /// Cost category used for margin and volume-discount lookups
    #[serde(default = "default_category")]
    pub category: String,

    /// Depth below surface in meters
    pub depth_m: f64,

    /// Mass of material in tonnes
    pub tonnage: f64,

    #[serde(default)]
    pub volume_m3: f64,

    /// Ore grade (units are the operation's choice, e.g. g/t or %)
    #[serde(default)]
    pub grade: f64,

    /// Matched case-insensitively against the penetration catalog
    pub rock_type: String,

    /// Rock hardness on a 1-10 scale
    pub hardness: f64,

    #[serde(default)]
    pub abrasivity: f64,

    /// Strike length of the mining face in meters
    pub strike_length_m: f64,

    /// Mining width in meters
    pub width_m: f64,

    #[serde(default)]
    pub height_m: f64,
}

impl Block {
    /// Create a block with the attributes the cost formula needs
    pub fn new(
        id: &str,
        depth_m: f64,
        tonnage: f64,
        rock_type: &str,
        hardness: f64,
        strike_length_m: f64,
        width_m: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            category: default_category(),
            depth_m,
            tonnage,
            volume_m3: 0.0,
            grade: 0.0,
            rock_type: rock_type.to_string(),
            hardness,
            abrasivity: 0.0,
            strike_length_m,
            width_m,
            height_m: 0.0,
        }
    }

    /// Face area advanced when mining this block
    pub fn face_area(&self) -> f64 {
        self.strike_length_m * self.width_m
    }

    /// Strike length used as the per-meter divisor (1 when zero)
    pub fn meter_divisor(&self) -> f64 {
        if self.strike_length_m == 0.0 {
            1.0
        } else {
            self.strike_length_m
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meter_divisor() {
        let mut block = Block::new("B1", 300.0, 10_000.0, "granite", 5.0, 40.0, 5.0);
        assert_eq!(block.meter_divisor(), 40.0);
        assert_eq!(block.face_area(), 200.0);

        block.strike_length_m = 0.0;
        assert_eq!(block.meter_divisor(), 1.0);
    }

    #[test]
    fn test_category_defaults_to_ore() {
        let block: Block = serde_json::from_str(
            r#"{"id": "B7", "depth_m": 120, "tonnage": 5000, "rock_type": "Basalt",
                "hardness": 6, "strike_length_m": 20, "width_m": 4}"#,
        )
        .unwrap();
        assert_eq!(block.category, "ore");
        assert_eq!(block.grade, 0.0);
    }
}
