//! Level descriptions
//!
//! A level is plain data: balls, paddle, background and blocks. The three
//! classic levels are built in, more can be loaded from JSON, and a seed
//! produces a random layout.

use std::fs;
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::PADDLE_SPEED;
use crate::error::{BrickfallError, Result};
use crate::geom::{Rectangle, Velocity};
use crate::render::Color;

/// One block of a level layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub rect: Rectangle,
    pub color: Color,
}

impl BlockSpec {
    fn new(x: f64, y: f64, width: f64, height: f64, color: Color) -> Self {
        Self {
            rect: Rectangle::from_coords(x, y, width, height),
            color,
        }
    }
}

/// Everything needed to set up a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub name: String,
    /// One ball is spawned per velocity
    pub ball_velocities: Vec<Velocity>,
    #[serde(default = "default_paddle_speed")]
    pub paddle_speed: f64,
    pub paddle_width: f64,
    #[serde(default)]
    pub background: Color,
    pub blocks: Vec<BlockSpec>,
    /// Blocks that must go before the level counts as cleared
    pub blocks_to_remove: u32,
}

fn default_paddle_speed() -> f64 {
    PADDLE_SPEED
}

/// A level file holds either one level or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum LevelFile {
    One(LevelInfo),
    Many(Vec<LevelInfo>),
}

impl LevelInfo {
    /// One ball straight up into a single block
    pub fn direct_hit() -> Self {
        Self {
            name: "Direct Hit".to_string(),
            ball_velocities: vec![Velocity::new(0.0, -3.0)],
            paddle_speed: PADDLE_SPEED,
            paddle_width: 80.0,
            background: Color::BLACK,
            blocks: vec![BlockSpec::new(380.0, 170.0, 30.0, 30.0, Color::RED)],
            blocks_to_remove: 1,
        }
    }

    /// Ten balls fanned out over a very wide paddle
    pub fn wide_easy() -> Self {
        let colors = [
            Color::RED,
            Color::RED,
            Color::ORANGE,
            Color::ORANGE,
            Color::YELLOW,
            Color::YELLOW,
            Color::GREEN,
            Color::GREEN,
            Color::GREEN,
            Color::BLUE,
            Color::BLUE,
            Color::PINK,
            Color::PINK,
            Color::CYAN,
            Color::CYAN,
        ];
        let blocks: Vec<BlockSpec> = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| BlockSpec::new(30.0 + 50.0 * i as f64, 210.0, 50.0, 30.0, color))
            .collect();

        Self {
            name: "Wide Easy".to_string(),
            ball_velocities: (0..10)
                .map(|i| Velocity::from_angle_and_speed(315.0 + 10.0 * i as f64, 5.0))
                .collect(),
            paddle_speed: PADDLE_SPEED,
            paddle_width: 550.0,
            background: Color::WHITE,
            blocks_to_remove: blocks.len() as u32,
            blocks,
        }
    }

    /// Staircase of five shrinking rows against the right wall
    pub fn green_3() -> Self {
        let colors = [Color::GRAY, Color::RED, Color::YELLOW, Color::BLUE, Color::WHITE];
        let mut blocks = Vec::new();
        for (layer, &color) in colors.iter().enumerate() {
            let y = 135.0 + 20.0 * layer as f64;
            for i in 0..(10 - layer) {
                blocks.push(BlockSpec::new(720.0 - 50.0 * i as f64, y, 50.0, 20.0, color));
            }
        }

        Self {
            name: "Green 3".to_string(),
            ball_velocities: vec![Velocity::new(3.0, -4.0), Velocity::new(-3.0, -4.0)],
            paddle_speed: PADDLE_SPEED,
            paddle_width: 80.0,
            background: Color::rgb(7, 82, 7),
            blocks_to_remove: blocks.len() as u32,
            blocks,
        }
    }

    /// The built-in levels in play order
    pub fn builtin() -> Vec<Self> {
        vec![Self::direct_hit(), Self::wide_easy(), Self::green_3()]
    }

    /// Built-in level by its 1-based number
    pub fn by_number(number: usize) -> Option<Self> {
        match number {
            1 => Some(Self::direct_hit()),
            2 => Some(Self::wide_easy()),
            3 => Some(Self::green_3()),
            _ => None,
        }
    }

    /// Random layout; the same seed always gives the same level
    pub fn generated(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let palette = [
            Color::RED,
            Color::ORANGE,
            Color::YELLOW,
            Color::GREEN,
            Color::BLUE,
            Color::PINK,
            Color::CYAN,
        ];

        const BLOCK_WIDTH: f64 = 50.0;
        const BLOCK_HEIGHT: f64 = 20.0;
        const COLUMNS: usize = 14;

        let rows = rng.random_range(3..=6);
        let mut blocks = Vec::new();
        for row in 0..rows {
            let color = palette[rng.random_range(0..palette.len())];
            let y = 80.0 + BLOCK_HEIGHT * row as f64;
            for col in 0..COLUMNS {
                if rng.random_bool(0.75) {
                    let x = 50.0 + BLOCK_WIDTH * col as f64;
                    blocks.push(BlockSpec::new(x, y, BLOCK_WIDTH, BLOCK_HEIGHT, color));
                }
            }
        }
        if blocks.is_empty() {
            blocks.push(BlockSpec::new(375.0, 80.0, BLOCK_WIDTH, BLOCK_HEIGHT, Color::RED));
        }

        let ball_count = rng.random_range(1..=3);
        let ball_velocities = (0..ball_count)
            .map(|_| Velocity::from_angle_and_speed(rng.random_range(-45.0..45.0), 5.0))
            .collect();

        let level = Self {
            name: format!("Random {seed}"),
            ball_velocities,
            paddle_speed: PADDLE_SPEED,
            paddle_width: 60.0 + 20.0 * rng.random_range(0..4) as f64,
            background: Color::rgb(20, 20, 40),
            blocks_to_remove: blocks.len() as u32,
            blocks,
        };
        log::debug!(
            "Generated level '{}' with {} blocks",
            level.name,
            level.blocks.len()
        );
        level
    }

    /// Parse one level or a list of levels, validating each
    pub fn from_json(json: &str) -> Result<Vec<Self>> {
        let levels = match serde_json::from_str(json)? {
            LevelFile::One(level) => vec![level],
            LevelFile::Many(levels) => levels,
        };
        for level in &levels {
            level.validate()?;
        }
        Ok(levels)
    }

    /// Load levels from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<Self>> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let levels = Self::from_json(&json)?;
        log::info!("Loaded {} level(s) from {}", levels.len(), path.display());
        Ok(levels)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject levels that cannot be played
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| BrickfallError::InvalidLevel {
            name: self.name.clone(),
            reason,
        };

        if self.ball_velocities.is_empty() {
            return Err(invalid("no balls".to_string()));
        }
        if self.paddle_width.is_nan() || self.paddle_width <= 0.0 {
            return Err(invalid(format!("paddle width {} is not positive", self.paddle_width)));
        }
        if self.paddle_speed.is_nan() || self.paddle_speed < 0.0 {
            return Err(invalid(format!("paddle speed {} is negative", self.paddle_speed)));
        }
        for (i, block) in self.blocks.iter().enumerate() {
            let r = &block.rect;
            let finite = [r.upper_left.x, r.upper_left.y, r.width, r.height]
                .iter()
                .all(|v| v.is_finite());
            if !finite || r.width < 0.0 || r.height < 0.0 {
                return Err(invalid(format!(
                    "block {i} has bad geometry {}x{} at ({}, {})",
                    r.width, r.height, r.upper_left.x, r.upper_left.y
                )));
            }
        }
        if self.blocks_to_remove as usize > self.blocks.len() {
            return Err(invalid(format!(
                "{} blocks to remove but only {} blocks",
                self.blocks_to_remove,
                self.blocks.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    #[test]
    fn test_builtin_layouts() {
        let direct = LevelInfo::direct_hit();
        assert_eq!(direct.blocks.len(), 1);
        assert_eq!(direct.blocks[0].rect, Rectangle::from_coords(380.0, 170.0, 30.0, 30.0));

        let wide = LevelInfo::wide_easy();
        assert_eq!(wide.ball_velocities.len(), 10);
        assert_eq!(wide.blocks.len(), 15);
        assert_eq!(wide.blocks[14].rect.upper_left, Point::new(730.0, 210.0));
        assert_eq!(wide.paddle_width, 550.0);

        let green = LevelInfo::green_3();
        assert_eq!(green.blocks.len(), 40);
        assert_eq!(green.blocks_to_remove, 40);
        // Each row ends flush at x=770
        assert_eq!(green.blocks[0].rect.max_x(), 770.0);
        assert_eq!(green.blocks[10].rect.upper_left, Point::new(720.0, 155.0));
        assert_eq!(green.blocks[39].rect.upper_left, Point::new(470.0, 215.0));

        for level in LevelInfo::builtin() {
            level.validate().expect("built-in level is valid");
        }
    }

    #[test]
    fn test_wide_easy_fan() {
        let wide = LevelInfo::wide_easy();
        // 315 degrees: up and to the left
        let first = wide.ball_velocities[0];
        assert!(first.dx < 0.0 && first.dy < 0.0);
        for v in &wide.ball_velocities {
            assert!((v.speed() - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_by_number() {
        assert_eq!(LevelInfo::by_number(1).map(|l| l.name), Some("Direct Hit".to_string()));
        assert_eq!(LevelInfo::by_number(3).map(|l| l.name), Some("Green 3".to_string()));
        assert!(LevelInfo::by_number(0).is_none());
        assert!(LevelInfo::by_number(4).is_none());
    }

    #[test]
    fn test_from_json_single_and_list() {
        let one = r#"{
            "name": "Tiny",
            "ball_velocities": [{ "dx": 1.0, "dy": -2.0 }],
            "paddle_width": 100.0,
            "blocks": [
                { "rect": { "upper_left": { "x": 100.0, "y": 100.0 }, "width": 40.0, "height": 20.0 },
                  "color": { "r": 255, "g": 0, "b": 0 } }
            ],
            "blocks_to_remove": 1
        }"#;
        let levels = LevelInfo::from_json(one).expect("single level");
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].paddle_speed, PADDLE_SPEED);
        assert_eq!(levels[0].background, Color::BLACK);
        assert_eq!(levels[0].blocks[0].color, Color::RED);

        let list = format!("[{one}, {one}]");
        assert_eq!(LevelInfo::from_json(&list).expect("level list").len(), 2);
    }

    #[test]
    fn test_json_round_trip_of_builtin() {
        let green = LevelInfo::green_3();
        let json = green.to_json().expect("serialize");
        let parsed = LevelInfo::from_json(&json).expect("parse");
        assert_eq!(parsed, vec![green]);
    }

    #[test]
    fn test_validate_rejects_bad_levels() {
        let mut level = LevelInfo::direct_hit();
        level.ball_velocities.clear();
        assert!(matches!(level.validate(), Err(BrickfallError::InvalidLevel { .. })));

        let mut level = LevelInfo::direct_hit();
        level.blocks_to_remove = 2;
        let err = level.validate().unwrap_err();
        assert!(err.to_string().contains("2 blocks to remove"));

        let mut level = LevelInfo::direct_hit();
        level.blocks[0].rect.width = -1.0;
        assert!(level.validate().is_err());

        let mut level = LevelInfo::direct_hit();
        level.paddle_width = 0.0;
        assert!(level.validate().is_err());
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(
            LevelInfo::from_json("{ \"name\": 3 }"),
            Err(BrickfallError::Json(_))
        ));
    }

    #[test]
    fn test_generated_is_deterministic() {
        let a = LevelInfo::generated(42);
        let b = LevelInfo::generated(42);
        assert_eq!(a, b);
        a.validate().expect("generated level is valid");
        assert!(!a.blocks.is_empty());
        assert!((1..=3).contains(&a.ball_velocities.len()));

        // Blocks stay between the side walls and below the top border
        for block in &a.blocks {
            assert!(block.rect.min_x() >= 30.0 && block.rect.max_x() <= 770.0);
            assert!(block.rect.min_y() >= 50.0);
        }
    }

    #[test]
    fn test_generated_seeds_differ() {
        let layouts: Vec<_> = (0..8).map(|s| LevelInfo::generated(s).blocks).collect();
        assert!(layouts.windows(2).any(|w| w[0] != w[1]));
    }
}
