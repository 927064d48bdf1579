//! Playfield settings
//!
//! Loaded from a JSON file; any field left out takes its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BALL_RADIUS, BORDER_THICKNESS, SCREEN_HEIGHT, SCREEN_WIDTH, TICKS_PER_SECOND,
};
use crate::error::{BrickfallError, Result};

/// Playfield geometry and run limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f64,
    pub screen_height: f64,

    // === Borders ===
    /// Thickness of every border block
    pub border_thickness: f64,
    /// Top edge of the upper border (leaves room for the HUD)
    pub top_border_y: f64,
    /// Top edge of the bottom block that removes balls
    pub death_zone_y: f64,

    // === Paddle ===
    pub paddle_y: f64,
    pub paddle_height: f64,
    /// Closest the paddle may come to either side of the screen
    pub paddle_margin: f64,

    // === Balls ===
    pub ball_radius: f64,
    pub ball_spawn_y: f64,

    // === Timing ===
    /// Nominal frame rate; the simulation itself is step-based
    pub ticks_per_second: u32,
    /// Frame limit for headless runs
    pub max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            border_thickness: BORDER_THICKNESS,
            top_border_y: 20.0,
            death_zone_y: 615.0,

            paddle_y: 565.0,
            paddle_height: 15.0,
            paddle_margin: BORDER_THICKNESS,

            ball_radius: BALL_RADIUS,
            ball_spawn_y: 550.0,

            ticks_per_second: TICKS_PER_SECOND,
            // Three minutes of play
            max_ticks: TICKS_PER_SECOND as u64 * 180,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject settings that would build a broken playfield
    pub fn validate(&self) -> Result<()> {
        let invalid = |field: &'static str, reason: String| {
            Err(BrickfallError::InvalidSettings { field, reason })
        };

        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("border_thickness", self.border_thickness),
            ("paddle_height", self.paddle_height),
            ("ball_radius", self.ball_radius),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return invalid(field, format!("{value} is not a positive number"));
            }
        }

        let finite = [
            ("top_border_y", self.top_border_y),
            ("death_zone_y", self.death_zone_y),
            ("paddle_y", self.paddle_y),
            ("ball_spawn_y", self.ball_spawn_y),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return invalid(field, format!("{value} is not a finite number"));
            }
        }

        if !self.paddle_margin.is_finite() || self.paddle_margin < 0.0 {
            return invalid(
                "paddle_margin",
                format!("{} is not a non-negative number", self.paddle_margin),
            );
        }
        if 2.0 * self.paddle_margin >= self.screen_width {
            return invalid(
                "paddle_margin",
                format!(
                    "{} on each side leaves no room for the paddle on a {}-wide screen",
                    self.paddle_margin, self.screen_width
                ),
            );
        }
        Ok(())
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_playfield() {
        let s = Settings::default();
        assert_eq!(s.screen_width, 800.0);
        assert_eq!(s.screen_height, 600.0);
        assert_eq!(s.border_thickness, 30.0);
        assert_eq!(s.death_zone_y, 615.0);
        assert_eq!(s.paddle_y, 565.0);
        assert_eq!(s.ball_radius, 5.0);
        assert_eq!(s.max_ticks, 10_800);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s: Settings = serde_json::from_str(r#"{ "screen_width": 1000.0, "max_ticks": 50 }"#)
            .expect("valid settings");
        assert_eq!(s.screen_width, 1000.0);
        assert_eq!(s.max_ticks, 50);
        assert_eq!(s.screen_height, 600.0);
        assert_eq!(s.paddle_height, 15.0);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("brickfall_settings_{}.json", std::process::id()));
        let mut s = Settings::default();
        s.ball_radius = 7.5;
        s.save(&path).expect("save");

        let loaded = Settings::load(&path).expect("load");
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, s);
    }

    #[test]
    fn test_load_rejects_negative_sizes() {
        let path = std::env::temp_dir().join(format!("brickfall_bad_settings_{}.json", std::process::id()));
        fs::write(&path, r#"{ "paddle_height": -15.0 }"#).expect("write");

        let err = Settings::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(
            err,
            BrickfallError::InvalidSettings { field: "paddle_height", .. }
        ));
    }

    #[test]
    fn test_validate_checks_each_size() {
        assert!(Settings::default().validate().is_ok());

        let mut s = Settings::default();
        s.border_thickness = -30.0;
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.ball_radius = f64::NAN;
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.screen_width = 0.0;
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.death_zone_y = f64::INFINITY;
        assert!(matches!(
            s.validate(),
            Err(BrickfallError::InvalidSettings { field: "death_zone_y", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_margin_wider_than_screen() {
        let mut s = Settings::default();
        s.paddle_margin = 400.0;
        assert!(matches!(
            s.validate(),
            Err(BrickfallError::InvalidSettings { field: "paddle_margin", .. })
        ));

        s.paddle_margin = -1.0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load("/nonexistent/brickfall/settings.json").unwrap_err();
        assert!(matches!(err, BrickfallError::Io(_)));
    }
}
