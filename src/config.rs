use std::fs;
use std::io;
use std::path::Path;

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;
use unicode_width::UnicodeWidthChar;

use crate::error::ConfigError;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Largest accepted grid height or width.
pub const MAX_GRID_DIMENSION: u16 = 1024;

/// Default grid height (rows).
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Default grid width (columns).
pub const DEFAULT_GRID_WIDTH: u16 = 40;

/// Default starting row of the actor.
pub const DEFAULT_START_ROW: u16 = 7;

/// Default starting column of the actor.
pub const DEFAULT_START_COL: u16 = 1;

pub const DEFAULT_ACTOR_GLYPH: char = '@';
pub const DEFAULT_WALL_GLYPH: char = '#';

pub const DEFAULT_HEALTH: u32 = 3;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Tick interval reduction per collectable on the endless level.
pub const DEFAULT_TICK_DECREMENT_MS: u64 = 20;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Size needed to leave the first level.
pub const DEFAULT_SCORE_THRESHOLD: u32 = 15;

/// Every tunable of one game session.
///
/// Missing fields in a JSON config file fall back to the defaults above.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid_height: u16,
    pub grid_width: u16,
    pub start_row: u16,
    pub start_col: u16,
    pub actor_glyph: char,
    pub wall_glyph: char,
    pub starting_health: u32,
    pub base_delay_ms: u64,
    pub delay_decrement_ms: u64,
    pub min_delay_ms: u64,
    pub score_threshold: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_height: DEFAULT_GRID_HEIGHT,
            grid_width: DEFAULT_GRID_WIDTH,
            start_row: DEFAULT_START_ROW,
            start_col: DEFAULT_START_COL,
            actor_glyph: DEFAULT_ACTOR_GLYPH,
            wall_glyph: DEFAULT_WALL_GLYPH,
            starting_health: DEFAULT_HEALTH,
            base_delay_ms: DEFAULT_TICK_INTERVAL_MS,
            delay_decrement_ms: DEFAULT_TICK_DECREMENT_MS,
            min_delay_ms: MIN_TICK_INTERVAL_MS,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
        }
    }
}

/// Failure to read a configuration file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read config file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

impl GameConfig {
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        GridSize {
            width: self.grid_width,
            height: self.grid_height,
        }
    }

    /// Checks every construction rule; the first violation wins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_height > MAX_GRID_DIMENSION || self.grid_width > MAX_GRID_DIMENSION {
            return Err(ConfigError::GridTooLarge {
                height: self.grid_height,
                width: self.grid_width,
                max: MAX_GRID_DIMENSION,
            });
        }

        if self.start_row >= self.grid_height || self.start_col >= self.grid_width {
            return Err(ConfigError::StartOutOfRange {
                row: self.start_row,
                col: self.start_col,
                height: self.grid_height,
                width: self.grid_width,
            });
        }

        if self.start_row == 0
            || self.start_col == 0
            || self.start_row == self.grid_height - 1
            || self.start_col == self.grid_width - 1
        {
            return Err(ConfigError::StartOnBorder {
                row: self.start_row,
                col: self.start_col,
            });
        }

        if self.starting_health == 0 {
            return Err(ConfigError::NoHealth);
        }

        if self.min_delay_ms == 0 {
            return Err(ConfigError::ZeroMinDelay);
        }

        if self.base_delay_ms <= self.min_delay_ms {
            return Err(ConfigError::BaseDelayTooSmall {
                base: self.base_delay_ms,
                min: self.min_delay_ms,
            });
        }

        if self.delay_decrement_ms >= self.base_delay_ms {
            return Err(ConfigError::DecrementTooLarge {
                decrement: self.delay_decrement_ms,
                base: self.base_delay_ms,
            });
        }

        if self.score_threshold <= 1 {
            return Err(ConfigError::ThresholdTooSmall(self.score_threshold));
        }

        check_glyph(self.actor_glyph)?;
        check_glyph(self.wall_glyph)?;
        if self.actor_glyph == self.wall_glyph {
            return Err(ConfigError::GlyphClash(self.actor_glyph));
        }

        Ok(())
    }

    /// Reads a JSON config file and validates it.
    pub fn from_json_path(path: &Path) -> Result<Self, LoadError> {
        let config = Self::read_json(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file without validating it, so later layers can
    /// still fix individual fields.
    pub fn read_json(path: &Path) -> Result<Self, LoadError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str::<Self>(&raw)?)
    }
}

fn check_glyph(glyph: char) -> Result<(), ConfigError> {
    let printable = !glyph.is_control() && glyph.width() == Some(1);
    if !printable || glyph == ' ' || glyph.is_ascii_digit() {
        return Err(ConfigError::BadGlyph(glyph));
    }
    Ok(())
}

/// Colors used by the terminal renderer.
#[derive(Debug)]
pub struct Palette {
    pub text: Color,
    pub background: Color,
    pub actor: Color,
    pub wall: Color,
    pub collectable: Color,
    pub menu_start_bg: Color,
    pub menu_health_bg: Color,
    pub menu_level_bg: Color,
    pub menu_game_over_bg: Color,
}

/// Yellow on black, with a colored backdrop per status screen.
pub const PALETTE_CLASSIC: Palette = Palette {
    text: Color::Yellow,
    background: Color::Black,
    actor: Color::LightGreen,
    wall: Color::Yellow,
    collectable: Color::LightRed,
    menu_start_bg: Color::Blue,
    menu_health_bg: Color::Blue,
    menu_level_bg: Color::Green,
    menu_game_over_bg: Color::Red,
};

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{GameConfig, LoadError};
    use crate::error::ConfigError;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn start_outside_grid_is_rejected() {
        let config = GameConfig {
            start_row: 20,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutOfRange { row: 20, .. })
        ));
    }

    #[test]
    fn start_on_any_border_is_rejected() {
        for (row, col) in [(0, 5), (19, 5), (5, 0), (5, 39)] {
            let config = GameConfig {
                start_row: row,
                start_col: col,
                ..GameConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::StartOnBorder { row, col })
            );
        }
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let config = GameConfig {
            grid_height: u16::MAX,
            grid_width: u16::MAX,
            start_row: 5,
            start_col: 5,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooLarge {
                height: u16::MAX,
                width: u16::MAX,
                max: super::MAX_GRID_DIMENSION,
            })
        );

        let largest = GameConfig {
            grid_height: super::MAX_GRID_DIMENSION,
            grid_width: super::MAX_GRID_DIMENSION,
            ..GameConfig::default()
        };
        assert_eq!(largest.validate(), Ok(()));
    }

    #[test]
    fn zero_health_is_rejected() {
        let config = GameConfig {
            starting_health: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoHealth));
    }

    #[test]
    fn delay_rules_are_enforced() {
        let base_at_min = GameConfig {
            base_delay_ms: 50,
            ..GameConfig::default()
        };
        assert!(matches!(
            base_at_min.validate(),
            Err(ConfigError::BaseDelayTooSmall { .. })
        ));

        let decrement_at_base = GameConfig {
            delay_decrement_ms: 200,
            ..GameConfig::default()
        };
        assert!(matches!(
            decrement_at_base.validate(),
            Err(ConfigError::DecrementTooLarge { .. })
        ));

        let zero_min = GameConfig {
            min_delay_ms: 0,
            ..GameConfig::default()
        };
        assert_eq!(zero_min.validate(), Err(ConfigError::ZeroMinDelay));
    }

    #[test]
    fn threshold_of_one_is_rejected() {
        let config = GameConfig {
            score_threshold: 1,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ThresholdTooSmall(1)));
    }

    #[test]
    fn digit_space_and_duplicate_glyphs_are_rejected() {
        for glyph in ['5', ' ', '\t'] {
            let config = GameConfig {
                actor_glyph: glyph,
                ..GameConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::BadGlyph(glyph)));
        }

        let clash = GameConfig {
            actor_glyph: '#',
            ..GameConfig::default()
        };
        assert_eq!(clash.validate(), Err(ConfigError::GlyphClash('#')));
    }

    #[test]
    fn partial_json_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!(
            "nibbles-config-{}-partial.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "starting_health": 5, "wall_glyph": "%" }"#)
            .expect("test file write should succeed");

        let config = GameConfig::from_json_path(&path).expect("config should load");
        let _ = fs::remove_file(&path);

        assert_eq!(config.starting_health, 5);
        assert_eq!(config.wall_glyph, '%');
        assert_eq!(config.grid_width, super::DEFAULT_GRID_WIDTH);
    }

    #[test]
    fn invalid_json_values_surface_as_config_errors() {
        let path = std::env::temp_dir().join(format!(
            "nibbles-config-{}-invalid.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "score_threshold": 0 }"#).expect("test file write should succeed");

        let result = GameConfig::from_json_path(&path);
        let _ = fs::remove_file(&path);

        assert!(matches!(
            result,
            Err(LoadError::Invalid(ConfigError::ThresholdTooSmall(0)))
        ));
    }
}
