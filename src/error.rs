use thiserror::Error;

/// Rejected construction parameters. Raised once, before any game state exists.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid {height}x{width} exceeds the {max}x{max} limit")]
    GridTooLarge { height: u16, width: u16, max: u16 },
    #[error("starting position ({row}, {col}) is outside the {height}x{width} grid")]
    StartOutOfRange {
        row: u16,
        col: u16,
        height: u16,
        width: u16,
    },
    #[error("starting position ({row}, {col}) lies on the map border")]
    StartOnBorder { row: u16, col: u16 },
    #[error("starting health must be at least 1")]
    NoHealth,
    #[error("base delay {base}ms must be greater than the minimum delay {min}ms")]
    BaseDelayTooSmall { base: u64, min: u64 },
    #[error("delay decrement {decrement}ms must be smaller than the base delay {base}ms")]
    DecrementTooLarge { decrement: u64, base: u64 },
    #[error("minimum delay must be greater than 0")]
    ZeroMinDelay,
    #[error("score threshold {0} must be greater than 1")]
    ThresholdTooSmall(u32),
    #[error("glyph {0:?} must be a single-column printable character other than a space or digit")]
    BadGlyph(char),
    #[error("actor and wall glyphs must differ (both are {0:?})")]
    GlyphClash(char),
}
