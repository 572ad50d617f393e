use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Board must be at least 1x1, got {rows}x{cols}")]
    EmptyBoard { rows: u16, cols: u16 },
    #[error("Board sides are limited to 255 tiles, got {rows}x{cols}")]
    BoardTooLarge { rows: u16, cols: u16 },
    #[error("Mine fraction {0} is outside of [0, 1)")]
    FractionOutOfRange(f64),
    #[error("Minimum mine fraction {min} exceeds maximum {max}")]
    InvertedFractions { min: f64, max: f64 },
    #[error("Maximum difficulty must be positive")]
    ZeroDifficultyRange,
    #[error("Armor cap must be at least 1")]
    NoArmor,
}

pub type Result<T> = core::result::Result<T, ConfigError>;
