use serde::{Deserialize, Serialize};

use crate::*;

/// Settings that stay fixed for a whole campaign.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignConfig {
    pub rows: u16,
    pub cols: u16,
    pub mark_style: MarkStyle,
    pub search_restriction: SearchRestriction,
    pub max_armor: u8,
    pub difficulty: DifficultyCurve,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            rows: 35,
            cols: 35,
            mark_style: MarkStyle::default(),
            search_restriction: SearchRestriction::default(),
            max_armor: 3,
            difficulty: DifficultyCurve::default(),
        }
    }
}

impl CampaignConfig {
    pub fn with_size(self, (cols, rows): (u16, u16)) -> Self {
        Self { rows, cols, ..self }
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = (self.rows, self.cols);
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyBoard { rows, cols });
        }
        let limit = u16::from(Coord::MAX);
        if rows > limit || cols > limit {
            return Err(ConfigError::BoardTooLarge { rows, cols });
        }
        if self.max_armor == 0 {
            return Err(ConfigError::NoArmor);
        }
        self.difficulty.validate()
    }

    /// Board size as `(cols, rows)`, only meaningful after [`Self::validate`].
    pub fn board_size(&self) -> Coord2 {
        let clamp = |n: u16| n.clamp(1, Coord::MAX.into()) as Coord;
        (clamp(self.cols), clamp(self.rows))
    }

    pub fn build_board(&self) -> Board {
        Board::new(self.board_size())
            .with_mark_style(self.mark_style)
            .with_search_restriction(self.search_restriction)
            .with_difficulty_curve(self.difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(CampaignConfig::default().validate(), Ok(()));
        assert_eq!(CampaignConfig::default().board_size(), (35, 35));
    }

    #[test]
    fn validate_rejects_bad_sizes() {
        let empty = CampaignConfig::default().with_size((0, 4));
        let huge = CampaignConfig::default().with_size((300, 4));

        assert_eq!(
            empty.validate(),
            Err(ConfigError::EmptyBoard { rows: 4, cols: 0 })
        );
        assert_eq!(
            huge.validate(),
            Err(ConfigError::BoardTooLarge { rows: 4, cols: 300 })
        );
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: CampaignConfig = toml::from_str(
            r#"
            rows = 16
            mark_style = "Single"

            [difficulty]
            step_per_level = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.rows, 16);
        assert_eq!(config.cols, 35);
        assert_eq!(config.mark_style, MarkStyle::Single);
        assert_eq!(config.difficulty.step_per_level, 10);
        assert_eq!(config.difficulty.max, 100);
    }

    #[test]
    fn build_board_applies_size_and_style() {
        let config = CampaignConfig {
            mark_style: MarkStyle::Single,
            ..CampaignConfig::default().with_size((8, 5))
        };

        let board = config.build_board();

        assert_eq!(board.size(), (8, 5));
        assert_eq!(board.mark_style(), MarkStyle::Single);
    }
}
