use thiserror::Error;

use super::deck;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerStartPolicy {
    AfterPreview,
    OnFirstFlip,
}

#[derive(Clone, Copy, Debug)]
pub struct DifficultyConfig {
    pub rows: u32,
    pub cols: u32,
    pub preview_ms: u64,
    pub time_limit_secs: Option<u32>,
    pub mismatch_delay_ms: u64,
    pub timer_start: TimerStartPolicy,
    pub par_time_secs: u32,
    pub streak_badge: u32,
    pub label: &'static str,
}

const EASY: DifficultyConfig = DifficultyConfig {
    rows: 3,
    cols: 4,
    preview_ms: 3000,
    time_limit_secs: None,
    mismatch_delay_ms: 1000,
    timer_start: TimerStartPolicy::OnFirstFlip,
    par_time_secs: 45,
    streak_badge: 3,
    label: "Easy: 3×4",
};

const MEDIUM: DifficultyConfig = DifficultyConfig {
    rows: 4,
    cols: 5,
    preview_ms: 2500,
    time_limit_secs: Some(90),
    mismatch_delay_ms: 900,
    timer_start: TimerStartPolicy::AfterPreview,
    par_time_secs: 60,
    streak_badge: 4,
    label: "Medium: 4×5",
};

const HARD: DifficultyConfig = DifficultyConfig {
    rows: 4,
    cols: 6,
    preview_ms: 2000,
    time_limit_secs: Some(75),
    mismatch_delay_ms: 700,
    timer_start: TimerStartPolicy::AfterPreview,
    par_time_secs: 55,
    streak_badge: 5,
    label: "Hard: 4×6",
};

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn config(self) -> &'static DifficultyConfig {
        match self {
            Difficulty::Easy => &EASY,
            Difficulty::Medium => &MEDIUM,
            Difficulty::Hard => &HARD,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        match value.trim() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl DifficultyConfig {
    pub fn cell_count(&self) -> u32 {
        self.rows * self.cols
    }

    pub fn pair_count(&self) -> u32 {
        self.cell_count() / 2
    }

    pub fn is_countdown(&self) -> bool {
        self.time_limit_secs.is_some()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must hold an even number of cards, got {0}")]
    OddCellCount(u32),
    #[error("not enough symbols for {requested} pairs, only {available} available")]
    NotEnoughSymbols { requested: u32, available: u32 },
    #[error("renderer produced {got} cards where {expected} were expected")]
    BoardSizeMismatch { expected: u32, got: u32 },
    #[error("card at position {position} carries index {index}")]
    MisindexedCard { position: usize, index: usize },
    #[error("symbol {0:?} does not appear exactly twice on the board")]
    UnbalancedDeck(String),
}

pub fn validate(config: &DifficultyConfig) -> Result<(), ConfigError> {
    let cells = config.cell_count();
    if cells % 2 != 0 {
        return Err(ConfigError::OddCellCount(cells));
    }
    let pairs = config.pair_count();
    if pairs as usize > deck::SYMBOLS.len() {
        return Err(ConfigError::NotEnoughSymbols {
            requested: pairs,
            available: deck::SYMBOLS.len() as u32,
        });
    }
    Ok(())
}

pub fn validate_all() -> Result<(), ConfigError> {
    for difficulty in Difficulty::ALL {
        validate(difficulty.config())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_config_is_pairable() {
        for difficulty in Difficulty::ALL {
            let config = difficulty.config();
            assert_eq!(config.cell_count() % 2, 0, "{:?}", difficulty);
            assert!(config.pair_count() as usize <= deck::SYMBOLS.len());
        }
    }

    #[test]
    fn validate_all_accepts_builtin_table() {
        assert!(validate_all().is_ok());
    }

    #[test]
    fn keys_round_trip() {
        for difficulty in Difficulty::ALL {
            assert_eq!(Difficulty::from_key(difficulty.key()), Some(difficulty));
        }
        assert_eq!(Difficulty::from_key("impossible"), None);
    }

    #[test]
    fn rejects_odd_cell_count() {
        let mut config = *Difficulty::Easy.config();
        config.rows = 3;
        config.cols = 3;
        assert!(matches!(validate(&config), Err(ConfigError::OddCellCount(9))));
    }

    #[test]
    fn rejects_more_pairs_than_symbols() {
        let mut config = *Difficulty::Hard.config();
        config.rows = 6;
        config.cols = 8;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::NotEnoughSymbols { requested: 24, available: 18 })
        ));
    }
}
