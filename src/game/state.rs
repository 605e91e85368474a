use super::config::DifficultyConfig;
use super::scheduler::TaskId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardStatus {
    Hidden,
    Flipped,
    Matched,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardRef {
    pub index: usize,
    pub symbol: String,
}

#[derive(Clone, Debug)]
pub struct Card {
    pub handle: CardRef,
    pub status: CardStatus,
}

impl Card {
    pub(crate) fn face_down(handle: CardRef) -> Self {
        Card { handle, status: CardStatus::Hidden }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LockLevel {
    #[default]
    Unlocked,
    PreviewLocked,
    ResolutionLocked,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Won,
    TimedOut,
}

#[derive(Debug, Default)]
pub struct RoundState {
    pub moves: u32,
    pub matches: u32,
    pub mismatches: u32,
    pub matched_pairs: u32,
    pub total_pairs: u32,
    pub score: u32,
    pub streak: u32,
    pub max_streak: u32,
    pub time_left: u32,
    pub time_elapsed: u32,
    pub timer_started: bool,
    pub preview_active: bool,
    pub lock: LockLevel,
    pub outcome: Option<RoundOutcome>,
    pub revealed: Vec<CardRef>,
    pub cards: Vec<Card>,
    pub game_id: u64,
    pub timer_handle: Option<TaskId>,
    pub preview_handle: Option<TaskId>,
    pub mismatch_handle: Option<TaskId>,
}

impl RoundState {
    pub(crate) fn begin(&mut self, cards: Vec<Card>, config: &DifficultyConfig) {
        self.game_id = self.game_id.wrapping_add(1);
        self.moves = 0;
        self.matches = 0;
        self.mismatches = 0;
        self.matched_pairs = 0;
        self.total_pairs = cards.len() as u32 / 2;
        self.score = 0;
        self.streak = 0;
        self.max_streak = 0;
        self.time_left = config.time_limit_secs.unwrap_or(0);
        self.time_elapsed = 0;
        self.timer_started = false;
        self.preview_active = false;
        self.lock = LockLevel::Unlocked;
        self.outcome = None;
        self.revealed.clear();
        self.cards = cards;
        self.timer_handle = None;
        self.preview_handle = None;
        self.mismatch_handle = None;
    }

    pub fn card_status(&self, index: usize) -> Option<CardStatus> {
        self.cards.get(index).map(|card| card.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::Difficulty;

    fn cards_for(count: usize) -> Vec<Card> {
        (0..count)
            .map(|index| {
                Card::face_down(CardRef { index, symbol: format!("s{}", index / 2) })
            })
            .collect()
    }

    #[test]
    fn begin_bumps_generation_and_clears_counters() {
        let mut round = RoundState::default();
        round.moves = 9;
        round.score = 400;
        round.lock = LockLevel::Ended;
        let before = round.game_id;

        round.begin(cards_for(12), Difficulty::Easy.config());

        assert_eq!(round.game_id, before + 1);
        assert_eq!(round.moves, 0);
        assert_eq!(round.score, 0);
        assert_eq!(round.total_pairs, 6);
        assert_eq!(round.lock, LockLevel::Unlocked);
        assert!(round.revealed.is_empty());
        assert!(round.outcome.is_none());
    }

    #[test]
    fn begin_takes_countdown_budget_from_config() {
        let mut round = RoundState::default();
        round.begin(cards_for(20), Difficulty::Medium.config());
        assert_eq!(round.time_left, 90);
        assert_eq!(round.time_elapsed, 0);
        assert!(!round.timer_started);
    }
}
