use log::warn;
use serde::{Deserialize, Serialize};

use super::config::Difficulty;
use super::ports::KeyValueStore;
use super::state::RoundState;

const BEST_KEY_PREFIX: &str = "arbor.best.";

// Stored payloads keep camelCase keys so existing saves stay readable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestRunRecord {
    pub best_score: u32,
    pub best_time: Option<u32>,
    pub best_moves: Option<u32>,
    pub best_streak: u32,
    pub games_played: u32,
}

pub fn best_key(difficulty: Difficulty) -> String {
    format!("{}{}", BEST_KEY_PREFIX, difficulty.key())
}

pub fn load_best(store: &dyn KeyValueStore, difficulty: Difficulty) -> BestRunRecord {
    let Some(raw) = store.get_string(&best_key(difficulty)) else {
        return BestRunRecord::default();
    };
    match serde_json::from_str(&raw) {
        Ok(record) => record,
        Err(err) => {
            warn!(
                "discarding unreadable best-run record for {}: {}",
                difficulty.key(),
                err
            );
            BestRunRecord::default()
        }
    }
}

pub fn save_best(store: &mut dyn KeyValueStore, difficulty: Difficulty, record: &BestRunRecord) {
    match serde_json::to_string(record) {
        Ok(raw) => store.set_string(&best_key(difficulty), &raw),
        Err(err) => warn!(
            "failed to encode best-run record for {}: {}",
            difficulty.key(),
            err
        ),
    }
}

pub(crate) fn record_round(
    store: &mut dyn KeyValueStore,
    difficulty: Difficulty,
    round: &RoundState,
    won: bool,
    elapsed_secs: u32,
) -> BestRunRecord {
    let mut best = load_best(store, difficulty);
    best.games_played += 1;
    best.best_score = best.best_score.max(round.score);
    best.best_streak = best.best_streak.max(round.max_streak);
    if won {
        if best.best_moves.is_none_or(|moves| round.moves < moves) {
            best.best_moves = Some(round.moves);
        }
        if best.best_time.is_none_or(|time| elapsed_secs < time) {
            best.best_time = Some(elapsed_secs);
        }
    }
    save_best(store, difficulty, &best);
    best
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        data: HashMap<String, String>,
    }

    impl KeyValueStore for MemoryStore {
        fn get_string(&self, key: &str) -> Option<String> {
            self.data.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: &str) {
            self.data.insert(key.to_string(), value.to_string());
        }
    }

    fn round_with(score: u32, moves: u32, max_streak: u32) -> RoundState {
        let mut round = RoundState::default();
        round.score = score;
        round.moves = moves;
        round.max_streak = max_streak;
        round
    }

    #[test]
    fn keys_are_scoped_by_difficulty() {
        assert_eq!(best_key(Difficulty::Easy), "arbor.best.easy");
        assert_eq!(best_key(Difficulty::Hard), "arbor.best.hard");
    }

    #[test]
    fn first_win_creates_the_record() {
        let mut store = MemoryStore::default();
        let best = record_round(&mut store, Difficulty::Easy, &round_with(500, 8, 4), true, 37);
        assert_eq!(best.best_score, 500);
        assert_eq!(best.best_moves, Some(8));
        assert_eq!(best.best_time, Some(37));
        assert_eq!(best.best_streak, 4);
        assert_eq!(best.games_played, 1);
    }

    #[test]
    fn loss_counts_the_game_but_keeps_win_only_fields_empty() {
        let mut store = MemoryStore::default();
        let best = record_round(&mut store, Difficulty::Medium, &round_with(300, 9, 3), false, 90);
        assert_eq!(best.games_played, 1);
        assert_eq!(best.best_score, 300);
        assert_eq!(best.best_moves, None);
        assert_eq!(best.best_time, None);
    }

    #[test]
    fn records_only_improve() {
        let mut store = MemoryStore::default();
        record_round(&mut store, Difficulty::Easy, &round_with(900, 6, 6), true, 20);
        let best = record_round(&mut store, Difficulty::Easy, &round_with(400, 10, 2), true, 55);
        assert_eq!(best.best_score, 900);
        assert_eq!(best.best_moves, Some(6));
        assert_eq!(best.best_time, Some(20));
        assert_eq!(best.best_streak, 6);
        assert_eq!(best.games_played, 2);
    }

    #[test]
    fn saved_record_round_trips() {
        let mut store = MemoryStore::default();
        let written = record_round(&mut store, Difficulty::Hard, &round_with(750, 14, 5), true, 48);
        assert_eq!(load_best(&store, Difficulty::Hard), written);
    }

    #[test]
    fn corrupt_record_falls_back_to_default() {
        let mut store = MemoryStore::default();
        store.set_string("arbor.best.easy", "{not json");
        assert_eq!(load_best(&store, Difficulty::Easy), BestRunRecord::default());
    }

    #[test]
    fn payload_uses_camel_case_field_names() {
        let mut store = MemoryStore::default();
        record_round(&mut store, Difficulty::Easy, &round_with(100, 6, 2), true, 12);
        let raw = store.get_string("arbor.best.easy").expect("record written");
        assert!(raw.contains("\"bestScore\""));
        assert!(raw.contains("\"gamesPlayed\""));
    }
}
