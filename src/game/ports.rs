use super::state::CardRef;
use super::summary::RoundSummary;

pub trait BoardRenderer {
    fn render_board(&mut self, rows: u32, cols: u32) -> Vec<CardRef>;
    fn reveal_card(&mut self, card: &CardRef);
    fn hide_card(&mut self, card: &CardRef);
    fn mark_matched(&mut self, card: &CardRef);
    fn disable_card(&mut self, card: &CardRef);
}

pub trait Hud {
    fn set_move_counter(&mut self, moves: u32);
    fn set_score(&mut self, score: u32);
    fn set_streak(&mut self, streak: u32);
    fn set_timer_label(&mut self, label: &str);
    fn set_timer_value(&mut self, value: u32);
    fn set_difficulty_label(&mut self, label: &str);
    fn set_status_message(&mut self, message: &str);
    fn show_summary(&mut self, summary: &RoundSummary);
    fn hide_summary(&mut self);
}

pub trait AudioFeedback {
    fn play_match(&mut self);
    fn play_mismatch(&mut self);
    fn play_win(&mut self);
}

pub trait KeyValueStore {
    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&mut self, key: &str, value: &str);
}

pub struct SilentAudio;

impl AudioFeedback for SilentAudio {
    fn play_match(&mut self) {}
    fn play_mismatch(&mut self) {}
    fn play_win(&mut self) {}
}
