use super::config::{Difficulty, DifficultyConfig};
use super::records::BestRunRecord;
use super::state::RoundState;

pub const TIME_LEFT_LABEL: &str = "Time Left";
pub const TIME_ELAPSED_LABEL: &str = "Time Elapsed";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Badge {
    BeatPar,
    Perfect,
    StreakMaster,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::BeatPar => "Beat par time",
            Badge::Perfect => "Perfect (0 mismatches)",
            Badge::StreakMaster => "Streak Master",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoundSummary {
    pub won: bool,
    pub difficulty: Difficulty,
    pub difficulty_label: String,
    pub score: u32,
    pub moves: u32,
    pub accuracy_pct: u32,
    pub max_streak: u32,
    pub mismatches: u32,
    pub elapsed_secs: u32,
    pub time_label: &'static str,
    pub time_value: u32,
    pub badges: Vec<Badge>,
    pub best: BestRunRecord,
}

pub fn elapsed_secs(config: &DifficultyConfig, round: &RoundState) -> u32 {
    match config.time_limit_secs {
        None => round.time_elapsed,
        Some(limit) => limit.saturating_sub(round.time_left),
    }
}

pub fn accuracy_pct(matches: u32, moves: u32) -> u32 {
    if moves == 0 {
        return 0;
    }
    ((matches as f64 / moves as f64) * 100.0).round() as u32
}

pub fn format_time(total_secs: u32) -> String {
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    if mins == 0 {
        format!("{}s", secs)
    } else {
        format!("{}m {}s", mins, secs)
    }
}

pub(crate) fn build(
    difficulty: Difficulty,
    config: &DifficultyConfig,
    round: &RoundState,
    won: bool,
    elapsed: u32,
    best: BestRunRecord,
) -> RoundSummary {
    let mut badges = Vec::new();
    if won && elapsed <= config.par_time_secs {
        badges.push(Badge::BeatPar);
    }
    if won && round.mismatches == 0 {
        badges.push(Badge::Perfect);
    }
    if round.max_streak >= config.streak_badge {
        badges.push(Badge::StreakMaster);
    }

    let (time_label, time_value) = match config.time_limit_secs {
        Some(_) => (TIME_LEFT_LABEL, round.time_left),
        None => (TIME_ELAPSED_LABEL, elapsed),
    };

    RoundSummary {
        won,
        difficulty,
        difficulty_label: config
            .label
            .split(':')
            .next()
            .unwrap_or(config.label)
            .trim()
            .to_string(),
        score: round.score,
        moves: round.moves,
        accuracy_pct: accuracy_pct(round.matches, round.moves),
        max_streak: round.max_streak,
        mismatches: round.mismatches,
        elapsed_secs: elapsed,
        time_label,
        time_value,
        badges,
        best,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished_round() -> RoundState {
        let mut round = RoundState::default();
        round.moves = 8;
        round.matches = 6;
        round.mismatches = 2;
        round.max_streak = 4;
        round.score = 640;
        round
    }

    #[test]
    fn accuracy_is_zero_without_moves() {
        assert_eq!(accuracy_pct(0, 0), 0);
    }

    #[test]
    fn accuracy_rounds_to_nearest_percent() {
        assert_eq!(accuracy_pct(2, 3), 67);
        assert_eq!(accuracy_pct(6, 8), 75);
        assert_eq!(accuracy_pct(6, 6), 100);
    }

    #[test]
    fn countdown_elapsed_is_budget_minus_remaining() {
        let config = Difficulty::Medium.config();
        let mut round = RoundState::default();
        round.time_left = 34;
        assert_eq!(elapsed_secs(config, &round), 56);
        round.time_left = 0;
        assert_eq!(elapsed_secs(config, &round), 90);
    }

    #[test]
    fn count_up_elapsed_is_raw() {
        let config = Difficulty::Easy.config();
        let mut round = RoundState::default();
        round.time_elapsed = 71;
        assert_eq!(elapsed_secs(config, &round), 71);
    }

    #[test]
    fn format_time_spells_minutes_only_when_needed() {
        assert_eq!(format_time(42), "42s");
        assert_eq!(format_time(60), "1m 0s");
        assert_eq!(format_time(125), "2m 5s");
    }

    #[test]
    fn loss_earns_no_win_badges() {
        let round = finished_round();
        let report = build(
            Difficulty::Medium,
            Difficulty::Medium.config(),
            &round,
            false,
            30,
            BestRunRecord::default(),
        );
        assert_eq!(report.badges, vec![Badge::StreakMaster]);
    }

    #[test]
    fn clean_fast_win_earns_all_badges() {
        let mut round = finished_round();
        round.mismatches = 0;
        round.moves = 6;
        let report = build(
            Difficulty::Medium,
            Difficulty::Medium.config(),
            &round,
            true,
            30,
            BestRunRecord::default(),
        );
        assert_eq!(
            report.badges,
            vec![Badge::BeatPar, Badge::Perfect, Badge::StreakMaster]
        );
        assert_eq!(report.accuracy_pct, 100);
    }

    #[test]
    fn countdown_summary_reports_time_left() {
        let mut round = finished_round();
        round.time_left = 12;
        let report = build(
            Difficulty::Hard,
            Difficulty::Hard.config(),
            &round,
            true,
            63,
            BestRunRecord::default(),
        );
        assert_eq!(report.time_label, TIME_LEFT_LABEL);
        assert_eq!(report.time_value, 12);
        assert_eq!(report.difficulty_label, "Hard");
    }
}
