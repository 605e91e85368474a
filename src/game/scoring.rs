use super::state::RoundState;

pub const MATCH_POINTS: u32 = 100;
pub const MISMATCH_PENALTY: u32 = 25;
pub const STREAK_MULTIPLIERS: [f64; 5] = [1.0, 1.25, 1.5, 2.0, 2.5];

pub fn streak_multiplier(streak: u32) -> f64 {
    if streak == 0 {
        return STREAK_MULTIPLIERS[0];
    }
    let index = ((streak - 1) as usize).min(STREAK_MULTIPLIERS.len() - 1);
    STREAK_MULTIPLIERS[index]
}

pub(crate) fn on_match(round: &mut RoundState) {
    round.matches += 1;
    round.streak += 1;
    round.max_streak = round.max_streak.max(round.streak);
    apply_score(round, MATCH_POINTS as f64 * streak_multiplier(round.streak));
}

pub(crate) fn on_mismatch(round: &mut RoundState) {
    round.mismatches += 1;
    round.streak = 0;
    apply_score(round, -(MISMATCH_PENALTY as f64));
}

// Score stays a non-negative integer no matter the delta.
fn apply_score(round: &mut RoundState, delta: f64) {
    let next = (round.score as f64 + delta).round();
    round.score = if next <= 0.0 { 0 } else { next as u32 };
}
