use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::scoring;
use super::session::{GameSession, end_round};
use super::state::{CardRef, CardStatus, LockLevel, RoundOutcome};

enum FlipOutcome {
    Match,
    Mismatch,
}

fn evaluate(first: &CardRef, second: &CardRef) -> FlipOutcome {
    if first.symbol == second.symbol {
        FlipOutcome::Match
    } else {
        FlipOutcome::Mismatch
    }
}

pub(crate) fn resolve_pending(session: &Rc<RefCell<GameSession>>) {
    let won = {
        let mut s = session.borrow_mut();
        let [first, second] = match s.round.revealed.as_slice() {
            [first, second] => [first.clone(), second.clone()],
            _ => return,
        };
        match evaluate(&first, &second) {
            FlipOutcome::Match => {
                {
                    let GameSession { renderer, round, .. } = &mut *s;
                    for card_ref in [&first, &second] {
                        round.cards[card_ref.index].status = CardStatus::Matched;
                        renderer.mark_matched(card_ref);
                        renderer.disable_card(card_ref);
                    }
                }
                s.round.revealed.clear();
                s.round.lock = LockLevel::Unlocked;
                s.round.matched_pairs += 1;
                scoring::on_match(&mut s.round);
                push_score(&mut s);
                s.audio.play_match();
                s.round.matched_pairs == s.round.total_pairs
            }
            FlipOutcome::Mismatch => {
                scoring::on_mismatch(&mut s.round);
                push_score(&mut s);
                s.audio.play_mismatch();
                // Cards stay face-up for the whole delay window; the
                // resolution lock holds until the callback clears it.
                let delay = s.difficulty.config().mismatch_delay_ms;
                let game_id = s.round.game_id;
                let session_unflip = session.clone();
                let handle = s.scheduler.schedule_once(
                    Duration::from_millis(delay),
                    Box::new(move || unflip_pending(&session_unflip, game_id)),
                );
                s.round.mismatch_handle = Some(handle);
                false
            }
        }
    };
    if won {
        end_round(session, RoundOutcome::Won);
    }
}

fn push_score(s: &mut GameSession) {
    let score = s.round.score;
    let streak = s.round.streak;
    s.hud.set_score(score);
    s.hud.set_streak(streak);
}

fn unflip_pending(session: &Rc<RefCell<GameSession>>, game_id: u64) {
    let mut s = session.borrow_mut();
    if s.round.game_id != game_id {
        return;
    }
    s.round.mismatch_handle = None;
    let pending: Vec<CardRef> = s.round.revealed.drain(..).collect();
    {
        let GameSession { renderer, round, .. } = &mut *s;
        for card_ref in &pending {
            round.cards[card_ref.index].status = CardStatus::Hidden;
            renderer.hide_card(card_ref);
        }
    }
    s.round.lock = LockLevel::Unlocked;
}
