use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::info;

use super::scheduler::ControlFlow;
use super::session::{GameSession, end_round};
use super::state::RoundOutcome;

pub fn start_timer_once(session: &Rc<RefCell<GameSession>>) {
    let mut s = session.borrow_mut();
    if s.round.timer_started || s.round.timer_handle.is_some() {
        return;
    }
    s.round.timer_started = true;
    let game_id = s.round.game_id;
    let countdown = s.difficulty.config().is_countdown();
    let session_tick = session.clone();
    let handle = s.scheduler.schedule_repeating(
        Duration::from_secs(1),
        Box::new(move || {
            if countdown {
                countdown_tick(&session_tick, game_id)
            } else {
                count_up_tick(&session_tick, game_id)
            }
        }),
    );
    s.round.timer_handle = Some(handle);
}

pub(crate) fn stop_timer(s: &mut GameSession) {
    if let Some(handle) = s.round.timer_handle.take() {
        s.scheduler.cancel(handle);
    }
    s.round.timer_started = false;
}

fn count_up_tick(session: &Rc<RefCell<GameSession>>, game_id: u64) -> ControlFlow {
    let mut s = session.borrow_mut();
    if s.round.game_id != game_id {
        return ControlFlow::Break;
    }
    s.round.time_elapsed += 1;
    let elapsed = s.round.time_elapsed;
    s.hud.set_timer_value(elapsed);
    ControlFlow::Continue
}

fn countdown_tick(session: &Rc<RefCell<GameSession>>, game_id: u64) -> ControlFlow {
    {
        let mut s = session.borrow_mut();
        if s.round.game_id != game_id {
            return ControlFlow::Break;
        }
        s.round.time_left = s.round.time_left.saturating_sub(1);
        let left = s.round.time_left;
        s.hud.set_timer_value(left);
        if left > 0 {
            return ControlFlow::Continue;
        }
        s.round.timer_handle = None;
    }
    info!("countdown exhausted");
    end_round(session, RoundOutcome::TimedOut);
    ControlFlow::Break
}
