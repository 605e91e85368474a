use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info};

use super::config::{self, ConfigError, Difficulty, DifficultyConfig, TimerStartPolicy};
use super::ports::{AudioFeedback, BoardRenderer, Hud, KeyValueStore};
use super::records;
use super::resolve;
use super::scheduler::Scheduler;
use super::state::{Card, CardRef, CardStatus, LockLevel, RoundOutcome, RoundState};
use super::summary;
use super::timer::{start_timer_once, stop_timer};

pub const AUDIO_PREF_KEY: &str = "arbor.audio.enabled";
pub const WIN_MESSAGE: &str = "You won! 🎉";
pub const TIMEOUT_MESSAGE: &str = "Time's up! Try again!";

pub struct GameSession {
    pub(crate) scheduler: Rc<dyn Scheduler>,
    pub(crate) renderer: Box<dyn BoardRenderer>,
    pub(crate) hud: Box<dyn Hud>,
    pub(crate) audio: Box<dyn AudioFeedback>,
    pub(crate) store: Box<dyn KeyValueStore>,
    pub(crate) difficulty: Difficulty,
    pub(crate) round: RoundState,
}

impl GameSession {
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        renderer: Box<dyn BoardRenderer>,
        hud: Box<dyn Hud>,
        audio: Box<dyn AudioFeedback>,
        store: Box<dyn KeyValueStore>,
    ) -> Result<Self, ConfigError> {
        config::validate_all()?;
        Ok(GameSession {
            scheduler,
            renderer,
            hud,
            audio,
            store,
            difficulty: Difficulty::default(),
            round: RoundState::default(),
        })
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn audio_enabled(&self) -> bool {
        self.store.get_string(AUDIO_PREF_KEY).as_deref() == Some("true")
    }

    pub fn set_audio_enabled(&mut self, enabled: bool) {
        self.store
            .set_string(AUDIO_PREF_KEY, if enabled { "true" } else { "false" });
    }

    pub fn best_run(&self, difficulty: Difficulty) -> records::BestRunRecord {
        records::load_best(self.store.as_ref(), difficulty)
    }
}

pub fn reset_round(
    session: &Rc<RefCell<GameSession>>,
    difficulty: Difficulty,
) -> Result<(), ConfigError> {
    {
        let mut s = session.borrow_mut();
        cancel_scheduled(&mut s);
        s.difficulty = difficulty;
        let config = difficulty.config();
        if let Err(err) = config::validate(config) {
            s.round.lock = LockLevel::Ended;
            return Err(err);
        }
        let refs = s.renderer.render_board(config.rows, config.cols);
        let cards = match validate_board(config, refs) {
            Ok(cards) => cards,
            Err(err) => {
                s.round.lock = LockLevel::Ended;
                return Err(err);
            }
        };
        debug!(
            "round reset: {} board {}x{}",
            difficulty.key(),
            config.rows,
            config.cols
        );
        s.round.begin(cards, config);
        s.hud.hide_summary();
        s.hud.set_move_counter(0);
        s.hud.set_score(0);
        s.hud.set_streak(0);
        s.hud.set_status_message("");
        s.hud.set_difficulty_label(config.label);
        match config.time_limit_secs {
            Some(limit) => {
                s.hud.set_timer_label(summary::TIME_LEFT_LABEL);
                s.hud.set_timer_value(limit);
            }
            None => {
                s.hud.set_timer_label(summary::TIME_ELAPSED_LABEL);
                s.hud.set_timer_value(0);
            }
        }
    }
    start_preview(session);
    Ok(())
}

pub fn handle_reveal(session: &Rc<RefCell<GameSession>>, index: usize) {
    let (arm_timer, pair_ready) = {
        let mut s = session.borrow_mut();
        if s.round.lock != LockLevel::Unlocked {
            return;
        }
        if s.round.revealed.len() == 2 {
            return;
        }
        let Some(card) = s.round.cards.get(index) else {
            return;
        };
        if card.status != CardStatus::Hidden {
            return;
        }

        let config = s.difficulty.config();
        let arm_timer =
            config.timer_start == TimerStartPolicy::OnFirstFlip && !s.round.preview_active;

        s.round.cards[index].status = CardStatus::Flipped;
        let handle = s.round.cards[index].handle.clone();
        s.renderer.reveal_card(&handle);
        s.round.revealed.push(handle);

        let pair_ready = s.round.revealed.len() == 2;
        if pair_ready {
            s.round.moves += 1;
            let moves = s.round.moves;
            s.hud.set_move_counter(moves);
            s.round.lock = LockLevel::ResolutionLocked;
        }
        (arm_timer, pair_ready)
    };
    if arm_timer {
        start_timer_once(session);
    }
    if pair_ready {
        resolve::resolve_pending(session);
    }
}

pub(crate) fn end_round(session: &Rc<RefCell<GameSession>>, outcome: RoundOutcome) {
    let mut s = session.borrow_mut();
    if s.round.lock == LockLevel::Ended {
        return;
    }
    cancel_scheduled(&mut s);
    s.round.lock = LockLevel::Ended;
    s.round.outcome = Some(outcome);
    {
        let GameSession { renderer, round, .. } = &mut *s;
        for card in &round.cards {
            renderer.disable_card(&card.handle);
        }
    }
    let won = outcome == RoundOutcome::Won;
    s.hud
        .set_status_message(if won { WIN_MESSAGE } else { TIMEOUT_MESSAGE });
    if won {
        s.audio.play_win();
    }
    let config = s.difficulty.config();
    let elapsed = summary::elapsed_secs(config, &s.round);
    let best = {
        let GameSession { store, round, difficulty, .. } = &mut *s;
        records::record_round(store.as_mut(), *difficulty, round, won, elapsed)
    };
    info!(
        "round over: {:?}, score {} in {} moves, {}s",
        outcome, s.round.score, s.round.moves, elapsed
    );
    let report = summary::build(s.difficulty, config, &s.round, won, elapsed, best);
    s.hud.show_summary(&report);
}

fn start_preview(session: &Rc<RefCell<GameSession>>) {
    let mut s = session.borrow_mut();
    let game_id = s.round.game_id;
    s.round.preview_active = true;
    s.round.lock = LockLevel::PreviewLocked;
    {
        let GameSession { renderer, round, .. } = &mut *s;
        for card in &round.cards {
            renderer.reveal_card(&card.handle);
        }
    }
    let preview_ms = s.difficulty.config().preview_ms;
    let session_done = session.clone();
    let handle = s.scheduler.schedule_once(
        Duration::from_millis(preview_ms),
        Box::new(move || finish_preview(&session_done, game_id)),
    );
    s.round.preview_handle = Some(handle);
}

fn finish_preview(session: &Rc<RefCell<GameSession>>, game_id: u64) {
    let arm_timer = {
        let mut s = session.borrow_mut();
        if s.round.game_id != game_id {
            return;
        }
        s.round.preview_handle = None;
        s.round.preview_active = false;
        {
            let GameSession { renderer, round, .. } = &mut *s;
            for card in &round.cards {
                renderer.hide_card(&card.handle);
            }
        }
        s.round.lock = LockLevel::Unlocked;
        debug!("preview over, input unlocked");
        s.difficulty.config().timer_start == TimerStartPolicy::AfterPreview
    };
    if arm_timer {
        start_timer_once(session);
    }
}

pub(crate) fn cancel_scheduled(s: &mut GameSession) {
    stop_timer(s);
    if let Some(handle) = s.round.preview_handle.take() {
        s.scheduler.cancel(handle);
    }
    s.round.preview_active = false;
    if let Some(handle) = s.round.mismatch_handle.take() {
        s.scheduler.cancel(handle);
    }
}

fn validate_board(
    config: &DifficultyConfig,
    refs: Vec<CardRef>,
) -> Result<Vec<Card>, ConfigError> {
    let expected = config.cell_count();
    if refs.len() as u32 != expected {
        return Err(ConfigError::BoardSizeMismatch { expected, got: refs.len() as u32 });
    }
    for (position, card) in refs.iter().enumerate() {
        if card.index != position {
            return Err(ConfigError::MisindexedCard { position, index: card.index });
        }
    }
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for card in &refs {
        *counts.entry(card.symbol.as_str()).or_insert(0) += 1;
    }
    if let Some((symbol, _)) = counts.into_iter().find(|&(_, count)| count != 2) {
        return Err(ConfigError::UnbalancedDeck(symbol.to_string()));
    }
    Ok(refs.into_iter().map(Card::face_down).collect())
}
