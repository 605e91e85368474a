pub mod game;

pub use game::config::{ConfigError, Difficulty, DifficultyConfig, TimerStartPolicy};
pub use game::ports::{AudioFeedback, BoardRenderer, Hud, KeyValueStore, SilentAudio};
pub use game::records::BestRunRecord;
pub use game::scheduler::{ControlFlow, ManualScheduler, Scheduler, TaskId};
pub use game::session::{
    AUDIO_PREF_KEY, GameSession, TIMEOUT_MESSAGE, WIN_MESSAGE, handle_reveal, reset_round,
};
pub use game::state::{Card, CardRef, CardStatus, LockLevel, RoundOutcome, RoundState};
pub use game::summary::{Badge, RoundSummary, TIME_ELAPSED_LABEL, TIME_LEFT_LABEL};
pub use game::timer::start_timer_once;
