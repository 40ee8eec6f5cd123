//! Game session management.
//!
//! A `SessionManager` owns every running game, keyed by a random id, and
//! sweeps away sessions that have finished or gone idle.

use connect_four_core::{Game, GameConfig, GameError, GameSnapshot, MoveOutcome, COLS};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid or missing game_id")]
    NotFound(Uuid),

    #[error("Invalid column. Must be integer from 0 to {}", COLS - 1)]
    InvalidColumn(i64),
}

/// Session lifetime settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Sessions untouched for longer than this are discarded
    pub idle_timeout: Duration,
    /// How often the sweeper runs
    pub sweep_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(30 * 60),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

/// A running game and when it was last used.
pub struct Session {
    pub game: Game,
    pub last_active: Instant,
}

impl Session {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            last_active: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    fn is_expired(&self, now: Instant, idle_timeout: Duration) -> bool {
        self.game.is_game_over() || now.saturating_duration_since(self.last_active) > idle_timeout
    }
}

/// Result of a move request: what the engine said, and the state afterwards.
#[derive(Debug, Clone)]
pub struct MoveReport {
    pub outcome: Result<MoveOutcome, GameError>,
    pub state: GameSnapshot,
}

/// Registry of active games.
///
/// Each session sits behind its own map entry lock, so every operation on
/// one game runs to completion before the next one starts.
pub struct SessionManager {
    sessions: DashMap<Uuid, Session>,
    config: SessionConfig,
}

impl SessionManager {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Start a new game and return its id with the initial state.
    pub fn create(&self, config: GameConfig) -> (Uuid, GameSnapshot) {
        self.insert(Game::new(config))
    }

    /// Register an already constructed game.
    pub fn insert(&self, game: Game) -> (Uuid, GameSnapshot) {
        let id = Uuid::new_v4();
        let state = game.snapshot();
        info!(
            "Game {} started ({:?}, {} vs {})",
            id, game.mode(), state.players[0].name, state.players[1].name
        );
        self.sessions.insert(id, Session::new(game));
        (id, state)
    }

    /// Play a human move. Columns outside the board are refused before the
    /// game is consulted.
    pub fn apply_move(&self, id: Uuid, column: i64) -> Result<MoveReport, SessionError> {
        let mut session = self.sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        session.touch();

        let column = usize::try_from(column)
            .ok()
            .filter(|&c| c < COLS)
            .ok_or(SessionError::InvalidColumn(column))?;

        let outcome = session.game.apply_move(column);
        debug!("Game {}: move in column {} -> {:?}", id, column, outcome);
        Ok(MoveReport {
            outcome,
            state: session.game.snapshot(),
        })
    }

    /// Let the computer play its turn.
    pub fn computer_move(&self, id: Uuid) -> Result<MoveReport, SessionError> {
        let mut session = self.sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        session.touch();

        let outcome = session.game.computer_move();
        debug!("Game {}: computer move -> {:?}", id, outcome);
        Ok(MoveReport {
            outcome,
            state: session.game.snapshot(),
        })
    }

    /// Current state of a game.
    pub fn state(&self, id: Uuid) -> Result<GameSnapshot, SessionError> {
        let mut session = self.sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        session.touch();
        Ok(session.game.snapshot())
    }

    /// Drop every finished or idle session, returning how many went.
    pub fn sweep(&self, now: Instant) -> usize {
        let before = self.sessions.len();
        let idle_timeout = self.config.idle_timeout;
        self.sessions
            .retain(|_, session| !session.is_expired(now, idle_timeout));
        before.saturating_sub(self.sessions.len())
    }

    /// Run [`sweep`](Self::sweep) every `sweep_interval` until stopped.
    pub fn spawn_sweeper(self: &Arc<Self>) -> SweeperHandle {
        let manager = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(manager.config.sweep_interval);
            loop {
                interval.tick().await;
                let removed = manager.sweep(Instant::now());
                if removed > 0 {
                    info!(
                        "Swept {} expired game(s), {} still active",
                        removed,
                        manager.len()
                    );
                }
            }
        });
        SweeperHandle { handle }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

/// Handle to a running sweeper task
pub struct SweeperHandle {
    handle: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop sweeping
    pub fn stop(self) {
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}
