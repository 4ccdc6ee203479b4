use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ai::Agent;
use crate::error::SessionError;
use crate::game::{Connect4Engine, Player, COLS, ROWS};

/// Session layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Idle time after which a session is swept.
    pub ttl_secs: u64,
    /// Exploration rate used for the AI's replies.
    pub ai_exploration_rate: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            ttl_secs: 3600,
            ai_exploration_rate: 0.0,
        }
    }
}

/// Wire view of a session after a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub session_id: String,
    pub board: [[u8; COLS]; ROWS],
    pub ai_player: u8,
    pub human_player: u8,
    pub current_player: u8,
    pub game_over: bool,
    /// 1 or 2 for a player, 3 for a draw.
    pub winner: Option<u8>,
}

type AgentFactory = dyn Fn() -> Box<dyn Agent + Send> + Send + Sync;

struct Session {
    engine: Connect4Engine,
    agent: Box<dyn Agent + Send>,
    ai_player: Player,
    last_accessed: Instant,
}

impl Session {
    fn snapshot(&self, session_id: &str) -> GameSnapshot {
        GameSnapshot {
            session_id: session_id.to_string(),
            board: self.engine.board().to_rows(),
            ai_player: self.ai_player.id(),
            human_player: self.ai_player.other().id(),
            current_player: self.engine.current_player().id(),
            game_over: self.engine.is_game_over(),
            winner: self.engine.winner().map(|w| w.id()),
        }
    }

    /// Let the AI move if it is its turn and the game is still running.
    fn ai_reply(&mut self, exploration_rate: f32) {
        if self.engine.is_game_over() || self.engine.current_player() != self.ai_player {
            return;
        }
        let action = self.agent.select_action(&self.engine, exploration_rate);
        if self.engine.step(action).valid {
            return;
        }
        warn!(action, agent = self.agent.name(), "AI chose an illegal column");
        if let Some(&fallback) = self.engine.valid_actions().first() {
            self.engine.step(fallback);
        }
    }
}

/// Keyed store of live games. Each session owns its engine and AI agent and
/// sits behind its own lock, so moves in one session never wait on another.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
    config: SessionConfig,
    agent_factory: Box<AgentFactory>,
}

impl SessionStore {
    pub fn new<F>(config: SessionConfig, agent_factory: F) -> Self
    where
        F: Fn() -> Box<dyn Agent + Send> + Send + Sync + 'static,
    {
        SessionStore {
            sessions: RwLock::new(HashMap::new()),
            config,
            agent_factory: Box::new(agent_factory),
        }
    }

    fn ttl(&self) -> Duration {
        Duration::from_secs(self.config.ttl_secs)
    }

    /// Start a new game. The AI side is random unless `ai_player` is given; an
    /// AI playing first makes its opening move before this returns.
    pub fn create(&self, ai_player: Option<Player>) -> GameSnapshot {
        let now = Instant::now();
        self.sweep_expired(now);

        let mut rng = rand::rng();
        let ai_player = ai_player.unwrap_or(if rng.random::<bool>() {
            Player::One
        } else {
            Player::Two
        });
        let session_id = format!("{:032x}", rng.random::<u128>());

        let mut session = Session {
            engine: Connect4Engine::new(),
            agent: (self.agent_factory)(),
            ai_player,
            last_accessed: now,
        };
        session.ai_reply(self.config.ai_exploration_rate);
        let snapshot = session.snapshot(&session_id);

        info!(
            session_id = %session_id,
            ai_player = ai_player.id(),
            agent = session.agent.name(),
            "session created"
        );
        self.sessions
            .write()
            .insert(session_id, Arc::new(Mutex::new(session)));
        snapshot
    }

    fn session(&self, session_id: &str) -> Result<Arc<Mutex<Session>>, SessionError> {
        self.sessions
            .read()
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    /// Apply the human's move, then the AI's reply unless the game ended.
    pub fn play(&self, session_id: &str, column: i64) -> Result<GameSnapshot, SessionError> {
        let session = self.session(session_id)?;
        let mut session = session.lock();
        session.last_accessed = Instant::now();

        if session.engine.is_game_over() {
            return Err(SessionError::GameOver);
        }
        if session.engine.current_player() == session.ai_player {
            return Err(SessionError::NotYourTurn);
        }

        let col = usize::try_from(column).map_err(|_| SessionError::InvalidMove(column))?;
        let result = session.engine.step(col);
        if !result.valid {
            return Err(SessionError::InvalidMove(column));
        }
        debug!(session_id, column = col, done = result.done, "human moved");

        session.ai_reply(self.config.ai_exploration_rate);
        Ok(session.snapshot(session_id))
    }

    /// Current view of a session without touching it.
    pub fn snapshot(&self, session_id: &str) -> Result<GameSnapshot, SessionError> {
        let session = self.session(session_id)?;
        let session = session.lock();
        Ok(session.snapshot(session_id))
    }

    pub fn remove(&self, session_id: &str) -> bool {
        self.sessions.write().remove(session_id).is_some()
    }

    /// Drop sessions idle for longer than the TTL as of `now`. Returns how
    /// many were removed.
    pub fn sweep_expired(&self, now: Instant) -> usize {
        let ttl = self.ttl();
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, session| {
            // A session busy with a move is in use, not idle.
            match session.try_lock() {
                Some(session) => now.saturating_duration_since(session.last_accessed) <= ttl,
                None => true,
            }
        });
        let removed = before - sessions.len();
        if removed > 0 {
            info!(removed, remaining = sessions.len(), "swept expired sessions");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
