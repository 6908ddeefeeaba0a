use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    /// A bomb was hit, waiting for [`Session::retry`].
    Lost,
    /// Every safe cell is revealed, waiting for [`Session::advance`].
    Cleared,
}

impl Phase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Playing
    }
}

/// Snapshot of the values the surrounding UI displays and persists.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub level: Level,
    pub total_score: Score,
    pub level_score: Score,
    pub joker_available: bool,
    pub joker_active: bool,
}

/// A play session: the current grid plus everything that survives across attempts.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    seed: u64,
    epoch: u64,
    level: Level,
    total_score: Score,
    level_score: Score,
    joker: JokerState,
    phase: Phase,
    grid: Grid,
}

impl Session {
    /// Starts at the stored progress, `seed` drives every grid of the session.
    pub fn new(config: GameConfig, progress: Progress, seed: u64) -> Self {
        let level = progress.level.max(1);
        let mut session = Self {
            config,
            seed,
            epoch: 0,
            level,
            total_score: progress.score,
            level_score: 0,
            joker: JokerState::default(),
            phase: Phase::default(),
            grid: Self::generate(config, seed, 0, level),
        };
        session.check_trivially_cleared();
        session
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn joker(&self) -> JokerState {
        self.joker
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Identifies the current grid instance, bumped every time the grid is replaced.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn hints(&self) -> Hints {
        self.grid.hints()
    }

    pub fn pending_preview(&self) -> Option<PreviewTicket> {
        self.joker.pending_preview()
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            level: self.level,
            total_score: self.total_score,
            level_score: self.level_score,
            joker_available: !matches!(self.joker, JokerState::Spent),
            joker_active: matches!(self.joker, JokerState::Armed | JokerState::Previewing(_)),
        }
    }

    /// Arms the joker, or disarms it when already armed.
    pub fn toggle_joker(&mut self) -> Result<JokerState> {
        self.check_playing()?;
        self.joker = self.joker.toggled()?;
        Ok(self.joker)
    }

    /// Taps the cell at `coords`. `now` is only used to schedule the end of a joker preview.
    pub fn reveal(&mut self, coords: Coord2, now: Instant) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_playing()?;

        let outcome = self.grid.reveal(coords, self.joker.is_armed())?;
        match outcome {
            RevealOutcome::Unchanged => {}
            RevealOutcome::PreviewReveal => {
                let ticket = PreviewTicket {
                    epoch: self.epoch,
                    coords,
                    expires_at: now + self.config.preview,
                };
                log::debug!("Joker preview at {:?} on grid {}", coords, self.epoch);
                self.joker = JokerState::Previewing(ticket);
            }
            RevealOutcome::BombHit => {
                log::debug!("Bomb hit at {:?}, level {} lost", coords, self.level);
                self.end_attempt(Phase::Lost);
            }
            RevealOutcome::SafeReveal { points } => {
                self.level_score += Score::from(points);
                if self.grid.is_level_cleared() {
                    log::debug!("Level {} cleared with {} points", self.level, self.level_score);
                    self.end_attempt(Phase::Cleared);
                }
            }
        }
        Ok(outcome)
    }

    /// Hides the previewed cell and spends the joker. Tickets from a replaced grid or an ended attempt are
    /// ignored, returns whether the grid changed.
    pub fn expire_preview(&mut self, ticket: PreviewTicket) -> Result<bool> {
        if self.joker.pending_preview() != Some(ticket) {
            log::debug!(
                "Ignoring stale preview ticket for grid {}, current grid {}",
                ticket.epoch,
                self.epoch
            );
            return Ok(false);
        }

        let changed = self.grid.end_preview(ticket.coords)?;
        self.joker = JokerState::Spent;
        Ok(changed)
    }

    /// Expires the pending preview if its deadline has passed.
    pub fn poll_preview(&mut self, now: Instant) -> Result<bool> {
        match self.joker.pending_preview() {
            Some(ticket) if ticket.is_expired(now) => self.expire_preview(ticket),
            _ => Ok(false),
        }
    }

    /// Fresh grid for the same level after a bomb.
    pub fn retry(&mut self) -> Result<()> {
        if self.phase != Phase::Lost {
            return Err(GameError::NotLost);
        }
        self.start_attempt();
        Ok(())
    }

    /// Credits the level reward and moves on to the next level.
    pub fn advance(&mut self) -> Result<LevelReward> {
        if self.phase != Phase::Cleared {
            return Err(GameError::NotCleared);
        }

        let reward = compute_level_clear_reward(self.level, self.level_score);
        self.total_score = self.total_score.saturating_add(reward.earned);
        self.level = self.level.saturating_add(1);
        self.start_attempt();
        Ok(reward)
    }

    /// Ends the session, handing back what the profile should store.
    pub fn quit(self) -> Progress {
        log::debug!("Session ended at level {} with {} points", self.level, self.total_score);
        Progress {
            level: self.level,
            score: self.total_score,
        }
    }

    fn generate(config: GameConfig, seed: u64, epoch: u64, level: Level) -> Grid {
        let grid_seed = seed ^ epoch.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        RandomGridGenerator::new(grid_seed).generate(config, level)
    }

    fn start_attempt(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.grid = Self::generate(self.config, self.seed, self.epoch, self.level);
        self.level_score = 0;
        self.joker = JokerState::default();
        self.phase = Phase::Playing;
        self.check_trivially_cleared();
    }

    // A grid made only of bombs has nothing left to reveal.
    fn check_trivially_cleared(&mut self) {
        if self.grid.is_level_cleared() {
            log::warn!("Level {} grid has no safe cells, cleared immediately", self.level);
            self.phase = Phase::Cleared;
        }
    }

    fn end_attempt(&mut self, phase: Phase) {
        if let Some(ticket) = self.joker.pending_preview() {
            log::debug!("Dropping pending preview at {:?}", ticket.coords);
            self.joker = JokerState::Spent;
        }
        self.phase = phase;
    }

    fn check_playing(&self) -> Result<()> {
        if self.phase.is_playing() {
            Ok(())
        } else {
            Err(GameError::AlreadyEnded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;

    fn find(session: &Session, bomb: bool) -> Option<Coord2> {
        iter_coords(session.grid().size()).find(|&coords| {
            let cell = session.grid()[coords];
            cell.is_bomb() == bomb && !cell.is_revealed()
        })
    }

    /// First seed whose opening grid has both a bomb and at least two safe cells.
    fn mixed_session(level: Level) -> Session {
        (0..)
            .map(|seed| Session::new(GameConfig::default(), Progress { level, score: 0 }, seed))
            .find(|session| {
                let grid = session.grid();
                grid.bomb_count() > 0 && grid.safe_cell_count() > 1
            })
            .unwrap()
    }

    fn clear_level(session: &mut Session, now: Instant) -> RevealOutcome {
        let mut last = RevealOutcome::Unchanged;
        while let Some(coords) = find(session, false) {
            last = session.reveal(coords, now).unwrap();
        }
        last
    }

    #[test]
    fn new_session_resumes_progress() {
        let session = Session::new(GameConfig::default(), Progress { level: 4, score: 100 }, 1);

        assert_eq!(
            session.state(),
            SessionState {
                level: 4,
                total_score: 100,
                level_score: 0,
                joker_available: true,
                joker_active: false,
            }
        );
        assert_eq!(session.grid().size(), (ROWS, COLS));
    }

    #[test]
    fn level_zero_progress_starts_at_one() {
        let session = Session::new(GameConfig::default(), Progress { level: 0, score: 0 }, 1);

        assert_eq!(session.level(), 1);
    }

    #[test]
    fn safe_reveal_adds_points_once() {
        let mut session = mixed_session(2);
        let now = Instant::now();
        let coords = find(&session, false).unwrap();
        let value = session.grid()[coords].value();

        let outcome = session.reveal(coords, now).unwrap();

        assert_eq!(outcome, RevealOutcome::SafeReveal { points: value });
        assert_eq!(session.state().level_score, Score::from(value));
        assert_eq!(session.reveal(coords, now).unwrap(), RevealOutcome::Unchanged);
        assert_eq!(session.state().level_score, Score::from(value));
    }

    #[test]
    fn bomb_ends_attempt_until_retry() {
        let mut session = mixed_session(3);
        let now = Instant::now();
        let safe = find(&session, false).unwrap();
        session.reveal(safe, now).unwrap();
        session.toggle_joker().unwrap();
        let peek = find(&session, false).unwrap();
        session.reveal(peek, now).unwrap();
        session.poll_preview(now + JOKER_PREVIEW).unwrap();
        assert!(!session.state().joker_available);

        let bomb = find(&session, true).unwrap();
        assert_eq!(session.reveal(bomb, now).unwrap(), RevealOutcome::BombHit);
        assert_eq!(session.phase(), Phase::Lost);
        assert_eq!(session.reveal(safe, now), Err(GameError::AlreadyEnded));
        assert_eq!(session.toggle_joker(), Err(GameError::AlreadyEnded));

        let epoch = session.epoch();
        session.retry().unwrap();

        assert_eq!(session.phase(), Phase::Playing);
        assert_ne!(session.epoch(), epoch);
        assert_eq!(session.state().level, 3);
        assert_eq!(session.state().level_score, 0);
        assert!(session.state().joker_available);
        assert!(session.grid().cells().iter().all(|cell| !cell.is_revealed()));
    }

    #[test]
    fn retry_requires_a_loss() {
        let mut session = mixed_session(1);

        assert_eq!(session.retry(), Err(GameError::NotLost));
    }

    #[test]
    fn clearing_level_credits_bonus() {
        let mut session = mixed_session(2);
        let now = Instant::now();
        assert_eq!(session.advance(), Err(GameError::NotCleared));

        let last = clear_level(&mut session, now);
        assert!(matches!(last, RevealOutcome::SafeReveal { .. }));
        assert_eq!(session.phase(), Phase::Cleared);
        let level_score = session.state().level_score;

        let reward = session.advance().unwrap();

        assert_eq!(reward, compute_level_clear_reward(2, level_score));
        assert_eq!(reward.bonus_percent, 20);
        let state = session.state();
        assert_eq!(state.level, 3);
        assert_eq!(state.total_score, reward.earned);
        assert_eq!(state.level_score, 0);
        assert_eq!(session.quit(), Progress { level: 3, score: reward.earned });
    }

    #[test]
    fn bomb_only_grid_is_cleared_immediately() {
        let config = GameConfig::new((1, 1), JOKER_PREVIEW);

        let session = (0..)
            .map(|seed| Session::new(config, Progress { level: 20, score: 0 }, seed))
            .find(|session| session.grid().bomb_count() == 1)
            .unwrap();

        assert_eq!(session.phase(), Phase::Cleared);
    }

    #[test]
    fn joker_previews_bomb_without_losing() {
        let mut session = mixed_session(3);
        let now = Instant::now();
        let bomb = find(&session, true).unwrap();

        assert_eq!(session.toggle_joker(), Ok(JokerState::Armed));
        assert!(session.state().joker_active);
        assert_eq!(session.reveal(bomb, now).unwrap(), RevealOutcome::PreviewReveal);

        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.state().level_score, 0);
        assert!(session.grid()[bomb].is_preview());
        assert_eq!(session.toggle_joker(), Err(GameError::JokerUnavailable));

        assert!(!session.poll_preview(now + Duration::from_secs(1)).unwrap());
        assert!(session.grid()[bomb].is_preview());
        assert!(session.poll_preview(now + JOKER_PREVIEW).unwrap());

        assert_eq!(session.grid()[bomb].state(), CellState::Hidden);
        assert_eq!(session.joker(), JokerState::Spent);
        assert!(!session.state().joker_available);
        assert_eq!(session.toggle_joker(), Err(GameError::JokerUnavailable));
    }

    #[test]
    fn joker_stays_active_until_preview_expires() {
        let mut session = mixed_session(2);
        let now = Instant::now();
        session.toggle_joker().unwrap();
        let peek = find(&session, false).unwrap();
        session.reveal(peek, now).unwrap();

        let state = session.state();
        assert!(state.joker_available);
        assert!(state.joker_active);
        assert_eq!(session.toggle_joker(), Err(GameError::JokerUnavailable));
        assert_eq!(session.state(), state);

        session.poll_preview(now + JOKER_PREVIEW).unwrap();

        let state = session.state();
        assert!(!state.joker_available);
        assert!(!state.joker_active);
        assert_eq!(state.level_score, 0);
    }

    #[test]
    fn taps_during_preview_are_normal_reveals() {
        let mut session = mixed_session(2);
        let now = Instant::now();
        session.toggle_joker().unwrap();
        let peek = find(&session, false).unwrap();
        session.reveal(peek, now).unwrap();

        let other = find(&session, false).unwrap();
        assert_ne!(other, peek);
        let outcome = session.reveal(other, now).unwrap();

        assert!(matches!(outcome, RevealOutcome::SafeReveal { .. }));
    }

    #[test]
    fn stale_ticket_is_ignored_after_retry() {
        let mut session = mixed_session(3);
        let now = Instant::now();
        session.toggle_joker().unwrap();
        let peek = find(&session, false).unwrap();
        session.reveal(peek, now).unwrap();
        let ticket = session.pending_preview().unwrap();

        let bomb = find(&session, true).unwrap();
        session.reveal(bomb, now).unwrap();
        assert_eq!(session.pending_preview(), None);
        session.retry().unwrap();

        assert!(!session.expire_preview(ticket).unwrap());
        assert!(!session.poll_preview(now + JOKER_PREVIEW).unwrap());
        assert!(session.state().joker_available);
        assert!(!session.grid()[peek].is_revealed());
    }

    #[test]
    fn reveal_rejects_out_of_bounds() {
        let mut session = mixed_session(1);

        assert_eq!(session.reveal((ROWS, 0), Instant::now()), Err(GameError::InvalidCoords));
    }

    #[test]
    fn state_serializes_for_the_ui() {
        let session = Session::new(GameConfig::default(), Progress { level: 2, score: 9 }, 5);

        let json = serde_json::to_value(session.state()).unwrap();

        assert_eq!(json["level"], 2);
        assert_eq!(json["total_score"], 9);
        assert_eq!(json["joker_available"], true);
    }
}
