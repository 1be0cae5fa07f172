use tracing::{debug, info, trace};

use crate::collision::{self, CollisionOutcome};
use crate::config::SessionConfig;
use crate::error::{BoardFull, ConfigError};
use crate::goal::GoalSpawner;
use crate::grid::Grid;
use crate::input::{direction_change_is_valid, Direction};
use crate::snake::{Cell, SnakeBody};

/// High-level session state. `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameState {
    Running,
    Won,
    Lost,
}

impl GameState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Why a session left `Running`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    WallHit,
    SelfHit,
    ScoreThreshold,
    BoardFilled,
}

/// Read-only view of a session after a tick, consumed by renderers.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
    pub grid: Grid,
    /// Occupied cells, head first.
    pub cells: Vec<Cell>,
    pub goal: Option<Cell>,
    pub score: u32,
    pub high_score: u32,
    pub state: GameState,
    pub end_reason: Option<EndReason>,
    pub direction: Direction,
    pub tick_count: u64,
}

impl Snapshot {
    /// Returns the head cell.
    #[must_use]
    pub fn head(&self) -> Option<Cell> {
        self.cells.first().copied()
    }
}

/// Complete mutable state for one game, advanced only through [`GameSession::tick`].
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: SnakeBody,
    pub goal: Option<Cell>,
    pub score: u32,
    pub tick_count: u64,
    direction: Direction,
    state: GameState,
    end_reason: Option<EndReason>,
    high_score: u32,
    config: SessionConfig,
    spawner: GoalSpawner,
}

impl GameSession {
    /// Creates a session with a centred snake heading right and a first goal.
    ///
    /// `high_score` is the persisted best score this session competes with.
    pub fn new_with_seed(
        config: SessionConfig,
        high_score: u32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = config.grid;
        let start = Cell::new(i32::from(grid.width / 2), i32::from(grid.height / 2));
        let direction = Direction::Right;
        let snake = SnakeBody::straight(start, direction, config.initial_length)?;
        let mut spawner = GoalSpawner::with_seed(seed);
        let first_goal = spawner.place(grid, &snake);

        let mut session = Self {
            snake,
            goal: first_goal.ok(),
            score: 0,
            tick_count: 0,
            direction,
            state: GameState::Running,
            end_reason: None,
            high_score,
            config,
            spawner,
        };

        if first_goal == Err(BoardFull) {
            session.finish(GameState::Won, EndReason::BoardFilled);
        }

        info!(
            width = grid.width,
            height = grid.height,
            length = config.initial_length,
            seed,
            "session started"
        );
        Ok(session)
    }

    /// Advances the simulation by one step and returns the resulting snapshot.
    ///
    /// Finished sessions ignore the call and return their last snapshot.
    pub fn tick(&mut self, intent: Option<Direction>) -> Snapshot {
        if self.state.is_terminal() {
            trace!(state = ?self.state, "tick on finished session ignored");
            return self.snapshot();
        }

        if self.score >= self.config.win_score {
            self.finish(GameState::Won, EndReason::ScoreThreshold);
            return self.snapshot();
        }

        if let Some(direction) = intent {
            self.steer(direction);
        }

        self.tick_count += 1;

        // Grow before moving when the head is about to land on the goal, so
        // the length gain and the score land on the same tick.
        if self.goal == Some(self.snake.next_head(self.direction)) {
            self.snake.grow();
        }
        self.snake.move_toward(self.direction);

        match collision::resolve(self.config.grid, &self.snake, self.goal) {
            CollisionOutcome::None => {}
            CollisionOutcome::WallHit => self.finish(GameState::Lost, EndReason::WallHit),
            CollisionOutcome::SelfHit => self.finish(GameState::Lost, EndReason::SelfHit),
            CollisionOutcome::GoalEaten => self.eat_goal(),
        }

        self.snapshot()
    }

    /// Returns the current state without advancing.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.config.grid,
            cells: self.snake.segments().copied().collect(),
            goal: self.goal,
            score: self.score,
            high_score: self.high_score,
            state: self.state,
            end_reason: self.end_reason,
            direction: self.direction,
            tick_count: self.tick_count,
        }
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Best score known to this session; includes its own score once finished.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    fn steer(&mut self, direction: Direction) {
        if self.snake.len() > 1 && !direction_change_is_valid(self.direction, direction) {
            trace!(current = ?self.direction, requested = ?direction, "reverse intent ignored");
            return;
        }

        self.direction = direction;
    }

    fn eat_goal(&mut self) {
        self.score += 1;
        debug!(score = self.score, length = self.snake.len(), "goal eaten");

        match self.spawner.place(self.config.grid, &self.snake) {
            Ok(cell) => self.goal = Some(cell),
            Err(BoardFull) => {
                self.goal = None;
                self.finish(GameState::Won, EndReason::BoardFilled);
            }
        }
    }

    fn finish(&mut self, state: GameState, reason: EndReason) {
        self.state = state;
        self.end_reason = Some(reason);
        self.high_score = self.high_score.max(self.score);
        info!(
            state = ?state,
            reason = ?reason,
            score = self.score,
            high_score = self.high_score,
            ticks = self.tick_count,
            "session finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SessionConfig;
    use crate::grid::Grid;
    use crate::input::Direction;
    use crate::snake::{Cell, SnakeBody};

    use super::{EndReason, GameSession, GameState};

    fn session(width: u16, height: u16, length: u16, seed: u64) -> GameSession {
        let config = SessionConfig {
            grid: Grid::new(width, height),
            initial_length: length,
            win_score: 30,
        };
        GameSession::new_with_seed(config, 0, seed).expect("config is valid")
    }

    #[test]
    fn new_session_is_centred_and_has_a_free_goal() {
        let state = session(40, 40, 3, 1);

        let cells: Vec<Cell> = state.snake.segments().copied().collect();
        assert_eq!(
            cells,
            vec![Cell::new(20, 20), Cell::new(19, 20), Cell::new(18, 20)]
        );
        let goal = state.goal.expect("goal is placed");
        assert!(!state.snake.occupies(goal));
        assert_eq!(state.state(), GameState::Running);
        assert_eq!(state.direction(), Direction::Right);
    }

    #[test]
    fn snake_grows_and_scores_on_the_tick_it_eats() {
        let mut state = session(10, 10, 1, 1);
        state.snake = SnakeBody::from_segments(vec![Cell::new(1, 1)]).expect("non-empty");
        state.goal = Some(Cell::new(3, 1));

        state.tick(None);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.score, 0);

        state.tick(None);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.score, 1);
        let goal = state.goal.expect("new goal is placed");
        assert!(!state.snake.occupies(goal));
    }

    #[test]
    fn snake_collision_with_wall_sets_lost() {
        let mut state = session(4, 4, 1, 2);
        state.snake = SnakeBody::from_segments(vec![Cell::new(3, 1)]).expect("non-empty");

        let snapshot = state.tick(None);

        assert_eq!(snapshot.state, GameState::Lost);
        assert_eq!(snapshot.end_reason, Some(EndReason::WallHit));
        assert_eq!(snapshot.head(), Some(Cell::new(4, 1)));
    }

    #[test]
    fn closed_loop_is_lost_on_the_reentry_tick() {
        let mut state = session(10, 10, 1, 3);
        state.snake = SnakeBody::straight(Cell::new(5, 5), Direction::Right, 5).expect("non-zero");
        state.goal = None;

        assert_eq!(state.tick(Some(Direction::Down)).state, GameState::Running);
        assert_eq!(state.tick(Some(Direction::Left)).state, GameState::Running);
        let snapshot = state.tick(Some(Direction::Up));

        assert_eq!(snapshot.state, GameState::Lost);
        assert_eq!(snapshot.end_reason, Some(EndReason::SelfHit));
        assert_eq!(snapshot.tick_count, 3);
    }

    #[test]
    fn moving_into_the_vacating_tail_is_safe() {
        let mut state = session(10, 10, 1, 4);
        state.snake = SnakeBody::from_segments(vec![
            Cell::new(5, 5),
            Cell::new(4, 5),
            Cell::new(4, 6),
            Cell::new(5, 6),
        ])
        .expect("non-empty");
        state.goal = None;

        let snapshot = state.tick(Some(Direction::Down));

        assert_eq!(snapshot.state, GameState::Running);
        assert_eq!(snapshot.head(), Some(Cell::new(5, 6)));
    }

    #[test]
    fn reverse_intent_is_ignored_for_long_snakes() {
        let mut state = session(20, 20, 3, 5);
        state.goal = None;
        let head = state.snake.head();

        let snapshot = state.tick(Some(Direction::Left));

        assert_eq!(snapshot.state, GameState::Running);
        assert_eq!(snapshot.direction, Direction::Right);
        assert_eq!(snapshot.head(), Some(Cell::new(head.x + 1, head.y)));
    }

    #[test]
    fn single_cell_snake_may_reverse() {
        let mut state = session(20, 20, 1, 6);
        state.goal = None;
        let head = state.snake.head();

        let snapshot = state.tick(Some(Direction::Left));

        assert_eq!(snapshot.direction, Direction::Left);
        assert_eq!(snapshot.head(), Some(Cell::new(head.x - 1, head.y)));
    }

    #[test]
    fn finished_session_ignores_ticks() {
        let mut state = session(4, 4, 1, 7);
        state.snake = SnakeBody::from_segments(vec![Cell::new(3, 0)]).expect("non-empty");
        let lost = state.tick(None);
        assert_eq!(lost.state, GameState::Lost);

        let again = state.tick(Some(Direction::Down));

        assert_eq!(again, lost);
    }

    #[test]
    fn reaching_win_score_wins_without_moving() {
        let mut state = session(40, 40, 3, 8);
        state.score = 30;
        let before: Vec<Cell> = state.snake.segments().copied().collect();

        let snapshot = state.tick(Some(Direction::Down));

        assert_eq!(snapshot.state, GameState::Won);
        assert_eq!(snapshot.end_reason, Some(EndReason::ScoreThreshold));
        assert_eq!(snapshot.cells, before);
        assert_eq!(snapshot.high_score, 30);
    }

    #[test]
    fn filling_the_board_wins() {
        let mut state = session(2, 2, 2, 9);
        state.snake = SnakeBody::from_segments(vec![
            Cell::new(1, 1),
            Cell::new(0, 1),
            Cell::new(0, 0),
        ])
        .expect("non-empty");
        state.goal = Some(Cell::new(1, 0));

        let snapshot = state.tick(Some(Direction::Up));

        assert_eq!(snapshot.state, GameState::Won);
        assert_eq!(snapshot.end_reason, Some(EndReason::BoardFilled));
        assert_eq!(snapshot.cells.len(), 4);
        assert_eq!(snapshot.goal, None);
        assert_eq!(snapshot.score, 1);
    }

    #[test]
    fn lost_session_keeps_higher_previous_high_score() {
        let config = SessionConfig {
            grid: Grid::new(5, 5),
            initial_length: 1,
            win_score: 30,
        };
        let mut state = GameSession::new_with_seed(config, 12, 0).expect("config is valid");
        state.score = 4;
        state.snake = SnakeBody::from_segments(vec![Cell::new(4, 2)]).expect("non-empty");

        let snapshot = state.tick(None);

        assert_eq!(snapshot.state, GameState::Lost);
        assert_eq!(snapshot.high_score, 12);
    }

    #[test]
    fn length_changes_only_when_a_goal_is_eaten() {
        let mut state = session(30, 30, 3, 10);
        let turns = [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Right,
        ];

        for tick in 0..200 {
            if state.state().is_terminal() {
                break;
            }
            let before_len = state.snake.len();
            let before_score = state.score;
            let before_head = state.snake.head();
            let intent = turns[tick % turns.len()];

            let snapshot = state.tick(Some(intent));
            if snapshot.state.is_terminal() {
                break;
            }

            let (dx, dy) = snapshot.direction.unit_vector();
            assert_eq!(
                snapshot.head(),
                Some(Cell::new(before_head.x + dx, before_head.y + dy))
            );
            assert!(snapshot.score >= before_score);
            if snapshot.score > before_score {
                assert_eq!(snapshot.cells.len(), before_len + 1);
            } else {
                assert_eq!(snapshot.cells.len(), before_len);
            }
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SessionConfig {
            grid: Grid::new(4, 4),
            initial_length: 4,
            win_score: 30,
        };

        assert!(GameSession::new_with_seed(config, 0, 0).is_err());
    }
}
