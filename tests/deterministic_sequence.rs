use grid_snake::config::SessionConfig;
use grid_snake::grid::Grid;
use grid_snake::input::Direction;
use grid_snake::session::{EndReason, GameSession, GameState};
use grid_snake::snake::{Cell, SnakeBody};

#[test]
fn stepwise_goal_collection_and_wall_collision() {
    let config = SessionConfig {
        grid: Grid::new(6, 4),
        initial_length: 1,
        win_score: 30,
    };
    let mut state = GameSession::new_with_seed(config, 0, 42).expect("config is valid");

    state.snake = SnakeBody::from_segments(vec![Cell::new(1, 1)]).expect("non-empty");
    state.goal = Some(Cell::new(2, 1));

    let snapshot = state.tick(None);
    assert_eq!(snapshot.state, GameState::Running);
    assert_eq!(snapshot.score, 1);
    assert_eq!(snapshot.cells.len(), 2);
    assert_eq!(snapshot.head(), Some(Cell::new(2, 1)));

    state.goal = None;
    let snapshot = state.tick(Some(Direction::Up));
    assert_eq!(snapshot.state, GameState::Running);
    assert_eq!(snapshot.head(), Some(Cell::new(2, 0)));

    let snapshot = state.tick(None);
    assert_eq!(snapshot.state, GameState::Lost);
    assert_eq!(snapshot.end_reason, Some(EndReason::WallHit));
}

#[test]
fn same_seed_and_inputs_replay_identically() {
    let inputs = [
        None,
        Some(Direction::Up),
        None,
        Some(Direction::Left),
        None,
        None,
        Some(Direction::Down),
        None,
    ];

    let run = || {
        let mut state = GameSession::new_with_seed(SessionConfig::default(), 0, 9001)
            .expect("config is valid");
        inputs
            .iter()
            .map(|intent| state.tick(*intent))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}
