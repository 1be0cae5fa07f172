use crate::grid::Grid;
use crate::snake::{Cell, SnakeBody};

/// Result of checking the head against walls, body and goal after a move.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CollisionOutcome {
    None,
    WallHit,
    SelfHit,
    GoalEaten,
}

/// Classifies the snake's head position.
///
/// Checked in order: wall, own body, goal. The first match wins, so a fatal
/// outcome never reports a goal as eaten.
#[must_use]
pub fn resolve(grid: Grid, snake: &SnakeBody, goal: Option<Cell>) -> CollisionOutcome {
    let head = snake.head();

    if !grid.contains(head) {
        return CollisionOutcome::WallHit;
    }

    if snake.head_collides_with_body() {
        return CollisionOutcome::SelfHit;
    }

    if goal == Some(head) {
        return CollisionOutcome::GoalEaten;
    }

    CollisionOutcome::None
}
