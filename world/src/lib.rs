#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Quiz.
//!
//! The world owns the decoded [`MazeLayout`], a per-cell overlay tracking which
//! placed objects are still active, and the player's position. The layout is
//! never mutated after decoding; consuming an object only flips its overlay bit.

use maze_quiz_core::{CellCoord, Command, Direction, Event, MoveOutcome, ObjectKind};
use maze_quiz_system_decoder::MazeLayout;

const LOG_TARGET: &str = "maze_quiz::world";

/// Cell the player occupies when a world is created.
pub const PLAYER_START: CellCoord = CellCoord::new(0, 0);

/// Represents the authoritative Maze Quiz world state.
#[derive(Debug)]
pub struct World {
    layout: MazeLayout,
    overlay: ObjectOverlay,
    player: CellCoord,
}

impl World {
    /// Creates a world with the player at the start cell and every object active.
    #[must_use]
    pub fn new(layout: MazeLayout) -> Self {
        let overlay = ObjectOverlay::from_layout(&layout);
        Self {
            layout,
            overlay,
            player: PLAYER_START,
        }
    }

    /// Attempts to move the player one cell in the provided direction.
    ///
    /// Walls are read from the collision matrix of the current cell. Landing on
    /// an active object consumes it and reports its kind.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        let from = self.player;
        let matrix = self.layout.matrix();
        let Some(mask) = matrix.mask(from) else {
            return MoveOutcome::Blocked;
        };

        if mask.has_wall(direction.edge()) {
            tracing::debug!(target: LOG_TARGET, %from, %direction, "move blocked by wall");
            return MoveOutcome::Blocked;
        }

        // Only reachable when a lenient decode accepted a missing border wall.
        let Some(to) = from
            .step(direction)
            .filter(|candidate| matrix.contains(*candidate))
        else {
            tracing::warn!(
                target: LOG_TARGET,
                %from,
                %direction,
                "open edge leads outside the maze; treating move as blocked"
            );
            return MoveOutcome::Blocked;
        };

        self.player = to;
        tracing::debug!(target: LOG_TARGET, %from, %to, "player moved");

        let triggered = self.consume_object(to);
        MoveOutcome::Moved { to, triggered }
    }

    fn consume_object(&mut self, cell: CellCoord) -> Option<ObjectKind> {
        let index = self.layout.matrix().index_of(cell)?;
        let kind = self.layout.cells().get(index)?.object()?;
        if !self.overlay.deactivate(index) {
            return None;
        }
        tracing::info!(target: LOG_TARGET, %cell, object = kind.name(), "object triggered");
        Some(kind)
    }
}

/// Live per-cell object state layered over the immutable layout.
#[derive(Clone, Debug)]
struct ObjectOverlay {
    active: Vec<bool>,
}

impl ObjectOverlay {
    fn from_layout(layout: &MazeLayout) -> Self {
        Self {
            active: layout
                .cells()
                .iter()
                .map(|cell| cell.object().is_some())
                .collect(),
        }
    }

    fn is_active(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }

    /// Clears the active bit, reporting whether it was set.
    fn deactivate(&mut self, index: usize) -> bool {
        self.active
            .get_mut(index)
            .map_or(false, |active| std::mem::replace(active, false))
    }

    fn remaining(&self) -> usize {
        self.active.iter().filter(|active| **active).count()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MovePlayer { direction } => {
            let from = world.player;
            match world.move_player(direction) {
                MoveOutcome::Blocked => out_events.push(Event::MoveBlocked {
                    at: from,
                    direction,
                }),
                MoveOutcome::Moved { to, triggered } => {
                    out_events.push(Event::PlayerMoved { from, to });
                    if let Some(kind) = triggered {
                        out_events.push(Event::ObjectTriggered { cell: to, kind });
                    }
                }
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_quiz_core::{CellCoord, CellDescriptor};
    use maze_quiz_system_decoder::MazeLayout;

    use super::World;

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player(world: &World) -> CellCoord {
        world.player
    }

    /// Provides read-only access to the decoded layout.
    #[must_use]
    pub fn layout(world: &World) -> &MazeLayout {
        &world.layout
    }

    /// Render descriptor for a single cell, if it lies inside the maze.
    #[must_use]
    pub fn cell(world: &World, cell: CellCoord) -> Option<CellDescriptor> {
        let index = world.layout.matrix().index_of(cell)?;
        let layout = world.layout.cells().get(index)?;
        Some(layout.descriptor(world.overlay.is_active(index)))
    }

    /// Render descriptors for every cell in row-major order.
    #[must_use]
    pub fn cells(world: &World) -> Vec<CellDescriptor> {
        world
            .layout
            .cells()
            .iter()
            .enumerate()
            .map(|(index, layout)| layout.descriptor(world.overlay.is_active(index)))
            .collect()
    }

    /// Number of placed objects that have not been triggered yet.
    #[must_use]
    pub fn remaining_objects(world: &World) -> usize {
        world.overlay.remaining()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_quiz_core::CollisionMatrix;
    use maze_quiz_system_decoder::{decode, DecodeConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn world_from(rows: Vec<Vec<u32>>, candidates: &[usize], goal: usize) -> World {
        let matrix = CollisionMatrix::from_rows(rows).expect("matrix");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let decoded =
            decode(matrix, candidates, goal, &DecodeConfig::default(), &mut rng).expect("decode");
        World::new(decoded.layout)
    }

    #[test]
    fn starts_at_origin_with_all_objects_active() {
        let world = world_from(vec![vec![9, 3], vec![12, 6]], &[1, 2], 3);
        assert_eq!(query::player(&world), PLAYER_START);
        assert_eq!(query::remaining_objects(&world), 3);
    }

    #[test]
    fn missing_border_wall_does_not_leave_the_grid() {
        // Origin has no top wall; a lenient decode still yields a world.
        let mut world = world_from(vec![vec![8, 3], vec![12, 6]], &[], 3);
        assert_eq!(world.move_player(Direction::Up), MoveOutcome::Blocked);
        assert_eq!(query::player(&world), PLAYER_START);
    }

    #[test]
    fn deactivate_reports_previous_state() {
        let world = world_from(vec![vec![9, 3], vec![12, 6]], &[], 3);
        let mut overlay = world.overlay.clone();
        assert!(overlay.deactivate(3));
        assert!(!overlay.deactivate(3));
        assert!(!overlay.deactivate(0));
        assert!(!overlay.deactivate(42));
        assert_eq!(overlay.remaining(), 0);
    }
}
