#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares a Maze Quiz session.

use maze_quiz_core::{CollisionMatrix, MazeDefinition, WELCOME_BANNER};
use maze_quiz_system_decoder::{decode, DecodeConfig, DecodeError, Diagnostic};
use maze_quiz_world::World;
use rand::Rng;

/// Freshly started session ready to accept move commands.
#[derive(Debug)]
pub struct Session {
    /// World seeded from the decoded maze.
    pub world: World,
    /// Validation problems found while decoding the maze.
    pub diagnostics: Vec<Diagnostic>,
}

/// Turns maze definitions into playable worlds.
#[derive(Debug, Default)]
pub struct Bootstrap {
    config: DecodeConfig,
}

impl Bootstrap {
    /// Creates a bootstrap system that decodes mazes with the provided configuration.
    #[must_use]
    pub fn new(config: DecodeConfig) -> Self {
        Self { config }
    }

    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        WELCOME_BANNER
    }

    /// Decodes the definition and builds a world around it.
    ///
    /// Any configuration error aborts the start so no partially initialised
    /// world is ever handed out.
    pub fn start<R>(&self, definition: &MazeDefinition, rng: &mut R) -> Result<Session, DecodeError>
    where
        R: Rng + ?Sized,
    {
        let matrix = CollisionMatrix::from_rows(definition.maze_data.clone())?;
        tracing::debug!(
            rows = matrix.rows(),
            columns = matrix.columns(),
            "decoding maze definition"
        );

        let decoded = decode(
            matrix,
            &definition.question_locations,
            definition.flag_location,
            &self.config,
            rng,
        )?;

        Ok(Session {
            world: World::new(decoded.layout),
            diagnostics: decoded.diagnostics,
        })
    }
}
