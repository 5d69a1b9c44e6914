#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure maze decoder that turns a collision matrix into a drawable layout.
//!
//! Decoding runs in three passes over the matrix:
//!
//! 1. every cell is validated against its neighbours and the matrix border,
//!    with each problem reported as a [`Diagnostic`] rather than an error;
//! 2. the candidate pickup pool is trimmed to a random target size using the
//!    caller-provided random source;
//! 3. cells are walked in row-major order to derive wall style tags and attach
//!    the goal flag and question pickups.
//!
//! The decoder never retains state between calls. Feeding the same inputs
//! and an identically seeded random source yields identical layouts.

use std::ops::RangeInclusive;

use maze_quiz_core::{
    CellCoord, CellDescriptor, CollisionMask, CollisionMatrix, ConfigurationError, ObjectKind,
    ObjectStyle,
};
use rand::Rng;
use thiserror::Error;

mod placement;
mod validation;

pub use placement::PlacementSet;
pub use validation::{validate, Diagnostic, DiagnosticKind};

/// Fewest question pickups a decoded maze aims for.
pub const MIN_PICKUPS: usize = 5;
/// Most question pickups a decoded maze keeps.
pub const MAX_PICKUPS: usize = 10;

const LOG_TARGET: &str = "maze_quiz::decoder";

/// How validation diagnostics affect the decode result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Report diagnostics and keep decoding on a best-effort basis.
    #[default]
    Lenient,
    /// Fail the decode when any diagnostic is reported.
    Strict,
}

/// Tuning knobs for a decode pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeConfig {
    pickup_range: RangeInclusive<usize>,
    validation: ValidationMode,
}

impl DecodeConfig {
    /// Overrides the inclusive range the pickup target is drawn from.
    #[must_use]
    pub fn with_pickup_range(mut self, pickup_range: RangeInclusive<usize>) -> Self {
        self.pickup_range = pickup_range;
        self
    }

    /// Overrides how validation diagnostics are treated.
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    /// Inclusive range the pickup target is drawn from.
    #[must_use]
    pub fn pickup_range(&self) -> &RangeInclusive<usize> {
        &self.pickup_range
    }

    /// Active validation mode.
    #[must_use]
    pub const fn validation(&self) -> ValidationMode {
        self.validation
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            pickup_range: MIN_PICKUPS..=MAX_PICKUPS,
            validation: ValidationMode::Lenient,
        }
    }
}

/// Errors that prevent a maze from being decoded.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The maze definition or decode configuration is malformed.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// Strict validation found problems in the collision matrix.
    #[error("maze failed strict validation with {} problem(s)", .diagnostics.len())]
    Validation {
        /// Every problem found during validation.
        diagnostics: Vec<Diagnostic>,
    },
}

/// Static presentation data derived for a single cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellLayout {
    cell: CellCoord,
    mask: CollisionMask,
    wall_styles: Vec<&'static str>,
    object: Option<ObjectKind>,
}

impl CellLayout {
    fn derive(cell: CellCoord, mask: CollisionMask, object: Option<ObjectKind>) -> Self {
        Self {
            cell,
            mask,
            wall_styles: mask.walls().map(|edge| edge.style_tag()).collect(),
            object,
        }
    }

    /// Grid coordinate of the cell.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Collision mask the layout was derived from.
    #[must_use]
    pub const fn mask(&self) -> CollisionMask {
        self.mask
    }

    /// Wall style tags in top, right, bottom, left order.
    #[must_use]
    pub fn wall_styles(&self) -> &[&'static str] {
        &self.wall_styles
    }

    /// Object placed on the cell, if any.
    #[must_use]
    pub const fn object(&self) -> Option<ObjectKind> {
        self.object
    }

    /// Builds the render descriptor for the cell given the object's live state.
    #[must_use]
    pub fn descriptor(&self, object_active: bool) -> CellDescriptor {
        let object_active = object_active && self.object.is_some();
        let object_style = match self.object {
            Some(kind) if object_active => kind.active_style(),
            Some(_) => ObjectStyle::Inactive,
            None => ObjectStyle::Plain,
        };
        CellDescriptor {
            cell: self.cell,
            wall_styles: self.wall_styles.clone(),
            object: self.object,
            object_active,
            object_style,
            object_icon: self.object.map(ObjectKind::icon_asset),
        }
    }
}

/// Immutable maze layout produced by [`decode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeLayout {
    matrix: CollisionMatrix,
    cells: Vec<CellLayout>,
    placement: PlacementSet,
}

impl MazeLayout {
    /// Collision matrix the layout was decoded from.
    #[must_use]
    pub const fn matrix(&self) -> &CollisionMatrix {
        &self.matrix
    }

    /// Per-cell layouts in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[CellLayout] {
        &self.cells
    }

    /// Layout of the provided cell, if it lies inside the maze.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<&CellLayout> {
        self.matrix
            .index_of(cell)
            .and_then(|index| self.cells.get(index))
    }

    /// Goal and pickup indices chosen for this layout.
    #[must_use]
    pub const fn placement(&self) -> &PlacementSet {
        &self.placement
    }
}

/// Output of a successful decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedMaze {
    /// Drawable layout of the maze.
    pub layout: MazeLayout,
    /// Validation problems found in the collision matrix.
    pub diagnostics: Vec<Diagnostic>,
}

/// Validates the matrix, places objects and derives the drawable layout.
///
/// Shape and placement problems fail fast with [`DecodeError::Configuration`].
/// Border inconsistencies are reported through `tracing` and collected into
/// [`DecodedMaze::diagnostics`]; they only fail the decode under
/// [`ValidationMode::Strict`].
pub fn decode<R>(
    matrix: CollisionMatrix,
    candidates: &[usize],
    goal: usize,
    config: &DecodeConfig,
    rng: &mut R,
) -> Result<DecodedMaze, DecodeError>
where
    R: Rng + ?Sized,
{
    let cell_count = matrix.cell_count();
    if let Some(&index) = std::iter::once(&goal)
        .chain(candidates)
        .find(|index| **index >= cell_count)
    {
        return Err(ConfigurationError::PlacementOutOfRange { index, cell_count }.into());
    }

    let diagnostics = validate(&matrix);
    for diagnostic in &diagnostics {
        tracing::warn!(
            target: LOG_TARGET,
            row = diagnostic.cell.row(),
            column = diagnostic.cell.column(),
            problem = %diagnostic.kind,
            "maze square {}",
            diagnostic
        );
    }
    if config.validation == ValidationMode::Strict && !diagnostics.is_empty() {
        return Err(DecodeError::Validation { diagnostics });
    }

    let placement = PlacementSet::choose(candidates, goal, &config.pickup_range, rng)?;
    tracing::debug!(
        target: LOG_TARGET,
        goal = placement.goal(),
        pickups = placement.pickups().len(),
        candidates = candidates.len(),
        "placed maze objects"
    );

    let cells = matrix
        .iter()
        .enumerate()
        .map(|(index, (cell, mask))| CellLayout::derive(cell, mask, placement.object_at(index)))
        .collect();

    Ok(DecodedMaze {
        layout: MazeLayout {
            matrix,
            cells,
            placement,
        },
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn square() -> CollisionMatrix {
        CollisionMatrix::from_rows(vec![vec![9, 3], vec![12, 6]]).expect("matrix")
    }

    #[test]
    fn derives_wall_styles_in_fixed_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let decoded =
            decode(square(), &[], 3, &DecodeConfig::default(), &mut rng).expect("decodes");

        let styles: Vec<_> = decoded
            .layout
            .cells()
            .iter()
            .map(|cell| cell.wall_styles().to_vec())
            .collect();
        assert_eq!(
            styles,
            vec![
                vec!["top", "left"],
                vec!["top", "right"],
                vec!["bottom", "left"],
                vec!["right", "bottom"],
            ]
        );
    }

    #[test]
    fn rejects_out_of_range_goal() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let result = decode(square(), &[], 4, &DecodeConfig::default(), &mut rng);
        assert_eq!(
            result,
            Err(DecodeError::Configuration(
                ConfigurationError::PlacementOutOfRange {
                    index: 4,
                    cell_count: 4,
                }
            ))
        );
    }

    #[test]
    fn rejects_out_of_range_candidate() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let result = decode(square(), &[1, 9], 0, &DecodeConfig::default(), &mut rng);
        assert!(matches!(
            result,
            Err(DecodeError::Configuration(
                ConfigurationError::PlacementOutOfRange { index: 9, .. }
            ))
        ));
    }

    #[test]
    fn strict_mode_fails_on_diagnostics() {
        let broken = CollisionMatrix::from_rows(vec![vec![0, 3], vec![12, 6]]).expect("matrix");
        let config = DecodeConfig::default().with_validation(ValidationMode::Strict);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let Err(DecodeError::Validation { diagnostics }) =
            decode(broken, &[], 3, &config, &mut rng)
        else {
            panic!("strict decode should fail");
        };
        assert!(diagnostics
            .iter()
            .all(|diagnostic| diagnostic.cell == CellCoord::new(0, 0)));
    }

    #[test]
    fn lenient_mode_still_builds_layout() {
        let broken = CollisionMatrix::from_rows(vec![vec![0, 3], vec![12, 6]]).expect("matrix");
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let decoded =
            decode(broken, &[], 3, &DecodeConfig::default(), &mut rng).expect("lenient decode");
        assert!(!decoded.diagnostics.is_empty());
        assert_eq!(decoded.layout.cells().len(), 4);
    }

    #[test]
    fn consumed_objects_switch_to_inactive_style() {
        let layout = CellLayout::derive(
            CellCoord::new(0, 0),
            CollisionMask::new(9),
            Some(ObjectKind::Question),
        );
        assert_eq!(layout.descriptor(true).object_style, ObjectStyle::Pickup);

        let consumed = layout.descriptor(false);
        assert!(!consumed.object_active);
        assert_eq!(consumed.object_style, ObjectStyle::Inactive);
        assert_eq!(
            consumed.object_icon,
            Some("icons/block-question-duotone.svg")
        );
    }

    #[test]
    fn empty_cells_are_never_active() {
        let layout = CellLayout::derive(CellCoord::new(0, 0), CollisionMask::new(9), None);
        let descriptor = layout.descriptor(true);
        assert!(!descriptor.has_object());
        assert!(!descriptor.object_active);
        assert_eq!(descriptor.object_style, ObjectStyle::Plain);
        assert_eq!(descriptor.object_icon, None);
    }
}
