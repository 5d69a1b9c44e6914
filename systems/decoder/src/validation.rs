//! Border and value checks for collision matrices.

use std::fmt;

use maze_quiz_core::{CellCoord, CollisionMatrix, Direction, Edge};

/// Problem found in a single cell of a collision matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// Cell the problem was found in.
    pub cell: CellCoord,
    /// Description of the problem.
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.cell, self.kind)
    }
}

/// Categories of collision matrix problems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The mask uses bits outside the four wall flags.
    InvalidCollisionValue {
        /// Raw mask value found in the matrix.
        value: u32,
    },
    /// A first-row cell is missing its top wall.
    TopEdgeWithoutWall,
    /// The cell's top wall disagrees with the bottom wall of the cell above.
    BorderMismatchAbove,
    /// A last-row cell is missing its bottom wall.
    BottomEdgeWithoutWall,
    /// A first-column cell is missing its left wall.
    LeftEdgeWithoutWall,
    /// The cell's left wall disagrees with the right wall of the cell to its left.
    BorderMismatchLeft,
    /// A last-column cell is missing its right wall.
    RightEdgeWithoutWall,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCollisionValue { value } => {
                write!(f, "has an invalid collision value {value}")
            }
            Self::TopEdgeWithoutWall => f.write_str("is on the top edge without a top wall"),
            Self::BorderMismatchAbove => f.write_str("has a border mismatch with the cell above"),
            Self::BottomEdgeWithoutWall => {
                f.write_str("is on the bottom edge without a bottom wall")
            }
            Self::LeftEdgeWithoutWall => f.write_str("is on the left edge without a left wall"),
            Self::BorderMismatchLeft => {
                f.write_str("has a border mismatch with the cell to its left")
            }
            Self::RightEdgeWithoutWall => {
                f.write_str("is on the right edge without a right wall")
            }
        }
    }
}

/// Checks every cell of the matrix and returns all problems in row-major order.
///
/// Each shared edge is checked once, from the cell below or to the right of
/// it, so a single disagreeing edge yields a single diagnostic.
#[must_use]
pub fn validate(matrix: &CollisionMatrix) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let last_row = matrix.rows().saturating_sub(1);
    let last_column = matrix.columns().saturating_sub(1);

    for (cell, mask) in matrix.iter() {
        let mut report = |kind| diagnostics.push(Diagnostic { cell, kind });

        if !mask.is_valid() {
            report(DiagnosticKind::InvalidCollisionValue { value: mask.get() });
        }

        match cell.step(Direction::Up).and_then(|above| matrix.mask(above)) {
            None if !mask.has_wall(Edge::Top) => report(DiagnosticKind::TopEdgeWithoutWall),
            Some(above) if mask.has_wall(Edge::Top) != above.has_wall(Edge::Bottom) => {
                report(DiagnosticKind::BorderMismatchAbove);
            }
            _ => {}
        }
        if cell.row() == last_row && !mask.has_wall(Edge::Bottom) {
            report(DiagnosticKind::BottomEdgeWithoutWall);
        }

        match cell.step(Direction::Left).and_then(|left| matrix.mask(left)) {
            None if !mask.has_wall(Edge::Left) => report(DiagnosticKind::LeftEdgeWithoutWall),
            Some(left) if mask.has_wall(Edge::Left) != left.has_wall(Edge::Right) => {
                report(DiagnosticKind::BorderMismatchLeft);
            }
            _ => {}
        }
        if cell.column() == last_column && !mask.has_wall(Edge::Right) {
            report(DiagnosticKind::RightEdgeWithoutWall);
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<u32>>) -> CollisionMatrix {
        CollisionMatrix::from_rows(rows).expect("matrix")
    }

    #[test]
    fn closed_square_has_no_diagnostics() {
        assert!(validate(&matrix(vec![vec![9, 3], vec![12, 6]])).is_empty());
    }

    #[test]
    fn single_cell_needs_all_four_walls() {
        assert!(validate(&matrix(vec![vec![15]])).is_empty());

        let diagnostics = validate(&matrix(vec![vec![0]]));
        let kinds: Vec<_> = diagnostics.iter().map(|diagnostic| diagnostic.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::TopEdgeWithoutWall,
                DiagnosticKind::BottomEdgeWithoutWall,
                DiagnosticKind::LeftEdgeWithoutWall,
                DiagnosticKind::RightEdgeWithoutWall,
            ]
        );
    }

    #[test]
    fn reports_values_outside_the_flag_range() {
        let diagnostics = validate(&matrix(vec![vec![31]]));
        assert_eq!(
            diagnostics,
            vec![Diagnostic {
                cell: CellCoord::new(0, 0),
                kind: DiagnosticKind::InvalidCollisionValue { value: 31 },
            }]
        );
    }

    #[test]
    fn reports_vertical_mismatch_on_the_lower_cell() {
        // (0,0) claims an open bottom while (1,0) keeps its top wall.
        let diagnostics = validate(&matrix(vec![vec![9, 3], vec![13, 6]]));
        assert_eq!(
            diagnostics,
            vec![Diagnostic {
                cell: CellCoord::new(1, 0),
                kind: DiagnosticKind::BorderMismatchAbove,
            }]
        );
    }

    #[test]
    fn reports_horizontal_mismatch_on_the_right_cell() {
        // (0,1) drops its left wall while (0,0) keeps a right wall.
        let diagnostics = validate(&matrix(vec![vec![11, 3], vec![12, 6]]));
        assert_eq!(
            diagnostics,
            vec![Diagnostic {
                cell: CellCoord::new(0, 1),
                kind: DiagnosticKind::BorderMismatchLeft,
            }]
        );
    }

    #[test]
    fn display_names_the_cell() {
        let diagnostic = Diagnostic {
            cell: CellCoord::new(2, 3),
            kind: DiagnosticKind::BorderMismatchAbove,
        };
        assert_eq!(
            diagnostic.to_string(),
            "(2, 3) has a border mismatch with the cell above"
        );
    }
}
