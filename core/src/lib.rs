#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Quiz engine.
//!
//! This crate defines the data surface that connects the maze decoder, the
//! authoritative world, and adapters. Adapters load a [`MazeDefinition`], the
//! decoder turns its [`CollisionMatrix`] into an immutable layout, and the
//! world executes [`Command`] values against that layout before broadcasting
//! [`Event`] values for presentation layers to react to.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Quiz.";

/// Prefix applied to wall style tags when composing presentation class names.
pub const WALL_CLASS_PREFIX: &str = "maze-square-";

/// One of the four edges of a maze cell.
///
/// Each edge owns a single bit of a [`CollisionMask`]; a set bit means the
/// edge is walled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Edge {
    /// Edge shared with the cell in the previous row.
    Top,
    /// Edge shared with the cell in the next column.
    Right,
    /// Edge shared with the cell in the next row.
    Bottom,
    /// Edge shared with the cell in the previous column.
    Left,
}

impl Edge {
    /// Every edge, in the order wall style tags are derived.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Bit that marks this edge as walled inside a collision mask.
    #[must_use]
    pub const fn bit(self) -> u32 {
        match self {
            Self::Top => 1,
            Self::Right => 2,
            Self::Bottom => 4,
            Self::Left => 8,
        }
    }

    /// Style tag attached to cells that carry a wall on this edge.
    #[must_use]
    pub const fn style_tag(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

/// Movement intent submitted by input handling.
///
/// Raw movement codes reuse the numeric values of the wall bits, but the two
/// concepts only meet through [`Direction::edge`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
}

impl Direction {
    /// Every direction in clockwise order starting at [`Direction::Up`].
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Edge of the current cell that a move in this direction crosses.
    #[must_use]
    pub const fn edge(self) -> Edge {
        match self {
            Self::Up => Edge::Top,
            Self::Right => Edge::Right,
            Self::Down => Edge::Bottom,
            Self::Left => Edge::Left,
        }
    }

    /// Raw movement code understood by legacy input sources.
    #[must_use]
    pub const fn code(self) -> u32 {
        self.edge().bit()
    }

    /// Resolves a raw movement code into a direction.
    pub fn from_code(code: u32) -> Result<Self, ConfigurationError> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.code() == code)
            .ok_or_else(|| ConfigurationError::UnrecognizedDirection {
                value: code.to_string(),
            })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        };
        f.write_str(label)
    }
}

impl FromStr for Direction {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "up" | "u" | "w" | "north" => Ok(Self::Up),
            "right" | "r" | "d" | "east" => Ok(Self::Right),
            "down" | "s" | "south" => Ok(Self::Down),
            "left" | "l" | "a" | "west" => Ok(Self::Left),
            _ => Err(ConfigurationError::UnrecognizedDirection {
                value: value.to_owned(),
            }),
        }
    }
}

/// Per-cell wall bitmask read from a collision matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CollisionMask(u32);

impl CollisionMask {
    /// Largest value a well-formed mask can hold (all four walls present).
    pub const MAX_VALID: u32 = 15;

    /// Wraps a raw mask value without validating it.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the raw mask value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether the mask only uses the four defined wall bits.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 <= Self::MAX_VALID
    }

    /// Reports whether the provided edge is walled.
    #[must_use]
    pub const fn has_wall(&self, edge: Edge) -> bool {
        self.0 & edge.bit() != 0
    }

    /// Iterator over the walled edges in [`Edge::ALL`] order.
    pub fn walls(self) -> impl Iterator<Item = Edge> {
        Edge::ALL.into_iter().filter(move |edge| self.has_wall(*edge))
    }
}

/// Location of a single grid cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Neighbouring coordinate one step in the provided direction.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    /// Upper bounds are the caller's concern.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Self::new(row, self.column)),
            Direction::Right => self
                .column
                .checked_add(1)
                .map(|column| Self::new(self.row, column)),
            Direction::Down => self.row.checked_add(1).map(|row| Self::new(row, self.column)),
            Direction::Left => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(self.row, column)),
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Rectangular grid of wall bitmasks stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollisionMatrix {
    rows: u32,
    columns: u32,
    masks: Vec<CollisionMask>,
}

impl CollisionMatrix {
    /// Builds a matrix from nested rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, ConfigurationError> {
        let Some(first) = rows.first() else {
            return Err(ConfigurationError::EmptyMatrix);
        };
        let columns = first.len();
        if columns == 0 {
            return Err(ConfigurationError::EmptyMatrix);
        }

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != columns)
        {
            return Err(ConfigurationError::RaggedMatrix {
                row,
                expected: columns,
                found,
            });
        }

        let row_count = u32::try_from(rows.len()).map_err(|_| ConfigurationError::MatrixTooLarge)?;
        let column_count = u32::try_from(columns).map_err(|_| ConfigurationError::MatrixTooLarge)?;
        let masks = rows
            .into_iter()
            .flatten()
            .map(CollisionMask::new)
            .collect();

        Ok(Self {
            rows: row_count,
            columns: column_count,
            masks,
        })
    }

    /// Number of rows contained in the matrix.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns contained in the matrix.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of cells, which bounds every linear index.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.masks.len()
    }

    /// Reports whether the coordinate lies inside the matrix.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.rows && cell.column() < self.columns
    }

    /// Collision mask stored for the provided cell, if it lies inside the matrix.
    #[must_use]
    pub fn mask(&self, cell: CellCoord) -> Option<CollisionMask> {
        self.index_of(cell)
            .and_then(|index| self.masks.get(index).copied())
    }

    /// Row-major linear index of the provided cell.
    #[must_use]
    pub fn index_of(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Cell addressed by the provided row-major linear index.
    #[must_use]
    pub fn coord_of(&self, index: usize) -> Option<CellCoord> {
        if index >= self.masks.len() {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let row = u32::try_from(index / width).ok()?;
        let column = u32::try_from(index % width).ok()?;
        Some(CellCoord::new(row, column))
    }

    /// Iterator over every cell and its mask in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CollisionMask)> + '_ {
        let columns = self.columns.max(1);
        (0..self.rows)
            .flat_map(move |row| (0..columns).map(move |column| CellCoord::new(row, column)))
            .zip(self.masks.iter().copied())
    }
}

/// Kinds of objects that can be placed inside the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ObjectKind {
    /// Goal marker that ends the run when reached.
    Flag,
    /// Pickup that asks the player a question.
    Question,
}

impl ObjectKind {
    /// Name carried by object-triggered notifications.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Flag => "Flag",
            Self::Question => "Question",
        }
    }

    /// Icon asset the presentation layer draws for the object.
    #[must_use]
    pub const fn icon_asset(self) -> &'static str {
        match self {
            Self::Flag => "icons/flag-checkered.svg",
            Self::Question => "icons/block-question-duotone.svg",
        }
    }

    /// Style applied while the object has not yet been consumed.
    #[must_use]
    pub const fn active_style(self) -> ObjectStyle {
        match self {
            Self::Flag => ObjectStyle::Plain,
            Self::Question => ObjectStyle::Pickup,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display hint describing how an object's image should be styled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ObjectStyle {
    /// No extra styling.
    Plain,
    /// Active pickup styling.
    Pickup,
    /// Styling for an object the player already consumed.
    Inactive,
}

impl ObjectStyle {
    /// Class names handed to the presentation layer.
    #[must_use]
    pub const fn class_names(self) -> &'static str {
        match self {
            Self::Plain => "",
            Self::Pickup => "square-image",
            Self::Inactive => "square-image square-image-inactive",
        }
    }
}

/// Drawable description of one cell, combining static layout with live state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CellDescriptor {
    /// Grid coordinate of the cell.
    pub cell: CellCoord,
    /// Wall style tags derived from the cell's collision mask.
    pub wall_styles: Vec<&'static str>,
    /// Object placed on the cell, if any.
    pub object: Option<ObjectKind>,
    /// Whether the placed object is still waiting to be triggered.
    pub object_active: bool,
    /// Styling hint for the placed object. `Plain` for empty cells.
    pub object_style: ObjectStyle,
    /// Icon asset drawn for the placed object, kept after it is consumed.
    pub object_icon: Option<&'static str>,
}

impl CellDescriptor {
    /// Reports whether an object was placed on the cell.
    #[must_use]
    pub const fn has_object(&self) -> bool {
        self.object.is_some()
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.cell.row()
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.cell.column()
    }

    /// Space-separated wall class names, e.g. `maze-square-top maze-square-left`.
    #[must_use]
    pub fn wall_classes(&self) -> String {
        self.wall_styles
            .iter()
            .map(|tag| format!("{WALL_CLASS_PREFIX}{tag}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Maze record as supplied by external loaders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeDefinition {
    /// Collision matrix rows, one wall bitmask per cell.
    pub maze_data: Vec<Vec<u32>>,
    /// Row-major linear index of the goal cell.
    pub flag_location: usize,
    /// Row-major linear indices of candidate pickup cells.
    pub question_locations: Vec<usize>,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the player advance a single cell in the given direction.
    MovePlayer {
        /// Direction of travel for the attempted move.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after the move.
        to: CellCoord,
    },
    /// Reports that a wall denied the requested move. Presentation feedback
    /// only; it never stands in for [`Event::ObjectTriggered`].
    MoveBlocked {
        /// Cell the player remains on.
        at: CellCoord,
        /// Direction that was requested.
        direction: Direction,
    },
    /// Announces that the player landed on an active object.
    ObjectTriggered {
        /// Cell holding the triggered object.
        cell: CellCoord,
        /// Kind of object that was triggered.
        kind: ObjectKind,
    },
}

/// Result of a single move request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A wall denied the move; nothing changed.
    Blocked,
    /// The player advanced one cell.
    Moved {
        /// Cell the player now occupies.
        to: CellCoord,
        /// Object consumed on arrival, if the cell held an active one.
        triggered: Option<ObjectKind>,
    },
}

/// Errors raised when a maze definition or integration is broken.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The collision matrix contained no cells.
    #[error("collision matrix must contain at least one cell")]
    EmptyMatrix,
    /// A row of the collision matrix had a different length than the first.
    #[error("collision matrix row {row} has {found} cells, expected {expected}")]
    RaggedMatrix {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// The collision matrix dimensions do not fit the coordinate type.
    #[error("collision matrix is too large")]
    MatrixTooLarge,
    /// A placement hint referenced a cell outside the grid.
    #[error("placement index {index} is outside a grid of {cell_count} cells")]
    PlacementOutOfRange {
        /// Linear index that was supplied.
        index: usize,
        /// Number of cells in the grid.
        cell_count: usize,
    },
    /// The configured pickup range is empty.
    #[error("pickup range {min}..={max} is empty")]
    InvalidPickupRange {
        /// Lower bound of the range.
        min: usize,
        /// Upper bound of the range.
        max: usize,
    },
    /// A move request carried a value that is not one of the four directions.
    #[error("unrecognized move direction `{value}`")]
    UnrecognizedDirection {
        /// Raw value that failed to resolve.
        value: String,
    },
}
