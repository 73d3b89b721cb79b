//! # Board Geometry
//!
//! Static per-color paths over the cross-shaped 15x15 board and the safe squares.
//!
//! Every color walks 51 cells of a shared 52-cell outer loop, starting from its own
//! entry square, then turns into a private 5-cell safe lane that ends in its home
//! cell. The same grid cell therefore has a different path index for each color, so
//! occupancy and captures compare [`Position`]s, never indices.

use crate::config::{COMMON_CELLS_PER_PATH, COMMON_TRACK_LENGTH, PATH_LENGTH};
use crate::{PlayerColor, Position};
use std::collections::HashSet;
use std::sync::OnceLock;

static STANDARD_BOARD: OnceLock<Board> = OnceLock::new();

/// Loop offsets of each color's entry square, indexed by turn order.
const ENTRY_OFFSETS: [usize; 4] = [0, 13, 26, 39];

/// Distance from an entry square to the star square that follows it.
const STAR_OFFSET: usize = 8;

/// Geometry of the standard board. Built once and shared.
#[derive(Debug, Clone)]
pub struct Board {
    paths: [Vec<Position>; 4],
    stars: Vec<Position>,
    safe_positions: HashSet<Position>,
}

impl Board {
    /// Returns the shared standard board.
    ///
    /// # Examples
    ///
    /// ```
    /// use mirchi_ludo::{Board, PlayerColor, Position};
    ///
    /// let board = Board::standard();
    /// assert_eq!(board.path(PlayerColor::Red).len(), 57);
    /// assert_eq!(board.entry_square(PlayerColor::Red), Position::new(6, 1));
    /// ```
    pub fn standard() -> &'static Board {
        STANDARD_BOARD.get_or_init(Board::build)
    }

    fn build() -> Self {
        let track = common_track();

        let paths = PlayerColor::ALL.map(|color| {
            let offset = ENTRY_OFFSETS[color.index()];
            let mut path: Vec<Position> = (0..COMMON_CELLS_PER_PATH)
                .map(|step| track[(offset + step) % COMMON_TRACK_LENGTH])
                .collect();
            path.extend(safe_lane(color));
            path.push(home_cell(color));
            path
        });

        let stars: Vec<Position> = ENTRY_OFFSETS
            .iter()
            .map(|offset| track[(offset + STAR_OFFSET) % COMMON_TRACK_LENGTH])
            .collect();

        let mut safe_positions = HashSet::new();
        for color in PlayerColor::ALL {
            let path = &paths[color.index()];
            safe_positions.insert(path[0]);
            safe_positions.extend(path[COMMON_CELLS_PER_PATH..].iter().copied());
        }
        safe_positions.extend(stars.iter().copied());

        Self {
            paths,
            stars,
            safe_positions,
        }
    }

    /// The full ordered path for a color: index 0 is the entry square, the last
    /// index is the home cell.
    pub fn path(&self, color: PlayerColor) -> &[Position] {
        &self.paths[color.index()]
    }

    /// Number of cells on a color's path.
    pub fn path_length(&self, color: PlayerColor) -> usize {
        self.path(color).len()
    }

    /// Grid cell for a path index, if the index is on the path.
    pub fn position_at(&self, color: PlayerColor, index: usize) -> Option<Position> {
        self.path(color).get(index).copied()
    }

    /// Path index of a grid cell for the given color.
    pub fn index_of(&self, color: PlayerColor, position: Position) -> Option<usize> {
        self.path(color).iter().position(|&cell| cell == position)
    }

    /// First cell a pawn occupies after leaving the yard.
    pub fn entry_square(&self, color: PlayerColor) -> Position {
        self.path(color)[0]
    }

    /// Final cell of a color's path.
    pub fn home_cell(&self, color: PlayerColor) -> Position {
        self.path(color)[PATH_LENGTH - 1]
    }

    /// The private lane between the shared loop and the home cell.
    pub fn safe_lane(&self, color: PlayerColor) -> &[Position] {
        &self.path(color)[COMMON_CELLS_PER_PATH..PATH_LENGTH - 1]
    }

    /// The four extra safe squares on the shared loop.
    pub fn star_squares(&self) -> &[Position] {
        &self.stars
    }

    /// Cells inside a color's yard where waiting pawns are drawn.
    pub fn yard_slots(&self, color: PlayerColor) -> [Position; 4] {
        let (row, col) = match color {
            PlayerColor::Red => (2, 2),
            PlayerColor::Green => (2, 11),
            PlayerColor::Yellow => (11, 11),
            PlayerColor::Blue => (11, 2),
        };
        [
            Position::new(row, col),
            Position::new(row, col + 1),
            Position::new(row + 1, col),
            Position::new(row + 1, col + 1),
        ]
    }

    /// Whether captures are forbidden on this cell.
    ///
    /// Safe cells are every safe lane, every home cell, every entry square and the
    /// four star squares. Occupant color does not matter.
    pub fn is_safe_position(&self, position: Position) -> bool {
        self.safe_positions.contains(&position)
    }
}

/// Path for a color on the standard board.
pub fn path_for(color: PlayerColor) -> &'static [Position] {
    Board::standard().path(color)
}

/// Whether a cell on the standard board is safe from capture.
pub fn is_safe_position(position: Position) -> bool {
    Board::standard().is_safe_position(position)
}

/// The shared outer loop, starting at red's entry square and running clockwise.
fn common_track() -> Vec<Position> {
    let mut track = Vec::with_capacity(COMMON_TRACK_LENGTH);
    track.extend((1..=5).map(|col| Position::new(6, col)));
    track.extend((0..=5).rev().map(|row| Position::new(row, 6)));
    track.push(Position::new(0, 7));
    track.extend((0..=5).map(|row| Position::new(row, 8)));
    track.extend((9..=14).map(|col| Position::new(6, col)));
    track.push(Position::new(7, 14));
    track.extend((9..=14).rev().map(|col| Position::new(8, col)));
    track.extend((9..=14).map(|row| Position::new(row, 8)));
    track.push(Position::new(14, 7));
    track.extend((9..=14).rev().map(|row| Position::new(row, 6)));
    track.extend((0..=5).rev().map(|col| Position::new(8, col)));
    track.push(Position::new(7, 0));
    track.push(Position::new(6, 0));
    track
}

fn safe_lane(color: PlayerColor) -> Vec<Position> {
    match color {
        PlayerColor::Red => (1..=5).map(|col| Position::new(7, col)).collect(),
        PlayerColor::Green => (1..=5).map(|row| Position::new(row, 7)).collect(),
        PlayerColor::Yellow => (9..=13).rev().map(|col| Position::new(7, col)).collect(),
        PlayerColor::Blue => (9..=13).rev().map(|row| Position::new(row, 7)).collect(),
    }
}

fn home_cell(color: PlayerColor) -> Position {
    match color {
        PlayerColor::Red => Position::new(7, 6),
        PlayerColor::Green => Position::new(6, 7),
        PlayerColor::Yellow => Position::new(7, 8),
        PlayerColor::Blue => Position::new(8, 7),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_track_is_a_closed_loop() {
        let track = common_track();
        assert_eq!(track.len(), COMMON_TRACK_LENGTH);

        let unique: HashSet<_> = track.iter().collect();
        assert_eq!(unique.len(), COMMON_TRACK_LENGTH);

        for (i, cell) in track.iter().enumerate() {
            let next = track[(i + 1) % track.len()];
            assert!(cell.is_adjacent(next), "{} and {} are not adjacent", cell, next);
        }
    }

    #[test]
    fn test_paths_have_fixed_length_and_stay_on_board() {
        let board = Board::standard();
        for color in PlayerColor::ALL {
            let path = board.path(color);
            assert_eq!(path.len(), PATH_LENGTH);
            assert!(path.iter().all(|p| p.is_on_board()));
            for pair in path.windows(2) {
                assert!(pair[0].is_adjacent(pair[1]), "{} path breaks at {}", color, pair[0]);
            }
        }
    }

    #[test]
    fn test_entry_squares_and_homes() {
        let board = Board::standard();
        assert_eq!(board.entry_square(PlayerColor::Red), Position::new(6, 1));
        assert_eq!(board.entry_square(PlayerColor::Green), Position::new(1, 8));
        assert_eq!(board.entry_square(PlayerColor::Yellow), Position::new(8, 13));
        assert_eq!(board.entry_square(PlayerColor::Blue), Position::new(13, 6));

        assert_eq!(board.home_cell(PlayerColor::Red), Position::new(7, 6));
        assert_eq!(board.home_cell(PlayerColor::Blue), Position::new(8, 7));
    }

    #[test]
    fn test_shared_cells_have_different_indices_per_color() {
        let board = Board::standard();
        let cell = Position::new(6, 4);
        assert_eq!(board.index_of(PlayerColor::Red, cell), Some(3));
        assert_eq!(board.index_of(PlayerColor::Green, cell), Some(42));
        assert_eq!(board.index_of(PlayerColor::Yellow, cell), Some(29));
        assert_eq!(board.index_of(PlayerColor::Blue, cell), Some(16));
    }

    #[test]
    fn test_safe_lanes_are_private() {
        let board = Board::standard();
        for color in PlayerColor::ALL {
            for cell in board.safe_lane(color) {
                for other in color.opponents() {
                    assert!(board.index_of(other, *cell).is_none());
                }
            }
        }
    }

    #[test]
    fn test_safe_positions() {
        let board = Board::standard();

        // 4 lanes of 5, 4 homes, 4 entries, 4 stars
        assert_eq!(board.safe_positions.len(), 20 + 4 + 4 + 4);

        assert!(board.is_safe_position(Position::new(6, 1)));
        assert!(board.is_safe_position(Position::new(2, 6)));
        assert!(board.is_safe_position(Position::new(7, 3)));
        assert!(board.is_safe_position(Position::new(7, 8)));
        assert!(!board.is_safe_position(Position::new(6, 4)));
        assert!(!board.is_safe_position(Position::new(0, 7)));
    }

    #[test]
    fn test_star_squares() {
        let stars = Board::standard().star_squares();
        assert_eq!(
            stars,
            &[
                Position::new(2, 6),
                Position::new(6, 12),
                Position::new(12, 8),
                Position::new(8, 2),
            ]
        );
    }

    #[test]
    fn test_yard_slots_are_off_the_track() {
        let board = Board::standard();
        for color in PlayerColor::ALL {
            for slot in board.yard_slots(color) {
                assert!(slot.is_on_board());
                assert!(PlayerColor::ALL
                    .iter()
                    .all(|c| board.index_of(*c, slot).is_none()));
            }
        }
    }
}
