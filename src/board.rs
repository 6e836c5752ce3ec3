//! The ouija board layout and glyph lookup.
//!
//! The board is a fixed set of glyph tiles laid out in rows. Positions are
//! expressed in board space (tile column, row), which is the coordinate frame
//! the planchette moves in; the UI scales it to terminal cells.

use std::collections::HashMap;

use crate::decoder::QUESTION_TOKEN;

/// Index of a glyph on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlyphId(pub usize);

/// A point in board space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoardPoint {
    pub x: f32,
    pub y: f32,
}

impl BoardPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `to` by `t` in [0, 1].
    pub fn lerp(self, to: BoardPoint, t: f32) -> BoardPoint {
        BoardPoint {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

/// A single glyph tile on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Identity the locator matches against (`" "`, `"¿?"`, or an uppercase char)
    pub identity: String,
    /// Text drawn on the tile
    pub label: String,
    /// Row index on the board
    pub row: usize,
    /// Column index within the row
    pub col: usize,
}

impl Glyph {
    /// Center of the tile in board space.
    pub fn center(&self) -> BoardPoint {
        BoardPoint::new(self.col as f32 + 0.5, self.row as f32 + 0.5)
    }
}

/// The static board plus its identity lookup table.
#[derive(Debug, Clone)]
pub struct Board {
    glyphs: Vec<Glyph>,
    index: HashMap<String, GlyphId>,
    rows: usize,
    cols: usize,
}

impl Board {
    /// Builds a board from rows of `(identity, label)` pairs.
    ///
    /// If an identity appears twice the first tile wins.
    pub fn from_rows(rows: &[&[(&str, &str)]]) -> Self {
        let mut glyphs = Vec::new();
        let mut index = HashMap::new();

        for (row, tiles) in rows.iter().enumerate() {
            for (col, (identity, label)) in tiles.iter().enumerate() {
                let id = GlyphId(glyphs.len());
                index.entry((*identity).to_string()).or_insert(id);
                glyphs.push(Glyph {
                    identity: (*identity).to_string(),
                    label: (*label).to_string(),
                    row,
                    col,
                });
            }
        }

        let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        Self {
            glyphs,
            index,
            rows: rows.len(),
            cols,
        }
    }

    /// Finds the glyph with the given identity.
    ///
    /// Matching is exact and case-sensitive; `None` means the planchette
    /// has nowhere to go for this character.
    pub fn locate(&self, identity: &str) -> Option<GlyphId> {
        self.index.get(identity).copied()
    }

    /// Gets a glyph by id.
    pub fn glyph(&self, id: GlyphId) -> Option<&Glyph> {
        self.glyphs.get(id.0)
    }

    /// All glyphs in layout order.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Length of the longest row.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Center of the board, where the planchette rests before its first move.
    pub fn center(&self) -> BoardPoint {
        BoardPoint::new(self.cols as f32 / 2.0, self.rows as f32 / 2.0)
    }
}

impl Default for Board {
    /// The classic board: two rows of letters and a bottom row with the
    /// question mark and space tiles.
    fn default() -> Self {
        let letters: Vec<String> = ('A'..='Z').map(String::from).collect();
        let tiles: Vec<(&str, &str)> = letters
            .iter()
            .map(|l| (l.as_str(), l.as_str()))
            .collect();
        let (first, second) = tiles.split_at(13);
        let bottom = [(QUESTION_TOKEN, QUESTION_TOKEN), (" ", "ESPAÇO")];

        Self::from_rows(&[first, second, &bottom])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_board_letters() {
        let board = Board::default();
        for c in 'A'..='Z' {
            let id = board.locate(&c.to_string()).unwrap();
            assert_eq!(board.glyph(id).unwrap().label, c.to_string());
        }
        assert_eq!(board.rows(), 3);
        assert_eq!(board.cols(), 13);
    }

    #[test]
    fn test_special_tiles() {
        let board = Board::default();
        let space = board.locate(" ").unwrap();
        assert_eq!(board.glyph(space).unwrap().label, "ESPAÇO");
        let question = board.locate("¿?").unwrap();
        assert_eq!(board.glyph(question).unwrap().row, 2);
    }

    #[test]
    fn test_locate_missing_and_case_sensitive() {
        let board = Board::default();
        assert_eq!(board.locate("a"), None);
        assert_eq!(board.locate("1"), None);
        assert_eq!(board.locate("?"), None);
        assert_eq!(board.locate(""), None);
    }

    #[test]
    fn test_glyph_positions() {
        let board = Board::default();
        let n = board.glyph(board.locate("N").unwrap()).unwrap();
        assert_eq!((n.row, n.col), (1, 0));
        assert_eq!(n.center(), BoardPoint::new(0.5, 1.5));
    }

    #[test]
    fn test_duplicate_identity_first_wins() {
        let board = Board::from_rows(&[&[("A", "first"), ("A", "second")]]);
        let id = board.locate("A").unwrap();
        assert_eq!(board.glyph(id).unwrap().label, "first");
        assert_eq!(board.glyphs().len(), 2);
    }

    #[test]
    fn test_lerp() {
        let a = BoardPoint::new(0.0, 0.0);
        let b = BoardPoint::new(10.0, 4.0);
        assert_eq!(a.lerp(b, 0.5), BoardPoint::new(5.0, 2.0));
        assert_eq!(a.lerp(b, 1.0), b);
    }
}
