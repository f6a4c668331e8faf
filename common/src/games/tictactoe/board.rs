use std::fmt;

use super::types::{BOARD_SIZE, CELL_COUNT, Mark};

/// Every row, column and diagonal, as cell indices.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

const MAIN_DIAGONAL: [usize; 3] = [0, 4, 8];
const ANTI_DIAGONAL: [usize; 3] = [2, 4, 6];

/// What a driver or the search needs from a board.
pub trait GameBoard {
    fn available_moves(&self) -> Vec<usize>;
    fn count_empty_squares(&self) -> usize;
    fn has_empty_squares(&self) -> bool;
    fn apply_move(&mut self, index: usize, mark: Mark) -> bool;
    fn undo_move(&mut self, index: usize);
    fn winner(&self) -> Option<Mark>;

    fn is_terminal(&self) -> bool {
        self.winner().is_some() || !self.has_empty_squares()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
    winner: Option<Mark>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Mark::Empty; CELL_COUNT],
            winner: None,
        }
    }

    /// Builds a position from nine cells written row by row. `X` and `O` (any
    /// case) are marks, `.`, `-` and `_` are empty, whitespace is ignored.
    pub fn parse(layout: &str) -> Result<Self, String> {
        let mut cells = [Mark::Empty; CELL_COUNT];
        let mut count = 0;

        for ch in layout.chars().filter(|c| !c.is_whitespace()) {
            if count == CELL_COUNT {
                return Err(format!("Board layout has more than {} cells", CELL_COUNT));
            }
            cells[count] = match ch {
                'x' | 'X' => Mark::X,
                'o' | 'O' => Mark::O,
                '.' | '-' | '_' => Mark::Empty,
                other => return Err(format!("Unexpected character '{}' in board layout", other)),
            };
            count += 1;
        }

        if count != CELL_COUNT {
            return Err(format!(
                "Board layout has {} cells, expected {}",
                count, CELL_COUNT
            ));
        }

        let mut board = Self {
            cells,
            winner: None,
        };

        let x_won = board.has_full_line(Mark::X);
        let o_won = board.has_full_line(Mark::O);
        board.winner = match (x_won, o_won) {
            (true, true) => return Err("Both marks have a completed line".to_string()),
            (true, false) => Some(Mark::X),
            (false, true) => Some(Mark::O),
            (false, false) => None,
        };

        Ok(board)
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    pub fn is_terminal(&self) -> bool {
        self.winner.is_some() || !self.has_empty_squares()
    }

    /// Empty cell indices in ascending order. The search relies on this order
    /// for tie-breaking.
    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Mark::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn has_empty_squares(&self) -> bool {
        self.cells.contains(&Mark::Empty)
    }

    pub fn count_empty_squares(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Mark::Empty).count()
    }

    /// Places `mark` at `index` and records it as winner if the move completes
    /// a line. Returns `false` without touching the board when the cell is
    /// taken, out of range, or `mark` is `Empty`.
    pub fn apply_move(&mut self, index: usize, mark: Mark) -> bool {
        if mark == Mark::Empty || self.cell(index) != Some(Mark::Empty) {
            return false;
        }

        self.cells[index] = mark;
        if self.evaluate_winner(index, mark) {
            self.winner = Some(mark);
        }
        true
    }

    /// Checks only the lines through `index`. Diagonals are looked at for even
    /// indices, which are the corners and the center.
    pub fn evaluate_winner(&self, index: usize, mark: Mark) -> bool {
        if index >= CELL_COUNT {
            return false;
        }

        let row_start = (index / BOARD_SIZE) * BOARD_SIZE;
        if (row_start..row_start + BOARD_SIZE).all(|i| self.cells[i] == mark) {
            return true;
        }

        let column = index % BOARD_SIZE;
        if (0..BOARD_SIZE).all(|row| self.cells[column + row * BOARD_SIZE] == mark) {
            return true;
        }

        if index % 2 == 0 {
            if MAIN_DIAGONAL.iter().all(|&i| self.cells[i] == mark) {
                return true;
            }
            if ANTI_DIAGONAL.iter().all(|&i| self.cells[i] == mark) {
                return true;
            }
        }

        false
    }

    /// Clears `index` and the recorded winner. Only valid as the inverse of the
    /// last successful `apply_move`, whose prior state had no winner.
    pub fn undo_move(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = Mark::Empty;
        }
        self.winner = None;
    }

    pub fn winning_line(&self) -> Option<[usize; 3]> {
        let winner = self.winner?;
        LINES
            .iter()
            .copied()
            .find(|line| line.iter().all(|&i| self.cells[i] == winner))
    }

    fn has_full_line(&self, mark: Mark) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.cells[i] == mark))
    }

    /// Reference grid with 1-based cell numbers, as players type them.
    pub fn board_with_positions() -> String {
        let rows: Vec<String> = (0..BOARD_SIZE)
            .map(|row| {
                let numbers: Vec<String> = (0..BOARD_SIZE)
                    .map(|column| (row * BOARD_SIZE + column + 1).to_string())
                    .collect();
                format!(" {}", numbers.join(" | "))
            })
            .collect();
        rows.join("\n-----------\n")
    }
}

impl GameBoard for Board {
    fn available_moves(&self) -> Vec<usize> {
        Board::available_moves(self)
    }

    fn count_empty_squares(&self) -> usize {
        Board::count_empty_squares(self)
    }

    fn has_empty_squares(&self) -> bool {
        Board::has_empty_squares(self)
    }

    fn apply_move(&mut self, index: usize, mark: Mark) -> bool {
        Board::apply_move(self, index, mark)
    }

    fn undo_move(&mut self, index: usize) {
        Board::undo_move(self, index)
    }

    fn winner(&self) -> Option<Mark> {
        self.winner
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(BOARD_SIZE).enumerate() {
            let symbols: Vec<String> = cells.iter().map(|m| m.symbol().to_string()).collect();
            writeln!(f, " {}", symbols.join(" | "))?;
            if row + 1 < BOARD_SIZE {
                writeln!(f, "-----------")?;
            }
        }
        Ok(())
    }
}
