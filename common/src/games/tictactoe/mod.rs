mod board;
mod game;
mod search;
mod types;

pub use board::{Board, GameBoard, LINES};
pub use game::{Player, TicTacToeGame};
pub use search::{MinimaxBot, SearchResult};
pub use types::{BOARD_SIZE, CELL_COUNT, GameStatus, Mark, OPENING_MOVES};
