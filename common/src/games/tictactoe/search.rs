use crate::games::SessionRng;
use crate::log;
use super::board::GameBoard;
use super::types::{CELL_COUNT, Mark, OPENING_MOVES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub position: Option<usize>,
    pub score: i32,
}

impl SearchResult {
    fn terminal(score: i32) -> Self {
        Self {
            position: None,
            score,
        }
    }
}

/// A move applied for the lifetime of the guard. Dropping it undoes the move,
/// so every way out of a search node leaves the board as it found it.
struct MoveGuard<'a, B: GameBoard> {
    board: &'a mut B,
    index: usize,
}

impl<'a, B: GameBoard> MoveGuard<'a, B> {
    fn apply(board: &'a mut B, index: usize, mark: Mark) -> Option<Self> {
        if board.apply_move(index, mark) {
            Some(Self { board, index })
        } else {
            None
        }
    }

    fn board(&mut self) -> &mut B {
        &mut *self.board
    }
}

impl<B: GameBoard> Drop for MoveGuard<'_, B> {
    fn drop(&mut self) {
        self.board.undo_move(self.index);
    }
}

/// Optimal player: full-depth minimax with alpha-beta pruning.
pub struct MinimaxBot {
    mark: Mark,
    opponent: Mark,
    rng: SessionRng,
    randomize_opening: bool,
}

impl MinimaxBot {
    pub fn new(mark: Mark, rng: SessionRng) -> Result<Self, String> {
        let opponent = mark
            .opponent()
            .ok_or_else(|| "Bot mark must be X or O".to_string())?;

        Ok(Self {
            mark,
            opponent,
            rng,
            randomize_opening: true,
        })
    }

    /// With the shortcut off, an empty board is searched like any other
    /// position and always yields cell 0.
    pub fn with_randomized_opening(mut self, randomize_opening: bool) -> Self {
        self.randomize_opening = randomize_opening;
        self
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Returns `None` for a board that is already won or full.
    pub fn select_move<B: GameBoard + Clone>(&mut self, board: &B) -> Option<usize> {
        if board.is_terminal() {
            return None;
        }

        if self.randomize_opening && board.count_empty_squares() == CELL_COUNT {
            let position = self.rng.choose(&OPENING_MOVES);
            log!("{} opens at {:?}", self.mark, position);
            return position;
        }

        let mut scratch = board.clone();
        let result = self.search(&mut scratch, self.mark, i32::MIN, i32::MAX);
        log!(
            "{} picked {:?} with score {}",
            self.mark,
            result.position,
            result.score
        );
        result.position
    }

    /// Scores are from this bot's point of view: `empty + 1` for a win, the
    /// negation for a loss, `0` for a draw, so quicker wins and slower losses
    /// rank higher. Ties keep the lowest index.
    pub fn search<B: GameBoard>(
        &self,
        board: &mut B,
        side_to_move: Mark,
        mut alpha: i32,
        mut beta: i32,
    ) -> SearchResult {
        if let Some(winner) = board.winner() {
            let magnitude = board.count_empty_squares() as i32 + 1;
            return if winner == self.mark {
                SearchResult::terminal(magnitude)
            } else {
                SearchResult::terminal(-magnitude)
            };
        }

        if !board.has_empty_squares() {
            return SearchResult::terminal(0);
        }

        let maximizing = side_to_move == self.mark;
        let next_side = if maximizing { self.opponent } else { self.mark };

        let mut best = SearchResult {
            position: None,
            score: if maximizing { i32::MIN } else { i32::MAX },
        };

        for index in board.available_moves() {
            let score = {
                let Some(mut guard) = MoveGuard::apply(board, index, side_to_move) else {
                    continue;
                };
                self.search(guard.board(), next_side, alpha, beta).score
            };

            if maximizing {
                if score > best.score {
                    best = SearchResult {
                        position: Some(index),
                        score,
                    };
                }
                alpha = alpha.max(best.score);
            } else {
                if score < best.score {
                    best = SearchResult {
                        position: Some(index),
                        score,
                    };
                }
                beta = beta.min(best.score);
            }

            if beta <= alpha {
                break;
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Board;

    fn bot(mark: Mark) -> MinimaxBot {
        MinimaxBot::new(mark, SessionRng::new(42)).unwrap()
    }

    fn assert_never_loses(bot: &mut MinimaxBot, board: &mut Board, to_move: Mark) {
        if let Some(winner) = board.winner() {
            assert_eq!(winner, bot.mark(), "bot lost on\n{}", board);
            return;
        }
        if !board.has_empty_squares() {
            return;
        }

        let next = to_move.opponent().unwrap();
        if to_move == bot.mark() {
            let index = bot.select_move(&*board).unwrap();
            assert!(board.apply_move(index, to_move));
            assert_never_loses(bot, board, next);
            board.undo_move(index);
        } else {
            for index in board.available_moves() {
                assert!(board.apply_move(index, to_move));
                assert_never_loses(bot, board, next);
                board.undo_move(index);
            }
        }
    }

    #[test]
    fn test_new_rejects_empty_mark() {
        assert!(MinimaxBot::new(Mark::Empty, SessionRng::new(1)).is_err());
    }

    #[test]
    fn test_completes_own_row() {
        let board = Board::parse("XX. OO. ...").unwrap();
        let mut bot = bot(Mark::X);
        assert_eq!(bot.select_move(&board), Some(2));

        let mut scratch = board;
        let result = bot.search(&mut scratch, Mark::X, i32::MIN, i32::MAX);
        assert_eq!(result, SearchResult { position: Some(2), score: 5 });
    }

    #[test]
    fn test_blocks_immediate_threat() {
        let board = Board::parse("XX. .O. ...").unwrap();
        assert_eq!(bot(Mark::O).select_move(&board), Some(2));
    }

    #[test]
    fn test_prefers_own_win_over_block() {
        let board = Board::parse("OO. XX. X..").unwrap();
        assert_eq!(bot(Mark::O).select_move(&board), Some(2));
    }

    #[test]
    fn test_equal_wins_keep_lowest_index() {
        let mut board = Board::parse("XX. XOO ..O").unwrap();
        let result = bot(Mark::X).search(&mut board, Mark::X, i32::MIN, i32::MAX);
        assert_eq!(result, SearchResult { position: Some(2), score: 3 });
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let layouts = ["XX. OO. ...", "X.. .O. ...", "... ... ...", "XO. .X. ..O"];
        for layout in layouts {
            let mut board = Board::parse(layout).unwrap();
            let before = board;
            bot(Mark::O).search(&mut board, Mark::O, i32::MIN, i32::MAX);
            assert_eq!(board, before);
        }
    }

    #[test]
    fn test_full_search_from_empty_board_is_deterministic() {
        let mut board = Board::new();
        let result = bot(Mark::X).search(&mut board, Mark::X, i32::MIN, i32::MAX);
        assert_eq!(result, SearchResult { position: Some(0), score: 0 });

        let mut bot = bot(Mark::X).with_randomized_opening(false);
        assert_eq!(bot.select_move(&Board::new()), Some(0));
    }

    #[test]
    fn test_opening_shortcut_is_seeded() {
        for seed in 0..20 {
            let mut a = MinimaxBot::new(Mark::X, SessionRng::new(seed)).unwrap();
            let mut b = MinimaxBot::new(Mark::X, SessionRng::new(seed)).unwrap();
            let first = a.select_move(&Board::new()).unwrap();
            assert!(OPENING_MOVES.contains(&first));
            assert_eq!(b.select_move(&Board::new()), Some(first));
        }
    }

    #[test]
    fn test_terminal_board_has_no_move() {
        let mut bot = bot(Mark::O);
        assert_eq!(bot.select_move(&Board::parse("XOX XOO OXX").unwrap()), None);
        assert_eq!(bot.select_move(&Board::parse("XXX OO. ...").unwrap()), None);
    }

    #[test]
    fn test_center_opening_answered_with_corner() {
        let board = Board::parse("... .X. ...").unwrap();
        let reply = bot(Mark::O).select_move(&board).unwrap();
        assert!([0, 2, 6, 8].contains(&reply));
    }

    #[test]
    fn test_never_loses_moving_first() {
        for opening in OPENING_MOVES {
            let mut board = Board::new();
            board.apply_move(opening, Mark::X);
            let mut bot = bot(Mark::X);
            assert_never_loses(&mut bot, &mut board, Mark::O);
        }
    }

    #[test]
    fn test_never_loses_moving_second() {
        let mut board = Board::new();
        let mut bot = bot(Mark::O);
        assert_never_loses(&mut bot, &mut board, Mark::X);
    }

    #[test]
    fn test_punishes_blunder() {
        // O left the 0-4-8 diagonal open.
        let board = Board::parse("X.O .X. O..").unwrap();
        assert_eq!(bot(Mark::X).select_move(&board), Some(8));
    }
}
