use super::board::Board;
use super::search::MinimaxBot;
use super::types::{CELL_COUNT, GameStatus, Mark};

/// Anything that can be asked for the next move: the engine, or a front-end
/// relaying a human.
pub trait Player {
    fn choose_move(&mut self, board: &Board) -> Option<usize>;
}

impl Player for MinimaxBot {
    fn choose_move(&mut self, board: &Board) -> Option<usize> {
        self.select_move(board)
    }
}

/// One round: X moves first, turns alternate until a line is completed or
/// the board fills up.
#[derive(Debug, Clone)]
pub struct TicTacToeGame {
    pub board: Board,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub last_move: Option<usize>,
}

impl Default for TicTacToeGame {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeGame {
    pub fn new() -> Self {
        Self::from_board(Board::new(), Mark::X)
    }

    /// Resumes from an arbitrary position with `current_mark` to move.
    pub fn from_board(board: Board, current_mark: Mark) -> Self {
        let mut game = Self {
            board,
            current_mark,
            status: GameStatus::InProgress,
            last_move: None,
        };
        game.check_game_over();
        game
    }

    /// Resumes from a position, inferring the side to move from the mark
    /// counts. X is to move when both sides have placed the same number.
    pub fn resume(board: Board) -> Self {
        let x_count = board.cells().iter().filter(|&&m| m == Mark::X).count();
        let o_count = board.cells().iter().filter(|&&m| m == Mark::O).count();
        let current_mark = if x_count > o_count { Mark::O } else { Mark::X };
        Self::from_board(board, current_mark)
    }

    pub fn place_mark(&mut self, index: usize) -> Result<(), String> {
        if self.status.is_over() {
            return Err("Game is already over".to_string());
        }

        if index >= CELL_COUNT {
            return Err("Position out of bounds".to_string());
        }

        if !self.board.apply_move(index, self.current_mark) {
            return Err("Cell is already marked".to_string());
        }

        self.last_move = Some(index);
        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        Ok(())
    }

    /// Asks each side for moves in turn until the round ends.
    pub fn play_out(
        &mut self,
        x_player: &mut dyn Player,
        o_player: &mut dyn Player,
    ) -> Result<GameStatus, String> {
        while !self.status.is_over() {
            let player: &mut dyn Player = match self.current_mark {
                Mark::X => &mut *x_player,
                Mark::O => &mut *o_player,
                Mark::Empty => return Err("No side to move".to_string()),
            };

            let index = player
                .choose_move(&self.board)
                .ok_or_else(|| format!("{} has no move on a live board", self.current_mark))?;
            self.place_mark(index)?;
        }

        Ok(self.status)
    }

    fn switch_turn(&mut self) {
        if let Some(next) = self.current_mark.opponent() {
            self.current_mark = next;
        }
    }

    fn check_game_over(&mut self) {
        if let Some(winner) = self.board.winner() {
            self.status = GameStatus::from_winner(winner);
            return;
        }

        if !self.board.has_empty_squares() {
            self.status = GameStatus::Draw;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::SessionRng;

    struct RandomPlayer {
        rng: SessionRng,
    }

    impl Player for RandomPlayer {
        fn choose_move(&mut self, board: &Board) -> Option<usize> {
            self.rng.choose(&board.available_moves())
        }
    }

    struct ScriptedPlayer {
        moves: Vec<usize>,
    }

    impl Player for ScriptedPlayer {
        fn choose_move(&mut self, _board: &Board) -> Option<usize> {
            if self.moves.is_empty() {
                None
            } else {
                Some(self.moves.remove(0))
            }
        }
    }

    fn bot(mark: Mark, seed: u64) -> MinimaxBot {
        MinimaxBot::new(mark, SessionRng::new(seed)).unwrap()
    }

    #[test]
    fn test_place_mark_alternates_turns() {
        let mut game = TicTacToeGame::new();
        assert_eq!(game.current_mark, Mark::X);
        game.place_mark(4).unwrap();
        assert_eq!(game.current_mark, Mark::O);
        assert_eq!(game.last_move, Some(4));
        assert_eq!(game.board.cell(4), Some(Mark::X));
    }

    #[test]
    fn test_place_mark_errors() {
        let mut game = TicTacToeGame::new();
        assert_eq!(game.place_mark(9), Err("Position out of bounds".to_string()));
        game.place_mark(0).unwrap();
        assert_eq!(game.place_mark(0), Err("Cell is already marked".to_string()));
        assert_eq!(game.current_mark, Mark::O);
    }

    #[test]
    fn test_win_stops_the_game() {
        let mut game = TicTacToeGame::new();
        for index in [0, 3, 1, 4, 2] {
            game.place_mark(index).unwrap();
        }
        assert_eq!(game.status, GameStatus::XWon);
        assert_eq!(game.current_mark, Mark::X);
        assert_eq!(game.place_mark(8), Err("Game is already over".to_string()));
    }

    #[test]
    fn test_full_board_is_draw() {
        let mut game = TicTacToeGame::new();
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            game.place_mark(index).unwrap();
        }
        assert_eq!(game.status, GameStatus::Draw);
        assert!(!game.board.has_empty_squares());
        assert_eq!(game.board.winner(), None);
    }

    #[test]
    fn test_from_finished_board() {
        let game = TicTacToeGame::from_board(Board::parse("XOX XOO OXX").unwrap(), Mark::O);
        assert_eq!(game.status, GameStatus::Draw);
    }

    #[test]
    fn test_resume_infers_side_to_move() {
        let game = TicTacToeGame::resume(Board::parse("XX. OO. ...").unwrap());
        assert_eq!(game.current_mark, Mark::X);
        assert_eq!(game.status, GameStatus::InProgress);

        let game = TicTacToeGame::resume(Board::parse("X.. ... ...").unwrap());
        assert_eq!(game.current_mark, Mark::O);
    }

    #[test]
    fn test_self_play_is_always_draw() {
        for seed in 0..10 {
            let mut game = TicTacToeGame::new();
            let status = game
                .play_out(&mut bot(Mark::X, seed), &mut bot(Mark::O, seed + 100))
                .unwrap();
            assert_eq!(status, GameStatus::Draw);
        }
    }

    #[test]
    fn test_center_opening_played_out_is_draw() {
        let mut game = TicTacToeGame::new();
        game.place_mark(4).unwrap();

        let mut o_bot = bot(Mark::O, 5);
        let reply = o_bot.choose_move(&game.board).unwrap();
        assert!([0, 2, 6, 8].contains(&reply));

        let status = game.play_out(&mut bot(Mark::X, 6), &mut o_bot).unwrap();
        assert_eq!(status, GameStatus::Draw);
    }

    #[test]
    fn test_bot_never_loses_to_random_player() {
        for seed in 0..100 {
            let mut random = RandomPlayer {
                rng: SessionRng::new(seed),
            };

            let mut game = TicTacToeGame::new();
            let status = game.play_out(&mut bot(Mark::X, seed), &mut random).unwrap();
            assert_ne!(status, GameStatus::OWon);

            let mut game = TicTacToeGame::new();
            let status = game.play_out(&mut random, &mut bot(Mark::O, seed)).unwrap();
            assert_ne!(status, GameStatus::XWon);
        }
    }

    #[test]
    fn test_play_out_reports_stuck_player() {
        let mut game = TicTacToeGame::new();
        let mut scripted = ScriptedPlayer { moves: vec![0] };
        let result = game.play_out(&mut scripted, &mut bot(Mark::O, 1));
        assert!(result.is_err());
        assert_eq!(game.board.count_empty_squares(), 7);
    }
}
