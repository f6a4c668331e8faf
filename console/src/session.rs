use std::io::{BufRead, Write};

use tictactoe_common::{Board, GameStatus, Mark, MinimaxBot, TicTacToeGame, log};

pub struct ConsoleSession<R: BufRead, W: Write> {
    input: R,
    output: W,
    human_mark: Mark,
    bot: MinimaxBot,
    starting_position: Option<Board>,
}

impl<R: BufRead, W: Write> ConsoleSession<R, W> {
    pub fn new(input: R, output: W, human_mark: Mark, bot: MinimaxBot) -> Self {
        Self {
            input,
            output,
            human_mark,
            bot,
            starting_position: None,
        }
    }

    /// The first round starts from `board` instead of an empty grid.
    pub fn with_starting_position(mut self, board: Board) -> Self {
        self.starting_position = Some(board);
        self
    }

    pub fn run(&mut self) -> Result<(), String> {
        let mut round = 1;
        loop {
            let start = self.starting_position.take().unwrap_or_default();
            log!("Round {} started", round);

            let Some(status) = self.play_round(start)? else {
                log!("Input closed during round {}", round);
                return Ok(());
            };
            log!("Round {} finished: {:?}", round, status);

            if !self.ask_play_again()? {
                self.say("\nThanks for playing! Goodbye!")?;
                return Ok(());
            }
            round += 1;
        }
    }

    /// `Ok(None)` when the input ends before the round does.
    fn play_round(&mut self, start: Board) -> Result<Option<GameStatus>, String> {
        let bot_mark = self.bot.mark();
        self.say("Welcome to Tic-Tac-Toe!")?;
        self.say(&format!(
            "You are '{}' and the AI is '{}'",
            self.human_mark, bot_mark
        ))?;
        self.say("\nHere's the board with position numbers:")?;
        self.say(&Board::board_with_positions())?;
        self.say("\nLet's begin!\n")?;

        let mut game = TicTacToeGame::resume(start);
        if game.board.available_moves().len() < 9 {
            self.say(&game.board.to_string())?;
        }

        while !game.status.is_over() {
            let mark = game.current_mark;
            let index = if mark == self.human_mark {
                match self.read_human_move(&game.board)? {
                    Some(index) => index,
                    None => return Ok(None),
                }
            } else {
                self.bot
                    .select_move(&game.board)
                    .ok_or_else(|| "Engine found no move on a live board".to_string())?
            };

            game.place_mark(index)?;
            self.say(&format!("\n{} makes a move to square {}", mark, index + 1))?;
            self.say(&game.board.to_string())?;
        }

        let message = match game.status.winner() {
            Some(winner) if winner == self.human_mark => "Congratulations! You win!",
            Some(_) => "AI wins! Better luck next time!",
            None => "It's a tie!",
        };
        self.say(message)?;

        Ok(Some(game.status))
    }

    fn read_human_move(&mut self, board: &Board) -> Result<Option<usize>, String> {
        loop {
            self.prompt(&format!("{}'s turn. Input move (1-9): ", self.human_mark))?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            match parse_square(&line) {
                Some(index) if board.available_moves().contains(&index) => return Ok(Some(index)),
                _ => self.say("Invalid move! Try again.")?,
            }
        }
    }

    fn ask_play_again(&mut self) -> Result<bool, String> {
        loop {
            self.prompt("\nWould you like to play again? (y/n): ")?;
            let Some(line) = self.read_line()? else {
                return Ok(false);
            };

            match line.trim().to_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => self.say("Please enter 'y' or 'n'")?,
            }
        }
    }

    fn read_line(&mut self) -> Result<Option<String>, String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| format!("Failed to read input: {}", e))?;
        if read == 0 { Ok(None) } else { Ok(Some(line)) }
    }

    fn say(&mut self, text: &str) -> Result<(), String> {
        writeln!(self.output, "{}", text).map_err(|e| format!("Failed to write output: {}", e))
    }

    fn prompt(&mut self, text: &str) -> Result<(), String> {
        write!(self.output, "{}", text)
            .and_then(|_| self.output.flush())
            .map_err(|e| format!("Failed to write output: {}", e))
    }
}

/// Players type squares 1-9; the board indexes them 0-8.
fn parse_square(line: &str) -> Option<usize> {
    let square: usize = line.trim().parse().ok()?;
    (1..=9).contains(&square).then(|| square - 1)
}
