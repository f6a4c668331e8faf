use std::time::{Duration, Instant};

use tictactoe_common::{GameStatus, Mark, MinimaxBot, TicTacToeGame, log};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Scores {
    pub human: u32,
    pub ai: u32,
    pub ties: u32,
}

/// Human against the engine on one machine. The engine's reply is held back
/// by `ai_delay` so the human's mark shows up first.
pub struct LocalGame {
    game: TicTacToeGame,
    bot: MinimaxBot,
    human_mark: Mark,
    ai_delay: Duration,
    bot_move_due: Option<Instant>,
    scores: Scores,
}

impl LocalGame {
    pub fn new(human_mark: Mark, bot: MinimaxBot, ai_delay: Duration, now: Instant) -> Self {
        let mut local_game = Self {
            game: TicTacToeGame::new(),
            bot,
            human_mark,
            ai_delay,
            bot_move_due: None,
            scores: Scores::default(),
        };
        local_game.schedule_bot_if_its_turn(now);
        local_game
    }

    pub fn game(&self) -> &TicTacToeGame {
        &self.game
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn is_human_turn(&self) -> bool {
        !self.game.status.is_over()
            && self.game.current_mark == self.human_mark
            && self.bot_move_due.is_none()
    }

    /// A click on an occupied cell, or outside the human's turn, does nothing.
    pub fn click(&mut self, index: usize, now: Instant) -> bool {
        if !self.is_human_turn() {
            return false;
        }

        if self.game.place_mark(index).is_err() {
            return false;
        }

        if !self.record_if_over() {
            self.schedule_bot_if_its_turn(now);
        }
        true
    }

    /// Plays the engine's move once its delay has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        let due = self.bot_move_due?;
        if now < due {
            return None;
        }
        self.bot_move_due = None;

        let Some(index) = self.bot.select_move(&self.game.board) else {
            log!("Engine returned no move for a live board");
            return None;
        };

        if let Err(e) = self.game.place_mark(index) {
            log!("Engine move {} rejected: {}", index, e);
            return None;
        }

        self.record_if_over();
        Some(index)
    }

    pub fn time_until_bot_move(&self, now: Instant) -> Option<Duration> {
        self.bot_move_due.map(|due| due.saturating_duration_since(now))
    }

    pub fn new_game(&mut self, now: Instant) {
        self.game = TicTacToeGame::new();
        self.bot_move_due = None;
        self.schedule_bot_if_its_turn(now);
    }

    pub fn status_text(&self) -> String {
        let bot_mark = self.bot.mark();
        match self.game.status {
            GameStatus::InProgress if self.game.current_mark == self.human_mark => {
                format!("Your turn ({})", self.human_mark)
            }
            GameStatus::InProgress => format!("AI's turn ({})", bot_mark),
            GameStatus::Draw => "It's a tie!".to_string(),
            status if status.winner() == Some(self.human_mark) => "You win!".to_string(),
            _ => "AI wins!".to_string(),
        }
    }

    fn schedule_bot_if_its_turn(&mut self, now: Instant) {
        if !self.game.status.is_over() && self.game.current_mark == self.bot.mark() {
            self.bot_move_due = Some(now + self.ai_delay);
        }
    }

    fn record_if_over(&mut self) -> bool {
        match self.game.status {
            GameStatus::InProgress => return false,
            GameStatus::Draw => self.scores.ties += 1,
            status if status.winner() == Some(self.human_mark) => self.scores.human += 1,
            _ => self.scores.ai += 1,
        }
        log!(
            "Game over: {:?}, you {} - AI {} ({} ties)",
            self.game.status,
            self.scores.human,
            self.scores.ai,
            self.scores.ties
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_common::SessionRng;

    const DELAY: Duration = Duration::from_millis(500);

    fn local_game(human_mark: Mark, now: Instant) -> LocalGame {
        let bot_mark = human_mark.opponent().unwrap();
        let bot = MinimaxBot::new(bot_mark, SessionRng::new(3)).unwrap();
        LocalGame::new(human_mark, bot, DELAY, now)
    }

    fn play_lowest_free_cell_to_end(local_game: &mut LocalGame, mut now: Instant) {
        while !local_game.game().status.is_over() {
            if local_game.is_human_turn() {
                let index = local_game.game().board.available_moves()[0];
                assert!(local_game.click(index, now));
            } else {
                now += DELAY;
                assert!(local_game.tick(now).is_some());
            }
        }
    }

    #[test]
    fn test_human_moves_first_as_x() {
        let now = Instant::now();
        let local_game = local_game(Mark::X, now);
        assert!(local_game.is_human_turn());
        assert_eq!(local_game.time_until_bot_move(now), None);
        assert_eq!(local_game.status_text(), "Your turn (X)");
    }

    #[test]
    fn test_bot_reply_waits_for_delay() {
        let now = Instant::now();
        let mut local_game = local_game(Mark::X, now);
        assert!(local_game.click(4, now));
        assert!(!local_game.is_human_turn());
        assert_eq!(local_game.status_text(), "AI's turn (O)");
        assert_eq!(local_game.time_until_bot_move(now), Some(DELAY));

        assert_eq!(local_game.tick(now + DELAY / 2), None);
        let reply = local_game.tick(now + DELAY).unwrap();
        assert!([0, 2, 6, 8].contains(&reply));
        assert!(local_game.is_human_turn());
    }

    #[test]
    fn test_clicks_ignored_when_not_allowed() {
        let now = Instant::now();
        let mut local_game = local_game(Mark::X, now);
        assert!(local_game.click(0, now));
        // Engine is thinking.
        assert!(!local_game.click(1, now));

        local_game.tick(now + DELAY);
        assert!(!local_game.click(0, now + DELAY));
        assert_eq!(local_game.game().board.count_empty_squares(), 7);
    }

    #[test]
    fn test_bot_opens_when_human_is_o() {
        let now = Instant::now();
        let mut local_game = local_game(Mark::O, now);
        assert!(!local_game.is_human_turn());
        assert!(!local_game.click(4, now));

        let opening = local_game.tick(now + DELAY).unwrap();
        assert!([0, 2, 4, 6, 8].contains(&opening));
        assert!(local_game.is_human_turn());
    }

    #[test]
    fn test_scores_tally_and_new_game() {
        let mut now = Instant::now();
        let mut local_game = local_game(Mark::X, now);

        for round in 1..=3u32 {
            play_lowest_free_cell_to_end(&mut local_game, now);
            let scores = local_game.scores();
            assert_eq!(scores.human, 0);
            assert_eq!(scores.ai + scores.ties, round);
            assert!(!local_game.click(0, now));

            now += Duration::from_secs(10);
            local_game.new_game(now);
            assert_eq!(local_game.game().board.count_empty_squares(), 9);
        }
    }

    #[test]
    fn test_status_after_loss() {
        let now = Instant::now();
        let mut local_game = local_game(Mark::X, now);
        play_lowest_free_cell_to_end(&mut local_game, now);
        match local_game.game().status {
            GameStatus::OWon => assert_eq!(local_game.status_text(), "AI wins!"),
            GameStatus::Draw => assert_eq!(local_game.status_text(), "It's a tie!"),
            other => panic!("unexpected status {:?}", other),
        }
    }
}
