use std::time::Instant;

use eframe::egui;

use crate::offline::LocalGame;
use super::board_view::BoardView;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0xEC, 0xF0, 0xF1);
const TITLE: egui::Color32 = egui::Color32::from_rgb(0x2C, 0x3E, 0x50);
const MUTED: egui::Color32 = egui::Color32::from_rgb(0x7F, 0x8C, 0x8D);
const HUMAN: egui::Color32 = egui::Color32::from_rgb(0xE7, 0x4C, 0x3C);
const AI: egui::Color32 = egui::Color32::from_rgb(0x34, 0x98, 0xDB);
const NEW_GAME: egui::Color32 = egui::Color32::from_rgb(0xE7, 0x4C, 0x3C);

pub struct TicTacToeApp {
    local_game: LocalGame,
    board_view: BoardView,
    game_over_acknowledged: bool,
}

impl TicTacToeApp {
    pub fn new(local_game: LocalGame) -> Self {
        Self {
            local_game,
            board_view: BoardView::new(),
            game_over_acknowledged: false,
        }
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Tic Tac Toe").size(28.0).strong().color(TITLE));
        ui.label(egui::RichText::new("Play against AI").size(14.0).color(MUTED));
        ui.add_space(16.0);

        let scores = self.local_game.scores();
        ui.horizontal(|ui| {
            ui.add_space(40.0);
            ui.label(egui::RichText::new(format!("You: {}", scores.human)).size(18.0).color(HUMAN));
            ui.add_space(20.0);
            ui.label(egui::RichText::new("VS").size(14.0).strong().color(MUTED));
            ui.add_space(20.0);
            ui.label(egui::RichText::new(format!("AI: {}", scores.ai)).size(18.0).color(AI));
        });
        ui.add_space(12.0);

        ui.label(
            egui::RichText::new(self.local_game.status_text())
                .size(18.0)
                .color(TITLE),
        );
        ui.add_space(12.0);
    }

    fn render_game_over(&mut self, ctx: &egui::Context) {
        let message = self.local_game.status_text();
        egui::Window::new("Game Over")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(message).size(18.0).strong());
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.game_over_acknowledged = true;
                    }
                });
            });
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.local_game.tick(now);

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(BACKGROUND).inner_margin(20.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    self.render_header(ui);

                    let interactive = self.local_game.is_human_turn();
                    let board = self.local_game.game().board;
                    if let Some(index) = self.board_view.render(ui, &board, interactive) {
                        self.local_game.click(index, Instant::now());
                    }

                    ui.add_space(20.0);
                    let new_game = egui::Button::new(
                        egui::RichText::new("New Game").size(16.0).color(egui::Color32::WHITE),
                    )
                    .fill(NEW_GAME)
                    .min_size(egui::vec2(140.0, 36.0));
                    if ui.add(new_game).clicked() {
                        self.local_game.new_game(Instant::now());
                        self.game_over_acknowledged = false;
                    }
                });
            });

        if self.local_game.game().status.is_over() && !self.game_over_acknowledged {
            self.render_game_over(ctx);
        }

        if let Some(wait) = self.local_game.time_until_bot_move(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}
