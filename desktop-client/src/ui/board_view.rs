use eframe::egui;
use tictactoe_common::games::tictactoe::{BOARD_SIZE, Board, Mark};

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x34, 0x49, 0x5E);
const HOVER: egui::Color32 = egui::Color32::from_rgb(0x34, 0x98, 0xDB);
const GRID: egui::Color32 = egui::Color32::from_rgb(0xEC, 0xF0, 0xF1);
const X_COLOR: egui::Color32 = egui::Color32::from_rgb(0xE7, 0x4C, 0x3C);
const O_COLOR: egui::Color32 = egui::Color32::from_rgb(0x34, 0x98, 0xDB);
const WIN_LINE: egui::Color32 = egui::Color32::from_rgba_premultiplied(39, 174, 96, 220);

pub struct BoardView {
    last_hover: Option<usize>,
}

impl BoardView {
    pub const CELL_SIZE: f32 = 100.0;
    const LINE_WIDTH: f32 = 6.0;
    const MARK_WIDTH: f32 = 8.0;

    pub fn new() -> Self {
        Self { last_hover: None }
    }

    /// Paints the board and returns the empty cell clicked this frame, if any.
    pub fn render(&mut self, ui: &mut egui::Ui, board: &Board, interactive: bool) -> Option<usize> {
        let side = Self::CELL_SIZE * BOARD_SIZE as f32;
        let (rect, response) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::click());
        let painter = ui.painter();

        painter.rect_filled(rect, 8.0, BACKGROUND);

        self.last_hover = None;
        if interactive
            && let Some(hover_pos) = response.hover_pos()
            && let Some(index) = Self::cell_at(rect, hover_pos)
            && board.cell(index) == Some(Mark::Empty)
        {
            painter.rect_filled(Self::cell_rect(rect, index), 0.0, HOVER.gamma_multiply(0.4));
            self.last_hover = Some(index);
        }

        for i in 1..BOARD_SIZE {
            let offset = i as f32 * Self::CELL_SIZE;
            painter.line_segment(
                [
                    egui::pos2(rect.left() + offset, rect.top()),
                    egui::pos2(rect.left() + offset, rect.bottom()),
                ],
                egui::Stroke::new(Self::LINE_WIDTH, GRID),
            );
            painter.line_segment(
                [
                    egui::pos2(rect.left(), rect.top() + offset),
                    egui::pos2(rect.right(), rect.top() + offset),
                ],
                egui::Stroke::new(Self::LINE_WIDTH, GRID),
            );
        }

        for (index, mark) in board.cells().iter().enumerate() {
            let cell_rect = Self::cell_rect(rect, index);
            match mark {
                Mark::X => Self::draw_x(painter, cell_rect),
                Mark::O => Self::draw_o(painter, cell_rect),
                Mark::Empty => {}
            }
        }

        if let Some(line) = board.winning_line() {
            let start = Self::cell_rect(rect, line[0]).center();
            let end = Self::cell_rect(rect, line[2]).center();
            painter.line_segment([start, end], egui::Stroke::new(10.0, WIN_LINE));
        }

        if interactive && response.clicked() {
            return self.last_hover;
        }
        None
    }

    fn cell_at(rect: egui::Rect, pos: egui::Pos2) -> Option<usize> {
        if !rect.contains(pos) {
            return None;
        }
        let column = ((pos.x - rect.left()) / Self::CELL_SIZE) as usize;
        let row = ((pos.y - rect.top()) / Self::CELL_SIZE) as usize;
        (column < BOARD_SIZE && row < BOARD_SIZE).then_some(row * BOARD_SIZE + column)
    }

    fn cell_rect(rect: egui::Rect, index: usize) -> egui::Rect {
        let row = index / BOARD_SIZE;
        let column = index % BOARD_SIZE;
        egui::Rect::from_min_size(
            egui::pos2(
                rect.left() + column as f32 * Self::CELL_SIZE,
                rect.top() + row as f32 * Self::CELL_SIZE,
            ),
            egui::vec2(Self::CELL_SIZE, Self::CELL_SIZE),
        )
    }

    fn draw_x(painter: &egui::Painter, rect: egui::Rect) {
        let padding = rect.width() * 0.25;
        let stroke = egui::Stroke::new(Self::MARK_WIDTH, X_COLOR);

        painter.line_segment(
            [
                egui::pos2(rect.left() + padding, rect.top() + padding),
                egui::pos2(rect.right() - padding, rect.bottom() - padding),
            ],
            stroke,
        );
        painter.line_segment(
            [
                egui::pos2(rect.right() - padding, rect.top() + padding),
                egui::pos2(rect.left() + padding, rect.bottom() - padding),
            ],
            stroke,
        );
    }

    fn draw_o(painter: &egui::Painter, rect: egui::Rect) {
        let padding = rect.width() * 0.25;
        let radius = (rect.width() / 2.0) - padding;
        painter.circle_stroke(rect.center(), radius, egui::Stroke::new(Self::MARK_WIDTH, O_COLOR));
    }
}
