mod local_game;

pub use local_game::LocalGame;
