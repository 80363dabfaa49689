pub mod game_boy;
