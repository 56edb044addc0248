pub mod controller;
pub mod notice;
pub mod pour;
pub mod precipitate;
pub mod rules;
pub mod state;
