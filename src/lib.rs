pub mod app;
pub mod bag;
pub mod catalog;
pub mod clock;
pub mod components;
pub mod config;
pub mod engine;
pub mod game;
pub mod input;
pub mod renderer;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;
