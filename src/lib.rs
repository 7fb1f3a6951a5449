pub mod app;
pub mod components;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod game;
pub mod input;
pub mod kicks;
pub mod queue;
pub mod render;
pub mod scoring;
pub mod sound;
pub mod spawner;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;
