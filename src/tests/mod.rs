#![warn(clippy::all, clippy::pedantic)]

pub mod config_tests;
pub mod input_tests;
pub mod queue_tests;
pub mod scoring_tests;
pub mod sound_tests;
pub mod ui_tests;
