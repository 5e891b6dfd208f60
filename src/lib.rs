//! Terminal client for a word-guessing game whose hidden word lives on a
//! remote guess service.

pub mod cli;
pub mod error;
pub mod game;
pub mod service;
pub mod wordle;
