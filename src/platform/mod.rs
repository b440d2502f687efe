//! Platform abstraction layer
//!
//! Translates raw key symbols from whatever windowing layer hosts the game
//! into simulation `Command`s.

pub mod input;

pub use input::KeyMapper;
