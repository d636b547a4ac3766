//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events
//! - Storage (LocalStorage on web, memory natively)
//! - Scoped DOM listeners

pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use input::{InputState, KeyAction, map_key};
