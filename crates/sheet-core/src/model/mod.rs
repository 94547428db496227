//! Modelos neutrales (Context, ScratchDir).

pub mod context;
pub mod scratch;

pub use context::Context;
pub use scratch::ScratchDir;
