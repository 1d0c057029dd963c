#![deny(unsafe_code)]
//! L-system rewriting and turtle interpretation.
//!
//! An [`LSystem`] holds an axiom, a symbol-to-replacement rule table and a
//! symbol-to-[`Action`] binding table. Rewriting steps grow the string in
//! parallel rounds; one interpretation pass then walks the string with a
//! [`Turtle`] and strokes segments onto any
//! [`Canvas`](turtle_art_core::Canvas).
//!
//! `[` and `]` save and restore the turtle, `+` and `-` turn it by the
//! system angle. All other symbols act only through their bindings.

pub mod action;
pub mod lsystem;
pub mod turtle;

pub use action::Action;
pub use lsystem::{check_brackets, LSystem, RenderStats};
pub use turtle::Turtle;
