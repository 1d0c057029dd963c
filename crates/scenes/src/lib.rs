#![deny(unsafe_code)]
//! Scene registry, render pipeline and PNG snapshot.
//!
//! This crate sits between `turtle-art-lsystem` (rewriting and
//! interpretation) and the CLI. Built-in scenes are produced by
//! [`SceneKind::definition`], which hands out a fresh [`SceneDef`] on every
//! call so repeated renders never share state.

pub mod render;
pub mod scene;

#[cfg(feature = "png")]
pub mod snapshot;

pub use render::{paint, render};
#[cfg(feature = "png")]
pub use render::render_to_file;
pub use scene::SceneDef;

use turtle_art_core::EngineError;
use turtle_art_lsystem::Action;

/// All built-in scene names, in listing order.
const SCENE_NAMES: &[&str] = &[
    "striangle",
    "striangle2",
    "dragon",
    "plant",
    "hilbert",
    "moore",
    "gosper",
];

/// The built-in curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    /// Sierpinski triangle drawn with two edge symbols.
    Striangle,
    /// Sierpinski arrowhead curve.
    Striangle2,
    /// Heighway dragon.
    Dragon,
    /// Branching fractal plant; exercises the snapshot stack.
    Plant,
    /// Hilbert space-filling curve.
    Hilbert,
    /// Moore curve, the closed-loop Hilbert variant.
    Moore,
    /// Peano-Gosper flowsnake.
    Gosper,
}

impl SceneKind {
    /// Looks up a built-in scene by name.
    ///
    /// Returns `EngineError::UnknownScene` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        match name {
            "striangle" => Ok(SceneKind::Striangle),
            "striangle2" => Ok(SceneKind::Striangle2),
            "dragon" => Ok(SceneKind::Dragon),
            "plant" => Ok(SceneKind::Plant),
            "hilbert" => Ok(SceneKind::Hilbert),
            "moore" => Ok(SceneKind::Moore),
            "gosper" => Ok(SceneKind::Gosper),
            _ => Err(EngineError::UnknownScene(name.to_string())),
        }
    }

    /// Returns a slice of all recognized scene names.
    pub fn list_names() -> &'static [&'static str] {
        SCENE_NAMES
    }

    /// The registry name of this scene.
    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Striangle => "striangle",
            SceneKind::Striangle2 => "striangle2",
            SceneKind::Dragon => "dragon",
            SceneKind::Plant => "plant",
            SceneKind::Hilbert => "hilbert",
            SceneKind::Moore => "moore",
            SceneKind::Gosper => "gosper",
        }
    }

    /// A freshly built definition of this scene.
    pub fn definition(self) -> SceneDef {
        let name = self.name();
        match self {
            SceneKind::Striangle => SceneDef::new(name, "F-G-G", 7)
                .with_angle(120.0)
                .with_rule('F', "F-G+F+G-F")
                .with_rule('G', "GG")
                .with_binding('F', Action::Forward)
                .with_binding('G', Action::Forward),
            SceneKind::Striangle2 => SceneDef::new(name, "A", 10)
                .with_angle(60.0)
                .with_scale(0.002)
                .with_rule('A', "B-A-B")
                .with_rule('B', "A+B+A")
                .with_binding('A', Action::Forward)
                .with_binding('B', Action::Forward),
            SceneKind::Dragon => SceneDef::new(name, "FX", 18)
                .with_angle(90.0)
                .with_scale(0.005)
                .with_rule('X', "X+YF+")
                .with_rule('Y', "-FX-Y")
                .with_binding('F', Action::Forward),
            SceneKind::Plant => SceneDef::new(name, "X", 10)
                .with_angle(25.0)
                .with_scale(0.001)
                .with_rule('X', "F+[[X]-X]-F[-FX]+X")
                .with_rule('F', "FF")
                .with_binding('F', Action::Forward),
            SceneKind::Hilbert => SceneDef::new(name, "A", 7)
                .with_angle(90.0)
                .with_scale(0.012)
                .with_origin(0.12, 0.12)
                .with_rule('A', "+BF-AFA-FB+")
                .with_rule('B', "-AF+BFB+FA-")
                .with_binding('F', Action::Forward),
            SceneKind::Moore => SceneDef::new(name, "LFL+F+LFL", 6)
                .with_angle(90.0)
                .with_scale(0.012)
                .with_origin(0.12, 0.5)
                .with_rule('L', "-RF+LFL+FR-")
                .with_rule('R', "+LF-RFR-FL+")
                .with_binding('F', Action::Forward),
            SceneKind::Gosper => SceneDef::new(name, "A", 5)
                .with_angle(60.0)
                .with_scale(0.01)
                .with_origin(0.6, 0.75)
                .with_rule('A', "A-B--B+A++AA+B-")
                .with_rule('B', "+A-BB--B-A++A+B")
                .with_binding('A', Action::Forward)
                .with_binding('B', Action::Forward),
        }
    }
}

/// Looks up a built-in scene and returns a fresh definition of it.
pub fn scene(name: &str) -> Result<SceneDef, EngineError> {
    Ok(SceneKind::from_name(name)?.definition())
}
