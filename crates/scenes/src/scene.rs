//! Serializable scene definitions.
//!
//! A [`SceneDef`] captures everything needed to reproduce a picture: the
//! grammar, its bindings, the turn angle, the step length, the iteration
//! count and the output geometry. Definitions round-trip through JSON, so a
//! custom curve can live in a file next to the built-in ones.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use turtle_art_core::params::{param_f64, param_point, param_usize};
use turtle_art_core::{EngineError, Gradient};
use turtle_art_lsystem::{Action, LSystem};

/// Default output edge length in pixels.
pub const DEFAULT_SIZE: usize = 4096;

fn default_angle() -> f64 {
    turtle_art_lsystem::lsystem::DEFAULT_ANGLE
}

fn default_scale() -> f64 {
    turtle_art_lsystem::turtle::DEFAULT_STEP_LENGTH
}

fn default_origin() -> [f64; 2] {
    [0.5, 0.5]
}

fn default_size() -> usize {
    DEFAULT_SIZE
}

/// A complete, reproducible scene.
///
/// `iterations` counts the drawing pass: the grammar is rewritten
/// `iterations - 1` times and the result is interpreted once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDef {
    pub name: String,
    /// Turn increment in degrees.
    #[serde(default = "default_angle")]
    pub angle: f64,
    /// Turtle step length in normalized units.
    #[serde(default = "default_scale")]
    pub scale: f64,
    pub axiom: String,
    #[serde(default)]
    pub rules: BTreeMap<String, String>,
    #[serde(default)]
    pub bindings: BTreeMap<String, Action>,
    pub iterations: usize,
    /// Normalized translation applied before drawing.
    #[serde(default = "default_origin")]
    pub origin: [f64; 2],
    #[serde(default = "default_size")]
    pub width: usize,
    #[serde(default = "default_size")]
    pub height: usize,
    #[serde(default)]
    pub background: Gradient,
}

impl SceneDef {
    /// Creates a scene with no rules or bindings and default geometry.
    pub fn new(name: &str, axiom: &str, iterations: usize) -> Self {
        Self {
            name: name.to_string(),
            angle: default_angle(),
            scale: default_scale(),
            axiom: axiom.to_string(),
            rules: BTreeMap::new(),
            bindings: BTreeMap::new(),
            iterations,
            origin: default_origin(),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            background: Gradient::default(),
        }
    }

    /// Sets the turn increment in degrees.
    pub fn with_angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }

    /// Sets the turtle step length in normalized units.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Adds or replaces the rule for `symbol`.
    pub fn with_rule(mut self, symbol: char, replacement: &str) -> Self {
        self.rules.insert(symbol.to_string(), replacement.to_string());
        self
    }

    /// Binds `symbol` to a drawing action.
    pub fn with_binding(mut self, symbol: char, action: Action) -> Self {
        self.bindings.insert(symbol.to_string(), action);
        self
    }

    /// Sets the normalized translation applied before drawing.
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = [x, y];
        self
    }

    /// Sets the output size in pixels.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Applies `iterations`, `width`, `height`, `angle`, `scale` and `origin`
    /// overrides from a JSON object. Missing or mistyped keys keep their value.
    pub fn with_overrides(mut self, params: &Value) -> Self {
        self.iterations = param_usize(params, "iterations", self.iterations);
        self.width = param_usize(params, "width", self.width);
        self.height = param_usize(params, "height", self.height);
        self.angle = param_f64(params, "angle", self.angle);
        self.scale = param_f64(params, "scale", self.scale);
        self.origin = param_point(params, "origin", self.origin);
        self
    }

    /// Number of pure rewriting steps before the drawing pass.
    pub fn expansion_steps(&self) -> usize {
        self.iterations.saturating_sub(1)
    }

    /// Default output path, `<name>.png` in the working directory.
    ///
    /// [`validate`](Self::validate) guarantees the name has no directory part.
    pub fn output_file(&self) -> PathBuf {
        PathBuf::from(format!("{}.png", self.name))
    }

    /// Checks the configuration before any rewriting happens.
    ///
    /// Fails on a name that is not a plain file stem, a non-positive or
    /// non-finite scale, zero iterations, zero or overflowing dimensions, and
    /// rule or binding keys that are not exactly one character.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !is_plain_stem(&self.name) {
            return Err(EngineError::InvalidSceneName(self.name.clone()));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(EngineError::InvalidStepLength(self.scale));
        }
        if self.iterations == 0 {
            return Err(EngineError::InvalidIterations);
        }
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(EngineError::InvalidDimensions)?;
        for key in self.rules.keys().chain(self.bindings.keys()) {
            single_symbol(key)?;
        }
        Ok(())
    }

    /// Validates the scene and returns a fresh engine configured from it.
    ///
    /// An axiom that no rule, binding or built-in symbol touches is accepted
    /// with a warning; it simply renders an empty background.
    pub fn build(&self) -> Result<LSystem, EngineError> {
        self.validate()?;
        let mut system = LSystem::new(self.axiom.as_str())
            .with_angle(self.angle)
            .with_step_length(self.scale)?;
        for (symbol, replacement) in &self.rules {
            system.add_rule(single_symbol(symbol)?, replacement.as_str());
        }
        for (symbol, action) in &self.bindings {
            system.bind(single_symbol(symbol)?, *action);
        }
        if system.axiom_is_inert() {
            log::warn!(
                "scene '{}': axiom {:?} references no rules or bindings, nothing will be drawn",
                self.name,
                self.axiom
            );
        }
        Ok(system)
    }
}

/// True when `name.png` stays inside the directory it is joined to.
fn is_plain_stem(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !Path::new(name).has_root()
}

/// Extracts the only character of `key`.
fn single_symbol(key: &str) -> Result<char, EngineError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(EngineError::InvalidSymbol(key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use turtle_art_core::Rgba;

    fn dragon() -> SceneDef {
        SceneDef::new("dragon", "FX", 18)
            .with_scale(0.005)
            .with_rule('X', "X+YF+")
            .with_rule('Y', "-FX-Y")
            .with_binding('F', Action::Forward)
    }

    #[test]
    fn new_uses_defaults() {
        let s = SceneDef::new("x", "F", 3);
        assert!((s.angle - 90.0).abs() < f64::EPSILON);
        assert!((s.scale - 0.02).abs() < f64::EPSILON);
        assert_eq!(s.origin, [0.5, 0.5]);
        assert_eq!((s.width, s.height), (DEFAULT_SIZE, DEFAULT_SIZE));
        assert_eq!(s.background, Gradient::default());
    }

    #[test]
    fn json_round_trip() {
        // Hex colors are 8-bit, so pick stops that survive quantization.
        let mut original = dragon().with_size(256, 128).with_origin(0.3, 0.6);
        original.background = Gradient::new(
            Rgba::from_hex("#e6b333").unwrap(),
            Rgba::from_hex("#b3000080").unwrap(),
        );
        let json = serde_json::to_string(&original).unwrap();
        let restored: SceneDef = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let s: SceneDef = serde_json::from_value(json!({
            "name": "koch",
            "axiom": "F",
            "rules": {"F": "F+F-F-F+F"},
            "bindings": {"F": "forward"},
            "iterations": 4
        }))
        .unwrap();
        assert!((s.angle - 90.0).abs() < f64::EPSILON);
        assert_eq!(s.width, DEFAULT_SIZE);
        assert_eq!(s.bindings.get("F"), Some(&Action::Forward));
        s.validate().unwrap();
    }

    #[test]
    fn json_missing_iterations_fails() {
        let result = serde_json::from_value::<SceneDef>(json!({"name": "n", "axiom": "F"}));
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_non_positive_scale() {
        let err = dragon().with_scale(0.0).validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidStepLength(_)));
        assert!(dragon().with_scale(f64::NAN).validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_iterations() {
        let mut s = dragon();
        s.iterations = 0;
        assert!(matches!(s.validate(), Err(EngineError::InvalidIterations)));
    }

    #[test]
    fn validate_rejects_zero_dimensions() {
        assert!(matches!(
            dragon().with_size(0, 10).validate(),
            Err(EngineError::InvalidDimensions)
        ));
    }

    #[test]
    fn validate_rejects_multi_char_rule_key() {
        let mut s = dragon();
        s.rules.insert("XY".into(), "X".into());
        assert!(matches!(s.validate(), Err(EngineError::InvalidSymbol(k)) if k == "XY"));
    }

    #[test]
    fn validate_rejects_empty_binding_key() {
        let mut s = dragon();
        s.bindings.insert(String::new(), Action::Forward);
        assert!(matches!(s.validate(), Err(EngineError::InvalidSymbol(_))));
    }

    #[test]
    fn validate_rejects_names_that_escape_the_working_directory() {
        for name in ["../../x", "sub/dragon", "..\\dragon", "/tmp/dragon", "..", ""] {
            let mut s = dragon();
            s.name = name.to_string();
            assert!(
                matches!(s.validate(), Err(EngineError::InvalidSceneName(ref n)) if n == name),
                "{name:?} was accepted"
            );
        }
    }

    #[test]
    fn file_loaded_name_with_separator_is_rejected_by_build() {
        let s: SceneDef = serde_json::from_value(json!({
            "name": "../escape",
            "axiom": "F",
            "iterations": 1
        }))
        .unwrap();
        assert!(matches!(s.build(), Err(EngineError::InvalidSceneName(_))));
    }

    #[test]
    fn dotted_names_are_still_plain() {
        let mut s = dragon();
        s.name = "dragon.v2".into();
        s.validate().unwrap();
        assert_eq!(s.output_file(), PathBuf::from("dragon.v2.png"));
    }

    #[test]
    fn build_configures_the_engine() {
        let sys = dragon().build().unwrap();
        assert_eq!(sys.current(), "FX");
        assert_eq!(sys.rule('X'), Some("X+YF+"));
        assert_eq!(sys.binding('F'), Some(Action::Forward));
        assert!((sys.step_length() - 0.005).abs() < f64::EPSILON);
    }

    #[test]
    fn build_returns_fresh_engines() {
        let def = dragon();
        let mut a = def.build().unwrap();
        a.expand(3).unwrap();
        let b = def.build().unwrap();
        assert_eq!(b.current(), "FX");
        assert_eq!(b.generation(), 0);
    }

    #[test]
    fn build_accepts_inert_axiom() {
        let sys = SceneDef::new("empty", "QQ", 2).build().unwrap();
        assert!(sys.axiom_is_inert());
    }

    #[test]
    fn overrides_replace_only_present_keys() {
        let s = dragon().with_overrides(&json!({
            "iterations": 5,
            "width": 320,
            "origin": [0.1, 0.2],
            "scale": "ignored"
        }));
        assert_eq!(s.iterations, 5);
        assert_eq!(s.width, 320);
        assert_eq!(s.height, DEFAULT_SIZE);
        assert_eq!(s.origin, [0.1, 0.2]);
        assert!((s.scale - 0.005).abs() < f64::EPSILON);
    }

    #[test]
    fn expansion_steps_is_one_less_than_iterations() {
        assert_eq!(dragon().expansion_steps(), 17);
        let mut s = dragon();
        s.iterations = 1;
        assert_eq!(s.expansion_steps(), 0);
    }

    #[test]
    fn output_file_uses_scene_name() {
        assert_eq!(dragon().output_file(), PathBuf::from("dragon.png"));
    }

    #[test]
    fn single_symbol_accepts_multibyte_char() {
        assert_eq!(single_symbol("é").unwrap(), 'é');
    }
}
