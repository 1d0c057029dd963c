//! Drawing actions a grammar symbol can be bound to.

use serde::{Deserialize, Serialize};

/// What the interpreter does when it meets a bound symbol.
///
/// The structural symbols `[`, `]`, `+` and `-` are built in and need no
/// binding; every other symbol only acts through one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Step forward, stroking a segment if the pen is down (`F`).
    Forward,
    /// Step forward without stroking (`f`).
    Move,
    /// Lift the active turtle's pen.
    PenUp,
    /// Lower the active turtle's pen.
    PenDown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_serialize_as_snake_case() {
        assert_eq!(serde_json::to_string(&Action::Forward).unwrap(), "\"forward\"");
        assert_eq!(serde_json::to_string(&Action::PenUp).unwrap(), "\"pen_up\"");
    }

    #[test]
    fn unknown_action_fails_to_deserialize() {
        assert!(serde_json::from_str::<Action>("\"jump\"").is_err());
    }

    #[test]
    fn move_deserializes_from_lowercase() {
        let a: Action = serde_json::from_str("\"move\"").unwrap();
        assert_eq!(a, Action::Move);
    }
}
