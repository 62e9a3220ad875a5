//! Keyboard and wheel input mapped to navigation commands.

use serde::{Deserialize, Serialize};

/// Horizontal direction of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Back,
    Forward,
}

/// Step size of a horizontal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavStep {
    Day,
    Month,
    Year,
    Decade,
}

impl NavStep {
    /// Length of the step. Months and years are fixed day counts, not
    /// calendar units.
    pub fn days(self) -> u64 {
        match self {
            Self::Day => 1,
            Self::Month => 30,
            Self::Year => 365,
            Self::Decade => 3650,
        }
    }
}

/// Keys the timeline reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false };
    pub const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false };
    pub const CTRL: Modifiers = Modifiers { shift: false, ctrl: true };
    pub const CTRL_SHIFT: Modifiers = Modifiers { shift: true, ctrl: true };
}

/// A single navigation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum NavCommand {
    Step { direction: Direction, step: NavStep },
    ZoomIn,
    ZoomOut,
}

impl NavCommand {
    /// Arrow keys step the center date (modifiers widen the step);
    /// up / down zoom.
    pub fn from_key(key: Key, modifiers: Modifiers) -> Self {
        let step = match (modifiers.ctrl, modifiers.shift) {
            (true, true) => NavStep::Decade,
            (true, false) => NavStep::Year,
            (false, true) => NavStep::Month,
            (false, false) => NavStep::Day,
        };
        match key {
            Key::Left => Self::Step {
                direction: Direction::Back,
                step,
            },
            Key::Right => Self::Step {
                direction: Direction::Forward,
                step,
            },
            Key::Up => Self::ZoomIn,
            Key::Down => Self::ZoomOut,
        }
    }

    /// Vertical wheel zooms: up (negative `dy`) zooms in. Horizontal
    /// dominant or zero scrolls yield nothing.
    pub fn from_wheel(dx: f64, dy: f64) -> Option<Self> {
        if dy == 0.0 || dy.abs() <= dx.abs() {
            return None;
        }
        Some(if dy < 0.0 { Self::ZoomIn } else { Self::ZoomOut })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_widen_steps() {
        let cases = [
            (Modifiers::NONE, NavStep::Day, 1),
            (Modifiers::SHIFT, NavStep::Month, 30),
            (Modifiers::CTRL, NavStep::Year, 365),
            (Modifiers::CTRL_SHIFT, NavStep::Decade, 3650),
        ];
        for (modifiers, step, days) in cases {
            assert_eq!(
                NavCommand::from_key(Key::Right, modifiers),
                NavCommand::Step {
                    direction: Direction::Forward,
                    step
                }
            );
            assert_eq!(step.days(), days);
        }
    }

    #[test]
    fn vertical_arrows_zoom_regardless_of_modifiers() {
        assert_eq!(NavCommand::from_key(Key::Up, Modifiers::CTRL), NavCommand::ZoomIn);
        assert_eq!(NavCommand::from_key(Key::Down, Modifiers::NONE), NavCommand::ZoomOut);
    }

    #[test]
    fn wheel_needs_vertical_dominance() {
        assert_eq!(NavCommand::from_wheel(0.0, -3.0), Some(NavCommand::ZoomIn));
        assert_eq!(NavCommand::from_wheel(1.0, 3.0), Some(NavCommand::ZoomOut));
        assert_eq!(NavCommand::from_wheel(5.0, 3.0), None);
        assert_eq!(NavCommand::from_wheel(3.0, -3.0), None);
        assert_eq!(NavCommand::from_wheel(0.0, 0.0), None);
    }
}
