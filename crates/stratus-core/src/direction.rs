//! Rendering direction for diagram layout.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Direction of data flow in the rendered diagram.
///
/// Maps to the rendering engine's `rankdir` setting. The serialized names
/// match the conventional two-letter direction strings.
///
/// # Variants
///
/// - `TopBottom` - Top-to-bottom flow (default)
/// - `BottomTop` - Bottom-to-top flow
/// - `LeftRight` - Left-to-right flow
/// - `RightLeft` - Right-to-left flow
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Direction {
    /// Top-to-bottom flow (default)
    #[default]
    #[serde(rename = "TB")]
    TopBottom,
    /// Bottom-to-top flow
    #[serde(rename = "BT")]
    BottomTop,
    /// Left-to-right flow
    #[serde(rename = "LR")]
    LeftRight,
    /// Right-to-left flow
    #[serde(rename = "RL")]
    RightLeft,
}

impl Direction {
    /// Returns the `rankdir` value understood by the layout engine.
    pub fn rankdir(self) -> &'static str {
        self.into()
    }
}

impl FromStr for Direction {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TB" => Ok(Self::TopBottom),
            "BT" => Ok(Self::BottomTop),
            "LR" => Ok(Self::LeftRight),
            "RL" => Ok(Self::RightLeft),
            _ => Err("Unsupported direction, expected one of TB, BT, LR, RL"),
        }
    }
}

impl From<Direction> for &'static str {
    fn from(val: Direction) -> Self {
        match val {
            Direction::TopBottom => "TB",
            Direction::BottomTop => "BT",
            Direction::LeftRight => "LR",
            Direction::RightLeft => "RL",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}
