//! The two demo scenes
//!
//! - `snap`: drag boxes around, shift-click to group them
//! - `cube`: a wireframe triangle cloud driven by a debug panel

pub mod cube;
pub mod snap;

use serde::{Deserialize, Serialize};

/// Which demo to launch
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    #[default]
    Snap,
    Cube,
}

impl SceneKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SceneKind::Snap => "snap",
            SceneKind::Cube => "cube",
        }
    }

    /// Snap only redraws on input; cube animates every frame
    pub fn renders_continuously(self) -> bool {
        matches!(self, SceneKind::Cube)
    }
}
