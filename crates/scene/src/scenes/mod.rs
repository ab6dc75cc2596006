//! The fixed set of scenes the renderer can show

mod colonnade;
mod gallery;
mod ground;
mod simple;

use std::fmt;
use std::str::FromStr;

use linalg::{Lanes, Vec3};

pub use colonnade::ColonnadeScene;
pub use gallery::GalleryScene;
pub use ground::GroundScene;
pub use simple::SimpleScene;

use crate::{Sample, Scene, SceneError};

/// Startup selection among the built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneKind {
    Ground,
    Simple,
    #[default]
    Gallery,
    Colonnade,
}

impl SceneKind {
    pub const ALL: [Self; 4] = [Self::Ground, Self::Simple, Self::Gallery, Self::Colonnade];
    pub const NAMES: [&'static str; 4] = ["ground", "simple", "gallery", "colonnade"];

    pub fn name(self) -> &'static str {
        match self {
            Self::Ground => Self::NAMES[0],
            Self::Simple => Self::NAMES[1],
            Self::Gallery => Self::NAMES[2],
            Self::Colonnade => Self::NAMES[3],
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or(SceneError::UnknownScene(wanted))
    }
}

impl Scene for SceneKind {
    fn field<L: Lanes>(&self, time: f32, p: Vec3<L>) -> Sample<L> {
        match self {
            Self::Ground => GroundScene.field(time, p),
            Self::Simple => SimpleScene.field(time, p),
            Self::Gallery => GalleryScene.field(time, p),
            Self::Colonnade => ColonnadeScene.field(time, p),
        }
    }

    fn texture<L: Lanes>(&self, material: L, p: Vec3<L>) -> Vec3<L> {
        match self {
            Self::Ground => GroundScene.texture(material, p),
            Self::Simple => SimpleScene.texture(material, p),
            Self::Gallery => GalleryScene.texture(material, p),
            Self::Colonnade => ColonnadeScene.texture(material, p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SceneKind;

    #[test]
    fn names_parse_back() {
        for kind in SceneKind::ALL {
            assert_eq!(kind.to_string().parse::<SceneKind>(), Ok(kind));
        }
        assert_eq!(" Colonnade ".parse::<SceneKind>(), Ok(SceneKind::Colonnade));
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "cathedral".parse::<SceneKind>().unwrap_err();
        assert!(err.to_string().contains("gallery"));
    }
}
