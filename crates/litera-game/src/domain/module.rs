//! Narrative modules a choice can belong to.

use std::fmt;
use std::str::FromStr;

use litera_core::error::DomainError;

/// One of the three narrative minigames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameModule {
    /// Media-literacy prebunking: classify a post.
    Prebunking,
    /// Ethical dilemmas: react to a scene.
    Ethical,
    /// Professional-skills tasks.
    Professional,
}

impl GameModule {
    /// Returns the lower-case tag used on the wire and in the action log.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prebunking => "prebunking",
            Self::Ethical => "ethical",
            Self::Professional => "professional",
        }
    }
}

impl fmt::Display for GameModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameModule {
    type Err = DomainError;

    /// Tags are matched case-insensitively.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "prebunking" => Ok(Self::Prebunking),
            "ethical" => Ok(Self::Ethical),
            "professional" => Ok(Self::Professional),
            _ => Err(DomainError::UnknownModule(tag.to_owned())),
        }
    }
}
