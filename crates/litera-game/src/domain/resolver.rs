//! Choice resolution rules.
//!
//! Resolution is a pure function of (stats, module, payload). Each rule is
//! expressed as an [`Effect`] table row, and the same row drives both the
//! stat arithmetic and the reported delta, so the two cannot drift apart.

use serde_json::{Map, Value};

use super::module::GameModule;
use super::outcome::{Delta, Outcome};
use super::player::PlayerStats;

/// Character harmed in ethical scenes.
pub const VICTIM: &str = "victim";
/// Character watching ethical scenes.
pub const BYSTANDER: &str = "bystander";

/// New stats plus the outcome that explains them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Stats after the rule was applied.
    pub stats: PlayerStats,
    /// Feedback for the player.
    pub outcome: Outcome,
}

/// A post classification in the prebunking module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Accurate content.
    Verified,
    /// True facts in a misleading frame.
    Misleading,
    /// Fabricated content.
    Hoax,
}

impl Verdict {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "verified" => Some(Self::Verified),
            "misleading" => Some(Self::Misleading),
            "hoax" => Some(Self::Hoax),
            _ => None,
        }
    }
}

/// A reaction in the ethical-dilemma module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EthicalChoice {
    /// Step in directly.
    Intervene,
    /// Report to someone in charge.
    Report,
    /// Do nothing.
    StaySilent,
    /// Join in.
    Participate,
}

impl EthicalChoice {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "intervene" => Some(Self::Intervene),
            "report" => Some(Self::Report),
            "stay_silent" => Some(Self::StaySilent),
            "participate" => Some(Self::Participate),
            _ => None,
        }
    }
}

/// One row of the scoring table.
#[derive(Debug, Clone, Copy)]
struct Effect {
    message: &'static str,
    public_trust: Option<i32>,
    personal_clout: Option<i32>,
    professional_skill: Option<i32>,
    relationships: &'static [(&'static str, i32)],
}

impl Effect {
    const fn new(message: &'static str) -> Self {
        Self {
            message,
            public_trust: None,
            personal_clout: None,
            professional_skill: None,
            relationships: &[],
        }
    }

    fn apply(self, stats: &PlayerStats) -> Resolution {
        let mut next = stats.clone();
        let mut delta = Delta::default();

        if let Some(d) = self.public_trust {
            next.public_trust = next.public_trust.apply(d);
            delta.public_trust = Some(d);
        }
        if let Some(d) = self.personal_clout {
            next.personal_clout = next.personal_clout.apply(d);
            delta.personal_clout = Some(d);
        }
        if let Some(d) = self.professional_skill {
            next.professional_skill = next.professional_skill.apply(d);
            delta.professional_skill = Some(d);
        }
        for &(character, d) in self.relationships {
            next.relationships.adjust(character, d);
            delta.relationships.insert(character.to_owned(), d);
        }

        Resolution {
            stats: next,
            outcome: Outcome {
                message: self.message.to_owned(),
                delta: Some(delta),
            },
        }
    }
}

/// Resolves a choice against the current stats.
///
/// Payloads that do not fit any rule of `module` resolve to
/// [`Outcome::no_effect`] with the stats unchanged.
#[must_use]
pub fn resolve(stats: &PlayerStats, module: GameModule, payload: &Map<String, Value>) -> Resolution {
    let effect = match module {
        GameModule::Prebunking => prebunking_effect(payload),
        GameModule::Ethical => ethical_effect(payload),
        GameModule::Professional => professional_effect(payload),
    };

    match effect {
        Some(effect) => effect.apply(stats),
        None => Resolution {
            stats: stats.clone(),
            outcome: Outcome::no_effect(),
        },
    }
}

fn verdict_field(payload: &Map<String, Value>, key: &str) -> Option<Verdict> {
    payload.get(key).and_then(Value::as_str).and_then(Verdict::parse)
}

fn prebunking_effect(payload: &Map<String, Value>) -> Option<Effect> {
    let label = verdict_field(payload, "label")?;
    let truth = verdict_field(payload, "truth")?;

    let effect = if label == truth {
        Effect {
            public_trust: Some(5),
            personal_clout: Some(if truth == Verdict::Verified { 2 } else { -1 }),
            ..Effect::new("Good call.")
        }
    } else {
        Effect {
            public_trust: Some(-8),
            personal_clout: Some(if label == Verdict::Verified { -2 } else { 4 }),
            ..Effect::new("That choice undermined trust.")
        }
    };
    Some(effect)
}

fn ethical_effect(payload: &Map<String, Value>) -> Option<Effect> {
    let choice = payload
        .get("choice")
        .and_then(Value::as_str)
        .and_then(EthicalChoice::parse)?;

    let effect = match choice {
        EthicalChoice::Intervene => Effect {
            public_trust: Some(6),
            relationships: &[(VICTIM, 8), (BYSTANDER, 8)],
            ..Effect::new("You stood up. Respect earned.")
        },
        EthicalChoice::Report => Effect {
            public_trust: Some(4),
            relationships: &[(VICTIM, 6)],
            ..Effect::new("You reported the issue.")
        },
        EthicalChoice::StaySilent => Effect {
            public_trust: Some(-5),
            relationships: &[(VICTIM, -7)],
            ..Effect::new("Silence has a cost.")
        },
        EthicalChoice::Participate => Effect {
            public_trust: Some(-12),
            relationships: &[(VICTIM, -10), (BYSTANDER, -10)],
            ..Effect::new("Harmful choice hurt your standing.")
        },
    };
    Some(effect)
}

fn professional_effect(payload: &Map<String, Value>) -> Option<Effect> {
    // `task` is informational only.
    let success = match payload.get("success") {
        None | Some(Value::Null) => false,
        Some(value) => value.as_bool()?,
    };

    let effect = if success {
        Effect {
            professional_skill: Some(7),
            public_trust: Some(2),
            ..Effect::new("Professional skill leveled up!")
        }
    } else {
        Effect {
            professional_skill: Some(-2),
            ..Effect::new("Incomplete attempt. Try again.")
        }
    };
    Some(effect)
}
