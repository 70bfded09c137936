//! Player profile and its stats.

use std::collections::BTreeMap;

use litera_core::store::StoredPlayer;

use super::score::Score;

/// Affinity toward named characters.
///
/// Characters the player has not met yet read as [`Score::NEUTRAL`]; reading
/// never inserts them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relationships(BTreeMap<String, Score>);

impl Relationships {
    /// Returns the stored affinity for `character`, or the neutral default.
    #[must_use]
    pub fn affinity(&self, character: &str) -> Score {
        self.0.get(character).copied().unwrap_or(Score::NEUTRAL)
    }

    /// Applies a signed delta to `character`'s affinity and returns the new value.
    pub fn adjust(&mut self, character: &str, delta: i32) -> Score {
        let updated = self.affinity(character).apply(delta);
        self.0.insert(character.to_owned(), updated);
        updated
    }

    /// Returns the number of characters with a stored affinity.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no affinity has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the affinities as plain integers.
    #[must_use]
    pub fn to_values(&self) -> BTreeMap<String, i32> {
        self.0
            .iter()
            .map(|(name, score)| (name.clone(), score.value()))
            .collect()
    }
}

impl FromIterator<(String, i32)> for Relationships {
    fn from_iter<I: IntoIterator<Item = (String, i32)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name, Score::clamped(value)))
                .collect(),
        )
    }
}

/// The mutable stats the resolver reads and produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStats {
    /// Public trust.
    pub public_trust: Score,
    /// Personal clout.
    pub personal_clout: Score,
    /// Professional skill.
    pub professional_skill: Score,
    /// Affinity toward named characters.
    pub relationships: Relationships,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            public_trust: Score::NEUTRAL,
            personal_clout: Score::NEUTRAL,
            professional_skill: Score::ZERO,
            relationships: Relationships::default(),
        }
    }
}

/// A player profile, one per session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Client-generated session identifier.
    pub session_id: String,
    /// Current stats.
    pub stats: PlayerStats,
    /// Stored revision this profile was read at.
    pub version: i64,
}

impl Player {
    /// Creates a player with default stats.
    #[must_use]
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            stats: PlayerStats::default(),
            version: 0,
        }
    }

    /// Returns the next revision of this player carrying `stats`.
    #[must_use]
    pub fn advance(&self, stats: PlayerStats) -> Self {
        Self {
            session_id: self.session_id.clone(),
            stats,
            version: self.version + 1,
        }
    }

    /// Converts the player into its stored form.
    #[must_use]
    pub fn to_stored(&self) -> StoredPlayer {
        StoredPlayer {
            session_id: self.session_id.clone(),
            public_trust: self.stats.public_trust.value(),
            personal_clout: self.stats.personal_clout.value(),
            professional_skill: self.stats.professional_skill.value(),
            relationships: self.stats.relationships.to_values(),
            version: self.version,
        }
    }
}

impl From<StoredPlayer> for Player {
    /// Out-of-range stored values are clamped on load.
    fn from(stored: StoredPlayer) -> Self {
        Self {
            session_id: stored.session_id,
            stats: PlayerStats {
                public_trust: Score::clamped(stored.public_trust),
                personal_clout: Score::clamped(stored.personal_clout),
                professional_skill: Score::clamped(stored.professional_skill),
                relationships: stored.relationships.into_iter().collect(),
            },
            version: stored.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_has_default_stats() {
        let player = Player::new("s-1");

        assert_eq!(player.session_id, "s-1");
        assert_eq!(player.stats.public_trust.value(), 50);
        assert_eq!(player.stats.personal_clout.value(), 50);
        assert_eq!(player.stats.professional_skill.value(), 0);
        assert!(player.stats.relationships.is_empty());
        assert_eq!(player.version, 0);
    }

    #[test]
    fn test_missing_relationship_reads_neutral_without_inserting() {
        let relationships = Relationships::default();

        assert_eq!(relationships.affinity("victim"), Score::NEUTRAL);
        assert!(relationships.is_empty());
    }

    #[test]
    fn test_adjust_starts_from_neutral_and_clamps() {
        let mut relationships = Relationships::default();

        assert_eq!(relationships.adjust("victim", 8).value(), 58);
        assert_eq!(relationships.adjust("bystander", -70).value(), 0);
        assert_eq!(relationships.adjust("victim", 60).value(), 100);
        assert_eq!(relationships.len(), 2);
    }

    #[test]
    fn test_from_stored_clamps_out_of_range_values() {
        let stored = StoredPlayer {
            session_id: "s-1".to_owned(),
            public_trust: 140,
            personal_clout: -3,
            professional_skill: 42,
            relationships: BTreeMap::from([("victim".to_owned(), 101), ("mentor".to_owned(), -1)]),
            version: 4,
        };

        let player = Player::from(stored);

        assert_eq!(player.stats.public_trust.value(), 100);
        assert_eq!(player.stats.personal_clout.value(), 0);
        assert_eq!(player.stats.professional_skill.value(), 42);
        assert_eq!(player.stats.relationships.affinity("victim").value(), 100);
        assert_eq!(player.stats.relationships.affinity("mentor").value(), 0);
        assert_eq!(player.version, 4);
    }

    #[test]
    fn test_advance_bumps_version_and_keeps_session() {
        let player = Player::new("s-1");
        let mut stats = player.stats.clone();
        stats.public_trust = Score::clamped(55);

        let next = player.advance(stats);

        assert_eq!(next.session_id, "s-1");
        assert_eq!(next.version, 1);
        assert_eq!(next.to_stored().public_trust, 55);
    }
}
