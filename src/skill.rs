//! Skill tiers derived from XP.
//!
//! Tier is never stored: it is computed from a numeric XP value on every
//! read, and the band table below is the single source of truth for that
//! derivation. Bands are inclusive on the lower bound and exclusive on the
//! upper; the top band is open-ended.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Proficiency band, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Apprentice,
    Journeyman,
    Adept,
    Expert,
    Master,
    Grandmaster,
    Titan,
}

/// XP band for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierBand {
    pub tier: Tier,
    /// Inclusive lower XP bound.
    pub min_xp: u32,
    /// Exclusive upper XP bound; `None` for the open-ended top band.
    pub max_xp: Option<u32>,
}

/// Ordered band table, ascending by XP.
pub const BANDS: [TierBand; 7] = [
    TierBand { tier: Tier::Apprentice, min_xp: 0, max_xp: Some(75) },
    TierBand { tier: Tier::Journeyman, min_xp: 75, max_xp: Some(150) },
    TierBand { tier: Tier::Adept, min_xp: 150, max_xp: Some(300) },
    TierBand { tier: Tier::Expert, min_xp: 300, max_xp: Some(500) },
    TierBand { tier: Tier::Master, min_xp: 500, max_xp: Some(750) },
    TierBand { tier: Tier::Grandmaster, min_xp: 750, max_xp: Some(1000) },
    TierBand { tier: Tier::Titan, min_xp: 1000, max_xp: None },
];

/// Resolve the tier for an XP value: first band whose upper bound exceeds
/// the value, falling through to the open-ended top tier.
pub fn resolve_tier(xp: u32) -> Tier {
    for band in &BANDS {
        match band.max_xp {
            Some(max_xp) if xp < max_xp => return band.tier,
            _ => {}
        }
    }
    Tier::Titan
}

impl Tier {
    pub const ALL: [Tier; 7] = [
        Tier::Apprentice,
        Tier::Journeyman,
        Tier::Adept,
        Tier::Expert,
        Tier::Master,
        Tier::Grandmaster,
        Tier::Titan,
    ];

    /// Ordinal position; the lowest tier ranks 0.
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Whether a grant at this tier meets a requirement of `required`.
    pub fn satisfies(self, required: Tier) -> bool {
        self.rank() >= required.rank()
    }

    pub fn slug(self) -> &'static str {
        match self {
            Tier::Apprentice => "apprentice",
            Tier::Journeyman => "journeyman",
            Tier::Adept => "adept",
            Tier::Expert => "expert",
            Tier::Master => "master",
            Tier::Grandmaster => "grandmaster",
            Tier::Titan => "titan",
        }
    }

    /// Look up a tier by its identifier.
    ///
    /// Unknown slugs indicate a programming or configuration defect rather
    /// than bad data, so this is a hard error.
    pub fn from_slug(slug: &str) -> Result<Tier> {
        Tier::ALL
            .iter()
            .copied()
            .find(|tier| tier.slug() == slug)
            .ok_or_else(|| Error::UnknownTier(slug.to_string()))
    }

    /// The XP band this tier covers.
    pub fn band(self) -> TierBand {
        BANDS[self.rank()]
    }
}

/// A skill granted to a team or member at a derived tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGrant {
    pub skill_slug: String,
    pub tier: Tier,
}

/// Whether any grant covers `skill_slug` at `min_tier` or above.
pub fn grants_satisfy(grants: &[SkillGrant], skill_slug: &str, min_tier: Tier) -> bool {
    grants
        .iter()
        .any(|grant| grant.skill_slug == skill_slug && grant.tier.satisfies(min_tier))
}
