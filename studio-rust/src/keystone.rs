//! Alliance keystones: partner credentials unlocking co-branded ads.
//!
//! A keystone is laid out positionally:
//!
//! ```text
//! fbadcode-<public id: 12><gap: 1><partner code: 19><gap: 1><covenant..>
//! ```
//!
//! The partner code selects an [`Ally`] from a [`PartnerRegistry`].

use crate::{StudioError, StudioResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const KEYSTONE_PREFIX: &str = "fbadcode-";
const PUBLIC_ID_LEN: usize = 12;
const GAP_LEN: usize = 1;
const PARTNER_CODE_LEN: usize = 19;

pub const KEYSTONE_MIN_LEN: usize =
    KEYSTONE_PREFIX.len() + PUBLIC_ID_LEN + GAP_LEN + PARTNER_CODE_LEN + GAP_LEN;

const INVALID_KEYSTONE: &str = "Invalid or incomplete Alliance Keystone.";
const UNKNOWN_KEYSTONE: &str = "Alliance Keystone is not recognized.";

/// A partner brand whose voice is blended into alliance ads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ally {
    pub id: String,
    pub name: String,
    pub avatar_url: String,
    pub persona: String,
}

/// Known partners keyed by partner code.
#[derive(Debug, Clone, Default)]
pub struct PartnerRegistry {
    allies: HashMap<String, Ally>,
}

impl PartnerRegistry {
    /// An empty registry. Every keystone is rejected until partners are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// The simulated partners bundled with the studio.
    pub fn builtin() -> Self {
        Self::new()
            .with_partner(
                "3fRLIQdX5vyXG6Bti4c",
                Ally {
                    id: "ally-aurora".to_string(),
                    name: "Aurora Outfitters".to_string(),
                    avatar_url: "https://avatars.example.com/aurora-outfitters.png".to_string(),
                    persona: "An adventurous outdoor gear brand. Speaks with warm, rugged \
                              optimism and loves sunrise imagery."
                        .to_string(),
                },
            )
            .with_partner(
                "Q8mWz2LkT4vNc7HpR1s",
                Ally {
                    id: "ally-lumen".to_string(),
                    name: "Lumen Labs".to_string(),
                    avatar_url: "https://avatars.example.com/lumen-labs.png".to_string(),
                    persona: "A research-driven smart home company. Precise, calm and \
                              quietly witty."
                        .to_string(),
                },
            )
    }

    #[must_use]
    pub fn with_partner(mut self, partner_code: impl Into<String>, ally: Ally) -> Self {
        self.allies.insert(partner_code.into(), ally);
        self
    }

    pub fn get(&self, partner_code: &str) -> Option<&Ally> {
        self.allies.get(partner_code)
    }

    pub fn len(&self) -> usize {
        self.allies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allies.is_empty()
    }
}

/// A structurally valid keystone resolved to its partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keystone {
    pub prefix: String,
    pub public_id: String,
    pub partner_code: String,
    /// Opaque trailing payload. Not interpreted.
    pub covenant: String,
    pub ally: Ally,
}

impl Keystone {
    /// Validate `raw` and resolve its partner code against `registry`.
    ///
    /// The gap characters are skipped without being checked. Keystones with
    /// non-ASCII characters at a segment boundary are rejected as malformed.
    pub fn parse(raw: &str, registry: &PartnerRegistry) -> StudioResult<Self> {
        let raw = raw.trim();
        if raw.len() < KEYSTONE_MIN_LEN || !raw.starts_with(KEYSTONE_PREFIX) {
            return Err(StudioError::validation(INVALID_KEYSTONE));
        }

        let public_start = KEYSTONE_PREFIX.len();
        let partner_start = public_start + PUBLIC_ID_LEN + GAP_LEN;
        let covenant_start = partner_start + PARTNER_CODE_LEN + GAP_LEN;

        let segment = |range: std::ops::Range<usize>| {
            raw.get(range)
                .ok_or_else(|| StudioError::validation(INVALID_KEYSTONE))
        };
        let public_id = segment(public_start..public_start + PUBLIC_ID_LEN)?;
        let partner_code = segment(partner_start..partner_start + PARTNER_CODE_LEN)?;
        let covenant = segment(covenant_start..raw.len())?;

        let ally = registry
            .get(partner_code)
            .ok_or_else(|| StudioError::validation(UNKNOWN_KEYSTONE))?;

        Ok(Self {
            prefix: KEYSTONE_PREFIX.to_string(),
            public_id: public_id.to_string(),
            partner_code: partner_code.to_string(),
            covenant: covenant.to_string(),
            ally: ally.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> PartnerRegistry {
        PartnerRegistry::new().with_partner(
            "B".repeat(19),
            Ally {
                id: "ally-test".to_string(),
                name: "Test Ally".to_string(),
                avatar_url: String::new(),
                persona: "Friendly".to_string(),
            },
        )
    }

    fn keystone(covenant: &str) -> String {
        format!("fbadcode-{}X{}X{covenant}", "A".repeat(12), "B".repeat(19))
    }

    #[test]
    fn parses_segments() {
        let parsed = Keystone::parse(&keystone("anything"), &registry()).unwrap();
        assert_eq!(parsed.prefix, "fbadcode-");
        assert_eq!(parsed.public_id, "A".repeat(12));
        assert_eq!(parsed.partner_code, "B".repeat(19));
        assert_eq!(parsed.covenant, "anything");
        assert_eq!(parsed.ally.name, "Test Ally");
    }

    #[test]
    fn single_separator_keystone_loses_first_covenant_character() {
        let raw = format!("fbadcode-{}X{}anything", "A".repeat(12), "B".repeat(19));
        let parsed = Keystone::parse(&raw, &registry()).unwrap();
        assert_eq!(parsed.public_id, "A".repeat(12));
        assert_eq!(parsed.partner_code, "B".repeat(19));
        assert_eq!(parsed.covenant, "nything");
        assert_eq!(parsed.ally.name, "Test Ally");
    }

    #[test]
    fn minimum_length_allows_empty_covenant() {
        assert_eq!(KEYSTONE_MIN_LEN, 42);
        let parsed = Keystone::parse(&keystone(""), &registry()).unwrap();
        assert_eq!(parsed.covenant, "");
    }

    #[test]
    fn rejects_short_or_unprefixed() {
        let short = &keystone("")[..KEYSTONE_MIN_LEN - 1];
        let error = Keystone::parse(short, &registry()).unwrap_err();
        assert_eq!(error.to_string(), INVALID_KEYSTONE);

        let wrong_prefix = keystone("anything").replacen("fbadcode-", "fbadcodx-", 1);
        assert!(Keystone::parse(&wrong_prefix, &registry()).is_err());
    }

    #[test]
    fn rejects_unknown_partner() {
        let error = Keystone::parse(&keystone("anything"), &PartnerRegistry::builtin()).unwrap_err();
        assert_eq!(error.to_string(), UNKNOWN_KEYSTONE);
    }

    #[test]
    fn rejects_non_ascii_boundary() {
        let raw = format!("fbadcode-{}é{}", "A".repeat(11), "B".repeat(40));
        let error = Keystone::parse(&raw, &registry()).unwrap_err();
        assert_eq!(error.to_string(), INVALID_KEYSTONE);
    }
}
