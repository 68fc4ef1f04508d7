use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string did not name any variant of the target enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid enum value for {field}: {value}")]
pub struct ParseEnumError {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ParseEnumError {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

// Variant order is significant: derived `Ord` ranks later variants higher.

str_enum!(Severity {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(Urgency {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(RiskTier {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(EmergencyLevel {
    NonUrgent => "non_urgent",
    Urgent => "urgent",
    Immediate => "immediate",
});

str_enum!(Sender {
    User => "user",
    Assistant => "assistant",
});

str_enum!(ChatIntent {
    Emergency => "emergency",
    Symptoms => "symptoms",
    Greeting => "greeting",
    Thanks => "thanks",
    ImageHelp => "image_help",
    Clarify => "clarify",
    Fallback => "fallback",
});

str_enum!(ImageKind {
    Skin => "skin",
    Mole => "mole",
    Wound => "wound",
    Other => "other",
});

impl ImageKind {
    /// Skin photographs go through the skin matcher; other kinds get a
    /// generic referral.
    pub fn is_skin(&self) -> bool {
        matches!(self, Self::Skin | Self::Mole)
    }
}

impl Urgency {
    /// Tier derived from the top probability: > 85 High, > 70 Medium.
    pub fn from_probability(probability: f64) -> Self {
        if probability > 85.0 {
            Self::High
        } else if probability > 70.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl RiskTier {
    /// Map an ABCD total (0..=4) to a risk tier.
    pub fn from_abcd_total(total: u8) -> Self {
        match total {
            0 | 1 => Self::Low,
            2 => Self::Medium,
            _ => Self::High,
        }
    }
}

impl From<Urgency> for Severity {
    fn from(urgency: Urgency) -> Self {
        match urgency {
            Urgency::Low => Self::Low,
            Urgency::Medium => Self::Medium,
            Urgency::High => Self::High,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn severity_round_trip() {
        for (variant, s) in [
            (Severity::Low, "low"),
            (Severity::Medium, "medium"),
            (Severity::High, "high"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Severity::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn emergency_level_round_trip() {
        for (variant, s) in [
            (EmergencyLevel::NonUrgent, "non_urgent"),
            (EmergencyLevel::Urgent, "urgent"),
            (EmergencyLevel::Immediate, "immediate"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(EmergencyLevel::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn invalid_enum_returns_error() {
        let err = Severity::from_str("critical").unwrap_err();
        assert_eq!(err.field, "Severity");
        assert_eq!(err.value, "critical");
        assert!(Sender::from_str("").is_err());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&EmergencyLevel::NonUrgent).unwrap();
        assert_eq!(json, "\"non_urgent\"");
        let back: Urgency = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(back, Urgency::Medium);
    }

    #[test]
    fn urgency_thresholds() {
        assert_eq!(Urgency::from_probability(90.0), Urgency::High);
        assert_eq!(Urgency::from_probability(85.0), Urgency::Medium);
        assert_eq!(Urgency::from_probability(72.0), Urgency::Medium);
        assert_eq!(Urgency::from_probability(70.0), Urgency::Low);
        assert_eq!(Urgency::from_probability(0.0), Urgency::Low);
    }

    #[test]
    fn abcd_tiers() {
        assert_eq!(RiskTier::from_abcd_total(0), RiskTier::Low);
        assert_eq!(RiskTier::from_abcd_total(1), RiskTier::Low);
        assert_eq!(RiskTier::from_abcd_total(2), RiskTier::Medium);
        assert_eq!(RiskTier::from_abcd_total(3), RiskTier::High);
        assert_eq!(RiskTier::from_abcd_total(4), RiskTier::High);
    }

    #[test]
    fn ordering_follows_declaration() {
        assert!(Urgency::High > Urgency::Medium);
        assert!(EmergencyLevel::Immediate > EmergencyLevel::Urgent);
    }

    #[test]
    fn chat_intent_parses_snake_case() {
        assert_eq!(ChatIntent::from_str("image_help").unwrap(), ChatIntent::ImageHelp);
        assert_eq!(ChatIntent::ImageHelp.to_string(), "image_help");
    }
}
