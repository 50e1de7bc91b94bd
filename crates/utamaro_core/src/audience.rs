//! Target audience personas used to bias content generation.

use serde::{Deserialize, Serialize};

/// Enumerated persona the generated text should speak to.
///
/// Persona ids match the stored rule format; unknown ids fall back to
/// `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetAudience {
    /// All ages (default).
    #[default]
    General,
    /// Women in their twenties.
    Twenties,
    /// Women in their thirties and forties.
    Matures,
    /// Men's styling customers.
    Mens,
    /// Bridal and event customers.
    Bridal,
}

impl TargetAudience {
    /// Resolve a stored persona id, falling back to `General`.
    pub fn from_id(id: &str) -> Self {
        match id {
            "twenties" => Self::Twenties,
            "matures" => Self::Matures,
            "mens" => Self::Mens,
            "bridal" => Self::Bridal,
            _ => Self::General,
        }
    }

    /// Human-readable label injected into the generation prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "全年代",
            Self::Twenties => "20代女性",
            Self::Matures => "30〜40代女性",
            Self::Mens => "メンズ",
            Self::Bridal => "ブライダル",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_falls_back_to_general() {
        assert_eq!(TargetAudience::from_id("general"), TargetAudience::General);
        assert_eq!(TargetAudience::from_id("mens"), TargetAudience::Mens);
        assert_eq!(TargetAudience::from_id("unknown"), TargetAudience::General);
        assert_eq!(TargetAudience::from_id(""), TargetAudience::General);
    }
}
