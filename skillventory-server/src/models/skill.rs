//! Skill model - name validation and confidence levels
//!
//! Confidence levels travel over the wire and into storage as their
//! human-readable value, never as the variant name.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum length for skill names
const MAX_SKILL_NAME_LEN: usize = 128;

/// Printable text only: no ASCII or C1 control characters
static PRINTABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\p{Cc}]+$").expect("invalid printable regex"));

/// Self-assessed mastery of a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelOfConfidence {
    #[serde(rename = "Debo empezar a aprender o desarrollar")]
    Level1,
    #[serde(rename = "Estoy aprendiendo o desarrollando")]
    Level2,
    #[serde(rename = "Tengo confianza")]
    Level3,
}

impl LevelOfConfidence {
    pub const ALL: [Self; 3] = [Self::Level1, Self::Level2, Self::Level3];

    /// Stored and serialized value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Level1 => "Debo empezar a aprender o desarrollar",
            Self::Level2 => "Estoy aprendiendo o desarrollando",
            Self::Level3 => "Tengo confianza",
        }
    }

    /// Symbolic name (`LEVEL_1`..`LEVEL_3`), used in logs.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Level1 => "LEVEL_1",
            Self::Level2 => "LEVEL_2",
            Self::Level3 => "LEVEL_3",
        }
    }
}

impl fmt::Display for LevelOfConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LevelOfConfidence {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "level of confidence",
                value: s.to_owned(),
            })
    }
}

/// Validated skill name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SkillName(String);

impl SkillName {
    /// Create a skill name, trimming surrounding whitespace.
    ///
    /// # Rules
    /// - Not empty after trimming
    /// - Max 128 characters
    /// - No control characters
    ///
    /// Case is preserved: `Python` and `python` are distinct skills.
    ///
    /// # Example
    /// ```
    /// use skillventory_server::models::SkillName;
    ///
    /// assert_eq!(SkillName::new("  C++ ").unwrap().as_str(), "C++");
    /// assert!(SkillName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "skill name" });
        }

        if trimmed.chars().count() > MAX_SKILL_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "skill name",
                max: MAX_SKILL_NAME_LEN,
            });
        }

        if !PRINTABLE_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidFormat {
                field: "skill name",
                reason: "must not contain control characters",
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for SkillName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted skill record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub skill_id: i64,
    pub skill_name: String,
    pub level_of_confidence: LevelOfConfidence,
}

/// Skill candidate for insertion
#[derive(Debug, Clone)]
pub struct NewSkill {
    pub skill_name: SkillName,
    pub level_of_confidence: LevelOfConfidence,
}

impl NewSkill {
    pub fn new(skill_name: SkillName, level_of_confidence: LevelOfConfidence) -> Self {
        Self {
            skill_name,
            level_of_confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_serializes_as_value() {
        let json = serde_json::to_string(&LevelOfConfidence::Level2).unwrap();
        assert_eq!(json, r#""Estoy aprendiendo o desarrollando""#);

        let level: LevelOfConfidence = serde_json::from_str(r#""Tengo confianza""#).unwrap();
        assert_eq!(level, LevelOfConfidence::Level3);
    }

    #[test]
    fn level_rejects_symbolic_name() {
        assert!(serde_json::from_str::<LevelOfConfidence>(r#""LEVEL_1""#).is_err());
        let err = "LEVEL_1".parse::<LevelOfConfidence>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { .. }));
    }

    #[test]
    fn level_parses_every_stored_value() {
        for level in LevelOfConfidence::ALL {
            assert_eq!(level.as_str().parse::<LevelOfConfidence>().unwrap(), level);
        }
        assert_eq!(LevelOfConfidence::Level1.symbol(), "LEVEL_1");
    }

    #[test]
    fn valid_names() {
        assert!(SkillName::new("python").is_ok());
        assert!(SkillName::new("C#").is_ok());
        assert!(SkillName::new("Programación funcional").is_ok());
        assert_eq!(SkillName::new(" rust\t").unwrap().as_str(), "rust");
    }

    #[test]
    fn preserves_case() {
        let upper = SkillName::new("Python").unwrap();
        let lower = SkillName::new("python").unwrap();
        assert_ne!(upper, lower);
    }

    #[test]
    fn rejects_empty() {
        let err = SkillName::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));

        let err = SkillName::new(" \n ").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn rejects_control_characters() {
        let err = SkillName::new("py\u{0007}thon").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn max_length() {
        let name_128 = "a".repeat(128);
        assert!(SkillName::new(&name_128).is_ok());

        let name_129 = "a".repeat(129);
        let err = SkillName::new(&name_129).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 128, .. }));
    }
}
