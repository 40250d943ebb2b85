//! The fixed topic catalogue. Each topic selects one corpus directory.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    BiomechanicsSpacetime,
    BiomechanicsSpace,
    BiomechanicsQuantitative,
    BiomechanicsCharacteristics,
}

impl Topic {
    /// Catalogue order. The first entry is the form's default selection.
    pub const ALL: [Topic; 4] = [
        Topic::BiomechanicsSpacetime,
        Topic::BiomechanicsSpace,
        Topic::BiomechanicsQuantitative,
        Topic::BiomechanicsCharacteristics,
    ];

    /// Wire key used by the form and the `/api/qa` endpoint.
    pub fn key(self) -> &'static str {
        match self {
            Topic::BiomechanicsSpacetime       => "biomechanics-spacetime",
            Topic::BiomechanicsSpace           => "biomechanics-space",
            Topic::BiomechanicsQuantitative    => "biomechanics-quantitative",
            Topic::BiomechanicsCharacteristics => "biomechanics-characteristics",
        }
    }

    /// Corpus directory name, relative to the configured corpus root.
    pub fn corpus_dir_name(self) -> &'static str {
        match self {
            Topic::BiomechanicsSpacetime       => "生物力学时空文件夹",
            Topic::BiomechanicsSpace           => "生物力学空间文件夹",
            Topic::BiomechanicsQuantitative    => "生物力学定量特性文件夹",
            Topic::BiomechanicsCharacteristics => "生物力学特性文件夹",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Topic::BiomechanicsSpacetime       => "生物力学时空",
            Topic::BiomechanicsSpace           => "生物力学空间",
            Topic::BiomechanicsQuantitative    => "生物力学定量特性",
            Topic::BiomechanicsCharacteristics => "生物力学特征",
        }
    }

    pub fn from_key(key: &str) -> Option<Topic> {
        Topic::ALL.into_iter().find(|t| t.key() == key)
    }
}

impl Default for Topic {
    fn default() -> Self {
        Topic::ALL[0]
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Topic {
    type Err = QaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::from_key(s).ok_or_else(|| QaError::InvalidTopic(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_round_trips() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_key(topic.key()), Some(topic));
        }
    }

    #[test]
    fn test_unknown_keys_rejected() {
        for key in ["", "biomechanics", "BIOMECHANICS-SPACE", "biomechanics-space ", "../etc"] {
            assert!(Topic::from_key(key).is_none(), "key {:?} should be rejected", key);
            assert!(matches!(key.parse::<Topic>(), Err(QaError::InvalidTopic(_))));
        }
    }

    #[test]
    fn test_default_is_first_in_catalogue() {
        assert_eq!(Topic::default(), Topic::BiomechanicsSpacetime);
    }

    #[test]
    fn test_serde_uses_wire_key() {
        let json = serde_json::to_string(&Topic::BiomechanicsQuantitative).unwrap();
        assert_eq!(json, "\"biomechanics-quantitative\"");
    }

    #[test]
    fn test_corpus_dirs_are_distinct() {
        let mut dirs: Vec<_> = Topic::ALL.iter().map(|t| t.corpus_dir_name()).collect();
        dirs.sort();
        dirs.dedup();
        assert_eq!(dirs.len(), Topic::ALL.len());
    }
}
