//! Identifiers assigned by the project-data source.

use serde::{Deserialize, Serialize};

/// Unique identifier of a milestone within its source project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MilestoneId(i64);

impl MilestoneId {
    /// Wrap a raw source identifier.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for MilestoneId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for MilestoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for MilestoneId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestone_id_serializes_as_number() {
        let id = MilestoneId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: MilestoneId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_milestone_id_from_str() {
        let id: MilestoneId = " 17 ".parse().unwrap();
        assert_eq!(id.get(), 17);
        assert!("abc".parse::<MilestoneId>().is_err());
    }
}
