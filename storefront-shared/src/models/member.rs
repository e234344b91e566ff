use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a registered member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Member tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Grade {
    Basic,
    Vip,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::Basic => write!(f, "BASIC"),
            Grade::Vip => write!(f, "VIP"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub grade: Grade,
}

impl Member {
    pub fn new(id: MemberId, name: impl Into<String>, grade: Grade) -> Self {
        Self {
            id,
            name: name.into(),
            grade,
        }
    }

    pub fn has_grade(&self, grade: Grade) -> bool {
        self.grade == grade
    }
}
