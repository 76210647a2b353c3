//! Field-level exclusion policy.
//!
//! A field declared with the exclusion marker is skipped by both encode and
//! decode when the exclusion-aware codec set is active. Exclusion is per
//! field only; whole types cannot be excluded.

use crate::record::FieldInfo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExclusionPolicy {
    /// Every field participates.
    #[default]
    Disabled,
    /// Fields carrying the exclusion marker are skipped.
    SkipMarked,
}

impl ExclusionPolicy {
    pub fn from_flag(exclude_marked: bool) -> Self {
        if exclude_marked {
            Self::SkipMarked
        } else {
            Self::Disabled
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::SkipMarked)
    }

    pub fn should_skip(self, field: &FieldInfo) -> bool {
        match self {
            Self::Disabled => false,
            Self::SkipMarked => field.excluded,
        }
    }
}
