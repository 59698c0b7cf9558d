use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{ValidationCode, ValidationErrors};

/// Balance-sheet side a classification node reports into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupTarget {
    Asset,
    Liability,
    ProfitAndLoss,
}

impl fmt::Display for GroupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GroupTarget::Asset => "Asset",
            GroupTarget::Liability => "Liability",
            GroupTarget::ProfitAndLoss => "Profit and Loss",
        };
        f.write_str(label)
    }
}

/// Node in the hierarchical classification tree of accounts.
///
/// A result group carries no accounts of its own; its postings are derived
/// from profit-and-loss account activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub target: GroupTarget,
    #[serde(default)]
    pub is_result: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn new(name: impl Into<String>, target: GroupTarget) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target,
            is_result: false,
            parent_id: None,
            created_at: Utc::now(),
        }
    }

    /// Creates a balance-result node. Only valid with a liability target.
    pub fn result(name: impl Into<String>) -> Self {
        let mut group = Self::new(name, GroupTarget::Liability);
        group.is_result = true;
        group
    }

    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Checks that need no ledger context. The result flag is only permitted
    /// on liability-targeted nodes; the violation is an entity-level issue.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.trim().is_empty() {
            errors.add(Some("name"), ValidationCode::Blank);
        }
        if self.is_result && self.target != GroupTarget::Liability {
            errors.add(None, ValidationCode::LiabilityNeededForResult);
        }
        errors.into_result()
    }
}
