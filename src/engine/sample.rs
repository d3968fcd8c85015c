use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One metric event emitted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Sample {
    Check(CheckSample),
    GroupDuration(GroupSample),
}

impl Sample {
    pub fn unit(&self) -> usize {
        match self {
            Sample::Check(c) => c.unit,
            Sample::GroupDuration(g) => g.unit,
        }
    }

    pub fn as_check(&self) -> Option<&CheckSample> {
        match self {
            Sample::Check(c) => Some(c),
            Sample::GroupDuration(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupSample> {
        match self {
            Sample::GroupDuration(g) => Some(g),
            Sample::Check(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSample {
    pub unit: usize,
    pub time: DateTime<Utc>,
    /// Full group path; empty at the root.
    pub group: String,
    pub name: String,
    pub passed: bool,
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSample {
    pub unit: usize,
    pub time: DateTime<Utc>,
    pub group: String,
    pub duration: Duration,
}
