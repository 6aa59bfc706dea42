// crates/timelord-core/src/output.rs

//! The JSON document printed on stdout: `{"items": [...]}`.

use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemIcon {
    pub path: String,
}

/// One row of the result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputItem {
    pub uid: String,
    pub title: String,
    pub subtitle: String,
    pub arg: String,
    pub autocomplete: String,
    pub icon: ItemIcon,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsPayload {
    pub items: Vec<OutputItem>,
}

impl ItemsPayload {
    pub fn new(items: Vec<OutputItem>) -> Self {
        Self { items }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FromIterator<OutputItem> for ItemsPayload {
    fn from_iter<I: IntoIterator<Item = OutputItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
