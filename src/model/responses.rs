/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a list query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Records of this page, in server order
    #[serde(default)]
    pub value: Vec<Value>,
    /// Continuation link; absent on the last page.
    /// Service Layer v1 spells it `odata.nextLink`.
    #[serde(
        rename = "@odata.nextLink",
        alias = "odata.nextLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_link: Option<String>,
}

impl Page {
    /// Whether more pages follow this one
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next_link.is_some()
    }
}
