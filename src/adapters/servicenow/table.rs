//! Remote table routing

use crate::domain::ids::SysId;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Path prefix of the Table API
pub const TABLE_API_PATH: &str = "/api/now/table";

/// Path of the batch endpoint
pub const BATCH_API_PATH: &str = "/api/now/v1/batch";

/// Characters escaped inside a single path segment
const SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// The remote tables this connector reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceTable {
    /// `sys_user`
    #[serde(rename = "sys_user")]
    User,
    /// `sys_user_group`
    #[serde(rename = "sys_user_group")]
    UserGroup,
    /// `sys_user_grmember`
    #[serde(rename = "sys_user_grmember")]
    UserGroupMembership,
}

impl ResourceTable {
    /// Every table, in declaration order
    pub const ALL: [ResourceTable; 3] = [
        ResourceTable::User,
        ResourceTable::UserGroup,
        ResourceTable::UserGroupMembership,
    ];

    /// Remote table name
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceTable::User => "sys_user",
            ResourceTable::UserGroup => "sys_user_group",
            ResourceTable::UserGroupMembership => "sys_user_grmember",
        }
    }

    /// Relative path of the collection, e.g. `/api/now/table/sys_user`
    pub fn path(&self) -> String {
        format!("{TABLE_API_PATH}/{}", self.as_str())
    }

    /// Relative path of one record; the id is escaped as a single segment
    pub fn record_path(&self, id: &SysId) -> String {
        format!(
            "{TABLE_API_PATH}/{}/{}",
            self.as_str(),
            utf8_percent_encode(id.as_str(), SEGMENT_ENCODE_SET)
        )
    }
}

impl fmt::Display for ResourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceTable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceTable::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown table '{s}'. Must be one of: {}",
                    ResourceTable::ALL.map(|t| t.as_str()).join(", ")
                )
            })
    }
}
