use serde::{Deserialize, Serialize};

use super::UserId;

/// Public view of a user record, as returned by register/login/verify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
