//! Local user profile

use crate::domain::ids::now_millis;
use serde::{Deserialize, Serialize};

const DEFAULT_USERNAME: &str = "Developer";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub join_date: i64,
}

impl User {
    /// Build a profile for `email`. Without an explicit username the local
    /// part of the email is used.
    pub fn sign_in(email: &str, username: Option<&str>) -> Self {
        let username = match username.map(str::trim).filter(|u| !u.is_empty()) {
            Some(name) => name.to_string(),
            None => email
                .split('@')
                .next()
                .filter(|local| !local.is_empty())
                .unwrap_or(DEFAULT_USERNAME)
                .to_string(),
        };
        User {
            username,
            email: email.to_string(),
            avatar: Some(format!(
                "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
                email
            )),
            join_date: now_millis(),
        }
    }
}
