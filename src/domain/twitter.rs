use serde::{Deserialize, Serialize};

use crate::domain::cutoff::Ranked;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
}

impl Ranked for Tweet {
    fn identifier(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterUser {
    pub name: String,
    pub tweets: Vec<Tweet>,
    pub screen_name: String,
}
