use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Health {
    Up,
    Warning,
}

impl Health {
    pub fn as_str(&self) -> &'static str {
        match self {
            Health::Up => "UP",
            Health::Warning => "WARNING",
        }
    }
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub health: Health,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn up() -> Self {
        Self {
            health: Health::Up,
            error: None,
        }
    }

    pub fn warning(error: impl Into<String>) -> Self {
        Self {
            health: Health::Warning,
            error: Some(error.into()),
        }
    }

    pub fn is_up(&self) -> bool {
        self.health == Health::Up
    }
}
