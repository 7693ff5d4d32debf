use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chatbot del usuario (`GET /chatbots/`)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Chatbot {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Chatbot {
    /// Fecha de creación para la tabla del dashboard
    pub fn created_label(&self) -> String {
        self.created_at
            .map(|date| date.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}
