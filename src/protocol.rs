//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::ChatTurn;

/// `POST /api/chat` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatIn {
    pub messages: Vec<ChatTurn>,
}

/// Error body returned with a non-2xx status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn chat_request_parses_role_content_pairs() {
        let body = r#"{"messages":[{"role":"assistant","content":"Hello!"},{"role":"user","content":"hi"}]}"#;
        let parsed: ChatIn = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.messages.len(), 2);
        assert_eq!(parsed.messages[0].role, Role::Assistant);
        assert_eq!(parsed.messages[1].content, "hi");
    }

    #[test]
    fn unknown_role_is_rejected() {
        let body = r#"{"messages":[{"role":"system","content":"x"}]}"#;
        assert!(serde_json::from_str::<ChatIn>(body).is_err());
    }
}
