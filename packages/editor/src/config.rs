use serde::{Deserialize, Serialize};

/// Editor settings for one document session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Session name, seeds element ids
    #[serde(default = "default_session")]
    pub session: String,

    /// Maximum undo levels (0 = unlimited)
    #[serde(default)]
    pub history_limit: usize,

    /// Shift applied to `left`/`top` of duplicated and pasted elements
    #[serde(default = "default_duplicate_offset")]
    pub duplicate_offset: i64,
}

fn default_session() -> String {
    "pagecraft".to_string()
}

fn default_duplicate_offset() -> i64 {
    20
}

impl EditorConfig {
    pub fn with_session(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            ..Self::default()
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            session: default_session(),
            history_limit: 0,
            duplicate_offset: default_duplicate_offset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let config: EditorConfig = serde_json::from_str(r#"{ "historyLimit": 50 }"#).unwrap();
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.session, "pagecraft");
        assert_eq!(config.duplicate_offset, 20);
    }
}
