//! Wire messages exchanged with the editor.
//!
//! One JSON object per line: `{"method": "...", "params": {...}}`.

use serde::{Deserialize, Serialize};

use crate::arglist::HostCommand;
use crate::config::Binding;
use crate::host::{Level, Overlay, OverlayId};
use crate::plugin::Action;

/// Messages sent by the editor
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "snake_case")]
pub enum Incoming {
    /// First message; answered with the key bindings to install
    Initialize { columns: usize },
    /// Current argument list, sent whenever it may have changed
    State {
        paths: Vec<String>,
        #[serde(default)]
        current: usize,
        #[serde(default)]
        current_file: Option<String>,
    },
    Resize { columns: usize },
    Action { name: Action },
    /// A bound key sequence was pressed
    Key { keys: String },
    /// Fuzzy-finder multi-selection
    Selection { paths: Vec<String> },
    Shutdown,
}

/// Messages sent to the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", content = "params", rename_all = "snake_case")]
pub enum Outgoing {
    RegisterKeymaps { bindings: Vec<Binding> },
    Execute { command: HostCommand },
    OpenOverlay(OpenOverlayParams),
    CloseOverlay { id: OverlayId },
    Notify { level: Level, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenOverlayParams {
    pub id: OverlayId,
    #[serde(flatten)]
    pub overlay: Overlay,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Highlight, Placement};
    use serde_json::json;

    #[test]
    fn parses_state() {
        let message: Incoming = serde_json::from_str(
            r#"{"method":"state","params":{"paths":["a.rs","b.rs"],"current":1,"current_file":"b.rs"}}"#,
        )
        .expect("parse");
        assert_eq!(
            message,
            Incoming::State {
                paths: vec!["a.rs".into(), "b.rs".into()],
                current: 1,
                current_file: Some("b.rs".into()),
            }
        );
    }

    #[test]
    fn optional_state_fields() {
        let message: Incoming =
            serde_json::from_str(r#"{"method":"state","params":{"paths":[]}}"#).expect("parse");
        assert_eq!(
            message,
            Incoming::State {
                paths: vec![],
                current: 0,
                current_file: None,
            }
        );
    }

    #[test]
    fn parses_action_and_shutdown() {
        let message: Incoming =
            serde_json::from_str(r#"{"method":"action","params":{"name":"next"}}"#)
                .expect("parse");
        assert_eq!(message, Incoming::Action { name: Action::Next });

        let message: Incoming = serde_json::from_str(r#"{"method":"shutdown"}"#).expect("parse");
        assert_eq!(message, Incoming::Shutdown);
    }

    #[test]
    fn rejects_unknown_method() {
        assert!(serde_json::from_str::<Incoming>(r#"{"method":"explode","params":{}}"#).is_err());
    }

    #[test]
    fn open_overlay_is_flat() {
        let message = Outgoing::OpenOverlay(OpenOverlayParams {
            id: OverlayId(3),
            overlay: Overlay {
                text: "[a.rs]".to_string(),
                highlights: vec![Highlight {
                    start: 0,
                    len: 6,
                    group: "ArglistCurrent".to_string(),
                }],
                width: 6,
                placement: Placement::TopRight,
            },
        });

        assert_eq!(
            serde_json::to_value(&message).expect("serialize"),
            json!({
                "method": "open_overlay",
                "params": {
                    "id": 3,
                    "text": "[a.rs]",
                    "highlights": [{"start": 0, "len": 6, "group": "ArglistCurrent"}],
                    "width": 6,
                    "placement": "top_right"
                }
            })
        );
    }

    #[test]
    fn notify_shape() {
        let message = Outgoing::Notify {
            level: Level::Warn,
            message: "Already at the last entry".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&message).expect("serialize"),
            json!({
                "method": "notify",
                "params": {"level": "warn", "message": "Already at the last entry"}
            })
        );
    }
}
