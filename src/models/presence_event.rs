use std::fmt::Display;

/// Notification emitted when the tool changes dock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceEvent {
    ToolRemoved,
    ToolReplaced,
}

impl Display for PresenceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PresenceEvent::ToolRemoved => write!(f, "Tool removed"),
            PresenceEvent::ToolReplaced => write!(f, "Tool replaced"),
        }
    }
}
