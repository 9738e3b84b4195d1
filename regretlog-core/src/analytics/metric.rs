//! Win metrics: how a conversation counts toward "success".

use crate::error::Error;
use crate::types::{ConversationRecord, Party};
use std::fmt;
use std::str::FromStr;

/// Maps a conversation to a numeric success contribution.
///
/// Most metrics are 0/1 outcomes, but any summable quantity works (the
/// aggregations only add values up).
pub trait ConversationMetric {
    /// Stable name used in config files and reports.
    fn name(&self) -> &str;

    /// Contribution of the whole conversation.
    fn value(&self, record: &ConversationRecord) -> f64;

    /// Contribution credited to one party's per-user history.
    ///
    /// Defaults to [`Self::value`], which suits symmetric outcomes like a match.
    fn value_for(&self, record: &ConversationRecord, _party: Party) -> f64 {
        self.value(record)
    }
}

/// Built-in win metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WinMetric {
    /// Both users clicked
    FbMatch,
    /// At least one message was sent
    NoImmediateDisconnect,
    /// Message volume; per party, that user's own messages
    MessagesSent,
}

impl WinMetric {
    pub const ALL: [WinMetric; 3] = [
        WinMetric::FbMatch,
        WinMetric::NoImmediateDisconnect,
        WinMetric::MessagesSent,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WinMetric::FbMatch => "fb_match",
            WinMetric::NoImmediateDisconnect => "no_immediate_disconnect",
            WinMetric::MessagesSent => "messages_sent",
        }
    }
}

impl ConversationMetric for WinMetric {
    fn name(&self) -> &str {
        WinMetric::name(self)
    }

    fn value(&self, record: &ConversationRecord) -> f64 {
        match self {
            WinMetric::FbMatch => bool_value(record.fb_match_occurred()),
            WinMetric::NoImmediateDisconnect => {
                bool_value(record.no_immediate_disconnect_occurred())
            }
            WinMetric::MessagesSent => record.total_messages_sent() as f64,
        }
    }

    fn value_for(&self, record: &ConversationRecord, party: Party) -> f64 {
        match self {
            WinMetric::MessagesSent => record.messages_sent(party) as f64,
            _ => self.value(record),
        }
    }
}

impl fmt::Display for WinMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WinMetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WinMetric::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| {
                Error::Config(format!(
                    "unknown metric '{}' (expected one of: fb_match, no_immediate_disconnect, messages_sent)",
                    s
                ))
            })
    }
}

fn bool_value(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}
