//! Core domain types for regretlog
//!
//! A [`ConversationRecord`] is one paired conversation between two users,
//! as written to the conversation log. Records are the source of truth for
//! every derived statistic and are never mutated after loading.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Conversation** | One pairing of two users, with a start time |
//! | **Party** | Which slot a user occupied in a conversation (first or second) |
//! | **Click** | A user choosing to exchange contact details after the conversation |
//! | **Match** | Both parties clicked |
//! | **Immediate disconnect** | Neither party sent a single message |

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================
// Users
// ============================================

/// Identifier of a user in the conversation log.
///
/// Logs use arbitrary scalar tokens, so both JSON integers and strings are
/// accepted. Any other JSON shape is rejected at parse time.
///
/// Integers that fit in an `i64` are always `Number`; `Unsigned` only holds
/// values above `i64::MAX`, so each integer has exactly one representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Unsigned(u64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Unsigned(n) => write!(f, "{}", n),
            UserId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        UserId::Number(value)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(n) => UserId::Number(n),
            Err(_) => UserId::Unsigned(value),
        }
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        UserId::Text(value.to_string())
    }
}

/// Slot a user occupied in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Party {
    First,
    Second,
}

// ============================================
// Conversation records
// ============================================

/// A single paired conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// When the conversation started (stored on disk as epoch milliseconds)
    #[serde(rename = "startTime", with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    /// First user
    #[serde(rename = "userID1")]
    pub user_id1: UserId,
    /// Second user
    #[serde(rename = "userID2")]
    pub user_id2: UserId,
    /// Whether the first user clicked
    #[serde(rename = "user1Clicked")]
    pub user1_clicked: bool,
    /// Whether the second user clicked
    #[serde(rename = "user2Clicked")]
    pub user2_clicked: bool,
    /// Messages sent by the first user
    #[serde(rename = "user1MessagesSent")]
    pub user1_messages_sent: u32,
    /// Messages sent by the second user
    #[serde(rename = "user2MessagesSent")]
    pub user2_messages_sent: u32,
}

impl ConversationRecord {
    /// Start time of the conversation.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Local calendar day the conversation started on.
    pub fn conversation_date(&self) -> NaiveDate {
        self.conversation_date_in(&Local)
    }

    /// Calendar day the conversation started on, in the given time zone.
    pub fn conversation_date_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.start_time.with_timezone(tz).date_naive()
    }

    /// Both users, in record order.
    pub fn users(&self) -> (&UserId, &UserId) {
        (&self.user_id1, &self.user_id2)
    }

    /// The user in the given slot.
    pub fn user(&self, party: Party) -> &UserId {
        match party {
            Party::First => &self.user_id1,
            Party::Second => &self.user_id2,
        }
    }

    /// Whether the user in the given slot clicked.
    pub fn clicked(&self, party: Party) -> bool {
        match party {
            Party::First => self.user1_clicked,
            Party::Second => self.user2_clicked,
        }
    }

    /// Messages sent by the user in the given slot.
    pub fn messages_sent(&self, party: Party) -> u32 {
        match party {
            Party::First => self.user1_messages_sent,
            Party::Second => self.user2_messages_sent,
        }
    }

    /// Messages sent by both users.
    pub fn total_messages_sent(&self) -> u64 {
        self.user1_messages_sent as u64 + self.user2_messages_sent as u64
    }

    /// Both users clicked.
    pub fn fb_match_occurred(&self) -> bool {
        self.user1_clicked && self.user2_clicked
    }

    /// At least one user sent a message.
    pub fn no_immediate_disconnect_occurred(&self) -> bool {
        !(self.user1_messages_sent == 0 && self.user2_messages_sent == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use serde_json::json;

    fn record(user1_sent: u32, user2_sent: u32, clicks: (bool, bool)) -> ConversationRecord {
        ConversationRecord {
            start_time: Utc.with_ymd_and_hms(2014, 3, 2, 23, 30, 0).unwrap(),
            user_id1: UserId::Number(1),
            user_id2: UserId::Text("b".to_string()),
            user1_clicked: clicks.0,
            user2_clicked: clicks.1,
            user1_messages_sent: user1_sent,
            user2_messages_sent: user2_sent,
        }
    }

    #[test]
    fn test_deserialize_record() {
        let value = json!({
            "startTime": 1393803000000i64,
            "userID1": 17,
            "userID2": "guest-4",
            "user1Clicked": true,
            "user2Clicked": false,
            "user1MessagesSent": 3,
            "user2MessagesSent": 0,
            "extra": "ignored"
        });

        let record: ConversationRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.user_id1, UserId::Number(17));
        assert_eq!(record.user_id2, UserId::Text("guest-4".to_string()));
        assert_eq!(record.start_time.timestamp_millis(), 1393803000000);
        assert!(record.clicked(Party::First));
        assert!(!record.clicked(Party::Second));
        assert_eq!(record.messages_sent(Party::First), 3);
    }

    #[test]
    fn test_rejects_missing_and_mistyped_fields() {
        let missing = json!({
            "startTime": 0,
            "userID1": 1,
            "userID2": 2,
            "user1Clicked": true,
            "user2Clicked": false,
            "user1MessagesSent": 0
        });
        assert!(serde_json::from_value::<ConversationRecord>(missing).is_err());

        let negative = json!({
            "startTime": 0,
            "userID1": 1,
            "userID2": 2,
            "user1Clicked": true,
            "user2Clicked": false,
            "user1MessagesSent": -1,
            "user2MessagesSent": 0
        });
        assert!(serde_json::from_value::<ConversationRecord>(negative).is_err());

        let float_user = json!({
            "startTime": 0,
            "userID1": 1.5,
            "userID2": 2,
            "user1Clicked": true,
            "user2Clicked": false,
            "user1MessagesSent": 0,
            "user2MessagesSent": 0
        });
        assert!(serde_json::from_value::<ConversationRecord>(float_user).is_err());
    }

    #[test]
    fn test_deserialize_full_range_integer_ids() {
        let value = json!({
            "startTime": 0,
            "userID1": 18446744073709551615u64,
            "userID2": -3,
            "user1Clicked": false,
            "user2Clicked": false,
            "user1MessagesSent": 0,
            "user2MessagesSent": 0
        });

        let record: ConversationRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.user_id1, UserId::Unsigned(u64::MAX));
        assert_eq!(record.user_id1.to_string(), "18446744073709551615");
        assert_eq!(record.user_id2, UserId::Number(-3));

        let records = crate::ingest::parse_records(
            r#"[{"startTime": 0, "userID1": 18446744073709551615, "userID2": 9223372036854775807,
                 "user1Clicked": true, "user2Clicked": true,
                 "user1MessagesSent": 1, "user2MessagesSent": 1}]"#,
        )
        .unwrap();
        assert_eq!(records[0].user_id1, UserId::Unsigned(u64::MAX));
        assert_eq!(records[0].user_id2, UserId::Number(i64::MAX));
    }

    #[test]
    fn test_user_id_from_u64_and_ordering() {
        assert_eq!(UserId::from(7u64), UserId::Number(7));
        assert_eq!(UserId::from(u64::MAX), UserId::Unsigned(u64::MAX));
        assert!(UserId::Number(i64::MAX) < UserId::Unsigned(i64::MAX as u64 + 1));
        assert!(UserId::Unsigned(u64::MAX) < UserId::from("a"));
    }

    #[test]
    fn test_conversation_date_in_time_zone() {
        let r = record(1, 1, (false, false));
        assert_eq!(
            r.conversation_date_in(&Utc),
            NaiveDate::from_ymd_opt(2014, 3, 2).unwrap()
        );

        assert_eq!(r.conversation_date(), r.conversation_date_in(&Local));
        assert_eq!(r.started_at(), r.start_time);

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            r.conversation_date_in(&plus_two),
            NaiveDate::from_ymd_opt(2014, 3, 3).unwrap()
        );
    }

    #[test]
    fn test_outcome_accessors() {
        assert!(record(0, 0, (true, true)).fb_match_occurred());
        assert!(!record(0, 0, (true, false)).fb_match_occurred());

        assert!(!record(0, 0, (false, false)).no_immediate_disconnect_occurred());
        assert!(record(0, 2, (false, false)).no_immediate_disconnect_occurred());
        assert_eq!(record(4, 2, (false, false)).total_messages_sent(), 6);
    }

    #[test]
    fn test_users_in_record_order() {
        let r = record(0, 0, (false, false));
        let (first, second) = r.users();
        assert_eq!(first, r.user(Party::First));
        assert_eq!(second, r.user(Party::Second));
        assert_eq!(first.to_string(), "1");
        assert_eq!(second.to_string(), "b");
    }
}
