//! Core types for the Dead Man's Snitch API.
//!
//! [`Snitch`] mirrors the upstream resource. [`SnitchSpec`] is the desired
//! state supplied by a caller: every mutable field is an `Option` so that
//! "leave unchanged" is distinguishable from "set to empty" at compile time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Expected check-in cadence for a snitch.
///
/// The upstream accepts a fixed set of periods; the wire strings use the
/// `N_minute` / `N_hour` style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    /// Every minute.
    #[serde(rename = "1_minute")]
    OneMinute,
    /// Every 2 minutes.
    #[serde(rename = "2_minute")]
    TwoMinute,
    /// Every 3 minutes.
    #[serde(rename = "3_minute")]
    ThreeMinute,
    /// Every 5 minutes.
    #[serde(rename = "5_minute")]
    FiveMinute,
    /// Every 10 minutes.
    #[serde(rename = "10_minute")]
    TenMinute,
    /// Every 15 minutes.
    #[serde(rename = "15_minute")]
    FifteenMinute,
    /// Every 30 minutes.
    #[serde(rename = "30_minute")]
    ThirtyMinute,
    /// Every hour.
    #[serde(rename = "hourly")]
    Hourly,
    /// Every 2 hours.
    #[serde(rename = "2_hour")]
    TwoHour,
    /// Every 3 hours.
    #[serde(rename = "3_hour")]
    ThreeHour,
    /// Every 4 hours.
    #[serde(rename = "4_hour")]
    FourHour,
    /// Every 6 hours.
    #[serde(rename = "6_hour")]
    SixHour,
    /// Every 8 hours.
    #[serde(rename = "8_hour")]
    EightHour,
    /// Every 12 hours.
    #[serde(rename = "12_hour")]
    TwelveHour,
    /// Once a day.
    #[serde(rename = "daily")]
    Daily,
    /// Once a week.
    #[serde(rename = "weekly")]
    Weekly,
    /// Once a month.
    #[serde(rename = "monthly")]
    Monthly,
}

impl Interval {
    /// All supported intervals, shortest first.
    pub const ALL: &'static [Interval] = &[
        Interval::OneMinute,
        Interval::TwoMinute,
        Interval::ThreeMinute,
        Interval::FiveMinute,
        Interval::TenMinute,
        Interval::FifteenMinute,
        Interval::ThirtyMinute,
        Interval::Hourly,
        Interval::TwoHour,
        Interval::ThreeHour,
        Interval::FourHour,
        Interval::SixHour,
        Interval::EightHour,
        Interval::TwelveHour,
        Interval::Daily,
        Interval::Weekly,
        Interval::Monthly,
    ];

    /// Wire string for this interval.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMinute => "1_minute",
            Self::TwoMinute => "2_minute",
            Self::ThreeMinute => "3_minute",
            Self::FiveMinute => "5_minute",
            Self::TenMinute => "10_minute",
            Self::FifteenMinute => "15_minute",
            Self::ThirtyMinute => "30_minute",
            Self::Hourly => "hourly",
            Self::TwoHour => "2_hour",
            Self::ThreeHour => "3_hour",
            Self::FourHour => "4_hour",
            Self::SixHour => "6_hour",
            Self::EightHour => "8_hour",
            Self::TwelveHour => "12_hour",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|interval| interval.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown interval: {s}"))
    }
}

/// How a snitch alerts when check-ins stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    /// Alert as soon as a check-in is missed.
    Basic,
    /// Smart alerting (requires an upstream plan that includes it).
    Smart,
}

impl AlertType {
    /// Wire string for this alert type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Smart => "smart",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "smart" => Ok(Self::Smart),
            other => Err(format!("unknown alert type: {other}")),
        }
    }
}

/// A live snitch as reported by the upstream.
///
/// The `token` is the upstream-assigned identifier; everything else is
/// mutable through updates. Unknown response fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snitch {
    /// Upstream-assigned identifier.
    pub token: String,
    /// Display name.
    pub name: String,
    /// Expected check-in cadence.
    pub interval: Interval,
    /// Alert type, when reported.
    #[serde(default)]
    pub alert_type: Option<AlertType>,
    /// Alert email addresses, when reported.
    #[serde(default)]
    pub alert_email: Option<Vec<String>>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Tags attached to the snitch.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Upstream status (e.g. "healthy", "pending", "paused").
    #[serde(default)]
    pub status: Option<String>,
    /// URL the snitch expects check-ins at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_url: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Partial request body for snitch create/update calls.
///
/// Absent fields are never serialized, so an update only touches what the
/// caller explicitly set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SnitchFields {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New check-in cadence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
    /// New alert type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<AlertType>,
    /// Replacement alert email list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_email: Option<Vec<String>>,
    /// New notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Tag list, forwarded verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Desired lifecycle state for a snitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesiredState {
    /// The snitch should exist, matching the supplied fields.
    Present,
    /// The snitch should not exist.
    Absent,
}

impl FromStr for DesiredState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            other => Err(format!("unknown state: {other} (expected present or absent)")),
        }
    }
}

/// Desired state for a snitch's tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagState {
    /// Add the supplied tags where missing.
    Present,
    /// Remove the supplied tags where present.
    Absent,
    /// Replace the snitch's tags with exactly the supplied set.
    Absolute,
}

impl FromStr for TagState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            "absolute" => Ok(Self::Absolute),
            other => Err(format!(
                "unknown tag state: {other} (expected present, absent, or absolute)"
            )),
        }
    }
}

/// Desired state of a single snitch.
///
/// `id` and `name` double as the lookup reference (id wins when both are
/// set). Unset fields mean "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnitchSpec {
    /// Upstream id of the snitch to target.
    pub id: Option<String>,
    /// Name of the snitch to target, or its new name when updating by id.
    pub name: Option<String>,
    /// Desired check-in cadence.
    pub interval: Option<Interval>,
    /// Desired alert type.
    pub alert_type: Option<AlertType>,
    /// Desired alert email list. Replaces the full list on the snitch.
    pub alert_email: Option<Vec<String>>,
    /// Desired notes.
    pub notes: Option<String>,
    /// Desired tags. Forwarded verbatim on create/update; set algebra lives
    /// in the dedicated tag operations.
    pub tags: Option<Vec<String>>,
}

impl SnitchSpec {
    /// The request body carrying exactly the fields this spec sets.
    #[must_use]
    pub fn fields(&self) -> SnitchFields {
        SnitchFields {
            name: self.name.clone(),
            interval: self.interval,
            alert_type: self.alert_type,
            alert_email: self.alert_email.clone(),
            notes: self.notes.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Whether any explicitly set field differs from the live snitch.
    ///
    /// Unset fields never count. Alert emails compare as whole lists
    /// (order-sensitive); tags compare as sets.
    #[must_use]
    pub fn differs_from(&self, live: &Snitch) -> bool {
        let name_changed = self.name.as_ref().is_some_and(|name| *name != live.name);
        let interval_changed = self
            .interval
            .is_some_and(|interval| interval != live.interval);
        let alert_type_changed = self
            .alert_type
            .is_some_and(|alert_type| Some(alert_type) != live.alert_type);
        let alert_email_changed = self
            .alert_email
            .as_ref()
            .is_some_and(|emails| Some(emails) != live.alert_email.as_ref());
        let notes_changed = self
            .notes
            .as_ref()
            .is_some_and(|notes| Some(notes) != live.notes.as_ref());
        let tags_changed = self
            .tags
            .as_ref()
            .is_some_and(|tags| tag_set(tags) != tag_set(&live.tags));

        name_changed
            || interval_changed
            || alert_type_changed
            || alert_email_changed
            || notes_changed
            || tags_changed
    }
}

/// Identity of a snitch affected by an operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SnitchHandle {
    /// Upstream id, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SnitchHandle {
    /// Handle for a live snitch.
    #[must_use]
    pub fn of(snitch: &Snitch) -> Self {
        Self {
            id: Some(snitch.token.clone()),
            name: Some(snitch.name.clone()),
        }
    }
}

/// Tags as a set, for order-insensitive comparison.
pub(crate) fn tag_set(tags: &[String]) -> BTreeSet<&str> {
    tags.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_snitch() -> Snitch {
        Snitch {
            token: "abc123".to_string(),
            name: "backup-job".to_string(),
            interval: Interval::Daily,
            alert_type: Some(AlertType::Basic),
            alert_email: Some(vec!["ops@example.com".to_string()]),
            notes: Some("nightly backups".to_string()),
            tags: vec!["production".to_string(), "backups".to_string()],
            status: Some("healthy".to_string()),
            check_in_url: None,
            created_at: None,
        }
    }

    #[test]
    fn test_interval_wire_names() {
        assert_eq!(
            serde_json::to_string(&Interval::OneMinute).unwrap(),
            "\"1_minute\""
        );
        assert_eq!(
            serde_json::to_string(&Interval::Hourly).unwrap(),
            "\"hourly\""
        );
        assert_eq!(
            serde_json::to_string(&Interval::TwelveHour).unwrap(),
            "\"12_hour\""
        );
    }

    #[test]
    fn test_interval_from_str_round_trip() {
        for interval in Interval::ALL {
            assert_eq!(interval.as_str().parse::<Interval>().unwrap(), *interval);
        }
        assert!("13_minute".parse::<Interval>().is_err());
    }

    #[test]
    fn test_alert_type_round_trip() {
        assert_eq!("smart".parse::<AlertType>().unwrap(), AlertType::Smart);
        assert_eq!(
            serde_json::to_string(&AlertType::Basic).unwrap(),
            "\"basic\""
        );
        assert!("loud".parse::<AlertType>().is_err());
    }

    #[test]
    fn test_snitch_deserialization() {
        let json = r#"{
            "token": "123456",
            "href": "/v1/snitches/123456",
            "name": "foo",
            "interval": "1_minute",
            "alert_type": "basic",
            "alert_email": ["foo@example.com"],
            "notes": "This is a note",
            "tags": ["foo", "bar"],
            "status": "pending",
            "check_in_url": "https://nosnch.in/123456",
            "created_at": "2021-01-01T00:00:00Z"
        }"#;

        let snitch: Snitch = serde_json::from_str(json).unwrap();
        assert_eq!(snitch.token, "123456");
        assert_eq!(snitch.interval, Interval::OneMinute);
        assert_eq!(snitch.alert_type, Some(AlertType::Basic));
        assert_eq!(snitch.tags, vec!["foo", "bar"]);
    }

    #[test]
    fn test_snitch_deserialization_minimal() {
        let json = r#"{"token": "t", "name": "n", "interval": "weekly"}"#;
        let snitch: Snitch = serde_json::from_str(json).unwrap();
        assert_eq!(snitch.alert_type, None);
        assert!(snitch.tags.is_empty());
    }

    #[test]
    fn test_fields_skip_unset() {
        let fields = SnitchFields {
            name: Some("foo".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&fields).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["name"], "foo");
    }

    #[test]
    fn test_fields_keep_explicit_empty() {
        // "set to empty" is not "unset"
        let fields = SnitchFields {
            alert_email: Some(vec![]),
            ..Default::default()
        };
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value.as_object().unwrap()["alert_email"], serde_json::json!([]));
    }

    #[test]
    fn test_differs_from_ignores_unset_fields() {
        let spec = SnitchSpec {
            name: Some("backup-job".to_string()),
            ..Default::default()
        };
        assert!(!spec.differs_from(&live_snitch()));
    }

    #[test]
    fn test_differs_from_detects_drift() {
        let spec = SnitchSpec {
            notes: Some("weekly backups".to_string()),
            ..Default::default()
        };
        assert!(spec.differs_from(&live_snitch()));
    }

    #[test]
    fn test_tags_compare_as_sets() {
        let spec = SnitchSpec {
            tags: Some(vec!["backups".to_string(), "production".to_string()]),
            ..Default::default()
        };
        assert!(!spec.differs_from(&live_snitch()));
    }

    #[test]
    fn test_alert_email_compares_in_order() {
        let mut live = live_snitch();
        live.alert_email = Some(vec!["a@example.com".to_string(), "b@example.com".to_string()]);
        let spec = SnitchSpec {
            alert_email: Some(vec!["b@example.com".to_string(), "a@example.com".to_string()]),
            ..Default::default()
        };
        assert!(spec.differs_from(&live));
    }

    #[test]
    fn test_explicit_empty_differs_from_null() {
        let mut live = live_snitch();
        live.alert_email = None;
        let spec = SnitchSpec {
            alert_email: Some(vec![]),
            ..Default::default()
        };
        assert!(spec.differs_from(&live));
    }
}
