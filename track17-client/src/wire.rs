//! Wire shapes of the service's JSON protocol.
//!
//! Responses arrive as `{Code, Message?, Json?}`; the payload under
//! `Json` depends on the remote method. Only the fields the workflows
//! consume are modeled; numeric record fields default to 0 when absent.

use serde::Deserialize;
use serde_json::Value;
use track17_core::TrackedPackage;

use crate::error::ClientError;

/// The service's response envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    /// Remote operation result; 0 means success.
    #[serde(rename = "Code")]
    pub code: i64,
    /// Method-dependent payload; `Null` when the service omits it.
    #[serde(rename = "Json", default)]
    pub json: Value,
}

/// One raw track record from `GetTrackInfoList`.
#[derive(Debug, Deserialize)]
pub struct TrackRecord {
    #[serde(rename = "FTrackNo")]
    pub track_no: String,
    #[serde(rename = "FTrackInfoId", default)]
    pub track_info_id: Option<String>,
    #[serde(rename = "FSecondCountry", default)]
    pub second_country: i64,
    #[serde(rename = "FFirstCountry", default)]
    pub first_country: i64,
    #[serde(rename = "FTrackStateType", default)]
    pub track_state_type: i64,
    #[serde(rename = "FPackageState", default)]
    pub package_state: i64,
    #[serde(rename = "FRemark", default)]
    pub remark: Option<String>,
    /// The latest tracking event, double-encoded as a JSON string.
    #[serde(rename = "FLastEvent", default)]
    pub last_event: Option<String>,
}

/// The decoded `FLastEvent` payload. Keys are the service's single-letter
/// vocabulary: `a` timestamp, `c`/`d` location parts, `z` info text.
#[derive(Debug, Default, Deserialize)]
pub struct LastEvent {
    #[serde(default)]
    pub a: Option<String>,
    #[serde(default)]
    pub c: Option<String>,
    #[serde(default)]
    pub d: Option<String>,
    #[serde(default)]
    pub z: Option<String>,
}

/// One per-status entry under `GetIndexData`'s `Json.eitem`: `e` is the
/// raw status code, `ec` its count.
#[derive(Debug, Deserialize)]
pub struct SummaryItem {
    #[serde(default)]
    pub e: i64,
    #[serde(default)]
    pub ec: u64,
}

/// Payload of `GetIndexData`.
#[derive(Debug, Default, Deserialize)]
pub struct IndexData {
    #[serde(default)]
    pub eitem: Vec<SummaryItem>,
}

impl TrackRecord {
    /// Builds the domain value object, decoding the embedded last event.
    ///
    /// Location joins the `c` and `d` parts with one space and trims; an
    /// empty result becomes `None`. An empty `tz` falls back to `"UTC"`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MalformedResponse`] when `FLastEvent` is
    /// present but not valid JSON.
    pub fn into_package(self, tz: &str) -> Result<TrackedPackage, ClientError> {
        let event = match self.last_event.as_deref() {
            None | Some("") => LastEvent::default(),
            Some(raw) => serde_json::from_str(raw).map_err(|err| {
                ClientError::MalformedResponse(format!("invalid FLastEvent: {err}"))
            })?,
        };

        let location = format!(
            "{} {}",
            event.c.as_deref().unwrap_or_default(),
            event.d.as_deref().unwrap_or_default()
        );
        let location = location.trim();

        Ok(TrackedPackage {
            tracking_number: self.track_no,
            id: self.track_info_id,
            destination_country: self.second_country,
            origin_country: self.first_country,
            package_type: self.track_state_type,
            status: self.package_state,
            friendly_name: self.remark,
            info_text: event.z,
            location: (!location.is_empty()).then(|| location.to_string()),
            timestamp: event.a,
            tz: if tz.is_empty() {
                "UTC".to_string()
            } else {
                tz.to_string()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_numeric_fields_default_to_zero() {
        let record: TrackRecord =
            serde_json::from_str(r#"{"FTrackNo": "RB1", "FTrackInfoId": "77"}"#).unwrap();
        assert_eq!(record.second_country, 0);
        assert_eq!(record.first_country, 0);
        assert_eq!(record.track_state_type, 0);
        assert_eq!(record.package_state, 0);

        let package = record.into_package("UTC").unwrap();
        assert_eq!(package.destination_country, 0);
        assert_eq!(package.origin_country, 0);
        assert_eq!(package.package_type, 0);
        assert_eq!(package.status, 0);
    }

    #[test]
    fn test_last_event_decodes_into_fields() {
        let record: TrackRecord = serde_json::from_str(
            r#"{
                "FTrackNo": "RB2",
                "FPackageState": 1,
                "FLastEvent": "{\"a\": \"2024-03-01 10:22\", \"c\": \"Shenzhen\", \"d\": \"CN\", \"z\": \"Departed facility\"}"
            }"#,
        )
        .unwrap();

        let package = record.into_package("Europe/Berlin").unwrap();
        assert_eq!(package.timestamp.as_deref(), Some("2024-03-01 10:22"));
        assert_eq!(package.location.as_deref(), Some("Shenzhen CN"));
        assert_eq!(package.info_text.as_deref(), Some("Departed facility"));
        assert_eq!(package.tz, "Europe/Berlin");
    }

    #[test]
    fn test_partial_location_is_trimmed() {
        let record: TrackRecord = serde_json::from_str(
            r#"{"FTrackNo": "RB3", "FLastEvent": "{\"c\": \"Rotterdam\"}"}"#,
        )
        .unwrap();
        let package = record.into_package("UTC").unwrap();
        assert_eq!(package.location.as_deref(), Some("Rotterdam"));
    }

    #[test]
    fn test_no_event_leaves_fields_absent() {
        let record: TrackRecord =
            serde_json::from_str(r#"{"FTrackNo": "RB4", "FLastEvent": ""}"#).unwrap();
        let package = record.into_package("").unwrap();
        assert_eq!(package.timestamp, None);
        assert_eq!(package.location, None);
        assert_eq!(package.info_text, None);
        assert_eq!(package.tz, "UTC");
    }

    #[test]
    fn test_garbled_event_is_malformed_response() {
        let record: TrackRecord =
            serde_json::from_str(r#"{"FTrackNo": "RB5", "FLastEvent": "{nope"}"#).unwrap();
        assert!(matches!(
            record.into_package("UTC"),
            Err(ClientError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_envelope_defaults() {
        let envelope: Envelope = serde_json::from_str(r#"{"Code": 0}"#).unwrap();
        assert_eq!(envelope.code, 0);
        assert!(envelope.json.is_null());
    }
}
