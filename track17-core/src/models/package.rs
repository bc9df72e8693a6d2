//! The tracked-package value object.

use serde::{Deserialize, Serialize};

use super::status::PackageStatus;

/// Default time zone label applied when the caller supplies none.
pub(crate) const DEFAULT_TZ: &str = "UTC";

/// A package tracked by the service, as reported by one list response.
///
/// The `tracking_number` is the user-facing identifier and the key for
/// every workflow lookup. The `id` is the service's opaque internal
/// identifier; it is only ever populated from server responses and is
/// required by the rename/archive/delete operations.
///
/// Instances are plain value objects built fresh from each response;
/// nothing mutates them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedPackage {
    /// User-facing tracking number.
    pub tracking_number: String,
    /// Service-internal identifier, present once the package has been
    /// listed at least once.
    pub id: Option<String>,
    /// Destination country code (0 when the record omits it).
    pub destination_country: i64,
    /// Origin country code (0 when the record omits it).
    pub origin_country: i64,
    /// Package type code (0 when the record omits it).
    pub package_type: i64,
    /// Raw status code as reported by the service. Use
    /// [`TrackedPackage::status_name`] for the translated status; the raw
    /// code is kept for diagnostics since several codes alias to the same
    /// name.
    pub status: i64,
    /// User-assigned label, if any.
    pub friendly_name: Option<String>,
    /// Free-text description of the latest tracking event.
    pub info_text: Option<String>,
    /// Location of the latest tracking event.
    pub location: Option<String>,
    /// Timestamp of the latest tracking event, as reported.
    pub timestamp: Option<String>,
    /// IANA-style time zone label the timestamp should be read in.
    #[serde(default = "default_tz")]
    pub tz: String,
}

fn default_tz() -> String {
    DEFAULT_TZ.to_string()
}

impl TrackedPackage {
    /// Translates the raw status code into its named status.
    pub fn status_name(&self) -> PackageStatus {
        PackageStatus::from_code(self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(status: i64) -> TrackedPackage {
        TrackedPackage {
            tracking_number: "RB123456789CN".to_string(),
            id: Some("8764".to_string()),
            destination_country: 1203,
            origin_country: 301,
            package_type: 0,
            status,
            friendly_name: Some("Headphones".to_string()),
            info_text: None,
            location: None,
            timestamp: None,
            tz: DEFAULT_TZ.to_string(),
        }
    }

    #[test]
    fn test_status_name_translates_raw_code() {
        assert_eq!(sample(1).status_name(), PackageStatus::InTransit);
        assert_eq!(sample(7).status_name(), PackageStatus::Unknown);
    }

    #[test]
    fn test_status_name_is_idempotent() {
        let package = sample(4);
        assert_eq!(package.status_name(), package.status_name());
        // The raw code survives translation.
        assert_eq!(package.status, 4);
    }

    #[test]
    fn test_tz_defaults_on_deserialize() {
        let json = r#"{
            "tracking_number": "RB1",
            "id": null,
            "destination_country": 0,
            "origin_country": 0,
            "package_type": 0,
            "status": 0,
            "friendly_name": null,
            "info_text": null,
            "location": null,
            "timestamp": null
        }"#;
        let package: TrackedPackage = serde_json::from_str(json).unwrap();
        assert_eq!(package.tz, "UTC");
    }
}
