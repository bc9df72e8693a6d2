//! The profile workflows: login and package management.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use track17_core::{aggregate_counts, PackageStatus, TrackedPackage};
use track17_fetch::{SessionClient, Transport};

use crate::error::ClientError;
use crate::wire::{Envelope, IndexData, TrackRecord};

// ============================================================================
// Constants
// ============================================================================

/// Endpoint for package operations.
pub const API_URL_BUYER: &str = "https://buyer.17track.net/orderapi/call";

/// Endpoint for authentication.
pub const API_URL_USER: &str = "https://user.17track.net/userapi/call";

/// Protocol version sent in every payload.
const API_VERSION: &str = "1.0";

/// Page size for list requests; the service caps a page at 40 items.
const PER_PAGE: u64 = 40;

/// Time zone label used when a workflow lists packages internally.
const DEFAULT_TZ: &str = "UTC";

// ============================================================================
// Add Outcome
// ============================================================================

/// Result of [`Profile::add_package`].
///
/// The add itself succeeded whenever this value exists. The follow-up
/// rename is best-effort: if it failed, `warning` says why and `renamed`
/// stays false. A failed rename never undoes a successful add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    /// Whether the requested friendly name was applied.
    pub renamed: bool,
    /// Non-fatal failure from the rename step, if any.
    pub warning: Option<String>,
}

impl AddOutcome {
    fn added() -> Self {
        Self {
            renamed: false,
            warning: None,
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// An authenticated user profile over one [`SessionClient`].
///
/// Every operation is one or more sequential JSON-RPC calls; no remote
/// failure is retried here, and internal ids are re-resolved from a
/// fresh list on every use rather than cached.
pub struct Profile {
    session: SessionClient,
    account_id: Option<String>,
}

impl Profile {
    /// Creates a profile over the standard HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Fetch`] when no HTTP transport can be
    /// constructed in this environment.
    pub fn new() -> Result<Self, ClientError> {
        Ok(Self::with_session(SessionClient::new()?))
    }

    /// Creates a profile over an existing session client.
    pub fn with_session(session: SessionClient) -> Self {
        Self {
            session,
            account_id: None,
        }
    }

    /// Creates a profile over a custom transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self::with_session(SessionClient::with_transport(transport))
    }

    /// The account identifier reported by the service after a successful
    /// login.
    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    /// Signs in and stores the account identifier on success.
    ///
    /// Bad credentials are not an error: the service answers with a
    /// non-zero `Code` and this returns `Ok(false)`, leaving the account
    /// identifier unset.
    ///
    /// # Errors
    ///
    /// Only transport/session failures ([`ClientError::Fetch`]) or a
    /// payload that is not the expected envelope.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<bool, ClientError> {
        let response = self
            .call(
                API_URL_USER,
                "Signin",
                json!({
                    "Email": email,
                    "Password": password,
                    "CaptchaCode": "",
                }),
                true,
            )
            .await?;

        if response.code != 0 {
            debug!(code = response.code, "Signin rejected");
            return Ok(false);
        }

        self.account_id = response
            .json
            .get("gid")
            .and_then(Value::as_str)
            .map(String::from);
        debug!("Signed in");
        Ok(true)
    }

    /// Lists tracked packages in server order.
    ///
    /// Requests up to 40 items on page 1, optionally filtered by raw
    /// package-state code and by the archived flag. `tz` is attached to
    /// each package as the zone its event timestamp should be read in;
    /// an empty string falls back to `"UTC"`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Fetch`] for transport/session failures,
    /// [`ClientError::MalformedResponse`] when the payload or an embedded
    /// event does not match the wire shape.
    #[instrument(skip(self))]
    pub async fn packages(
        &self,
        state_filter: Option<i64>,
        include_archived: bool,
        tz: &str,
    ) -> Result<Vec<TrackedPackage>, ClientError> {
        let state = state_filter.map_or_else(|| json!(""), |code| json!(code));
        let response = self
            .call(
                API_URL_BUYER,
                "GetTrackInfoList",
                json!({
                    "IsArchived": include_archived,
                    "Item": "",
                    "Page": 1,
                    "PerPage": PER_PAGE,
                    "PackageState": state,
                    "Sequence": "0",
                }),
                true,
            )
            .await?;

        let records: Vec<TrackRecord> = match response.json {
            Value::Null => Vec::new(),
            payload => serde_json::from_value(payload)
                .map_err(|err| ClientError::MalformedResponse(err.to_string()))?,
        };

        debug!(count = records.len(), "Listed packages");

        records
            .into_iter()
            .map(|record| record.into_package(tz))
            .collect()
    }

    /// Sums the package counts reported by the service per named status.
    ///
    /// Raw codes that alias to the same status ([`PackageStatus::Unknown`]
    /// covers several) have their counts added together.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Profile::packages`].
    #[instrument(skip(self))]
    pub async fn summary(
        &self,
        include_archived: bool,
    ) -> Result<HashMap<PackageStatus, u64>, ClientError> {
        let response = self
            .call(
                API_URL_BUYER,
                "GetIndexData",
                json!({ "IsArchived": include_archived }),
                true,
            )
            .await?;

        let data: IndexData = match response.json {
            Value::Null => IndexData::default(),
            payload => serde_json::from_value(payload)
                .map_err(|err| ClientError::MalformedResponse(err.to_string()))?,
        };

        Ok(aggregate_counts(
            data.eitem.into_iter().map(|item| (item.e, item.ec)),
        ))
    }

    /// Registers a tracking number, optionally naming it.
    ///
    /// The rename needs the internal id the service assigned during the
    /// add, so it re-fetches the list to find it. A tracking number that
    /// fails to show up there is surfaced as
    /// [`ClientError::InvalidTrackingNumber`]; any other rename failure
    /// is logged and carried back as a warning on the [`AddOutcome`],
    /// because the add itself already succeeded.
    ///
    /// # Errors
    ///
    /// [`ClientError::Rejected`] when the add is refused,
    /// [`ClientError::InvalidTrackingNumber`] as above, plus the usual
    /// fetch taxonomy.
    #[instrument(skip(self))]
    pub async fn add_package(
        &self,
        tracking_number: &str,
        friendly_name: Option<&str>,
    ) -> Result<AddOutcome, ClientError> {
        let response = self
            .call(
                API_URL_BUYER,
                "AddTrackNo",
                json!({ "TrackNos": [tracking_number] }),
                false,
            )
            .await?;
        if response.code != 0 {
            return Err(ClientError::Rejected {
                code: response.code,
            });
        }

        let Some(name) = friendly_name else {
            return Ok(AddOutcome::added());
        };

        let packages = self.packages(None, false, DEFAULT_TZ).await?;
        let package = packages
            .into_iter()
            .find(|package| package.tracking_number == tracking_number)
            .ok_or_else(|| ClientError::InvalidTrackingNumber(tracking_number.to_string()))?;

        let rename = match package.id {
            Some(id) => self.set_friendly_name(&id, name).await,
            None => Err(ClientError::MissingInternalId(tracking_number.to_string())),
        };

        match rename {
            Ok(()) => Ok(AddOutcome {
                renamed: true,
                warning: None,
            }),
            Err(err) => {
                warn!(error = %err, tracking_number, "Failed to set friendly name after add");
                Ok(AddOutcome {
                    renamed: false,
                    warning: Some(err.to_string()),
                })
            }
        }
    }

    /// Sets the user label of a package addressed by its internal id.
    ///
    /// # Errors
    ///
    /// [`ClientError::Rejected`] on a non-zero remote `Code`, plus the
    /// usual fetch taxonomy.
    #[instrument(skip(self))]
    pub async fn set_friendly_name(
        &self,
        internal_id: &str,
        friendly_name: &str,
    ) -> Result<(), ClientError> {
        let response = self
            .call(
                API_URL_BUYER,
                "SetTrackRemark",
                json!({
                    "TrackInfoId": internal_id,
                    "Remark": friendly_name,
                }),
                false,
            )
            .await?;
        expect_accepted(&response)
    }

    /// Archives a package addressed by tracking number.
    ///
    /// The service only archives by internal id, so the number is first
    /// resolved through a fresh list fetch.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidTrackingNumber`] when the number is not in
    /// the current list, [`ClientError::MissingInternalId`] when the
    /// record carries no id, [`ClientError::Rejected`] on a non-zero
    /// remote `Code`, plus the usual fetch taxonomy.
    #[instrument(skip(self))]
    pub async fn archive_package(&self, tracking_number: &str) -> Result<(), ClientError> {
        let internal_id = self.resolve_internal_id(tracking_number).await?;
        let response = self
            .call(
                API_URL_BUYER,
                "SetTrackArchived",
                json!({ "TrackInfoIds": [internal_id] }),
                false,
            )
            .await?;
        expect_accepted(&response)
    }

    /// Deletes a package addressed by tracking number.
    ///
    /// Same resolve-then-act pattern as [`Profile::archive_package`];
    /// when resolution fails, no delete call is issued.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Profile::archive_package`].
    #[instrument(skip(self))]
    pub async fn delete_package(&self, tracking_number: &str) -> Result<(), ClientError> {
        let internal_id = self.resolve_internal_id(tracking_number).await?;
        let response = self
            .call(
                API_URL_BUYER,
                "DelTrackNo",
                json!({ "TrackInfoIds": [internal_id] }),
                false,
            )
            .await?;
        expect_accepted(&response)
    }

    /// Resolves a tracking number to the service's internal id via a
    /// fresh list fetch.
    async fn resolve_internal_id(&self, tracking_number: &str) -> Result<String, ClientError> {
        let packages = self.packages(None, false, DEFAULT_TZ).await?;
        let package = packages
            .into_iter()
            .find(|package| package.tracking_number == tracking_number)
            .ok_or_else(|| ClientError::InvalidTrackingNumber(tracking_number.to_string()))?;

        package
            .id
            .ok_or_else(|| ClientError::MissingInternalId(tracking_number.to_string()))
    }

    /// Issues one JSON-RPC call and decodes the envelope. `sourced`
    /// attaches `sourcetype: 0`, which the service expects on the read
    /// and signin methods but not on the write methods.
    async fn call(
        &self,
        url: &str,
        method: &str,
        param: Value,
        sourced: bool,
    ) -> Result<Envelope, ClientError> {
        let mut payload = json!({
            "version": API_VERSION,
            "method": method,
            "param": param,
        });
        if sourced {
            payload["sourcetype"] = json!(0);
        }

        let response = self.session.request("post", url, Some(payload)).await?;
        serde_json::from_value(response)
            .map_err(|err| ClientError::MalformedResponse(err.to_string()))
    }
}

fn expect_accepted(response: &Envelope) -> Result<(), ClientError> {
    if response.code == 0 {
        Ok(())
    } else {
        Err(ClientError::Rejected {
            code: response.code,
        })
    }
}
