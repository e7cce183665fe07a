//! Audit events for service provider configuration changes.
//!
//! Every change to a tenant's SAML configuration is security relevant: a
//! rogue assertion consumer URL or certificate redirects assertions. Events
//! record what changed, for which tenant, and whether it succeeded, and are
//! emitted through `tracing` on the `audit` target.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sp_model::TenantId;
use uuid::Uuid;

/// Tracing target used for audit events.
pub const AUDIT_TARGET: &str = "audit";

/// Configuration change categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Service provider created manually.
    ServiceProviderAdded,
    /// Service provider replaced.
    ServiceProviderUpdated,
    /// Service provider deleted.
    ServiceProviderRemoved,
    /// Service provider created from a metadata document.
    ServiceProviderUploaded,
}

/// Outcome of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventOutcome {
    /// Operation succeeded.
    Success,
    /// Operation failed.
    Failure,
}

/// An audit record for a configuration change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique event identifier.
    pub id: Uuid,

    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,

    /// Type of event.
    pub event_type: EventType,

    /// Outcome of the event.
    pub outcome: EventOutcome,

    /// Tenant whose configuration changed.
    pub tenant_id: Option<TenantId>,

    /// Issuer of the affected service provider.
    pub issuer: Option<String>,

    /// Error message (for failure events).
    pub error: Option<String>,

    /// Additional details as key-value pairs.
    pub details: Vec<(String, String)>,
}

impl Event {
    /// Creates a new event builder.
    #[must_use]
    pub const fn builder(event_type: EventType) -> EventBuilder {
        EventBuilder::new(event_type)
    }

    /// Writes the event to the audit log.
    pub fn emit(&self) {
        let tenant_id = self.tenant_id.map(|t| t.to_string()).unwrap_or_default();
        let issuer = self.issuer.as_deref().unwrap_or_default();
        match self.outcome {
            EventOutcome::Success => tracing::info!(
                target: AUDIT_TARGET,
                event_id = %self.id,
                event_type = ?self.event_type,
                tenant_id = %tenant_id,
                issuer = %issuer,
                details = ?self.details,
                "Service provider configuration changed"
            ),
            EventOutcome::Failure => tracing::warn!(
                target: AUDIT_TARGET,
                event_id = %self.id,
                event_type = ?self.event_type,
                tenant_id = %tenant_id,
                issuer = %issuer,
                error = self.error.as_deref().unwrap_or_default(),
                "Service provider configuration change rejected"
            ),
        }
    }
}

/// Builder for creating events.
pub struct EventBuilder {
    event_type: EventType,
    outcome: EventOutcome,
    tenant_id: Option<TenantId>,
    issuer: Option<String>,
    error: Option<String>,
    details: Vec<(String, String)>,
}

impl EventBuilder {
    /// Creates a new event builder.
    #[must_use]
    pub const fn new(event_type: EventType) -> Self {
        Self {
            event_type,
            outcome: EventOutcome::Success,
            tenant_id: None,
            issuer: None,
            error: None,
            details: Vec::new(),
        }
    }

    /// Sets the outcome to success.
    #[must_use]
    pub const fn success(mut self) -> Self {
        self.outcome = EventOutcome::Success;
        self
    }

    /// Sets the outcome to failure with an error message.
    #[must_use]
    pub fn failure(mut self, error: impl Into<String>) -> Self {
        self.outcome = EventOutcome::Failure;
        self.error = Some(error.into());
        self
    }

    /// Sets the tenant.
    #[must_use]
    pub const fn tenant(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    /// Sets the service provider issuer.
    #[must_use]
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Adds a detail key-value pair.
    #[must_use]
    pub fn detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.push((key.into(), value.into()));
        self
    }

    /// Builds the event.
    #[must_use]
    pub fn build(self) -> Event {
        Event {
            id: Uuid::now_v7(),
            timestamp: Utc::now(),
            event_type: self.event_type,
            outcome: self.outcome,
            tenant_id: self.tenant_id,
            issuer: self.issuer,
            error: self.error,
            details: self.details,
        }
    }
}
