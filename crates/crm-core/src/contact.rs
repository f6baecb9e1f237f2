//! The contact entity and its embedded sub-documents.
//!
//! A contact is stored as a single document. `createdAt` and
//! `prospectCreatedAt` are assigned by the store and never change afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  label::{LifecycleStage, Origin, ProspectInterest, Status},
  validate::{check_email, check_optional_email, check_optional_phone},
};

// ─── Prospecting ─────────────────────────────────────────────────────────────

/// Sales-prospecting details for a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProspectingInfo {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub origin:              Option<Origin>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lifecycle_stage:     Option<LifecycleStage>,
  /// Distinct interests in the order they were first given.
  #[serde(default)]
  pub prospect_interests:  Vec<ProspectInterest>,
  /// When prospecting info was first recorded; never changes afterwards.
  pub prospect_created_at: DateTime<Utc>,
}

impl ProspectingInfo {
  /// An empty record stamped with `now`.
  pub fn new(now: DateTime<Utc>) -> Self {
    Self {
      origin:              None,
      lifecycle_stage:     None,
      prospect_interests:  Vec::new(),
      prospect_created_at: now,
    }
  }
}

/// Collapse repeated interests, keeping the first occurrence of each.
pub(crate) fn distinct(interests: Vec<ProspectInterest>) -> Vec<ProspectInterest> {
  let mut out = Vec::with_capacity(interests.len());
  for interest in interests {
    if !out.contains(&interest) {
      out.push(interest);
    }
  }
  out
}

// ─── Shipping ────────────────────────────────────────────────────────────────

/// Where and to whom orders for this contact are shipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub shipping_first_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub shipping_last_name:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub shipping_email:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub shipping_phone:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub street:              Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub neighborhood:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub municipality:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub state:               Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub postal_code:         Option<String>,
}

impl ShippingInfo {
  /// Trim every field, drop blanks, lowercase the email.
  pub fn normalize(self) -> Self {
    Self {
      shipping_first_name: tidy(self.shipping_first_name),
      shipping_last_name:  tidy(self.shipping_last_name),
      shipping_email:      tidy(self.shipping_email).map(|e| e.to_lowercase()),
      shipping_phone:      tidy(self.shipping_phone),
      street:              tidy(self.street),
      neighborhood:        tidy(self.neighborhood),
      municipality:        tidy(self.municipality),
      state:               tidy(self.state),
      postal_code:         tidy(self.postal_code),
    }
  }

  pub fn is_empty(&self) -> bool { *self == Self::default() }

  /// `None` when no field is set.
  pub fn non_empty(self) -> Option<Self> {
    (!self.is_empty()).then_some(self)
  }

  pub fn validate(&self) -> Result<()> {
    check_optional_email(self.shipping_email.as_deref(), "Invalid shipping email")?;
    check_optional_phone(self.shipping_phone.as_deref(), "Invalid shipping phone")
  }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A stored contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:               Uuid,
  pub first_name:       String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_name:        Option<String>,
  /// Lowercase; unique across the store.
  pub email:            String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone:            Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub whatsapp:         Option<String>,
  pub status:           Status,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub prospecting_info: Option<ProspectingInfo>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub shipping_info:    Option<ShippingInfo>,
  /// Server-assigned; never changes after creation.
  pub created_at:       DateTime<Utc>,
  pub updated_at:       DateTime<Utc>,
}

impl Contact {
  /// Check every format-sensitive field of a complete record.
  pub fn validate(&self) -> Result<()> {
    if self.first_name.is_empty() {
      return Err(Error::validation("First name is required"));
    }
    if self.email.is_empty() {
      return Err(Error::validation("Email is required"));
    }
    check_email(&self.email, "Invalid email format")?;
    check_optional_phone(self.phone.as_deref(), "Invalid phone number")?;
    check_optional_phone(self.whatsapp.as_deref(), "Invalid WhatsApp number")?;
    if let Some(shipping) = &self.shipping_info {
      shipping.validate()?;
    }
    Ok(())
  }

  /// `"first last"`, or just the first name.
  pub fn full_name(&self) -> String {
    match &self.last_name {
      Some(last) => format!("{} {last}", self.first_name),
      None => self.first_name.clone(),
    }
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Trim an optional string, mapping blank values to `None`.
pub(crate) fn tidy(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Contact {
    let now = Utc::now();
    Contact {
      id:               Uuid::new_v4(),
      first_name:       "Ana".into(),
      last_name:        None,
      email:            "ana@example.com".into(),
      phone:            Some("+525512345678".into()),
      whatsapp:         None,
      status:           Status::Lead,
      prospecting_info: None,
      shipping_info:    None,
      created_at:       now,
      updated_at:       now,
    }
  }

  #[test]
  fn serialises_camel_case_and_omits_absent_fields() {
    let json = serde_json::to_value(sample()).unwrap();
    assert_eq!(json["firstName"], "Ana");
    assert_eq!(json["status"], "02.- Lead");
    assert!(json.get("lastName").is_none());
    assert!(json.get("shippingInfo").is_none());
    assert!(json.get("createdAt").is_some());
  }

  #[test]
  fn validate_reports_the_offending_field() {
    let mut c = sample();
    c.whatsapp = Some("nope".into());
    assert_eq!(
      c.validate().unwrap_err(),
      Error::validation("Invalid WhatsApp number")
    );

    let mut c = sample();
    c.shipping_info = Some(ShippingInfo {
      shipping_email: Some("not an email".into()),
      ..Default::default()
    });
    assert_eq!(
      c.validate().unwrap_err(),
      Error::validation("Invalid shipping email")
    );
  }

  #[test]
  fn shipping_normalize_trims_and_lowercases() {
    let s = ShippingInfo {
      shipping_first_name: Some("  Luis ".into()),
      shipping_email: Some(" Luis@Example.COM ".into()),
      street: Some("   ".into()),
      ..Default::default()
    }
    .normalize();
    assert_eq!(s.shipping_first_name.as_deref(), Some("Luis"));
    assert_eq!(s.shipping_email.as_deref(), Some("luis@example.com"));
    assert_eq!(s.street, None);
  }

  #[test]
  fn blank_shipping_collapses_to_none() {
    let s = ShippingInfo { state: Some(" ".into()), ..Default::default() };
    assert_eq!(s.normalize().non_empty(), None);
  }

  #[test]
  fn distinct_keeps_first_occurrence() {
    use ProspectInterest::*;
    assert_eq!(
      distinct(vec![Kess3, Curso, Kess3, PowerGate, Curso]),
      vec![Kess3, Curso, PowerGate]
    );
  }
}
