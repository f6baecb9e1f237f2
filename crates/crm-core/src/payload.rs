//! Request payloads for creating and partially updating contacts.
//!
//! Both types accept the camelCase JSON shape clients send. Server-owned
//! fields (`id`, `createdAt`, `updatedAt`, `prospectCreatedAt`) are not part
//! of either payload, so values supplied for them are ignored.
//!
//! In a [`ContactPatch`], a field that is absent is left unchanged. For
//! optional fields, an explicit `null` clears the stored value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::{
  Error, Result,
  contact::{Contact, ProspectingInfo, ShippingInfo, distinct, tidy},
  label::{LifecycleStage, Origin, ProspectInterest, Status},
  stage::check_progression,
  validate::{check_email, check_optional_email, check_optional_phone},
};

/// Distinguish an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(de).map(Some)
}

fn tidy_patch(value: Option<Option<String>>) -> Option<Option<String>> {
  value.map(tidy)
}

fn normalize_email(email: &str) -> String { email.trim().to_lowercase() }

// ─── NewContact ──────────────────────────────────────────────────────────────

/// Prospecting details supplied at creation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProspectingInfo {
  pub origin:             Option<Origin>,
  pub lifecycle_stage:    Option<LifecycleStage>,
  #[serde(default)]
  pub prospect_interests: Vec<ProspectInterest>,
}

/// Input to [`crate::store::ContactStore::create_contact`].
///
/// Required fields are optional here so that a missing one is reported as a
/// validation error naming the field rather than as a decoding failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
  pub first_name:       Option<String>,
  pub last_name:        Option<String>,
  pub email:            Option<String>,
  pub phone:            Option<String>,
  pub whatsapp:         Option<String>,
  pub status:           Option<Status>,
  pub prospecting_info: Option<NewProspectingInfo>,
  pub shipping_info:    Option<ShippingInfo>,
}

impl NewContact {
  /// Convenience constructor with only the required fields set.
  pub fn new(
    first_name: impl Into<String>,
    email: impl Into<String>,
    status: Status,
  ) -> Self {
    Self {
      first_name: Some(first_name.into()),
      email: Some(email.into()),
      status: Some(status),
      ..Default::default()
    }
  }

  /// Trim strings, drop blank optional fields, lowercase emails.
  pub fn normalize(self) -> Self {
    Self {
      first_name:       self.first_name.map(|n| n.trim().to_owned()),
      last_name:        tidy(self.last_name),
      email:            self.email.as_deref().map(normalize_email),
      phone:            tidy(self.phone),
      whatsapp:         tidy(self.whatsapp),
      status:           self.status,
      prospecting_info: self.prospecting_info,
      shipping_info:    self
        .shipping_info
        .map(ShippingInfo::normalize)
        .and_then(ShippingInfo::non_empty),
    }
  }

  /// Check required fields and formats. Expects normalised input.
  pub fn validate(&self) -> Result<()> {
    if self.first_name.as_deref().is_none_or(str::is_empty) {
      return Err(Error::validation("First name is required"));
    }
    let email = match self.email.as_deref() {
      Some(e) if !e.is_empty() => e,
      _ => return Err(Error::validation("Email is required")),
    };
    check_email(email, "Invalid email format")?;
    if self.status.is_none() {
      return Err(Error::validation("Status is required"));
    }
    check_optional_phone(self.phone.as_deref(), "Invalid phone number")?;
    check_optional_phone(self.whatsapp.as_deref(), "Invalid WhatsApp number")?;
    if let Some(shipping) = &self.shipping_info {
      shipping.validate()?;
    }
    Ok(())
  }

  /// Normalise, validate and build the record to persist.
  pub fn into_contact(self, id: Uuid, now: DateTime<Utc>) -> Result<Contact> {
    let input = self.normalize();
    input.validate()?;

    let (Some(first_name), Some(email), Some(status)) =
      (input.first_name, input.email, input.status)
    else {
      return Err(Error::validation("First name, email and status are required"));
    };

    let prospecting_info = input.prospecting_info.map(|p| ProspectingInfo {
      origin:              p.origin,
      lifecycle_stage:     p.lifecycle_stage,
      prospect_interests:  distinct(p.prospect_interests),
      prospect_created_at: now,
    });

    Ok(Contact {
      id,
      first_name,
      last_name: input.last_name,
      email,
      phone: input.phone,
      whatsapp: input.whatsapp,
      status,
      prospecting_info,
      shipping_info: input.shipping_info,
      created_at: now,
      updated_at: now,
    })
  }
}

// ─── ContactPatch ────────────────────────────────────────────────────────────

/// Partial update of [`ProspectingInfo`].
///
/// The lifecycle stage cannot be cleared, only advanced.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProspectingInfoPatch {
  #[serde(default, deserialize_with = "double_option")]
  pub origin:             Option<Option<Origin>>,
  pub lifecycle_stage:    Option<LifecycleStage>,
  pub prospect_interests: Option<Vec<ProspectInterest>>,
}

impl ProspectingInfoPatch {
  fn apply(
    self,
    current: Option<&ProspectingInfo>,
    now: DateTime<Utc>,
  ) -> Result<ProspectingInfo> {
    let mut next = current
      .cloned()
      .unwrap_or_else(|| ProspectingInfo::new(now));

    if let Some(origin) = self.origin {
      next.origin = origin;
    }
    if let Some(stage) = self.lifecycle_stage {
      check_progression(
        current.and_then(|p| p.lifecycle_stage.as_ref()),
        &stage,
      )?;
      next.lifecycle_stage = Some(stage);
    }
    if let Some(interests) = self.prospect_interests {
      next.prospect_interests = distinct(interests);
    }
    Ok(next)
  }
}

/// Partial update of [`ShippingInfo`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfoPatch {
  #[serde(default, deserialize_with = "double_option")]
  pub shipping_first_name: Option<Option<String>>,
  #[serde(default, deserialize_with = "double_option")]
  pub shipping_last_name:  Option<Option<String>>,
  #[serde(default, deserialize_with = "double_option")]
  pub shipping_email:      Option<Option<String>>,
  #[serde(default, deserialize_with = "double_option")]
  pub shipping_phone:      Option<Option<String>>,
  #[serde(default, deserialize_with = "double_option")]
  pub street:              Option<Option<String>>,
  #[serde(default, deserialize_with = "double_option")]
  pub neighborhood:        Option<Option<String>>,
  #[serde(default, deserialize_with = "double_option")]
  pub municipality:        Option<Option<String>>,
  #[serde(default, deserialize_with = "double_option")]
  pub state:               Option<Option<String>>,
  #[serde(default, deserialize_with = "double_option")]
  pub postal_code:         Option<Option<String>>,
}

impl ShippingInfoPatch {
  fn normalize(self) -> Self {
    Self {
      shipping_first_name: tidy_patch(self.shipping_first_name),
      shipping_last_name:  tidy_patch(self.shipping_last_name),
      shipping_email:      tidy_patch(self.shipping_email)
        .map(|e| e.map(|e| e.to_lowercase())),
      shipping_phone:      tidy_patch(self.shipping_phone),
      street:              tidy_patch(self.street),
      neighborhood:        tidy_patch(self.neighborhood),
      municipality:        tidy_patch(self.municipality),
      state:               tidy_patch(self.state),
      postal_code:         tidy_patch(self.postal_code),
    }
  }

  fn validate(&self) -> Result<()> {
    check_optional_email(
      self.shipping_email.as_ref().and_then(Option::as_deref),
      "Invalid shipping email",
    )?;
    check_optional_phone(
      self.shipping_phone.as_ref().and_then(Option::as_deref),
      "Invalid shipping phone",
    )
  }

  fn apply(self, current: Option<&ShippingInfo>) -> Option<ShippingInfo> {
    let mut next = current.cloned().unwrap_or_default();
    let fields = [
      (&mut next.shipping_first_name, self.shipping_first_name),
      (&mut next.shipping_last_name, self.shipping_last_name),
      (&mut next.shipping_email, self.shipping_email),
      (&mut next.shipping_phone, self.shipping_phone),
      (&mut next.street, self.street),
      (&mut next.neighborhood, self.neighborhood),
      (&mut next.municipality, self.municipality),
      (&mut next.state, self.state),
      (&mut next.postal_code, self.postal_code),
    ];
    for (slot, value) in fields {
      if let Some(value) = value {
        *slot = value;
      }
    }
    next.non_empty()
  }
}

/// Input to [`crate::store::ContactStore::update_contact`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
  pub first_name:       Option<String>,
  #[serde(default, deserialize_with = "double_option")]
  pub last_name:        Option<Option<String>>,
  pub email:            Option<String>,
  #[serde(default, deserialize_with = "double_option")]
  pub phone:            Option<Option<String>>,
  #[serde(default, deserialize_with = "double_option")]
  pub whatsapp:         Option<Option<String>>,
  pub status:           Option<Status>,
  pub prospecting_info: Option<ProspectingInfoPatch>,
  #[serde(default, deserialize_with = "double_option")]
  pub shipping_info:    Option<Option<ShippingInfoPatch>>,
}

impl ContactPatch {
  /// A patch that only moves the status.
  pub fn status(status: Status) -> Self {
    Self { status: Some(status), ..Default::default() }
  }

  /// A patch that only moves the lifecycle stage.
  pub fn lifecycle_stage(stage: LifecycleStage) -> Self {
    Self {
      prospecting_info: Some(ProspectingInfoPatch {
        lifecycle_stage: Some(stage),
        ..Default::default()
      }),
      ..Default::default()
    }
  }

  /// Trim strings, turn blank optional values into clears, lowercase emails.
  pub fn normalize(self) -> Self {
    Self {
      first_name:       self.first_name.map(|n| n.trim().to_owned()),
      last_name:        tidy_patch(self.last_name),
      email:            self.email.as_deref().map(normalize_email),
      phone:            tidy_patch(self.phone),
      whatsapp:         tidy_patch(self.whatsapp),
      status:           self.status,
      prospecting_info: self.prospecting_info,
      shipping_info:    self
        .shipping_info
        .map(|s| s.map(ShippingInfoPatch::normalize)),
    }
  }

  /// Check the formats of the fields this patch touches. Expects normalised
  /// input.
  pub fn validate(&self) -> Result<()> {
    if self.first_name.as_deref() == Some("") {
      return Err(Error::validation("First name is required"));
    }
    if let Some(email) = self.email.as_deref() {
      if email.is_empty() {
        return Err(Error::validation("Email is required"));
      }
      check_email(email, "Invalid email format")?;
    }
    check_optional_phone(
      self.phone.as_ref().and_then(Option::as_deref),
      "Invalid phone number",
    )?;
    check_optional_phone(
      self.whatsapp.as_ref().and_then(Option::as_deref),
      "Invalid WhatsApp number",
    )?;
    if let Some(Some(shipping)) = &self.shipping_info {
      shipping.validate()?;
    }
    Ok(())
  }

  /// Produce the updated record, or reject the whole patch.
  ///
  /// Runs the progression guard on `status` and
  /// `prospectingInfo.lifecycleStage` whenever they are supplied; nothing of
  /// `current` is modified on failure.
  pub fn apply(self, current: &Contact, now: DateTime<Utc>) -> Result<Contact> {
    let patch = self.normalize();
    patch.validate()?;

    let mut next = current.clone();

    if let Some(first_name) = patch.first_name {
      next.first_name = first_name;
    }
    if let Some(last_name) = patch.last_name {
      next.last_name = last_name;
    }
    if let Some(email) = patch.email {
      next.email = email;
    }
    if let Some(phone) = patch.phone {
      next.phone = phone;
    }
    if let Some(whatsapp) = patch.whatsapp {
      next.whatsapp = whatsapp;
    }
    if let Some(status) = patch.status {
      check_progression(Some(&current.status), &status)?;
      next.status = status;
    }
    if let Some(prospecting) = patch.prospecting_info {
      next.prospecting_info =
        Some(prospecting.apply(current.prospecting_info.as_ref(), now)?);
    }
    if let Some(shipping) = patch.shipping_info {
      next.shipping_info =
        shipping.and_then(|s| s.apply(current.shipping_info.as_ref()));
    }

    next.updated_at = now;
    next.validate()?;
    Ok(next)
  }
}
