//! Closed vocabularies used by the contact entity.
//!
//! Every enum here serialises to and from its human-readable label (e.g.
//! `"02.- Lead"`), which is exactly what clients send and what the store
//! persists. Unknown labels are rejected at deserialisation time with a
//! [`Error::Validation`] message naming the offending value.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

use crate::{Error, Result, stage::OrderedLabel};

/// Wire the strum label mapping into serde via `String`.
macro_rules! label_serde {
  ($ty:ty, |$value:ident| $message:expr) => {
    impl TryFrom<String> for $ty {
      type Error = Error;

      fn try_from($value: String) -> Result<Self> {
        $value.parse().map_err(|_| Error::Validation($message))
      }
    }

    impl From<$ty> for String {
      fn from(value: $ty) -> Self { value.as_ref().to_owned() }
    }

    impl std::fmt::Display for $ty {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
      }
    }
  };
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Commercial status of a contact. Ordered: may only move forward.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  AsRefStr,
  EnumIter,
  EnumString,
  Serialize,
  Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Status {
  #[strum(serialize = "01.- Contact")]
  Contact,
  #[strum(serialize = "02.- Lead")]
  Lead,
  #[strum(serialize = "03.- Customer")]
  Customer,
  #[strum(serialize = "04.- Alientech")]
  Alientech,
  #[strum(serialize = "05.- Distributor")]
  Distributor,
  #[strum(serialize = "06.- Zombie")]
  Zombie,
  #[strum(serialize = "07.- Dead")]
  Dead,
}

label_serde!(Status, |value| format!("{value} is not a valid status"));

impl OrderedLabel for Status {
  const FIELD: &'static str = "status";
}

// ─── Lifecycle stage ─────────────────────────────────────────────────────────

/// Marketing lifecycle stage of a prospect. Ordered: may only move forward.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  AsRefStr,
  EnumIter,
  EnumString,
  Serialize,
  Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum LifecycleStage {
  #[strum(serialize = "01.- Contact")]
  Contact,
  #[strum(serialize = "02.- Lead")]
  Lead,
  #[strum(serialize = "03.- Nurturing")]
  Nurturing,
  #[strum(serialize = "04.- Opportunity")]
  Opportunity,
  #[strum(serialize = "05.- Stalled Opportunity")]
  StalledOpportunity,
  #[strum(serialize = "06.- Customer")]
  Customer,
  #[strum(serialize = "07.- Recurring Customer")]
  RecurringCustomer,
  #[strum(serialize = "08.- Distributor")]
  Distributor,
}

label_serde!(LifecycleStage, |value| format!(
  "{value} is not a valid lifecycle stage"
));

impl OrderedLabel for LifecycleStage {
  const FIELD: &'static str = "lifecycle stage";
}

// ─── Origin ──────────────────────────────────────────────────────────────────

/// The channel a prospect came in through. Unordered.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  AsRefStr,
  EnumIter,
  EnumString,
  Serialize,
  Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Origin {
  WhatsApp,
  Facebook,
  Instagram,
  Email,
  WebPage,
  Alientech,
  Expo,
  Referred,
  #[strum(serialize = "Incoming Call")]
  IncomingCall,
}

label_serde!(Origin, |value| format!("{value} is not a valid origin"));

// ─── Prospect interests ──────────────────────────────────────────────────────

/// A product or service a prospect has asked about.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  AsRefStr,
  EnumIter,
  EnumString,
  Serialize,
  Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum ProspectInterest {
  Kess3,
  #[strum(serialize = "Ecm Titanium")]
  EcmTitanium,
  Curso,
  Accesorios,
  #[strum(serialize = "Protocolos Adicionales")]
  ProtocolosAdicionales,
  #[strum(serialize = "Renovacion Kess3")]
  RenovacionKess3,
  #[strum(serialize = "Renovacion ECM Titanium")]
  RenovacionEcmTitanium,
  #[strum(serialize = "Actualizacion a Master")]
  ActualizacionMaster,
  #[strum(serialize = "Actualizacion a Full ECM Titanium")]
  ActualizacionFullEcmTitanium,
  #[strum(serialize = "Equipo Adicional")]
  EquipoAdicional,
  #[strum(serialize = "Creditos ECM Titanium")]
  CreditosEcmTitanium,
  PowerGate,
  #[strum(serialize = "Creditos PowerGate")]
  CreditosPowerGate,
  #[strum(serialize = "Trade-In")]
  TradeIn,
}

label_serde!(ProspectInterest, |value| format!(
  "Invalid prospect interest(s): {value}"
));
