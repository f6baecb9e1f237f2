//! Ordered stage labels and the progression guard.
//!
//! Ordered labels carry their position as a leading ordinal followed by the
//! `".-"` separator (`"03.- Customer"`). Once a contact holds a stage, it may
//! only move to a label with a strictly greater ordinal.

use crate::{Error, Result};

/// Separator between the ordinal and the display name of a stage label.
pub const SEPARATOR: &str = ".-";

/// Extract the leading ordinal from a stage label.
///
/// Returns `None` when the label has no [`SEPARATOR`] or when the text before
/// it does not start with a decimal number. Leading whitespace is skipped and
/// parsing stops at the first non-digit.
pub fn stage_ordinal(label: &str) -> Option<u32> {
  let (prefix, _) = label.split_once(SEPARATOR)?;
  let prefix = prefix.trim_start();
  let end = prefix
    .find(|c: char| !c.is_ascii_digit())
    .unwrap_or(prefix.len());
  prefix[..end].parse().ok()
}

/// Whether moving from `current` to `proposed` is a permitted progression.
///
/// An unparseable `proposed` label is never permitted. An absent or
/// unparseable `current` label permits any parseable proposal.
pub fn is_forward(current: Option<&str>, proposed: &str) -> bool {
  let Some(next) = stage_ordinal(proposed) else {
    return false;
  };
  match current.and_then(stage_ordinal) {
    Some(now) => next > now,
    None => true,
  }
}

/// A label from an ordered vocabulary.
pub trait OrderedLabel: AsRef<str> + PartialEq {
  /// Human-readable field name used in progression errors.
  const FIELD: &'static str;

  fn ordinal(&self) -> Option<u32> { stage_ordinal(self.as_ref()) }
}

/// Reject a change of an ordered field that does not move it forward.
///
/// Unchanged values are always accepted; the guard only judges changes.
pub fn check_progression<L: OrderedLabel>(
  current: Option<&L>,
  proposed: &L,
) -> Result<()> {
  if current == Some(proposed) {
    return Ok(());
  }
  if is_forward(current.map(|c| c.as_ref()), proposed.as_ref()) {
    Ok(())
  } else {
    Err(Error::Progression(format!(
      "Cannot revert {} to a previous stage",
      L::FIELD
    )))
  }
}
