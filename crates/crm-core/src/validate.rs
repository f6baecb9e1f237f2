//! Stateless field-format checks.

use std::sync::LazyLock;

use regex::{Regex, RegexSet};

use crate::{Error, Result};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
  )
  .expect("email pattern compiles")
});

/// Mobile number shapes for the supported locales.
const MOBILE_PATTERNS: &[&str] = &[
  // es-MX
  r"^(\+?52)?(1|01)?\d{10,11}$",
  // en-US, en-CA
  r"^((\+1|1)?( |-)?)?(\([2-9][0-9]{2}\)|[2-9][0-9]{2})( |-)?([2-9][0-9]{2}( |-)?[0-9]{4})$",
  // es-ES
  r"^(\+?34)?[67]\d{8}$",
  // en-GB
  r"^(\+?44|0)7\d{9}$",
  // pt-BR
  r"^((\+?55 ?[1-9]{2} ?)|(\+?55 ?\([1-9]{2}\) ?)|(0[1-9]{2} ?)|(\([1-9]{2}\) ?)|([1-9]{2} ?))((\d{4}-?\d{4})|(9[1-9]\d{3}-?\d{4}))$",
  // es-CO
  r"^(\+?57)?3(0(0|1|2|4|5)|1\d|2[0-4]|5(0|1))\d{7}$",
  // es-AR
  r"^\+?549(11|[2368]\d)\d{8}$",
  // es-CL
  r"^(\+?56|0)[2-9]\d{8}$",
  // es-PE
  r"^(\+?51)?9\d{8}$",
  // de-DE
  r"^((\+49|0)1)(5[0-25-9]\d|6([23]|0\d?)|7([0-57-9]|6\d))\d{7,9}$",
  // fr-FR
  r"^(\+?33|0)[67]\d{8}$",
  // en-IN
  r"^(\+?91|0)?[6789]\d{9}$",
];

static MOBILE: LazyLock<RegexSet> = LazyLock::new(|| {
  RegexSet::new(MOBILE_PATTERNS).expect("mobile patterns compile")
});

/// Whether `value` is a syntactically valid email address.
pub fn is_email(value: &str) -> bool {
  let Some((local, _)) = value.rsplit_once('@') else {
    return false;
  };
  value.len() <= 254 && local.len() <= 64 && EMAIL.is_match(value)
}

/// Whether `value` is a mobile number in at least one supported locale.
pub fn is_mobile_phone(value: &str) -> bool { MOBILE.is_match(value) }

/// Require a valid email, reporting `message` otherwise.
pub fn check_email(value: &str, message: &str) -> Result<()> {
  if is_email(value) {
    Ok(())
  } else {
    Err(Error::validation(message))
  }
}

/// Validate an optional email; empty and absent values pass.
pub fn check_optional_email(value: Option<&str>, message: &str) -> Result<()> {
  match value {
    Some(v) if !v.is_empty() => check_email(v, message),
    _ => Ok(()),
  }
}

/// Validate an optional phone number; empty and absent values pass.
pub fn check_optional_phone(value: Option<&str>, message: &str) -> Result<()> {
  match value {
    Some(v) if !v.is_empty() && !is_mobile_phone(v) => {
      Err(Error::validation(message))
    }
    _ => Ok(()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_ordinary_emails() {
    for e in [
      "a@example.com",
      "first.last@sub.example.mx",
      "x+tag@example.co.uk",
      "o'brien@example.ie",
    ] {
      assert!(is_email(e), "{e}");
    }
  }

  #[test]
  fn rejects_malformed_emails() {
    for e in [
      "",
      "plainaddress",
      "@example.com",
      "a@",
      "a@example",
      "a..b@example.com",
      "a@-example.com",
      "a b@example.com",
      "a@example.c",
    ] {
      assert!(!is_email(e), "{e}");
    }
  }

  #[test]
  fn rejects_overlong_local_part() {
    let local = "a".repeat(65);
    assert!(!is_email(&format!("{local}@example.com")));
  }

  #[test]
  fn accepts_mobile_numbers_from_several_locales() {
    for p in [
      "5512345678",       // MX, bare
      "+525512345678",    // MX
      "+5215512345678",   // MX, legacy mobile prefix
      "(212) 555-1234",   // US
      "+34612345678",     // ES
      "+447911123456",    // GB
      "+5511912345678",   // BR
      "+573001234567",    // CO
      "+33612345678",     // FR
      "9876543210",       // IN
    ] {
      assert!(is_mobile_phone(p), "{p}");
    }
  }

  #[test]
  fn rejects_non_numbers() {
    for p in ["not-a-number", "123", "phone: 5512345678", "+52 55 1234"] {
      assert!(!is_mobile_phone(p), "{p}");
    }
  }

  #[test]
  fn optional_phone_allows_absent_and_empty() {
    check_optional_phone(None, "Invalid phone number").unwrap();
    check_optional_phone(Some(""), "Invalid phone number").unwrap();
    let err =
      check_optional_phone(Some("not-a-number"), "Invalid phone number")
        .unwrap_err();
    assert_eq!(err, Error::validation("Invalid phone number"));
  }
}
