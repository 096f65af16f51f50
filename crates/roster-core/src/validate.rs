//! Contact validation.
//!
//! [`validate`] is the only way to obtain a [`ValidatedContact`], and the
//! store only accepts validated input, so nothing unchecked reaches SQL.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::contact::NewContact;

// Optional `+`, optional country code, optional parenthesised area code, then
// digit groups separated by single spaces, dots or dashes.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^\+?(?:\d{1,3}[ .\-]?)?(?:\(\d{1,4}\)[ .\-]?)?\d+(?:[ .\-]\d+)*$")
    .expect("valid phone regex")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
  )
  .expect("valid email regex")
});

/// E.164 caps numbers at 15 digits; anything under 7 is not dialable.
const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;
const PHONE_MIN_GROUP_DIGITS: usize = 2;

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// A single rule broken by a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldViolation {
  pub field:   &'static str,
  pub message: &'static str,
}

impl fmt::Display for FieldViolation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.field, self.message)
  }
}

/// Every rule the input broke, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid contact: {}", join(.violations))]
pub struct ValidationError {
  pub violations: Vec<FieldViolation>,
}

impl ValidationError {
  pub fn has_field(&self, field: &str) -> bool {
    self.violations.iter().any(|v| v.field == field)
  }
}

fn join(violations: &[FieldViolation]) -> String {
  violations
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}

// ─── Validated input ─────────────────────────────────────────────────────────

/// A contact that passed [`validate`]. Fields are read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedContact {
  name:   String,
  number: String,
  email:  String,
  notes:  Option<String>,
}

impl ValidatedContact {
  pub fn name(&self) -> &str { &self.name }

  pub fn number(&self) -> &str { &self.number }

  pub fn email(&self) -> &str { &self.email }

  pub fn notes(&self) -> Option<&str> { self.notes.as_deref() }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// Check `input` against the contact rules.
///
/// `name`, `number` and `email` are kept exactly as supplied. An empty
/// `notes` string is stored as absent.
pub fn validate(input: &NewContact) -> Result<ValidatedContact, ValidationError> {
  let mut violations = Vec::new();

  if input.name.trim().is_empty() {
    violations.push(FieldViolation { field: "name", message: "should not be empty" });
  }

  if input.number.trim().is_empty() {
    violations.push(FieldViolation { field: "number", message: "should not be empty" });
  } else if !is_phone_number(&input.number) {
    violations.push(FieldViolation {
      field:   "number",
      message: "must be a valid phone number",
    });
  }

  if input.email.trim().is_empty() {
    violations.push(FieldViolation { field: "email", message: "should not be empty" });
  } else if !is_email(&input.email) {
    violations.push(FieldViolation { field: "email", message: "must be an email" });
  }

  if !violations.is_empty() {
    return Err(ValidationError { violations });
  }

  Ok(ValidatedContact {
    name:   input.name.clone(),
    number: input.number.clone(),
    email:  input.email.clone(),
    notes:  input.notes.clone().filter(|n| !n.is_empty()),
  })
}

pub fn is_phone_number(s: &str) -> bool {
  if !PHONE_RE.is_match(s) {
    return false;
  }

  let digits = s.chars().filter(char::is_ascii_digit).count();
  if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) {
    return false;
  }
  if s.chars().filter(char::is_ascii_digit).all(|c| c == '0') {
    return false;
  }
  // Country codes never start with 0.
  if s.strip_prefix('+').is_some_and(|rest| rest.starts_with('0')) {
    return false;
  }

  // The leading (country or trunk) group and a parenthesised area code may be
  // a single digit; every later group needs at least two.
  let spaced = s.trim_start_matches('+').replace('(', " (");
  spaced
    .split([' ', '-', '.', ')'])
    .filter(|g| !g.is_empty())
    .enumerate()
    .all(|(i, g)| i == 0 || g.starts_with('(') || g.len() >= PHONE_MIN_GROUP_DIGITS)
}

pub fn is_email(s: &str) -> bool {
  if s.len() > EMAIL_MAX_LEN || !EMAIL_RE.is_match(s) {
    return false;
  }
  let Some((local, domain)) = s.split_once('@') else {
    return false;
  };
  let tld = domain.rsplit('.').next().unwrap_or_default();
  let tld_ok = tld.starts_with("xn--")
    || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

  tld_ok
    && local.len() <= EMAIL_LOCAL_MAX_LEN
    && !local.starts_with('.')
    && !local.ends_with('.')
    && !local.contains("..")
}
