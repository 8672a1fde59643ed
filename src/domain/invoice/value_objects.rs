use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid tax id: {0}")]
  InvalidTaxId(String),
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
}

/// Eleven-digit taxpayer identifier with two trailing modulo-11 check digits.
///
/// The first nine digits are free; digit ten is weighted 10..=2 over the first
/// nine, digit eleven is weighted 11..=2 over the first ten. A remainder below
/// two yields a zero check digit, otherwise `11 - remainder`. Stored without
/// punctuation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxId(String);

impl TaxId {
  pub const LENGTH: usize = 11;
  const BASE_DIGITS: usize = 9;

  /// Draws nine uniform random digits and appends both check digits.
  ///
  /// A draw of nine identical digits is redrawn: its check digits repeat the
  /// same digit and the result would fail validation.
  pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
    let mut digits = [0u8; Self::LENGTH];
    loop {
      for digit in digits.iter_mut().take(Self::BASE_DIGITS) {
        *digit = rng.gen_range(0..=9);
      }
      if digits[1..Self::BASE_DIGITS].iter().any(|&d| d != digits[0]) {
        break;
      }
    }
    digits[9] = Self::check_digit(&digits[..9]);
    digits[10] = Self::check_digit(&digits[..10]);

    Self(digits.iter().map(|d| char::from(b'0' + d)).collect())
  }

  pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
    let value = value.into();
    if !Self::is_valid(&value) {
      return Err(ValueObjectError::InvalidTaxId(value));
    }
    Ok(Self(value))
  }

  pub fn is_valid(value: &str) -> bool {
    if value.len() != Self::LENGTH || !value.bytes().all(|b| b.is_ascii_digit()) {
      return false;
    }

    let digits: Vec<u8> = value.bytes().map(|b| b - b'0').collect();

    // Repeated-digit identifiers satisfy the checksum but are never issued
    if digits.iter().all(|&d| d == digits[0]) {
      return false;
    }

    digits[9] == Self::check_digit(&digits[..9]) && digits[10] == Self::check_digit(&digits[..10])
  }

  // Weights run from len + 1 down to 2
  fn check_digit(digits: &[u8]) -> u8 {
    let top_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
      .iter()
      .enumerate()
      .map(|(i, &d)| u32::from(d) * (top_weight - i as u32))
      .sum();

    match sum % 11 {
      remainder if remainder < 2 => 0,
      remainder => (11 - remainder) as u8,
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl TryFrom<String> for TaxId {
  type Error = ValueObjectError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<TaxId> for String {
  fn from(tax_id: TaxId) -> Self {
    tax_id.0
  }
}

impl fmt::Display for TaxId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
