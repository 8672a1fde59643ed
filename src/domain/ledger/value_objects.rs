use rust_decimal::Decimal;

/// Renders an amount in minor units (cents) as a two-decimal currency string.
pub fn format_minor_units(amount: i64) -> String {
  Decimal::new(amount, 2).to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_minor_units() {
    assert_eq!(format_minor_units(12345), "123.45");
    assert_eq!(format_minor_units(10000), "100.00");
    assert_eq!(format_minor_units(5), "0.05");
    assert_eq!(format_minor_units(-250), "-2.50");
  }
}
