//! # Validation Module
//!
//! Input-boundary parsing and business rule checks.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  operator text ("50000=12", "25.5", "-3")                              │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  THIS MODULE: parse + reject                                           │
//! │  ├── non-numeric denomination labels                                   │
//! │  ├── negative / fractional counts                                      │
//! │  ├── malformed, negative or oversized amounts                          │
//! │  └── empty required fields                                             │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  typed values (u32 counts, Money) ──► cash / line_items (never fail)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use campo_core::validation::{parse_amount, parse_count};
//!
//! assert_eq!(parse_count("12").unwrap(), 12);
//! assert!(parse_count("-1").is_err());
//! assert!(parse_amount("transfers", "-5").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{BARCODE_LENGTH, MAX_AMOUNT, MAX_DENOMINATION_COUNT, MAX_FACE_VALUE, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Text Validators
// =============================================================================

/// Requires a non-blank value and returns it trimmed.
///
/// ## Example
/// ```rust
/// use campo_core::validation::validate_required;
///
/// assert_eq!(validate_required("employee name", "  Tatiana ").unwrap(), "Tatiana");
/// assert!(validate_required("employee name", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(value.to_string())
}

/// Validates a search query.
///
/// Can be empty (matches everything), at most 100 characters. Returns the
/// trimmed query.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates an email address.
///
/// Empty is accepted (many customers only leave a phone). Otherwise it
/// needs one `@` with a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Ok(());
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !domain.ends_with('.')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ValidationError::invalid_format(
            "email",
            format!("'{email}' is not an email address"),
        ))
    }
}

/// Validates a product barcode: 1-13 ASCII digits.
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::required("barcode"));
    }

    if barcode.len() > BARCODE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: BARCODE_LENGTH,
        });
    }

    if !barcode.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            "barcode",
            "must contain only digits",
        ));
    }

    Ok(())
}

// =============================================================================
// Numeric Parsers
// =============================================================================

fn parse_unsigned(field: &str, text: &str) -> ValidationResult<u64> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::required(field));
    }

    if text.starts_with('-') {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            field,
            format!("'{text}' is not a whole number"),
        ));
    }

    text.parse::<u64>()
        .map_err(|_| ValidationError::invalid_format(field, format!("'{text}' is too large")))
}

/// Parses a denomination face value ("50000"). Must be a positive integer.
pub fn parse_denomination_label(text: &str) -> ValidationResult<u32> {
    let face = parse_unsigned("denomination", text)?;

    if face == 0 || face > u64::from(MAX_FACE_VALUE) {
        return Err(ValidationError::OutOfRange {
            field: "denomination".to_string(),
            min: 1,
            max: i64::from(MAX_FACE_VALUE),
        });
    }

    Ok(face as u32)
}

/// Parses a piece count ("12"). Zero is fine; negatives and fractions are not.
pub fn parse_count(text: &str) -> ValidationResult<u32> {
    let count = parse_unsigned("count", text)?;

    if count > u64::from(MAX_DENOMINATION_COUNT) {
        return Err(ValidationError::OutOfRange {
            field: "count".to_string(),
            min: 0,
            max: i64::from(MAX_DENOMINATION_COUNT),
        });
    }

    Ok(count as u32)
}

/// Parses a line-item quantity. Must be positive.
pub fn parse_quantity(text: &str) -> ValidationResult<u32> {
    let qty = parse_unsigned("quantity", text)?;
    let qty = u32::try_from(qty).unwrap_or(u32::MAX);
    validate_quantity(qty)?;
    Ok(qty)
}

/// Parses a non-negative amount (balances, transfers, stock prices) no
/// larger than [`MAX_AMOUNT`].
pub fn parse_amount(field: &str, text: &str) -> ValidationResult<Money> {
    if text.trim().is_empty() {
        return Err(ValidationError::required(field));
    }

    let amount: Money = text.parse().map_err(|err| match err {
        ValidationError::InvalidFormat { reason, .. } => ValidationError::invalid_format(field, reason),
        other => other,
    })?;
    validate_non_negative(field, amount)?;
    Ok(amount)
}

/// Parses an amount that must be strictly positive (item prices, documents).
pub fn parse_positive_amount(field: &str, text: &str) -> ValidationResult<Money> {
    let amount = parse_amount(field, text)?;
    validate_positive(field, amount)?;
    Ok(amount)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

/// Rejects amounts above [`MAX_AMOUNT`].
pub fn validate_amount_limit(field: &str, amount: Money) -> ValidationResult<()> {
    if amount > MAX_AMOUNT {
        return Err(ValidationError::too_large(field));
    }
    Ok(())
}

pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    validate_amount_limit(field, amount)
}

pub fn validate_positive(field: &str, amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    validate_amount_limit(field, amount)
}

/// `quantity × price` for one line, capped at [`MAX_AMOUNT`].
///
/// ## Example
/// ```rust
/// use campo_core::validation::validate_line_amount;
/// use campo_core::Money;
///
/// assert_eq!(validate_line_amount(2, Money::from_cents(2550)).unwrap(), Money::from_cents(5100));
/// assert!(validate_line_amount(100_000, Money::from_major(1_000_000_000_000)).is_err());
/// ```
pub fn validate_line_amount(quantity: u32, price: Money) -> ValidationResult<Money> {
    price
        .checked_mul_quantity(quantity)
        .filter(|line| *line <= MAX_AMOUNT)
        .ok_or_else(|| ValidationError::too_large("line subtotal"))
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use campo_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::required("id"));
    }

    uuid::Uuid::parse_str(id.trim())
        .map_err(|_| ValidationError::invalid_format("id", "must be a valid UUID"))?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("name", " Urea ").unwrap(), "Urea");
        assert_eq!(
            validate_required("name", ""),
            Err(ValidationError::required("name"))
        );
        assert!(validate_required("name", &"x".repeat(201)).is_err());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("0").unwrap(), 0);
        assert_eq!(parse_count(" 12 ").unwrap(), 12);
        assert!(matches!(
            parse_count("-1"),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
        assert!(matches!(
            parse_count("1.5"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(parse_count("").is_err());
        assert!(parse_count("1000001").is_err());
    }

    #[test]
    fn test_parse_denomination_label() {
        assert_eq!(parse_denomination_label("100000").unwrap(), 100_000);
        assert!(parse_denomination_label("0").is_err());
        assert!(parse_denomination_label("mil").is_err());
        assert!(parse_denomination_label("99999999999999999999999").is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3").unwrap(), 3);
        assert!(parse_quantity("0").is_err());
        assert!(parse_quantity("5000000000").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("transfers", "0").unwrap(), Money::zero());
        assert_eq!(parse_amount("price", "25.5").unwrap(), Money::from_cents(2550));

        let err = parse_amount("transfers", "abc").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "transfers"));

        assert!(matches!(
            parse_amount("transfers", "-5"),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
        assert!(parse_positive_amount("price", "0").is_err());
    }

    #[test]
    fn test_parse_amount_cap() {
        assert_eq!(
            parse_amount("transfers", "10000000000000").unwrap(),
            MAX_AMOUNT
        );
        assert_eq!(
            parse_amount("transfers", "10000000000000.01"),
            Err(ValidationError::too_large("transfers"))
        );
        assert_eq!(
            parse_positive_amount("price", "92233720368547758.07"),
            Err(ValidationError::too_large("price"))
        );
    }

    #[test]
    fn test_validate_line_amount() {
        let at_cap = Money::from_cents(MAX_AMOUNT.cents() / i64::from(MAX_ITEM_QUANTITY));
        assert_eq!(
            validate_line_amount(MAX_ITEM_QUANTITY, at_cap).unwrap(),
            MAX_AMOUNT
        );
        assert!(validate_line_amount(MAX_ITEM_QUANTITY, at_cap + Money::from_cents(1)).is_err());
        assert!(validate_line_amount(MAX_ITEM_QUANTITY, Money::from_cents(i64::MAX)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("").is_ok());
        assert!(validate_email("finca@campo.co").is_ok());
        assert!(validate_email("finca.campo.co").is_err());
        assert!(validate_email("@campo.co").is_err());
        assert!(validate_email("finca@campo").is_err());
        assert!(validate_email("finca@campo.").is_err());
        assert!(validate_email("fin ca@campo.co").is_err());
    }

    #[test]
    fn test_validate_barcode() {
        assert!(validate_barcode("7701234567890").is_ok());
        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("77012345678901").is_err());
        assert!(validate_barcode("77A").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("abc").is_err());
    }
}
