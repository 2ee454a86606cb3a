//! Field checks applied to a payment initiation before it is signed.  Every failure is an
//! `Error::Invalid` naming the offending field.

use crate::{Error, Result};

/// The only currency the payment initiation API accepts.
pub const CURRENCY_EUR: &str = "EUR";
pub const DESCRIPTION_MAX_CHARS: usize = 140;
pub const URL_MAX_LEN: usize = 1024;

lazy_static::lazy_static! {
    static ref AMOUNT_REGEX: regex::Regex =
        regex::Regex::new(r"^([0-9]+)(?:\.([0-9]{1,2}))?$").expect("valid amount regex");
}

/// Checks that the amount is a positive decimal with at most two fraction digits, and returns it
/// normalized to exactly two fraction digits, e.g. "7.5" becomes "7.50" and "007" becomes "7.00".
pub fn normalize_amount(amount: &str) -> Result<String> {
    let captures = AMOUNT_REGEX.captures(amount).ok_or_else(|| {
        Error::Invalid(
            format!(
                "amount {:?} must be a decimal number with at most 2 fraction digits",
                amount
            )
            .into(),
        )
    })?;
    let integer_part = captures
        .get(1)
        .map(|m| m.as_str().trim_start_matches('0'))
        .unwrap_or("");
    let fraction_part = captures.get(2).map(|m| m.as_str()).unwrap_or("");
    if integer_part.chars().chain(fraction_part.chars()).all(|c| c == '0') {
        return Err(Error::Invalid(
            format!("amount {:?} must be greater than zero", amount).into(),
        ));
    }
    let integer_part = if integer_part.is_empty() {
        "0"
    } else {
        integer_part
    };
    Ok(format!("{}.{:0<2}", integer_part, fraction_part))
}

pub fn validate_currency(currency: &str) -> Result<()> {
    if currency != CURRENCY_EUR {
        return Err(Error::Invalid(
            format!("currency {:?} is not supported; only EUR is", currency).into(),
        ));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<()> {
    let char_count = description.chars().count();
    if char_count == 0 || char_count > DESCRIPTION_MAX_CHARS {
        return Err(Error::Invalid(
            format!(
                "description must be 1 to {} characters long, but was {}",
                DESCRIPTION_MAX_CHARS, char_count
            )
            .into(),
        ));
    }
    Ok(())
}

/// Checks that the named URL field is an absolute http(s) URL no longer than URL_MAX_LEN.
pub fn validate_url(field_name: &'static str, url_str: &str) -> Result<()> {
    if url_str.len() > URL_MAX_LEN {
        return Err(Error::Invalid(
            format!(
                "{} must be at most {} characters long, but was {}",
                field_name,
                URL_MAX_LEN,
                url_str.len()
            )
            .into(),
        ));
    }
    let url = url::Url::parse(url_str).map_err(|e| {
        Error::Invalid(format!("{} {:?} is not an absolute URL: {}", field_name, url_str, e).into())
    })?;
    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(Error::Invalid(
            format!("{} {:?} must use http or https", field_name, url_str).into(),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(Error::Invalid(
            format!("{} {:?} has no host", field_name, url_str).into(),
        ));
    }
    Ok(())
}

/// Computes the 7-3-1 check digit of the given digits, as used by Estonian creditor references.
/// Weights 7, 3, 1 repeat starting from the rightmost digit.
pub fn reference_check_digit(base_digits: &str) -> Result<u8> {
    let mut sum = 0u32;
    for (i, c) in base_digits.chars().rev().enumerate() {
        let digit = c.to_digit(10).ok_or_else(|| {
            Error::Invalid(format!("reference {:?} must only contain digits", base_digits).into())
        })?;
        sum += digit * [7, 3, 1][i % 3];
    }
    Ok(((10 - sum % 10) % 10) as u8)
}

/// Checks a structured creditor reference: 2 to 20 digits, the last of which is the 7-3-1 check
/// digit of the rest.
pub fn validate_reference(reference: &str) -> Result<()> {
    if reference.len() < 2 || reference.len() > 20 || !reference.chars().all(|c| c.is_ascii_digit())
    {
        return Err(Error::Invalid(
            format!("reference {:?} must be 2 to 20 digits", reference).into(),
        ));
    }
    let (base_digits, check_digit) = reference.split_at(reference.len() - 1);
    let expected_check_digit = reference_check_digit(base_digits)?;
    if check_digit != expected_check_digit.to_string() {
        return Err(Error::Invalid(
            format!(
                "reference {:?} has check digit {} but should have {}",
                reference, check_digit, expected_check_digit
            )
            .into(),
        ));
    }
    Ok(())
}

pub fn validate_ip_address(ip_address: &str) -> Result<()> {
    ip_address.parse::<std::net::IpAddr>().map_err(|e| {
        Error::Invalid(format!("ipAddress {:?} is not an IP address: {}", ip_address, e).into())
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_amount() {
        assert_eq!(normalize_amount("10").expect("pass"), "10.00");
        assert_eq!(normalize_amount("10.5").expect("pass"), "10.50");
        assert_eq!(normalize_amount("10.05").expect("pass"), "10.05");
        assert_eq!(normalize_amount("0.01").expect("pass"), "0.01");
        assert_eq!(normalize_amount("007.1").expect("pass"), "7.10");
        for amount in [
            "", "0", "0.00", "00.0", "-1", "1.", ".5", "1.005", "1,00", "1e3", " 1", "1 ",
        ] {
            normalize_amount(amount).expect_err(amount);
        }
    }

    #[test]
    fn test_reference_check_digit() {
        assert_eq!(reference_check_digit("123456").expect("pass"), 1);
        validate_reference("1234561").expect("pass");
        validate_reference("1234562").expect_err("pass");
        // "1" has check digit (10 - 7) % 10 = 3.
        validate_reference("13").expect("pass");
        validate_reference("3").expect_err("pass");
        validate_reference("123456789012345678901").expect_err("pass");
        validate_reference("12a4561").expect_err("pass");
    }

    #[test]
    fn test_validate_url() {
        validate_url("redirectUrl", "https://merchant.example/return?order=1").expect("pass");
        validate_url("redirectUrl", "http://localhost:8080/cb").expect("pass");
        validate_url("redirectUrl", "/relative").expect_err("pass");
        validate_url("redirectUrl", "ftp://merchant.example/").expect_err("pass");
        validate_url("redirectUrl", "mailto:someone@example.com").expect_err("pass");
        let long_url = format!("https://merchant.example/{}", "a".repeat(URL_MAX_LEN));
        validate_url("redirectUrl", &long_url).expect_err("pass");
    }

    #[test]
    fn test_validate_description() {
        validate_description("Invoice 1").expect("pass");
        validate_description(&"õ".repeat(DESCRIPTION_MAX_CHARS)).expect("pass");
        validate_description(&"õ".repeat(DESCRIPTION_MAX_CHARS + 1)).expect_err("pass");
        validate_description("").expect_err("pass");
    }
}
