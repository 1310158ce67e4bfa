//! Field constraints for persons and addresses, checked before anything is persisted.

use crate::error::{AppError, FieldErrors};
use crate::model::{Address, Person};
use regex::Regex;
use std::sync::LazyLock;

static TEN_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("static pattern"));
static FIVE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}$").expect("static pattern"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)*$").expect("static pattern")
});

enum Format {
    Email,
}

/// Constraint set for one field. Absent optional values skip every check.
struct FieldRule {
    field: &'static str,
    not_blank: bool,
    max_length: Option<usize>,
    pattern: Option<(&'static LazyLock<Regex>, &'static str)>,
    format: Option<Format>,
}

impl FieldRule {
    fn new(field: &'static str) -> Self {
        Self {
            field,
            not_blank: false,
            max_length: None,
            pattern: None,
            format: None,
        }
    }

    fn not_blank(mut self) -> Self {
        self.not_blank = true;
        self
    }

    fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

pub struct PersonValidator;

impl PersonValidator {
    /// Validate every constraint of the person and its address.
    /// All violations are reported together.
    pub fn validate(person: &Person) -> Result<(), AppError> {
        let errors = Self::violations(person);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }

    pub fn violations(person: &Person) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validate_field(
            &mut errors,
            "",
            Some(person.name.as_str()),
            &FieldRule::new("name").not_blank().max_length(50),
        );
        validate_field(
            &mut errors,
            "",
            person.phone_number.as_deref(),
            &FieldRule {
                pattern: Some((&TEN_DIGITS, "must contain exactly 10 digits")),
                ..FieldRule::new("phoneNumber")
            },
        );
        validate_field(
            &mut errors,
            "",
            Some(person.email_address.as_str()),
            &FieldRule {
                format: Some(Format::Email),
                ..FieldRule::new("emailAddress").not_blank()
            },
        );
        if let Some(address) = &person.address {
            validate_address(&mut errors, address);
        }
        errors
    }
}

fn validate_address(errors: &mut FieldErrors, address: &Address) {
    const PREFIX: &str = "address.";
    validate_field(
        errors,
        PREFIX,
        Some(address.street.as_str()),
        &FieldRule::new("street").not_blank().max_length(100),
    );
    validate_field(
        errors,
        PREFIX,
        Some(address.city.as_str()),
        &FieldRule::new("city").not_blank().max_length(50),
    );
    validate_field(
        errors,
        PREFIX,
        Some(address.state.as_str()),
        &FieldRule::new("state").not_blank().max_length(50),
    );
    validate_field(
        errors,
        PREFIX,
        address.postal_code.as_deref(),
        &FieldRule {
            pattern: Some((&FIVE_DIGITS, "must contain exactly 5 digits")),
            ..FieldRule::new("postalCode")
        },
    );
    validate_field(
        errors,
        PREFIX,
        Some(address.country.as_str()),
        &FieldRule::new("country").not_blank(),
    );
}

fn validate_field(errors: &mut FieldErrors, prefix: &str, value: Option<&str>, rule: &FieldRule) {
    let Some(v) = value else {
        return;
    };
    let path = format!("{}{}", prefix, rule.field);
    if rule.not_blank && v.trim().is_empty() {
        errors.add(path, "must not be blank");
        return;
    }
    if let Some(max) = rule.max_length {
        if v.chars().count() > max {
            errors.add(path, format!("must be at most {} characters", max));
            return;
        }
    }
    if let Some((re, message)) = rule.pattern {
        if !re.is_match(v) {
            errors.add(path, message);
            return;
        }
    }
    if let Some(Format::Email) = rule.format {
        if !EMAIL.is_match(v) {
            errors.add(path, "must be a valid email address");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_person() -> Person {
        Person {
            id: None,
            name: "Grace Hopper".into(),
            phone_number: Some("5551234567".into()),
            email_address: "grace@example.com".into(),
            address: Some(Address {
                id: None,
                street: "1 Navy Yard".into(),
                city: "Arlington".into(),
                state: "VA".into(),
                postal_code: Some("22202".into()),
                country: "US".into(),
            }),
        }
    }

    #[test]
    fn accepts_valid_person() {
        assert!(PersonValidator::validate(&valid_person()).is_ok());
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let mut person = valid_person();
        person.phone_number = None;
        person.address = None;
        assert!(PersonValidator::validate(&person).is_ok());
    }

    #[test]
    fn nine_digit_phone_is_rejected() {
        let mut person = valid_person();
        person.phone_number = Some("555123456".into());
        let errors = PersonValidator::violations(&person);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("phoneNumber"), Some("must contain exactly 10 digits"));
    }

    #[test]
    fn blank_and_oversized_fields_are_reported_together() {
        let mut person = valid_person();
        person.name = "x".repeat(51);
        person.email_address = "   ".into();
        let errors = PersonValidator::violations(&person);
        assert_eq!(errors.get("name"), Some("must be at most 50 characters"));
        assert_eq!(errors.get("emailAddress"), Some("must not be blank"));
    }

    #[test]
    fn name_length_counts_characters() {
        let mut person = valid_person();
        person.name = "é".repeat(50);
        assert!(PersonValidator::validate(&person).is_ok());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let emails = [
            "grace",
            "grace@",
            "@example.com",
            "grace@@example.com",
            "grace@example..com",
        ];
        for email in emails {
            let mut person = valid_person();
            person.email_address = email.into();
            let errors = PersonValidator::violations(&person);
            assert_eq!(
                errors.get("emailAddress"),
                Some("must be a valid email address"),
                "{email}"
            );
        }
    }

    #[test]
    fn nested_address_fields_use_dotted_paths() {
        let mut person = valid_person();
        if let Some(address) = person.address.as_mut() {
            address.street = String::new();
            address.postal_code = Some("2220".into());
            address.country = String::new();
        }
        let errors = PersonValidator::violations(&person);
        assert!(errors.contains("address.street"));
        assert!(errors.contains("address.country"));
        assert_eq!(errors.get("address.postalCode"), Some("must contain exactly 5 digits"));
        assert!(!errors.contains("address.city"));
    }
}
