//! Eager field validation for the checkout workflow.
//!
//! Errors are recomputed on every relevant mutation and represented as
//! data (a [`FormErrors`] map), never as failed results. Each step of
//! the checkout validates only its own fields; the resulting map
//! replaces the previous one wholesale, scoped to whichever step
//! produced it.

use crate::types::{FormErrors, OrderDraft, OrderField};
use regex::Regex;
use std::sync::LazyLock;

// Hardcoded patterns; compilation cannot fail at runtime.
#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hardcoded pattern should always compile")
});

#[allow(clippy::expect_used)]
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+7 \(\d{3}\) \d{3}-\d{2}-\d{2}$")
        .expect("hardcoded pattern should always compile")
});

/// Whether `email` looks like `local@domain.tld`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Whether `phone` matches the fixed `+7 (XXX) XXX-XX-XX` pattern.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Validate the step-1 (delivery) fields of the draft.
///
/// The step-1 gate is satisfied iff the returned map is empty: a
/// payment method is chosen and the address is non-empty.
#[must_use]
pub fn validate_delivery(draft: &OrderDraft) -> FormErrors {
    let mut errors = FormErrors::new();
    if draft.payment.is_none() {
        errors.insert(OrderField::Payment, "Choose a payment method".into());
    }
    if draft.address.is_empty() {
        errors.insert(OrderField::Address, "Fill in the delivery address".into());
    }
    errors
}

/// Validate the step-2 (contacts) fields of the draft.
#[must_use]
pub fn validate_contacts(draft: &OrderDraft) -> FormErrors {
    let mut errors = FormErrors::new();
    if !is_valid_email(&draft.email) {
        errors.insert(OrderField::Email, "Enter a valid email".into());
    }
    if !is_valid_phone(&draft.phone) {
        errors.insert(
            OrderField::Phone,
            "Enter a phone number like +7 (XXX) XXX-XX-XX".into(),
        );
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.io"));
        assert!(!is_valid_email("bad"));
        assert!(!is_valid_email("no at.example.com"));
        assert!(!is_valid_email("user@nodomain"));
        assert!(!is_valid_email("user @example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn phone_shapes() {
        assert!(is_valid_phone("+7 (999) 123-45-67"));
        assert!(!is_valid_phone("+7 999 123-45-67"));
        assert!(!is_valid_phone("+8 (999) 123-45-67"));
        assert!(!is_valid_phone("+7 (99) 123-45-67"));
        assert!(!is_valid_phone("+7 (999) 123-45-678"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn delivery_errors_cover_both_fields() {
        let mut draft = OrderDraft::default();
        let errors = validate_delivery(&draft);
        assert!(errors.contains_key(&OrderField::Payment));
        assert!(errors.contains_key(&OrderField::Address));

        draft.payment = Some(PaymentMethod::Card);
        let errors = validate_delivery(&draft);
        assert!(!errors.contains_key(&OrderField::Payment));
        assert!(errors.contains_key(&OrderField::Address));

        draft.address = "Moscow, 1".into();
        assert!(validate_delivery(&draft).is_empty());
    }

    #[test]
    fn contact_errors_are_per_field() {
        let draft = OrderDraft {
            email: "bad".into(),
            phone: "+7 (999) 123-45-67".into(),
            ..OrderDraft::default()
        };
        let errors = validate_contacts(&draft);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(&OrderField::Email));
    }
}
