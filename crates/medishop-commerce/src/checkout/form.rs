//! Checkout form and its validation.

use crate::cart::{select_requires_prescription, CartState};
use crate::checkout::{CheckoutError, PaymentMethod, ShippingDetails, ValidationError};
use serde::{Deserialize, Serialize};

/// The signed-in customer placing the order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub email: Option<String>,
}

impl Customer {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
        }
    }

    /// A customer with no session.
    pub fn anonymous() -> Self {
        Self { email: None }
    }

    /// The email, when present and not blank.
    pub fn signed_in_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

/// An image of the customer's prescription, ready for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct PrescriptionFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PrescriptionFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Guess the image content type from the file extension.
    pub fn content_type_for(file_name: &str) -> &'static str {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "pdf" => "application/pdf",
            _ => "application/octet-stream",
        }
    }
}

impl std::fmt::Debug for PrescriptionFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrescriptionFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Everything the customer fills in on the checkout page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub shipping: ShippingDetails,
    pub payment_method: PaymentMethod,
    pub prescription: Option<PrescriptionFile>,
}

impl CheckoutForm {
    pub fn new(shipping: ShippingDetails, payment_method: PaymentMethod) -> Self {
        Self {
            shipping,
            payment_method,
            prescription: None,
        }
    }

    pub fn with_prescription(mut self, file: PrescriptionFile) -> Self {
        self.prescription = Some(file);
        self
    }
}

/// Form that passed validation, with shipping fields trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedForm<'a> {
    pub email: &'a str,
    pub shipping: ShippingDetails,
    pub payment_method: PaymentMethod,
    pub prescription: Option<&'a PrescriptionFile>,
}

/// Check the cart and form before anything is sent.
///
/// Order of checks: empty cart, sign-in, shipping fields, prescription.
pub fn validate<'a>(
    cart: &CartState,
    customer: &'a Customer,
    form: &'a CheckoutForm,
) -> Result<ValidatedForm<'a>, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let email = customer
        .signed_in_email()
        .ok_or(ValidationError::NotSignedIn)?;

    let shipping = form.shipping.trimmed();
    if !shipping.is_complete() {
        return Err(ValidationError::MissingShippingDetails(shipping.missing_fields()).into());
    }

    if select_requires_prescription(cart) && form.prescription.is_none() {
        return Err(ValidationError::PrescriptionRequired.into());
    }

    Ok(ValidatedForm {
        email,
        shipping,
        payment_method: form.payment_method,
        prescription: form.prescription.as_ref(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartLineItem, CartStore};
    use crate::money::Money;

    fn form() -> CheckoutForm {
        CheckoutForm::new(
            ShippingDetails::new("Rahim", "12 Lake Road", "017"),
            PaymentMethod::CashOnDelivery,
        )
    }

    fn cart(prescription: bool) -> CartStore {
        let mut store = CartStore::new();
        store
            .add_item(
                CartLineItem::new("B", "Seclo", Money::from_cents(550), 3)
                    .with_prescription(prescription),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_empty_cart_checked_first() {
        let err = validate(CartStore::new().state(), &Customer::anonymous(), &CheckoutForm::default())
            .unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn test_sign_in_required() {
        let customer = Customer::new("   ");
        let err = validate(cart(false).state(), &customer, &form()).unwrap_err();
        assert_eq!(err, CheckoutError::Validation(ValidationError::NotSignedIn));
        assert_eq!(err.to_string(), "Please log in to place an order");
    }

    #[test]
    fn test_blank_shipping_rejected() {
        let mut form = form();
        form.shipping.address = "  ".to_string();
        let err = validate(cart(false).state(), &Customer::new("a@b.c"), &form).unwrap_err();
        assert_eq!(err.to_string(), "Please fill all shipping details");
    }

    #[test]
    fn test_prescription_required() {
        let err = validate(cart(true).state(), &Customer::new("a@b.c"), &form()).unwrap_err();
        assert_eq!(err, CheckoutError::Validation(ValidationError::PrescriptionRequired));
        assert_eq!(err.to_string(), "Prescription is required");

        let form = form().with_prescription(PrescriptionFile::new("rx.png", "image/png", vec![1]));
        assert!(validate(cart(true).state(), &Customer::new("a@b.c"), &form).is_ok());
    }

    #[test]
    fn test_valid_form_is_trimmed() {
        let mut form = form();
        form.shipping.name = "  Rahim ".to_string();
        let customer = Customer::new(" a@b.c ");
        let valid = validate(cart(false).state(), &customer, &form).unwrap();
        assert_eq!(valid.shipping.name, "Rahim");
        assert_eq!(valid.email, "a@b.c");
        assert!(valid.prescription.is_none());
    }

    #[test]
    fn test_content_type_guess() {
        assert_eq!(PrescriptionFile::content_type_for("scan.JPG"), "image/jpeg");
        assert_eq!(PrescriptionFile::content_type_for("rx.png"), "image/png");
        assert_eq!(PrescriptionFile::content_type_for("noext"), "application/octet-stream");
    }
}
