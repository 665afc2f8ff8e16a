//! Checkout state: the two-step order draft workflow and submission.
//!
//! # Workflow
//!
//! ```text
//! Empty ──set_payment/set_address──► Delivery ──(step-1 gate)──┐
//!                                                             ▼
//!            ┌──────────────────────────────────────────► Contacts
//!            │                                                │
//!            │ failure (draft preserved)        (step-2 gate) │
//!            │                                                ▼
//!            └───────────────────────────────────────── Submitting
//!                                                             │
//!                                             success         ▼
//!                                          Empty ◄─── draft cleared
//! ```
//!
//! The phase only ever advances while the draft is being filled in; a
//! failed submission drops back to `Contacts` so the user can retry
//! without re-entering data. Step validity ("may proceed") is derived
//! from the draft via [`CheckoutState::is_payment_valid`] and
//! [`CheckoutState::is_contacts_valid`] rather than stored.
//!
//! Validation is eager: every field mutation revalidates the owning
//! step and publishes `formErrors:changed`, so a "proceed" control can
//! stay continuously enabled/disabled without an explicit validate
//! call.

use std::sync::Arc;
use storefront_core::bus::EventBus;
use storefront_core::events::AppEvent;
use storefront_core::model::Model;
use storefront_core::transport::{Transport, TransportError};
use storefront_core::types::{FormErrors, OrderDraft, OrderPayload, OrderReceipt, PaymentMethod};
use storefront_core::validation;
use thiserror::Error;

/// Path the order payload is posted to.
const ORDER_PATH: &str = "/order";

/// Progress through the checkout workflow, monotonic until the draft
/// is cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckoutPhase {
    /// No draft in progress.
    #[default]
    Empty,
    /// Step 1: payment method and address being entered.
    Delivery,
    /// Step 2: contact details being entered (also the retry state
    /// after a failed submission).
    Contacts,
    /// A submission is in flight; all mutation is refused.
    Submitting,
}

/// Why an order submission was refused or failed.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The step-1 gate is unsatisfied (payment unset or address
    /// empty).
    #[error("delivery details are incomplete")]
    DeliveryIncomplete,

    /// The step-2 gate is unsatisfied (email or phone malformed).
    #[error("contact details are incomplete")]
    ContactsIncomplete,

    /// A previous submission has not resolved yet.
    #[error("an order submission is already in flight")]
    AlreadySubmitting,

    /// The transport collaborator rejected the submission.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Payload of [`CheckoutState`].
#[derive(Clone, Debug, Default)]
pub struct CheckoutData {
    /// The in-progress order draft.
    pub draft: OrderDraft,
    /// Validation errors for the step validated last.
    pub errors: FormErrors,
    /// Workflow progress.
    pub phase: CheckoutPhase,
}

/// Owns the order draft and orchestrates the two-step checkout
/// workflow and the final submission call.
pub struct CheckoutState {
    model: Model<CheckoutData, AppEvent>,
    transport: Arc<dyn Transport>,
}

impl CheckoutState {
    /// Create a checkout with an empty draft, publishing on `bus` and
    /// submitting through `transport`.
    #[must_use]
    pub fn new(bus: Arc<EventBus<AppEvent>>, transport: Arc<dyn Transport>) -> Self {
        Self {
            model: Model::new(CheckoutData::default(), bus),
            transport,
        }
    }

    /// The current draft; empty again after a successful submission or
    /// an explicit [`CheckoutState::clear_order`].
    #[must_use]
    pub const fn draft(&self) -> &OrderDraft {
        &self.model.data().draft
    }

    /// Validation errors of the step validated last; an absent key
    /// means that field is currently valid.
    #[must_use]
    pub const fn errors(&self) -> &FormErrors {
        &self.model.data().errors
    }

    /// Current workflow phase.
    #[must_use]
    pub const fn phase(&self) -> CheckoutPhase {
        self.model.data().phase
    }

    /// Step-1 gate: a payment method is chosen and the address is
    /// non-empty.
    #[must_use]
    pub fn is_payment_valid(&self) -> bool {
        let draft = self.draft();
        draft.payment.is_some() && !draft.address.is_empty()
    }

    /// Step-2 gate: email and phone both match their required shapes.
    #[must_use]
    pub fn is_contacts_valid(&self) -> bool {
        let draft = self.draft();
        validation::is_valid_email(&draft.email) && validation::is_valid_phone(&draft.phone)
    }

    /// Set the draft's payment method, revalidate step 1 and publish
    /// `payment:changed` plus `formErrors:changed`.
    ///
    /// Ignored while a submission is in flight.
    pub fn set_payment(&mut self, payment: PaymentMethod) {
        if self.refuse_while_submitting("set_payment") {
            return;
        }
        let data = self.model.data_mut();
        data.draft.payment = Some(payment);
        data.phase = data.phase.max(CheckoutPhase::Delivery);
        data.errors = validation::validate_delivery(&data.draft);

        self.model.emit_change(AppEvent::PaymentChanged { payment });
        self.publish_errors();
    }

    /// Set the draft's delivery address, revalidate step 1 and publish
    /// `address:changed` plus `formErrors:changed`.
    ///
    /// Ignored while a submission is in flight.
    pub fn set_address(&mut self, address: impl Into<String>) {
        if self.refuse_while_submitting("set_address") {
            return;
        }
        let address = address.into();
        let data = self.model.data_mut();
        data.draft.address = address.clone();
        data.phase = data.phase.max(CheckoutPhase::Delivery);
        data.errors = validation::validate_delivery(&data.draft);

        self.model.emit_change(AppEvent::AddressChanged { address });
        self.publish_errors();
    }

    /// Set both contact fields (contacts are entered on one form),
    /// revalidate step 2 and publish `contacts:changed` plus
    /// `formErrors:changed`.
    ///
    /// Ignored while a submission is in flight.
    pub fn set_contacts(&mut self, email: impl Into<String>, phone: impl Into<String>) {
        if self.refuse_while_submitting("set_contacts") {
            return;
        }
        let (email, phone) = (email.into(), phone.into());
        let data = self.model.data_mut();
        data.draft.email = email.clone();
        data.draft.phone = phone.clone();
        data.phase = data.phase.max(CheckoutPhase::Contacts);
        data.errors = validation::validate_contacts(&data.draft);

        self.model
            .emit_change(AppEvent::ContactsChanged { email, phone });
        self.publish_errors();
    }

    /// Assemble the order from the draft plus the cart-derived item
    /// ids and total, and post it to the order endpoint.
    ///
    /// Only meaningful once both gates are satisfied. On success the
    /// draft is reset and `order:success` published; on failure the
    /// draft is preserved, `order:error` published, and the workflow
    /// returns to [`CheckoutPhase::Contacts`] for retry.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::AlreadySubmitting`] while a submission is in
    ///   flight (the refused call mutates nothing)
    /// - [`SubmitError::DeliveryIncomplete`] /
    ///   [`SubmitError::ContactsIncomplete`] when a gate is unmet
    /// - [`SubmitError::Transport`] when the transport collaborator
    ///   rejects the call or the success body is malformed
    #[tracing::instrument(skip(self, items), fields(item_count = items.len(), total))]
    pub async fn submit_order(
        &mut self,
        items: Vec<String>,
        total: u64,
    ) -> Result<OrderReceipt, SubmitError> {
        let payload = self.begin_submit(items, total)?;
        let outcome = self.post_order(&payload).await;
        self.finish_submit(outcome)
    }

    /// Reset the draft and error map and publish `order:cleared`.
    ///
    /// Used after a successful submission or on explicit cancellation;
    /// ignored while a submission is in flight.
    pub fn clear_order(&mut self) {
        if self.refuse_while_submitting("clear_order") {
            return;
        }
        let data = self.model.data_mut();
        data.draft = OrderDraft::default();
        data.errors.clear();
        data.phase = CheckoutPhase::Empty;
        self.model.emit_change(AppEvent::OrderCleared);
    }

    /// Check the gates and the in-flight guard, then enter
    /// [`CheckoutPhase::Submitting`] and build the wire payload.
    fn begin_submit(&mut self, items: Vec<String>, total: u64) -> Result<OrderPayload, SubmitError> {
        let data = self.model.data();
        if data.phase == CheckoutPhase::Submitting {
            tracing::warn!("refusing to submit: a submission is already in flight");
            return Err(SubmitError::AlreadySubmitting);
        }
        if !self.is_payment_valid() {
            tracing::warn!("refusing to submit: delivery details are incomplete");
            return Err(SubmitError::DeliveryIncomplete);
        }
        if !self.is_contacts_valid() {
            tracing::warn!("refusing to submit: contact details are incomplete");
            return Err(SubmitError::ContactsIncomplete);
        }

        let draft = &self.model.data().draft;
        let Some(payment) = draft.payment else {
            return Err(SubmitError::DeliveryIncomplete);
        };
        let payload = OrderPayload {
            payment,
            address: draft.address.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            items,
            total,
        };

        self.model.data_mut().phase = CheckoutPhase::Submitting;
        Ok(payload)
    }

    /// Resolve a finished submission: reset the draft on success, fall
    /// back to [`CheckoutPhase::Contacts`] on failure.
    fn finish_submit(
        &mut self,
        outcome: Result<OrderReceipt, TransportError>,
    ) -> Result<OrderReceipt, SubmitError> {
        match outcome {
            Ok(receipt) => {
                let data = self.model.data_mut();
                data.draft = OrderDraft::default();
                data.errors.clear();
                data.phase = CheckoutPhase::Empty;
                tracing::debug!(order_id = %receipt.id, total = receipt.total, "order accepted");
                self.model.emit_change(AppEvent::OrderSuccess);
                Ok(receipt)
            }
            Err(error) => {
                self.model.data_mut().phase = CheckoutPhase::Contacts;
                tracing::warn!(error = %error, "order submission failed");
                self.model.emit_change(AppEvent::OrderError {
                    reason: error.to_string(),
                });
                Err(SubmitError::Transport(error))
            }
        }
    }

    async fn post_order(&self, payload: &OrderPayload) -> Result<OrderReceipt, TransportError> {
        let body =
            serde_json::to_value(payload).map_err(|e| TransportError::Shape(e.to_string()))?;
        let value = self.transport.post(ORDER_PATH, body).await?;
        serde_json::from_value(value).map_err(|e| TransportError::Shape(e.to_string()))
    }

    fn publish_errors(&self) {
        self.model.emit_change(AppEvent::FormErrorsChanged {
            errors: self.model.data().errors.clone(),
        });
    }

    fn refuse_while_submitting(&self, operation: &str) -> bool {
        if self.model.data().phase == CheckoutPhase::Submitting {
            tracing::warn!(operation, "mutation ignored while a submission is in flight");
            return true;
        }
        false
    }
}

impl std::fmt::Debug for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutState")
            .field("data", self.model.data())
            .finish_non_exhaustive()
    }
}
