//! The donation form's operations: tier selection, custom amounts and the
//! hand-off to the checkout widget.
//!
//! [`DonationFlow`] holds no form state of its own. It reads the donor's input,
//! validates it, opens the checkout through the injected [`PaymentGateway`] and
//! reports every state change through a [`Dispatch`] callback, so the same
//! logic drives a Yew reducer in the browser and a plain store in tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::client::{CheckoutHandlers, CheckoutResponse, PaymentGateway};
use crate::config::DonationConfig;
use crate::donation::{
    parse_custom_amount, validate_amount, validate_email, DonationOption, PaymentRequest,
    ReferenceGenerator,
};
use crate::error::{DonationError, Result};
use crate::scheduler::{Clock, ScheduledTask, Scheduler};
use crate::state::{DonationAction, NoticeId};

/// Sink for state transitions.
pub type Dispatch = Rc<dyn Fn(DonationAction)>;

/// Holds the clear scheduled for the newest success notice.
///
/// Share one timer between flows that drive the same form so a rebuilt flow
/// still replaces the clear of the previous one.
#[derive(Debug, Default)]
pub struct NoticeTimer {
    pending: RefCell<Option<ScheduledTask>>,
}

impl NoticeTimer {
    /// Store `task`, cancelling the clear it replaces.
    pub fn replace(&self, task: ScheduledTask) {
        let previous = self.pending.borrow_mut().replace(task);
        drop(previous);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

impl Drop for NoticeTimer {
    // A notice already on screen must still clear when its timer goes away.
    fn drop(&mut self) {
        if let Some(task) = self.pending.get_mut().take() {
            task.detach();
        }
    }
}

pub struct DonationFlow {
    config: DonationConfig,
    gateway: Rc<dyn PaymentGateway>,
    scheduler: Rc<dyn Scheduler>,
    clock: Rc<dyn Clock>,
    references: ReferenceGenerator,
    notice_timer: Rc<NoticeTimer>,
}

impl DonationFlow {
    pub fn new(
        config: DonationConfig,
        gateway: Rc<dyn PaymentGateway>,
        scheduler: Rc<dyn Scheduler>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let references = ReferenceGenerator::new(config.reference_prefix.clone());
        DonationFlow {
            config,
            gateway,
            scheduler,
            clock,
            references,
            notice_timer: Rc::new(NoticeTimer::default()),
        }
    }

    /// Use a timer that outlives this flow.
    pub fn with_notice_timer(mut self, timer: Rc<NoticeTimer>) -> Self {
        self.notice_timer = timer;
        self
    }

    pub fn config(&self) -> &DonationConfig {
        &self.config
    }

    /// Donate one of the preset tiers.
    pub fn select_tier(
        &self,
        option: &DonationOption,
        email: &str,
        dispatch: Dispatch,
    ) -> Result<PaymentRequest> {
        self.initiate_payment(f64::from(option.amount), email, dispatch)
    }

    /// Donate whatever the donor typed into the custom amount field.
    pub fn submit_custom_amount(
        &self,
        custom_amount: &str,
        email: &str,
        dispatch: Dispatch,
    ) -> Result<PaymentRequest> {
        self.initiate_payment(parse_custom_amount(custom_amount), email, dispatch)
    }

    /// Validate, then open the checkout exactly once.
    ///
    /// Checks run in order (public key, amount, email) and the first failure
    /// aborts the attempt without touching the gateway.
    pub fn initiate_payment(
        &self,
        amount: f64,
        email: &str,
        dispatch: Dispatch,
    ) -> Result<PaymentRequest> {
        let request = self.build_request(amount, email)?;
        let public_key = self.config.public_key()?;

        log::info!(
            "opening checkout {} for {} {}",
            request.reference,
            request.amount,
            request.currency.code()
        );

        // Opened before the call: a gateway may report its outcome synchronously.
        dispatch(DonationAction::CheckoutOpened {
            reference: request.reference.clone(),
        });
        let handlers = self.handlers(&request, dispatch.clone());
        if let Err(err) = self.gateway.open_checkout(public_key, &request, handlers) {
            log::error!("checkout {} could not be opened: {err}", request.reference);
            dispatch(DonationAction::CheckoutFailed {
                reference: request.reference.clone(),
            });
            return Err(DonationError::from(err));
        }
        Ok(request)
    }

    fn build_request(&self, amount: f64, email: &str) -> Result<PaymentRequest> {
        if let Err(err) = self.config.public_key() {
            log::error!("Paystack public key is not configured");
            return Err(err);
        }
        let currency = self.config.currency;
        let amount_minor = validate_amount(amount, currency).inspect_err(|_| {
            log::debug!("rejected donation amount {amount}");
        })?;
        let email = validate_email(email).inspect_err(|_| {
            log::debug!("rejected donor email");
        })?;

        Ok(PaymentRequest {
            amount,
            amount_minor,
            email,
            currency,
            reference: self.references.next(self.clock.now_millis()),
        })
    }

    fn handlers(&self, request: &PaymentRequest, dispatch: Dispatch) -> CheckoutHandlers {
        let on_close = {
            let dispatch = dispatch.clone();
            let reference = request.reference.clone();
            move || {
                log::info!("payment window closed ({reference})");
                dispatch(DonationAction::CheckoutDismissed { reference });
            }
        };

        let scheduler = self.scheduler.clone();
        let notice_timer = self.notice_timer.clone();
        let delay = self.config.notice_duration;
        let on_complete = move |response: CheckoutResponse| {
            log::info!("donation completed ({})", response.reference);
            let id = NoticeId::next();
            dispatch(DonationAction::PaymentCompleted {
                reference: response.reference,
                notice: id,
            });

            let clear = scheduler.schedule(
                delay,
                Box::new(move || dispatch(DonationAction::ClearNotice(id))),
            );
            notice_timer.replace(clear);
        };

        CheckoutHandlers::new(on_close, on_complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_task(cancelled: &Rc<Cell<u32>>) -> ScheduledTask {
        let cancelled = cancelled.clone();
        ScheduledTask::new(move || cancelled.set(cancelled.get() + 1))
    }

    #[test]
    fn replacing_cancels_the_previous_clear() {
        let cancelled = Rc::new(Cell::new(0));
        let timer = NoticeTimer::default();
        assert!(!timer.is_pending());

        timer.replace(counting_task(&cancelled));
        timer.replace(counting_task(&cancelled));
        assert_eq!(cancelled.get(), 1);
        assert!(timer.is_pending());
    }

    #[test]
    fn dropping_the_timer_leaves_its_clear_scheduled() {
        let cancelled = Rc::new(Cell::new(0));
        let timer = NoticeTimer::default();
        timer.replace(counting_task(&cancelled));

        drop(timer);
        assert_eq!(cancelled.get(), 0);
    }
}
