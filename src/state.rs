//! Transient form state, updated only through named [`DonationAction`]s.

use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use yew::functional::Reducible;

use crate::donation::success_message;

/// Identifies one success notice so a delayed clear only removes that notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NoticeId(pub u64);

static NEXT_NOTICE: AtomicU64 = AtomicU64::new(1);

impl NoticeId {
    /// A fresh id, unique for the lifetime of the page.
    pub fn next() -> NoticeId {
        NoticeId(NEXT_NOTICE.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub message: String,
}

/// Where the current donation attempt stands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AttemptPhase {
    #[default]
    Idle,
    AwaitingWidgetResult { reference: String },
    Completed { reference: String },
    Dismissed { reference: String },
}

impl AttemptPhase {
    pub fn is_awaiting(&self) -> bool {
        matches!(self, AttemptPhase::AwaitingWidgetResult { .. })
    }

    fn awaits(&self, reference: &str) -> bool {
        matches!(self, AttemptPhase::AwaitingWidgetResult { reference: r } if r == reference)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DonationState {
    pub email: String,
    pub custom_amount: String,
    pub show_custom_input: bool,
    pub notice: Option<Notice>,
    pub phase: AttemptPhase,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DonationAction {
    EmailChanged(String),
    CustomAmountChanged(String),
    ToggleCustomInput,
    CheckoutOpened { reference: String },
    CheckoutDismissed { reference: String },
    CheckoutFailed { reference: String },
    PaymentCompleted { reference: String, notice: NoticeId },
    ClearNotice(NoticeId),
}

impl DonationState {
    /// Pure transition function behind [`Reducible::reduce`].
    pub fn apply(&self, action: DonationAction) -> DonationState {
        let mut next = self.clone();
        match action {
            DonationAction::EmailChanged(email) => next.email = email,
            DonationAction::CustomAmountChanged(amount) => next.custom_amount = amount,
            DonationAction::ToggleCustomInput => next.show_custom_input = !self.show_custom_input,
            DonationAction::CheckoutOpened { reference } => {
                next.phase = AttemptPhase::AwaitingWidgetResult { reference };
            }
            DonationAction::CheckoutDismissed { reference } => {
                // A late callback from an older popup must not rewind a newer attempt.
                if self.phase.awaits(&reference) || !self.phase.is_awaiting() {
                    next.phase = AttemptPhase::Dismissed { reference };
                }
            }
            DonationAction::CheckoutFailed { reference } => {
                if self.phase.awaits(&reference) {
                    next.phase = AttemptPhase::Idle;
                }
            }
            DonationAction::PaymentCompleted { reference, notice } => {
                next.notice = Some(Notice {
                    id: notice,
                    message: success_message(&reference),
                });
                next.custom_amount.clear();
                next.show_custom_input = false;
                if self.phase.awaits(&reference) || !self.phase.is_awaiting() {
                    next.phase = AttemptPhase::Completed { reference };
                }
            }
            DonationAction::ClearNotice(id) => {
                if self.notice.as_ref().is_some_and(|n| n.id == id) {
                    next.notice = None;
                }
            }
        }
        next
    }

    pub fn notice_message(&self) -> Option<&str> {
        self.notice.as_ref().map(|n| n.message.as_str())
    }
}

impl Reducible for DonationState {
    type Action = DonationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = self.apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}
