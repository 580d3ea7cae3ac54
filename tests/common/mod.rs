//! Test doubles for driving `DonationFlow` without a browser.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use yew_paystack::{
    CheckoutHandlers, CheckoutResponse, Clock, Dispatch, DonationAction, DonationConfig,
    DonationFlow, DonationState, GatewayError, PaymentGateway, PaymentRequest, ScheduledTask,
    Scheduler,
};

/// Records every checkout it is asked to open and lets the test finish them.
#[derive(Default)]
pub struct FakeGateway {
    pub opened: RefCell<Vec<(String, PaymentRequest)>>,
    pending: RefCell<Vec<CheckoutHandlers>>,
    fail_with: RefCell<Option<GatewayError>>,
}

impl FakeGateway {
    pub fn failing(message: &str) -> Self {
        let gateway = FakeGateway::default();
        *gateway.fail_with.borrow_mut() = Some(GatewayError::new(message));
        gateway
    }

    pub fn open_count(&self) -> usize {
        self.opened.borrow().len()
    }

    pub fn last_request(&self) -> PaymentRequest {
        self.opened.borrow().last().expect("no checkout opened").1.clone()
    }

    /// Simulate the donor finishing the payment in the newest popup.
    pub fn complete_last(&self, reference: &str) {
        let handlers = self.pending.borrow_mut().pop().expect("no open checkout");
        (handlers.on_complete)(CheckoutResponse::with_reference(reference));
    }

    /// Simulate the donor closing the newest popup.
    pub fn dismiss_last(&self) {
        let handlers = self.pending.borrow_mut().pop().expect("no open checkout");
        (handlers.on_close)();
    }
}

impl PaymentGateway for FakeGateway {
    fn open_checkout(
        &self,
        public_key: &str,
        request: &PaymentRequest,
        handlers: CheckoutHandlers,
    ) -> Result<(), GatewayError> {
        self.opened
            .borrow_mut()
            .push((public_key.to_string(), request.clone()));
        if let Some(err) = self.fail_with.borrow().clone() {
            return Err(err);
        }
        self.pending.borrow_mut().push(handlers);
        Ok(())
    }
}

struct PendingTask {
    id: u64,
    due: Duration,
    task: Box<dyn FnOnce()>,
}

/// Scheduler driven by simulated time.
pub struct ManualScheduler {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    queue: Rc<RefCell<Vec<PendingTask>>>,
    cancellable: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        ManualScheduler {
            now: Cell::new(Duration::ZERO),
            next_id: Cell::new(0),
            queue: Rc::new(RefCell::new(Vec::new())),
            cancellable: true,
        }
    }

    /// Ignores cancellation, like a plain `setTimeout` nobody clears.
    pub fn uncancellable() -> Self {
        ManualScheduler {
            cancellable: false,
            ..ManualScheduler::new()
        }
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Move simulated time forward, running every task that falls due.
    pub fn advance(&self, by: Duration) {
        let now = self.now.get() + by;
        self.now.set(now);
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                queue.sort_by_key(|t| t.due);
                match queue.first() {
                    Some(task) if task.due <= now => Some(queue.remove(0)),
                    _ => None,
                }
            };
            match next {
                Some(pending) => (pending.task)(),
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ScheduledTask {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.queue.borrow_mut().push(PendingTask {
            id,
            due: self.now.get() + delay,
            task,
        });
        if !self.cancellable {
            return ScheduledTask::detached();
        }
        let queue = Rc::downgrade(&self.queue);
        ScheduledTask::new(move || {
            if let Some(queue) = queue.upgrade() {
                queue.borrow_mut().retain(|t| t.id != id);
            }
        })
    }
}

pub struct FixedClock(pub Cell<u64>);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0.get()
    }
}

/// Plain state container standing in for the Yew reducer.
#[derive(Default)]
pub struct Store {
    state: RefCell<DonationState>,
    pub actions: RefCell<Vec<DonationAction>>,
}

impl Store {
    pub fn dispatch(self: &Rc<Self>) -> Dispatch {
        let store = self.clone();
        Rc::new(move |action: DonationAction| {
            let next = store.state.borrow().apply(action.clone());
            *store.state.borrow_mut() = next;
            store.actions.borrow_mut().push(action);
        })
    }

    pub fn state(&self) -> DonationState {
        self.state.borrow().clone()
    }
}

pub const NOW: u64 = 1_740_000_000_000;

pub struct Harness {
    pub flow: DonationFlow,
    pub gateway: Rc<FakeGateway>,
    pub scheduler: Rc<ManualScheduler>,
    pub store: Rc<Store>,
}

impl Harness {
    pub fn new() -> Self {
        Harness::with(
            DonationConfig::default().with_public_key("pk_test_iftar"),
            FakeGateway::default(),
            ManualScheduler::new(),
        )
    }

    pub fn with(config: DonationConfig, gateway: FakeGateway, scheduler: ManualScheduler) -> Self {
        let gateway = Rc::new(gateway);
        let scheduler = Rc::new(scheduler);
        let flow = DonationFlow::new(
            config,
            gateway.clone(),
            scheduler.clone(),
            Rc::new(FixedClock(Cell::new(NOW))),
        );
        Harness {
            flow,
            gateway,
            scheduler,
            store: Rc::new(Store::default()),
        }
    }

    pub fn dispatch(&self) -> Dispatch {
        self.store.dispatch()
    }

    pub fn state(&self) -> DonationState {
        self.store.state()
    }
}
