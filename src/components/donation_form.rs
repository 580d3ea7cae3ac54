//! A drop-in Yew donation form backed by the Paystack inline checkout.
//!
//! The component collects the donor's email and an amount (preset tier or
//! free-form), runs the [`DonationFlow`] checks, opens the checkout popup and
//! shows a success notice that clears itself after the configured delay.

use std::rc::Rc;

use yew::prelude::*;

use super::{Button, TextInput};
use crate::client::{GatewayHandle, PaymentGateway, PaystackGateway};
use crate::config::DonationConfig;
use crate::donation::{default_options, DonationOption};
use crate::error::DonationError;
use crate::flow::{Dispatch, DonationFlow, NoticeTimer};
use crate::interop::use_paystackjs;
use crate::scheduler::{BrowserClock, BrowserScheduler};
use crate::state::{DonationAction, DonationState};

/// Properties for the [`DonationForm`] component.
///
/// # Fields
///
/// * `config` – Public key, currency, reference prefix and notice duration.
///   Defaults to [`DonationConfig::from_build_env`].
/// * `gateway` – Checkout to open. `None` uses [`PaystackGateway`].
/// * `options` – Preset tiers (default: ₦500, ₦2,500, ₦100,000).
/// * `on_complete` – Invoked with the transaction reference on success.
/// * `children` – Informational content rendered above the form.
#[derive(Properties, PartialEq, Clone)]
pub struct DonationFormProps {
    #[prop_or_else(DonationConfig::from_build_env)]
    pub config: DonationConfig,
    #[prop_or_default]
    pub gateway: Option<GatewayHandle>,
    #[prop_or_else(default_options)]
    pub options: Vec<DonationOption>,
    #[prop_or_default]
    pub on_complete: Callback<String>,
    #[prop_or_default]
    pub children: Children,
}

/// # Example
///
/// ```rust,ignore
/// use yew::prelude::*;
/// use yew_paystack::{DonationConfig, DonationForm};
///
/// #[function_component(App)]
/// fn app() -> Html {
///     let config = DonationConfig::default().with_public_key("pk_test_123");
///     html! {
///         <DonationForm {config}>
///             <h1>{ "Feed a Fasting Person This Ramadan!" }</h1>
///         </DonationForm>
///     }
/// }
/// ```
#[function_component(DonationForm)]
pub fn donation_form(props: &DonationFormProps) -> Html {
    let script_ready = use_paystackjs();
    let checkout_ready = script_ready || props.gateway.is_some();
    let state = use_reducer(DonationState::default);

    // Mount-scoped, so rebuilding the flow keeps the pending notice clear.
    let notice_timer = use_memo((), |_| NoticeTimer::default());
    let flow = use_memo(
        (props.config.clone(), props.gateway.clone()),
        move |(config, gateway)| {
            let gateway: Rc<dyn PaymentGateway> = match gateway {
                Some(handle) => handle.0.clone(),
                None => Rc::new(PaystackGateway),
            };
            DonationFlow::new(
                config.clone(),
                gateway,
                Rc::new(BrowserScheduler),
                Rc::new(BrowserClock),
            )
            .with_notice_timer(notice_timer)
        },
    );

    let dispatch: Dispatch = {
        let dispatcher = state.dispatcher();
        let on_complete = props.on_complete.clone();
        Rc::new(move |action: DonationAction| {
            let completed = match &action {
                DonationAction::PaymentCompleted { reference, .. } => Some(reference.clone()),
                _ => None,
            };
            dispatcher.dispatch(action);
            if let Some(reference) = completed {
                on_complete.emit(reference);
            }
        })
    };

    let on_email = {
        let dispatcher = state.dispatcher();
        Callback::from(move |email: String| dispatcher.dispatch(DonationAction::EmailChanged(email)))
    };

    let on_custom_amount = {
        let dispatcher = state.dispatcher();
        Callback::from(move |amount: String| {
            dispatcher.dispatch(DonationAction::CustomAmountChanged(amount))
        })
    };

    let on_toggle = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(DonationAction::ToggleCustomInput))
    };

    let on_custom_submit = {
        let flow = flow.clone();
        let state = state.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| {
            if let Err(err) =
                flow.submit_custom_amount(&state.custom_amount, &state.email, dispatch.clone())
            {
                notify_failure(&err);
            }
        })
    };

    let on_tier = |option: &DonationOption| {
        let flow = flow.clone();
        let state = state.clone();
        let dispatch = dispatch.clone();
        let option = option.clone();
        Callback::from(move |_: MouseEvent| {
            if let Err(err) = flow.select_tier(&option, &state.email, dispatch.clone()) {
                notify_failure(&err);
            }
        })
    };

    html! {
        <div class="ypd-donation">
            { for props.children.iter() }
            if let Some(message) = state.notice_message() {
                <div class="ypd-notice" role="status">
                    <p>{ message.to_string() }</p>
                </div>
            }
            <div class="ypd-field">
                <label for="ypd-email">{ "Your Email Address *" }</label>
                <TextInput
                    id={AttrValue::Static("ypd-email")}
                    input_type="email"
                    placeholder="donor@example.com"
                    value={state.email.clone()}
                    oninput={on_email}
                    required=true
                />
            </div>
            <p class="ypd-instruction">{ "Choose an option below to donate instantly:" }</p>
            <div class="ypd-options">
                { for props.options.iter().map(|option| html! {
                    <Button
                        key={option.amount.to_string()}
                        label={option.label.clone()}
                        onclick={on_tier(option)}
                        disabled={!checkout_ready}
                    />
                }) }
                <Button label="Donate any amount" outline=true onclick={on_toggle} />
                if state.show_custom_input {
                    <div class="ypd-custom">
                        <TextInput
                            input_type="number"
                            placeholder="Enter custom amount (₦)"
                            value={state.custom_amount.clone()}
                            oninput={on_custom_amount}
                        />
                        <Button
                            label="Proceed to Payment"
                            onclick={on_custom_submit}
                            disabled={!checkout_ready}
                        />
                    </div>
                }
            </div>
        </div>
    }
}

/// Blocking notice for a rejected attempt.
fn notify_failure(err: &DonationError) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(js) = window.alert_with_message(&err.to_string()) {
        log::warn!("could not show notice: {js:?}");
    }
}
