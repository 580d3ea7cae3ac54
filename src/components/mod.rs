mod donation_form;

pub use donation_form::*;

use web_sys::HtmlInputElement;
use yew::prelude::*;

/// A full-width action button.
#[derive(Properties, PartialEq)]
pub struct ButtonProps {
    /// Button label text
    pub label: AttrValue,
    /// Click handler
    pub onclick: Callback<MouseEvent>,
    /// Outlined instead of filled
    #[prop_or_default]
    pub outline: bool,
    /// Disable state
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component(Button)]
pub fn button(props: &ButtonProps) -> Html {
    let class = if props.outline {
        "ypd-button ypd-button--outline"
    } else {
        "ypd-button"
    };
    html! {
        <button
            type="button"
            onclick={props.onclick.clone()}
            disabled={props.disabled}
            {class}
        >
            { &props.label }
        </button>
    }
}

/// A basic controlled input.
#[derive(Properties, PartialEq)]
pub struct TextInputProps {
    /// Current value
    pub value: AttrValue,
    /// Emits new value on each keystroke
    pub oninput: Callback<String>,
    /// `text`, `email`, `number`, …
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub id: Option<AttrValue>,
    /// Placeholder text
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub required: bool,
}

#[function_component(TextInput)]
pub fn text_input(props: &TextInputProps) -> Html {
    let oninput = props.oninput.clone();
    html! {
        <input
            type={props.input_type.clone()}
            id={props.id.clone()}
            class="ypd-text-input"
            value={props.value.clone()}
            placeholder={props.placeholder.clone()}
            required={props.required}
            oninput={Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                oninput.emit(input.value());
            })}
        />
    }
}
