// src/lib.rs
use log::LevelFilter;
use wasm_bindgen::prelude::*;
use yew::prelude::*;
use yew_paystack::{init_logging, DonationConfig, DonationForm};

#[wasm_bindgen(start)]
pub fn start() {
    init_logging(LevelFilter::Info);
    yew::Renderer::<IftarPage>::new().render();
}

#[function_component(IftarPage)]
fn iftar_page() -> Html {
    // PAYSTACK_PUBLIC_KEY=pk_test_… trunk serve
    let config = DonationConfig::from_build_env();
    let on_complete = Callback::from(|reference: String| {
        log::info!("thank-you shown for {reference}");
    });

    html! {
        <div class="page">
            <main class="card">
                <DonationForm {config} {on_complete}>
                    <h1>{ "Feed a Fasting Person This Ramadan!🕌" }</h1>
                    <blockquote>
                        <p>
                            { "Those who spend their wealth [in Allah's way] by night and by day, \
                               secretly and publicly - they will have their reward with their Lord. \
                               And no fear will there be concerning them, nor will they grieve." }
                        </p>
                        <p><strong>{ "→ Quran 2:274" }</strong></p>
                    </blockquote>
                    <p class="description">
                        { "Your donation provides Iftar meals for fasting Muslims at Adenike \
                           Community Mosque throughout Ramadan." }
                    </p>
                </DonationForm>
                <div class="community">
                    <a href="#">{ "Join our WhatsApp group" }</a>
                </div>
            </main>
            <footer>
                <p><strong>{ "Under the authority of:" }</strong></p>
                <p>{ "Imam Adenike," }</p>
                <p>{ "Adenike Community Mosque," }</p>
                <p>{ "Adenike Lautech, Ogbomoso, Oyo state." }</p>
            </footer>
        </div>
    }
}
