use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use monastery360_shared::config::{SIGNUP_DELAY_MS, SIGNUP_RESET_MS};
use monastery360_shared::{SignupPhase, validate_email};

use crate::notify::use_notifier;

/// Signup form with a simulated submit: nothing leaves the browser.
#[component]
pub fn NewsletterForm() -> impl IntoView {
    let notifier = use_notifier();
    let email = RwSignal::new(String::new());
    let phase = RwSignal::new(SignupPhase::Idle);

    let on_submit = move |e: leptos::ev::SubmitEvent| {
        e.prevent_default();
        if !phase.get_untracked().accepts_input() {
            return;
        }
        if !email.with_untracked(|value| validate_email(value)) {
            notifier.warning("Please enter a valid email address");
            return;
        }
        log::debug!("newsletter signup submitted");
        phase.set(SignupPhase::Submitting);
        email.set(String::new());
        Timeout::new(SIGNUP_DELAY_MS, move || {
            phase.set(SignupPhase::Subscribed);
            notifier.success("Thank you for subscribing to our newsletter!");
            Timeout::new(SIGNUP_RESET_MS, move || phase.set(SignupPhase::Idle)).forget();
        })
        .forget();
    };

    view! {
        <form class="newsletter-form" novalidate=true on:submit=on_submit>
            <input
                type="email"
                placeholder="Your email address"
                prop:value=move || email.get()
                on:input=move |e| email.set(event_target_value(&e))
            />
            <button
                type="submit"
                class="btn-primary"
                class:subscribed=move || phase.get() == SignupPhase::Subscribed
                disabled=move || !phase.get().accepts_input()
            >
                {move || phase.get().button_label()}
            </button>
        </form>
    }
}
