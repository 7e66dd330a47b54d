use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use monastery360_shared::config::{NAVBAR_COMPACT_SCROLL_Y, REVEAL_THRESHOLD};

use crate::listeners::EventBinding;

const NAV_LINKS: [(&str, &str); 5] = [
    ("#home", "Home"),
    ("#tour", "Virtual Tours"),
    ("#map", "Map"),
    ("#calendar", "Calendar"),
    ("#newsletter", "Newsletter"),
];

/// Strictly past the threshold; sitting exactly on it still shows the tall bar.
pub(crate) fn is_compact(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_COMPACT_SCROLL_Y
}

#[component]
pub fn Navbar() -> impl IntoView {
    let menu_open = RwSignal::new(false);
    let compact = RwSignal::new(false);
    let scroll_binding = StoredValue::new_local(None::<EventBinding>);

    Effect::new(move || {
        let binding = EventBinding::window::<web_sys::Event>("scroll", move |_| {
            let Some(window) = web_sys::window() else {
                return;
            };
            compact.set(is_compact(window.scroll_y().unwrap_or(0.0)));
        });
        scroll_binding.set_value(binding);
    });

    view! {
        <nav class="navbar" class:scrolled=move || compact.get()>
            <div class="nav-container">
                <a href="#home" class="nav-logo">"Monastery360"</a>
                <ul class="nav-menu" class:active=move || menu_open.get()>
                    {NAV_LINKS
                        .iter()
                        .map(|(href, label)| {
                            view! {
                                <li class="nav-item">
                                    <a href=*href class="nav-link" on:click=move |_| menu_open.set(false)>
                                        {*label}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <button
                    class="hamburger"
                    class:active=move || menu_open.get()
                    aria-label="Toggle navigation"
                    on:click=move |_| menu_open.update(|open| *open = !*open)
                >
                    <span class="bar"></span>
                    <span class="bar"></span>
                    <span class="bar"></span>
                </button>
            </div>
        </nav>
    }
}

/// Observer plus its callback; disconnects before the callback is freed.
struct RevealObserver {
    observer: web_sys::IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>,
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Fades its children in the first time they scroll into view.
#[component]
pub fn Reveal(children: Children) -> impl IntoView {
    let node: NodeRef<html::Div> = NodeRef::new();
    let shown = RwSignal::new(false);
    let observer = StoredValue::new_local(None::<RevealObserver>);

    Effect::new(move || {
        let Some(el) = node.get() else {
            return;
        };
        if observer.with_value(|o| o.is_some()) {
            return;
        }
        let callback = Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
            move |entries: js_sys::Array, obs: web_sys::IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<web_sys::IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        shown.set(true);
                        obs.unobserve(&entry.target());
                    }
                }
            },
        );
        let init = web_sys::IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        let Ok(obs) =
            web_sys::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        else {
            // No observer support: just show the content.
            shown.set(true);
            return;
        };
        obs.observe(&el);
        observer.set_value(Some(RevealObserver {
            observer: obs,
            _callback: callback,
        }));
    });

    view! {
        <div node_ref=node class="reveal" class:animate-in=move || shown.get()>
            {children()}
        </div>
    }
}
