use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use monastery360_shared::config::{NOTIFICATION_DISMISS_MS, NOTIFICATION_EXIT_MS};
use monastery360_shared::{NoticeBoard, Severity};

/// Toast service. Provided once at the app root; every controller pulls it
/// from context instead of reaching for a global.
#[derive(Clone, Copy)]
pub(crate) struct Notifier(RwSignal<NoticeBoard>);

impl Notifier {
    pub fn new() -> Self {
        Self(RwSignal::new(NoticeBoard::default()))
    }

    pub fn notify(self, message: impl Into<String>, severity: Severity) {
        let board = self.0;
        let Some(id) = board.try_update(|b| b.push(message, severity)) else {
            return;
        };
        Timeout::new(NOTIFICATION_DISMISS_MS, move || {
            board.update(|b| b.begin_dismiss(id));
            Timeout::new(NOTIFICATION_EXIT_MS, move || board.update(|b| b.remove(id))).forget();
        })
        .forget();
    }

    pub fn info(self, message: impl Into<String>) {
        self.notify(message, Severity::Info);
    }

    pub fn success(self, message: impl Into<String>) {
        self.notify(message, Severity::Success);
    }

    pub fn warning(self, message: impl Into<String>) {
        self.notify(message, Severity::Warning);
    }

    pub fn error(self, message: impl Into<String>) {
        self.notify(message, Severity::Error);
    }
}

pub(crate) fn use_notifier() -> Notifier {
    expect_context::<Notifier>()
}

#[component]
pub fn Notifications() -> impl IntoView {
    let Notifier(board) = use_notifier();

    view! {
        <div class="notification-stack">
            <For
                each=move || board.with(|b| b.notices().to_vec())
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    // Keyed by id only so the leaving class lands on the same node
                    // and the exit transition plays.
                    let class = move || {
                        board.with(|b| {
                            b.notices()
                                .iter()
                                .find(|x| x.id == id)
                                .map(|x| x.css_class())
                                .unwrap_or_default()
                        })
                    };
                    view! { <div class=class>{n.message}</div> }
                }
            />
        </div>
    }
}
