use leptos::prelude::*;

use monastery360_shared::{CalendarConfig, CalendarEvent, DayCell};

use crate::notify::use_notifier;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[component]
pub fn CulturalCalendar(config: CalendarConfig) -> impl IntoView {
    let notifier = use_notifier();
    let CalendarConfig {
        container_id,
        events,
        initial_month,
    } = config;
    log::debug!("calendar mounted with {} events for {}", events.len(), events.month().label());

    let events = StoredValue::new(events);
    let month = RwSignal::new(initial_month);
    let selected = RwSignal::new(None::<CalendarEvent>);
    let today = chrono::Local::now().date_naive();

    let cells = Memo::new(move |_| {
        let month = month.get();
        events.with_value(|e| e.cells(month, Some(today)))
    });

    let show_day = move |day: u32| {
        let month = month.get_untracked();
        let Some(event) = events.with_value(|e| e.event_on(month, day).cloned()) else {
            return;
        };
        notifier.info(format!("Event on {} {}: {}", month.month_name(), day, event.title));
        selected.set(Some(event));
    };

    let change_month = move |forward: bool| {
        month.update(|m| *m = if forward { m.next() } else { m.prev() });
        selected.set(None);
    };

    view! {
        <div id=container_id class="cultural-calendar">
            <div class="calendar-header">
                <button class="calendar-nav" aria-label="Previous month" on:click=move |_| change_month(false)>
                    "‹"
                </button>
                <h3>{move || month.get().label()}</h3>
                <button class="calendar-nav" aria-label="Next month" on:click=move |_| change_month(true)>
                    "›"
                </button>
            </div>
            <div class="calendar-grid">
                {WEEKDAYS.iter().map(|d| view! { <div class="calendar-weekday">{*d}</div> }).collect_view()}
                {move || {
                    cells
                        .get()
                        .into_iter()
                        .map(|cell| match cell {
                            DayCell::Blank => view! { <div class="calendar-day empty"></div> }.into_any(),
                            DayCell::Day { day, is_today, has_event } => {
                                view! {
                                    <div
                                        class="calendar-day"
                                        class:today=is_today
                                        class:has-event=has_event
                                        on:click=move |_| show_day(day)
                                    >
                                        {day}
                                    </div>
                                }
                                    .into_any()
                            }
                        })
                        .collect_view()
                }}
            </div>
            <div class="event-details">
                {move || match selected.get() {
                    Some(event) => {
                        view! {
                            <div class="event-card">
                                <h4>{event.title}</h4>
                                <p class="event-location">{event.location}</p>
                                <p>{event.description}</p>
                            </div>
                        }
                            .into_any()
                    }
                    None => view! { <p class="event-hint">"Select a highlighted day to see its event."</p> }.into_any(),
                }}
            </div>
        </div>
    }
}
