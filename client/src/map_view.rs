use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use monastery360_shared::config::{MODAL_EXIT_MS, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use monastery360_shared::monastery::{DISTRICTS, MAP_VIEW_BOX, OUTLINE_PATH};
use monastery360_shared::{MapConfig, MapFilters, Monastery, visible_ids};

use crate::listeners::{EventBinding, first_touch};
use crate::notify::use_notifier;
use crate::viewport::{DragAnchor, MapViewport};

/// Tooltip anchored above a marker, in viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
struct MarkerTooltip {
    name: String,
    summary: String,
    x: f64,
    y: f64,
}

/// Screen anchor for a tooltip: top-centre of the hovered element.
fn marker_anchor(e: &web_sys::MouseEvent) -> Option<(f64, f64)> {
    let el = e.target()?.dyn_into::<web_sys::Element>().ok()?;
    let rect = el.get_bounding_client_rect();
    Some((rect.left() + rect.width() / 2.0, rect.top()))
}

#[component]
pub fn MonasteryMap(config: MapConfig) -> impl IntoView {
    let notifier = use_notifier();
    let MapConfig {
        container_id,
        monasteries,
        placement,
    } = config;
    log::debug!("map mounted with {} monasteries", monasteries.len());
    let monasteries = StoredValue::new(monasteries);

    let viewport = RwSignal::new(MapViewport::default());
    let drag = StoredValue::new(None::<DragAnchor>);
    let dragging = RwSignal::new(false);
    let filters = RwSignal::new(MapFilters::default());
    let draft = RwSignal::new(String::new());
    let query = RwSignal::new(String::new());
    let hovered = RwSignal::new(None::<u32>);
    let tooltip = RwSignal::new(None::<MarkerTooltip>);
    let bindings = StoredValue::new_local(Vec::<EventBinding>::new());

    let visible = Memo::new(move |_| {
        let filters = filters.get();
        query.with(|q| monasteries.with_value(|ms| visible_ids(ms, &filters, q)))
    });

    let start_drag = move |x: f64, y: f64| {
        drag.set_value(Some(viewport.get_untracked().begin_drag(x, y)));
        dragging.set(true);
    };
    let move_drag = move |x: f64, y: f64| {
        let Some(anchor) = drag.get_value() else {
            return;
        };
        viewport.update(|vp| vp.drag_to(anchor, x, y));
    };
    let end_drag = move || {
        if drag.get_value().is_some() {
            drag.set_value(None);
            dragging.set(false);
        }
    };

    // Moves and releases are tracked on the document so a drag survives the
    // pointer leaving the map.
    Effect::new(move || {
        let mut list = Vec::with_capacity(4);
        list.extend(EventBinding::document::<web_sys::MouseEvent>(
            "mousemove",
            move |e| move_drag(e.client_x() as f64, e.client_y() as f64),
        ));
        list.extend(EventBinding::document::<web_sys::MouseEvent>(
            "mouseup",
            move |_| end_drag(),
        ));
        list.extend(EventBinding::document::<web_sys::TouchEvent>(
            "touchmove",
            move |e| {
                if let Some((x, y)) = first_touch(&e) {
                    move_drag(x, y);
                }
            },
        ));
        list.extend(EventBinding::document::<web_sys::TouchEvent>(
            "touchend",
            move |_| end_drag(),
        ));
        bindings.set_value(list);
    });

    let run_search = move || {
        let text = draft.get_untracked();
        if text.trim().is_empty() {
            notifier.warning("Please enter a search term");
            query.set(String::new());
            return;
        }
        notifier.info(format!("Searching for \"{}\"", text.trim()));
        query.set(text);
    };

    let set_filter = move |apply: fn(&mut MapFilters, bool), checked: bool| {
        filters.update(|f| apply(f, checked));
        let labels = filters.with_untracked(|f| f.labels());
        if !labels.is_empty() {
            notifier.info(format!("Applying filters: {}", labels.join(", ")));
        }
    };

    let selected = RwSignal::new(None::<Monastery>);

    let markers = monasteries.with_value(|ms| {
        ms.iter()
            .map(|m| {
                let id = m.id;
                let (cx, cy) = placement.place(m);
                let category = m.category;
                let name = m.name.clone();
                let summary = m.summary_line();
                let record = m.clone();
                view! {
                    <circle
                        class="monastery-marker"
                        data-id=id
                        cx=cx
                        cy=cy
                        r=move || category.marker_radius(hovered.get() == Some(id))
                        fill=category.marker_fill()
                        stroke="#fff"
                        stroke-width="2"
                        display=move || if visible.with(|v| v.contains(&id)) { "inline" } else { "none" }
                        on:mouseenter=move |e: web_sys::MouseEvent| {
                            hovered.set(Some(id));
                            let Some((x, y)) = marker_anchor(&e) else {
                                return;
                            };
                            tooltip.set(Some(MarkerTooltip {
                                name: name.clone(),
                                summary: summary.clone(),
                                x,
                                y,
                            }));
                        }
                        on:mouseleave=move |_| {
                            hovered.set(None);
                            tooltip.set(None);
                        }
                        on:click=move |_| {
                            tooltip.set(None);
                            selected.set(Some(record.clone()));
                        }
                    ></circle>
                }
            })
            .collect_view()
    });

    let filter_box = move |label: &'static str, read: fn(&MapFilters) -> bool, apply: fn(&mut MapFilters, bool)| {
        view! {
            <label class="filter-option">
                <input
                    type="checkbox"
                    prop:checked=move || filters.with(read)
                    on:change=move |e| set_filter(apply, event_target_checked(&e))
                />
                {label}
            </label>
        }
    };

    view! {
        <div class="map-layout">
            <aside class="map-sidebar">
                <div class="search-box">
                    <input
                        type="text"
                        placeholder="Search monasteries, festivals..."
                        prop:value=move || draft.get()
                        on:input=move |e| draft.set(event_target_value(&e))
                        on:keydown=move |e: web_sys::KeyboardEvent| {
                            if e.key() == "Enter" {
                                run_search();
                            }
                        }
                    />
                    <button on:click=move |_| run_search()>"Search"</button>
                </div>
                <div class="filter-options">
                    <h4>"Filter by"</h4>
                    {filter_box("17th Century", |f| f.century_17th, |f, on| f.century_17th = on)}
                    {filter_box("18th Century", |f| f.century_18th, |f, on| f.century_18th = on)}
                    {filter_box("Virtual Tour Available", |f| f.virtual_tour, |f, on| f.virtual_tour = on)}
                </div>
                <p class="map-result-count">
                    {move || format!("{} of {} monasteries shown", visible.with(Vec::len), monasteries.with_value(Vec::len))}
                </p>
            </aside>
            <div id=container_id class="interactive-map">
                <svg
                    class="svg-map"
                    viewBox=MAP_VIEW_BOX
                    style=move || {
                        format!(
                            "transform: {}; transform-origin: center; cursor: {}; touch-action: none;",
                            viewport.get().css_transform(),
                            if dragging.get() { "grabbing" } else { "grab" },
                        )
                    }
                    on:mousedown=move |e: web_sys::MouseEvent| start_drag(e.client_x() as f64, e.client_y() as f64)
                    on:touchstart=move |e: web_sys::TouchEvent| {
                        if let Some((x, y)) = first_touch(&e) {
                            start_drag(x, y);
                        }
                    }
                >
                    <path d=OUTLINE_PATH fill="#f0e6d2" stroke="#8b4513" stroke-width="2"></path>
                    {DISTRICTS
                        .iter()
                        .map(|d| {
                            view! {
                                <text x=d.x y=d.y text-anchor="middle" font-size="14" fill="#5a3e1b">
                                    {d.name}
                                </text>
                            }
                        })
                        .collect_view()}
                    {markers}
                </svg>
                <div class="map-zoom-controls">
                    <button
                        class="zoom-in"
                        aria-label="Zoom in"
                        on:click=move |_| viewport.update(|vp| vp.zoom_by(ZOOM_IN_FACTOR))
                    >
                        "+"
                    </button>
                    <button
                        class="zoom-out"
                        aria-label="Zoom out"
                        on:click=move |_| viewport.update(|vp| vp.zoom_by(ZOOM_OUT_FACTOR))
                    >
                        "−"
                    </button>
                </div>
            </div>
            {move || {
                tooltip
                    .get()
                    .map(|t| {
                        view! {
                            <div
                                class="map-tooltip"
                                style=format!(
                                    "position: fixed; left: {}px; top: {}px; transform: translate(-50%, calc(-100% - 10px));",
                                    t.x,
                                    t.y,
                                )
                            >
                                <h4>{t.name}</h4>
                                <p>{t.summary}</p>
                            </div>
                        }
                    })
            }}
            <MonasteryModal selected=selected />
        </div>
    }
}

/// Detail modal for the clicked marker. Closing plays a short exit
/// transition before the record is cleared.
#[component]
fn MonasteryModal(selected: RwSignal<Option<Monastery>>) -> impl IntoView {
    let notifier = use_notifier();
    let shown = RwSignal::new(false);
    let transition = StoredValue::new_local(None::<Timeout>);

    // A new selection cancels any pending close and fades in on the next frame.
    Effect::new(move || {
        if selected.with(Option::is_some) {
            transition.set_value(Some(Timeout::new(10, move || shown.set(true))));
        }
    });

    let close = move || {
        shown.set(false);
        transition.set_value(Some(Timeout::new(MODAL_EXIT_MS, move || selected.set(None))));
    };

    move || {
        selected.get().map(|m| {
            let tour_available = m.virtual_tour;
            let name = m.name.clone();
            view! {
                <div
                    class="modal"
                    class:show=move || shown.get()
                    on:click=move |e: web_sys::MouseEvent| {
                        // Only a click on the backdrop itself closes.
                        if e.target() == e.current_target() {
                            close();
                        }
                    }
                >
                    <div class="modal-content">
                        <div class="modal-header">
                            <h3>{m.name.clone()}</h3>
                            <button class="modal-close" aria-label="Close" on:click=move |_| close()>
                                "×"
                            </button>
                        </div>
                        <div class="modal-body">
                            <div class="monastery-details">
                                <div class="monastery-image">
                                    <img src=m.image.clone() alt=m.name.clone() />
                                </div>
                                <div class="monastery-info">
                                    <p><strong>"Century: "</strong>{m.century.clone()}</p>
                                    <p><strong>"Rating: "</strong>{format!("{} ★", m.rating)}</p>
                                    <p><strong>"Virtual Tour: "</strong>{m.tour_label()}</p>
                                    <p>{m.description.clone()}</p>
                                    <div class="monastery-events">
                                        <h4>"Events & Festivals"</h4>
                                        <ul>
                                            {m.events.iter().map(|ev| view! { <li>{ev.clone()}</li> }).collect_view()}
                                        </ul>
                                    </div>
                                </div>
                            </div>
                        </div>
                        <div class="modal-footer">
                            {if tour_available {
                                view! {
                                    <a href="#tour" class="btn-primary" on:click=move |_| close()>
                                        "View Virtual Tour"
                                    </a>
                                }
                                    .into_any()
                            } else {
                                let name = name.clone();
                                view! {
                                    <button
                                        class="btn-primary"
                                        on:click=move |_| {
                                            notifier.info(format!("A virtual tour of {name} is coming soon"))
                                        }
                                    >
                                        "View Virtual Tour"
                                    </button>
                                }
                                    .into_any()
                            }}
                            <button
                                class="btn-secondary"
                                on:click=move |_| notifier.info("Directions will open in your maps app")
                            >
                                "Get Directions"
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
