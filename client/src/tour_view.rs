use gloo_timers::callback::{Interval, Timeout};
use leptos::html;
use leptos::prelude::*;

use monastery360_shared::config::{
    AUDIO_TICK_MS, SCENE_LOAD_DELAY_MS, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR,
};
use monastery360_shared::{
    AudioGuide, Hotspot, HotspotAction, TourConfig, TourController,
};

use crate::listeners::{EventBinding, first_touch, is_typing_target};
use crate::notify::use_notifier;
use crate::viewport::LookView;

#[derive(Debug, Clone, PartialEq)]
struct InfoPopup {
    title: String,
    text: String,
}

/// Keys the tour viewer handles while it is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shortcut {
    ExitFullscreen,
    ToggleGuide,
    ZoomIn,
    ZoomOut,
}

impl Shortcut {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(Self::ExitFullscreen),
            " " => Some(Self::ToggleGuide),
            "+" | "=" => Some(Self::ZoomIn),
            "-" => Some(Self::ZoomOut),
            _ => None,
        }
    }

    /// Space would otherwise also click a focused button on keyup and undo
    /// the toggle, or scroll the page.
    fn claims_key(self) -> bool {
        self == Self::ToggleGuide
    }
}

fn toggle_fullscreen(viewer: &web_sys::Element) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
    } else if let Err(err) = viewer.request_fullscreen() {
        log::warn!("fullscreen request rejected: {err:?}");
    }
}

fn exit_fullscreen() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
    }
}

#[component]
pub fn VirtualTour(config: TourConfig) -> impl IntoView {
    let notifier = use_notifier();
    let TourConfig {
        container_id,
        graph,
    } = config;
    log::debug!("tour mounted with {} scenes, starting at {}", graph.len(), graph.start());

    let tour = RwSignal::new(TourController::new(graph));
    let look = RwSignal::new(LookView::default());
    let loading = RwSignal::new(true);
    let popup = RwSignal::new(None::<InfoPopup>);
    let viewer: NodeRef<html::Div> = NodeRef::new();

    // Owned timer handles: replacing or dropping one cancels it.
    let ticker = StoredValue::new_local(None::<Interval>);
    let load_timer = StoredValue::new_local(None::<Timeout>);
    let last_pointer = StoredValue::new(None::<(f64, f64)>);
    let bindings = StoredValue::new_local(Vec::<EventBinding>::new());

    let scene = Memo::new(move |_| tour.with(|t| t.current_scene().clone()));
    let guide_mounted = Memo::new(move |_| tour.with(|t| t.audio_guide().is_some()));
    let playing = Memo::new(move |_| tour.with(TourController::wants_ticker));
    let progress = Memo::new(move |_| tour.with(|t| t.audio_guide().map_or(0, AudioGuide::progress)));
    let time_label = Memo::new(move |_| {
        tour.with(|t| t.audio_guide().map(AudioGuide::time_label).unwrap_or_default())
    });
    let active_segment = Memo::new(move |_| tour.with(|t| t.audio_guide().and_then(AudioGuide::active_segment)));
    let segments = Memo::new(move |_| {
        tour.with(|t| {
            t.audio_guide()
                .map(|g| g.segments().to_vec())
                .unwrap_or_default()
        })
    });

    let begin_loading = move || {
        loading.set(true);
        load_timer.set_value(Some(Timeout::new(SCENE_LOAD_DELAY_MS, move || {
            loading.set(false);
        })));
    };
    begin_loading();

    // The interval lives exactly while the controller wants it. Effects run
    // outside the interval's own callback, so it is never dropped mid-call.
    Effect::new(move || {
        let wanted = playing.get();
        ticker.update_value(|slot| {
            if !wanted {
                *slot = None;
            } else if slot.is_none() {
                *slot = Some(Interval::new(AUDIO_TICK_MS, move || {
                    tour.try_update(|t| {
                        t.tick();
                    });
                }));
            }
        });
    });

    let play = move || {
        tour.update(|t| {
            if let Some(guide) = t.audio_guide_mut() {
                guide.play();
            }
        });
    };
    let pause = move || {
        tour.update(|t| {
            if let Some(guide) = t.audio_guide_mut() {
                guide.pause();
            }
        });
    };
    let toggle_guide = move || {
        let mounted = tour.try_update(|t| t.toggle_audio_guide()).unwrap_or(false);
        if mounted {
            notifier.success("Audio guide started");
        } else {
            notifier.info("Audio guide stopped");
        }
    };

    let zoom = move |factor: f64| look.update(|v| v.zoom_by(factor));

    let activate = move |hotspot: Hotspot| {
        let action = tour
            .try_update(|t| t.activate_hotspot(&hotspot))
            .unwrap_or(HotspotAction::Ignored);
        match action {
            HotspotAction::ShowInfo { title, text } => popup.set(Some(InfoPopup { title, text })),
            HotspotAction::Navigated { scene } => {
                log::debug!("navigated to {scene}");
                popup.set(None);
                begin_loading();
            }
            HotspotAction::Ignored => {}
        }
    };

    let drag_to = move |x: f64, y: f64| {
        let Some((lx, ly)) = last_pointer.get_value() else {
            return;
        };
        look.update(|v| v.look(x - lx, y - ly));
        last_pointer.set_value(Some((x, y)));
    };

    Effect::new(move || {
        let mut list = Vec::with_capacity(5);
        list.extend(EventBinding::window::<web_sys::KeyboardEvent>("keydown", move |e| {
            if is_typing_target(&e) {
                return;
            }
            let Some(shortcut) = Shortcut::from_key(&e.key()) else {
                return;
            };
            if shortcut.claims_key() {
                e.prevent_default();
            }
            match shortcut {
                Shortcut::ExitFullscreen => exit_fullscreen(),
                Shortcut::ToggleGuide => toggle_guide(),
                Shortcut::ZoomIn => zoom(ZOOM_IN_FACTOR),
                Shortcut::ZoomOut => zoom(ZOOM_OUT_FACTOR),
            }
        }));
        list.extend(EventBinding::document::<web_sys::MouseEvent>("mousemove", move |e| {
            drag_to(e.client_x() as f64, e.client_y() as f64)
        }));
        list.extend(EventBinding::document::<web_sys::MouseEvent>("mouseup", move |_| {
            last_pointer.set_value(None)
        }));
        list.extend(EventBinding::document::<web_sys::TouchEvent>("touchmove", move |e| {
            if let Some((x, y)) = first_touch(&e) {
                drag_to(x, y);
            }
        }));
        list.extend(EventBinding::document::<web_sys::TouchEvent>("touchend", move |_| {
            last_pointer.set_value(None)
        }));
        bindings.set_value(list);
    });

    let hotspot_overlay = move || {
        if loading.get() {
            return view! { <div class="loading-spinner"></div> }.into_any();
        }
        scene
            .get()
            .hotspots
            .into_iter()
            .map(|hotspot| {
                let (top, left) = hotspot.overlay_position();
                let class = if hotspot.is_link() {
                    "hotspot hotspot-scene"
                } else {
                    "hotspot hotspot-info"
                };
                let title = hotspot.title.clone();
                view! {
                    <div
                        class=class
                        style=format!("top: {top}%; left: {left}%;")
                        on:mousedown=move |e: web_sys::MouseEvent| e.stop_propagation()
                        on:click=move |_| activate(hotspot.clone())
                    >
                        <div class="hotspot-marker"></div>
                        <div class="hotspot-tooltip">{title}</div>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    let audio_panel = move || {
        if !guide_mounted.get() {
            return ().into_any();
        }
        view! {
            <div class="audio-guide">
                <div class="audio-title">"Audio Guide"</div>
                <div class="audio-controls">
                    {move || {
                        if playing.get() {
                            view! { <button class="audio-pause" aria-label="Pause" on:click=move |_| pause()>"❚❚"</button> }
                                .into_any()
                        } else {
                            view! { <button class="audio-play" aria-label="Play" on:click=move |_| play()>"▶"</button> }
                                .into_any()
                        }
                    }}
                    <div class="audio-progress">
                        <div class="progress-bar" style:width=move || format!("{}%", progress.get())></div>
                    </div>
                    <div class="audio-time">{move || time_label.get()}</div>
                </div>
                <div class="audio-transcript">
                    <For
                        each=move || segments.get().into_iter().enumerate()
                        key=|(i, segment)| (*i, segment.text.clone())
                        children=move |(i, segment)| {
                            view! {
                                <p class="transcript-segment" class:active=move || active_segment.get() == Some(i)>
                                    {segment.text}
                                </p>
                            }
                        }
                    />
                </div>
            </div>
        }
        .into_any()
    };

    view! {
        <div class="tour-layout">
            <div id=container_id class="tour-viewer" node_ref=viewer>
                <div
                    class="tour-scene"
                    on:mousedown=move |e: web_sys::MouseEvent| {
                        last_pointer.set_value(Some((e.client_x() as f64, e.client_y() as f64)))
                    }
                    on:touchstart=move |e: web_sys::TouchEvent| last_pointer.set_value(first_touch(&e))
                >
                    <img
                        class="tour-image"
                        src=move || scene.with(|s| s.image.clone())
                        alt=move || scene.with(|s| s.title.clone())
                        draggable="false"
                        style:transform=move || look.get().css_transform()
                    />
                    {hotspot_overlay}
                </div>
                <div class="scene-title">{move || scene.with(|s| s.title.clone())}</div>
                <div class="tour-controls">
                    <button
                        aria-label="Zoom in"
                        on:click=move |_| {
                            zoom(ZOOM_IN_FACTOR);
                            notifier.success("Zooming in");
                        }
                    >
                        "+"
                    </button>
                    <button
                        aria-label="Zoom out"
                        on:click=move |_| {
                            zoom(ZOOM_OUT_FACTOR);
                            notifier.success("Zooming out");
                        }
                    >
                        "−"
                    </button>
                    <button
                        aria-label="Fullscreen"
                        on:click=move |_| {
                            let Some(el) = viewer.get() else {
                                return;
                            };
                            toggle_fullscreen(&el);
                        }
                    >
                        "⛶"
                    </button>
                    <button
                        aria-label="Audio guide"
                        class:active=move || guide_mounted.get()
                        on:click=move |_| toggle_guide()
                    >
                        "♫"
                    </button>
                </div>
                {audio_panel}
            </div>
            <div class="tour-info">
                <h3>{move || scene.with(|s| s.title.clone())}</h3>
                <ul class="hotspot-list">
                    {move || {
                        scene.with(|s| {
                            s.hotspots
                                .iter()
                                .map(|h| view! { <li>{format!("{}: {}", h.title, h.text())}</li> })
                                .collect_view()
                        })
                    }}
                </ul>
            </div>
            {move || {
                popup
                    .get()
                    .map(|p| {
                        view! {
                            <div
                                class="hotspot-popup"
                                on:click=move |e: web_sys::MouseEvent| {
                                    if e.target() == e.current_target() {
                                        popup.set(None);
                                    }
                                }
                            >
                                <div class="popup-content">
                                    <h3>{p.title}</h3>
                                    <p>{p.text}</p>
                                    <button class="popup-close" aria-label="Close" on:click=move |_| popup.set(None)>
                                        "×"
                                    </button>
                                </div>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
