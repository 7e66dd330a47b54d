use leptos::prelude::*;

use monastery360_shared::{CalendarConfig, DatasetError, MapConfig, TourConfig};

use crate::calendar_view::CulturalCalendar;
use crate::map_view::MonasteryMap;
use crate::nav::{Navbar, Reveal};
use crate::newsletter_view::NewsletterForm;
use crate::notify::{Notifications, Notifier};
use crate::tour_view::VirtualTour;

const FEATURES: [(&str, &str); 3] = [
    (
        "Virtual Tours",
        "Step inside Sikkim's monasteries with guided 360° scenes and narration.",
    ),
    (
        "Interactive Map",
        "Find monasteries across all four districts and filter by era or tour availability.",
    ),
    (
        "Cultural Calendar",
        "Plan a visit around mask dances, prayer festivals and seasonal rituals.",
    ),
];

fn remove_loading_shell() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(shell) = document.get_element_by_id("app-loading-shell") {
        shell.remove();
    }
}

/// Build one controller, or an error card in its place when its bundled
/// dataset doesn't load. The rest of the page is unaffected either way.
fn controller<C, V>(
    what: &'static str,
    config: Result<C, DatasetError>,
    mount: impl FnOnce(C) -> V,
) -> AnyView
where
    V: IntoView + 'static,
{
    match config {
        Ok(config) => mount(config).into_any(),
        Err(err) => {
            log::error!("{what} unavailable: {err}");
            expect_context::<Notifier>().error(format!("The {what} could not be loaded"));
            view! {
                <div class="controller-error">
                    <p>{format!("The {what} is unavailable right now.")}</p>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn Hero() -> impl IntoView {
    view! {
        <section id="home" class="hero">
            <div class="hero-content">
                <h1>"Discover the Monasteries of Sikkim"</h1>
                <p>"Explore centuries of Buddhist heritage through virtual tours, maps and festivals."</p>
                <div class="hero-buttons">
                    <a href="#tour" class="btn-primary">"Start Virtual Tour"</a>
                    <a href="#map" class="btn-secondary">"Explore Map"</a>
                </div>
            </div>
        </section>
        <section class="features">
            <Reveal>
                <div class="feature-grid">
                    {FEATURES
                        .iter()
                        .map(|(title, blurb)| {
                            view! {
                                <div class="feature-card">
                                    <h3>{*title}</h3>
                                    <p>{*blurb}</p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </Reveal>
        </section>
    }
}

#[component]
fn SectionHeading(title: &'static str, subtitle: &'static str) -> impl IntoView {
    view! {
        <div class="section-header">
            <h2>{title}</h2>
            <p>{subtitle}</p>
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(Notifier::new());

    Effect::new(move || remove_loading_shell());

    let tour = controller("virtual tour", TourConfig::sample(), |config| {
        view! { <VirtualTour config=config /> }
    });
    let map = controller("monastery map", MapConfig::sample(), |config| {
        view! { <MonasteryMap config=config /> }
    });
    let calendar = controller("cultural calendar", CalendarConfig::sample(), |config| {
        view! { <CulturalCalendar config=config /> }
    });

    view! {
        <Navbar />
        <main>
            <Hero />
            <section id="tour" class="tour-section">
                <SectionHeading
                    title="Virtual Tours"
                    subtitle="Walk through Rumtek Monastery. Click hotspots to explore, drag to look around."
                />
                <Reveal>{tour}</Reveal>
            </section>
            <section id="map" class="map-section">
                <SectionHeading
                    title="Monastery Map"
                    subtitle="Hover a marker for a preview, click it for full details."
                />
                <Reveal>{map}</Reveal>
            </section>
            <section id="calendar" class="calendar-section">
                <SectionHeading
                    title="Cultural Calendar"
                    subtitle="Festivals and ceremonies across Sikkim's monasteries."
                />
                <Reveal>{calendar}</Reveal>
            </section>
            <section id="newsletter" class="newsletter-section">
                <SectionHeading
                    title="Stay Updated"
                    subtitle="New tours and festival dates, straight to your inbox."
                />
                <NewsletterForm />
            </section>
        </main>
        <footer class="footer">
            <p>"© Monastery360. Preserving Sikkim's monastic heritage."</p>
        </footer>
        <Notifications />
    }
}
