pub mod audio_guide;
pub mod calendar;
pub mod config;
pub mod error;
pub mod filter;
pub mod monastery;
pub mod newsletter;
pub mod notification;
pub mod tour;

pub use audio_guide::{AudioGuide, AudioSegment, PlaybackState, TickOutcome};
pub use calendar::{CalendarConfig, CalendarEvent, CalendarMonth, DayCell, EventCalendar};
pub use error::{DatasetError, TourError};
pub use filter::{MapFilters, matches_search, visible_ids};
pub use monastery::{Category, MapConfig, MarkerPlacement, Monastery};
pub use newsletter::{SignupPhase, validate_email};
pub use notification::{Notice, NoticeBoard, Severity};
pub use tour::{Hotspot, HotspotAction, HotspotKind, Scene, SceneGraph, TourConfig, TourController};
