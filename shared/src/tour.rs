use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::audio_guide::{AudioGuide, AudioSegment, TickOutcome};
use crate::config::{HOTSPOT_PITCH_FACTOR, HOTSPOT_YAW_FACTOR, TOUR_CONTAINER_ID};
use crate::error::{DatasetError, TourError};

const TOUR_JSON: &str = include_str!("../data/tour.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HotspotKind {
    Info { text: String },
    Scene { text: String, target: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    #[serde(default)]
    pub pitch: f64,
    #[serde(default)]
    pub yaw: f64,
    pub title: String,
    #[serde(flatten)]
    pub kind: HotspotKind,
}

impl Hotspot {
    pub fn text(&self) -> &str {
        match &self.kind {
            HotspotKind::Info { text } | HotspotKind::Scene { text, .. } => text,
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self.kind, HotspotKind::Scene { .. })
    }

    /// Overlay position as `(top%, left%)` of the viewer. A flat affine
    /// placeholder, not an equirectangular projection.
    pub fn overlay_position(&self) -> (f64, f64) {
        (
            50.0 - self.pitch * HOTSPOT_PITCH_FACTOR,
            50.0 + self.yaw * HOTSPOT_YAW_FACTOR,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub key: String,
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
    #[serde(default)]
    pub audio: Vec<AudioSegment>,
}

#[derive(Debug, Deserialize)]
struct TourData {
    start: String,
    scenes: Vec<Scene>,
}

/// Scenes keyed by name, with every link checked at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneGraph {
    scenes: HashMap<String, Scene>,
    start: String,
}

impl SceneGraph {
    pub fn new(scenes: Vec<Scene>, start: &str) -> Result<Self, TourError> {
        let mut map = HashMap::with_capacity(scenes.len());
        for scene in scenes {
            if map.contains_key(&scene.key) {
                return Err(TourError::DuplicateScene(scene.key));
            }
            map.insert(scene.key.clone(), scene);
        }
        if !map.contains_key(start) {
            return Err(TourError::MissingStartScene(start.to_string()));
        }
        for scene in map.values() {
            for hotspot in &scene.hotspots {
                if let HotspotKind::Scene { target, .. } = &hotspot.kind
                    && !map.contains_key(target)
                {
                    return Err(TourError::DanglingHotspot {
                        scene: scene.key.clone(),
                        hotspot: hotspot.title.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
        Ok(Self {
            scenes: map,
            start: start.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let data: TourData = serde_json::from_str(json).map_err(DatasetError::malformed("tour"))?;
        Ok(Self::new(data.scenes, &data.start)?)
    }

    pub fn sample() -> Result<Self, DatasetError> {
        Self::from_json(TOUR_JSON)
    }

    pub fn get(&self, key: &str) -> Option<&Scene> {
        self.scenes.get(key)
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

/// Mount configuration for the tour controller.
#[derive(Debug, Clone, PartialEq)]
pub struct TourConfig {
    pub container_id: String,
    pub graph: SceneGraph,
}

impl TourConfig {
    pub fn sample() -> Result<Self, DatasetError> {
        Ok(Self {
            container_id: TOUR_CONTAINER_ID.to_string(),
            graph: SceneGraph::sample()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HotspotAction {
    ShowInfo { title: String, text: String },
    Navigated { scene: String },
    /// Link to a scene that is not in the graph.
    Ignored,
}

/// Navigation state of one tour viewer: the current scene and its
/// (optionally mounted) audio guide.
#[derive(Debug, Clone, PartialEq)]
pub struct TourController {
    graph: SceneGraph,
    current: String,
    guide: Option<AudioGuide>,
}

impl TourController {
    pub fn new(graph: SceneGraph) -> Self {
        let current = graph.start().to_string();
        let mut controller = Self {
            graph,
            current,
            guide: None,
        };
        controller.mount_guide();
        controller
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn current_key(&self) -> &str {
        &self.current
    }

    pub fn current_scene(&self) -> &Scene {
        // `current` only ever holds keys that passed `SceneGraph::get`.
        &self.graph.scenes[&self.current]
    }

    /// Switch to `key`, remounting the audio guide for the new scene.
    /// Unknown keys leave everything untouched and return `false`.
    pub fn load_scene(&mut self, key: &str) -> bool {
        if self.graph.get(key).is_none() {
            log::debug!("ignoring unknown scene `{key}`");
            return false;
        }
        self.current = key.to_string();
        self.mount_guide();
        true
    }

    pub fn activate_hotspot(&mut self, hotspot: &Hotspot) -> HotspotAction {
        match &hotspot.kind {
            HotspotKind::Info { text } => HotspotAction::ShowInfo {
                title: hotspot.title.clone(),
                text: text.clone(),
            },
            HotspotKind::Scene { target, .. } => {
                if self.load_scene(target) {
                    HotspotAction::Navigated {
                        scene: target.clone(),
                    }
                } else {
                    HotspotAction::Ignored
                }
            }
        }
    }

    pub fn audio_guide(&self) -> Option<&AudioGuide> {
        self.guide.as_ref()
    }

    pub fn audio_guide_mut(&mut self) -> Option<&mut AudioGuide> {
        self.guide.as_mut()
    }

    /// Mount the guide if absent, unmount it if present. Unmounting drops
    /// all progress. Returns whether a guide is mounted afterwards.
    pub fn toggle_audio_guide(&mut self) -> bool {
        if self.guide.take().is_none() {
            self.mount_guide();
        }
        self.guide.is_some()
    }

    /// Whether the viewer should be running its audio tick. Any change that
    /// leaves no playing guide (pause, unmount, scene change, finish) turns
    /// this off.
    pub fn wants_ticker(&self) -> bool {
        self.guide.as_ref().is_some_and(AudioGuide::is_playing)
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.guide
            .as_mut()
            .map_or(TickOutcome::Idle, AudioGuide::tick)
    }

    fn mount_guide(&mut self) {
        let segments = self.current_scene().audio.clone();
        self.guide = (!segments.is_empty()).then(|| AudioGuide::new(segments));
    }
}
