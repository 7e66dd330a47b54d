use monastery360_shared::config::{LOOK_SENSITIVITY, MAX_PITCH_DEG, MAX_SCALE, MIN_SCALE};

fn clamp_scale(scale: f64) -> f64 {
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Pan/zoom state of the SVG map. Rendered as a CSS transform, never parsed
/// back out of one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

/// Pointer position relative to the current translation, captured when a
/// drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    x: f64,
    y: f64,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
        }
    }
}

impl MapViewport {
    /// Multiply the scale by `factor`, clamped to the allowed range.
    pub fn zoom_by(&mut self, factor: f64) {
        self.scale = clamp_scale(self.scale * factor);
    }

    pub fn begin_drag(&self, client_x: f64, client_y: f64) -> DragAnchor {
        DragAnchor {
            x: client_x - self.translate_x,
            y: client_y - self.translate_y,
        }
    }

    pub fn drag_to(&mut self, anchor: DragAnchor, client_x: f64, client_y: f64) {
        self.translate_x = client_x - anchor.x;
        self.translate_y = client_y - anchor.y;
    }

    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Zoom and drag-to-look state of the tour image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookView {
    pub scale: f64,
    /// Vertical look angle in degrees, clamped so the image never flips.
    pub rotate_x: f64,
    /// Horizontal look angle in degrees. Unbounded: it only feeds a CSS rotation.
    pub rotate_y: f64,
}

impl Default for LookView {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotate_x: 0.0,
            rotate_y: 0.0,
        }
    }
}

impl LookView {
    pub fn zoom_by(&mut self, factor: f64) {
        self.scale = clamp_scale(self.scale * factor);
    }

    /// Apply a pointer movement in screen pixels.
    pub fn look(&mut self, dx: f64, dy: f64) {
        self.rotate_y += dx * LOOK_SENSITIVITY;
        self.rotate_x = (self.rotate_x + dy * LOOK_SENSITIVITY).clamp(-MAX_PITCH_DEG, MAX_PITCH_DEG);
    }

    pub fn css_transform(&self) -> String {
        format!(
            "rotateX({}deg) rotateY({}deg) scale({})",
            self.rotate_x, self.rotate_y, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monastery360_shared::config::{ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};

    #[test]
    fn zoom_stays_within_bounds_under_repetition() {
        let mut vp = MapViewport::default();
        for _ in 0..50 {
            vp.zoom_by(ZOOM_IN_FACTOR);
            assert!((MIN_SCALE..=MAX_SCALE).contains(&vp.scale));
        }
        assert_eq!(vp.scale, MAX_SCALE);
        for _ in 0..50 {
            vp.zoom_by(ZOOM_OUT_FACTOR);
            assert!((MIN_SCALE..=MAX_SCALE).contains(&vp.scale));
        }
        assert_eq!(vp.scale, MIN_SCALE);
    }

    #[test]
    fn zoom_clamps_from_out_of_range_start() {
        let mut view = LookView {
            scale: 10.0,
            ..LookView::default()
        };
        view.zoom_by(1.0);
        assert_eq!(view.scale, MAX_SCALE);
        view.scale = 0.01;
        view.zoom_by(ZOOM_IN_FACTOR);
        assert_eq!(view.scale, MIN_SCALE);
    }

    #[test]
    fn single_zoom_step_multiplies() {
        let mut vp = MapViewport::default();
        vp.zoom_by(ZOOM_IN_FACTOR);
        assert!((vp.scale - 1.2).abs() < 1e-12);
        vp.zoom_by(ZOOM_OUT_FACTOR);
        assert!((vp.scale - 0.96).abs() < 1e-12);
    }

    #[test]
    fn drag_translates_by_pointer_travel() {
        let mut vp = MapViewport::default();
        let anchor = vp.begin_drag(100.0, 100.0);
        vp.drag_to(anchor, 130.0, 90.0);
        assert_eq!((vp.translate_x, vp.translate_y), (30.0, -10.0));

        // A second drag continues from the current translation.
        let anchor = vp.begin_drag(0.0, 0.0);
        vp.drag_to(anchor, 5.0, 5.0);
        assert_eq!((vp.translate_x, vp.translate_y), (35.0, -5.0));
    }

    #[test]
    fn map_transform_combines_translate_and_scale() {
        let vp = MapViewport {
            translate_x: 12.0,
            translate_y: -4.0,
            scale: 1.5,
        };
        assert_eq!(vp.css_transform(), "translate(12px, -4px) scale(1.5)");
    }

    #[test]
    fn look_scales_deltas_and_clamps_pitch_only() {
        let mut view = LookView::default();
        view.look(100.0, 40.0);
        assert_eq!((view.rotate_x, view.rotate_y), (20.0, 50.0));

        view.look(1000.0, 1000.0);
        assert_eq!(view.rotate_x, MAX_PITCH_DEG);
        assert_eq!(view.rotate_y, 550.0);

        view.look(0.0, -1000.0);
        assert_eq!(view.rotate_x, -MAX_PITCH_DEG);
    }

    #[test]
    fn look_transform_keeps_zoom() {
        let mut view = LookView::default();
        view.zoom_by(2.0);
        view.look(-20.0, 0.0);
        assert_eq!(view.css_transform(), "rotateX(0deg) rotateY(-10deg) scale(2)");
    }
}
