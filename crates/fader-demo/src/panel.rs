//! Debug panel: one "progress" slider pinned to the top-right corner.
//!
//! Drag anywhere on the slider row to set the value. While idle the slider
//! mirrors the scroll-driven progress.

use fader_engine::coords::{Rect, Vec2, Viewport};
use fader_engine::input::{InputFrame, InputState, Key, MouseButton};
use fader_engine::paint::Color;
use fader_engine::render::passes::overlay::OverlayRect;

pub const STEP: f32 = 0.01;

const PANEL_SIZE: Vec2 = Vec2::new(260.0, 36.0);
const MARGIN: f32 = 12.0;
const PADDING: f32 = 14.0;
const TRACK_HEIGHT: f32 = 4.0;
const THUMB_SIZE: f32 = 12.0;

/// Rounds to the slider step inside [0, 1].
pub fn quantize(value: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    ((value.clamp(0.0, 1.0) / STEP).round() * STEP).clamp(0.0, 1.0)
}

/// Screen-space geometry of the panel for one viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PanelLayout {
    pub panel: Rect,
    pub track: Rect,
    /// Pointer presses inside this rect start a drag.
    pub hit: Rect,
}

impl PanelLayout {
    pub fn new(viewport: Viewport) -> Self {
        let panel = Rect::anchored_top_right(viewport, PANEL_SIZE, MARGIN);
        let track = Rect::new(
            panel.origin.x + PADDING,
            panel.center_y() - TRACK_HEIGHT * 0.5,
            (panel.size.x - 2.0 * PADDING).max(1.0),
            TRACK_HEIGHT,
        );
        let hit = Rect::new(
            track.origin.x - THUMB_SIZE * 0.5,
            panel.origin.y,
            track.size.x + THUMB_SIZE,
            panel.size.y,
        );
        Self { panel, track, hit }
    }

    /// Slider value under pointer x, quantized.
    pub fn value_at(&self, x: f32) -> f32 {
        quantize((x - self.track.origin.x) / self.track.size.x)
    }
}

/// What the panel did with this frame's input.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PanelResponse {
    pub toggled: bool,
    /// Set while the slider is being dragged.
    pub value: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct DebugPanel {
    visible: bool,
    value: f32,
    dragging: bool,

    background: Color,
    track_color: Color,
    fill_color: Color,
    thumb_color: Color,
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self {
            visible: true,
            value: 0.0,
            dragging: false,
            background: Color::from_straight(0.05, 0.05, 0.07, 0.85),
            track_color: Color::from_straight(0.15, 0.2, 0.3, 1.0),
            fill_color: Color::from_straight(0.2, 0.6, 1.0, 1.0),
            thumb_color: Color::from_straight(1.0, 1.0, 1.0, 1.0),
        }
    }
}

impl DebugPanel {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    #[cfg(test)]
    pub fn dragging(&self) -> bool {
        self.dragging
    }

    /// Folds this frame's input: `H` toggles visibility, left-button drags
    /// move the slider.
    pub fn handle_input(
        &mut self,
        viewport: Viewport,
        input: &InputState,
        frame: &InputFrame,
    ) -> PanelResponse {
        let mut response = PanelResponse::default();

        if frame.key_pressed(Key::H) {
            self.visible = !self.visible;
            self.dragging = false;
            response.toggled = true;
            log::debug!("debug panel {}", if self.visible { "shown" } else { "hidden" });
        }
        if !self.visible || !viewport.is_valid() {
            return response;
        }

        let layout = PanelLayout::new(viewport);
        let pointer = input.pointer_pos.map(Vec2::from);

        if frame.buttons_pressed.contains(&MouseButton::Left)
            && pointer.is_some_and(|p| layout.hit.contains(p))
        {
            self.dragging = true;
        }

        if self.dragging {
            if let Some(p) = pointer {
                self.value = layout.value_at(p.x);
            }
            response.value = Some(self.value);
        }

        if frame.buttons_released.contains(&MouseButton::Left)
            || !input.button_down(MouseButton::Left)
        {
            self.dragging = false;
        }

        response
    }

    /// Mirrors an externally driven progress unless the user is dragging.
    pub fn sync(&mut self, progress: f32) {
        if !self.dragging {
            self.value = quantize(progress);
        }
    }

    /// Rectangles to draw, back to front. Empty when hidden.
    pub fn rects(&self, viewport: Viewport) -> Vec<OverlayRect> {
        if !self.visible || !viewport.is_valid() {
            return Vec::new();
        }

        let layout = PanelLayout::new(viewport);
        let thumb_x = layout.track.origin.x + self.value * layout.track.size.x;
        let thumb = Rect::new(
            thumb_x - THUMB_SIZE * 0.5,
            layout.track.center_y() - THUMB_SIZE * 0.5,
            THUMB_SIZE,
            THUMB_SIZE,
        );

        vec![
            OverlayRect::new(layout.panel, self.background),
            OverlayRect::new(layout.track, self.track_color),
            OverlayRect::new(
                layout.track.with_width(self.value * layout.track.size.x),
                self.fill_color,
            ),
            OverlayRect::new(thumb, self.thumb_color),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fader_engine::input::{
        InputEvent, KeyState, Modifiers, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
    };

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    struct Harness {
        state: InputState,
        frame: InputFrame,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                state: InputState::default(),
                frame: InputFrame::default(),
            }
        }

        fn send(&mut self, ev: InputEvent) {
            self.state.apply_event(&mut self.frame, ev);
        }

        fn move_to(&mut self, x: f32, y: f32) {
            self.send(InputEvent::PointerMoved(PointerMoveEvent { x, y }));
        }

        fn button(&mut self, pressed: bool) {
            let (x, y) = self.state.pointer_pos.unwrap_or((0.0, 0.0));
            self.send(InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: if pressed { MouseButtonState::Pressed } else { MouseButtonState::Released },
                x,
                y,
                modifiers: Modifiers::default(),
            }));
        }

        fn press_h(&mut self) {
            for state in [KeyState::Pressed, KeyState::Released] {
                self.send(InputEvent::Key {
                    key: Key::H,
                    state,
                    modifiers: Modifiers::default(),
                    repeat: false,
                });
            }
        }

        fn run(&mut self, panel: &mut DebugPanel) -> PanelResponse {
            let r = panel.handle_input(VIEWPORT, &self.state, &self.frame);
            self.frame.clear();
            r
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn panel_is_pinned_top_right() {
        let l = PanelLayout::new(VIEWPORT);
        assert_eq!(l.panel.origin.y, MARGIN);
        assert!(approx(l.panel.max().x, VIEWPORT.width - MARGIN));
        assert!(l.hit.contains(Vec2::new(l.track.origin.x, l.track.center_y())));
    }

    #[test]
    fn pointer_x_maps_to_quantized_value() {
        let l = PanelLayout::new(VIEWPORT);
        assert_eq!(l.value_at(l.track.origin.x), 0.0);
        assert_eq!(l.value_at(l.track.max().x), 1.0);
        assert_eq!(l.value_at(l.track.origin.x - 50.0), 0.0);
        assert_eq!(l.value_at(l.track.max().x + 50.0), 1.0);

        let mid = l.value_at(l.track.origin.x + l.track.size.x * 0.5);
        assert!(approx(mid, 0.5));

        let v = l.value_at(l.track.origin.x + l.track.size.x * 0.423);
        assert!(approx(v, 0.42));
    }

    #[test]
    fn quantize_clamps_and_rounds() {
        assert!(approx(quantize(0.756), 0.76));
        assert_eq!(quantize(-1.0), 0.0);
        assert_eq!(quantize(7.0), 1.0);
        assert_eq!(quantize(f32::NAN), 0.0);
    }

    // ── interaction ───────────────────────────────────────────────────────

    #[test]
    fn h_toggles_visibility() {
        let mut panel = DebugPanel::new();
        let mut h = Harness::new();
        h.press_h();
        assert!(h.run(&mut panel).toggled);
        assert!(!panel.visible());
        assert!(panel.rects(VIEWPORT).is_empty());

        h.press_h();
        h.run(&mut panel);
        assert!(panel.visible());
        assert_eq!(panel.rects(VIEWPORT).len(), 4);
    }

    #[test]
    fn drag_sets_value_and_release_ends_it() {
        let mut panel = DebugPanel::new();
        let mut h = Harness::new();
        let l = PanelLayout::new(VIEWPORT);
        let y = l.track.center_y();

        h.move_to(l.track.origin.x + l.track.size.x * 0.25, y);
        h.button(true);
        let r = h.run(&mut panel);
        assert!(panel.dragging());
        assert!(approx(r.value.unwrap_or(-1.0), 0.25));

        // Leaving the panel while held keeps dragging.
        h.move_to(l.track.origin.x + l.track.size.x * 0.8, y + 200.0);
        let r = h.run(&mut panel);
        assert!(approx(r.value.unwrap_or(-1.0), 0.8));

        h.button(false);
        h.run(&mut panel);
        assert!(!panel.dragging());
    }

    #[test]
    fn press_outside_does_not_drag() {
        let mut panel = DebugPanel::new();
        let mut h = Harness::new();
        h.move_to(10.0, 500.0);
        h.button(true);
        let r = h.run(&mut panel);
        assert_eq!(r.value, None);
        assert!(!panel.dragging());
    }

    #[test]
    fn click_in_one_frame_sets_value() {
        let mut panel = DebugPanel::new();
        let mut h = Harness::new();
        let l = PanelLayout::new(VIEWPORT);
        h.move_to(l.track.origin.x + l.track.size.x * 0.6, l.track.center_y());
        h.button(true);
        h.button(false);
        let r = h.run(&mut panel);
        assert!(approx(r.value.unwrap_or(-1.0), 0.6));
        assert!(!panel.dragging());
    }

    #[test]
    fn sync_is_ignored_while_dragging() {
        let mut panel = DebugPanel::new();
        panel.sync(0.333);
        assert!(approx(panel.value(), 0.33));

        let mut h = Harness::new();
        let l = PanelLayout::new(VIEWPORT);
        h.move_to(l.track.origin.x, l.track.center_y());
        h.button(true);
        h.run(&mut panel);
        panel.sync(0.9);
        assert_eq!(panel.value(), 0.0);
    }

    #[test]
    fn fill_tracks_value() {
        let mut panel = DebugPanel::new();
        panel.sync(0.5);
        let rects = panel.rects(VIEWPORT);
        let l = PanelLayout::new(VIEWPORT);
        assert!(approx(rects[2].rect.size.x, l.track.size.x * 0.5));
    }
}
