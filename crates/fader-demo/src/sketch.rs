//! The demo app: folds input into the fade state, renders the two active
//! scenes off-screen and cross-fades them onto the window.

use std::time::Instant;

use anyhow::Result;
use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::event::WindowEvent;
use winit::window::WindowId;

use fader_engine::coords::Viewport;
use fader_engine::core::{App, AppControl, FrameCtx};
use fader_engine::input::{InputFrame, InputState, Key};
use fader_engine::render::passes::crossfade::CrossfadePass;
use fader_engine::render::passes::overlay::{OverlayRect, RectRenderer};
use fader_engine::render::passes::scene::ScenePass;
use fader_engine::render::{PerspectiveCamera, RenderCtx, RenderTarget};
use fader_engine::window::RuntimeCtx;

use crate::config::DemoConfig;
use crate::fade::{Blend, FadeState};
use crate::fling::FlingDetector;
use crate::panel::DebugPanel;
use crate::scenes::{SceneSet, SCENES};

/// GPU side, built on the first frame once a device exists.
struct SketchGpu {
    scene_pass: ScenePass,
    scenes: SceneSet,
    crossfade: CrossfadePass,
    overlay: RectRenderer,
}

impl SketchGpu {
    fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        config: &DemoConfig,
        target_size: (u32, u32),
        rng: &mut StdRng,
    ) -> Result<Self> {
        let scene_pass = ScenePass::new(device);
        let scenes = SceneSet::build(
            device,
            queue,
            &scene_pass,
            &config.asset_dir,
            config.instances_per_scene,
            target_size,
            rng,
        )?;

        Ok(Self {
            scene_pass,
            scenes,
            crossfade: CrossfadePass::new(),
            overlay: RectRenderer::new(),
        })
    }

    fn draw(
        &mut self,
        rctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &PerspectiveCamera,
        group: Mat4,
        blend: Blend,
        overlay: &[OverlayRect],
    ) {
        let (Some(from), Some(to)) = (self.scenes.get(blend.current), self.scenes.get(blend.next))
        else {
            return;
        };

        self.scene_pass
            .draw(rctx.queue, target.encoder, &from.target, &from.batch, camera, group);
        if blend.next != blend.current {
            self.scene_pass
                .draw(rctx.queue, target.encoder, &to.target, &to.batch, camera, group);
        }

        self.crossfade
            .render(rctx, target, &from.target, &to.target, blend.progress);
        self.overlay.render(rctx, target, overlay);
    }
}

pub struct Sketch {
    config: DemoConfig,
    fade: FadeState,
    fling: Option<FlingDetector>,
    panel: DebugPanel,
    camera: PerspectiveCamera,

    /// Animation time; drives the group rotation.
    time: f32,

    rng: StdRng,
    gpu: Option<SketchGpu>,
    title_key: Option<(usize, usize, u32)>,
}

impl Sketch {
    pub fn new(config: DemoConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("instance seed {seed} (set FADER_SEED to reproduce)");

        let camera = PerspectiveCamera::new(config.fov_y_degrees, 1.0, config.near, config.far)
            .with_position(Vec3::new(0.0, 0.0, config.camera_z));

        Self {
            fade: FadeState::new(SCENES.len(), config.scroll_scale),
            fling: config.fling_filter.then(FlingDetector::default),
            panel: DebugPanel::new(),
            camera,
            time: 0.0,
            rng: StdRng::seed_from_u64(seed),
            gpu: None,
            title_key: None,
            config,
        }
    }

    #[cfg(test)]
    pub fn blend(&self) -> Blend {
        self.fade.blend()
    }

    #[cfg(test)]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// Applies this frame's buffered input to the fade state and the panel.
    ///
    /// Wheel deltas go first; an active slider drag then overrides the
    /// fractional part.
    fn apply_input(
        &mut self,
        viewport: Viewport,
        input: &InputState,
        frame: &InputFrame,
        now: Instant,
    ) {
        for delta in frame.wheel_deltas() {
            let dy = delta.y_pixels();
            if let Some(fling) = self.fling.as_mut() {
                if fling.check(dy, now).is_none() {
                    log::trace!("dropped inertial wheel delta {dy:.1}");
                    continue;
                }
            }
            self.fade.apply_wheel(dy);
        }

        let response = self.panel.handle_input(viewport, input, frame);
        if let Some(value) = response.value {
            self.fade.set_progress(value);
        }
        self.panel.sync(self.fade.blend().progress);
    }

    /// Advances animation time by `dt` seconds; returns the group transform.
    fn advance(&mut self, dt: f32) -> Mat4 {
        if dt.is_finite() && dt > 0.0 {
            self.time += dt * self.config.time_rate;
        }
        self.group_transform()
    }

    fn group_transform(&self) -> Mat4 {
        Mat4::from_rotation_y(self.time * self.config.rotation_speed)
    }

    /// Title text when it changed since the last call.
    fn title_update(&mut self, blend: Blend) -> Option<String> {
        let key = (blend.current, blend.next, (self.panel.value() * 100.0).round() as u32);
        if self.title_key == Some(key) {
            return None;
        }
        self.title_key = Some(key);
        Some(format!(
            "fader: scene {} -> {}, progress {:.2}",
            blend.current,
            blend.next,
            self.panel.value()
        ))
    }

    /// Keeps the camera aspect at exactly `width / height`.
    fn handle_resize(&mut self, width: u32, height: u32) {
        let before = self.camera.aspect;
        if self.camera.resize(width, height) && self.camera.aspect != before {
            log::info!("resized to {width}x{height} (aspect {:.4})", self.camera.aspect);
        }
    }

    fn push_title(&mut self, runtime: &mut RuntimeCtx, blend: Blend) {
        if let Some(title) = self.title_update(blend) {
            runtime.set_title(title);
        }
    }
}

impl App for Sketch {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        if let WindowEvent::Resized(size) = event {
            self.handle_resize(size.width, size.height);
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }

        let (w, h) = ctx.window.logical_size();
        let viewport = Viewport::new(w, h);
        self.apply_input(viewport, ctx.input, ctx.input_frame, ctx.time.now);

        let surface_size = ctx.surface_size();
        self.handle_resize(surface_size.0, surface_size.1);

        if self.gpu.is_none() {
            match SketchGpu::new(
                ctx.gpu.device(),
                ctx.gpu.queue(),
                &self.config,
                surface_size,
                &mut self.rng,
            ) {
                Ok(gpu) => self.gpu = Some(gpu),
                Err(e) => {
                    ctx.runtime.fail(e.context("failed to build scenes"));
                    return AppControl::Exit;
                }
            }
        }
        let blend = self.fade.blend();
        let group = self.group_transform();
        let overlay = self.panel.rects(viewport);

        let Some(gpu) = self.gpu.as_mut() else {
            return AppControl::Continue;
        };
        gpu.scenes.ensure_target_size(ctx.gpu.device(), surface_size);
        let camera = &self.camera;

        let control = ctx.render(self.config.clear_color, |rctx, target| {
            gpu.draw(rctx, target, camera, group, blend, &overlay);
        });

        self.advance(ctx.time.dt);
        self.push_title(ctx.runtime, blend);
        control
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fader_engine::input::{
        InputEvent, Modifiers, MouseButton, MouseButtonState, MouseWheelDelta,
        PointerButtonEvent, PointerMoveEvent,
    };

    use crate::panel::PanelLayout;

    const VIEWPORT: Viewport = Viewport::new(1280.0, 720.0);

    fn sketch(config: DemoConfig) -> Sketch {
        Sketch::new(DemoConfig { seed: Some(5), ..config })
    }

    fn wheel(frame: &mut InputFrame, state: &mut InputState, delta: MouseWheelDelta) {
        state.apply_event(
            frame,
            InputEvent::MouseWheel {
                delta,
                modifiers: Modifiers::default(),
            },
        );
    }

    // ── input ─────────────────────────────────────────────────────────────

    #[test]
    fn wheel_down_advances_fade() {
        let mut s = sketch(DemoConfig::default());
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        wheel(&mut frame, &mut state, MouseWheelDelta::Pixel { x: 0.0, y: -1000.0 });

        s.apply_input(VIEWPORT, &state, &frame, Instant::now());
        assert_eq!(s.blend(), Blend { current: 0, next: 1, progress: 0.25 });
    }

    #[test]
    fn line_deltas_use_line_height() {
        let mut s = sketch(DemoConfig::default());
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        wheel(&mut frame, &mut state, MouseWheelDelta::Line { x: 0.0, y: -20.0 });

        s.apply_input(VIEWPORT, &state, &frame, Instant::now());
        assert!((s.blend().progress - 0.225).abs() < 1e-6);
    }

    #[test]
    fn about_ninety_notches_per_scene() {
        let mut s = sketch(DemoConfig::default());
        let mut state = InputState::default();
        let start = Instant::now();

        let mut notches = 0;
        while s.blend().current == 0 && notches < 1000 {
            let mut frame = InputFrame::default();
            wheel(&mut frame, &mut state, MouseWheelDelta::Line { x: 0.0, y: -1.0 });
            s.apply_input(VIEWPORT, &state, &frame, start);
            notches += 1;
        }
        assert_eq!(s.blend().current, 1);
        assert!((88..=90).contains(&notches), "took {notches} notches");
    }

    #[test]
    fn fling_filter_drops_decaying_tail() {
        let mut s = sketch(DemoConfig { fling_filter: true, ..DemoConfig::default() });
        let mut state = InputState::default();
        let start = Instant::now();

        let mut total_applied = 0.0;
        for i in 0..16 {
            let mut frame = InputFrame::default();
            let dy = -(1000.0 - 50.0 * i as f32);
            wheel(&mut frame, &mut state, MouseWheelDelta::Pixel { x: 0.0, y: dy });
            let before = s.fade.scalar();
            s.apply_input(VIEWPORT, &state, &frame, start + std::time::Duration::from_millis(10 * i));
            if s.fade.scalar() != before {
                total_applied += dy;
            }
        }
        // The last event of the tail is classified inertial and dropped.
        let all: f32 = (0..16).map(|i| -(1000.0 - 50.0 * i as f32)).sum();
        assert!(total_applied > all);
    }

    #[test]
    fn slider_drag_writes_progress() {
        let mut s = sketch(DemoConfig::default());
        s.fade.set_scalar(2.1);

        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let l = PanelLayout::new(VIEWPORT);
        let (x, y) = (l.track.origin.x + l.track.size.x * 0.5, l.track.center_y());
        state.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x, y }));
        state.apply_event(
            &mut frame,
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                x,
                y,
                modifiers: Modifiers::default(),
            }),
        );

        s.apply_input(VIEWPORT, &state, &frame, Instant::now());
        let b = s.blend();
        assert_eq!((b.current, b.next), (2, 0));
        assert!((b.progress - 0.5).abs() < 1e-5);
    }

    #[test]
    fn idle_panel_mirrors_scroll() {
        let mut s = sketch(DemoConfig::default());
        s.fade.set_scalar(1.37);
        s.apply_input(VIEWPORT, &InputState::default(), &InputFrame::default(), Instant::now());
        assert!((s.panel.value() - 0.37).abs() < 1e-5);
    }

    // ── animation ─────────────────────────────────────────────────────────

    #[test]
    fn time_advances_at_configured_rate() {
        let mut s = sketch(DemoConfig::default());
        s.advance(0.5);
        assert!((s.time - 1.5).abs() < 1e-6);
        let expected = Mat4::from_rotation_y(1.5 * 0.1);
        assert!(s.group_transform().abs_diff_eq(expected, 1e-6));

        s.advance(f32::NAN);
        assert!((s.time - 1.5).abs() < 1e-6);
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_sets_exact_aspect() {
        let mut s = sketch(DemoConfig::default());
        s.handle_resize(1920, 1080);
        assert_eq!(s.camera().aspect, 1920.0 / 1080.0);

        s.handle_resize(1001, 333);
        assert_eq!(s.camera().aspect, 1001.0 / 333.0);

        // Minimized windows keep the previous aspect.
        s.handle_resize(0, 0);
        assert_eq!(s.camera().aspect, 1001.0 / 333.0);
    }

    #[test]
    fn camera_uses_configured_projection() {
        let s = sketch(DemoConfig::default());
        let c = s.camera();
        assert!((c.fov_y - 70f32.to_radians()).abs() < 1e-6);
        assert_eq!(c.position, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!((c.near, c.far), (0.001, 1000.0));
    }

    // ── title ─────────────────────────────────────────────────────────────

    #[test]
    fn title_updates_only_on_change() {
        let mut s = sketch(DemoConfig::default());
        let b = s.blend();
        assert_eq!(
            s.title_update(b).as_deref(),
            Some("fader: scene 0 -> 1, progress 0.00")
        );
        assert_eq!(s.title_update(b), None);

        s.fade.set_scalar(2.75);
        s.panel.sync(s.fade.blend().progress);
        let b = s.blend();
        assert_eq!(
            s.title_update(b).as_deref(),
            Some("fader: scene 2 -> 0, progress 0.75")
        );
    }
}
