//! Window shell and the fixed-tick loop.
//!
//! The winit handler owns the whole game: it translates window events into
//! game commands, steps the session at 60 ticks per second regardless of the
//! redraw rate, and presents the software frame. Remote poster deliveries
//! are drained at the start of every tick, so gameplay state is only ever
//! mutated on this thread.

use crate::assets::ImageResolver;
use crate::config::Config;
use crate::core::frame::{Frame, Gfx};
use crate::core::input::{self, InputEvent};
use crate::core::net::{OmdbClient, TitleLookup};
use crate::game::catalog::Catalog;
use crate::game::session::{GameSession, Phase, TickEvent};
use crate::screens::{ScreenAction, results, running, title};
use crate::ui::scroll::ScrollState;
use log::{error, info};
use std::error::Error;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const TICK_SECONDS: f32 = 1.0 / 60.0;
// Cap per-frame catch-up so a long stall cannot spiral.
const MAX_FRAME_SECONDS: f32 = 0.25;

pub struct App {
    cfg: Config,
    catalog: Catalog,
    window: Option<Arc<Window>>,
    gfx: Option<Gfx>,
    frame: Frame,
    resolver: ImageResolver,
    session: GameSession,
    panel_scroll: ScrollState,
    results_scroll: ScrollState,
    last_frame_time: Instant,
    tick_accum: f32,
    cursor: (i32, i32),
}

pub fn run(cfg: Config, catalog: Catalog) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new()?;

    let lookup: Option<Arc<dyn TitleLookup>> = if cfg.enable_remote_posters {
        Some(Arc::new(OmdbClient::new(
            cfg.lookup_url.clone(),
            cfg.lookup_api_key.clone(),
        )))
    } else {
        info!("Remote poster lookup disabled; using local files and placeholders.");
        None
    };
    let resolver = ImageResolver::new(&cfg, lookup);
    let session = GameSession::new(&cfg, &catalog, 0, &mut rand::rng());
    let frame = Frame::new(cfg.screen_width, cfg.screen_height);

    let mut app = App {
        cfg,
        catalog,
        window: None,
        gfx: None,
        frame,
        resolver,
        session,
        panel_scroll: ScrollState::default(),
        results_scroll: ScrollState::default(),
        last_frame_time: Instant::now(),
        tick_accum: 0.0,
        cursor: (0, 0),
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}

impl App {
    fn route_input_event(&mut self, event_loop: &ActiveEventLoop, ev: InputEvent) {
        let action = match self.session.phase {
            Phase::Title => title::handle_input(&ev),
            Phase::Running => {
                running::handle_input(&mut self.session, &mut self.panel_scroll, &self.cfg, &ev)
            }
            Phase::Done => results::handle_input(
                &mut self.results_scroll,
                &self.cfg,
                &self.session.history,
                &ev,
            ),
        };
        match action {
            ScreenAction::None => {}
            ScreenAction::Begin => {
                info!("Starting run: {} pairs.", self.session.total_pairs());
                self.session.begin();
            }
            ScreenAction::Finish => {
                info!(
                    "Finishing early with {} of {} pairs picked.",
                    self.session.history.len(),
                    self.session.total_pairs()
                );
                self.session.finish();
                self.results_scroll = ScrollState::default();
            }
            ScreenAction::Reset => self.reset_session(),
            ScreenAction::Exit => {
                info!("Exit requested. Shutting down.");
                event_loop.exit();
            }
        }
    }

    /// Replaces the whole session aggregate; nothing from the old run
    /// survives, and the bumped generation fences off any poster lookups
    /// still in flight for it.
    fn reset_session(&mut self) {
        let generation = self.session.generation + 1;
        info!("Resetting for a fresh run (generation {generation}).");
        self.session = GameSession::new(&self.cfg, &self.catalog, generation, &mut rand::rng());
        self.panel_scroll = ScrollState::default();
        self.results_scroll = ScrollState::default();
    }

    fn advance(&mut self) {
        let now = Instant::now();
        let dt = now
            .duration_since(self.last_frame_time)
            .as_secs_f32()
            .min(MAX_FRAME_SECONDS);
        self.last_frame_time = now;
        self.tick_accum += dt;

        while self.tick_accum >= TICK_SECONDS {
            self.tick_accum -= TICK_SECONDS;

            while let Some(delivery) = self.resolver.poll_delivery() {
                self.session.apply_delivery(delivery);
            }

            match self.session.tick(&self.cfg, &mut self.resolver) {
                TickEvent::Selected(title) => {
                    info!("Selected '{title}'.");
                    // History grew: reclamp and pin the panel to the newest
                    // pick before the next render.
                    let vp = running::panel_viewport(&self.cfg);
                    let lay = running::panel_layout(&self.cfg, &self.session.history);
                    self.panel_scroll.follow_bottom(lay.total_height, vp.h);
                }
                TickEvent::Finished => {
                    info!("Pair pool exhausted; showing results.");
                    self.results_scroll = ScrollState::default();
                }
                TickEvent::None => {}
            }
        }
    }

    fn render(&mut self) {
        match self.session.phase {
            Phase::Title => title::draw(&mut self.frame, &self.cfg),
            Phase::Running => {
                running::draw(&mut self.frame, &self.cfg, &self.session, self.panel_scroll)
            }
            Phase::Done => results::draw(
                &mut self.frame,
                &self.cfg,
                &self.session.history,
                self.results_scroll,
            ),
        }
        if let Some(gfx) = &mut self.gfx
            && let Err(e) = gfx.present(&self.frame)
        {
            error!("Present failed: {e}");
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes()
            .with_title("reelrunner")
            .with_inner_size(PhysicalSize::new(self.cfg.screen_width, self.cfg.screen_height))
            .with_resizable(false);
        match event_loop.create_window(attrs) {
            Ok(window) => {
                let window = Arc::new(window);
                match Gfx::new(window.clone()) {
                    Ok(gfx) => {
                        self.gfx = Some(gfx);
                        self.window = Some(window);
                        self.last_frame_time = Instant::now();
                    }
                    Err(e) => {
                        error!("Failed to initialize renderer: {e}");
                        event_loop.exit();
                    }
                }
            }
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref().cloned() else {
            return;
        };
        if window_id != window.id() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested. Shutting down.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if new_size.width > 0 && new_size.height > 0
                    && let Some(gfx) = &mut self.gfx
                {
                    gfx.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(ev) = input::translate_key(&key_event) {
                    self.route_input_event(event_loop, ev);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as i32, position.y as i32);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let ev = input::translate_wheel(delta);
                self.route_input_event(event_loop, ev);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.cursor;
                self.route_input_event(event_loop, InputEvent::MouseDown { x, y });
            }
            WindowEvent::RedrawRequested => {
                self.advance();
                self.render();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
