//! Spot Kick entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use glam::Vec2;
    use spot_kick::consts::SIM_DT;
    use spot_kick::render::CanvasPainter;
    use spot_kick::{PointerEvent, Screen, Session, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        painter: CanvasPainter,
        canvas: HtmlCanvasElement,
        last_time: f64,
        last_screen: Screen,
    }

    impl Game {
        /// Client (page) coordinates to canvas pixels, accounting for CSS scaling
        fn to_canvas(&self, client_x: i32, client_y: i32) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            let scale_x = if rect.width() > 0.0 {
                self.canvas.width() as f64 / rect.width()
            } else {
                1.0
            };
            let scale_y = if rect.height() > 0.0 {
                self.canvas.height() as f64 / rect.height()
            } else {
                1.0
            };
            Vec2::new(
                ((client_x as f64 - rect.left()) * scale_x) as f32,
                ((client_y as f64 - rect.top()) * scale_y) as f32,
            )
        }

        fn pointer(&mut self, event: PointerEvent) {
            if let Some(launch) = self.session.pointer(event) {
                log::debug!(
                    "Shot {} launched at power {:.1}",
                    self.session.state().shots,
                    launch.power
                );
            }
        }

        fn update(&mut self, dt: f32) {
            self.session.advance(dt);
        }

        fn render(&self) {
            let commands = self.session.scene(&self.painter.assets());
            self.painter.paint(
                self.canvas.width() as f64,
                self.canvas.height() as f64,
                &commands,
            );
        }

        /// Show the DOM overlay matching the current screen
        fn update_overlays(&mut self) {
            let screen = self.session.screen();
            if screen == self.last_screen {
                return;
            }
            self.last_screen = screen;

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            set_visible(&document, "menu", screen == Screen::Menu);
            match screen {
                Screen::EndScreen(outcome) => {
                    if let Some(el) = document.get_element_by_id("endText") {
                        el.set_text_content(Some(outcome.label()));
                    }
                    set_visible(&document, "endScreen", true);
                    log::info!(
                        "{} ({} / {})",
                        outcome.label(),
                        self.session.state().goals,
                        self.session.state().shot_limit
                    );
                }
                _ => set_visible(&document, "endScreen", false),
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        {
            let display = if visible { "flex" } else { "none" };
            let _ = el.style().set_property("display", display);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Spot Kick starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let tuning = Tuning::load();
        // Write back so the stored copy lists every field for hand editing
        tuning.save();

        let seed = js_sys::Date::now() as u64;
        let mut session = Session::new(tuning, seed);
        session.resize(canvas.width() as f32, canvas.height() as f32);

        let game = Rc::new(RefCell::new(Game {
            session,
            painter: CanvasPainter::new(ctx)?,
            canvas: canvas.clone(),
            last_time: 0.0,
            last_screen: Screen::Menu,
        }));

        setup_input_handlers(&canvas, game.clone())?;
        setup_buttons(&document, game.clone())?;

        set_visible(&document, "menu", true);
        set_visible(&document, "endScreen", false);

        request_animation_frame(game);

        log::info!("Spot Kick running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Mouse down - grab the ball
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_canvas(event.client_x(), event.client_y());
                g.pointer(PointerEvent::Down(pos));
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse move - aim and pull
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_canvas(event.client_x(), event.client_y());
                g.pointer(PointerEvent::Move(pos));
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse up on the window so a release outside the canvas still shoots
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().pointer(PointerEvent::Up);
            });
            let window = web_sys::window().ok_or("no window")?;
            window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let pos = g.to_canvas(touch.client_x(), touch.client_y());
                    g.pointer(PointerEvent::Down(pos));
                }
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let pos = g.to_canvas(touch.client_x(), touch.client_y());
                    g.pointer(PointerEvent::Move(pos));
                }
            });
            canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().pointer(PointerEvent::Up);
            });
            canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("startBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().session.start(seed);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("retryBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().session.retry(seed);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_overlays();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Spot Kick (native) starting...");
    log::info!("Native mode plays a headless match - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);

    let outcome = autoplay::play_match(spot_kick::Tuning::load(), seed);
    match outcome {
        Some(outcome) => println!("{}", outcome.label()),
        None => log::error!("Match did not finish"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless player: full pull, aimed at the post away from the keeper
#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use glam::Vec2;
    use spot_kick::sim::{BallState, GameEvent, Outcome};
    use spot_kick::{PointerEvent, Screen, Session, Tuning};

    /// Ticks allowed before giving up on a match
    const TICK_LIMIT: u32 = 10_000;

    pub fn play_match(tuning: Tuning, seed: u64) -> Option<Outcome> {
        let mut session = Session::new(tuning, seed);
        session.start(seed);

        for _ in 0..TICK_LIMIT {
            if let Screen::EndScreen(outcome) = session.screen() {
                log::info!(
                    "Final score: {} / {}",
                    session.state().goals,
                    session.state().shot_limit
                );
                return Some(outcome);
            }

            let state = session.state();
            if state.ball.state == BallState::Resting && state.shots_remaining() > 0 {
                let aim_x = if state.keeper.center_x() > state.field.goal_center_x() {
                    state.field.aim_min_x
                } else {
                    state.field.aim_max_x
                };
                let rest = state.ball.rest;
                let pull = session.tuning().max_pull;
                session.pointer(PointerEvent::Down(rest));
                session.pointer(PointerEvent::Move(Vec2::new(aim_x, rest.y + pull)));
                if let Some(launch) = session.pointer(PointerEvent::Up) {
                    log::info!(
                        "Shot at x {:.0}, power {:.1}{}",
                        aim_x,
                        launch.power,
                        if launch.wrong_footed { ", keeper wrong-footed" } else { "" }
                    );
                }
            }

            for event in session.step() {
                if let GameEvent::ShotEnded(result) = event {
                    log::info!("{:?}", result);
                }
            }
        }
        None
    }
}
