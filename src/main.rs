//! Triage Dash entry point
//!
//! Browser: wires canvas, DOM HUD, keyboard and buttons to a [`Session`] and
//! drives it from `requestAnimationFrame`.
//! Native: plays a headless session with scripted input and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use triage_dash::Session;
    use triage_dash::platform::{Frontend, HudSink, HudSnapshot, KeyboardInput, RenderSink};
    use triage_dash::sim::{GamePhase, GameState, ItemKind, PatientStatus, patient_status};

    /// Canvas 2D render sink
    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
    }

    impl CanvasRenderer {
        fn rect(&self, color: &str, x: f32, y: f32, w: f32, h: f32) {
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
        }
    }

    impl RenderSink for CanvasRenderer {
        fn render(&mut self, state: &GameState) {
            let t = &state.tuning;
            self.rect("#10141c", 0.0, 0.0, t.stage_width, t.stage_height);
            self.rect("#2b3242", 0.0, t.floor_y, t.stage_width, t.stage_height - t.floor_y);

            if let Some(patient) = &state.patients.patient {
                let color = match patient_status(state) {
                    PatientStatus::Contacting => "#7ee2a8",
                    PatientStatus::Idle => "#e2d27e",
                    _ => "#8a8a8a",
                };
                self.rect(color, patient.pos.x, patient.pos.y, patient.size.x, patient.size.y);
                // Treatment progress
                let progress = (state.patients.contact_ms / t.patient_treat_ms).min(1.0);
                self.rect(
                    "#7ee2a8",
                    patient.pos.x,
                    patient.pos.y - 8.0,
                    patient.size.x * progress,
                    4.0,
                );
            }

            for hazard in &state.ground_hazards {
                self.rect("#d9534f", hazard.pos.x, hazard.pos.y, hazard.size.x, hazard.size.y);
            }

            for item in &state.items {
                let color = match item.kind {
                    ItemKind::Supply => "#5bc0de",
                    ItemKind::Hazard => "#f0ad4e",
                    ItemKind::Milestone => "#c38fff",
                };
                self.rect(color, item.pos.x, item.pos.y, item.size.x, item.size.y);
            }

            let p = &state.player;
            self.rect("#f5f5f5", p.pos.x, p.pos.y, p.size.x, p.size.y);
            // Facing marker
            let eye_x = if p.facing > 0.0 {
                p.pos.x + p.size.x - 12.0
            } else {
                p.pos.x + 4.0
            };
            self.rect("#10141c", eye_x, p.pos.y + 12.0, 8.0, 8.0);
        }
    }

    /// DOM HUD sink
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_class(&self, id: &str, class: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", class);
            }
        }
    }

    impl HudSink for DomHud {
        fn update_hud(&mut self, hud: &HudSnapshot) {
            self.set_text("hud-meter", &format!("{}%", hud.meter));
            let meter_class = if hud.meter_low { "hud-value low" } else { "hud-value" };
            self.set_class("hud-meter", meter_class);
            self.set_text("hud-strikes", &format!("{}/{}", hud.strikes, hud.max_strikes));
            self.set_text("hud-treated", &hud.treated.to_string());
            self.set_text("hud-milestones", &hud.milestones.to_string());

            let shown_when = |phase: GamePhase| if hud.phase == phase { "" } else { "hidden" };
            self.set_class("start-overlay", shown_when(GamePhase::Ready));
            self.set_class("pause-overlay", shown_when(GamePhase::Paused));
            if hud.phase == GamePhase::GameOver {
                self.set_class("game-over", "");
                self.set_text("final-score", &hud.final_score.unwrap_or(0).to_string());
            } else {
                self.set_class("game-over", "hidden");
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        frontend: Frontend<CanvasRenderer, DomHud>,
        keys: KeyboardInput,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            let input = self.keys.sample();
            self.frontend.frame(&mut self.session, time, &input);
        }

        fn start(&mut self) {
            let seed = js_sys::Date::now() as u64;
            let result = match self.session.phase() {
                GamePhase::GameOver => self.session.restart(seed),
                _ => self.session.start(seed),
            };
            if let Err(e) = result {
                log::warn!("{}", e);
            }
            self.keys.clear();
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Triage Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no #canvas element")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let session = Session::default();
        canvas.set_width(session.tuning().stage_width as u32);
        canvas.set_height(session.tuning().stage_height as u32);

        let game = Rc::new(RefCell::new(Game {
            session,
            frontend: Frontend::new(
                CanvasRenderer { ctx },
                DomHud {
                    document: document.clone(),
                },
            ),
            keys: KeyboardInput::new(),
        }));

        setup_keyboard(&window, game.clone())?;
        setup_buttons(&document, game.clone())?;
        setup_auto_pause(&document, game.clone())?;
        request_animation_frame(game);

        log::info!("Triage Dash running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let code = event.code();
                match code.as_str() {
                    "KeyP" | "Escape" => {
                        if let Err(e) = g.session.toggle_pause() {
                            log::debug!("{}", e);
                        }
                    }
                    "Enter" => g.start(),
                    _ => {
                        if g.keys.press(&code) {
                            event.prevent_default();
                        }
                    }
                }
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if game.borrow_mut().keys.release(&event.code()) {
                event.prevent_default();
            }
        });
        window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().start();
                });
                btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
        }
        Ok(())
    }

    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut g = game.borrow_mut();
                if g.session.phase() == GamePhase::Playing {
                    let _ = g.session.toggle_pause();
                    g.keys.clear();
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        )?;
        closure.forget();
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
        game.borrow_mut().frame(time);
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
    env_logger::init();
    log::info!("Triage Dash (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => triage_dash::Tuning::default(),
    };
    let seed = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);

    headless::run(tuning, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Result<triage_dash::Tuning, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(triage_dash::Tuning::from_json(&json)?)
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use triage_dash::sim::{GamePhase, TickInput};
    use triage_dash::{Session, Tuning};

    /// 60 Hz display
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Play one session with a random walk and report the outcome
    pub fn run(tuning: Tuning, seed: u64) {
        let mut session = Session::new(tuning);
        if let Err(e) = session.start(seed) {
            log::error!("{}", e);
            return;
        }

        let mut rng = Pcg32::seed_from_u64(seed ^ 0x5eed);
        let mut input = TickInput::default();
        let mut frames = 0;

        while frames < MAX_FRAMES && session.phase() == GamePhase::Playing {
            // Change intent roughly twice a second
            if rng.random_ratio(1, 30) {
                input = TickInput {
                    left: rng.random_bool(0.4),
                    right: rng.random_bool(0.4),
                    jump: rng.random_bool(0.2),
                };
            }
            session.frame(frames as f64 * FRAME_MS, &input);
            frames += 1;
        }

        let state = &session.state;
        log::info!(
            "Headless run finished after {:.1}s: phase {:?}, treated {}, milestones {}, strikes {}/{}, score {:?}",
            frames as f64 * FRAME_MS / 1000.0,
            state.phase,
            state.score.treated,
            state.score.milestones,
            state.strikes.count,
            state.strikes.max,
            state.final_score
        );
        println!(
            "score: {}",
            state
                .final_score
                .unwrap_or_else(|| triage_dash::final_score(&state.score))
        );
    }
}
