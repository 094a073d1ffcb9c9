//! Metroidvania entry point
//!
//! In the browser this hosts the engine on `#canvas` and drives it from
//! `requestAnimationFrame`. Natively it runs a short headless session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, KeyboardEvent};

    use metroidvania::platform::web;
    use metroidvania::platform::{HostError, Session};
    use metroidvania::renderer::CanvasSurface;
    use metroidvania::{GameEngine, Settings};

    /// Session plus the context it draws on
    struct Game {
        session: Session<GameEngine>,
        ctx: CanvasRenderingContext2d,
    }

    pub fn run() {
        web::init_logging();
        log::info!("Metroidvania starting...");

        let mut ctx_slot = None;
        let session = Session::launch(|| {
            let document = web::document()?;
            let (_canvas, ctx) = web::canvas_context(&document, "canvas")?;
            ctx_slot = Some(ctx);
            let seed = web::session_seed();
            log::info!("Seed: {}", seed);
            Ok(GameEngine::new(Settings::load().with_seed(seed)))
        });

        if let Some(message) = session.error_message() {
            show_error(message);
            return;
        }
        let Some(ctx) = ctx_slot else {
            show_error(metroidvania::platform::session::INIT_FAILURE_MESSAGE);
            return;
        };

        let game = Rc::new(RefCell::new(Game { session, ctx }));

        if let Err(e) = setup_input_handlers(&game) {
            game.borrow_mut().session.fail(e);
            if let Some(message) = game.borrow().session.error_message() {
                show_error(message);
            }
            return;
        }

        request_animation_frame(game);
        log::info!("Metroidvania running!");
    }

    fn setup_input_handlers(game: &Rc<RefCell<Game>>) -> Result<(), HostError> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;

        let keydown = {
            let game = game.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().session.key_down(&event.key()) {
                    event.prevent_default();
                }
            })
        };
        let keyup = {
            let game = game.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().session.key_up(&event.key()) {
                    event.prevent_default();
                }
            })
        };

        let attached = window
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
            .map_err(|e| listener_error("keydown", e))
            .and_then(|_| {
                window
                    .add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())
                    .map_err(|e| listener_error("keyup", e))
            });

        // Registered even on failure so a partial attach is undone by `fail`
        let target = window.clone();
        game.borrow_mut().session.on_teardown(move || {
            let _ = target
                .remove_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
            let _ = target
                .remove_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref());
            log::info!("Input listeners detached");
        });
        attached?;

        // Page teardown
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().session.stop();
            });
            window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())
                .map_err(|e| listener_error("pagehide", e))?;
            closure.forget();
        }

        Ok(())
    }

    fn listener_error(event: &'static str, err: JsValue) -> HostError {
        HostError::Listener {
            event,
            reason: format!("{:?}", err),
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window disappeared, stopping loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, _time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let Game { session, ctx } = &mut *g;
            let mut surface = CanvasSurface::new(ctx);
            session.frame(&mut surface)
        };

        if keep_going {
            request_animation_frame(game);
        } else if let Some(message) = game.borrow().session.error_message() {
            show_error(message);
        }
    }

    /// Show a fatal message in `#error` (falls back to the console)
    fn show_error(message: &str) {
        let el = web::document()
            .ok()
            .and_then(|d| d.get_element_by_id("error"));
        match el {
            Some(el) => {
                el.set_text_content(Some(message));
                let _ = el.set_attribute("class", "");
            }
            None => log::error!("{}", message),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use metroidvania::platform::Session;
    use metroidvania::renderer::RecordingSurface;
    use metroidvania::{GameEngine, Settings};

    env_logger::init();
    log::info!("Metroidvania (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in the browser");

    let settings = match std::env::var("METROIDVANIA_SETTINGS") {
        Ok(json) => match Settings::from_json(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        Err(_) => Settings::default(),
    };

    // Walk right, hop, then drift back left
    let script: &[(u64, &str, bool)] = &[
        (10, "ArrowRight", true),
        (40, " ", true),
        (44, " ", false),
        (120, "ArrowRight", false),
        (180, "ArrowLeft", true),
        (260, "ArrowLeft", false),
    ];

    let mut session = Session::new(GameEngine::new(settings));
    let mut surface = RecordingSurface::new();
    for tick in 0..600u64 {
        for &(at, key, down) in script {
            if at == tick {
                if down {
                    session.key_down(key);
                } else {
                    session.key_up(key);
                }
            }
        }
        surface.clear();
        if !session.frame(&mut surface) {
            break;
        }
    }

    if let Some(engine) = session.engine() {
        match serde_json::to_string_pretty(&engine.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Snapshot failed: {}", e),
        }
        log::info!(
            "{} frames, {} draw commands in the last frame",
            session.frames(),
            surface.commands.len()
        );
    }
    session.stop();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
