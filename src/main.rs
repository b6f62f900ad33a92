//! Angel Flight entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        AddEventListenerOptions, CanvasRenderingContext2d, EventTarget, HtmlCanvasElement,
        HtmlElement, HtmlImageElement, KeyboardEvent, TouchEvent,
    };

    use angel_flight::audio::WebCuePlayer;
    use angel_flight::renderer::CanvasRenderer;
    use angel_flight::sim::{InputEvent, Key, Source, TouchTarget};
    use angel_flight::{FrameOutcome, Game, Tuning};

    /// Everything the browser callbacks share
    struct App {
        game: Game<WebCuePlayer>,
        renderer: CanvasRenderer,
        restart_btn: Option<HtmlElement>,
    }

    impl App {
        fn show_restart(&self, visible: bool) {
            if let Some(btn) = &self.restart_btn {
                let display = if visible { "inline-block" } else { "none" };
                btn.style().set_property("display", display).ok();
            }
        }
    }

    type Shared = Rc<RefCell<App>>;

    /// Tuning overrides embedded in the page, if any
    fn load_tuning(document: &web_sys::Document) -> Tuning {
        match document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        {
            Some(json) if !json.trim().is_empty() => Tuning::from_json_or_default(&json),
            _ => Tuning::default(),
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Angel Flight starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = load_tuning(&document);

        // Internal resolution follows the device pixel ratio, CSS controls
        // the displayed size
        let dpr = window.device_pixel_ratio().max(1.0);
        canvas.set_width((f64::from(tuning.playfield.x) * dpr) as u32);
        canvas.set_height((f64::from(tuning.playfield.y) * dpr) as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
        ctx.scale(dpr, dpr).ok();

        let sprite = HtmlImageElement::new().expect("Failed to create image");
        sprite.set_src("angel.png");

        let seed = js_sys::Date::now() as u64;
        let player = WebCuePlayer::new("");
        let app = Rc::new(RefCell::new(App {
            game: Game::new(tuning, seed, player),
            renderer: CanvasRenderer::new(ctx, sprite.clone()),
            restart_btn: document
                .get_element_by_id("restartBtn")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
        }));
        app.borrow().show_restart(false);

        setup_input_handlers(&canvas, app.clone());
        setup_restart_button(app.clone());

        // Wait for the sprite before the first frame
        if let Err(err) = JsFuture::from(sprite.decode()).await {
            log::warn!("angel sprite failed to load: {err:?}");
        }

        request_animation_frame(app);
        log::info!("Angel Flight running!");
    }

    fn listen<E, F>(target: &EventTarget, event: &str, passive: bool, handler: F)
    where
        E: FromWasmAbi + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .ok();
        closure.forget();
    }

    /// Touch-start/touch-end on one element drive one source
    fn bind_touch(target: &EventTarget, touch: TouchTarget, app: &Shared) {
        for (event, started) in [("touchstart", true), ("touchend", false), ("touchcancel", false)] {
            let app = app.clone();
            listen(target, event, false, move |event: TouchEvent| {
                event.prevent_default();
                let remaining = event.target_touches().length();
                if let Some(input) = InputEvent::from_touch(touch, started, remaining) {
                    app.borrow_mut().game.push_input(input);
                }
            });
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Shared) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Keyboard
        for (event, press) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            listen(&document, event, true, move |event: KeyboardEvent| {
                let Some(key) = Key::from_dom(&event.key()) else {
                    // Any key counts as the first interaction
                    if press {
                        app.borrow_mut().game.user_gesture();
                    }
                    return;
                };
                let source = Source::Key(key);
                let input = if press {
                    InputEvent::Press(source)
                } else {
                    InputEvent::Release(source)
                };
                app.borrow_mut().game.push_input(input);
            });
        }

        // Losing focus swallows key-up events
        {
            let app = app.clone();
            listen(&window, "blur", true, move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.push_input(InputEvent::ReleaseAll);
            });
        }

        // Touch on the play surface flaps
        bind_touch(canvas, TouchTarget::Surface, &app);

        // On-screen buttons
        for (id, target) in [
            ("btnLeft", TouchTarget::LeftButton),
            ("btnRight", TouchTarget::RightButton),
            ("btnFly", TouchTarget::FlyButton),
        ] {
            match document.get_element_by_id(id) {
                Some(el) => bind_touch(&el, target, &app),
                None => log::warn!("missing control button #{id}"),
            }
        }
    }

    fn setup_restart_button(app: Shared) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Some(btn) = document.get_element_by_id("restartBtn") else {
            log::warn!("missing #restartBtn - restart disabled");
            return;
        };

        listen(&btn, "click", true, move |_event: web_sys::MouseEvent| {
            let seed = js_sys::Date::now() as u64;
            let resume = {
                let mut a = app.borrow_mut();
                a.show_restart(false);
                a.game.restart(seed)
            };
            if resume {
                request_animation_frame(app.clone());
            }
        });
    }

    fn request_animation_frame(app: Shared) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
    }

    fn game_loop(app: Shared, time: f64) {
        let outcome = {
            let mut a = app.borrow_mut();
            let outcome = a.game.frame(time);
            let a = &*a;
            a.renderer.draw(a.game.draw_list());
            if outcome == FrameOutcome::Halt {
                a.show_restart(true);
            }
            outcome
        };

        if outcome == FrameOutcome::Continue {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    //! Native build: an autopilot session with no window or audio device

    use angel_flight::feedback::{Cue, CuePlayer};
    use angel_flight::sim::{InputEvent, Key, Source};
    use angel_flight::{FrameOutcome, Game, Tuning};

    /// Logs cues instead of playing them
    #[derive(Default)]
    pub struct LogCues;

    impl CuePlayer for LogCues {
        fn play_from_start(&mut self, cue: Cue) {
            log::debug!("cue {cue:?} play");
        }
        fn pause(&mut self, cue: Cue) {
            log::debug!("cue {cue:?} pause");
        }
        fn rewind(&mut self, _cue: Cue) {}
        fn set_loop(&mut self, _cue: Cue, _looping: bool) {}
        fn set_volume(&mut self, _cue: Cue, _volume: f32) {}
        fn is_paused(&self, _cue: Cue) -> bool {
            true
        }
    }

    const MAX_FRAMES: u32 = 60 * 120;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Chase the orb: steer toward it and flap while below it
    fn autopilot(game: &mut Game<LogCues>, held: &mut [bool; 3]) {
        let state = game.state();
        let angel = state.angel.center();
        let orb = state.orb.center;
        let wanted = [orb.x < angel.x - 4.0, orb.x > angel.x + 4.0, orb.y < angel.y];
        let keys = [Key::ArrowLeft, Key::ArrowRight, Key::Space];

        for ((want, was), key) in wanted.into_iter().zip(held.iter_mut()).zip(keys) {
            if want != *was {
                let source = Source::Key(key);
                let event = if want {
                    InputEvent::Press(source)
                } else {
                    InputEvent::Release(source)
                };
                game.push_input(event);
                *was = want;
            }
        }
    }

    pub fn run(seed: u64) {
        let mut game = Game::new(Tuning::default(), seed, LogCues);
        let mut held = [false; 3];

        for frame in 0..MAX_FRAMES {
            autopilot(&mut game, &mut held);
            if game.frame(f64::from(frame) * FRAME_MS) == FrameOutcome::Halt {
                break;
            }
        }

        let state = game.state();
        println!(
            "Headless session: {} frames, score {}, lives left {}{}",
            state.frame,
            state.score,
            state.lives_remaining(),
            if state.is_game_over() { " (game over)" } else { "" },
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Angel Flight (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xA9E1);
    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
