//! Star Blaster entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent,
        Window,
    };

    use star_blaster::platform::{
        FrameClock, InputState, KeyCommand, Viewport, key_command, pointer_position,
    };
    use star_blaster::renderer::{Renderer, build_frame};
    use star_blaster::sim::{GameEvent, GamePhase, World, advance};
    use star_blaster::{GameError, HudController, HudSink, Result};

    const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

    fn js_error(err: JsValue) -> GameError {
        GameError::Platform(format!("{err:?}"))
    }

    fn element(document: &Document, id: &'static str) -> Result<Element> {
        document
            .get_element_by_id(id)
            .ok_or(GameError::MissingElement(id))
    }

    /// HUD text and overlays in the host page
    struct DomHud {
        score: Element,
        lives: Element,
        overlay: Element,
        gameover: Element,
        final_score: Element,
    }

    impl DomHud {
        fn new(document: &Document) -> Result<Self> {
            Ok(Self {
                score: element(document, "score")?,
                lives: element(document, "lives")?,
                overlay: element(document, "overlay")?,
                gameover: element(document, "gameover")?,
                final_score: element(document, "finalScore")?,
            })
        }

        fn set_hidden(el: &Element, hidden: bool) {
            let classes = el.class_list();
            let result = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
            if let Err(err) = result {
                log::warn!("Failed to toggle overlay: {err:?}");
            }
        }
    }

    impl HudSink for DomHud {
        fn set_score(&mut self, score: u64) {
            self.score.set_text_content(Some(&score.to_string()));
        }

        fn set_lives(&mut self, lives: u32) {
            self.lives.set_text_content(Some(&lives.to_string()));
        }

        fn set_start_overlay(&mut self, visible: bool) {
            Self::set_hidden(&self.overlay, !visible);
        }

        fn set_game_over(&mut self, final_score: Option<u64>) {
            if let Some(score) = final_score {
                self.final_score.set_text_content(Some(&score.to_string()));
            }
            Self::set_hidden(&self.gameover, final_score.is_none());
        }
    }

    /// Game instance holding all state
    struct Game {
        world: World,
        input: InputState,
        clock: FrameClock,
        renderer: Renderer,
        hud: HudController,
        dom: DomHud,
        /// A frame callback is scheduled
        looping: bool,
    }

    impl Game {
        fn start(&mut self) -> bool {
            if !self.world.start() {
                return false;
            }
            self.clock.reset();
            self.hud.sync(&self.world, &mut self.dom);
            true
        }

        fn frame(&mut self, time: f64) {
            let dt = self.clock.delta(time);
            let input = self.input.take_tick_input();
            advance(&mut self.world, &input, dt);

            for event in self.world.take_events() {
                match event {
                    GameEvent::PlayerHit { lives } => log::info!("Hit! {lives} lives left"),
                    GameEvent::GameOver { score } => log::info!("Game over, final score {score}"),
                    other => log::debug!("{other:?}"),
                }
            }

            self.render();
            self.hud.sync(&self.world, &mut self.dom);
        }

        fn render(&mut self) {
            let vertices = build_frame(&self.world);
            match self.renderer.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    self.renderer.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn resize(&mut self, viewport: Viewport) {
            self.world.resize(viewport.bounds());
            self.renderer.resize(viewport);
            // The loop only redraws while running
            if !self.looping {
                self.render();
            }
        }
    }

    /// Size the canvas to the window and return the resulting viewport
    fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> Viewport {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(FALLBACK_SIZE.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(FALLBACK_SIZE.1);

        let viewport = Viewport::new(width as f32, height as f32, window.device_pixel_ratio());
        let (backing_w, backing_h) = viewport.backing_size();
        canvas.set_width(backing_w);
        canvas.set_height(backing_h);

        let style = canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));
        viewport
    }

    /// Touch and mouse events both resolve to one client-space position
    fn event_position(event: &web_sys::Event) -> Option<Vec2> {
        let touch = event
            .dyn_ref::<TouchEvent>()
            .and_then(|e| e.touches().get(0))
            .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32));
        let mouse = event
            .dyn_ref::<MouseEvent>()
            .map(|e| Vec2::new(e.client_x() as f32, e.client_y() as f32));
        match (touch, mouse) {
            (touch, Some(mouse)) => Some(pointer_position(touch, mouse)),
            (touch, None) => touch,
        }
    }

    fn listen(
        target: &EventTarget,
        name: &str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<()> {
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        target
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            .map_err(js_error)?;
        closure.forget();
        Ok(())
    }

    pub async fn run() -> Result<()> {
        log::info!("Star Blaster starting...");

        let window = web_sys::window().ok_or_else(|| GameError::Platform("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| GameError::Platform("no document".into()))?;

        let canvas: HtmlCanvasElement = element(&document, "game")?
            .dyn_into()
            .map_err(|_| GameError::Platform("#game is not a canvas".into()))?;
        let viewport = fit_canvas(&window, &canvas);

        // Initialize wgpu, WebGPU first with WebGL as fallback
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let renderer = Renderer::new(surface, &adapter, viewport).await?;

        let seed = js_sys::Date::now() as u64;
        let mut game = Game {
            world: World::new(seed, viewport.bounds()),
            input: InputState::new(),
            clock: FrameClock::new(),
            renderer,
            hud: HudController::new(),
            dom: DomHud::new(&document)?,
            looping: false,
        };
        game.render();
        game.hud.sync(&game.world, &mut game.dom);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(game));
        setup_input_handlers(&window, &canvas, &game)?;
        setup_buttons(&document, &game)?;
        setup_resize(&window, canvas, &game)?;

        log::info!("Star Blaster ready");
        Ok(())
    }

    fn start_session(game: &Rc<RefCell<Game>>) {
        let kick = {
            let mut g = game.borrow_mut();
            if !g.start() {
                return;
            }
            let idle = !g.looping;
            g.looping = true;
            idle
        };
        if kick {
            request_animation_frame(game.clone());
        }
    }

    fn setup_input_handlers(
        window: &Window,
        canvas: &HtmlCanvasElement,
        game: &Rc<RefCell<Game>>,
    ) -> Result<()> {
        // Keyboard
        {
            let game = game.clone();
            listen(window, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = event.key();
                let command = {
                    let mut g = game.borrow_mut();
                    if g.input.key_down(&key) {
                        event.prevent_default();
                    }
                    key_command(&key)
                };
                match command {
                    Some(KeyCommand::Start) => start_session(&game),
                    Some(KeyCommand::ToggleAutopilot) => {
                        let on = game.borrow_mut().input.toggle_autopilot();
                        log::info!("Autopilot: {}", on);
                    }
                    None => {}
                }
            })?;
        }
        {
            let game = game.clone();
            listen(window, "keyup", move |event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    game.borrow_mut().input.key_up(&event.key());
                }
            })?;
        }

        // Pointer (mouse, pen and touch)
        {
            let game = game.clone();
            listen(canvas, "pointerdown", move |event| {
                if let Some(pos) = event_position(&event) {
                    game.borrow_mut().input.pointer_down(pos);
                }
            })?;
        }
        {
            let game = game.clone();
            listen(canvas, "pointermove", move |event| {
                if let Some(pos) = event_position(&event) {
                    game.borrow_mut().input.pointer_move(pos);
                }
            })?;
        }
        {
            let game = game.clone();
            listen(canvas, "touchmove", move |event| {
                event.prevent_default();
                if let Some(pos) = event_position(&event) {
                    game.borrow_mut().input.pointer_move(pos);
                }
            })?;
        }
        {
            let game = game.clone();
            listen(canvas, "pointerup", move |_event| {
                game.borrow_mut().input.pointer_up();
            })?;
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: &Rc<RefCell<Game>>) -> Result<()> {
        for id in ["startBtn", "restartBtn"] {
            let game = game.clone();
            let btn = element(document, id)?;
            listen(&btn, "click", move |_event| start_session(&game))?;
        }
        Ok(())
    }

    fn setup_resize(
        window: &Window,
        canvas: HtmlCanvasElement,
        game: &Rc<RefCell<Game>>,
    ) -> Result<()> {
        let game = game.clone();
        listen(window, "resize", move |_event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let viewport = fit_canvas(&window, &canvas);
            log::info!(
                "Resized to {}x{} @ {}x",
                viewport.css_width,
                viewport.css_height,
                viewport.dpr
            );
            game.borrow_mut().resize(viewport);
        })
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
        let keep_going = {
            let mut g = game.borrow_mut();
            g.frame(time);
            g.looping = g.world.phase == GamePhase::Running;
            g.looping
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(err) = wasm_game::run().await {
        log::error!("Star Blaster failed to start: {err}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use glam::Vec2;

    use star_blaster::Result;
    use star_blaster::edge;
    use star_blaster::sim::simulate;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);
    const STEP: f32 = 1.0 / 60.0;
    const MAX_SECS: f32 = 600.0;

    /// Print the edge handler response for a request path
    pub fn print_edge(path: &str) -> Result<()> {
        let resp = edge::route(path)?;
        println!("HTTP {}", resp.status);
        for (name, value) in &resp.headers {
            println!("{name}: {value}");
        }
        println!();
        println!("{}", resp.body);
        Ok(())
    }

    /// Play a headless autopilot session and print its summary as JSON
    pub fn run_session(seed: u64) -> Result<()> {
        log::info!("Headless session, seed {seed}");
        let summary = simulate(seed, BOUNDS, STEP, MAX_SECS);
        log::info!(
            "Session ended after {:.1}s with score {}",
            summary.elapsed_secs,
            summary.score
        );
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("edge") => native::print_edge(args.get(1).map_or("/", String::as_str)),
        Some(seed) => match seed.parse() {
            Ok(seed) => native::run_session(seed),
            Err(_) => {
                eprintln!("usage: star-blaster [seed] | star-blaster edge <path>");
                std::process::exit(2);
            }
        },
        None => native::run_session(1),
    };

    if let Err(err) = result {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}
