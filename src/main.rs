//! Bluebook Blitz entry point
//!
//! Browser front end on wasm32; a scripted headless round natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, MouseEvent, PointerEvent};

    use bluebook_blitz::game::{
        DragSession, DragSurface, Game, GamePhase, LayoutProbe, Rect, SegmentId,
    };
    use bluebook_blitz::{Catalog, Settings};

    type SharedGame = Rc<RefCell<Game<WebSurface>>>;

    fn client_rect(el: &Element) -> Rect {
        let r = el.get_bounding_client_rect();
        Rect::from_xywh(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
    }

    fn pointer_pos(event: &MouseEvent) -> Vec2 {
        Vec2::new(event.client_x() as f32, event.client_y() as f32)
    }

    /// Tile id from the nearest `[data-id]` ancestor of the event target
    fn tile_id(event: &web_sys::Event) -> Option<(SegmentId, Element)> {
        let target: Element = event.target()?.dyn_into().ok()?;
        let tile = target.closest("[data-id]").ok()??;
        let id = tile.get_attribute("data-id")?.parse().ok()?;
        Some((SegmentId(id), tile))
    }

    /// Draft tile geometry read straight from the rendered DOM
    struct DomLayout<'a> {
        document: &'a Document,
    }

    impl LayoutProbe for DomLayout<'_> {
        fn bounds(&self, id: SegmentId) -> Option<Rect> {
            let selector = format!("#draft [data-id=\"{}\"]", id.0);
            let el = self.document.query_selector(&selector).ok()??;
            Some(client_rect(&el))
        }
    }

    fn workspace_rect(document: &Document) -> Rect {
        document
            .get_element_by_id("workspace")
            .map(|el| client_rect(&el))
            .unwrap_or_default()
    }

    /// Window pointer listeners for one drag session
    struct SessionListeners {
        on_move: Closure<dyn FnMut(PointerEvent)>,
        on_up: Closure<dyn FnMut(PointerEvent)>,
        on_cancel: Closure<dyn FnMut(PointerEvent)>,
    }

    /// Drag surface backed by the page: a floating `#drag-ghost` element and
    /// window-level pointer listeners
    pub struct WebSurface {
        document: Document,
        owner: Weak<RefCell<Game<WebSurface>>>,
        active: Option<SessionListeners>,
        // Released while one of them may still be dispatching; dropped on next acquire
        retired: Vec<SessionListeners>,
    }

    impl WebSurface {
        fn new(document: Document, owner: Weak<RefCell<Game<WebSurface>>>) -> Self {
            Self {
                document,
                owner,
                active: None,
                retired: Vec::new(),
            }
        }

        fn ghost(&self) -> Option<HtmlElement> {
            self.document.get_element_by_id("drag-ghost")?.dyn_into().ok()
        }
    }

    impl DragSurface for WebSurface {
        fn acquire_pointer_listeners(&mut self) {
            self.retired.clear();
            let Some(window) = web_sys::window() else {
                return;
            };

            let owner = self.owner.clone();
            let on_move = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let Some(game) = owner.upgrade() else {
                    return;
                };
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let layout = DomLayout { document: &document };
                let moved = game.borrow_mut().pointer_moved(pointer_pos(&event), &layout);
                // Re-render now so the next move measures the new order
                if moved.is_some() {
                    render(&game.borrow(), &document);
                }
            });

            let owner = self.owner.clone();
            let on_up = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let Some(game) = owner.upgrade() else {
                    return;
                };
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let workspace = workspace_rect(&document);
                game.borrow_mut().released(pointer_pos(&event), workspace);
                render(&game.borrow(), &document);
            });

            // Touch gestures taken over by the browser end with pointercancel, not pointerup
            let owner = self.owner.clone();
            let on_cancel = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let Some(game) = owner.upgrade() else {
                    return;
                };
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                if game.borrow_mut().cancel_drag() {
                    render(&game.borrow(), &document);
                }
            });

            let _ = window
                .add_event_listener_with_callback("pointermove", on_move.as_ref().unchecked_ref());
            let _ = window
                .add_event_listener_with_callback("pointerup", on_up.as_ref().unchecked_ref());
            let _ = window.add_event_listener_with_callback(
                "pointercancel",
                on_cancel.as_ref().unchecked_ref(),
            );
            self.active = Some(SessionListeners {
                on_move,
                on_up,
                on_cancel,
            });
        }

        fn release_pointer_listeners(&mut self) {
            let Some(listeners) = self.active.take() else {
                return;
            };
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback(
                    "pointermove",
                    listeners.on_move.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "pointerup",
                    listeners.on_up.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "pointercancel",
                    listeners.on_cancel.as_ref().unchecked_ref(),
                );
            }
            self.retired.push(listeners);
        }

        fn show_drag_visual(&mut self, session: &DragSession) {
            let Some(ghost) = self.ghost() else {
                log::warn!("#drag-ghost missing");
                return;
            };
            let origin = session.origin;
            let style = ghost.style();
            let _ = style.set_property("left", &format!("{}px", origin.min.x));
            let _ = style.set_property("top", &format!("{}px", origin.min.y));
            let _ = style.set_property("width", &format!("{}px", origin.size().x));
            let _ = style.set_property("height", &format!("{}px", origin.size().y));
            ghost.set_text_content(Some(&session.segment.text));
            let classes = ghost.class_list();
            let _ = classes.toggle_with_force("italic", session.segment.italic);
            let _ = classes.remove_1("hidden");
        }

        fn place_drag_visual(&mut self, top_left: Vec2) {
            if let Some(ghost) = self.ghost() {
                let style = ghost.style();
                let _ = style.set_property("left", &format!("{}px", top_left.x));
                let _ = style.set_property("top", &format!("{}px", top_left.y));
            }
        }

        fn hide_drag_visual(&mut self) {
            if let Some(ghost) = self.ghost() {
                let _ = ghost.class_list().add_1("hidden");
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn tile_element(document: &Document, id: SegmentId, text: &str, italic: bool) -> Option<Element> {
        let el = document.create_element("button").ok()?;
        let _ = el.set_attribute("data-id", &id.0.to_string());
        let _ = el.set_attribute("class", if italic { "tile italic" } else { "tile" });
        el.set_text_content(Some(text));
        Some(el)
    }

    /// Redraw screens, HUD, pool and draft from the game's read-only view
    fn render(game: &Game<WebSurface>, document: &Document) {
        let view = game.view();

        set_hidden(document, "menu", view.phase != GamePhase::Menu);
        set_hidden(document, "game-over", view.phase != GamePhase::GameOver);
        set_hidden(
            document,
            "play",
            matches!(view.phase, GamePhase::Menu | GamePhase::GameOver),
        );

        set_text(document, "score", &view.score.to_string());
        set_text(document, "lives", &view.lives.to_string());
        set_text(document, "streak", &view.streak.to_string());
        set_text(document, "final-score", &view.score.to_string());
        set_text(document, "description", view.description.unwrap_or_default());
        set_text(document, "hint", view.hint.unwrap_or_default());
        set_text(document, "feedback", view.feedback.unwrap_or_default());
        set_hidden(document, "feedback", view.feedback.is_none());

        if let Some(pool) = document.get_element_by_id("pool") {
            pool.set_inner_html("");
            for s in view.pool.iter() {
                if let Some(el) = tile_element(document, s.id, &s.text, s.italic) {
                    let _ = pool.append_child(&el);
                }
            }
        }

        if let Some(draft) = document.get_element_by_id("draft") {
            draft.set_inner_html("");
            for s in view.draft.iter() {
                if let Some(el) = tile_element(document, s.id, &s.text, s.italic) {
                    if view.dragging == Some(s.id) {
                        let _ = el.class_list().add_1("dragging");
                    }
                    let _ = draft.append_child(&el);
                }
            }
            for _ in 0..view.empty_slots {
                if let Ok(slot) = document.create_element("div") {
                    let _ = slot.set_attribute("class", "slot");
                    let _ = draft.append_child(&slot);
                }
            }
        }

        let round_over = matches!(view.phase, GamePhase::Success | GamePhase::RoundOverLoss);
        set_hidden(document, "reveal-btn", view.phase != GamePhase::Playing);
        set_hidden(document, "next-btn", !round_over);
        set_hidden(document, "submit-btn", round_over);
        set_text(
            document,
            "next-btn",
            if game.next_leads_to_game_over() { "Pack Your Things" } else { "Next Case" },
        );
        if let Some(btn) = document.get_element_by_id("submit-btn") {
            if view.can_submit {
                let _ = btn.remove_attribute("disabled");
            } else {
                let _ = btn.set_attribute("disabled", "");
            }
        }
    }

    /// Run `action` on the game, then redraw
    fn on_click<F>(document: &Document, id: &str, game: &SharedGame, action: F)
    where
        F: Fn(&mut Game<WebSurface>, &web_sys::Event) + 'static,
    {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("#{} missing", id);
            return;
        };
        let game = game.clone();
        let doc = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            action(&mut game.borrow_mut(), &event);
            render(&game.borrow(), &doc);
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(document: &Document, game: &SharedGame) {
        on_click(document, "start-btn", game, |g, _| g.start_game());
        on_click(document, "restart-btn", game, |g, _| g.start_game());
        on_click(document, "submit-btn", game, |g, _| {
            g.submit();
        });
        on_click(document, "reveal-btn", game, |g, _| {
            g.reveal_answer();
        });
        on_click(document, "next-btn", game, |g, _| {
            g.next_round();
        });
        // Click-to-add from the pool
        on_click(document, "pool", game, |g, event| {
            if let Some((id, _)) = tile_id(event) {
                g.add_to_draft(id);
            }
        });

        // Pointer-down on a draft tile starts a drag session
        if let Some(draft) = document.get_element_by_id("draft") {
            let game = game.clone();
            let doc = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let Some((id, tile)) = tile_id(&event) else {
                    return;
                };
                event.prevent_default();
                let started = game
                    .borrow_mut()
                    .pick_up(id, client_rect(&tile), pointer_pos(&event));
                if started {
                    render(&game.borrow(), &doc);
                }
            });
            let _ = draft
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: SharedGame, document: Document, last_time: f64) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, document, last_time, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Drives the Failure -> Playing delay
    fn game_loop(game: SharedGame, document: Document, last_time: f64, time: f64) {
        let dt = if last_time > 0.0 { ((time - last_time) / 1000.0) as f32 } else { 0.0 };
        let changed = {
            let mut g = game.borrow_mut();
            let before = g.phase();
            g.tick(dt.min(0.1));
            g.phase() != before
        };
        if changed {
            render(&game.borrow(), &document);
        }
        request_animation_frame(game, document, time);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bluebook Blitz starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let seed = js_sys::Date::now() as u64;
        let settings = Settings {
            seed: Some(seed),
            ..Settings::default()
        };
        let catalog = match Catalog::bundled(seed) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };

        let game: SharedGame = Rc::new_cyclic(|weak| {
            RefCell::new(Game::new(
                settings,
                Box::new(catalog),
                WebSurface::new(document.clone(), weak.clone()),
            ))
        });

        setup_input_handlers(&document, &game);
        render(&game.borrow(), &document);
        request_animation_frame(game, document, 0.0);

        log::info!("Bluebook Blitz running (seed {})", seed);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bluebook Blitz (native) starting...");
    log::info!("The playable version is the web build - run with `trunk serve`");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1966);
    if let Err(e) = headless_round(seed) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one round by script: draft the answer, drag a tile around, submit
#[cfg(not(target_arch = "wasm32"))]
fn headless_round(seed: u64) -> Result<(), bluebook_blitz::CatalogError> {
    use bluebook_blitz::game::{Game, HeadlessSurface, LayoutProbe, LayoutSnapshot, Rect};
    use bluebook_blitz::{Catalog, Settings};
    use glam::Vec2;

    let settings = Settings {
        seed: Some(seed),
        ..Settings::default()
    };
    let catalog = Catalog::bundled(seed)?;
    let mut game = Game::new(settings, Box::new(catalog), HeadlessSurface::default());
    game.start_game();

    let Some(puzzle) = game.puzzle() else {
        return Ok(());
    };
    println!("\n{}", puzzle.description);
    println!("Hint: {}", puzzle.hint);
    let answer: Vec<_> = puzzle.correct.iter().map(|s| s.id).collect();
    let Some((&first, rest)) = answer.split_first() else {
        return Ok(());
    };
    // Draft the answer with its first tile at the end, then drag it to the front
    for &id in rest.iter().chain(std::iter::once(&first)) {
        game.add_to_draft(id);
    }

    let workspace = Rect::from_xywh(0.0, 0.0, 1200.0, 120.0);
    let tile = Vec2::new(60.0, 30.0);
    let row_origin = Vec2::new(20.0, 40.0);
    let layout = LayoutSnapshot::row(game.board().draft(), row_origin, tile, 6.0);
    if let Some(origin) = layout.bounds(first) {
        game.pick_up(first, origin, origin.min + tile * 0.5);
        // Sweep left one neighbour at a time, re-measuring after each reorder
        while let Some(index) = game.board().draft_index(first).filter(|&i| i > 0) {
            let layout = LayoutSnapshot::row(game.board().draft(), row_origin, tile, 6.0);
            let left = game.board().draft()[index - 1].id;
            let Some(target) = layout.bounds(left) else {
                break;
            };
            if game.pointer_moved(target.min + tile * 0.5, &layout).is_none() {
                break;
            }
        }
        game.released(row_origin, workspace);
    }

    let draft: Vec<&str> = game.board().draft().iter().map(|s| s.text.as_str()).collect();
    println!("Draft: {}", draft.join(" "));
    match game.submit() {
        Some(verdict) => println!(
            "{:?}: {} (score {}, lives {})",
            verdict,
            game.feedback().unwrap_or_default(),
            game.score(),
            game.lives()
        ),
        None => println!("Nothing to submit"),
    }
    Ok(())
}
