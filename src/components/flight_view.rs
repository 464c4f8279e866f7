use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, HtmlElement, TouchEvent, Window};
use yew::prelude::*;

use crate::config::FlightConfig;
use crate::map::{self, LeafletHandle};
use crate::state::FlightSession;
use crate::util::{clog, cwarn, cwarn_js};

#[derive(Properties, PartialEq, Clone)]
pub struct FlightViewProps {
    pub config: Rc<FlightConfig>,
    pub on_win: Callback<()>,
}

fn viewport(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

fn first_touch(e: &TouchEvent) -> Option<(f64, f64)> {
    e.touches()
        .item(0)
        .map(|t| (t.client_x() as f64, t.client_y() as f64))
}

fn plane_transform(deg: f64) -> String {
    format!("translate(-50%, -50%) rotate({deg:.2}deg)")
}

#[function_component(FlightView)]
pub fn flight_view(props: &FlightViewProps) -> Html {
    let root_ref = use_node_ref();
    let plane_ref = use_node_ref();

    {
        let root_ref = root_ref.clone();
        let plane_ref = plane_ref.clone();
        let config = props.config.clone();
        let on_win = props.on_win.clone();

        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let root: HtmlElement = root_ref
                .cast::<HtmlElement>()
                .expect("root_ref not attached to an element");

            let session = Rc::new(RefCell::new(FlightSession::new((*config).clone())));
            let mut leaflet: Option<LeafletHandle> = match map::init_map(&config) {
                Ok(handle) => {
                    map::disable_interactions(&handle);
                    Some(handle)
                }
                Err(e) => {
                    cwarn_js("map unavailable, flying without panning", &e);
                    None
                }
            };

            // Touch start / move share one handler
            let touch_cb = {
                let session = session.clone();
                let window = window.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    session
                        .borrow_mut()
                        .touch_event(first_touch(&e), viewport(&window));
                }) as Box<dyn FnMut(TouchEvent)>)
            };
            let touch_end_cb = {
                let session = session.clone();
                let window = window.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    e.prevent_default();
                    session
                        .borrow_mut()
                        .touch_lifted(first_touch(&e), viewport(&window));
                }) as Box<dyn FnMut(TouchEvent)>)
            };

            let opts = AddEventListenerOptions::new();
            opts.set_passive(false);
            for (kind, cb) in [
                ("touchstart", &touch_cb),
                ("touchmove", &touch_cb),
                ("touchend", &touch_end_cb),
                ("touchcancel", &touch_end_cb),
            ] {
                if let Err(e) = root.add_event_listener_with_callback_and_add_event_listener_options(
                    kind,
                    cb.as_ref().unchecked_ref(),
                    &opts,
                ) {
                    cwarn_js(&format!("could not listen for {kind}"), &e);
                }
            }

            // RAF loop
            let raf_id = Rc::new(RefCell::new(None));
            let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                Rc::new(RefCell::new(None));
            {
                let raf_id_clone = raf_id.clone();
                let closure_cell_clone = closure_cell.clone();
                let window_loop = window.clone();
                let session = session.clone();
                *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    let outcome = session.borrow_mut().step(leaflet.as_mut());
                    if let Some(plane) = plane_ref.cast::<HtmlElement>() {
                        if let Err(e) = plane
                            .style()
                            .set_property("transform", &plane_transform(outcome.rotation_deg))
                        {
                            cwarn_js("could not rotate plane icon", &e);
                        }
                    }
                    if outcome.won_now {
                        clog(&format!(
                            "target reached ({:.1} km away)",
                            outcome.distance_km.unwrap_or_default()
                        ));
                        on_win.emit(());
                    }
                    if !outcome.keep_running {
                        clog("flight loop stopped");
                        *raf_id_clone.borrow_mut() = None;
                        return;
                    }
                    let next = closure_cell_clone.borrow().as_ref().map(|cb| {
                        window_loop.request_animation_frame(cb.as_ref().unchecked_ref())
                    });
                    match next {
                        Some(Ok(id)) => *raf_id_clone.borrow_mut() = Some(id),
                        Some(Err(e)) => cwarn_js("requestAnimationFrame failed", &e),
                        None => {}
                    }
                }) as Box<dyn FnMut()>));
            }
            let first = closure_cell.borrow().as_ref().map(|cb| {
                window.request_animation_frame(cb.as_ref().unchecked_ref())
            });
            match first {
                Some(Ok(id)) => *raf_id.borrow_mut() = Some(id),
                Some(Err(e)) => cwarn_js("could not start flight loop", &e),
                None => cwarn("flight loop closure missing"),
            }

            // Cleanup
            let window_clone = window.clone();
            move || {
                for (kind, cb) in [
                    ("touchstart", &touch_cb),
                    ("touchmove", &touch_cb),
                    ("touchend", &touch_end_cb),
                    ("touchcancel", &touch_end_cb),
                ] {
                    if let Err(e) =
                        root.remove_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
                    {
                        cwarn_js(&format!("could not remove {kind} listener"), &e);
                    }
                }
                if let Some(id) = raf_id.borrow_mut().take() {
                    if let Err(e) = window_clone.cancel_animation_frame(id) {
                        cwarn_js("could not cancel pending frame", &e);
                    }
                }
                // breaks the closure's reference to itself
                closure_cell.borrow_mut().take();
            }
        });
    }

    let cfg = &props.config;
    html! {<div ref={root_ref} style="position:relative; width:100vw; height:100vh; overflow:hidden; touch-action:none;">
        <div id={map::leaflet::CONTAINER_ID} style="position:absolute; inset:0;"></div>
        <img
            ref={plane_ref}
            src={cfg.plane_icon.clone()}
            alt="plane"
            style={format!("position:absolute; left:50%; top:50%; width:64px; height:64px; transform:{}; pointer-events:none; z-index:1000;", plane_transform(0.0))}
        />
    </div>}
}
