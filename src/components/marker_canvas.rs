use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, TouchEvent, WheelEvent};
use yew::prelude::*;

use super::toolbar::Toolbar;
use crate::config::ViewConfig;
use crate::model::MarkerStore;
use crate::state::{TouchState, Viewport, ZoomDirection};
use crate::util::{DrawFn, Listener, client_point, redraw, touch_point};

#[derive(Properties, PartialEq, Clone)]
pub struct MarkerCanvasProps {
    pub config: ViewConfig,
    pub on_open_settings: Callback<()>,
}

/// Match the canvas backing store to its CSS box.
fn fit_canvas(canvas: &HtmlCanvasElement) {
    let w = canvas.client_width().max(0) as u32;
    let h = canvas.client_height().max(0) as u32;
    if canvas.width() != w || canvas.height() != h {
        canvas.set_width(w);
        canvas.set_height(h);
        log::debug!("canvas resized to {w}x{h}");
    }
}

fn draw(canvas: &HtmlCanvasElement, viewport: &Viewport, markers: &MarkerStore, config: &ViewConfig) {
    if !canvas.is_connected() {
        return;
    }
    let ctx = match canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
    {
        Some(c) => c,
        None => return,
    };
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.set_fill_style_str("#0e1116");
    ctx.fill_rect(0.0, 0.0, w, h);
    if markers.is_empty() {
        return;
    }

    let radius = match viewport.marker_radius(canvas, config.marker_screen_radius) {
        Ok(r) => r,
        Err(err) => {
            log::debug!("markers not drawn: {err}");
            return;
        }
    };
    let t = viewport.transform();
    ctx.set_transform(t.a, t.b, t.c, t.d, t.e, t.f).ok();
    ctx.set_line_width(radius / config.stroke_divisor);
    ctx.set_fill_style_str("#1f6feb");
    ctx.set_stroke_style_str("#c9d1d9");
    for p in markers.iter() {
        ctx.begin_path();
        if ctx.arc(p.x, p.y, radius, 0.0, TAU).is_ok() {
            ctx.fill();
            ctx.stroke();
        }
    }
}

#[function_component]
pub fn MarkerCanvas(props: &MarkerCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    let viewport = use_mut_ref(Viewport::default);
    let markers = use_mut_ref(MarkerStore::default);
    let touch_state = use_mut_ref(TouchState::default);
    let config_ref = use_mut_ref(|| props.config);
    let draw_ref: Rc<RefCell<Option<DrawFn>>> = use_mut_ref(|| None);
    let marker_count = use_state(|| 0_usize);
    let zoom_level = use_state(|| 1.0_f64);

    // Keep handlers on the latest settings and repaint with them
    {
        let config_ref = config_ref.clone();
        let draw_ref = draw_ref.clone();
        use_effect_with(props.config, move |cfg| {
            *config_ref.borrow_mut() = *cfg;
            redraw(&draw_ref);
            || ()
        });
    }

    // Mount: size the canvas, center the view, wire input
    {
        let canvas_ref = canvas_ref.clone();
        let viewport = viewport.clone();
        let markers = markers.clone();
        let touch_state = touch_state.clone();
        let config_ref = config_ref.clone();
        let draw_ref = draw_ref.clone();
        let zoom_level = zoom_level.clone();
        use_effect_with((), move |_| {
            let mut listeners: Vec<Listener> = Vec::new();
            let window = web_sys::window();
            let canvas = canvas_ref.cast::<HtmlCanvasElement>();
            if let (Some(window), Some(canvas)) = (window, canvas) {
                fit_canvas(&canvas);
                if let Err(err) = viewport.borrow_mut().center_on_origin(&canvas) {
                    log::debug!("initial centering deferred: {err}");
                }

                let draw_closure: DrawFn = {
                    let canvas = canvas.clone();
                    let viewport = viewport.clone();
                    let markers = markers.clone();
                    let config_ref = config_ref.clone();
                    Rc::new(move || {
                        draw(&canvas, &viewport.borrow(), &markers.borrow(), &config_ref.borrow());
                    })
                };
                *draw_ref.borrow_mut() = Some(draw_closure);
                redraw(&draw_ref);

                // Mouse
                listeners.extend(Listener::attach(&canvas, "mousedown", {
                    let viewport = viewport.clone();
                    move |e: web_sys::MouseEvent| {
                        e.prevent_default();
                        viewport.borrow_mut().begin_pan(client_point(&e));
                    }
                }));
                listeners.extend(Listener::attach(&canvas, "mousemove", {
                    let canvas = canvas.clone();
                    let viewport = viewport.clone();
                    let draw_ref = draw_ref.clone();
                    move |e: web_sys::MouseEvent| {
                        let moved = viewport.borrow_mut().continue_pan(&canvas, client_point(&e));
                        match moved {
                            Ok(true) => redraw(&draw_ref),
                            Ok(false) => {}
                            Err(err) => log::debug!("pan skipped: {err}"),
                        }
                    }
                }));
                for event in ["mouseup", "blur"] {
                    listeners.extend(Listener::attach(&window, event, {
                        let viewport = viewport.clone();
                        move |_e: web_sys::Event| viewport.borrow_mut().end_pan()
                    }));
                }

                // Wheel zoom
                listeners.extend(Listener::attach(&canvas, "wheel", {
                    let canvas = canvas.clone();
                    let viewport = viewport.clone();
                    let config_ref = config_ref.clone();
                    let draw_ref = draw_ref.clone();
                    let zoom_level = zoom_level.clone();
                    move |e: WheelEvent| {
                        e.prevent_default();
                        let direction = ZoomDirection::from_wheel_delta(e.delta_y());
                        let ratio = config_ref.borrow().zoom_ratio;
                        let level = {
                            let mut vp = viewport.borrow_mut();
                            match vp.zoom(&canvas, client_point(&e), direction, ratio) {
                                Ok(_) => vp.zoom_level(),
                                Err(err) => {
                                    log::debug!("zoom skipped: {err}");
                                    return;
                                }
                            }
                        };
                        zoom_level.set(level);
                        redraw(&draw_ref);
                    }
                }));

                // Touch: first finger pans
                listeners.extend(Listener::attach(&canvas, "touchstart", {
                    let viewport = viewport.clone();
                    let touch_state = touch_state.clone();
                    move |e: TouchEvent| {
                        e.prevent_default();
                        let touches = e.changed_touches();
                        for i in 0..touches.length() {
                            if let Some(t) = touches.item(i) {
                                if touch_state.borrow_mut().start(t.identifier()) {
                                    viewport.borrow_mut().begin_pan(touch_point(&t));
                                }
                            }
                        }
                    }
                }));
                listeners.extend(Listener::attach(&canvas, "touchmove", {
                    let canvas = canvas.clone();
                    let viewport = viewport.clone();
                    let touch_state = touch_state.clone();
                    let draw_ref = draw_ref.clone();
                    move |e: TouchEvent| {
                        e.prevent_default();
                        let touches = e.changed_touches();
                        for i in 0..touches.length() {
                            let Some(t) = touches.item(i) else { continue };
                            if !touch_state.borrow().is_active(t.identifier()) {
                                continue;
                            }
                            let moved = viewport.borrow_mut().continue_pan(&canvas, touch_point(&t));
                            match moved {
                                Ok(true) => redraw(&draw_ref),
                                Ok(false) => {}
                                Err(err) => log::debug!("pan skipped: {err}"),
                            }
                        }
                    }
                }));
                for event in ["touchend", "touchcancel"] {
                    listeners.extend(Listener::attach(&canvas, event, {
                        let viewport = viewport.clone();
                        let touch_state = touch_state.clone();
                        move |e: TouchEvent| {
                            let touches = e.changed_touches();
                            for i in 0..touches.length() {
                                if let Some(t) = touches.item(i) {
                                    if touch_state.borrow_mut().end(t.identifier()) {
                                        viewport.borrow_mut().end_pan();
                                    }
                                }
                            }
                        }
                    }));
                }

                // Resize keeps the transform; only a never-centered view is centered
                listeners.extend(Listener::attach(&window, "resize", {
                    let canvas = canvas.clone();
                    let viewport = viewport.clone();
                    let draw_ref = draw_ref.clone();
                    move |_e: web_sys::Event| {
                        fit_canvas(&canvas);
                        {
                            let mut vp = viewport.borrow_mut();
                            if !vp.is_initialized() {
                                if let Err(err) = vp.center_on_origin(&canvas) {
                                    log::debug!("centering deferred: {err}");
                                }
                            }
                        }
                        redraw(&draw_ref);
                    }
                }));
            } else {
                log::error!("canvas not mounted, input disabled");
            }
            let draw_ref = draw_ref.clone();
            move || {
                drop(listeners);
                *draw_ref.borrow_mut() = None;
            }
        });
    }

    let add_cb: Callback<()> = {
        let canvas_ref = canvas_ref.clone();
        let viewport = viewport.clone();
        let markers = markers.clone();
        let draw_ref = draw_ref.clone();
        let marker_count = marker_count.clone();
        Callback::from(move |()| {
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                return;
            };
            let added = viewport.borrow().add_marker_in_view(
                &canvas,
                &mut markers.borrow_mut(),
                js_sys::Math::random,
            );
            match added {
                Ok(p) => {
                    let n = markers.borrow().len();
                    log::info!("marker #{n} at ({:.2}, {:.2})", p.x, p.y);
                    marker_count.set(n);
                    redraw(&draw_ref);
                }
                Err(err) => log::warn!("marker not added: {err}"),
            }
        })
    };

    let reset_view_cb: Callback<()> = {
        let canvas_ref = canvas_ref.clone();
        let viewport = viewport.clone();
        let draw_ref = draw_ref.clone();
        let zoom_level = zoom_level.clone();
        Callback::from(move |()| {
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                return;
            };
            let centered = viewport.borrow_mut().center_on_origin(&canvas);
            match centered {
                Ok(()) => {
                    zoom_level.set(1.0);
                    redraw(&draw_ref);
                }
                Err(err) => log::warn!("view not reset: {err}"),
            }
        })
    };

    let zoom_percent = (*zoom_level * 100.0).round() as u32;

    html! {<div style="display:flex; flex-direction:column; width:100vw; height:100vh;">
        <Toolbar
            marker_count={*marker_count}
            zoom_percent={zoom_percent}
            on_add={add_cb}
            on_reset_view={reset_view_cb}
            on_open_settings={props.on_open_settings.clone()}
        />
        <div style="position:relative; flex:1; min-height:0;">
            <canvas ref={canvas_ref} id="marker-canvas" style="display:block; width:100%; height:100%; touch-action:none; cursor:grab;"></canvas>
        </div>
    </div>}
}
