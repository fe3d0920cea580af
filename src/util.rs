use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::EventTarget;

use crate::model::Point;

pub type DrawFn = Rc<dyn Fn()>;

/// Run the current draw closure, if the canvas has installed one.
pub fn redraw(draw_ref: &RefCell<Option<DrawFn>>) {
    let f = draw_ref.borrow().clone();
    if let Some(f) = f {
        f();
    }
}

pub fn client_point(e: &web_sys::MouseEvent) -> Point {
    Point::new(e.client_x() as f64, e.client_y() as f64)
}

pub fn touch_point(t: &web_sys::Touch) -> Point {
    Point::new(t.client_x() as f64, t.client_y() as f64)
}

/// DOM event listener that detaches itself when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    pub fn attach<E, F>(target: &EventTarget, event: &'static str, mut handler: F) -> Option<Self>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
            handler(e.unchecked_into::<E>());
        });
        if let Err(err) =
            target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        {
            log::warn!("could not attach {event} listener: {err:?}");
            return None;
        }
        Some(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}
