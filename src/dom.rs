// Browser scheduling and listener handles. Each handle owns its closure and
// cancels/removes itself on drop.
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{EventTarget, Window};

type FrameClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A callback run once per display frame until cancelled. Each frame requests
/// the next one, so at most one request is ever pending.
pub struct FrameTask {
    window: Window,
    raf_id: Rc<Cell<Option<i32>>>,
    cancelled: Rc<Cell<bool>>,
    closure: FrameClosure,
}

impl FrameTask {
    pub fn start(window: &Window, mut frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let raf_id = Rc::new(Cell::new(None));
        let cancelled = Rc::new(Cell::new(false));
        let closure: FrameClosure = Rc::new(RefCell::new(None));
        {
            let raf_id = raf_id.clone();
            let cancelled = cancelled.clone();
            let closure_loop = closure.clone();
            let window_loop = window.clone();
            *closure.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
                raf_id.set(None);
                if cancelled.get() {
                    return;
                }
                frame(ts);
                if cancelled.get() {
                    return;
                }
                if let Some(cb) = closure_loop.borrow().as_ref() {
                    if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        raf_id.set(Some(id));
                    }
                }
            }) as Box<dyn FnMut(f64)>));
        }
        let id = {
            let cb = closure.borrow();
            let cb = cb.as_ref().ok_or_else(|| JsValue::from_str("frame closure missing"))?;
            window.request_animation_frame(cb.as_ref().unchecked_ref())?
        };
        raf_id.set(Some(id));
        Ok(Self {
            window: window.clone(),
            raf_id,
            cancelled,
            closure,
        })
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

impl Drop for FrameTask {
    fn drop(&mut self) {
        self.cancel();
        // breaks the closure's reference to itself
        self.closure.borrow_mut().take();
    }
}

/// `setInterval` handle.
pub struct IntervalTask {
    window: Window,
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl IntervalTask {
    pub fn start(window: &Window, period_ms: u32, tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms as i32,
        )?;
        Ok(Self {
            window: window.clone(),
            id,
            _closure: closure,
        })
    }
}

impl Drop for IntervalTask {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.id);
    }
}

/// An event listener removed when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    /// Listens for `event` on `target`; `handler` receives the event cast to `E`.
    pub fn new<E, F>(target: &EventTarget, event: &'static str, mut handler: F) -> Result<Self, JsValue>
    where
        E: JsCast,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |e: web_sys::Event| {
            if let Ok(e) = e.dyn_into::<E>() {
                handler(e);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
