use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error, info};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, PointerEvent, WheelEvent, Window};
use yew::prelude::*;

use super::{controls_panel::ControlsPanel, hud_panel::HudPanel, settings_modal::SettingsModal};
use crate::config::{ClientConfig, DisplaySettings};
use crate::dom::{FrameTask, IntervalTask, Listener};
use crate::input::Repeat;
use crate::model::{Size, Vec2};
use crate::net::{OfflineSession, Session, offline_border};
use crate::render::CanvasRenderer;
use crate::state::{ClientState, PointerTarget};
use crate::util::{now_ms, window_size};

/// How often intent is sent to and updates are pulled from the session.
const SESSION_TICK_MS: u32 = 40;

#[derive(Properties, PartialEq, Clone)]
pub struct ArenaViewProps {
    pub config: ClientConfig,
}

#[derive(Clone, Copy, PartialEq, Default)]
struct HudStats {
    score: u64,
    ping: u32,
    minion_controlled: bool,
}

type SharedClient = Rc<RefCell<ClientState>>;
type SharedSession = Rc<RefCell<Box<dyn Session>>>;

fn measured_surface() -> Size {
    let (w, h) = window_size().unwrap_or((800.0, 600.0));
    Size::new(w, h)
}

#[function_component(ArenaView)]
pub fn arena_view(props: &ArenaViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let settings = use_state(DisplaySettings::load);
    let session: SharedSession = use_mut_ref(|| Box::new(OfflineSession::new(offline_border())) as Box<dyn Session>);
    let client: SharedClient = {
        let config = props.config.clone();
        let settings = *settings;
        let border = session.borrow().border();
        use_mut_ref(move || ClientState::new(config, settings, measured_surface(), border))
    };
    let hud = use_state(HudStats::default);
    let open_settings = use_state(|| false);

    // Effect: persist settings and hand them to the frame loop
    {
        let client = client.clone();
        let current = *settings;
        use_effect_with(current, move |_| {
            current.save();
            client.borrow_mut().settings = current;
            || ()
        });
    }
    // Main mount effect (loops, timers, listeners)
    {
        let canvas_ref = canvas_ref.clone();
        let client = client.clone();
        let session = session.clone();
        let hud = hud.clone();
        use_effect_with((), move |_| {
            let mounted = match canvas_ref.cast::<HtmlCanvasElement>() {
                Some(canvas) => mount(canvas, client, session, hud)
                    .map_err(|e| error!("arena mount failed: {e:?}"))
                    .ok(),
                None => {
                    error!("canvas_ref not attached to a canvas element");
                    None
                }
            };
            move || drop(mounted)
        });
    }

    let on_open_settings = {
        let open_settings = open_settings.clone();
        Callback::from(move |_: ()| open_settings.set(true))
    };
    let on_close_settings = {
        let open_settings = open_settings.clone();
        Callback::from(move |_: ()| open_settings.set(false))
    };
    let on_settings_change = {
        let settings = settings.clone();
        Callback::from(move |s: DisplaySettings| settings.set(s))
    };

    html! {
        <div style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#111;">
            <canvas ref={canvas_ref} style="display:block; touch-action:none;" />
            <HudPanel score={hud.score} ping={hud.ping} minion_controlled={hud.minion_controlled} />
            <ControlsPanel on_open_settings={on_open_settings} />
            <SettingsModal
                show={*open_settings}
                settings={*settings}
                on_change={on_settings_change}
                on_close={on_close_settings}
            />
        </div>
    }
}

/// Everything started on mount; dropping it stops the loops and removes listeners.
struct Mounted {
    _render: FrameTask,
    _hue: Rc<RefCell<Option<FrameTask>>>,
    _eject_repeat: Rc<RefCell<Option<IntervalTask>>>,
    _intervals: Vec<IntervalTask>,
    _listeners: Vec<Listener>,
}

fn pointer_pos(canvas: &HtmlCanvasElement, e: &PointerEvent) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        e.client_x() as f64 - rect.left(),
        e.client_y() as f64 - rect.top(),
    )
}

fn apply_surface(canvas: &HtmlCanvasElement, size: Size) {
    canvas.set_width(size.width.max(0.0) as u32);
    canvas.set_height(size.height.max(0.0) as u32);
}

/// Cancels any running hue loop, then starts a fresh one.
fn restart_hue(window: &Window, client: &SharedClient, slot: &Rc<RefCell<Option<FrameTask>>>) {
    slot.borrow_mut().take();
    let client = client.clone();
    match FrameTask::start(window, move |_| client.borrow_mut().hue.advance()) {
        Ok(task) => {
            *slot.borrow_mut() = Some(task);
            debug!("hue loop restarted");
        }
        Err(e) => error!("hue loop failed to start: {e:?}"),
    }
}

fn mount(
    canvas: HtmlCanvasElement,
    client: SharedClient,
    session: SharedSession,
    hud: UseStateHandle<HudStats>,
) -> Result<Mounted, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))?;
    let config = client.borrow().config.clone();

    apply_surface(&canvas, client.borrow().surface());
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    // Render loop
    let render = {
        let client = client.clone();
        let mut renderer = CanvasRenderer::new(ctx);
        FrameTask::start(&window, move |_| {
            client.borrow_mut().tick(now_ms(), &mut renderer);
        })?
    };

    let hue = Rc::new(RefCell::new(None));
    restart_hue(&window, &client, &hue);

    let mut intervals = Vec::new();
    // Session: push intent, pull world updates
    {
        let client = client.clone();
        let session = session.clone();
        let hue = hue.clone();
        let window_hue = window.clone();
        intervals.push(IntervalTask::start(&window, SESSION_TICK_MS, move || {
            let target = client.borrow().target();
            let mut session = session.borrow_mut();
            session.send_target(target);
            let border_changed = {
                let mut c = client.borrow_mut();
                let before = c.world.border;
                session.poll(now_ms(), &mut c.world);
                c.world.border != before
            };
            if border_changed {
                restart_hue(&window_hue, &client, &hue);
            }
        })?);
    }
    // Resize poll
    {
        let client = client.clone();
        let canvas = canvas.clone();
        intervals.push(IntervalTask::start(&window, config.resize_poll_ms, move || {
            let Some((w, h)) = window_size() else { return };
            let resized = client.borrow_mut().poll_resize(Size::new(w, h));
            if let Some(size) = resized {
                apply_surface(&canvas, size);
            }
        })?);
    }
    // HUD refresh
    {
        let client = client.clone();
        let session = session.clone();
        intervals.push(IntervalTask::start(&window, config.hud_refresh_ms, move || {
            let session = session.borrow();
            let next = HudStats {
                score: client.borrow().camera.score,
                ping: session.ping(),
                minion_controlled: session.minion_controlled(),
            };
            if *hud != next {
                hud.set(next);
            }
        })?);
    }

    let eject_repeat: Rc<RefCell<Option<IntervalTask>>> = Rc::new(RefCell::new(None));
    let canvas_target: web_sys::EventTarget = canvas.clone().into();
    let window_target: web_sys::EventTarget = window.clone().into();
    let mut listeners = Vec::new();

    {
        let client = client.clone();
        let session = session.clone();
        let canvas = canvas.clone();
        listeners.push(Listener::new(&canvas_target, "pointerdown", move |e: PointerEvent| {
            let p = pointer_pos(&canvas, &e);
            let hit = client.borrow_mut().pointer_down(p, e.pointer_id(), now_ms());
            match hit {
                PointerTarget::Button(cmd) => session.borrow_mut().send(cmd),
                PointerTarget::Joystick => e.prevent_default(),
                PointerTarget::Field => {}
            }
        })?);
    }
    {
        let client = client.clone();
        let canvas = canvas.clone();
        listeners.push(Listener::new(&window_target, "pointermove", move |e: PointerEvent| {
            let p = pointer_pos(&canvas, &e);
            client.borrow_mut().pointer_move(p, e.pointer_id());
        })?);
    }
    // A release anywhere by the dragging pointer ends the drag, covering release-outside.
    for event in ["pointerup", "pointercancel"] {
        let client = client.clone();
        listeners.push(Listener::new(&window_target, event, move |e: PointerEvent| {
            client.borrow_mut().pointer_up(e.pointer_id());
        })?);
    }
    {
        let client = client.clone();
        listeners.push(Listener::new(&canvas_target, "wheel", move |e: WheelEvent| {
            client.borrow_mut().scroll(e.delta_y());
        })?);
    }
    listeners.push(Listener::new(&canvas_target, "contextmenu", |e: web_sys::Event| {
        e.prevent_default();
    })?);
    {
        let client = client.clone();
        let session = session.clone();
        let eject_repeat = eject_repeat.clone();
        let window_key = window.clone();
        let repeat_ms = config.eject_repeat_ms;
        listeners.push(Listener::new(&window_target, "keydown", move |e: KeyboardEvent| {
            let code = e.code();
            if code == "Space" {
                e.prevent_default();
            }
            let (cmd, repeat) = client.borrow_mut().keyboard.key_down(&code);
            if let Some(cmd) = cmd {
                session.borrow_mut().send(cmd);
            }
            if repeat == Repeat::Start {
                let client = client.clone();
                let session = session.clone();
                let task = IntervalTask::start(&window_key, repeat_ms, move || {
                    if client.borrow_mut().keyboard.repeat_tick() {
                        session.borrow_mut().send_eject();
                    }
                });
                match task {
                    Ok(t) => *eject_repeat.borrow_mut() = Some(t),
                    Err(err) => error!("eject repeat failed to start: {err:?}"),
                }
            }
        })?);
    }
    {
        let client = client.clone();
        let eject_repeat = eject_repeat.clone();
        listeners.push(Listener::new(&window_target, "keyup", move |e: KeyboardEvent| {
            if client.borrow_mut().keyboard.key_up(&e.code()) == Repeat::Stop {
                eject_repeat.borrow_mut().take();
            }
        })?);
    }

    info!("arena mounted");
    Ok(Mounted {
        _render: render,
        _hue: hue,
        _eject_repeat: eject_repeat,
        _intervals: intervals,
        _listeners: listeners,
    })
}
