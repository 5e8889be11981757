use yew::prelude::*;

use crate::config::DisplaySettings;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub settings: DisplaySettings,
    pub on_change: Callback<DisplaySettings>,
    pub on_close: Callback<()>,
}

fn toggle_row(
    label: &'static str,
    checked: bool,
    settings: DisplaySettings,
    flip: fn(&mut DisplaySettings),
    on_change: &Callback<DisplaySettings>,
) -> Html {
    let onclick = {
        let cb = on_change.clone();
        Callback::from(move |_| {
            let mut next = settings;
            flip(&mut next);
            cb.emit(next);
        })
    };
    html! {
        <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
            <input type="checkbox" checked={checked} onclick={onclick} />
            <span>{ label }</span>
        </label>
    }
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_change.clone();
        Callback::from(move |_| cb.emit(DisplaySettings::default()))
    };
    let s = props.settings;

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:300px; max-width:420px; display:flex; flex-direction:column; gap:14px; color:#fff;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Display"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                { toggle_row("Background", s.background, s, |s| s.background = !s.background, &props.on_change) }
                { toggle_row("Grid", s.grid, s, |s| s.grid = !s.grid, &props.on_change) }
                { toggle_row("Sectors", s.sectors, s, |s| s.sectors = !s.sectors, &props.on_change) }
                { toggle_row("Border", s.border, s, |s| s.border = !s.border, &props.on_change) }
                { toggle_row("Rainbow border", s.rainbow_border, s, |s| s.rainbow_border = !s.rainbow_border, &props.on_change) }
                { toggle_row("Minimap", s.minimap, s, |s| s.minimap = !s.minimap, &props.on_change) }
            </div>
            <div style="display:flex; gap:8px;">
                <button onclick={reset_cb} style="flex:1;">{"Restore defaults"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
        </div>
    </div>}
}
