use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub on_open_settings: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let settings_cb = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.75); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:180px; display:flex; flex-direction:column; gap:6px; color:#fff;">
        <button onclick={settings_cb}>{"Settings"}</button>
        <div style="font-size:11px; line-height:1.4; opacity:0.7;">
            {"Space: split"}<br/>
            {"W: eject (hold to repeat)"}<br/>
            {"Q: switch minion"}<br/>
            {"Wheel: zoom"}
        </div>
    </div>}
}
