use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HudPanelProps {
    pub score: u64,
    pub ping: u32,
    pub minion_controlled: bool,
}

#[function_component]
pub fn HudPanel(props: &HudPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;";
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:60px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let (badge_text, badge_color) = if props.minion_controlled {
        ("Minion", "#3fb950")
    } else {
        ("Player", "#8b949e")
    };
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.75); border:1px solid #30363d; border-radius:8px; padding:8px 12px; min-width:160px; display:flex; flex-direction:column; gap:6px; font-size:14px; color:#fff; pointer-events:none;">
            <div style={row_style}>
                <span style={format!("{} color:#d4af37;", label_style)}>{"Score"}</span>
                <span style={format!("{} color:#d4af37;", value_style)}>{ props.score }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#58a6ff;", label_style)}>{"Ping"}</span>
                <span style={format!("{} color:#58a6ff;", value_style)}>{ format!("{} ms", props.ping) }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Control"}</span>
                <span style={format!("{} color:{};", value_style, badge_color)}>{ badge_text }</span>
            </div>
        </div>
    }
}
