use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::ViewConfig;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub config: ViewConfig,
    pub on_change: Callback<ViewConfig>,
    pub on_reset: Callback<()>,
    pub on_close: Callback<()>,
}

/// Numeric input handler that patches one field of the config.
fn field_cb(
    config: ViewConfig,
    on_change: &Callback<ViewConfig>,
    apply: fn(&mut ViewConfig, f64),
) -> Callback<Event> {
    let cb = on_change.clone();
    Callback::from(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        match input.value().parse::<f64>() {
            Ok(v) => {
                let mut next = config;
                apply(&mut next, v);
                cb.emit(next);
            }
            Err(_) => log::debug!("ignoring non-numeric setting {:?}", input.value()),
        }
    })
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
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zoom_cb = field_cb(props.config, &props.on_change, |c, v| c.zoom_ratio = v);
    let radius_cb = field_cb(props.config, &props.on_change, |c, v| c.marker_screen_radius = v);
    let stroke_cb = field_cb(props.config, &props.on_change, |c, v| c.stroke_divisor = v);

    let row_style = "display:flex; align-items:center; justify-content:space-between; gap:12px;";
    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:320px; max-width:440px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style={row_style}>
                    <span>{"Zoom-out ratio per wheel step"}</span>
                    <input type="number" min="0.5" max="0.99" step="0.01" value={props.config.zoom_ratio.to_string()} onchange={zoom_cb} />
                </label>
                <label style={row_style}>
                    <span>{"Marker radius (px)"}</span>
                    <input type="number" min="1" max="50" step="0.5" value={props.config.marker_screen_radius.to_string()} onchange={radius_cb} />
                </label>
                <label style={row_style}>
                    <span>{"Radius / stroke width"}</span>
                    <input type="number" min="1" max="20" step="0.5" value={props.config.stroke_divisor.to_string()} onchange={stroke_cb} />
                </label>
            </div>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={reset_cb} style="flex:1;">{"Restore Defaults"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"Settings are saved in this browser. Markers are not."}</div>
        </div>
    </div>}
}
