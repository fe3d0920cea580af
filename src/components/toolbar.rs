use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ToolbarProps {
    pub marker_count: usize,
    pub zoom_percent: u32,
    pub on_add: Callback<()>,
    pub on_reset_view: Callback<()>,
    pub on_open_settings: Callback<()>,
}

#[function_component]
pub fn Toolbar(props: &ToolbarProps) -> Html {
    let add_cb = {
        let cb = props.on_add.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_reset_view.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let settings_cb = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let value_style = "font-variant-numeric:tabular-nums; font-weight:600;";
    html! {<div id="top-bar" style="display:flex; align-items:center; gap:10px; padding:8px 12px; background:rgba(22,27,34,0.9); border-bottom:1px solid #30363d; font-size:14px;">
        <button onclick={add_cb}>{"Add"}</button>
        <span style="opacity:0.8;">{"Click and drag to pan, mouse wheel to zoom"}</span>
        <span style="flex:1;"></span>
        <span>{"Markers "}<span style={value_style}>{ props.marker_count }</span></span>
        <span>{"Zoom "}<span style={value_style}>{ format!("{}%", props.zoom_percent) }</span></span>
        <button onclick={reset_cb}>{"Reset view"}</button>
        <button onclick={settings_cb}>{"Settings"}</button>
    </div>}
}
