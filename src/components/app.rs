use super::{marker_canvas::MarkerCanvas, settings_modal::SettingsModal};
use crate::config::ViewConfig;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(ViewConfig::load);
    let show_settings = use_state(|| false);

    let open_settings_cb: Callback<()> = {
        let show_settings = show_settings.clone();
        Callback::from(move |()| show_settings.set(true))
    };
    let close_settings_cb: Callback<()> = {
        let show_settings = show_settings.clone();
        Callback::from(move |()| show_settings.set(false))
    };
    let change_config_cb: Callback<ViewConfig> = {
        let config = config.clone();
        Callback::from(move |next: ViewConfig| {
            let next = next.sanitized();
            log::info!("view settings: {next:?}");
            next.save();
            config.set(next);
        })
    };
    let reset_config_cb: Callback<()> = {
        let config = config.clone();
        Callback::from(move |()| {
            ViewConfig::clear_stored();
            config.set(ViewConfig::default());
        })
    };

    html! {
        <div id="root" style="position:relative;">
            <MarkerCanvas config={*config} on_open_settings={open_settings_cb} />
            <SettingsModal
                show={*show_settings}
                config={*config}
                on_change={change_config_cb}
                on_reset={reset_config_cb}
                on_close={close_settings_cb}
            />
        </div>
    }
}
