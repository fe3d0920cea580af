pub mod app;
pub mod marker_canvas;
pub mod settings_modal;
pub mod toolbar;
