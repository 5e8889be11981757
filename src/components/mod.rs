pub mod app;
pub mod arena_view;
pub mod controls_panel;
pub mod hud_panel;
pub mod settings_modal;
