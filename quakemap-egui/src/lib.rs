//! Egui front-end of the earthquake map.
//!
//! [`EguiMapState`] keeps a [`quakemap::Map`] between frames, paints it with the egui painter and
//! shows the layer control, the depth legend, marker popups and tile attributions over it. With
//! the `init` feature, [`InitBuilder`] starts a native window or the web runner with the map.

mod canvas;
mod controls;
mod egui_map;
pub use egui_map::{EguiMapOptions, EguiMapState};

#[cfg(feature = "init")]
mod init;
#[cfg(feature = "init")]
pub use init::{InitBuilder, InitError, DEFAULT_APP_NAME, DEFAULT_CANVAS_ID};

/// Installs the logger: `env_logger` with the `info` default filter on native platforms, the
/// browser console on `wasm32`. Does nothing if a logger is already installed.
#[cfg(feature = "init")]
pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let env = env_logger::Env::default().default_filter_or("info");
        let _ = env_logger::Builder::from_env(env).try_init();
    }

    #[cfg(target_arch = "wasm32")]
    {
        let _ = eframe::WebLogger::init(log::LevelFilter::Info);
    }
}
