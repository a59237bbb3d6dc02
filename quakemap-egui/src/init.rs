use eframe::AppCreator;
use quakemap::Map;

use crate::{EguiMapOptions, EguiMapState};

/// Title of the native window.
pub const DEFAULT_APP_NAME: &str = "Earthquakes";
/// Id of the canvas element the web application is attached to.
pub const DEFAULT_CANVAS_ID: &str = "map";

/// Error starting the application.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The async runtime for tile loading could not be created.
    #[error("failed to create async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    /// The window or the web runner failed.
    #[error("failed to run the application: {0}")]
    App(String),
}

struct MapApp {
    map: EguiMapState,
}

impl eframe::App for MapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.map.render(ui);
            });
    }
}

/// Starts an application showing the map: a native window, or the web runner bound to a canvas
/// element on `wasm32`.
///
/// ```no_run
/// # fn run(map: quakemap::Map) -> Result<(), quakemap_egui::InitError> {
/// quakemap_egui::InitBuilder::new(map)
///     .with_app_name("My earthquakes")
///     .init()
/// # }
/// ```
pub struct InitBuilder {
    map: Map,
    app_name: String,
    #[cfg(not(target_arch = "wasm32"))]
    native_options: Option<eframe::NativeOptions>,
    #[cfg(not(target_arch = "wasm32"))]
    runtime: Option<tokio::runtime::Runtime>,
    #[cfg(target_arch = "wasm32")]
    web_options: Option<eframe::WebOptions>,
    #[cfg(target_arch = "wasm32")]
    canvas_id: String,
}

impl InitBuilder {
    /// Creates the builder for the given map.
    pub fn new(map: Map) -> Self {
        Self {
            map,
            app_name: DEFAULT_APP_NAME.to_owned(),
            #[cfg(not(target_arch = "wasm32"))]
            native_options: None,
            #[cfg(not(target_arch = "wasm32"))]
            runtime: None,
            #[cfg(target_arch = "wasm32")]
            web_options: None,
            #[cfg(target_arch = "wasm32")]
            canvas_id: DEFAULT_CANVAS_ID.to_owned(),
        }
    }

    /// Sets the title of the native window.
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    /// Sets the window options.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_native_options(mut self, options: eframe::NativeOptions) -> Self {
        self.native_options = Some(options);
        self
    }

    /// Uses the given runtime for background tasks instead of creating a new one.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_runtime(mut self, runtime: tokio::runtime::Runtime) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Sets the web runner options.
    #[cfg(target_arch = "wasm32")]
    pub fn with_web_options(mut self, options: eframe::WebOptions) -> Self {
        self.web_options = Some(options);
        self
    }

    /// Sets the id of the canvas element to draw into. Defaults to [`DEFAULT_CANVAS_ID`].
    #[cfg(target_arch = "wasm32")]
    pub fn with_canvas_id(mut self, id: impl Into<String>) -> Self {
        self.canvas_id = id.into();
        self
    }

    /// Starts the application. On native platforms blocks until the window is closed.
    pub fn init(self) -> Result<(), InitError> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.init_not_wasm()
        }

        #[cfg(target_arch = "wasm32")]
        {
            self.init_wasm()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn init_not_wasm(self) -> Result<(), InitError> {
        crate::init_logging();

        let rt = match self.runtime {
            Some(rt) => rt,
            None => tokio::runtime::Runtime::new()?,
        };

        // The ui thread spawns tile loads, the runtime is driven by a background thread.
        let handle = rt.handle().clone();
        let _enter = handle.enter();
        std::thread::spawn(move || rt.block_on(std::future::pending::<()>()));

        let native_options = self.native_options.unwrap_or_default();
        let app_creator = app_creator(self.map);

        eframe::run_native(&self.app_name, native_options, app_creator)
            .map_err(|err| InitError::App(err.to_string()))
    }

    #[cfg(target_arch = "wasm32")]
    fn init_wasm(self) -> Result<(), InitError> {
        use eframe::wasm_bindgen::JsCast as _;

        crate::init_logging();

        let web_options = self.web_options.unwrap_or_default();
        let canvas_id = self.canvas_id;
        let app_creator = app_creator(self.map);

        wasm_bindgen_futures::spawn_local(async move {
            let Some(document) = web_sys::window().and_then(|window| window.document()) else {
                log::error!("No document to attach the map to");
                return;
            };

            let Some(canvas) = document
                .get_element_by_id(&canvas_id)
                .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok())
            else {
                log::error!("Canvas element '{canvas_id}' not found");
                return;
            };

            if let Err(err) = eframe::WebRunner::new()
                .start(canvas, web_options, app_creator)
                .await
            {
                log::error!("Failed to start eframe: {err:?}");
            }
        });

        Ok(())
    }
}

fn app_creator<'app>(map: Map) -> AppCreator<'app> {
    Box::new(move |cc: &eframe::CreationContext<'_>| {
        let state =
            EguiMapState::new(map, cc.egui_ctx.clone(), Vec::new(), EguiMapOptions::default());
        let app: Box<dyn eframe::App> = Box::new(MapApp { map: state });

        Ok(app)
    })
}
