//! Shows earthquakes of the past month from the USGS feed on a map.

use quakemap_egui::InitBuilder;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    quakemap_egui::init_logging();

    let runtime = tokio::runtime::Runtime::new()?;
    let map = runtime.block_on(quakemap::load_earthquake_map())?;
    log::info!("Loaded map with {} layers", map.layers().len());

    InitBuilder::new(map).with_runtime(runtime).init()?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    quakemap_egui::init_logging();

    wasm_bindgen_futures::spawn_local(async {
        let map = match quakemap::load_earthquake_map().await {
            Ok(map) => map,
            Err(err) => {
                log::error!("Failed to load earthquakes: {err}");
                return;
            }
        };

        if let Err(err) = InitBuilder::new(map).init() {
            log::error!("{err}");
        }
    });
}
