//! CLI logic for the Topograph relationship-graph renderer.
//!
//! The CLI loads an inventory document into a
//! [`MemoryProvider`](topograph::provider::MemoryProvider), drives a
//! [`Controller`](topograph::controller::Controller) through the same steps a
//! user would (mount, clicks, zoom presses) and writes the final scene as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use topograph::{
    ProviderError, TopographBuilder, TopographError,
    controller::{Controller, DataProvider, Navigator},
    export::{Exporter, svg::Svg},
    model::CiId,
    provider::MemoryProvider,
    session::LoadPhase,
};

/// Navigator that records navigation intents in the log.
///
/// The CLI has no detail view to open, so intents are only reported.
#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate_to_ci(&self, id: CiId) {
        info!(ci_id = id.get(); "Navigate to CI detail");
    }
}

/// Run the Topograph CLI application
///
/// Loads the inventory, renders the requested view and writes the SVG to
/// the output file.
///
/// # Errors
///
/// Returns `TopographError` for:
/// - File I/O errors
/// - Configuration loading or validation errors
/// - Inventory decoding errors
/// - Provider failures
/// - Export errors
pub fn run(args: &Args) -> Result<(), TopographError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Rendering topology"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(depth) = args.depth {
        app_config = app_config.with_depth(depth);
    }

    let source = fs::read_to_string(&args.input)?;
    let provider = MemoryProvider::from_json(&source)?;

    let builder = TopographBuilder::new(app_config);
    let controller = builder.controller(provider, LogNavigator)?;

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    runtime.block_on(drive(&controller, args))?;

    Svg::new(&args.output).export_scene(&controller.scene())?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

/// Replays the view interactions requested on the command line.
async fn drive<P, N>(controller: &Controller<P, N>, args: &Args) -> Result<(), TopographError>
where
    P: DataProvider,
    N: Navigator,
{
    controller.mount(args.focus.map(CiId::new)).await;
    ensure_loaded(controller)?;

    for &id in &args.clicks {
        controller.on_node_click(CiId::new(id)).await;
        ensure_loaded(controller)?;
    }

    for _ in 0..args.zoom_steps.unsigned_abs() {
        if args.zoom_steps > 0 {
            controller.zoom_in();
        } else {
            controller.zoom_out();
        }
    }

    if let Some(layout) = controller.session().phase().layout()
        && layout.is_degraded()
    {
        warn!("Rendered view is not centered on the requested CI");
    }

    Ok(())
}

fn ensure_loaded<P, N>(controller: &Controller<P, N>) -> Result<(), TopographError>
where
    P: DataProvider,
    N: Navigator,
{
    match controller.session().phase() {
        LoadPhase::Error(message) => Err(ProviderError::Unavailable(message.clone()).into()),
        _ => Ok(()),
    }
}
