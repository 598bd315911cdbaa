use bridgeplot::{render_summary, run, PlotConfig};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    // Inputs and outputs live at fixed paths relative to the working directory:
    // data/screening_task.json, data/bridge_model.json and outputs/.
    let config = PlotConfig::default();

    // Any missing element, component or node aborts the run with its error.
    let summary = run(&config)?;

    println!("{}", render_summary(&summary));

    Ok(())
}
