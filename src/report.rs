//! Plain-text summary of a plotting run.

use crate::pipeline::RunSummary;
use std::fmt::Write;

/// Render a textual summary of a plotting run.
///
/// The dataset description comes first so the reader can tell which results the
/// figures were drawn from, followed by every image written.
#[must_use]
pub fn render_summary(summary: &RunSummary) -> String {
    let mut output = String::new();

    writeln!(&mut output, "Force dataset").expect("writing to string cannot fail");
    writeln!(&mut output, "{}", summary.dataset).expect("writing to string cannot fail");

    writeln!(
        &mut output,
        "Central girder: {} ({} elements); {} girders in the 3D views",
        summary.central_girder, summary.central_elements, summary.girder_count
    )
    .expect("writing to string cannot fail");

    if summary.outputs.is_empty() {
        output.push_str("No figures written\n");
    } else {
        writeln!(&mut output, "Figures written:").expect("writing to string cannot fail");
        for path in &summary.outputs {
            writeln!(&mut output, "  {}", path.display()).expect("writing to string cannot fail");
        }
    }

    output
}
