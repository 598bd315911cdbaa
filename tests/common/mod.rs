//! Scratch inputs shared by the integration tests.

use std::fs;
use std::path::Path;

use bridgeplot::pipeline::{
    BMD_3D_FILE, CENTRAL_BMD_FILE, CENTRAL_SFD_FILE, GEOMETRY_FILE, SFD_3D_FILE,
};
use bridgeplot::{PlotConfig, RunSummary};
use serde_json::json;

/// Every element of the model written by [`write_inputs`].
pub const ALL_ELEMENTS: [u32; 6] = [100, 101, 110, 111, 120, 121];

/// Three girders of two elements each, spaced 3 m apart across the deck.
pub fn write_inputs(root: &Path, dataset_elements: &[u32]) {
    let data = root.join("data");
    fs::create_dir_all(&data).expect("data directory created");

    let mut nodes = Vec::new();
    let mut members = Vec::new();
    let mut girders = Vec::new();
    for g in 0..3u32 {
        let z = f64::from(g) * 3.0;
        for k in 0..3u32 {
            nodes.push(json!({"id": g * 10 + k + 1, "position": [f64::from(k) * 5.0, 0.0, z]}));
        }
        let elements: Vec<u32> = (0..2).map(|k| 100 + g * 10 + k).collect();
        for (k, element) in elements.iter().enumerate() {
            let start = g * 10 + k as u32 + 1;
            members.push(json!({"id": element, "nodes": [start, start + 1]}));
        }
        girders.push(json!({"name": format!("girder_{}", g + 1), "elements": elements}));
    }
    let model = json!({"nodes": nodes, "members": members, "girders": girders});
    fs::write(data.join("bridge_model.json"), model.to_string()).expect("model written");

    let forces: Vec<Vec<f64>> = dataset_elements
        .iter()
        .map(|&e| {
            let base = f64::from(e % 10);
            vec![0.0, 10.0 + base, 20.0 + base, 4.0, 6.0]
        })
        .collect();
    let dataset = json!({
        "dims": ["Element", "Component"],
        "coords": {
            "Element": dataset_elements,
            "Component": ["Fx_i", "Mz_i", "Mz_j", "Vy_i", "Vy_j"]
        },
        "forces": forces
    });
    fs::write(data.join("screening_task.json"), dataset.to_string()).expect("dataset written");
}

/// Small unannotated figures with `girder_2` as the central girder.
pub fn config(root: &Path) -> PlotConfig {
    let mut config = PlotConfig::with_root(root);
    config.central_girder = "girder_2".to_string();
    config.style.annotate = false;
    config.style.line_size = (320, 200);
    config.style.spatial_size = (320, 240);
    config
}

/// Check that `summary` lists the five figures in drawing order and that each is a
/// non-empty file.
pub fn assert_figures_written(config: &PlotConfig, summary: &RunSummary) {
    let expected = [
        CENTRAL_BMD_FILE,
        CENTRAL_SFD_FILE,
        GEOMETRY_FILE,
        SFD_3D_FILE,
        BMD_3D_FILE,
    ];
    assert_eq!(summary.outputs.len(), expected.len());
    for (written, name) in summary.outputs.iter().zip(expected) {
        assert_eq!(written, &config.output_dir.join(name));
        let size = fs::metadata(written).expect("figure exists").len();
        assert!(size > 0, "{name} is empty");
    }
}
