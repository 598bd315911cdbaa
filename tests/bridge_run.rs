mod common;

use bridgeplot::pipeline::CENTRAL_BMD_FILE;
use bridgeplot::{render_summary, run, FigureStyle, PlotError, TopologyError};
use common::{assert_figures_written, config, write_inputs, ALL_ELEMENTS};

#[test]
fn writes_every_figure() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_inputs(dir.path(), &ALL_ELEMENTS);
    let config = config(dir.path());

    let summary = run(&config).expect("run succeeds");

    assert_figures_written(&config, &summary);

    assert_eq!(summary.central_girder, "girder_2");
    assert_eq!(summary.central_elements, 2);
    assert_eq!(summary.girder_count, 3);
    assert_eq!(summary.dataset.element_count, 6);

    let report = render_summary(&summary);
    assert!(report.contains(CENTRAL_BMD_FILE));
}

#[test]
fn missing_results_abort_before_drawing() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_inputs(dir.path(), &[100, 101, 110, 111, 120]);
    let config = config(dir.path());

    let error = run(&config).expect_err("element 121 has no results");
    assert!(matches!(
        error,
        PlotError::Topology(TopologyError::MissingResults { element: 121, .. })
    ));
    assert!(!config.output_dir.exists());
}

#[test]
fn unknown_central_girder_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_inputs(dir.path(), &ALL_ELEMENTS);
    let mut config = config(dir.path());
    config.central_girder = "girder_9".to_string();

    assert!(matches!(
        run(&config),
        Err(PlotError::Topology(TopologyError::UnknownGirder(ref name))) if name == "girder_9"
    ));
}

#[test]
fn missing_dataset_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = config(dir.path());
    assert!(matches!(
        run(&config),
        Err(PlotError::Dataset(bridgeplot::DatasetError::Io { .. }))
    ));
}

#[test]
fn annotated_run_with_a_label_font() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_inputs(dir.path(), &ALL_ELEMENTS);
    let mut config = config(dir.path());
    config.style = FigureStyle {
        line_size: config.style.line_size,
        spatial_size: config.style.spatial_size,
        ..FigureStyle::default()
    };
    if !config.style.font_paths.iter().any(|path| path.is_file()) {
        return;
    }

    let summary = run(&config).expect("annotated run succeeds");
    assert_figures_written(&config, &summary);
}
