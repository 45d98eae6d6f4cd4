use std::fs;
use std::io::{self, Write};
use std::path::Path;

use projectile_range::core::{KinematicVector, SimulationParams};
use projectile_range::export::samples::{DatFileSink, data_base_name, tagged_path, write_samples};
use projectile_range::export::summary::{Metadata, summary_path, write_summary, write_summary_to};
use projectile_range::search::{RotationScheme, SampleSink, SearchOptions, maximize_range};
use projectile_range::trajectory::{EulerDragIntegrator, Integrator, Trajectory};

#[test]
fn output_names_derive_from_config_path() {
    let base = data_base_name(Path::new("runs/shot.json"));
    assert_eq!(base, Path::new("runs/shot.dat"));
    assert_eq!(tagged_path(&base, 45), Path::new("runs/45shot.dat"));
    assert_eq!(tagged_path(Path::new("shot.dat"), 7), Path::new("7shot.dat"));
    assert_eq!(summary_path(&base), Path::new("runs/shot_summary.json"));
}

#[test]
fn samples_are_written_one_line_each_space_separated() {
    let mut trajectory = Trajectory::new();
    trajectory.push(0.0, KinematicVector::ZERO, 1.25);
    trajectory.push(0.5, KinematicVector::new(2.5, 1.75), 1.0);
    trajectory.push(1.0, KinematicVector::new(4.5, 0.0), 1.25);

    let mut buffer = Vec::new();
    write_samples(&mut buffer, &trajectory).expect("write to memory");
    let text = String::from_utf8(buffer).expect("utf8");
    let lines: Vec<Vec<f64>> = text
        .lines()
        .map(|line| line.split(' ').map(|v| v.parse().expect("number")).collect())
        .collect();

    assert_eq!(
        lines,
        vec![
            vec![0.0, 0.0, 0.0, 1.25],
            vec![0.5, 2.5, 1.75, 1.0],
            vec![1.0, 4.5, 0.0, 1.25],
        ]
    );
}

#[test]
fn file_sink_writes_one_file_per_tag() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut sink = DatFileSink::for_config(&dir.path().join("nested/shot.json"));

    let params = SimulationParams::new(1.0, 1.0e4, 0.0, 0.01, KinematicVector::new(10.0, 10.0));
    let trajectory = EulerDragIntegrator::default().integrate(&params);
    sink.record(&trajectory, 45).expect("record 45");
    sink.record(&trajectory, 46).expect("record 46");

    let expected = [
        dir.path().join("nested/45shot.dat"),
        dir.path().join("nested/46shot.dat"),
    ];
    assert_eq!(sink.written(), &expected);
    let contents = fs::read_to_string(&expected[0]).expect("read data");
    assert_eq!(contents.lines().count(), trajectory.len());
    let last: Vec<f64> = contents
        .lines()
        .last()
        .expect("last line")
        .split(' ')
        .map(|v| v.parse().expect("number"))
        .collect();
    assert_eq!(last[2], 0.0);
    assert!((last[1] - trajectory.range()).abs() < 1e-9);
}

#[test]
fn summary_sidecar_records_every_step_and_the_best() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut sink = DatFileSink::new(dir.path().join("vac.dat"));
    let initial = SimulationParams::new(
        1.0,
        1.0e4,
        0.0,
        0.001,
        KinematicVector::from_polar(20.0, 42.0),
    );
    let mut params = initial.clone();
    let report = maximize_range(
        &mut params,
        &EulerDragIntegrator::default(),
        &mut sink,
        &SearchOptions::default(),
    )
    .expect("write data files");

    let output = summary_path(sink.base());
    let meta = Metadata {
        config: "vac.json",
        density_model: "barometric",
        rotation: "rederive",
        angle_step_deg: 1.0,
    };
    write_summary(&output, &meta, &initial, &report, sink.written()).expect("write summary");

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("read summary")).expect("json");
    assert_eq!(json["best"]["tag"], 45);
    assert_eq!(json["best"]["file"], "45vac.dat");
    assert_eq!(json["steps"].as_array().map(|s| s.len()), Some(report.steps.len()));
    assert_eq!(json["steps"][0]["tag"], 42);
    assert!((json["launch_speed_m_s"].as_f64().expect("speed") - 20.0).abs() < 1e-9);
}

#[test]
fn file_sink_refuses_to_overwrite_a_recorded_tag() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut sink = DatFileSink::new(dir.path().join("shot.dat"));

    let mut first = Trajectory::new();
    first.push(0.0, KinematicVector::ZERO, 1.0);
    let mut second = first.clone();
    second.push(0.1, KinematicVector::new(1.0, 0.0), 1.0);

    sink.record(&first, 43).expect("first record");
    let err = sink.record(&second, 43).expect_err("repeated tag");
    assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);

    assert_eq!(sink.written(), &[dir.path().join("43shot.dat")]);
    let contents = fs::read_to_string(dir.path().join("43shot.dat")).expect("read data");
    assert_eq!(contents.lines().count(), first.len());
}

#[test]
fn half_degree_search_stops_before_losing_a_trajectory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut sink = DatFileSink::new(dir.path().join("fine.dat"));
    let mut params = SimulationParams::new(
        1.0,
        1.0e4,
        0.0,
        0.001,
        KinematicVector::from_polar(20.0, 42.0),
    );
    let options = SearchOptions {
        angle_step_deg: 0.5,
        rotation: RotationScheme::Matrix,
    };

    let err = maximize_range(&mut params, &EulerDragIntegrator::default(), &mut sink, &options)
        .expect_err("rounded tags collide below one degree");
    assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);

    let on_disk = fs::read_dir(dir.path()).expect("list dir").count();
    assert!(!sink.written().is_empty());
    assert_eq!(on_disk, sink.written().len());
}

/// Accepts nothing; every write reports a full disk.
struct FullDisk;

impl Write for FullDisk {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("no space left on device"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn summary_write_errors_are_reported() {
    let mut params = SimulationParams::new(
        1.0,
        1.0e4,
        0.0,
        0.01,
        KinematicVector::from_polar(20.0, 44.0),
    );
    let initial = params.clone();
    let mut sink = projectile_range::export::samples::MemorySink::new();
    let report = maximize_range(
        &mut params,
        &EulerDragIntegrator::default(),
        &mut sink,
        &SearchOptions::default(),
    )
    .expect("memory sink");
    let meta = Metadata {
        config: "vac.json",
        density_model: "barometric",
        rotation: "rederive",
        angle_step_deg: 1.0,
    };

    let err = write_summary_to(FullDisk, &meta, &initial, &report, &[])
        .expect_err("buffered bytes must reach the writer");
    assert!(err.to_string().contains("no space left"), "{err}");
}
