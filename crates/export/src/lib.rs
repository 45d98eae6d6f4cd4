//! Sample sinks and summary sidecars for range-search artifacts.

/// Space-separated trajectory files, one per evaluated launch angle.
pub mod samples {
    use std::convert::Infallible;
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::{Path, PathBuf};

    use csv::WriterBuilder;
    use range_search::SampleSink;
    use range_trajectory::Trajectory;

    /// Extension given to trajectory data files.
    pub const DATA_EXTENSION: &str = "dat";

    /// Derive the data base name from a configuration path (`shot.json` -> `shot.dat`).
    pub fn data_base_name(config_path: &Path) -> PathBuf {
        config_path.with_extension(DATA_EXTENSION)
    }

    /// Prefix the base file name with the angle tag (`out/shot.dat`, 45 -> `out/45shot.dat`).
    pub fn tagged_path(base: &Path, tag: i64) -> PathBuf {
        let file_name = base
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        base.with_file_name(format!("{tag}{file_name}"))
    }

    /// Write one `t x y density` line per sample.
    pub fn write_samples<W: Write>(writer: W, trajectory: &Trajectory) -> io::Result<()> {
        let mut csv = WriterBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .from_writer(writer);
        for sample in trajectory.samples() {
            csv.serialize((sample.t, sample.point.x, sample.point.y, sample.density))?;
        }
        csv.flush()
    }

    /// Persists every recorded trajectory to `<tag><base-name>` next to the base path.
    #[derive(Debug)]
    pub struct DatFileSink {
        base: PathBuf,
        written: Vec<PathBuf>,
    }

    impl DatFileSink {
        pub fn new(base: impl Into<PathBuf>) -> Self {
            Self {
                base: base.into(),
                written: Vec::new(),
            }
        }

        /// Sink whose base name is derived from a configuration path.
        pub fn for_config(config_path: &Path) -> Self {
            Self::new(data_base_name(config_path))
        }

        pub fn base(&self) -> &Path {
            &self.base
        }

        /// Files written so far, in recording order.
        pub fn written(&self) -> &[PathBuf] {
            &self.written
        }
    }

    impl SampleSink for DatFileSink {
        type Error = io::Error;

        /// Fails with `AlreadyExists` rather than overwrite a file recorded earlier in this run.
        fn record(&mut self, trajectory: &Trajectory, tag: i64) -> Result<(), Self::Error> {
            let path = tagged_path(&self.base, tag);
            if self.written.contains(&path) {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} was already written for angle tag {tag}", path.display()),
                ));
            }
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let file = File::create(&path)?;
            write_samples(BufWriter::new(file), trajectory)?;
            self.written.push(path);
            Ok(())
        }
    }

    /// Keeps recorded trajectories in memory.
    #[derive(Debug, Default)]
    pub struct MemorySink {
        pub records: Vec<(i64, Trajectory)>,
    }

    impl MemorySink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn tags(&self) -> Vec<i64> {
            self.records.iter().map(|(tag, _)| *tag).collect()
        }
    }

    impl SampleSink for MemorySink {
        type Error = Infallible;

        fn record(&mut self, trajectory: &Trajectory, tag: i64) -> Result<(), Self::Error> {
            self.records.push((tag, trajectory.clone()));
            Ok(())
        }
    }
}

/// JSON summary written after a search completes.
pub mod summary {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::{Path, PathBuf};

    use range_core::SimulationParams;
    use range_search::{SearchReport, SearchStep};

    /// Run metadata that is not part of the search report itself.
    #[derive(Debug)]
    pub struct Metadata<'a> {
        pub config: &'a str,
        pub density_model: &'a str,
        pub rotation: &'a str,
        pub angle_step_deg: f64,
    }

    #[derive(Serialize)]
    struct SummarySidecar<'a> {
        config: &'a str,
        density_model: &'a str,
        rotation: &'a str,
        angle_step_deg: f64,
        g_m_s2: f64,
        reference_density: f64,
        scale_height_m: f64,
        b2_per_mass: f64,
        time_step_s: f64,
        launch_speed_m_s: f64,
        best: StepRecord,
        steps: Vec<StepRecord>,
    }

    #[derive(Serialize)]
    struct StepRecord {
        tag: i64,
        angle_deg: f64,
        range_m: f64,
        samples: usize,
        file: Option<String>,
    }

    impl StepRecord {
        fn new(step: &SearchStep, file: Option<&PathBuf>) -> Self {
            Self {
                tag: step.tag,
                angle_deg: step.angle_deg,
                range_m: step.range,
                samples: step.samples,
                file: file.and_then(|p| p.file_name()).map(|n| n.to_string_lossy().into_owned()),
            }
        }
    }

    /// Sidecar path next to the data files (`out/shot.dat` -> `out/shot_summary.json`).
    pub fn summary_path(base: &Path) -> PathBuf {
        let stem = base
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("trajectory");
        base.with_file_name(format!("{stem}_summary.json"))
    }

    /// Write the summary sidecar. `files` lines up with `report.steps` when provided by a file sink.
    ///
    /// `params` should be the parameters the search started from.
    pub fn write_summary(
        output: &Path,
        meta: &Metadata<'_>,
        params: &SimulationParams,
        report: &SearchReport,
        files: &[PathBuf],
    ) -> io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        write_summary_to(File::create(output)?, meta, params, report, files)
    }

    /// Serialize the sidecar into `writer`, flushing before returning so write errors surface.
    pub fn write_summary_to<W: Write>(
        writer: W,
        meta: &Metadata<'_>,
        params: &SimulationParams,
        report: &SearchReport,
        files: &[PathBuf],
    ) -> io::Result<()> {
        let steps: Vec<StepRecord> = report
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| StepRecord::new(step, files.get(i)))
            .collect();

        let sidecar = SummarySidecar {
            config: meta.config,
            density_model: meta.density_model,
            rotation: meta.rotation,
            angle_step_deg: meta.angle_step_deg,
            g_m_s2: params.g,
            reference_density: params.p,
            scale_height_m: params.y0,
            b2_per_mass: params.b2_per_mass,
            time_step_s: params.time_step,
            launch_speed_m_s: params.launch_speed(),
            best: StepRecord::new(report.best_step(), files.get(report.best)),
            steps,
        };

        let mut writer = BufWriter::new(writer);
        to_writer_pretty(&mut writer, &sidecar)?;
        writer.flush()
    }
}
