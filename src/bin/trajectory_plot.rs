use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render trajectory .dat files (t x y density) as a height-over-range chart"
)]
struct Cli {
    /// Trajectory data files written by `projectile`
    #[arg(long, required = true, num_args = 1..)]
    input: Vec<PathBuf>,
    #[arg(long, default_value = "artifacts/trajectories.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 900)]
    height: u32,
    /// Plot axes in kilometres instead of metres
    #[arg(long, default_value_t = false)]
    km: bool,
}

#[derive(Debug, Clone)]
struct Series {
    label: String,
    tag: Option<i64>,
    points: Vec<(f64, f64)>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let scale = if cli.km { 1.0e-3 } else { 1.0 };

    let mut series = Vec::with_capacity(cli.input.len());
    for path in &cli.input {
        series.push(read_series(path, scale)?);
    }

    let x_max = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.0))
        .fold(f64::NEG_INFINITY, f64::max);
    let y_max = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.1))
        .fold(f64::NEG_INFINITY, f64::max);
    if !x_max.is_finite() || !y_max.is_finite() {
        return Err(anyhow::anyhow!("No samples in the provided trajectory files"));
    }
    let x_max = if x_max > 0.0 { x_max * 1.05 } else { 1.0 };
    let y_max = if y_max > 0.0 { y_max * 1.10 } else { 1.0 };

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let caption_font = FontDesc::new(FontFamily::SansSerif, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(FontFamily::SansSerif, 18.0, FontStyle::Normal);
    let unit = if cli.km { "km" } else { "m" };

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Projectile trajectories".to_string(), caption_font)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc(format!("x ({unit})"))
        .y_desc(format!("y ({unit})"))
        .label_style(label_font.clone())
        .x_labels(8)
        .y_labels(6)
        .draw()?;

    for s in &series {
        let color = angle_color(s.tag);
        chart
            .draw_series(std::iter::once(PathElement::new(
                s.points.clone(),
                ShapeStyle::from(&color).stroke_width(2),
            )))?
            .label(s.label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(label_font)
        .draw()?;

    root.present()?;
    Ok(())
}

fn read_series(path: &Path, scale: f64) -> anyhow::Result<Series> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .from_path(path)?;

    let mut points = Vec::new();
    for (line, rec) in rdr.records().enumerate() {
        let r = rec?;
        let x = parse_field(&r, 1, path, line)?;
        let y = parse_field(&r, 2, path, line)?;
        points.push((x * scale, y * scale));
    }

    let tag = file_angle_tag(path);
    let label = match tag {
        Some(deg) => format!("{deg}°"),
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    Ok(Series { label, tag, points })
}

fn parse_field(
    record: &csv::StringRecord,
    idx: usize,
    path: &Path,
    line: usize,
) -> anyhow::Result<f64> {
    record
        .get(idx)
        .ok_or_else(|| anyhow::anyhow!("{}:{}: missing column {}", path.display(), line + 1, idx))?
        .parse::<f64>()
        .map_err(|err| anyhow::anyhow!("{}:{}: {}", path.display(), line + 1, err))
}

/// Angle tag from the leading digits of the file name (`45shot.dat` -> 45).
fn file_angle_tag(path: &Path) -> Option<i64> {
    let name = path.file_name()?.to_str()?;
    let end = name
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
        .map_or(name.len(), |(i, _)| i);
    name[..end].parse().ok()
}

/// Shallow launches are drawn red, steep ones blue; untagged files are grey.
fn angle_color(tag: Option<i64>) -> HSLColor {
    match tag {
        Some(deg) => HSLColor(deg.clamp(0, 90) as f64 / 90.0 * (2.0 / 3.0), 0.85, 0.45),
        None => HSLColor(0.0, 0.0, 0.4),
    }
}
