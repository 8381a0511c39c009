use std::fs;
use std::io::{self, Write};
use std::ops::Range;
use std::panic;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};
use elev_profile::export::{write_gradient, write_gradient_csv, write_profile_csv};
use elev_profile::{
    analyze, label, load_path, resolve, synthesize, Analysis, Metadata, ProfileError,
    SourceConfig, SourceKind, SyntheticParams,
};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Elevation profile statistics and charts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the first available profile (export, CSV, or synthetic) and chart it
    Plot(PlotArgs),
    /// Print statistics for a single profile file
    Stats(StatsArgs),
    /// Write a synthetic profile CSV
    Synth(SynthArgs),
}

#[derive(Parser, Debug)]
struct PlotArgs {
    /// Structured export candidates, tried in order
    #[arg(long = "json", value_hint = ValueHint::FilePath)]
    json: Vec<PathBuf>,

    /// CSV candidates, tried in order after the exports
    #[arg(long = "csv", value_hint = ValueHint::FilePath)]
    csv: Vec<PathBuf>,

    /// JSON file with source candidates and synthetic parameters
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Directory for chart output
    #[arg(short, long, default_value = "./plots", value_hint = ValueHint::DirPath)]
    output_dir: PathBuf,

    /// Seed for synthetic data
    #[arg(long)]
    seed: Option<u64>,

    /// Write SVG instead of PNG
    #[arg(long, action = ArgAction::SetTrue)]
    svg: bool,

    /// Skip chart generation
    #[arg(long, action = ArgAction::SetTrue)]
    no_plot: bool,

    /// Title of the simple chart
    #[arg(long)]
    title: Option<String>,

    /// Line colour of the simple chart
    #[arg(long, value_enum, default_value_t = LineColor::Blue)]
    color: LineColor,

    /// Line width of the simple chart
    #[arg(long, default_value_t = 2)]
    line_width: u32,

    /// Hide grid lines on the simple chart
    #[arg(long, action = ArgAction::SetTrue)]
    no_grid: bool,

    /// Verbose logging
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct StatsArgs {
    /// Profile file (.json export or pair array, .csv table)
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Write the gradient series as CSV (`-` for stdout)
    #[arg(long, value_hint = ValueHint::FilePath)]
    gradient: Option<PathBuf>,

    /// Verbose logging
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct SynthArgs {
    /// Output CSV path
    #[arg(short, long, default_value = "elevation_profile.csv", value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Number of samples
    #[arg(long, default_value_t = 100)]
    count: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose logging
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LineColor {
    Blue,
    Red,
    Green,
    Black,
    Orange,
    Purple,
}

impl From<LineColor> for RGBColor {
    fn from(value: LineColor) -> Self {
        match value {
            LineColor::Blue => RGBColor(31, 119, 180),
            LineColor::Red => RGBColor(214, 39, 40),
            LineColor::Green => RGBColor(44, 160, 44),
            LineColor::Black => BLACK,
            LineColor::Orange => RGBColor(255, 127, 14),
            LineColor::Purple => RGBColor(148, 103, 189),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = match &cli.command {
        Command::Plot(args) => args.verbose,
        Command::Stats(args) => args.verbose,
        Command::Synth(args) => args.verbose,
    };
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Command::Plot(args) => handle_plot(args),
        Command::Stats(args) => handle_stats(args),
        Command::Synth(args) => handle_synth(args),
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn load_source_config(args: &PlotArgs) -> Result<SourceConfig> {
    let mut config = match args.config.as_ref() {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str::<SourceConfig>(&text)
                .with_context(|| format!("{} is not a valid source config", path.display()))?
        }
        None => SourceConfig::default(),
    };
    if !args.json.is_empty() {
        config.export_candidates = args.json.clone();
    }
    if !args.csv.is_empty() {
        config.table_candidates = args.csv.clone();
    }
    Ok(config)
}

fn handle_plot(args: PlotArgs) -> Result<()> {
    let config = load_source_config(&args)?;
    let mut rng = make_rng(args.seed);
    let resolved = resolve(&config, &mut rng);
    let metadata = &resolved.loaded.metadata;

    info!("Number of data points: {}", resolved.loaded.profile.len());
    if !metadata.is_empty() {
        info!(
            "Generated: {}",
            metadata.timestamp.as_deref().unwrap_or("Unknown")
        );
        info!("CRS: {}", metadata.input_crs.as_deref().unwrap_or("Unknown"));
    }

    let analysis = match analyze(&resolved.loaded.profile) {
        Ok(analysis) => analysis,
        Err(ProfileError::NoValidData) => {
            warn!("No valid elevation data to plot");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    info!(
        "Min {:.1} m, max {:.1} m, gain {:.1} m over {:.1} m ({} gradient segments)",
        analysis.stats.min_elevation,
        analysis.stats.max_elevation,
        analysis.stats.elevation_gain,
        analysis.stats.total_distance,
        analysis.gradient.len()
    );

    if args.no_plot {
        return Ok(());
    }

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;
    let kind = if args.svg { ChartKind::Svg } else { ChartKind::Png };

    let (default_title, simple_name) = match resolved.kind {
        SourceKind::Export => ("Simple Elevation Profile", "simple_elevation_profile.png"),
        SourceKind::Table => ("Elevation Profile from CSV", "elevation_profile_from_csv.png"),
        SourceKind::Synthetic => ("Sample Elevation Profile", "sample_elevation_profile.png"),
    };

    if resolved.kind == SourceKind::Export {
        let token = label::timestamp_token(Some(metadata));
        let path = chart_path(&args.output_dir, &label::enhanced_file_name(&token), kind);
        report_render(
            &path,
            render_guard(|| render_enhanced_chart(&analysis, Some(metadata), &path, kind)),
        );
    }

    let style = SimpleChartStyle {
        title: args.title.clone().unwrap_or_else(|| default_title.to_string()),
        color: args.color.into(),
        line_width: args.line_width.max(1),
        show_grid: !args.no_grid,
        ..SimpleChartStyle::default()
    };
    let path = chart_path(&args.output_dir, simple_name, kind);
    report_render(
        &path,
        render_guard(|| render_simple_chart(&analysis, &style, &path, kind)),
    );

    if resolved.kind == SourceKind::Synthetic {
        info!("Run the profile generator first to chart real elevation data");
    }
    Ok(())
}

fn handle_stats(args: StatsArgs) -> Result<()> {
    let loaded = load_path(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let analysis = match analyze(&loaded.profile) {
        Ok(analysis) => analysis,
        Err(ProfileError::NoValidData) => {
            warn!("No valid elevation data in {}", args.input.display());
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", label::title("Elevation Profile", Some(&loaded.metadata)))?;
    writeln!(out, "{}", label::summary(&analysis.stats))?;
    if let Some(steepest) = analysis
        .gradient
        .iter()
        .max_by(|a, b| a.percent.abs().total_cmp(&b.percent.abs()))
    {
        writeln!(
            out,
            "  Steepest Gradient: {} at {:.1} m",
            label::gradient_label(steepest.percent),
            steepest.distance
        )?;
    }
    drop(out);

    if let Some(path) = args.gradient.as_ref() {
        if path.as_os_str() == "-" {
            write_gradient(&analysis.gradient, io::stdout().lock())?;
        } else {
            write_gradient_csv(&analysis.gradient, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote gradient CSV: {}", path.display());
        }
    }
    Ok(())
}

fn handle_synth(args: SynthArgs) -> Result<()> {
    if args.count == 0 {
        return Err(anyhow!("--count must be > 0"));
    }
    let params = SyntheticParams {
        count: args.count,
        ..SyntheticParams::default()
    };
    let profile = synthesize(&params, &mut make_rng(args.seed));
    write_profile_csv(&profile, &args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(
        "Wrote synthetic profile: {} ({} points)",
        args.output.display(),
        profile.len()
    );
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ChartKind {
    Png,
    Svg,
}

impl ChartKind {
    fn extension(self) -> &'static str {
        match self {
            ChartKind::Png => "png",
            ChartKind::Svg => "svg",
        }
    }
}

#[derive(Clone, Debug)]
struct SimpleChartStyle {
    title: String,
    x_label: String,
    y_label: String,
    color: RGBColor,
    line_width: u32,
    show_grid: bool,
    size: (u32, u32),
}

impl Default for SimpleChartStyle {
    fn default() -> Self {
        Self {
            title: "Elevation Profile".to_string(),
            x_label: "Distance (m)".to_string(),
            y_label: "Elevation (m)".to_string(),
            color: LineColor::Blue.into(),
            line_width: 2,
            show_grid: true,
            size: (1200, 600),
        }
    }
}

const ENHANCED_SIZE: (u32, u32) = (1400, 1000);
const ELEVATION_FILL: RGBColor = RGBColor(173, 216, 230);
const GRADIENT_LINE: RGBColor = RGBColor(214, 39, 40);
const GRADIENT_FILL: RGBColor = RGBColor(240, 128, 128);

fn chart_path(dir: &Path, file_name: &str, kind: ChartKind) -> PathBuf {
    dir.join(file_name).with_extension(kind.extension())
}

fn report_render(path: &Path, result: Result<(), String>) {
    match result {
        Ok(()) => info!("Plot saved to: {}", path.display()),
        Err(err) => warn!("Skipping render ({}): {}", path.display(), err),
    }
}

/// Runs a renderer, turning backend errors and panics (missing fonts) into a message.
fn render_guard<F>(render: F) -> Result<(), String>
where
    F: FnOnce() -> Result<()>,
{
    panic::catch_unwind(panic::AssertUnwindSafe(render))
        .map_err(|_| "plotting backend panicked".to_string())?
        .map_err(|err| format!("plotting error: {:#}", err))
}

/// Value range with a small margin; never empty.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let span = hi - lo;
    if span <= f64::EPSILON {
        return (lo - 1.0)..(hi + 1.0);
    }
    let pad = span * 0.05;
    (lo - pad)..(hi + pad)
}

fn render_enhanced_chart(
    analysis: &Analysis,
    metadata: Option<&Metadata>,
    path: &Path,
    kind: ChartKind,
) -> Result<()> {
    match kind {
        ChartKind::Png => {
            let root = BitMapBackend::new(path, ENHANCED_SIZE).into_drawing_area();
            draw_enhanced_chart(root, analysis, metadata)
        }
        ChartKind::Svg => {
            let root = SVGBackend::new(path, ENHANCED_SIZE).into_drawing_area();
            draw_enhanced_chart(root, analysis, metadata)
        }
    }
}

fn render_simple_chart(
    analysis: &Analysis,
    style: &SimpleChartStyle,
    path: &Path,
    kind: ChartKind,
) -> Result<()> {
    match kind {
        ChartKind::Png => {
            let root = BitMapBackend::new(path, style.size).into_drawing_area();
            draw_simple_chart(root, analysis, style)
        }
        ChartKind::Svg => {
            let root = SVGBackend::new(path, style.size).into_drawing_area();
            draw_simple_chart(root, analysis, style)
        }
    }
}

fn draw_text_box<DB>(area: &DrawingArea<DB, Shift>, text: &str, origin: (i32, i32)) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let font = ("sans-serif", 16).into_font();
    let line_height = 20;
    let lines: Vec<&str> = text.lines().collect();
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32 * 9 + 16;
    let height = lines.len() as i32 * line_height + 12;
    let (x, y) = origin;
    area.draw(&Rectangle::new(
        [(x, y), (x + width, y + height)],
        WHITE.mix(0.9).filled(),
    ))?;
    area.draw(&Rectangle::new(
        [(x, y), (x + width, y + height)],
        BLACK.mix(0.4),
    ))?;
    for (idx, line) in lines.iter().enumerate() {
        area.draw(&Text::new(
            line.to_string(),
            (x + 8, y + 6 + idx as i32 * line_height),
            font.clone(),
        ))?;
    }
    Ok(())
}

fn draw_enhanced_chart<DB>(
    root: DrawingArea<DB, Shift>,
    analysis: &Analysis,
    metadata: Option<&Metadata>,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 1));
    let (upper, lower) = (&panels[0], &panels[1]);

    let title = label::title("Elevation Profile", metadata);
    let title_font = ("sans-serif", 24).into_font().style(FontStyle::Bold);
    let mut elevation_area = upper.clone();
    for line in title.lines() {
        elevation_area = elevation_area.titled(line, title_font.clone())?;
    }

    let x_range = padded_range(analysis.points.iter().map(|p| p.0));
    let y_range = padded_range(analysis.points.iter().map(|p| p.1));
    let baseline = y_range.start;

    let mut chart = ChartBuilder::on(&elevation_area)
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), y_range)?;
    chart
        .configure_mesh()
        .x_desc("Distance (m)")
        .y_desc("Elevation (m)")
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.15))
        .draw()?;

    chart.draw_series(AreaSeries::new(
        analysis.points.iter().copied(),
        baseline,
        ELEVATION_FILL.mix(0.3),
    ))?;
    let line_color = RGBColor::from(LineColor::Blue);
    chart
        .draw_series(LineSeries::new(
            analysis.points.iter().copied(),
            line_color.stroke_width(2),
        ))?
        .label("Elevation")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], line_color));
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    draw_text_box(
        &chart.plotting_area().strip_coord_spec(),
        &label::summary(&analysis.stats),
        (10, 10),
    )?;

    if !analysis.gradient.is_empty() {
        let grad_y = padded_range(
            analysis
                .gradient
                .iter()
                .map(|g| g.percent)
                .chain(std::iter::once(0.0)),
        );
        let gradient_font = ("sans-serif", 20).into_font().style(FontStyle::Bold);
        let gradient_area = lower.titled("Elevation Gradient", gradient_font)?;
        let mut gchart = ChartBuilder::on(&gradient_area)
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range.clone(), grad_y)?;
        gchart
            .configure_mesh()
            .x_desc("Distance (m)")
            .y_desc("Gradient (%)")
            .y_label_formatter(&|v| label::gradient_label(*v))
            .light_line_style(BLACK.mix(0.05))
            .bold_line_style(BLACK.mix(0.15))
            .draw()?;

        let points: Vec<(f64, f64)> = analysis
            .gradient
            .iter()
            .map(|g| (g.distance, g.percent))
            .collect();
        gchart.draw_series(LineSeries::new(
            vec![(x_range.start, 0.0), (x_range.end, 0.0)],
            BLACK.mix(0.3),
        ))?;
        gchart.draw_series(AreaSeries::new(
            points.iter().copied(),
            0.0,
            GRADIENT_FILL.mix(0.3),
        ))?;
        gchart
            .draw_series(LineSeries::new(
                points.iter().copied(),
                GRADIENT_LINE.stroke_width(2),
            ))?
            .label("Gradient (%)")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], GRADIENT_LINE));
        gchart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn draw_simple_chart<DB>(
    root: DrawingArea<DB, Shift>,
    analysis: &Analysis,
    style: &SimpleChartStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let x_range = padded_range(analysis.points.iter().map(|p| p.0));
    let y_range = padded_range(analysis.points.iter().map(|p| p.1));

    let mut chart = ChartBuilder::on(&root)
        .caption(&style.title, ("sans-serif", 26).into_font().style(FontStyle::Bold))
        .margin(25)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(style.x_label.as_str())
        .y_desc(style.y_label.as_str())
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.3));
    if !style.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    chart.draw_series(LineSeries::new(
        analysis.points.iter().copied(),
        style.color.stroke_width(style.line_width),
    ))?;

    draw_text_box(
        &chart.plotting_area().strip_coord_spec(),
        &label::simple_summary(&analysis.stats),
        (10, 10),
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use elev_profile::{Profile, Sample};

    #[test]
    fn padded_range_handles_flat_and_empty() {
        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
        assert_eq!(padded_range([5.0, 5.0].into_iter()), 4.0..6.0);
        let r = padded_range([0.0, 100.0, f64::NAN].into_iter());
        assert!((r.start + 5.0).abs() < 1e-9 && (r.end - 105.0).abs() < 1e-9);
    }

    #[test]
    fn chart_path_uses_kind_extension() {
        let dir = Path::new("plots");
        assert_eq!(
            chart_path(dir, "elevation_profile_unknown.png", ChartKind::Svg),
            PathBuf::from("plots/elevation_profile_unknown.svg")
        );
        assert_eq!(
            chart_path(dir, "simple_elevation_profile.png", ChartKind::Png),
            PathBuf::from("plots/simple_elevation_profile.png")
        );
    }

    #[test]
    fn render_guard_catches_panics() {
        let result = render_guard(|| panic!("font missing"));
        assert_eq!(result, Err("plotting backend panicked".to_string()));
        assert!(render_guard(|| Err(anyhow!("boom"))).is_err());
        assert!(render_guard(|| Ok(())).is_ok());
    }

    #[test]
    fn cli_parses_plot_flags() {
        let cli = Cli::try_parse_from([
            "elev-profile",
            "plot",
            "--json",
            "a.json",
            "--json",
            "b.json",
            "--csv",
            "c.csv",
            "--seed",
            "9",
            "--color",
            "red",
            "--svg",
        ])
        .unwrap();
        let Command::Plot(args) = cli.command else {
            panic!("expected plot command");
        };
        assert_eq!(args.json.len(), 2);
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.color, LineColor::Red);
        assert!(args.svg);
        let config = load_source_config(&args).unwrap();
        assert_eq!(config.export_candidates[1], PathBuf::from("b.json"));
        assert_eq!(config.table_candidates, vec![PathBuf::from("c.csv")]);
    }

    fn run_plot(json: &Path, csv: &Path, out: &Path, extra: &[&str]) {
        let mut argv: Vec<std::ffi::OsString> = vec![
            "elev-profile".into(),
            "plot".into(),
            "--json".into(),
            json.into(),
            "--csv".into(),
            csv.into(),
            "--output-dir".into(),
            out.into(),
        ];
        argv.extend(extra.iter().map(|a| a.into()));
        let cli = Cli::try_parse_from(argv).unwrap();
        let Command::Plot(args) = cli.command else {
            panic!("expected plot command");
        };
        handle_plot(args).unwrap();
    }

    fn written_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn plot_without_valid_data_writes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let table = dir.path().join("profile.csv");
        write_profile_csv(
            &Profile::new(vec![Sample::missing(0.0), Sample::missing(1.0)]),
            &table,
        )
        .unwrap();
        let out = dir.path().join("plots");
        run_plot(&dir.path().join("absent.json"), &table, &out, &[]);
        assert!(!out.exists());
    }

    #[test]
    fn plot_export_writes_enhanced_and_simple_charts() {
        let dir = tempfile::TempDir::new().unwrap();
        let export = dir.path().join("elevation_profile.json");
        fs::write(
            &export,
            r#"{"elevationProfile":[[0,100],[10,110],[20,105],[30,null],[40,98]],
                "metadata":{"timestamp":"2024-05-01T10:20:30.123Z","inputCRS":"EPSG:4326",
                            "point1":{"x":10.1,"y":59.9},"point2":{"x":10.2,"y":60.0}}}"#,
        )
        .unwrap();
        let out = dir.path().join("plots");
        run_plot(&export, &dir.path().join("absent.csv"), &out, &["--svg"]);
        assert_eq!(
            written_files(&out),
            vec![
                "elevation_profile_2024-05-01_10-20-30.svg".to_string(),
                "simple_elevation_profile.svg".to_string(),
            ]
        );
        let enhanced = fs::read_to_string(out.join("elevation_profile_2024-05-01_10-20-30.svg"))
            .unwrap();
        assert!(enhanced.contains("<svg"));
    }

    #[test]
    fn plot_table_writes_only_csv_chart() {
        let dir = tempfile::TempDir::new().unwrap();
        let table = dir.path().join("profile.csv");
        fs::write(&table, "distance,elevation\n0,50\n5,55\n10,52\n").unwrap();
        let out = dir.path().join("plots");
        run_plot(&dir.path().join("absent.json"), &table, &out, &["--svg"]);
        assert_eq!(
            written_files(&out),
            vec!["elevation_profile_from_csv.svg".to_string()]
        );
    }

    #[test]
    fn synth_writes_seeded_csv() {
        let dir = tempfile::TempDir::new().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        for path in [&a, &b] {
            handle_synth(SynthArgs {
                output: path.clone(),
                count: 20,
                seed: Some(11),
                verbose: false,
            })
            .unwrap();
        }
        let text = fs::read_to_string(&a).unwrap();
        assert_eq!(text.lines().count(), 21);
        assert_eq!(text, fs::read_to_string(&b).unwrap());
    }
}
