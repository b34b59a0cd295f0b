//! cardmat CLI: printable card scanning mats and marker bit tables.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use cardmat_aruco::{
    px_per_cell_for, render_marker, BuiltinDictionary, MarkerSpec, ARUCO_MIP_36H12,
};
use cardmat_core::{init_with_level, parse_level};
use cardmat_layout::{plan, LayoutSpec, CORNER_IDS};
use cardmat_print::{scad, write_bundle, write_png, MatConfig, PageSpec};
use clap::{Args, Parser, Subcommand, ValueEnum};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "cardmat")]
#[command(about = "Generate card scanning mats and fiducial marker bit tables")]
#[command(version)]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the scanning mat as SVG, PNG and JSON.
    Mat(MatArgs),

    /// Print the card outline and marker placement as JSON.
    Plan(LayoutArgs),

    /// Emit an OpenSCAD lookup function of marker bit matrices.
    Scad {
        /// Embedded dictionary name.
        #[arg(long, default_value = ARUCO_MIP_36H12)]
        dictionary: String,

        /// Marker ids, comma separated (defaults to the four mat markers).
        #[arg(long, value_delimiter = ',')]
        ids: Vec<u32>,

        /// Output file (stdout when omitted).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write a single marker image as PNG.
    Marker {
        /// Marker id.
        #[arg(long)]
        id: u32,

        /// Embedded dictionary name.
        #[arg(long, default_value = ARUCO_MIP_36H12)]
        dictionary: String,

        /// Minimum image side in pixels; rounded up to whole cells.
        #[arg(long, default_value = "200")]
        size_px: usize,

        /// Printed side in millimeters; renders at `--dpi` instead of `--size-px`.
        #[arg(long, conflicts_with = "size_px")]
        size_mm: Option<f64>,

        /// Resolution used with `--size-mm`, also stored in the PNG.
        #[arg(long, default_value = "300")]
        dpi: f64,

        /// Output PNG path.
        #[arg(long)]
        out: PathBuf,
    },

    /// Write a mat config with default values.
    InitConfig {
        /// Output JSON path.
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PageArg {
    Letter,
    A4,
}

impl From<PageArg> for PageSpec {
    fn from(p: PageArg) -> Self {
        match p {
            PageArg::Letter => PageSpec::LETTER,
            PageArg::A4 => PageSpec::A4,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct LayoutArgs {
    /// Card width in millimeters.
    #[arg(long)]
    card_width: Option<f64>,

    /// Card height in millimeters.
    #[arg(long)]
    card_height: Option<f64>,

    /// Marker side in millimeters.
    #[arg(long)]
    marker_size: Option<f64>,

    /// Gap between the card outline and the markers in millimeters.
    #[arg(long)]
    gap: Option<f64>,
}

impl LayoutArgs {
    fn apply(&self, layout: &mut LayoutSpec) {
        if let Some(v) = self.card_width {
            layout.card_width_mm = v;
        }
        if let Some(v) = self.card_height {
            layout.card_height_mm = v;
        }
        if let Some(v) = self.marker_size {
            layout.marker_size_mm = v;
        }
        if let Some(v) = self.gap {
            layout.gap_mm = v;
        }
    }
}

#[derive(Debug, Clone, Args)]
struct MatArgs {
    /// JSON config (see `init-config`); flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output path without extension; `.svg`, `.png` and `.json` are appended.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,

    /// Embedded dictionary name.
    #[arg(long)]
    dictionary: Option<String>,

    /// Page size.
    #[arg(long, value_enum)]
    page: Option<PageArg>,

    /// Raster resolution for the PNG output.
    #[arg(long)]
    dpi: Option<f64>,

    /// Text centered in the card outline.
    #[arg(long)]
    label: Option<String>,

    /// Do not draw `ID: n` under the markers.
    #[arg(long)]
    no_marker_labels: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_with_level(parse_level(&cli.log_level)) {
        eprintln!("failed to initialize logger: {e}");
    }
    #[cfg(feature = "tracing")]
    cardmat_core::init_tracing(false, &cli.log_level);

    let res = match cli.command {
        Commands::Mat(args) => run_mat(&args),
        Commands::Plan(args) => run_plan(&args),
        Commands::Scad {
            dictionary,
            ids,
            out,
        } => run_scad(&dictionary, &ids, out.as_deref()),
        Commands::Marker {
            id,
            dictionary,
            size_px,
            size_mm,
            dpi,
            out,
        } => match size_mm {
            Some(size_mm) => run_marker_mm(id, &dictionary, size_mm, dpi, &out),
            None => run_marker(id, &dictionary, size_px, &out),
        },
        Commands::InitConfig { out } => run_init_config(&out),
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

// ── mat ────────────────────────────────────────────────────────────────

fn resolve_mat_config(args: &MatArgs) -> CliResult<MatConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            log::info!("loading config {}", path.display());
            MatConfig::load_json(path)?
        }
        None => MatConfig::default(),
    };
    args.layout.apply(&mut cfg.layout);
    if let Some(d) = &args.dictionary {
        cfg.dictionary = d.clone();
    }
    if let Some(p) = args.page {
        cfg.page = p.into();
    }
    if let Some(dpi) = args.dpi {
        cfg.png_dpi = dpi;
    }
    if let Some(label) = &args.label {
        cfg.label = Some(label.clone());
    }
    if args.no_marker_labels {
        cfg.marker_labels = false;
    }
    if let Some(out) = &args.out {
        cfg.output_stem = out.to_string_lossy().into_owned();
    }
    Ok(cfg)
}

fn run_mat(args: &MatArgs) -> CliResult<()> {
    let cfg = resolve_mat_config(args)?;
    let page = cfg.build_page()?;
    for m in &page.plan.markers {
        log::info!(
            "marker {} ({}) center ({:.2}, {:.2}) mm",
            m.id,
            m.corner.abbrev(),
            m.center.x,
            m.center.y
        );
    }
    let paths = write_bundle(&page, cfg.output_stem(), cfg.png_dpi)?;
    println!("{}", paths.svg.display());
    println!("{}", paths.png.display());
    println!("{}", paths.json.display());
    Ok(())
}

// ── plan ───────────────────────────────────────────────────────────────

fn run_plan(args: &LayoutArgs) -> CliResult<()> {
    let mut layout = LayoutSpec::default();
    args.apply(&mut layout);
    let plan = plan(&layout)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

// ── scad ───────────────────────────────────────────────────────────────

fn run_scad(dictionary: &str, ids: &[u32], out: Option<&Path>) -> CliResult<()> {
    let dict = BuiltinDictionary::by_name(dictionary)?;
    let ids = if ids.is_empty() { &CORNER_IDS[..] } else { ids };
    let text = scad::generate(&dict, ids)?;
    match out {
        Some(path) => {
            std::fs::write(path, &text)?;
            log::info!("wrote {} marker matrices to {}", ids.len(), path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

// ── marker ─────────────────────────────────────────────────────────────

fn run_marker(id: u32, dictionary: &str, size_px: usize, out: &Path) -> CliResult<()> {
    let dict = BuiltinDictionary::by_name(dictionary)?;
    let img = render_marker(&dict, id, px_per_cell_for(&dict, size_px))?;
    write_png(out, &img, None)?;
    log::info!(
        "wrote marker {id} ({}x{} px) to {}",
        img.width,
        img.height,
        out.display()
    );
    Ok(())
}

fn run_marker_mm(id: u32, dictionary: &str, size_mm: f64, dpi: f64, out: &Path) -> CliResult<()> {
    let dict = BuiltinDictionary::by_name(dictionary)?;
    let spec = MarkerSpec::new(&dict, id, size_mm)?;
    let img = spec.render(&dict, dpi)?;
    write_png(out, &img, Some(dpi))?;
    log::info!(
        "wrote marker {id} ({size_mm} mm, {}x{} px at {dpi} dpi) to {}",
        img.width,
        img.height,
        out.display()
    );
    Ok(())
}

// ── init-config ────────────────────────────────────────────────────────

fn run_init_config(out: &Path) -> CliResult<()> {
    MatConfig::default().write_json(out)?;
    log::info!("wrote default config to {}", out.display());
    Ok(())
}
