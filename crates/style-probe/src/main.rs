//! style-probe entrypoint.
//!
//! Loads a view style configuration, applies it to a fresh `ViewStyle`,
//! refreshes against the fixed-pitch reference surface and prints the
//! derived metrics.
use anyhow::Result;
use clap::Parser;
use core_config::load_from;
use core_style::ViewStyle;
use core_style::style::STYLE_DEFAULT;
use core_surface::{FixedPitchSurface, PlatformDefaults};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "style-probe.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "style-probe", version, about = "Print derived view style metrics")]
struct Args {
    /// Configuration file path (overrides discovery of `view-style.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
    /// Tab width in characters; overrides the configured value.
    #[arg(long = "tab-width")]
    tab_width: Option<i32>,
    /// Zoom level in points; overrides the configured value.
    #[arg(long = "zoom", allow_negative_numbers = true)]
    zoom: Option<i32>,
    /// Resolution of the reference surface.
    #[arg(long = "dpi", default_value_t = 96)]
    dpi: i32,
}

struct Probe {
    log_guard: Option<WorkerGuard>,
}

impl Probe {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn run(&mut self) -> Result<()> {
        self.configure_logging()?;
        Self::install_panic_hook();
        info!(target: "runtime", "startup");

        let args = Args::parse();
        let config = load_from(args.config.clone())?;

        let mut vs = ViewStyle::new(PlatformDefaults::detect());
        let changed = config.apply(&mut vs)?;
        if let Some(zoom) = args.zoom {
            vs.set_zoom_level(zoom);
        }
        let tab_width = args.tab_width.unwrap_or_else(|| config.tab_width()).max(1);

        let mut surface = FixedPitchSurface::new(args.dpi);
        vs.refresh(&mut surface, tab_width);
        info!(
            target: "runtime",
            config_changed = changed,
            fonts = surface.allocations(),
            dpi = args.dpi,
            "probe_complete"
        );

        print!("{}", report(&vs));
        Ok(())
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

/// Human readable summary of a refreshed view style.
fn report(vs: &ViewStyle) -> String {
    let metrics = vs.metrics();
    let layout = vs.layout();
    let default_style = vs.style(STYLE_DEFAULT);
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "font            {} {}pt",
        default_style.font.name().unwrap_or("<none>"),
        f64::from(default_style.font.size) / 100.0
    );
    let _ = writeln!(out, "zoom            {}", vs.zoom_level());
    let _ = writeln!(out, "line height     {}", metrics.line_height);
    let _ = writeln!(out, "line overlap    {}", metrics.line_overlap);
    let _ = writeln!(
        out,
        "ascent/descent  {}/{}",
        metrics.max_ascent, metrics.max_descent
    );
    let _ = writeln!(out, "char width      {}", metrics.ave_char_width);
    let _ = writeln!(out, "space width     {}", metrics.space_width);
    let _ = writeln!(out, "tab width       {}", metrics.tab_width);
    let _ = writeln!(out, "fixed columns   {}", layout.fixed_column_width);
    let _ = writeln!(out, "text start      {}", layout.text_start);
    let _ = writeln!(out, "mask in line    {:#010x}", layout.mask_in_line);
    let _ = writeln!(out, "mask in text    {:#010x}", layout.mask_draw_in_text);
    let _ = writeln!(out, "fonts           {}", vs.fonts().len());
    for (index, margin) in vs.margins().iter().enumerate() {
        let _ = writeln!(
            out,
            "margin {index}        {:?} width={} mask={:#010x}",
            margin.kind, margin.width, margin.mask
        );
    }
    out
}

fn main() -> Result<()> {
    let mut probe = Probe::new();
    probe.run()
}
