use dotplot::{RawItem, SignColorClassifier};
use dotplot_render::config::DotPlotConfig;
use dotplot_render::svg::{SvgRenderOptions, render_dot_plot_svg};
use dotplot_render::{LayoutOptions, layout_dot_plot};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Items(dotplot::Error),
    Render(dotplot_render::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Items(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<dotplot::Error> for CliError {
    fn from(value: dotplot::Error) -> Self {
        Self::Items(value)
    }
}

impl From<dotplot_render::Error> for CliError {
    fn from(value: dotplot_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    Normalize,
    Layout,
    #[default]
    Render,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    width: f64,
    font_size: Option<f64>,
    config: Option<String>,
    background: Option<String>,
    diagram_id: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "dotplot-cli\n\
\n\
USAGE:\n\
  dotplot-cli normalize [--pretty] [<path>|-]\n\
  dotplot-cli layout [--pretty] [--width <px>] [--font-size <px>] [--config <path>] [<path>|-]\n\
  dotplot-cli [render] [--width <px>] [--font-size <px>] [--config <path>] [--background <css-color>] [--id <svg-id>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - Input is a JSON array of {name, confidentialInternal: {lowerBound, upperBound}} items.\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - --width is the container width in pixels (default 800).\n\
  - --config reads a JSON object whose `dotPlot` section overrides sizes and colors.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - Set RUST_LOG=debug to trace the layout passes on stderr.\n\
"
}

fn parse_px(value: Option<&String>) -> Result<f64, CliError> {
    let Some(value) = value else {
        return Err(CliError::Usage(usage()));
    };
    let px = value
        .trim()
        .trim_end_matches("px")
        .parse::<f64>()
        .map_err(|_| CliError::Usage(usage()))?;
    if !(px.is_finite() && px >= 0.0) {
        return Err(CliError::Usage(usage()));
    }
    Ok(px)
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Render,
        width: 800.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "normalize" => args.command = Command::Normalize,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--width" => args.width = parse_px(it.next())?,
            "--font-size" => {
                let size = parse_px(it.next())?;
                if size <= 0.0 {
                    return Err(CliError::Usage(usage()));
                }
                args.font_size = Some(size);
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn build_config(args: &Args) -> Result<DotPlotConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let value: Value = serde_json::from_str(&text)?;
            DotPlotConfig::from_effective_config(&value)
        }
        None => DotPlotConfig::default(),
    };
    if let Some(size) = args.font_size {
        config.label_font_size = size;
    }
    Ok(config)
}

fn layout_options(args: &Args) -> Result<LayoutOptions, CliError> {
    Ok(LayoutOptions::default().with_config(build_config(args)?))
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let items: Vec<RawItem> = dotplot::parse_items(&text)?;
    tracing::debug!(command = ?args.command, items = items.len(), "parsed input");

    match args.command {
        Command::Normalize => {
            let records = dotplot::normalize(&items, &SignColorClassifier);
            write_json(&records, args.pretty)
        }
        Command::Layout => {
            let options = layout_options(&args)?;
            let layout = layout_dot_plot(&items, args.width, &SignColorClassifier, &options)?;
            write_json(&layout, args.pretty)
        }
        Command::Render => {
            let options = layout_options(&args)?;
            let layout = layout_dot_plot(&items, args.width, &SignColorClassifier, &options)?;
            let svg_options = SvgRenderOptions {
                diagram_id: args.diagram_id.clone(),
                background: args.background.clone(),
                ..Default::default()
            };
            let svg = render_dot_plot_svg(&layout, &svg_options)?;
            write_text(&svg, args.out.as_deref())
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
