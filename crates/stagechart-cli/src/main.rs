mod logging;

use serde::Serialize;
use stagechart::DiagramConfig;
use stagechart::render::raster::{Background, RasterError, RasterOptions};
use stagechart::render::{HeadlessError, HeadlessRenderer};
use std::io::Write;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Render(HeadlessError),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Render(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Render,
    Layout,
    Stages,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    pretty: bool,
    scene: bool,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<Background>,
    diagram_id: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "stagechart-cli\n\
\n\
USAGE:\n\
  stagechart-cli [render] [--format svg|png|jpg|pdf] [--scale <n>] [--background <color>] [--id <diagram-id>] [--out <path>]\n\
  stagechart-cli layout [--pretty] [--scene]\n\
  stagechart-cli stages\n\
\n\
NOTES:\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to ./pipeline.<ext>; use --out - for stdout.\n\
  - layout prints the computed geometry as JSON; --scene prints the recorded draw calls.\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "layout" => args.command = Command::Layout,
            "stages" => args.command = Command::Stages,
            "--pretty" => args.pretty = true,
            "--scene" => args.scene = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let bg = bg.parse::<Background>().map_err(|err| {
                    tracing::debug!(%err, "rejected --background");
                    CliError::Usage(usage())
                })?;
                args.background = Some(bg);
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
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn write_bytes(bytes: &[u8], out: &str) -> Result<(), CliError> {
    if out == "-" {
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(out, bytes)?;
        tracing::info!(path = out, bytes = bytes.len(), "wrote diagram");
    }
    Ok(())
}

fn stage_line(index: usize, stage: &stagechart::Stage) -> String {
    format!(
        "{:>2}  {}  {}",
        index + 1,
        stage.fill.to_hex(),
        stage.lines().collect::<Vec<_>>().join(" / ")
    )
}

fn run(args: Args) -> Result<(), CliError> {
    let mut renderer = HeadlessRenderer::new(DiagramConfig::predictive_maintenance());
    if let Some(id) = args.diagram_id.as_deref() {
        renderer = renderer.with_diagram_id(id);
    }

    match args.command {
        Command::Stages => {
            let mut stdout = std::io::stdout().lock();
            for (i, stage) in renderer.config.stages().iter().enumerate() {
                writeln!(stdout, "{}", stage_line(i, stage))?;
            }
            Ok(())
        }
        Command::Layout => {
            if args.scene {
                write_json(&renderer.render_scene()?, args.pretty)
            } else {
                write_json(&renderer.layout()?, args.pretty)
            }
        }
        Command::Render => {
            let raster_options = RasterOptions {
                scale: args.render_scale,
                background: args.background,
                ..RasterOptions::default()
            };
            let default_out = || format!("pipeline.{}", args.render_format.extension());

            match args.render_format {
                RenderFormat::Svg => {
                    let svg = renderer.render_svg()?;
                    match args.out.as_deref() {
                        None => write_bytes(svg.as_bytes(), "-"),
                        Some(path) => write_bytes(svg.as_bytes(), path),
                    }
                }
                RenderFormat::Png => {
                    let bytes = renderer.render_png(&raster_options)?;
                    write_bytes(&bytes, &args.out.clone().unwrap_or_else(default_out))
                }
                RenderFormat::Jpeg => {
                    let bytes = renderer.render_jpeg(&raster_options)?;
                    write_bytes(&bytes, &args.out.clone().unwrap_or_else(default_out))
                }
                RenderFormat::Pdf => {
                    let bytes = renderer.render_pdf()?;
                    write_bytes(&bytes, &args.out.clone().unwrap_or_else(default_out))
                }
            }
        }
    }
}

fn main() {
    logging::init();

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
        tracing::error!(error = %err, "stagechart-cli failed");
        eprintln!("{err}");
        std::process::exit(1);
    }
}
