use futures::executor::block_on;
use galleria::render::{EdgeMode, RenderOptions, generate_venue_svg};
use galleria::{
    Corridor, Exhibit, ExhibitGraph, LayoutDoc, Room, VenueDoc, VenueMap,
    layout_file_from_json_str,
};
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Map(galleria::Error),
    Render(galleria::render::HeadlessError),
    Json(serde_json::Error),
    LayoutMissing(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Map(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::LayoutMissing(venue) => write!(f, "No layout entry for venue '{venue}'"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<galleria::Error> for CliError {
    fn from(value: galleria::Error) -> Self {
        Self::Map(value)
    }
}

impl From<galleria::render::HeadlessError> for CliError {
    fn from(value: galleria::render::HeadlessError) -> Self {
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
    #[default]
    Render,
    Layout,
    Route,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    layout: Option<String>,
    venue: Option<String>,
    mode: EdgeMode,
    focus: Option<(String, String)>,
    out: Option<String>,
    pretty: bool,
    from: Option<String>,
    to: Option<String>,
}

/// Geometry dump of an assembled map, borrowed straight from it.
#[derive(Serialize)]
struct LayoutOut<'a> {
    name: &'a str,
    rooms: &'a [Room],
    corridors: &'a [Corridor],
    exhibits: &'a [Exhibit],
}

fn usage() -> &'static str {
    "galleria-cli\n\
\n\
USAGE:\n\
  galleria-cli [render] --layout <path|-> --venue <path|-> [--mode all|path|services|none] [--focus <a> <b>] [--out <path>]\n\
  galleria-cli layout --layout <path|-> --venue <path|-> [--pretty]\n\
  galleria-cli route --layout <path|-> --venue <path|-> --from <exhibit> --to <exhibit> [--pretty]\n\
\n\
NOTES:\n\
  - '-' reads that document from stdin; at most one input may use it.\n\
  - The layout file maps venue names to layout documents; the entry is\n\
    selected by the venue document's own name.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - layout dumps the assembled geometry (rooms, corridors, exhibits) as JSON.\n\
  - route prints the exhibit-to-exhibit walk as a JSON array of names.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "layout" => args.command = Command::Layout,
            "route" => args.command = Command::Route,
            "--layout" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.layout = Some(path.clone());
            }
            "--venue" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.venue = Some(path.clone());
            }
            "--mode" => {
                let Some(mode) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.mode = EdgeMode::parse(mode).ok_or(CliError::Usage(usage()))?;
            }
            "--focus" => {
                let Some(from) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let Some(to) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.focus = Some((from.clone(), to.clone()));
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--pretty" => args.pretty = true,
            "--from" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.from = Some(name.clone());
            }
            "--to" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.to = Some(name.clone());
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    if args.layout.is_none() || args.venue.is_none() {
        return Err(CliError::Usage(usage()));
    }
    // Both inputs on stdin would leave the second one empty.
    if args.layout.as_deref() == Some("-") && args.venue.as_deref() == Some("-") {
        return Err(CliError::Usage(usage()));
    }
    if matches!(args.command, Command::Route) && (args.from.is_none() || args.to.is_none()) {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn load_documents(args: &Args) -> Result<(LayoutDoc, VenueDoc), CliError> {
    let (Some(layout_path), Some(venue_path)) = (args.layout.as_deref(), args.venue.as_deref())
    else {
        return Err(CliError::Usage(usage()));
    };

    let venue = VenueDoc::from_json_str(&read_input(venue_path)?)?;
    let layouts = layout_file_from_json_str(&read_input(layout_path)?)?;
    let Some(layout) = layouts.get(&venue.name) else {
        return Err(CliError::LayoutMissing(venue.name.clone()));
    };
    Ok((layout.clone(), venue))
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
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

fn run(args: Args) -> Result<(), CliError> {
    let (layout, venue) = load_documents(&args)?;

    match args.command {
        Command::Render => {
            let options = RenderOptions {
                mode: args.mode,
                focus: args.focus.clone(),
            };
            let svg = block_on(generate_venue_svg(&layout, &venue, &options))?;
            write_text(&svg, args.out.as_deref())?;
            Ok(())
        }
        Command::Layout => {
            let map = VenueMap::assemble(&layout, &venue)?;
            let out = LayoutOut {
                name: &map.name,
                rooms: &map.rooms,
                corridors: &map.corridors,
                exhibits: &map.exhibits,
            };
            write_json(&out, args.pretty)?;
            Ok(())
        }
        Command::Route => {
            let (Some(from), Some(to)) = (args.from.as_deref(), args.to.as_deref()) else {
                return Err(CliError::Usage(usage()));
            };
            let map = VenueMap::assemble(&layout, &venue)?;
            let graph = ExhibitGraph::build(&map);
            let route = graph.shortest_path(from, to)?;
            write_json(&route, args.pretty)?;
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();

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

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
