use graphwalk_core::{
    ConnectMode, EdgeKey, PlaybackToken, Session, SessionConfig, Tick, Trace, VertexId,
    format_sequence,
};
use serde::Serialize;
use std::io::{Read, Write};
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(graphwalk_core::Error),
    Json(serde_json::Error),
    Script(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Script(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<graphwalk_core::Error> for CliError {
    fn from(value: graphwalk_core::Error) -> Self {
        Self::Core(value)
    }
}

impl From<graphwalk_core::GraphError> for CliError {
    fn from(value: graphwalk_core::GraphError) -> Self {
        Self::Core(value.into())
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
    Traverse,
    Play,
    Matrix,
    Script,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    start: Option<VertexId>,
    interval_ms: Option<u64>,
    pretty: bool,
    log: bool,
    labels: bool,
}

#[derive(Serialize)]
struct TraverseOut<'a> {
    order: &'a [VertexId],
    sequence: String,
    trees: usize,
    trace: &'a Trace,
}

fn usage() -> &'static str {
    "graphwalk-cli\n\
\n\
USAGE:\n\
  graphwalk-cli [traverse] [--start <id>] [--pretty] [--log] [--config <path>] [<path>|-]\n\
  graphwalk-cli play [--start <id>] [--interval-ms <n>] [--config <path>] [<path>|-]\n\
  graphwalk-cli matrix [--labels] [<path>|-]\n\
  graphwalk-cli script [--config <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - traverse/play/matrix read an adjacency matrix: one row per line, entries separated by\n\
    spaces or commas. A symmetric matrix is read as an undirected graph.\n\
  - traverse prints {order, sequence, trees, trace} as JSON; --log prints the step log instead.\n\
  - play prints the step log one line per tick (default interval: 600 ms).\n\
  - script runs one editor command per line; see README for the command list.\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "traverse" => args.command = Command::Traverse,
            "play" => args.command = Command::Play,
            "matrix" => args.command = Command::Matrix,
            "script" => args.command = Command::Script,
            "--pretty" => args.pretty = true,
            "--log" => args.log = true,
            "--labels" => args.labels = true,
            "--config" => args.config = Some(next_value(&mut it)?.clone()),
            "--start" => {
                let id = next_value(&mut it)?;
                args.start = Some(VertexId::from_str(id)?);
            }
            "--interval-ms" => {
                let ms = next_value(&mut it)?;
                args.interval_ms = Some(ms.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
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
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn load_config(args: &Args) -> Result<SessionConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => SessionConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => SessionConfig::default(),
    };
    if let Some(ms) = args.interval_ms {
        config.playback.interval_ms = ms;
    }
    Ok(config)
}

fn session_from_matrix(args: &Args, text: &str) -> Result<Session, CliError> {
    let mut session = Session::new(load_config(args)?);
    session.load_matrix(text)?;
    if let Some(start) = args.start {
        session.set_start_vertex(Some(start))?;
    }
    Ok(session)
}

/// Drains a playback without waiting between steps.
fn drain(session: &mut Session, token: &PlaybackToken, out: &mut impl Write) -> Result<(), CliError> {
    while let Tick::Frame(frame) = session.tick(token) {
        writeln!(out, "{}", frame.log_line)?;
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    tracing::debug!(command = ?args.command, input = ?args.input, "starting");
    let text = read_input(args.input.as_deref())?;

    match args.command {
        Command::Traverse => {
            let mut session = session_from_matrix(&args, &text)?;
            let run = session.run_traversal()?;
            if args.log {
                let mut out = std::io::stdout().lock();
                drain(&mut session, &run.token, &mut out)?;
                writeln!(out, "sequence: {}", run.traversal.sequence_text())?;
                return Ok(());
            }
            session.cancel_playback();
            write_json(
                &TraverseOut {
                    order: &run.traversal.order,
                    sequence: run.traversal.sequence_text(),
                    trees: run.traversal.tree_count(),
                    trace: &run.traversal.trace,
                },
                args.pretty,
            )
        }
        Command::Play => {
            let mut session = session_from_matrix(&args, &text)?;
            let interval = session.config().playback.interval();
            let run = session.run_traversal()?;
            let mut out = std::io::stdout().lock();
            while session.player().is_live(&run.token) {
                let Tick::Frame(frame) = session.tick(&run.token) else {
                    break;
                };
                writeln!(out, "{}", frame.log_line)?;
                out.flush()?;
                // No pause after the final step.
                if let Some((done, total)) = session.player().progress() {
                    if done < total {
                        std::thread::sleep(interval);
                    }
                }
            }
            writeln!(out, "sequence: {}", run.traversal.sequence_text())?;
            Ok(())
        }
        Command::Matrix => {
            let store = graphwalk_core::decode(&text)?;
            let encoded = graphwalk_core::encode(&store);
            let mut out = std::io::stdout().lock();
            if args.labels {
                writeln!(out, "{}", encoded.to_labeled_text())?;
            } else {
                writeln!(out, "{encoded}")?;
            }
            Ok(())
        }
        Command::Script => {
            let mut session = Session::new(load_config(&args)?);
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for (lineno, line) in text.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                match run_script_line(&mut session, line, &mut out) {
                    Ok(()) => {}
                    Err(CliError::Io(err)) => return Err(CliError::Io(err)),
                    Err(err) => {
                        tracing::debug!(line = lineno + 1, %err, "script command failed");
                        out.flush()?;
                        eprintln!("error: {err}");
                    }
                }
            }
            Ok(())
        }
    }
}

fn parse_ids<'a>(words: impl Iterator<Item = &'a str>) -> Result<Vec<VertexId>, CliError> {
    words
        .map(|w| VertexId::from_str(w).map_err(CliError::from))
        .collect()
}

fn script_error(message: impl Into<String>) -> CliError {
    CliError::Script(message.into())
}

/// Executes one editor command against the session.
fn run_script_line(session: &mut Session, line: &str, out: &mut impl Write) -> Result<(), CliError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(());
    };

    match command {
        "add" => {
            let count = match words.next() {
                Some(n) => n
                    .parse::<usize>()
                    .map_err(|_| script_error("usage: add [count]"))?,
                None => 1,
            };
            for _ in 0..count {
                let id = session.add_vertex()?.id();
                writeln!(out, "added {id}")?;
            }
        }
        "select" => {
            let ids = parse_ids(words)?;
            if ids.is_empty() {
                return Err(script_error("usage: select <id>..."));
            }
            for id in ids {
                let selected = session.toggle_vertex_selection(id)?;
                let verb = if selected { "selected" } else { "deselected" };
                writeln!(out, "{verb} {id}")?;
            }
        }
        "select-edge" => {
            let ids = parse_ids(words)?;
            let [a, b] = ids[..] else {
                return Err(script_error("usage: select-edge <id> <id>"));
            };
            let selected = session.toggle_edge_selection(a, b)?;
            let verb = if selected { "selected" } else { "deselected" };
            writeln!(out, "{verb} edge {}", EdgeKey::new(a, b))?;
        }
        "clear-selection" => {
            session.clear_selection();
            writeln!(out, "selection cleared")?;
        }
        "mode" => {
            let mode = match words.next() {
                Some(word) => {
                    let mode = ConnectMode::from_str(word)
                        .map_err(|_| script_error("usage: mode [complete|chain]"))?;
                    session.set_connect_mode(mode);
                    mode
                }
                None => session.toggle_connect_mode(),
            };
            let name = match mode {
                ConnectMode::Complete => "complete",
                ConnectMode::Chain => "chain",
            };
            writeln!(out, "mode: {name}")?;
        }
        "connect" => {
            let added = session.connect_selected()?;
            writeln!(out, "connected: {added} new edge(s)")?;
        }
        "start" => {
            let id = session.set_start_from_selection()?;
            writeln!(out, "start: {id}")?;
        }
        "delete" => {
            let deletion = session.delete_selected()?;
            writeln!(
                out,
                "deleted {} vertex(es) and {} edge(s)",
                deletion.vertices, deletion.edges
            )?;
        }
        "run" => {
            let run = session.run_traversal()?;
            drain(session, &run.token, out)?;
            writeln!(out, "sequence: {}", run.traversal.sequence_text())?;
        }
        "repeat" => {
            let token = session.repeat()?;
            drain(session, &token, out)?;
            if let Some(order) = session.last_order() {
                writeln!(out, "sequence: {}", format_sequence(order))?;
            }
        }
        "load" => {
            let rows: Vec<&str> = words.collect();
            let text = rows.join(" ").replace(';', "\n");
            session.load_matrix(&text)?;
            writeln!(
                out,
                "loaded {} vertex(es) and {} edge(s)",
                session.store().vertex_count(),
                session.store().edge_count()
            )?;
        }
        "matrix" => {
            let encoded = session.matrix();
            if encoded.labels.is_empty() {
                writeln!(out, "(empty)")?;
            } else {
                writeln!(out, "{}", encoded.to_labeled_text())?;
            }
        }
        "clear" => {
            session.clear_all();
            writeln!(out, "cleared")?;
        }
        "colors" => {
            let on = session.toggle_colors();
            writeln!(out, "colors: {}", if on { "on" } else { "off" })?;
        }
        other => return Err(script_error(format!("unknown command `{other}`"))),
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
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
            std::process::exit(2);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
