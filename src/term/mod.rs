extern crate ansi_term;
extern crate linefeed;
use ansi_term::Style;
use basic::mach::{run, Host, Mode, Options, Val};
use clap::Parser;
use linefeed::{DefaultTerminal, Interface, ReadResult};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "basic", version, about = "Run a line-numbered BASIC program")]
struct Args {
    /// Program file. Read from stdin when omitted.
    file: Option<PathBuf>,

    /// Name of the top-level function set.
    #[arg(long, default_value = "main")]
    name: String,

    /// Error reporting: dev adds the offending line and the stacks.
    #[arg(long, default_value = "pro")]
    mode: Mode,

    /// Log the parsed program and the final variables.
    #[arg(long)]
    debug: bool,

    /// Variable set before the program starts.
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    vars: Vec<(String, String)>,
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}

pub fn main() {
    let args = Args::parse();
    install_tracing(args.debug);
    let source = match read_source(args.file.as_ref()) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("{}", Style::new().bold().paint(error.to_string()));
            std::process::exit(1);
        }
    };
    let options = Options {
        name: args.name,
        mode: args.mode,
        debug: args.debug,
    };
    let initial = args
        .vars
        .into_iter()
        .map(|(name, value)| (name, Val::infer(&value)));
    let mut console = Console::default();
    run(&source, &options, initial, &mut console);
}

fn install_tracing(debug: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if debug {
        if let Ok(directive) = "basic=debug".parse() {
            filter = filter.add_directive(directive);
        }
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_source(file: Option<&PathBuf>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

/// Host for a terminal session. The line editor is only opened the first
/// time the program asks for input.
#[derive(Default)]
struct Console {
    editor: Option<Interface<DefaultTerminal>>,
}

impl Console {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        if self.editor.is_none() {
            self.editor = Some(Interface::new("BASIC")?);
        }
        match &self.editor {
            Some(editor) => {
                editor.set_prompt(prompt)?;
                match editor.read_line()? {
                    ReadResult::Input(string) => {
                        editor.add_history_unique(string.clone());
                        Ok(string)
                    }
                    ReadResult::Signal(_) | ReadResult::Eof => Ok(String::new()),
                }
            }
            None => Ok(String::new()),
        }
    }
}

impl Host for Console {
    fn write(&mut self, text: &str) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Err(error) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            tracing::warn!(%error, "stdout write failed");
        }
    }

    fn diagnostic(&mut self, text: &str) {
        let styled = Style::new().bold().paint(text).to_string();
        self.write(&styled);
    }

    fn request_input(&mut self, prompt: &str) -> String {
        match self.read_line(prompt) {
            Ok(string) => string,
            Err(error) => {
                // No terminal, e.g. the program itself came in on a pipe.
                tracing::debug!(%error, "line editor unavailable");
                self.write(prompt);
                let mut line = String::new();
                if io::stdin().lock().read_line(&mut line).is_err() {
                    return String::new();
                }
                line.trim_end_matches(&['\r', '\n'][..]).to_string()
            }
        }
    }

    fn delay(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            std::thread::sleep(Duration::from_secs_f64(seconds));
        }
    }

    fn load_module(&mut self, path: &str) -> Result<Val, String> {
        let text = if path.starts_with("http://") || path.starts_with("https://") {
            reqwest::blocking::get(path)
                .and_then(|response| response.error_for_status())
                .and_then(|response| response.text())
                .map_err(|e| e.to_string())?
        } else {
            fs::read_to_string(path).map_err(|e| e.to_string())?
        };
        tracing::info!(%path, bytes = text.len(), "module imported");
        Ok(Val::Text(text))
    }
}
