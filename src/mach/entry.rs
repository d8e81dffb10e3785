use super::host::Transcript;
use super::program::split_source;
use super::{Engine, Host, Mode, Program, Registry, Val};

/// Settings for one call to [`run`].
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Name the top-level runtime environment is registered under.
    pub name: String,
    pub mode: Mode,
    /// Log the parsed program and the final variable state.
    pub debug: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            name: "main".to_string(),
            mode: Mode::default(),
            debug: false,
        }
    }
}

/// Parses and runs a program.
///
/// Every write goes to `host` as it happens. The same text, program output
/// and diagnostics alike, is also collected and returned. Errors never
/// escape; they are reported through the host and end the run.
pub fn run<H, I, S>(source: &str, options: &Options, initial: I, host: &mut H) -> String
where
    H: Host + ?Sized,
    I: IntoIterator<Item = (S, Val)>,
    S: AsRef<str>,
{
    let mut transcript = Transcript::new(host);
    let raw = split_source(source);
    if options.debug {
        for (number, command) in raw.iter() {
            tracing::debug!(%number, %command, "command map");
        }
    }
    let program = match Program::build(raw) {
        Ok(program) => program,
        Err(error) => {
            tracing::debug!(%error, "program rejected");
            transcript.diagnostic(&format!("?{}\n", error));
            return transcript.into_text();
        }
    };
    if options.debug {
        for line in program.lines() {
            tracing::debug!(%line, tokens = ?line.tokens(), "token table");
        }
    }

    let mut registry = Registry::new();
    {
        let mut engine = Engine::new(
            &program,
            &mut registry,
            &options.name,
            options.mode,
            &mut transcript,
        );
        let mut seeded = Ok(());
        if let Some(rt) = engine.runtime_mut() {
            for (name, val) in initial {
                seeded = rt.set_variable(name.as_ref(), val);
                if seeded.is_err() {
                    break;
                }
            }
        }
        match seeded {
            Ok(()) => {
                engine.run();
            }
            Err(error) => engine.report(&error),
        }
    }

    if options.debug {
        if let Some(rt) = registry.find(&options.name) {
            tracing::debug!(runtime = %rt.name(), vars = ?rt.var().vars(), "final variables");
            tracing::debug!(runtime = %rt.name(), arrays = ?rt.var().arrays(), "final arrays");
        }
    }
    transcript.into_text()
}
