use super::Val;
use std::collections::VecDeque;

/// Everything a running program needs from the outside world.
///
/// Only `write` and `request_input` have to be provided. The clock reads
/// the wall clock, delays return immediately, and modules cannot be loaded
/// unless the host says otherwise.
pub trait Host {
    fn write(&mut self, text: &str);

    fn request_input(&mut self, prompt: &str) -> String;

    /// Error reports. Hosts that style diagnostics override this.
    fn diagnostic(&mut self, text: &str) {
        self.write(text)
    }

    fn now_millis(&mut self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn delay(&mut self, _seconds: f64) {}

    fn load_module(&mut self, path: &str) -> Result<Val, String> {
        Err(format!("NO MODULE LOADER FOR {}", path))
    }

    fn export(&mut self, name: &str, value: &Val) {
        self.write(&format!("exp:{}:{}\n", name, value))
    }
}

/// In-memory host. Output accumulates in a string and INPUT is answered
/// from a queue of replies, an empty string once the queue runs dry.
#[derive(Debug, Default)]
pub struct Buffer {
    output: String,
    replies: VecDeque<String>,
    prompts: Vec<String>,
    delays: Vec<f64>,
    clock: Option<i64>,
}

impl Buffer {
    pub fn new() -> Buffer {
        Buffer::default()
    }

    pub fn with_replies<I, S>(replies: I) -> Buffer
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Buffer {
            replies: replies.into_iter().map(Into::into).collect(),
            ..Buffer::default()
        }
    }

    pub fn pin_clock(&mut self, millis: i64) {
        self.clock = Some(millis);
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn delays(&self) -> &[f64] {
        &self.delays
    }
}

impl Host for Buffer {
    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn request_input(&mut self, prompt: &str) -> String {
        self.prompts.push(prompt.to_string());
        self.replies.pop_front().unwrap_or_default()
    }

    fn now_millis(&mut self) -> i64 {
        match self.clock {
            Some(millis) => millis,
            None => chrono::Utc::now().timestamp_millis(),
        }
    }

    fn delay(&mut self, seconds: f64) {
        self.delays.push(seconds);
    }
}

/// Forwards to another host while keeping a copy of everything written.
pub(crate) struct Transcript<'a, H: Host + ?Sized> {
    host: &'a mut H,
    text: String,
}

impl<'a, H: Host + ?Sized> Transcript<'a, H> {
    pub fn new(host: &'a mut H) -> Transcript<'a, H> {
        Transcript {
            host,
            text: String::new(),
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl<'a, H: Host + ?Sized> Host for Transcript<'a, H> {
    fn write(&mut self, text: &str) {
        self.text.push_str(text);
        self.host.write(text);
    }

    fn request_input(&mut self, prompt: &str) -> String {
        self.host.request_input(prompt)
    }

    fn diagnostic(&mut self, text: &str) {
        self.text.push_str(text);
        self.host.diagnostic(text);
    }

    fn now_millis(&mut self) -> i64 {
        self.host.now_millis()
    }

    fn delay(&mut self, seconds: f64) {
        self.host.delay(seconds)
    }

    fn load_module(&mut self, path: &str) -> Result<Val, String> {
        self.host.load_module(path)
    }

    fn export(&mut self, name: &str, value: &Val) {
        self.text.push_str(&format!("exp:{}:{}\n", name, value));
        self.host.export(name, value)
    }
}
