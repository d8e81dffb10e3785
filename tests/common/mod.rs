use basic::mach::{run, Buffer, Options, Val};

pub fn exec(source: &str) -> String {
    exec_host(source, &mut Buffer::new())
}

pub fn exec_with_input(source: &str, replies: &[&str]) -> String {
    exec_host(source, &mut Buffer::with_replies(replies.iter().copied()))
}

pub fn exec_host(source: &str, host: &mut Buffer) -> String {
    let none: Vec<(String, Val)> = vec![];
    run(source, &Options::default(), none, host)
}
