use crate::mach::{Buffer, Engine, Flow, Mode, Program, Registry};

mod engine_test;

fn run_with(source: &str, registry: &mut Registry, mode: Mode) -> (Flow, String) {
    let program = Program::parse(source).unwrap();
    let mut host = Buffer::new();
    let flow = Engine::new(&program, registry, "main", mode, &mut host).run();
    (flow, host.output().to_string())
}

fn run(source: &str, registry: &mut Registry) -> String {
    run_with(source, registry, Mode::Pro).1
}
