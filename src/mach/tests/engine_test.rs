use super::*;
use crate::lang::{lex, ErrorCode};
use crate::mach::{Runtime, Val, MAX_LOOP_COUNT};
use pretty_assertions::assert_eq;

#[test]
fn test_conditional_body_shares_the_runtime() {
    let mut registry = Registry::new();
    run("10 IF 1 < 2 THEN LET A = 5", &mut registry);
    assert_eq!(registry.len(), 1);
    let rt = registry.find("main").unwrap();
    assert_eq!(rt.get_variable("A").unwrap(), Val::Number(5.0));
}

#[test]
fn test_cell_written_in_conditional_body() {
    let mut registry = Registry::new();
    run("10 ARRAY M, 2\n20 IF 1 < 2 THEN M[1][2] = \"7\"", &mut registry);
    let rt = registry.find("main").unwrap();
    assert_eq!(rt.get_array("M").unwrap().dimension(), 2);
    assert_eq!(
        rt.array_cell("M", &[Val::Number(1.0), Val::Number(2.0)]).unwrap(),
        Val::Number(7.0)
    );
}

#[test]
fn test_runaway_loop_stops_after_ceiling() {
    let mut registry = Registry::new();
    let (flow, output) = run_with(
        "10 LET C = 0\n\
         20 FOR I = 1 TO 2 STEP 0\n\
         30 LET C = C + 1\n\
         40 NEXT I",
        &mut registry,
        Mode::Pro,
    );
    assert_eq!(flow, Flow::Halt);
    assert_eq!(output, "?RUNAWAY LOOP IN 40; I PASSED 100000 ITERATIONS\n");
    let rt = registry.find("main").unwrap();
    assert_eq!(
        rt.get_variable("C").unwrap(),
        Val::Number((MAX_LOOP_COUNT + 1) as f64)
    );
}

#[test]
fn test_next_inside_conditional_resumes_top_level() {
    let mut registry = Registry::new();
    let output = run(
        "10 FOR I = 1 TO 3\n\
         20 PRINT I\n\
         30 IF I < 3 THEN NEXT I\n\
         40 PRINT \"done\"",
        &mut registry,
    );
    assert_eq!(output, "1\n2\n3\ndone\n");
    assert_eq!(registry.find("main").unwrap().loops().len(), 1);
}

#[test]
fn test_gosub_inside_conditional_returns_after_if_line() {
    let mut registry = Registry::new();
    let output = run(
        "10 IF 1 == 1 THEN GOSUB 100\n\
         20 PRINT \"back\"\n\
         30 END\n\
         100 PRINT \"sub\"\n\
         110 RETURN",
        &mut registry,
    );
    assert_eq!(output, "sub\nback\n");
    assert!(registry.find("main").unwrap().calls().is_empty());
}

#[test]
fn test_child_bubbles_jumps() {
    let mut registry = Registry::new();
    registry.register(Runtime::new("main"));
    let mut host = Buffer::new();

    let program = Program::synthetic(5, lex(5, "GOSUB 40").unwrap());
    let mut child =
        Engine::attach(&program, &mut registry, "main", Mode::Pro, &mut host, 3).unwrap();
    assert!(child.is_child());
    assert_eq!(child.execute().unwrap(), Flow::JumpTo(40));
    assert_eq!(child.runtime().unwrap().calls().last(), Some(&3));

    let program = Program::synthetic(5, lex(5, "RETURN").unwrap());
    let mut child =
        Engine::attach(&program, &mut registry, "main", Mode::Pro, &mut host, 9).unwrap();
    assert_eq!(child.execute().unwrap(), Flow::Resume(3));

    let program = Program::synthetic(5, lex(5, "END").unwrap());
    let mut child =
        Engine::attach(&program, &mut registry, "main", Mode::Pro, &mut host, 9).unwrap();
    assert_eq!(child.execute().unwrap(), Flow::Halt);
}

#[test]
fn test_attach_needs_a_registered_runtime() {
    let mut registry = Registry::new();
    let mut host = Buffer::new();
    let program = Program::synthetic(5, vec![]);
    let error = Engine::attach(&program, &mut registry, "nobody", Mode::Pro, &mut host, 0)
        .err()
        .unwrap();
    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[test]
fn test_execute_tags_errors_with_line() {
    let mut registry = Registry::new();
    let mut host = Buffer::new();
    let program = Program::parse("10 PRINT 1\n20 GOTO 99").unwrap();
    let error = Engine::new(&program, &mut registry, "main", Mode::Pro, &mut host)
        .execute()
        .unwrap_err();
    assert_eq!(error.code(), ErrorCode::UndefinedLine);
    assert_eq!(error.to_string(), "UNDEFINED LINE IN 20; 99");
    assert_eq!(host.output(), "1\n");
}

#[test]
fn test_dev_mode_lists_line_and_stacks() {
    let mut registry = Registry::new();
    let (_, output) = run_with(
        "10 FOR I = 1 TO 3\n\
         20 GOSUB 100\n\
         30 NEXT I\n\
         100 PRINT 1 / 0",
        &mut registry,
        Mode::Dev,
    );
    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("?ARITHMETIC ERROR IN 100; DIVISION BY ZERO"));
    assert!(lines.next().unwrap().starts_with("  AT 100 PRINT"));
    assert!(output.contains("LOOP STACK"));
    assert!(output.contains("CALL STACK"));
}

#[test]
fn test_pro_mode_is_one_line() {
    let mut registry = Registry::new();
    let output = run("10 PRINT 1 / 0", &mut registry);
    assert_eq!(output, "?ARITHMETIC ERROR IN 10; DIVISION BY ZERO\n");
}
