mod common;
use basic::mach::Buffer;
use common::*;
use pretty_assertions::assert_eq;

#[test]
fn test_input_with_prompt() {
    let mut host = Buffer::with_replies(vec!["Ada"]);
    let s = "10 INPUT \"Name? \"; N\n20 PRINT \"Hi \" + N";
    assert_eq!(exec_host(s, &mut host), "Hi Ada\n");
    assert_eq!(host.prompts(), &["Name? ".to_string()]);
}

#[test]
fn test_input_is_typed_by_shape() {
    let s = "10 INPUT \"n\"; N\n20 PRINT N + 1";
    assert_eq!(exec_with_input(s, &["42"]), "43\n");
    assert_eq!(exec_with_input(s, &["4x"]), "4x1\n");
}

#[test]
fn test_input_compares_as_number() {
    let s = "10 INPUT \"n\"; N\n\
             20 IF N < 10 THEN PRINT \"small\" ELSE PRINT \"big\"\n\
             30 PRINT N + 1";
    assert_eq!(exec_with_input(s, &["5"]), "small\n6\n");
    assert_eq!(exec_with_input(s, &["12"]), "big\n13\n");
}

#[test]
fn test_input_without_prompt() {
    let mut host = Buffer::with_replies(vec!["x"]);
    assert_eq!(exec_host("10 INPUT N\n20 PRINT N", &mut host), "x\n");
    assert_eq!(host.prompts(), &[String::new()]);
}

#[test]
fn test_input_needs_a_variable() {
    assert_eq!(
        exec_with_input("10 INPUT \"p\";", &["x"]),
        "?SYNTAX ERROR IN 10; INPUT NEEDS ; VARIABLE\n"
    );
}
