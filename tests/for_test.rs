mod common;
use common::*;
use pretty_assertions::assert_eq;

#[test]
fn test_for_loop_clears_its_variable() {
    let s = "10 FOR I = 1 TO 3\n20 PRINT I\n30 NEXT I\n40 PRINT I";
    assert_eq!(exec(s), "1\n2\n3\n?VARIABLE NOT DECLARED IN 40; I\n");
}

#[test]
fn test_for_loop_step() {
    let s = "10 FOR I = 0 TO 6 STEP 2\n20 PRINT I\n30 NEXT I";
    assert_eq!(exec(s), "0\n2\n4\n6\n");
}

#[test]
fn test_for_loop_negative_step() {
    let s = "10 FOR I = 3 TO 1 STEP -1\n20 PRINT I\n30 NEXT I";
    assert_eq!(exec(s), "3\n2\n1\n");
}

#[test]
fn test_for_loop_always_runs_once() {
    assert_eq!(exec("10 FOR I = 3 TO 0\n20 PRINT I\n30 NEXT I"), "3\n");
}

#[test]
fn test_for_loop_assign_step_after_var() {
    let s = "10 LET I = 1\n20 FOR I = 3 TO 9 STEP I\n30 PRINT I\n40 NEXT I";
    assert_eq!(exec(s), "3\n6\n9\n");
}

#[test]
fn test_nested_loops() {
    let s = "10 FOR I = 1 TO 2\n\
             20 FOR J = 1 TO 2\n\
             30 PRINT I + \",\" + J\n\
             40 NEXT J\n\
             50 NEXT I";
    assert_eq!(exec(s), "1,1\n1,2\n2,1\n2,2\n");
}

#[test]
fn test_bare_next_uses_innermost_loop() {
    assert_eq!(exec("10 FOR I = 1 TO 2\n20 PRINT I\n30 NEXT"), "1\n2\n");
}

#[test]
fn test_next_mismatch() {
    assert_eq!(
        exec("10 FOR I = 1 TO 2\n20 NEXT J"),
        "?FOR LOOP MISMATCH IN 20; NEXT J INSIDE FOR I\n"
    );
    assert_eq!(
        exec("10 NEXT"),
        "?FOR LOOP MISMATCH IN 10; NEXT WITHOUT FOR\n"
    );
}

#[test]
fn test_for_needs_numbers() {
    assert_eq!(
        exec("10 FOR I = 1 TO \"x\""),
        "?TYPE ERROR IN 10; FOR GOAL IS NOT A NUMBER: x\n"
    );
    assert_eq!(exec("10 FOR I = 1 2"), "?SYNTAX ERROR IN 10; FOR WITHOUT TO\n");
}
