mod common;
use common::*;
use pretty_assertions::assert_eq;

#[test]
fn test_one_dimension() {
    assert_eq!(exec("10 ARRAY A\n20 A[1] = 5\n30 PRINT A[1]"), "5\n");
}

#[test]
fn test_two_dimensions() {
    let s = "10 ARRAY M, 2\n20 LET M[1][2] = \"x\"\n30 PRINT M[1][2] + M[1][2]";
    assert_eq!(exec(s), "xx\n");
}

#[test]
fn test_index_expressions() {
    let s = "10 ARRAY A\n20 LET I = 2\n30 A[I + 1] = 7\n40 PRINT A[3] * 2";
    assert_eq!(exec(s), "14\n");
}

#[test]
fn test_loop_fills_array() {
    let s = "10 ARRAY SQ\n\
             20 FOR I = 1 TO 3\n\
             30 SQ[I] = I * I\n\
             40 NEXT I\n\
             50 PRINT SQ[1] + SQ[2] + SQ[3]";
    assert_eq!(exec(s), "14\n");
}

#[test]
fn test_arity() {
    assert_eq!(
        exec("10 ARRAY A, 1\n20 A[1][2] = 3"),
        "?ARRAY ARITY ERROR IN 20; TOO MANY INDICES\n"
    );
    assert_eq!(
        exec("10 ARRAY M, 2\n20 PRINT M[1]"),
        "?ARRAY ARITY ERROR IN 20; TOO FEW INDICES\n"
    );
    assert_eq!(
        exec("10 ARRAY M\n20 PRINT M"),
        "?ARRAY ARITY ERROR IN 20; TOO FEW INDICES\n"
    );
}

#[test]
fn test_undeclared_and_unset() {
    assert_eq!(exec("10 A[1] = 2"), "?ARRAY NOT DECLARED IN 10; A\n");
    assert_eq!(
        exec("10 ARRAY A\n20 PRINT A[4]"),
        "?VARIABLE NOT DECLARED IN 20; A[4]\n"
    );
}

#[test]
fn test_redeclare_replaces() {
    let s = "10 ARRAY A\n20 A[1] = 1\n30 ARRAY A\n40 PRINT A[1]";
    assert_eq!(exec(s), "?VARIABLE NOT DECLARED IN 40; A[1]\n");
}

#[test]
fn test_array_syntax() {
    assert_eq!(
        exec("10 ARRAY A, 0"),
        "?ARRAY SYNTAX ERROR IN 10; INVALID DIMENSION 0\n"
    );
    assert_eq!(
        exec("10 ARRAY A\n20 A[1 = 2"),
        "?ARRAY SYNTAX ERROR IN 20; MISSING ]\n"
    );
    assert_eq!(
        exec("10 ARRAY A\n20 A[1] 2"),
        "?LET ERROR IN 20; A[] IS NOT FOLLOWED BY =\n"
    );
}
