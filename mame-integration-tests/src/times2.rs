//! The example registry: two healthy tests and one that always fails, so
//! the scenario matrix in `main` can observe both colors of a run.

use mame::{check_eq, check_ne, check_true, require_eq, require_ne, TestContext, TestResult};

/// Function under test.
fn times2(x: i32) -> i32 {
    x * 2
}

#[mame::test]
fn times2_works(t: &TestContext) -> TestResult {
    check_eq!(t, 4, times2(2));
    require_eq!(t, 6, times2(3));
    for i in 0..3 {
        require_eq!(t, i * 2, times2(i), " i = {i}");
    }
    Ok(())
}

#[mame::test]
fn times2_wrong(t: &TestContext) -> TestResult {
    require_ne!(t, 7, times2(3));
    check_ne!(t, 5, times2(2));
    for i in 1..3 {
        require_ne!(t, 0, times2(i), " i = {i}");
    }
    Ok(())
}

#[mame::test]
fn always_fails(t: &TestContext) -> TestResult {
    check_true!(t, false);
    Ok(())
}
