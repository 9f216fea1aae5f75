//! Assertion macros.
//!
//! Two families share the comparison engine. The `check_*` macros are soft:
//! a failure is reported and the test body keeps going. The `require_*`
//! macros are hard: a failure is reported and the macro returns
//! `Err(Aborted)` from the enclosing test body, so the remaining statements
//! are skipped and the runner moves on to the next test.
//!
//! Every macro takes the test context first, then the operands, then an
//! optional trailing format string with arguments. The trailing arguments
//! are appended to the diagnostic and are only evaluated when the
//! comparison failed:
//!
//! ```
//! use mame_core::{check_eq, require_ne, Harness, NullReporter, TestContext};
//!
//! let mut harness = Harness::with_reporter(NullReporter);
//! harness.add_test("doubling", |t: &TestContext| {
//!     for i in 0..3 {
//!         check_eq!(t, i * 2, i + i, "i = {i}");
//!     }
//!     require_ne!(t, 1, 2);
//!     Ok(())
//! });
//! ```

/// Reports a failed comparison and continues. Shared tail of the `check_*`
/// family.
#[doc(hidden)]
#[macro_export]
macro_rules! __report {
    ($ctx:ident, $diag:ident) => {
        if !$diag.is_pass() {
            $ctx.report(::core::file!(), ::core::line!(), $diag);
        }
    };
    ($ctx:ident, $diag:ident, $($arg:tt)+) => {
        if !$diag.is_pass() {
            $ctx.report(
                ::core::file!(),
                ::core::line!(),
                $diag.append(::core::format_args!($($arg)+)),
            );
        }
    };
}

/// Reports a failed comparison and returns from the enclosing test body.
/// Shared tail of the `require_*` family.
#[doc(hidden)]
#[macro_export]
macro_rules! __report_abort {
    ($ctx:ident, $diag:ident) => {
        if !$diag.is_pass() {
            $ctx.report(::core::file!(), ::core::line!(), $diag);
            return ::core::result::Result::Err($crate::runner::Aborted.into());
        }
    };
    ($ctx:ident, $diag:ident, $($arg:tt)+) => {
        if !$diag.is_pass() {
            $ctx.report(
                ::core::file!(),
                ::core::line!(),
                $diag.append(::core::format_args!($($arg)+)),
            );
            return ::core::result::Result::Err($crate::runner::Aborted.into());
        }
    };
}

/// Builds the diagnostic for a binary comparison, rendering both operands
/// lazily.
#[doc(hidden)]
#[macro_export]
macro_rules! __binary_diag {
    ($ctx:ident, $op:ident, $pass:expr, $left_val:ident, $right_val:ident, $left:expr, $right:expr) => {
        $crate::compare::compare(
            $ctx,
            $pass,
            $crate::compare::Op::$op,
            || $crate::render!($left_val),
            || $crate::render!($right_val),
            ::core::stringify!($left),
            ::core::stringify!($right),
        )
    };
}

/// Soft assertion that an expression is `true`; on failure the test body
/// continues.
#[macro_export]
macro_rules! check_true {
    ($ctx:expr, $cond:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        match &$cond {
            cond_val => {
                let __diag = $crate::compare::compare(
                    __ctx,
                    *cond_val,
                    $crate::compare::Op::IsTrue,
                    || $crate::render!(cond_val),
                    || ::std::string::String::from("true"),
                    ::core::stringify!($cond),
                    "true",
                );
                $crate::__report!(__ctx, __diag $(, $($arg)+)?);
            }
        }
    }};
}

/// Soft assertion that an expression is `false`.
#[macro_export]
macro_rules! check_false {
    ($ctx:expr, $cond:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        match &$cond {
            cond_val => {
                let __diag = $crate::compare::compare(
                    __ctx,
                    !*cond_val,
                    $crate::compare::Op::IsFalse,
                    || $crate::render!(cond_val),
                    || ::std::string::String::from("false"),
                    ::core::stringify!($cond),
                    "false",
                );
                $crate::__report!(__ctx, __diag $(, $($arg)+)?);
            }
        }
    }};
}

/// Soft assertion that two values compare equal with `==`.
///
/// ```
/// # use mame_core::{check_eq, Harness, NullReporter, TestContext};
/// # let mut harness = Harness::with_reporter(NullReporter);
/// # harness.add_test("eq", |t: &TestContext| {
/// check_eq!(t, 4, 2 + 2);
/// check_eq!(t, "ab", format!("a{}", "b"), "concatenation went wrong");
/// # Ok(())
/// # });
/// ```
#[macro_export]
macro_rules! check_eq {
    ($ctx:expr, $left:expr, $right:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        match (&$left, &$right) {
            (left_val, right_val) => {
                let __diag = $crate::__binary_diag!(
                    __ctx, Eq, *left_val == *right_val, left_val, right_val, $left, $right
                );
                $crate::__report!(__ctx, __diag $(, $($arg)+)?);
            }
        }
    }};
}

/// Soft assertion that two values are not equal (the negation of `==`).
#[macro_export]
macro_rules! check_ne {
    ($ctx:expr, $left:expr, $right:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        match (&$left, &$right) {
            (left_val, right_val) => {
                let __diag = $crate::__binary_diag!(
                    __ctx, Ne, !(*left_val == *right_val), left_val, right_val, $left, $right
                );
                $crate::__report!(__ctx, __diag $(, $($arg)+)?);
            }
        }
    }};
}

/// Soft assertion that `left > right`.
#[macro_export]
macro_rules! check_gt {
    ($ctx:expr, $left:expr, $right:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        match (&$left, &$right) {
            (left_val, right_val) => {
                let __diag = $crate::__binary_diag!(
                    __ctx, Gt, *left_val > *right_val, left_val, right_val, $left, $right
                );
                $crate::__report!(__ctx, __diag $(, $($arg)+)?);
            }
        }
    }};
}

/// Soft assertion that `left < right`.
#[macro_export]
macro_rules! check_lt {
    ($ctx:expr, $left:expr, $right:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        match (&$left, &$right) {
            (left_val, right_val) => {
                let __diag = $crate::__binary_diag!(
                    __ctx, Lt, *left_val < *right_val, left_val, right_val, $left, $right
                );
                $crate::__report!(__ctx, __diag $(, $($arg)+)?);
            }
        }
    }};
}

/// Soft assertion that `left >= right`.
#[macro_export]
macro_rules! check_ge {
    ($ctx:expr, $left:expr, $right:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        match (&$left, &$right) {
            (left_val, right_val) => {
                let __diag = $crate::__binary_diag!(
                    __ctx, Ge, *left_val >= *right_val, left_val, right_val, $left, $right
                );
                $crate::__report!(__ctx, __diag $(, $($arg)+)?);
            }
        }
    }};
}

/// Soft assertion that `left <= right`.
#[macro_export]
macro_rules! check_le {
    ($ctx:expr, $left:expr, $right:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        match (&$left, &$right) {
            (left_val, right_val) => {
                let __diag = $crate::__binary_diag!(
                    __ctx, Le, *left_val <= *right_val, left_val, right_val, $left, $right
                );
                $crate::__report!(__ctx, __diag $(, $($arg)+)?);
            }
        }
    }};
}

/// Soft assertion that two floating-point values differ by strictly less
/// than a tolerance. A difference exactly equal to the tolerance fails.
#[macro_export]
macro_rules! check_near {
    ($ctx:expr, $left:expr, $right:expr, $tolerance:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        let __diag = $crate::compare::compare_near(
            __ctx,
            ::core::primitive::f64::from($left),
            ::core::primitive::f64::from($right),
            ::core::primitive::f64::from($tolerance),
            ::core::stringify!($left),
            ::core::stringify!($right),
            ::core::stringify!($tolerance),
        );
        $crate::__report!(__ctx, __diag $(, $($arg)+)?);
    }};
}

/// Hard assertion that an expression is `true`; on failure the test body
/// returns immediately.
#[macro_export]
macro_rules! require_true {
    ($ctx:expr, $cond:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        match &$cond {
            cond_val => {
                let __diag = $crate::compare::compare(
                    __ctx,
                    *cond_val,
                    $crate::compare::Op::IsTrue,
                    || $crate::render!(cond_val),
                    || ::std::string::String::from("true"),
                    ::core::stringify!($cond),
                    "true",
                );
                $crate::__report_abort!(__ctx, __diag $(, $($arg)+)?);
            }
        }
    }};
}

/// Hard assertion that an expression is `false`.
#[macro_export]
macro_rules! require_false {
    ($ctx:expr, $cond:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        match &$cond {
            cond_val => {
                let __diag = $crate::compare::compare(
                    __ctx,
                    !*cond_val,
                    $crate::compare::Op::IsFalse,
                    || $crate::render!(cond_val),
                    || ::std::string::String::from("false"),
                    ::core::stringify!($cond),
                    "false",
                );
                $crate::__report_abort!(__ctx, __diag $(, $($arg)+)?);
            }
        }
    }};
}

/// Hard assertion that two values compare equal with `==`.
#[macro_export]
macro_rules! require_eq {
    ($ctx:expr, $left:expr, $right:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        match (&$left, &$right) {
            (left_val, right_val) => {
                let __diag = $crate::__binary_diag!(
                    __ctx, Eq, *left_val == *right_val, left_val, right_val, $left, $right
                );
                $crate::__report_abort!(__ctx, __diag $(, $($arg)+)?);
            }
        }
    }};
}

/// Hard assertion that two values are not equal (the negation of `==`).
#[macro_export]
macro_rules! require_ne {
    ($ctx:expr, $left:expr, $right:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        match (&$left, &$right) {
            (left_val, right_val) => {
                let __diag = $crate::__binary_diag!(
                    __ctx, Ne, !(*left_val == *right_val), left_val, right_val, $left, $right
                );
                $crate::__report_abort!(__ctx, __diag $(, $($arg)+)?);
            }
        }
    }};
}

/// Hard assertion that `left > right`.
#[macro_export]
macro_rules! require_gt {
    ($ctx:expr, $left:expr, $right:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        match (&$left, &$right) {
            (left_val, right_val) => {
                let __diag = $crate::__binary_diag!(
                    __ctx, Gt, *left_val > *right_val, left_val, right_val, $left, $right
                );
                $crate::__report_abort!(__ctx, __diag $(, $($arg)+)?);
            }
        }
    }};
}

/// Hard assertion that `left < right`.
#[macro_export]
macro_rules! require_lt {
    ($ctx:expr, $left:expr, $right:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        match (&$left, &$right) {
            (left_val, right_val) => {
                let __diag = $crate::__binary_diag!(
                    __ctx, Lt, *left_val < *right_val, left_val, right_val, $left, $right
                );
                $crate::__report_abort!(__ctx, __diag $(, $($arg)+)?);
            }
        }
    }};
}

/// Hard assertion that `left >= right`.
#[macro_export]
macro_rules! require_ge {
    ($ctx:expr, $left:expr, $right:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        match (&$left, &$right) {
            (left_val, right_val) => {
                let __diag = $crate::__binary_diag!(
                    __ctx, Ge, *left_val >= *right_val, left_val, right_val, $left, $right
                );
                $crate::__report_abort!(__ctx, __diag $(, $($arg)+)?);
            }
        }
    }};
}

/// Hard assertion that `left <= right`.
#[macro_export]
macro_rules! require_le {
    ($ctx:expr, $left:expr, $right:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        match (&$left, &$right) {
            (left_val, right_val) => {
                let __diag = $crate::__binary_diag!(
                    __ctx, Le, *left_val <= *right_val, left_val, right_val, $left, $right
                );
                $crate::__report_abort!(__ctx, __diag $(, $($arg)+)?);
            }
        }
    }};
}

/// Hard assertion that two floating-point values differ by strictly less
/// than a tolerance.
#[macro_export]
macro_rules! require_near {
    ($ctx:expr, $left:expr, $right:expr, $tolerance:expr $(, $($arg:tt)+)?) => {{
        let __ctx = $ctx;
        let __diag = $crate::compare::compare_near(
            __ctx,
            ::core::primitive::f64::from($left),
            ::core::primitive::f64::from($right),
            ::core::primitive::f64::from($tolerance),
            ::core::stringify!($left),
            ::core::stringify!($right),
            ::core::stringify!($tolerance),
        );
        $crate::__report_abort!(__ctx, __diag $(, $($arg)+)?);
    }};
}
