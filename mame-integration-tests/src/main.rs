//! End-to-end exercise of the harness.
//!
//! Registers a handful of test cases through `#[mame::test]` and drives the
//! runner through the full argument matrix, checking the `(ran, failed)`
//! contract of every invocation. Exits non-zero on the first contract
//! violation.

mod times2;

use eyre::ensure;

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let harness = mame::harness();

    // Registered: times2_works, times2_wrong and always_fails, plus the
    // built-in self test. A full run always reports the failing test.
    let failed = harness.run_simple::<_, &str>([]);
    ensure!(failed == 1, "expected exactly one failure, got {failed}");

    // Tokens that are not --filter= directives are ignored.
    for args in [["p1", "p2"], ["abc", "--filter"]] {
        let (ran, failed) = harness.run(args);
        ensure!(
            (ran, failed) == (4, 1),
            "tokens {args:?} must not filter, got ({ran}, {failed})"
        );
    }

    // Excluding the failing test makes the run green.
    for args in [["--filter=-always_fails"], ["--filter=-fails"]] {
        let (ran, failed) = harness.run(args);
        ensure!(
            (ran, failed) == (3, 0),
            "exclusion {args:?} mismatch, got ({ran}, {failed})"
        );
    }

    // Inclusion by substring: self test plus the single matching test.
    for args in [["--filter=wrong"], ["--filter=rong"]] {
        let (ran, failed) = harness.run(args);
        ensure!(
            (ran, failed) == (2, 0),
            "inclusion {args:?} mismatch, got ({ran}, {failed})"
        );
    }

    // Inclusion matching nothing still runs the self test.
    let (ran, failed) = harness.run(["--filter=nosuchtest"]);
    ensure!(
        (ran, failed) == (1, 0),
        "empty selection mismatch, got ({ran}, {failed})"
    );

    // An explicitly empty filter is benign.
    let (ran, failed) = harness.run(["--filter="]);
    ensure!(
        (ran, failed) == (1, 0),
        "empty filter must be a no-op, got ({ran}, {failed})"
    );

    // Two filters are a configuration error, whatever their signs.
    for args in [["--filter=abc", "--filter=def"], ["--filter=abc", "--filter=-def"]] {
        let (ran, failed) = harness.run(args);
        ensure!(
            (ran, failed) == (-1, 1),
            "double filter {args:?} must be rejected, got ({ran}, {failed})"
        );
    }

    // An empty exclusion is a configuration error with its own code.
    let (ran, failed) = harness.run(["--filter=-"]);
    ensure!(
        (ran, failed) == (-1, 2),
        "empty exclusion must be rejected, got ({ran}, {failed})"
    );

    // Identical invocations produce identical counts.
    let first = harness.run::<_, &str>([]);
    let second = harness.run::<_, &str>([]);
    ensure!(
        first == second,
        "re-running must be idempotent, got {first:?} then {second:?}"
    );

    println!("all scenarios passed");
    Ok(())
}
