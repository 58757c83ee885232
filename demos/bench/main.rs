//! Timing and accuracy comparison of the curve length strategies.
//!
//! Usage:
//! ```text
//! cargo run --release --example bench
//! cargo run --release --example bench -- 200000      # iteration count
//! RUST_LOG=bezier_length=trace cargo run --example bench -- 1
//! ```

use std::hint::black_box;
use std::time::{Duration, Instant};

use bezier_length::math::{Point3, Vector3};
use bezier_length::operations::query::CompareLengths;
use bezier_length::{CubicCurve, LengthParams, QuadraticCurve};

const DEFAULT_ITERATIONS: u32 = 100_000;

fn main() {
    // Default: WARN for everything, INFO for the library.
    // Override with RUST_LOG.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("bezier_length=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let iterations = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_ITERATIONS);

    let curve = railway_curve();
    let params = LengthParams::default();

    println!("railway segment, {iterations} iterations");
    report("adaptive", iterations, || curve.length_with(&params));
    report("midpoint quadratic", iterations, || curve.quadratic_length());
    report("interpolated", iterations.div_ceil(100), || {
        curve.interpolated_length_with(params.line_tolerance())
    });

    println!();
    println!("degenerate quadratics (closed form vs interpolated)");
    for (name, quadratic) in edge_cases() {
        let cmp = CompareLengths::new(quadratic, params.quadratic_tolerance()).execute();
        let status = if cmp.agrees_within(0.01) { "ok" } else { "MISMATCH" };
        println!(
            "  {name:<24} {:>12.6} {:>12.6}  {status}",
            cmp.closed_form, cmp.interpolated
        );
        if !cmp.agrees_within(0.01) {
            tracing::warn!(name, difference = cmp.difference(), "length mismatch");
        }
    }
}

fn report(name: &str, iterations: u32, mut f: impl FnMut() -> f64) {
    let mut length = 0.0;
    let start = Instant::now();
    for _ in 0..iterations {
        length = black_box(f());
    }
    let elapsed = start.elapsed();
    let per_call = elapsed.checked_div(iterations).unwrap_or(Duration::ZERO);
    println!("  {name:<20} {length:>12.6}  {per_call:>10.2?}/call");
}

fn railway_curve() -> CubicCurve {
    let a = Point3::new(-21298.4, 0.2, 2627.51);
    let d = Point3::new(-21332.3, 0.2, 2629.43);
    CubicCurve::new(
        a,
        a + Vector3::new(-11.3359, 0.0, 0.0),
        d + Vector3::new(11.2637, 0.0, -1.28198),
        d,
    )
}

fn edge_cases() -> Vec<(&'static str, QuadraticCurve)> {
    let o = Point3::origin();
    let x1 = Point3::new(1.0, 0.0, 0.0);
    let x2 = Point3::new(2.0, 0.0, 0.0);
    vec![
        ("point", QuadraticCurve::new(o, o, o)),
        ("out and back", QuadraticCurve::new(o, x1, o)),
        ("control on start", QuadraticCurve::new(o, o, x1)),
        ("control on end", QuadraticCurve::new(o, x1, x1)),
        ("collinear overshoot", QuadraticCurve::new(o, x2, x1)),
        (
            "z-axis only",
            QuadraticCurve::new(o, Point3::new(0.0, 0.0, 1.0), Point3::new(0.0, 0.0, 3.0)),
        ),
    ]
}
