// ============================================================================
// Basic Usage Example
// ============================================================================
//
// Run with `--features logging` to see the per-value breakdown as tracing
// events as well.

use qfixed::prelude::*;

fn describe(name: &str, x: Fp32s) {
    println!(
        "{:>10}: {:>12} | raw {:#034b} | q {:>2} | {}+{}/{}",
        name,
        x,
        x.raw_value(),
        x.q(),
        x.integer_part(),
        x.fractional_part(),
        x.fractional_part_divisor()
    );
    tracing::info!(
        name,
        raw = x.raw_value(),
        q = x.q(),
        integer = x.integer_part(),
        fraction = x.fractional_part(),
        divisor = x.fractional_part_divisor(),
        "fixed-point value"
    );
}

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Fixed-Point Example ===\n");

    // Values built from integer/fraction parts, no floating point involved
    let a = Fp32s::from_parts(9, 2935, 10_000, 14);
    let b = Fp32s::from_parts(0, 2935, 10_000, 14);
    let product = a * b;

    describe("a", a);
    describe("b", b);
    describe("a * b", product);
    println!(
        "\nfloat reference: {:.6} vs fixed {:.6}\n",
        a.to_f64() * b.to_f64(),
        product.to_f64()
    );

    // Mixed precision: the result follows the alignment rule
    let coarse = Fp32s::from_integer(2, 4);
    describe("a + 2(Q4)", a + coarse);
    describe("2(Q4) + a", coarse + a);

    // Frequency sweep in 0.01 steps at 7 fractional bits
    println!("\n=== Frequency Sweep (Q7, step 0.01) ===");
    let step = Fp32s::from_parts(0, 1, 100, 7);
    for start in [0, 9_995, 150_995] {
        let mut freq = Fp32s::from_integer(start, 7);
        for _ in 0..3 {
            println!(
                "{:>8}: fixed {}.{:02} float {:.2}",
                start,
                freq.integer_part(),
                freq.fractional_part(),
                freq.to_f32()
            );
            freq += step;
        }
    }

    // Checked arithmetic reports instead of wrapping or panicking
    println!("\n=== Checked Arithmetic ===");
    let zero = Fp32s::from_integer(0, 14);
    match a.checked_div(zero) {
        Ok(q) => println!("a / 0 = {}", q),
        Err(err) => println!("a / 0 failed: {}", err),
    }
    let big = Fp32s::from_integer(100_000, 14);
    match big.checked_mul(big) {
        Ok(p) => println!("big * big = {}", p),
        Err(err) => println!("big * big failed: {}", err),
    }
}
