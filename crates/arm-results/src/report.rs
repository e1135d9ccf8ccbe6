//! Terminal report for a completed run.

use crate::types::ExtractedStates;

/// Print a short summary of the run to stdout.
pub fn print_report(extracted: &ExtractedStates) {
    if extracted.is_empty() {
        println!("No samples to report");
        return;
    }

    let n = extracted.len();
    let t0 = extracted.t[0];
    let t1 = extracted.t[n - 1];

    println!("Run summary:");
    println!("  Samples:      {n}");
    println!("  Time span:    {t0:.3} - {t1:.3} s");
    println!(
        "  Final state:  q = [{:+.4}, {:+.4}] rad, qd = [{:+.4}, {:+.4}] rad/s",
        extracted.q1[n - 1],
        extracted.q2[n - 1],
        extracted.qd1[n - 1],
        extracted.qd2[n - 1]
    );
    println!(
        "  Tracking err: max {:.4e}, final {:.4e}",
        extracted.max_error_norm(0, n),
        extracted.error_norm[n - 1]
    );

    // Coarse decay check across thirds of the run.
    let third = n / 3;
    if third > 0 {
        println!(
            "  Err by third: {:.4e} | {:.4e} | {:.4e}",
            extracted.max_error_norm(0, third),
            extracted.max_error_norm(third, 2 * third),
            extracted.max_error_norm(2 * third, n)
        );
    }
}
