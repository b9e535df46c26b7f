//! Terminal output helpers for the CLI.

use crate::{analysis::TraceStats, pipeline::MatchReport};

/// Print a finished match report.
pub fn print_report(report: &MatchReport) {
    println!("Match vs {} ({} rounds)", report.opponent, report.rounds);
    println!(
        "  score           {:>8} : {:<8}",
        report.engine_score, report.opponent_score
    );
    println!(
        "  cooperation     {:>7.1}% : {:<7.1}%",
        report.engine_coop_rate * 100.0,
        report.opponent_coop_rate * 100.0
    );
    println!(
        "  mutual coop     {:>7.1}%",
        report.mutual_cooperation_rate * 100.0
    );
    println!("  exploits drawn  {:>8}", report.exploit_defections);
}

/// Print the trace-derived statistics below a report.
pub fn print_stats(stats: &TraceStats) {
    println!(
        "  points/round    {:>8.3}   bias p-value {:.4}",
        stats.points_per_round, stats.opponent_bias_p_value
    );
    println!(
        "  longest opponent defection streak: {}",
        stats.longest_opponent_defection_streak
    );
    let mut residence: Vec<_> = stats.tag_residence.iter().collect();
    residence.sort_by(|a, b| b.1.cmp(a.1));
    let line: Vec<String> = residence
        .iter()
        .map(|(tag, rounds)| format!("{tag}:{rounds}"))
        .collect();
    println!("  tag residence   {}", line.join(" "));
}

/// Print one line of the gauntlet summary table.
pub fn print_gauntlet_row(report: &MatchReport) {
    println!(
        "{:<22} {:>8} : {:<8} coop {:>5.1}% vs {:>5.1}%",
        report.opponent,
        report.engine_score,
        report.opponent_score,
        report.engine_coop_rate * 100.0,
        report.opponent_coop_rate * 100.0
    );
}
