//! Terminal rendering of a finished report.

use std::fmt::Write;

use colored::Colorize;

use crate::Report;

const WIDTH: usize = 100;

fn signed_pct(v: f64) -> String {
    if v >= 0.0 {
        format!("+{v:.1}%")
    } else {
        format!("{v:.1}%")
    }
}

fn banner(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", "═".repeat(WIDTH).cyan());
    let _ = writeln!(out, "{}", format!("  {title}").cyan());
    let _ = writeln!(out, "{}\n", "═".repeat(WIDTH).cyan());
}

/// Render the strategy table, trader table, totals and best strategy.
/// `strategy_rows` caps the strategy table only.
pub fn render(report: &Report<'_>, strategy_rows: usize) -> String {
    let mut out = String::new();

    banner(&mut out, "TOP STRATEGIES BY BEST ROI");
    let _ = writeln!(
        out,
        "{}",
        "  #  | Strategy      | Best ROI  | Best Win% | Best P&L   | Avg ROI   | Profitable | Files"
            .bold()
    );
    let _ = writeln!(out, "{}", "─".repeat(WIDTH).bright_black());

    for (i, s) in report.strategies.iter().take(strategy_rows).enumerate() {
        let roi = signed_pct(s.best_roi);
        let roi = if s.best_roi >= 0.0 { roi.green() } else { roi.red() };
        let pnl_sign = if s.best_pnl >= 0.0 { "+" } else { "" };
        let _ = writeln!(
            out,
            "  {:<2} | {} | {:>9} | {:>9} | {:>10} | {:>8.1}% | {:>10} | {}",
            (i + 1).to_string().yellow(),
            format!("{:13}", s.strategy_id).blue(),
            roi,
            format!("{:.1}%", s.best_win_rate).yellow(),
            format!("{pnl_sign}${:.0}", s.best_pnl),
            s.avg_roi,
            format!("{}/{}", s.profitable_traders, s.traders_analyzed),
            s.files_count,
        );
    }

    banner(&mut out, "TOP TRADERS");
    let _ = writeln!(
        out,
        "{}",
        "  #  | Address                                    | Best ROI  | Best Strategy | Seen".bold()
    );
    let _ = writeln!(out, "{}", "─".repeat(WIDTH).bright_black());

    for (i, (address, t)) in report.top_traders.iter().enumerate() {
        let roi = signed_pct(t.best_roi);
        let roi = if t.best_roi >= 0.0 { roi.green() } else { roi.red() };
        let _ = writeln!(
            out,
            "  {:<2} | {} | {:>9} | {} | {}",
            (i + 1).to_string().yellow(),
            format!("{address:42}").blue(),
            roi,
            format!("{:13}", t.best_strategy.id()).cyan(),
            t.times_found,
        );
    }

    let s = &report.summary;
    banner(&mut out, "OVERALL");
    let _ = writeln!(out, "  Files:              {}", s.total_files.to_string().cyan());
    let _ = writeln!(out, "  Strategies:         {}", s.total_strategies.to_string().cyan());
    let _ = writeln!(out, "  Traders analyzed:   {}", s.total_traders.to_string().cyan());
    let _ = writeln!(out, "  Unique traders:     {}", s.unique_traders.to_string().cyan());
    let _ = writeln!(
        out,
        "  Profitable traders: {} ({:.1}%)",
        s.total_profitable.to_string().green(),
        s.profitable_rate
    );

    if let Some(best) = report.best_strategy() {
        let _ = writeln!(out, "\n{}", "BEST STRATEGY:".green());
        let _ = writeln!(out, "  ID:       {}", best.strategy_id.yellow());
        let _ = writeln!(out, "  ROI:      {}", format!("{:+.2}%", best.best_roi).green());
        let _ = writeln!(out, "  Win rate: {}", format!("{:.1}%", best.best_win_rate).yellow());
        let _ = writeln!(out, "  P&L:      {}", format!("{:+.2}", best.best_pnl).green());
    }

    out
}
