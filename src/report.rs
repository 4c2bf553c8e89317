use std::collections::HashMap;
use std::fmt::Write;

use crate::models::{AtRiskReport, RiskLevel, RiskLevelSummary, RiskResult};

pub fn summarize_by_level(results: &[RiskResult]) -> Vec<RiskLevelSummary> {
    let mut map: HashMap<RiskLevel, (usize, u32)> = HashMap::new();

    for result in results {
        let entry = map.entry(result.risk_level).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += result.risk_score;
    }

    let mut summaries: Vec<RiskLevelSummary> = map
        .into_iter()
        .map(|(level, (count, total_score))| RiskLevelSummary {
            level,
            count,
            avg_score: if count == 0 {
                0.0
            } else {
                f64::from(total_score) / count as f64
            },
        })
        .collect();

    summaries.sort_by(|a, b| b.level.cmp(&a.level));
    summaries
}

/// Recommendation texts with how many learners received each, most common first.
pub fn recommendation_counts(results: &[RiskResult]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for rec in results.iter().flat_map(|r| r.recommendations.iter()) {
        match counts.iter_mut().find(|(text, _)| text == rec) {
            Some((_, count)) => *count += 1,
            None => counts.push((rec.clone(), 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn build_report(report: &AtRiskReport, limit: usize) -> String {
    let summaries = summarize_by_level(&report.learners);
    let recs = recommendation_counts(&report.learners);

    let mut output = String::new();

    let _ = writeln!(output, "# At-Risk Learner Report");
    let _ = writeln!(
        output,
        "Generated for course {} (evaluated {})",
        report.course_id,
        report.evaluated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Risk Mix");

    if summaries.is_empty() {
        let _ = writeln!(output, "No learners evaluated.");
    } else {
        for summary in summaries.iter() {
            let _ = writeln!(
                output,
                "- {}: {} learners (avg score {:.1})",
                summary.level, summary.count, summary.avg_score
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Highest Risk Learners");

    if report.learners.is_empty() {
        let _ = writeln!(output, "No learners evaluated.");
    } else {
        for result in report.learners.iter().take(limit) {
            let _ = writeln!(
                output,
                "- {} score {} ({}): {}",
                result.user_id,
                result.risk_score,
                result.risk_level,
                result.recommendations.join("; ")
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommended Interventions");

    if recs.is_empty() {
        let _ = writeln!(output, "No learners evaluated.");
    } else {
        for (text, count) in recs.iter() {
            let _ = writeln!(output, "- {text} ({count} learners)");
        }
    }

    output
}
