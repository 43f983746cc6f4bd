use crate::experiment::{ExperimentSummary, MetricSummary};

fn percent(metric: Option<MetricSummary>) -> String {
    metric.map_or_else(
        || "undefined".to_owned(),
        |m| format!("{:.3}% (± {:.3})", m.mean, m.std_dev),
    )
}

/// Human-readable summary for one neighbor count.
pub fn render(k: usize, summary: &ExperimentSummary) -> String {
    let noun = if k == 1 { "neighbor" } else { "neighbors" };
    let mut out = format!(
        "Nearest neighbor with the nearest {k} {noun} is on average {} accurate over {} trials.\n",
        percent(summary.accuracy),
        summary.trials
    );

    if k > 1 {
        out.push_str(&format!(
            "The nearest {k} neighbors were unanimous {} of the time.\n",
            percent(summary.unanimity_rate)
        ));
        out.push_str(&format!(
            "When they were unanimous the vote was {} accurate; when they were not, {}.\n",
            percent(summary.accuracy_given_unanimous),
            percent(summary.accuracy_given_not_unanimous)
        ));
    }

    out
}
