//! Query command - weighted share and metric for one filter selection.

use colored::Colorize;
use panorama::{BreakdownDimension, Evaluation, Measure, PanoramaError, Query, ResultStatus};

use super::{load_dashboard, parse_filters};
use crate::cli::DataArgs;

pub fn run(
    data: DataArgs,
    filters: Vec<String>,
    metric: Option<String>,
    breakdown: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = load_dashboard(&data)?;

    let metric = match metric {
        Some(id) => id,
        None => dashboard
            .catalog()
            .metrics()
            .into_iter()
            .next()
            .map(|m| m.id)
            .ok_or_else(|| PanoramaError::UnknownMetric("no metric column in dataset".to_string()))?,
    };

    let mut query = Query::new(metric).with_filters(parse_filters(&filters)?);
    if let Some(breakdown) = breakdown {
        query = query.with_breakdown(breakdown.parse::<BreakdownDimension>()?);
    }

    let evaluation = dashboard.evaluate(&query)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        print_evaluation(&query, &evaluation);
    }

    Ok(())
}

fn print_evaluation(query: &Query, evaluation: &Evaluation) {
    println!("{}", "Selection:".yellow().bold());
    if query.filters.is_unrestricted() {
        println!("  {}", "all respondents".dimmed());
    }
    for filter in query.filters.active() {
        let values: Vec<String> = filter
            .selection
            .values()
            .map(|set| set.iter().map(ToString::to_string).collect())
            .unwrap_or_default();
        println!("  {} = {}", filter.dimension.to_string().white(), values.join(", "));
    }
    println!();

    if evaluation.status == ResultStatus::Empty {
        println!("{}", "No respondents match the selected filters.".red().bold());
        return;
    }

    println!(
        "Respondents: {} ({} of weighted population)",
        evaluation.respondents.to_string().white().bold(),
        percent(evaluation.share).cyan().bold()
    );
    println!(
        "{}: {}",
        evaluation.metric.display,
        format!("{:.2}", evaluation.metric.value).cyan().bold()
    );

    if let Some(breakdown) = &evaluation.breakdown {
        println!();
        println!("{} {}", "Breakdown by".yellow().bold(), breakdown.dimension.to_string().white());
        for group in &breakdown.groups {
            let name = match &group.label {
                Some(label) => format!("{} = {}", label, group.value),
                None => group.value.to_string(),
            };
            let bar_width = 30;
            let filled = group
                .share
                .value()
                .map(|s| ((s / 100.0) * bar_width as f64).round() as usize)
                .unwrap_or(0)
                .min(bar_width);
            let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);
            println!(
                "  {:<28} {} {:>8} | {} {}",
                name,
                bar.cyan(),
                percent(group.share),
                evaluation.metric.display,
                format!("{:.2}", group.metric)
            );
        }
    }
}

fn percent(share: Measure) -> String {
    match share {
        Measure::Available(v) => format!("{:.2}%", v),
        Measure::Unavailable => "n/a".to_string(),
    }
}
