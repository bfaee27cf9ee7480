//! Output formatting for the comparison report

use crate::{
    experiment::ExperimentReport,
    pipeline::{MetricsSummary, Milestones},
};

/// Placeholder printed for a milestone that was never reached
pub const UNSET_MILESTONE: &str = "None";

/// Header line naming the lock dimensions
pub fn report_header(alphabet_size: usize, sequence_length: usize) -> String {
    format!("Final Proof Simulation: Alphabet S={alphabet_size}, Sequence k={sequence_length}")
}

/// Episode index, or the placeholder when unset
pub fn format_milestone(episode: Option<usize>) -> String {
    episode.map_or_else(|| UNSET_MILESTONE.to_string(), |e| e.to_string())
}

/// One table row: padded name followed by both milestones
pub fn format_report_line(name: &str, milestones: &Milestones) -> String {
    format!(
        "{:20} -> Signal: {:8} | Mastery: {:8}",
        name,
        format_milestone(milestones.eps_to_first_signal),
        format_milestone(milestones.eps_to_mastery)
    )
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print episode statistics for one experiment, plus per-phase metrics when
/// they were recorded
pub fn print_training_details(report: &ExperimentReport, metrics: Option<&MetricsSummary>) {
    let training = &report.training;
    print_subsection(&report.name);
    print_kv("Regimen", report.kind.regimen.description());
    print_kv("Traces", if report.kind.traces { "on" } else { "off" });
    print_kv("Phases", &training.phases.to_string());
    print_kv("Episodes", &training.total_episodes.to_string());
    print_kv(
        "Unlocked",
        &format!(
            "{} ({:.1}%)",
            training.successes,
            training.success_rate() * 100.0
        ),
    );
    print_kv("Regressions", &training.regressions.to_string());
    print_kv("Steps", &training.total_steps.to_string());

    let Some(metrics) = metrics else {
        return;
    };
    print_kv(
        "Mean length",
        &format!("{:.2} steps", metrics.avg_episode_length),
    );
    print_kv("Mean |TD error|", &format!("{:.4}", metrics.mean_abs_td_error));
    for line in format_phase_lines(metrics) {
        println!("{line}");
    }
}

/// One line per phase: start state, episode count, unlock rate, steps
pub fn format_phase_lines(metrics: &MetricsSummary) -> Vec<String> {
    metrics
        .phases
        .iter()
        .enumerate()
        .map(|(idx, phase)| {
            format!(
                "    phase {idx} from state {}: {} episodes, {:.1}% unlocked, {} steps",
                phase.start_state,
                phase.episodes,
                phase.success_rate() * 100.0,
                phase.steps
            )
        })
        .collect()
}
