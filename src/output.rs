//! CLI output formatting for batch conversion.
//!
//! Each surface has a `format_*` function (returns lines) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure —
//! no I/O, no side effects.
//!
//! ```text
//! [1/3] photo.jpg ........ photo.webp (2.4 MB → 312.5 KB, 87.3% saved)
//! [2/3] scan.png ......... FAILED: Decode failed: scan.png: ...
//! [3/3] IMG_0042.jpg ..... du-hoc-uc-3.webp (1.1 MB → 203.1 KB, 81.9% saved)
//!
//! Converted 2 of 3 images: 3.5 MB → 515.6 KB (85.5% saved), 1 failed
//! ```

use crate::batch::{BatchEvent, BatchReport};

/// Human-readable byte size: bytes below 1 KiB, then KB/MB with one decimal.
fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}

/// Percent saved going from `original` to `converted` (negative = grew).
fn savings_percent(original: usize, converted: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - converted as f64 / original as f64) * 100.0
}

/// Format one batch event as display lines. Progress checkpoints are
/// intentionally silent — the terminal line per image is the signal.
pub fn format_batch_event(event: &BatchEvent, total: usize) -> Vec<String> {
    match event {
        BatchEvent::Started { .. } | BatchEvent::Progress { .. } => Vec::new(),
        BatchEvent::Completed {
            index,
            name,
            output_name,
            original_size,
            converted_size,
        } => vec![format!(
            "[{}/{}] {} → {} ({} → {}, {:.1}% saved)",
            index + 1,
            total,
            name,
            output_name,
            format_size(*original_size),
            format_size(*converted_size),
            savings_percent(*original_size, *converted_size),
        )],
        BatchEvent::Failed {
            index,
            name,
            message,
        } => vec![format!("[{}/{}] {} FAILED: {}", index + 1, total, name, message)],
    }
}

/// Format the end-of-batch summary line(s).
pub fn format_report_summary(report: &BatchReport) -> Vec<String> {
    let stats = &report.stats;
    let total = report.outcomes.len();

    let mut line = format!(
        "Converted {} of {} images: {} → {} ({:.1}% saved)",
        stats.files_completed,
        total,
        format_size(stats.total_original_size),
        format_size(stats.total_converted_size),
        stats.savings_percent,
    );
    if stats.files_failed > 0 {
        line.push_str(&format!(", {} failed", stats.files_failed));
    }
    vec![String::new(), line]
}

pub fn print_report_summary(report: &BatchReport) {
    for line in format_report_summary(report) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{ConversionStats, ImageOutcome, ImageStatus};

    #[test]
    fn sizes_pick_sensible_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn completed_event_formats_one_line() {
        let event = BatchEvent::Completed {
            index: 0,
            name: "photo.jpg".into(),
            output_name: "photo.webp".into(),
            original_size: 1000,
            converted_size: 250,
        };
        let lines = format_batch_event(&event, 3);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[1/3] photo.jpg → photo.webp"));
        assert!(lines[0].contains("75.0% saved"));
    }

    #[test]
    fn failed_event_carries_message() {
        let event = BatchEvent::Failed {
            index: 1,
            name: "bad.png".into(),
            message: "Decode failed: bad.png".into(),
        };
        let lines = format_batch_event(&event, 2);
        assert_eq!(lines, vec!["[2/2] bad.png FAILED: Decode failed: bad.png"]);
    }

    #[test]
    fn progress_events_are_silent() {
        let event = BatchEvent::Progress { index: 0, percent: 60 };
        assert!(format_batch_event(&event, 1).is_empty());
    }

    #[test]
    fn summary_mentions_failures_only_when_present() {
        let outcome = ImageOutcome {
            name: "a.png".into(),
            output_name: "a.webp".into(),
            status: ImageStatus::Completed,
            original_size: 1000,
            converted_size: Some(400),
            error: None,
            orientation: 1,
            exif_removed: true,
        };
        let report = BatchReport {
            outcomes: vec![outcome],
            stats: ConversionStats {
                files_completed: 1,
                files_failed: 0,
                total_original_size: 1000,
                total_converted_size: 400,
                savings_percent: 60.0,
            },
        };
        let lines = format_report_summary(&report);
        assert!(lines.last().unwrap().contains("Converted 1 of 1"));
        assert!(!lines.last().unwrap().contains("failed"));
    }

    #[test]
    fn growth_shows_negative_savings() {
        assert!(savings_percent(100, 150) < 0.0);
        let lines = format_batch_event(
            &BatchEvent::Completed {
                index: 0,
                name: "tiny.png".into(),
                output_name: "tiny.webp".into(),
                original_size: 100,
                converted_size: 150,
            },
            1,
        );
        assert!(lines[0].contains("-50.0% saved"));
    }
}
