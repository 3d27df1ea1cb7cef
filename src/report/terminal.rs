use std::io::Write;

use colored::{ColoredString, Colorize};

use crate::config::{RenderConfig, ReportMode};
use crate::models::{PackageRecord, MISSING};

use super::{count_licenses, missing_count};

/// Render the report selected by `config.mode` to `out`.
pub fn render(records: &[PackageRecord], config: &RenderConfig, out: &mut impl Write) -> std::io::Result<()> {
    match config.mode {
        ReportMode::List => render_list(records, config, out)?,
        ReportMode::Summary => render_summary(records, config, out)?,
    }

    let missing = missing_count(records);
    if missing > 0 {
        let warning = format!(
            "Warning: {} optional package(s) not installed (no package.json found), reported as \"{}\"",
            missing, MISSING
        );
        writeln!(out, "{}", paint(config, &warning, |s| s.yellow()))?;
    }

    Ok(())
}

fn render_list(records: &[PackageRecord], config: &RenderConfig, out: &mut impl Write) -> std::io::Result<()> {
    for record in records {
        let label = truncate(&record.id, config.list_max_len);
        let licenses = if record.all_licenses == [MISSING] {
            paint(config, MISSING, |s| s.red())
        } else {
            record.all_licenses.join(" + ")
        };
        write_row(out, config, &label, config.list_width, &licenses)?;
    }
    Ok(())
}

fn render_summary(records: &[PackageRecord], config: &RenderConfig, out: &mut impl Write) -> std::io::Result<()> {
    for (license, count) in count_licenses(records) {
        let label = truncate(&license, config.summary_max_len);
        let count = paint(config, &count.to_string(), |s| s.bold());
        write_row(out, config, &label, config.summary_width, &count)?;
    }
    Ok(())
}

/// `<label> <dots> <value>`, with `<label> <dots>` filling `width` columns.
/// An empty value leaves no trailing space.
fn write_row(
    out: &mut impl Write,
    config: &RenderConfig,
    label: &str,
    width: usize,
    value: &str,
) -> std::io::Result<()> {
    let filler = paint(config, &dots(label, width), |s| s.dimmed());
    if value.is_empty() {
        writeln!(out, "{} {}", label, filler)
    } else {
        writeln!(out, "{} {} {}", label, filler, value)
    }
}

fn dots(label: &str, width: usize) -> String {
    let used = label.chars().count() + 1;
    ".".repeat(width.saturating_sub(used).max(1))
}

/// Cut `label` to `max_len - 1` characters plus an ellipsis once it reaches
/// `max_len` characters.
pub fn truncate(label: &str, max_len: usize) -> String {
    if label.chars().count() >= max_len {
        let head: String = label.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", head)
    } else {
        label.to_string()
    }
}

fn paint(config: &RenderConfig, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
    if config.color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::{missing, record};

    fn render_to_string(records: &[PackageRecord], mode: ReportMode) -> String {
        let config = RenderConfig {
            mode,
            ..RenderConfig::default()
        };
        let mut out = Vec::new();
        render(records, &config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_truncate_boundaries() {
        let id_38 = "a".repeat(38);
        let id_39 = "b".repeat(39);
        assert_eq!(truncate(&id_38, 39), id_38);
        assert_eq!(truncate(&id_39, 39), format!("{}…", "b".repeat(38)));
        assert_eq!(truncate(&id_39, 39).chars().count(), 39);

        assert_eq!(truncate(&"c".repeat(18), 19), "c".repeat(18));
        assert_eq!(truncate(&"d".repeat(19), 19), format!("{}…", "d".repeat(18)));
    }

    #[test]
    fn test_list_layout() {
        let records = vec![
            record("express@4.18.2", &["MIT"]),
            record("dual@1.0.0", &["MIT", "Apache-2.0"]),
            record("bare@0.0.1", &[]),
            missing("fsevents@^2.3.0"),
        ];
        let expected = "\
express@4.18.2 ............................ MIT
dual@1.0.0 ................................ Apache-2.0 + MIT
bare@0.0.1 ................................
fsevents@^2.3.0 ........................... missing
Warning: 1 optional package(s) not installed (no package.json found), reported as \"missing\"
";
        assert_eq!(render_to_string(&records, ReportMode::List), expected);
    }

    #[test]
    fn test_list_columns_line_up_for_long_ids() {
        let long = format!("{}@1.0.0", "x".repeat(40));
        let output = render_to_string(&[record(&long, &["ISC"])], ReportMode::List);
        let line = output.lines().next().unwrap();
        assert_eq!(line, format!("{}… ... ISC", "x".repeat(38)));
    }

    #[test]
    fn test_summary_layout() {
        let records = vec![
            record("a@1.0.0", &["MIT"]),
            record("b@1.0.0", &["ISC"]),
            record("c@1.0.0", &["MIT"]),
        ];
        let expected = "\
MIT ................... 2
ISC ................... 1
";
        assert_eq!(render_to_string(&records, ReportMode::Summary), expected);
    }

    #[test]
    fn test_summary_truncates_long_identifiers() {
        let records = vec![record("a@1.0.0", &["LicenseRef-Custom-Terms"])];
        assert_eq!(
            render_to_string(&records, ReportMode::Summary),
            "LicenseRef-Custom-… ... 1\n"
        );
    }

    #[test]
    fn test_no_warning_without_missing_packages() {
        let output = render_to_string(&[record("a@1.0.0", &["MIT"])], ReportMode::Summary);
        assert!(!output.contains("Warning"));
    }
}
