//! CSV and PDF exports of a synthesis report.

pub mod csv_report;
pub mod pdf_report;

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::model::synthesis::SynthesisKind;
use crate::service::dto::SynthesisReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// `synthese_semaine_Camille_2026-10-18.csv` / `synthese_week_Camille_2026-10-18.pdf`.
/// Same-day exports of one kind share a name and overwrite each other.
pub fn export_file_name(
    kind: SynthesisKind,
    format: ExportFormat,
    student_name: &str,
    date: NaiveDate,
) -> String {
    let slug = match format {
        ExportFormat::Csv => kind.csv_slug(),
        ExportFormat::Pdf => kind.pdf_slug(),
    };
    format!(
        "synthese_{}_{}_{}.{}",
        slug,
        sanitize_file_segment(student_name),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

fn sanitize_file_segment(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

/// Writes `report` into `out_dir` and returns the written path.
pub fn export_report(report: &SynthesisReport, format: ExportFormat, out_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create export directory {}", out_dir.display()))?;
    let path = out_dir.join(export_file_name(
        report.kind,
        format,
        &report.student_name,
        report.generated_on,
    ));

    match format {
        ExportFormat::Csv => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            csv_report::write_csv(report, file)?;
        }
        ExportFormat::Pdf => {
            let bytes = pdf_report::render_pdf(report)?;
            fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
        }
    }

    tracing::info!("Exported {:?} {} to {}", report.kind, format.extension(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::dto::StatLine;
    use uuid::Uuid;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_file_names() {
        let date = d(2026, 10, 18);
        assert_eq!(
            export_file_name(SynthesisKind::Today, ExportFormat::Csv, "Camille", date),
            "synthese_jour_Camille_2026-10-18.csv"
        );
        assert_eq!(
            export_file_name(SynthesisKind::Custom, ExportFormat::Csv, "Camille", date),
            "synthese_periode_Camille_2026-10-18.csv"
        );
        assert_eq!(
            export_file_name(SynthesisKind::Total, ExportFormat::Pdf, "Camille", date),
            "synthese_total_Camille_2026-10-18.pdf"
        );
        assert_eq!(
            export_file_name(SynthesisKind::Week, ExportFormat::Pdf, "A/B", date),
            "synthese_week_A_B_2026-10-18.pdf"
        );
    }

    #[test]
    fn test_same_day_exports_overwrite() {
        let dir = std::env::temp_dir().join(format!("synthesis-export-{}", Uuid::new_v4()));
        let mut report = SynthesisReport {
            kind: SynthesisKind::Week,
            title: SynthesisKind::Week.title().to_string(),
            student_name: "Camille".to_string(),
            period_label: "15/09/2025 - 19/09/2025".to_string(),
            generated_on: d(2025, 9, 17),
            lines: vec![StatLine {
                item_id: "retard".to_string(),
                name: "Retard".to_string(),
                emoji: "⏰".to_string(),
                value: 1,
            }],
        };

        let first = export_report(&report, ExportFormat::Csv, &dir).unwrap();
        report.lines[0].value = 7;
        let second = export_report(&report, ExportFormat::Csv, &dir).unwrap();

        assert_eq!(first, second);
        let content = fs::read_to_string(&second).unwrap();
        assert!(content.contains("Retard,⏰,7"));

        let pdf = export_report(&report, ExportFormat::Pdf, &dir).unwrap();
        assert!(fs::read(pdf).unwrap().starts_with(b"%PDF"));

        fs::remove_dir_all(dir).unwrap();
    }
}
