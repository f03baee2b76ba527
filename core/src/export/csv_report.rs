use std::io::Write;

use anyhow::{anyhow, Result};

use crate::calendar::format_short;
use crate::service::dto::SynthesisReport;

/// Item rows, a blank line, then the student / period / export date block.
pub fn write_csv<W: Write>(report: &SynthesisReport, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["Item", "Emoji", "Total"])?;
    for line in &report.lines {
        let value = line.value.to_string();
        writer.write_record([line.name.as_str(), line.emoji.as_str(), value.as_str()])?;
    }

    // The csv writer cannot emit an empty record, so the separator goes to the raw stream.
    let mut out = writer
        .into_inner()
        .map_err(|e| anyhow!("failed to flush CSV rows: {}", e.error()))?;
    out.write_all(b"\n")?;

    let exported_on = format_short(report.generated_on);
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["Élève", report.student_name.as_str()])?;
    writer.write_record(["Période", report.period_label.as_str()])?;
    writer.write_record(["Date d'export", exported_on.as_str()])?;
    writer.flush()?;
    Ok(())
}
