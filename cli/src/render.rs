use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use tracking_synthesis_core::{ClassRoster, SynthesisReport, Tone};

#[derive(Tabled)]
struct SynthesisRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Total")]
    total: String,
}

#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Élève")]
    name: String,
    #[tabled(rename = "Semaine A")]
    schedule_a: String,
    #[tabled(rename = "Semaine B")]
    schedule_b: String,
    #[tabled(rename = "Items spécifiques")]
    specific_items: usize,
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => Color::FG_GREEN,
        Tone::Negative => Color::FG_RED,
        Tone::Neutral => Color::FG_WHITE,
    }
}

pub fn print_synthesis(report: &SynthesisReport) {
    println!("\n\x1b[1;36m{}\x1b[0m  {}", report.title, report.period_label);

    if report.is_empty() {
        println!("📊 Aucun item configuré");
        return;
    }

    let rows: Vec<SynthesisRow> = report
        .lines
        .iter()
        .map(|line| SynthesisRow {
            item: line.label(),
            total: line.signed_value(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

    // Row 0 is the header.
    for (i, line) in report.lines.iter().enumerate() {
        let row = i + 1;
        table.with(Modify::new(Rows::new(row..row + 1)).with(tone_color(line.tone())));
    }

    println!("{}", table);
}

pub fn print_students(roster: &ClassRoster) {
    if roster.students.is_empty() {
        println!("No students found in this class.");
        return;
    }

    let mark = |present: bool| if present { "oui" } else { "-" }.to_string();
    let rows: Vec<StudentRow> = roster
        .students
        .iter()
        .map(|s| StudentRow {
            id: s.id.clone(),
            name: s.name.clone(),
            schedule_a: mark(s.schedule_a.is_some()),
            schedule_b: mark(s.schedule_b.is_some()),
            specific_items: s.specific_items.len(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
    println!("{} item(s) for the whole class", roster.items.len());
}
