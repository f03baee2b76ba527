use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracking_synthesis_core::{
    export_report, BarChartSpec, ChartSlots, ExportFormat, FileTrackingStore, Student,
    SynthesisKind, SynthesisReport, SynthesisService, TrackedItem,
};

pub struct App {
    pub service: SynthesisService<FileTrackingStore>,
    pub student: Student,
    pub items: Vec<TrackedItem>,
    pub today: NaiveDate,
    pub custom_range: (NaiveDate, NaiveDate),
    pub charts: ChartSlots,
    pub selected: usize,
    pub status: Option<String>,
    pub export_dir: PathBuf,
}

impl App {
    pub fn new(
        service: SynthesisService<FileTrackingStore>,
        student: Student,
        items: Vec<TrackedItem>,
        today: NaiveDate,
        custom_range: Option<(NaiveDate, NaiveDate)>,
    ) -> App {
        let custom_range = custom_range
            .unwrap_or_else(|| SynthesisService::<FileTrackingStore>::default_custom_range(today));
        let mut app = App {
            service,
            student,
            items,
            today,
            custom_range,
            charts: ChartSlots::new(),
            selected: 0,
            status: None,
            export_dir: PathBuf::from("."),
        };
        app.refresh();
        app
    }

    pub fn selected_kind(&self) -> SynthesisKind {
        SynthesisKind::ALL[self.selected]
    }

    /// Recomputes every window and replaces the charts on screen.
    pub fn refresh(&mut self) {
        let (start, end) = self.custom_range;
        let (student, items, today) = (&self.student, &self.items, self.today);
        let service = &mut self.service;

        let mut errors = Vec::new();
        if let Err(e) = service.compute_today(student, items, today) {
            errors.push(e.to_string());
        }
        if let Err(e) = service.compute_week(student, items, today) {
            errors.push(e.to_string());
        }
        if let Err(e) = service.compute_total(student, items, today) {
            errors.push(e.to_string());
        }
        if let Err(e) = service.compute_custom(student, items, Some(start), Some(end)) {
            errors.push(e.to_string());
        }

        for kind in SynthesisKind::ALL {
            let spec = self
                .service
                .summaries()
                .get(kind)
                .and_then(|result| BarChartSpec::build(result, &self.items));
            if let Some(spec) = spec {
                self.charts.replace(spec);
            }
        }

        self.status = if errors.is_empty() {
            None
        } else {
            Some(errors.join(" | "))
        };
    }

    pub fn next_tab(&mut self) {
        self.selected = (self.selected + 1) % SynthesisKind::ALL.len();
    }

    pub fn previous_tab(&mut self) {
        self.selected = if self.selected == 0 {
            SynthesisKind::ALL.len() - 1
        } else {
            self.selected - 1
        };
    }

    /// Report of the selected window as last computed, `None` when it failed.
    pub fn current_report(&self) -> Option<SynthesisReport> {
        let result = self.service.summaries().get(self.selected_kind())?;
        Some(SynthesisReport::from_result(
            result,
            &self.items,
            &self.student.name,
            Local::now().date_naive(),
        ))
    }

    pub fn export(&mut self, format: ExportFormat) {
        let result = self
            .service
            .summaries()
            .export_view(self.selected_kind(), &self.items);
        let report =
            SynthesisReport::from_result(&result, &self.items, &self.student.name, Local::now().date_naive());
        self.status = Some(match export_report(&report, format, &self.export_dir) {
            Ok(path) => format!("Exporté : {}", path.display()),
            Err(e) => format!("Erreur lors de l'export : {:#}", e),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracking_synthesis_core::AppConfig;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn app_with_custom_range(start: NaiveDate, end: NaiveDate) -> App {
        // No tracking file under this directory: every window reads empty records.
        let store = FileTrackingStore::new(std::env::temp_dir().join("synthesis-app-no-data"));
        let service = SynthesisService::new(store, &AppConfig::default());
        let student = Student::new("s1", "Camille");
        let items = vec![TrackedItem::new("retard", "Retard", "⏰")];
        App::new(service, student, items, d(2025, 9, 15), Some((start, end)))
    }

    #[test]
    fn test_failed_window_has_no_report_to_draw() {
        let mut app = app_with_custom_range(d(2025, 9, 10), d(2025, 9, 9));
        assert!(app.status.is_some());

        while app.selected_kind() != SynthesisKind::Custom {
            app.next_tab();
        }
        assert!(app.current_report().is_none());

        app.previous_tab();
        assert_eq!(app.selected_kind(), SynthesisKind::Week);
        let report = app.current_report().unwrap();
        assert_eq!(report.lines.len(), 1);
        assert_eq!(report.lines[0].value, 0);
    }

    #[test]
    fn test_refresh_replaces_charts() {
        let mut app = app_with_custom_range(d(2025, 9, 8), d(2025, 9, 12));
        assert_eq!(app.charts.disposed_count(), 0);

        app.refresh();
        // Week, custom and total charts are replaced; today has none.
        assert_eq!(app.charts.disposed_count(), 3);
        assert!(app.current_report().is_some());
    }
}
