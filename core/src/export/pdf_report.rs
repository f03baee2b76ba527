use anyhow::{anyhow, Result};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect, Rgb,
};

use crate::calendar::format_short;
use crate::model::synthesis::Tone;
use crate::service::dto::{StatLine, SynthesisReport};

// A4 portrait, millimetres measured from the top edge.
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const CENTER_X: f32 = 105.0;
const TABLE_LEFT: f32 = 20.0;
const TABLE_WIDTH: f32 = 170.0;
const LABEL_X: f32 = 25.0;
const VALUE_X: f32 = 160.0;
const ROW_HEIGHT: f32 = 10.0;
const TEXT_OFFSET: f32 = 7.0;
const HEADING_TOP: f32 = 65.0;
const TABLE_HEADER_TOP: f32 = 75.0;
const FIRST_ROW_TOP: f32 = 85.0;
const CONTINUATION_TOP: f32 = 20.0;
const PAGE_BREAK_AFTER: f32 = 270.0;
const FOOTER_TOP: f32 = 290.0;

const ACCENT: (u8, u8, u8) = (102, 126, 234);
const POSITIVE: (u8, u8, u8) = (40, 167, 69);
const NEGATIVE: (u8, u8, u8) = (220, 53, 69);
const BLACK: (u8, u8, u8) = (0, 0, 0);
const WHITE: (u8, u8, u8) = (255, 255, 255);
const SHADE: (u8, u8, u8) = (248, 249, 250);

const LAYER_NAME: &str = "Calque 1";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowPlacement {
    pub index: usize,
    pub page: usize,
    pub top: f32,
    pub shaded: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    pub rows: Vec<RowPlacement>,
    pub page_count: usize,
}

/// Places `row_count` table rows. The first page starts under the report
/// header; a new page starts once a row would begin below the break line.
pub fn paginate(row_count: usize) -> PdfLayout {
    let mut rows = Vec::with_capacity(row_count);
    let mut page = 0;
    let mut top = FIRST_ROW_TOP;

    for index in 0..row_count {
        if top > PAGE_BREAK_AFTER {
            page += 1;
            top = CONTINUATION_TOP;
        }
        rows.push(RowPlacement {
            index,
            page,
            top,
            shaded: index % 2 == 0,
        });
        top += ROW_HEIGHT;
    }

    PdfLayout {
        rows,
        page_count: page + 1,
    }
}

pub fn render_pdf(report: &SynthesisReport) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        pdf_text(&report.title),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        LAYER_NAME,
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;

    let layout = paginate(report.lines.len());
    let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];
    for _ in 1..layout.page_count {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
        layers.push(doc.get_page(page).get_layer(layer));
    }

    draw_header(&layers[0], report, &regular, &bold);
    for placement in &layout.rows {
        draw_row(&layers[placement.page], &report.lines[placement.index], placement, &regular);
    }

    let generated_on = format_short(report.generated_on);
    for (i, layer) in layers.iter().enumerate() {
        let footer = format!("Généré le {} - Page {}/{}", generated_on, i + 1, layout.page_count);
        layer.set_fill_color(rgb((150, 150, 150)));
        centered_text(layer, &footer, 9.0, FOOTER_TOP, &regular);
    }

    tracing::debug!("Rendered {} rows on {} PDF pages", report.lines.len(), layout.page_count);
    doc.save_to_bytes().map_err(pdf_error)
}

fn draw_header(layer: &PdfLayerReference, report: &SynthesisReport, regular: &IndirectFontRef, bold: &IndirectFontRef) {
    layer.set_fill_color(rgb(ACCENT));
    centered_text(layer, &report.title, 20.0, 20.0, bold);

    layer.set_fill_color(rgb(BLACK));
    centered_text(layer, &report.student_name, 16.0, 35.0, regular);

    layer.set_fill_color(rgb((100, 100, 100)));
    centered_text(layer, &report.period_label, 12.0, 45.0, regular);

    layer.set_outline_color(rgb((200, 200, 200)));
    layer.set_outline_thickness(0.5);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(TABLE_LEFT), Mm(from_top(50.0))), false),
            (Point::new(Mm(TABLE_LEFT + TABLE_WIDTH), Mm(from_top(50.0))), false),
        ],
        is_closed: false,
    });

    layer.set_fill_color(rgb(BLACK));
    layer.use_text("Résultats par item", 14.0, Mm(TABLE_LEFT), Mm(from_top(HEADING_TOP)), bold);

    fill_row(layer, TABLE_HEADER_TOP, ACCENT);
    layer.set_fill_color(rgb(WHITE));
    let baseline = Mm(from_top(TABLE_HEADER_TOP + TEXT_OFFSET));
    layer.use_text("Item", 11.0, Mm(LABEL_X), baseline, bold);
    layer.use_text("Total", 11.0, Mm(VALUE_X), baseline, bold);
}

fn draw_row(layer: &PdfLayerReference, line: &StatLine, placement: &RowPlacement, font: &IndirectFontRef) {
    if placement.shaded {
        fill_row(layer, placement.top, SHADE);
    }

    let color = match line.tone() {
        Tone::Positive => POSITIVE,
        Tone::Negative => NEGATIVE,
        Tone::Neutral => BLACK,
    };
    layer.set_fill_color(rgb(color));

    let baseline = Mm(from_top(placement.top + TEXT_OFFSET));
    layer.use_text(pdf_text(&line.label()), 11.0, Mm(LABEL_X), baseline, font);
    layer.use_text(line.signed_value(), 11.0, Mm(VALUE_X), baseline, font);
}

fn fill_row(layer: &PdfLayerReference, top: f32, color: (u8, u8, u8)) {
    layer.set_fill_color(rgb(color));
    let rect = Rect::new(
        Mm(TABLE_LEFT),
        Mm(from_top(top + ROW_HEIGHT)),
        Mm(TABLE_LEFT + TABLE_WIDTH),
        Mm(from_top(top)),
    )
    .with_mode(PaintMode::Fill);
    layer.add_rect(rect);
}

/// Built-in fonts have no metrics here; Helvetica averages about half an em per glyph.
fn centered_text(layer: &PdfLayerReference, text: &str, size: f32, top: f32, font: &IndirectFontRef) {
    let text = pdf_text(text);
    let width = text.chars().count() as f32 * size * 0.5 * 0.3528;
    let x = (CENTER_X - width / 2.0).max(0.0);
    layer.use_text(text, size, Mm(x), Mm(from_top(top)), font);
}

fn from_top(top: f32) -> f32 {
    PAGE_HEIGHT - top
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, None))
}

/// Built-in fonts only cover Latin-1; emoji and other symbols are dropped.
fn pdf_text(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| (*c as u32) <= 0xFF && !c.is_control())
        .collect();
    kept.trim().to_string()
}

fn pdf_error<E: std::fmt::Debug>(error: E) -> anyhow::Error {
    anyhow!("PDF generation failed: {:?}", error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::synthesis::SynthesisKind;
    use chrono::NaiveDate;

    fn report(count: usize) -> SynthesisReport {
        SynthesisReport {
            kind: SynthesisKind::Total,
            title: SynthesisKind::Total.title().to_string(),
            student_name: "Camille".to_string(),
            period_label: "Du 01/09/2025 au 18/10/2026".to_string(),
            generated_on: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            lines: (0..count)
                .map(|i| StatLine {
                    item_id: format!("item-{}", i),
                    name: format!("Item {}", i),
                    emoji: "⭐".to_string(),
                    value: i as i64 - 2,
                })
                .collect(),
        }
    }

    #[test]
    fn test_first_page_holds_nineteen_rows() {
        let layout = paginate(19);
        assert_eq!(layout.page_count, 1);
        assert_eq!(layout.rows.first().unwrap().top, FIRST_ROW_TOP);
        assert_eq!(layout.rows.last().unwrap().top, 265.0);

        let layout = paginate(20);
        assert_eq!(layout.page_count, 2);
        assert_eq!(layout.rows[19].page, 1);
        assert_eq!(layout.rows[19].top, CONTINUATION_TOP);
    }

    #[test]
    fn test_following_pages_hold_twenty_six_rows() {
        assert_eq!(paginate(45).page_count, 2);
        assert_eq!(paginate(46).page_count, 3);
        assert_eq!(paginate(45).rows[44].top, 270.0);
    }

    #[test]
    fn test_rows_alternate_shading() {
        let layout = paginate(4);
        let shaded: Vec<bool> = layout.rows.iter().map(|r| r.shaded).collect();
        assert_eq!(shaded, vec![true, false, true, false]);
    }

    #[test]
    fn test_empty_report_is_one_page() {
        assert_eq!(paginate(0).page_count, 1);
    }

    #[test]
    fn test_pdf_text_drops_emoji() {
        assert_eq!(pdf_text("⏰ Retard"), "Retard");
        assert_eq!(pdf_text("Élève"), "Élève");
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = render_pdf(&report(30)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
