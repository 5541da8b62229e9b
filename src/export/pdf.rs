//! Minimal paginated PDF table output for reports.

use crate::core::report::ReportRow;
use crate::errors::AppResult;
use crate::utils::time::format_hours;
use pdf_writer::{Content, Name, Pdf, Rect, Ref};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const PAGE_W: f32 = 595.0; // A4 portrait, points
const PAGE_H: f32 = 842.0;
const MARGIN: f32 = 50.0;
const ROW_H: f32 = 20.0;

const FONT_SIZE: f32 = 10.0;
const HEADER_FONT_SIZE: f32 = 11.0;
const TITLE_FONT_SIZE: f32 = 14.0;

const HEADERS: [&str; 4] = ["Name", "Worked Hours", "Break Hours", "Total Hours"];

struct PdfTable {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    page_refs: Vec<Ref>,
    next_id: i32,
}

impl PdfTable {
    fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            page_refs: Vec::new(),
            next_id: 4,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Register a page object and return the content stream id to fill.
    fn new_page(&mut self) -> Ref {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
            .contents(content_id);
        page.resources().fonts().pair(Name(b"F1"), self.font_id);

        content_id
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(pdf_writer::Str(text.as_bytes()));
        content.end_text();
    }

    fn draw_row(&self, content: &mut Content, y: f32, widths: &[f32], row: &[String], size: f32) {
        let mut x = MARGIN;
        for (i, text) in row.iter().enumerate() {
            let w = widths[i];
            self.draw_text(content, x + 4.0, y + 5.0, size, text);
            content.save_state();
            content.set_stroke_rgb(0.65, 0.65, 0.65);
            content.rect(x, y, w, ROW_H);
            content.stroke();
            content.restore_state();
            x += w;
        }
    }

    /// Columns sized by header and cell text, scaled down to fit the page.
    fn column_widths(rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = HEADERS.iter().map(|h| h.len() as f32 * 6.5).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.len() as f32 * 6.2);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = PAGE_W - 2.0 * MARGIN;
        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }
        widths
    }

    fn write_table(&mut self, title: &str, rows: &[Vec<String>]) {
        let widths = Self::column_widths(rows);
        let header_row: Vec<String> = HEADERS.iter().map(|s| s.to_string()).collect();

        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;

        loop {
            let content_id = self.new_page();
            let mut content = Content::new();

            self.draw_text(
                &mut content,
                MARGIN,
                PAGE_H - MARGIN + 15.0,
                TITLE_FONT_SIZE,
                title,
            );
            self.draw_text(
                &mut content,
                PAGE_W - MARGIN - 60.0,
                MARGIN - 35.0,
                FONT_SIZE,
                &format!("Page {page_idx}"),
            );

            let mut y = PAGE_H - MARGIN - 30.0;

            content.save_state();
            content.set_fill_rgb(0.85, 0.87, 0.90);
            content.rect(MARGIN, y, widths.iter().sum(), ROW_H);
            content.fill_nonzero();
            content.restore_state();
            self.draw_row(&mut content, y, &widths, &header_row, HEADER_FONT_SIZE);
            y -= ROW_H;

            let mut consumed = 0;
            for row in remaining {
                if y - ROW_H < MARGIN {
                    break;
                }
                self.draw_row(&mut content, y, &widths, row, FONT_SIZE);
                y -= ROW_H;
                consumed += 1;
            }

            self.pdf.stream(content_id, &content.finish());
            remaining = &remaining[consumed..];
            page_idx += 1;

            if remaining.is_empty() {
                break;
            }
        }
    }

    fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
        drop(pages);

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

pub fn write_report_pdf(path: &Path, title: &str, rows: &[ReportRow]) -> AppResult<()> {
    let table_rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                format_hours(r.worked_hours),
                format_hours(r.break_hours),
                format_hours(r.total_hours),
            ]
        })
        .collect();

    let mut table = PdfTable::new();
    table.write_table(title, &table_rows);
    table.save(path)?;
    Ok(())
}
