//! Single-page PDF output for [`Page`] through `pdf-writer`.
//!
//! Uses the standard 14 Helvetica faces with `WinAnsiEncoding`, so nothing is
//! embedded. Characters outside that encoding are written as `?`.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

use crate::layout::{Align, Color, DrawOp, Font, Page};
use crate::metrics::{PT_PER_MM, text_width};

/// Default stroke width, 0.2 mm.
const LINE_WIDTH_PT: f32 = 0.567;

const CATALOG: Ref = Ref::new(1);
const PAGE_TREE: Ref = Ref::new(2);
const PAGE: Ref = Ref::new(3);
const REGULAR: Ref = Ref::new(4);
const BOLD: Ref = Ref::new(5);
const CONTENTS: Ref = Ref::new(6);

const fn font_resource(font: Font) -> Name<'static> {
    match font {
        Font::Helvetica => Name(b"F1"),
        Font::HelveticaBold => Name(b"F2"),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "page coordinates stay within a few hundred points"
)]
fn pt(mm: f64) -> f32 {
    (mm * PT_PER_MM) as f32
}

fn channels(color: Color) -> (f32, f32, f32) {
    let c = |v: u8| f32::from(v) / 255.0;
    (c(color.0), c(color.1), c(color.2))
}

/// Map a char to its `WinAnsiEncoding` byte.
fn win_ansi(c: char) -> u8 {
    match c {
        ' '..='~' | '\u{a0}'..='\u{ff}' => u8::try_from(u32::from(c)).unwrap_or(b'?'),
        '\u{20ac}' => 0x80,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        _ => b'?',
    }
}

fn encode(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi).collect()
}

/// Baseline origin of a text run in PDF user space (points, y up).
fn text_origin(
    page: &Page,
    x: f64,
    y: f64,
    text: &str,
    font: Font,
    size: f64,
    align: Align,
) -> (f32, f32) {
    let left = match align {
        Align::Left => x,
        Align::Center => x - text_width(text, font, size) / 2.0,
    };
    (pt(left), pt(page.height - y))
}

fn content_stream(page: &Page) -> Content {
    let height = page.height;
    let mut content = Content::new();

    for op in &page.ops {
        match op {
            DrawOp::FillRect { x, y, w, h, color } => {
                let (r, g, b) = channels(*color);
                content.set_fill_rgb(r, g, b);
                content.rect(pt(*x), pt(height - y - h), pt(*w), pt(*h));
                content.fill_nonzero();
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                color,
            } => {
                let (r, g, b) = channels(*color);
                content.set_stroke_rgb(r, g, b);
                content.set_line_width(LINE_WIDTH_PT);
                content.move_to(pt(*x1), pt(height - y1));
                content.line_to(pt(*x2), pt(height - y2));
                content.stroke();
            }
            DrawOp::Text {
                x,
                y,
                text,
                font,
                size,
                color,
                align,
            } => {
                let (r, g, b) = channels(*color);
                let (left, baseline) = text_origin(page, *x, *y, text, *font, *size, *align);
                let encoded = encode(text);
                content.begin_text();
                content.set_font(font_resource(*font), font_size(*size));
                content.set_fill_rgb(r, g, b);
                content.next_line(left, baseline);
                content.show(Str(&encoded));
                content.end_text();
            }
        }
    }
    content
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "font sizes are small positive numbers"
)]
const fn font_size(size: f64) -> f32 {
    size as f32
}

/// Serialise `page` into a complete PDF file.
#[must_use]
pub fn render_pdf(page: &Page) -> Vec<u8> {
    let mut pdf = Pdf::new();
    pdf.catalog(CATALOG).pages(PAGE_TREE);
    pdf.pages(PAGE_TREE).kids([PAGE]).count(1);

    let mut sheet = pdf.page(PAGE);
    sheet.media_box(Rect::new(0.0, 0.0, pt(page.width), pt(page.height)));
    sheet.parent(PAGE_TREE);
    sheet.contents(CONTENTS);
    sheet
        .resources()
        .fonts()
        .pair(font_resource(Font::Helvetica), REGULAR)
        .pair(font_resource(Font::HelveticaBold), BOLD);
    sheet.finish();

    pdf.type1_font(REGULAR)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(BOLD)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let content = content_stream(page).finish();
    pdf.stream(CONTENTS, &content);
    pdf.finish()
}
