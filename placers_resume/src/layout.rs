//! Fixed A4 resume layout. Coordinates are millimetres from the top-left corner;
//! text `y` is the baseline.

use placers_core::ResumeForm;

use crate::metrics::{PT_PER_MM, wrap_text};

pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;
pub const MARGIN: f64 = 14.0;
pub const HEADER_HEIGHT: f64 = 38.0;

const NOT_PROVIDED: &str = "Not provided";
const LINE_HEIGHT_FACTOR: f64 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Self = Self(0, 0, 0);
    pub const WHITE: Self = Self(255, 255, 255);
    pub const SLATE: Self = Self(30, 41, 59);
    pub const GRAY: Self = Self(150, 150, 150);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Color,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        font: Font,
        size: f64,
        color: Color,
        align: Align,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// All text on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

fn or_not_provided(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_PROVIDED
    } else {
        value
    }
}

fn line_count(lines: &[String]) -> f64 {
    f64::from(u32::try_from(lines.len()).unwrap_or(u32::MAX))
}

#[derive(Debug, Clone, Copy)]
struct Style {
    font: Font,
    size: f64,
    color: Color,
    align: Align,
}

impl Style {
    const NAME: Self = Self {
        font: Font::HelveticaBold,
        size: 22.0,
        color: Color::WHITE,
        align: Align::Center,
    };
    const CONTACT: Self = Self {
        font: Font::Helvetica,
        size: 10.0,
        color: Color::WHITE,
        align: Align::Center,
    };
    const SECTION: Self = Self {
        font: Font::HelveticaBold,
        size: 12.0,
        color: Color::SLATE,
        align: Align::Left,
    };
    const BODY: Self = Self {
        font: Font::Helvetica,
        size: 10.0,
        color: Color::BLACK,
        align: Align::Left,
    };
    const FOOTER: Self = Self {
        font: Font::Helvetica,
        size: 8.0,
        color: Color::GRAY,
        align: Align::Center,
    };
}

struct Cursor {
    ops: Vec<DrawOp>,
    y: f64,
}

impl Cursor {
    fn text(&mut self, x: f64, y: f64, text: &str, style: Style) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            font: style.font,
            size: style.size,
            color: style.color,
            align: style.align,
        });
    }

    fn section(&mut self, title: &str) {
        let y = self.y;
        self.text(MARGIN, y, title, Style::SECTION);
        self.ops.push(DrawOp::Line {
            x1: MARGIN,
            y1: y + 1.0,
            x2: PAGE_WIDTH - MARGIN,
            y2: y + 1.0,
            color: Color::SLATE,
        });
        self.y += 9.0;
    }

    fn body(&mut self, text: &str) {
        let y = self.y;
        self.text(MARGIN, y, text, Style::BODY);
        self.y += 7.0;
    }

    /// Wrapped block starting at the cursor; the cursor itself does not move.
    fn paragraph(&mut self, text: &str) -> Vec<String> {
        let style = Style::BODY;
        let lines = wrap_text(text, style.font, style.size, PAGE_WIDTH - 2.0 * MARGIN);
        let step = style.size * LINE_HEIGHT_FACTOR / PT_PER_MM;
        let mut y = self.y;
        for line in &lines {
            self.text(MARGIN, y, line, style);
            y += step;
        }
        lines
    }
}

/// Lay out the resume for `form` with `footer` at the bottom of the page.
#[must_use]
pub fn layout(form: &ResumeForm, footer: &str) -> Page {
    let center = PAGE_WIDTH / 2.0;
    let mut page = Cursor {
        ops: vec![DrawOp::FillRect {
            x: 0.0,
            y: 0.0,
            w: PAGE_WIDTH,
            h: HEADER_HEIGHT,
            color: Color::SLATE,
        }],
        y: 50.0,
    };

    let name = if form.name.trim().is_empty() {
        "Student Name"
    } else {
        form.name.trim()
    };
    page.text(center, 16.0, name, Style::NAME);

    let contact = format!("{}  |  {}  |  {}", form.email, form.phone, form.branch);
    page.text(center, 26.0, &contact, Style::CONTACT);
    if !form.github.trim().is_empty() {
        page.text(center, 33.0, form.github.trim(), Style::CONTACT);
    }

    page.section("Academic Details");
    page.body(&format!(
        "CGPA: {}  |  10th: {}%  |  12th: {}%",
        form.cgpa, form.marks10, form.marks12
    ));
    page.body(&format!("Branch: {}", form.branch));
    page.y += 4.0;

    page.section("Technical Skills");
    let skills = page.paragraph(or_not_provided(&form.skills));
    page.y += line_count(&skills) * 7.0 + 4.0;

    page.section("Projects");
    page.paragraph(or_not_provided(&form.projects));

    if !footer.is_empty() {
        page.text(center, 285.0, footer, Style::FOOTER);
    }

    Page {
        width: PAGE_WIDTH,
        height: PAGE_HEIGHT,
        ops: page.ops,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ResumeForm {
        ResumeForm {
            name: "Gana R.".to_string(),
            email: "gana.r@college.edu".to_string(),
            phone: "9876543210".to_string(),
            branch: "MCA".to_string(),
            cgpa: "7.8".to_string(),
            marks10: "91".to_string(),
            marks12: "88".to_string(),
            skills: "React, Node.js".to_string(),
            projects: String::new(),
            github: "github.com/ganar".to_string(),
        }
    }

    fn text_at(page: &Page, wanted: &str) -> Option<(f64, f64, Font, Align)> {
        page.ops.iter().find_map(|op| match op {
            DrawOp::Text {
                x,
                y,
                text,
                font,
                align,
                ..
            } if text == wanted => Some((*x, *y, *font, *align)),
            _ => None,
        })
    }

    #[test]
    fn header_band_and_name() {
        let page = layout(&form(), "footer");
        assert!(matches!(
            page.ops[0],
            DrawOp::FillRect { h, color: Color::SLATE, .. } if (h - 38.0).abs() < f64::EPSILON
        ));
        let (x, y, font, align) = text_at(&page, "Gana R.").unwrap_or((0.0, 0.0, Font::Helvetica, Align::Left));
        assert!((x - 105.0).abs() < f64::EPSILON && (y - 16.0).abs() < f64::EPSILON);
        assert_eq!(font, Font::HelveticaBold);
        assert_eq!(align, Align::Center);
        assert!(text_at(&page, "gana.r@college.edu  |  9876543210  |  MCA").is_some());
        assert!(text_at(&page, "github.com/ganar").is_some());
    }

    #[test]
    fn sections_in_order_with_fixed_offsets() {
        let page = layout(&form(), "footer");
        let y = |t: &str| text_at(&page, t).map_or(-1.0, |(_, y, _, _)| y);
        assert!((y("Academic Details") - 50.0).abs() < 1e-9);
        assert!((y("CGPA: 7.8  |  10th: 91%  |  12th: 88%") - 59.0).abs() < 1e-9);
        assert!((y("Branch: MCA") - 66.0).abs() < 1e-9);
        assert!((y("Technical Skills") - 77.0).abs() < 1e-9);
        assert!((y("React, Node.js") - 86.0).abs() < 1e-9);
        // one skill line: 86 + 7 + 4
        assert!((y("Projects") - 97.0).abs() < 1e-9);
        assert!((y("Not provided") - 106.0).abs() < 1e-9);
        assert!((y("footer") - 285.0).abs() < 1e-9);
    }

    #[test]
    fn blank_form_uses_placeholders() {
        let page = layout(&ResumeForm::default(), "");
        let texts: Vec<&str> = page.texts().collect();
        assert_eq!(texts[0], "Student Name");
        assert_eq!(texts.iter().filter(|t| **t == "Not provided").count(), 2);
        assert!(!texts.contains(&""));
    }
}
