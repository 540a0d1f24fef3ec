//! Standard 14 Helvetica advance widths and the word wrapper built on them.
//!
//! Widths are in 1/1000 em for the printable ASCII range, from the Adobe AFM files.

use crate::layout::Font;

/// Points per millimetre.
pub const PT_PER_MM: f64 = 72.0 / 25.4;

const FIRST: u32 = 32;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Used for anything outside printable ASCII.
const DEFAULT_WIDTH: u16 = 556;

fn char_width(font: Font, c: char) -> u16 {
    let table = match font {
        Font::Helvetica => &HELVETICA,
        Font::HelveticaBold => &HELVETICA_BOLD,
    };
    u32::from(c)
        .checked_sub(FIRST)
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| table.get(i).copied())
        .unwrap_or(DEFAULT_WIDTH)
}

/// Rendered width of `text` in millimetres.
#[must_use]
pub fn text_width(text: &str, font: Font, size: f64) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(font, c))).sum();
    f64::from(units) / 1000.0 * size / PT_PER_MM
}

/// Break `text` into lines no wider than `max_width` mm.
///
/// Explicit newlines are kept. Words are never split unless a single word is
/// wider than the line, in which case it is broken between characters.
#[must_use]
pub fn wrap_text(text: &str, font: Font, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if text_width(&candidate, font, size) <= max_width {
                line = candidate;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if text_width(word, font, size) <= max_width {
                line = word.to_string();
            } else {
                for c in word.chars() {
                    let mut next = line.clone();
                    next.push(c);
                    if !line.is_empty() && text_width(&next, font, size) > max_width {
                        lines.push(std::mem::take(&mut line));
                        line.push(c);
                    } else {
                        line = next;
                    }
                }
            }
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_is_wider() {
        let plain = text_width("Technical Skills", Font::Helvetica, 12.0);
        let bold = text_width("Technical Skills", Font::HelveticaBold, 12.0);
        assert!(bold > plain);
        // 10 spaces at 10pt: 2780/1000 * 10pt = 27.8pt
        let spaces = text_width("          ", Font::Helvetica, 10.0);
        assert!((spaces - 27.8 / PT_PER_MM).abs() < 1e-9);
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(
            wrap_text("React, SQL", Font::Helvetica, 10.0, 182.0),
            vec!["React, SQL"]
        );
        assert_eq!(wrap_text("", Font::Helvetica, 10.0, 182.0), vec![""]);
    }

    #[test]
    fn long_text_wraps_within_width() {
        let skills = "React, Node.js, Express, MongoDB, PostgreSQL, Docker, Kubernetes, \
                      AWS, GCP, TypeScript, GraphQL, Redis, Kafka, Python, Django";
        let lines = wrap_text(skills, Font::Helvetica, 10.0, 80.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, Font::Helvetica, 10.0) <= 80.0, "{line}");
        }
        assert_eq!(lines.join(" "), skills.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn oversized_word_is_broken() {
        let lines = wrap_text("github.com/averyveryverylongusername/repo", Font::Helvetica, 10.0, 20.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "github.com/averyveryverylongusername/repo");
    }

    #[test]
    fn newlines_are_kept() {
        let lines = wrap_text("Placement portal\nChat bot", Font::Helvetica, 10.0, 182.0);
        assert_eq!(lines, vec!["Placement portal", "Chat bot"]);
    }
}
