// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Inline label markup.
//!
//! Labels allow exactly two constructs: bold (`<b>…</b>`) and line breaks
//! (`<br>` variants or a literal newline). Everything is stripped to plain
//! text lines; markup is never executed or forwarded to the render target.

use memchr::memchr2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelLine {
    text: String,
    bold: bool,
}

impl LabelLine {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bold(&self) -> bool {
        self.bold
    }
}

/// Splits a raw label into display lines, stripping the supported tags.
///
/// Unknown tags are not interpreted; their text passes through verbatim (the
/// serializer escapes it). Every label yields at least one line.
pub fn label_lines(label: &str) -> Vec<LabelLine> {
    let bytes = label.as_bytes();
    let mut lines = Vec::new();
    let mut text = String::new();
    let mut line_bold = false;
    let mut bold_active = false;
    let mut pos = 0usize;

    while pos < bytes.len() {
        let Some(rel) = memchr2(b'<', b'\n', &bytes[pos..]) else {
            push_text(&mut text, &label[pos..], bold_active, &mut line_bold);
            break;
        };
        let at = pos + rel;
        push_text(&mut text, &label[pos..at], bold_active, &mut line_bold);

        if bytes[at] == b'\n' {
            flush(&mut lines, &mut text, &mut line_bold);
            pos = at + 1;
            continue;
        }

        let rest = &bytes[at..];
        if let Some(len) = match_tag(rest, b"<b>") {
            bold_active = true;
            pos = at + len;
        } else if let Some(len) = match_tag(rest, b"</b>") {
            bold_active = false;
            pos = at + len;
        } else if let Some(len) = match_tag(rest, b"<br>")
            .or_else(|| match_tag(rest, b"<br/>"))
            .or_else(|| match_tag(rest, b"<br />"))
        {
            flush(&mut lines, &mut text, &mut line_bold);
            pos = at + len;
        } else {
            text.push('<');
            pos = at + 1;
        }
    }

    if !text.is_empty() || lines.is_empty() {
        flush(&mut lines, &mut text, &mut line_bold);
    }

    lines
}

fn flush(lines: &mut Vec<LabelLine>, text: &mut String, line_bold: &mut bool) {
    lines.push(LabelLine {
        text: std::mem::take(text),
        bold: *line_bold,
    });
    *line_bold = false;
}

fn push_text(text: &mut String, segment: &str, bold_active: bool, line_bold: &mut bool) {
    if segment.is_empty() {
        return;
    }
    if bold_active {
        *line_bold = true;
    }
    text.push_str(segment);
}

fn match_tag(input: &[u8], tag: &[u8]) -> Option<usize> {
    if input.len() < tag.len() {
        return None;
    }
    if input[..tag.len()].eq_ignore_ascii_case(tag) {
        Some(tag.len())
    } else {
        None
    }
}
