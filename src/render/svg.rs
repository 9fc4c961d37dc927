// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! SVG serialization of a [`Document`].
//!
//! Output is byte-deterministic: group order follows the document, attribute
//! order is fixed, and coordinates format through one rounding path. Link and
//! node containers carry stable identity attributes; the overlay controller
//! relies on them to attach.

use std::fmt::Write as _;

use crate::model::Point;

use super::geometry::PathData;
use super::{Anchor, Document, Element, Group, GroupKind, StrokeStyle};

pub fn document_to_svg(doc: &Document) -> String {
    let canvas = doc.canvas();
    let mut out = String::new();

    out.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"");
    push_num(&mut out, canvas.x);
    out.push(' ');
    push_num(&mut out, canvas.y);
    out.push(' ');
    push_num(&mut out, canvas.width);
    out.push(' ');
    push_num(&mut out, canvas.height);
    out.push_str("\" width=\"");
    push_num(&mut out, canvas.width);
    out.push_str("\" height=\"");
    push_num(&mut out, canvas.height);
    out.push_str("\">\n");

    out.push_str("<rect x=\"");
    push_num(&mut out, canvas.x);
    out.push_str("\" y=\"");
    push_num(&mut out, canvas.y);
    out.push_str("\" width=\"");
    push_num(&mut out, canvas.width);
    out.push_str("\" height=\"");
    push_num(&mut out, canvas.height);
    out.push_str("\" fill=\"");
    push_escaped(&mut out, doc.background());
    out.push_str("\"/>\n");

    for group in doc.groups() {
        push_group(&mut out, group);
    }

    out.push_str("</svg>\n");
    out
}

fn push_group(out: &mut String, group: &Group) {
    out.push_str("<g ");
    match group.kind() {
        GroupKind::Grouping(id) => {
            out.push_str("data-grouping-id=\"");
            push_escaped(out, id.as_str());
            out.push('"');
        }
        GroupKind::Link(id) => {
            out.push_str("data-link-id=\"");
            push_escaped(out, id.as_str());
            out.push('"');
        }
        GroupKind::Node(id) => {
            out.push_str("data-node-id=\"");
            push_escaped(out, id.as_str());
            out.push('"');
        }
        GroupKind::Overlay(id) => {
            out.push_str("data-overlay-for=\"");
            push_escaped(out, id.as_str());
            out.push('"');
        }
    }
    if let Some(nav) = group.nav() {
        out.push_str(" data-file=\"");
        push_escaped(out, nav.as_str());
        out.push('"');
    }
    out.push_str(">\n");

    for element in group.elements() {
        push_element(out, element);
    }

    out.push_str("</g>\n");
}

fn push_element(out: &mut String, element: &Element) {
    match element {
        Element::Path { data, style } => {
            out.push_str("<path d=\"");
            push_path_d(out, data);
            out.push('"');
            push_style(out, style);
            out.push_str("/>\n");
        }
        Element::Rect { rect, rx, style } => {
            out.push_str("<rect x=\"");
            push_num(out, rect.x);
            out.push_str("\" y=\"");
            push_num(out, rect.y);
            out.push_str("\" width=\"");
            push_num(out, rect.width);
            out.push_str("\" height=\"");
            push_num(out, rect.height);
            out.push('"');
            if *rx > 0.0 {
                out.push_str(" rx=\"");
                push_num(out, *rx);
                out.push('"');
            }
            push_style(out, style);
            out.push_str("/>\n");
        }
        Element::Ellipse {
            center,
            rx,
            ry,
            style,
        } => {
            out.push_str("<ellipse cx=\"");
            push_num(out, center.x);
            out.push_str("\" cy=\"");
            push_num(out, center.y);
            out.push_str("\" rx=\"");
            push_num(out, *rx);
            out.push_str("\" ry=\"");
            push_num(out, *ry);
            out.push('"');
            push_style(out, style);
            out.push_str("/>\n");
        }
        Element::Polygon { points, style } => {
            out.push_str("<polygon points=\"");
            for (index, point) in points.iter().enumerate() {
                if index > 0 {
                    out.push(' ');
                }
                push_num(out, point.x);
                out.push(',');
                push_num(out, point.y);
            }
            out.push('"');
            push_style(out, style);
            out.push_str("/>\n");
        }
        Element::Text {
            origin,
            text,
            size,
            bold,
            color,
            anchor,
        } => {
            out.push_str("<text x=\"");
            push_num(out, origin.x);
            out.push_str("\" y=\"");
            push_num(out, origin.y);
            out.push_str("\" font-size=\"");
            push_num(out, *size);
            out.push('"');
            if *bold {
                out.push_str(" font-weight=\"bold\"");
            }
            out.push_str(" fill=\"");
            push_escaped(out, color);
            out.push_str("\" text-anchor=\"");
            out.push_str(match anchor {
                Anchor::Start => "start",
                Anchor::Middle => "middle",
                Anchor::End => "end",
            });
            out.push_str("\">");
            push_escaped(out, text);
            out.push_str("</text>\n");
        }
        Element::Icon { rect, key } => {
            out.push_str("<image x=\"");
            push_num(out, rect.x);
            out.push_str("\" y=\"");
            push_num(out, rect.y);
            out.push_str("\" width=\"");
            push_num(out, rect.width);
            out.push_str("\" height=\"");
            push_num(out, rect.height);
            out.push_str("\" href=\"icons/");
            push_escaped(out, key);
            out.push_str(".svg\"/>\n");
        }
    }
}

fn push_path_d(out: &mut String, data: &PathData) {
    let move_to = |out: &mut String, point: Point| {
        out.push('M');
        push_num(out, point.x);
        out.push(' ');
        push_num(out, point.y);
    };
    match data {
        PathData::Line { from, to } => {
            move_to(out, *from);
            out.push('L');
            push_num(out, to.x);
            out.push(' ');
            push_num(out, to.y);
        }
        PathData::Cubic { from, c1, c2, to } => {
            move_to(out, *from);
            out.push('C');
            for (index, point) in [c1, c2, to].into_iter().enumerate() {
                if index > 0 {
                    out.push(' ');
                }
                push_num(out, point.x);
                out.push(' ');
                push_num(out, point.y);
            }
        }
        PathData::Poly(points) => {
            move_to(out, points[0]);
            for point in &points[1..] {
                out.push('L');
                push_num(out, point.x);
                out.push(' ');
                push_num(out, point.y);
            }
        }
    }
}

/// Fixed attribute order: fill, stroke, stroke-width, stroke-dasharray,
/// stroke-dashoffset, opacity.
fn push_style(out: &mut String, style: &StrokeStyle) {
    out.push_str(" fill=\"");
    match &style.fill {
        Some(fill) => push_escaped(out, fill),
        None => out.push_str("none"),
    }
    out.push('"');

    if let Some(stroke) = &style.stroke {
        out.push_str(" stroke=\"");
        push_escaped(out, stroke);
        out.push_str("\" stroke-width=\"");
        push_num(out, style.stroke_width);
        out.push('"');
    }
    if let Some(dash) = &style.dash {
        out.push_str(" stroke-dasharray=\"");
        push_escaped(out, dash);
        out.push('"');
    }
    if style.dash_offset != 0.0 {
        out.push_str(" stroke-dashoffset=\"");
        push_num(out, style.dash_offset);
        out.push('"');
    }
    if style.opacity != 1.0 {
        out.push_str(" opacity=\"");
        push_num(out, style.opacity);
        out.push('"');
    }
}

/// Coordinates round to two decimals; integral values take the fast `itoa`
/// path and fractional ones drop trailing zeros, so equal inputs always
/// serialize to equal bytes.
fn push_num(out: &mut String, value: f64) {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == rounded.trunc() && rounded.abs() < 1e15 {
        let mut buffer = itoa::Buffer::new();
        out.push_str(buffer.format(rounded as i64));
    } else {
        let start = out.len();
        let _ = write!(out, "{rounded:.2}");
        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.truncate(start);
            let _ = write!(out, "{}", rounded.trunc());
        }
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
