// SPDX-FileCopyrightText: 2026 Netsheet Authors
// SPDX-License-Identifier: Apache-2.0

//! Link path, arrowhead and label synthesis.

use smallvec::smallvec;
use smol_str::SmolStr;

use super::geometry::PathData;
use super::{
    text_width, Anchor, Element, StrokeStyle, DEFAULT_LINK_COLOR, DEFAULT_TEXT_COLOR,
    DETAIL_FONT_SIZE, FONT_SIZE, LINE_HEIGHT,
};
use crate::model::{label_lines, Arrow, Link, LinkType, Point, Rect, Settings};

const DEFAULT_LINK_WIDTH: f64 = 2.0;
const DASH_PATTERN: &str = "6 4";
const ARROW_LENGTH: f64 = 10.0;
const ARROW_HALF_WIDTH: f64 = 4.0;
const DETAIL_LINE_HEIGHT: f64 = 12.0;
const LABEL_PADDING: f64 = 3.0;
/// Endpoint details sit near the link ends, off the node boxes.
const FROM_LABEL_T: f64 = 0.15;
const TO_LABEL_T: f64 = 0.85;

pub(crate) fn link_elements(
    link: &Link,
    data: &PathData,
    settings: &Settings,
    background: &str,
) -> Vec<Element> {
    let mut elements = Vec::new();

    let color: SmolStr = link
        .effective_color()
        .or_else(|| settings.link_color.clone())
        .unwrap_or_else(|| SmolStr::new_static(DEFAULT_LINK_COLOR));
    let width = link.style().width.unwrap_or(DEFAULT_LINK_WIDTH);

    match link.effective_type() {
        LinkType::Solid => elements.push(Element::Path {
            data: data.clone(),
            style: StrokeStyle::stroked(color.clone(), width),
        }),
        LinkType::Dashed => elements.push(Element::Path {
            data: data.clone(),
            style: StrokeStyle::stroked(color.clone(), width).with_dash(DASH_PATTERN),
        }),
        LinkType::Thick => elements.push(Element::Path {
            data: data.clone(),
            style: StrokeStyle::stroked(color.clone(), width * 2.0),
        }),
        LinkType::Double => {
            // Outer stroke, a background-colored gap stroke punched through
            // it, then the nominal path on top.
            elements.push(Element::Path {
                data: data.clone(),
                style: StrokeStyle::stroked(color.clone(), width * 3.0),
            });
            elements.push(Element::Path {
                data: data.clone(),
                style: StrokeStyle::stroked(background, width * 2.0),
            });
            elements.push(Element::Path {
                data: data.clone(),
                style: StrokeStyle::stroked(color.clone(), width),
            });
        }
        LinkType::Invisible => elements.push(Element::Path {
            data: data.clone(),
            style: StrokeStyle::stroked(color.clone(), width).with_opacity(0.0),
        }),
    }

    match link.effective_arrow() {
        Arrow::None => {}
        Arrow::Forward => elements.push(arrowhead(data, true, &color)),
        Arrow::Back => elements.push(arrowhead(data, false, &color)),
        Arrow::Both => {
            elements.push(arrowhead(data, true, &color));
            elements.push(arrowhead(data, false, &color));
        }
    }

    let text_color = link
        .style()
        .text_color
        .clone()
        .unwrap_or_else(|| SmolStr::new_static(DEFAULT_TEXT_COLOR));

    if let Some(label) = link.label() {
        let lines = label_lines(label);
        let at = data.point_at(0.5);
        let block = lines.len() as f64 * LINE_HEIGHT;
        let mut baseline = at.y - block / 2.0 + FONT_SIZE * 0.85;
        for line in lines {
            elements.push(Element::Text {
                origin: Point::new(at.x, baseline),
                text: line.text().to_owned(),
                size: FONT_SIZE,
                bold: line.bold(),
                color: text_color.clone(),
                anchor: Anchor::Middle,
            });
            baseline += LINE_HEIGHT;
        }
    }

    endpoint_label(
        &mut elements,
        &link.from().detail_lines(),
        data,
        FROM_LABEL_T,
        false,
        background,
        &text_color,
    );
    endpoint_label(
        &mut elements,
        &link.to().detail_lines(),
        data,
        TO_LABEL_T,
        true,
        background,
        &text_color,
    );

    elements
}

/// Filled triangle at one path end, oriented by the local tangent.
fn arrowhead(data: &PathData, at_end: bool, color: &SmolStr) -> Element {
    let (tip, tangent) = if at_end {
        (data.end(), data.tangent_at(1.0))
    } else {
        let tangent = data.tangent_at(0.0);
        (data.start(), Point::new(-tangent.x, -tangent.y))
    };
    let base = tip.offset(-tangent.x * ARROW_LENGTH, -tangent.y * ARROW_LENGTH);
    let normal = Point::new(-tangent.y, tangent.x);
    Element::Polygon {
        points: smallvec![
            tip,
            base.offset(normal.x * ARROW_HALF_WIDTH, normal.y * ARROW_HALF_WIDTH),
            base.offset(-normal.x * ARROW_HALF_WIDTH, -normal.y * ARROW_HALF_WIDTH),
        ],
        style: StrokeStyle::filled(color.clone()),
    }
}

/// Port/ip/vlan details near one link end. Anchored by the local tangent so
/// text leans away from the node, over an opaque backing rect for legibility
/// where links cross.
fn endpoint_label(
    elements: &mut Vec<Element>,
    lines: &[String],
    data: &PathData,
    t: f64,
    toward_end: bool,
    background: &str,
    text_color: &SmolStr,
) {
    if lines.is_empty() {
        return;
    }

    let at = data.point_at(t);
    let tangent = data.tangent_at(t);
    let heading_right = tangent.x >= 0.0;
    let anchor = if heading_right != toward_end {
        Anchor::Start
    } else {
        Anchor::End
    };

    // Nudge off the path along the normal.
    let normal = Point::new(-tangent.y, tangent.x);
    let origin = at.offset(normal.x * 6.0, normal.y * 6.0);

    let widest = lines
        .iter()
        .map(|line| text_width(line, DETAIL_FONT_SIZE))
        .fold(0.0_f64, f64::max);
    let height = lines.len() as f64 * DETAIL_LINE_HEIGHT + LABEL_PADDING;
    let rect_x = match anchor {
        Anchor::Start => origin.x - LABEL_PADDING,
        _ => origin.x - widest - LABEL_PADDING,
    };
    elements.push(Element::Rect {
        rect: Rect::new(
            rect_x,
            origin.y - DETAIL_FONT_SIZE,
            widest + LABEL_PADDING * 2.0,
            height,
        ),
        rx: 2.0,
        style: StrokeStyle::filled(background).with_opacity(0.9),
    });

    let mut baseline = origin.y;
    for line in lines {
        elements.push(Element::Text {
            origin: Point::new(origin.x, baseline),
            text: line.clone(),
            size: DETAIL_FONT_SIZE,
            bold: false,
            color: text_color.clone(),
            anchor,
        });
        baseline += DETAIL_LINE_HEIGHT;
    }
}

#[cfg(test)]
mod tests {
    use super::link_elements;
    use crate::model::fixtures::nid;
    use crate::model::{
        Arrow, Endpoint, Link, LinkType, Point, Redundancy, Settings,
    };
    use crate::render::geometry::PathData;
    use crate::render::{Anchor, Element};

    fn straight() -> PathData {
        PathData::Line {
            from: Point::new(0.0, 0.0),
            to: Point::new(100.0, 0.0),
        }
    }

    fn plain_link() -> Link {
        Link::new(Endpoint::new(nid("a")), Endpoint::new(nid("b")))
    }

    fn paths(elements: &[Element]) -> Vec<&Element> {
        elements
            .iter()
            .filter(|element| matches!(element, Element::Path { .. }))
            .collect()
    }

    #[test]
    fn plain_link_is_one_solid_path_with_forward_arrow() {
        let elements = link_elements(&plain_link(), &straight(), &Settings::default(), "#ffffff");
        assert_eq!(paths(&elements).len(), 1);
        assert!(elements
            .iter()
            .any(|element| matches!(element, Element::Polygon { .. })));
    }

    #[test]
    fn double_link_renders_three_coincident_paths() {
        let mut link = plain_link();
        link.set_link_type(Some(LinkType::Double));
        let elements = link_elements(&link, &straight(), &Settings::default(), "#ffffff");

        let paths = paths(&elements);
        assert_eq!(paths.len(), 3);
        let widths: Vec<f64> = paths
            .iter()
            .map(|element| element.style().unwrap().stroke_width)
            .collect();
        assert!(widths[0] > widths[1] && widths[1] > widths[2]);
        // The middle stroke punches the gap in the background color.
        assert_eq!(
            paths[1].style().unwrap().stroke.as_deref(),
            Some("#ffffff")
        );
    }

    #[test]
    fn ha_redundancy_defaults_to_double_red_without_arrowheads() {
        let mut link = plain_link();
        link.set_redundancy(Some(Redundancy::Ha));
        let elements = link_elements(&link, &straight(), &Settings::default(), "#ffffff");

        assert_eq!(paths(&elements).len(), 3);
        assert_eq!(
            paths(&elements)[0].style().unwrap().stroke.as_deref(),
            Some("#c0392b")
        );
        assert!(!elements
            .iter()
            .any(|element| matches!(element, Element::Polygon { .. })));
    }

    #[test]
    fn invisible_link_has_zero_opacity() {
        let mut link = plain_link();
        link.set_link_type(Some(LinkType::Invisible));
        link.set_arrow(Some(Arrow::None));
        let elements = link_elements(&link, &straight(), &Settings::default(), "#ffffff");
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].style().unwrap().opacity, 0.0);
    }

    #[test]
    fn center_label_sits_at_the_path_midpoint() {
        let mut link = plain_link();
        link.set_label(Some("10G"));
        let elements = link_elements(&link, &straight(), &Settings::default(), "#ffffff");

        let Some(Element::Text { origin, anchor, .. }) = elements
            .iter()
            .find(|element| matches!(element, Element::Text { .. }))
        else {
            panic!("expected a label");
        };
        assert_eq!(origin.x, 50.0);
        assert_eq!(*anchor, Anchor::Middle);
    }

    #[test]
    fn endpoint_details_get_an_opaque_backing_rect() {
        let link = Link::new(
            Endpoint::new_with(nid("a"), Some("ge-0/0/1".into()), None, Some(10)),
            Endpoint::new(nid("b")),
        );
        let elements = link_elements(&link, &straight(), &Settings::default(), "#fafafa");

        let rects: Vec<&Element> = elements
            .iter()
            .filter(|element| matches!(element, Element::Rect { .. }))
            .collect();
        assert_eq!(rects.len(), 1);
        let style = rects[0].style().unwrap();
        assert_eq!(style.fill.as_deref(), Some("#fafafa"));
        assert!(style.opacity < 1.0);

        let texts: Vec<&Element> = elements
            .iter()
            .filter(|element| matches!(element, Element::Text { .. }))
            .collect();
        assert_eq!(texts.len(), 2);
    }

    #[test]
    fn endpoint_labels_lean_away_from_their_nodes() {
        let link = Link::new(
            Endpoint::new_with(nid("a"), Some("p1".into()), None, None),
            Endpoint::new_with(nid("b"), Some("p2".into()), None, None),
        );
        let elements = link_elements(&link, &straight(), &Settings::default(), "#ffffff");

        let anchors: Vec<Anchor> = elements
            .iter()
            .filter_map(|element| match element {
                Element::Text { anchor, .. } => Some(*anchor),
                _ => None,
            })
            .collect();
        // Rightward path: from-side text extends right, to-side text extends left.
        assert_eq!(anchors, vec![Anchor::Start, Anchor::End]);
    }

    #[test]
    fn settings_link_color_applies_when_nothing_overrides_it() {
        let mut settings = Settings::default();
        settings.link_color = Some("#123456".into());
        let elements = link_elements(&plain_link(), &straight(), &settings, "#ffffff");
        assert_eq!(
            paths(&elements)[0].style().unwrap().stroke.as_deref(),
            Some("#123456")
        );
    }
}
