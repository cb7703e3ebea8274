// SPDX-License-Identifier: MIT OR Apache-2.0

//! SVG badge rendering.
//!
//! The renderer is a pure function from `(view count, style)` to a complete
//! SVG document. The badge reads as a vertical digital counter: an icon
//! header on top and one colored row per decimal digit below it. Rounding on
//! a single edge is produced with the layered-rectangle trick, since SVG
//! rectangles have no per-corner radius control: a fully rounded rectangle is
//! overdrawn by a square one that cancels the unwanted corners.
//!
//! Both style variants are deterministic. The animated variant moves only
//! through CSS animation timing; identical inputs always produce
//! byte-identical markup.

use std::{
    fmt::Write as _,
    fs::File,
    io::{BufWriter, Write},
    path::Path
};

use crate::{
    error::{self, Error},
    layout::{
        BadgeLayout, CORNER_RADIUS, DIGIT_HEIGHT, HEADER_HEIGHT, TEXT_CENTER_X, WIDTH,
        particle_positions
    },
    style::BadgeStyle
};

/// Default filename of the badge artifact.
pub const BADGE_FILE: &str = "badge.svg";

const HEADER_BG: &str = "#1f2937";
const DIGIT_BG: &str = "#3b82f6";
const TEXT_COLOR: &str = "#ffffff";
const FONT_FAMILY: &str = "'Segoe UI', Ubuntu, Arial, sans-serif";

const EYE_ICON_OUTLINE: &str = "M2.062 12.348a1 1 0 0 1 0-.696 10.75 10.75 0 0 1 19.876 0 1 1 0 0 1 0 .696 10.75 10.75 0 0 1-19.876 0";

/// Renders the badge document for the provided view count and style.
///
/// The function is total over its domain: every `u64` renders, zero included
/// (a single `"0"` row), and no internal state survives the call.
///
/// # Examples
///
/// ```
/// use views_badge::{BadgeStyle, render_badge};
///
/// let svg = render_badge(42, BadgeStyle::Classic);
/// assert!(svg.starts_with("<?xml"));
/// assert!(svg.contains("GitHub Profile Views: 42"));
/// ```
pub fn render_badge(views: u64, style: BadgeStyle) -> String {
    let layout = BadgeLayout::for_views(views);

    match style {
        BadgeStyle::Classic => render_classic(views, &layout),
        BadgeStyle::Animated => render_animated(&layout)
    }
}

/// Renders the badge and writes it to `path` with buffered I/O.
///
/// # Errors
///
/// Returns [`Error::BadgeIo`] when the file cannot be created or written.
pub fn write_badge(path: &Path, views: u64, style: BadgeStyle) -> Result<(), Error> {
    let contents = render_badge(views, style);
    let file = File::create(path).map_err(|source| error::badge_io_error(path, source))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents.as_bytes())
        .map_err(|source| error::badge_io_error(path, source))?;
    writer
        .flush()
        .map_err(|source| error::badge_io_error(path, source))
}

fn render_classic(views: u64, layout: &BadgeLayout) -> String {
    let mut buffer = String::with_capacity(1024);
    let total_height = layout.total_height();

    let _ = writeln!(buffer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    let _ = writeln!(
        buffer,
        "<svg width=\"{WIDTH}\" height=\"{total_height}\" xmlns=\"http://www.w3.org/2000/svg\" role=\"img\" aria-label=\"GitHub Profile Views\">"
    );
    let _ = writeln!(buffer, "  <title>GitHub Profile Views: {views}</title>");

    // Header: rounded rectangle with the bottom rounding squared off.
    let _ = writeln!(buffer, "  <!-- Header with eye icon (rounded top) -->");
    let _ = writeln!(
        buffer,
        "  <rect x=\"0\" y=\"0\" width=\"{WIDTH}\" height=\"{HEADER_HEIGHT}\" fill=\"{HEADER_BG}\" rx=\"{CORNER_RADIUS}\" ry=\"{CORNER_RADIUS}\"/>"
    );
    let _ = writeln!(
        buffer,
        "  <rect x=\"0\" y=\"{CORNER_RADIUS}\" width=\"{WIDTH}\" height=\"{}\" fill=\"{HEADER_BG}\"/>",
        HEADER_HEIGHT - CORNER_RADIUS
    );

    buffer.push_str("  <!-- Eye icon -->\n");
    buffer.push_str("  <g transform=\"translate(4, 4)\">\n");
    buffer.push_str("    <svg width=\"32\" height=\"32\" viewBox=\"0 0 24 24\">\n");
    let _ = writeln!(
        buffer,
        "      <path d=\"{EYE_ICON_OUTLINE}\" stroke=\"white\" stroke-width=\"2\" stroke-linecap=\"round\" stroke-linejoin=\"round\" fill=\"none\"/>"
    );
    buffer.push_str(
        "      <circle cx=\"12\" cy=\"12\" r=\"3\" stroke=\"white\" stroke-width=\"2\" fill=\"none\"/>\n"
    );
    buffer.push_str("    </svg>\n  </g>\n");

    let last_index = layout.digit_count() - 1;
    for (index, digit) in layout.digits().chars().enumerate() {
        let row_top = layout.row_top(index);

        if index == last_index {
            // Bottom row: round all corners, then cover the top band so only
            // the bottom rounding survives.
            let _ = writeln!(buffer, "  <!-- Digit {digit} (last) -->");
            let _ = writeln!(
                buffer,
                "  <rect x=\"0\" y=\"{row_top}\" width=\"{WIDTH}\" height=\"{DIGIT_HEIGHT}\" fill=\"{DIGIT_BG}\" rx=\"{CORNER_RADIUS}\" ry=\"{CORNER_RADIUS}\"/>"
            );
            let _ = writeln!(
                buffer,
                "  <rect x=\"0\" y=\"{row_top}\" width=\"{WIDTH}\" height=\"{}\" fill=\"{DIGIT_BG}\"/>",
                DIGIT_HEIGHT - CORNER_RADIUS
            );
        } else {
            let _ = writeln!(buffer, "  <!-- Digit {digit} -->");
            let _ = writeln!(
                buffer,
                "  <rect x=\"0\" y=\"{row_top}\" width=\"{WIDTH}\" height=\"{DIGIT_HEIGHT}\" fill=\"{DIGIT_BG}\"/>"
            );
        }

        let _ = writeln!(
            buffer,
            "  <text x=\"{TEXT_CENTER_X}\" y=\"{}\" font-family=\"{FONT_FAMILY}\" font-size=\"18\" font-weight=\"bold\" fill=\"{TEXT_COLOR}\" text-anchor=\"middle\">{digit}</text>",
            layout.text_baseline(index)
        );
    }

    buffer.push_str("</svg>\n");
    buffer
}

fn render_animated(layout: &BadgeLayout) -> String {
    let mut buffer = String::with_capacity(8192);
    let total_height = layout.total_height();

    let _ = writeln!(
        buffer,
        "<svg width=\"{WIDTH}\" height=\"{total_height}\" xmlns=\"http://www.w3.org/2000/svg\" role=\"img\" aria-label=\"GitHub Profile Views\">"
    );

    write_animated_styles(&mut buffer, total_height);
    buffer.push_str(ANIMATED_DEFS);
    buffer.push_str(ANIMATED_HEADER_SHAPES);
    buffer.push_str(ANIMATED_EYE_ICON);

    // Faint ghost glyphs pulsing behind the main digits.
    buffer.push_str("    <!-- Background digit shapes -->\n    <g class=\"digit-backgrounds\">\n");
    for (index, digit) in layout.digits().chars().enumerate() {
        let _ = writeln!(
            buffer,
            "        <text x=\"{TEXT_CENTER_X}\" y=\"{}\" font-size=\"24\" text-anchor=\"middle\" class=\"bg-digit\">{digit}</text>",
            layout.text_baseline(index)
        );
    }
    buffer.push_str("    </g>\n");

    buffer.push_str("    <!-- Floating particles -->\n    <g>\n");
    for particle in particle_positions(total_height) {
        let _ = writeln!(
            buffer,
            "        <circle class=\"particle\" cx=\"{}\" cy=\"{}\" r=\"1.5\" fill=\"#ffffff\" opacity=\"0.6\" style=\"animation-delay: {}s\"/>",
            particle.x, particle.y, particle.delay_secs
        );
    }
    buffer.push_str("    </g>\n");

    buffer.push_str("    <!-- Main digit display -->\n    <g class=\"digit-section\">\n");
    for (index, digit) in layout.digits().chars().enumerate() {
        let _ = writeln!(
            buffer,
            "        <text x=\"{TEXT_CENTER_X}\" y=\"{}\" font-family=\"{FONT_FAMILY}\" font-size=\"18\" font-weight=\"bold\" text-anchor=\"middle\" class=\"digit-glow\">{digit}</text>",
            layout.text_baseline(index)
        );
    }
    buffer.push_str("    </g>\n");

    let _ = writeln!(
        buffer,
        "    <!-- Animated wave overlay -->\n    <path class=\"wave\" d=\"M20,0 Q10,50 20,100 T20,{total_height}\" stroke=\"url(#shapeGradient)\" stroke-width=\"1.5\" fill=\"none\" opacity=\"0.4\"/>"
    );

    buffer.push_str("</svg>");
    buffer
}

fn write_animated_styles(buffer: &mut String, total_height: u32) {
    buffer.push_str("    <style>\n");
    buffer.push_str(CSS_GRADIENT_AND_SHAPES);
    let _ = write!(
        buffer,
        "        @keyframes float-particle {{
            0% {{
                transform: translateY({total_height}px) translateX(0);
                opacity: 0;
            }}
            10% {{
                opacity: 0.6;
            }}
            90% {{
                opacity: 0.6;
            }}
            100% {{
                transform: translateY(-10px) translateX(10px);
                opacity: 0;
            }}
        }}
        .wave {{
            animation: wave-motion 6s ease-in-out infinite;
        }}
        @keyframes wave-motion {{
            0%, 100% {{
                d: path(\"M20,0 Q10,50 20,100 T20,{total_height}\");
            }}
            50% {{
                d: path(\"M20,0 Q30,50 20,100 T20,{total_height}\");
            }}
        }}
"
    );
    buffer.push_str(CSS_DIGITS_AND_ICON);
    buffer.push_str("    </style>\n");
}

const CSS_GRADIENT_AND_SHAPES: &str = r#"        .gradient-shift {
            animation: gradientShift 4s ease-in-out infinite;
        }
        @keyframes gradientShift {
            0% { stop-color: #ff0055; }
            25% { stop-color: #ff0080; }
            50% { stop-color: #d400ff; }
            75% { stop-color: #9b00ff; }
            100% { stop-color: #ff0055; }
        }
        .bg-shape {
            opacity: 0.3;
            animation: morph 8s ease-in-out infinite;
        }
        .bg-shape:nth-child(1) { animation-delay: 0s; }
        .bg-shape:nth-child(2) { animation-delay: 1s; }
        .bg-shape:nth-child(3) { animation-delay: 2s; }
        @keyframes morph {
            0%, 100% {
                transform: rotate(0deg) scale(1);
                opacity: 0.3;
            }
            25% {
                transform: rotate(90deg) scale(1.2);
                opacity: 0.5;
            }
            50% {
                transform: rotate(180deg) scale(0.8);
                opacity: 0.2;
            }
            75% {
                transform: rotate(270deg) scale(1.1);
                opacity: 0.4;
            }
        }
        .particle {
            animation: float-particle 10s linear infinite;
        }
"#;

const CSS_DIGITS_AND_ICON: &str = r#"        .digit-glow {
            fill: url(#gradient);
            filter: url(#glow);
            animation: float 6s ease-in-out infinite;
        }
        .digit-glow:nth-child(1) { animation-delay: 0.1s; }
        .digit-glow:nth-child(2) { animation-delay: 0.2s; }
        .digit-glow:nth-child(3) { animation-delay: 0.3s; }
        .digit-glow:nth-child(4) { animation-delay: 0.4s; }
        .digit-glow:nth-child(5) { animation-delay: 0.5s; }
        .digit-glow:nth-child(6) { animation-delay: 0.6s; }
        .digit-glow:nth-child(7) { animation-delay: 0.7s; }
        .digit-glow:nth-child(8) { animation-delay: 0.8s; }
        .digit-glow:nth-child(9) { animation-delay: 0.9s; }
        .digit-glow:nth-child(10) { animation-delay: 1.0s; }
        .eye-icon {
            stroke: url(#gradient);
            animation: float 6s ease-in-out infinite, blink 4s ease-in-out infinite;
            transform-origin: center;
        }
        @keyframes blink {
            0%, 45%, 55%, 100% {
                transform: scaleY(1);
            }
            50% {
                transform: scaleY(0.1);
            }
        }
        @keyframes float {
            0%, 100% { transform: translateY(0px) scale(1); }
            33% { transform: translateY(-3px) scale(1.02); }
            66% { transform: translateY(2px) scale(0.98); }
        }
        .bg-digit {
            fill: url(#bgGradient);
            opacity: 0.2;
            animation: pulse 4s ease-in-out infinite;
            font-family: 'Segoe UI', Ubuntu, Arial, sans-serif;
            font-weight: bold;
        }
        .bg-digit:nth-child(1) { animation-delay: 0s; }
        .bg-digit:nth-child(2) { animation-delay: 0.5s; }
        .bg-digit:nth-child(3) { animation-delay: 1s; }
        .bg-digit:nth-child(4) { animation-delay: 1.5s; }
        .bg-digit:nth-child(5) { animation-delay: 2s; }
        .bg-digit:nth-child(6) { animation-delay: 2.5s; }
        .bg-digit:nth-child(7) { animation-delay: 3s; }
        .bg-digit:nth-child(8) { animation-delay: 3.5s; }
        .bg-digit:nth-child(9) { animation-delay: 4s; }
        .bg-digit:nth-child(10) { animation-delay: 4.5s; }
        @keyframes pulse {
            0%, 100% { transform: scale(1); opacity: 0.2; }
            50% { transform: scale(1.4); opacity: 0.05; }
        }
"#;

const ANIMATED_DEFS: &str = r##"    <defs>
        <linearGradient id="gradient" x1="0%" y1="0%" x2="0%" y2="100%">
            <stop offset="0%" class="gradient-shift" stop-color="#ff0055"/>
            <stop offset="50%" class="gradient-shift" stop-color="#ff0080"/>
            <stop offset="100%" class="gradient-shift" stop-color="#d400ff"/>
        </linearGradient>
        <linearGradient id="bgGradient" x1="0%" y1="0%" x2="100%" y2="100%">
            <stop offset="0%" stop-color="#ff0080" stop-opacity="0.5"/>
            <stop offset="50%" stop-color="#d400ff" stop-opacity="0.3"/>
            <stop offset="100%" stop-color="#000000" stop-opacity="0"/>
        </linearGradient>
        <linearGradient id="shapeGradient" x1="0%" y1="0%" x2="100%" y2="100%">
            <stop offset="0%" stop-color="#ff0080" opacity="0.5"/>
            <stop offset="100%" stop-color="#d400ff" opacity="0.2"/>
        </linearGradient>
        <filter id="glow" x="-50%" y="-50%" width="200%" height="200%">
            <feGaussianBlur in="SourceGraphic" stdDeviation="3" result="blur">
                <animate attributeName="stdDeviation" values="3;6;3" dur="4s" repeatCount="indefinite"/>
            </feGaussianBlur>
            <feColorMatrix in="blur" mode="matrix" values="0.2 0 0 0 0  0 0.1 0 0 0  0 0 0.3 0 0  0 0 0 18 -3" result="glow"/>
            <feBlend in="SourceGraphic" in2="glow" mode="screen"/>
        </filter>
    </defs>
"##;

const ANIMATED_HEADER_SHAPES: &str = r#"    <!-- Animated background elements for header -->
    <g>
        <circle class="bg-shape" cx="10" cy="20" r="6" fill="url(#shapeGradient)"/>
        <circle class="bg-shape" cx="30" cy="20" r="5" fill="url(#shapeGradient)"/>
        <rect class="bg-shape" x="15" y="8" width="8" height="8" rx="2" fill="url(#shapeGradient)" transform="rotate(45 19 12)"/>
    </g>
"#;

const ANIMATED_EYE_ICON: &str = r#"    <!-- Eye icon -->
    <g transform="translate(4, 4)">
        <svg width="32" height="32" viewBox="0 0 24 24">
            <path class="eye-icon" d="M2.062 12.348a1 1 0 0 1 0-.696 10.75 10.75 0 0 1 19.876 0 1 1 0 0 1 0 .696 10.75 10.75 0 0 1-19.876 0" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" fill="none" filter="url(#glow)"/>
            <circle class="eye-icon" cx="12" cy="12" r="3" stroke-width="2" fill="none" filter="url(#glow)"/>
        </svg>
    </g>
"#;

#[cfg(test)]
mod tests {
    use std::fs;

    use proptest::prelude::*;
    use tempfile::tempdir;

    use super::*;

    fn digit_rows(svg: &str, class: Option<&str>) -> Vec<String> {
        let document = roxmltree::Document::parse(svg).expect("badge should be well-formed XML");
        document
            .descendants()
            .filter(|node| node.has_tag_name("text"))
            .filter(|node| match class {
                Some(class) => node.attribute("class") == Some(class),
                None => node.attribute("class").is_none()
            })
            .filter_map(|node| node.text().map(str::to_owned))
            .collect()
    }

    #[test]
    fn classic_rendering_is_deterministic() {
        let first = render_badge(8_675_309, BadgeStyle::Classic);
        let second = render_badge(8_675_309, BadgeStyle::Classic);
        assert_eq!(first, second);
    }

    #[test]
    fn animated_rendering_is_deterministic() {
        let first = render_badge(31_337, BadgeStyle::Animated);
        let second = render_badge(31_337, BadgeStyle::Animated);
        assert_eq!(first, second);
    }

    #[test]
    fn classic_single_digit_document_shape() {
        let svg = render_badge(7, BadgeStyle::Classic);
        let document = roxmltree::Document::parse(&svg).expect("well-formed XML");
        let root = document.root_element();

        assert_eq!(root.attribute("width"), Some("40"));
        assert_eq!(root.attribute("height"), Some("72"));

        let digits: Vec<String> = document
            .descendants()
            .filter(|node| node.has_tag_name("text"))
            .filter_map(|node| node.text().map(str::to_owned))
            .collect();
        assert_eq!(digits, ["7"]);
    }

    #[test]
    fn classic_title_carries_view_count() {
        let svg = render_badge(12345, BadgeStyle::Classic);
        assert!(svg.contains("<title>GitHub Profile Views: 12345</title>"));
    }

    #[test]
    fn classic_digit_rows_reconstruct_count_in_order() {
        let svg = render_badge(305, BadgeStyle::Classic);
        let digits = digit_rows(&svg, None);
        assert_eq!(digits, ["3", "0", "5"]);
    }

    #[test]
    fn classic_bottom_row_uses_rounded_overdraw() {
        let svg = render_badge(42, BadgeStyle::Classic);
        let document = roxmltree::Document::parse(&svg).expect("well-formed XML");

        // Header pair plus one plain row plus the two-rect bottom row.
        let rects: Vec<_> = document
            .descendants()
            .filter(|node| node.has_tag_name("rect"))
            .collect();
        assert_eq!(rects.len(), 5);

        let rounded_bottom = rects
            .iter()
            .find(|rect| rect.attribute("y") == Some("72") && rect.attribute("rx") == Some("4"))
            .expect("bottom row should start with a rounded rect");
        assert_eq!(rounded_bottom.attribute("height"), Some("32"));

        let cover = rects
            .iter()
            .find(|rect| rect.attribute("y") == Some("72") && rect.attribute("rx").is_none())
            .expect("bottom row should be overdrawn by a square rect");
        assert_eq!(cover.attribute("height"), Some("28"));
    }

    #[test]
    fn classic_middle_rows_have_no_rounding() {
        let svg = render_badge(100, BadgeStyle::Classic);
        let document = roxmltree::Document::parse(&svg).expect("well-formed XML");

        for y in ["40", "72"] {
            let row = document
                .descendants()
                .filter(|node| node.has_tag_name("rect"))
                .find(|rect| rect.attribute("y") == Some(y) && rect.attribute("fill") == Some(DIGIT_BG))
                .expect("digit row background");
            assert_eq!(row.attribute("rx"), None, "row at y={y} must be square");
        }
    }

    #[test]
    fn animated_emits_ghost_and_main_glyphs_in_order() {
        let svg = render_badge(123, BadgeStyle::Animated);

        let ghosts = digit_rows(&svg, Some("bg-digit"));
        assert_eq!(ghosts, ["1", "2", "3"]);

        let main = digit_rows(&svg, Some("digit-glow"));
        assert_eq!(main, ["1", "2", "3"]);
    }

    #[test]
    fn animated_contains_animation_machinery() {
        let svg = render_badge(9999, BadgeStyle::Animated);
        assert!(svg.contains("@keyframes gradientShift"));
        assert!(svg.contains("@keyframes float-particle"));
        assert!(svg.contains("<feGaussianBlur"));
        assert!(svg.contains("class=\"wave\""));
        assert!(svg.contains("T20,168"));
    }

    #[test]
    fn animated_particle_count_matches_layout() {
        let layout = BadgeLayout::for_views(1_000_000);
        let expected = particle_positions(layout.total_height()).len();

        let svg = render_badge(1_000_000, BadgeStyle::Animated);
        let document = roxmltree::Document::parse(&svg).expect("well-formed XML");
        let rendered = document
            .descendants()
            .filter(|node| node.has_tag_name("circle"))
            .filter(|node| node.attribute("class") == Some("particle"))
            .count();
        assert_eq!(rendered, expected);
    }

    #[test]
    fn animated_has_no_xml_declaration_or_title() {
        let svg = render_badge(5, BadgeStyle::Animated);
        assert!(svg.starts_with("<svg "));
        assert!(!svg.contains("<title>"));
    }

    #[test]
    fn height_attribute_scales_with_digit_count() {
        for style in [BadgeStyle::Classic, BadgeStyle::Animated] {
            for (views, height) in [(0u64, "72"), (42, "104"), (1000, "168")] {
                let svg = render_badge(views, style);
                let document = roxmltree::Document::parse(&svg).expect("well-formed XML");
                assert_eq!(document.root_element().attribute("height"), Some(height));
            }
        }
    }

    #[test]
    fn write_badge_creates_file() {
        let directory = tempdir().expect("failed to create temp dir");
        let path = directory.path().join("badge.svg");

        write_badge(&path, 77, BadgeStyle::Classic).expect("write should succeed");

        let contents = fs::read_to_string(&path).expect("badge should be readable");
        assert_eq!(contents, render_badge(77, BadgeStyle::Classic));
    }

    #[test]
    fn write_badge_propagates_io_errors() {
        let directory = tempdir().expect("failed to create temp dir");
        let path = directory.path().join("missing").join("badge.svg");

        let error = write_badge(&path, 1, BadgeStyle::Animated).expect_err("expected io failure");
        match error {
            Error::BadgeIo {
                path: stored, ..
            } => assert_eq!(stored, path),
            other => panic!("unexpected error variant: {other:?}")
        }
    }

    proptest! {
        #[test]
        fn row_count_equals_decimal_digit_count(views in 0u64..=u64::MAX) {
            let expected = views.to_string().len();
            let svg = render_badge(views, BadgeStyle::Classic);
            prop_assert_eq!(digit_rows(&svg, None).len(), expected);
        }

        #[test]
        fn rows_reconstruct_decimal_string(views in 0u64..=u64::MAX) {
            let svg = render_badge(views, BadgeStyle::Classic);
            let reconstructed: String = digit_rows(&svg, None).concat();
            prop_assert_eq!(reconstructed, views.to_string());
        }

        #[test]
        fn ghost_glyphs_mirror_main_glyphs(views in 0u64..10_000_000u64) {
            let svg = render_badge(views, BadgeStyle::Animated);
            let ghosts = digit_rows(&svg, Some("bg-digit"));
            let main = digit_rows(&svg, Some("digit-glow"));
            prop_assert_eq!(ghosts, main);
        }

        #[test]
        fn rendering_is_pure(views in 0u64..=u64::MAX) {
            prop_assert_eq!(
                render_badge(views, BadgeStyle::Animated),
                render_badge(views, BadgeStyle::Animated)
            );
        }
    }
}
