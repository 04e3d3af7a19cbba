//! Standalone SVG rendering of the wheel, for `--export-svg`.

use ratatui::style::Color;

use crate::config::Config;
use crate::wheel::layout::Point;
use crate::wheel::prize::label_lines;
use crate::wheel::{PrizeList, WheelLayout};

/// Rim stroke width relative to the radius
const RIM_WIDTH: f64 = 24.0 / 280.0;
/// Hub radius relative to the radius
const HUB_RADIUS: f64 = 35.0 / 280.0;
/// Pointer tip distance from the center relative to the radius
const POINTER_TIP: f64 = 0.79;
/// Pointer half width relative to the radius
const POINTER_HALF_WIDTH: f64 = 30.0 / 280.0;

/// Colors and pointer placement for an exported wheel
#[derive(Debug, Clone)]
pub struct SvgStyle {
    /// Segment fills, reused cyclically
    pub colors: Vec<Color>,
    pub rim: Color,
    pub pointer: Color,
    pub hub: Color,
    pub pointer_angle: f64,
}

impl SvgStyle {
    pub fn from_config(config: &Config) -> Self {
        Self {
            colors: config.wheel.colors.clone(),
            rim: config.theme.rim,
            pointer: config.theme.pointer,
            hub: config.theme.hub,
            pointer_angle: config.wheel.pointer_angle,
        }
    }

    fn fill(&self, index: usize) -> String {
        if self.colors.is_empty() {
            return css_color(self.rim);
        }
        css_color(self.colors[index % self.colors.len()])
    }
}

/// Render `layout` with one labelled sector per prize, turned by `rotation`
/// degrees clockwise.
pub fn render_svg(layout: &WheelLayout, prizes: &PrizeList, style: &SvgStyle, rotation: f64) -> String {
    let vp = layout.viewport();
    let c = layout.center();
    let r = layout.radius();
    let mut out = String::new();

    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = num(vp.width),
        h = num(vp.height),
    ));
    out.push_str(&format!(
        "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
        num(c.x),
        num(c.y),
        num(r),
        css_color(style.rim),
        num(r * RIM_WIDTH),
    ));

    out.push_str(&format!(
        "  <g transform=\"rotate({} {} {})\">\n",
        num(rotation),
        num(c.x),
        num(c.y)
    ));
    for segment in layout.segments() {
        let label = prizes.get(segment.index).unwrap_or_default();
        let (first, rest) = label_lines(label);
        let anchor = segment.label_anchor;

        out.push_str("    <g>\n");
        out.push_str(&format!(
            "      <path d=\"{}\" fill=\"{}\" stroke=\"#ffffff\" stroke-width=\"3\"/>\n",
            sector_path(c, r, segment.arc_start, segment.arc_end, segment.large_arc),
            style.fill(segment.index),
        ));
        out.push_str(&format!(
            "      <text x=\"{x}\" y=\"{y}\" fill=\"white\" font-size=\"12\" font-weight=\"600\" \
             text-anchor=\"middle\" dominant-baseline=\"middle\" transform=\"rotate({a} {x} {y})\">\n",
            x = num(anchor.x),
            y = num(anchor.y),
            a = num(segment.label_rotation),
        ));
        out.push_str(&format!(
            "        <tspan x=\"{}\" dy=\"-0.5em\">{}</tspan>\n",
            num(anchor.x),
            escape(&first)
        ));
        out.push_str(&format!(
            "        <tspan x=\"{}\" dy=\"1em\">{}</tspan>\n",
            num(anchor.x),
            escape(&rest)
        ));
        out.push_str("      </text>\n    </g>\n");
    }
    out.push_str("  </g>\n");

    out.push_str(&format!(
        "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"#ffffff\" stroke-width=\"6\"/>\n",
        num(c.x),
        num(c.y),
        num(r * HUB_RADIUS),
        css_color(style.hub),
    ));

    let tip = c.polar(r * POINTER_TIP, style.pointer_angle);
    let base = c.polar(r, style.pointer_angle);
    let left = base.polar(r * POINTER_HALF_WIDTH, style.pointer_angle + 90.0);
    let right = base.polar(r * POINTER_HALF_WIDTH, style.pointer_angle - 90.0);
    out.push_str(&format!(
        "  <polygon points=\"{},{} {},{} {},{}\" fill=\"{}\"/>\n",
        num(tip.x),
        num(tip.y),
        num(left.x),
        num(left.y),
        num(right.x),
        num(right.y),
        css_color(style.pointer),
    ));

    out.push_str("</svg>\n");
    out
}

/// Closed sector: center, line to the arc start, clockwise arc, close
pub fn sector_path(center: Point, radius: f64, from: Point, to: Point, large_arc: bool) -> String {
    // an arc whose endpoints coincide draws nothing, so a full disc goes
    // through the opposite point in two halves
    if large_arc && (from.x - to.x).hypot(from.y - to.y) < radius * 1e-6 {
        let opposite = Point {
            x: 2.0 * center.x - from.x,
            y: 2.0 * center.y - from.y,
        };
        return format!(
            "M {cx} {cy} L {fx} {fy} A {r} {r} 0 0 1 {ox} {oy} A {r} {r} 0 0 1 {fx} {fy} Z",
            cx = num(center.x),
            cy = num(center.y),
            fx = num(from.x),
            fy = num(from.y),
            ox = num(opposite.x),
            oy = num(opposite.y),
            r = num(radius),
        );
    }
    format!(
        "M {} {} L {} {} A {} {} 0 {} 1 {} {} Z",
        num(center.x),
        num(center.y),
        num(from.x),
        num(from.y),
        num(radius),
        num(radius),
        u8::from(large_arc),
        num(to.x),
        num(to.y),
    )
}

fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    // avoid "-0.00"
    if s == "-0.00" {
        "0.00".to_string()
    } else {
        s
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// CSS color for a terminal color
pub fn css_color(color: Color) -> String {
    let name = match color {
        Color::Rgb(r, g, b) => return format!("#{r:02x}{g:02x}{b:02x}"),
        Color::Black => "black",
        Color::Red => "darkred",
        Color::Green => "green",
        Color::Yellow => "gold",
        Color::Blue => "navy",
        Color::Magenta => "darkmagenta",
        Color::Cyan => "darkcyan",
        Color::Gray => "silver",
        Color::DarkGray => "gray",
        Color::LightRed => "red",
        Color::LightGreen => "lime",
        Color::LightYellow => "yellow",
        Color::LightBlue => "blue",
        Color::LightMagenta => "magenta",
        Color::LightCyan => "cyan",
        Color::White => "white",
        _ => "none",
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::{LayoutParams, Viewport};

    fn reference() -> (WheelLayout, PrizeList, SvgStyle) {
        let config = Config::default();
        let prizes = config.prize_list().unwrap();
        let layout = WheelLayout::new(prizes.len(), LayoutParams::default(), Viewport::square(600.0));
        (layout, prizes, SvgStyle::from_config(&config))
    }

    #[test]
    fn first_sector_path_matches_reference_geometry() {
        let (layout, _, _) = reference();
        let s = &layout.segments()[0];
        assert_eq!(
            sector_path(layout.center(), layout.radius(), s.arc_start, s.arc_end, s.large_arc),
            "M 300.00 300.00 L 580.00 300.00 A 280.00 280.00 0 0 1 497.99 497.99 Z"
        );
    }

    #[test]
    fn document_has_one_sector_per_prize() {
        let (layout, prizes, style) = reference();
        let svg = render_svg(&layout, &prizes, &style, 0.0);
        assert!(svg.starts_with("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<path ").count(), 8);
        assert_eq!(svg.matches("<tspan ").count(), 16);
        assert!(svg.contains("fill=\"#757575\""));
        assert!(svg.contains("stroke=\"#aa182c\""));
        assert!(svg.contains("rotate(22.50 475.91 372.86)"));
        // two-line label split after the third word
        assert!(svg.contains(">Day Pass para</tspan>"));
        assert!(svg.contains(">2 invitados en Phisique</tspan>"));
    }

    #[test]
    fn single_prize_sector_covers_the_disc() {
        let prizes = PrizeList::new(["Grand prize"]).unwrap();
        let layout = WheelLayout::new(1, LayoutParams::default(), Viewport::square(100.0));
        let s = &layout.segments()[0];
        let path = sector_path(layout.center(), layout.radius(), s.arc_start, s.arc_end, s.large_arc);
        assert_eq!(
            path,
            "M 50.00 50.00 L 96.67 50.00 A 46.67 46.67 0 0 1 3.33 50.00 \
             A 46.67 46.67 0 0 1 96.67 50.00 Z"
        );

        let style = SvgStyle::from_config(&Config::default());
        let svg = render_svg(&layout, &prizes, &style, 0.0);
        assert!(svg.contains(&path));
    }

    #[test]
    fn labels_are_escaped() {
        assert_eq!(escape("Tom & Jerry <3"), "Tom &amp; Jerry &lt;3");
        assert_eq!(num(-0.0001), "0.00");
        assert_eq!(css_color(Color::Rgb(0xAA, 0x18, 0x2C)), "#aa182c");
    }
}
