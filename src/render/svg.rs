//! Static SVG rendering of a [`TopologyView`].
//!
//! Layout coordinates are in `[-1, 1]`; they are mapped onto the canvas inside
//! a fixed margin with y pointing up. Each device is drawn with its glyph and a
//! bold name underneath; each link carries its label at the midpoint.

use crate::glyph::Glyph;
use crate::model::{NodeView, TopologyView};
use crate::Result;

use std::collections::BTreeMap;
use std::fmt::Write;

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
        }
    }
}

const MARGIN: f64 = 90.0;
const TITLE_HEIGHT: f64 = 40.0;
const LINE_HEIGHT: f64 = 13.0;

const DEFS: &str = r##"<defs>
  <symbol id="router" viewBox="-20 -20 40 40" width="40" height="40">
    <circle r="18" fill="#1f6fb4" stroke="#0d3c66" stroke-width="2"/>
    <path d="M-10 -4 L10 -4 M6 -8 L10 -4 L6 0 M10 4 L-10 4 M-6 0 L-10 4 L-6 8" stroke="white" stroke-width="2" fill="none"/>
  </symbol>
  <symbol id="switch" viewBox="-24 -15 48 30" width="48" height="30">
    <rect x="-22" y="-13" width="44" height="26" rx="4" fill="#2c9f4b" stroke="#16602b" stroke-width="2"/>
    <path d="M-14 -4 L14 -4 M10 -8 L14 -4 L10 0 M14 4 L-14 4 M-10 0 L-14 4 L-10 8" stroke="white" stroke-width="2" fill="none"/>
  </symbol>
</defs>"##;

pub fn render_svg(view: &TopologyView, opts: &RenderOptions) -> Result<String> {
    let (w, h) = (f64::from(opts.width), f64::from(opts.height));
    let project = |n: &NodeView| -> (f64, f64) {
        let x = MARGIN + (n.x + 1.0) / 2.0 * (w - 2.0 * MARGIN);
        let y = TITLE_HEIGHT + MARGIN + (1.0 - n.y) / 2.0 * (h - TITLE_HEIGHT - 2.0 * MARGIN);
        (x, y)
    };
    let at: BTreeMap<&str, (f64, f64)> = view
        .nodes
        .iter()
        .map(|n| (n.name.as_str(), project(n)))
        .collect();

    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="0 0 {} {}" font-family="Helvetica, Arial, sans-serif">"#,
        opts.width, opts.height, opts.width, opts.height
    )?;
    writeln!(out, "{}", DEFS)?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    writeln!(
        out,
        r#"<text x="{:.1}" y="28" text-anchor="middle" font-size="18">{}</text>"#,
        w / 2.0,
        escape_xml(&view.title)
    )?;

    // 1) Links first so glyphs sit on top.
    writeln!(out, r##"<g class="links" stroke="#555" stroke-width="2" fill="none">"##)?;
    for e in &view.edges {
        let (Some(&(x1, y1)), Some(&(x2, y2))) = (at.get(e.a.as_str()), at.get(e.b.as_str()))
        else {
            continue;
        };
        if e.a == e.b {
            writeln!(out, r#"  <circle cx="{:.1}" cy="{:.1}" r="16"/>"#, x1, y1 - 26.0)?;
        } else {
            writeln!(
                out,
                r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"/>"#,
                x1, y1, x2, y2
            )?;
        }
    }
    writeln!(out, "</g>")?;

    // 2) Link labels at midpoints (self-loops: above the loop).
    writeln!(out, r#"<g class="link-labels" font-size="11" text-anchor="middle">"#)?;
    for e in &view.edges {
        let (Some(&(x1, y1)), Some(&(x2, y2))) = (at.get(e.a.as_str()), at.get(e.b.as_str()))
        else {
            continue;
        };
        let (mx, my) = if e.a == e.b {
            (x1, y1 - 52.0)
        } else {
            ((x1 + x2) / 2.0, (y1 + y2) / 2.0)
        };
        write_label(&mut out, mx, my, &e.label)?;
    }
    writeln!(out, "</g>")?;

    // 3) Device glyphs and names.
    writeln!(out, r#"<g class="devices">"#)?;
    for n in &view.nodes {
        let (x, y) = at[n.name.as_str()];
        let (symbol, half_w, half_h) = match n.category.glyph() {
            Glyph::Router => ("router", 20.0, 20.0),
            Glyph::Switch => ("switch", 24.0, 15.0),
        };
        writeln!(
            out,
            r##"  <use href="#{0}" xlink:href="#{0}" x="{1:.1}" y="{2:.1}"/>"##,
            symbol,
            x - half_w,
            y - half_h
        )?;
        writeln!(
            out,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12" font-weight="bold">{}</text>"#,
            x,
            y + half_h + 14.0,
            escape_xml(&n.name)
        )?;
    }
    writeln!(out, "</g>")?;
    writeln!(out, "</svg>")?;

    Ok(out)
}

/// Multi-line label centred on (x, y) on a white backing box; blank lines are dropped.
fn write_label(out: &mut String, x: f64, y: f64, label: &str) -> std::fmt::Result {
    let lines: Vec<&str> = label.lines().filter(|l| !l.is_empty()).collect();
    if lines.is_empty() {
        return Ok(());
    }

    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f64;
    let box_w = longest * 6.5 + 6.0;
    let box_h = lines.len() as f64 * LINE_HEIGHT + 4.0;
    let top = y - box_h / 2.0;

    writeln!(
        out,
        r#"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="white" fill-opacity="0.85"/>"#,
        x - box_w / 2.0,
        top,
        box_w,
        box_h
    )?;
    write!(out, r#"  <text x="{:.1}" y="{:.1}">"#, x, top + LINE_HEIGHT - 1.0)?;
    for (i, line) in lines.iter().enumerate() {
        let dy = if i == 0 { 0.0 } else { LINE_HEIGHT };
        write!(
            out,
            r#"<tspan x="{:.1}" dy="{:.1}">{}</tspan>"#,
            x,
            dy,
            escape_xml(line)
        )?;
    }
    writeln!(out, "</text>")
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
