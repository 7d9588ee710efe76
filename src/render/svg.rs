//! Minimal SVG writer: indented elements, attribute formatting, escaping.
//!
//! The document is assembled as a string; numeric attributes are trimmed to
//! two decimals to keep world-sized path data compact.

use std::fmt::Write as _;

/// One attribute: name and already-formatted value.
pub type Attr<'a> = (&'a str, String);

/// Format a pixel coordinate for an attribute value.
pub fn px(v: f64) -> String {
    if v == v.trunc() {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

/// Escape text content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Growing SVG document buffer.
#[derive(Debug)]
pub struct SvgDoc {
    buf: String,
    depth: usize,
}

impl SvgDoc {
    pub fn new() -> Self {
        Self {
            // World path data dominates; start big like any map render.
            buf: String::with_capacity(1 << 20),
            depth: 0,
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str("  ");
        }
    }

    fn write_attrs(&mut self, attrs: &[Attr]) {
        for (name, value) in attrs {
            let _ = write!(self.buf, " {name}=\"{}\"", escape(value));
        }
    }

    /// Open a container element.
    pub fn open(&mut self, tag: &str, attrs: &[Attr]) {
        self.indent();
        let _ = write!(self.buf, "<{tag}");
        self.write_attrs(attrs);
        self.buf.push_str(">\n");
        self.depth += 1;
    }

    /// Close the most recently opened container.
    pub fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        let _ = write!(self.buf, "</{tag}>\n");
    }

    /// A self-closing element.
    pub fn leaf(&mut self, tag: &str, attrs: &[Attr]) {
        self.indent();
        let _ = write!(self.buf, "<{tag}");
        self.write_attrs(attrs);
        self.buf.push_str("/>\n");
    }

    /// An element wrapping escaped text content.
    pub fn text_element(&mut self, tag: &str, attrs: &[Attr], content: &str) {
        self.indent();
        let _ = write!(self.buf, "<{tag}");
        self.write_attrs(attrs);
        let _ = write!(self.buf, ">{}</{tag}>\n", escape(content));
    }

    /// Raw block (for `<style>` content that must not be escaped).
    pub fn raw(&mut self, block: &str) {
        for line in block.lines() {
            self.indent();
            self.buf.push_str(line);
            self.buf.push('\n');
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

impl Default for SvgDoc {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape("Trinidad & Tobago"), "Trinidad &amp; Tobago");
        assert_eq!(escape("<\"'>"), "&lt;&quot;&apos;&gt;");
    }

    #[test]
    fn px_trims_integral_values() {
        assert_eq!(px(10.0), "10");
        assert_eq!(px(10.25), "10.25");
        assert_eq!(px(10.256), "10.26");
    }

    #[test]
    fn nesting_indents_and_closes() {
        let mut doc = SvgDoc::new();
        doc.open("g", &[("class", "outer".into())]);
        doc.leaf("path", &[("d", "M0,0Z".into())]);
        doc.text_element("text", &[], "5 & 6");
        doc.close("g");
        let out = doc.finish();
        assert_eq!(
            out,
            "<g class=\"outer\">\n  <path d=\"M0,0Z\"/>\n  <text>5 &amp; 6</text>\n</g>\n"
        );
    }
}
