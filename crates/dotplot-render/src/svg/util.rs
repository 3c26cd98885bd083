// Number and text formatting for SVG attributes.

use std::fmt::Write as _;

pub(super) fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

pub(super) fn fmt_into(out: &mut String, v: f64) {
    // Round-trippable decimal like JS `Number#toString()`, without `-0` or float noise from
    // scale arithmetic.
    if !v.is_finite() {
        out.push('0');
        return;
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == 0.0 {
        v = 0.0;
    }

    let mut buf = ryu_js::Buffer::new();
    out.push_str(buf.format_finite(v));
}

pub(super) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

pub(super) fn escape_xml_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => Some("&amp;"),
            b'<' => Some("&lt;"),
            b'>' => Some("&gt;"),
            b'"' => Some("&quot;"),
            b'\'' => Some("&#39;"),
            _ => None,
        };
        let Some(esc) = esc else {
            continue;
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

pub(super) fn sanitize_svg_id(raw: &str) -> String {
    let raw = raw.trim();
    let mut out = String::with_capacity(raw.len() + 4);
    for ch in raw.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' || ch == '.';
        out.push(if ok { ch } else { '-' });
    }
    if !out.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        out.insert_str(0, "d-");
    }
    while out.contains("--") {
        out = out.replace("--", "-");
    }
    let out = out.trim_matches('-');
    if out.is_empty() || out == "d" {
        return "dotplot".to_string();
    }
    out.to_string()
}

pub(super) fn write_attr(out: &mut String, name: &str, v: f64) {
    let _ = write!(out, r#" {name}=""#);
    fmt_into(out, v);
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_drop_noise_and_negative_zero() {
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(1e-12), "0");
        assert_eq!(fmt(2.0000000001), "2");
        assert_eq!(fmt(12.5), "12.5");
        assert_eq!(fmt(-3.25), "-3.25");
        assert_eq!(fmt(f64::NAN), "0");
    }

    #[test]
    fn xml_special_characters_are_escaped() {
        assert_eq!(escape_xml(r#"a<b & "c">'d'"#), "a&lt;b &amp; &quot;c&quot;&gt;&#39;d&#39;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn svg_ids_are_conservative() {
        assert_eq!(sanitize_svg_id("my chart"), "my-chart");
        assert_eq!(sanitize_svg_id("1st"), "d-1st");
        assert_eq!(sanitize_svg_id("  "), "dotplot");
        assert_eq!(sanitize_svg_id("***"), "dotplot");
    }
}
