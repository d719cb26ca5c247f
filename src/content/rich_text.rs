//! Server-supplied rich text.
//!
//! Backend fields such as news bodies and college descriptions carry HTML
//! whose origin is not trusted. It is never passed through as-is: it is
//! either reduced to an allow-list of formatting markup or escaped entirely.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What to do with HTML received from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RichTextPolicy {
    /// Keep allow-listed formatting markup, drop everything else.
    #[default]
    Sanitize,
    /// Render the markup as literal text.
    Escape,
}

impl RichTextPolicy {
    pub fn apply(self, html: &str) -> String {
        match self {
            RichTextPolicy::Sanitize => sanitize_html(html),
            RichTextPolicy::Escape => escape_html(html),
        }
    }
}

const ALLOWED_TAGS: &[&str] = &[
    "a", "b", "blockquote", "br", "code", "div", "em", "figcaption", "figure", "h1", "h2", "h3",
    "h4", "h5", "h6", "hr", "i", "img", "li", "ol", "p", "pre", "s", "span", "strong", "sub",
    "sup", "table", "tbody", "td", "th", "thead", "tr", "u", "ul",
];

const VOID_TAGS: &[&str] = &["br", "hr", "img"];

/// Elements removed together with everything inside them.
const DROPPED_WITH_CONTENT: &[&str] = &[
    "embed", "iframe", "math", "noscript", "object", "script", "select", "style", "svg",
    "template", "textarea",
];

/// Tags that separate words when markup is flattened to text.
const BLOCK_TAGS: &[&str] = &[
    "blockquote", "br", "div", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li", "p", "td", "th",
    "tr",
];

const URL_ATTRS: &[&str] = &["href", "src"];

fn allowed_attrs(tag: &str) -> &'static [&'static str] {
    match tag {
        "a" => &["href", "title"],
        "img" => &["src", "alt", "title", "width", "height"],
        "td" | "th" => &["colspan", "rowspan"],
        _ => &[],
    }
}

/// Escape every markup-significant character.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Reduce `html` to allow-listed tags and attributes.
///
/// Comments, declarations, unknown tags and their attributes are removed
/// (the text inside unknown tags is kept). Script-like elements are removed
/// with their content. Links and images keep only http(s), mailto and
/// relative URLs. Stray `<`, `>` and bare `&` are escaped; existing
/// character references are preserved.
pub fn sanitize_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    scan(html, |event, out| match event {
        Event::Text(text) => push_escaped(out, text, false),
        Event::Tag(tag) if ALLOWED_TAGS.contains(&tag.name.as_str()) => tag.write_to(out),
        Event::Tag(_) => {}
    }, &mut out);
    out
}

/// Flatten `html` to readable text: tags removed, common character
/// references decoded, whitespace collapsed.
pub fn plain_text(html: &str) -> String {
    let mut flat = String::with_capacity(html.len());
    scan(html, |event, out| match event {
        Event::Text(text) => out.push_str(&decode_entities(text)),
        Event::Tag(tag) if BLOCK_TAGS.contains(&tag.name.as_str()) => out.push(' '),
        Event::Tag(_) => {}
    }, &mut flat);
    flat.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Apply `policy` to every string in `value` that contains markup.
pub fn sanitize_value(value: &mut Value, policy: RichTextPolicy) {
    match value {
        Value::String(s) if s.contains('<') => *s = policy.apply(s),
        Value::Array(items) => items
            .iter_mut()
            .for_each(|item| sanitize_value(item, policy)),
        Value::Object(map) => map
            .values_mut()
            .for_each(|item| sanitize_value(item, policy)),
        _ => {}
    }
}

enum Event<'a> {
    Text(&'a str),
    Tag(Tag),
}

struct Tag {
    name: String,
    closing: bool,
    attrs: Vec<(String, String)>,
    /// Bytes consumed, including `<` and `>`.
    len: usize,
}

/// Walk `html`, reporting text runs and well-formed tags. Comments,
/// declarations and dropped elements never reach `emit`.
fn scan<'a>(html: &'a str, mut emit: impl FnMut(Event<'a>, &mut String), out: &mut String) {
    let mut rest = html;
    while let Some(lt) = rest.find('<') {
        if lt > 0 {
            emit(Event::Text(&rest[..lt]), out);
        }
        rest = &rest[lt..];

        if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.find("-->").map_or("", |end| &after[end + 3..]);
            continue;
        }

        let Some(tag) = Tag::parse(rest) else {
            if rest.starts_with("<!") || rest.starts_with("<?") {
                rest = rest.find('>').map_or("", |end| &rest[end + 1..]);
            } else {
                emit(Event::Text("<"), out);
                rest = &rest[1..];
            }
            continue;
        };

        rest = &rest[tag.len..];
        if DROPPED_WITH_CONTENT.contains(&tag.name.as_str()) {
            if !tag.closing {
                rest = skip_element(rest, &tag.name);
            }
            continue;
        }
        emit(Event::Tag(tag), out);
    }
    if !rest.is_empty() {
        emit(Event::Text(rest), out);
    }
}

impl Tag {
    /// Parse a tag at the start of `s` (which begins with `<`).
    fn parse(s: &str) -> Option<Tag> {
        let b = s.as_bytes();
        let mut i = 1;
        let closing = b.get(i) == Some(&b'/');
        if closing {
            i += 1;
        }
        if !b.get(i)?.is_ascii_alphabetic() {
            return None;
        }
        let name_start = i;
        while i < b.len() && (b[i].is_ascii_alphanumeric() || b[i] == b'-') {
            i += 1;
        }
        let name = s[name_start..i].to_ascii_lowercase();

        let end = find_tag_end(b, i)?;
        let attrs = if closing {
            Vec::new()
        } else {
            parse_attrs(&s[i..end])
        };

        Some(Tag {
            name,
            closing,
            attrs,
            len: end + 1,
        })
    }

    fn write_to(&self, out: &mut String) {
        if self.closing {
            if !VOID_TAGS.contains(&self.name.as_str()) {
                out.push_str("</");
                out.push_str(&self.name);
                out.push('>');
            }
            return;
        }

        out.push('<');
        out.push_str(&self.name);
        let allowed = allowed_attrs(&self.name);
        for (name, value) in &self.attrs {
            if !allowed.contains(&name.as_str()) {
                continue;
            }
            if URL_ATTRS.contains(&name.as_str()) && !is_safe_url(value) {
                continue;
            }
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            push_escaped(out, value, true);
            out.push('"');
        }
        out.push('>');
    }
}

/// Index of the `>` closing a tag, ignoring `>` inside quoted values.
fn find_tag_end(b: &[u8], from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (j, &c) in b.iter().enumerate().skip(from) {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == b'"' || c == b'\'' => quote = Some(c),
            None if c == b'>' => return Some(j),
            None => {}
        }
    }
    None
}

fn parse_attrs(inner: &str) -> Vec<(String, String)> {
    let b = inner.as_bytes();
    let mut attrs = Vec::new();
    let mut i = 0;

    loop {
        while i < b.len() && (b[i].is_ascii_whitespace() || b[i] == b'/') {
            i += 1;
        }
        if i >= b.len() {
            break;
        }

        let start = i;
        while i < b.len() && !b[i].is_ascii_whitespace() && b[i] != b'=' && b[i] != b'/' {
            i += 1;
        }
        let name = inner[start..i].to_ascii_lowercase();

        while i < b.len() && b[i].is_ascii_whitespace() {
            i += 1;
        }

        let mut value = String::new();
        if i < b.len() && b[i] == b'=' {
            i += 1;
            while i < b.len() && b[i].is_ascii_whitespace() {
                i += 1;
            }
            if i < b.len() && (b[i] == b'"' || b[i] == b'\'') {
                let q = b[i];
                i += 1;
                let value_start = i;
                while i < b.len() && b[i] != q {
                    i += 1;
                }
                value = inner[value_start..i].to_string();
                i = (i + 1).min(b.len());
            } else {
                let value_start = i;
                while i < b.len() && !b[i].is_ascii_whitespace() {
                    i += 1;
                }
                value = inner[value_start..i].to_string();
            }
        }

        if !name.is_empty() {
            attrs.push((name, value));
        }
    }

    attrs
}

/// Skip past the end tag of `name`, or to the end of input.
fn skip_element<'a>(rest: &'a str, name: &str) -> &'a str {
    let lower = rest.to_ascii_lowercase();
    let needle = format!("</{}", name);
    let Some(start) = lower.find(&needle) else {
        return "";
    };
    match rest[start..].find('>') {
        Some(end) => &rest[start + end + 1..],
        None => "",
    }
}

fn is_safe_url(value: &str) -> bool {
    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    // Encoded characters could smuggle a scheme past the check below.
    if ["&#", "&colon", "&tab", "&newline"]
        .iter()
        .any(|p| cleaned.contains(p))
    {
        return false;
    }

    match cleaned.find([':', '/', '?', '#']) {
        Some(pos) if cleaned.as_bytes()[pos] == b':' => {
            matches!(&cleaned[..pos], "http" | "https" | "mailto")
        }
        _ => true,
    }
}

/// Length of a character reference at the start of `s`, if it is one.
fn entity_len(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    let mut i = 1;
    if b.get(1) == Some(&b'#') {
        i = 2;
        let hex = matches!(b.get(2), Some(b'x' | b'X'));
        if hex {
            i = 3;
        }
        let start = i;
        while i < b.len() && (if hex { b[i].is_ascii_hexdigit() } else { b[i].is_ascii_digit() }) {
            i += 1;
        }
        if i == start {
            return None;
        }
    } else {
        let start = i;
        while i < b.len() && b[i].is_ascii_alphanumeric() {
            i += 1;
        }
        if i == start || i - start > 32 {
            return None;
        }
    }
    (b.get(i) == Some(&b';')).then_some(i + 1)
}

fn push_escaped(out: &mut String, text: &str, in_attr: bool) {
    let mut i = 0;
    while let Some(c) = text[i..].chars().next() {
        match c {
            '&' => match entity_len(&text[i..]) {
                Some(n) => {
                    out.push_str(&text[i..i + n]);
                    i += n;
                    continue;
                }
                None => out.push_str("&amp;"),
            },
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attr => out.push_str("&quot;"),
            c => out.push(c),
        }
        i += c.len_utf8();
    }
}

fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while let Some(c) = text[i..].chars().next() {
        if c == '&' {
            if let Some(n) = entity_len(&text[i..]) {
                let body = &text[i + 1..i + n - 1];
                if let Some(decoded) = decode_entity(body) {
                    out.push(decoded);
                    i += n;
                    continue;
                }
            }
        }
        out.push(c);
        i += c.len_utf8();
    }
    out
}

fn decode_entity(body: &str) -> Option<char> {
    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let digits = body.strip_prefix('#')?;
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => digits.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
