// SPDX-License-Identifier: MPL-2.0
//! Text extraction from the backend's HTML nutrition report.
//!
//! The client has no HTML engine, so the report is flattened into headings,
//! paragraphs and list items. The reader runs in lenient mode: HTML void
//! elements and mismatched end tags do not stop parsing, and a hard parse
//! error keeps whatever was extracted up to that point.

use quick_xml::events::{BytesText, Event};
use quick_xml::Reader;

/// One displayable unit of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `h1` to `h6`; `h4` and below fold into level 3.
    Heading { level: u8, text: String },
    Paragraph(String),
    ListItem(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDocument {
    title: Option<String>,
    blocks: Vec<Block>,
}

impl ReportDocument {
    /// Extracts the readable content of `html`.
    #[must_use]
    pub fn from_html(html: &str) -> Self {
        let html = strip_raw_text(html);
        let mut reader = Reader::from_str(&html);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        let mut builder = Builder::default();
        loop {
            match reader.read_event() {
                Ok(Event::Start(tag)) => {
                    builder.open(&tag_name(tag.local_name().as_ref()));
                }
                Ok(Event::Empty(tag)) => {
                    builder.empty(&tag_name(tag.local_name().as_ref()));
                }
                Ok(Event::End(tag)) => {
                    builder.close(&tag_name(tag.local_name().as_ref()));
                }
                Ok(Event::Text(text)) => builder.text(&decode_text(&text)),
                Ok(Event::CData(data)) => {
                    builder.text(&String::from_utf8_lossy(&data));
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(
                        position = reader.error_position(),
                        error = %err,
                        "report HTML could not be fully parsed"
                    );
                    break;
                }
            }
        }
        builder.finish()
    }

    /// Content of `<title>`, if present and non-blank.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Elements whose content is never shown.
const SKIPPED: &[&str] = &["script", "style", "noscript", "template", "svg"];

/// Elements that start a new block when opened or closed.
const BLOCK_BREAKS: &[&str] = &[
    "p", "div", "section", "article", "header", "footer", "main", "table", "tr", "ul", "ol",
    "blockquote", "body", "head", "dl", "dt", "dd", "hr",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Pending {
    #[default]
    Paragraph,
    Heading(u8),
    ListItem,
}

#[derive(Debug, Default)]
struct Builder {
    blocks: Vec<Block>,
    buffer: String,
    pending: Pending,
    /// Element whose end tag resumes extraction.
    skipping: Option<String>,
    title: Option<String>,
    in_title: bool,
}

impl Builder {
    fn open(&mut self, name: &str) {
        if self.skipping.is_some() {
            return;
        }
        if SKIPPED.contains(&name) {
            self.skipping = Some(name.to_string());
            return;
        }
        match name {
            "title" => {
                self.flush();
                self.in_title = true;
            }
            "li" => {
                self.flush();
                self.pending = Pending::ListItem;
            }
            "td" | "th" => self.buffer.push(' '),
            "br" | "hr" => self.line_break(),
            _ => {
                if let Some(level) = heading_level(name) {
                    self.flush();
                    self.pending = Pending::Heading(level);
                } else if BLOCK_BREAKS.contains(&name) {
                    self.flush();
                }
            }
        }
    }

    fn empty(&mut self, name: &str) {
        if self.skipping.is_some() {
            return;
        }
        if name == "br" || BLOCK_BREAKS.contains(&name) {
            self.line_break();
        }
    }

    /// Ends the current block; a list item or heading continues as the same kind.
    fn line_break(&mut self) {
        let kind = self.pending;
        self.flush();
        self.pending = kind;
    }

    fn close(&mut self, name: &str) {
        if let Some(skipped) = &self.skipping {
            if skipped == name {
                self.skipping = None;
            }
            return;
        }
        if name == "title" {
            self.in_title = false;
            return;
        }
        if name == "li" || heading_level(name).is_some() || BLOCK_BREAKS.contains(&name) {
            self.flush();
        }
    }

    fn text(&mut self, text: &str) {
        if self.skipping.is_some() {
            return;
        }
        if self.in_title {
            let title = collapse_whitespace(text);
            if !title.is_empty() {
                self.title = Some(title);
            }
            return;
        }
        self.buffer.push_str(text);
    }

    fn flush(&mut self) {
        let text = collapse_whitespace(&self.buffer);
        self.buffer.clear();
        let kind = std::mem::take(&mut self.pending);
        if text.is_empty() {
            return;
        }
        self.blocks.push(match kind {
            Pending::Paragraph => Block::Paragraph(text),
            Pending::Heading(level) => Block::Heading { level, text },
            Pending::ListItem => Block::ListItem(text),
        });
    }

    fn finish(mut self) -> ReportDocument {
        self.flush();
        ReportDocument {
            title: self.title,
            blocks: self.blocks,
        }
    }
}

/// Removes `<script>` and `<style>` elements with their content and escapes
/// stray `<` in the remaining text.
///
/// Their bodies may contain `<` and are not markup, so they are cut out before
/// the reader sees them. An unterminated element runs to the end of input.
fn strip_raw_text(html: &str) -> String {
    let lower = html.to_ascii_lowercase();
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;

    while let Some((start, end)) = next_raw_text_element(&lower, cursor) {
        push_escaping_stray_lt(&mut out, &html[cursor..start]);
        cursor = end;
    }
    push_escaping_stray_lt(&mut out, &html[cursor..]);
    out
}

/// A `<` that cannot open a tag, comment or declaration is text
/// (`sodium < 5 mg`), so it is written as `&lt;`.
fn push_escaping_stray_lt(out: &mut String, segment: &str) {
    let mut rest = segment;
    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let opens_markup = after
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'));
        out.push_str(if opens_markup { "<" } else { "&lt;" });
        rest = after;
    }
    out.push_str(rest);
}

fn next_raw_text_element(lower: &str, from: usize) -> Option<(usize, usize)> {
    let (start, name) = ["<script", "<style"]
        .into_iter()
        .filter_map(|open| {
            let mut search = from;
            // `<styles>` or `<scripted>` are not matches.
            while let Some(pos) = lower[search..].find(open) {
                let at = search + pos;
                let next = lower[at + open.len()..].chars().next();
                if next.is_none_or(|c| c == '>' || c == '/' || c.is_ascii_whitespace()) {
                    return Some((at, &open[1..]));
                }
                search = at + open.len();
            }
            None
        })
        .min_by_key(|(at, _)| *at)?;

    let close = format!("</{name}");
    let end = lower[start..]
        .find(&close)
        .and_then(|rel| {
            let close_at = start + rel;
            lower[close_at..].find('>').map(|gt| close_at + gt + 1)
        })
        .unwrap_or(lower.len());
    Some((start, end))
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

fn heading_level(name: &str) -> Option<u8> {
    let digit = name.strip_prefix('h')?;
    match digit {
        "1" => Some(1),
        "2" => Some(2),
        "3" | "4" | "5" | "6" => Some(3),
        _ => None,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Unescapes XML and common HTML entities one reference at a time.
///
/// Unknown entities and bare `&` are kept as-is without affecting the other
/// references in the same text node.
fn decode_text(text: &BytesText<'_>) -> String {
    decode_entities(&String::from_utf8_lossy(text))
}

/// Longest entity name considered, `&` and `;` excluded.
const MAX_ENTITY_LEN: usize = 32;

fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let resolved = after
            .find(';')
            .filter(|&semi| semi > 0 && semi <= MAX_ENTITY_LEN)
            .and_then(|semi| resolve_reference(&after[..semi]).map(|c| (c, semi)));
        match resolved {
            Some((decoded, semi)) => {
                out.push_str(&decoded);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn resolve_reference(name: &str) -> Option<String> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    html_entity(name).map(str::to_string)
}

fn html_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "copy" => "©",
        "reg" => "®",
        "deg" => "°",
        "micro" => "µ",
        "middot" => "·",
        "bull" => "•",
        "ndash" => "–",
        "mdash" => "—",
        "hellip" => "…",
        "times" => "×",
        "plusmn" => "±",
        "lsquo" => "‘",
        "rsquo" => "’",
        "ldquo" => "“",
        "rdquo" => "”",
        "larr" => "←",
        "rarr" => "→",
        _ => return None,
    })
}
