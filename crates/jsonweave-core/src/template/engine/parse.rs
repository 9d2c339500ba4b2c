//! Classification of text templates
//!
//! A string is parsed once into one of three shapes:
//!
//! - whole-value placeholder: starts (after whitespace) with `$` or `$$`
//! - interpolated text: contains at least one `{{ $... }}` bracket
//! - literal text: everything else, with `\$` escapes removed

/// Which value a query is rooted at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `$`: the data of the current render call
    Context,
    /// `$$`: the top-level input of the whole render
    Root,
}

/// One piece of interpolated text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder { anchor: Anchor, source: String },
}

/// A parsed string template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTemplate {
    /// No placeholder; holds the unescaped text
    Literal(String),
    /// The whole string is one placeholder
    ///
    /// `source` is the combined `query => expression` text with a leading
    /// `$$` rewritten to `$`, to be run against the anchored value.
    Query { anchor: Anchor, source: String },
    /// Alternating literal and placeholder segments, starting and ending with a literal
    Interpolated(Vec<Segment>),
}

impl TextTemplate {
    pub fn parse(text: &str) -> Self {
        if let Some((anchor, source)) = split_anchor(text) {
            return TextTemplate::Query { anchor, source };
        }

        let segments = split_brackets(text);
        if segments.len() == 1 {
            TextTemplate::Literal(unescape(text))
        } else {
            TextTemplate::Interpolated(segments)
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, TextTemplate::Literal(_))
    }

    /// Placeholders as written in the template (`$$` restored for root queries)
    pub fn placeholders(&self) -> Vec<String> {
        match self {
            TextTemplate::Literal(_) => Vec::new(),
            TextTemplate::Query { anchor, source } => vec![written(*anchor, source)],
            TextTemplate::Interpolated(segments) => segments
                .iter()
                .filter_map(|segment| match segment {
                    Segment::Placeholder { anchor, source } => Some(written(*anchor, source)),
                    Segment::Literal(_) => None,
                })
                .collect(),
        }
    }
}

fn written(anchor: Anchor, source: &str) -> String {
    match anchor {
        Anchor::Context => source.to_string(),
        Anchor::Root => format!("${}", source),
    }
}

/// Detect a whole-value placeholder and normalize `$$` to `$`
fn split_anchor(text: &str) -> Option<(Anchor, String)> {
    let trimmed = text.trim_start();
    if let Some(rest) = trimmed.strip_prefix("$$") {
        Some((Anchor::Root, format!("${}", rest)))
    } else if trimmed.starts_with('$') {
        Some((Anchor::Context, trimmed.to_string()))
    } else {
        None
    }
}

/// Split text on `{{ $... }}` brackets
///
/// Bracket content runs to the first `}}` and is trimmed. Brackets whose
/// content does not start with `$` stay part of the surrounding literal, as
/// does an unclosed `{{`.
fn split_brackets(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = text;

    while let Some(open) = rest.find("{{") {
        let inner = &rest[open + 2..];
        let Some(close) = inner.find("}}") else {
            break;
        };

        let content = inner[..close].trim();
        if content.starts_with('$') {
            literal.push_str(&rest[..open]);
            segments.push(Segment::Literal(unescape(&std::mem::take(&mut literal))));

            let (anchor, source) = split_anchor(content).unwrap_or((Anchor::Context, content.to_string()));
            segments.push(Segment::Placeholder { anchor, source });
            rest = &inner[close + 2..];
        } else {
            literal.push_str(&rest[..open + 2]);
            rest = inner;
        }
    }

    literal.push_str(rest);
    segments.push(Segment::Literal(unescape(&literal)));
    segments
}

/// Replace `\$` with `$` where it would otherwise start a placeholder
///
/// Those positions are the start of the text and right after `{{`, each
/// allowing leading whitespace.
fn unescape(text: &str) -> String {
    if !text.contains("\\$") {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let trimmed = rest.trim_start();
        out.push_str(&rest[..rest.len() - trimmed.len()]);
        rest = match trimmed.strip_prefix("\\$") {
            Some(after) => {
                out.push('$');
                after
            }
            None => trimmed,
        };

        match rest.find("{{") {
            Some(open) => {
                out.push_str(&rest[..open + 2]);
                rest = &rest[open + 2..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}
