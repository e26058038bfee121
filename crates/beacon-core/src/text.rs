//! Shared text sanitization helpers.
//!
//! Editorial content arrives as WordPress-flavored HTML. These helpers
//! reduce it to plain text for card excerpts, and derive a lead paragraph
//! for detail pages when the stored excerpt is truncated.

/// WordPress appends these markers to auto-generated excerpts.
const TRUNCATION_MARKERS: [&str; 2] = ["[&hellip;]", "[...]"];

/// Word budget for a lead paragraph derived from body content.
const EXCERPT_WORD_LIMIT: usize = 300;

/// Removes HTML markup, keeping only text content.
pub fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Decodes the HTML entities WordPress commonly emits.
///
/// Named entities outside the known set are left untouched; numeric
/// entities (`&#8217;` and friends) decode to their code point.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        // Entity names are short; give up quickly on stray ampersands.
        let semi = tail[1..].char_indices().take(10).find(|(_, c)| *c == ';');
        match semi {
            Some((end, _)) => {
                let name = &tail[1..1 + end];
                match decode_entity(name) {
                    Some(ch) => {
                        out.push(ch);
                        rest = &tail[end + 2..];
                    }
                    None => {
                        out.push('&');
                        rest = &tail[1..];
                    }
                }
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "nbsp" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "hellip" => Some('\u{2026}'),
        _ => name.strip_prefix('#').and_then(decode_numeric_entity),
    }
}

fn decode_numeric_entity(num: &str) -> Option<char> {
    let code = match num.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => num.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

/// Reduces excerpt HTML to display-safe plain text.
///
/// Strips markup, decodes entities, drops any angle brackets that survive
/// (decoded `&lt;`/`&gt;` included), and trims surrounding whitespace.
pub fn plain_excerpt(html: &str) -> String {
    let stripped = strip_html(html);
    let decoded = decode_entities(&stripped);
    let cleaned: String = decoded.chars().filter(|c| *c != '<' && *c != '>').collect();
    cleaned.trim().to_string()
}

/// Lead paragraph for a detail page.
///
/// Uses the stored excerpt unless it carries a WordPress truncation
/// marker, in which case the first [`EXCERPT_WORD_LIMIT`] words of the
/// stripped body content are used, with a trailing ellipsis when the body
/// continues past the cut.
pub fn full_excerpt(excerpt: &str, content: &str) -> String {
    let truncated = TRUNCATION_MARKERS.iter().any(|m| excerpt.contains(m));
    if !excerpt.is_empty() && !truncated {
        return excerpt.to_string();
    }

    if !content.is_empty() {
        let text = strip_html(content);
        let words: Vec<&str> = text.split_whitespace().collect();
        let lead = words
            .iter()
            .take(EXCERPT_WORD_LIMIT)
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        if words.len() > EXCERPT_WORD_LIMIT {
            return format!("{}...", lead);
        }
        return lead;
    }

    excerpt.to_string()
}
