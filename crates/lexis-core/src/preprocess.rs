use unicode_normalization::UnicodeNormalization;

/// Longest term, in characters, that is sent to the store
pub const MAX_TERM_CHARS: usize = 30;

/// Bracket pairs whose enclosed segments are dropped from search terms
const BRACKETS: [(char, char); 9] = [
    ('(', ')'),
    ('[', ']'),
    ('{', '}'),
    ('（', '）'),
    ('［', '］'),
    ('【', '】'),
    ('〔', '〕'),
    ('《', '》'),
    ('〈', '〉'),
];

pub trait Preprocessor {
    /// Turn raw user input into a search-ready term. An empty result means "no search".
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC)
        let text: String = text.nfkc().collect();

        let text = strip_brackets(&text).replace(['\n', '\r'], "");

        text.trim()
            .chars()
            .take(MAX_TERM_CHARS)
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    /// Original, lowercase and capitalized variants, deduplicated in that order
    fn expand_case(&self, term: &str) -> Vec<String> {
        let mut variants: Vec<String> = Vec::with_capacity(3);
        for variant in [term.to_string(), term.to_lowercase(), capitalize(term)] {
            if !variant.is_empty() && !variants.contains(&variant) {
                variants.push(variant);
            }
        }
        variants
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TermNormalizer;
impl Preprocessor for TermNormalizer {}

fn capitalize(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn closing_for(c: char) -> Option<char> {
    BRACKETS
        .iter()
        .find(|(open, _)| *open == c)
        .map(|(_, close)| *close)
}

fn is_closing(c: char) -> bool {
    BRACKETS.iter().any(|(_, close)| *close == c)
}

/// Drop every bracketed segment. Nested pairs of the same kind are honoured;
/// unmatched bracket characters are removed on their own.
fn strip_brackets(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if let Some(close) = closing_for(c) {
            match find_close(&chars, i, c, close) {
                Some(end) => {
                    i = end + 1;
                    // one separator survives where a segment was cut out
                    if out.ends_with(char::is_whitespace) {
                        while chars.get(i).is_some_and(|c| c.is_whitespace()) {
                            i += 1;
                        }
                    }
                }
                None => i += 1,
            }
            continue;
        }
        if !is_closing(c) {
            out.push(c);
        }
        i += 1;
    }

    out
}

fn find_close(chars: &[char], start: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for (j, &c) in chars.iter().enumerate().skip(start) {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(j);
            }
        }
    }
    None
}
