//! Pattern compiler core - turns route specifications into matchers.

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

/// Suffix appended to every compiled pattern so that a trailing `#fragment`
/// on the current path never breaks a match. Contributes the two reserved
/// capture groups that are excluded from parameter binding.
const HASH_FRAGMENT_SUFFIX: &str = "((#.+)?)$";

/// A route specification as supplied by the caller.
///
/// The three input forms accepted at registration time:
///
/// - [`Pattern::Literal`] - a path string, optionally carrying `:name`
///   parameter tokens (with parenthesized constraints) and `*` wildcards,
///   e.g. `/user/:id` or `/files/*`
/// - [`Pattern::Alternatives`] - a list of patterns joined into a single
///   alternation group `(p1|p2|...)`; the alternation contents are treated
///   as opaque and yield no named parameters
/// - [`Pattern::Raw`] - a pre-built regular expression used as-is, with
///   zero named parameters; the caller owns its group semantics
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Literal or parameterized path string, e.g. `/user/:id`.
    Literal(String),
    /// Set of alternative patterns, compiled as one alternation group.
    Alternatives(Vec<String>),
    /// Pre-built regular expression, used unchanged.
    Raw(Regex),
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::Literal(s.to_string())
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Pattern::Literal(s)
    }
}

impl From<Vec<&str>> for Pattern {
    fn from(alts: Vec<&str>) -> Self {
        Pattern::Alternatives(alts.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Pattern {
    fn from(alts: Vec<String>) -> Self {
        Pattern::Alternatives(alts)
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Pattern::Raw(re)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(s) => f.write_str(s),
            Pattern::Alternatives(alts) => write!(f, "({})", alts.join("|")),
            Pattern::Raw(re) => f.write_str(re.as_str()),
        }
    }
}

impl Pattern {
    /// Prefix this pattern with the router's base path.
    ///
    /// The prefix is skipped for the `*` catch-all, for patterns that
    /// already start with the base, and for raw regexes (a textual prefix
    /// on an arbitrary expression has no well-defined meaning).
    #[must_use]
    pub fn with_base(self, base: &str) -> Self {
        if base.is_empty() {
            return self;
        }
        let prefix = |s: String| {
            if s == "*" || s.starts_with(base) {
                s
            } else {
                format!("{base}{s}")
            }
        };
        match self {
            Pattern::Literal(s) => Pattern::Literal(prefix(s)),
            Pattern::Alternatives(alts) => {
                Pattern::Alternatives(alts.into_iter().map(prefix).collect())
            }
            raw @ Pattern::Raw(_) => raw,
        }
    }

    /// Compile this pattern into a matcher.
    ///
    /// Fails when the rewritten pattern is not a valid regular expression;
    /// the failure surfaces at registration time and is not recoverable by
    /// the library.
    pub fn compile(&self) -> Result<CompiledRule> {
        match self {
            Pattern::Raw(re) => Ok(CompiledRule {
                param_names: Vec::new(),
                matcher: re.clone(),
            }),
            Pattern::Alternatives(alts) => {
                // Alternation contents are opaque: no token rewriting and
                // no parameter names are extracted from inside the group.
                let body = format!("({})", alts.join("|"));
                build(&body, body.starts_with('#'), Vec::new())
                    .with_context(|| format!("invalid route pattern `{self}`"))
            }
            Pattern::Literal(s) => {
                let (body, param_names) = rewrite_tokens(s);
                build(&body, s.starts_with('#'), param_names)
                    .with_context(|| format!("invalid route pattern `{self}`"))
            }
        }
    }
}

/// A pattern compiled into its matcher form: an ordered list of parameter
/// names and a regular expression with exactly one capture group per name
/// (plus the two reserved trailing hash-fragment groups).
#[derive(Debug, Clone)]
pub struct CompiledRule {
    param_names: Vec<Arc<str>>,
    matcher: Regex,
}

impl CompiledRule {
    /// Ordered parameter names, one per capture group, in left-to-right
    /// order of appearance in the source pattern.
    #[must_use]
    pub fn param_names(&self) -> &[Arc<str>] {
        &self.param_names
    }

    /// The compiled regular expression.
    #[must_use]
    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    /// Whether the given path matches this rule.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}

/// Anchor, append the tolerant hash-fragment suffix, and compile
/// case-insensitively.
///
/// The first-occurrence `))` collapse is applied textually before
/// anchoring. It exists to normalize a rewrite artifact and is knowingly
/// fragile: a constraint body that itself nests groups (e.g. `:id((\d+))`)
/// can be altered by it and fail compilation here.
fn build(body: &str, is_hash_route: bool, param_names: Vec<Arc<str>>) -> Result<CompiledRule> {
    let body = body.replacen("))", ")", 1);

    let mut pattern = String::with_capacity(body.len() + HASH_FRAGMENT_SUFFIX.len() + 1);
    // Hash routes match anywhere in the fragment, so the start anchor is
    // omitted for them.
    if !is_hash_route {
        pattern.push('^');
    }
    pattern.push_str(&body);
    pattern.push_str(HASH_FRAGMENT_SUFFIX);

    let matcher = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .context("pattern does not compile to a regular expression")?;

    Ok(CompiledRule {
        param_names,
        matcher,
    })
}

/// Single left-to-right scan over a literal pattern.
///
/// Rewrites each `:name` token (together with the separator slash in front
/// of it and an optional parenthesized constraint immediately after it)
/// into an optional capture group, each `*` into a greedy catch-all group,
/// and escapes everything else so a plain literal matches only itself.
/// Parameter names are recorded in order of appearance, which keeps them
/// aligned with the capture group numbering.
fn rewrite_tokens(source: &str) -> (String, Vec<Arc<str>>) {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len() + 8);
    let mut param_names: Vec<Arc<str>> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // `/:name` or bare `:name` at any position starts a parameter token.
        let leading_slash = c == '/' && chars.get(i + 1) == Some(&':');
        let token_start = if leading_slash { i + 1 } else { i };
        if chars.get(token_start) == Some(&':') {
            let ident_start = token_start + 1;
            let mut ident_end = ident_start;
            while ident_end < chars.len() && is_ident_char(chars[ident_end]) {
                ident_end += 1;
            }
            if ident_end > ident_start {
                let name: String = chars[ident_start..ident_end].iter().collect();
                param_names.push(Arc::from(name.as_str()));
                if leading_slash {
                    out.push_str("/?");
                }
                let after = scan_constraint(&chars, ident_end);
                match after {
                    Some((constraint, next)) => {
                        // The constraint body becomes the matched text for
                        // this position; it already carries its own parens.
                        out.push_str(&constraint);
                        i = next;
                    }
                    None => {
                        out.push_str("([^/]+)");
                        i = ident_end;
                    }
                }
                // Every parameter segment is optional; absent trailing
                // segments still match and bind the parameter to nothing.
                out.push('?');
                continue;
            }
        }

        if c == '*' {
            out.push_str("(.*)");
            param_names.push(Arc::from("*"));
            i += 1;
            continue;
        }

        if is_meta_char(c) {
            out.push('\\');
        }
        out.push(c);
        i += 1;
    }

    (out, param_names)
}

/// Scan a parenthesized constraint starting at `start`, counting nesting.
///
/// Returns the constraint text (outer parens included) and the index just
/// past it. An unterminated constraint is passed through as-is and left
/// for the regex compiler to reject.
fn scan_constraint(chars: &[char], start: usize) -> Option<(String, usize)> {
    if chars.get(start) != Some(&'(') {
        return None;
    }
    let mut depth = 0usize;
    let mut end = start;
    for (offset, &c) in chars[start..].iter().enumerate() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    end = start + offset + 1;
                    break;
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        end = chars.len();
    }
    Some((chars[start..end].iter().collect(), end))
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Characters with regex meaning that must be escaped in literal spans.
/// `*` is not listed because it is rewritten into a capture group first,
/// and `#` and `/` are plain characters to the regex engine.
fn is_meta_char(c: char) -> bool {
    matches!(
        c,
        '\\' | '.' | '+' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
    )
}
