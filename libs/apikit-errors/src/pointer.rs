//! RFC 6901 JSON Pointer escaping and URI-fragment encoding.
//!
//! Pure functions, total over their input domain. Used by the validation
//! adapter to turn issue paths into stable `#/a/b` pointers.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Bytes percent-encoded when strict URI-fragment compliance is requested.
///
/// RFC 3986 sub-delims (`!`, `'`, `(`, `)`, `*`) stay unescaped; `~` must stay
/// raw because RFC 6901 escaping has already been applied.
const FRAGMENT_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// One segment of a JSON Pointer path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl PathSegment {
    /// Render the segment as plain text (no escaping).
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            PathSegment::Key(key) => key.clone(),
            PathSegment::Index(index) => index.to_string(),
        }
    }
}

/// Escape one pointer token per RFC 6901.
///
/// `~` becomes `~0` strictly before `/` becomes `~1`; the reverse order would
/// corrupt tokens containing both (`"~/"` must yield `"~0~1"`, not `"~01"`).
#[must_use]
pub fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// Build a URI-fragment JSON Pointer (`#/a/b`) from a path.
///
/// Returns `"#"` for the empty path. With `uri_encode`, additionally
/// percent-encodes fragment-unsafe bytes; RFC 6901 escaping is always applied
/// first, so `"~%"` yields `"#/~0%25"`.
#[must_use]
pub fn to_fragment(path: &[PathSegment], uri_encode: bool) -> String {
    if path.is_empty() {
        return "#".to_owned();
    }
    let mut out = String::from("#");
    for segment in path {
        out.push('/');
        let escaped = match segment {
            PathSegment::Key(key) => escape_token(key),
            PathSegment::Index(index) => index.to_string(),
        };
        if uri_encode {
            out.push_str(&utf8_percent_encode(&escaped, FRAGMENT_UNSAFE).to_string());
        } else {
            out.push_str(&escaped);
        }
    }
    out
}
