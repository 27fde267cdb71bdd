//! Content URI parsing: scheme, authority, and decoded path segments.
//!
//! Content references arrive percent-encoded; segments are decoded
//! individually so an encoded `/` inside a segment does not split it.

use std::fmt;
use thiserror::Error;

/// A content reference failed to parse as an absolute URI.
#[derive(Debug, Error)]
#[error("invalid content uri {input:?}: {source}")]
pub struct UriError {
    input: String,
    #[source]
    source: url::ParseError,
}

impl UriError {
    /// The offending input, verbatim.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A parsed, owned content reference.
///
/// `scheme` and `authority` are as the platform reports them; `path` and
/// `segments` are percent-decoded. Empty path segments are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUri {
    raw: String,
    scheme: String,
    authority: String,
    path: String,
    segments: Vec<String>,
}

impl ContentUri {
    /// Parse an absolute URI (`content://…`, `file://…`, …).
    pub fn parse(input: &str) -> Result<Self, UriError> {
        let parsed = url::Url::parse(input).map_err(|source| UriError {
            input: input.to_string(),
            source,
        })?;

        let segments = parsed
            .path_segments()
            .map(|it| {
                it.filter(|s| !s.is_empty())
                    .map(percent_decode)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Ok(ContentUri {
            raw: parsed.as_str().to_string(),
            scheme: parsed.scheme().to_string(),
            authority: parsed.host_str().unwrap_or("").to_string(),
            path: percent_decode(parsed.path()),
            segments,
        })
    }

    /// Build a reference from trusted parts (used for the fixed provider
    /// collection URIs, which never fail to assemble).
    pub(crate) fn from_static(scheme: &str, authority: &str, segments: &[&str]) -> Self {
        let path = format!("/{}", segments.join("/"));
        ContentUri {
            raw: format!("{}://{}{}", scheme, authority, path),
            scheme: scheme.to_string(),
            authority: authority.to_string(),
            path,
            segments: segments.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The reference exactly as parsed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The provider identity, or `""` when the URI carries none.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Decoded path component, with its leading `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Decoded path segments, empty segments dropped.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// New reference with a numeric row id appended as a final segment
    /// (provider table row addressing).
    pub fn with_appended_id(&self, id: i64) -> ContentUri {
        let mut segments = self.segments.clone();
        segments.push(id.to_string());
        ContentUri {
            raw: format!("{}/{}", self.raw.trim_end_matches('/'), id),
            scheme: self.scheme.clone(),
            authority: self.authority.clone(),
            path: format!("{}/{}", self.path.trim_end_matches('/'), id),
            segments,
        }
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Percent-decode a URI component. Malformed escapes pass through verbatim;
/// non-UTF-8 bytes are replaced.
pub(crate) fn percent_decode(input: &str) -> String {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.bytes();
    while let Some(b) = bytes.next() {
        if b == b'%' {
            let h = bytes.next();
            let l = bytes.next();
            match (h.and_then(hex_digit), l.and_then(hex_digit)) {
                (Some(high), Some(low)) => out.push(high << 4 | low),
                _ => {
                    out.push(b'%');
                    out.extend(h);
                    out.extend(l);
                }
            }
        } else {
            out.push(b);
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
