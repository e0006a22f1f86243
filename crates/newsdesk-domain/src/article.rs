//! Article text and the whitespace normalizer that produces it

use std::fmt;

/// Article text after whitespace normalization
///
/// Invariants (established by [`normalize`], the only constructor):
/// - no run of three or more consecutive newlines
/// - no run of multiple whitespace characters within a line
/// - no leading or trailing whitespace
///
/// The normalizer does not enforce a minimum length; an empty article is a
/// legal value. Length checks belong to the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedArticle(String);

impl NormalizedArticle {
    /// Borrow the normalized text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of Unicode scalar values in the text
    ///
    /// This is the length the minimum-size check is measured in, so that
    /// non-ASCII articles are not penalized for their UTF-8 width.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// True when normalization left nothing behind
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the article and return the owned text
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedArticle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedArticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize raw article text for prompting
///
/// Each line has its whitespace runs collapsed to a single space and is
/// trimmed; lines that end up empty are dropped; survivors are joined with
/// `\n`; any run of three or more newlines is reduced to exactly two; the
/// whole result is trimmed.
///
/// Never fails. Empty or whitespace-only input yields an empty article.
///
/// # Examples
///
/// ```
/// use newsdesk_domain::normalize;
///
/// let article = normalize("  Leaders   met\t in Paris.  \n\n\n  Talks  continue. ");
/// assert_eq!(article.as_str(), "Leaders met in Paris.\nTalks continue.");
/// ```
pub fn normalize(raw: &str) -> NormalizedArticle {
    let lines: Vec<String> = raw
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect();

    let mut text = lines.join("\n");
    while text.contains("\n\n\n") {
        text = text.replace("\n\n\n", "\n\n");
    }

    NormalizedArticle(text.trim().to_string())
}
