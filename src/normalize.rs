use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

// ── Boilerplate patterns ───────────────────────────────────────────
//
// Text extracted from a paginated order repeats a footer and the case
// caption on every page:
//   Page 3 of 7
//   Case No: 2023-012345-CA-01
//   CASE NO.: 2023-012345-CA-01

static RE_PAGE_FOOTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Page \d+ of \d+").unwrap());

// Everything from the label to the end of its line
static RE_CASE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Case No\.?:[^\n]*").unwrap());

/// Strip page footers and case-number labels, then drop blank lines.
///
/// Removal is repeated until nothing matches, so a footer spliced together
/// by an earlier removal is also removed and the result is a fixed point.
pub fn normalize(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let stripped = strip_boilerplate(&current);
        match stripped {
            Cow::Borrowed(_) => break,
            Cow::Owned(s) => current = s,
        }
    }

    current
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_boilerplate(text: &str) -> Cow<'_, str> {
    match RE_PAGE_FOOTER.replace_all(text, "") {
        Cow::Borrowed(_) => RE_CASE_LABEL.replace_all(text, ""),
        Cow::Owned(s) => Cow::Owned(RE_CASE_LABEL.replace_all(&s, "").into_owned()),
    }
}
