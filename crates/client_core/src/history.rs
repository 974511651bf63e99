use crate::query::QueryUrl;

/// Number of collapsed terms looked at; the newest one is the active search
/// and is dropped, so at most `RECENT_TERMS_WINDOW - 1` terms are returned.
pub const RECENT_TERMS_WINDOW: usize = 6;

pub fn derive_recent_terms<'a, I>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a QueryUrl>,
{
    recent_terms_from(urls.into_iter().map(QueryUrl::term))
}

/// Collapses adjacent repeats only, then returns the terms before the newest
/// one, oldest first.
pub fn recent_terms_from<'a, I>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut collapsed: Vec<&str> = Vec::new();
    for term in terms {
        if collapsed.last() != Some(&term) {
            collapsed.push(term);
        }
    }

    let start = collapsed.len().saturating_sub(RECENT_TERMS_WINDOW);
    let window = &collapsed[start..];
    window[..window.len().saturating_sub(1)]
        .iter()
        .map(|term| term.to_string())
        .collect()
}
