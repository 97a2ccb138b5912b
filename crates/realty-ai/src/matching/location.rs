use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::config::LocationMatchMode;

/// Strip Vietnamese tone and vowel marks, lower-case, and collapse whitespace.
pub(crate) fn fold_location(value: &str) -> String {
    let stripped: String = value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'đ' | 'Đ' => 'd',
            other => other,
        })
        .collect();

    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub(crate) fn location_matches<'a, I>(location: &str, preferred: I, mode: LocationMatchMode) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    match mode {
        LocationMatchMode::Exact => preferred
            .into_iter()
            .filter(|wanted| !wanted.trim().is_empty())
            .any(|wanted| location.contains(wanted.as_str())),
        LocationMatchMode::Folded => {
            let folded = fold_location(location);
            preferred
                .into_iter()
                .map(|wanted| fold_location(wanted))
                .filter(|wanted| !wanted.is_empty())
                .any(|wanted| folded.contains(&wanted))
        }
    }
}
