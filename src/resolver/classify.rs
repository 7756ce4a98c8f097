//! Query shape classification.

/// What kind of query the user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind<'a> {
    /// Nothing but whitespace
    Empty,
    /// `<district> <number>`, e.g. `nitra 143/12`
    LocatedNumber { location: &'a str, number: &'a str },
    /// A lone parcel or house number with no district
    BareNumber(&'a str),
    /// Anything else, handled by the general search only
    FreeText,
}

/// A parcel or house identifier: ASCII digits and slashes, at least one digit.
pub fn is_number_shaped(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_digit() || c == '/')
        && token.chars().any(|c| c.is_ascii_digit())
}

pub fn classify(query: &str) -> QueryKind<'_> {
    let tokens: Vec<&str> = query.split_whitespace().collect();

    match *tokens.as_slice() {
        [] => QueryKind::Empty,
        [location, number] if is_number_shaped(number) => {
            QueryKind::LocatedNumber { location, number }
        }
        [number] if is_number_shaped(number) => QueryKind::BareNumber(number),
        _ => QueryKind::FreeText,
    }
}
