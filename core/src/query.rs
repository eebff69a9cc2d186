//! Query and fragment access for the page address, shared by the codec and the
//! browser side so both read URLs the way `URLSearchParams` does.

use url::{Url, form_urlencoded};

use crate::*;

pub fn parse_href(href: &str) -> Result<Url> {
    Url::parse(href).map_err(|err| BingoError::Url(format!("{href:?}: {err}")))
}

/// Looks up the first value for `key`, with keys and values form-decoded.
pub fn get_param(query: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

/// Swaps the query of `href` for `query`, keeping everything else.
pub fn replace_query(href: &str, query: &str) -> Result<String> {
    let mut url = parse_href(href)?;
    url.set_query(Some(query).filter(|query| !query.is_empty()));
    Ok(url.into())
}

/// Swaps the fragment of `href`, with or without its leading `#`.
pub fn replace_fragment(href: &str, fragment: &str) -> Result<String> {
    let mut url = parse_href(href)?;
    let fragment = fragment.trim_start_matches('#');
    url.set_fragment(Some(fragment).filter(|fragment| !fragment.is_empty()));
    Ok(url.into())
}

/// Fragment of `href` including its `#`, empty when there is none.
pub fn fragment(href: &str) -> Result<String> {
    let url = parse_href(href)?;
    Ok(url
        .fragment()
        .map(|fragment| format!("#{fragment}"))
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_wins() {
        let query = "?deaths=2&miab=&deaths=5&state";

        assert_eq!(get_param(query, "deaths").as_deref(), Some("2"));
        assert_eq!(get_param(query, "miab").as_deref(), Some(""));
        assert_eq!(get_param(query, "state").as_deref(), Some(""));
        assert_eq!(get_param(query, "seed"), None);
    }

    #[test]
    fn keys_and_values_are_form_decoded() {
        let query = "st%61te=AgI&de%61ths=3&miab=1+2&token=AAEC%3D";

        assert_eq!(get_param(query, "state").as_deref(), Some("AgI"));
        assert_eq!(get_param(query, "deaths").as_deref(), Some("3"));
        assert_eq!(get_param(query, "miab").as_deref(), Some("1 2"));
        assert_eq!(get_param(query, "token").as_deref(), Some("AAEC="));
    }

    #[test]
    fn replacing_query_keeps_fragment() {
        assert_eq!(
            replace_query("https://bingo.test/b?state=old#-v", "deaths=0&miab=0&state=AA==")
                .unwrap(),
            "https://bingo.test/b?deaths=0&miab=0&state=AA==#-v"
        );
        assert_eq!(
            replace_query("https://bingo.test/b?x=1", "").unwrap(),
            "https://bingo.test/b"
        );
    }

    #[test]
    fn replacing_fragment_keeps_query() {
        let href = "https://bingo.test/b?deaths=1#--seed=4";

        assert_eq!(
            replace_fragment(href, "#-v&--seed=5").unwrap(),
            "https://bingo.test/b?deaths=1#-v&--seed=5"
        );
        assert_eq!(fragment(href).unwrap(), "#--seed=4");
        assert_eq!(fragment("https://bingo.test/").unwrap(), "");
    }

    #[test]
    fn relative_href_is_rejected() {
        assert!(matches!(parse_href("/b?state=AA"), Err(BingoError::Url(_))));
    }
}
