use super::*;

#[test]
fn builds_bit_exact_algolia_url() {
    let url = SearchEndpoint::default().build("React", 0).expect("url");
    assert_eq!(
        url.as_str(),
        "https://hn.algolia.com/api/v1/search?query=React&page=0"
    );
    assert_eq!(url.term(), "React");
    assert_eq!(url.page(), 0);
}

#[test]
fn term_is_used_verbatim() {
    let url = SearchEndpoint::default().build("rust lang", 3).expect("url");
    assert_eq!(
        url.as_str(),
        "https://hn.algolia.com/api/v1/search?query=rust lang&page=3"
    );
}

#[test]
fn parse_recovers_term_and_page() {
    let endpoint = SearchEndpoint::default();
    let built = endpoint.build("c++", 12).expect("url");
    let parsed = endpoint.parse(built.as_str()).expect("parse");
    assert_eq!(parsed, built);
}

#[test]
fn empty_term_round_trips() {
    let endpoint = SearchEndpoint::default();
    let parsed = endpoint
        .parse("https://hn.algolia.com/api/v1/search?query=&page=1")
        .expect("parse");
    assert_eq!(parsed.term(), "");
    assert_eq!(parsed.page(), 1);
}

#[test]
fn ampersand_terms_are_rejected() {
    assert_eq!(
        SearchEndpoint::default().build("tom&jerry", 0),
        Err(QueryUrlError::AmbiguousTerm("tom&jerry".into()))
    );
}

#[test]
fn parse_rejects_foreign_and_malformed_urls() {
    let endpoint = SearchEndpoint::default();

    assert!(matches!(
        endpoint.parse("https://example.com/?query=x&page=0"),
        Err(QueryUrlError::ForeignPrefix { .. })
    ));
    assert!(matches!(
        endpoint.parse("https://hn.algolia.com/api/v1/search?query=x"),
        Err(QueryUrlError::MissingPage(_))
    ));
    assert!(matches!(
        endpoint.parse("https://hn.algolia.com/api/v1/search?query=x&hitsPerPage=5"),
        Err(QueryUrlError::MissingPage(_))
    ));
    assert!(matches!(
        endpoint.parse("https://hn.algolia.com/api/v1/search?query=x&page=two"),
        Err(QueryUrlError::InvalidPage { .. })
    ));
}

#[test]
fn custom_endpoint_params_are_validated() {
    let endpoint = SearchEndpoint::new("http://127.0.0.1:9000/search?", "q", "p").expect("endpoint");
    assert_eq!(
        endpoint.build("go", 2).expect("url").as_str(),
        "http://127.0.0.1:9000/search?q=go&p=2"
    );

    assert!(SearchEndpoint::new("not a url", "q", "p").is_err());
    assert!(SearchEndpoint::new("ftp://host/search?", "q", "p").is_err());
    assert!(SearchEndpoint::new("http://host/search?", "q=", "p").is_err());
    assert!(SearchEndpoint::new("http://host/search?", "q", "").is_err());
}

#[test]
fn history_drops_oldest_entries_past_capacity() {
    let endpoint = SearchEndpoint::default();
    let mut history = UrlHistory::with_capacity(7);
    for page in 0..10 {
        history.push(endpoint.build("react", page).expect("url"));
    }

    assert_eq!(history.len(), 7);
    assert_eq!(history.iter().next().map(QueryUrl::page), Some(3));
    assert_eq!(history.last().map(QueryUrl::page), Some(9));
}

#[test]
fn history_capacity_is_floored_at_recent_window() {
    assert_eq!(
        UrlHistory::with_capacity(1).capacity(),
        crate::history::RECENT_TERMS_WINDOW
    );
}
