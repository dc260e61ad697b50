// tests/pagination.rs
use imdb_scrape::config::options::{ScrapeOptions, default_site};
use imdb_scrape::core::StaticFetcher;
use imdb_scrape::data::Identity;
use imdb_scrape::error::ScrapeError;
use imdb_scrape::progress::{NullProgress, RecordingProgress};
use imdb_scrape::scrape::{ReviewsSession, retrieve_reviews};

const P1: &str = "http://www.imdb.com/user/ur1/comments-expanded";
const P2: &str = "http://www.imdb.com/user/ur1/comments-expanded?start=10";
const P3: &str = "http://www.imdb.com/user/ur1/comments-expanded?start=20";

/// A reviews page: entries for `subjects`, "Page n of total", optional next arrow.
fn page(n: u32, total: u32, subjects: &[&str], next: Option<&str>) -> String {
    let pager = match next {
        Some(href) => format!(r#"<a href="{href}"><img alt="next"></a>"#),
        None => String::new(),
    };
    let entries: String = subjects
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                r#"<div><a href="/title/tt{n}{i}/">{s}</a></div>
                   <img alt="{i}/10"><b>On {s}</b>, <small>{d} May 2010</small>
                   <p>About {s}.</p>
                   <hr>"#,
                d = i + 1
            )
        })
        .collect();

    format!(
        r#"<html><body><table id="outerbody"><tr><td>
             <table><tr><td><font>Page {n} of {total}</font></td><td>{pager}</td></tr></table>
             {entries}
           </td></tr></table></body></html>"#
    )
}

fn me() -> Identity {
    Identity::new("ur1", Some("Jo".to_string()))
}

fn opts() -> ScrapeOptions {
    ScrapeOptions { identity: Some(me()), ..ScrapeOptions::default() }
}

#[tokio::test]
async fn follows_pager_and_stops_at_a_revisit() {
    let f = StaticFetcher::new()
        .page(P1, page(1, 3, &["A", "B"], Some("comments-expanded?start=10")))
        .page(P2, page(2, 3, &["C"], Some("comments-expanded?start=20")))
        // points backwards at page 2
        .page(P3, page(3, 3, &["D"], Some("comments-expanded?start=10")));

    let mut progress = RecordingProgress::default();
    let out = retrieve_reviews(&f, &opts(), &mut progress).await.unwrap();

    assert_eq!(f.requests(), vec![P1, P2, P3]);
    let subjects: Vec<_> = out.data.iter().map(|r| r.subject.as_str()).collect();
    assert_eq!(subjects, vec!["A", "B", "C", "D"]);
    assert_eq!(out.head, me());
    assert_eq!(
        progress.lines,
        vec!["Fetching reviews…", "Fetching page 2 of 3…", "Fetching page 3 of 3…"]
    );
    assert!(progress.finished);
}

#[tokio::test]
async fn link_back_to_first_page_is_a_revisit() {
    let f = StaticFetcher::new()
        .page(P1, page(1, 2, &["A"], Some("comments-expanded?start=10")))
        .page(P2, page(2, 2, &["B"], Some("comments-expanded")));

    let out = retrieve_reviews(&f, &opts(), &mut NullProgress).await.unwrap();
    assert_eq!(f.requests(), vec![P1, P2]);
    assert_eq!(out.len(), 2);
}

#[tokio::test]
async fn single_page_without_next_link() {
    let f = StaticFetcher::new().page(P1, page(1, 1, &["Only"], None));
    let out = retrieve_reviews(&f, &opts(), &mut NullProgress).await.unwrap();

    assert_eq!(f.requests(), vec![P1]);
    assert_eq!(out.len(), 1);
    let r = &out.data[0];
    assert_eq!(r.subject_url, "http://www.imdb.com/title/tt10/");
    assert_eq!(r.title.as_deref(), Some("On Only"));
    assert_eq!(r.date.as_deref(), Some("2010-05-01"));
    assert_eq!(r.text.as_deref(), Some("<p>About Only.</p>"));
    assert_eq!(r.spoilers, Some(false));
}

#[tokio::test]
async fn page_without_entries_is_an_empty_result() {
    let f = StaticFetcher::new().page(P1, page(1, 1, &[], None));
    let out = retrieve_reviews(&f, &opts(), &mut NullProgress).await.unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn failure_midway_returns_no_partial_data() {
    let f = StaticFetcher::new()
        .page(P1, page(1, 3, &["A"], Some("comments-expanded?start=10")))
        .failing(P2)
        .page(P3, page(3, 3, &["C"], None));

    let mut progress = RecordingProgress::default();
    let err = retrieve_reviews(&f, &opts(), &mut progress).await.unwrap_err();

    assert!(matches!(err, ScrapeError::Network { .. }));
    assert_eq!(err.url(), Some(P2));
    assert_eq!(f.requests(), vec![P1, P2]);
    assert!(progress.finished);
}

#[tokio::test]
async fn unusable_next_link_is_a_parse_error() {
    let f = StaticFetcher::new().page(P1, page(1, 2, &["A"], Some("http://[oops")));
    let err = retrieve_reviews(&f, &opts(), &mut NullProgress).await.unwrap_err();

    match err {
        ScrapeError::Parse { url, .. } => assert_eq!(url, P1),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn sessions_do_not_share_visited_state() {
    let f = StaticFetcher::new().page(P1, page(1, 1, &["A"], None));
    let site = default_site();

    for _ in 0..2 {
        let s = ReviewsSession::new(&f, &site, &me()).unwrap();
        assert_eq!(s.first_url().unwrap().as_str(), P1);
        let out = s.run(&mut NullProgress).await.unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.head, me());
    }
    assert_eq!(f.requests(), vec![P1, P1]);
}

#[tokio::test]
async fn head_is_the_identity_the_pages_were_fetched_for() {
    const OTHER: &str = "http://www.imdb.com/user/ur9/comments-expanded";
    let f = StaticFetcher::new().page(OTHER, page(1, 1, &["A"], None));
    let them = Identity::new("ur9", None);

    let out = ReviewsSession::new(&f, &default_site(), &them)
        .unwrap()
        .run(&mut NullProgress)
        .await
        .unwrap();

    assert_eq!(f.requests(), vec![OTHER]);
    assert_eq!(out.head, them);
    assert_eq!(out.head.reviewer_id, "ur9");
}
