// tests/ratings.rs
use imdb_scrape::config::options::{ScrapeOptions, Target};
use imdb_scrape::core::StaticFetcher;
use imdb_scrape::data::Identity;
use imdb_scrape::error::ScrapeError;
use imdb_scrape::progress::{NullProgress, RecordingProgress};
use imdb_scrape::scrape::{retrieve_all, retrieve_ratings};

const EXPORT: &str = "http://www.imdb.com/list/export?list_id=ratings&author_id=ur1";
const REVIEWS: &str = "http://www.imdb.com/user/ur1/comments-expanded";

const CSV: &str = "\
position,const,created,modified,description,Title,Title type,Directors,You rated,IMDb Rating,URL\r
1,tt0111161,Sat Feb  9 00:00:00 2013,Sat Feb  9 00:00:00 2013,,The Shawshank Redemption,Feature Film,Frank Darabont,10,9.3,http://www.imdb.com/title/tt0111161/\r
2,tt0068646,Sun Mar 10 00:00:00 2013,,,\"Godfather, The\",Feature Film,Francis Ford Coppola,9,9.2,http://www.imdb.com/title/tt0068646/\r
,,,,,,,,,,\r
";

const REVIEWS_PAGE: &str = r#"<html><body><table id="outerbody"><tr><td>
    <div><a href="/title/tt0111161/">The Shawshank Redemption</a></div>
    <img alt="10/10"><b>Hope</b>, <small>1 May 2010</small><p>Yes.</p><hr>
    </td></tr></table></body></html>"#;

fn opts(target: Target) -> ScrapeOptions {
    ScrapeOptions {
        target,
        identity: Some(Identity::new("ur1", None)),
        ..ScrapeOptions::default()
    }
}

#[tokio::test]
async fn export_rows_become_records() {
    let f = StaticFetcher::new().page(EXPORT, CSV);
    let mut progress = RecordingProgress::default();
    let out = retrieve_ratings(&f, &opts(Target::Ratings), None, &mut progress).await.unwrap();

    assert_eq!(f.requests(), vec![EXPORT]);
    assert_eq!(out.len(), 2);
    let first = &out.data[0];
    assert_eq!(first.subject, "The Shawshank Redemption");
    assert_eq!(first.subject_url, "http://www.imdb.com/title/tt0111161/");
    assert_eq!(first.star_rating.as_deref(), Some("10"));
    assert_eq!(first.date_posted.as_deref(), Some("2013-02-09"));
    assert_eq!(out.data[1].subject, "Godfather, The");
    assert!(progress.finished);
}

#[tokio::test]
async fn export_failure_is_a_network_error() {
    let f = StaticFetcher::new().failing(EXPORT);
    let err = retrieve_ratings(&f, &opts(Target::Ratings), None, &mut NullProgress)
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Network { .. }));
    assert_eq!(err.url(), Some(EXPORT));
}

#[tokio::test]
async fn all_reuses_the_reviews_head() {
    let f = StaticFetcher::new().page(REVIEWS, REVIEWS_PAGE).page(EXPORT, CSV);
    let sets = retrieve_all(&f, &opts(Target::All), &mut NullProgress).await.unwrap();

    assert_eq!(f.requests(), vec![REVIEWS, EXPORT]);
    let reviews = sets.reviews.as_ref().unwrap();
    let ratings = sets.ratings.as_ref().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(ratings.len(), 2);
    assert_eq!(reviews.head, ratings.head);
    assert_eq!(sets.schema_key, "imdb");
}

#[tokio::test]
async fn target_limits_what_is_fetched() {
    let f = StaticFetcher::new().page(REVIEWS, REVIEWS_PAGE).page(EXPORT, CSV);
    let sets = retrieve_all(&f, &opts(Target::Ratings), &mut NullProgress).await.unwrap();
    assert_eq!(f.requests(), vec![EXPORT]);
    assert!(sets.reviews.is_none());
    assert!(sets.ratings.is_some());
}
