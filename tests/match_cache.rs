mod support;

use lol_match_stats::match_cache::MatchCache;
use lol_match_stats::raw_cache::{DocumentKind, RawCache};

use support::{FIXTURE_MATCH_ID, FakeSource};

fn temp_cache() -> (tempfile::TempDir, RawCache) {
    let dir = tempfile::tempdir().expect("temp dir");
    let cache = RawCache::new(dir.path().join("cache.sqlite"));
    (dir, cache)
}

#[test]
fn second_get_is_served_from_cache() {
    let (_dir, cache) = temp_cache();
    let source = FakeSource::with_fixture_matches(&[FIXTURE_MATCH_ID]);
    let documents = MatchCache::new(&cache, &source);

    let first = documents
        .get(DocumentKind::Timeline, FIXTURE_MATCH_ID)
        .expect("first get");
    let second = documents
        .get(DocumentKind::Timeline, FIXTURE_MATCH_ID)
        .expect("second get");

    assert_eq!(first, second);
    assert_eq!(source.fetch_count(DocumentKind::Timeline, FIXTURE_MATCH_ID), 1);
    assert_eq!(
        source.fetch_count(DocumentKind::MatchDetail, FIXTURE_MATCH_ID),
        0
    );
}

#[test]
fn cache_survives_a_new_orchestrator() {
    let (_dir, cache) = temp_cache();
    let source = FakeSource::with_fixture_matches(&[FIXTURE_MATCH_ID]);
    MatchCache::new(&cache, &source)
        .match_detail(FIXTURE_MATCH_ID)
        .expect("warm cache");

    let cold_source = FakeSource::default();
    let detail = MatchCache::new(&cache, &cold_source)
        .match_detail(FIXTURE_MATCH_ID)
        .expect("served from cache");

    assert_eq!(detail.info.queue_id, 420);
    assert_eq!(cold_source.total_fetches(), 0);
}

#[test]
fn stored_body_is_verbatim() {
    let (_dir, cache) = temp_cache();
    let source = FakeSource::with_fixture_matches(&[FIXTURE_MATCH_ID]);
    let body = MatchCache::new(&cache, &source)
        .get(DocumentKind::MatchDetail, FIXTURE_MATCH_ID)
        .expect("fetch");

    let stored = cache
        .get(DocumentKind::MatchDetail, FIXTURE_MATCH_ID)
        .expect("read cache")
        .expect("entry present");
    assert_eq!(stored, body);
    assert_eq!(stored, support::read_fixture("match_detail.json"));
}

#[test]
fn kinds_are_cached_independently() {
    let (_dir, cache) = temp_cache();
    cache
        .put(DocumentKind::MatchDetail, "EUW1_1", "{\"info\":{}}")
        .expect("put");
    assert!(
        cache
            .get(DocumentKind::Timeline, "EUW1_1")
            .expect("read")
            .is_none()
    );
    assert_eq!(cache.entries(DocumentKind::MatchDetail).expect("list").len(), 1);
    assert!(cache.entries(DocumentKind::Timeline).expect("list").is_empty());
}

#[test]
fn upstream_failure_propagates_and_is_not_cached() {
    let (_dir, cache) = temp_cache();
    let mut source = FakeSource::with_fixture_matches(&[FIXTURE_MATCH_ID]);
    source.fail_on = Some(FIXTURE_MATCH_ID.to_string());

    let err = MatchCache::new(&cache, &source)
        .get(DocumentKind::Timeline, FIXTURE_MATCH_ID)
        .expect_err("should fail");
    assert!(err.to_string().contains("503"));
    assert!(
        cache
            .get(DocumentKind::Timeline, FIXTURE_MATCH_ID)
            .expect("read")
            .is_none()
    );
    assert_eq!(source.total_fetches(), 1);
}

#[test]
fn unparseable_body_is_not_cached_and_is_refetched_later() {
    let (_dir, cache) = temp_cache();
    let mut gateway = FakeSource::default();
    gateway.documents.insert(
        (DocumentKind::MatchDetail, FIXTURE_MATCH_ID.to_string()),
        "<html>gateway</html>".to_string(),
    );

    let err = MatchCache::new(&cache, &gateway)
        .match_detail(FIXTURE_MATCH_ID)
        .expect_err("html body should fail");
    assert!(format!("{err:#}").contains("not cached"));
    assert!(
        cache
            .get(DocumentKind::MatchDetail, FIXTURE_MATCH_ID)
            .expect("read")
            .is_none()
    );

    let good = FakeSource::with_fixture_matches(&[FIXTURE_MATCH_ID]);
    let detail = MatchCache::new(&cache, &good)
        .match_detail(FIXTURE_MATCH_ID)
        .expect("refetched");
    assert_eq!(detail.info.queue_id, 420);
    assert_eq!(good.fetch_count(DocumentKind::MatchDetail, FIXTURE_MATCH_ID), 1);
}
