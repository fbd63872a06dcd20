//! End-to-end pipeline tests against an in-memory stub provider.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use waitpoint_core::{Coordinate, OpeningStatus};
use waitpoint_places::{GeocodeHit, PlaceDetails, PlaceProvider, PlacesError, RawPlace, ReviewData};
use waitpoint_search::{Clock, PlaceSearch, SearchConfig, SearchError, SearchRequest};

const CENTER: &str = "1.3521,103.8198";

/// Scripted provider: fixed geocode hits, per-type nearby results,
/// per-place details, and call counters for cache assertions.
#[derive(Default)]
struct StubProvider {
    geocode_hits: Vec<GeocodeHit>,
    nearby: HashMap<String, Vec<RawPlace>>,
    failing_types: HashSet<String>,
    details: HashMap<String, PlaceDetails>,
    fail_details: bool,
    geocode_calls: AtomicUsize,
    nearby_calls: AtomicUsize,
    details_calls: AtomicUsize,
    seen_keywords: Mutex<Vec<Option<String>>>,
}

/// Cloneable handle so the test keeps counter access after handing the
/// provider to the service.
#[derive(Clone)]
struct Shared(Arc<StubProvider>);

impl PlaceProvider for Shared {
    async fn geocode(&self, _address: &str) -> Result<Vec<GeocodeHit>, PlacesError> {
        self.0.geocode_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.0.geocode_hits.clone())
    }

    async fn nearby_search(
        &self,
        _center: Coordinate,
        _radius_m: u32,
        place_type: &str,
        keyword: Option<&str>,
    ) -> Result<Vec<RawPlace>, PlacesError> {
        self.0.nearby_calls.fetch_add(1, Ordering::SeqCst);
        self.0
            .seen_keywords
            .lock()
            .unwrap()
            .push(keyword.map(str::to_owned));
        if self.0.failing_types.contains(place_type) {
            return Err(PlacesError::Api {
                status: "OVER_QUERY_LIMIT".to_string(),
                message: None,
            });
        }
        Ok(self.0.nearby.get(place_type).cloned().unwrap_or_default())
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        self.0.details_calls.fetch_add(1, Ordering::SeqCst);
        if self.0.fail_details {
            return Err(PlacesError::Api {
                status: "UNKNOWN_ERROR".to_string(),
                message: None,
            });
        }
        Ok(self.0.details.get(place_id).cloned().unwrap_or_default())
    }

    fn photo_url(&self, photo_reference: &str) -> String {
        format!("https://stub.test/photo/{photo_reference}")
    }
}

/// A raw place roughly `km_north` kilometers north of the test center.
fn raw_place(id: &str, name: &str, types: &[&str], km_north: f64) -> RawPlace {
    // One degree of latitude is ~111.2 km.
    RawPlace {
        place_id: id.to_string(),
        name: name.to_string(),
        types: types.iter().map(ToString::to_string).collect(),
        rating: Some(4.0),
        location: Coordinate {
            lat: 1.3521 + km_north / 111.2,
            lng: 103.8198,
        },
        vicinity: Some(format!("{name} street")),
        photo_references: vec![],
        open_now: Some(true),
    }
}

fn request(location: &str, categories: &[&str]) -> SearchRequest {
    SearchRequest {
        location: location.to_string(),
        radius_km: 2.0,
        categories: categories.iter().map(ToString::to_string).collect(),
        search_term: None,
    }
}

fn service(provider: StubProvider) -> (PlaceSearch<Shared>, Arc<StubProvider>) {
    let provider = Arc::new(provider);
    let search = PlaceSearch::new(Some(Shared(Arc::clone(&provider))), SearchConfig::default());
    (search, provider)
}

#[tokio::test]
async fn end_to_end_dedups_and_sorts_by_distance() {
    let mut provider = StubProvider::default();
    provider.nearby.insert(
        "restaurant".to_string(),
        vec![
            raw_place("r2", "Mid", &["restaurant"], 1.1),
            raw_place("r1", "Near", &["restaurant"], 0.3),
            raw_place("r3", "Far", &["restaurant"], 1.9),
            // Same id as r1 with different fields: first-seen must win.
            raw_place("r1", "Duplicate", &["restaurant"], 0.9),
        ],
    );
    let (search, _stub) = service(provider);

    let places = search
        .search(&request(CENTER, &["food"]))
        .await
        .expect("search should succeed");

    assert_eq!(places.len(), 3);
    let ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2", "r3"]);
    // First-seen record's fields retained for the duplicate id.
    assert_eq!(places[0].name, "Near");
    // Non-decreasing distance.
    for pair in places.windows(2) {
        assert!(
            pair[0].distance_km <= pair[1].distance_km,
            "not sorted: {} then {}",
            pair[0].distance_km,
            pair[1].distance_km
        );
    }
    assert!((places[0].distance_km - 0.3).abs() < 0.11);
    assert!((places[2].distance_km - 1.9).abs() < 0.11);
}

#[tokio::test]
async fn coordinate_outside_region_is_out_of_region() {
    let (search, stub) = service(StubProvider::default());
    let err = search
        .search(&request("40.7,-74.0", &["food"]))
        .await
        .unwrap_err();
    assert_eq!(err, SearchError::OutOfRegion);
    // Rejected before any provider call.
    assert_eq!(stub.geocode_calls.load(Ordering::SeqCst), 0);
    assert_eq!(stub.nearby_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn coordinate_literal_skips_geocoding() {
    let mut provider = StubProvider::default();
    provider
        .nearby
        .insert("bank".to_string(), vec![raw_place("b1", "Bank", &["bank"], 0.5)]);
    let (search, stub) = service(provider);

    search
        .search(&request(CENTER, &["banks"]))
        .await
        .expect("search should succeed");
    assert_eq!(stub.geocode_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unresolvable_address_is_not_found() {
    let (search, stub) = service(StubProvider::default());
    let err = search
        .search(&request("doesnotexist12345", &["food"]))
        .await
        .unwrap_err();
    assert_eq!(err, SearchError::NotFound);
    assert_eq!(stub.geocode_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn geocoded_address_outside_region_is_out_of_region() {
    let mut provider = StubProvider::default();
    provider.geocode_hits = vec![GeocodeHit {
        coordinate: Coordinate { lat: 3.15, lng: 101.7 }, // Kuala Lumpur
        formatted_address: Some("Kuala Lumpur".to_string()),
    }];
    let (search, _stub) = service(provider);

    let err = search
        .search(&request("somewhere up north", &["food"]))
        .await
        .unwrap_err();
    assert_eq!(err, SearchError::OutOfRegion);
}

#[tokio::test]
async fn missing_provider_is_config_error() {
    let search: PlaceSearch<Shared> = PlaceSearch::new(None, SearchConfig::default());
    let err = search.search(&request(CENTER, &["food"])).await.unwrap_err();
    assert_eq!(err, SearchError::Config);

    let err = search.resolve_location("Tampines").await.unwrap_err();
    assert_eq!(err, SearchError::Config);
}

#[tokio::test]
async fn repeated_request_hits_cache_and_skips_provider() {
    let mut provider = StubProvider::default();
    provider.nearby.insert(
        "bank".to_string(),
        vec![raw_place("b1", "Bank", &["bank"], 0.4)],
    );
    let (search, stub) = service(provider);

    let first = search
        .search(&request(CENTER, &["banks"]))
        .await
        .expect("first search");
    let calls_after_first =
        stub.nearby_calls.load(Ordering::SeqCst) + stub.details_calls.load(Ordering::SeqCst);

    let second = search
        .search(&request(CENTER, &["banks"]))
        .await
        .expect("second search");
    let calls_after_second =
        stub.nearby_calls.load(Ordering::SeqCst) + stub.details_calls.load(Ordering::SeqCst);

    assert_eq!(first, second);
    assert_eq!(
        calls_after_first, calls_after_second,
        "second call must not hit the provider"
    );
}

#[tokio::test]
async fn cache_key_is_category_order_independent() {
    let mut provider = StubProvider::default();
    provider.nearby.insert(
        "bank".to_string(),
        vec![raw_place("b1", "Bank", &["bank"], 0.4)],
    );
    let (search, stub) = service(provider);

    search
        .search(&request(CENTER, &["banks", "self-care"]))
        .await
        .expect("first search");
    let calls_after_first = stub.nearby_calls.load(Ordering::SeqCst);

    search
        .search(&request(CENTER, &["self-care", "banks"]))
        .await
        .expect("second search");
    let calls_after_second = stub.nearby_calls.load(Ordering::SeqCst);

    assert_eq!(calls_after_first, calls_after_second);
}

#[tokio::test]
async fn one_failing_type_does_not_abort_the_request() {
    let mut provider = StubProvider::default();
    provider.failing_types.insert("atm".to_string());
    provider.nearby.insert(
        "bank".to_string(),
        vec![raw_place("b1", "Bank", &["bank"], 0.4)],
    );
    let (search, _stub) = service(provider);

    let places = search
        .search(&request(CENTER, &["banks"]))
        .await
        .expect("partial failure must not surface");
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].id, "b1");
}

#[tokio::test]
async fn lodging_and_unrequested_types_are_filtered() {
    let mut provider = StubProvider::default();
    provider.nearby.insert(
        "restaurant".to_string(),
        vec![
            raw_place("ok", "Kept", &["restaurant"], 0.5),
            // Hotel restaurant: carries the hard-excluded lodging type.
            raw_place("hotel", "Hotel Grill", &["restaurant", "lodging"], 0.2),
            // Loosely related result with none of the requested types.
            raw_place("gym", "Gym", &["gym"], 0.1),
        ],
    );
    let (search, _stub) = service(provider);

    let places = search
        .search(&request(CENTER, &["food"]))
        .await
        .expect("search should succeed");
    let ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["ok"]);
}

#[tokio::test]
async fn empty_category_set_yields_empty_list() {
    let (search, stub) = service(StubProvider::default());
    let places = search
        .search(&request(CENTER, &[]))
        .await
        .expect("empty categories are not an error");
    assert!(places.is_empty());
    assert_eq!(stub.nearby_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_categories_contribute_nothing() {
    let (search, stub) = service(StubProvider::default());
    let places = search
        .search(&request(CENTER, &["karaoke", "arcades"]))
        .await
        .expect("unknown categories are not an error");
    assert!(places.is_empty());
    assert_eq!(stub.nearby_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn cap_is_applied_before_sorting() {
    let mut provider = StubProvider::default();
    provider.nearby.insert(
        "bank".to_string(),
        vec![
            raw_place("far", "Far", &["bank"], 1.9),
            raw_place("near", "Near", &["bank"], 0.3),
            raw_place("mid", "Mid", &["bank"], 1.1),
        ],
    );
    let config = SearchConfig {
        result_cap: 2,
        ..SearchConfig::default()
    };
    let search = PlaceSearch::new(Some(Shared(Arc::new(provider))), config);

    let places = search
        .search(&request(CENTER, &["banks"]))
        .await
        .expect("search should succeed");

    // The cap keeps the first two in provider order (far, near); the
    // nearer "mid" is lost. The survivors are then distance-sorted.
    let ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["near", "far"]);
}

#[tokio::test]
async fn enrichment_failure_degrades_to_defaults() {
    let mut provider = StubProvider::default();
    provider.fail_details = true;
    let mut raw = raw_place("r1", "Cafe", &["cafe"], 0.3);
    raw.rating = None;
    raw.open_now = None;
    provider.nearby.insert("cafe".to_string(), vec![raw]);
    let (search, _stub) = service(provider);

    let places = search
        .search(&request(CENTER, &["budget"]))
        .await
        .expect("enrichment failure must not surface");

    assert_eq!(places.len(), 1);
    let place = &places[0];
    assert_eq!(place.price_level, None);
    assert!(place.reviews.is_empty());
    assert_eq!(place.rating, 0.0);
    assert_eq!(place.opening_status, OpeningStatus::Unknown);
    // No provider photos anywhere: a single placeholder URL stands in.
    assert_eq!(place.photos.len(), 1);
    assert!(place.photos[0].contains("unsplash"));
}

#[tokio::test]
async fn enrichment_fields_are_normalized() {
    let mut provider = StubProvider::default();
    provider.nearby.insert(
        "spa".to_string(),
        vec![raw_place("s1", "Spa", &["spa"], 0.5)],
    );
    provider.details.insert(
        "s1".to_string(),
        PlaceDetails {
            price_level: Some(3),
            reviews: vec![
                ReviewData {
                    author_name: None,
                    text: None,
                    rating: Some(4.0),
                },
                ReviewData {
                    author_name: Some("Mei".to_string()),
                    text: Some("relaxing".to_string()),
                    rating: Some(5.0),
                },
            ],
            photo_references: vec!["d1".to_string(), "d2".to_string()],
            open_now: Some(false),
        },
    );
    let (search, _stub) = service(provider);

    let places = search
        .search(&request(CENTER, &["self-care"]))
        .await
        .expect("search should succeed");

    let place = &places[0];
    assert_eq!(place.price_level, Some(3));
    assert_eq!(place.reviews.len(), 2);
    assert_eq!(place.reviews[0].author, "Anonymous");
    assert_eq!(place.reviews[0].text, "");
    assert_eq!(place.reviews[1].author, "Mei");
    // Raw result had no photos, so the details photos are used.
    assert_eq!(
        place.photos,
        vec![
            "https://stub.test/photo/d1".to_string(),
            "https://stub.test/photo/d2".to_string()
        ]
    );
    // Raw open_now (Some(true)) wins over the details flag.
    assert_eq!(place.opening_status, OpeningStatus::Open);
    assert_eq!(place.category, "Spa");
}

#[tokio::test]
async fn primary_photos_win_over_detail_photos() {
    let mut provider = StubProvider::default();
    let mut raw = raw_place("p1", "Mall", &["shopping_mall"], 0.7);
    raw.photo_references = vec!["primary".to_string()];
    provider.nearby.insert("shopping_mall".to_string(), vec![raw]);
    provider.details.insert(
        "p1".to_string(),
        PlaceDetails {
            photo_references: vec!["detail".to_string()],
            ..PlaceDetails::default()
        },
    );
    let (search, _stub) = service(provider);

    let places = search
        .search(&request(CENTER, &["shopping"]))
        .await
        .expect("search should succeed");
    assert_eq!(
        places[0].photos,
        vec!["https://stub.test/photo/primary".to_string()]
    );
}

#[tokio::test]
async fn reviews_and_photos_cap_at_five() {
    let mut provider = StubProvider::default();
    // s1 has no primary photos, so the details call supplies both lists.
    let s1 = raw_place("s1", "Spa", &["spa"], 0.5);
    // s2 carries an oversized primary photo list of its own.
    let mut s2 = raw_place("s2", "Salon", &["beauty_salon"], 0.8);
    s2.photo_references = (0..7).map(|i| format!("raw{i}")).collect();
    provider.nearby.insert("spa".to_string(), vec![s1]);
    provider.nearby.insert("beauty_salon".to_string(), vec![s2]);
    provider.details.insert(
        "s1".to_string(),
        PlaceDetails {
            reviews: (0..7)
                .map(|i| ReviewData {
                    author_name: Some(format!("Reviewer {i}")),
                    text: Some(format!("review {i}")),
                    rating: Some(4.0),
                })
                .collect(),
            photo_references: (0..7).map(|i| format!("detail{i}")).collect(),
            ..PlaceDetails::default()
        },
    );
    let (search, _stub) = service(provider);

    let places = search
        .search(&request(CENTER, &["self-care"]))
        .await
        .expect("search should succeed");

    let spa = places.iter().find(|p| p.id == "s1").expect("s1 present");
    assert_eq!(spa.reviews.len(), 5);
    // First five in provider order survive.
    assert_eq!(spa.reviews[0].author, "Reviewer 0");
    assert_eq!(spa.reviews[4].author, "Reviewer 4");
    assert_eq!(spa.photos.len(), 5);
    assert_eq!(spa.photos[4], "https://stub.test/photo/detail4");

    let salon = places.iter().find(|p| p.id == "s2").expect("s2 present");
    assert_eq!(salon.photos.len(), 5);
    assert_eq!(salon.photos[4], "https://stub.test/photo/raw4");
}

#[tokio::test]
async fn search_term_is_forwarded_as_keyword() {
    let mut provider = StubProvider::default();
    provider.nearby.insert("bank".to_string(), vec![]);
    let (search, stub) = service(provider);

    let mut req = request(CENTER, &["banks"]);
    req.search_term = Some("dbs".to_string());
    search.search(&req).await.expect("search should succeed");

    let keywords = stub.seen_keywords.lock().unwrap().clone();
    assert_eq!(keywords.len(), 2); // bank + atm
    assert!(keywords.iter().all(|k| k.as_deref() == Some("dbs")));
}

#[tokio::test]
async fn cache_expires_after_ttl() {
    struct ManualClock {
        now: Mutex<Instant>,
    }
    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    let clock = Arc::new(ManualClock {
        now: Mutex::new(Instant::now()),
    });

    let mut provider = StubProvider::default();
    provider.nearby.insert(
        "bank".to_string(),
        vec![raw_place("b1", "Bank", &["bank"], 0.4)],
    );
    let provider = Arc::new(provider);
    let config = SearchConfig {
        cache_ttl: Duration::from_secs(7200),
        ..SearchConfig::default()
    };
    let search = PlaceSearch::with_clock(
        Some(Shared(Arc::clone(&provider))),
        config,
        Arc::clone(&clock) as Arc<dyn Clock>,
    );

    search.search(&request(CENTER, &["banks"])).await.unwrap();
    let calls_warm = provider.nearby_calls.load(Ordering::SeqCst);

    *clock.now.lock().unwrap() += Duration::from_secs(7201);

    search.search(&request(CENTER, &["banks"])).await.unwrap();
    let calls_cold = provider.nearby_calls.load(Ordering::SeqCst);
    assert!(calls_cold > calls_warm, "expired cache entry must refetch");
}

#[tokio::test]
async fn resolve_location_returns_validated_coordinate() {
    let mut provider = StubProvider::default();
    provider.geocode_hits = vec![GeocodeHit {
        coordinate: Coordinate {
            lat: 1.3496,
            lng: 103.9568,
        },
        formatted_address: Some("Tampines".to_string()),
    }];
    let (search, stub) = service(provider);

    let coordinate = search
        .resolve_location("Tampines")
        .await
        .expect("should resolve");
    assert!((coordinate.lat - 1.3496).abs() < 1e-9);

    // Second resolution is served from the geocode cache.
    search.resolve_location("Tampines").await.unwrap();
    assert_eq!(stub.geocode_calls.load(Ordering::SeqCst), 1);
}
