//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::collections::HashSet;

use chrono::{Duration, Utc};
use integration_tests::{
    assert_json, assert_status, check_test_env, extract_visitor_cookie, fixtures::*, TestServer,
};
use reqwest::{header, StatusCode};
use serde_json::Value;
use tipjar_cache::{DailyPickStore, RedisPool, RedisPoolConfig};
use tipjar_core::value_objects::TipId;

/// A tip id in the unused range between seeded and generated ids
const MISSING_TIP_ID: i64 = 4_102_444_800_000_000;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert!(response.headers().contains_key("x-request-id"));

    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");

    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "healthy");
    assert_eq!(body["checks"]["redis"], "healthy");
}

// ============================================================================
// Tip Submission Tests
// ============================================================================

#[tokio::test]
async fn test_submit_tip_redirects_to_front_page() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = TipForm::unique();

    let response = server.post_form("/", &form).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let location = response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap();
    assert_eq!(location, "/");
}

#[tokio::test]
async fn test_submit_tip_persists_the_tip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = TipForm::unique();

    let response = server.post_form("/", &form).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let count = tip_count_with_body(&server.pool, &form.content).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_submit_tip_drops_empty_handle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = TipForm {
        twitter_username: Some(String::new()),
        ..TipForm::unique()
    };

    let response = server.post_form("/", &form).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let handle = tip_handle_with_body(&server.pool, &form.content).await.unwrap();
    assert_eq!(handle, None);
}

#[tokio::test]
async fn test_submit_tip_rejects_oversized_content() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = TipForm::with_content(&"x".repeat(281));

    let response = server.post_form("/", &form).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "VALIDATION_ERROR");

    // rejected submissions must not leave a row behind
    let count = tip_count_with_body(&server.pool, &form.content).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_submit_tip_accepts_content_at_limit() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = TipForm::with_content(&"y".repeat(280));

    let response = server.post_form("/", &form).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_submit_tip_rejects_unsafe_content() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = TipForm::with_content(&format!("{UNSAFE_BODY} ({})", unique_suffix()));

    let response = server.post_form("/", &form).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "UNSAFE_CONTENT");

    let count = tip_count_with_body(&server.pool, &form.content).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_submit_tip_rejects_unsafe_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = TipForm {
        username: "<script>dana".to_string(),
        ..TipForm::unique()
    };

    let response = server.post_form("/", &form).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "UNSAFE_CONTENT");

    let count = tip_count_with_body(&server.pool, &form.content).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_submit_tip_rejects_missing_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_form("/", &[("content", "a tip without a name")])
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "INVALID_FORM");
}

// ============================================================================
// Listing Tests
// ============================================================================

#[tokio::test]
async fn test_get_tips_rejects_unknown_section() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/get-tips/hot").await.unwrap();

    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_SECTION");
}

#[tokio::test]
async fn test_trending_orders_by_likes_descending() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Escalating like counts keep fresh seeds ahead of leftovers from
    // earlier runs against the same database
    let base = Utc::now().timestamp();
    let suffix = unique_suffix();
    let top = seed_tip_with_counts(
        &server.pool,
        &format!("Trending top ({suffix})"),
        base + 3,
        0,
    )
    .await
    .unwrap();
    let bottom = seed_tip_with_counts(
        &server.pool,
        &format!("Trending bottom ({suffix})"),
        base + 1,
        0,
    )
    .await
    .unwrap();
    let middle = seed_tip_with_counts(
        &server.pool,
        &format!("Trending middle ({suffix})"),
        base + 2,
        0,
    )
    .await
    .unwrap();

    let response = server.get("/get-tips/trending").await.unwrap();
    let tips: Vec<TipResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(tips.len() <= 10);
    assert!(
        tips.windows(2).all(|w| w[0].likes >= w[1].likes),
        "trending must be ordered by likes, descending"
    );

    let position = |id: i64| tips.iter().position(|t| t.id == id.to_string());
    let top_pos = position(top).expect("top seed should rank in trending");
    let middle_pos = position(middle).expect("middle seed should rank in trending");
    let bottom_pos = position(bottom).expect("bottom seed should rank in trending");
    assert!(top_pos < middle_pos && middle_pos < bottom_pos);

    for id in [top, middle, bottom] {
        delete_tip(&server.pool, id).await.unwrap();
    }
}

#[tokio::test]
async fn test_new_lists_most_recent_first() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Timestamps just ahead of every live row keep the trio at the top of
    // the page regardless of what other tests insert concurrently
    let now = Utc::now();
    let suffix = unique_suffix();
    let newest = seed_tip_at(
        &server.pool,
        &format!("Newest tip ({suffix})"),
        now + Duration::minutes(110),
    )
    .await
    .unwrap();
    let older = seed_tip_at(
        &server.pool,
        &format!("Older tip ({suffix})"),
        now + Duration::minutes(108),
    )
    .await
    .unwrap();
    let middle = seed_tip_at(
        &server.pool,
        &format!("Middle tip ({suffix})"),
        now + Duration::minutes(109),
    )
    .await
    .unwrap();

    let response = server.get("/get-tips/new").await.unwrap();
    let tips: Vec<TipResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(tips.len() <= 10);
    assert!(
        tips.windows(2).all(|w| w[0].created_at >= w[1].created_at),
        "new must be ordered by creation time, descending"
    );

    let position = |id: i64| tips.iter().position(|t| t.id == id.to_string());
    let newest_pos = position(newest).expect("newest seed should be listed");
    let middle_pos = position(middle).expect("middle seed should be listed");
    let older_pos = position(older).expect("older seed should be listed");
    assert!(newest_pos < middle_pos && middle_pos < older_pos);

    for id in [newest, middle, older] {
        delete_tip(&server.pool, id).await.unwrap();
    }
}

#[tokio::test]
async fn test_feed_order_varies_between_requests() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Enough tips that the sampled page cannot be the same every time
    let suffix = unique_suffix();
    for i in 0..15 {
        seed_tip(&server.pool, &format!("Feed variety {i} ({suffix})"))
            .await
            .unwrap();
    }

    let mut orders: HashSet<Vec<String>> = HashSet::new();
    for _ in 0..10 {
        let response = server.get("/get-tips/feed").await.unwrap();
        let tips: Vec<TipResponse> = assert_json(response, StatusCode::OK).await.unwrap();

        assert!(!tips.is_empty());
        assert!(tips.len() <= 10);
        orders.insert(tips.iter().map(|t| t.id.clone()).collect());
    }

    assert!(
        orders.len() > 1,
        "feed should not present the same order on every request"
    );
}

#[tokio::test]
async fn test_unsafe_tips_never_listed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Planted to top every section: highest likes for trending, newest
    // timestamp for new, and a plausible feed sample
    let body = format!("{UNSAFE_BODY} ({})", unique_suffix());
    let unsafe_id = seed_tip_full(
        &server.pool,
        &body,
        Utc::now().timestamp() + 1000,
        0,
        Utc::now() + Duration::hours(2),
    )
    .await
    .unwrap();

    for section in ["feed", "trending", "new"] {
        let response = server.get(&format!("/get-tips/{section}")).await.unwrap();
        let tips: Vec<TipResponse> = assert_json(response, StatusCode::OK).await.unwrap();
        assert!(
            !tips.iter().any(|t| t.id == unsafe_id.to_string()),
            "unsafe tip must not appear in {section}"
        );
    }

    delete_tip(&server.pool, unsafe_id).await.unwrap();
}

#[tokio::test]
async fn test_listing_annotates_viewer_reactions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let now = Utc::now();
    let suffix = unique_suffix();
    let liked_id = seed_tip_at(
        &server.pool,
        &format!("Annotated tip ({suffix})"),
        now + Duration::minutes(60),
    )
    .await
    .unwrap();
    let other_id = seed_tip_at(
        &server.pool,
        &format!("Unreacted tip ({suffix})"),
        now + Duration::minutes(59),
    )
    .await
    .unwrap();

    let response = server
        .post(&format!("/toggle_reaction/{liked_id}/like"))
        .await
        .unwrap();
    let cookie = extract_visitor_cookie(&response).expect("first reaction mints a visitor cookie");
    let _: ReactionStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server.get_with_cookie("/get-tips/new", &cookie).await.unwrap();
    let tips: Vec<TipResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    let liked = tips
        .iter()
        .find(|t| t.id == liked_id.to_string())
        .expect("liked tip should be listed");
    assert!(liked.liked);
    assert!(!liked.disliked);
    assert_eq!(liked.likes, 1);

    let other = tips
        .iter()
        .find(|t| t.id == other_id.to_string())
        .expect("other tip should be listed");
    assert!(!other.liked);
    assert!(!other.disliked);

    // an anonymous view of the same page carries no reaction state
    let response = server.get("/get-tips/new").await.unwrap();
    let tips: Vec<TipResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let liked = tips
        .iter()
        .find(|t| t.id == liked_id.to_string())
        .expect("liked tip should be listed");
    assert!(!liked.liked);

    for id in [liked_id, other_id] {
        delete_tip(&server.pool, id).await.unwrap();
    }
}

#[tokio::test]
async fn test_listings_never_mint_identity() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/get-tips/new").await.unwrap();
    assert!(extract_visitor_cookie(&response).is_none());
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/").await.unwrap();
    assert!(extract_visitor_cookie(&response).is_none());
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_toggle_like_round_trip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let tip_id = seed_tip(&server.pool, &format!("Round trip ({})", unique_suffix()))
        .await
        .unwrap();

    let response = server
        .post(&format!("/toggle_reaction/{tip_id}/like"))
        .await
        .unwrap();
    let cookie = extract_visitor_cookie(&response).expect("first reaction mints a visitor cookie");
    let status: ReactionStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status.likes, 1);
    assert_eq!(status.dislikes, 0);
    assert!(status.liked);
    assert!(!status.disliked);

    // same reaction again undoes it
    let response = server
        .post_with_cookie(&format!("/toggle_reaction/{tip_id}/like"), &cookie)
        .await
        .unwrap();
    let status: ReactionStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status.likes, 0);
    assert_eq!(status.dislikes, 0);
    assert!(!status.liked);
    assert!(!status.disliked);
}

#[tokio::test]
async fn test_toggle_dislike_round_trip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let tip_id = seed_tip(&server.pool, &format!("Dislike trip ({})", unique_suffix()))
        .await
        .unwrap();

    let response = server
        .post(&format!("/toggle_reaction/{tip_id}/dislike"))
        .await
        .unwrap();
    let cookie = extract_visitor_cookie(&response).expect("first reaction mints a visitor cookie");
    let status: ReactionStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status.dislikes, 1);
    assert!(status.disliked);
    assert!(!status.liked);

    let response = server
        .post_with_cookie(&format!("/toggle_reaction/{tip_id}/dislike"), &cookie)
        .await
        .unwrap();
    let status: ReactionStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status.dislikes, 0);
    assert!(!status.disliked);
}

#[tokio::test]
async fn test_switch_reaction_moves_one_unit() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let tip_id = seed_tip_with_counts(
        &server.pool,
        &format!("Switch test ({})", unique_suffix()),
        2,
        0,
    )
    .await
    .unwrap();

    // join the two phantom likers
    let response = server
        .post(&format!("/toggle_reaction/{tip_id}/like"))
        .await
        .unwrap();
    let cookie = extract_visitor_cookie(&response).expect("first reaction mints a visitor cookie");
    let status: ReactionStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((status.likes, status.dislikes), (3, 0));
    assert!(status.liked);

    // switching sides moves exactly one unit
    let response = server
        .post_with_cookie(&format!("/toggle_reaction/{tip_id}/dislike"), &cookie)
        .await
        .unwrap();
    let status: ReactionStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((status.likes, status.dislikes), (2, 1));
    assert!(!status.liked);
    assert!(status.disliked);

    // and switching back restores the original counts
    let response = server
        .post_with_cookie(&format!("/toggle_reaction/{tip_id}/like"), &cookie)
        .await
        .unwrap();
    let status: ReactionStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((status.likes, status.dislikes), (3, 0));
    assert!(status.liked);
    assert!(!status.disliked);
}

#[tokio::test]
async fn test_counters_clamp_at_zero() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let tip_id = seed_tip(&server.pool, &format!("Clamp test ({})", unique_suffix()))
        .await
        .unwrap();

    let response = server
        .post(&format!("/toggle_reaction/{tip_id}/dislike"))
        .await
        .unwrap();
    let cookie = extract_visitor_cookie(&response).expect("first reaction mints a visitor cookie");
    let status: ReactionStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status.dislikes, 1);

    // zero the counter behind the ledger's back; undoing the recorded
    // dislike must clamp at zero instead of going negative
    sqlx::query("UPDATE tips SET dislikes = 0 WHERE id = $1")
        .bind(tip_id)
        .execute(&server.pool)
        .await
        .unwrap();

    let response = server
        .post_with_cookie(&format!("/toggle_reaction/{tip_id}/dislike"), &cookie)
        .await
        .unwrap();
    let status: ReactionStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status.dislikes, 0);
    assert!(!status.disliked);
}

#[tokio::test]
async fn test_reaction_on_missing_tip_returns_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post(&format!("/toggle_reaction/{MISSING_TIP_ID}/like"))
        .await
        .unwrap();
    // a failed reaction must not hand out an identity either
    assert!(extract_visitor_cookie(&response).is_none());

    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_TIP");

    let count = reaction_count_for_tip(&server.pool, MISSING_TIP_ID).await.unwrap();
    assert_eq!(count, 0, "no ledger entry may be written for a missing tip");
}

#[tokio::test]
async fn test_reaction_with_garbage_id_returns_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.post("/toggle_reaction/not-a-tip/like").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "NOT_FOUND");
}

#[tokio::test]
async fn test_unknown_reaction_kind_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let tip_id = seed_tip(&server.pool, &format!("Kind test ({})", unique_suffix()))
        .await
        .unwrap();

    let response = server
        .post(&format!("/toggle_reaction/{tip_id}/love"))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_REACTION");

    let count = reaction_count_for_tip(&server.pool, tip_id).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_visitor_cookie_minted_once() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let suffix = unique_suffix();
    let first = seed_tip(&server.pool, &format!("Cookie first ({suffix})"))
        .await
        .unwrap();
    let second = seed_tip(&server.pool, &format!("Cookie second ({suffix})"))
        .await
        .unwrap();

    let response = server
        .post(&format!("/toggle_reaction/{first}/like"))
        .await
        .unwrap();
    let cookie = extract_visitor_cookie(&response).expect("first reaction mints a visitor cookie");
    assert_status(response, StatusCode::OK).await.unwrap();

    // a returning visitor keeps the identity they already have
    let response = server
        .post_with_cookie(&format!("/toggle_reaction/{second}/like"), &cookie)
        .await
        .unwrap();
    assert!(extract_visitor_cookie(&response).is_none());
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_two_visitors_react_independently() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let tip_id = seed_tip(&server.pool, &format!("Two visitors ({})", unique_suffix()))
        .await
        .unwrap();

    let response = server
        .post(&format!("/toggle_reaction/{tip_id}/like"))
        .await
        .unwrap();
    let first_cookie =
        extract_visitor_cookie(&response).expect("first reaction mints a visitor cookie");
    let status: ReactionStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status.likes, 1);

    // a second visitor adds their own like
    let response = server
        .post(&format!("/toggle_reaction/{tip_id}/like"))
        .await
        .unwrap();
    let status: ReactionStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status.likes, 2);
    assert!(status.liked);

    // the first visitor undoing theirs leaves the second one standing
    let response = server
        .post_with_cookie(&format!("/toggle_reaction/{tip_id}/like"), &first_cookie)
        .await
        .unwrap();
    let status: ReactionStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status.likes, 1);
    assert!(!status.liked);
}

// ============================================================================
// Front Page Tests
// ============================================================================

#[tokio::test]
async fn test_front_page_returns_daily_pick() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    seed_tip(&server.pool, &format!("Pickable tip ({})", unique_suffix()))
        .await
        .unwrap();

    let response = server.get("/").await.unwrap();
    let page: FrontPageResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let pick = page.daily_pick.expect("a non-empty store yields a pick");
    assert!(!pick.body.is_empty());
    assert!(!pick.liked);
    assert!(pick.likes >= 0);
}

#[tokio::test]
async fn test_daily_pick_stable_and_replaced_when_unsafe() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    seed_tip(&server.pool, &format!("Stable pick ({})", unique_suffix()))
        .await
        .unwrap();

    let response = server.get("/").await.unwrap();
    let page: FrontPageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let first = page.daily_pick.expect("a non-empty store yields a pick");

    let response = server.get("/").await.unwrap();
    let page: FrontPageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let second = page.daily_pick.expect("a non-empty store yields a pick");
    assert_eq!(first.id, second.id, "the pick must not change within a date");

    // corrupt the recorded pick with a tip that fails the safety filter
    let unsafe_id = seed_tip(
        &server.pool,
        &format!("{UNSAFE_BODY} ({})", unique_suffix()),
    )
    .await
    .unwrap();

    let redis_url = std::env::var("REDIS_URL").unwrap();
    let redis = RedisPool::new(RedisPoolConfig {
        url: redis_url,
        max_connections: 2,
    })
    .unwrap();
    let picks = DailyPickStore::new(redis);
    picks
        .replace(Utc::now().date_naive(), TipId::new(unsafe_id))
        .await
        .unwrap();

    // the invalidated pick is replaced, never served
    let response = server.get("/").await.unwrap();
    let page: FrontPageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let third = page.daily_pick.expect("a safe replacement is picked");
    assert_ne!(third.id, unsafe_id.to_string());

    let response = server.get("/").await.unwrap();
    let page: FrontPageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let fourth = page.daily_pick.expect("a non-empty store yields a pick");
    assert_eq!(third.id, fourth.id, "the replacement is stable in turn");

    delete_tip(&server.pool, unsafe_id).await.unwrap();
}
