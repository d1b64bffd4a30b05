//! Calendar page integration tests: every action redirects back to the page

mod helpers;

use axum::{http::StatusCode, middleware};
use helpers::{directory_app, get, post, post_form, test_app};
use temp_dir::TempDir;
use schoolmeal::middleware::cache_control_middleware;
use schoolmeal_calendar::ViewMode;

fn assert_redirects(response: helpers::TestResponse) {
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/calendar"));
}

#[tokio::test]
async fn test_index_redirects_to_calendar() {
    let (app, _) = test_app().await;

    assert_redirects(get(&app, "/").await);
}

#[tokio::test]
async fn test_calendar_page_renders_month() {
    let (app, _) = test_app().await;

    let response = get(&app, "/calendar").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("2025년 5월"));
    assert!(response.body.contains("어린이날"));
    assert!(response.body.contains(r#"action="/calendar/days/2""#));
    assert!(!response.body.contains(r#"action="/calendar/days/3""#));
    assert!(!response.body.contains("menu-detail"));
}

#[tokio::test]
async fn test_navigation_loads_adjacent_months() {
    let (app, state) = test_app().await;

    assert_redirects(post(&app, "/calendar/next").await);

    let page = get(&app, "/calendar").await;
    assert!(page.body.contains("2025년 6월"));
    assert!(!page.body.contains(r#"action="/calendar/days/"#));
    assert!(!state.page.lock().await.is_loading());

    assert_redirects(post(&app, "/calendar/prev").await);
    assert_redirects(post(&app, "/calendar/prev").await);

    let page = get(&app, "/calendar").await;
    assert!(page.body.contains("2025년 4월"));
}

#[tokio::test]
async fn test_concurrent_navigation_settles_on_last_month() {
    let (app, state) = test_app().await;

    let responses =
        futures::future::join_all((0..3).map(|_| post(&app, "/calendar/next"))).await;
    assert!(responses.iter().all(|r| r.status == StatusCode::SEE_OTHER));

    let page = state.page.lock().await;
    assert_eq!(page.view().month().period(), "2025-08");
    assert!(!page.is_loading());
    assert!(page.menus().is_empty());
}

#[tokio::test]
async fn test_selecting_a_day_shows_its_menu() {
    let (app, state) = test_app().await;

    assert_redirects(post(&app, "/calendar/days/2").await);

    let page = get(&app, "/calendar").await;
    assert!(page.body.contains("menu-detail"));
    assert!(page.body.contains("5월 2일 (금)"));

    let items = state.page.lock().await.menus().get("2025-05-02").unwrap().menu_items.clone();
    for item in items {
        assert!(page.body.contains(&item));
    }

    // Weekend days have no menu to select
    assert_redirects(post(&app, "/calendar/days/3").await);
    assert!(state.page.lock().await.view().selected().is_none());
    assert!(!get(&app, "/calendar").await.body.contains("menu-detail"));
}

#[tokio::test]
async fn test_day_out_of_range_is_rejected() {
    let (app, _) = test_app().await;

    assert_eq!(post(&app, "/calendar/days/300").await.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chart_mode_and_breakdown() {
    let (app, state) = test_app().await;

    assert_redirects(post(&app, "/calendar/toggle").await);
    assert_eq!(state.page.lock().await.view().mode(), ViewMode::WasteChart);

    let page = get(&app, "/calendar").await;
    assert!(page.body.contains("일별 잔반률"));
    assert!(page.body.contains("월 평균 잔반률"));
    assert!(page.body.contains(r#"action="/calendar/chart/2025-05-02""#));

    assert_redirects(post(&app, "/calendar/chart/2025-05-02").await);
    let page = get(&app, "/calendar").await;
    assert!(page.body.contains("5월 2일 메뉴별 잔반률"));
    assert_eq!(state.page.lock().await.view().breakdown().unwrap().len(), 5);

    assert_redirects(post(&app, "/calendar/chart/2025-05-13").await);
    let page = get(&app, "/calendar").await;
    assert!(page.body.contains("잔반률 데이터 없음"));

    assert_redirects(post(&app, "/calendar/toggle").await);
    let view = state.page.lock().await.view().clone();
    assert_eq!(view.mode(), ViewMode::Calendar);
    assert!(view.breakdown().is_none());
}

#[tokio::test]
async fn test_generate_shows_next_month() {
    let (app, state) = test_app().await;

    assert_redirects(post(&app, "/calendar/generate").await);

    let page = get(&app, "/calendar").await;
    assert!(page.body.contains("2025년 6월"));
    assert!(page.body.contains(r#"action="/calendar/days/2""#));
    assert_eq!(state.page.lock().await.menus().len(), 21);
}

#[tokio::test]
async fn test_failed_generate_keeps_current_month() {
    let dir = TempDir::new().unwrap();
    let (app, state) = directory_app(dir.path()).await;

    let response = post(&app, "/calendar/generate").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);

    let page = state.page.lock().await;
    assert!(!page.is_loading());
    assert_eq!(page.view().month().period(), "2025-05");
    drop(page);

    let body = get(&app, "/calendar").await.body;
    assert!(body.contains("2025년 5월"));
    assert!(!body.contains("식단을 불러오는 중입니다"));
}

#[tokio::test]
async fn test_school_holiday_form() {
    let (app, state) = test_app().await;

    assert_redirects(post_form(&app, "/calendar/holidays", "date=2025-05-23").await);
    assert!(state.holidays.read().await.is_holiday("2025-05-23"));

    let page = get(&app, "/calendar").await;
    assert!(page.body.contains(r#"action="/calendar/holidays/2025-05-23/delete""#));

    assert_redirects(post(&app, "/calendar/holidays/2025-05-23/delete").await);
    assert!(!state.holidays.read().await.is_holiday("2025-05-23"));

    assert_redirects(post_form(&app, "/calendar/holidays", "date=tomorrow").await);
    assert_eq!(state.holidays.read().await.school_holidays().count(), 0);
}

#[tokio::test]
async fn test_responses_are_not_cached() {
    let (app, _) = test_app().await;
    let app = app.layer(middleware::from_fn(cache_control_middleware));

    let response = get(&app, "/calendar").await;

    assert_eq!(
        response.cache_control.as_deref(),
        Some("no-store, no-cache, must-revalidate, proxy-revalidate")
    );
}
