//! HTTP integration tests, driving the router in-process

use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Request, Response, StatusCode,
    },
    Router,
};
use bookloan_server::{
    api,
    config::{AppConfig, AuthConfig, DatabaseConfig},
    db, AppState,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    _dir: TempDir,
}

async fn setup_test_app() -> TestApp {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let database = DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("library.db").display()),
        max_connections: 1,
    };
    let pool = db::connect(&database).await.expect("Failed to open database");

    let config = AppConfig {
        database,
        auth: AuthConfig {
            session_secret: "integration-secret".to_string(),
            ..AuthConfig::default()
        },
        ..AppConfig::default()
    };

    TestApp {
        router: api::create_router(AppState::new(pool, config)),
        _dir: dir,
    }
}

impl TestApp {
    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .expect("Request failed")
    }

    async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(request.body(Body::from(form.to_string())).unwrap())
            .await
            .expect("Request failed")
    }

    /// Log in and return the `session=...` cookie pair
    async fn login(&self, name: &str, password: &str) -> String {
        let response = self
            .post_form("/login", &format!("username={}&password={}", name, password), None)
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/");
        session_cookie(&response).expect("No session cookie")
    }

    async fn seed(&self) -> String {
        for (path, name) in [
            ("/employees/add", "clerk"),
            ("/students/add", "ana"),
            ("/students/add", "bruno"),
        ] {
            let response = self.post_form(path, &format!("name={}&password=pw", name), None).await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
        }
        let response = self
            .post_form(
                "/books/add",
                "title=Dom+Casmurro&publisher=Garnier&year=1899&total_quantity=2",
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        self.login("clerk", "pw").await
    }

    async fn book_json(&self, id: i64) -> Value {
        let response = self.get(&format!("/api/v1/books/{}", id), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await
    }
}

fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("session=") && !value.starts_with("session=;"))
        .map(|value| value.split(';').next().unwrap_or_default().to_string())
}

async fn text_body(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;

    let response = app.get("/api/v1/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");

    let response = app.get("/api/v1/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ready");
}

#[tokio::test]
async fn test_landing_page() {
    let app = setup_test_app().await;

    let response = app.get("/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = text_body(response).await;
    assert!(body.contains("Books currently on loan: 0"));
    assert!(body.contains(r#"href="/login""#));
}

#[tokio::test]
async fn test_unauthenticated_loan_redirects_to_login() {
    let app = setup_test_app().await;

    for path in ["/loan", "/return", "/report"] {
        let response = app.get(path, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(response.headers()[LOCATION], "/login");
    }

    let response = app.post_form("/loan", "student_id=1&book_id=1", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/login");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = setup_test_app().await;
    app.seed().await;

    let response = app.post_form("/login", "username=ana&password=wrong", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/login");
    assert!(session_cookie(&response).is_none());

    let flash = response.headers()[SET_COOKIE].to_str().unwrap().split(';').next().unwrap().to_string();
    let response = app.get("/login", Some(&flash)).await;
    assert!(text_body(response).await.contains("Invalid name or password."));
}

#[tokio::test]
async fn test_student_session_cannot_lend() {
    let app = setup_test_app().await;
    app.seed().await;
    let student = app.login("ana", "pw").await;

    let response = app.get("/loan", Some(&student)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/login");

    let body = text_body(app.get("/", Some(&student)).await).await;
    assert!(body.contains("Signed in as <strong>ana</strong> (student)"));
}

#[tokio::test]
async fn test_forged_session_is_ignored() {
    let app = setup_test_app().await;

    let response = app.get("/loan", Some("session=not-a-token")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/login");
}

#[tokio::test]
async fn test_loan_and_return_round_trip() {
    let app = setup_test_app().await;
    let clerk = app.seed().await;

    let form = text_body(app.get("/loan", Some(&clerk)).await).await;
    assert!(form.contains("Dom Casmurro (2 of 2 available)"));

    // ana = student 1, bruno = student 2
    let response = app.post_form("/loan", "student_id=1&book_id=1", Some(&clerk)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/loan");
    assert_eq!(app.book_json(1).await["available_quantity"], 1);

    let response = app.post_form("/loan", "student_id=2&book_id=1", Some(&clerk)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.book_json(1).await["available_quantity"], 0);

    let response = app.get("/api/v1/students/1/loans", Some(&clerk)).await;
    assert_eq!(json_body(response).await, serde_json::json!([1]));

    let response = app.post_form("/return", "student_id=1&book_id=1", Some(&clerk)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/return");
    assert_eq!(app.book_json(1).await["available_quantity"], 1);

    let response = app.get("/api/v1/students/1/loans", Some(&clerk)).await;
    assert_eq!(json_body(response).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_loan_rules_surface_as_messages() {
    let app = setup_test_app().await;
    let clerk = app.seed().await;

    let response = app.post_form("/loan", "student_id=99&book_id=1", Some(&clerk)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    app.post_form("/loan", "student_id=1&book_id=1", Some(&clerk)).await;
    app.post_form("/loan", "student_id=2&book_id=1", Some(&clerk)).await;
    let response = app.post_form("/loan", "student_id=1&book_id=1", Some(&clerk)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app.post_form("/return", "student_id=2&book_id=7", Some(&clerk)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(text_body(response).await.contains("not on loan"));
}

#[tokio::test]
async fn test_student_limit_over_http() {
    let app = setup_test_app().await;
    let clerk = app.seed().await;
    for title in ["B", "C", "D"] {
        let form = format!("title={}&publisher=P&year=2000&total_quantity=1", title);
        app.post_form("/books/add", &form, None).await;
    }

    for book_id in 1..=3 {
        let response = app
            .post_form("/loan", &format!("student_id=1&book_id={}", book_id), Some(&clerk))
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let response = app.post_form("/loan", "student_id=1&book_id=4", Some(&clerk)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.book_json(4).await["available_quantity"], 1);
}

#[tokio::test]
async fn test_report_lists_loans_in_range() {
    let app = setup_test_app().await;
    let clerk = app.seed().await;
    app.post_form("/loan", "student_id=1&book_id=1", Some(&clerk)).await;

    let response = app
        .post_form("/report", "start_date=2000-01-01&end_date=2999-12-31", Some(&clerk))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = text_body(response).await;
    assert!(body.contains("Dom Casmurro"));
    assert!(body.contains("on loan"));

    let response = app
        .post_form("/report", "start_date=2000-01-02&end_date=2000-01-01", Some(&clerk))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_listings() {
    let app = setup_test_app().await;
    app.seed().await;

    let body = text_body(app.get("/lista_livros", None).await).await;
    assert!(body.contains("Dom Casmurro"));
    assert!(body.contains("Garnier"));

    let body = text_body(app.get("/users", None).await).await;
    assert!(body.contains("ana"));
    assert!(body.contains("clerk"));

    let body = json_body(app.get("/api/v1/users", None).await).await;
    assert_eq!(body["students"].as_array().unwrap().len(), 2);
    assert_eq!(body["employees"][0]["name"], "clerk");
    assert!(body["employees"][0].get("password").is_none());
}

#[tokio::test]
async fn test_duplicate_name_is_rejected() {
    let app = setup_test_app().await;
    app.seed().await;

    let response = app.post_form("/employees/add", "name=Ana&password=x", None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let app = setup_test_app().await;
    let clerk = app.seed().await;

    let response = app.get("/logout", Some(&clerk)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cleared = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with("session=") && v.contains("Max-Age=0"));
    assert!(cleared);
}
