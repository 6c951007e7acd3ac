//! API handlers for Bookshare REST endpoints

pub mod books;
pub mod categories;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
    routing::get,
    Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// Extractor for the calling user's ID, resolved from the bearer token
pub struct AuthenticatedUser(pub i32);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|e| AppError::Authentication(e.to_string()))?;

        let user_id = state.services.auth.authenticate(bearer.token())?;
        Ok(AuthenticatedUser(user_id))
    }
}

/// JSON body whose rejections are rendered as `ErrorResponse`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string whose rejections are rendered as `ErrorResponse`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Path parameters whose rejections are rendered as `ErrorResponse`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Categories
        .route("/categories", get(categories::list_categories))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::{body::Body, http::Request, response::Response, Router};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::{
        config::AuthConfig,
        models::user::UserClaims,
        repository::{
            books::MockBookStore, borrows::MockBorrowStore, categories::MockCategoryStore,
            users::MockUserStore, Repository,
        },
        services::{auth::JwtAuthenticator, books::BookService, Services},
        AppState,
    };

    pub const SECRET: &str = "router-test-secret";

    /// Mocked stores wired into the real router
    #[derive(Default)]
    pub struct Mocks {
        pub books: MockBookStore,
        pub users: MockUserStore,
        pub categories: MockCategoryStore,
        pub borrows: MockBorrowStore,
    }

    impl Mocks {
        pub fn into_router(self) -> Router {
            let auth_config = AuthConfig {
                jwt_secret: SECRET.to_string(),
            };
            let pool = PgPoolOptions::new()
                .connect_lazy("postgres://bookshare@localhost/bookshare")
                .expect("lazy pool");
            let services = Services {
                books: BookService::new(
                    Arc::new(self.books),
                    Arc::new(self.users),
                    Arc::new(self.categories),
                    Arc::new(self.borrows),
                ),
                auth: Arc::new(JwtAuthenticator::new(&auth_config)),
                repository: Repository::new(pool),
            };
            let state = AppState {
                services: Arc::new(services),
            };
            super::create_router(state)
        }
    }

    pub fn bearer(user_id: i32) -> String {
        let token = UserClaims::new(user_id, 1).create_token(SECRET).unwrap();
        format!("Bearer {}", token)
    }

    pub async fn send(router: Router, request: Request<Body>) -> (axum::http::StatusCode, serde_json::Value) {
        let response: Response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}
