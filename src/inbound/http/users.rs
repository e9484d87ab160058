//! Account API handlers.
//!
//! ```text
//! POST /api/v1/signup {"username":"alice","email":"a@example.org","password":"secret1"}
//! POST /api/v1/login  {"username":"alice","password":"secret1"}
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    AuthValidationError, Error, LoginCredentials, MirrorRecord, ProfileUpdate, SavedKind,
    SignupDetails, User, UserId, UserValidationError,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Signup request body for `POST /api/v1/signup`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Profile edit body for `PUT /api/v1/users/profile`.
///
/// The current password must be re-entered; edits are re-authenticated even
/// inside a live session.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub username: String,
    pub email: String,
    pub current_password: String,
}

fn validation_field(err: &AuthValidationError) -> &'static str {
    match err {
        AuthValidationError::EmptyUsername => "username",
        AuthValidationError::EmptyPassword | AuthValidationError::PasswordTooShort { .. } => {
            "password"
        }
        AuthValidationError::Identity(UserValidationError::InvalidEmail) => "email",
        AuthValidationError::Identity(_) => "username",
    }
}

fn map_validation_error(err: AuthValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": validation_field(&err) }))
}

fn parse_path_user(raw: &str) -> Result<UserId, Error> {
    UserId::parse(raw).map_err(|_| Error::invalid_request("user id is not valid"))
}

/// Create an account and establish a session for it.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username or email already taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let details =
        SignupDetails::try_from_parts(&payload.username, &payload.email, &payload.password)
            .map_err(map_validation_error)?;
    let user = state.accounts.sign_up(&details).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_validation_error)?;
    let user = state.accounts.login(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Ok().json(user))
}

/// Clear the session, dropping both the user and any upstream token state.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}

/// Fetch a user's public profile.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Invalid user id", body = Error),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "showUser",
    security([])
)]
#[get("/users/{id}")]
pub async fn show_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_path_user(&path)?;
    let user = state.accounts.fetch(&id).await?;
    Ok(web::Json(user))
}

/// Edit the signed-in user's profile.
#[utoipa::path(
    put,
    path = "/api/v1/users/profile",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Not signed in or wrong password", body = Error),
        (status = 409, description = "Username or email already taken", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateProfile"
)]
#[put("/users/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let payload = payload.into_inner();
    let update =
        ProfileUpdate::try_from_parts(&payload.username, &payload.email, &payload.current_password)
            .map_err(map_validation_error)?;
    let user = state.accounts.update_profile(&user_id, &update).await?;
    Ok(web::Json(user))
}

/// Delete the signed-in user's account; saved entities cascade.
#[utoipa::path(
    delete,
    path = "/api/v1/users",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteAccount"
)]
#[delete("/users")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.accounts.delete_account(&user_id).await?;
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}

/// Animals the given user has saved.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/animals",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Saved animals", body = [MirrorRecord]),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["users"],
    operation_id = "likedAnimals"
)]
#[get("/users/{id}/animals")]
pub async fn liked_animals(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<MirrorRecord>>> {
    session.require_user_id()?;
    let target = parse_path_user(&path)?;
    let records = state.likes.liked(&target, SavedKind::Animal).await?;
    Ok(web::Json(records))
}

/// Organizations the given user has saved.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/organizations",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Saved organizations", body = [MirrorRecord]),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["users"],
    operation_id = "likedOrganizations"
)]
#[get("/users/{id}/organizations")]
pub async fn liked_organizations(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<MirrorRecord>>> {
    session.require_user_id()?;
    let target = parse_path_user(&path)?;
    let records = state.likes.liked(&target, SavedKind::Organization).await?;
    Ok(web::Json(records))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::{test as actix_test, App};
    use mockall::predicate;
    use serde_json::Value;

    use crate::domain::ports::{MockAccounts, MockCatalogBrowse, MockLikes};
    use crate::domain::{EmailAddress, Username};
    use crate::inbound::http::test_utils::{state_with, test_session_middleware};

    fn alice() -> User {
        User::new(
            UserId::random(),
            Username::new("alice").expect("username"),
            EmailAddress::new("alice@example.org").expect("email"),
        )
    }

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .service(
                web::scope("/api/v1")
                    .service(signup)
                    .service(login)
                    .service(logout)
                    .service(update_profile)
                    .service(delete_account)
                    .service(liked_animals)
                    .service(liked_organizations)
                    .service(show_user),
            )
    }

    fn session_cookie(
        res: &actix_web::dev::ServiceResponse,
    ) -> actix_web::cookie::Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned()
    }

    #[actix_web::test]
    async fn signup_creates_account_and_sets_a_session() {
        let user = alice();
        let returned = user.clone();
        let mut accounts = MockAccounts::new();
        accounts
            .expect_sign_up()
            .withf(|details| details.username().as_ref() == "alice")
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let app = actix_test::init_service(test_app(state_with(
            accounts,
            MockCatalogBrowse::new(),
            MockLikes::new(),
        )))
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/signup")
                .set_json(&SignupRequest {
                    username: "alice".into(),
                    email: "alice@example.org".into(),
                    password: "longenough".into(),
                })
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), actix_web::http::StatusCode::CREATED);
        let _ = session_cookie(&res);
        let body = actix_test::read_body(res).await;
        let value: Value = serde_json::from_slice(&body).expect("user payload");
        assert_eq!(value.get("username").and_then(Value::as_str), Some("alice"));
    }

    #[actix_web::test]
    async fn signup_rejects_a_short_password_before_the_service_runs() {
        let mut accounts = MockAccounts::new();
        accounts.expect_sign_up().times(0);

        let app = actix_test::init_service(test_app(state_with(
            accounts,
            MockCatalogBrowse::new(),
            MockLikes::new(),
        )))
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/signup")
                .set_json(&SignupRequest {
                    username: "alice".into(),
                    email: "alice@example.org".into(),
                    password: "short".into(),
                })
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body = actix_test::read_body(res).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(
            value
                .get("details")
                .and_then(|d| d.get("field"))
                .and_then(Value::as_str),
            Some("password")
        );
    }

    #[actix_web::test]
    async fn login_round_trip_grants_access_to_gated_endpoints() {
        let user = alice();
        let id = *user.id();
        let returned = user.clone();
        let mut accounts = MockAccounts::new();
        accounts
            .expect_login()
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let mut likes = MockLikes::new();
        likes
            .expect_liked()
            .with(predicate::eq(id), predicate::eq(SavedKind::Animal))
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let app = actix_test::init_service(test_app(state_with(
            accounts,
            MockCatalogBrowse::new(),
            likes,
        )))
        .await;

        let login_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(&LoginRequest {
                    username: "alice".into(),
                    password: "letmein".into(),
                })
                .to_request(),
        )
        .await;
        assert!(login_res.status().is_success());
        let cookie = session_cookie(&login_res);

        let liked_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/users/{id}/animals"))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert!(liked_res.status().is_success());
    }

    #[actix_web::test]
    async fn liked_listing_rejects_without_a_session_and_never_touches_storage() {
        let mut likes = MockLikes::new();
        likes.expect_liked().times(0);

        let app = actix_test::init_service(test_app(state_with(
            MockAccounts::new(),
            MockCatalogBrowse::new(),
            likes,
        )))
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/users/{}/animals", UserId::random()))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn profile_update_requires_a_session() {
        let mut accounts = MockAccounts::new();
        accounts.expect_update_profile().times(0);

        let app = actix_test::init_service(test_app(state_with(
            accounts,
            MockCatalogBrowse::new(),
            MockLikes::new(),
        )))
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/users/profile")
                .set_json(&ProfileUpdateRequest {
                    username: "alice2".into(),
                    email: "alice2@example.org".into(),
                    current_password: "letmein".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn duplicate_signup_maps_to_conflict() {
        let mut accounts = MockAccounts::new();
        accounts
            .expect_sign_up()
            .returning(|_| Err(Error::duplicate_identity("username is already taken")));

        let app = actix_test::init_service(test_app(state_with(
            accounts,
            MockCatalogBrowse::new(),
            MockLikes::new(),
        )))
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/signup")
                .set_json(&SignupRequest {
                    username: "alice".into(),
                    email: "alice@example.org".into(),
                    password: "longenough".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), actix_web::http::StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn show_user_is_public() {
        let user = alice();
        let id = *user.id();
        let returned = user.clone();
        let mut accounts = MockAccounts::new();
        accounts
            .expect_fetch()
            .with(predicate::eq(id))
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let app = actix_test::init_service(test_app(state_with(
            accounts,
            MockCatalogBrowse::new(),
            MockLikes::new(),
        )))
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/users/{id}"))
                .to_request(),
        )
        .await;
        assert!(res.status().is_success());
    }
}
