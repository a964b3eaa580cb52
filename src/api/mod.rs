// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::{HeaderName, Request},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{authenticate, authorize, enforce_access, AuthenticatedUser, Role},
    models::{CreatePostRequest, SignupRequest, UserResponse, WelcomeResponse},
    state::AppState,
    stopwatch::stopwatch,
    storage::{Note, Notice},
};

pub mod admin;
pub mod health;
pub mod home;
pub mod notes;
pub mod notices;
pub mod users;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the application router.
///
/// Layers run outermost first: request id, trace, stopwatch, login/logout,
/// identity resolution, access policy, then the handler. Login and logout
/// have no routes of their own; the authentication layer answers them.
pub fn router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "http.request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    let routes = Router::new()
        .route("/", get(home::home))
        .route("/home", get(home::home))
        .route("/health", get(health::health))
        .route("/signup", axum::routing::post(users::signup))
        .route("/users/me", get(users::get_current_user))
        .route(
            "/note",
            get(notes::list_notes)
                .post(notes::create_note)
                .delete(notes::delete_note),
        )
        .route("/admin", get(admin::list_all_notes))
        .route(
            "/notice",
            get(notices::list_notices)
                .post(notices::create_notice)
                .delete(notices::delete_notice),
        );

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn_with_state(state.clone(), enforce_access))
        .layer(middleware::from_fn_with_state(state.clone(), authorize))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(middleware::from_fn(stopwatch))
        .layer(trace_layer)
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        home::home,
        health::health,
        users::signup,
        users::get_current_user,
        notes::list_notes,
        notes::create_note,
        notes::delete_note,
        admin::list_all_notes,
        notices::list_notices,
        notices::create_notice,
        notices::delete_notice
    ),
    components(
        schemas(
            Role,
            AuthenticatedUser,
            SignupRequest,
            UserResponse,
            CreatePostRequest,
            WelcomeResponse,
            Note,
            Notice,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Home", description = "Public landing routes"),
        (name = "Health", description = "Liveness probe"),
        (name = "Users", description = "Signup and current user"),
        (name = "Notes", description = "Personal notes"),
        (name = "Notices", description = "Shared notice board"),
        (name = "Admin", description = "Administrator views")
    )
)]
struct ApiDoc;
