// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::Json;

use crate::{
    auth::LOGIN_PATH,
    models::WelcomeResponse,
};

/// Public landing document pointing at the login and signup routes.
#[utoipa::path(
    get,
    path = "/",
    tag = "Home",
    responses(
        (status = 200, description = "Welcome", body = WelcomeResponse)
    )
)]
pub async fn home() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        service: env!("CARGO_PKG_NAME").to_string(),
        login: LOGIN_PATH.to_string(),
        signup: "/signup".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn welcome_links_to_login_and_signup() {
        let Json(body) = home().await;
        assert_eq!(body.login, "/login");
        assert_eq!(body.signup, "/signup");
        assert_eq!(body.service, "noticeboard-server");
    }
}
