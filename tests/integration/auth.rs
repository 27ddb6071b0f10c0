use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;

use videobelajar_server::entity::user;

use crate::common::{TestApp, routes};

fn register_body(email: &str, phone: &str) -> serde_json::Value {
    json!({
        "full_name": "Budi Santoso",
        "email": email,
        "gender": "male",
        "phone_number": phone,
        "password": "rahasia-sekali",
    })
}

mod registration {
    use super::*;

    #[tokio::test]
    async fn new_user_can_register() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &register_body("budi@example.com", "+628123456789"),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["success"], true);
        assert!(res.body["data"]["id"].is_number());
        assert_eq!(res.body["data"]["email"], "budi@example.com");
        assert_eq!(res.body["data"]["email_verified"], false);
    }

    #[tokio::test]
    async fn duplicate_email_returns_409() {
        let app = TestApp::spawn().await;

        let first = app
            .post_without_token(
                routes::REGISTER,
                &register_body("budi@example.com", "+628123456789"),
            )
            .await;
        assert_eq!(first.status, 201, "{}", first.text);

        let res = app
            .post_without_token(
                routes::REGISTER,
                &register_body("budi@example.com", "+628999999999"),
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn duplicate_phone_returns_409() {
        let app = TestApp::spawn().await;

        let first = app
            .post_without_token(
                routes::REGISTER,
                &register_body("budi@example.com", "+628123456789"),
            )
            .await;
        assert_eq!(first.status, 201, "{}", first.text);

        let res = app
            .post_without_token(
                routes::REGISTER,
                &register_body("siti@example.com", "+628123456789"),
            )
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "PHONE_TAKEN");
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &register_body("not-an-email", "+628123456789"),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn registration_succeeds_even_though_mail_is_disabled() {
        // Best-effort delivery: NoopMailer only logs, registration still 201.
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &register_body("siti@example.com", "+628111111111"),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn registered_user_can_log_in() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("budi@example.com", "rahasia-sekali")
            .await;
        assert!(!token.is_empty());
    }

    #[tokio::test]
    async fn wrong_password_returns_401() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("budi@example.com", "rahasia-sekali")
            .await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "budi@example.com", "password": "salah-semua"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn unknown_email_returns_401() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "ghost@example.com", "password": "rahasia-sekali"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }
}

mod email_verification {
    use super::*;

    #[tokio::test]
    async fn token_from_registration_verifies_the_account() {
        let app = TestApp::spawn().await;
        app.post_without_token(
            routes::REGISTER,
            &register_body("budi@example.com", "+628123456789"),
        )
        .await;

        let stored = user::Entity::find()
            .filter(user::Column::Email.eq("budi@example.com"))
            .one(&app.db)
            .await
            .expect("DB query failed")
            .expect("User not found after registration");
        let token = stored
            .verifikasi_token
            .expect("Fresh user should have a verification token");

        let res = app.get_without_token(&routes::verify_email(&token)).await;
        assert_eq!(res.status, 200, "{}", res.text);

        // Token is consumed: the same link no longer works.
        let again = app.get_without_token(&routes::verify_email(&token)).await;
        assert_eq!(again.status, 404);

        let refreshed = user::Entity::find_by_id(stored.id)
            .one(&app.db)
            .await
            .expect("DB query failed")
            .expect("User vanished");
        assert!(refreshed.email_verified);
        assert!(refreshed.verifikasi_token.is_none());
    }

    #[tokio::test]
    async fn unknown_token_returns_404() {
        let app = TestApp::spawn().await;
        let res = app
            .get_without_token(&routes::verify_email("not-a-real-token"))
            .await;
        assert_eq!(res.status, 404);
    }
}

mod profile {
    use super::*;

    #[tokio::test]
    async fn profile_requires_a_token() {
        let app = TestApp::spawn().await;
        let res = app.get_without_token(routes::PROFILE).await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let app = TestApp::spawn().await;
        let res = app.get_with_token(routes::PROFILE, "not.a.jwt").await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn authenticated_user_sees_their_profile() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("budi@example.com", "rahasia-sekali")
            .await;

        let res = app.get_with_token(routes::PROFILE, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["email"], "budi@example.com");
    }

    #[tokio::test]
    async fn profile_fields_can_be_updated() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("budi@example.com", "rahasia-sekali")
            .await;

        let res = app
            .post_with_token(
                routes::PROFILE,
                &json!({"full_name": "Budi S.", "gender": "male"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["full_name"], "Budi S.");
    }

    #[tokio::test]
    async fn empty_profile_patch_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("budi@example.com", "rahasia-sekali")
            .await;

        let res = app.post_with_token(routes::PROFILE, &json!({}), &token).await;
        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn password_change_takes_effect_on_next_login() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("budi@example.com", "rahasia-sekali")
            .await;

        let res = app
            .post_with_token(
                routes::PROFILE,
                &json!({"password": "rahasia-baru-1"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let old = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "budi@example.com", "password": "rahasia-sekali"}),
            )
            .await;
        assert_eq!(old.status, 401);

        let new = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "budi@example.com", "password": "rahasia-baru-1"}),
            )
            .await;
        assert_eq!(new.status, 200, "{}", new.text);
    }
}

mod logout {
    use super::*;

    #[tokio::test]
    async fn logout_acknowledges_authenticated_user() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("budi@example.com", "rahasia-sekali")
            .await;

        let res = app.post_with_token(routes::LOGOUT, &json!({}), &token).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["success"], true);
    }

    #[tokio::test]
    async fn logout_without_token_is_rejected() {
        let app = TestApp::spawn().await;
        let res = app.post_without_token(routes::LOGOUT, &json!({})).await;
        assert_eq!(res.status, 401);
    }
}
