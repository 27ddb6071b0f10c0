use serde_json::{Value, json};

use crate::common::{TestApp, routes};

/// Seed five courses in kategori 1 with ascending prices and one outlier in
/// kategori 2, returning the auth token used.
async fn seed_catalog(app: &TestApp) -> String {
    let token = app
        .create_authenticated_user("admin@example.com", "rahasia-sekali")
        .await;
    let tutor_id = app.create_tutor("Budi Santoso").await;

    for (i, harga) in [150000.0, 250000.0, 350000.0, 450000.0, 550000.0]
        .into_iter()
        .enumerate()
    {
        app.create_kelas(
            &token,
            &format!("Kelas Desain {}", i + 1),
            TestApp::kelas_payload(1, tutor_id, harga),
        )
        .await;
    }

    app.create_kelas(
        &token,
        "Kelas Bisnis 1",
        TestApp::kelas_payload(2, tutor_id, 100000.0),
    )
    .await;

    token
}

fn prices(body: &Value) -> Vec<f64> {
    body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|item| item["harga"].as_f64().unwrap())
        .collect()
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn category_page_sorted_by_ascending_price() {
        let app = TestApp::spawn().await;
        seed_catalog(&app).await;

        let res = app
            .get_without_token(&format!(
                "{}?category=1&sort_by=harga&sort_order=asc&page=1&limit=2",
                routes::KELAS
            ))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(prices(&res.body), vec![150000.0, 250000.0]);
        assert_eq!(res.body["pagination"]["total_items"], 5);
        assert_eq!(res.body["pagination"]["total_pages"], 3);
        assert_eq!(res.body["pagination"]["current_page"], 1);
        assert_eq!(res.body["pagination"]["has_next"], true);
        assert_eq!(res.body["pagination"]["has_prev"], false);
    }

    #[tokio::test]
    async fn single_parameter_query_returns_the_same_envelope() {
        // A lone `category` must not bypass the paginated shape.
        let app = TestApp::spawn().await;
        seed_catalog(&app).await;

        let res = app
            .get_without_token(&format!("{}?category=2", routes::KELAS))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"].as_array().unwrap().len(), 1);
        assert!(res.body["pagination"].is_object(), "{}", res.text);
        assert!(res.body["filters"]["applied"].is_object());
        assert_eq!(res.body["pagination"]["total_items"], 1);
    }

    #[tokio::test]
    async fn total_matches_unpaginated_result_for_the_same_predicate() {
        let app = TestApp::spawn().await;
        seed_catalog(&app).await;

        let page = app
            .get_without_token(&format!("{}?category=1&limit=2", routes::KELAS))
            .await;
        let all = app
            .get_without_token(&format!("{}?category=1&limit=100", routes::KELAS))
            .await;

        assert_eq!(
            page.body["pagination"]["total_items"],
            all.body["data"].as_array().unwrap().len()
        );
    }

    #[tokio::test]
    async fn unknown_sort_field_falls_back_to_created_at() {
        let app = TestApp::spawn().await;
        seed_catalog(&app).await;

        let res = app
            .get_without_token(&format!(
                "{}?sort_by=id;%20DROP%20TABLE%20kelas&sort_order=asc",
                routes::KELAS
            ))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["filters"]["applied"]["sort_by"], "created_at");
    }

    #[tokio::test]
    async fn unknown_sort_order_falls_back_to_desc() {
        let app = TestApp::spawn().await;
        seed_catalog(&app).await;

        let res = app
            .get_without_token(&format!("{}?sort_order=sideways", routes::KELAS))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["filters"]["applied"]["sort_order"], "DESC");
    }

    #[tokio::test]
    async fn search_matches_title_and_instructor_name() {
        let app = TestApp::spawn().await;
        seed_catalog(&app).await;

        let by_title = app
            .get_without_token(&format!("{}?search=bisnis", routes::KELAS))
            .await;
        assert_eq!(by_title.body["pagination"]["total_items"], 1);

        let by_tutor = app
            .get_without_token(&format!("{}?search=santoso", routes::KELAS))
            .await;
        assert_eq!(by_tutor.body["pagination"]["total_items"], 6);
    }

    #[tokio::test]
    async fn like_wildcards_in_search_are_literal() {
        let app = TestApp::spawn().await;
        seed_catalog(&app).await;

        let res = app
            .get_without_token(&format!("{}?search=%25", routes::KELAS))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["pagination"]["total_items"], 0);
    }

    #[tokio::test]
    async fn price_range_bucket_token_is_honored() {
        let app = TestApp::spawn().await;
        seed_catalog(&app).await;

        let res = app
            .get_without_token(&format!("{}?price_range=200000-300000", routes::KELAS))
            .await;

        assert_eq!(res.body["pagination"]["total_items"], 1);
        assert_eq!(prices(&res.body), vec![250000.0]);
    }

    #[tokio::test]
    async fn camel_case_parameter_aliases_are_accepted() {
        let app = TestApp::spawn().await;
        seed_catalog(&app).await;

        let res = app
            .get_without_token(&format!(
                "{}?minPrice=400000&sortBy=harga&sortOrder=asc",
                routes::KELAS
            ))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(prices(&res.body), vec![450000.0, 550000.0]);
    }

    #[tokio::test]
    async fn malformed_numeric_filters_are_dropped_not_rejected() {
        let app = TestApp::spawn().await;
        seed_catalog(&app).await;

        let res = app
            .get_without_token(&format!("{}?min_price=mahal&limit=abc", routes::KELAS))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["pagination"]["total_items"], 6);
        assert_eq!(res.body["pagination"]["items_per_page"], 10);
    }

    #[tokio::test]
    async fn oversized_limit_is_clamped() {
        let app = TestApp::spawn().await;
        seed_catalog(&app).await;

        let res = app
            .get_without_token(&format!("{}?limit=5000", routes::KELAS))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["pagination"]["items_per_page"], 100);
    }
}

mod crud {
    use super::*;

    #[tokio::test]
    async fn create_requires_a_token() {
        let app = TestApp::spawn().await;
        let res = app
            .post_without_token(routes::KELAS, &TestApp::kelas_payload(1, 1, 100000.0))
            .await;
        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn duplicate_judul_returns_409_not_201() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("admin@example.com", "rahasia-sekali")
            .await;
        let tutor_id = app.create_tutor("Budi Santoso").await;

        app.create_kelas(&token, "Kelas X", TestApp::kelas_payload(1, tutor_id, 100000.0))
            .await;

        let mut payload = TestApp::kelas_payload(1, tutor_id, 200000.0);
        payload["judul"] = json!("Kelas X");
        let res = app.post_with_token(routes::KELAS, &payload, &token).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn zero_price_rejected_but_one_cent_accepted() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("admin@example.com", "rahasia-sekali")
            .await;
        let tutor_id = app.create_tutor("Budi Santoso").await;

        let mut payload = TestApp::kelas_payload(1, tutor_id, 0.0);
        payload["judul"] = json!("Kelas Gratis");
        let res = app.post_with_token(routes::KELAS, &payload, &token).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let mut payload = TestApp::kelas_payload(1, tutor_id, 0.01);
        payload["judul"] = json!("Kelas Murah");
        let res = app.post_with_token(routes::KELAS, &payload, &token).await;
        assert_eq!(res.status, 201, "{}", res.text);
    }

    #[tokio::test]
    async fn unknown_level_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("admin@example.com", "rahasia-sekali")
            .await;
        let tutor_id = app.create_tutor("Budi Santoso").await;

        let mut payload = TestApp::kelas_payload(1, tutor_id, 100000.0);
        payload["level"] = json!("expert");
        let res = app.post_with_token(routes::KELAS, &payload, &token).await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn dangling_kategori_reference_is_a_validation_error() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("admin@example.com", "rahasia-sekali")
            .await;
        let tutor_id = app.create_tutor("Budi Santoso").await;

        let res = app
            .post_with_token(
                routes::KELAS,
                &TestApp::kelas_payload(9999, tutor_id, 100000.0),
                &token,
            )
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
    }

    #[tokio::test]
    async fn get_returns_joined_record() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("admin@example.com", "rahasia-sekali")
            .await;
        let tutor_id = app.create_tutor("Budi Santoso").await;
        let id = app
            .create_kelas(&token, "Kelas Y", TestApp::kelas_payload(1, tutor_id, 100000.0))
            .await;

        let res = app.get_without_token(&routes::kelas(id)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["judul"], "Kelas Y");
        assert_eq!(res.body["data"]["nama_tutor"], "Budi Santoso");
        assert_eq!(res.body["data"]["nama_kategori"], "Pemasaran");
    }

    #[tokio::test]
    async fn unknown_id_returns_404() {
        let app = TestApp::spawn().await;
        let res = app.get_without_token(&routes::kelas(424242)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn patch_updates_only_supplied_fields_and_refreshes_updated_at() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("admin@example.com", "rahasia-sekali")
            .await;
        let tutor_id = app.create_tutor("Budi Santoso").await;
        let id = app
            .create_kelas(&token, "Kelas Z", TestApp::kelas_payload(1, tutor_id, 100000.0))
            .await;

        let before = app.get_without_token(&routes::kelas(id)).await;

        let res = app
            .patch_with_token(&routes::kelas(id), &json!({"harga": 175000.0}), &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["harga"], 175000.0);
        assert_eq!(res.body["data"]["judul"], "Kelas Z");
        assert_ne!(
            res.body["data"]["updated_at"],
            before.body["data"]["updated_at"]
        );
    }

    #[tokio::test]
    async fn put_and_patch_are_equivalent() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("admin@example.com", "rahasia-sekali")
            .await;
        let tutor_id = app.create_tutor("Budi Santoso").await;
        let id = app
            .create_kelas(&token, "Kelas W", TestApp::kelas_payload(1, tutor_id, 100000.0))
            .await;

        let res = app
            .put_with_token(&routes::kelas(id), &json!({"level": "advanced"}), &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["level"], "advanced");
    }

    #[tokio::test]
    async fn renaming_to_an_existing_judul_returns_409() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("admin@example.com", "rahasia-sekali")
            .await;
        let tutor_id = app.create_tutor("Budi Santoso").await;
        app.create_kelas(&token, "Kelas A", TestApp::kelas_payload(1, tutor_id, 100000.0))
            .await;
        let id = app
            .create_kelas(&token, "Kelas B", TestApp::kelas_payload(1, tutor_id, 100000.0))
            .await;

        let res = app
            .patch_with_token(&routes::kelas(id), &json!({"judul": "Kelas A"}), &token)
            .await;

        assert_eq!(res.status, 409);
    }

    #[tokio::test]
    async fn delete_returns_the_removed_record() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("admin@example.com", "rahasia-sekali")
            .await;
        let tutor_id = app.create_tutor("Budi Santoso").await;
        let id = app
            .create_kelas(&token, "Kelas Hapus", TestApp::kelas_payload(1, tutor_id, 100000.0))
            .await;

        let res = app.delete_with_token(&routes::kelas(id), &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "Deleted: Kelas Hapus");
        assert_eq!(res.body["data"]["judul"], "Kelas Hapus");
        assert_eq!(res.body["data"]["nama_tutor"], "Budi Santoso");

        let gone = app.delete_with_token(&routes::kelas(id), &token).await;
        assert_eq!(gone.status, 404);
    }
}

mod filters_and_stats {
    use super::*;

    #[tokio::test]
    async fn filter_options_list_categories_and_observed_ranges() {
        let app = TestApp::spawn().await;
        seed_catalog(&app).await;

        let res = app.get_without_token(routes::KELAS_FILTERS).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let categories = res.body["data"]["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 4);
        assert_eq!(
            res.body["data"]["levels"],
            json!(["beginner", "intermediate", "advanced"])
        );
        assert_eq!(res.body["data"]["instructors"][0]["nama_tutor"], "Budi Santoso");
        assert_eq!(res.body["data"]["price"]["min"], 100000.0);
        assert_eq!(res.body["data"]["price"]["max"], 550000.0);
    }

    #[tokio::test]
    async fn stats_aggregate_by_category_and_level() {
        let app = TestApp::spawn().await;
        seed_catalog(&app).await;

        let res = app.get_without_token(routes::KELAS_STATS).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["total_kelas"], 6);

        let by_category = res.body["data"]["by_category"].as_array().unwrap();
        assert_eq!(by_category.len(), 2);
        assert_eq!(by_category[0]["kategori_id"], 1);
        assert_eq!(by_category[0]["count"], 5);

        let by_level = res.body["data"]["by_level"].as_array().unwrap();
        assert_eq!(by_level[0]["level"], "beginner");
        assert_eq!(by_level[0]["count"], 6);

        assert_eq!(res.body["data"]["price"]["min"], 100000.0);
        assert_eq!(res.body["data"]["price"]["max"], 550000.0);
    }

    #[tokio::test]
    async fn stats_on_an_empty_catalog() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::KELAS_STATS).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["total_kelas"], 0);
        assert!(res.body["data"]["avg_rating"].is_null());
        assert!(res.body["data"]["price"]["min"].is_null());
    }
}
