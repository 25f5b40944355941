//! Post handlers - CRUD, feed and like toggling.

use actix_web::{HttpRequest, HttpResponse, web};

use postboard_core::domain::{FieldValue, Page, Post, PostChanges};
use postboard_shared::Paginated;
use postboard_shared::dto::{
    FeedQuery, LikeStatusResponse, LikeToggleResponse, PostRequest, PostResponse,
};
use serde_json::Value;

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        nome: post.nome,
        imagem: post.imagem,
        cor: post.cor,
        comentario: post.comentario,
        data_criacao: post.data_criacao,
        liked: post.liked,
    }
}

/// Numbers are accepted as their text form; booleans, lists and objects are not.
fn field_value(value: Value) -> FieldValue {
    match value {
        Value::Null => FieldValue::Null,
        Value::String(text) => FieldValue::Text(text),
        Value::Number(number) => FieldValue::Text(number.to_string()),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => FieldValue::Invalid,
    }
}

fn to_changes(req: PostRequest) -> PostChanges {
    PostChanges {
        nome: req.nome.map(field_value),
        imagem: req.imagem.map(field_value),
        cor: req.cor.map(field_value),
        comentario: req.comentario.map(field_value),
    }
}

/// POST /api/posts/
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(to_changes(body.into_inner())).await?;

    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /api/posts/{id}/detail/
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state.posts.retrieve(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PUT /api/posts/{id}/ - partial update
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(path.into_inner(), to_changes(body.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /api/posts/{id}/
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state.posts.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/posts/feed/?page=N&page_size=M
pub async fn feed(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<FeedQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page = state
        .posts
        .list_feed(query.page, query.page_size, &state.feed)
        .await?;

    Ok(HttpResponse::Ok().json(paginate(&req, &query, page)))
}

/// POST /api/posts/{id}/like/
pub async fn toggle_like(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let like = state.posts.toggle_like(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(LikeToggleResponse {
        id: like.id,
        liked: like.liked,
        message: like.message().to_string(),
    }))
}

/// GET /api/posts/{id}/like/
pub async fn like_status(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let like = state.posts.like_status(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(LikeStatusResponse {
        id: like.id,
        liked: like.liked,
    }))
}

/// Wrap a page in the `{count, next, previous, results}` envelope with
/// absolute links to the neighbouring pages.
fn paginate(req: &HttpRequest, query: &FeedQuery, page: Page<Post>) -> Paginated<PostResponse> {
    let conn = req.connection_info();
    let base = format!("{}://{}{}", conn.scheme(), conn.host(), req.path());

    let link = |number: u64| {
        let mut params = Vec::new();
        // The first page is linked without a page number.
        if number > 1 {
            params.push(format!("page={number}"));
        }
        if let Some(size) = query.page_size {
            params.push(format!("page_size={size}"));
        }
        if params.is_empty() {
            base.clone()
        } else {
            format!("{}?{}", base, params.join("&"))
        }
    };

    let next = page.has_next().then(|| link(page.page + 1));
    let previous = page.has_previous().then(|| link(page.page - 1));

    Paginated {
        count: page.count,
        next,
        previous,
        results: page.results.into_iter().map(to_response).collect(),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use postboard_core::domain::FeedConfig;
    use serde_json::{Value, json};

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    fn state() -> AppState {
        AppState::in_memory(FeedConfig {
            default_page_size: 2,
            ..FeedConfig::default()
        })
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(state()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_post_lifecycle() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts/")
            .set_json(json!({ "nome": "A", "cor": "red", "comentario": "hi" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["liked"], false);
        assert_eq!(created["imagem"], Value::Null);
        assert!(created["data_criacao"].is_string());

        let req = test::TestRequest::post().uri("/api/posts/1/like/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["liked"], true);
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("curtido"));
        assert!(!message.contains("descurtido"));

        let req = test::TestRequest::post().uri("/api/posts/1/like/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["liked"], false);
        assert!(body["message"].as_str().unwrap().contains("descurtido"));

        let req = test::TestRequest::delete().uri("/api/posts/1/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri("/api/posts/1/detail/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_create_rejects_invalid_fields() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts/")
            .set_json(json!({ "nome": "x".repeat(51), "cor": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["errors"]["nome"][0],
            "Ensure this field has no more than 50 characters."
        );
        assert_eq!(body["errors"]["cor"][0], "This field may not be blank.");
        assert_eq!(body["errors"]["comentario"][0], "This field is required.");

        // Nothing was persisted
        let req = test::TestRequest::get().uri("/api/posts/feed/").to_request();
        let feed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(feed["count"], 0);
    }

    #[actix_web::test]
    async fn test_create_rejects_malformed_json() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts/")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"], Value::Null);
    }

    #[actix_web::test]
    async fn test_wrong_typed_fields_are_reported_per_field() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts/")
            .set_json(json!({ "nome": ["x"], "cor": "red", "comentario": "hi" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"]["nome"][0], "Not a valid string.");
        assert_eq!(body["errors"]["cor"], Value::Null);

        // Numbers are taken as text
        let req = test::TestRequest::post()
            .uri("/api/posts/")
            .set_json(json!({ "nome": 42, "cor": "red", "comentario": "hi" }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["nome"], "42");

        let req = test::TestRequest::put()
            .uri("/api/posts/1/")
            .set_json(json!({ "comentario": { "text": "hi" } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["errors"]["comentario"][0], "Not a valid string.");
    }

    #[actix_web::test]
    async fn test_update_is_partial() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts/")
            .set_json(json!({
                "nome": "A",
                "cor": "red",
                "comentario": "hi",
                "imagem": "uploads/a.png"
            }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::put()
            .uri("/api/posts/1/")
            .set_json(json!({ "cor": "blue", "liked": true, "id": 99 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: Value = test::read_body_json(resp).await;

        assert_eq!(updated["id"], 1);
        assert_eq!(updated["cor"], "blue");
        assert_eq!(updated["nome"], "A");
        assert_eq!(updated["comentario"], "hi");
        assert_eq!(updated["imagem"], "uploads/a.png");
        assert_eq!(updated["liked"], false);
        assert_eq!(updated["data_criacao"], created["data_criacao"]);
    }

    #[actix_web::test]
    async fn test_invalid_update_leaves_post_unchanged() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts/")
            .set_json(json!({ "nome": "A", "cor": "red", "comentario": "hi" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::put()
            .uri("/api/posts/1/")
            .set_json(json!({ "nome": "B", "cor": "c".repeat(21) }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/posts/1/detail/").to_request();
        let post: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(post["nome"], "A");
        assert_eq!(post["cor"], "red");
    }

    #[actix_web::test]
    async fn test_missing_post_is_not_found_everywhere() {
        let app = app!();

        let requests = vec![
            test::TestRequest::get().uri("/api/posts/42/detail/"),
            test::TestRequest::put()
                .uri("/api/posts/42/")
                .set_json(json!({ "nome": "B" })),
            test::TestRequest::delete().uri("/api/posts/42/"),
            test::TestRequest::post().uri("/api/posts/42/like/"),
            test::TestRequest::get().uri("/api/posts/42/like/"),
        ];

        for req in requests {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        }
    }

    #[actix_web::test]
    async fn test_like_status_has_no_side_effects() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts/")
            .set_json(json!({ "nome": "A", "cor": "red", "comentario": "hi" }))
            .to_request();
        test::call_service(&app, req).await;

        for _ in 0..2 {
            let req = test::TestRequest::get().uri("/api/posts/1/like/").to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body, json!({ "id": 1, "liked": false }));
        }
    }

    #[actix_web::test]
    async fn test_feed_is_newest_first_and_paginated() {
        let app = app!();

        for nome in ["first", "second", "third"] {
            let req = test::TestRequest::post()
                .uri("/api/posts/")
                .set_json(json!({ "nome": nome, "cor": "red", "comentario": "hi" }))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/api/posts/feed/").to_request();
        let page: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page["count"], 3);
        assert_eq!(page["results"][0]["nome"], "third");
        assert_eq!(page["results"][1]["nome"], "second");
        assert_eq!(page["previous"], Value::Null);
        assert!(page["next"].as_str().unwrap().ends_with("/api/posts/feed/?page=2"));

        let req = test::TestRequest::get()
            .uri("/api/posts/feed/?page=2")
            .to_request();
        let page: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page["results"].as_array().unwrap().len(), 1);
        assert_eq!(page["results"][0]["nome"], "first");
        assert_eq!(page["next"], Value::Null);
        assert!(page["previous"].as_str().unwrap().ends_with("/api/posts/feed/"));

        let req = test::TestRequest::get()
            .uri("/api/posts/feed/?page=1&page_size=3")
            .to_request();
        let page: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page["results"].as_array().unwrap().len(), 3);
        assert_eq!(page["next"], Value::Null);
    }

    #[actix_web::test]
    async fn test_feed_rejects_out_of_range_page() {
        let app = app!();

        let req = test::TestRequest::get()
            .uri("/api/posts/feed/?page=5")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/api/posts/feed/?page=abc")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_feed_rejects_page_past_any_offset() {
        let app = app!();

        let req = test::TestRequest::get()
            .uri("/api/posts/feed/?page=18446744073709551615")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Invalid page.");
    }

    #[actix_web::test]
    async fn test_health_reports_storage() {
        let app = app!();

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }
}
