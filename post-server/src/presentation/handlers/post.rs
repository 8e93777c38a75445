use crate::application::post_service::PostService;
use crate::domain::error::DomainError;
use crate::presentation::dto::PostRequest;
use crate::presentation::middleware::RequestId;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, delete, get, post, put, web};
use tracing::info;

/// JSON extractor config: a body that fails deserialization (missing or
/// null field, malformed JSON) becomes a `Validation` failure carrying
/// the deserializer's message, so it never reaches the service layer.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| DomainError::Validation(err.to_string()).into())
}

#[get("/post/{id}")]
pub async fn get_post(
    req: HttpRequest,
    service: web::Data<PostService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, DomainError> {
    let id = path.into_inner();
    let post = service.get(id).await?;

    info!(request_id = %request_id(&req), post_id = %id, "post retrieved");

    Ok(HttpResponse::Ok().json(post))
}

#[post("/post")]
pub async fn create_post(
    req: HttpRequest,
    service: web::Data<PostService>,
    payload: web::Json<PostRequest>,
) -> Result<HttpResponse, DomainError> {
    let post = service.create(payload.into_inner()).await?;

    info!(request_id = %request_id(&req), post_id = ?post.id, "post created");

    Ok(HttpResponse::Ok().json(post))
}

#[put("/post/{id}")]
pub async fn update_post(
    req: HttpRequest,
    service: web::Data<PostService>,
    payload: web::Json<PostRequest>,
    path: web::Path<i32>,
) -> Result<HttpResponse, DomainError> {
    let id = path.into_inner();
    let post = service.update(id, payload.into_inner()).await?;

    info!(request_id = %request_id(&req), post_id = %id, "post updated");

    Ok(HttpResponse::Ok().json(post))
}

#[delete("/post/{id}")]
pub async fn delete_post(
    req: HttpRequest,
    service: web::Data<PostService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, DomainError> {
    let id = path.into_inner();
    service.delete(id).await?;

    info!(request_id = %request_id(&req), post_id = %id, "post deleted");

    Ok(HttpResponse::Ok().finish())
}

fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory_repository::InMemoryPostRepository;
    use crate::data::post_repository::PostRepository;
    use crate::domain::post::Post;
    use actix_web::{App, test};
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use std::sync::Arc;

    macro_rules! test_app {
        ($repo:expr) => {
            test::init_service(
                App::new()
                    .app_data(json_config())
                    .app_data(web::Data::new(PostService::new(
                        Arc::clone(&$repo) as Arc<dyn PostRepository>
                    )))
                    .service(get_post)
                    .service(create_post)
                    .service(update_post)
                    .service(delete_post),
            )
            .await
        };
    }

    async fn seeded_repo() -> Arc<InMemoryPostRepository> {
        let repo = Arc::new(InMemoryPostRepository::new());
        repo.seed(Post {
            id: Some(1),
            title: "Title".into(),
            content: "Content".into(),
            timestamp: Some(
                NaiveDate::from_ymd_opt(2023, 5, 14)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
            ),
        })
        .await;
        repo
    }

    #[actix_web::test]
    async fn get_existing_post_returns_stored_fields() {
        let repo = seeded_repo().await;
        let app = test_app!(repo);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/post/1").to_request()).await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "id": 1,
                "title": "Title",
                "content": "Content",
                "timestamp": "2023-05-14T00:00:00"
            })
        );
    }

    #[actix_web::test]
    async fn get_missing_post_returns_404_envelope() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let app = test_app!(repo);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/post/7").to_request()).await;
        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["message"], "Entity with id=7 not found");
    }

    #[actix_web::test]
    async fn create_returns_post_with_store_assigned_identity() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let app = test_app!(repo);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/post")
                .set_json(json!({"title": "Title", "content": "Content"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["title"], "Title");
        assert_eq!(body["content"], "Content");
        assert!(body["id"].is_i64());
        assert!(body["timestamp"].is_string());
    }

    #[actix_web::test]
    async fn create_with_missing_title_is_403_and_store_untouched() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let app = test_app!(repo);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/post")
                .set_json(json!({"content": "Content"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 403);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 403);
        assert!(!body["message"].as_str().unwrap().is_empty());
        assert_eq!(repo.len().await, 0);
    }

    #[actix_web::test]
    async fn create_with_null_content_is_403() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let app = test_app!(repo);

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/post")
                .set_json(json!({"title": "Title", "content": null}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 403);
        assert_eq!(repo.len().await, 0);
    }

    #[actix_web::test]
    async fn update_overwrites_fields_and_keeps_timestamp() {
        let repo = seeded_repo().await;
        let app = test_app!(repo);

        let resp = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/post/1")
                .set_json(json!({"title": "TitleNew", "content": "ContentNew"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "id": 1,
                "title": "TitleNew",
                "content": "ContentNew",
                "timestamp": "2023-05-14T00:00:00"
            })
        );
    }

    #[actix_web::test]
    async fn update_missing_post_returns_404_envelope() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let app = test_app!(repo);

        let resp = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/post/12")
                .set_json(json!({"title": "t", "content": "c"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Entity with id=12 not found");
    }

    #[actix_web::test]
    async fn update_with_missing_field_is_403_and_store_unchanged() {
        let repo = seeded_repo().await;
        let app = test_app!(repo);

        let resp = test::call_service(
            &app,
            test::TestRequest::put()
                .uri("/post/1")
                .set_json(json!({"title": "only"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 403);

        let stored = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.title, "Title");
        assert_eq!(stored.content, "Content");
    }

    #[actix_web::test]
    async fn delete_existing_post_returns_200_with_empty_body() {
        let repo = seeded_repo().await;
        let app = test_app!(repo);

        let resp =
            test::call_service(&app, test::TestRequest::delete().uri("/post/1").to_request()).await;
        assert_eq!(resp.status(), 200);
        let body = test::read_body(resp).await;
        assert!(body.is_empty());
        assert_eq!(repo.len().await, 0);
    }

    #[actix_web::test]
    async fn delete_missing_post_returns_404_envelope() {
        let repo = Arc::new(InMemoryPostRepository::new());
        let app = test_app!(repo);

        let resp =
            test::call_service(&app, test::TestRequest::delete().uri("/post/9").to_request()).await;
        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["message"], "Entity with id=9 not found");
    }
}
