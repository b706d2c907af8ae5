use crate::database::entity::{category, post};
use crate::database::postgres_repo::{PostgresCategoryRepository, PostgresPostRepository};
use quill_core::ports::{CategoryRepository, PostRepository};
use sea_orm::{DatabaseBackend, MockDatabase};

#[tokio::test]
async fn find_post_by_slug_maps_model_to_domain() {
    let post_id = uuid::Uuid::new_v4();
    let author_id = uuid::Uuid::new_v4();
    let category_id = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: post_id,
            title: "Hello World!".to_owned(),
            slug: "hello-world".to_owned(),
            content: "<p>hi</p>".to_owned(),
            cover_image: None,
            video_url: None,
            tags: vec!["intro".to_owned()],
            category_ids: vec![category_id],
            language: "en".to_owned(),
            author_id,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo.find_by_slug("hello-world").await.unwrap().unwrap();
    assert_eq!(post.id, post_id);
    assert_eq!(post.slug, "hello-world");
    assert_eq!(post.author_id, author_id);
    assert_eq!(post.category_ids, vec![category_id]);
}

#[tokio::test]
async fn list_categories_maps_rows() {
    let creator = uuid::Uuid::new_v4();
    let now = chrono::Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            category::Model {
                id: uuid::Uuid::new_v4(),
                name: "ada".to_owned(),
                created_by: creator,
                created_at: now.into(),
                updated_at: now.into(),
            },
            category::Model {
                id: uuid::Uuid::new_v4(),
                name: "rust".to_owned(),
                created_by: creator,
                created_at: now.into(),
                updated_at: now.into(),
            },
        ]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);

    let categories = repo.list_by_name().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "ada");
    assert_eq!(categories[1].name, "rust");
}
