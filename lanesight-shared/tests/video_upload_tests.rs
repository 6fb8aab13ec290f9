/// Integration tests for the video upload model
///
/// These tests require a running PostgreSQL database and are skipped
/// when DATABASE_URL is not set. Run with --test-threads=1.

use lanesight_shared::db::migrations::run_migrations;
use lanesight_shared::db::pool::{create_pool, DatabaseConfig};
use lanesight_shared::models::registration::Registration;
use lanesight_shared::models::video_upload::{
    CreateVideoUpload, VideoUpload, PROCESSING_STATUS_UPLOADED,
};
use sqlx::PgPool;

async fn test_pool() -> Option<PgPool> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set, skipping database test");
            return None;
        }
    };

    let pool = create_pool(DatabaseConfig {
        url,
        max_connections: 5,
        ..Default::default()
    })
    .await
    .expect("Failed to create pool");

    run_migrations(&pool).await.expect("Failed to run migrations");
    Some(pool)
}

async fn seed_registration(pool: &PgPool) -> Registration {
    let email = format!("uploader+{}@example.com", uuid::Uuid::new_v4());
    Registration::create(pool, &email).await.unwrap()
}

fn upload_input(registration_id: uuid::Uuid, filename: &str, size: i64) -> CreateVideoUpload {
    CreateVideoUpload {
        registration_id,
        original_filename: filename.to_string(),
        file_url: format!("/uploads/{}/{}", registration_id, filename),
        file_size: size,
    }
}

#[tokio::test]
async fn test_create_sets_uploaded_status() {
    let Some(pool) = test_pool().await else { return };
    let registration = seed_registration(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    let upload = VideoUpload::create(&mut tx, upload_input(registration.id, "dash.mp4", 1024))
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(upload.registration_id, registration.id);
    assert_eq!(upload.processing_status, PROCESSING_STATUS_UPLOADED);
    assert_eq!(upload.file_size, 1024);
}

#[tokio::test]
async fn test_create_rejects_unknown_registration() {
    let Some(pool) = test_pool().await else { return };

    let mut tx = pool.begin().await.unwrap();
    let result = VideoUpload::create(&mut tx, upload_input(uuid::Uuid::new_v4(), "x.mp4", 1)).await;
    tx.rollback().await.unwrap();

    // Foreign key on registration_id
    assert!(result.is_err());
}

#[tokio::test]
async fn test_rollback_leaves_no_row() {
    let Some(pool) = test_pool().await else { return };
    let registration = seed_registration(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    VideoUpload::create(&mut tx, upload_input(registration.id, "gone.mp4", 7))
        .await
        .unwrap();
    tx.rollback().await.unwrap();

    let uploads = VideoUpload::list_by_registration(&pool, registration.id)
        .await
        .unwrap();
    assert!(uploads.is_empty());
}

#[tokio::test]
async fn test_list_by_registration_scoped_and_ordered() {
    let Some(pool) = test_pool().await else { return };
    let registration = seed_registration(&pool).await;
    let other = seed_registration(&pool).await;

    let mut tx = pool.begin().await.unwrap();
    VideoUpload::create(&mut tx, upload_input(registration.id, "first.mp4", 1))
        .await
        .unwrap();
    VideoUpload::create(&mut tx, upload_input(registration.id, "second.mp4", 2))
        .await
        .unwrap();
    VideoUpload::create(&mut tx, upload_input(other.id, "theirs.mp4", 3))
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let uploads = VideoUpload::list_by_registration(&pool, registration.id)
        .await
        .unwrap();
    assert_eq!(uploads.len(), 2);
    assert!(uploads.iter().all(|u| u.registration_id == registration.id));
}
