//! Integration tests for the append-only ledger repositories (payments,
//! comments, reports) using in-memory SurrealDB.

use canvass_core::models::comment::CreateComment;
use canvass_core::models::payment::CreatePayment;
use canvass_core::models::report::CreateReport;
use canvass_core::repository::{CommentRepository, PaymentRepository, ReportRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    canvass_db::run_migrations(&db).await.unwrap();
    db
}

#[tokio::test]
async fn payments_append_and_list() {
    let db = setup().await;
    let repo = canvass_db::repository::SurrealPaymentRepository::new(db);

    let outcome = repo
        .append(CreatePayment {
            payer_email: "dave@example.com".into(),
            amount: 19.99,
            metadata: Some(serde_json::json!({"plan": "pro-monthly"})),
        })
        .await
        .unwrap();
    assert!(!outcome.inserted_id.is_empty());

    let payments = repo.list().await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].payer_email, "dave@example.com");
    assert_eq!(payments[0].amount, 19.99);
    assert_eq!(payments[0].metadata["plan"], "pro-monthly");
}

#[tokio::test]
async fn payment_metadata_defaults_to_empty_object() {
    let db = setup().await;
    let repo = canvass_db::repository::SurrealPaymentRepository::new(db);

    repo.append(CreatePayment {
        payer_email: "dave@example.com".into(),
        amount: 5.0,
        metadata: None,
    })
    .await
    .unwrap();

    let payments = repo.list().await.unwrap();
    assert!(payments[0].metadata.as_object().unwrap().is_empty());
}

#[tokio::test]
async fn comments_append_and_list() {
    let db = setup().await;
    let repo = canvass_db::repository::SurrealCommentRepository::new(db);

    let survey_id = Uuid::new_v4();
    repo.append(CreateComment {
        survey_id,
        author_email: "eve@example.com".into(),
        text: "Nice questions".into(),
    })
    .await
    .unwrap();

    let comments = repo.list().await.unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].survey_id, survey_id);
    assert_eq!(comments[0].text, "Nice questions");
}

#[tokio::test]
async fn reports_append_and_list() {
    let db = setup().await;
    let repo = canvass_db::repository::SurrealReportRepository::new(db);

    let survey_id = Uuid::new_v4();
    repo.append(CreateReport {
        survey_id,
        reporter_email: "frank@example.com".into(),
        message: "Spam content".into(),
    })
    .await
    .unwrap();

    let reports = repo.list().await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].survey_id, survey_id);
    assert_eq!(reports[0].message, "Spam content");
}
