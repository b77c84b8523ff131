//! Integration test for the vote recording pair: tally overwrite on the
//! survey plus one appended participation record.

use canvass_core::models::participation::CreateParticipation;
use canvass_core::models::survey::CreateSurvey;
use canvass_core::repository::{ParticipationRepository, SurveyRepository};
use chrono::{Duration, Utc};
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
async fn vote_updates_tally_and_appends_exactly_one_record() {
    let db = setup().await;
    let surveys = canvass_db::repository::SurrealSurveyRepository::new(db.clone());
    let participations = canvass_db::repository::SurrealParticipationRepository::new(db);

    let insert = surveys
        .insert(CreateSurvey {
            title: "Transit options".into(),
            description: "Preferred commute".into(),
            category: "city".into(),
            image: "https://example.com/bus.png".into(),
            deadline: Utc::now() + Duration::days(7),
            surveyor_email: "bob@example.com".into(),
        })
        .await
        .unwrap();
    let survey_id = Uuid::parse_str(&insert.inserted_id).unwrap();

    // The two halves of a vote submission, exactly as the recorder
    // performs them: caller-supplied tally, then one ledger append.
    let tally = surveys.set_vote_count(survey_id, 42).await.unwrap();
    assert_eq!(tally.matched_count, 1);

    let appended = participations
        .append(CreateParticipation {
            voter_name: "Vera".into(),
            voter_email: "vera@example.com".into(),
            survey_id,
            chosen_option: "bike".into(),
        })
        .await
        .unwrap();
    assert!(!appended.inserted_id.is_empty());

    let survey = surveys.find_by_id(survey_id).await.unwrap().unwrap();
    assert_eq!(survey.vote_count, 42);

    let records = participations.list().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].survey_id, survey_id);
    assert_eq!(records[0].voter_email, "vera@example.com");
    assert_eq!(records[0].chosen_option, "bike");
}
