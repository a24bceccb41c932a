mod common;

use axum::http::StatusCode;
use common::{
    insert_activity, insert_student, participant_count, send_request, setup_test_app,
    waitlist_emails,
};
use mergington_api::db::seed_activities;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_enrolls_and_creates_student(pool: SqlitePool) {
    let activity_id = insert_activity(&pool, "Robotics", 5).await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send_request(
        &app,
        "POST",
        "/activities/Robotics/signup?email=ada@mergington.edu&name=Ada&grade=11",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Signed up ada@mergington.edu for Robotics");
    assert_eq!(participant_count(&pool, activity_id).await, 1);

    let role: String = sqlx::query_scalar("SELECT role FROM students WHERE email = ?")
        .bind("ada@mergington.edu")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(role, "student");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_existing_student_needs_no_profile_fields(pool: SqlitePool) {
    let activity_id = insert_activity(&pool, "Robotics", 5).await;
    insert_student(&pool, "known@mergington.edu", "student").await;
    let app = setup_test_app(pool.clone());

    let (status, _) = send_request(
        &app,
        "POST",
        "/activities/Robotics/signup?email=known@mergington.edu",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(participant_count(&pool, activity_id).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_unknown_activity_is_404(pool: SqlitePool) {
    let app = setup_test_app(pool.clone());

    let (status, body) = send_request(
        &app,
        "POST",
        "/activities/Knitting/signup?email=ada@mergington.edu&name=Ada&grade=11",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "Activity not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_signup_new_student_requires_name_and_grade(pool: SqlitePool) {
    insert_activity(&pool, "Robotics", 5).await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send_request(
        &app,
        "POST",
        "/activities/Robotics/signup?email=new@mergington.edu&name=Ada",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
    assert_eq!(body["message"], "Student profile required (name, grade)");

    // The whole operation aborts: no student row leaks from the failed signup.
    let students: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE email = ?")
        .bind("new@mergington.edu")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(students, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_signup_is_conflict(pool: SqlitePool) {
    insert_activity(&pool, "Robotics", 5).await;
    let app = setup_test_app(pool.clone());

    let uri = "/activities/Robotics/signup?email=ada@mergington.edu&name=Ada&grade=11";
    let (status, _) = send_request(&app, "POST", uri).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_request(&app, "POST", uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "conflict");
    assert_eq!(body["message"], "Student is already signed up");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_capacity_overflow_goes_to_waitlist(pool: SqlitePool) {
    let activity_id = insert_activity(&pool, "Robotics", 2).await;
    let app = setup_test_app(pool.clone());

    for (email, expected) in [
        ("a@mergington.edu", "Signed up a@mergington.edu for Robotics"),
        ("b@mergington.edu", "Signed up b@mergington.edu for Robotics"),
        (
            "c@mergington.edu",
            "Activity full. c@mergington.edu added to waitlist for Robotics",
        ),
    ] {
        let (status, body) = send_request(
            &app,
            "POST",
            &format!("/activities/Robotics/signup?email={email}&name=Kid&grade=9"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], expected);
    }

    // Capacity is never exceeded; the overflow signup queued instead.
    assert_eq!(participant_count(&pool, activity_id).await, 2);
    assert_eq!(
        waitlist_emails(&pool, activity_id).await,
        vec!["c@mergington.edu"]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_waitlisted_student_cannot_sign_up_again(pool: SqlitePool) {
    let activity_id = insert_activity(&pool, "Robotics", 1).await;
    let app = setup_test_app(pool.clone());

    let first = "/activities/Robotics/signup?email=a@mergington.edu&name=A&grade=9";
    let second = "/activities/Robotics/signup?email=b@mergington.edu&name=B&grade=9";
    send_request(&app, "POST", first).await;
    send_request(&app, "POST", second).await;

    let (status, body) = send_request(&app, "POST", second).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "conflict");
    assert_eq!(body["message"], "Student is already on the waitlist");

    // Still exactly one membership per pair.
    assert_eq!(participant_count(&pool, activity_id).await, 1);
    assert_eq!(
        waitlist_emails(&pool, activity_id).await,
        vec!["b@mergington.edu"]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unregister_frees_slot_when_waitlist_empty(pool: SqlitePool) {
    let activity_id = insert_activity(&pool, "Robotics", 5).await;
    let app = setup_test_app(pool.clone());

    send_request(
        &app,
        "POST",
        "/activities/Robotics/signup?email=a@mergington.edu&name=A&grade=9",
    )
    .await;

    let (status, body) = send_request(
        &app,
        "DELETE",
        "/activities/Robotics/unregister?email=a@mergington.edu",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Unregistered a@mergington.edu from Robotics"
    );
    assert_eq!(participant_count(&pool, activity_id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unregister_errors(pool: SqlitePool) {
    insert_activity(&pool, "Robotics", 5).await;
    insert_student(&pool, "bystander@mergington.edu", "student").await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send_request(
        &app,
        "DELETE",
        "/activities/Knitting/unregister?email=bystander@mergington.edu",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Activity not found");

    let (status, body) = send_request(
        &app,
        "DELETE",
        "/activities/Robotics/unregister?email=ghost@mergington.edu",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student not found");

    let (status, body) = send_request(
        &app,
        "DELETE",
        "/activities/Robotics/unregister?email=bystander@mergington.edu",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
    assert_eq!(body["message"], "Student is not signed up for this activity");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_activities_includes_roster(pool: SqlitePool) {
    insert_activity(&pool, "Robotics", 5).await;
    insert_activity(&pool, "Choir", 3).await;
    let app = setup_test_app(pool.clone());

    send_request(
        &app,
        "POST",
        "/activities/Robotics/signup?email=ada@mergington.edu&name=Ada&grade=11",
    )
    .await;

    let (status, body) = send_request(&app, "GET", "/activities").await;
    assert_eq!(status, StatusCode::OK);

    let robotics = &body["Robotics"];
    assert_eq!(robotics["description"], "Test activity");
    assert_eq!(robotics["max_participants"], 5);
    assert_eq!(robotics["participants"][0]["email"], "ada@mergington.edu");
    assert_eq!(robotics["participants"][0]["name"], "Ada");
    assert_eq!(robotics["participants"][0]["grade"], "11");

    assert_eq!(body["Choir"]["participants"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_dashboard_aggregates_counts(pool: SqlitePool) {
    insert_activity(&pool, "Robotics", 5).await;
    insert_activity(&pool, "Choir", 3).await;
    let app = setup_test_app(pool.clone());

    for email in ["a@mergington.edu", "b@mergington.edu"] {
        send_request(
            &app,
            "POST",
            &format!("/activities/Robotics/signup?email={email}&name=Kid&grade=9"),
        )
        .await;
    }

    let (status, body) = send_request(&app, "GET", "/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_activities"], 2);
    assert_eq!(body["total_participants"], 2);

    let stats = body["activity_stats"].as_array().unwrap();
    let robotics = stats.iter().find(|s| s["name"] == "Robotics").unwrap();
    assert_eq!(robotics["participants"], 2);
    assert_eq!(robotics["spots_left"], 3);

    let choir = stats.iter().find(|s| s["name"] == "Choir").unwrap();
    assert_eq!(choir["participants"], 0);
    assert_eq!(choir["spots_left"], 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_seeding_is_idempotent(pool: SqlitePool) {
    seed_activities(&pool).await.unwrap();
    seed_activities(&pool).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activities")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 10);

    let chess_capacity: i64 =
        sqlx::query_scalar("SELECT capacity FROM activities WHERE name = 'Chess Club'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(chess_capacity, 12);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_seeding_never_overwrites_existing_activities(pool: SqlitePool) {
    insert_activity(&pool, "Chess Club", 1).await;

    seed_activities(&pool).await.unwrap();

    // The pre-existing Chess Club keeps its capacity; only the missing
    // nine catalog entries were added.
    let chess_capacity: i64 =
        sqlx::query_scalar("SELECT capacity FROM activities WHERE name = 'Chess Club'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(chess_capacity, 1);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activities")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 10);
}
