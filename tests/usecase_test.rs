// ABOUTME: Integration tests for the application services
// ABOUTME: Exercises business rules on top of the real SQLite adapter
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use async_trait::async_trait;
use liftlog::database::Database;
use liftlog::errors::AppResult;
use liftlog::models::{Exercise, UserRole};
use liftlog::repositories::{ExerciseRepository, QrCodeGenerator};
use liftlog::usecases::{
    AuthService, ExerciseService, ShareService, UserService, UserUpdate, WorkoutService,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// QR stub counting how often the renderer gets invoked
struct CountingQr {
    calls: AtomicUsize,
}

impl CountingQr {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QrCodeGenerator for CountingQr {
    fn generate(&self, data: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("data:image/svg+xml;base64,{data}"))
    }
}

/// In-memory exercise repository recording how often `create` runs
#[derive(Default)]
struct RecordingExercises {
    rows: Mutex<Vec<Exercise>>,
    creates: AtomicUsize,
}

#[async_trait]
impl ExerciseRepository for RecordingExercises {
    async fn create(&self, exercise: &Exercise) -> AppResult<Exercise> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.rows.lock().unwrap().push(exercise.clone());
        Ok(exercise.clone())
    }

    async fn find_all(&self) -> AppResult<Vec<Exercise>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Exercise>> {
        Ok(self.rows.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Exercise>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.name == name)
            .cloned())
    }

    async fn update(&self, exercise: &Exercise) -> AppResult<Exercise> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|e| e.id == exercise.id) {
            *row = exercise.clone();
        }
        Ok(exercise.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.rows.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }
}

fn exercise_service(db: &Arc<Database>) -> ExerciseService {
    ExerciseService::new(db.clone())
}

fn workout_service(db: &Arc<Database>) -> WorkoutService {
    WorkoutService::new(db.clone(), db.clone())
}

fn share_service(db: &Arc<Database>, qr: Arc<CountingQr>) -> ShareService {
    ShareService::new(db.clone(), db.clone(), qr, "http://localhost:3000".into())
}

#[tokio::test]
async fn test_create_exercise_rejects_empty_and_duplicate_names() {
    let db = common::create_test_database().await.unwrap();
    let service = exercise_service(&db);

    let err = service.create(String::new(), None).await.unwrap_err();
    assert_eq!(err.message, "Exercise name is required");

    service
        .create("Bench Press".into(), Some("Chest".into()))
        .await
        .unwrap();
    let err = service
        .create("Bench Press".into(), None)
        .await
        .unwrap_err();
    assert_eq!(err.message, "Exercise already exists");
}

#[tokio::test]
async fn test_duplicate_create_never_reaches_the_repository() {
    let repo = Arc::new(RecordingExercises::default());
    let service = ExerciseService::new(repo.clone());

    service.create("Deadlift".into(), None).await.unwrap();
    let err = service.create("Deadlift".into(), None).await.unwrap_err();
    assert_eq!(err.message, "Exercise already exists");
    assert_eq!(repo.creates.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_update_exercise_merges_fields() {
    let db = common::create_test_database().await.unwrap();
    let service = exercise_service(&db);

    let created = service
        .create("Squat".into(), Some("Legs".into()))
        .await
        .unwrap();

    // Name only: muscle group is kept
    let updated = service
        .update(created.id, Some("Back Squat".into()), None)
        .await
        .unwrap();
    assert_eq!(updated.name, "Back Squat");
    assert_eq!(updated.muscle_group.as_deref(), Some("Legs"));

    // Renaming to its own current name is not a conflict
    let same = service
        .update(created.id, Some("Back Squat".into()), None)
        .await
        .unwrap();
    assert_eq!(same.name, "Back Squat");

    // Renaming onto another exercise is
    service.create("Front Squat".into(), None).await.unwrap();
    let err = service
        .update(created.id, Some("Front Squat".into()), None)
        .await
        .unwrap_err();
    assert_eq!(err.message, "Exercise name already exists");
}

#[tokio::test]
async fn test_exercise_not_found_paths() {
    let db = common::create_test_database().await.unwrap();
    let service = exercise_service(&db);
    let missing = Uuid::new_v4();

    assert_eq!(
        service.get(missing).await.unwrap_err().message,
        "Exercise not found"
    );
    assert_eq!(
        service.delete(missing).await.unwrap_err().message,
        "Exercise not found"
    );
    assert_eq!(
        service
            .update(missing, Some("X".into()), None)
            .await
            .unwrap_err()
            .message,
        "Exercise not found"
    );
}

#[tokio::test]
async fn test_workout_requires_name() {
    let db = common::create_test_database().await.unwrap();
    let service = workout_service(&db);

    let err = service.create(String::new(), None).await.unwrap_err();
    assert_eq!(err.message, "Workout name is required");
}

#[tokio::test]
async fn test_add_exercise_validates_references_and_values() {
    let db = common::create_test_database().await.unwrap();
    let workouts = workout_service(&db);
    let exercises = exercise_service(&db);

    let workout = workouts
        .create("Push Day".into(), Some("Chest focus".into()))
        .await
        .unwrap();
    let exercise = exercises.create("Bench Press".into(), None).await.unwrap();

    let err = workouts
        .add_exercise(Uuid::new_v4(), exercise.id, Some(10), None)
        .await
        .unwrap_err();
    assert_eq!(err.message, "Workout not found");

    let err = workouts
        .add_exercise(workout.id, Uuid::new_v4(), Some(10), None)
        .await
        .unwrap_err();
    assert_eq!(err.message, "Exercise not found");

    let err = workouts
        .add_exercise(workout.id, exercise.id, Some(0), None)
        .await
        .unwrap_err();
    assert_eq!(err.message, "Reps must be a positive integer");

    let err = workouts
        .add_exercise(workout.id, exercise.id, Some(10), Some(-5))
        .await
        .unwrap_err();
    assert_eq!(err.message, "Interval must be a positive integer");

    let updated = workouts
        .add_exercise(workout.id, exercise.id, Some(10), Some(60))
        .await
        .unwrap();
    assert_eq!(updated.exercises.len(), 1);
    assert_eq!(updated.exercises[0].exercise_id, exercise.id);
    assert_eq!(updated.exercises[0].reps, Some(10));
    assert_eq!(updated.exercises[0].interval, Some(60));
}

#[tokio::test]
async fn test_workout_update_keeps_exercise_view() {
    let db = common::create_test_database().await.unwrap();
    let workouts = workout_service(&db);
    let exercises = exercise_service(&db);

    let workout = workouts.create("Push Day".into(), None).await.unwrap();
    let exercise = exercises.create("Dips".into(), None).await.unwrap();
    workouts
        .add_exercise(workout.id, exercise.id, Some(12), None)
        .await
        .unwrap();

    let updated = workouts
        .update(workout.id, "Push Day 2".into(), Some("Updated".into()))
        .await
        .unwrap();
    assert_eq!(updated.name, "Push Day 2");
    assert_eq!(updated.exercises.len(), 1);
}

#[tokio::test]
async fn test_sharing_is_idempotent_per_workout() {
    let db = common::create_test_database().await.unwrap();
    let workouts = workout_service(&db);
    let qr = CountingQr::new();
    let shares = share_service(&db, qr.clone());

    let workout = workouts.create("Legs".into(), None).await.unwrap();

    let first = shares.share_workout(workout.id).await.unwrap();
    let second = shares.share_workout(workout.id).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.link, second.link);
    assert_eq!(qr.calls(), 1);

    // Link embeds the share id under the base URL
    assert_eq!(
        first.link,
        format!("http://localhost:3000/share/{}", first.id)
    );
}

#[tokio::test]
async fn test_share_unknown_workout_never_persists() {
    let db = common::create_test_database().await.unwrap();
    let qr = CountingQr::new();
    let shares = share_service(&db, qr.clone());

    let err = shares.share_workout(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.message, "Workout not found");
    assert_eq!(qr.calls(), 0);
}

#[tokio::test]
async fn test_resolving_and_deleting_shares() {
    let db = common::create_test_database().await.unwrap();
    let workouts = workout_service(&db);
    let shares = share_service(&db, CountingQr::new());

    let workout = workouts.create("Pull".into(), None).await.unwrap();
    let share = shares.share_workout(workout.id).await.unwrap();

    let details = shares.get_shared_workout(share.id).await.unwrap();
    assert_eq!(details.share.id, share.id);
    assert_eq!(details.workout.id, workout.id);

    shares.delete_share(share.id).await.unwrap();
    let err = shares.get_shared_workout(share.id).await.unwrap_err();
    assert_eq!(err.message, "Shared workout not found");
    assert_eq!(
        shares.delete_share(share.id).await.unwrap_err().message,
        "Shared workout not found"
    );
}

#[tokio::test]
async fn test_user_registration_rules() {
    let db = common::create_test_database().await.unwrap();
    let service = UserService::new(db.clone());

    let err = service
        .create(String::new(), "a@b.co".into(), "pw".into(), None)
        .await
        .unwrap_err();
    assert_eq!(err.message, "Name, email and password are required");

    let err = service
        .create("Ann".into(), "not-an-email".into(), "pw".into(), None)
        .await
        .unwrap_err();
    assert_eq!(err.message, "Invalid email format");

    let user = service
        .create("Ann".into(), "ann@example.com".into(), "pw".into(), None)
        .await
        .unwrap();
    assert_eq!(user.role, UserRole::User);
    assert_ne!(user.password_hash, "pw");

    let err = service
        .create("Ann 2".into(), "ann@example.com".into(), "pw".into(), None)
        .await
        .unwrap_err();
    assert_eq!(err.message, "User with this email already exists");
}

#[tokio::test]
async fn test_user_update_email_conflict_and_rehash() {
    let db = common::create_test_database().await.unwrap();
    let service = UserService::new(db.clone());

    let ann = service
        .create("Ann".into(), "ann@example.com".into(), "pw".into(), None)
        .await
        .unwrap();
    service
        .create("Bob".into(), "bob@example.com".into(), "pw".into(), None)
        .await
        .unwrap();

    let err = service
        .update(
            ann.id,
            UserUpdate {
                email: Some("bob@example.com".into()),
                ..UserUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.message, "Email already in use");

    // Keeping one's own email is not a conflict
    let updated = service
        .update(
            ann.id,
            UserUpdate {
                email: Some("ann@example.com".into()),
                password: Some("new-password".into()),
                ..UserUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_ne!(updated.password_hash, ann.password_hash);
    assert_eq!(updated.created_at, ann.created_at);
}

#[tokio::test]
async fn test_login_does_not_reveal_which_credential_failed() {
    let db = common::create_test_database().await.unwrap();
    let users = UserService::new(db.clone());
    let auth = AuthService::new(db.clone(), common::create_test_auth_manager());

    users
        .create("Ann".into(), "ann@example.com".into(), "hunter22".into(), None)
        .await
        .unwrap();

    let unknown = auth
        .login("nobody@example.com", "hunter22")
        .await
        .unwrap_err();
    let wrong = auth.login("ann@example.com", "wrong").await.unwrap_err();
    assert_eq!(unknown.message, "Invalid email or password");
    assert_eq!(wrong.message, unknown.message);

    let (user, token) = auth.login("ann@example.com", "hunter22").await.unwrap();
    assert_eq!(user.email, "ann@example.com");
    assert!(!token.is_empty());
}
