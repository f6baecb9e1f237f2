//! Integration tests for `SqliteStore` against an in-memory database.

use crm_core::{
  Error as CoreError,
  label::{LifecycleStage, Origin, ProspectInterest, Status},
  payload::{ContactPatch, NewContact, NewProspectingInfo},
  store::ContactStore,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn ana() -> NewContact {
  NewContact::new("Ana", "ana@example.com", Status::Lead)
}

fn prospect(email: &str) -> NewContact {
  let mut input = NewContact::new("Luis", email, Status::Contact);
  input.prospecting_info = Some(NewProspectingInfo {
    origin:             Some(Origin::WhatsApp),
    lifecycle_stage:    Some(LifecycleStage::Nurturing),
    prospect_interests: vec![ProspectInterest::Kess3],
  });
  input
}

fn core_error(err: Error) -> CoreError {
  match err {
    Error::Core(e) => e,
    other => panic!("expected a domain error, got {other:?}"),
  }
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_contact() {
  let s = store().await;

  let created = s.create_contact(ana()).await.unwrap();
  assert_eq!(created.first_name, "Ana");
  assert_eq!(created.status, Status::Lead);

  let fetched = s.get_contact(created.id).await.unwrap();
  assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get_contact(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn create_rejects_invalid_phone() {
  let s = store().await;
  let mut input = ana();
  input.phone = Some("not-a-number".into());

  let err = core_error(s.create_contact(input).await.unwrap_err());
  assert_eq!(err, CoreError::validation("Invalid phone number"));
  assert!(s.list_contacts().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_without_phone_is_accepted() {
  let s = store().await;
  let created = s.create_contact(ana()).await.unwrap();
  assert_eq!(created.phone, None);
}

#[tokio::test]
async fn duplicate_email_differing_only_in_case_conflicts() {
  let s = store().await;
  s.create_contact(NewContact::new("A", "A@Example.com", Status::Contact))
    .await
    .unwrap();

  let err = s
    .create_contact(NewContact::new("B", "a@example.com", Status::Contact))
    .await
    .unwrap_err();
  assert!(matches!(core_error(err), CoreError::Conflict(_)));
  assert_eq!(s.list_contacts().await.unwrap().len(), 1);
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_returns_all_in_creation_order() {
  let s = store().await;
  for i in 0..5 {
    s.create_contact(NewContact::new(
      format!("c{i}"),
      format!("c{i}@example.com"),
      Status::Contact,
    ))
    .await
    .unwrap();
  }

  let all = s.list_contacts().await.unwrap();
  let names: Vec<_> = all.iter().map(|c| c.first_name.as_str()).collect();
  assert_eq!(names, ["c0", "c1", "c2", "c3", "c4"]);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn status_regression_is_rejected_and_nothing_is_written() {
  let s = store().await;
  let created = s.create_contact(ana()).await.unwrap();

  let mut patch = ContactPatch::status(Status::Contact);
  patch.first_name = Some("Changed".into());
  let err = s.update_contact(created.id, patch).await.unwrap_err();
  assert!(matches!(core_error(err), CoreError::Progression(_)));

  let stored = s.get_contact(created.id).await.unwrap().unwrap();
  assert_eq!(stored, created);
}

#[tokio::test]
async fn same_status_update_is_accepted() {
  let s = store().await;
  let created = s.create_contact(ana()).await.unwrap();

  let updated = s
    .update_contact(created.id, ContactPatch::status(Status::Lead))
    .await
    .unwrap();
  assert_eq!(updated.status, Status::Lead);
}

#[tokio::test]
async fn status_may_skip_forward() {
  let s = store().await;
  let created = s.create_contact(ana()).await.unwrap();

  let updated = s
    .update_contact(created.id, ContactPatch::status(Status::Distributor))
    .await
    .unwrap();
  assert_eq!(updated.status, Status::Distributor);
  assert_eq!(updated.created_at, created.created_at);

  let stored = s.get_contact(created.id).await.unwrap().unwrap();
  assert_eq!(stored.status, Status::Distributor);
}

#[tokio::test]
async fn lifecycle_stage_only_moves_forward() {
  let s = store().await;
  let created = s.create_contact(prospect("luis@example.com")).await.unwrap();

  let err = s
    .update_contact(
      created.id,
      ContactPatch::lifecycle_stage(LifecycleStage::Lead),
    )
    .await
    .unwrap_err();
  assert!(matches!(core_error(err), CoreError::Progression(_)));

  let updated = s
    .update_contact(
      created.id,
      ContactPatch::lifecycle_stage(LifecycleStage::Customer),
    )
    .await
    .unwrap();
  let info = updated.prospecting_info.unwrap();
  let original = created.prospecting_info.unwrap();
  assert_eq!(info.lifecycle_stage, Some(LifecycleStage::Customer));
  assert_eq!(info.origin, Some(Origin::WhatsApp));
  assert_eq!(info.prospect_created_at, original.prospect_created_at);
}

#[tokio::test]
async fn update_to_taken_email_conflicts() {
  let s = store().await;
  s.create_contact(ana()).await.unwrap();
  let other = s.create_contact(prospect("luis@example.com")).await.unwrap();

  let patch = ContactPatch {
    email: Some("ANA@example.com".into()),
    ..Default::default()
  };
  let err = s.update_contact(other.id, patch).await.unwrap_err();
  assert!(matches!(core_error(err), CoreError::Conflict(_)));

  let stored = s.get_contact(other.id).await.unwrap().unwrap();
  assert_eq!(stored.email, "luis@example.com");
}

#[tokio::test]
async fn update_missing_contact_is_not_found() {
  let s = store().await;
  let id = Uuid::new_v4();
  let err = s
    .update_contact(id, ContactPatch::status(Status::Dead))
    .await
    .unwrap_err();
  assert_eq!(core_error(err), CoreError::NotFound(id));
}

#[tokio::test]
async fn update_rejects_invalid_whatsapp() {
  let s = store().await;
  let created = s.create_contact(ana()).await.unwrap();

  let patch = ContactPatch {
    whatsapp: Some(Some("abc".into())),
    ..Default::default()
  };
  let err = s.update_contact(created.id, patch).await.unwrap_err();
  assert_eq!(core_error(err), CoreError::validation("Invalid WhatsApp number"));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_contact_and_frees_email() {
  let s = store().await;
  let created = s.create_contact(ana()).await.unwrap();

  s.delete_contact(created.id).await.unwrap();
  assert!(s.get_contact(created.id).await.unwrap().is_none());

  s.create_contact(ana()).await.unwrap();
}

#[tokio::test]
async fn delete_missing_contact_is_not_found() {
  let s = store().await;
  let id = Uuid::new_v4();
  let err = s.delete_contact(id).await.unwrap_err();
  assert_eq!(core_error(err), CoreError::NotFound(id));
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_keeps_contacts() {
  let path = std::env::temp_dir().join(format!("crm-{}.db", Uuid::new_v4()));

  let s = SqliteStore::open(&path).await.unwrap();
  let created = s.create_contact(ana()).await.unwrap();
  s.close().await.unwrap();

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.get_contact(created.id).await.unwrap(), Some(created));
  s.close().await.unwrap();

  for suffix in ["", "-wal", "-shm"] {
    let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
  }
}
