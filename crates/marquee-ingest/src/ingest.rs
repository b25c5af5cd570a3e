//! The ingest pipeline: fetch the feed collections and reconcile them into a
//! catalog store.

use anyhow::{Context as _, Result};
use marquee_core::store::CatalogStore;
use marquee_feed::{
  records::{CategoryRecord, ContentRecord},
  FeedClient,
};
use tracing::debug;

/// Counts from one completed ingest run.
#[derive(Debug, Clone, Copy)]
pub struct IngestReport {
  pub categories: usize,
  pub contents:   usize,
}

/// Run one full ingest: categories first, then content.
///
/// There is no run-wide transaction. Every upsert commits on its own, so a
/// failure partway through leaves the earlier writes in place; the next
/// scheduled run reconciles against the feed's current state.
pub async fn run_ingest<S: CatalogStore>(
  store: &S,
  client: &FeedClient,
) -> Result<IngestReport> {
  let categories = client.get_categories().await.context("fetching categories")?;
  let categories = ingest_categories(store, &categories).await?;

  let contents = client.get_all_content().await.context("fetching content")?;
  let contents = ingest_contents(store, &contents).await?;

  Ok(IngestReport {
    categories,
    contents,
  })
}

/// Upsert every fetched category, attaching its external id.
pub async fn ingest_categories<S: CatalogStore>(
  store: &S,
  records: &[CategoryRecord],
) -> Result<usize> {
  for record in records {
    debug!(ext_id = record.category_id, name = %record.name, "ingesting category");
    store
      .upsert_category(record.name.clone(), Some(record.category_id))
      .await
      .with_context(|| format!("ingesting category {:?}", record.name))?;
  }
  Ok(records.len())
}

/// Upsert every fetched content record along with its category, actor, and
/// director associations. Categories must already be ingested; a reference
/// to an unknown external category id aborts the run.
pub async fn ingest_contents<S: CatalogStore>(
  store: &S,
  records: &[ContentRecord],
) -> Result<usize> {
  for record in records {
    debug!(ext_id = record.content_id, title = ?record.title, "ingesting content");
    ingest_content(store, record).await.with_context(|| {
      format!(
        "ingesting content {} ({:?})",
        record.content_id, record.title
      )
    })?;
  }
  Ok(records.len())
}

async fn ingest_content<S: CatalogStore>(
  store: &S,
  record: &ContentRecord,
) -> Result<()> {
  let content_id = store.upsert_content(record.to_new_content()).await?;

  for ext_category_id in &record.category_ids {
    store
      .associate_category_ext(content_id, *ext_category_id)
      .await?;
  }

  for actor in &record.actors {
    let person_id = store.upsert_person(actor.clone()).await?;
    store.associate_star(content_id, person_id).await?;
  }

  for director in &record.directors {
    let person_id = store.upsert_person(director.clone()).await?;
    store.associate_director(content_id, person_id).await?;
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use marquee_core::store::CatalogStore;
  use marquee_feed::records::{CategoryRecord, ContentRecord};
  use marquee_store_sqlite::SqliteStore;

  use super::{ingest_categories, ingest_contents};

  async fn store() -> SqliteStore {
    SqliteStore::open_in_memory()
      .await
      .expect("in-memory store")
  }

  fn record(v: serde_json::Value) -> ContentRecord {
    serde_json::from_value(v).unwrap()
  }

  fn action() -> CategoryRecord {
    CategoryRecord {
      category_id: 7,
      name:        "Action".into(),
    }
  }

  #[tokio::test]
  async fn category_ingest_is_idempotent() {
    let s = store().await;
    let records = vec![
      action(),
      CategoryRecord {
        category_id: 12,
        name:        "Drama".into(),
      },
    ];

    assert_eq!(ingest_categories(&s, &records).await.unwrap(), 2);
    assert_eq!(ingest_categories(&s, &records).await.unwrap(), 2);

    let fetched = s.category_by_ext_id(7).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Action");
  }

  #[tokio::test]
  async fn full_pipeline_single_record() {
    let s = store().await;
    ingest_categories(&s, &[action()]).await.unwrap();

    let contents = vec![record(serde_json::json!({
      "ContentId": 501,
      "MediaItemID": 9001,
      "FilmId": 31,
      "Title": "Night Ferry",
      "Runtime": "1h 33m",
      "LicenseStartDate": "2024-01-01 00:00:00",
      "LicenseEndDate": "2024-06-30 00:00:00",
      "CategoryIds": [7],
      "Actors": ["Jane Doe"],
      "Directors": ["John Smith"]
    }))];

    assert_eq!(ingest_contents(&s, &contents).await.unwrap(), 1);

    let content = s.content_by_ext_id(501).await.unwrap().unwrap();
    assert_eq!(content.runtime_s, Some(5580));

    let category = s.category_by_name("Action").await.unwrap().unwrap();
    let listed = s.content_by_category(category.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, content.id);

    let star = s.person_by_name("Jane Doe").await.unwrap().unwrap();
    assert_eq!(s.content_by_star(star.id).await.unwrap().len(), 1);

    let director = s.person_by_name("John Smith").await.unwrap().unwrap();
    assert_eq!(s.content_by_director(director.id).await.unwrap().len(), 1);

    assert_eq!(s.license_periods(content.id).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn reingest_adds_no_duplicate_rows() {
    let s = store().await;
    ingest_categories(&s, &[action()]).await.unwrap();

    let contents = vec![record(serde_json::json!({
      "ContentId": 501,
      "MediaItemID": 9001,
      "FilmId": 31,
      "Title": "Night Ferry",
      "LicenseStartDate": "2024-01-01 00:00:00",
      "LicenseEndDate": "2024-06-30 00:00:00",
      "CategoryIds": [7],
      "Actors": ["Jane Doe"],
      "Directors": ["John Smith"]
    }))];

    ingest_contents(&s, &contents).await.unwrap();
    ingest_contents(&s, &contents).await.unwrap();

    let content = s.content_by_ext_id(501).await.unwrap().unwrap();
    let category = s.category_by_name("Action").await.unwrap().unwrap();
    assert_eq!(s.content_by_category(category.id).await.unwrap().len(), 1);

    let star = s.person_by_name("Jane Doe").await.unwrap().unwrap();
    assert_eq!(s.content_by_star(star.id).await.unwrap().len(), 1);

    let director = s.person_by_name("John Smith").await.unwrap().unwrap();
    assert_eq!(s.content_by_director(director.id).await.unwrap().len(), 1);
    assert_eq!(s.license_periods(content.id).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn unknown_category_aborts_the_run() {
    let s = store().await;

    let contents = vec![record(serde_json::json!({
      "ContentId": 501,
      "MediaItemID": 9001,
      "FilmId": 31,
      "Title": "Night Ferry",
      "CategoryIds": [99]
    }))];

    let err = ingest_contents(&s, &contents).await.unwrap_err();
    let cause = err.root_cause().downcast_ref::<marquee_store_sqlite::Error>();
    assert!(matches!(
      cause,
      Some(marquee_store_sqlite::Error::UnknownExtCategory(99))
    ));

    // The content row itself committed before the association failed.
    assert!(s.content_by_ext_id(501).await.unwrap().is_some());
  }

  #[tokio::test]
  async fn unparsable_runtime_does_not_abort() {
    let s = store().await;

    let contents = vec![record(serde_json::json!({
      "ContentId": 501,
      "MediaItemID": 9001,
      "FilmId": 31,
      "Title": "Night Ferry",
      "Runtime": "feature length"
    }))];

    assert_eq!(ingest_contents(&s, &contents).await.unwrap(), 1);

    let content = s.content_by_ext_id(501).await.unwrap().unwrap();
    assert_eq!(content.runtime_s, None);
    assert_eq!(content.runtime_h, None);
  }
}
