use anyhow::Result;
use tempfile::tempdir;

use super::DiskStorage;
use crate::domain::models::Storage;

#[tokio::test]
async fn it_loads_nothing_before_the_first_save() -> Result<()> {
    let dir = tempdir()?;
    let storage = DiskStorage::new(dir.path().join("session"));

    assert_eq!(storage.load("conversation").await?, None);
    return Ok(());
}

#[tokio::test]
async fn it_saves_and_loads_values() -> Result<()> {
    let dir = tempdir()?;
    let storage = DiskStorage::new(dir.path().join("session"));

    storage.save("asked-count", "7").await?;

    assert_eq!(storage.load("asked-count").await?, Some("7".to_string()));
    assert!(dir.path().join("session/asked-count").exists());
    return Ok(());
}

#[tokio::test]
async fn it_overwrites_on_save() -> Result<()> {
    let dir = tempdir()?;
    let storage = DiskStorage::new(dir.path().join("session"));

    storage.save("conversation", "[1]").await?;
    storage.save("conversation", "[1,2]").await?;

    assert_eq!(
        storage.load("conversation").await?,
        Some("[1,2]".to_string())
    );
    return Ok(());
}

#[tokio::test]
async fn it_removes_values() -> Result<()> {
    let dir = tempdir()?;
    let storage = DiskStorage::new(dir.path().join("session"));

    storage.save("conversation", "[]").await?;
    storage.remove("conversation").await?;
    storage.remove("conversation").await?;

    assert_eq!(storage.load("conversation").await?, None);
    assert!(!dir.path().join("session/conversation").exists());
    return Ok(());
}

#[tokio::test]
async fn it_keeps_keys_independent() -> Result<()> {
    let dir = tempdir()?;
    let storage = DiskStorage::new(dir.path().join("session"));

    storage.save("conversation", "[]").await?;
    storage.save("asked-count", "2").await?;
    storage.remove("conversation").await?;

    assert_eq!(storage.load("asked-count").await?, Some("2".to_string()));
    return Ok(());
}
