use crate::domain::{FixRecord, Language, ProjectDraft};
use crate::infra::db::Database;
use crate::infra::db::repository::*;

#[test]
fn test_snapshot_repository_latest_wins() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = SnapshotRepository::new(db.connection());

    assert!(repo.latest()?.is_none());

    repo.insert("print(1)", &Language::Python)?;
    repo.insert("fmt.Println(2)", &Language::Go)?;

    let latest = repo.latest()?.expect("snapshot");
    assert_eq!(latest.code, "fmt.Println(2)");
    assert_eq!(latest.language, Language::Go);
    assert!(latest.captured_at.is_some());
    assert_eq!(repo.count()?, 2);

    Ok(())
}

#[test]
fn test_chat_repository_keeps_order() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = ChatRepository::new(db.connection());

    repo.append("first", "one")?;
    repo.append("second", "two")?;

    let turns = repo.list_all()?;
    let users: Vec<_> = turns.iter().map(|t| t.user_message.as_str()).collect();
    assert_eq!(users, vec!["first", "second"]);
    assert_eq!(turns[1].assistant_reply, "two");

    Ok(())
}

#[test]
fn test_project_repository_lifecycle() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = ProjectRepository::new(db.connection());

    let draft = ProjectDraft::new("demo", "int main() {}", Language::Cpp).expect("draft");
    let first = repo.create(&draft)?;
    let second = repo.create(&ProjectDraft::new("other", "", Language::C).expect("draft"))?;
    assert_ne!(first, second);

    let all = repo.list_all()?;
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, second, "newest project comes first");
    assert!(!all[1].is_favorite);

    repo.set_favorite(first, true)?;
    let demo = repo
        .list_all()?
        .into_iter()
        .find(|p| p.id == first)
        .expect("demo");
    assert!(demo.is_favorite);
    assert_eq!(demo.language, Language::Cpp);

    repo.delete(first)?;
    let remaining: Vec<_> = repo.list_all()?.into_iter().map(|p| p.id).collect();
    assert_eq!(remaining, vec![second]);

    Ok(())
}

#[test]
fn test_project_ids_are_not_reused() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = ProjectRepository::new(db.connection());
    let draft = ProjectDraft::new("a", "", Language::Rust).expect("draft");

    let first = repo.create(&draft)?;
    repo.delete(first)?;
    let second = repo.create(&draft)?;
    assert!(second > first);

    Ok(())
}

#[test]
fn test_fix_history_repository() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = FixHistoryRepository::new(db.connection());

    for i in 0..3 {
        repo.insert(&FixRecord {
            original_code: format!("broken {i}"),
            fixed_code: format!("fixed {i}"),
            language: Language::Java,
        })?;
    }

    let recent = repo.list_recent(2)?;
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].fixed_code, "fixed 2");
    assert_eq!(recent[1].language, Language::Java);

    Ok(())
}
