use super::test_db;
use crate::DbError;

#[test]
fn test_missing_key_reads_none() {
    let db = test_db();
    assert_eq!(db.get_setting("THEME").unwrap(), None);
}

#[test]
fn test_set_overwrites() {
    let db = test_db();
    db.set_setting("THEME", "dark", "normal").unwrap();
    assert_eq!(db.get_setting("THEME").unwrap(), Some("dark".into()));

    db.set_setting("THEME", "light", "normal").unwrap();
    assert_eq!(db.get_setting("THEME").unwrap(), Some("light".into()));
}

#[test]
fn test_empty_key_rejected() {
    let db = test_db();
    let err = db.set_setting("", "value", "normal").unwrap_err();
    assert!(matches!(err, DbError::InvalidData(_)));
}
