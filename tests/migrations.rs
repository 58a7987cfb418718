#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use smart_nippo::db::db::Db;
    use smart_nippo::db::migrations::{get_db_version, init_with_migrations, needs_migration, MigrationManager};
    use smart_nippo::db::templates::Templates;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("nested").join("data.db");
            MigrationTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_run_on_open(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.db_path).unwrap();

        assert!(ctx.db_path.exists());
        assert_eq!(get_db_version(&db.conn).unwrap(), MigrationManager::new().latest_version());
        assert!(!needs_migration(&db.conn).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_history(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.db_path).unwrap();

        let history = MigrationManager::new().get_migration_history(&db.conn).unwrap();
        let applied: Vec<(u32, &str)> = history.iter().map(|(v, name, _)| (*v, name.as_str())).collect();
        assert_eq!(applied, vec![(1, "create_tables"), (2, "seed_default_template")]);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_reopening_is_idempotent(ctx: &mut MigrationTestContext) {
        let first = get_db_version(&Db::open(&ctx.db_path).unwrap().conn).unwrap();
        let db = Db::open(&ctx.db_path).unwrap();

        assert_eq!(get_db_version(&db.conn).unwrap(), first);
        let count: i64 = db.conn.query_row("SELECT COUNT(*) FROM templates", [], |row| row.get(0)).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_fresh_connection_needs_migration() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_db_version(&conn).unwrap(), 0);
        assert!(needs_migration(&conn).unwrap());

        init_with_migrations(&mut conn).unwrap();

        assert!(!needs_migration(&conn).unwrap());
        let defaults: i64 = conn
            .query_row("SELECT COUNT(*) FROM templates WHERE is_default = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(defaults, 1);
    }

    #[test]
    fn test_single_default_is_enforced_by_schema() {
        let mut conn = Connection::open_in_memory().unwrap();
        init_with_migrations(&mut conn).unwrap();

        let result = conn.execute(
            "INSERT INTO templates (name, is_default, created_at, updated_at) VALUES ('second', 1, '2024-01-01 00:00:00', '2024-01-01 00:00:00')",
            [],
        );
        assert!(result.is_err());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_deleted_default_is_not_reseeded(ctx: &mut MigrationTestContext) {
        let mut templates = Templates::from_db(Db::open(&ctx.db_path).unwrap());
        let default = templates.get_default().unwrap();
        templates.delete(default.id, false).unwrap();

        let templates = Templates::from_db(Db::open(&ctx.db_path).unwrap());
        assert!(templates.list().unwrap().is_empty());
        assert!(templates.get_default().is_err());
    }
}
