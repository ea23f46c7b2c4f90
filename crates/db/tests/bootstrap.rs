use sqlx::PgPool;

/// Connect, migrate and verify the schema is usable.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    dealership_db::health_check(&pool).await.unwrap();

    for table in ["vehicles", "gear_products", "leads", "admin_settings"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert!(count.0 >= 0);
    }
}

/// The settings row is seeded and starts without a stored hash.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_settings_seeded(pool: PgPool) {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin_settings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let hash = dealership_db::repositories::AdminSettingRepo::get_password_hash(&pool)
        .await
        .unwrap();
    assert!(hash.is_none());
}

/// A second settings row is rejected by the CHECK constraint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_settings_single_row(pool: PgPool) {
    let result = sqlx::query("INSERT INTO admin_settings (id) VALUES (2)")
        .execute(&pool)
        .await;
    assert!(result.is_err());
}
