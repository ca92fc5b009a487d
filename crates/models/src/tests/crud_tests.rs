use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait, ModelTrait};
use uuid::Uuid;

use crate::db::connect_with_config;
use crate::{category, image_product, product, user_admin};

/// Connect and migrate, or `None` when no database is reachable.
async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let cfg = configs::DatabaseConfig {
        min_connections: 1,
        connect_timeout_secs: 3,
        acquire_timeout_secs: 3,
        ..configs::DatabaseConfig::default()
    };
    let db = match connect_with_config(&cfg).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    migration::Migrator::up(&db, None).await.ok()?;
    Some(db)
}

async fn seed_admin_and_category(db: &DatabaseConnection) -> Result<(user_admin::Model, category::Model)> {
    let admin = user_admin::insert(db, user_admin::new_model(user_admin::NewUserAdmin {
        email: format!("crud_{}@shop.io", Uuid::new_v4()),
        full_name: "Crud Tester".into(),
        password_hash: "-".into(),
    })).await?;
    let cat = category::insert(db, category::new_model(category::NewCategory {
        name: format!("crud_cat_{}", Uuid::new_v4()),
        description: "test".into(),
        user_admin_id: admin.id,
    })).await?;
    Ok((admin, cat))
}

#[tokio::test]
async fn test_product_crud_with_image() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let (admin, cat) = seed_admin_and_category(&db).await?;

    let image = image_product::insert(&db, image_product::new_model("aGVsbG8=".into())).await?;
    let created = product::insert(&db, product::new_model(product::NewProduct {
        name: format!("crud_mug_{}", Uuid::new_v4()),
        description: "Ceramic".into(),
        price: 9.5,
        quantity: 3,
        category_id: cat.id,
        user_admin_id: admin.id,
    }, image.id)).await?;

    let found = product::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref().map(|p| p.quantity), Some(3));

    let mut changed = created.clone();
    changed.quantity = 7;
    let updated = product::update(&db, changed).await?;
    assert_eq!(updated.quantity, 7);

    let owned_image = updated.find_related(image_product::Entity).one(&db).await?;
    assert_eq!(owned_image.map(|i| i.image_base64), Some("aGVsbG8=".to_string()));

    // cleanup in reverse dependency order
    product::Entity::delete_by_id(created.id).exec(&db).await?;
    image_product::Entity::delete_by_id(image.id).exec(&db).await?;
    category::Entity::delete_by_id(cat.id).exec(&db).await?;
    user_admin::Entity::delete_by_id(admin.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_product_requires_existing_category() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let (admin, cat) = seed_admin_and_category(&db).await?;
    let image = image_product::insert(&db, image_product::new_model("abc".into())).await?;

    let orphan = product::new_model(product::NewProduct {
        name: format!("crud_orphan_{}", Uuid::new_v4()),
        description: String::new(),
        price: 1.0,
        quantity: 1,
        category_id: Uuid::new_v4(),
        user_admin_id: admin.id,
    }, image.id);
    assert!(product::insert(&db, orphan).await.is_err());

    image_product::Entity::delete_by_id(image.id).exec(&db).await?;
    category::Entity::delete_by_id(cat.id).exec(&db).await?;
    user_admin::Entity::delete_by_id(admin.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_duplicate_admin_email_is_rejected() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let email = format!("dup_{}@shop.io", Uuid::new_v4());
    let input = || user_admin::NewUserAdmin { email: email.clone(), full_name: "Dup".into(), password_hash: "-".into() };

    let first = user_admin::insert(&db, user_admin::new_model(input())).await?;
    assert!(user_admin::insert(&db, user_admin::new_model(input())).await.is_err());

    user_admin::Entity::delete_by_id(first.id).exec(&db).await?;
    Ok(())
}
