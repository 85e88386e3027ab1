//! Repository and sales-store tests against an on-disk SurrealDB
//! Run: cargo test -p order-server --test repository_test

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use order_server::db::DbService;
use order_server::db::repository::{MenuItemRepository, OrderRepository, RepoError};
use order_server::sales::{DbSalesStore, SalesAggregator};
use shared::models::{
    LineItem, MenuItemCreate, MenuItemUpdate, MenuSearchQuery, OrderCreate, OrderStatus,
    OrderUpdate, SalesQuery,
};

async fn open_db() -> (tempfile::TempDir, DbService) {
    let tmp = tempfile::tempdir().unwrap();
    let service = DbService::new(tmp.path()).await.unwrap();
    (tmp, service)
}

fn millis(y: i32, m: u32, d: u32) -> i64 {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0)
        .unwrap()
        .timestamp_millis()
}

fn menu(name: &str, category: Option<&str>, price: f64) -> MenuItemCreate {
    MenuItemCreate {
        name: name.to_string(),
        description: None,
        category: category.map(str::to_string),
        price,
        is_available: None,
    }
}

fn order(items: Vec<(&str, i32)>) -> OrderCreate {
    OrderCreate {
        name: "Ada".to_string(),
        address: "1 Main St".to_string(),
        phone: "555-0100".to_string(),
        items: items
            .into_iter()
            .map(|(item, quantity)| LineItem {
                item: item.to_string(),
                quantity,
            })
            .collect(),
        status: None,
    }
}

#[tokio::test]
async fn menu_item_crud_round_trip() {
    let (_tmp, service) = open_db().await;
    let repo = MenuItemRepository::new(service.db.clone());

    let created = repo.create(menu("Margherita", Some("pizza"), 9.5)).await.unwrap();
    assert!(!created.id.is_empty());
    assert!(created.is_available);
    assert_eq!(created.category.as_deref(), Some("pizza"));

    let fetched = repo.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    // "table:key" form is accepted too
    let prefixed = repo
        .find_by_id(&format!("menu_item:{}", created.id))
        .await
        .unwrap();
    assert_eq!(prefixed.map(|m| m.id), Some(created.id.clone()));

    let updated = repo
        .update(
            &created.id,
            MenuItemUpdate {
                price: Some(11.0),
                is_available: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 11.0);
    assert!(!updated.is_available);
    assert_eq!(updated.name, "Margherita");

    assert_eq!(repo.find_all().await.unwrap().len(), 1);

    let deleted = repo.delete(&created.id).await.unwrap();
    assert_eq!(deleted, created.id);
    assert!(repo.find_by_id(&created.id).await.unwrap().is_none());
    assert!(matches!(
        repo.delete(&created.id).await,
        Err(RepoError::NotFound(_))
    ));
    assert!(matches!(
        repo.update(&created.id, MenuItemUpdate::default()).await,
        Err(RepoError::NotFound(_))
    ));
}

#[tokio::test]
async fn menu_item_search_by_name_and_category() {
    let (_tmp, service) = open_db().await;
    let repo = MenuItemRepository::new(service.db.clone());

    repo.create(menu("Margherita Pizza", Some("pizza"), 9.5)).await.unwrap();
    repo.create(menu("Pepperoni Pizza", Some("pizza"), 11.0)).await.unwrap();
    repo.create(menu("Caesar Salad", Some("salad"), 7.0)).await.unwrap();

    let by_name = repo
        .search(&MenuSearchQuery {
            q: Some("PIZZA".into()),
            category: None,
        })
        .await
        .unwrap();
    assert_eq!(by_name.len(), 2);

    let by_category = repo
        .search(&MenuSearchQuery {
            q: None,
            category: Some("salad".into()),
        })
        .await
        .unwrap();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].name, "Caesar Salad");

    let both = repo
        .search(&MenuSearchQuery {
            q: Some("pepp".into()),
            category: Some("pizza".into()),
        })
        .await
        .unwrap();
    assert_eq!(both.len(), 1);

    let none = repo
        .search(&MenuSearchQuery {
            q: Some("pepp".into()),
            category: Some("salad".into()),
        })
        .await
        .unwrap();
    assert!(none.is_empty());

    let all = repo.search(&MenuSearchQuery::default()).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn order_crud_and_status_filter() {
    let (_tmp, service) = open_db().await;
    let repo = OrderRepository::new(service.db.clone());

    let first = repo.create(order(vec![("a", 1)]), 1_000).await.unwrap();
    let second = repo.create(order(vec![("b", 2)]), 2_000).await.unwrap();
    assert_eq!(first.status, OrderStatus::Pending);
    assert_eq!(first.created_at, 1_000);
    assert_eq!(first.updated_at, 1_000);

    // newest first
    let all = repo.find_all().await.unwrap();
    assert_eq!(
        all.iter().map(|o| o.id.as_str()).collect::<Vec<_>>(),
        vec![second.id.as_str(), first.id.as_str()]
    );

    let confirmed = repo
        .update(
            &first.id,
            OrderUpdate {
                status: Some(OrderStatus::Confirmed),
                ..Default::default()
            },
            5_000,
        )
        .await
        .unwrap();
    assert_eq!(confirmed.status, OrderStatus::Confirmed);
    assert_eq!(confirmed.created_at, 1_000);
    assert_eq!(confirmed.updated_at, 5_000);
    assert_eq!(confirmed.items, first.items);

    let pending = repo.find_by_status(OrderStatus::Pending).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, second.id);

    assert_eq!(repo.delete(&second.id).await.unwrap(), second.id);
    assert!(repo.find_by_id(&second.id).await.unwrap().is_none());
    assert!(matches!(
        repo.delete(&second.id).await,
        Err(RepoError::NotFound(_))
    ));
}

#[tokio::test]
async fn order_create_rejects_empty_items() {
    let (_tmp, service) = open_db().await;
    let repo = OrderRepository::new(service.db.clone());

    assert!(matches!(
        repo.create(order(vec![]), 1_000).await,
        Err(RepoError::Validation(_))
    ));
}

#[tokio::test]
async fn order_range_is_inclusive() {
    let (_tmp, service) = open_db().await;
    let repo = OrderRepository::new(service.db.clone());

    repo.create(order(vec![("a", 1)]), 100).await.unwrap();
    repo.create(order(vec![("a", 1)]), 200).await.unwrap();
    repo.create(order(vec![("a", 1)]), 300).await.unwrap();

    assert_eq!(repo.find_in_range(100, 200).await.unwrap().len(), 2);
    assert_eq!(repo.find_in_range(101, 299).await.unwrap().len(), 1);
    assert_eq!(repo.find_in_range(301, 400).await.unwrap().len(), 0);
}

#[tokio::test]
async fn sales_report_over_database() {
    let (_tmp, service) = open_db().await;
    let menu_repo = MenuItemRepository::new(service.db.clone());
    let order_repo = OrderRepository::new(service.db.clone());

    let pizza = menu_repo.create(menu("Pizza", None, 10.0)).await.unwrap();
    let salad = menu_repo.create(menu("Salad", None, 5.5)).await.unwrap();
    let soda = menu_repo.create(menu("Soda", None, 4.0)).await.unwrap();

    order_repo
        .create(order(vec![(pizza.id.as_str(), 2)]), millis(2024, 1, 15))
        .await
        .unwrap();
    order_repo
        .create(order(vec![(salad.id.as_str(), 1)]), millis(2024, 2, 10))
        .await
        .unwrap();
    order_repo
        .create(order(vec![(soda.id.as_str(), 3)]), millis(2024, 3, 5))
        .await
        .unwrap();

    let sales = SalesAggregator::new(DbSalesStore::new(service.db.clone()), Tz::UTC);

    let ranged = sales
        .compute_total_sales(&SalesQuery::between("2024-01", "2024-02"))
        .await
        .unwrap();
    assert_eq!(ranged.total, 25.5);

    let everything = sales.compute_total_sales(&SalesQuery::default()).await.unwrap();
    assert_eq!(everything.total, 37.5);

    // Dangling reference: the soda rows drop out, nothing else changes
    menu_repo.delete(&soda.id).await.unwrap();
    let after_delete = sales.compute_total_sales(&SalesQuery::default()).await.unwrap();
    assert_eq!(after_delete.total, 25.5);
}
