// Read-only query surface: catalog reads, order projections, stats

mod common;

use common::{request, setup_test_db};
use nutricart_core::filter::FilterCriteria;
use nutricart_core::model::NutritionTotals;
use nutricart_engine::commands::engine_query::{apply_engine_query, EngineQuery, EngineQueryResult};
use nutricart_engine::commands::order_commit::commit_order;

fn item_names(result: EngineQueryResult) -> Vec<String> {
    match result {
        EngineQueryResult::Items(items) => items.into_iter().map(|i| i.name).collect(),
        other => panic!("expected items, got {:?}", other),
    }
}

#[test]
fn test_item_list_sorted_by_name() {
    let (_db, conn) = setup_test_db();
    let names = item_names(apply_engine_query(EngineQuery::ItemList, &conn).unwrap());
    assert_eq!(names, vec!["Berry Smoothie", "Churro", "Salad", "Slice of Pizza"]);
}

#[test]
fn test_item_search_missing_query_lists_all() {
    let (_db, conn) = setup_test_db();
    let all = item_names(apply_engine_query(EngineQuery::ItemSearch { query: None }, &conn).unwrap());
    let blank = item_names(
        apply_engine_query(EngineQuery::ItemSearch { query: Some("  ".into()) }, &conn).unwrap(),
    );
    assert_eq!(all.len(), 4);
    assert_eq!(all, blank);
}

#[test]
fn test_item_search_matches_substring() {
    let (_db, conn) = setup_test_db();
    let names = item_names(
        apply_engine_query(EngineQuery::ItemSearch { query: Some("pIzZa".into()) }, &conn).unwrap(),
    );
    assert_eq!(names, vec!["Slice of Pizza"]);
}

#[test]
fn test_item_filter_applies_bounds() {
    let (_db, conn) = setup_test_db();
    let criteria = FilterCriteria::from_raw(Some("700"), Some("10"), None);
    let names = item_names(apply_engine_query(EngineQuery::ItemFilter(criteria), &conn).unwrap());
    assert_eq!(names, vec!["Salad", "Slice of Pizza"]);
}

#[test]
fn test_item_favorites() {
    let (_db, conn) = setup_test_db();
    let names = item_names(apply_engine_query(EngineQuery::ItemFavorites, &conn).unwrap());
    assert_eq!(names, vec!["Slice of Pizza"]);
}

#[test]
fn test_unknown_order_detail_is_null_order() {
    let (_db, conn) = setup_test_db();
    match apply_engine_query(EngineQuery::OrderDetail { order_id: 5 }, &conn).unwrap() {
        EngineQueryResult::OrderDetail(detail) => {
            assert!(detail.order.is_none());
            assert!(detail.items.is_empty());
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_stats_without_orders_are_null() {
    let (_db, conn) = setup_test_db();
    let result = apply_engine_query(EngineQuery::UserStats { user_id: 2 }, &conn).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["total_orders"], 0);
    assert!(json["avg_calories"].is_null());
    assert!(json["avg_protein"].is_null());
    assert!(json["total_spent"].is_null());
}

#[test]
fn test_orders_for_user_only_returns_that_user() {
    let (_db, mut conn) = setup_test_db();
    commit_order(&request(1, &["Churro"], NutritionTotals::default()), &mut conn).unwrap();
    commit_order(&request(2, &["Salad"], NutritionTotals::default()), &mut conn).unwrap();
    commit_order(&request(1, &["Salad"], NutritionTotals::default()), &mut conn).unwrap();

    match apply_engine_query(EngineQuery::OrdersForUser { user_id: 1 }, &conn).unwrap() {
        EngineQueryResult::Orders(orders) => {
            assert_eq!(orders.len(), 2);
            // Same date, so ties break on order id descending.
            assert_eq!(orders[0].order.order_id, 1002);
            assert_eq!(orders[1].order.order_id, 1000);
            assert!(orders.iter().all(|o| o.first_name == "Ada"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_favorite_orders_empty_until_flagged() {
    let (_db, mut conn) = setup_test_db();
    let placed = commit_order(&request(1, &["Churro"], NutritionTotals::default()), &mut conn).unwrap();

    let query = EngineQuery::FavoriteOrdersForUser { user_id: 1 };
    assert_eq!(
        apply_engine_query(query.clone(), &conn).unwrap(),
        EngineQueryResult::FavoriteOrders(vec![])
    );

    conn.execute("UPDATE orders SET favorite = 1 WHERE order_id = ?1", [placed.order_id])
        .unwrap();
    match apply_engine_query(query, &conn).unwrap() {
        EngineQueryResult::FavoriteOrders(orders) => assert_eq!(orders[0].order_id, placed.order_id),
        other => panic!("unexpected result: {:?}", other),
    }
}
