//! Menu API integration tests: query filtering, tree assembly, reorder
//! atomicity and catalog sync. Runs against a real SQLite database with
//! the auth fixture so every request acts as an admin.

mod common;

use common::{category, data_names, spawn_app, spawn_app_with};

use admin_server::{AuthMode, SyncLevelPolicy};
use http::StatusCode;
use serde_json::json;
use shared::models::{CategoryCreate, ProductCreate};

#[tokio::test]
async fn menu_items_public_view_filters_hidden_and_inactive() {
    let app = spawn_app().await;
    app.seed_category(category("Makeup")).await;
    app.seed_category(CategoryCreate {
        show_in_menu: Some(false),
        ..category("Hidden Tools")
    })
    .await;
    app.seed_category(CategoryCreate {
        is_active: Some(false),
        ..category("Discontinued")
    })
    .await;

    let (status, body) = app.get("/api/menu/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(data_names(&body), vec!["Makeup"]);
}

#[tokio::test]
async fn menu_items_show_all_returns_every_row() {
    let app = spawn_app().await;
    app.seed_category(category("Makeup")).await;
    app.seed_category(CategoryCreate {
        show_in_menu: Some(false),
        ..category("Hidden Tools")
    })
    .await;
    app.seed_category(CategoryCreate {
        is_active: Some(false),
        ..category("Discontinued")
    })
    .await;

    let (status, body) = app.get("/api/menu/items?showAll=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data_names(&body).len(), 3);

    // Anything other than the exact string "true" stays filtered
    let (_, body) = app.get("/api/menu/items?showAll=1").await;
    assert_eq!(data_names(&body), vec!["Makeup"]);
}

#[tokio::test]
async fn menu_items_order_by_menu_order_then_level_then_name() {
    let app = spawn_app().await;
    app.seed_category(CategoryCreate {
        menu_order: Some(2),
        ..category("Skincare")
    })
    .await;
    app.seed_category(CategoryCreate {
        menu_order: Some(1),
        ..category("Makeup")
    })
    .await;
    // Same order and level as Makeup, name breaks the tie
    app.seed_category(CategoryCreate {
        menu_order: Some(1),
        ..category("Fragrance")
    })
    .await;

    let (_, body) = app.get("/api/menu/items").await;
    assert_eq!(data_names(&body), vec!["Fragrance", "Makeup", "Skincare"]);
}

#[tokio::test]
async fn menu_tree_nests_children_under_parents() {
    let app = spawn_app().await;
    let makeup = app.seed_category(category("Makeup")).await;
    app.seed_category(CategoryCreate {
        menu_level: Some(1),
        parent_id: Some(makeup.id.clone()),
        ..category("Lipstick")
    })
    .await;
    app.seed_category(CategoryCreate {
        menu_order: Some(1),
        ..category("Skincare")
    })
    .await;

    let (status, body) = app.get("/api/menu/tree").await;
    assert_eq!(status, StatusCode::OK);

    let roots = body["data"].as_array().unwrap();
    assert_eq!(roots.len(), 2);
    assert_eq!(roots[0]["name"], "Makeup");
    assert_eq!(roots[0]["children"][0]["name"], "Lipstick");
    assert_eq!(roots[1]["name"], "Skincare");
    assert!(roots[1]["children"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn menu_tree_promotes_children_of_filtered_parents() {
    let app = spawn_app().await;
    let hidden = app
        .seed_category(CategoryCreate {
            show_in_menu: Some(false),
            ..category("Hidden Parent")
        })
        .await;
    app.seed_category(CategoryCreate {
        menu_level: Some(1),
        parent_id: Some(hidden.id.clone()),
        ..category("Visible Child")
    })
    .await;

    // Public view drops the parent; the child surfaces as a root
    let (_, body) = app.get("/api/menu/tree").await;
    let roots = body["data"].as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["name"], "Visible Child");
}

#[tokio::test]
async fn reorder_applies_whole_batch() {
    let app = spawn_app().await;
    let makeup = app.seed_category(category("Makeup")).await;
    let skincare = app
        .seed_category(CategoryCreate {
            menu_order: Some(1),
            ..category("Skincare")
        })
        .await;

    let (status, body) = app
        .put_json(
            "/api/menu/reorder",
            json!({
                "items": [
                    { "id": makeup.id, "menuOrder": 1, "level": 0, "parentId": null, "showInMenu": true },
                    { "id": skincare.id, "menuOrder": 0, "level": 0, "parentId": null, "showInMenu": true }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["success"], json!(true));

    let (_, body) = app.get("/api/menu/items").await;
    assert_eq!(data_names(&body), vec!["Skincare", "Makeup"]);

    // Re-applying the same batch changes nothing
    let (status, _) = app
        .put_json(
            "/api/menu/reorder",
            json!({
                "items": [
                    { "id": makeup.id, "menuOrder": 1, "level": 0, "parentId": null, "showInMenu": true },
                    { "id": skincare.id, "menuOrder": 0, "level": 0, "parentId": null, "showInMenu": true }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app.get("/api/menu/items").await;
    assert_eq!(data_names(&body), vec!["Skincare", "Makeup"]);
}

#[tokio::test]
async fn reorder_can_reparent_and_hide_in_one_batch() {
    let app = spawn_app().await;
    let makeup = app.seed_category(category("Makeup")).await;
    let tools = app
        .seed_category(CategoryCreate {
            menu_order: Some(1),
            ..category("Tools")
        })
        .await;

    let (status, _) = app
        .put_json(
            "/api/menu/reorder",
            json!({
                "items": [
                    { "id": tools.id, "menuOrder": 0, "level": 1, "parentId": makeup.id, "showInMenu": false }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let moved = app
        .categories()
        .find_by_id(&tools.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.parent_id.as_deref(), Some(makeup.id.as_str()));
    assert_eq!(moved.menu_level, 1);
    assert!(!moved.show_in_menu);
}

#[tokio::test]
async fn reorder_unknown_id_rolls_back_the_batch() {
    let app = spawn_app().await;
    let makeup = app.seed_category(category("Makeup")).await;

    let (status, _) = app
        .put_json(
            "/api/menu/reorder",
            json!({
                "items": [
                    { "id": makeup.id, "menuOrder": 9, "level": 0, "parentId": null, "showInMenu": true },
                    { "id": "no-such-id", "menuOrder": 1, "level": 0, "parentId": null, "showInMenu": true }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The valid entry must not have been written
    let unchanged = app
        .categories()
        .find_by_id(&makeup.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.menu_order, 0);
}

#[tokio::test]
async fn reorder_rejects_cycles_and_duplicates() {
    let app = spawn_app().await;
    let a = app.seed_category(category("A")).await;
    let b = app.seed_category(category("B")).await;

    // A and B pointing at each other
    let (status, _) = app
        .put_json(
            "/api/menu/reorder",
            json!({
                "items": [
                    { "id": a.id, "menuOrder": 0, "level": 1, "parentId": b.id, "showInMenu": true },
                    { "id": b.id, "menuOrder": 1, "level": 1, "parentId": a.id, "showInMenu": true }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Same id twice in one batch
    let (status, _) = app
        .put_json(
            "/api/menu/reorder",
            json!({
                "items": [
                    { "id": a.id, "menuOrder": 0, "level": 0, "parentId": null, "showInMenu": true },
                    { "id": a.id, "menuOrder": 1, "level": 0, "parentId": null, "showInMenu": true }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reorder_rejects_empty_batch() {
    let app = spawn_app().await;
    let (status, body) = app
        .put_json("/api/menu/reorder", json!({ "items": [] }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn sync_pulls_active_categories_into_menu() {
    let app = spawn_app().await;
    app.seed_category(CategoryCreate {
        show_in_menu: Some(false),
        sort_order: Some(5),
        menu_order: Some(99),
        ..category("Makeup")
    })
    .await;
    let inactive = app
        .seed_category(CategoryCreate {
            is_active: Some(false),
            show_in_menu: Some(false),
            ..category("Discontinued")
        })
        .await;

    let (status, body) = app.post("/api/menu/sync").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalCategories"], json!(1));

    // Hidden active category is back in the menu at its catalog position
    let (_, body) = app.get("/api/menu/items").await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Makeup");
    assert_eq!(items[0]["menuOrder"], json!(5));

    // Inactive rows are never touched
    let untouched = app
        .categories()
        .find_by_id(&inactive.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!untouched.show_in_menu);
}

#[tokio::test]
async fn sync_is_idempotent() {
    let app = spawn_app().await;
    app.seed_category(CategoryCreate {
        sort_order: Some(3),
        ..category("Makeup")
    })
    .await;
    app.seed_category(CategoryCreate {
        sort_order: Some(1),
        ..category("Skincare")
    })
    .await;

    let (_, first) = app.post("/api/menu/sync").await;
    let (_, second) = app.post("/api/menu/sync").await;
    assert_eq!(first["data"]["totalCategories"], json!(2));
    assert_eq!(second["data"]["totalCategories"], json!(2));

    let (_, body) = app.get("/api/menu/items").await;
    assert_eq!(data_names(&body), vec!["Skincare", "Makeup"]);
}

#[tokio::test]
async fn sync_overwrites_manual_menu_order_with_catalog_order() {
    let app = spawn_app().await;
    // Manual menu order says Makeup first; the catalog says Skincare first
    app.seed_category(CategoryCreate {
        sort_order: Some(3),
        menu_order: Some(0),
        ..category("Makeup")
    })
    .await;
    app.seed_category(CategoryCreate {
        sort_order: Some(1),
        menu_order: Some(1),
        ..category("Skincare")
    })
    .await;
    app.seed_category(CategoryCreate {
        sort_order: Some(2),
        menu_order: Some(2),
        is_active: Some(false),
        ..category("Discontinued")
    })
    .await;

    let (_, body) = app.get("/api/menu/items").await;
    assert_eq!(data_names(&body), vec!["Makeup", "Skincare"]);

    let (_, body) = app.post("/api/menu/sync").await;
    assert_eq!(body["data"]["totalCategories"], json!(2));

    let (_, body) = app.get("/api/menu/items").await;
    assert_eq!(data_names(&body), vec!["Skincare", "Makeup"]);
}

#[tokio::test]
async fn sync_preserve_keeps_menu_levels() {
    let app = spawn_app().await;
    let makeup = app.seed_category(category("Makeup")).await;
    let lipstick = app
        .seed_category(CategoryCreate {
            menu_level: Some(1),
            parent_id: Some(makeup.id.clone()),
            ..category("Lipstick")
        })
        .await;

    app.post("/api/menu/sync").await;

    let after = app
        .categories()
        .find_by_id(&lipstick.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.menu_level, 1);
    assert_eq!(after.parent_id.as_deref(), Some(makeup.id.as_str()));
}

#[tokio::test]
async fn sync_flatten_resets_menu_levels() {
    let app = spawn_app_with(AuthMode::Fixture, SyncLevelPolicy::Flatten).await;
    let makeup = app.seed_category(category("Makeup")).await;
    let lipstick = app
        .seed_category(CategoryCreate {
            menu_level: Some(1),
            parent_id: Some(makeup.id.clone()),
            ..category("Lipstick")
        })
        .await;

    app.post("/api/menu/sync").await;

    let after = app
        .categories()
        .find_by_id(&lipstick.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.menu_level, 0);
}

#[tokio::test]
async fn delete_rejected_while_products_are_linked() {
    let app = spawn_app().await;
    let makeup = app.seed_category(category("Makeup")).await;
    app.seed_product(ProductCreate {
        name: "Red Lipstick".to_string(),
        category_id: Some(makeup.id.clone()),
        category_name: None,
        price_cents: Some(1299),
        is_active: Some(true),
    })
    .await;

    let (status, body) = app
        .delete(&format!("/api/menu/items/{}", makeup.id))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("1 linked products"), "message: {message}");

    // Still there
    assert!(
        app.categories()
            .find_by_id(&makeup.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn delete_counts_legacy_name_linked_products() {
    let app = spawn_app().await;
    let tea = app.seed_category(category("Tea")).await;
    // Migrated row: no FK, only the old name-string link
    app.seed_product(ProductCreate {
        name: "Green Tea".to_string(),
        category_id: None,
        category_name: Some("Tea".to_string()),
        price_cents: None,
        is_active: Some(true),
    })
    .await;

    let (status, _) = app.delete(&format!("/api/menu/items/{}", tea.id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_guard_lets_the_fk_link_win_over_a_stale_name() {
    let app = spawn_app().await;
    let tea = app.seed_category(category("Tea")).await;
    let coffee = app.seed_category(category("Coffee")).await;
    // Re-linked row: the FK points at Coffee, the name string is stale
    app.seed_product(ProductCreate {
        name: "Matcha Latte".to_string(),
        category_id: Some(coffee.id.clone()),
        category_name: Some("Tea".to_string()),
        price_cents: Some(450),
        is_active: Some(true),
    })
    .await;

    // The stale name must not pin Tea
    let (status, _) = app.delete(&format!("/api/menu/items/{}", tea.id)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .delete(&format!("/api/menu/items/{}", coffee.id))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("1 linked products"), "message: {message}");
}

#[tokio::test]
async fn delete_reparents_children_to_grandparent() {
    let app = spawn_app().await;
    let a = app.seed_category(category("A")).await;
    let b = app
        .seed_category(CategoryCreate {
            menu_level: Some(1),
            parent_id: Some(a.id.clone()),
            ..category("B")
        })
        .await;
    let c = app
        .seed_category(CategoryCreate {
            menu_level: Some(2),
            parent_id: Some(b.id.clone()),
            ..category("C")
        })
        .await;

    let (status, _) = app.delete(&format!("/api/menu/items/{}", b.id)).await;
    assert_eq!(status, StatusCode::OK);

    let child = app.categories().find_by_id(&c.id).await.unwrap().unwrap();
    assert_eq!(child.parent_id.as_deref(), Some(a.id.as_str()));
    assert_eq!(child.menu_level, 1);
}

#[tokio::test]
async fn visibility_toggle_round_trip() {
    let app = spawn_app().await;
    let makeup = app.seed_category(category("Makeup")).await;
    let uri = format!("/api/menu/items/{}/visibility", makeup.id);

    let (status, _) = app.put_json(&uri, json!({ "showInMenu": false })).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app.get("/api/menu/items").await;
    assert!(data_names(&body).is_empty());

    let (status, _) = app.put_json(&uri, json!({ "showInMenu": true })).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app.get("/api/menu/items").await;
    assert_eq!(data_names(&body), vec!["Makeup"]);

    let (status, _) = app
        .put_json(
            "/api/menu/items/no-such-id/visibility",
            json!({ "showInMenu": true }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_distinguishes_missing_parent_from_null() {
    let app = spawn_app().await;
    let makeup = app.seed_category(category("Makeup")).await;
    let lipstick = app
        .seed_category(CategoryCreate {
            menu_level: Some(1),
            parent_id: Some(makeup.id.clone()),
            ..category("Lipstick")
        })
        .await;
    let uri = format!("/api/menu/items/{}", lipstick.id);

    // parentId absent: parent untouched
    let (status, body) = app.put_json(&uri, json!({ "menuOrder": 4 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["parentId"], json!(makeup.id));
    assert_eq!(body["data"]["menuOrder"], json!(4));

    // parentId: null moves the category to the top level
    let (status, body) = app.put_json(&uri, json!({ "parentId": null })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["parentId"], json!(null));
}

#[tokio::test]
async fn update_distinguishes_missing_image_from_null() {
    let app = spawn_app().await;
    let makeup = app
        .seed_category(CategoryCreate {
            image: Some("makeup.png".to_string()),
            ..category("Makeup")
        })
        .await;
    let uri = format!("/api/menu/items/{}", makeup.id);

    // image absent: kept
    let (status, body) = app.put_json(&uri, json!({ "menuOrder": 2 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["image"], json!("makeup.png"));

    // image: null clears it
    let (status, body) = app.put_json(&uri, json!({ "image": null })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["image"], json!(null));

    // and a value replaces it
    let (status, body) = app
        .put_json(&uri, json!({ "image": "makeup-v2.png" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["image"], json!("makeup-v2.png"));
}

#[tokio::test]
async fn update_rejects_self_parent_and_ancestry_cycles() {
    let app = spawn_app().await;
    let a = app.seed_category(category("A")).await;
    let b = app
        .seed_category(CategoryCreate {
            menu_level: Some(1),
            parent_id: Some(a.id.clone()),
            ..category("B")
        })
        .await;

    let (status, _) = app
        .put_json(
            &format!("/api/menu/items/{}", a.id),
            json!({ "parentId": a.id }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A under its own descendant
    let (status, _) = app
        .put_json(
            &format!("/api/menu/items/{}", a.id),
            json!({ "parentId": b.id }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn category_create_rejects_duplicates() {
    let app = spawn_app().await;
    let (status, _) = app
        .post_json(
            "/api/categories",
            json!({ "name": "Makeup", "description": "Cosmetics" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post_json(
            "/api/categories",
            json!({ "name": "Makeup", "description": "Again" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn category_list_includes_product_counts() {
    let app = spawn_app().await;
    let makeup = app.seed_category(category("Makeup")).await;
    app.seed_product(ProductCreate {
        name: "Red Lipstick".to_string(),
        category_id: Some(makeup.id.clone()),
        category_name: None,
        price_cents: Some(1299),
        is_active: Some(true),
    })
    .await;
    app.seed_product(ProductCreate {
        name: "Old Gloss".to_string(),
        category_id: Some(makeup.id.clone()),
        category_name: None,
        price_cents: Some(899),
        is_active: Some(false),
    })
    .await;

    let (status, body) = app.get(&format!("/api/categories/{}", makeup.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["productCount"], json!(2));
    assert_eq!(body["data"]["activeProductCount"], json!(1));
}
