// ==========================================
// AssemblyApi integration tests
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use helpers::test_data_builder::{assembly, product, PartBuilder};
use seal_inventory::api::ApiError;
use seal_inventory::domain::types::{ReferenceType, TransactionType};

const EPS: f64 = 1e-9;

struct AssemblyFixture {
    env: ApiTestEnv,
    spring_id: String,
    oring_id: String,
    product_id: String,
}

fn fixture() -> AssemblyFixture {
    let env = ApiTestEnv::new().unwrap();
    let spring_id = env.create_part(PartBuilder::new("Spring", 0.2).stock(100).avg_cost(2.0).build());
    let oring_id = env.create_part(PartBuilder::new("Oring", 0.1).stock(200).avg_cost(0.5).build());
    let product_id = env.create_product(product("Open", "50mm", 0));
    AssemblyFixture {
        env,
        spring_id,
        oring_id,
        product_id,
    }
}

#[test]
fn test_assembly_costs_components() {
    let f = fixture();
    let detail = f
        .env
        .state
        .assembly_api
        .record_assembly(
            &f.env.ctx,
            assembly(&f.product_id, 10, &[(&f.spring_id, 10), (&f.oring_id, 20)]),
        )
        .unwrap();

    assert_eq!(detail.assembly.quantity_assembled, 10);
    assert!((detail.assembly.total_cost - 30.0).abs() < EPS);
    assert!((detail.assembly.cost_per_unit - 3.0).abs() < EPS);
    assert_eq!(detail.components.len(), 2);
    assert_eq!(detail.components[0].part_name, "Spring");
    assert!((detail.components[1].total_cost - 10.0).abs() < EPS);

    let stored = f
        .env
        .state
        .assembly_api
        .get_assembly(&f.env.ctx, &detail.assembly.assembly_id)
        .unwrap();
    assert_eq!(stored, detail);
}

#[test]
fn test_assembly_moves_stock_and_logs() {
    let f = fixture();
    let ctx = &f.env.ctx;
    let detail = f
        .env
        .state
        .assembly_api
        .record_assembly(ctx, assembly(&f.product_id, 10, &[(&f.spring_id, 10), (&f.oring_id, 20)]))
        .unwrap();

    let catalog = &f.env.state.catalog_api;
    assert_eq!(catalog.get_part(ctx, &f.spring_id).unwrap().current_stock, 90);
    assert_eq!(catalog.get_part(ctx, &f.oring_id).unwrap().current_stock, 180);
    let product = catalog.get_product(ctx, &f.product_id).unwrap();
    assert_eq!(product.current_stock, 10);
    assert!((product.avg_cost - 3.0).abs() < EPS);

    let rows = f
        .env
        .state
        .transaction_api
        .list_for_source(ctx, &detail.assembly.assembly_id)
        .unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|t| t.transaction_type == TransactionType::Assembly));

    let issued: Vec<_> = rows
        .iter()
        .filter(|t| t.reference_type == ReferenceType::Part)
        .collect();
    assert_eq!(issued.len(), 2);
    assert!(issued.iter().all(|t| t.quantity < 0.0 && t.total_value < 0.0));

    let received = rows
        .iter()
        .find(|t| t.reference_type == ReferenceType::Product)
        .unwrap();
    assert_eq!(received.quantity, 10.0);
    assert!((received.total_value - 30.0).abs() < EPS);
}

#[test]
fn test_assembly_insufficient_parts_changes_nothing() {
    let f = fixture();
    let ctx = &f.env.ctx;
    let err = f
        .env
        .state
        .assembly_api
        .record_assembly(ctx, assembly(&f.product_id, 10, &[(&f.oring_id, 20), (&f.spring_id, 200)]))
        .unwrap_err();
    assert!(matches!(err, ApiError::InsufficientStock { ref item_id, .. } if *item_id == f.spring_id));

    let catalog = &f.env.state.catalog_api;
    assert_eq!(catalog.get_part(ctx, &f.oring_id).unwrap().current_stock, 200);
    assert_eq!(catalog.get_product(ctx, &f.product_id).unwrap().current_stock, 0);
}

#[test]
fn test_invalid_assemblies_rejected() {
    let f = fixture();
    let api = &f.env.state.assembly_api;
    let ctx = &f.env.ctx;

    let err = api
        .record_assembly(ctx, assembly(&f.product_id, 0, &[(&f.spring_id, 1)]))
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidAssembly(_)));

    let err = api.record_assembly(ctx, assembly(&f.product_id, 5, &[])).unwrap_err();
    assert!(matches!(err, ApiError::InvalidAssembly(_)));

    let err = api
        .record_assembly(ctx, assembly(&f.product_id, 5, &[(&f.spring_id, 0)]))
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidAssembly(_)));

    let err = api
        .record_assembly(ctx, assembly("no-such-product", 5, &[(&f.spring_id, 1)]))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
