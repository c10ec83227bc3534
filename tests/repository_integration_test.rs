// ==========================================
// Repository integration tests
// ==========================================
// Append-only event tables, atomic event recording, tenant scoping.
// ==========================================

mod test_helpers;

use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::Connection;

use seal_inventory::domain::catalog::{Part, RawMaterial};
use seal_inventory::domain::production::{ProductionOutput, ProductionRun};
use seal_inventory::domain::stock::{StockIssue, StockReceipt};
use seal_inventory::domain::tenant::Company;
use seal_inventory::domain::transaction::InventoryTransaction;
use seal_inventory::domain::types::{ReferenceType, TransactionType};
use seal_inventory::logging;
use seal_inventory::repository::{
    CompanyRepository, InventoryTransactionRepository, PartRepository, ProductionRunRecord,
    ProductionRunRepository, RawMaterialRepository, RepositoryError,
};

const COMPANY: &str = "ACME";

struct Repos {
    conn: Arc<Mutex<Connection>>,
    materials: RawMaterialRepository,
    parts: PartRepository,
    runs: ProductionRunRepository,
    transactions: InventoryTransactionRepository,
    _temp: tempfile::NamedTempFile,
}

fn setup() -> Repos {
    logging::init_test();
    let (temp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_shared(&db_path).unwrap();

    CompanyRepository::from_connection(conn.clone())
        .insert(&Company {
            company_id: COMPANY.to_string(),
            name: "Acme Seals".to_string(),
            created_at: Utc::now().naive_utc(),
        })
        .unwrap();

    Repos {
        materials: RawMaterialRepository::from_connection(conn.clone()),
        parts: PartRepository::from_connection(conn.clone()),
        runs: ProductionRunRepository::from_connection(conn.clone()),
        transactions: InventoryTransactionRepository::from_connection(conn.clone()),
        conn,
        _temp: temp,
    }
}

fn material(id: &str, stock: f64) -> RawMaterial {
    RawMaterial {
        material_id: id.to_string(),
        company_id: COMPANY.to_string(),
        name: format!("material {}", id),
        grade: None,
        unit: "kg".to_string(),
        opening_stock: stock,
        current_stock: stock,
        min_stock: 0.0,
        avg_cost: 100.0,
        last_purchase_rate: 100.0,
        created_at: Utc::now().naive_utc(),
    }
}

fn part(id: &str, weight: f64) -> Part {
    Part {
        part_id: id.to_string(),
        company_id: COMPANY.to_string(),
        name: format!("part {}", id),
        material_type: None,
        specific_type: None,
        weight_per_unit: weight,
        current_stock: 0,
        avg_cost: 0.0,
        created_at: Utc::now().naive_utc(),
    }
}

fn run_record(run_id: &str, material_id: &str, part_id: &str, input_qty: f64) -> ProductionRunRecord {
    let now = Utc::now().naive_utc();
    ProductionRunRecord {
        run: ProductionRun {
            run_id: run_id.to_string(),
            company_id: COMPANY.to_string(),
            input_material_id: material_id.to_string(),
            input_quantity: input_qty,
            input_cost: 200.0,
            total_output_weight: 50.0,
            cost_per_kg: 4.0,
            corrects_run_id: None,
            notes: None,
            production_date: now,
            created_by: "tester".to_string(),
        },
        outputs: vec![ProductionOutput {
            output_id: format!("{}-1", run_id),
            run_id: run_id.to_string(),
            line_no: 1,
            part_id: part_id.to_string(),
            part_name: format!("part {}", part_id),
            quantity_produced: 100,
            weight_per_unit: 0.5,
            output_weight: 50.0,
            allocated_cost: 200.0,
            cost_per_unit: 2.0,
        }],
        material_issue: StockIssue {
            item_id: material_id.to_string(),
            quantity: input_qty,
        },
        part_receipts: vec![StockReceipt {
            item_id: part_id.to_string(),
            quantity: 100.0,
            total_cost: 200.0,
        }],
        transactions: vec![InventoryTransaction::new(
            COMPANY,
            "tester",
            TransactionType::Production,
            ReferenceType::Material,
            material_id,
            -input_qty,
            200.0 / input_qty,
            -200.0,
        )
        .with_source(run_id)],
    }
}

#[test]
fn test_record_run_persists_everything() {
    let r = setup();
    r.materials.insert(&material("M1", 10.0), None).unwrap();
    r.parts.insert(&part("P1", 0.5), None).unwrap();

    r.runs.record_run(&run_record("R1", "M1", "P1", 2.0), false).unwrap();

    let detail = r.runs.find_detail(COMPANY, "R1").unwrap().unwrap();
    assert_eq!(detail.outputs.len(), 1);
    assert_eq!(r.materials.find_by_id(COMPANY, "M1").unwrap().unwrap().current_stock, 8.0);
    let p1 = r.parts.find_by_id(COMPANY, "P1").unwrap().unwrap();
    assert_eq!(p1.current_stock, 100);
    assert_eq!(p1.avg_cost, 2.0);
    assert_eq!(r.transactions.list_by_source(COMPANY, "R1").unwrap().len(), 1);
    assert_eq!(r.runs.count_by_company(COMPANY).unwrap(), 1);
}

#[test]
fn test_failed_run_rolls_back() {
    let r = setup();
    r.materials.insert(&material("M1", 10.0), None).unwrap();

    // part P404 does not exist: the receipt fails after the material issue
    let err = r
        .runs
        .record_run(&run_record("R1", "M1", "P404", 2.0), false)
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));

    assert_eq!(r.materials.find_by_id(COMPANY, "M1").unwrap().unwrap().current_stock, 10.0);
    assert!(r.runs.find_run(COMPANY, "R1").unwrap().is_none());
    assert!(r.transactions.list_by_source(COMPANY, "R1").unwrap().is_empty());
}

#[test]
fn test_insufficient_material_is_reported() {
    let r = setup();
    r.materials.insert(&material("M1", 1.0), None).unwrap();
    r.parts.insert(&part("P1", 0.5), None).unwrap();

    let err = r
        .runs
        .record_run(&run_record("R1", "M1", "P1", 2.0), false)
        .unwrap_err();
    match err {
        RepositoryError::InsufficientStock {
            item_id,
            available,
            requested,
        } => {
            assert_eq!(item_id, "M1");
            assert_eq!(available, 1.0);
            assert_eq!(requested, 2.0);
        }
        other => panic!("expected InsufficientStock, got {:?}", other),
    }

    r.runs.record_run(&run_record("R2", "M1", "P1", 2.0), true).unwrap();
    assert_eq!(r.materials.find_by_id(COMPANY, "M1").unwrap().unwrap().current_stock, -1.0);
}

#[test]
fn test_event_tables_are_append_only() {
    let r = setup();
    r.materials.insert(&material("M1", 10.0), None).unwrap();
    r.parts.insert(&part("P1", 0.5), None).unwrap();
    r.runs.record_run(&run_record("R1", "M1", "P1", 2.0), false).unwrap();

    let conn = r.conn.lock().unwrap();
    let statements = [
        "UPDATE production_runs SET input_cost = 0 WHERE run_id = 'R1'",
        "DELETE FROM production_runs WHERE run_id = 'R1'",
        "UPDATE production_outputs SET allocated_cost = 0 WHERE run_id = 'R1'",
        "DELETE FROM production_outputs WHERE run_id = 'R1'",
        "UPDATE inventory_transactions SET quantity = 0",
        "DELETE FROM inventory_transactions",
    ];
    for sql in statements {
        let err = conn.execute(sql, []).unwrap_err();
        let mapped = RepositoryError::from(err);
        assert!(
            matches!(mapped, RepositoryError::AppendOnlyViolation(_)),
            "{} should be refused, got {:?}",
            sql,
            mapped
        );
    }
}

#[test]
fn test_duplicate_ids_are_unique_violations() {
    let r = setup();
    r.materials.insert(&material("M1", 0.0), None).unwrap();
    let err = r.materials.insert(&material("M1", 0.0), None).unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
}

#[test]
fn test_lookups_are_company_scoped() {
    let r = setup();
    r.materials.insert(&material("M1", 5.0), None).unwrap();
    assert!(r.materials.find_by_id("OTHER", "M1").unwrap().is_none());
    assert!(r.materials.list_by_company("OTHER").unwrap().is_empty());
    assert_eq!(r.materials.count_by_company(COMPANY).unwrap(), 1);
}
