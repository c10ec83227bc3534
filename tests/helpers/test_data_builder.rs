// ==========================================
// Request builders for integration tests
// ==========================================

#![allow(dead_code)]

use seal_inventory::api::{
    AssemblyComponentRequest, CreateMaterialRequest, CreatePartRequest, CreateProductRequest,
    RecordAssemblyRequest, RecordRunRequest, RunOutputRequest,
};

// ==========================================
// Catalog
// ==========================================

pub struct MaterialBuilder {
    req: CreateMaterialRequest,
}

impl MaterialBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            req: CreateMaterialRequest {
                name: name.to_string(),
                unit: Some("kg".to_string()),
                ..Default::default()
            },
        }
    }

    pub fn grade(mut self, grade: &str) -> Self {
        self.req.grade = Some(grade.to_string());
        self
    }

    pub fn stock(mut self, stock: f64) -> Self {
        self.req.current_stock = stock;
        self
    }

    pub fn min_stock(mut self, min_stock: f64) -> Self {
        self.req.min_stock = min_stock;
        self
    }

    pub fn avg_cost(mut self, avg_cost: f64) -> Self {
        self.req.avg_cost = avg_cost;
        self
    }

    pub fn build(self) -> CreateMaterialRequest {
        self.req
    }
}

pub struct PartBuilder {
    req: CreatePartRequest,
}

impl PartBuilder {
    pub fn new(name: &str, weight_per_unit: f64) -> Self {
        Self {
            req: CreatePartRequest {
                name: name.to_string(),
                weight_per_unit,
                ..Default::default()
            },
        }
    }

    pub fn stock(mut self, stock: i64) -> Self {
        self.req.current_stock = stock;
        self
    }

    pub fn avg_cost(mut self, avg_cost: f64) -> Self {
        self.req.avg_cost = avg_cost;
        self
    }

    pub fn build(self) -> CreatePartRequest {
        self.req
    }
}

pub fn product(name: &str, size: &str, stock: i64) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        size: Some(size.to_string()),
        current_stock: stock,
        ..Default::default()
    }
}

// ==========================================
// Events
// ==========================================

pub struct RunBuilder {
    req: RecordRunRequest,
}

impl RunBuilder {
    pub fn new(material_id: &str, input_quantity: f64, input_cost: f64) -> Self {
        Self {
            req: RecordRunRequest {
                input_material_id: material_id.to_string(),
                input_quantity,
                input_cost,
                outputs: Vec::new(),
                corrects_run_id: None,
                notes: None,
            },
        }
    }

    pub fn output(mut self, part_id: &str, quantity: i64) -> Self {
        self.req.outputs.push(RunOutputRequest {
            part_id: part_id.to_string(),
            quantity,
        });
        self
    }

    pub fn corrects(mut self, run_id: &str) -> Self {
        self.req.corrects_run_id = Some(run_id.to_string());
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.req.notes = Some(notes.to_string());
        self
    }

    pub fn build(self) -> RecordRunRequest {
        self.req
    }
}

pub fn assembly(product_id: &str, quantity: i64, components: &[(&str, i64)]) -> RecordAssemblyRequest {
    RecordAssemblyRequest {
        product_id: product_id.to_string(),
        quantity_assembled: quantity,
        components: components
            .iter()
            .map(|(part_id, qty)| AssemblyComponentRequest {
                part_id: part_id.to_string(),
                quantity_used: *qty,
            })
            .collect(),
        notes: None,
    }
}
