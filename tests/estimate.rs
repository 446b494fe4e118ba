//! 단가 계산 전체 흐름 회귀 테스트.
use box_cost_estimator::costing::{
    compute_cost, AreaMode, BoardSpecification, BoxDimensions, CostError, CostParameters,
    CostPolicy, EstimateInput, FixedCosts, FluteGrade, LayerRole, MaterialLookup, PrintColors,
    RoundingMode, SheetWidthMode, SupplierCatalog, WidthSource,
};

fn dims(lanes: u32, trim: f64) -> BoxDimensions {
    BoxDimensions {
        length_mm: 300.0,
        width_mm: 200.0,
        height_mm: 150.0,
        glue_allowance_mm: 40.0,
        lane_count: lanes,
        trim_allowance_mm: trim,
    }
}

fn params() -> CostParameters {
    CostParameters {
        loss_rate_percent: 10.0,
        fixed: FixedCosts {
            die_cut: 50.0,
            glue: 30.0,
            misc: 0.0,
        },
        print_colors: PrintColors::One,
        quantity: 1000,
        vat_included: true,
    }
}

fn input(catalog: &SupplierCatalog, lanes: u32) -> EstimateInput<'_> {
    EstimateInput {
        dimensions: dims(lanes, 50.0),
        manual_production_width_mm: None,
        board: BoardSpecification::single_wall("K180", "S120", "SK180"),
        catalog,
        flute: FluteGrade::A,
        params: params(),
        policy: CostPolicy::default(),
    }
}

fn close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-6, "expected {b}, got {a}");
}

#[test]
fn single_wall_one_lane_regression() {
    let cat = SupplierCatalog::builtin();
    let b = compute_cost(&input(&cat, 1)).expect("estimate");
    assert_eq!(b.unrolled_width_mm, 350.0);
    assert_eq!(b.unrolled_length_mm, 1040.0);
    assert_eq!(b.theoretical_sheet_width_mm, 400.0);
    assert_eq!(b.production_sheet_width_mm, 400.0);
    assert_eq!(b.width_source, WidthSource::Theoretical);
    close(b.area_per_unit_sqm, 0.416);
    close(b.base_material_cost_per_sqm, 345.36);
    close(b.material_cost_per_sqm, 379.896);
    close(b.material_cost_per_unit, 158.036736);
    close(b.processing_cost_per_unit, 88.32);
    close(b.cost_per_unit, 246.356736);
    assert_eq!(b.print_cost_total, 10_000.0);
    close(b.total_cost, 281_992.4096);
    close(b.unit_price, 281.9924096);
}

#[test]
fn four_lanes_fit_under_hard_cap() {
    // 350 * 4 + 50 = 1450mm
    let cat = SupplierCatalog::builtin();
    let b = compute_cost(&input(&cat, 4)).expect("estimate");
    assert_eq!(b.theoretical_sheet_width_mm, 1450.0);
    assert_eq!(b.production_sheet_width_mm, 1450.0);
}

#[test]
fn eight_lanes_exceed_hard_cap() {
    // 350 * 8 + 50 = 2850mm
    let cat = SupplierCatalog::builtin();
    let err = compute_cost(&input(&cat, 8)).unwrap_err();
    assert_eq!(
        err,
        CostError::SheetWidthExceeded {
            required_mm: 2850.0,
            max_mm: 2500.0
        }
    );
    assert!(err.to_string().contains("2850"));
}

#[test]
fn snap_table_clamps_instead_of_failing() {
    let cat = SupplierCatalog::builtin();
    let mut inp = input(&cat, 8);
    inp.policy.sheet_width = SheetWidthMode::SnapTable;
    let b = compute_cost(&inp).expect("estimate");
    assert_eq!(b.theoretical_sheet_width_mm, 2850.0);
    assert_eq!(b.production_sheet_width_mm, 2500.0);
    assert_eq!(b.width_source, WidthSource::Snapped);
}

#[test]
fn snap_table_rounds_up_to_standard() {
    let cat = SupplierCatalog::builtin();
    let mut inp = input(&cat, 4);
    inp.dimensions.trim_allowance_mm = 60.0; // 1460mm
    inp.policy.sheet_width = SheetWidthMode::SnapTable;
    let b = compute_cost(&inp).expect("estimate");
    assert_eq!(b.production_sheet_width_mm, 1500.0);
    close(b.area_per_unit_sqm, 1040.0 * 1500.0 / 1e6);
}

#[test]
fn manual_width_bypasses_cap() {
    let cat = SupplierCatalog::builtin();
    let mut inp = input(&cat, 8);
    inp.manual_production_width_mm = Some(3000.0);
    let b = compute_cost(&inp).expect("manual width is not capped");
    assert_eq!(b.theoretical_sheet_width_mm, 2850.0);
    assert_eq!(b.production_sheet_width_mm, 3000.0);
    assert_eq!(b.width_source, WidthSource::Manual);

    inp.manual_production_width_mm = Some(0.0);
    assert_eq!(
        compute_cost(&inp).unwrap_err(),
        CostError::InvalidManualWidth { value: 0.0 }
    );
}

#[test]
fn divided_by_lanes_area() {
    let cat = SupplierCatalog::builtin();
    let mut inp = input(&cat, 4);
    inp.policy.area = AreaMode::PerBlankDividedByLanes;
    let b = compute_cost(&inp).expect("estimate");
    close(b.area_per_unit_sqm, 1040.0 * 1450.0 / 4.0 / 1e6);
}

#[test]
fn vat_is_exactly_ten_percent() {
    let cat = SupplierCatalog::builtin();
    let mut inp = input(&cat, 1);
    let with_vat = compute_cost(&inp).unwrap();
    inp.params.vat_included = false;
    let without = compute_cost(&inp).unwrap();
    assert!((with_vat.total_cost - 1.10 * without.total_cost).abs() < 1e-9);
    close(without.total_cost, 256_356.736);
}

#[test]
fn rounding_policy_changes_result() {
    let cat = SupplierCatalog::builtin();
    let mut inp = input(&cat, 1);
    inp.policy.rounding = RoundingMode::RoundAfterLoss;
    let after = compute_cost(&inp).unwrap();
    assert_eq!(after.material_cost_per_sqm, 380.0);
    inp.policy.rounding = RoundingMode::RoundBeforeLoss;
    let before = compute_cost(&inp).unwrap();
    close(before.material_cost_per_sqm, 379.5);
    assert_ne!(after.unit_price, before.unit_price);
}

#[test]
fn double_wall_uses_five_layers() {
    let cat = SupplierCatalog::builtin();
    let mut inp = input(&cat, 1);
    inp.flute = FluteGrade::DoubleWall;
    inp.board = BoardSpecification::double_wall("SK180", "S120", "S120", "S120", "K180");
    let b = compute_cost(&inp).unwrap();
    let roles: Vec<LayerRole> = b.layers.iter().map(|l| l.role).collect();
    assert_eq!(
        roles,
        vec![
            LayerRole::Outer,
            LayerRole::FluteA,
            LayerRole::Center,
            LayerRole::FluteB,
            LayerRole::Inner
        ]
    );
    // 117 + 69.6*1.6 + 69.6 + 69.6*1.4 + 117
    close(b.base_material_cost_per_sqm, 117.0 + 111.36 + 69.6 + 97.44 + 117.0);
    assert_eq!(b.processing_cost_per_sqm, 29.0);
}

#[test]
fn unknown_material_is_reported_or_zeroed() {
    let cat = SupplierCatalog::builtin();
    let mut inp = input(&cat, 1);
    inp.board = BoardSpecification::single_wall("K180", "S120", "ZZ999");
    let err = compute_cost(&inp).unwrap_err();
    assert_eq!(
        err,
        CostError::UnknownMaterial {
            role: LayerRole::Inner,
            label: "ZZ999".into()
        }
    );
    // 메시지에 층과 원지명이 모두 나온다
    let msg = err.to_string();
    assert!(msg.contains("이면지"), "{msg}");
    assert!(msg.contains("inner"), "{msg}");
    assert!(msg.contains("ZZ999"), "{msg}");
    inp.policy.material_lookup = MaterialLookup::Permissive;
    let b = compute_cost(&inp).unwrap();
    close(b.base_material_cost_per_sqm, 117.0 + 111.36);
}

#[test]
fn boundary_validation() {
    let cat = SupplierCatalog::builtin();
    let mut inp = input(&cat, 1);
    inp.params.quantity = 0;
    assert_eq!(compute_cost(&inp).unwrap_err(), CostError::InvalidQuantity);

    let mut inp = input(&cat, 1);
    inp.dimensions.height_mm = f64::NAN;
    assert!(matches!(
        compute_cost(&inp),
        Err(CostError::InvalidDimension { field: "height_mm", .. })
    ));

    let mut inp = input(&cat, 1);
    inp.dimensions.lane_count = 0;
    assert!(matches!(
        compute_cost(&inp),
        Err(CostError::InvalidDimension { field: "lane_count", .. })
    ));

    let mut inp = input(&cat, 1);
    inp.params.loss_rate_percent = -1.0;
    assert!(matches!(
        compute_cost(&inp),
        Err(CostError::InvalidDimension { field: "loss_rate_percent", .. })
    ));
}

#[test]
fn session_override_does_not_leak_into_builtin() {
    let base = SupplierCatalog::builtin();
    let mut session = base.clone();
    session.insert("S120", box_cost_estimator::costing::PaperGrade::new(1000.0, 120.0));
    let cheap = compute_cost(&input(&base, 1)).unwrap();
    let dear = compute_cost(&input(&session, 1)).unwrap();
    assert!(dear.unit_price > cheap.unit_price);
    assert_eq!(SupplierCatalog::builtin(), base);
}
