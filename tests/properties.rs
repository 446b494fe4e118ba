//! 지폭 결정과 전개 치수의 성질을 proptest로 확인한다.

use proptest::prelude::*;
use box_cost_estimator::costing::geometry::{
    resolve_production_width, snap_to_standard, theoretical_sheet_width, unrolled_dimensions,
    SheetWidthMode, MAX_SHEET_WIDTH_MM, STANDARD_WIDTHS_MM,
};
use box_cost_estimator::costing::pricing::total_and_unit_price;

proptest! {
    /// 전폭 = W + H, 전장 = 2(L + W) + 미미
    #[test]
    fn prop_unrolled_identity(l in 1u32..3000, w in 1u32..3000, h in 1u32..3000, glue in 0u32..100) {
        let (l, w, h, glue) = (f64::from(l), f64::from(w), f64::from(h), f64::from(glue));
        let u = unrolled_dimensions(l, w, h, glue);
        prop_assert_eq!(u.width_mm, w + h);
        prop_assert_eq!(u.length_mm, 2.0 * (l + w) + glue);
    }

    /// 필요 지폭이 커지면 규격 지폭도 작아지지 않는다
    #[test]
    fn prop_snap_monotonic(a in 0.0f64..4000.0, b in 0.0f64..4000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(snap_to_standard(lo) <= snap_to_standard(hi));
    }

    /// 규격 지폭은 항상 필요 지폭 이상이거나 최대치다
    #[test]
    fn prop_snap_never_narrower(req in 0.0f64..4000.0) {
        let w = snap_to_standard(req);
        prop_assert!(w >= req || w == MAX_SHEET_WIDTH_MM);
        prop_assert!(w <= MAX_SHEET_WIDTH_MM || req < 1100.0);
    }

    /// 하드캡은 최대치 이하에서 값을 바꾸지 않는다
    #[test]
    fn prop_hard_cap_identity(req in 0.0f64..=2500.0) {
        let (w, _) = resolve_production_width(req, SheetWidthMode::HardCap).unwrap();
        prop_assert_eq!(w, req);
    }

    #[test]
    fn prop_theoretical_width_linear(uw in 1u32..2000, lanes in 1u32..10, trim in 0u32..200) {
        let got = theoretical_sheet_width(f64::from(uw), lanes, f64::from(trim));
        prop_assert_eq!(got, f64::from(uw * lanes + trim));
    }

    #[test]
    fn prop_vat_multiplier(cost in 0.0f64..10_000.0, qty in 1u32..100_000, print in 0.0f64..50_000.0) {
        let (plain, _) = total_and_unit_price(cost, qty, print, false);
        let (taxed, _) = total_and_unit_price(cost, qty, print, true);
        prop_assert!((taxed - 1.10 * plain).abs() <= 1e-9 * plain.max(1.0));
    }
}

#[test]
fn snap_is_idempotent_on_breakpoints() {
    for &w in STANDARD_WIDTHS_MM.iter() {
        assert_eq!(snap_to_standard(w), w);
        assert_eq!(snap_to_standard(snap_to_standard(w)), w);
    }
}
