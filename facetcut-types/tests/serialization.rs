use facetcut_types::cut::{Action, FacetCut};
use facetcut_types::diagnostics::Warning;
use facetcut_types::filter::{Filter, FilterKind};
use facetcut_types::plan::{CutPlan, Initializer, PlanSummary, ToolInfo};
use facetcut_types::submit::{PlanRef, SubmitRecord};
use facetcut_types::{Address, Bytes, Selector};
use pretty_assertions::assert_eq;

fn tool() -> ToolInfo {
    ToolInfo {
        name: "facetcut".to_string(),
        version: Some("1.0.0".to_string()),
    }
}

#[test]
fn action_serializes_snake_case() {
    assert_eq!(
        serde_json::to_value(Action::Add).unwrap(),
        serde_json::json!("add")
    );
    assert_eq!(
        serde_json::to_value(Action::Replace).unwrap(),
        serde_json::json!("replace")
    );
    assert_eq!(
        serde_json::to_value(Action::Remove).unwrap(),
        serde_json::json!("remove")
    );
}

#[test]
fn facet_cut_uses_hex_selectors() {
    let cut = FacetCut::add(Address::repeat_byte(0xaa), [Selector::from([0x12, 0x34, 0x56, 0x78])]);
    let v = serde_json::to_value(&cut).expect("serialize");

    assert_eq!(v["action"], "add");
    assert_eq!(v["selectors"], serde_json::json!(["0x12345678"]));
    let target = v["target"].as_str().expect("target string");
    assert_eq!(target.to_ascii_lowercase(), format!("0x{}", "aa".repeat(20)));
}

#[test]
fn filter_reads_type_key_and_defaults_contract_to_wildcard() {
    let json = r#"{
        "type": "except",
        "action": "remove",
        "selectors": ["0xdeadbeef"]
    }"#;
    let f: Filter = serde_json::from_str(json).expect("parse filter");

    assert_eq!(f.kind, FilterKind::Except);
    assert_eq!(f.action, Action::Remove);
    assert!(f.is_wildcard());
    assert!(f.selectors.contains(&Selector::from([0xde, 0xad, 0xbe, 0xef])));
}

#[test]
fn warnings_are_tagged() {
    let w = Warning::NoChangesDetected {
        action: Action::Replace,
    };
    let v = serde_json::to_value(&w).unwrap();
    assert_eq!(v, serde_json::json!({ "type": "no_changes_detected", "action": "replace" }));
    assert_eq!(w.to_string(), "no replace changes detected");
}

#[test]
fn plan_omits_absent_init_and_reads_back() {
    let mut plan = CutPlan::new(tool(), Address::repeat_byte(0xdd));
    plan.cuts = vec![FacetCut::remove([Selector::from([1, 2, 3, 4])])];
    plan.summary = PlanSummary::from_cuts(&plan.cuts, &plan.warnings);

    let v = serde_json::to_value(&plan).expect("serialize plan");
    assert!(v.get("init").is_none());
    assert_eq!(v["schema"], facetcut_types::schema::FACETCUT_PLAN_V1);

    let back: CutPlan = serde_json::from_value(v).expect("deserialize plan");
    assert_eq!(back.cuts, plan.cuts);
    assert_eq!(back.summary.selectors_removed, 1);
}

#[test]
fn initializer_parts_default_to_zero() {
    let (target, data) = Initializer::parts(None);
    assert!(target.is_zero());
    assert!(data.is_empty());

    let init = Initializer {
        target: Address::repeat_byte(0x11),
        calldata: Bytes::from(vec![0xe1, 0xc7, 0x39, 0x2a]),
    };
    let (target, data) = Initializer::parts(Some(&init));
    assert_eq!(target, Address::repeat_byte(0x11));
    assert_eq!(data.len(), 4);
}

#[test]
fn summary_counts_selectors_per_action() {
    let s = |b: u8| Selector::from([b; 4]);
    let cuts = vec![
        FacetCut::add(Address::repeat_byte(1), [s(1), s(2)]),
        FacetCut::replace(Address::repeat_byte(2), [s(3)]),
        FacetCut::remove([s(4), s(5), s(6)]),
    ];
    let summary = PlanSummary::from_cuts(&cuts, &[]);

    assert_eq!(summary.cuts_total, 3);
    assert_eq!(summary.selectors_added, 2);
    assert_eq!(summary.selectors_replaced, 1);
    assert_eq!(summary.selectors_removed, 3);
    assert_eq!(summary.selectors_total(), 6);
}

#[test]
fn submit_record_omits_tx_until_sent() {
    let record = SubmitRecord::new(
        ToolInfo {
            name: "facetcut".to_string(),
            version: None,
        },
        PlanRef {
            path: "artifacts/facetcut/plan.json".to_string(),
            sha256: None,
        },
        Address::repeat_byte(0xdd),
    );
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["schema"], "facetcut.submit.v1");
    assert!(json.get("tx_hash").is_none());
    assert!(!record.submitted());
}
