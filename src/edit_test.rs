use super::*;

use crate::host::{ExperimentContext, PluginAssets};

fn make_item(ctx: &mut ExperimentContext) -> RatingScaleItem {
    let assets = PluginAssets::new("/plugins/rating_scale", "/shared/questionnaire");
    RatingScaleItem::new("rating", "", &assets, ctx)
}

fn applied(name: &str) -> ApplyOutcome {
    ApplyOutcome::Applied(EditAction::RefreshItemDisplay { item: name.to_owned() })
}

// =============================================================
// Control descriptions
// =============================================================

#[test]
fn controls_in_display_order() {
    let mut ctx = ExperimentContext::with_system_clock();
    let controls = make_item(&mut ctx).edit_controls();
    let vars: Vec<&str> = controls.iter().map(|control| control.var).collect();
    assert_eq!(vars, vec!["accept_text", "allow_empty", "maximum_rating", "question"]);
    assert_eq!(controls[0].kind, ControlKind::LineEdit);
    assert_eq!(controls[1].kind, ControlKind::YesNo);
    assert_eq!(controls[2].kind, ControlKind::Spinbox { min: 2, max: 100 });
    assert_eq!(controls[3].kind, ControlKind::Editor);
}

#[test]
fn controls_carry_labels_and_tooltips() {
    let mut ctx = ExperimentContext::with_system_clock();
    let controls = make_item(&mut ctx).edit_controls();
    assert_eq!(controls[0].label, "Text on accept button");
    assert_eq!(controls[0].tooltip, "The text that appears on the accept button");
    assert_eq!(controls[2].label, "Maximum rating");
    assert_eq!(controls[3].tooltip, "The question that you want to ask");
}

#[test]
fn controls_serialize_flat() {
    let mut ctx = ExperimentContext::with_system_clock();
    let controls = make_item(&mut ctx).edit_controls();
    let json = serde_json::to_value(controls[2]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "var": "maximum_rating",
            "label": "Maximum rating",
            "tooltip": "The highest possible rating",
            "kind": "spinbox",
            "min": 2,
            "max": 100,
        })
    );
}

// =============================================================
// Refresh
// =============================================================

#[test]
fn refresh_returns_current_values() {
    let mut ctx = ExperimentContext::with_system_clock();
    let item = make_item(&mut ctx);
    ctx.vars.set(consts::MAXIMUM_RATING_VAR, Var::Int(9));
    let (values, _guard) = item.refresh_widget(&ctx.vars);
    assert_eq!(values.len(), 4);
    assert_eq!(values[0].value, Var::Str(consts::DEFAULT_ACCEPT_TEXT.into()));
    assert_eq!(values[2].value, Var::Int(9));
}

#[test]
fn refresh_reports_missing_values_as_none() {
    let mut ctx = ExperimentContext::with_system_clock();
    let item = make_item(&mut ctx);
    ctx.vars = VarStore::new();
    let (values, _guard) = item.refresh_widget(&ctx.vars);
    assert!(values.iter().all(|value| value.value == Var::None));
}

// =============================================================
// Apply
// =============================================================

#[test]
fn guarded_change_is_suppressed() {
    let mut ctx = ExperimentContext::with_system_clock();
    let mut item = make_item(&mut ctx);
    let (_values, guard) = item.refresh_widget(&ctx.vars);
    let outcome = item.apply_edit(&mut ctx.vars, ControlChange::MaximumRating(9), Some(&guard));
    assert_eq!(outcome, ApplyOutcome::Suppressed);
    assert_eq!(
        ctx.vars.get_int(consts::MAXIMUM_RATING_VAR),
        Some(i64::from(consts::DEFAULT_MAXIMUM_RATING))
    );
}

#[test]
fn accept_text_is_sanitised_on_write() {
    let mut ctx = ExperimentContext::with_system_clock();
    let mut item = make_item(&mut ctx);
    let outcome =
        item.apply_edit(&mut ctx.vars, ControlChange::AcceptText("Go \"on\"".into()), None);
    assert_eq!(outcome, applied("rating"));
    assert_eq!(ctx.vars.get_str(consts::ACCEPT_TEXT_VAR), Some("Go \\\"on\\\""));
}

#[test]
fn question_newlines_are_sanitised_on_write() {
    let mut ctx = ExperimentContext::with_system_clock();
    let mut item = make_item(&mut ctx);
    let outcome =
        item.apply_edit(&mut ctx.vars, ControlChange::Question("Rate:\n1 to 5".into()), None);
    assert_eq!(outcome, applied("rating"));
    assert_eq!(ctx.vars.get_str(consts::QUESTION_VAR), Some("Rate:\\n1 to 5"));
}

#[test]
fn valid_rating_is_written() {
    let mut ctx = ExperimentContext::with_system_clock();
    let mut item = make_item(&mut ctx);
    let outcome = item.apply_edit(&mut ctx.vars, ControlChange::MaximumRating(50), None);
    assert_eq!(outcome, applied("rating"));
    assert_eq!(ctx.vars.get_int(consts::MAXIMUM_RATING_VAR), Some(50));
}

#[test]
fn out_of_range_rating_is_rejected() {
    let mut ctx = ExperimentContext::with_system_clock();
    let mut item = make_item(&mut ctx);
    for rating in [i64::MIN, -1, 0, 1, 101, i64::MAX] {
        let outcome = item.apply_edit(&mut ctx.vars, ControlChange::MaximumRating(rating), None);
        assert!(
            matches!(outcome, ApplyOutcome::Rejected { .. }),
            "rating {rating} should be rejected"
        );
    }
    assert_eq!(
        ctx.vars.get_int(consts::MAXIMUM_RATING_VAR),
        Some(i64::from(consts::DEFAULT_MAXIMUM_RATING))
    );
}

#[test]
fn allow_empty_accepts_only_yes_no() {
    let mut ctx = ExperimentContext::with_system_clock();
    let mut item = make_item(&mut ctx);
    assert_eq!(
        item.apply_edit(&mut ctx.vars, ControlChange::AllowEmpty("yes".into()), None),
        applied("rating")
    );
    assert_eq!(ctx.vars.get_str(consts::ALLOW_EMPTY_VAR), Some("yes"));
    let outcome = item.apply_edit(&mut ctx.vars, ControlChange::AllowEmpty("maybe".into()), None);
    assert!(matches!(outcome, ApplyOutcome::Rejected { .. }));
    assert_eq!(ctx.vars.get_str(consts::ALLOW_EMPTY_VAR), Some("yes"));
}
