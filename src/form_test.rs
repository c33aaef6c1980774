use super::*;

fn config(maximum_rating: u8) -> Config {
    Config {
        question: consts::DEFAULT_QUESTION.to_owned(),
        accept_text: consts::DEFAULT_ACCEPT_TEXT.to_owned(),
        maximum_rating,
        allow_empty: false,
    }
}

// =============================================================
// Building
// =============================================================

#[test]
fn builds_question_icons_accept() {
    let form = Form::build(&config(5));
    assert_eq!(form.question.len(), 1);
    assert_eq!(form.question[0].text, consts::DEFAULT_QUESTION);
    assert_eq!(form.icons.len(), 5);
    assert!(form.icons.iter().all(|icon| icon.state == IconState::Inactive));
    assert_eq!(form.accept.label, consts::DEFAULT_ACCEPT_TEXT);
}

#[test]
fn icons_are_indexed_in_order() {
    let form = Form::build(&config(3));
    let indices: Vec<u8> = form.icons.iter().map(|icon| icon.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn unsanitises_question_into_lines() {
    let mut cfg = config(2);
    cfg.question = "How was it?\\nBe honest.".to_owned();
    let form = Form::build(&cfg);
    let lines: Vec<&str> = form.question.iter().map(|label| label.text.as_str()).collect();
    assert_eq!(lines, vec!["How was it?", "Be honest."]);
}

#[test]
fn size_follows_legacy_cells() {
    let form = Form::build(&config(5));
    let expected = (5 * consts::ICON_CELL_PX, 2 * consts::ACCEPT_ROW_PX + consts::ICON_CELL_PX);
    assert_eq!(form.size_px(), expected);
}

// =============================================================
// Selection
// =============================================================

#[test]
fn select_activates_prefix() {
    for maximum in [2u8, 3, 5, 10] {
        for selected in 0..maximum {
            let mut form = Form::build(&config(maximum));
            form.select(selected);
            for icon in &form.icons {
                let expected =
                    if icon.index <= selected { IconState::Active } else { IconState::Inactive };
                assert_eq!(icon.state, expected, "icon {} after click {selected}", icon.index);
            }
            assert_eq!(form.active_count(), usize::from(selected) + 1);
        }
    }
}

#[test]
fn select_repaints_every_icon_in_order() {
    let mut form = Form::build(&config(4));
    let updates = form.select(1);
    assert_eq!(
        updates,
        vec![
            FormUpdate::RepaintIcon { index: 0, state: IconState::Active },
            FormUpdate::RepaintIcon { index: 1, state: IconState::Active },
            FormUpdate::RepaintIcon { index: 2, state: IconState::Inactive },
            FormUpdate::RepaintIcon { index: 3, state: IconState::Inactive },
        ]
    );
}

#[test]
fn reselecting_lower_deactivates_upper() {
    let mut form = Form::build(&config(5));
    form.select(4);
    assert_eq!(form.active_count(), 5);
    form.select(1);
    assert_eq!(form.active_count(), 2);
    assert_eq!(form.icons[4].state, IconState::Inactive);
}

// =============================================================
// Icon resources
// =============================================================

#[test]
fn icon_resource_follows_state() {
    let mut icon = Icon::inactive(0);
    assert_eq!(icon.resource(), consts::INACTIVE_ICON_RESOURCE);
    icon.state = IconState::Active;
    assert_eq!(icon.resource(), consts::ACTIVE_ICON_RESOURCE);
}
