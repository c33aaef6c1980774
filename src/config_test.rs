use super::*;

fn seeded() -> VarStore {
    let mut vars = VarStore::new();
    vars.set(consts::QUESTION_VAR, Var::Str(consts::DEFAULT_QUESTION.into()));
    vars.set(consts::ACCEPT_TEXT_VAR, Var::Str(consts::DEFAULT_ACCEPT_TEXT.into()));
    vars.set(consts::MAXIMUM_RATING_VAR, Var::Int(i64::from(consts::DEFAULT_MAXIMUM_RATING)));
    vars.set(consts::ALLOW_EMPTY_VAR, Var::Str(consts::DEFAULT_ALLOW_EMPTY.into()));
    vars
}

fn legacy(vars: &mut VarStore) {
    vars.set(consts::MOUSE_BACKEND_VAR, Var::Str(consts::LEGACY_BACKEND.into()));
    vars.set(consts::CANVAS_BACKEND_VAR, Var::Str(consts::LEGACY_BACKEND.into()));
}

// =============================================================
// Backend gate
// =============================================================

#[test]
fn accepts_legacy_backends() {
    let mut vars = VarStore::new();
    legacy(&mut vars);
    assert_eq!(check_backends(&vars), Ok(()));
}

#[test]
fn rejects_unset_backends() {
    let vars = VarStore::new();
    assert_eq!(
        check_backends(&vars),
        Err(ConfigurationError::UnsupportedBackend {
            mouse: "<unset>".into(),
            canvas: "<unset>".into(),
        })
    );
}

#[test]
fn rejects_mismatched_canvas_backend() {
    let mut vars = VarStore::new();
    legacy(&mut vars);
    vars.set(consts::CANVAS_BACKEND_VAR, Var::Str("xdot".into()));
    assert_eq!(
        check_backends(&vars),
        Err(ConfigurationError::UnsupportedBackend {
            mouse: consts::LEGACY_BACKEND.into(),
            canvas: "xdot".into(),
        })
    );
}

#[test]
fn reports_non_string_backend_by_type() {
    let mut vars = VarStore::new();
    vars.set(consts::MOUSE_BACKEND_VAR, Var::Int(3));
    vars.set(consts::CANVAS_BACKEND_VAR, Var::Str(consts::LEGACY_BACKEND.into()));
    assert_eq!(
        check_backends(&vars),
        Err(ConfigurationError::UnsupportedBackend {
            mouse: "<integer>".into(),
            canvas: consts::LEGACY_BACKEND.into(),
        })
    );
}

// =============================================================
// Config materialisation
// =============================================================

#[test]
fn reads_seeded_defaults() {
    let config = Config::from_store(&seeded()).unwrap();
    assert_eq!(config.question, consts::DEFAULT_QUESTION);
    assert_eq!(config.accept_text, consts::DEFAULT_ACCEPT_TEXT);
    assert_eq!(config.maximum_rating, consts::DEFAULT_MAXIMUM_RATING);
    assert!(!config.allow_empty);
}

#[test]
fn maps_allow_empty_yes() {
    let mut vars = seeded();
    vars.set(consts::ALLOW_EMPTY_VAR, Var::Str("yes".into()));
    assert!(Config::from_store(&vars).unwrap().allow_empty);
}

#[test]
fn accepts_boundary_ratings() {
    for rating in [consts::MIN_MAXIMUM_RATING, consts::MAX_MAXIMUM_RATING] {
        let mut vars = seeded();
        vars.set(consts::MAXIMUM_RATING_VAR, Var::Int(i64::from(rating)));
        assert_eq!(Config::from_store(&vars).unwrap().maximum_rating, rating);
    }
}

#[test]
fn coerces_numeric_question_to_text() {
    let mut vars = seeded();
    vars.set(consts::QUESTION_VAR, Var::Int(7));
    assert_eq!(Config::from_store(&vars).unwrap().question, "7");
}

#[test]
fn rejects_unset_question() {
    let mut vars = seeded();
    vars.set(consts::QUESTION_VAR, Var::None);
    assert_eq!(
        Config::from_store(&vars),
        Err(ConfigurationError::InvalidVariable {
            name: consts::QUESTION_VAR,
            reason: "not set".into(),
        })
    );
}

#[test]
fn rejects_string_rating() {
    let mut vars = seeded();
    vars.set(consts::MAXIMUM_RATING_VAR, Var::Str("5".into()));
    assert!(matches!(
        Config::from_store(&vars),
        Err(ConfigurationError::InvalidVariable { name: "maximum_rating", .. })
    ));
}

#[test]
fn rejects_out_of_range_ratings() {
    for rating in [-3, 0, 1, 101, 300] {
        let mut vars = seeded();
        vars.set(consts::MAXIMUM_RATING_VAR, Var::Int(rating));
        assert!(
            matches!(
                Config::from_store(&vars),
                Err(ConfigurationError::InvalidVariable { name: "maximum_rating", .. })
            ),
            "rating {rating} should be rejected"
        );
    }
}

#[test]
fn rejects_unknown_allow_empty() {
    let mut vars = seeded();
    vars.set(consts::ALLOW_EMPTY_VAR, Var::Str("maybe".into()));
    assert!(matches!(
        Config::from_store(&vars),
        Err(ConfigurationError::InvalidVariable { name: "allow_empty", .. })
    ));
}

#[test]
fn rejects_integer_allow_empty() {
    let mut vars = seeded();
    vars.set(consts::ALLOW_EMPTY_VAR, Var::Int(1));
    assert!(matches!(
        Config::from_store(&vars),
        Err(ConfigurationError::InvalidVariable { name: "allow_empty", .. })
    ));
}
