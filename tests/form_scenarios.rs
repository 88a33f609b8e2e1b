mod common;

use approx::assert_relative_eq;
use common::{figure, FakeService, Step};
use maser_front::{
    app::{EditOutcome, MaserApp},
    fields::ValidationError,
    maser_errors::MaserError,
    parameters::{
        schema,
        store::{ParamStore, ParamValue},
        InputKind, ParamGroup,
    },
    submission::SubmitOutcome,
};

#[tokio::test]
async fn test_startup_draws_defaults() {
    let app = MaserApp::new(FakeService::new());
    assert_eq!(app.params(), ParamStore::initialize());
    assert!(!app.display().is_visible());

    assert_eq!(app.start().await.unwrap(), SubmitOutcome::Applied);

    let service = app.client().service();
    assert_eq!(service.calls(), 1);
    assert_eq!(service.requests(), vec![ParamStore::initialize()]);
    assert_eq!(app.params(), ParamStore::initialize());

    let display = app.display();
    assert!(display.is_visible());
    assert!(display.image.src.len() > "data:image/png;base64,".len());
    assert!(display.download.href.len() > "data:text/csv;base64,".len());
    assert_eq!(display.download.filename, "MASER time series.csv");
    assert_eq!(display.error, "");
    assert_eq!(display.last_result().unwrap().figure_png, figure("default"));
}

#[tokio::test]
async fn test_widgets_follow_schema_order() {
    let app = MaserApp::new(FakeService::new());
    let keys: Vec<_> = app.fields().iter().map(|f| f.key()).collect();
    let expected: Vec<_> = schema::all_fields().map(|(_, d)| d.key).collect();
    assert_eq!(keys, expected);

    let cone: Vec<_> = app.group_fields(ParamGroup::Cone).map(|f| f.key()).collect();
    assert_eq!(cone, ["alpha", "dalpha"]);

    for field in app.fields() {
        let widget = field.widget();
        assert_eq!(widget.value, field.descriptor().default.to_string());
        assert_eq!(widget.label, field.descriptor().label);
    }
    assert_eq!(
        app.find_field("epoch").unwrap().widget().kind,
        InputKind::Date
    );
}

#[tokio::test]
async fn test_valid_edit_writes_once_and_submits_once() {
    let app = MaserApp::new(FakeService::new());
    app.start().await.unwrap();

    let outcome = app.edit(ParamGroup::Planet, "a", "1.0001").await.unwrap();
    assert_eq!(outcome, EditOutcome::Submitted(SubmitOutcome::Applied));
    assert_eq!(app.client().service().calls(), 2);

    let mut expected = ParamStore::initialize();
    expected
        .set(ParamGroup::Planet, "a", ParamValue::Number(1.0001))
        .unwrap();
    assert_eq!(app.params(), expected);
    assert_eq!(app.client().service().requests()[1], expected);

    app.edit_by_name("phi_p0", "0.35").await.unwrap();
    let phase = app.params().get(ParamGroup::Planet, "phi_p0").unwrap().as_f64();
    assert_relative_eq!(phase.unwrap(), 0.35, epsilon = 1e-12);
}

#[tokio::test]
async fn test_same_value_is_submitted_again() {
    let app = MaserApp::new(FakeService::new());
    app.start().await.unwrap();
    app.edit_by_name("dt", "10").await.unwrap();
    app.edit_by_name("dt", "10").await.unwrap();
    assert_eq!(app.client().service().calls(), 3);
    assert_eq!(app.params(), ParamStore::initialize());
}

#[tokio::test]
async fn test_invalid_edit_suspends_display_without_request() {
    let app = MaserApp::new(FakeService::new());
    app.start().await.unwrap();

    let outcome = app.edit_by_name("star.i_s", "91").await.unwrap();
    assert_eq!(outcome, EditOutcome::Rejected(ValidationError::AboveMax(90.)));
    assert_eq!(app.client().service().calls(), 1);
    assert_eq!(app.params(), ParamStore::initialize());

    let display = app.display();
    assert!(!display.image.visible);
    assert!(!display.download.visible);
    assert_eq!(display.error, "- Invalid input");
    assert!(display.last_result().is_some());

    let field = app.find_field("i_s").unwrap();
    assert_eq!(field.widget().error, "- Enter a value ≤ 90");

    // correcting the field brings the display back
    let outcome = app.edit_by_name("i_s", "90").await.unwrap();
    assert_eq!(outcome, EditOutcome::Submitted(SubmitOutcome::Applied));
    assert!(app.display().is_visible());
    assert_eq!(app.display().error, "");
    assert_eq!(field.widget().error, "");
}

#[tokio::test]
async fn test_empty_input_always_required() {
    let app = MaserApp::new(FakeService::new());
    app.start().await.unwrap();

    for field in app.fields() {
        let outcome = app.edit(field.group(), field.key(), "").await.unwrap();
        let EditOutcome::Rejected(err) = outcome else {
            panic!("{} accepted an empty input", field.key());
        };
        assert!(err.is_required_value());
        assert!(!app.display().is_visible());
    }

    assert_eq!(
        app.find_field("epoch").unwrap().widget().error,
        "- Enter a valid date"
    );
    assert_eq!(
        app.find_field("t_start").unwrap().widget().error,
        "- Enter a valid time"
    );
    assert_eq!(
        app.find_field("duration").unwrap().widget().error,
        "- Value required"
    );
    assert_eq!(app.client().service().calls(), 1);
}

#[tokio::test]
async fn test_scenarios() {
    let app = MaserApp::new(FakeService::new());

    let cases = [
        ("i_s", "90", None),
        ("i_s", "91", Some("Enter a value ≤ 90")),
        ("i_s", "0", Some("Enter a value > 0")),
        ("a", "1", Some("Enter a value > 1")),
        ("a", "1.0001", None),
        ("a", "-5", Some("Enter a value > 1")),
        ("lam", "360", Some("Enter a value < 360")),
        ("lam", "359.9", None),
        ("phi_s0", "0", None),
        ("phi_s0", "1.5", Some("Enter a value ≤ 1")),
        ("beta", "-0.1", Some("Enter a value ≥ 0")),
        ("f", "ten", Some("Enter a valid number")),
    ];

    for (key, input, expected) in cases {
        let outcome = app.edit_by_name(key, input).await.unwrap();
        match (outcome, expected) {
            (EditOutcome::Submitted(_), None) => {}
            (EditOutcome::Rejected(err), Some(message)) => {
                assert_eq!(err.to_string(), message, "{key}={input}")
            }
            (outcome, expected) => panic!("{key}={input}: {outcome:?}, expected {expected:?}"),
        }
    }
}

#[tokio::test]
async fn test_date_and_time_edits() {
    let app = MaserApp::new(FakeService::new());

    app.edit_by_name("epoch", "14/07/2031").await.unwrap();
    app.edit_by_name("t_start", "18:45").await.unwrap();

    let params = app.params();
    assert_eq!(
        params.get(ParamGroup::Observation, "epoch"),
        Some(&ParamValue::Text("2031-07-14".into()))
    );
    assert_eq!(
        params.get(ParamGroup::Observation, "t_start"),
        Some(&ParamValue::Text("18:45".into()))
    );

    let outcome = app.edit_by_name("t_start", "25:00").await.unwrap();
    assert!(matches!(outcome, EditOutcome::Submitted(_)));
    let outcome = app.edit_by_name("epoch", "2027-02-30").await.unwrap();
    assert!(matches!(outcome, EditOutcome::Submitted(_)));

    let params = app.params();
    assert_eq!(
        params.get(ParamGroup::Observation, "epoch"),
        Some(&ParamValue::Text("2027-02-30".into()))
    );
    assert_eq!(
        params.get(ParamGroup::Observation, "t_start"),
        Some(&ParamValue::Text("25:00".into()))
    );

    let outcome = app.edit_by_name("t_start", "").await.unwrap();
    assert_eq!(outcome, EditOutcome::Rejected(ValidationError::TimeRequired));
}

#[tokio::test]
async fn test_unknown_field() {
    let app = MaserApp::new(FakeService::new());
    assert_eq!(
        app.edit_by_name("M_p", "1").await.unwrap_err(),
        MaserError::UnknownParameter("M_p".into())
    );
    assert_eq!(
        app.edit_by_name("disk.a", "1").await.unwrap_err(),
        MaserError::UnknownGroup("disk".into())
    );
    assert_eq!(
        app.edit(ParamGroup::Cone, "a", "2").await.unwrap_err(),
        MaserError::UnknownParameter("cone.a".into())
    );
}

#[tokio::test]
async fn test_failed_startup_reports_error() {
    let app = MaserApp::new(FakeService::scripted(vec![Step::fail("connection refused", 0)]));

    let err = app.start().await.unwrap_err();
    assert_eq!(err, MaserError::Service("connection refused".into()));

    let display = app.display();
    assert!(!display.is_visible());
    assert_eq!(
        display.error,
        "- Simulation request failed: Simulation service failure: connection refused"
    );
    assert!(display.last_result().is_none());

    // the next valid edit recovers
    app.edit_by_name("B_s", "1200").await.unwrap();
    assert!(app.display().is_visible());
    assert_eq!(app.display().error, "");
}
