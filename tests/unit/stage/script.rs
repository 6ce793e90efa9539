use super::*;
use crate::{
    foundation::{
        config::StageConfig,
        core::{ElementId, Viewport},
    },
    markup::document::{Document, ElementDef},
};

#[test]
fn steps_are_ordered_by_time_and_stable() {
    let json = r#"[
        { "at": 500, "input": { "type": "scroll", "y": 10 } },
        { "at": 100, "input": { "type": "click", "target": 4 } },
        { "at": 100, "input": { "type": "pointer_enter", "target": 4 } }
    ]"#;
    let mut script = Script::from_json_str(json).unwrap();
    let times: Vec<u64> = script.steps().iter().map(|s| s.at.0).collect();
    assert_eq!(times, vec![100, 100, 500]);
    assert_eq!(
        script.steps()[1].input,
        Input::PointerEnter {
            target: ElementId(4)
        }
    );

    script.push(Millis(100), Input::Scroll { y: 0.0 });
    assert_eq!(script.steps()[2].input, Input::Scroll { y: 0.0 });
    assert_eq!(script.len(), 4);
}

#[test]
fn malformed_scripts_are_serde_errors() {
    let err = Script::from_json_str(r#"[{ "at": 1, "input": { "type": "wiggle" } }]"#);
    assert!(matches!(
        err,
        Err(crate::foundation::error::MotionError::Serde(_))
    ));
}

#[test]
fn run_script_stops_at_the_horizon() {
    let doc = Document::new(Viewport::new(800.0, 600.0))
        .with(
            ElementDef::new(1)
                .attr("data-apex-animate", "")
                .rect(0.0, 1000.0, 800.0, 1100.0),
        )
        .unwrap();
    let mut stage = Stage::new(doc, StageConfig::default()).unwrap();
    let script = Script::new(vec![
        ScriptStep {
            at: Millis(200),
            input: Input::Scroll { y: 600.0 },
        },
        ScriptStep {
            at: Millis(900),
            input: Input::Click {
                target: ElementId(77),
            },
        },
    ]);
    stage.run_script(&script, Millis(800)).unwrap();
    assert_eq!(stage.now(), Millis(800));
    assert_eq!(
        stage.surface().class_added_at(ElementId(1), "is-animated"),
        Some(Millis(200))
    );
}
