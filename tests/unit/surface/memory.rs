use super::*;

#[test]
fn folds_patches_into_element_state() {
    let mut s = InMemorySurface::new();
    let id = ElementId(7);
    s.apply(Millis(0), &Paint::class(id, "is-active", true));
    s.apply(Millis(5), &Paint::opacity(id, 0.0));
    s.apply(Millis(9), &Paint::class(id, "is-active", false));
    s.apply(Millis(9), &Paint::class(id, "is-animated", true));
    s.apply(Millis(12), &Paint::transform(id, Transform::TranslateY { px: -30.0 }));

    assert!(!s.has_class(id, "is-active"));
    assert!(s.has_class(id, "is-animated"));
    assert_eq!(s.class_added_at(id, "is-animated"), Some(Millis(9)));
    assert_eq!(s.transform(id), Some(Transform::TranslateY { px: -30.0 }));
    assert_eq!(s.element(id).and_then(|e| e.opacity), Some(0.0));
    assert_eq!(s.log().len(), 5);
    assert_eq!(s.paints_for(ElementId(8)).count(), 0);
}

#[test]
fn append_child_tags_the_new_element() {
    let mut s = InMemorySurface::new();
    s.apply(
        Millis(0),
        &Paint::with_patch(
            ElementId(1),
            Patch::AppendChild {
                child: ElementId(100),
                class: "dot".to_owned(),
                label: "Go to slide 1".to_owned(),
            },
        ),
    );
    assert_eq!(s.element(ElementId(1)).unwrap().children, vec![ElementId(100)]);
    assert!(s.has_class(ElementId(100), "dot"));
}

#[test]
fn paints_render_as_css_like_text() {
    let p = Paint::transform(ElementId(3), Transform::TranslateXPercent { pct: -200.0 });
    assert_eq!(p.to_string(), "#3 transform: translateX(-200%)");
    assert_eq!(
        Paint::class(ElementId(3), "is-animated", true).to_string(),
        "#3 class +is-animated"
    );
}
