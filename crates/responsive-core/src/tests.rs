#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::*;

    fn setup(width: f32) -> (Rc<StaticViewport>, Responsive) {
        let _ = env_logger::builder().is_test(true).try_init();
        let viewport = Rc::new(StaticViewport::new(width, 800.0));
        let cx = Responsive::new(viewport.clone());
        (viewport, cx)
    }

    fn wide_scale(cx: &Responsive) {
        cx.configure(Config::new().scale(ScalePatch::new().maximum(640.0)));
    }

    #[test]
    fn test_initial_breakpoint_from_width() {
        let (_, cx) = setup(361.0);
        assert_eq!(cx.breakpoint(), "medium");
        let (_, cx) = setup(1000.0);
        assert_eq!(cx.breakpoint(), "large");
    }

    #[test]
    fn test_viewport_change_updates_breakpoint() {
        let (viewport, cx) = setup(400.0);
        assert_eq!(cx.breakpoint(), "medium");

        viewport.set_width(300.0);
        cx.viewport_changed();
        assert_eq!(cx.breakpoint(), "small");

        viewport.set_width(900.0);
        cx.viewport_changed();
        assert_eq!(cx.breakpoint(), "large");
    }

    #[test]
    fn test_pinned_breakpoint_survives_viewport_changes() {
        let (viewport, cx) = setup(380.0);
        cx.set_breakpoint("small");
        assert!(cx.is_pinned());

        viewport.set_width(900.0);
        cx.viewport_changed();
        assert_eq!(cx.breakpoint(), "small");

        cx.update_breakpoint();
        assert_eq!(cx.breakpoint(), "small");

        cx.reset();
        assert!(!cx.is_pinned());
        assert_eq!(cx.breakpoint(), "large");
    }

    #[test]
    fn test_scale_scenarios() {
        let (viewport, cx) = setup(320.0);
        wide_scale(&cx);
        let margin = |cx: &Responsive| cx.resolve("margin", &10.into());

        assert_eq!(margin(&cx), Some(StyleValue::Number(8.0)));
        viewport.set_width(640.0);
        assert_eq!(margin(&cx), Some(StyleValue::Number(13.0)));
        viewport.set_width(480.0);
        assert_eq!(margin(&cx), Some(StyleValue::Number(10.0)));
    }

    #[test]
    fn test_value_follows_scale_factor() {
        let (viewport, cx) = setup(320.0);
        wide_scale(&cx);
        for (width, expected) in [(320.0, [5.0, 8.0, 10.0]), (400.0, [8.0, 9.0, 10.0])] {
            viewport.set_width(width);
            for (factor, expected) in [1.0, 0.5, 0.0].into_iter().zip(expected) {
                cx.configure(Config::new().scale(ScalePatch::new().factor(factor)));
                assert_eq!(cx.value(10.0), expected);
            }
        }
    }

    #[test]
    fn test_reset_restores_scale() {
        let (_, cx) = setup(320.0);
        cx.configure(Config::new().scale(ScalePatch::new().factor(1.0).maximum(640.0)));
        cx.reset();
        assert_eq!(cx.scale_config(), ScaleConfig::default());
    }

    #[test]
    fn test_configure_breakpoints_resets_missing_active() {
        let (_, cx) = setup(420.0);
        cx.configure(Config::new().breakpoints([("tiny", 300.0), ("huge", 999.0)]));
        assert_eq!(cx.breakpoints().names().collect::<Vec<_>>(), ["tiny", "huge"]);
        assert_eq!(cx.breakpoint(), "tiny");
        assert!(!cx.is_pinned());

        cx.set_breakpoint("huge");
        assert_eq!(cx.breakpoint(), "huge");
    }

    #[test]
    fn test_configure_initial_breakpoint_pins() {
        let (_, cx) = setup(420.0);
        cx.configure(
            Config::new()
                .breakpoints([("tiny", 300.0), ("huge", 999.0)])
                .breakpoint("huge"),
        );
        assert_eq!(cx.breakpoint(), "huge");
        assert!(cx.is_pinned());
    }

    #[test]
    fn test_configure_from_json() {
        let (_, cx) = setup(420.0);
        let config = Config::from_json(
            r#"{ "breakpoints": { "tiny": 300, "huge": 999 }, "scale": { "factor": 1 } }"#,
        );
        let config = match config {
            Ok(config) => config,
            Err(err) => panic!("config rejected: {err}"),
        };
        cx.configure(config);
        assert_eq!(cx.breakpoint(), "tiny");
        assert_eq!(cx.scale_config().factor, 1.0);
        assert_eq!(cx.scale_config().maximum, 520.0);

        assert!(matches!(Config::from_json("{ nope"), Err(Error::Json(_))));
    }

    #[test]
    fn test_breakpoint_values_in_sheet() {
        let (_, cx) = setup(200.0);
        cx.configure(Config::new().breakpoints([("tiny", 300.0), ("huge", 999.0)]));
        let styles = cx.create_styles([
            (
                "wrapper",
                style! {
                    backgroundColor: style! { tiny: "red" },
                    margin: style! { huge: 10 },
                    flex: style! { small: 1, tiny: 0 },
                    color: style! { tiny: "green", huge: "blue" },
                },
            ),
            ("text", style! { fontSize: style! { tiny: 20, huge: 40 }, borderWidth: 40 }),
        ]);

        let wrapper = styles.get("wrapper");
        let wrapper = wrapper.as_ref();
        assert_eq!(wrapper.and_then(|s| s.text("color")).as_deref(), Some("green"));
        assert_eq!(wrapper.and_then(|s| s.text("backgroundColor")).as_deref(), Some("red"));
        assert_eq!(wrapper.and_then(|s| s.get("margin")), None);
        assert_eq!(wrapper.and_then(|s| s.number("flex")), Some(0.0));
        assert_eq!(styles.get("text").and_then(|s| s.number("fontSize")), Some(20.0));
    }

    #[test]
    fn test_lazy_styles_resolve_at_read_time() {
        let (viewport, cx) = setup(420.0);
        wide_scale(&cx);
        let styles = cx.create_styles([
            ("wrapper", style! { backgroundColor: "red", margin: 10, flex: 1 }),
            ("text", style! { fontSize: 20, borderWidth: 40 }),
        ]);
        let wrapper = styles.get("wrapper");
        let text = styles.get("text");
        let (Some(wrapper), Some(text)) = (wrapper, text) else {
            panic!("sheet entries missing");
        };

        assert_eq!(wrapper.text("backgroundColor").as_deref(), Some("red"));
        assert_eq!(wrapper.number("flex"), Some(1.0));

        viewport.set_width(320.0);
        assert_eq!(wrapper.number("margin"), Some(8.0));
        assert_eq!(wrapper.number("flex"), Some(1.0));
        assert_eq!(text.number("fontSize"), Some(15.0));
        assert_eq!(text.number("borderWidth"), Some(30.0));

        viewport.set_width(640.0);
        assert_eq!(wrapper.number("margin"), Some(13.0));
        assert_eq!(text.number("fontSize"), Some(25.0));
        assert_eq!(text.number("borderWidth"), Some(50.0));
    }

    #[test]
    fn test_lazy_nested_objects() {
        let (_, cx) = setup(300.0);
        let styles = cx.create_styles([(
            "shadow",
            style! {
                shadowRadius: 8,
                shadowOffset: style! { width: 5, height: 5 },
                shadowOpacity: 1,
                shadowColor: "black",
            },
        )]);
        let Some(shadow) = styles.get("shadow") else {
            panic!("missing shadow");
        };
        assert_eq!(shadow.number("shadowRadius"), Some(6.0));
        assert_eq!(shadow.number("shadowOpacity"), Some(1.0));
        assert_eq!(shadow.text("shadowColor").as_deref(), Some("black"));
        let offset = shadow.view("shadowOffset");
        assert_eq!(offset.and_then(|o| o.number("width")), Some(4.0));
        assert_eq!(offset.and_then(|o| o.number("height")), Some(4.0));
    }

    #[test]
    fn test_custom_value_reads_pinned_breakpoint() {
        let (_, cx) = setup(420.0);
        let styles = cx.create_styles([("test", style! { width: 50, height: 10 })]);
        let calls = Rc::new(RefCell::new(Vec::new()));
        cx.configure(Config::new().breakpoint("custom").value({
            let calls = calls.clone();
            move |value, breakpoint, orientation| {
                calls
                    .borrow_mut()
                    .push((value, breakpoint.to_string(), orientation));
                value * 2.0
            }
        }));

        assert_eq!(styles.get("test").and_then(|s| s.number("width")), Some(100.0));
        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(styles.get("test").and_then(|s| s.number("height")), Some(20.0));
        assert_eq!(
            calls.borrow()[1],
            (10.0, "custom".to_string(), Orientation::Portrait)
        );
    }

    #[test]
    fn test_sheet_from_json_skips_invalid_blocks() {
        let (_, cx) = setup(420.0);
        let sheet = StyleSheet::from_json(
            &cx,
            r#"{ "ok": { "margin": 10, "color": ["blue", "red"] }, "bad": 3 }"#,
        );
        let Ok(sheet) = sheet else {
            panic!("valid JSON rejected");
        };
        assert_eq!(sheet.names().collect::<Vec<_>>(), ["ok"]);
        assert_eq!(
            sheet.resolve("ok").and_then(|s| s.text("color").map(str::to_string)),
            Some("blue".to_string())
        );

        let not_object = StyleSheet::from_json(&cx, "[1, 2]");
        assert!(not_object.is_ok_and(|s| s.is_empty()));
        assert!(StyleSheet::from_json(&cx, "{").is_err());
    }

    #[test]
    fn test_broadcast_runs_listeners_in_order() {
        let (_, cx) = setup(420.0);
        let log = Rc::new(RefCell::new(Vec::new()));
        for n in 0..3 {
            let log = log.clone();
            cx.register(move || log.borrow_mut().push(n));
        }
        cx.broadcast();
        cx.broadcast();
        assert_eq!(*log.borrow(), [0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn test_listener_can_remove_itself_and_others() {
        let (_, cx) = setup(420.0);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let later: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
        let own: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

        let first = cx.register({
            let cx = cx.clone();
            let calls = calls.clone();
            let later = later.clone();
            let own = own.clone();
            move || {
                calls.borrow_mut().push("first");
                if let Some(id) = own.get() {
                    cx.remove(id);
                }
                if let Some(id) = later.get() {
                    cx.remove(id);
                }
            }
        });
        own.set(Some(first));
        let second = cx.register({
            let calls = calls.clone();
            move || calls.borrow_mut().push("second")
        });
        later.set(Some(second));

        cx.broadcast();
        assert_eq!(*calls.borrow(), ["first"]);
        assert_eq!(cx.listener_count(), 0);

        cx.broadcast();
        assert_eq!(*calls.borrow(), ["first"]);
    }

    #[test]
    fn test_listener_added_during_broadcast_waits() {
        let (_, cx) = setup(420.0);
        let calls = Rc::new(Cell::new(0));
        let added = Rc::new(Cell::new(false));
        cx.register({
            let cx = cx.clone();
            let calls = calls.clone();
            move || {
                if !added.replace(true) {
                    let calls = calls.clone();
                    cx.register(move || calls.set(calls.get() + 1));
                }
            }
        });
        cx.broadcast();
        assert_eq!(calls.get(), 0);
        cx.broadcast();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_subscription_removes_listener_on_drop() {
        let (_, cx) = setup(420.0);
        let calls = Rc::new(Cell::new(0));
        let sub = cx.subscribe({
            let calls = calls.clone();
            move || calls.set(calls.get() + 1)
        });
        cx.broadcast();
        drop(sub);
        cx.broadcast();
        assert_eq!(calls.get(), 1);
        assert_eq!(cx.listener_count(), 0);
    }

    #[test]
    fn test_contexts_are_independent() {
        let (_, a) = setup(420.0);
        let (_, b) = setup(420.0);
        a.set_breakpoint("large");
        a.register(|| {});
        assert_eq!(b.breakpoint(), "medium");
        assert_eq!(b.listener_count(), 0);
    }

    #[test]
    fn test_signal_tracker_reruns_on_change() {
        let spaced = signal(false);
        let runs = Rc::new(Cell::new(0));
        let seen = Rc::new(Cell::new(false));

        let handle = SignalTracker.track(Rc::new({
            let spaced = spaced.clone();
            let runs = runs.clone();
            let seen = seen.clone();
            move || {
                runs.set(runs.get() + 1);
                seen.set(spaced.get());
            }
        }));
        assert_eq!(runs.get(), 1);

        spaced.set(true);
        assert_eq!(runs.get(), 2);
        assert!(seen.get());

        handle.run();
        spaced.set(false);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_batch_runs_observer_once() {
        let active = signal(true);
        let spaced = signal(false);
        let runs = Rc::new(Cell::new(0));
        let _handle = SignalTracker.track(Rc::new({
            let active = active.clone();
            let spaced = spaced.clone();
            let runs = runs.clone();
            move || {
                let _ = (active.get(), spaced.get());
                runs.set(runs.get() + 1);
            }
        }));

        batch(|| {
            active.set(false);
            spaced.set(true);
        });
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_update_and_with_rerun_observers() {
        let names = signal(vec!["small".to_string()]);
        let seen = Rc::new(Cell::new(0));
        let _handle = SignalTracker.track(Rc::new({
            let names = names.clone();
            let seen = seen.clone();
            move || seen.set(names.with(Vec::len))
        }));
        assert_eq!(seen.get(), 1);

        names.update(|names| names.push("large".to_string()));
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_untracked_reads_are_not_dependencies() {
        let hidden = signal(0);
        let runs = Rc::new(Cell::new(0));
        let _handle = SignalTracker.track(Rc::new({
            let hidden = hidden.clone();
            let runs = runs.clone();
            move || {
                untracked(|| hidden.get());
                runs.set(runs.get() + 1);
            }
        }));
        hidden.set(1);
        assert_eq!(runs.get(), 1);
    }
}
