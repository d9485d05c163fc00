//! Listener registry behaviour through the public API.

use std::{cell::RefCell, rc::Rc};

use switchboard::{
    ALL_EVENTS, Callback, Emitter, Error, EventNames, Selector, Target, callback, context,
};

type Log = Rc<RefCell<Vec<String>>>;

fn recorder(log: &Log, label: &'static str) -> Callback<i32> {
    let log = log.clone();
    callback(move |ev| {
        log.borrow_mut()
            .push(format!("{label}:{}:{:?}", ev.name(), ev.args()));
        Ok(())
    })
}

fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

#[test]
fn test_all_listeners_run_once_in_order_with_same_args() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    for label in ["a", "b", "c", "d"] {
        emitter.on("tick", recorder(&log, label), None);
    }
    emitter.trigger("tick", &[1, 2, 3]).unwrap();
    assert_eq!(
        entries(&log),
        vec![
            "a:tick:[1, 2, 3]",
            "b:tick:[1, 2, 3]",
            "c:tick:[1, 2, 3]",
            "d:tick:[1, 2, 3]",
        ]
    );
}

#[test]
fn test_many_arguments_are_forwarded() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    emitter.on("wide", recorder(&log, "w"), None);
    emitter.trigger("wide", &[1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(entries(&log), vec!["w:wide:[1, 2, 3, 4, 5, 6]"]);
}

#[test]
fn test_multiple_names_trigger_in_order() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    emitter.on("a b c", recorder(&log, "x"), None);
    emitter.trigger("c a", &[0]).unwrap();
    assert_eq!(entries(&log), vec!["x:c:[0]", "x:a:[0]"]);
}

#[test]
fn test_map_registration() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    let names: EventNames<i32> = vec![
        ("open", recorder(&log, "o")),
        ("close", recorder(&log, "c")),
    ]
    .into();
    assert!(emitter.on(names, None, None).is_none());
    emitter.trigger("open close", &[]).unwrap();
    assert_eq!(entries(&log), vec!["o:open:[]", "c:close:[]"]);
}

#[test]
fn test_once_runs_at_most_once() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    emitter.once("e", recorder(&log, "once"), None);
    emitter.on("e", recorder(&log, "on"), None);
    for i in 0..3 {
        emitter.trigger("e", &[i]).unwrap();
    }
    assert_eq!(
        entries(&log),
        vec!["once:e:[0]", "on:e:[0]", "on:e:[1]", "on:e:[2]"]
    );
}

#[test]
fn test_once_survives_nested_trigger() {
    let emitter = Emitter::<i32>::new();
    let calls = Rc::new(RefCell::new(0));
    let counter = calls.clone();
    emitter.once(
        "e",
        callback(move |ev| {
            *counter.borrow_mut() += 1;
            ev.emitter().trigger("e", &[])?;
            Ok(())
        }),
        None,
    );
    emitter.trigger("e", &[]).unwrap();
    emitter.trigger("e", &[]).unwrap();
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn test_once_with_multiple_names_fires_once_per_name() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    emitter.once("a b", recorder(&log, "x"), None);
    emitter.trigger("a b a b", &[]).unwrap();
    assert_eq!(entries(&log), vec!["x:a:[]", "x:b:[]"]);
}

#[test]
fn test_off_by_callback_keeps_unrelated_listeners() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    let noisy = recorder(&log, "noisy");
    emitter.on("e", noisy.clone(), None);
    emitter.once("e", noisy.clone(), None);
    emitter.on("e", recorder(&log, "quiet"), None);
    emitter.off("e", &noisy, None);
    emitter.trigger("e", &[]).unwrap();
    assert_eq!(entries(&log), vec!["quiet:e:[]"]);
}

#[test]
fn test_off_by_callback_and_context() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    let cb = recorder(&log, "cb");
    let left = context("left");
    let right = context("right");
    emitter.on("e", cb.clone(), Some(left.clone()));
    emitter.on("e", cb.clone(), Some(right.clone()));
    emitter.off("e", &cb, Some(&left));
    assert_eq!(emitter.listener_count("e"), 1);
    emitter.trigger("e", &[]).unwrap();
    assert_eq!(entries(&log), vec!["cb:e:[]"]);
}

#[test]
fn test_off_by_context_across_every_name() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    let view = context("view");
    emitter.on("a b", recorder(&log, "view"), Some(view.clone()));
    emitter.on("a", recorder(&log, "other"), None);
    emitter.off(EventNames::Every, Selector::Any, Some(&view));
    assert_eq!(emitter.event_names(), vec!["a"]);
    emitter.trigger("a b", &[]).unwrap();
    assert_eq!(entries(&log), vec!["other:a:[]"]);
}

#[test]
fn test_off_whole_bucket() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    emitter.on("a", recorder(&log, "a1"), None);
    emitter.on("a", recorder(&log, "a2"), None);
    emitter.on("b", recorder(&log, "b"), None);
    emitter.off("a", Selector::Any, None);
    assert!(!emitter.has_listeners("a"));
    assert!(emitter.has_listeners("b"));
}

#[test]
fn test_off_with_map() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    let first = recorder(&log, "first");
    let second = recorder(&log, "second");
    emitter.on("a", first.clone(), None);
    emitter.on("a", second.clone(), None);
    emitter.on("b", second.clone(), None);
    let map: EventNames<i32> = vec![("a", first), ("b", second)].into();
    emitter.off(map, Selector::Any, None);
    emitter.trigger("a b", &[]).unwrap();
    assert_eq!(entries(&log), vec!["second:a:[]"]);
}

#[test]
fn test_off_all_resets_registry() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    emitter.on("a b c", recorder(&log, "x"), None);
    emitter.on(ALL_EVENTS, recorder(&log, "all"), None);
    emitter.off_all();
    emitter.trigger("a b c all", &[]).unwrap();
    assert!(entries(&log).is_empty());
    assert!(emitter.is_empty());
}

#[test]
fn test_off_on_empty_emitter_is_noop() {
    let emitter = Emitter::<i32>::new();
    let cb = recorder(&Log::default(), "x");
    emitter.off("a", &cb, None).off(EventNames::Every, Selector::Any, None);
    assert!(emitter.is_empty());
}

#[test]
fn test_handle_off_removes_only_its_registration() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    let cb = recorder(&log, "shared");
    let ctx = context(());
    let first = emitter.on("e", cb.clone(), Some(ctx.clone())).unwrap();
    let second = emitter.on("e", cb.clone(), Some(ctx.clone())).unwrap();
    assert_ne!(first.id(), second.id());

    assert!(first.off());
    assert!(!first.off());
    assert_eq!(emitter.listener_count("e"), 1);

    emitter.off("e", second.id(), None);
    assert!(emitter.is_empty());
}

#[test]
fn test_handle_of_fired_once_listener() {
    let emitter = Emitter::<i32>::new();
    let handle = emitter.once("e", recorder(&Log::default(), "x"), None).unwrap();
    emitter.trigger("e", &[]).unwrap();
    assert!(!handle.off());
}

#[test]
fn test_handle_does_not_keep_emitter_alive() {
    let emitter = Emitter::<i32>::new();
    let handle = emitter.on("e", recorder(&Log::default(), "x"), None).unwrap();
    drop(emitter);
    assert!(!handle.off());
}

#[test]
fn test_all_listener_receives_every_event() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    emitter.on(ALL_EVENTS, recorder(&log, "all"), None);
    emitter.on("save", recorder(&log, "save"), None);
    emitter.trigger("save", &[1]).unwrap();
    emitter.trigger("load", &[2, 3]).unwrap();
    assert_eq!(
        entries(&log),
        vec!["save:save:[1]", "all:save:[1]", "all:load:[2, 3]"]
    );
}

#[test]
fn test_triggering_all_runs_all_listeners_twice() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    emitter.on(ALL_EVENTS, recorder(&log, "all"), None);
    emitter.trigger(ALL_EVENTS, &[]).unwrap();
    assert_eq!(entries(&log), vec!["all:all:[]", "all:all:[]"]);
}

#[test]
fn test_listener_removed_during_dispatch_is_skipped() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    let victim = recorder(&log, "victim");
    let target = victim.clone();
    emitter.on(
        "e",
        callback(move |ev| {
            ev.emitter().off("e", &target, None);
            Ok(())
        }),
        None,
    );
    emitter.on("e", victim, None);
    emitter.on("e", recorder(&log, "survivor"), None);
    emitter.trigger("e", &[]).unwrap();
    assert_eq!(entries(&log), vec!["survivor:e:[]"]);
}

#[test]
fn test_once_removal_does_not_skip_neighbour() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    emitter.once("e", recorder(&log, "first"), None);
    emitter.on("e", recorder(&log, "second"), None);
    emitter.on("e", recorder(&log, "third"), None);
    emitter.trigger("e", &[]).unwrap();
    assert_eq!(
        entries(&log),
        vec!["first:e:[]", "second:e:[]", "third:e:[]"]
    );
}

#[test]
fn test_listener_added_during_dispatch_waits_for_next_trigger() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    let late = recorder(&log, "late");
    emitter.once(
        "e",
        callback(move |ev| {
            ev.emitter().on("e", late.clone(), None);
            Ok(())
        }),
        None,
    );
    emitter.trigger("e", &[1]).unwrap();
    assert!(entries(&log).is_empty());
    emitter.trigger("e", &[2]).unwrap();
    assert_eq!(entries(&log), vec!["late:e:[2]"]);
}

#[test]
fn test_failing_listener_aborts_dispatch() {
    let emitter = Emitter::<i32>::new();
    let log = Log::default();
    emitter.once("e", recorder(&log, "once"), None);
    emitter.on("e", callback(|_| Err(Error::listener("nope"))), None);
    emitter.on("e", recorder(&log, "after"), None);

    let err = emitter.trigger("e", &[]).err();
    assert_eq!(err, Some(Error::listener("nope")));
    assert_eq!(entries(&log), vec!["once:e:[]"]);
    // the once listener stays removed, the remaining two are still registered
    assert_eq!(emitter.listener_count("e"), 2);
}

#[test]
fn test_context_is_the_invocation_target() {
    let emitter = Emitter::<i32>::new();
    let seen = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    emitter.on(
        "e",
        callback(move |ev| {
            if let Target::Context(_) = ev.target() {
                *sink.borrow_mut() = ev.target().downcast_ref::<&str>().copied();
            }
            Ok(())
        }),
        Some(context("widget")),
    );
    emitter.trigger("e", &[]).unwrap();
    assert_eq!(*seen.borrow(), Some("widget"));
}

#[test]
fn test_listen_to_and_stop_listening_everything() {
    let model = Emitter::<i32>::new();
    let view = Emitter::<i32>::new();
    let log = Log::default();

    view.listen_to(&model, "change reset", recorder(&log, "view"));
    model.on("change", recorder(&log, "other"), None);
    assert_eq!(view.listening_count(), 1);

    model.trigger("change", &[1]).unwrap();
    view.stop_listening(None, EventNames::Every, Selector::Any);
    model.trigger("change reset", &[2]).unwrap();

    assert_eq!(
        entries(&log),
        vec!["view:change:[1]", "other:change:[1]", "other:change:[2]"]
    );
    assert!(view.is_empty());
    assert_eq!(model.event_names(), vec!["change"]);
}

#[test]
fn test_stop_listening_visits_every_source() {
    let a = Emitter::<i32>::new();
    let b = Emitter::<i32>::new();
    let view = Emitter::<i32>::new();
    let log = Log::default();
    view.listen_to(&a, "x", recorder(&log, "a"));
    view.listen_to(&b, "x y", recorder(&log, "b"));
    assert_eq!(view.listening_count(), 2);

    view.stop_listening(None, "x", Selector::Any);

    assert!(a.is_empty());
    assert_eq!(b.event_names(), vec!["y"]);
    assert_eq!(view.listening_count(), 1);

    a.trigger("x", &[1]).unwrap();
    b.trigger("x y", &[2]).unwrap();
    assert_eq!(entries(&log), vec!["b:y:[2]"]);
}

#[test]
fn test_listen_to_binds_listener_as_context() {
    let model = Emitter::<i32>::new();
    let view = Emitter::<i32>::new();
    let bound = Rc::new(RefCell::new(false));
    let sink = bound.clone();
    let expected = view.clone();
    view.listen_to(
        &model,
        "change",
        callback(move |ev| {
            *sink.borrow_mut() = ev.context().is_some_and(|ctx| expected.is(ctx));
            Ok(())
        }),
    );
    model.trigger("change", &[]).unwrap();
    assert!(*bound.borrow());

    // the listener's context can also be used with plain `off`
    model.off(EventNames::Every, Selector::Any, Some(&view.as_context()));
    assert!(model.is_empty());
}

#[test]
fn test_partial_stop_listening_keeps_bookkeeping() {
    let model = Emitter::<i32>::new();
    let view = Emitter::<i32>::new();
    let log = Log::default();
    view.listen_to(&model, "a b", recorder(&log, "v"));

    view.stop_listening(Some(&model), "a", Selector::Any);
    assert_eq!(view.listening_count(), 1);
    assert_eq!(model.event_names(), vec!["b"]);

    view.stop_listening(Some(&model), "b", Selector::Any);
    assert_eq!(view.listening_count(), 0);
    assert!(model.is_empty());
}

#[test]
fn test_stop_listening_by_callback() {
    let model = Emitter::<i32>::new();
    let view = Emitter::<i32>::new();
    let log = Log::default();
    let render = recorder(&log, "render");
    let count = recorder(&log, "count");
    view.listen_to(&model, "change", render.clone());
    view.listen_to(&model, "change", count);

    view.stop_listening(Some(&model), EventNames::Every, &render);
    model.trigger("change", &[]).unwrap();
    assert_eq!(entries(&log), vec!["count:change:[]"]);
    assert_eq!(view.listening_count(), 1);
}

#[test]
fn test_listen_to_once() {
    let model = Emitter::<i32>::new();
    let view = Emitter::<i32>::new();
    let log = Log::default();
    view.listen_to_once(&model, "ready", recorder(&log, "view"));
    model.trigger("ready", &[]).unwrap();
    model.trigger("ready", &[]).unwrap();
    assert_eq!(entries(&log), vec!["view:ready:[]"]);
    assert!(model.is_empty());
    assert_eq!(view.listening_count(), 0);
    assert!(view.is_empty());
}

#[test]
fn test_listen_to_once_keeps_source_while_other_registrations_remain() {
    let model = Emitter::<i32>::new();
    let view = Emitter::<i32>::new();
    let log = Log::default();
    view.listen_to_once(&model, "ready", recorder(&log, "once"))
        .listen_to(&model, "change", recorder(&log, "change"));
    model.on("ready", recorder(&log, "other"), None);

    model.trigger("ready change", &[]).unwrap();
    assert_eq!(view.listening_count(), 1);

    view.stop_listening(None, EventNames::Every, Selector::Any);
    assert!(view.is_empty());
    assert_eq!(model.event_names(), vec!["ready"]);
    assert_eq!(
        entries(&log),
        vec!["once:ready:[]", "other:ready:[]", "change:change:[]"]
    );
}

#[test]
fn test_listen_to_once_on_several_names_releases_after_last() {
    let model = Emitter::<i32>::new();
    let view = Emitter::<i32>::new();
    view.listen_to_once(&model, "open close", recorder(&Log::default(), "v"));

    model.trigger("open", &[]).unwrap();
    assert_eq!(view.listening_count(), 1);
    model.trigger("close", &[]).unwrap();
    assert_eq!(view.listening_count(), 0);
}

#[test]
fn test_listen_to_with_map() {
    let model = Emitter::<i32>::new();
    let view = Emitter::<i32>::new();
    let log = Log::default();
    let map: EventNames<i32> = vec![
        ("add", recorder(&log, "add")),
        ("remove", recorder(&log, "remove")),
    ]
    .into();
    view.listen_to(&model, map, None);
    model.trigger("remove add", &[9]).unwrap();
    assert_eq!(entries(&log), vec!["remove:remove:[9]", "add:add:[9]"]);
}

#[test]
fn test_stop_listening_without_subscriptions_is_noop() {
    let model = Emitter::<i32>::new();
    let view = Emitter::<i32>::new();
    model.on("e", recorder(&Log::default(), "x"), None);
    view.stop_listening(Some(&model), EventNames::Every, Selector::Any);
    assert_eq!(model.listener_count("e"), 1);
}
