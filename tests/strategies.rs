use component_dispatch::{Dispatch, DispatchCache, LocalDispatchCache, ProbeEachCall};

mod common;
use common::{sprite, Call, FailIn, Faulty, Hidden, LogicOnly, Recorder};

fn drive<D: Dispatch>(dispatcher: &D) -> Vec<Call> {
    let mut owner = Recorder::default();
    for i in 0..6u8 {
        match i % 3 {
            0 => dispatcher.dispatch(&mut owner, &sprite(i)).unwrap(),
            1 => dispatcher.dispatch(&mut owner, &LogicOnly { ticks: i as u32 }).unwrap(),
            _ => dispatcher.dispatch(&mut owner, &Hidden { layer: i }).unwrap(),
        }
    }
    owner.calls
}

#[test]
fn strategies_are_observably_identical() {
    let shared = DispatchCache::new();
    let local = LocalDispatchCache::new();

    let expected = drive(&shared);
    assert_eq!(drive(&local), expected);
    assert_eq!(drive(&ProbeEachCall), expected);
    assert_eq!(expected.len(), 10);
}

#[test]
fn local_cache_synthesizes_once_per_type() {
    let local = LocalDispatchCache::new();
    assert!(local.is_empty());

    for _ in 0..3 {
        drive(&local);
    }

    assert_eq!(local.len(), 3);
    assert_eq!(local.syntheses(), 3);
}

#[test]
fn strategies_propagate_routine_errors() {
    let mut owner = Faulty::new(FailIn::Renderable);
    assert!(ProbeEachCall.dispatch(&mut owner, &sprite(0)).is_err());
    assert!(LocalDispatchCache::new().dispatch(&mut owner, &sprite(0)).is_err());
    assert_eq!(owner.calls.len(), 4);
}

#[test]
fn strategy_names_are_distinct() {
    let names = [
        DispatchCache::new().name(),
        LocalDispatchCache::new().name(),
        ProbeEachCall.name(),
    ];
    assert_eq!(names, ["shared_cache", "local_cache", "probe_each_call"]);
}
