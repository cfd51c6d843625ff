use std::sync::atomic::{AtomicUsize, Ordering};

use component_dispatch::{
    capabilities_of, satisfies, Capability, CapabilityProbe, CapabilitySet, Component,
    ComponentInfo, DispatchCache, DispatchEntry, Renderable,
};

mod common;
use common::{sprite, Hidden, LogicOnly, Recorder, Sprite, Tally};

static PROBED_PROBES: AtomicUsize = AtomicUsize::new(0);

/// Renderable component whose probe counts its own evaluations.
#[derive(Clone, Copy)]
struct Probed(u8);

impl Renderable for Probed {
    fn layer(&self) -> u8 { self.0 }
}

impl Component for Probed {
    fn probe<P: CapabilityProbe<Self>>(probe: P) -> P::Output {
        PROBED_PROBES.fetch_add(1, Ordering::SeqCst);
        probe.renderable()
    }
}

#[test]
fn predicate_reflects_declarations() {
    assert!(satisfies::<Sprite>(Capability::Renderable));
    assert!(satisfies::<Hidden>(Capability::Renderable));
    assert!(!satisfies::<LogicOnly>(Capability::Renderable));
}

#[test]
fn predicate_is_consistent() {
    for _ in 0..100 {
        assert_eq!(capabilities_of::<Sprite>(), capabilities_of::<Sprite>());
        assert!(capabilities_of::<LogicOnly>().is_empty());
    }
}

#[test]
fn probe_runs_once_per_cached_type() {
    let cache = DispatchCache::new();
    let mut owner = Tally::default();

    for i in 0..1000u32 {
        cache.add(&mut owner, &Probed((i % 4) as u8)).unwrap();
    }

    assert_eq!(PROBED_PROBES.load(Ordering::SeqCst), 1);
    assert_eq!(owner.rendered, 1000);
    assert!(cache.entry_info::<Tally, Probed>().unwrap().component.capabilities.contains(Capability::Renderable));
}

#[test]
fn capability_set_operations() {
    let mut set = CapabilitySet::EMPTY;
    assert!(set.is_empty());
    assert_eq!(set.iter().count(), 0);
    assert_eq!(set.to_string(), "{}");

    set.insert(Capability::Renderable);
    assert!(set.contains(Capability::Renderable));
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![Capability::Renderable]);
    assert_eq!(set.to_string(), "{renderable}");
    assert_eq!(set, CapabilitySet::EMPTY.with(Capability::Renderable));
}

#[test]
fn component_info_records_layout_and_capabilities() {
    let info = ComponentInfo::of::<Sprite>();
    assert!(info.matches_type::<Sprite>());
    assert!(!info.matches_type::<LogicOnly>());
    assert_eq!(info.size, std::mem::size_of::<Sprite>());
    assert_eq!(info.align, std::mem::align_of::<Sprite>());
    assert!(info.name.ends_with("Sprite"));
    assert!(info.to_string().contains("capabilities: {renderable}"));

    let logic = ComponentInfo::of::<LogicOnly>();
    assert!(logic.capabilities.is_empty());
}

#[test]
fn synthesized_entries_follow_the_predicate() {
    let renderable = DispatchEntry::<Recorder, Sprite>::synthesize();
    let plain = DispatchEntry::<Recorder, LogicOnly>::synthesize();

    assert!(renderable.is_renderable());
    assert_eq!(renderable.capabilities(), capabilities_of::<Sprite>());
    assert!(!plain.is_renderable());

    let mut owner = Recorder::default();
    renderable.invoke(&mut owner, &sprite(1)).unwrap();
    plain.invoke(&mut owner, &LogicOnly { ticks: 0 }).unwrap();
    assert_eq!(owner.all_count(), 2);
    assert_eq!(owner.renderable_count(), 1);
}
