//! Integration tests for `#[derive(Entity)]`.

#![cfg(feature = "macros")]

mod common;

use common::{quiet_registry, runtime_with};
use hookline::{ArgRef, Entity, testing::RecordedValue};

#[derive(Entity)]
#[entity(suffix = "@Item")]
struct Item {
    id: u32,
}

#[derive(Entity)]
struct Critter {
    name: &'static str,
    #[entity(id)]
    serial: u16,
}

#[derive(Entity)]
#[entity(suffix = "@Map")]
struct Map(#[entity(id)] u8);

#[test]
fn test_derived_suffix_and_index() {
    let sword = Item { id: 12 };
    assert_eq!(Item::SUFFIX, "@Item");
    assert_eq!(sword.hook_index(), 12);
    assert_eq!(Item::scoped_tag("use"), "use@Item");

    let wolf = Critter {
        name: "wolf",
        serial: 300,
    };
    assert_eq!(Critter::SUFFIX, "@Critter");
    assert_eq!(wolf.hook_index(), 300);
    assert_eq!(wolf.name, "wolf");

    assert_eq!(Map(4).hook_index(), 4);
    assert_eq!(Map::scoped_tag("enter"), "enter@Map");
}

#[test]
fn test_entity_hooks_through_registry() {
    let runtime = runtime_with(&[("items", "on_sword_used", 1), ("items", "on_any_used", 1)]);
    let mut registry = quiet_registry(&runtime);

    let sword = Item { id: 12 };
    let shield = Item { id: 13 };
    registry
        .entity_hook(&sword, "use", "items", "on_sword_used")
        .unwrap();
    registry
        .entity_hook_all::<Item>("use", "items", "on_any_used")
        .unwrap();

    let user = 5_u32;
    registry.entity_dispatch(&sword, "use", &[ArgRef::from(&user)]);
    assert_eq!(
        runtime.journal(),
        vec!["on_sword_used@items", "on_any_used@items"]
    );

    runtime.clear_journal();
    registry.entity_dispatch(&shield, "use", &[ArgRef::from(&user)]);
    assert_eq!(runtime.journal(), vec!["on_any_used@items"]);

    // Plain tags are a different namespace.
    runtime.clear_journal();
    registry.dispatch_by_index("use", 12, &[ArgRef::from(&user)]);
    assert!(runtime.journal().is_empty());
}

#[test]
fn test_entity_receives_itself_by_reference() {
    let runtime = hookline::testing::MockRuntime::new();
    let on_enter = runtime.define(hookline::testing::MockFunction::new("maps", "on_enter").params(1));
    let mut registry = quiet_registry(&runtime);

    let town = Map(2);
    registry.entity_hook(&town, "enter", "maps", "on_enter").unwrap();
    registry.entity_dispatch(&town, "enter", &[ArgRef::handle(&town)]);

    assert_eq!(
        on_enter.last_call().unwrap().args,
        vec![RecordedValue::Object {
            addr: hookline::testing::addr_of(&town)
        }]
    );
}
