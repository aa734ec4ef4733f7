//! How caller arguments reach script callbacks.

mod common;

use common::quiet_registry;
use hookline::{
    ArgRef, ArgumentList, HostTypeId, MAX_HOST_ARGUMENTS, ParamFlags, Slot, TypeClass,
    testing::{MockFunction, MockRuntime, RecordedValue, addr_of},
};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct Monster {
    hp: i32,
}

#[test]
fn test_object_handle_is_passed_by_reference() {
    let seen = Arc::new(Mutex::new(None));
    let sink = seen.clone();
    let runtime = MockRuntime::new();
    let on_spawn = runtime.define(MockFunction::new("world", "on_spawn").params(1).inspect(
        move |slots| {
            if let [Slot::Object(obj)] = slots {
                *sink.lock().unwrap() = obj.downcast_ref::<Monster>().map(|m| m.hp);
            }
        },
    ));
    let mut registry = quiet_registry(&runtime);
    registry.subscribe_wildcard("spawn", "world", "on_spawn").unwrap();

    let monster = Monster { hp: 40 };
    registry.dispatch_wildcard_only("spawn", &[ArgRef::handle(&monster)]);

    assert_eq!(
        on_spawn.last_call().unwrap().args,
        vec![RecordedValue::Object {
            addr: addr_of(&monster)
        }]
    );
    assert_eq!(*seen.lock().unwrap(), Some(40));
}

#[test]
fn test_reference_parameters_receive_caller_address() {
    let runtime = MockRuntime::new();
    let on_heal = runtime.define(
        MockFunction::new("world", "on_heal")
            .param(ParamFlags::INOUT_REF)
            .param(ParamFlags::CONST)
            .param(ParamFlags::empty()),
    );
    let mut registry = quiet_registry(&runtime);
    registry.subscribe_wildcard("heal", "world", "on_heal").unwrap();

    let amount = 15_i32;
    let bonus = 2_u16;
    let target = Monster { hp: 1 };
    registry.dispatch_wildcard_only(
        "heal",
        &[
            ArgRef::from(&amount),
            ArgRef::from(&bonus),
            ArgRef::const_handle(&target),
        ],
    );

    assert_eq!(
        on_heal.last_call().unwrap().args,
        vec![
            RecordedValue::Address {
                class: TypeClass::SignedInteger(hookline::IntWidth::W32),
                addr: addr_of(&amount),
            },
            RecordedValue::UInt(2),
            RecordedValue::Address {
                class: TypeClass::HandleToConst,
                addr: addr_of(&target),
            },
        ]
    );
}

#[test]
fn test_generic_value_keeps_host_type_id() {
    let runtime = MockRuntime::new();
    let on_event = runtime.define(MockFunction::new("world", "on_event").params(1));
    let mut registry = quiet_registry(&runtime);
    registry.subscribe_wildcard("custom", "world", "on_event").unwrap();

    let payload = (1_u8, 'x');
    registry.dispatch_wildcard_only("custom", &[ArgRef::generic(&payload, HostTypeId(42))]);

    assert_eq!(
        on_event.last_call().unwrap().args,
        vec![RecordedValue::Var {
            addr: addr_of(&payload),
            type_id: HostTypeId(42),
        }]
    );
}

#[test]
fn test_wide_integers_are_narrowed() {
    let runtime = MockRuntime::new();
    let on_tick = runtime.define(MockFunction::new("world", "on_tick").params(2));
    let mut registry = quiet_registry(&runtime);
    registry.subscribe_wildcard("tick", "world", "on_tick").unwrap();

    let signed = -5_i64;
    let unsigned = (1_u64 << 32) + 7;
    registry.dispatch_wildcard_only("tick", hookline::args![&signed, &unsigned]);

    assert_eq!(
        on_tick.last_call().unwrap().args,
        vec![RecordedValue::Int(-5), RecordedValue::UInt(7)]
    );
}

#[test]
fn test_bounded_list_dispatches_like_a_slice() {
    let runtime = MockRuntime::new();
    let on_tick = runtime.define(MockFunction::new("world", "on_tick").params(2));
    let mut registry = hookline::Registry::builder(runtime.clone())
        .log_subscriptions(false)
        .argument_limit(Some(MAX_HOST_ARGUMENTS))
        .build();
    registry.subscribe_wildcard("tick", "world", "on_tick").unwrap();

    let (a, b) = (true, 0.25_f32);
    let list = ArgumentList::new().with(&a).unwrap().with(&b).unwrap();
    registry.dispatch_wildcard_only("tick", &list);

    assert_eq!(
        on_tick.last_call().unwrap().args,
        vec![RecordedValue::Byte(1), RecordedValue::Float(0.25)]
    );
}
