//! Group runner: passthrough, conditional skipping, scope closure on error.

mod common;

use std::cell::Cell;

use common::{Event, RecordingBridge};
use vuscript::{fail, CheckSet, Dsl, ErrorKind, ScriptError, TagSet, Value};

#[cfg(test)]
mod passthrough_tests {
    use super::*;

    #[test]
    fn test_group_returns_body_value() {
        let bridge = RecordingBridge::new();
        let dsl = Dsl::new(&bridge);
        let v = dsl.group("answer", || Ok(42)).expect("group runs");
        assert_eq!(v, 42);
        assert_eq!(
            bridge.events(),
            [Event::Open("answer".into()), Event::Close("answer".into())]
        );
    }

    #[test]
    fn test_checks_inside_groups_are_bracketed_by_scopes() {
        let bridge = RecordingBridge::new();
        let dsl = Dsl::new(&bridge);
        let checks = CheckSet::new().with("ok", |_: &Value| true);
        dsl.group("outer", || {
            dsl.group("inner", || {
                dsl.check(&Value::Nil, &checks, &TagSet::new());
                Ok(())
            })
        })
        .expect("groups run");

        let events = bridge.events();
        assert_eq!(events[0], Event::Open("outer".into()));
        assert_eq!(events[1], Event::Open("inner".into()));
        assert!(matches!(&events[2], Event::Check { name, passed: true, .. } if name == "ok"));
        assert_eq!(events[3], Event::Close("inner".into()));
        assert_eq!(events[4], Event::Close("outer".into()));
    }

    #[test]
    fn test_empty_name_is_a_contract_error() {
        let bridge = RecordingBridge::new();
        let dsl = Dsl::new(&bridge);
        let err = dsl.group("", || Ok(())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Contract);
        assert_eq!(bridge.opened(), 0);
    }
}

#[cfg(test)]
mod condition_tests {
    use super::*;

    #[test]
    fn test_falsy_condition_skips_without_touching_bridge() {
        let bridge = RecordingBridge::new();
        let dsl = Dsl::new(&bridge);
        let runs = Cell::new(0);
        let v = dsl
            .group_if("skipped", false, || {
                runs.set(runs.get() + 1);
                Ok(42)
            })
            .expect("skip is not an error");
        assert_eq!(v, None);
        assert_eq!(runs.get(), 0);
        assert!(bridge.events().is_empty());
    }

    #[test]
    fn test_truthy_value_condition_runs() {
        let bridge = RecordingBridge::new();
        let dsl = Dsl::new(&bridge);
        let v = dsl
            .group_if("flagged", Value::from("yes"), || Ok("done"))
            .expect("group runs");
        assert_eq!(v, Some("done"));
        assert_eq!(bridge.opened(), 1);

        let skipped = dsl
            .group_if("zero", Value::from(0), || Ok("never"))
            .expect("skip is not an error");
        assert_eq!(skipped, None);
        assert_eq!(bridge.opened(), 1);
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_body_error_closes_scope_and_propagates() {
        let bridge = RecordingBridge::new();
        let dsl = Dsl::new(&bridge);
        let err = dsl
            .group("broken", || -> Result<(), ScriptError> {
                dsl.group("nested", || fail("boom"))
            })
            .unwrap_err();
        assert_eq!(err, ScriptError::error("boom"));
        assert_eq!(bridge.opened(), 2);
        assert_eq!(bridge.closed(), 2);
        assert_eq!(
            bridge.events(),
            [
                Event::Open("broken".into()),
                Event::Open("nested".into()),
                Event::Close("nested".into()),
                Event::Close("broken".into()),
            ]
        );
    }

    #[test]
    fn test_group_does_not_taint_on_error() {
        let bridge = RecordingBridge::new();
        let dsl = Dsl::new(&bridge);
        let _ = dsl.group("broken", || fail::<()>(Value::from(1)));
        assert!(!bridge.is_tainted());
    }
}
