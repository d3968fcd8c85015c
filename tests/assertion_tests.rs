//! `fail`, `assert`, `sleep` and `taint` through the typed surface.

mod common;

use common::{Event, RecordingBridge};
use predicates::prelude::*;
use vuscript::{assert, assert_msg, fail, Dsl, ErrorKind, ScriptError, Value};

#[cfg(test)]
mod assert_tests {
    use super::*;

    #[test]
    fn test_truthy_assertion_returns() {
        assert!(assert(true).is_ok());
        assert!(assert(Value::from("non-empty")).is_ok());
    }

    #[test]
    fn test_default_message() {
        let err = assert(false).unwrap_err();
        assert_eq!(err.to_string(), "assertion failed");
        assert_eq!(err.kind(), ErrorKind::Script);
    }

    #[test]
    fn test_custom_message() {
        let err = assert_msg(Value::Nil, "custom").unwrap_err();
        assert_eq!(err.message(), "custom");
        assert!(predicate::str::starts_with("custom").eval(&err.to_string()));
    }

    #[test]
    fn test_assert_touches_no_bridge() {
        let bridge = RecordingBridge::new();
        let _dsl = Dsl::new(&bridge);
        let _ = assert(false);
        let _ = fail::<()>("x");
        assert!(bridge.events().is_empty());
    }
}

#[cfg(test)]
mod fail_tests {
    use super::*;

    #[test]
    fn test_fail_raises_value_unchanged() {
        let thrown = Value::map([("code", Value::from(503))]);
        let err = fail::<()>(thrown.clone()).unwrap_err();
        assert_eq!(err, ScriptError::Thrown { value: thrown });
    }

    #[test]
    fn test_fail_in_expression_position() {
        let lookup = |id: u32| -> Result<&'static str, ScriptError> {
            [(1, "alice")]
                .iter()
                .find(|(k, _)| *k == id)
                .map(|(_, v)| *v)
                .map_or_else(|| fail(format!("no user {id}")), Ok)
        };
        assert_eq!(lookup(1), Ok("alice"));
        let err = lookup(7).unwrap_err();
        assert!(predicate::str::contains("no user 7").eval(&err.to_string()));
    }
}

#[cfg(test)]
mod primitive_tests {
    use super::*;

    #[test]
    fn test_sleep_delegates_as_float_seconds() {
        let bridge = RecordingBridge::new();
        let dsl = Dsl::new(&bridge);
        dsl.sleep(2).expect("valid duration");
        dsl.sleep(0.25).expect("valid duration");
        dsl.sleep(0).expect("zero is allowed");
        assert_eq!(
            bridge.events(),
            [Event::Sleep(2.0), Event::Sleep(0.25), Event::Sleep(0.0)]
        );
    }

    #[test]
    fn test_sleep_rejects_nonsense_durations() {
        let bridge = RecordingBridge::new();
        let dsl = Dsl::new(&bridge);
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let err = dsl.sleep(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Contract);
        }
        assert!(bridge.events().is_empty());
    }

    #[test]
    fn test_sleep_rejects_durations_too_large_to_represent() {
        let bridge = RecordingBridge::new();
        let dsl = Dsl::new(&bridge);
        let err = dsl.sleep(1e20).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Contract);
        assert!(predicate::str::starts_with("sleep: invalid duration").eval(&err.to_string()));
        assert!(bridge.events().is_empty());
        dsl.sleep(86_400).expect("a day is representable");
        assert_eq!(bridge.events(), [Event::Sleep(86_400.0)]);
    }

    #[test]
    fn test_taint_is_idempotent() {
        let bridge = RecordingBridge::new();
        let dsl = Dsl::new(&bridge);
        dsl.taint();
        dsl.taint();
        assert!(bridge.is_tainted());
        assert_eq!(bridge.events(), [Event::Taint, Event::Taint]);
    }
}
