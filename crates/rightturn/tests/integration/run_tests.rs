//! Run Boundary Tests
//!
//! Verify callback results, handler dispatch and error propagation.

use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use anyhow::anyhow;
use rightturn::{Args, Turn, TurnError, resolve, resolve_service, run, run_with_args};

use crate::test_utils::{Counter, EnglishGreeter, FortyTwo, Greeter, Settings};

/// Register A for I, run a function reading I, get the function's value
#[test]
fn test_end_to_end_run_returns_callback_value() {
    let code = run::<dyn Greeter, EnglishGreeter, _>(|greeter| {
        Ok(i32::try_from(greeter.greeting().len())?)
    })
    .expect("run succeeds");

    assert_eq!(code, 5);
}

#[test]
fn test_run_action_invokes_callback() {
    let mut seen = None;

    Turn::new()
        .run_action::<dyn Greeter, EnglishGreeter, _>(|greeter| {
            seen = Some(greeter.greeting());
            Ok(())
        })
        .expect("run succeeds");

    assert_eq!(seen.as_deref(), Some("hello"));
}

#[test]
fn test_run_with_provider_passes_built_catalog() {
    let code = Turn::new()
        .with_services(|services| {
            services
                .add_transient::<dyn Counter, FortyTwo>()
                .add_singleton(Settings::named("demo"));
        })
        .run_with_provider(|provider| {
            let settings = resolve_service::<Settings>(provider)?;
            assert_eq!(settings.name, "demo");
            Ok(resolve_service::<dyn Counter>(provider)?.count())
        })
        .expect("run succeeds");

    assert_eq!(code, 42);
}

#[test]
fn test_handler_code_replaces_failed_result() {
    let code = Turn::new()
        .with_unhandled_error_code(|_| 7)
        .run::<dyn Greeter, EnglishGreeter, _>(|_| Err(anyhow!("boom")))
        .expect("handler intercepts");

    assert_eq!(code, 7);
}

#[test]
fn test_handler_receives_callback_error() {
    let seen = Rc::new(RefCell::new(None));
    let recorded = Rc::clone(&seen);

    let code = Turn::new()
        .with_unhandled_error_callback(move |err| {
            *recorded.borrow_mut() = Some(err.to_string());
        })
        .run_with_provider(|_| Err(anyhow!("boom")))
        .expect("handler intercepts");

    assert_eq!(code, 0);
    assert_eq!(seen.borrow().as_deref(), Some("boom"));
}

#[test]
fn test_handler_receives_turn() {
    let code = Turn::new()
        .with_args(["app", "a", "b"])
        .with_unhandled_error_handler(|_, turn| {
            turn.directions()
                .try_get::<Args>()
                .map_or(-1, |args| i32::try_from(args.len()).unwrap_or(i32::MAX))
        })
        .run_with_provider(|_| Err(anyhow!("boom")))
        .expect("handler intercepts");

    assert_eq!(code, 3);
}

#[test]
fn test_action_shaped_run_swallows_handled_error() {
    let handled = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&handled);

    let result = Turn::new()
        .with_unhandled_error_turn_callback(move |_, _| *flag.borrow_mut() = true)
        .run_action_with_provider(|_| Err(anyhow!("boom")));

    assert!(result.is_ok());
    assert!(*handled.borrow());
}

/// Without a handler the callback error reaches the caller unchanged
#[test]
fn test_error_propagates_without_handler() {
    let err = Turn::new()
        .run::<dyn Greeter, EnglishGreeter, _>(|_| {
            Err(anyhow::Error::new(std::io::Error::other("disk full")))
        })
        .expect_err("error propagates");

    assert_eq!(err.to_string(), "disk full");
    let callback_error = err.as_execution().expect("execution error");
    assert!(callback_error.downcast_ref::<std::io::Error>().is_some());
}

#[test]
fn test_resolution_failure_propagates_without_handler() {
    let err = Turn::new()
        .run::<dyn Counter, EnglishGreeter, _>(|counter| Ok(counter.count()))
        .expect_err("resolution fails");

    assert!(
        matches!(err, TurnError::Resolution { .. }),
        "unexpected error: {err:?}"
    );
}

#[test]
fn test_provider_failure_goes_to_handler() {
    let code = Turn::new()
        .with_logging(|turn: &mut Turn| -> rightturn::Result<()> {
            turn.configuration()?;
            Ok(())
        })
        .with_unhandled_error_code(|err| if err.is_configuration_required() { 9 } else { 1 })
        .run::<dyn Greeter, EnglishGreeter, _>(|_| Ok(0))
        .expect("handler intercepts");

    assert_eq!(code, 9);
}

#[test]
fn test_panic_goes_to_handler() {
    let seen = Rc::new(RefCell::new(None));
    let recorded = Rc::clone(&seen);

    let code = Turn::new()
        .with_unhandled_error_code(move |err| {
            *recorded.borrow_mut() = Some(err.to_string());
            3
        })
        .run_with_provider(|_| panic!("kaboom"))
        .expect("handler intercepts");

    assert_eq!(code, 3);
    assert_eq!(seen.borrow().as_deref(), Some("Unhandled panic: kaboom"));
}

#[test]
fn test_panic_resumes_without_handler() {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        Turn::new().run_with_provider(|_| panic!("kaboom"))
    }));

    let payload = outcome.expect_err("panic propagates");
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"kaboom"));
}

/// The last registered handler wins
#[test]
fn test_second_handler_replaces_first() {
    let code = Turn::new()
        .with_unhandled_error_code(|_| 1)
        .with_unhandled_error_code(|_| 2)
        .run_with_provider(|_| Err(anyhow!("boom")))
        .expect("handler intercepts");

    assert_eq!(code, 2);
}

#[test]
fn test_run_with_args_publishes_args() {
    let code = run_with_args::<dyn Greeter, EnglishGreeter, _, _, _>(
        ["app", "--loud"],
        |services| {
            services.add_transient::<dyn Counter, FortyTwo>();
        },
        |greeter| Ok(i32::try_from(greeter.greeting().len())?),
    )
    .expect("run succeeds");

    assert_eq!(code, 5);
}

#[test]
fn test_resolve_returns_registered_service() {
    let greeter = resolve::<dyn Greeter, EnglishGreeter>().expect("greeter resolved");

    assert_eq!(greeter.greeting(), "hello");
}

/// Registering the component up front and naming it again in run
#[test]
fn test_run_with_component_already_registered() {
    let code = Turn::new()
        .with_services(|services| {
            services.add_transient::<dyn Greeter, EnglishGreeter>();
        })
        .run::<dyn Greeter, EnglishGreeter, _>(|greeter| {
            Ok(i32::try_from(greeter.greeting().len())?)
        })
        .expect("run succeeds");

    assert_eq!(code, 5);
}

#[test]
fn test_same_turn_runs_twice() {
    let mut turn = Turn::new().with_unhandled_error_code(|_| 99);

    let first = turn
        .run::<dyn Counter, FortyTwo, _>(|counter| Ok(counter.count()))
        .expect("first run");
    let second = turn
        .run::<dyn Counter, FortyTwo, _>(|counter| Ok(counter.count() + 1))
        .expect("second run");

    assert_eq!((first, second), (42, 43));
}
