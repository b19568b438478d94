use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use veer::middleware::{middleware_fn, Flow};
use veer::{
    DispatchOptions, DispatchOutcome, Dispatcher, Handler, MemoryLocation, TracingMiddleware,
    STATECHANGE,
};

use tracing_util::TestTracing;

type Trace = Rc<RefCell<Vec<&'static str>>>;

fn traced_dispatcher(trace: &Trace) -> Dispatcher {
    let mut dispatcher = Dispatcher::new(Rc::new(MemoryLocation::new("/")));
    let sink = trace.clone();
    dispatcher
        .register(
            "/route",
            Handler::callback(move |_, _| sink.borrow_mut().push("handler")),
        )
        .unwrap();
    dispatcher
}

#[test]
fn middleware_runs_in_registration_order_before_handler() {
    let trace: Trace = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = traced_dispatcher(&trace);

    let first = trace.clone();
    let second = trace.clone();
    dispatcher
        .add_middleware(middleware_fn(move |_| {
            first.borrow_mut().push("m1");
            Flow::Continue
        }))
        .add_middleware(middleware_fn(move |_| {
            second.borrow_mut().push("m2");
            Flow::Continue
        }));

    let outcome = dispatcher.dispatch(DispatchOptions::default().url("/route"));
    assert_eq!(outcome, DispatchOutcome::Handled);
    assert_eq!(trace.borrow().as_slice(), &["m1", "m2", "handler"]);
}

#[test]
fn halting_middleware_stops_pipeline_and_handler() {
    let trace: Trace = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = traced_dispatcher(&trace);

    let first = trace.clone();
    let second = trace.clone();
    dispatcher
        .add_middleware(middleware_fn(move |_| {
            first.borrow_mut().push("m1");
            Flow::Halt
        }))
        .add_middleware(middleware_fn(move |_| {
            second.borrow_mut().push("m2");
            Flow::Continue
        }));

    let outcome = dispatcher.dispatch(DispatchOptions::default().url("/route"));
    assert_eq!(outcome, DispatchOutcome::Halted);
    assert_eq!(trace.borrow().as_slice(), &["m1"]);
}

#[test]
fn halt_does_not_suppress_statechange() {
    let trace: Trace = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = traced_dispatcher(&trace);
    dispatcher.add_middleware(middleware_fn(|_| Flow::Halt));

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    dispatcher.on(STATECHANGE, move |payload| {
        sink.borrow_mut().push(payload.map(str::to_string));
    });

    dispatcher.dispatch(DispatchOptions::default().url("/route"));
    assert_eq!(events.borrow().as_slice(), &[Some("/route".to_string())]);
    assert!(trace.borrow().is_empty());
}

#[test]
fn no_middleware_invokes_handler_directly() {
    let trace: Trace = Rc::new(RefCell::new(Vec::new()));
    let dispatcher = traced_dispatcher(&trace);

    dispatcher.dispatch(DispatchOptions::default().url("/route"));
    assert_eq!(trace.borrow().as_slice(), &["handler"]);
}

#[test]
fn middleware_mutations_are_visible_downstream() {
    let seen = Rc::new(RefCell::new(None));
    let mut dispatcher = Dispatcher::new(Rc::new(MemoryLocation::new("/")));
    let sink = seen.clone();
    dispatcher
        .register(
            "/route",
            Handler::callback(move |_, ctx| {
                *sink.borrow_mut() = ctx.param("injected").map(str::to_string);
            }),
        )
        .unwrap();
    dispatcher.add_middleware(middleware_fn(|ctx| {
        ctx.params
            .push((Arc::from("injected"), Some("yes".to_string())));
        Flow::Continue
    }));

    dispatcher.dispatch(DispatchOptions::default().url("/route"));
    assert_eq!(seen.borrow().as_deref(), Some("yes"));
}

#[test]
fn tracing_middleware_continues() {
    let _tracing = TestTracing::init();
    let trace: Trace = Rc::new(RefCell::new(Vec::new()));
    let mut dispatcher = traced_dispatcher(&trace);
    dispatcher.add_middleware(Rc::new(TracingMiddleware));

    let outcome = dispatcher.dispatch(DispatchOptions::default().url("/route"));
    assert_eq!(outcome, DispatchOutcome::Handled);
    assert_eq!(trace.borrow().as_slice(), &["handler"]);
}
