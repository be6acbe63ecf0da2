//! Scripted walk-throughs of each composition style.
//!
//! A scenario builds its objects from the [`DemoConfig`], performs a fixed
//! sequence of calls, and records every call with its outcome in a
//! [`Report`]. The engine itself prints nothing; rendering is up to the
//! caller.

use bundle_compose::{compose_list, compose_pairwise, compose_two, compose_with_clashes};
use bundle_delegate::compose_by_delegation;
use bundle_dispatch::{call_chain, dispatch, dispatch_at, next, ChainStep};
use bundle_domain::{attribute_source_one, attribute_source_two, bank_account, counter, person};
use bundle_object::{MethodResult, Object, Result};
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::DemoConfig;
use crate::objects::DemoObject;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Scenario {
    /// List composition and the two fold directions
    Compose,
    /// Left precedence of the override compositor
    Precedence,
    /// State shared between a composite and its source
    Sharing,
    /// Clash chains, indexed dispatch, and call-next
    Clash,
    /// Delegating composition
    Delegate,
    /// Every scenario above, in order
    All,
}

impl Scenario {
    /// The individual scenarios `All` expands to.
    pub const EACH: [Scenario; 5] = [
        Scenario::Compose,
        Scenario::Precedence,
        Scenario::Sharing,
        Scenario::Clash,
        Scenario::Delegate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Compose => "compose",
            Self::Precedence => "precedence",
            Self::Sharing => "sharing",
            Self::Clash => "clash",
            Self::Delegate => "delegate",
            Self::All => "all",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::Compose => "person + employer + account folded into one employee",
            Self::Precedence => "the primary object's method always wins",
            Self::Sharing => "a mutator called through a composite updates the source",
            Self::Clash => "colliding methods kept as a chain and reached by index",
            Self::Delegate => "calls forwarded to the first delegate that owns the name",
            Self::All => "every scenario",
        }
    }

    /// Run the scenario; `All` yields one report per scenario.
    pub fn run(self, config: &DemoConfig) -> Vec<Report> {
        match self {
            Self::All => Self::EACH.iter().flat_map(|s| s.run(config)).collect(),
            Self::Compose => vec![compose(config)],
            Self::Precedence => vec![precedence(config)],
            Self::Sharing => vec![sharing(config)],
            Self::Clash => vec![clash()],
            Self::Delegate => vec![delegate()],
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// What a single recorded call produced.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Value(Value),
    /// Indexed dispatch ran past the end of the chain.
    End,
    Error(String),
}

#[derive(Clone, Debug, Serialize)]
pub struct Step {
    pub call: String,
    pub outcome: Outcome,
}

#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub scenario: &'static str,
    pub summary: &'static str,
    pub steps: Vec<Step>,
}

impl Report {
    fn new(scenario: Scenario) -> Self {
        Self {
            scenario: scenario.name(),
            summary: scenario.summary(),
            steps: Vec::new(),
        }
    }

    fn value(&mut self, call: impl Into<String>, result: MethodResult) {
        let outcome = match result {
            Ok(value) => Outcome::Value(value),
            Err(err) => Outcome::Error(err.to_string()),
        };
        self.steps.push(Step {
            call: call.into(),
            outcome,
        });
    }

    fn indexed(&mut self, call: impl Into<String>, result: Result<ChainStep>) {
        let outcome = match result {
            Ok(ChainStep::Value(value)) => Outcome::Value(value),
            Ok(ChainStep::End) => Outcome::End,
            Err(err) => Outcome::Error(err.to_string()),
        };
        self.steps.push(Step {
            call: call.into(),
            outcome,
        });
    }

    fn note(&mut self, call: impl Into<String>, value: Value) {
        self.value(call, Ok(value));
    }

    /// Outcome of the first step recorded under `call`.
    pub fn outcome_of(&self, call: &str) -> Option<&Outcome> {
        self.steps.iter().find(|s| s.call == call).map(|s| &s.outcome)
    }
}

fn names(obj: &Object) -> Value {
    json!(obj.method_names())
}

fn attributes(obj: &Object) -> MethodResult {
    obj.attributes().map(|state| json!(state))
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

fn compose(config: &DemoConfig) -> Report {
    let mut report = Report::new(Scenario::Compose);
    let parts = [
        DemoObject::Person.build(config),
        DemoObject::Employer.build(config),
        DemoObject::Account.build(config),
    ];
    let employee = compose_list(&parts);
    let alternate = compose_pairwise(&parts);

    report.note("methodNames(employee)", names(&employee));
    report.note(
        "methodNames(employee) == methodNames(pairwise)",
        json!(employee.method_names() == alternate.method_names()),
    );
    report.value("employee.getName()", dispatch(&employee, "getName", &[]));
    report.value("employee.describe()", dispatch(&employee, "describe", &[]));
    report.value("employee.deposit(50)", dispatch(&employee, "deposit", &[json!(50)]));
    report.value("employee.getBalance()", dispatch(&employee, "getBalance", &[]));
    report.value("attributes(employee)", attributes(&employee));
    report.note("methodNames(composeList([]))", names(&compose_list(&[])));
    report
}

fn precedence(config: &DemoConfig) -> Report {
    let mut report = Report::new(Scenario::Precedence);
    let low = counter(config.counter_start);
    let high = counter(config.counter_start.saturating_add(100));

    report.value(
        "composeTwo(low, high).getCount()",
        dispatch(&compose_two(&low, &high), "getCount", &[]),
    );
    report.value(
        "composeTwo(high, low).getCount()",
        dispatch(&compose_two(&high, &low), "getCount", &[]),
    );
    report.value(
        "composeList([low, low]).getCount()",
        dispatch(&compose_list(&[low.clone(), low]), "getCount", &[]),
    );
    report
}

fn sharing(config: &DemoConfig) -> Report {
    let mut report = Report::new(Scenario::Sharing);
    let account = bank_account(&config.account.owner, config.account.opening_balance);
    let holder = person(&config.person.name, config.person.age);
    let first = compose_two(&holder, &account);
    let second = compose_list(&[account.clone(), holder]);

    report.value("account.getBalance()", dispatch(&account, "getBalance", &[]));
    report.value("first.deposit(25)", dispatch(&first, "deposit", &[json!(25)]));
    report.value("account.getBalance()", dispatch(&account, "getBalance", &[]));
    report.value("second.getBalance()", dispatch(&second, "getBalance", &[]));
    report.value(
        "second.withdraw(1000000)",
        dispatch(&second, "withdraw", &[json!(1_000_000)]),
    );
    report
}

fn clash() -> Report {
    let mut report = Report::new(Scenario::Clash);
    let c = compose_with_clashes(&[attribute_source_one(), attribute_source_two()]);

    report.value("C.getAttribute1()", dispatch(&c, "getAttribute1", &[]));
    report.indexed("C.getAttribute1()@2", dispatch_at(&c, "getAttribute1", &[], 2));
    report.indexed("C.getAttribute1()@3", dispatch_at(&c, "getAttribute1", &[], 3));
    report.value("C.getAttribute2()", dispatch(&c, "getAttribute2", &[]));
    report.indexed("next(C.getAttribute1, 1)", next(&c, "getAttribute1", &[], 1));
    report.value(
        "chain(C.getAttribute1)",
        call_chain(&c, "getAttribute1", &[]).map(Value::Array),
    );
    report.value("C.getAttribute3()", dispatch(&c, "getAttribute3", &[]));
    report
}

fn delegate() -> Report {
    let mut report = Report::new(Scenario::Delegate);
    let d = compose_by_delegation(&[attribute_source_one(), attribute_source_two()]);

    report.note("names(D)", json!(d.names()));
    report.value(
        "D.getAttribute1(\"ignored\")",
        dispatch(d.as_object(), "getAttribute1", &[json!("ignored")]),
    );
    report.value("D.getAttribute2()", dispatch(d.as_object(), "getAttribute2", &[]));
    report.note("owner(getAttribute2)", json!(d.owner_of("getAttribute2")));
    report.value("forward(D, getAttribute3)", d.forward("getAttribute3"));
    report
}
