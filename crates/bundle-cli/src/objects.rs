use bundle_compose::{compose_list, compose_with_clashes};
use bundle_delegate::compose_by_delegation;
use bundle_domain::{
    attribute_source_one, attribute_source_two, bank_account, counter, employer, person,
};
use bundle_object::Object;

use crate::config::DemoConfig;

/// Objects the CLI can build, plain or composed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum DemoObject {
    Counter,
    Account,
    Person,
    Employer,
    /// Person, employer, and account composed in that precedence order
    Employee,
    /// Two fixed-value objects composed with clashes kept
    Clash,
    /// The same two objects composed by delegation
    Delegate,
}

impl DemoObject {
    pub fn build(self, config: &DemoConfig) -> Object {
        match self {
            Self::Counter => counter(config.counter_start),
            Self::Account => bank_account(&config.account.owner, config.account.opening_balance),
            Self::Person => person(&config.person.name, config.person.age),
            Self::Employer => employer(&config.employer.company, config.employer.salary),
            Self::Employee => compose_list(&[
                Self::Person.build(config),
                Self::Employer.build(config),
                Self::Account.build(config),
            ]),
            Self::Clash => compose_with_clashes(&[attribute_source_one(), attribute_source_two()]),
            Self::Delegate => {
                compose_by_delegation(&[attribute_source_one(), attribute_source_two()])
                    .into_object()
            }
        }
    }
}
