use std::cell::RefCell;
use std::rc::Rc;

use bundle_object::{CallError, Method, Object, Result, State};
use serde_json::{json, Value};

use crate::args;

#[derive(Debug)]
struct AccountState {
    owner: String,
    balance: f64,
    history: Vec<Value>,
}

impl AccountState {
    fn withdraw(&mut self, amount: f64) -> Result<f64> {
        if amount > self.balance {
            return Err(CallError::Rejected(format!(
                "insufficient funds: balance {}, requested {amount}",
                self.balance
            )));
        }
        self.balance -= amount;
        Ok(self.balance)
    }
}

/// A bank account owned by `owner` with an opening balance.
///
/// `deposit`, `withdraw` and `transfer` return the new balance. Overdrafts
/// are rejected with [`CallError::Rejected`] and leave the balance untouched.
pub fn bank_account(owner: &str, opening: f64) -> Object {
    let state = Rc::new(RefCell::new(AccountState {
        owner: owner.to_string(),
        balance: opening,
        history: Vec::new(),
    }));

    Object::builder()
        .method("deposit", {
            let state = Rc::clone(&state);
            Method::unary(move |amount: Value| {
                let amount = args::positive_amount("deposit", &amount)?;
                let mut s = state.borrow_mut();
                s.balance += amount;
                s.history.push(json!({ "kind": "deposit", "amount": amount }));
                Ok(json!(s.balance))
            })
        })
        .method("withdraw", {
            let state = Rc::clone(&state);
            Method::unary(move |amount: Value| {
                let amount = args::positive_amount("withdraw", &amount)?;
                let mut s = state.borrow_mut();
                let balance = s.withdraw(amount)?;
                s.history.push(json!({ "kind": "withdraw", "amount": amount }));
                Ok(json!(balance))
            })
        })
        .method("transfer", {
            let state = Rc::clone(&state);
            Method::binary(move |amount: Value, memo: Value| {
                let amount = args::positive_amount("transfer", &amount)?;
                let memo = memo.as_str().unwrap_or_default().to_string();
                let mut s = state.borrow_mut();
                let balance = s.withdraw(amount)?;
                s.history
                    .push(json!({ "kind": "transfer", "amount": amount, "memo": memo }));
                Ok(json!(balance))
            })
        })
        .method("getBalance", {
            let state = Rc::clone(&state);
            Method::nullary(move || Ok(json!(state.borrow().balance)))
        })
        .method("getOwner", {
            let state = Rc::clone(&state);
            Method::nullary(move || Ok(json!(state.borrow().owner)))
        })
        .method("history", {
            let state = Rc::clone(&state);
            Method::nullary(move || Ok(Value::Array(state.borrow().history.clone())))
        })
        .attributes(move || {
            let s = state.borrow();
            State::from([
                ("owner".to_string(), json!(s.owner)),
                ("balance".to_string(), json!(s.balance)),
                ("transactions".to_string(), json!(s.history.len())),
            ])
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundle_object::{CallArgs, MethodResult};

    fn call(obj: &Object, name: &str, args: CallArgs) -> MethodResult {
        obj.entry(name).unwrap().head().call(args)
    }

    #[test]
    fn deposit_and_withdraw() {
        let acct = bank_account("ada", 100.0);
        assert_eq!(
            call(&acct, "deposit", CallArgs::One(json!(50))).unwrap(),
            json!(150.0)
        );
        assert_eq!(
            call(&acct, "withdraw", CallArgs::One(json!(30))).unwrap(),
            json!(120.0)
        );
        assert_eq!(call(&acct, "getBalance", CallArgs::None).unwrap(), json!(120.0));
    }

    #[test]
    fn overdraft_is_rejected_and_balance_kept() {
        let acct = bank_account("ada", 10.0);
        let err = call(&acct, "withdraw", CallArgs::One(json!(11))).unwrap_err();
        assert!(matches!(err, CallError::Rejected(_)));
        assert_eq!(call(&acct, "getBalance", CallArgs::None).unwrap(), json!(10.0));
        assert_eq!(call(&acct, "history", CallArgs::None).unwrap(), json!([]));
    }

    #[test]
    fn non_positive_amounts_are_invalid() {
        let acct = bank_account("ada", 10.0);
        let err = call(&acct, "deposit", CallArgs::One(json!(-1))).unwrap_err();
        assert_eq!(err.method_name(), Some("deposit"));
        assert!(call(&acct, "deposit", CallArgs::None).is_err());
    }

    #[test]
    fn transfer_records_memo() {
        let acct = bank_account("ada", 10.0);
        call(&acct, "transfer", CallArgs::Two(json!(4), json!("rent"))).unwrap();
        let history = call(&acct, "history", CallArgs::None).unwrap();
        assert_eq!(history[0]["memo"], json!("rent"));
        assert_eq!(history[0]["kind"], json!("transfer"));
    }

    #[test]
    fn attributes_snapshot() {
        let acct = bank_account("ada", 10.0);
        call(&acct, "deposit", CallArgs::One(json!(5))).unwrap();
        let attrs = acct.attributes().unwrap();
        assert_eq!(attrs["owner"], json!("ada"));
        assert_eq!(attrs["balance"], json!(15.0));
        assert_eq!(attrs["transactions"], json!(1));
    }
}
