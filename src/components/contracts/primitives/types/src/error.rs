use ruc::RucError;
use std::fmt;

/// Leading text of every `InvariantViolation`, used to classify an error chain.
pub const INVARIANT_VIOLATION: &str = "invariant violation";

/// The accounting has been driven into an inconsistent state.
///
/// Unlike an ordinary error this must abort the whole block or message being
/// processed, it is never reported back as a rejected request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation(pub String);

impl InvariantViolation {
    pub fn new<S: Into<String>>(detail: S) -> Self {
        InvariantViolation(detail.into())
    }
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", INVARIANT_VIOLATION, self.0)
    }
}

/// Whether the root cause of `e` is an `InvariantViolation`.
pub fn is_invariant_violation(e: &dyn RucError) -> bool {
    e.get_lowest_msg().contains(INVARIANT_VIOLATION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruc::*;

    fn fails_deep() -> Result<()> {
        Err(eg!(InvariantViolation::new("reference count underflow")))
    }

    fn fails_user() -> Result<()> {
        Err(eg!("no delegation distribution info"))
    }

    #[test]
    fn classify_error_chain() {
        let e = fails_deep().c(d!()).c(d!("withdraw")).unwrap_err();
        assert!(is_invariant_violation(&*e));

        let e = fails_user().c(d!()).unwrap_err();
        assert!(!is_invariant_violation(&*e));
    }
}
