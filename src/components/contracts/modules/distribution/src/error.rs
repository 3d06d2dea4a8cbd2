use ruc::RucError;
use std::fmt;

/// Failures reported back to the caller, raised as `eg!(DistrError::X)`.
///
/// Every check that can produce one of these runs before the first write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistrError {
    NoValidatorDistInfo,
    NoDelegationDistInfo,
    NoValidatorCommission,
    SetWithdrawAddrDisabled,
    BlockedWithdrawAddress,
    BlockedRecipient,
    Unauthorized,
    InvalidOrigin,
    EmptyAmount,
    InsufficientCommunityPool,
    InvalidParams(String),
    InvalidGenesis(String),
}

impl DistrError {
    /// Whether the root cause of `e` is `self`.
    ///
    /// `InvalidParams` and `InvalidGenesis` match regardless of their detail.
    pub fn is_cause_of(&self, e: &dyn RucError) -> bool {
        let msg = e.get_lowest_msg();
        match self {
            DistrError::InvalidParams(_) => msg.contains("distribution: invalid params"),
            DistrError::InvalidGenesis(_) => msg.contains("distribution: invalid genesis"),
            _ => msg.contains(&self.to_string()),
        }
    }
}

impl fmt::Display for DistrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistrError::NoValidatorDistInfo => {
                write!(f, "distribution: no validator distribution info")
            }
            DistrError::NoDelegationDistInfo => {
                write!(f, "distribution: no delegation distribution info")
            }
            DistrError::NoValidatorCommission => {
                write!(f, "distribution: no validator commission to withdraw")
            }
            DistrError::SetWithdrawAddrDisabled => {
                write!(f, "distribution: set withdraw address disabled")
            }
            DistrError::BlockedWithdrawAddress => {
                write!(f, "distribution: withdraw address is a blocked account")
            }
            DistrError::BlockedRecipient => {
                write!(f, "distribution: recipient is a blocked account")
            }
            DistrError::Unauthorized => write!(f, "distribution: unauthorized"),
            DistrError::InvalidOrigin => {
                write!(f, "distribution: invalid transaction origin")
            }
            DistrError::EmptyAmount => write!(f, "distribution: empty amount"),
            DistrError::InsufficientCommunityPool => {
                write!(f, "distribution: community pool does not have sufficient coins")
            }
            DistrError::InvalidParams(detail) => {
                write!(f, "distribution: invalid params: {}", detail)
            }
            DistrError::InvalidGenesis(detail) => {
                write!(f, "distribution: invalid genesis: {}", detail)
            }
        }
    }
}
