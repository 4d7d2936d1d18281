//! Results of a metered action.

/// How a metered action ended.
///
/// [`ActionOutcome::InvalidInput`], [`ActionOutcome::Busy`] and
/// [`ActionOutcome::QuotaExhausted`] consume nothing. Every other variant used
/// one unit of quota, including [`ActionOutcome::NoOutput`] and
/// [`ActionOutcome::Failed`]. Only [`ActionOutcome::Completed`] carries output;
/// the rest carry the text to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome<T> {
    /// The action produced output
    Completed(T),
    /// The same feature already has a request outstanding; nothing was done
    Busy,
    /// The input was empty; nothing was done
    InvalidInput {
        /// Prompt shown to the user
        message: String,
    },
    /// The quota for the feature is used up; nothing was sent
    QuotaExhausted {
        /// Upgrade notice
        notice: String,
    },
    /// The backend answered without usable output
    NoOutput {
        /// Fallback message
        message: String,
    },
    /// The request or a follow-up step failed
    Failed {
        /// Error description
        message: String,
    },
}

impl<T> ActionOutcome<T> {
    /// True for [`ActionOutcome::Completed`].
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionOutcome::Completed(_))
    }

    /// Output, if the action completed.
    pub fn output(&self) -> Option<&T> {
        match self {
            ActionOutcome::Completed(output) => Some(output),
            _ => None,
        }
    }

    /// Consume the outcome, keeping only the output.
    pub fn into_output(self) -> Option<T> {
        match self {
            ActionOutcome::Completed(output) => Some(output),
            _ => None,
        }
    }

    /// User-facing text for non-completed outcomes.
    pub fn message(&self) -> Option<&str> {
        match self {
            ActionOutcome::Completed(_) | ActionOutcome::Busy => None,
            ActionOutcome::InvalidInput { message }
            | ActionOutcome::NoOutput { message }
            | ActionOutcome::Failed { message } => Some(message),
            ActionOutcome::QuotaExhausted { notice } => Some(notice),
        }
    }
}
