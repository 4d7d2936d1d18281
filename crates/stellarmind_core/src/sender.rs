//! Chat participants.

use serde::{Deserialize, Serialize};

/// Who wrote a chat message.
///
/// # Examples
///
/// ```
/// use stellarmind_core::Sender;
///
/// assert_ne!(Sender::User, Sender::Ai);
/// assert_eq!(format!("{}", Sender::Ai), "ai");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person using the session
    #[display("user")]
    User,
    /// The assistant
    #[display("ai")]
    Ai,
}
