//! Channel kinds.

use serde::{Deserialize, Serialize};

/// The kind of channel a `create` row provisions.
///
/// Anything other than `text` or `voice` in the Type column fails row
/// parsing; the queue does not model category or thread creation through
/// this column.
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
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ChannelKind {
    /// Text channel.
    Text,
    /// Voice channel.
    Voice,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn rejects_unknown_kinds() {
        assert!(ChannelKind::from_str("video").is_err());
        assert_eq!(ChannelKind::from_str("Voice").unwrap(), ChannelKind::Voice);
    }
}
