//! Local user identity and its registration state with the coordinator.

use crate::domain::{ChannelId, ChatEntry, DisplayName};

/// Registration progress of the local display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Registration {
    /// No name has been submitted yet.
    #[default]
    Unregistered,
    /// A name was submitted; the coordinator has not confirmed it.
    Pending,
    /// The coordinator confirmed the login.
    Registered,
}

/// The local user as known to this session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    display_name: Option<DisplayName>,
    channel_id: Option<ChannelId>,
    registration: Registration,
}

impl Identity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted name. A resubmission replaces the pending name.
    pub(crate) fn request(&mut self, name: DisplayName) {
        self.display_name = Some(name);
        if self.registration != Registration::Registered {
            self.registration = Registration::Pending;
        }
    }

    pub(crate) fn confirm(&mut self) {
        self.registration = Registration::Registered;
    }

    pub(crate) fn assign_channel(&mut self, channel_id: ChannelId) {
        self.channel_id = Some(channel_id);
    }

    pub fn display_name(&self) -> Option<&DisplayName> {
        self.display_name.as_ref()
    }

    /// Channel id of the local connection, if the coordinator reported one.
    pub fn channel_id(&self) -> Option<&ChannelId> {
        self.channel_id.as_ref()
    }

    pub fn registration(&self) -> Registration {
        self.registration
    }

    /// Whether `entry` was authored under the local display name.
    pub fn authored(&self, entry: &ChatEntry) -> bool {
        self.display_name
            .as_ref()
            .is_some_and(|name| entry.is_from(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;

    #[test]
    fn test_request_marks_pending_and_resubmission_replaces_name() {
        // テスト項目: 名前の再送信で保留中の名前が置き換わる
        // given (前提条件):
        let mut identity = Identity::new();
        identity.request(DisplayName::from("bob"));

        // when (操作):
        identity.request(DisplayName::from("robert"));

        // then (期待する結果):
        assert_eq!(identity.registration(), Registration::Pending);
        assert_eq!(identity.display_name(), Some(&DisplayName::from("robert")));
    }

    #[test]
    fn test_confirm_marks_registered() {
        // テスト項目: 確認後は登録済みになり、その後の request で Pending に戻らない
        // given (前提条件):
        let mut identity = Identity::new();
        identity.request(DisplayName::from("bob"));

        // when (操作):
        identity.confirm();
        identity.request(DisplayName::from("bobby"));

        // then (期待する結果):
        assert_eq!(identity.registration(), Registration::Registered);
    }

    #[test]
    fn test_authored_requires_a_name() {
        // テスト項目: 名前が未設定の場合はどのエントリも自分のものと判定されない
        // given (前提条件):
        let mut identity = Identity::new();
        let entry = ChatEntry::new(DisplayName::from(""), "hi", Timestamp::new(0));

        // when (操作):
        let before = identity.authored(&entry);
        identity.request(DisplayName::from(""));
        let after = identity.authored(&entry);

        // then (期待する結果):
        assert!(!before);
        assert!(after);
    }
}
