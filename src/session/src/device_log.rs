use std::collections::VecDeque;

use crossbeam_channel::Receiver;
use log::{trace, warn};

/// One notification from a device, sent as `<username>_<command>:<value>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceEvent<'a> {
    pub username: &'a str,
    pub command: &'a str,
    pub value: &'a str,
}

impl<'a> DeviceEvent<'a> {
    pub fn parse(line: &'a str) -> Option<DeviceEvent<'a>> {
        let (key, value) = line.trim_end().split_once(':')?;
        let (username, command) = key.split_once('_')?;

        Some(DeviceEvent {
            username,
            command,
            value,
        })
    }
}

/// How many console lines are kept. Older lines scroll away.
pub const DEVICE_LOG_CAPACITY: usize = 500;

/// The console shown next to the cube: notifications addressed to the
/// session user, as `<command>:<value>` lines. Without a user every
/// notification is ignored.
#[derive(Debug, Clone, Default)]
pub struct DeviceLog {
    username: Option<String>,
    lines: VecDeque<String>,
}

impl DeviceLog {
    pub fn new(username: Option<&str>) -> DeviceLog {
        DeviceLog {
            username: username.map(str::to_owned),
            lines: VecDeque::new(),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Record a raw notification. Returns whether it was for us.
    pub fn accept(&mut self, line: &str) -> bool {
        let Some(username) = self.username.as_deref() else {
            trace!(target: "device_log", "Not logged in, ignoring `{line}`");
            return false;
        };

        let Some(event) = DeviceEvent::parse(line) else {
            warn!(target: "device_log", "Ignoring malformed notification `{line}`");
            return false;
        };

        if event.username != username {
            trace!(target: "device_log", "Ignoring notification for {}", event.username);
            return false;
        }

        if self.lines.len() == DEVICE_LOG_CAPACITY {
            self.lines.pop_front();
        }
        self.lines.push_back(format!("{}:{}", event.command, event.value));
        true
    }

    /// Take everything waiting on the channel without blocking. Returns how
    /// many lines were appended.
    pub fn drain(&mut self, notifications: &Receiver<String>) -> usize {
        notifications
            .try_iter()
            .filter(|line| self.accept(line))
            .count()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// The console contents, one line per notification.
    pub fn text(&self) -> String {
        self.lines.iter().map(|line| format!("{line}\n")).collect()
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::unbounded;

    use super::*;

    #[test]
    fn test_parse_event() {
        assert_eq!(
            DeviceEvent::parse("alice_status:ready"),
            Some(DeviceEvent {
                username: "alice",
                command: "status",
                value: "ready"
            })
        );
        assert_eq!(
            DeviceEvent::parse("alice_time:12:30\n").map(|event| event.value),
            Some("12:30")
        );
        assert_eq!(DeviceEvent::parse("no separators"), None);
        assert_eq!(DeviceEvent::parse("nouser:value"), None);
    }

    #[test]
    fn test_only_own_lines_are_kept() {
        let (tx, rx) = unbounded();
        let mut log = DeviceLog::new(Some("alice"));

        for line in ["alice_status:ready", "bob_status:busy", "garbage", "alice_move:R2"] {
            tx.send(line.to_owned()).unwrap();
        }

        assert_eq!(log.drain(&rx), 2);
        assert_eq!(log.lines().collect::<Vec<_>>(), ["status:ready", "move:R2"]);
        assert_eq!(log.text(), "status:ready\nmove:R2\n");
        assert_eq!(log.drain(&rx), 0);
    }

    #[test]
    fn test_nothing_is_kept_without_a_user() {
        let mut log = DeviceLog::new(None);
        assert!(!log.accept("_status:ready"));
        assert!(!log.accept("alice_status:ready"));
        assert_eq!(log.lines().count(), 0);

        let mut log = DeviceLog::new(Some("alice"));
        assert!(!log.accept("_status:ready"));
    }

    #[test]
    fn test_old_lines_scroll_away() {
        let mut log = DeviceLog::new(Some("alice"));
        for i in 0..DEVICE_LOG_CAPACITY + 5 {
            assert!(log.accept(&format!("alice_tick:{i}")));
        }

        assert_eq!(log.lines().count(), DEVICE_LOG_CAPACITY);
        assert_eq!(log.lines().next(), Some("tick:5"));
        assert_eq!(
            log.lines().last(),
            Some(format!("tick:{}", DEVICE_LOG_CAPACITY + 4).as_str())
        );
    }
}
