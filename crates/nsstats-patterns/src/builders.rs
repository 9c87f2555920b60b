//! Regex sources for the lines the statistics service writes.
//!
//! Every builder returns a pattern string rather than a compiled `Regex`, so
//! the checker decides when to compile and can cache by source text. Names
//! are inserted as-is: callers pass channel and factory names that contain
//! no regex metacharacters.
//!
//! The pattern text is echoed verbatim in every report line, so the
//! redundant escapes (`\=`, `\'`, `\ `) are part of the output format and
//! must not be tidied away.

const INFO_TAG: &str = r"INFO\ \[nsStatistics\]\s+";
const DEBUG_TAG: &str = r"DEBUG\ \[nsStatistics\]\s+";
const OPEN_BLOCK: &str = r"\s+\[\s+";

/// Which optional fields a channel statistics block carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelFlags {
    /// `Size of queues [bytes]` is reported
    pub queue_bytes: bool,
    /// `Oldest event` is reported
    pub oldest_event: bool,
}

impl ChannelFlags {
    pub fn with_queue_bytes() -> Self {
        Self {
            queue_bytes: true,
            oldest_event: false,
        }
    }

    pub fn with_oldest_event() -> Self {
        Self {
            queue_bytes: false,
            oldest_event: true,
        }
    }
}

/// Statistics block of one notification factory
pub fn factory_stats(factory_name: &str) -> String {
    format!(
        r"{INFO_TAG}STATISTICS OF NOTIFICATION FACTORY {factory_name}{OPEN_BLOCK}Active event channels\=\'.*\'\s+Num active event channels\=\'\d+\'\s+\]"
    )
}

/// Statistics block of one channel.
///
/// The block holds between three and six fields; `queue_bytes` and
/// `oldest_event` decide whether those two fields may appear at all.
pub fn channel_stats(channel_name: &str, queue_bytes: bool, oldest_event: bool) -> String {
    channel_stats_with(
        channel_name,
        ChannelFlags {
            queue_bytes,
            oldest_event,
        },
    )
}

pub fn channel_stats_with(channel_name: &str, flags: ChannelFlags) -> String {
    let mut fields = vec![
        r"Num suppliers\=\'\d+\'\s+",
        r"Num consumers\=\'\d+\'\s+",
        r"Num events in queues=\'(\d+(\,\s)?)*\'\s+",
    ];
    if flags.queue_bytes {
        fields.push(r"Size of queues \[bytes\]=\'(\d+(\,\s)?)*\'\s+");
    }
    if flags.oldest_event {
        fields.push(r"Oldest event=\'\d+\'\s+");
    }
    fields.push(r"Slowest consumers=\'.*\'\s+");

    format!(
        r"{INFO_TAG}STATISTICS OF NOTIFICATION CHANNEL {channel_name}{OPEN_BLOCK}({}){{3,6}}",
        fields.join("|")
    )
}

/// Debug statistics block of one channel: exactly eight fields, then `]`
pub fn debug_channel_stats(channel_name: &str) -> String {
    let fields = [
        r"Num suppliers\=\'\d+\'\s+",
        r"Num consumers\=\'\d+\'\s+",
        r"Num admin suppliers\=\'\d+\'\s+",
        r"Num admin consumers\=\'\d+\'\s+",
        r"Supplier names\=\'[^\']*\'\s+",
        r"Consumer names\=\'[^\']*\'\s+",
        r"Supplier admin names\=\'[^\']*\'\s+",
        r"Consumer admin names\=\'[^\']*\'\s+",
    ];

    format!(
        r"{DEBUG_TAG}DEBUG STATISTICS OF NOTIFICATION CHANNEL {channel_name}{OPEN_BLOCK}({}){{8}}\]",
        fields.join("|")
    )
}

/// Warning logged when statistics are collected more than once a minute
pub fn high_frequency_warning() -> String {
    concat!(
        r"WARNING \[nsStatistics\] Statistics of Notification Services will",
        r" be obtained with a very high frequency \(less than 1 minute time interval\)"
    )
    .to_string()
}

/// Factory header text, matched anywhere
pub fn factory_header(factory_name: &str) -> String {
    format!("STATISTICS OF NOTIFICATION FACTORY {factory_name}")
}

/// Channel header text as written on its own tab-indented line
pub fn channel_header(channel_name: &str) -> String {
    format!("\tSTATISTICS OF NOTIFICATION CHANNEL {channel_name}")
}

/// Debug channel header text
pub fn debug_channel_header(channel_name: &str) -> String {
    format!("DEBUG STATISTICS OF NOTIFICATION CHANNEL {channel_name}")
}

/// Channel header text in any form, including the debug one
pub fn any_channel_header(channel_name: &str) -> String {
    format!("STATISTICS OF NOTIFICATION CHANNEL {channel_name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_builders_are_pure() {
        assert_eq!(factory_stats("Alarm"), factory_stats("Alarm"));
        assert_eq!(
            channel_stats("LoggingChannel", true, false),
            channel_stats("LoggingChannel", true, false)
        );
        assert_eq!(debug_channel_stats("X"), debug_channel_stats("X"));
        assert_eq!(high_frequency_warning(), high_frequency_warning());
    }

    #[test]
    fn test_every_pattern_compiles() {
        let patterns = [
            factory_stats("DefaultNotifyService"),
            channel_stats("LoggingChannel", false, false),
            channel_stats("LoggingChannel", true, false),
            channel_stats("LoggingChannel", false, true),
            channel_stats("LoggingChannel", true, true),
            debug_channel_stats("ArchivingChannel"),
            high_frequency_warning(),
            channel_header("LoggingChannel"),
        ];
        for pattern in &patterns {
            assert!(Regex::new(pattern).is_ok(), "pattern failed: {}", pattern);
        }
    }

    #[test]
    fn test_flags_gate_optional_fields() {
        let plain = channel_stats("C", false, false);
        assert!(!plain.contains("Size of queues"));
        assert!(!plain.contains("Oldest event"));

        let bytes = channel_stats_with("C", ChannelFlags::with_queue_bytes());
        assert!(bytes.contains(r"Size of queues \[bytes\]"));
        assert!(!bytes.contains("Oldest event"));

        let oldest = channel_stats_with("C", ChannelFlags::with_oldest_event());
        assert!(oldest.contains("Oldest event"));
        assert!(oldest.ends_with("{3,6}"));
    }

    #[test]
    fn test_factory_pattern_matches_block() {
        let re = Regex::new(&factory_stats("Alarm")).unwrap();
        let line = "2015-01-23T16:51:58.123 INFO [nsStatistics] STATISTICS OF NOTIFICATION FACTORY Alarm [ Active event channels='AlarmChannel' Num active event channels='1' ]";
        assert_eq!(re.find_iter(line).count(), 1);

        let other = Regex::new(&factory_stats("Archive")).unwrap();
        assert_eq!(other.find_iter(line).count(), 0);
    }

    #[test]
    fn test_warning_matches() {
        let re = Regex::new(&high_frequency_warning()).unwrap();
        let line = "WARNING [nsStatistics] Statistics of Notification Services will be obtained with a very high frequency (less than 1 minute time interval)";
        assert!(re.is_match(line));
    }

    #[test]
    fn test_factory_pattern_text_is_stable() {
        assert_eq!(
            factory_stats("Alarm"),
            r"INFO\ \[nsStatistics\]\s+STATISTICS OF NOTIFICATION FACTORY Alarm\s+\[\s+Active event channels\=\'.*\'\s+Num active event channels\=\'\d+\'\s+\]"
        );
    }

    #[test]
    fn test_channel_header_has_leading_tab() {
        assert_eq!(
            channel_header("LoggingChannel"),
            "\tSTATISTICS OF NOTIFICATION CHANNEL LoggingChannel"
        );
    }
}
