//! Statistics logs in the format the notification service writes.

pub const ALARM: &str = "Alarm";
pub const ARCHIVE: &str = "Archive";
pub const LOGGING: &str = "Logging";
pub const DEFAULT_SERVICE: &str = "DefaultNotifyService";

pub const LOGGING_CHANNEL: &str = "LoggingChannel";
pub const ARCHIVING_CHANNEL: &str = "ArchivingChannel";
pub const TEST_CHANNEL_1: &str = "testNsStatsChannel1";
pub const TEST_CHANNEL_2: &str = "testNsStatsChannel2";

/// Optional field written in channel blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChannelExtra {
    #[default]
    None,
    OldestEvent,
    QueueBytes,
}

/// Line-by-line log builder.
///
/// Every line gets its own timestamp, one second after the previous one.
#[derive(Debug, Clone, Default)]
pub struct SampleLog {
    lines: Vec<String>,
    clock: u32,
}

impl SampleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that passes every check of test case `test_case` (1-5)
    pub fn passing(test_case: u8) -> Self {
        let all_factories = [ALARM, ARCHIVE, LOGGING, DEFAULT_SERVICE];
        let service_channels = [LOGGING_CHANNEL, ARCHIVING_CHANNEL, TEST_CHANNEL_1];

        match test_case {
            1 => Self::new().rounds(2, &all_factories, &service_channels, ChannelExtra::None),
            2 => Self::new().high_frequency_warning().rounds(
                5,
                &[DEFAULT_SERVICE],
                &[TEST_CHANNEL_1, TEST_CHANNEL_2],
                ChannelExtra::None,
            ),
            3 => Self::new().high_frequency_warning().rounds(
                6,
                &[DEFAULT_SERVICE],
                &[TEST_CHANNEL_2],
                ChannelExtra::None,
            ),
            4 => Self::new().high_frequency_warning().rounds(
                6,
                &all_factories,
                &service_channels,
                ChannelExtra::OldestEvent,
            ),
            _ => Self::new().high_frequency_warning().rounds(
                6,
                &all_factories,
                &service_channels,
                ChannelExtra::QueueBytes,
            ),
        }
    }

    pub fn high_frequency_warning(self) -> Self {
        self.line(
            "WARNING [nsStatistics] Statistics of Notification Services will be obtained \
             with a very high frequency (less than 1 minute time interval)",
        )
    }

    pub fn factory(self, name: &str) -> Self {
        let channels = if name == DEFAULT_SERVICE {
            format!("{TEST_CHANNEL_1}, {TEST_CHANNEL_2}")
        } else {
            format!("{name}Channel")
        };
        self.line(&format!(
            "INFO [nsStatistics] STATISTICS OF NOTIFICATION FACTORY {name} \
             [ Active event channels='{channels}' Num active event channels='1' ]"
        ))
    }

    pub fn channel(self, name: &str, extra: ChannelExtra) -> Self {
        let extra = match extra {
            ChannelExtra::None => String::new(),
            ChannelExtra::OldestEvent => "Oldest event='1500' ".to_string(),
            ChannelExtra::QueueBytes => "Size of queues [bytes]='0, 512' ".to_string(),
        };
        self.line(&format!(
            "INFO [nsStatistics] STATISTICS OF NOTIFICATION CHANNEL {name} \
             [ Num suppliers='1' Num consumers='2' Num events in queues='0, 3' \
             {extra}Slowest consumers='' ]"
        ))
    }

    pub fn debug_channel(self, name: &str) -> Self {
        self.line(&format!(
            "DEBUG [nsStatistics] DEBUG STATISTICS OF NOTIFICATION CHANNEL {name} \
             [ Num suppliers='1' Num consumers='2' Num admin suppliers='1' \
             Num admin consumers='1' Supplier names='supplier' Consumer names='c1, c2' \
             Supplier admin names='sadmin' Consumer admin names='cadmin' ]"
        ))
    }

    /// One collection round: every factory, then each channel and its debug block
    pub fn round(mut self, factories: &[&str], channels: &[&str], extra: ChannelExtra) -> Self {
        for factory in factories {
            self = self.factory(factory);
        }
        for channel in channels {
            self = self.channel(channel, extra).debug_channel(channel);
        }
        self
    }

    pub fn rounds(
        mut self,
        count: usize,
        factories: &[&str],
        channels: &[&str],
        extra: ChannelExtra,
    ) -> Self {
        for _ in 0..count {
            self = self.round(factories, channels, extra);
        }
        self
    }

    /// Timestamped raw line
    pub fn line(mut self, text: &str) -> Self {
        let stamp = format!(
            "2015-01-23T10:{:02}:{:02}.000",
            self.clock / 60 % 60,
            self.clock % 60
        );
        self.clock += 1;
        self.lines.push(format!("{stamp} {text}"));
        self
    }

    pub fn build(&self) -> String {
        let mut text = self.lines.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_timestamped_in_order() {
        let log = SampleLog::new().factory(ALARM).factory(LOGGING).build();
        let lines: Vec<&str> = log.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("2015-01-23T10:00:00.000 INFO [nsStatistics]"));
        assert!(lines[1].starts_with("2015-01-23T10:00:01.000 "));
    }

    #[test]
    fn test_round_writes_debug_block_per_channel() {
        let log = SampleLog::new()
            .round(&[ALARM], &[LOGGING_CHANNEL], ChannelExtra::OldestEvent)
            .build();

        assert_eq!(log.lines().count(), 3);
        assert!(log.contains("Oldest event='1500'"));
        assert!(log.contains("DEBUG STATISTICS OF NOTIFICATION CHANNEL LoggingChannel"));
    }

    #[test]
    fn test_empty_log_is_empty() {
        assert_eq!(SampleLog::new().build(), "");
    }
}
