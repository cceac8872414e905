use biometrics::{Collector, Counter, Moments};

pub(crate) static CHAT_REQUESTS: Counter = Counter::new("salesbot.chat.requests");
pub(crate) static CHAT_FAILURES: Counter = Counter::new("salesbot.chat.failures");
pub(crate) static CHAT_SKIPPED: Counter = Counter::new("salesbot.chat.skipped");
pub(crate) static CHAT_DURATION: Moments = Moments::new("salesbot.chat.duration_seconds");
pub(crate) static CHAT_CHARTS: Counter = Counter::new("salesbot.chat.charts");

pub(crate) static STATS_REQUESTS: Counter = Counter::new("salesbot.stats.requests");
pub(crate) static STATS_FAILURES: Counter = Counter::new("salesbot.stats.failures");
pub(crate) static STATS_DURATION: Moments = Moments::new("salesbot.stats.duration_seconds");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CHAT_REQUESTS);
    collector.register_counter(&CHAT_FAILURES);
    collector.register_counter(&CHAT_SKIPPED);
    collector.register_moments(&CHAT_DURATION);
    collector.register_counter(&CHAT_CHARTS);

    collector.register_counter(&STATS_REQUESTS);
    collector.register_counter(&STATS_FAILURES);
    collector.register_moments(&STATS_DURATION);
}
