//! Greeting short-circuit.
//!
//! A short message that opens with a greeting gets an immediate templated
//! reply mentioning the live alert count, or that the network is healthy.

use crate::intent::{classify, strip_runtime_context, tokenize, Intent};
use crate::responders::LiveCounts;
use crate::telemetry::TelemetrySnapshot;

/// Greeting openers with the salutation echoed back
const GREETINGS: &[(&str, &str)] = &[
    ("good morning", "Good morning"),
    ("good afternoon", "Good afternoon"),
    ("good evening", "Good evening"),
    ("hello", "Hello"),
    ("hi", "Hi"),
    ("hey", "Hey"),
    ("hiya", "Hi"),
    ("howdy", "Howdy"),
    ("greetings", "Greetings"),
];

/// Extra tokens tolerated after the greeting ("hi there", "hello netmonit ai")
const MAX_TRAILING_TOKENS: usize = 2;

/// Salutation to echo if `query` is just a greeting.
///
/// Trailing tokens that carry a request of their own ("hi, analyze impact")
/// disqualify the greeting.
pub fn detect(query: &str) -> Option<&'static str> {
    let tokens = tokenize(strip_runtime_context(query));
    GREETINGS.iter().find_map(|(opener, salutation)| {
        let parts: Vec<&str> = opener.split_whitespace().collect();
        let opens = tokens.len() >= parts.len()
            && tokens.iter().zip(&parts).all(|(t, p)| t.as_str() == *p);
        if !opens || tokens.len() > parts.len() + MAX_TRAILING_TOKENS {
            return None;
        }
        let rest = tokens[parts.len()..].join(" ");
        (rest.is_empty() || classify(&rest) == Intent::GeneralKnowledge).then_some(*salutation)
    })
}

pub fn is_greeting(query: &str) -> bool {
    detect(query).is_some()
}

/// Templated reply grounded in live counts
pub fn reply(salutation: &str, snapshot: &TelemetrySnapshot) -> String {
    let counts = LiveCounts::from_snapshot(snapshot);
    if counts.is_healthy() {
        format!(
            "👋 {}! I'm NetMonit AI. The network is healthy: {} device(s) online and no active alerts. Ask me about status, a specific device, or a networking term.",
            salutation, counts.devices
        )
    } else {
        let critical = if counts.critical_alerts > 0 {
            format!(", {} of them critical", counts.critical_alerts)
        } else {
            String::new()
        };
        format!(
            "👋 {}! I'm NetMonit AI. There are {} active alert(s){} and {} unhealthy device(s) right now. Ask me for a **status** report or to **analyze root cause**.",
            salutation, counts.alerts, critical, counts.unhealthy_devices
        )
    }
}
