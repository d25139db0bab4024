//! Background facts shown on the capture screen

use serde::Serialize;
use std::time::Duration;

/// How long each quote stays on screen
pub const QUOTE_ROTATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnvironmentalStat {
    pub number: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

pub const STATS: [EnvironmentalStat; 3] = [
    EnvironmentalStat {
        number: "8M",
        label: "Tons of plastic enter oceans yearly",
    },
    EnvironmentalStat {
        number: "500",
        label: "Years for plastic to decompose",
    },
    EnvironmentalStat {
        number: "1M",
        label: "Seabirds killed by plastic annually",
    },
];

pub const QUOTES: [Quote; 3] = [
    Quote {
        text: "We are the first generation to feel the impact of climate change and the last generation that can do something about it.",
        author: "Barack Obama",
    },
    Quote {
        text: "The Earth does not belong to us; we belong to the Earth. All things are connected like the blood that unites one family.",
        author: "Chief Seattle",
    },
    Quote {
        text: "Every piece of plastic ever made still exists today.",
        author: "Environmental Fact",
    },
];

/// Quote to show `elapsed` after the capture screen appeared
pub fn quote_at(elapsed: Duration) -> &'static Quote {
    let index = (elapsed.as_millis() / QUOTE_ROTATION.as_millis()) as usize % QUOTES.len();
    &QUOTES[index]
}
