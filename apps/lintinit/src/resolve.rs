//! Turns corpus statistics into style rules.
//!
//! A value is adopted only when it holds a strict majority of the
//! observations in its dimension (see `Tally::dominant`). Anything else,
//! including no observations at all, switches the rule off instead of
//! guessing. The output only adds style rules on top of
//! `eslint:recommended`; it never mentions any other rule.

use crate::models::fragment::RECOMMENDED;
use crate::models::{ConfigFragment, RuleSetting, StyleStatistic, Tally};
use serde_json::Value as Json;
use tracing::debug;

pub fn resolve(stats: &StyleStatistic) -> ConfigFragment {
    let mut frag = ConfigFragment::extending(RECOMMENDED);
    frag.set_rule("indent", decide("indent", &stats.indent, |u| u.to_option()));
    frag.set_rule(
        "quotes",
        decide("quotes", &stats.quotes, |q| Json::from(q.as_str())),
    );
    frag.set_rule(
        "linebreak-style",
        decide("linebreak-style", &stats.line_breaks, |l| {
            Json::from(l.as_str())
        }),
    );
    frag.set_rule(
        "semi",
        decide("semi", &stats.semicolons, |s| Json::from(s.as_str())),
    );
    frag
}

fn decide<T, F>(rule: &str, tally: &Tally<T>, option: F) -> RuleSetting
where
    T: Ord + Copy + std::fmt::Debug,
    F: Fn(T) -> Json,
{
    match tally.dominant() {
        Some(value) => {
            debug!(rule, ?value, observations = tally.total(), "dominant style");
            RuleSetting::error(option(value))
        }
        None => {
            debug!(rule, observations = tally.total(), "ambiguous style; rule off");
            RuleSetting::off()
        }
    }
}
