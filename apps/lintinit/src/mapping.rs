//! Answer-to-rule mapping for the prompt path.
//!
//! Every answer field maps independently onto a piece of the configuration.
//! Boolean environment answers only ever add `true` entries; a `false`
//! answer leaves the key absent.

use crate::models::fragment::RECOMMENDED;
use crate::models::{AnswerRecord, ConfigFragment, IndentUnit, RuleSetting, Semicolons};

/// Build the full prompt-path configuration from explicit answers.
pub fn map_answers(record: &AnswerRecord) -> ConfigFragment {
    let mut frag = ConfigFragment::extending(RECOMMENDED);
    frag.set_rule(
        "indent",
        RuleSetting::error(IndentUnit::Spaces(record.indent_size).to_option()),
    );
    frag.set_rule("quotes", RuleSetting::error(record.quote_style.as_str()));
    frag.set_rule(
        "linebreak-style",
        RuleSetting::error(record.line_break.as_str()),
    );
    let semi = if record.require_semicolons {
        Semicolons::Always
    } else {
        Semicolons::Never
    };
    frag.set_rule("semi", RuleSetting::error(semi.as_str()));
    frag.merge(map_platform(record))
}

/// Environment, parser and plugin facts shared by the prompt and auto paths.
///
/// The React answer only applies when JSX is enabled.
pub fn map_platform(record: &AnswerRecord) -> ConfigFragment {
    let mut frag = ConfigFragment::default();
    if record.ecma_version_modern {
        frag.enable_env("es6");
    }
    for env in &record.environments {
        frag.enable_env(env);
    }
    if record.module_system {
        frag.enable_env("commonjs");
    }
    if record.enable_jsx {
        frag.enable_feature("jsx");
        if record.enable_react {
            frag.enable_feature("experimentalObjectRestSpread");
            frag.add_plugin("react");
        }
    }
    frag
}
