//! Compact serialization of a parsed stylesheet.
//!
//! [§ 9 Serialization](https://www.w3.org/TR/css-syntax-3/#serialization) allows
//! any whitespace between tokens to be dropped as long as the result re-parses the
//! same way. The compact form here is what a minifier would emit: no comments, no
//! optional whitespace, selectors joined by `,` and declarations by `;`.

use core::fmt::Write as _;

use crate::parser::{Declaration, Rule, StyleRule, Stylesheet};

impl Stylesheet {
    /// Render the stylesheet in its canonical minified form.
    #[must_use]
    pub fn to_compact_string(&self) -> String {
        let mut out = String::new();
        write_rules(&mut out, &self.rules);
        out
    }
}

fn write_rules(out: &mut String, rules: &[Rule]) {
    for rule in rules {
        match rule {
            Rule::Style(style) => write_style_rule(out, style),
            Rule::BlockList(block) => {
                write_at_prelude(out, &block.name, &block.prelude);
                out.push('{');
                write_rules(out, &block.rules);
                out.push('}');
            }
            Rule::Keyframes(keyframes) => {
                write_at_prelude(out, &keyframes.keyword, &keyframes.name);
                out.push('{');
                for frame in &keyframes.frames {
                    write_style_rule(out, frame);
                }
                out.push('}');
            }
            Rule::Charset(charset) => {
                let _ = write!(out, "@charset \"{}\";", charset.encoding);
            }
            Rule::Import(import) => {
                let _ = write!(out, "@import url(\"{}\")", import.url);
                if !import.media.is_empty() {
                    out.push(' ');
                    out.push_str(&import.media);
                }
                out.push(';');
            }
            Rule::RuleSet(set) => {
                write_at_prelude(out, &set.name, &set.prelude);
                out.push('{');
                write_declarations(out, &set.declarations);
                out.push('}');
            }
            Rule::Statement(statement) => {
                write_at_prelude(out, &statement.name, &statement.prelude);
                out.push(';');
            }
        }
    }
}

fn write_at_prelude(out: &mut String, name: &str, prelude: &str) {
    out.push('@');
    out.push_str(name);
    if !prelude.is_empty() {
        out.push(' ');
        out.push_str(prelude);
    }
}

fn write_style_rule(out: &mut String, rule: &StyleRule) {
    out.push_str(&rule.selectors.join(","));
    out.push('{');
    write_declarations(out, &rule.declarations);
    out.push('}');
}

fn write_declarations(out: &mut String, declarations: &[Declaration]) {
    for (i, declaration) in declarations.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        out.push_str(&declaration.name);
        out.push(':');
        out.push_str(&declaration.text);
        if declaration.important {
            out.push_str("!important");
        }
    }
}
