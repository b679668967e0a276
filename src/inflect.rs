//! Inflection
//!
//! Pluralization and identifier casing used for route naming. The planner
//! and the mapper only talk to the [`Inflector`] trait so the rule set can
//! be swapped for one that matches a different framework's edge cases.

mod rules;

use crate::error::{AppError, RouteError};
use heck::ToSnakeCase;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// String conventions required by route declaration.
pub trait Inflector {
    /// Plural form of an underscored word (`project` -> `projects`).
    fn pluralize(&self, word: &str) -> String;

    /// Singular form of an underscored word (`projects` -> `project`).
    fn singularize(&self, word: &str) -> String;

    /// Split a model identifier into underscored path segments.
    ///
    /// `Projects::Deliverable` and `projects/deliverable` both become
    /// `["projects", "deliverable"]`.
    fn underscore_path(&self, identifier: &str) -> Result<Vec<String>, RouteError>;
}

/// Project-specific additions to the default rule table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InflectionConfig {
    /// `[singular, plural]` pairs.
    #[serde(default)]
    pub irregular: Vec<[String; 2]>,

    /// Words whose singular and plural forms are identical.
    #[serde(default)]
    pub uncountable: Vec<String>,
}

impl InflectionConfig {
    pub fn validate(&self) -> Result<(), String> {
        for [singular, plural] in &self.irregular {
            if singular.trim().is_empty() || plural.trim().is_empty() {
                return Err("Irregular inflections need both a singular and a plural".to_string());
            }
        }
        if self.uncountable.iter().any(|w| w.trim().is_empty()) {
            return Err("Uncountable words cannot be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    fn new(pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
struct Uncountable {
    word: String,
    pattern: Regex,
}

/// Rule-table English inflector.
#[derive(Debug, Clone)]
pub struct EnglishInflector {
    plurals: Vec<Rule>,
    singulars: Vec<Rule>,
    uncountables: Vec<Uncountable>,
}

impl Default for EnglishInflector {
    fn default() -> Self {
        Self::new()
    }
}

impl EnglishInflector {
    /// Inflector loaded with the default English table.
    pub fn new() -> Self {
        Self::build(&InflectionConfig::default())
            .expect("built-in inflection rules are valid regular expressions")
    }

    /// Default table plus the additions in `config`, which take priority.
    pub fn with_config(config: &InflectionConfig) -> Result<Self, AppError> {
        config.validate().map_err(AppError::ConfigError)?;
        Self::build(config).map_err(|e| AppError::ConfigError(format!("Invalid inflection: {}", e)))
    }

    fn build(config: &InflectionConfig) -> Result<Self, regex::Error> {
        let mut inflector = EnglishInflector {
            plurals: compile(rules::PLURALS)?,
            singulars: compile(rules::SINGULARS)?,
            uncountables: Vec::new(),
        };
        for (singular, plural) in rules::IRREGULARS {
            inflector.add_irregular(singular, plural)?;
        }
        for word in rules::UNCOUNTABLES {
            inflector.add_uncountable(word)?;
        }
        for [singular, plural] in &config.irregular {
            inflector.add_irregular(singular.trim(), plural.trim())?;
        }
        for word in &config.uncountable {
            inflector.add_uncountable(word.trim())?;
        }
        Ok(inflector)
    }

    fn add_uncountable(&mut self, word: &str) -> Result<(), regex::Error> {
        let word = word.to_lowercase();
        let pattern = Regex::new(&format!(r"(?i)\b{}$", regex::escape(&word)))?;
        self.uncountables.push(Uncountable { word, pattern });
        Ok(())
    }

    fn add_irregular(&mut self, singular: &str, plural: &str) -> Result<(), regex::Error> {
        self.uncountables
            .retain(|u| u.word != singular && u.word != plural);

        let mut s_chars = singular.chars();
        let mut p_chars = plural.chars();
        let (Some(s0), Some(p0)) = (s_chars.next(), p_chars.next()) else {
            return Ok(());
        };
        let s_rest = s_chars.as_str();
        let p_rest = p_chars.as_str();

        if s0.to_lowercase().eq(p0.to_lowercase()) {
            let s_head = regex::escape(&s0.to_string());
            let p_head = regex::escape(&p0.to_string());
            let to_plural = format!("${{1}}{}", literal(p_rest));
            let to_singular = format!("${{1}}{}", literal(s_rest));
            self.plurals.push(Rule::new(
                &format!("(?i)({}){}$", s_head, regex::escape(s_rest)),
                &to_plural,
            )?);
            self.plurals.push(Rule::new(
                &format!("(?i)({}){}$", p_head, regex::escape(p_rest)),
                &to_plural,
            )?);
            self.singulars.push(Rule::new(
                &format!("(?i)({}){}$", s_head, regex::escape(s_rest)),
                &to_singular,
            )?);
            self.singulars.push(Rule::new(
                &format!("(?i)({}){}$", p_head, regex::escape(p_rest)),
                &to_singular,
            )?);
        } else {
            let s_pattern = format!("(?i){}$", regex::escape(singular));
            let p_pattern = format!("(?i){}$", regex::escape(plural));
            self.plurals.push(Rule::new(&s_pattern, &literal(plural))?);
            self.plurals.push(Rule::new(&p_pattern, &literal(plural))?);
            self.singulars.push(Rule::new(&s_pattern, &literal(singular))?);
            self.singulars.push(Rule::new(&p_pattern, &literal(singular))?);
        }
        Ok(())
    }

    fn is_uncountable(&self, word: &str) -> bool {
        self.uncountables.iter().any(|u| u.pattern.is_match(word))
    }

    fn apply(&self, word: &str, rules: &[Rule]) -> String {
        if word.is_empty() || self.is_uncountable(word) {
            return word.to_string();
        }
        rules
            .iter()
            .rev()
            .find(|rule| rule.pattern.is_match(word))
            .map(|rule| {
                rule.pattern
                    .replace(word, rule.replacement.as_str())
                    .into_owned()
            })
            .unwrap_or_else(|| word.to_string())
    }
}

fn compile(table: &[(&str, &str)]) -> Result<Vec<Rule>, regex::Error> {
    table
        .iter()
        .map(|(pattern, replacement)| Rule::new(pattern, replacement))
        .collect()
}

/// Escape `$` so user-supplied words are inserted verbatim by `Regex::replace`.
fn literal(text: &str) -> String {
    text.replace('$', "$$")
}

impl Inflector for EnglishInflector {
    fn pluralize(&self, word: &str) -> String {
        self.apply(word, &self.plurals)
    }

    fn singularize(&self, word: &str) -> String {
        self.apply(word, &self.singulars)
    }

    fn underscore_path(&self, identifier: &str) -> Result<Vec<String>, RouteError> {
        let trimmed = identifier.trim();
        if trimmed.is_empty() {
            return Err(RouteError::InvalidModelName(identifier.to_string()));
        }
        trimmed
            .split("::")
            .flat_map(|part| part.split('/'))
            .map(|segment| {
                let underscored = segment.trim().to_snake_case();
                if underscored.is_empty() {
                    Err(RouteError::InvalidModelName(identifier.to_string()))
                } else {
                    Ok(underscored)
                }
            })
            .collect()
    }
}
