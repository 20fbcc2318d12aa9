//! Role classification: cascading strategies, first success wins

use crate::config::RoleRule;
use crate::lexicon::{Lexicon, SkillBucket};
use regex::Regex;
use std::sync::Arc;

/// Words that mark a phrase as a role title even when it is not one of the
/// canonical lexicon titles
const ROLE_SUFFIXES: &[&str] = &[
    "developer", "engineer", "scientist", "manager", "designer", "analyst",
];

/// Infers a single role label from the text and the extracted skill set.
/// Always produces exactly one label; the skill-composition table ends in an
/// unconditional default.
pub struct RoleClassifier {
    lexicon: Arc<Lexicon>,
    direct_patterns: Vec<Regex>,
    rules: Vec<RoleRule>,
    default_role: String,
}

impl RoleClassifier {
    pub fn new(lexicon: Arc<Lexicon>, rules: Vec<RoleRule>, default_role: String) -> Self {
        let suffix_group = ROLE_SUFFIXES.join("|");
        let templates = [
            format!(
                r"(?:seeking|looking for|hiring)\s+(?:a|an)?\s*([\w\s/-]+?(?:{}))",
                suffix_group
            ),
            format!(
                r"(?:join us as|position as|role as)\s+(?:a|an)?\s*([\w\s/-]+?(?:{}))",
                suffix_group
            ),
            format!(
                r"([\w\s/-]+?(?:{}))\s+(?:who|responsible|position|role)",
                suffix_group
            ),
            format!(r"(?:we are|we're)\s+([\w\s/-]+?(?:{}))", suffix_group),
        ];

        let direct_patterns = templates
            .iter()
            .map(|t| Regex::new(t).expect("Invalid role pattern"))
            .collect();

        Self {
            lexicon,
            direct_patterns,
            rules,
            default_role,
        }
    }

    pub fn classify(&self, text: &str, skills: &[String]) -> String {
        let text = text.to_lowercase();

        if let Some(role) = self.from_direct_phrase(&text) {
            return role;
        }
        if let Some(role) = self.from_keyword_frequency(&text) {
            return role;
        }
        self.from_skill_composition(skills)
    }

    /// Strategy 1: the first matching template short-circuits the classifier
    fn from_direct_phrase(&self, text: &str) -> Option<String> {
        for pattern in &self.direct_patterns {
            let candidate = match pattern.captures(text).and_then(|c| c.get(1)) {
                Some(m) => normalize_whitespace(m.as_str()),
                None => continue,
            };
            log::info!("Direct role pattern matched: '{}'", candidate);

            for title in self.lexicon.role_titles() {
                if candidate.contains(title.as_str()) || title.contains(&candidate) {
                    log::info!("Matched canonical role: '{}'", title);
                    return Some(title_case(title));
                }
            }

            if ROLE_SUFFIXES.iter().any(|s| candidate.contains(s)) {
                return Some(title_case(&candidate));
            }
        }
        None
    }

    /// Strategy 2: occurrence counting over canonical titles; ties resolve
    /// to the first title reaching the maximum
    fn from_keyword_frequency(&self, text: &str) -> Option<String> {
        let mut best: Option<(&String, usize)> = None;
        for title in self.lexicon.role_titles() {
            let count = text.matches(title.as_str()).count();
            if count >= 1 && best.map_or(true, |(_, max)| count > max) {
                best = Some((title, count));
            }
        }

        best.map(|(title, count)| {
            log::info!("Role detected by keyword frequency: '{}' ({} occurrences)", title, count);
            title_case(title)
        })
    }

    /// Strategy 3: bucket the skill set and walk the priority table in order
    fn from_skill_composition(&self, skills: &[String]) -> String {
        let count = |bucket: SkillBucket| {
            skills.iter().filter(|s| self.lexicon.in_bucket(s, bucket)).count()
        };
        let frontend = count(SkillBucket::Frontend);
        let backend = count(SkillBucket::Backend);
        let data = count(SkillBucket::Data);
        let devops = count(SkillBucket::DevOps);

        log::info!(
            "Skill-composition counts -> frontend: {}, backend: {}, data: {}, devops: {}",
            frontend, backend, data, devops
        );

        for rule in &self.rules {
            if frontend >= rule.frontend_min
                && backend >= rule.backend_min
                && data >= rule.data_min
                && devops >= rule.devops_min
            {
                return rule.role.clone();
            }
        }
        self.default_role.clone()
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Capitalize the first letter of every alphabetic run, lowercasing the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
