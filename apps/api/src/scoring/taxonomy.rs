//! Skill taxonomy — the fixed table of recognized skill terms grouped by category.
//!
//! Loaded once on first use and shared read-only by every request. Each record
//! carries its category, canonical display name and compiled whole-word matcher.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoring::normalizer::whole_word_regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Programming,
    Frameworks,
    Databases,
    Cloud,
    Tools,
    Aiml,
    Data,
    Mobile,
    Web,
}

/// Raw taxonomy table. Terms are lower-case literals, not regex.
const TAXONOMY_TABLE: &[(SkillCategory, &[&str])] = &[
    (
        SkillCategory::Programming,
        &[
            "javascript", "python", "java", "c++", "c#", "typescript", "ruby", "php", "swift",
            "kotlin", "go", "rust", "scala", "perl", "r", "matlab", "c",
        ],
    ),
    (
        SkillCategory::Frameworks,
        &[
            "react", "reactjs", "react.js", "angular", "vue", "vuejs", "vue.js", "node.js",
            "nodejs", "express", "expressjs", "django", "flask", "spring", "springboot",
            "laravel", ".net", "next.js", "nextjs", "nuxt",
        ],
    ),
    (
        SkillCategory::Databases,
        &[
            "sql", "mongodb", "postgresql", "postgres", "mysql", "redis", "oracle", "dynamodb",
            "cassandra", "elasticsearch", "firebase", "sqlite", "mariadb",
        ],
    ),
    (
        SkillCategory::Cloud,
        &[
            "aws", "amazon web services", "azure", "microsoft azure", "gcp", "google cloud",
            "docker", "kubernetes", "k8s", "terraform", "jenkins", "ci/cd", "heroku", "vercel",
        ],
    ),
    (
        SkillCategory::Tools,
        &[
            "git", "github", "gitlab", "bitbucket", "jira", "confluence", "agile", "scrum",
            "rest api", "restful", "graphql", "microservices", "webpack", "babel", "npm", "yarn",
        ],
    ),
    (
        SkillCategory::Aiml,
        &[
            "machine learning", "deep learning", "tensorflow", "pytorch", "keras",
            "scikit-learn", "nlp", "natural language processing", "computer vision",
            "artificial intelligence", "neural networks", "cnn", "rnn", "lstm",
        ],
    ),
    (
        SkillCategory::Data,
        &[
            "data science", "data analysis", "data analytics", "pandas", "numpy", "matplotlib",
            "tableau", "power bi", "excel", "statistics", "big data", "hadoop", "spark",
            "jupyter",
        ],
    ),
    (
        SkillCategory::Mobile,
        &["ios", "android", "react native", "flutter", "xamarin", "mobile development"],
    ),
    (
        SkillCategory::Web,
        &[
            "html", "html5", "css", "css3", "sass", "scss", "less", "tailwind", "bootstrap",
            "jquery", "ajax", "responsive design",
        ],
    ),
];

/// One taxonomy record.
#[derive(Debug, Clone)]
pub struct SkillPattern {
    pub category: SkillCategory,
    pub term: &'static str,
    pub display_name: String,
    matcher: Regex,
}

impl SkillPattern {
    pub fn is_match(&self, normalized_text: &str) -> bool {
        self.matcher.is_match(normalized_text)
    }
}

/// Immutable, flattened taxonomy in table order.
#[derive(Debug)]
pub struct SkillTaxonomy {
    patterns: Vec<SkillPattern>,
}

impl SkillTaxonomy {
    fn load() -> Self {
        let mut patterns = Vec::new();
        for (category, terms) in TAXONOMY_TABLE {
            for &term in terms.iter() {
                match whole_word_regex(term) {
                    Ok(matcher) => patterns.push(SkillPattern {
                        category: *category,
                        term,
                        display_name: canonicalize(term),
                        matcher,
                    }),
                    // Terms are escaped literals; this only trips if the table is edited badly.
                    Err(e) => tracing::error!("Skipping taxonomy term '{term}': {e}"),
                }
            }
        }
        Self { patterns }
    }

    pub fn patterns(&self) -> &[SkillPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

static TAXONOMY: Lazy<SkillTaxonomy> = Lazy::new(SkillTaxonomy::load);

/// The process-wide taxonomy. First call compiles every matcher.
pub fn taxonomy() -> &'static SkillTaxonomy {
    &TAXONOMY
}

/// Maps a raw taxonomy term to its display name.
///
/// Rules, first match wins:
/// 1. `c++`, `c#`, `c`, `r` have fixed spellings.
/// 2. Dotted names title-case each `.`-separated segment (`node.js` → `Node.Js`).
/// 3. Multi-word names title-case each word.
/// 4. Anything else gets its first character upper-cased.
pub fn canonicalize(term: &str) -> String {
    match term {
        "c++" => return "C++".to_string(),
        "c#" => return "C#".to_string(),
        "c" => return "C".to_string(),
        "r" => return "R".to_string(),
        _ => {}
    }

    if term.contains('.') {
        term.split('.').map(capitalize).collect::<Vec<_>>().join(".")
    } else if term.contains(' ') {
        term.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
    } else {
        capitalize(term)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
