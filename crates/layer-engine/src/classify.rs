//! File-name classification into style variants.
//!
//! The file-name convention: the token before the first underscore is the
//! primary type key. If a rule is registered under exactly that key, it
//! wins. Otherwise every registered rule is scanned in registration order
//! and the first whose search term occurs anywhere in the full file name
//! wins — first match, not best match. Files matching nothing get generic
//! styling; that is a warning, never an error.

use atlas_common::ProjectConfig;
use tracing::warn;

use crate::variant::VariantKind;

/// Classification result for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Variant(VariantKind),
    /// No registered rule matched; plain line/polygon styling plus a
    /// default circle marker for points.
    Generic,
}

impl Classification {
    pub fn variant(&self) -> Option<VariantKind> {
        match self {
            Classification::Variant(kind) => Some(*kind),
            Classification::Generic => None,
        }
    }
}

/// One registered rule: a name, its variant, and its search terms.
#[derive(Debug, Clone)]
struct Rule {
    name: String,
    kind: VariantKind,
    terms: Vec<String>,
}

/// Registration-ordered rule set.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    /// Build the rule set from the project config, in config order. Rules
    /// naming an unknown variant are dropped with a warning.
    pub fn from_config(config: &ProjectConfig) -> Self {
        let mut rules = Vec::new();
        for rule in &config.class_search_terms {
            match VariantKind::from_name(&rule.variant) {
                Some(kind) => rules.push(Rule {
                    name: rule.variant.clone(),
                    kind,
                    terms: rule.terms.iter().map(|t| t.to_string()).collect(),
                }),
                None => warn!(variant = %rule.variant, "unknown style variant in config"),
            }
        }
        Self { rules }
    }

    /// The default registration used when a project config defines no
    /// search terms of its own.
    pub fn builtin() -> Self {
        let rules = [
            ("Querungen", VariantKind::Crossings, vec!["Querungen"]),
            ("Laufrouten", VariantKind::PupilRoutes, vec!["Laufrouten"]),
            (
                "Fuehrungsform",
                VariantKind::InfrastructureInventory,
                vec!["Fuehrungsform", "Führungsform", "Radschnellweg"],
            ),
            (
                "Massnahmen",
                VariantKind::RecommendedMeasures,
                vec!["-Linie", "-Punkt"],
            ),
            ("Schutzgebiete", VariantKind::ProtectedAreas, vec!["Schutzgebiete"]),
            ("Fotopunkte", VariantKind::PhotoPoints, vec!["FotoPunktlayer"]),
        ];
        Self {
            rules: rules
                .into_iter()
                .map(|(name, kind, terms)| Rule {
                    name: name.to_string(),
                    kind,
                    terms: terms.into_iter().map(String::from).collect(),
                })
                .collect(),
        }
    }

    /// Classify a file name (without extension).
    pub fn classify(&self, file_name: &str) -> Classification {
        let token = type_token(file_name);

        if !token.is_empty() {
            if let Some(rule) = self.rules.iter().find(|r| r.name == token) {
                return Classification::Variant(rule.kind);
            }
        }

        for rule in &self.rules {
            if rule.terms.iter().any(|term| file_name.contains(term.as_str())) {
                return Classification::Variant(rule.kind);
            }
        }

        warn!(
            file = file_name,
            "no style variant for file, using generic styling"
        );
        Classification::Generic
    }
}

/// The token before the first underscore; empty when there is none.
fn type_token(file_name: &str) -> &str {
    match file_name.find('_') {
        Some(index) => &file_name[..index],
        None => "",
    }
}
