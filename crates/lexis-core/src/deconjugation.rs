use crate::language::ConjugationRuleSet;

/// Expand `terms` into candidate dictionary forms.
///
/// The output starts with the deduplicated input terms, followed by every
/// candidate produced by one rewrite pass over those inputs, in discovery
/// order. Derived candidates of one character or less are discarded; inputs
/// are always kept.
pub fn deconjugate(terms: &[String], rules: &ConjugationRuleSet) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        push_unique(&mut out, term.clone());
    }

    for term in terms {
        for rule in rules.rules() {
            let Some(stem) = term.strip_suffix(rule.inflected.as_str()) else {
                continue;
            };

            for form in &rule.dict {
                let candidate = format!("{stem}{form}");

                let stripped = rule
                    .prefix
                    .as_deref()
                    .filter(|prefix| !prefix.is_empty())
                    .and_then(|prefix| candidate.strip_prefix(prefix))
                    .map(str::to_string);

                push_candidate(&mut out, candidate);
                if let Some(stripped) = stripped {
                    push_candidate(&mut out, stripped);
                }
            }
        }
    }

    out
}

fn push_candidate(out: &mut Vec<String>, candidate: String) {
    if candidate.chars().count() > 1 {
        push_unique(out, candidate);
    }
}

fn push_unique(out: &mut Vec<String>, term: String) {
    if !out.contains(&term) {
        out.push(term);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::language::ConjugationRule;

    fn terms(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn japanese() -> ConjugationRuleSet {
        ConjugationRuleSet::new(vec![
            ConjugationRule::new("た", &["る"]),
            ConjugationRule::new("かった", &["い"]),
            ConjugationRule::new("った", &["う", "つ", "る"]),
            ConjugationRule::new("きになる", &["く"]).with_prefix("お"),
        ])
    }

    #[test]
    fn test_ta_form() {
        let out = deconjugate(&terms(&["食べた"]), &japanese());
        assert_eq!(out, terms(&["食べた", "食べる"]));
    }

    #[test]
    fn test_multiple_forms_in_rule_order() {
        let out = deconjugate(&terms(&["待った"]), &japanese());
        assert_eq!(out, terms(&["待った", "待っる", "待う", "待つ", "待る"]));
    }

    #[test]
    fn test_prefix_stripped_variant() {
        let out = deconjugate(&terms(&["お書きになる"]), &japanese());
        assert_eq!(out, terms(&["お書きになる", "お書く", "書く"]));
    }

    #[test]
    fn test_no_match_passes_through() {
        let input = terms(&["猫", "猫", "犬"]);
        assert_eq!(deconjugate(&input, &japanese()), terms(&["猫", "犬"]));
        assert_eq!(
            deconjugate(&input, &ConjugationRuleSet::default()),
            terms(&["猫", "犬"])
        );
    }

    #[test]
    fn test_single_pass_only() {
        // "食べたた" -> "食べたる" but "食べたる" is not rewritten again
        let rules = ConjugationRuleSet::new(vec![
            ConjugationRule::new("た", &["る"]),
            ConjugationRule::new("たる", &["x"]),
        ]);
        let out = deconjugate(&terms(&["食べたた"]), &rules);
        assert_eq!(out, terms(&["食べたた", "食べたる"]));
    }

    #[test]
    fn test_short_candidates_discarded_and_inputs_kept() {
        let rules = ConjugationRuleSet::new(vec![ConjugationRule::new("た", &["", "る"])]);
        let out = deconjugate(&terms(&["た", "見た"]), &rules);
        // "" and "る" from "た" and "見" from "見た" are too short
        assert_eq!(out, terms(&["た", "見た", "見る"]));
    }

    #[test]
    fn test_originals_kept_and_no_duplicates() {
        let input = terms(&["Walked", "walked", "食べた", "高かった"]);
        let rules = ConjugationRuleSet::new(vec![
            ConjugationRule::new("ed", &["", "e"]),
            ConjugationRule::new("た", &["る"]),
            ConjugationRule::new("かった", &["い"]),
        ]);
        let once = deconjugate(&input, &rules);
        let twice = deconjugate(&once, &rules);

        for term in &input {
            assert!(once.contains(term), "{term} missing");
        }
        assert_eq!(&twice[..once.len()], &once[..]);

        let unique: HashSet<&String> = once.iter().collect();
        assert_eq!(unique.len(), once.len());
        assert!(once.iter().skip(input.len()).all(|t| t.chars().count() > 1));
    }
}
