//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Naming scheme boolean algebra
//! - Allow-list complement semantics
//! - Duplicate detection keyed on content only
//! - Exemption filtering

use crate::consumer::{CollectingIssueConsumer, ExemptionFilteringIssueConsumer, IssueConsumer};
use crate::engine::run;
use crate::naming::NamingScheme;
use crate::query::{AdapterKind, Direction, ListValue};
use crate::rule::Rule;
use crate::rules::{DuplicateResourcesNotAllowed, ListRule};
use crate::test_support::{artifact, channel, groovy, iflow, ok};
use cpilint_types::{ArtifactId, ArtifactTag, Exemption, Issue, IssueKind, ListFacet, RuleId};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// Strategies
// ============================================================================

fn arb_name() -> impl Strategy<Value = String> {
    "[A-Za-z_]{0,12}"
}

fn arb_leaf() -> impl Strategy<Value = NamingScheme> {
    prop_oneof![
        "[A-Za-z_]{0,3}".prop_map(NamingScheme::starts_with),
        "[A-Za-z_]{0,3}".prop_map(NamingScheme::ends_with),
        ("[A-Za-z_]{0,4}", any::<bool>()).prop_map(|(v, ic)| NamingScheme::equals(v, ic)),
        Just("[A-Z].*").prop_map(|p| NamingScheme::regex(p).expect("valid regex")),
    ]
}

fn arb_scheme() -> impl Strategy<Value = NamingScheme> {
    arb_leaf().prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(NamingScheme::not),
            prop::collection::vec(inner.clone(), 1..3)
                .prop_map(|v| NamingScheme::and(v).expect("non-empty")),
            prop::collection::vec(inner, 1..3).prop_map(|v| NamingScheme::or(v).expect("non-empty")),
        ]
    })
}

fn arb_adapter_subset() -> impl Strategy<Value = BTreeSet<AdapterKind>> {
    prop::sample::subsequence(AdapterKind::RECEIVERS.to_vec(), 0..AdapterKind::RECEIVERS.len())
        .prop_map(|v| v.into_iter().collect())
}

// ============================================================================
// Naming scheme
// ============================================================================

proptest! {
    #[test]
    fn de_morgan_holds(a in arb_scheme(), b in arb_scheme(), name in arb_name()) {
        let lhs = NamingScheme::not(NamingScheme::and(vec![a.clone(), b.clone()]).expect("non-empty"));
        let rhs = NamingScheme::or(vec![NamingScheme::not(a), NamingScheme::not(b)]).expect("non-empty");
        prop_assert_eq!(lhs.test(&name), rhs.test(&name));
    }

    #[test]
    fn double_negation_is_identity(a in arb_scheme(), name in arb_name()) {
        let twice = NamingScheme::not(NamingScheme::not(a.clone()));
        prop_assert_eq!(twice.test(&name), a.test(&name));
    }

    #[test]
    fn regex_never_matches_a_strict_substring(prefix in "[a-z]{1,4}", body in "[A-Z]{1,4}") {
        let scheme = NamingScheme::regex("[A-Z]+").expect("valid");
        let name = format!("{prefix}{body}");
        prop_assert!(!scheme.test(&name));
        prop_assert!(scheme.test(&body));
    }
}

// ============================================================================
// Allow-list complement
// ============================================================================

proptest! {
    #[test]
    fn allow_list_searches_exactly_the_complement(allowed in arb_adapter_subset()) {
        let rule = ListRule::new(
            ListFacet::ReceiverAdapter,
            true,
            allowed.clone(),
            AdapterKind::RECEIVERS,
            |_| Vec::new(),
        );
        for kind in AdapterKind::RECEIVERS {
            prop_assert_eq!(rule.searched().contains(kind), !allowed.contains(kind));
        }
    }

    #[test]
    fn allow_list_flags_only_unlisted_adapters(
        allowed in arb_adapter_subset(),
        used in arb_adapter_subset(),
    ) {
        let channels = used
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                channel(&format!("c{i}"), kind.token(), Direction::Receiver, kind.component_type(), &[])
            })
            .collect();
        let flow = artifact("A", iflow(None, channels));

        let mut rules = vec![Rule::from_boxed(
            "allowed-receiver-adapters",
            crate::rules::receiver_adapters(true, allowed.clone()),
        )];
        let mut sink = CollectingIssueConsumer::new();
        run(&mut rules, ok(vec![flow]), &mut sink).expect("run");

        let flagged: BTreeSet<String> = sink
            .issues()
            .iter()
            .filter_map(|i| match i.kind() {
                IssueKind::DisallowedValue { value, .. } => Some(value.clone()),
                _ => None,
            })
            .collect();
        let expected: BTreeSet<String> = used
            .difference(&allowed)
            .map(|k| k.token().to_string())
            .collect();
        prop_assert_eq!(flagged, expected);
    }
}

// ============================================================================
// Duplicate detection
// ============================================================================

fn duplicate_issues(resources: Vec<(&str, Vec<u8>)>) -> Vec<Issue> {
    let artifacts = resources
        .into_iter()
        .map(|(id, bytes)| {
            let script = String::from_utf8_lossy(&bytes).into_owned();
            artifact(id, iflow(None, Vec::new())).with_resource(groovy("script.groovy", &script))
        })
        .collect();
    let mut rules = vec![Rule::new(
        "duplicate-resources-not-allowed",
        DuplicateResourcesNotAllowed::default(),
    )];
    let mut sink = CollectingIssueConsumer::new();
    run(&mut rules, ok(artifacts), &mut sink).expect("run");
    sink.into_issues()
}

proptest! {
    #[test]
    fn singleton_groups_are_never_flagged(content in "[a-z]{0,32}") {
        let issues = duplicate_issues(vec![("A", content.into_bytes())]);
        prop_assert!(issues.is_empty());
    }

    #[test]
    fn identical_bytes_form_one_group(content in "[a-z]{0,32}") {
        let issues = duplicate_issues(vec![
            ("A", content.clone().into_bytes()),
            ("B", content.into_bytes()),
        ]);
        prop_assert_eq!(issues.len(), 1);
        prop_assert_eq!(issues[0].tags().len(), 2);
    }

    #[test]
    fn mutating_one_byte_breaks_the_group(content in "[a-z]{1,32}", index in any::<prop::sample::Index>()) {
        let original = content.into_bytes();
        let mut mutated = original.clone();
        let i = index.index(mutated.len());
        mutated[i] = if mutated[i] == b'z' { b'a' } else { mutated[i] + 1 };
        let issues = duplicate_issues(vec![("A", original), ("B", mutated)]);
        prop_assert!(issues.is_empty());
    }
}

// ============================================================================
// Exemption filtering
// ============================================================================

fn arb_artifact_ids() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[A-E]", 1..4)
}

proptest! {
    #[test]
    fn suppressed_iff_every_tag_is_exempt(
        exempt in prop::collection::btree_set("[A-E]", 0..5),
        tagged in arb_artifact_ids(),
        has_rule_id in any::<bool>(),
    ) {
        let exemptions: Vec<Exemption> = exempt
            .iter()
            .map(|a| Exemption::new(RuleId::new("r1"), ArtifactId::new(a.as_str())))
            .collect();
        let mut filter = ExemptionFilteringIssueConsumer::new(&exemptions, CollectingIssueConsumer::new());

        let rule_id = RuleId::new("r1");
        let issue = Issue::spanning(
            IssueKind::MissingDescription,
            tagged.iter().map(|a| ArtifactTag::new(a.as_str(), a.as_str())),
            "x",
        )
        .expect("non-empty")
        .with_rule_id(has_rule_id.then_some(&rule_id));
        filter.consume(issue);

        let expect_suppressed = has_rule_id && tagged.is_subset(&exempt);
        prop_assert_eq!(filter.issues_consumed(), usize::from(!expect_suppressed));
        prop_assert_eq!(filter.suppressed(), usize::from(expect_suppressed));
    }
}
