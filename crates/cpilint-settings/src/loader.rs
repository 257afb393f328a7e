//! Rules-file loading: imports, rules and exemptions.

use crate::registry::FactoryRegistry;
use crate::schema;
use crate::source::RulesSource;
use camino::{Utf8Path, Utf8PathBuf};
use cpilint_domain::{ConfigurationError, Rule};
use cpilint_types::{ArtifactId, Exemption, RuleId, ids};
use cpilint_xml::{Element, parse_document};
use std::collections::{BTreeMap, BTreeSet};

/// The merged result of a rules file and everything it imports.
#[derive(Debug, Default)]
pub struct RulesFile {
    rules: Vec<Rule>,
    exemptions: BTreeSet<Exemption>,
}

impl RulesFile {
    /// Rules in load order: imported rules first, depth-first.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn exemptions(&self) -> &BTreeSet<Exemption> {
        &self.exemptions
    }

    pub fn into_parts(self) -> (Vec<Rule>, BTreeSet<Exemption>) {
        (self.rules, self.exemptions)
    }

    fn merge(&mut self, other: RulesFile) {
        self.rules.extend(other.rules);
        self.exemptions.extend(other.exemptions);
    }
}

/// Load `path` and its imports, building every rule through `registry`.
pub fn load_rules_file(
    path: &Utf8Path,
    source: &dyn RulesSource,
    registry: &FactoryRegistry,
) -> Result<RulesFile, ConfigurationError> {
    let canonical = source.canonicalize(path)?;
    let mut loader = Loader {
        source,
        registry,
        ancestors: Vec::new(),
        visited: BTreeSet::new(),
    };
    let merged = loader.load(&canonical)?;

    check_unique_ids(&merged.rules)?;
    if merged.rules.is_empty() {
        return Err(ConfigurationError::NoRules);
    }
    warn_unknown_exemptions(&merged);

    tracing::debug!(
        rules = merged.rules.len(),
        exemptions = merged.exemptions.len(),
        "rules file loaded"
    );
    Ok(merged)
}

struct Loader<'a> {
    source: &'a dyn RulesSource,
    registry: &'a FactoryRegistry,
    /// Files currently being loaded, outermost first.
    ancestors: Vec<Utf8PathBuf>,
    /// Every file loaded so far; each contributes its rules once.
    visited: BTreeSet<Utf8PathBuf>,
}

impl Loader<'_> {
    fn load(&mut self, path: &Utf8Path) -> Result<RulesFile, ConfigurationError> {
        if self.ancestors.iter().any(|ancestor| ancestor == path) {
            return Err(ConfigurationError::CircularImport {
                path: path.to_string(),
            });
        }
        if !self.visited.insert(path.to_path_buf()) {
            tracing::debug!(path = %path, "rules file already merged, skipping");
            return Ok(RulesFile::default());
        }
        self.ancestors.push(path.to_path_buf());
        let loaded = self.load_document(path);
        self.ancestors.pop();
        loaded
    }

    fn load_document(&mut self, path: &Utf8Path) -> Result<RulesFile, ConfigurationError> {
        tracing::debug!(path = %path, "loading rules file");
        let text = self.source.read_to_string(path)?;
        let root = parse_document(&text).map_err(|source| ConfigurationError::Xml {
            path: path.to_string(),
            source,
        })?;
        schema::validate(&root).map_err(|message| ConfigurationError::Schema {
            path: path.to_string(),
            message,
        })?;

        let mut result = RulesFile::default();

        if let Some(imports) = root.child(ids::ELEMENT_IMPORTS) {
            let base = path.parent().unwrap_or_else(|| Utf8Path::new(""));
            for import in imports.children_named(ids::ELEMENT_IMPORT) {
                let target = self.source.canonicalize(&base.join(import.text()))?;
                tracing::debug!(from = %path, import = %target, "resolving import");
                result.merge(self.load(&target)?);
            }
        }

        if let Some(rules) = root.child(ids::ELEMENT_RULES) {
            for node in rules.children() {
                result.rules.push(self.build_rule(node)?);
            }
        }

        if let Some(exemptions) = root.child(ids::ELEMENT_EXEMPTIONS) {
            for node in exemptions.children_named(ids::ELEMENT_EXEMPTION) {
                result.exemptions.extend(expand_exemption(node));
            }
        }

        Ok(result)
    }

    fn build_rule(&self, node: &Element) -> Result<Rule, ConfigurationError> {
        let mut rule = self.registry.create(node)?;
        if let Some(id) = node.attribute(ids::ATTRIBUTE_ID) {
            rule.assign_id(RuleId::new(id))?;
        }
        Ok(rule)
    }
}

/// One exemption per listed artifact id.
fn expand_exemption(node: &Element) -> impl Iterator<Item = Exemption> + '_ {
    let rule_id = node
        .child(ids::ELEMENT_RULE_ID)
        .map(Element::text)
        .unwrap_or_default();
    node.children_named(ids::ELEMENT_ARTIFACT_ID)
        .map(move |artifact| Exemption::new(RuleId::new(rule_id), ArtifactId::new(artifact.text())))
}

fn check_unique_ids(rules: &[Rule]) -> Result<(), ConfigurationError> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for id in rules.iter().filter_map(Rule::id) {
        *counts.entry(id.as_str()).or_default() += 1;
    }
    let duplicates: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id.to_string())
        .collect();
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(ConfigurationError::DuplicateRuleIds { ids: duplicates })
    }
}

fn warn_unknown_exemptions(file: &RulesFile) {
    let known: BTreeSet<&RuleId> = file.rules.iter().filter_map(Rule::id).collect();
    let unknown: BTreeSet<&RuleId> = file
        .exemptions
        .iter()
        .map(Exemption::rule_id)
        .filter(|id| !known.contains(id))
        .collect();
    for rule_id in unknown {
        tracing::warn!(rule_id = %rule_id, "exemption names a rule id that no rule carries");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryRulesSource;
    use cpilint_domain::{
        Artifact, EvaluationError, ExtensionError, ExtensionRuleFactory, IssueEmitter, RuleLogic,
    };
    use proptest::prelude::*;

    fn load(source: &MemoryRulesSource, path: &str) -> Result<RulesFile, ConfigurationError> {
        load_rules_file(
            Utf8Path::new(path),
            source,
            &FactoryRegistry::with_builtins(),
        )
    }

    fn kinds_and_ids(file: &RulesFile) -> Vec<(String, Option<String>)> {
        let mut out: Vec<_> = file
            .rules()
            .iter()
            .map(|r| (r.kind().to_string(), r.id().map(|id| id.to_string())))
            .collect();
        out.sort();
        out
    }

    const CSRF_A: &str = r#"<cpilint><rules><csrf-protection-required id="a"/></rules></cpilint>"#;
    const DESC_B: &str =
        r#"<cpilint><rules><iflow-description-required id="b"/></rules></cpilint>"#;

    #[test]
    fn loads_rules_and_expands_exemptions() {
        let source = MemoryRulesSource::new().with_file(
            "rules.xml",
            r#"<cpilint>
                 <rules>
                   <disallowed-receiver-adapters id="r1"><disallow>FTP</disallow></disallowed-receiver-adapters>
                   <iflow-description-required/>
                 </rules>
                 <exemptions>
                   <exemption>
                     <rule-id>r1</rule-id>
                     <artifact-id>A</artifact-id>
                     <artifact-id>B</artifact-id>
                     <reason>legacy flows</reason>
                   </exemption>
                 </exemptions>
               </cpilint>"#,
        );
        let file = load(&source, "rules.xml").expect("loads");

        assert_eq!(file.rules().len(), 2);
        assert_eq!(file.rules()[0].id().map(RuleId::as_str), Some("r1"));
        assert_eq!(file.rules()[1].id(), None);
        let exempt: Vec<_> = file
            .exemptions()
            .iter()
            .map(|e| (e.rule_id().as_str(), e.artifact_id().as_str()))
            .collect();
        assert_eq!(exempt, vec![("r1", "A"), ("r1", "B")]);
    }

    #[test]
    fn imported_rules_come_first() {
        let source = MemoryRulesSource::new()
            .with_file(
                "main.xml",
                r#"<cpilint>
                     <imports><import>shared/base.xml</import></imports>
                     <rules><iflow-description-required id="main"/></rules>
                   </cpilint>"#,
            )
            .with_file("shared/base.xml", CSRF_A);
        let file = load(&source, "main.xml").expect("loads");
        let ids: Vec<_> = file.rules().iter().filter_map(Rule::id).map(RuleId::as_str).collect();
        assert_eq!(ids, vec!["a", "main"]);
    }

    #[test]
    fn imports_resolve_relative_to_the_importing_file() {
        let source = MemoryRulesSource::new()
            .with_file(
                "cfg/main.xml",
                "<cpilint><imports><import>team/team.xml</import></imports></cpilint>",
            )
            .with_file(
                "cfg/team/team.xml",
                "<cpilint><imports><import>../common.xml</import></imports></cpilint>",
            )
            .with_file("cfg/common.xml", CSRF_A);
        let file = load(&source, "cfg/main.xml").expect("loads");
        assert_eq!(file.rules().len(), 1);
    }

    #[test]
    fn sibling_import_order_does_not_change_the_result() {
        let forward = MemoryRulesSource::new()
            .with_file(
                "main.xml",
                "<cpilint><imports><import>a.xml</import><import>b.xml</import></imports></cpilint>",
            )
            .with_file("a.xml", CSRF_A)
            .with_file("b.xml", DESC_B);
        let backward = MemoryRulesSource::new()
            .with_file(
                "main.xml",
                "<cpilint><imports><import>b.xml</import><import>a.xml</import></imports></cpilint>",
            )
            .with_file("a.xml", CSRF_A)
            .with_file("b.xml", DESC_B);

        let forward = load(&forward, "main.xml").expect("loads");
        let backward = load(&backward, "main.xml").expect("loads");
        assert_eq!(kinds_and_ids(&forward), kinds_and_ids(&backward));
        assert_eq!(forward.exemptions(), backward.exemptions());
    }

    #[test]
    fn self_import_is_circular() {
        let source = MemoryRulesSource::new().with_file(
            "self.xml",
            r#"<cpilint>
                 <imports><import>./self.xml</import></imports>
                 <rules><csrf-protection-required/></rules>
               </cpilint>"#,
        );
        let err = load(&source, "self.xml").unwrap_err();
        match err {
            ConfigurationError::CircularImport { path } => assert_eq!(path, "self.xml"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn indirect_cycle_is_circular() {
        let source = MemoryRulesSource::new()
            .with_file("a.xml", "<cpilint><imports><import>b.xml</import></imports></cpilint>")
            .with_file("b.xml", "<cpilint><imports><import>a.xml</import></imports></cpilint>");
        assert!(matches!(
            load(&source, "a.xml"),
            Err(ConfigurationError::CircularImport { .. })
        ));
    }

    #[test]
    fn shared_import_is_merged_once() {
        let source = MemoryRulesSource::new()
            .with_file(
                "main.xml",
                "<cpilint><imports><import>a.xml</import><import>b.xml</import></imports></cpilint>",
            )
            .with_file("a.xml", "<cpilint><imports><import>common.xml</import></imports></cpilint>")
            .with_file("b.xml", "<cpilint><imports><import>common.xml</import></imports></cpilint>")
            .with_file(
                "common.xml",
                "<cpilint><rules><iflow-description-required id=\"desc\"/></rules></cpilint>",
            );
        let file = load(&source, "main.xml").expect("diamond import loads");
        assert_eq!(
            kinds_and_ids(&file),
            vec![("iflow-description-required".to_string(), Some("desc".to_string()))]
        );
    }

    #[test]
    fn reimport_through_a_dotted_path_is_merged_once() {
        let source = MemoryRulesSource::new()
            .with_file(
                "rules/main.xml",
                "<cpilint><imports><import>base.xml</import><import>../rules/./base.xml</import></imports>\
                 <rules><csrf-protection-required/></rules></cpilint>",
            )
            .with_file(
                "rules/base.xml",
                "<cpilint><rules><iflow-description-required/></rules></cpilint>",
            );
        let file = load(&source, "rules/main.xml").expect("loads");
        assert_eq!(file.rules().len(), 2);
    }

    proptest! {
        #[test]
        fn import_order_is_irrelevant(order in Just((0..4usize).collect::<Vec<_>>()).prop_shuffle()) {
            let parts = [
                CSRF_A,
                DESC_B,
                "<cpilint><rules><unencrypted-endpoints-not-allowed/></rules></cpilint>",
                "<cpilint><exemptions><exemption><rule-id>a</rule-id><artifact-id>X</artifact-id></exemption></exemptions></cpilint>",
            ];
            let imports: String = order
                .iter()
                .map(|i| format!("<import>part{i}.xml</import>"))
                .collect();
            let mut shuffled = MemoryRulesSource::new()
                .with_file("main.xml", format!("<cpilint><imports>{imports}</imports></cpilint>"));
            let mut ordered = MemoryRulesSource::new().with_file(
                "main.xml",
                "<cpilint><imports><import>part0.xml</import><import>part1.xml</import>\
                 <import>part2.xml</import><import>part3.xml</import></imports></cpilint>",
            );
            for (i, part) in parts.iter().enumerate() {
                shuffled = shuffled.with_file(format!("part{i}.xml"), *part);
                ordered = ordered.with_file(format!("part{i}.xml"), *part);
            }

            let shuffled = load(&shuffled, "main.xml").expect("loads");
            let ordered = load(&ordered, "main.xml").expect("loads");
            prop_assert_eq!(kinds_and_ids(&shuffled), kinds_and_ids(&ordered));
            prop_assert_eq!(shuffled.exemptions(), ordered.exemptions());
        }
    }

    #[test]
    fn duplicate_ids_in_one_document_are_fatal() {
        let source = MemoryRulesSource::new().with_file(
            "rules.xml",
            r#"<cpilint><rules>
                 <csrf-protection-required id="x"/>
                 <iflow-description-required id="x"/>
               </rules></cpilint>"#,
        );
        match load(&source, "rules.xml").unwrap_err() {
            ConfigurationError::DuplicateRuleIds { ids } => assert_eq!(ids, vec!["x"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_ids_across_an_import_are_fatal() {
        let source = MemoryRulesSource::new()
            .with_file(
                "main.xml",
                r#"<cpilint>
                     <imports><import>base.xml</import></imports>
                     <rules><iflow-description-required id="a"/></rules>
                   </cpilint>"#,
            )
            .with_file("base.xml", CSRF_A);
        assert!(matches!(
            load(&source, "main.xml"),
            Err(ConfigurationError::DuplicateRuleIds { .. })
        ));
    }

    #[test]
    fn a_file_without_rules_is_fatal() {
        let source = MemoryRulesSource::new().with_file(
            "rules.xml",
            "<cpilint><exemptions><exemption><rule-id>r</rule-id><artifact-id>A</artifact-id></exemption></exemptions></cpilint>",
        );
        assert!(matches!(
            load(&source, "rules.xml"),
            Err(ConfigurationError::NoRules)
        ));
    }

    #[test]
    fn schema_errors_name_the_file() {
        let source = MemoryRulesSource::new()
            .with_file("main.xml", "<cpilint><imports><import>bad.xml</import></imports></cpilint>")
            .with_file("bad.xml", "<cpilint><policies/></cpilint>");
        match load(&source, "main.xml").unwrap_err() {
            ConfigurationError::Schema { path, .. } => assert_eq!(path, "bad.xml"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_xml_is_reported() {
        let source = MemoryRulesSource::new().with_file("rules.xml", "<cpilint><rules>");
        assert!(matches!(
            load(&source, "rules.xml"),
            Err(ConfigurationError::Xml { .. })
        ));
    }

    #[test]
    fn missing_import_is_an_io_error() {
        let source = MemoryRulesSource::new().with_file(
            "main.xml",
            "<cpilint><imports><import>absent.xml</import></imports></cpilint>",
        );
        assert!(matches!(
            load(&source, "main.xml"),
            Err(ConfigurationError::Io { .. })
        ));
    }

    #[test]
    fn rule_configuration_errors_propagate() {
        let source = MemoryRulesSource::new().with_file(
            "rules.xml",
            "<cpilint><rules><allowed-receiver-adapters><allow>Carrier Pigeon</allow></allowed-receiver-adapters></rules></cpilint>",
        );
        assert!(matches!(
            load(&source, "rules.xml"),
            Err(ConfigurationError::InvalidRule { .. })
        ));
    }

    #[derive(Debug)]
    struct Noop;

    impl RuleLogic for Noop {
        fn inspect(
            &mut self,
            _artifact: &Artifact,
            _issues: &mut IssueEmitter<'_>,
        ) -> Result<(), EvaluationError> {
            Ok(())
        }
    }

    struct Strict;

    impl ExtensionRuleFactory for Strict {
        fn is_factory_for(&self, local_name: &str, namespace: &str) -> bool {
            local_name == "strict" && namespace == "urn:example:ext"
        }

        fn validate_configuration(&self, node: &Element) -> Result<(), ExtensionError> {
            if node.child("threshold").is_some() {
                Ok(())
            } else {
                Err(ExtensionError::new("missing <threshold>"))
            }
        }

        fn create_from(&self, node: &Element) -> Result<Rule, ExtensionError> {
            Ok(Rule::new(node.local_name(), Noop))
        }
    }

    #[test]
    fn extension_rules_load_through_the_registry() {
        let mut registry = FactoryRegistry::with_builtins();
        registry.register_extension(Strict);
        let source = MemoryRulesSource::new().with_file(
            "rules.xml",
            r#"<cpilint><rules>
                 <ext:strict xmlns:ext="urn:example:ext"><ext:threshold>3</ext:threshold></ext:strict>
               </rules></cpilint>"#,
        );
        let file = load_rules_file(Utf8Path::new("rules.xml"), &source, &registry).expect("loads");
        assert_eq!(file.rules()[0].kind(), "strict");
    }

    #[test]
    fn extension_validation_errors_carry_the_element_identity() {
        let mut registry = FactoryRegistry::with_builtins();
        registry.register_extension(Strict);
        let source = MemoryRulesSource::new().with_file(
            "rules.xml",
            r#"<cpilint><rules><ext:strict xmlns:ext="urn:example:ext"/></rules></cpilint>"#,
        );
        let err = load_rules_file(Utf8Path::new("rules.xml"), &source, &registry).unwrap_err();
        match err {
            ConfigurationError::Extension {
                local_name,
                namespace,
                ..
            } => {
                assert_eq!(local_name, "strict");
                assert_eq!(namespace, "urn:example:ext");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
