use cpilint_types::ArtifactTag;
use cpilint_xml::Element;
use std::collections::BTreeMap;
use std::fmt;

/// Kind of resource bundled with an artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceCategory {
    GroovyScript,
    JavaScript,
    MessageMapping,
    OperationMapping,
    Xslt,
    Xsd,
    Wsdl,
    Edmx,
    Json,
    Archive,
}

impl ResourceCategory {
    pub const ALL: &'static [ResourceCategory] = &[
        ResourceCategory::GroovyScript,
        ResourceCategory::JavaScript,
        ResourceCategory::MessageMapping,
        ResourceCategory::OperationMapping,
        ResourceCategory::Xslt,
        ResourceCategory::Xsd,
        ResourceCategory::Wsdl,
        ResourceCategory::Edmx,
        ResourceCategory::Json,
        ResourceCategory::Archive,
    ];

    /// Rules-file token.
    pub fn token(self) -> &'static str {
        match self {
            ResourceCategory::GroovyScript => "groovy-script",
            ResourceCategory::JavaScript => "javascript",
            ResourceCategory::MessageMapping => "message-mapping",
            ResourceCategory::OperationMapping => "operation-mapping",
            ResourceCategory::Xslt => "xslt",
            ResourceCategory::Xsd => "xsd",
            ResourceCategory::Wsdl => "wsdl",
            ResourceCategory::Edmx => "edmx",
            ResourceCategory::Json => "json",
            ResourceCategory::Archive => "archive",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.token() == token)
    }

    pub fn is_script(self) -> bool {
        matches!(
            self,
            ResourceCategory::GroovyScript | ResourceCategory::JavaScript
        )
    }

    pub fn is_mapping(self) -> bool {
        matches!(
            self,
            ResourceCategory::MessageMapping
                | ResourceCategory::OperationMapping
                | ResourceCategory::Xslt
        )
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    /// Path below `src/main/resources`, `/`-separated.
    pub name: String,
    pub category: ResourceCategory,
    pub content: Vec<u8>,
}

impl Resource {
    pub fn new(
        name: impl Into<String>,
        category: ResourceCategory,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            content: content.into(),
        }
    }

    /// Last segment of `name`.
    pub fn file_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// Parsed integration-flow document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IflowDocument {
    root: Element,
}

impl IflowDocument {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

/// One inspected integration flow: its tag, its document and its resources.
///
/// Read-only once built; rules inspect it and never keep references past `inspect`.
#[derive(Clone, Debug)]
pub struct Artifact {
    tag: ArtifactTag,
    document: IflowDocument,
    resources: BTreeMap<ResourceCategory, Vec<Resource>>,
}

impl Artifact {
    pub fn new(tag: ArtifactTag, document: IflowDocument) -> Self {
        Self {
            tag,
            document,
            resources: BTreeMap::new(),
        }
    }

    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.add_resource(resource);
        self
    }

    pub fn add_resource(&mut self, resource: Resource) {
        self.resources
            .entry(resource.category)
            .or_default()
            .push(resource);
    }

    pub fn tag(&self) -> &ArtifactTag {
        &self.tag
    }

    pub fn document(&self) -> &IflowDocument {
        &self.document
    }

    /// Resources of one category, in the order they were added.
    pub fn resources(&self, category: ResourceCategory) -> &[Resource] {
        self.resources
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every resource, grouped by category in category order.
    pub fn all_resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values().flatten()
    }
}
