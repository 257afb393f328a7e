use camino::{Utf8Path, Utf8PathBuf};
use std::fmt::Write as _;

const IFLOW_PATH: &str = "src/main/resources/scenarioflows/integrationflow";
const BPMN_NS: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";
const IFL_NS: &str = "http:///com.sap.ifl.model/Ifl.xsd";

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Utf8Path, contents: impl AsRef<[u8]>) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}

/// A sender or receiver channel in a generated flow document.
#[derive(Clone, Debug)]
pub struct ChannelFixture {
    id: String,
    name: String,
    direction: &'static str,
    component_type: String,
    properties: Vec<(String, String)>,
}

impl ChannelFixture {
    pub fn sender(id: &str, component_type: &str) -> Self {
        Self::new(id, "Sender", component_type)
    }

    pub fn receiver(id: &str, component_type: &str) -> Self {
        Self::new(id, "Receiver", component_type)
    }

    fn new(id: &str, direction: &'static str, component_type: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            direction,
            component_type: component_type.to_string(),
            properties: Vec::new(),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn property(mut self, key: &str, value: &str) -> Self {
        self.properties.push((key.to_string(), value.to_string()));
        self
    }
}

/// An unpacked artifact: manifest, one flow document and resource files.
#[derive(Clone, Debug)]
pub struct ArtifactFixture {
    id: String,
    name: Option<String>,
    description: Option<String>,
    channels: Vec<ChannelFixture>,
    mapping_steps: Vec<(String, String)>,
    resources: Vec<(String, Vec<u8>)>,
}

impl ArtifactFixture {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: None,
            description: None,
            channels: Vec::new(),
            mapping_steps: Vec::new(),
            resources: Vec::new(),
        }
    }

    /// `Bundle-Name`; without it the manifest only declares the symbolic name.
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn described(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    pub fn channel(mut self, channel: ChannelFixture) -> Self {
        self.channels.push(channel);
        self
    }

    /// A mapping step with the given `subActivityType` (e.g. `MessageMapping`).
    pub fn mapping_step(mut self, id: &str, sub_activity_type: &str) -> Self {
        self.mapping_steps
            .push((id.to_string(), sub_activity_type.to_string()));
        self
    }

    /// A file below `src/main/resources`, e.g. `script/main.groovy`.
    pub fn resource(mut self, relative_path: &str, contents: impl AsRef<[u8]>) -> Self {
        self.resources
            .push((relative_path.to_string(), contents.as_ref().to_vec()));
        self
    }

    pub fn manifest(&self) -> String {
        let mut out = String::from("Manifest-Version: 1.0\r\n");
        let _ = write!(out, "Bundle-SymbolicName: {}; singleton:=true\r\n", self.id);
        if let Some(name) = &self.name {
            let _ = write!(out, "Bundle-Name: {name}\r\n");
        }
        out
    }

    pub fn iflow_xml(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<bpmn2:definitions xmlns:bpmn2="{BPMN_NS}" xmlns:ifl="{IFL_NS}">"#
        );
        out.push_str("  <bpmn2:collaboration id=\"Collaboration_1\">\n");
        if let Some(text) = &self.description {
            let _ = writeln!(
                out,
                "    <bpmn2:documentation>{}</bpmn2:documentation>",
                escape(text)
            );
        }
        for channel in &self.channels {
            let _ = writeln!(
                out,
                r#"    <bpmn2:messageFlow id="{}" name="{}">"#,
                escape(&channel.id),
                escape(&channel.name)
            );
            let mut properties = vec![
                ("direction".to_string(), channel.direction.to_string()),
                ("ComponentType".to_string(), channel.component_type.clone()),
            ];
            properties.extend(channel.properties.iter().cloned());
            write_properties(&mut out, &properties, "      ");
            out.push_str("    </bpmn2:messageFlow>\n");
        }
        out.push_str("  </bpmn2:collaboration>\n");
        out.push_str("  <bpmn2:process id=\"Process_1\">\n");
        for (id, sub_activity_type) in &self.mapping_steps {
            let _ = writeln!(
                out,
                r#"    <bpmn2:callActivity id="{0}" name="{0}">"#,
                escape(id)
            );
            let properties = [
                ("activityType".to_string(), "Mapping".to_string()),
                ("subActivityType".to_string(), sub_activity_type.clone()),
            ];
            write_properties(&mut out, &properties, "      ");
            out.push_str("    </bpmn2:callActivity>\n");
        }
        out.push_str("  </bpmn2:process>\n");
        out.push_str("</bpmn2:definitions>\n");
        out
    }

    /// Write the artifact to `root/<id>` and return that directory.
    pub fn write_to(&self, root: &Utf8Path) -> std::io::Result<Utf8PathBuf> {
        let dir = root.join(&self.id);
        write_file(&dir.join("META-INF/MANIFEST.MF"), self.manifest())?;
        write_file(
            &dir.join(IFLOW_PATH).join(format!("{}.iflw", self.id)),
            self.iflow_xml(),
        )?;
        for (path, contents) in &self.resources {
            write_file(&dir.join("src/main/resources").join(path), contents)?;
        }
        Ok(dir)
    }
}

fn write_properties(out: &mut String, properties: &[(String, String)], indent: &str) {
    let _ = writeln!(out, "{indent}<bpmn2:extensionElements>");
    for (key, value) in properties {
        let _ = writeln!(
            out,
            "{indent}  <ifl:property><key>{}</key><value>{}</value></ifl:property>",
            escape(key),
            escape(value)
        );
    }
    let _ = writeln!(out, "{indent}</bpmn2:extensionElements>");
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_the_unpacked_layout() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");

        let dir = ArtifactFixture::new("Orders")
            .resource("script/main.groovy", "def x = 1")
            .write_to(&root)
            .expect("write");

        assert!(dir.join("META-INF/MANIFEST.MF").is_file());
        assert!(dir.join(IFLOW_PATH).join("Orders.iflw").is_file());
        assert!(dir.join("src/main/resources/script/main.groovy").is_file());
    }

    #[test]
    fn flow_document_carries_channels_and_description() {
        let xml = ArtifactFixture::new("A")
            .described("Moves <orders>")
            .channel(
                ChannelFixture::receiver("MessageFlow_1", "HTTP")
                    .named("To ERP")
                    .property("httpAddressWithoutQuery", "http://erp"),
            )
            .mapping_step("CallActivity_1", "XSLTMapping")
            .iflow_xml();

        assert!(xml.contains("<bpmn2:documentation>Moves &lt;orders&gt;</bpmn2:documentation>"));
        assert!(xml.contains(r#"<bpmn2:messageFlow id="MessageFlow_1" name="To ERP">"#));
        assert!(xml.contains("<key>ComponentType</key><value>HTTP</value>"));
        assert!(xml.contains("<key>subActivityType</key><value>XSLTMapping</value>"));
    }

    #[test]
    fn manifest_name_is_optional() {
        assert!(!ArtifactFixture::new("A").manifest().contains("Bundle-Name"));
        assert!(
            ArtifactFixture::new("A")
                .named("Flow A")
                .manifest()
                .contains("Bundle-Name: Flow A\r\n")
        );
    }
}
