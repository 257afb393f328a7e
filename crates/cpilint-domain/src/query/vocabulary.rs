//! Domain values that appear in integration-flow documents and rules files.
//!
//! Each value has a rules-file token (what users write) and the string the document stores.

use std::fmt;

/// Value that allow/disallow list rules range over.
pub trait ListValue: Copy + Ord + fmt::Debug + Send + Sync + 'static {
    /// Rules-file token, also used in issue payloads.
    fn token(self) -> &'static str;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Sender,
    Receiver,
}

impl Direction {
    /// Value of the channel's `direction` property.
    pub fn property_value(self) -> &'static str {
        match self {
            Direction::Sender => "Sender",
            Direction::Receiver => "Receiver",
        }
    }

    pub fn from_property(value: &str) -> Option<Self> {
        match value {
            "Sender" => Some(Direction::Sender),
            "Receiver" => Some(Direction::Receiver),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AdapterKind {
    Amqp,
    Ariba,
    As2,
    As4,
    Elster,
    Facebook,
    Ftp,
    Http,
    Https,
    IDoc,
    Jdbc,
    Jms,
    Kafka,
    Ldap,
    Mail,
    OData,
    OpenConnectors,
    ProcessDirect,
    Rfc,
    Sftp,
    Soap,
    SuccessFactors,
    Twitter,
    Xi,
}

impl AdapterKind {
    pub const ALL: &'static [AdapterKind] = &[
        AdapterKind::Amqp,
        AdapterKind::Ariba,
        AdapterKind::As2,
        AdapterKind::As4,
        AdapterKind::Elster,
        AdapterKind::Facebook,
        AdapterKind::Ftp,
        AdapterKind::Http,
        AdapterKind::Https,
        AdapterKind::IDoc,
        AdapterKind::Jdbc,
        AdapterKind::Jms,
        AdapterKind::Kafka,
        AdapterKind::Ldap,
        AdapterKind::Mail,
        AdapterKind::OData,
        AdapterKind::OpenConnectors,
        AdapterKind::ProcessDirect,
        AdapterKind::Rfc,
        AdapterKind::Sftp,
        AdapterKind::Soap,
        AdapterKind::SuccessFactors,
        AdapterKind::Twitter,
        AdapterKind::Xi,
    ];

    /// Adapters available on the receiver side.
    pub const RECEIVERS: &'static [AdapterKind] = &[
        AdapterKind::Amqp,
        AdapterKind::Ariba,
        AdapterKind::As2,
        AdapterKind::As4,
        AdapterKind::Elster,
        AdapterKind::Facebook,
        AdapterKind::Ftp,
        AdapterKind::Http,
        AdapterKind::IDoc,
        AdapterKind::Jdbc,
        AdapterKind::Jms,
        AdapterKind::Kafka,
        AdapterKind::Ldap,
        AdapterKind::Mail,
        AdapterKind::OData,
        AdapterKind::OpenConnectors,
        AdapterKind::ProcessDirect,
        AdapterKind::Rfc,
        AdapterKind::Sftp,
        AdapterKind::Soap,
        AdapterKind::SuccessFactors,
        AdapterKind::Twitter,
        AdapterKind::Xi,
    ];

    /// Adapters available on the sender side.
    pub const SENDERS: &'static [AdapterKind] = &[
        AdapterKind::Amqp,
        AdapterKind::Ariba,
        AdapterKind::As2,
        AdapterKind::As4,
        AdapterKind::Ftp,
        AdapterKind::Https,
        AdapterKind::IDoc,
        AdapterKind::Jms,
        AdapterKind::Kafka,
        AdapterKind::Mail,
        AdapterKind::OData,
        AdapterKind::ProcessDirect,
        AdapterKind::Sftp,
        AdapterKind::Soap,
        AdapterKind::SuccessFactors,
        AdapterKind::Xi,
    ];

    /// Value of the channel's `ComponentType` property.
    pub fn component_type(self) -> &'static str {
        match self {
            AdapterKind::Amqp => "AMQP",
            AdapterKind::Ariba => "Ariba",
            AdapterKind::As2 => "AS2",
            AdapterKind::As4 => "AS4",
            AdapterKind::Elster => "ELSTER",
            AdapterKind::Facebook => "Facebook",
            AdapterKind::Ftp => "FTP",
            AdapterKind::Http => "HTTP",
            AdapterKind::Https => "HTTPS",
            AdapterKind::IDoc => "IDOC",
            AdapterKind::Jdbc => "JDBC",
            AdapterKind::Jms => "JMS",
            AdapterKind::Kafka => "Kafka",
            AdapterKind::Ldap => "LDAP",
            AdapterKind::Mail => "Mail",
            AdapterKind::OData => "HCIOData",
            AdapterKind::OpenConnectors => "OpenConnectors",
            AdapterKind::ProcessDirect => "ProcessDirect",
            AdapterKind::Rfc => "RFC",
            AdapterKind::Sftp => "SFTP",
            AdapterKind::Soap => "SOAP",
            AdapterKind::SuccessFactors => "SuccessFactors",
            AdapterKind::Twitter => "Twitter",
            AdapterKind::Xi => "XI",
        }
    }

    pub fn from_component_type(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.component_type() == value)
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.token() == token)
    }

    /// Property keys holding the endpoint address, in lookup order.
    pub fn address_keys(self) -> &'static [&'static str] {
        match self {
            AdapterKind::Http => &["httpAddressWithoutQuery"],
            AdapterKind::Https => &["urlPath"],
            AdapterKind::Ftp | AdapterKind::Sftp => &["host"],
            _ => &["address"],
        }
    }
}

impl ListValue for AdapterKind {
    fn token(self) -> &'static str {
        match self {
            AdapterKind::Amqp => "AMQP",
            AdapterKind::Ariba => "Ariba",
            AdapterKind::As2 => "AS2",
            AdapterKind::As4 => "AS4",
            AdapterKind::Elster => "ELSTER",
            AdapterKind::Facebook => "Facebook",
            AdapterKind::Ftp => "FTP",
            AdapterKind::Http => "HTTP",
            AdapterKind::Https => "HTTPS",
            AdapterKind::IDoc => "IDoc",
            AdapterKind::Jdbc => "JDBC",
            AdapterKind::Jms => "JMS",
            AdapterKind::Kafka => "Kafka",
            AdapterKind::Ldap => "LDAP",
            AdapterKind::Mail => "Mail",
            AdapterKind::OData => "OData",
            AdapterKind::OpenConnectors => "OpenConnectors",
            AdapterKind::ProcessDirect => "ProcessDirect",
            AdapterKind::Rfc => "RFC",
            AdapterKind::Sftp => "SFTP",
            AdapterKind::Soap => "SOAP",
            AdapterKind::SuccessFactors => "SuccessFactors",
            AdapterKind::Twitter => "Twitter",
            AdapterKind::Xi => "XI",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MappingType {
    MessageMapping,
    OperationMapping,
    Xslt,
}

impl MappingType {
    pub const ALL: &'static [MappingType] = &[
        MappingType::MessageMapping,
        MappingType::OperationMapping,
        MappingType::Xslt,
    ];

    /// Value of a mapping step's `subActivityType` property.
    pub fn sub_activity_type(self) -> &'static str {
        match self {
            MappingType::MessageMapping => "MessageMapping",
            MappingType::OperationMapping => "OperationMapping",
            MappingType::Xslt => "XSLTMapping",
        }
    }

    pub fn from_sub_activity_type(value: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.sub_activity_type() == value)
    }
}

impl ListValue for MappingType {
    fn token(self) -> &'static str {
        match self {
            MappingType::MessageMapping => "message-mapping",
            MappingType::OperationMapping => "operation-mapping",
            MappingType::Xslt => "xslt",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScriptingLanguage {
    Groovy,
    JavaScript,
}

impl ScriptingLanguage {
    pub const ALL: &'static [ScriptingLanguage] =
        &[ScriptingLanguage::Groovy, ScriptingLanguage::JavaScript];
}

impl ListValue for ScriptingLanguage {
    fn token(self) -> &'static str {
        match self {
            ScriptingLanguage::Groovy => "groovy",
            ScriptingLanguage::JavaScript => "javascript",
        }
    }
}
